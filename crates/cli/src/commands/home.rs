//! Home screen.

use std::io::Write;

use vitrine_storefront::AppState;
use vitrine_storefront::clock::Clock;
use vitrine_storefront::storage::Storage;

use super::CliError;
use crate::views;

/// Show the welcome screen and cart badge.
pub fn show<S: Storage + Clone, C: Clock + Clone>(
    state: &AppState<S, C>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let cart = state.cart();
    views::home(out, cart.total_items())?;
    Ok(())
}
