//! Shipping lookup commands.
//!
//! # Usage
//!
//! ```bash
//! vitrine cep lookup 01001-000
//! vitrine cep show
//! ```

use std::io::Write;

use vitrine_storefront::AppState;
use vitrine_storefront::clock::Clock;
use vitrine_storefront::storage::Storage;

use super::{CliError, app};
use crate::views;

/// Look up `input` and show the address.
pub async fn lookup<S: Storage + Clone, C: Clock + Clone>(
    state: &AppState<S, C>,
    input: &str,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let found = state.shipping().lookup(input).await.map_err(app)?;
    views::address(out, &found)?;
    Ok(())
}

/// Show the cached address, if still fresh.
pub fn show<S: Storage + Clone, C: Clock + Clone>(
    state: &AppState<S, C>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match state.shipping().restore() {
        Some(found) => views::address(out, &found)?,
        None => writeln!(out, "Nenhum endereço salvo. Use `vitrine cep lookup <CEP>`.")?,
    }
    Ok(())
}
