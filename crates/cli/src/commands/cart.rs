//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! vitrine cart show
//! vitrine cart update --size M --color Preto --quantity 3
//! vitrine cart increment --size M --color Preto
//! vitrine cart decrement --size M --color Preto
//! vitrine cart remove --size M --color Preto
//! vitrine cart clear
//! ```
//!
//! Lines are addressed by size and color; `--id` defaults to the store's
//! product.

use std::io::Write;

use vitrine_core::Quantity;
use vitrine_storefront::cart::{CartItemKey, CartStore};
use vitrine_storefront::clock::Clock;
use vitrine_storefront::storage::Storage;
use vitrine_storefront::{AppError, AppState};

use super::{CliError, app};
use crate::views;

/// A change to one cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineChange {
    Remove,
    Set(Quantity),
    Increment,
    Decrement,
}

/// Render the cart.
pub fn show<S: Storage + Clone, C: Clock + Clone>(
    state: &AppState<S, C>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    views::cart(out, &state.cart())?;
    Ok(())
}

/// Apply `change` to the line with `key`, then render the cart.
pub fn change_line<S: Storage + Clone, C: Clock + Clone>(
    state: &AppState<S, C>,
    key: &CartItemKey,
    change: LineChange,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let mut cart = state.cart();
    ensure_line(&cart, key)?;

    let applied = match change {
        LineChange::Remove => cart.remove_item(key),
        LineChange::Set(quantity) => cart.update_quantity(key, quantity),
        LineChange::Increment => cart.increment_quantity(key),
        LineChange::Decrement => cart.decrement_quantity(key),
    };
    applied.map_err(app)?;

    views::cart(out, &cart)?;
    Ok(())
}

/// Empty the cart.
pub fn clear<S: Storage + Clone, C: Clock + Clone>(
    state: &AppState<S, C>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let mut cart = state.cart();
    cart.clear_cart().map_err(app)?;
    views::cart(out, &cart)?;
    Ok(())
}

/// The store operations ignore unknown lines; the command reports them.
fn ensure_line<S: Storage>(cart: &CartStore<S>, key: &CartItemKey) -> Result<(), CliError> {
    if cart.get(key).is_none() {
        return Err(app(AppError::NotFound(format!(
            "{} / {} / {}",
            key.id, key.size, key.color
        ))));
    }
    Ok(())
}
