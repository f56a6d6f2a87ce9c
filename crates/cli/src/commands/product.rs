//! Product page commands.
//!
//! # Usage
//!
//! ```bash
//! vitrine product show
//! vitrine product select --size M --color Preto --quantity 2
//! vitrine product step -1
//! vitrine product image 3
//! vitrine product add
//! ```

use std::io::Write;

use tracing::info;
use vitrine_core::Quantity;
use vitrine_storefront::AppState;
use vitrine_storefront::clock::Clock;
use vitrine_storefront::storage::Storage;

use super::{CliError, app};
use crate::views;

/// Render the product page with restored selections.
pub fn show<S: Storage + Clone, C: Clock + Clone>(
    state: &AppState<S, C>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let options = state.product_options();
    let gallery = state.gallery();
    let shipping = state.shipping().restore();
    views::product(out, state.product(), &options, &gallery, shipping.as_ref())?;
    Ok(())
}

/// Change size, color, and/or quantity.
pub fn select<S: Storage + Clone, C: Clock + Clone>(
    state: &AppState<S, C>,
    size: Option<&str>,
    color: Option<&str>,
    quantity: Option<Quantity>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let mut options = state.product_options();
    if let Some(size) = size {
        options.select_size(size).map_err(app)?;
    }
    if let Some(color) = color {
        options.select_color(color).map_err(app)?;
    }
    if let Some(quantity) = quantity {
        options.set_quantity(quantity).map_err(app)?;
    }

    writeln!(
        out,
        "Tamanho: {} | Cor: {} | Quantidade: {}",
        options.size().unwrap_or("-"),
        options.color().unwrap_or("-"),
        options.quantity()
    )?;
    Ok(())
}

/// Quantity stepper (`+1` / `-1`), bounded to 1..=10.
pub fn step<S: Storage + Clone, C: Clock + Clone>(
    state: &AppState<S, C>,
    change: i64,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let mut options = state.product_options();
    options.step_quantity(change);
    writeln!(out, "Quantidade: {}", options.quantity())?;
    Ok(())
}

/// Select gallery image `index` (0-based).
pub fn image<S: Storage + Clone, C: Clock + Clone>(
    state: &AppState<S, C>,
    index: usize,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let mut gallery = state.gallery();
    gallery.select(index).map_err(app)?;
    writeln!(
        out,
        "Imagem {}: {}",
        gallery.selected_index() + 1,
        gallery.selected_image().unwrap_or("-")
    )?;
    Ok(())
}

/// Add the current selection to the cart.
pub fn add<S: Storage + Clone, C: Clock + Clone>(
    state: &AppState<S, C>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let options = state.product_options();
    let item = options.to_cart_item().map_err(app)?;
    let summary = format!("{} - Tamanho: {}, Cor: {}", item.title, item.size, item.color);

    let mut cart = state.cart();
    cart.add_item(item).map_err(app)?;
    info!(total_items = cart.total_items(), "Added selection to cart");

    writeln!(out, "Produto adicionado ao carrinho")?;
    writeln!(out, "{summary}")?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use vitrine_storefront::AppError;
    use vitrine_storefront::cart::CartItemKey;
    use vitrine_storefront::product::OptionsError;

    use super::*;
    use crate::commands::test_state;

    #[test]
    fn test_repeated_add_merges_into_one_line() {
        let state = test_state();
        let two = Some(Quantity::new(2).unwrap());
        select(&state, Some("M"), Some("Preto"), two, &mut Vec::new()).unwrap();

        // Each add restores the cached selection, as a new invocation would.
        let mut out = Vec::new();
        add(&state, &mut out).unwrap();
        add(&state, &mut out).unwrap();

        let cart = state.cart();
        assert_eq!(cart.items().len(), 1);
        let line = cart
            .get(&CartItemKey::new(state.product().id.clone(), "M", "Preto"))
            .unwrap();
        assert_eq!(line.quantity.get(), 4);
        assert_eq!(line.image, state.product().main_image());
        assert_eq!(cart.total_price().display(), "R$ 1.199,60");

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("Produto adicionado ao carrinho").count(), 2);
        assert!(text.contains("Tamanho: M, Cor: Preto"));
    }

    #[test]
    fn test_add_requires_size_and_color() {
        let state = test_state();
        select(&state, Some("M"), None, None, &mut Vec::new()).unwrap();

        let err = add(&state, &mut Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            CliError::App(AppError::Options(OptionsError::Incomplete))
        ));
        assert!(state.cart().is_empty());
    }

    #[test]
    fn test_step_and_image() {
        let state = test_state();
        select(&state, Some("P"), Some("Branco"), None, &mut Vec::new()).unwrap();

        step(&state, 1, &mut Vec::new()).unwrap();
        step(&state, 1, &mut Vec::new()).unwrap();
        assert_eq!(state.product_options().quantity().get(), 3);

        let mut out = Vec::new();
        image(&state, 2, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("Imagem 3:"));
        assert_eq!(state.gallery().selected_index(), 2);

        assert!(image(&state, 99, &mut Vec::new()).is_err());
    }
}
