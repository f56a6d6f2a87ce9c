//! Size, color, and quantity selection on the product page.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use vitrine_core::Quantity;

use super::Product;
use crate::cart::CartItem;
use crate::clock::Clock;
use crate::selection::{SelectionCache, keys};
use crate::storage::Storage;

/// Errors from product option selection. Display text is shown to shoppers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OptionsError {
    #[error("Tamanho indisponível: {0}")]
    UnknownSize(String),

    #[error("Cor indisponível: {0}")]
    UnknownColor(String),

    #[error("Quantidade deve estar entre 1 e {max}", max = Quantity::MAX_SELECTABLE)]
    QuantityOutOfRange(u32),

    #[error("Selecione tamanho e cor antes de adicionar ao carrinho")]
    Incomplete,
}

/// The cached selection, stored as `{ size, color, qty, timestamp }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSelection {
    pub size: String,
    pub color: String,
    pub qty: Quantity,
}

impl ProductSelection {
    /// The cache that remembers this selection.
    pub fn cache<S: Storage, C: Clock>(storage: S, clock: C) -> SelectionCache<Self, S, C> {
        SelectionCache::new(storage, keys::PRODUCT_SELECTIONS, clock)
    }
}

/// Current option choices for one product.
#[derive(Debug)]
pub struct ProductOptions<'p, S, C> {
    product: &'p Product,
    size: Option<String>,
    color: Option<String>,
    quantity: Quantity,
    cache: SelectionCache<ProductSelection, S, C>,
}

impl<'p, S: Storage, C: Clock> ProductOptions<'p, S, C> {
    /// Start a selection for `product`, restoring a fresh cached choice.
    ///
    /// A cached choice naming a size or color the product does not offer is
    /// ignored.
    pub fn mount(product: &'p Product, cache: SelectionCache<ProductSelection, S, C>) -> Self {
        let mut options = Self {
            product,
            size: None,
            color: None,
            quantity: Quantity::ONE,
            cache,
        };

        if let Some(saved) = options.cache.read() {
            let valid = product.has_size(&saved.size)
                && product.color(&saved.color).is_some()
                && saved.qty.get() <= Quantity::MAX_SELECTABLE;
            if valid {
                debug!(size = %saved.size, color = %saved.color, qty = %saved.qty, "Restored product selection");
                options.size = Some(saved.size);
                options.color = Some(saved.color);
                options.quantity = saved.qty;
            } else {
                debug!("Ignoring cached selection not offered by product");
            }
        }

        options
    }

    /// The product being configured.
    #[must_use]
    pub const fn product(&self) -> &'p Product {
        self.product
    }

    /// Chosen size, if any.
    #[must_use]
    pub fn size(&self) -> Option<&str> {
        self.size.as_deref()
    }

    /// Chosen color, if any.
    #[must_use]
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Chosen quantity.
    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Whether both size and color are chosen.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.size.is_some() && self.color.is_some()
    }

    /// Choose a size.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::UnknownSize`] if the product does not offer it.
    pub fn select_size(&mut self, size: &str) -> Result<(), OptionsError> {
        if !self.product.has_size(size) {
            return Err(OptionsError::UnknownSize(size.to_string()));
        }
        self.size = Some(size.to_string());
        self.remember();
        Ok(())
    }

    /// Choose a color by name.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::UnknownColor`] if the product does not offer it.
    pub fn select_color(&mut self, color: &str) -> Result<(), OptionsError> {
        let Some(option) = self.product.color(color) else {
            return Err(OptionsError::UnknownColor(color.to_string()));
        };
        self.color = Some(option.name.clone());
        self.remember();
        Ok(())
    }

    /// Apply a stepper change (`+1`/`-1`); results outside `1..=10` are
    /// ignored.
    pub fn step_quantity(&mut self, change: i64) {
        self.quantity = self.quantity.stepped(change);
        self.remember();
    }

    /// Set the quantity directly.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::QuantityOutOfRange`] above the stepper maximum.
    pub fn set_quantity(&mut self, quantity: Quantity) -> Result<(), OptionsError> {
        if quantity.get() > Quantity::MAX_SELECTABLE {
            return Err(OptionsError::QuantityOutOfRange(quantity.get()));
        }
        self.quantity = quantity;
        self.remember();
        Ok(())
    }

    /// Build the cart line for the current choice.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::Incomplete`] unless size and color are chosen.
    pub fn to_cart_item(&self) -> Result<CartItem, OptionsError> {
        let (Some(size), Some(color)) = (&self.size, &self.color) else {
            return Err(OptionsError::Incomplete);
        };
        Ok(CartItem {
            id: self.product.id.clone(),
            title: self.product.title.clone(),
            price: self.product.price,
            size: size.clone(),
            color: color.clone(),
            quantity: self.quantity,
            image: self.product.main_image().to_string(),
        })
    }

    /// Cache the choice once both size and color are set.
    fn remember(&self) {
        let (Some(size), Some(color)) = (&self.size, &self.color) else {
            return;
        };
        let selection = ProductSelection {
            size: size.clone(),
            color: color.clone(),
            qty: self.quantity,
        };
        if let Err(e) = self.cache.write(&selection) {
            warn!(error = %e, "Failed to cache product selection");
        }
    }
}
