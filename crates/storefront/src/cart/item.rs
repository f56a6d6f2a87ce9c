//! Cart line items.

use serde::{Deserialize, Serialize};
use vitrine_core::{Price, ProductId, Quantity};

/// Identity of a cart line: the same product in the same size and color.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CartItemKey {
    pub id: ProductId,
    pub size: String,
    pub color: String,
}

impl CartItemKey {
    /// Create a key.
    #[must_use]
    pub fn new(id: impl Into<ProductId>, size: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            size: size.into(),
            color: color.into(),
        }
    }
}

/// One purchasable configuration in the cart.
///
/// This is also the persisted record shape; deserialization validates the
/// price (non-negative) and quantity (at least 1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub size: String,
    pub color: String,
    pub quantity: Quantity,
    /// Image URL shown next to the line.
    pub image: String,
}

impl CartItem {
    /// Whether this line has the given key.
    #[must_use]
    pub fn matches(&self, key: &CartItemKey) -> bool {
        self.id == key.id && self.size == key.size && self.color == key.color
    }

    /// This line's key.
    #[must_use]
    pub fn key(&self) -> CartItemKey {
        CartItemKey::new(self.id.clone(), self.size.clone(), self.color.clone())
    }

    /// `price * quantity`, or `None` if it overflows.
    #[must_use]
    pub fn line_total(&self) -> Option<Price> {
        self.price.checked_times(self.quantity.get())
    }
}
