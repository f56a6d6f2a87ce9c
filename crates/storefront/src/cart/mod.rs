//! Shopping cart store.
//!
//! [`CartStore`] is the single owner of the cart contents. Views receive a
//! handle to it and change the cart only through its operations; every
//! mutation writes the full snapshot to the `cart` storage key before
//! returning.
//!
//! # Example
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use vitrine_core::{Price, Quantity};
//! use vitrine_storefront::cart::{CartItem, CartStore};
//! use vitrine_storefront::storage::MemoryStorage;
//!
//! let mut cart = CartStore::load(MemoryStorage::new());
//! let item = CartItem {
//!     id: "a".into(),
//!     title: "Shirt".to_string(),
//!     price: Price::new(Decimal::from(10)).unwrap(),
//!     size: "M".to_string(),
//!     color: "Red".to_string(),
//!     quantity: Quantity::new(2).unwrap(),
//!     image: String::new(),
//! };
//!
//! cart.add_item(item.clone()).unwrap();
//! cart.add_item(CartItem { quantity: Quantity::ONE, ..item }).unwrap();
//!
//! assert_eq!(cart.items().len(), 1);
//! assert_eq!(cart.total_items(), 3);
//! assert_eq!(cart.total_price().amount(), Decimal::from(30));
//! ```

mod item;

pub use item::{CartItem, CartItemKey};

use thiserror::Error;
use tracing::{debug, warn};
use vitrine_core::{Price, Quantity};

use crate::storage::{Loaded, Storage, StorageError, StorageExt};

/// Storage key of the cart snapshot.
pub const CART_KEY: &str = "cart";

/// Errors from cart mutations.
#[derive(Debug, Error)]
pub enum CartError {
    /// A quantity or the cart total would exceed what can be represented.
    /// The cart is left unchanged.
    #[error("Cart quantity or total out of range")]
    Overflow,

    /// The snapshot could not be written. The in-memory cart is updated.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Cart contents plus persistence.
///
/// The total is recomputed with checked arithmetic on every change, so a
/// cart whose total cannot be represented is never held.
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    items: Vec<CartItem>,
    total: Price,
}

impl<S: Storage> CartStore<S> {
    /// Restore the cart from storage.
    ///
    /// An absent snapshot gives an empty cart. A snapshot that cannot be read,
    /// does not validate, or whose total overflows is logged and also gives an
    /// empty cart; it stays in storage until the next mutation overwrites it.
    pub fn load(storage: S) -> Self {
        let items = match storage.load_json::<Vec<CartItem>>(CART_KEY) {
            Ok(Loaded::Present(items)) => items,
            Ok(Loaded::Absent) => Vec::new(),
            Ok(Loaded::Malformed(e)) => {
                warn!(error = %e, "Stored cart is malformed, starting with an empty cart");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "Failed to read stored cart, starting with an empty cart");
                Vec::new()
            }
        };

        let (items, total) = match merge_duplicates(items)
            .and_then(|items| cart_total(&items).map(|total| (items, total)))
        {
            Some(restored) => restored,
            None => {
                warn!("Stored cart quantities or total out of range, starting with an empty cart");
                (Vec::new(), Price::ZERO)
            }
        };

        debug!(lines = items.len(), "Cart loaded");
        Self {
            storage,
            items,
            total,
        }
    }

    /// Cart lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find the line with `key`.
    #[must_use]
    pub fn get(&self, key: &CartItemKey) -> Option<&CartItem> {
        self.items.iter().find(|i| i.matches(key))
    }

    /// Add `item`, merging into an existing line with the same key.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Overflow`] if the merged quantity or the total
    /// would overflow, leaving the cart unchanged, or [`CartError::Storage`]
    /// if the snapshot cannot be written.
    pub fn add_item(&mut self, item: CartItem) -> Result<(), CartError> {
        let key = item.key();
        let mut items = self.items.clone();
        if let Some(existing) = items.iter_mut().find(|i| i.matches(&key)) {
            existing.quantity = existing
                .quantity
                .checked_add(item.quantity)
                .ok_or(CartError::Overflow)?;
            debug!(id = %key.id, size = %key.size, color = %key.color, quantity = %existing.quantity, "Merged cart line");
        } else {
            debug!(id = %key.id, size = %key.size, color = %key.color, "Added cart line");
            items.push(item);
        }
        self.commit(items)
    }

    /// Remove the line with `key`. Missing lines are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if the snapshot cannot be written.
    pub fn remove_item(&mut self, key: &CartItemKey) -> Result<(), CartError> {
        let items = self
            .items
            .iter()
            .filter(|i| !i.matches(key))
            .cloned()
            .collect();
        self.commit(items)
    }

    /// Set the quantity of the line with `key`. Missing lines are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Overflow`] if the total would overflow, or
    /// [`CartError::Storage`] if the snapshot cannot be written.
    pub fn update_quantity(
        &mut self,
        key: &CartItemKey,
        quantity: Quantity,
    ) -> Result<(), CartError> {
        let mut items = self.items.clone();
        if let Some(line) = items.iter_mut().find(|i| i.matches(key)) {
            line.quantity = quantity;
        }
        self.commit(items)
    }

    /// Add one to the line with `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Overflow`] past the largest quantity or total, or
    /// [`CartError::Storage`] if the snapshot cannot be written.
    pub fn increment_quantity(&mut self, key: &CartItemKey) -> Result<(), CartError> {
        let next = self.get(key).map(|i| i.quantity.incremented());
        match next {
            Some(Some(quantity)) => self.update_quantity(key, quantity),
            Some(None) => Err(CartError::Overflow),
            None => self.persist(),
        }
    }

    /// Take one from the line with `key`, stopping at 1.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if the snapshot cannot be written.
    pub fn decrement_quantity(&mut self, key: &CartItemKey) -> Result<(), CartError> {
        let next = self.get(key).map(|i| i.quantity.decremented());
        match next {
            Some(quantity) => self.update_quantity(key, quantity),
            None => self.persist(),
        }
    }

    /// Empty the cart and delete the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if the snapshot cannot be removed.
    pub fn clear_cart(&mut self) -> Result<(), CartError> {
        self.items.clear();
        self.total = Price::ZERO;
        self.storage.remove_item(CART_KEY)?;
        debug!("Cart cleared");
        Ok(())
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity.get())).sum()
    }

    /// Sum of `price * quantity` over all lines.
    #[must_use]
    pub const fn total_price(&self) -> Price {
        self.total
    }

    /// Replace the lines if their total is representable, then persist.
    fn commit(&mut self, items: Vec<CartItem>) -> Result<(), CartError> {
        let total = cart_total(&items).ok_or(CartError::Overflow)?;
        self.items = items;
        self.total = total;
        self.persist()
    }

    fn persist(&self) -> Result<(), CartError> {
        self.storage.save_json(CART_KEY, &self.items)?;
        Ok(())
    }
}

/// Sum of line totals, or `None` on overflow.
fn cart_total(items: &[CartItem]) -> Option<Price> {
    items
        .iter()
        .try_fold(Price::ZERO, |sum, item| sum.checked_add(item.line_total()?))
}

/// Fold lines that share a key into the first one, keeping insertion order.
/// `None` if a merged quantity overflows.
fn merge_duplicates(items: Vec<CartItem>) -> Option<Vec<CartItem>> {
    let mut merged: Vec<CartItem> = Vec::with_capacity(items.len());
    for item in items {
        let key = item.key();
        if let Some(existing) = merged.iter_mut().find(|i| i.matches(&key)) {
            existing.quantity = existing.quantity.checked_add(item.quantity)?;
        } else {
            merged.push(item);
        }
    }
    Some(merged)
}
