//! Storefront state handed to views.

use crate::address::{CachedAddress, ShippingLookup, ViaCepClient};
use crate::cart::CartStore;
use crate::clock::{Clock, SystemClock};
use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::product::{Gallery, GallerySelection, Product, ProductOptions, ProductSelection};
use crate::storage::{FileStorage, Storage};

/// Shared resources for the storefront views.
///
/// Views never reach for global state: each one asks this struct for the store
/// or cache handle it needs. All handles share one storage and one clock.
#[derive(Debug, Clone)]
pub struct AppState<S = FileStorage, C = SystemClock> {
    config: StorefrontConfig,
    storage: S,
    clock: C,
    product: Product,
    address_lookup: ViaCepClient,
}

impl AppState {
    /// Create the state for a device, storing data under `config.data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the address lookup client cannot be built.
    pub fn new(config: StorefrontConfig) -> Result<Self> {
        let storage = FileStorage::new(&config.data_dir);
        Self::with_parts(config, storage, SystemClock)
    }
}

impl<S: Storage + Clone, C: Clock + Clone> AppState<S, C> {
    /// Create the state with explicit storage and clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the address lookup client cannot be built.
    pub fn with_parts(config: StorefrontConfig, storage: S, clock: C) -> Result<Self> {
        let address_lookup = ViaCepClient::new(&config.cep_lookup)?;
        Ok(Self {
            config,
            storage,
            clock,
            product: Product::featured(),
            address_lookup,
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// The product on sale.
    #[must_use]
    pub const fn product(&self) -> &Product {
        &self.product
    }

    /// Restore the cart.
    #[must_use]
    pub fn cart(&self) -> CartStore<S> {
        CartStore::load(self.storage.clone())
    }

    /// Mount the product option selector.
    #[must_use]
    pub fn product_options(&self) -> ProductOptions<'_, S, C> {
        let cache = ProductSelection::cache(self.storage.clone(), self.clock.clone());
        ProductOptions::mount(&self.product, cache)
    }

    /// Mount the image gallery.
    #[must_use]
    pub fn gallery(&self) -> Gallery<'_, S, C> {
        let cache = GallerySelection::cache(self.storage.clone(), self.clock.clone());
        Gallery::mount(&self.product.images, cache)
    }

    /// Mount the shipping address lookup.
    #[must_use]
    pub fn shipping(&self) -> ShippingLookup<&ViaCepClient, S, C> {
        let cache = CachedAddress::cache(self.storage.clone(), self.clock.clone());
        ShippingLookup::new(&self.address_lookup, cache)
    }
}
