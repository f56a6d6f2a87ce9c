//! Shipping address lookup for the product page.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};
use vitrine_core::{Address, Cep, CepError};

use super::{AddressLookup, LookupError};
use crate::clock::Clock;
use crate::selection::{SelectionCache, keys};
use crate::storage::Storage;

/// Shown under every resolved address.
pub const FREE_SHIPPING_MESSAGE: &str = "Frete grátis para este endereço!";

/// Errors from a shipping lookup.
#[derive(Debug, Error)]
pub enum ShippingError {
    /// Input is not a valid CEP; no request was made.
    #[error(transparent)]
    InvalidCep(#[from] CepError),

    /// The lookup failed or found nothing.
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl ShippingError {
    /// Message shown to the shopper.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidCep(e) => e.to_string(),
            Self::Lookup(e) => e.user_message().to_string(),
        }
    }
}

/// The cached lookup result, stored as `{ cep, address, timestamp }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedAddress {
    pub cep: Cep,
    pub address: Address,
}

impl CachedAddress {
    /// The cache that remembers the last resolved address.
    pub fn cache<S: Storage, C: Clock>(storage: S, clock: C) -> SelectionCache<Self, S, C> {
        SelectionCache::new(storage, keys::PRODUCT_PAGE_CEP_DATA, clock)
    }
}

/// CEP entry box: validation, one lookup per request, cached result.
#[derive(Debug)]
pub struct ShippingLookup<L, S, C> {
    lookup: L,
    cache: SelectionCache<CachedAddress, S, C>,
}

impl<L, S, C> ShippingLookup<L, S, C>
where
    L: AddressLookup,
    S: Storage,
    C: Clock,
{
    /// Create a lookup backed by `lookup` and `cache`.
    pub const fn new(lookup: L, cache: SelectionCache<CachedAddress, S, C>) -> Self {
        Self { lookup, cache }
    }

    /// The last address found within the freshness window, if any.
    pub fn restore(&self) -> Option<CachedAddress> {
        self.cache.read()
    }

    /// Validate `input` and look the CEP up.
    ///
    /// On success the result is cached. Failures are returned once and not
    /// retried; a previously cached address is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ShippingError::InvalidCep`] without making a request when the
    /// input does not have 8 digits, or [`ShippingError::Lookup`] when the
    /// service fails or has no such CEP.
    pub async fn lookup(&self, input: &str) -> Result<CachedAddress, ShippingError> {
        let cep = Cep::parse(input)?;
        let address = self.lookup.lookup(&cep).await?;

        let found = CachedAddress { cep, address };
        if let Err(e) = self.cache.write(&found) {
            warn!(error = %e, "Failed to cache shipping address");
        }
        info!(cep = %found.cep, "Shipping address resolved");
        Ok(found)
    }
}
