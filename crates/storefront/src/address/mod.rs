//! Shipping address lookup by CEP.
//!
//! # Architecture
//!
//! - [`AddressLookup`] - One request/response per lookup, no retries
//! - [`ViaCepClient`] - HTTP implementation against the public ViaCEP API
//! - [`ShippingLookup`] - Validates input, performs the lookup, and caches the
//!   result for 15 minutes under `productPageCepData`
//!
//! # Example
//!
//! ```rust,ignore
//! use vitrine_storefront::address::{CachedAddress, ShippingLookup, ViaCepClient};
//! use vitrine_storefront::clock::SystemClock;
//!
//! let client = ViaCepClient::new(&config.cep_lookup)?;
//! let shipping = ShippingLookup::new(client, CachedAddress::cache(storage, SystemClock));
//!
//! let found = shipping.lookup("01001-000").await?;
//! println!("{}", found.address);
//! ```

mod shipping;
mod viacep;

pub use shipping::{CachedAddress, FREE_SHIPPING_MESSAGE, ShippingError, ShippingLookup};
pub use viacep::ViaCepClient;

use async_trait::async_trait;
use thiserror::Error;
use vitrine_core::{Address, Cep};

/// Errors that can occur when looking up an address.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The service has no address for this CEP.
    #[error("CEP not found: {0}")]
    NotFound(Cep),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with an unexpected status.
    #[error("API error: status {0}")]
    Status(u16),

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl LookupError {
    /// Message shown to the shopper.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "CEP não encontrado.",
            Self::Http(_) | Self::Status(_) | Self::Parse(_) => {
                "Erro ao buscar o CEP. Tente novamente."
            }
        }
    }
}

/// Resolves a CEP to a street address.
#[async_trait]
pub trait AddressLookup: Send + Sync {
    /// Look up `cep`. Called once per shopper request; never retried.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::NotFound`] when the CEP does not exist, or
    /// another `LookupError` when the request fails.
    async fn lookup(&self, cep: &Cep) -> Result<Address, LookupError>;
}

#[async_trait]
impl<L: AddressLookup + ?Sized> AddressLookup for &L {
    async fn lookup(&self, cep: &Cep) -> Result<Address, LookupError> {
        (**self).lookup(cep).await
    }
}
