//! Unified error handling.
//!
//! Provides a unified `AppError` type for storefront operations. Views report
//! failures with [`AppError::user_message`], which never exposes internal
//! details; [`AppError::is_internal`] marks the errors worth reporting to
//! error tracking.

use thiserror::Error;
use vitrine_core::QuantityError;

use crate::address::{LookupError, ShippingError};
use crate::cart::CartError;
use crate::config::ConfigError;
use crate::product::{GalleryError, OptionsError};
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Local storage operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Cart mutation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Address lookup client could not be set up.
    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    /// Shipping lookup failed or input was invalid.
    #[error("Shipping error: {0}")]
    Shipping(#[from] ShippingError),

    /// Invalid product option.
    #[error("Options error: {0}")]
    Options(#[from] OptionsError),

    /// Invalid gallery navigation.
    #[error("Gallery error: {0}")]
    Gallery(#[from] GalleryError),

    /// Invalid quantity input.
    #[error("Quantity error: {0}")]
    Quantity(#[from] QuantityError),

    /// Cart line not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Whether this is a fault of the system rather than of the shopper's
    /// input.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::Storage(_) | Self::Lookup(_) | Self::Cart(CartError::Storage(_))
        )
    }

    /// Message shown to the shopper.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(_)
            | Self::Storage(_)
            | Self::Lookup(_)
            | Self::Cart(CartError::Storage(_)) => "Erro interno. Tente novamente.".to_string(),
            Self::Cart(CartError::Overflow) => {
                "Quantidade ou valor total acima do limite do carrinho".to_string()
            }
            Self::Shipping(e) => e.user_message(),
            Self::Options(e) => e.to_string(),
            Self::Gallery(e) => e.to_string(),
            Self::Quantity(QuantityError::BelowMinimum(_)) => {
                "Quantidade deve ser pelo menos 1".to_string()
            }
            Self::Quantity(QuantityError::TooLarge(_)) => "Quantidade muito grande".to_string(),
            Self::Quantity(QuantityError::Invalid(input)) => {
                format!("Quantidade inválida: {input}")
            }
            Self::NotFound(what) => format!("Item não encontrado no carrinho: {what}"),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use vitrine_core::{Cep, CepError, Quantity};

    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("a/M/Red".to_string());
        assert_eq!(err.to_string(), "Not found: a/M/Red");
    }

    #[test]
    fn test_user_messages() {
        let invalid = AppError::from(ShippingError::InvalidCep(CepError::InvalidLength { digits: 3 }));
        assert_eq!(invalid.user_message(), "CEP inválido. O CEP deve conter 8 dígitos.");
        assert!(!invalid.is_internal());

        let missing = Cep::parse("99999999").map(|cep| AppError::from(ShippingError::from(LookupError::NotFound(cep))));
        assert_eq!(
            missing.map(|e| e.user_message()).ok().as_deref(),
            Some("CEP não encontrado.")
        );

        let quantity = Quantity::new(0).map_err(AppError::from);
        assert_eq!(
            quantity.err().map(|e| e.user_message()).as_deref(),
            Some("Quantidade deve ser pelo menos 1")
        );
    }

    #[test]
    fn test_quantity_messages_name_the_failure() {
        let message = |value: i64| Quantity::new(value).map_err(AppError::from).err().map(|e| e.user_message());
        assert_eq!(message(-1).as_deref(), Some("Quantidade deve ser pelo menos 1"));
        assert_eq!(message(5_000_000_000).as_deref(), Some("Quantidade muito grande"));

        let invalid = "abc".parse::<Quantity>().map_err(AppError::from);
        assert_eq!(
            invalid.err().map(|e| e.user_message()).as_deref(),
            Some("Quantidade inválida: abc")
        );
    }

    #[test]
    fn test_cart_errors() {
        let overflow = AppError::from(CartError::Overflow);
        assert!(!overflow.is_internal());
        assert_eq!(
            overflow.user_message(),
            "Quantidade ou valor total acima do limite do carrinho"
        );

        let storage = AppError::from(CartError::Storage(StorageError::InvalidKey("?".to_string())));
        assert!(storage.is_internal());
        assert_eq!(storage.user_message(), "Erro interno. Tente novamente.");
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let err = AppError::Storage(StorageError::InvalidKey("../x".to_string()));
        assert!(err.is_internal());
        assert_eq!(err.user_message(), "Erro interno. Tente novamente.");
    }
}
