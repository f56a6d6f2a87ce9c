//! Core types for Vitrine.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod address;
pub mod cep;
pub mod id;
pub mod price;
pub mod quantity;

pub use address::Address;
pub use cep::{Cep, CepError};
pub use id::*;
pub use price::{CurrencyCode, Price, PriceError};
pub use quantity::{Quantity, QuantityError};
