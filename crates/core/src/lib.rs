//! Vitrine Core - Shared types library.
//!
//! This crate provides the domain types used across the Vitrine components:
//! - `storefront` - Cart store, selection caches and address lookup
//! - `cli` - The `vitrine` command-line storefront
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no storage
//! access, no HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices, quantities, postal
//!   codes and addresses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
