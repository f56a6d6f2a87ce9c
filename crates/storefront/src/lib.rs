//! Vitrine Storefront library.
//!
//! Shopper-side logic of a single-product store, kept free of any UI so it can
//! be tested and reused:
//!
//! - [`cart`] - Cart store with merge-by-key semantics, persisted on every change
//! - [`selection`] - Time-boxed cache for shopper choices
//! - [`product`] - Product catalog entry, option selection, image gallery
//! - [`address`] - CEP validation and address lookup
//! - [`storage`] - Local key-value storage (file-backed or in-memory)
//! - [`state`] - Store handles handed to views

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod address;
pub mod cart;
pub mod clock;
pub mod config;
pub mod error;
pub mod product;
pub mod selection;
pub mod state;
pub mod storage;

pub use error::{AppError, Result};
pub use state::AppState;
