//! Integration tests for Vitrine.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p vitrine-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart store against on-disk storage
//! - `selection_cache` - Product page caches and their 15-minute window
//!
//! Every test runs against a fresh temporary data directory and a manual
//! clock, so nothing touches the network or the real data directory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use tempfile::TempDir;
use vitrine_core::{Address, Cep, Price, Quantity};
use vitrine_storefront::AppState;
use vitrine_storefront::address::{AddressLookup, LookupError};
use vitrine_storefront::cart::CartItem;
use vitrine_storefront::clock::ManualClock;
use vitrine_storefront::config::StorefrontConfig;
use vitrine_storefront::storage::FileStorage;

/// 2026-01-01T12:00:00Z, the instant every test starts at.
pub const START_MILLIS: i64 = 1_767_268_800_000;

/// A storefront over a temporary data directory.
pub struct TestContext {
    pub state: AppState<FileStorage, ManualClock>,
    pub clock: ManualClock,
    dir: TempDir,
}

impl TestContext {
    /// Create a storefront with empty storage.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory or the state cannot be created.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let data_dir = dir.path().to_string_lossy().into_owned();
        let config = StorefrontConfig::from_source(|key| {
            (key == "VITRINE_DATA_DIR").then(|| data_dir.clone())
        })
        .unwrap();

        let start = DateTime::<Utc>::from_timestamp_millis(START_MILLIS).unwrap();
        let clock = ManualClock::new(start);
        let storage = FileStorage::new(dir.path());
        let state = AppState::with_parts(config, storage, clock.clone()).unwrap();

        Self { state, clock, dir }
    }

    /// The data directory.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the document stored under `key`.
    #[must_use]
    pub fn file_for(&self, key: &str) -> PathBuf {
        self.dir.path().join(format!("{key}.json"))
    }

    /// Parse the document stored under `key`.
    ///
    /// # Panics
    ///
    /// Panics if the document is missing or not JSON.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn read_json(&self, key: &str) -> serde_json::Value {
        let raw = std::fs::read_to_string(self.file_for(key)).unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    /// Move the clock forward by `millis`.
    pub fn advance_millis(&self, millis: i64) {
        self.clock.advance(TimeDelta::milliseconds(millis));
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a cart line.
///
/// # Panics
///
/// Panics if `price` is negative or `quantity` is below 1.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn item(id: &str, size: &str, color: &str, price: i64, quantity: i64) -> CartItem {
    CartItem {
        id: id.into(),
        title: format!("Product {id}"),
        price: Price::new(Decimal::from(price)).unwrap(),
        size: size.to_string(),
        color: color.to_string(),
        quantity: Quantity::new(quantity).unwrap(),
        image: format!("https://images.example/{id}.jpg"),
    }
}

/// Address lookup that knows only Praça da Sé (`01001-000`).
#[derive(Debug, Default)]
pub struct PracaDaSe;

#[async_trait]
impl AddressLookup for PracaDaSe {
    async fn lookup(&self, cep: &Cep) -> Result<Address, LookupError> {
        if cep.digits() != "01001000" {
            return Err(LookupError::NotFound(cep.clone()));
        }
        Ok(Address {
            cep: cep.formatted(),
            street: "Praça da Sé".to_string(),
            complement: "lado ímpar".to_string(),
            neighborhood: "Sé".to_string(),
            city: "São Paulo".to_string(),
            state: "SP".to_string(),
        })
    }
}
