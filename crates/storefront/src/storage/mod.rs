//! Local key-value storage for shopper state.
//!
//! # Keys
//!
//! - `cart` - Cart snapshot (array of cart items)
//! - `productSelections` - Size/color/quantity choice
//! - `productGalleryState` - Selected gallery image
//! - `productPageCepData` - Last resolved shipping address
//!
//! Values are JSON documents. Reads go through [`StorageExt::load_json`], which
//! turns a document that fails to deserialize into the shape the caller expects
//! into [`Loaded::Malformed`] instead of trusting it.
//!
//! There is no locking: two processes sharing a data directory race, and the
//! last write wins.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors that can occur when reading or writing local storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error on key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Value could not be serialized.
    #[error("Serialization error on key '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Key contains characters that cannot be stored.
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

/// A string key-value store with `localStorage` semantics.
///
/// Implementations are cheap to clone; clones share the same underlying data
/// so a cart store and several selection caches can hold one handle each.
pub trait Storage {
    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Result of reading a typed value from storage.
#[derive(Debug)]
pub enum Loaded<T> {
    /// A well-formed value was found.
    Present(T),
    /// Nothing is stored under the key.
    Absent,
    /// Something is stored but it is not valid JSON of the expected shape.
    Malformed(serde_json::Error),
}

impl<T> Loaded<T> {
    /// Collapse to an `Option`, treating malformed data as absent.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent | Self::Malformed(_) => None,
        }
    }
}

/// Typed JSON helpers available on every [`Storage`].
pub trait StorageExt: Storage {
    /// Read and validate the JSON document stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only if the backing store cannot be read;
    /// bad content is reported as [`Loaded::Malformed`].
    fn load_json<T: DeserializeOwned>(&self, key: &str) -> Result<Loaded<T>, StorageError> {
        let Some(raw) = self.get_item(key)? else {
            return Ok(Loaded::Absent);
        };
        Ok(match serde_json::from_str(&raw) {
            Ok(value) => Loaded::Present(value),
            Err(e) => Loaded::Malformed(e),
        })
    }

    /// Serialize `value` as JSON and store it under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if serialization or the write fails.
    fn save_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
            key: key.to_string(),
            source,
        })?;
        self.set_item(key, &raw)
    }
}

impl<S: Storage + ?Sized> StorageExt for S {}

impl<S: Storage + ?Sized> Storage for &S {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}
