//! Time-boxed persistence of shopper choices.
//!
//! A [`SelectionCache`] remembers one value under one storage key for a fixed
//! time-to-live. The stored document is the value's own JSON object with a
//! freshness stamp added next to its fields:
//!
//! ```json
//! { "size": "M", "color": "Preto", "qty": 2, "timestamp": 1760000000000 }
//! { "selectedImageIndex": 3, "expiry": 1760000900000 }
//! ```
//!
//! The stamp is either the write time (`timestamp`) or the absolute expiry
//! (`expiry`); both mean "fresh while less than the TTL has passed since the
//! write". A stale or unreadable document is deleted on read and reported as
//! absent, so a bad document is never parsed twice.

use std::marker::PhantomData;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::storage::{Storage, StorageError};

/// Freshness window shared by every cached selection.
pub const SELECTION_TTL: Duration = Duration::from_secs(15 * 60);

/// Storage keys of the cached selections.
pub mod keys {
    /// Product size/color/quantity choice.
    pub const PRODUCT_SELECTIONS: &str = "productSelections";
    /// Selected gallery image.
    pub const PRODUCT_GALLERY_STATE: &str = "productGalleryState";
    /// Last resolved shipping address.
    pub const PRODUCT_PAGE_CEP_DATA: &str = "productPageCepData";
}

/// Errors that can occur when writing a cached selection.
#[derive(Debug, Error)]
pub enum SelectionError {
    /// The value does not serialize to a JSON object, so there is nowhere to
    /// put the stamp.
    #[error("Value for '{0}' must serialize to a JSON object")]
    NotAnObject(&'static str),

    /// Value could not be serialized.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Storage write failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// How the freshness stamp is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stamp {
    /// `timestamp`: the write time. Fresh while `now - timestamp < ttl`.
    #[default]
    WrittenAt,
    /// `expiry`: write time plus TTL. Fresh while `expiry > now`.
    ExpiresAt,
}

impl Stamp {
    /// Field name used in the stored document.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::WrittenAt => "timestamp",
            Self::ExpiresAt => "expiry",
        }
    }
}

/// Outcome of decoding a stored envelope.
#[derive(Debug)]
enum Decoded<T> {
    Fresh(T),
    Stale,
    Malformed(String),
}

/// A value remembered in [`Storage`] for a bounded time.
#[derive(Debug, Clone)]
pub struct SelectionCache<T, S, C = SystemClock> {
    storage: S,
    key: &'static str,
    ttl_ms: i64,
    stamp: Stamp,
    clock: C,
    _value: PhantomData<fn() -> T>,
}

impl<T, S, C> SelectionCache<T, S, C>
where
    T: Serialize + DeserializeOwned,
    S: Storage,
    C: Clock,
{
    /// Create a cache for `key` with the default TTL and a write-time stamp.
    pub fn new(storage: S, key: &'static str, clock: C) -> Self {
        Self {
            storage,
            key,
            ttl_ms: duration_millis(SELECTION_TTL),
            stamp: Stamp::WrittenAt,
            clock,
            _value: PhantomData,
        }
    }

    /// Override the time-to-live.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl_ms = duration_millis(ttl);
        self
    }

    /// Override how the freshness stamp is recorded.
    #[must_use]
    pub const fn with_stamp(mut self, stamp: Stamp) -> Self {
        self.stamp = stamp;
        self
    }

    /// The storage key.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.key
    }

    /// Return the cached value if it is still fresh.
    ///
    /// A stale, malformed, or unreadable entry is evicted and `None` is
    /// returned.
    pub fn read(&self) -> Option<T> {
        let raw = match self.storage.get_item(self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key = self.key, error = %e, "Failed to read cached selection");
                return None;
            }
        };

        match self.decode(&raw, self.clock.now_millis()) {
            Decoded::Fresh(value) => {
                debug!(key = self.key, "Restored cached selection");
                Some(value)
            }
            Decoded::Stale => {
                debug!(key = self.key, "Cached selection expired");
                self.evict();
                None
            }
            Decoded::Malformed(reason) => {
                warn!(key = self.key, reason = %reason, "Discarding malformed cached selection");
                self.evict();
                None
            }
        }
    }

    /// Store `value` stamped with the current time, replacing any previous
    /// entry.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError` if the value cannot be encoded or stored.
    pub fn write(&self, value: &T) -> Result<(), SelectionError> {
        let raw = self.encode(value, self.clock.now_millis())?;
        self.storage.set_item(self.key, &raw)?;
        Ok(())
    }

    /// Remove the entry. Failures are logged, not returned.
    pub fn evict(&self) {
        if let Err(e) = self.storage.remove_item(self.key) {
            warn!(key = self.key, error = %e, "Failed to evict cached selection");
        }
    }

    fn encode(&self, value: &T, now_ms: i64) -> Result<String, SelectionError> {
        let mut document = serde_json::to_value(value)?;
        let Value::Object(fields) = &mut document else {
            return Err(SelectionError::NotAnObject(self.key));
        };

        let stamp = match self.stamp {
            Stamp::WrittenAt => now_ms,
            Stamp::ExpiresAt => now_ms.saturating_add(self.ttl_ms),
        };
        fields.insert(self.stamp.field().to_string(), Value::from(stamp));

        Ok(serde_json::to_string(&document)?)
    }

    fn decode(&self, raw: &str, now_ms: i64) -> Decoded<T> {
        let mut document: Value = match serde_json::from_str(raw) {
            Ok(document) => document,
            Err(e) => return Decoded::Malformed(e.to_string()),
        };
        let Some(fields) = document.as_object_mut() else {
            return Decoded::Malformed("not a JSON object".to_string());
        };
        let Some(stamp) = fields.remove(self.stamp.field()).and_then(|v| v.as_i64()) else {
            return Decoded::Malformed(format!("missing numeric '{}'", self.stamp.field()));
        };

        let fresh = match self.stamp {
            Stamp::WrittenAt => now_ms.saturating_sub(stamp) < self.ttl_ms,
            Stamp::ExpiresAt => stamp > now_ms,
        };
        if !fresh {
            return Decoded::Stale;
        }

        match serde_json::from_value(document) {
            Ok(value) => Decoded::Fresh(value),
            Err(e) => Decoded::Malformed(e.to_string()),
        }
    }
}

fn duration_millis(ttl: Duration) -> i64 {
    i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{DateTime, TimeDelta};
    use serde::Deserialize;

    use super::*;
    use crate::clock::ManualClock;
    use crate::storage::MemoryStorage;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Choice {
        size: String,
        qty: u32,
    }

    fn choice() -> Choice {
        Choice {
            size: "M".to_string(),
            qty: 2,
        }
    }

    fn ttl_delta() -> TimeDelta {
        TimeDelta::from_std(SELECTION_TTL).unwrap()
    }

    fn setup(stamp: Stamp) -> (MemoryStorage, ManualClock, SelectionCache<Choice, MemoryStorage, ManualClock>) {
        let storage = MemoryStorage::new();
        let clock = ManualClock::new(DateTime::from_timestamp_millis(1_700_000_000_000).unwrap());
        let cache = SelectionCache::new(storage.clone(), "choice", clock.clone()).with_stamp(stamp);
        (storage, clock, cache)
    }

    #[test]
    fn test_read_absent() {
        let (_, _, cache) = setup(Stamp::WrittenAt);
        assert_eq!(cache.read(), None);
    }

    #[test]
    fn test_fresh_just_before_ttl() {
        for stamp in [Stamp::WrittenAt, Stamp::ExpiresAt] {
            let (storage, clock, cache) = setup(stamp);
            cache.write(&choice()).unwrap();

            clock.advance(ttl_delta() - TimeDelta::milliseconds(1));
            assert_eq!(cache.read(), Some(choice()));
            assert!(storage.contains_key("choice"), "fresh read keeps entry");
        }
    }

    #[test]
    fn test_stale_just_after_ttl_is_evicted() {
        for stamp in [Stamp::WrittenAt, Stamp::ExpiresAt] {
            let (storage, clock, cache) = setup(stamp);
            cache.write(&choice()).unwrap();

            clock.advance(ttl_delta() + TimeDelta::milliseconds(1));
            assert_eq!(cache.read(), None);
            assert!(!storage.contains_key("choice"));
        }
    }

    #[test]
    fn test_document_layout() {
        let (storage, _, cache) = setup(Stamp::WrittenAt);
        cache.write(&choice()).unwrap();
        let stored: Value = serde_json::from_str(&storage.get_item("choice").unwrap().unwrap()).unwrap();
        assert_eq!(
            stored,
            serde_json::json!({ "size": "M", "qty": 2, "timestamp": 1_700_000_000_000_i64 })
        );

        let (storage, _, cache) = setup(Stamp::ExpiresAt);
        cache.write(&choice()).unwrap();
        let stored: Value = serde_json::from_str(&storage.get_item("choice").unwrap().unwrap()).unwrap();
        assert_eq!(stored["expiry"], 1_700_000_000_000_i64 + 15 * 60 * 1000);
    }

    #[test]
    fn test_malformed_entries_are_evicted() {
        let cases = [
            "not json",
            "[1, 2, 3]",
            "{\"size\": \"M\", \"qty\": 2}",
            "{\"size\": \"M\", \"qty\": 2, \"timestamp\": \"yesterday\"}",
            "{\"size\": 7, \"timestamp\": 1700000000000}",
        ];
        for raw in cases {
            let (storage, _, cache) = setup(Stamp::WrittenAt);
            storage.set_item("choice", raw).unwrap();
            assert_eq!(cache.read(), None, "{raw}");
            assert!(!storage.contains_key("choice"), "{raw}");
        }
    }

    #[test]
    fn test_write_overwrites() {
        let (_, clock, cache) = setup(Stamp::WrittenAt);
        cache.write(&choice()).unwrap();

        clock.advance(TimeDelta::minutes(10));
        let newer = Choice {
            size: "G".to_string(),
            qty: 1,
        };
        cache.write(&newer).unwrap();

        // The rewrite restarts the window.
        clock.advance(TimeDelta::minutes(10));
        assert_eq!(cache.read(), Some(newer));
    }

    #[test]
    fn test_non_object_value_rejected() {
        let storage = MemoryStorage::new();
        let clock = ManualClock::new(DateTime::from_timestamp_millis(0).unwrap());
        let cache: SelectionCache<u32, _, _> = SelectionCache::new(storage, "n", clock);
        assert!(matches!(cache.write(&3), Err(SelectionError::NotAnObject("n"))));
    }

    #[test]
    fn test_custom_ttl() {
        let (_, clock, cache) = setup(Stamp::WrittenAt);
        let cache = cache.with_ttl(Duration::from_secs(60));
        cache.write(&choice()).unwrap();
        clock.advance(TimeDelta::seconds(61));
        assert_eq!(cache.read(), None);
    }
}
