//! Product image gallery state.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::clock::Clock;
use crate::selection::{SelectionCache, Stamp, keys};
use crate::storage::Storage;

/// Errors from gallery navigation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GalleryError {
    #[error("Imagem {} não existe (a galeria tem {len} imagens)", .index.saturating_add(1))]
    OutOfRange { index: usize, len: usize },
}

/// The cached gallery state, stored as `{ selectedImageIndex, expiry }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GallerySelection {
    pub selected_image_index: usize,
}

impl GallerySelection {
    /// The cache that remembers the selected image. Uses an absolute expiry
    /// stamp.
    pub fn cache<S: Storage, C: Clock>(storage: S, clock: C) -> SelectionCache<Self, S, C> {
        SelectionCache::new(storage, keys::PRODUCT_GALLERY_STATE, clock).with_stamp(Stamp::ExpiresAt)
    }
}

/// Image gallery with one selected image.
#[derive(Debug)]
pub struct Gallery<'p, S, C> {
    images: &'p [String],
    selected: usize,
    cache: SelectionCache<GallerySelection, S, C>,
}

impl<'p, S: Storage, C: Clock> Gallery<'p, S, C> {
    /// Show `images`, restoring a fresh cached selection. A cached index
    /// outside the image list falls back to the first image.
    pub fn mount(images: &'p [String], cache: SelectionCache<GallerySelection, S, C>) -> Self {
        let selected = cache
            .read()
            .map(|s| s.selected_image_index)
            .filter(|&i| i < images.len())
            .unwrap_or(0);
        Self {
            images,
            selected,
            cache,
        }
    }

    /// All images.
    #[must_use]
    pub const fn images(&self) -> &'p [String] {
        self.images
    }

    /// Index of the selected image.
    #[must_use]
    pub const fn selected_index(&self) -> usize {
        self.selected
    }

    /// URL of the selected image, if the gallery has any.
    #[must_use]
    pub fn selected_image(&self) -> Option<&'p str> {
        self.images.get(self.selected).map(String::as_str)
    }

    /// Select image `index` (0-based) and remember it.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::OutOfRange`] if there is no such image.
    pub fn select(&mut self, index: usize) -> Result<(), GalleryError> {
        if index >= self.images.len() {
            return Err(GalleryError::OutOfRange {
                index,
                len: self.images.len(),
            });
        }
        self.selected = index;
        let state = GallerySelection {
            selected_image_index: index,
        };
        if let Err(e) = self.cache.write(&state) {
            warn!(error = %e, "Failed to cache gallery state");
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{DateTime, TimeDelta};

    use super::*;
    use crate::clock::ManualClock;
    use crate::product::Product;
    use crate::storage::{MemoryStorage, StorageExt};

    fn clock() -> ManualClock {
        ManualClock::new(DateTime::from_timestamp_millis(1_760_000_000_000).unwrap())
    }

    #[test]
    fn test_select_persists_with_expiry() {
        let product = Product::featured();
        let storage = MemoryStorage::new();
        let mut gallery = Gallery::mount(&product.images, GallerySelection::cache(storage.clone(), clock()));
        assert_eq!(gallery.selected_index(), 0);

        gallery.select(3).unwrap();
        let stored: serde_json::Value = storage
            .load_json(keys::PRODUCT_GALLERY_STATE)
            .unwrap()
            .into_option()
            .unwrap();
        assert_eq!(stored["selectedImageIndex"], 3);
        assert_eq!(stored["expiry"], 1_760_000_000_000_i64 + 900_000);
    }

    #[test]
    fn test_restore_and_expire() {
        let product = Product::featured();
        let storage = MemoryStorage::new();
        let clock = clock();
        Gallery::mount(&product.images, GallerySelection::cache(storage.clone(), clock.clone()))
            .select(2)
            .unwrap();

        let gallery = Gallery::mount(&product.images, GallerySelection::cache(storage.clone(), clock.clone()));
        assert_eq!(gallery.selected_index(), 2);
        assert_eq!(gallery.selected_image(), product.images.get(2).map(String::as_str));

        clock.advance(TimeDelta::minutes(16));
        let gallery = Gallery::mount(&product.images, GallerySelection::cache(storage.clone(), clock));
        assert_eq!(gallery.selected_index(), 0);
        assert!(!storage.contains_key(keys::PRODUCT_GALLERY_STATE));
    }

    #[test]
    fn test_out_of_range() {
        let images = vec!["a.jpg".to_string(), "b.jpg".to_string()];
        let storage = MemoryStorage::new();
        let cache = GallerySelection::cache(storage.clone(), clock());
        cache
            .write(&GallerySelection {
                selected_image_index: 9,
            })
            .unwrap();

        let mut gallery = Gallery::mount(&images, cache);
        assert_eq!(gallery.selected_index(), 0);
        assert_eq!(
            gallery.select(2),
            Err(GalleryError::OutOfRange { index: 2, len: 2 })
        );
    }
}
