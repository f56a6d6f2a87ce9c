//! The store's product and its detail-page state.
//!
//! - [`Product`] - Catalog entry (the store sells a single product)
//! - [`ProductOptions`] - Size/color/quantity selection, cached for 15 minutes
//! - [`Gallery`] - Selected image, cached for 15 minutes

mod gallery;
mod options;

pub use gallery::{Gallery, GalleryError, GallerySelection};
pub use options::{OptionsError, ProductOptions, ProductSelection};

use rust_decimal::Decimal;
use vitrine_core::{Price, ProductId};

/// A selectable color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorOption {
    pub name: String,
    /// CSS hex color used for the swatch.
    pub hex: String,
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub description: String,
    pub sizes: Vec<String>,
    pub colors: Vec<ColorOption>,
    /// Gallery images; the first one is the main image.
    pub images: Vec<String>,
}

impl Product {
    /// The product sold by the store.
    #[must_use]
    pub fn featured() -> Self {
        Self {
            id: ProductId::new("camisa-corinthians-2526"),
            title: "Camisa Corinthians I 25/26 s/n Torcedor Nike Masculina - Branco+Preto"
                .to_string(),
            price: Price::new(Decimal::new(29990, 2)).unwrap_or(Price::ZERO),
            description: "Camisa oficial do Corinthians para a temporada 25/26, modelo s/número, \
                confeccionada pela Nike, com tecido leve e respirável para maior conforto durante o uso."
                .to_string(),
            sizes: ["P", "M", "G", "GG", "XGG"].map(String::from).to_vec(),
            colors: vec![
                ColorOption {
                    name: "Branco".to_string(),
                    hex: "#FFFFFF".to_string(),
                },
                ColorOption {
                    name: "Preto".to_string(),
                    hex: "#000000".to_string(),
                },
            ],
            images: [
                "https://images.unsplash.com/photo-1600185365483-26d7a4cc7519?w=800&q=80",
                "https://images.unsplash.com/photo-1600185365926-3a2ce3cdb9eb?w=800&q=80",
                "https://images.unsplash.com/photo-1583743814966-8936f5b7be1a?w=800&q=80",
                "https://images.unsplash.com/photo-1576566588028-4147f3842f27?w=800&q=80",
                "https://images.unsplash.com/photo-1595950653106-6c9ebd614d3a?w=800&q=80",
            ]
            .map(String::from)
            .to_vec(),
        }
    }

    /// The image used for cart lines.
    #[must_use]
    pub fn main_image(&self) -> &str {
        self.images.first().map_or("", String::as_str)
    }

    /// Whether `size` is offered.
    #[must_use]
    pub fn has_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    /// Look up a color by name.
    #[must_use]
    pub fn color(&self, name: &str) -> Option<&ColorOption> {
        self.colors.iter().find(|c| c.name == name)
    }
}
