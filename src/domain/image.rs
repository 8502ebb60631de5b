//! Product image model
//!
//! Shop pages usually serve the same photo in several renditions (thumbnail,
//! gallery, zoom). An [`Image`] groups those renditions; each [`ImageVariant`]
//! is one rendition at a concrete pixel size.

use serde::{Deserialize, Serialize};

/// One rendition of a product photo at a concrete resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageVariant {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

impl ImageVariant {
    pub fn new(url: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            url: url.into(),
            width,
            height,
        }
    }
}

/// A product photo together with all of its discovered size variants.
///
/// Variants keep insertion order, which is the order they were discovered on
/// the page. The model does not deduplicate; the site parser building the
/// image is responsible for not adding the same variant twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    variants: Vec<ImageVariant>,
}

impl Image {
    /// An image with no variants yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a variant, returning `&mut self` for chaining.
    pub fn add_variant(&mut self, variant: ImageVariant) -> &mut Self {
        self.variants.push(variant);
        self
    }

    /// The insertion-ordered variant list.
    pub fn variants(&self) -> &[ImageVariant] {
        &self.variants
    }
}
