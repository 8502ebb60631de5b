//! The product record assembled by the extraction pipeline

use serde::{Deserialize, Serialize};

use super::image::Image;
use super::price::Price;

/// Everything extracted from one product page.
///
/// Built exactly once per extraction call and never mutated afterwards. A
/// missing description container is explicit absence, never an empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// The URL the extraction was requested for.
    pub url: String,
    /// The shop's own identifier for the product (ASIN, order number, SKU).
    pub external_id: String,
    pub title: String,
    pub description: Option<String>,
    pub price: Price,
    /// Product photos in page order, each with its size variants.
    pub images: Vec<Image>,
}
