//! Domain model of an extraction: product, price, discount, images

pub mod image;
pub mod price;
pub mod product;

pub use image::{Image, ImageVariant};
pub use price::{Discount, Price};
pub use product::Product;
