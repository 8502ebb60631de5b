//! Extracts structured product records from e-commerce product pages.
//!
//! Each supported shop has its own markup conventions; a [`sites::SiteParser`]
//! per shop plugs those conventions in behind one uniform contract. The
//! [`EcommerceParser`] routes a URL to the right parser by domain, fetches
//! the markup through an injected [`source::PageSource`], and assembles an
//! immutable [`Product`] with exact-decimal price and discount figures.
//!
//! ```no_run
//! use ecommerce_parser::{EcommerceParser, HttpPageSource};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let parser = EcommerceParser::new(HttpPageSource::with_defaults()?);
//! let product = parser
//!     .parse_link("https://www.amazon.de/gp/product/B002OLT9R8")
//!     .await?;
//! println!("{} costs {} {}", product.title, product.price.current_price, product.price.currency);
//! # Ok(())
//! # }
//! ```

pub mod dispatch;
pub mod domain;
pub mod error;
pub mod money;
pub mod sites;
pub mod source;

pub use dispatch::EcommerceParser;
pub use domain::{Discount, Image, ImageVariant, Price, Product};
pub use error::{ParseResult, ParserError};
pub use sites::SiteParser;
pub use source::{HttpPageSource, HttpSourceConfig, PageSource};
