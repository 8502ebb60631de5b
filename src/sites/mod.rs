//! Site parsers
//!
//! One [`SiteParser`] implementation per supported shop. Each parser owns the
//! site's markup knowledge: its selectors, its price fallback order, its
//! currency resolution, and any synthetic image-URL construction. Parsers
//! hold no per-call state (only lazily compiled selectors and regexes), so a
//! single instance safely serves concurrent extractions.

pub mod helpers;

mod alternate;
mod amazon;
mod bonprix;
mod conrad;
mod cyberport;

pub use alternate::AlternateParser;
pub use amazon::AmazonParser;
pub use bonprix::BonPrixParser;
pub use conrad::ConradParser;
pub use cyberport::CyberportParser;

use rust_decimal::Decimal;
use scraper::Html;
use url::Url;

use crate::domain::{Discount, Image};
use crate::error::ParseResult;

/// The fixed extraction capability set every supported site implements.
///
/// All extraction methods are pure over the parsed document: same document
/// in, same output out, no network access.
pub trait SiteParser: Send + Sync {
    /// Bare domains this parser handles, without scheme or `www.` prefix.
    fn supported_domains(&self) -> &'static [&'static str];

    /// Exact membership test against [`SiteParser::supported_domains`].
    fn matches(&self, domain: &str) -> bool {
        self.supported_domains().contains(&domain)
    }

    fn parse_external_id(&self, doc: &Html) -> ParseResult<String>;

    fn parse_title(&self, doc: &Html) -> ParseResult<String>;

    /// `Ok(None)` when the page has no description container.
    fn parse_description(&self, doc: &Html) -> ParseResult<Option<String>>;

    fn parse_current_price(&self, doc: &Html) -> ParseResult<Decimal>;

    /// Resolve the ISO-4217 currency code. Some sites derive it from the
    /// URL's domain suffix rather than the page body.
    fn parse_currency_code(&self, url: &Url, doc: &Html) -> ParseResult<String>;

    /// `Ok(None)` when the page carries no former-price marker.
    fn parse_discount(&self, current_price: Decimal, doc: &Html) -> ParseResult<Option<Discount>>;

    fn parse_images(&self, doc: &Html) -> ParseResult<Vec<Image>>;
}

/// The built-in parser registry in its fixed registration order.
///
/// Order matters: the dispatcher takes the first parser whose domain set
/// matches, and overlaps are not diagnosed.
pub fn default_sites() -> Vec<Box<dyn SiteParser>> {
    vec![
        Box::new(AlternateParser),
        Box::new(AmazonParser),
        Box::new(BonPrixParser),
        Box::new(ConradParser),
        Box::new(CyberportParser),
    ]
}
