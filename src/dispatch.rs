//! URL dispatch and the fixed extraction pipeline
//!
//! [`EcommerceParser`] routes a product URL to the first registered
//! [`SiteParser`] whose domain set matches, fetches the markup through the
//! injected [`PageSource`], and runs the fixed extraction sequence. Any
//! single-field failure aborts the call: a product with a silently missing
//! price is worse than a hard failure.

use scraper::Html;
use tracing::{debug, warn};
use url::Url;

use crate::domain::{Price, Product};
use crate::error::{ParseResult, ParserError};
use crate::sites::{default_sites, SiteParser};
use crate::source::PageSource;

/// The extraction entry point: a parser registry plus a page source.
///
/// Holds no per-call state; one instance serves concurrent extractions.
pub struct EcommerceParser<S: PageSource> {
    source: S,
    sites: Vec<Box<dyn SiteParser>>,
}

impl<S: PageSource> EcommerceParser<S> {
    /// A parser with the built-in site registry.
    pub fn new(source: S) -> Self {
        Self::with_sites(source, default_sites())
    }

    /// A parser with a caller-constructed registry.
    ///
    /// Registration order matters: if two parsers' domain sets overlap, the
    /// first registered wins. Overlaps are not diagnosed.
    pub fn with_sites(source: S, sites: Vec<Box<dyn SiteParser>>) -> Self {
        Self { source, sites }
    }

    /// Extract the product behind `url`.
    ///
    /// The fetch is the only await point; field extraction runs synchronously
    /// over the parsed document, in the fixed order external id, title,
    /// description, current price, currency, discount, images.
    pub async fn parse_link(&self, url: &str) -> ParseResult<Product> {
        let parsed_url = Url::parse(url).map_err(|err| ParserError::invalid_url(url, err.to_string()))?;
        let domain = resolve_domain(&parsed_url)
            .ok_or_else(|| ParserError::invalid_url(url, "URL has no host"))?;

        let site = self
            .sites
            .iter()
            .find(|site| site.matches(domain))
            .ok_or_else(|| {
                warn!(domain, "no parser registered for domain");
                ParserError::NoParserFound {
                    domain: domain.to_string(),
                }
            })?;
        debug!(domain, "site parser selected");

        let markup = self
            .source
            .fetch(url)
            .await
            .map_err(|err| ParserError::SourceUnavailable {
                url: url.to_string(),
                source: err.into(),
            })?;

        let doc = Html::parse_document(&markup);

        let external_id = site.parse_external_id(&doc)?;
        let title = site.parse_title(&doc)?;
        let description = site.parse_description(&doc)?;
        let current_price = site.parse_current_price(&doc)?;
        let currency = site.parse_currency_code(&parsed_url, &doc)?;
        let discount = site.parse_discount(current_price, &doc)?;
        let images = site.parse_images(&doc)?;

        debug!(domain, %external_id, "product extracted");

        Ok(Product {
            url: url.to_string(),
            external_id,
            title,
            description,
            price: Price::new(current_price, currency, discount),
            images,
        })
    }
}

/// The host with one leading `www.` stripped. Idempotent: hosts without the
/// prefix pass through unchanged.
fn resolve_domain(url: &Url) -> Option<&str> {
    let host = url.host_str()?;
    Some(host.strip_prefix("www.").unwrap_or(host))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://www.amazon.de/gp/product/B002OLT9R8", "amazon.de")]
    #[case("https://amazon.de/gp/product/B002OLT9R8", "amazon.de")]
    #[case("http://www.bonprix.de/produkt/jeans-straight-blau-905358/", "bonprix.de")]
    #[case("https://www.conrad.it/de/x.html", "conrad.it")]
    fn strips_one_leading_www(#[case] url: &str, #[case] expected: &str) {
        let url = Url::parse(url).unwrap();
        assert_eq!(resolve_domain(&url).unwrap(), expected);
    }

    #[test]
    fn url_without_host_has_no_domain() {
        let url = Url::parse("mailto:shop@example.com").unwrap();
        assert_eq!(resolve_domain(&url), None);
    }
}
