//! Amazon product pages (`amazon.de`, `amazon.com`)

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use scraper::{Html, Selector};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::domain::{Discount, Image, ImageVariant};
use crate::error::{ParseResult, ParserError};
use crate::money::parse_decimal;
use crate::sites::helpers::{first_attr, first_text, probe_text};
use crate::sites::SiteParser;

static ASIN: Lazy<Selector> = Lazy::new(|| Selector::parse("input#ASIN").unwrap());
static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("span#productTitle").unwrap());
static DESCRIPTION: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div#productDescription > p:first-child").unwrap());
static OLD_PRICE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div#price span.a-text-strike").unwrap());

/// Known price locations in fallback order. Amazon has moved its price
/// markup repeatedly; the first location with text wins.
const PRICE_LOCATIONS: [&str; 4] = [
    "span.a-size-medium.a-color-price.offer-price.a-text-normal",
    "span#priceblock_ourprice",
    "span#priceblock_saleprice",
    "span#priceblock_dealprice",
];

static PRICE_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    PRICE_LOCATIONS
        .iter()
        .map(|location| Selector::parse(location).unwrap())
        .collect()
});

/// Captures the `'initial'` array of the embedded `colorImages` script blob.
static IMAGE_BLOB: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"'colorImages':\s*\{\s*'initial':\s*(\[[\s\S]+?\])\s*\}\s*,\s*'colorToAsin'")
        .unwrap()
});

pub struct AmazonParser;

impl SiteParser for AmazonParser {
    fn supported_domains(&self) -> &'static [&'static str] {
        &["amazon.de", "amazon.com"]
    }

    fn parse_external_id(&self, doc: &Html) -> ParseResult<String> {
        first_attr(doc, &ASIN, "value")
            .ok_or_else(|| ParserError::required_field("external_id", "input#ASIN"))
    }

    fn parse_title(&self, doc: &Html) -> ParseResult<String> {
        first_text(doc, &TITLE)
            .ok_or_else(|| ParserError::required_field("title", "span#productTitle"))
    }

    fn parse_description(&self, doc: &Html) -> ParseResult<Option<String>> {
        Ok(first_text(doc, &DESCRIPTION))
    }

    fn parse_current_price(&self, doc: &Html) -> ParseResult<Decimal> {
        let probes: Vec<&Selector> = PRICE_SELECTORS.iter().collect();
        let text = probe_text(doc, &probes)
            .ok_or_else(|| ParserError::price_not_found(&PRICE_LOCATIONS))?;

        parse_decimal(&text)
    }

    fn parse_currency_code(&self, url: &Url, _doc: &Html) -> ParseResult<String> {
        let domain = url.host_str().unwrap_or_default();
        let domain = domain.strip_prefix("www.").unwrap_or(domain);

        match domain {
            "amazon.de" => Ok("EUR".to_string()),
            "amazon.com" => Ok("USD".to_string()),
            other => Err(ParserError::UnsupportedCurrency {
                domain: other.to_string(),
            }),
        }
    }

    fn parse_discount(&self, current_price: Decimal, doc: &Html) -> ParseResult<Option<Discount>> {
        let Some(old_price_text) = first_text(doc, &OLD_PRICE) else {
            return Ok(None);
        };

        let old_price = parse_decimal(&old_price_text)?;
        Ok(Discount::between(old_price, current_price))
    }

    fn parse_images(&self, doc: &Html) -> ParseResult<Vec<Image>> {
        // The gallery is not in the markup as elements; it lives in a script
        // blob mapping each photo's variant URLs to [height, width] pairs.
        let markup = doc.root_element().html();
        let Some(blob) = IMAGE_BLOB.captures(&markup) else {
            debug!("no colorImages blob on page, assuming no gallery");
            return Ok(Vec::new());
        };

        let entries: Vec<Value> = serde_json::from_str(&blob[1])
            .map_err(|err| ParserError::extraction("images", format!("bad image blob: {err}")))?;

        let mut images = Vec::with_capacity(entries.len());
        for entry in &entries {
            let main = entry
                .get("main")
                .and_then(Value::as_object)
                .ok_or_else(|| ParserError::extraction("images", "blob entry without 'main' map"))?;

            let mut image = Image::new();
            // serde_json preserves key order here, which is the on-page
            // discovery order of the variants.
            for (variant_url, dimensions) in main {
                let (height, width) = variant_dimensions(dimensions).ok_or_else(|| {
                    ParserError::extraction("images", format!("bad dimensions for {variant_url}"))
                })?;
                image.add_variant(ImageVariant::new(variant_url.clone(), width, height));
            }
            images.push(image);
        }

        Ok(images)
    }
}

fn variant_dimensions(value: &Value) -> Option<(u32, u32)> {
    let pair = value.as_array()?;
    if pair.len() != 2 {
        return None;
    }
    let height = u32::try_from(pair[0].as_u64()?).ok()?;
    let width = u32::try_from(pair[1].as_u64()?).ok()?;
    Some((height, width))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn probes_price_locations_in_fallback_order() {
        let doc = Html::parse_document(
            "<span id='priceblock_ourprice'></span>\
             <span id='priceblock_dealprice'>EUR 12,99</span>",
        );
        assert_eq!(AmazonParser.parse_current_price(&doc).unwrap(), dec!(12.99));
    }

    #[test]
    fn reports_every_tried_location_when_no_price_is_present() {
        let doc = Html::parse_document("<div id='nothing-here'></div>");
        let err = AmazonParser.parse_current_price(&doc).unwrap_err();
        match err {
            ParserError::PriceNotFound { tried_selectors } => {
                assert_eq!(tried_selectors.len(), PRICE_LOCATIONS.len());
            }
            other => panic!("expected PriceNotFound, got {other:?}"),
        }
    }

    #[test]
    fn currency_follows_the_request_domain() {
        let doc = Html::parse_document("<html></html>");
        let de = Url::parse("https://www.amazon.de/gp/product/B002OLT9R8").unwrap();
        let com = Url::parse("http://amazon.com/123").unwrap();
        let co_uk = Url::parse("https://amazon.co.uk/123").unwrap();

        assert_eq!(AmazonParser.parse_currency_code(&de, &doc).unwrap(), "EUR");
        assert_eq!(AmazonParser.parse_currency_code(&com, &doc).unwrap(), "USD");
        assert!(matches!(
            AmazonParser.parse_currency_code(&co_uk, &doc),
            Err(ParserError::UnsupportedCurrency { .. })
        ));
    }

    #[test]
    fn malformed_image_blob_is_an_error_not_an_empty_gallery() {
        let doc = Html::parse_document(
            "<script>'colorImages': { 'initial': [ {broken ] }, 'colorToAsin'</script>",
        );
        assert!(matches!(
            AmazonParser.parse_images(&doc),
            Err(ParserError::ExtractionFailed { .. })
        ));
    }

    #[test]
    fn page_without_gallery_blob_has_no_images() {
        let doc = Html::parse_document("<html><body>no blob</body></html>");
        assert!(AmazonParser.parse_images(&doc).unwrap().is_empty());
    }
}
