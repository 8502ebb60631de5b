//! Alternate product pages (`alternate.de`)

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use crate::domain::{Discount, Image, ImageVariant};
use crate::error::{ParseResult, ParserError};
use crate::money::parse_decimal;
use crate::sites::helpers::{collapsed_text, first_attr, first_text};
use crate::sites::SiteParser;

static EXTERNAL_ID: Lazy<Selector> =
    Lazy::new(|| Selector::parse("var#expressTickerProductId").unwrap());
static TITLE_SPANS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.productNameContainer > h1 > span").unwrap());
static DESCRIPTION: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.description > p:first-child").unwrap());
static PRICE: Lazy<Selector> = Lazy::new(|| Selector::parse("div.price").unwrap());
static OLD_PRICE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.productShort > span.strikedPrice").unwrap());
static ARTICLE_ID: Lazy<Selector> =
    Lazy::new(|| Selector::parse("input[name='articleId']").unwrap());
static CAROUSEL_ITEMS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("ul.jsSlickCarousel > li").unwrap());
static IMG: Lazy<Selector> = Lazy::new(|| Selector::parse("img").unwrap());

/// Asset URLs look like `/p/<WxH>/h/<slug>@@<articleId>.jpg`; the slug between
/// `/h/` and `@@` identifies the product across all renditions.
static ASSET_SLUG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/p/\d+x\d+/h/([^@/]+)@@").unwrap());

const ALTERNATE_URL: &str = "https://www.alternate.de";

/// The gallery renditions Alternate serves for every photo.
const VARIANT_SIZES: [u32; 2] = [230, 50];

pub struct AlternateParser;

impl SiteParser for AlternateParser {
    fn supported_domains(&self) -> &'static [&'static str] {
        &["alternate.de"]
    }

    fn parse_external_id(&self, doc: &Html) -> ParseResult<String> {
        first_text(doc, &EXTERNAL_ID)
            .ok_or_else(|| ParserError::required_field("external_id", "var#expressTickerProductId"))
    }

    fn parse_title(&self, doc: &Html) -> ParseResult<String> {
        // The product name is split over two spans (family, model line).
        let parts: Vec<String> = doc
            .select(&TITLE_SPANS)
            .take(2)
            .map(collapsed_text)
            .collect();

        if parts.len() < 2 {
            return Err(ParserError::required_field(
                "title",
                "div.productNameContainer > h1 > span",
            ));
        }

        Ok(parts.join(" "))
    }

    fn parse_description(&self, doc: &Html) -> ParseResult<Option<String>> {
        Ok(first_text(doc, &DESCRIPTION))
    }

    fn parse_current_price(&self, doc: &Html) -> ParseResult<Decimal> {
        let text = first_attr(doc, &PRICE, "data-standard-price")
            .ok_or_else(|| ParserError::price_not_found(&["div.price[data-standard-price]"]))?;

        parse_decimal(&text)
    }

    fn parse_currency_code(&self, _url: &Url, _doc: &Html) -> ParseResult<String> {
        Ok("EUR".to_string())
    }

    fn parse_discount(&self, current_price: Decimal, doc: &Html) -> ParseResult<Option<Discount>> {
        let Some(old_price_text) = first_text(doc, &OLD_PRICE) else {
            return Ok(None);
        };

        let old_price = parse_decimal(&old_price_text)?;
        Ok(Discount::between(old_price, current_price))
    }

    fn parse_images(&self, doc: &Html) -> ParseResult<Vec<Image>> {
        // The gallery markup only carries one rendition per photo; the other
        // sizes exist server-side under predictable URLs. Rebuild them from
        // the asset slug, the article id, and the photo count.
        let slug = asset_slug(doc)
            .ok_or_else(|| ParserError::extraction("images", "no asset URL with a product slug"))?;

        let article_id = first_attr(doc, &ARTICLE_ID, "content")
            .ok_or_else(|| ParserError::required_field("images", "input[name='articleId']"))?
            .to_lowercase();

        // No carousel means a single photo.
        let count = doc.select(&CAROUSEL_ITEMS).count().max(1);
        debug!(count, %slug, %article_id, "building synthetic image URLs");

        let mut images = Vec::with_capacity(count);
        for index in 0..count {
            let suffix = if index == 0 {
                String::new()
            } else {
                format!("_{index}")
            };

            let mut image = Image::new();
            for size in VARIANT_SIZES {
                image.add_variant(ImageVariant::new(
                    format!("{ALTERNATE_URL}/p/{size}x{size}/h/{slug}@@{article_id}{suffix}.jpg"),
                    size,
                    size,
                ));
            }
            images.push(image);
        }

        Ok(images)
    }
}

fn asset_slug(doc: &Html) -> Option<String> {
    doc.select(&IMG)
        .filter_map(|img| img.value().attr("src"))
        .find_map(|src| ASSET_SLUG.captures(src))
        .map(|captures| captures[1].to_string())
}
