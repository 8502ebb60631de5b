//! Conrad product pages (`conrad.de`, `conrad.it`)

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use scraper::{Html, Node, Selector};
use url::Url;

use crate::domain::{Discount, Image, ImageVariant};
use crate::error::{ParseResult, ParserError};
use crate::money::parse_decimal;
use crate::sites::helpers::{first_attr, first_text};
use crate::sites::SiteParser;

static SKU: Lazy<Selector> = Lazy::new(|| Selector::parse("span[itemprop='sku']").unwrap());
static TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1.ccpProductDetail__title__text").unwrap());
static DESCRIPTION_SECTION: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div#description > section").unwrap());
static PRICE: Lazy<Selector> = Lazy::new(|| Selector::parse("meta[itemprop='price']").unwrap());
static OLD_PRICE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.ccpProductDetailInfo__cell__price__old__value > span").unwrap());
static SLIDESHOW_IMAGES: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("img.ccpProductDetailSlideshow__slider__wrapper__list__item__image").unwrap()
});
static IMG: Lazy<Selector> = Lazy::new(|| Selector::parse("img").unwrap());

/// Conrad assets carry their rendition size as `?x=<width>&y=<height>`.
static IMG_DIMENSIONS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\?x=(\d+)&y=(\d+)").unwrap());

pub struct ConradParser;

impl SiteParser for ConradParser {
    fn supported_domains(&self) -> &'static [&'static str] {
        &["conrad.de", "conrad.it"]
    }

    fn parse_external_id(&self, doc: &Html) -> ParseResult<String> {
        first_text(doc, &SKU)
            .ok_or_else(|| ParserError::required_field("external_id", "span[itemprop='sku']"))
    }

    fn parse_title(&self, doc: &Html) -> ParseResult<String> {
        first_text(doc, &TITLE)
            .ok_or_else(|| ParserError::required_field("title", "h1.ccpProductDetail__title__text"))
    }

    fn parse_description(&self, doc: &Html) -> ParseResult<Option<String>> {
        // Only the section's direct text nodes belong to the description;
        // nested elements hold datasheets and legalese.
        let Some(section) = doc.select(&DESCRIPTION_SECTION).next() else {
            return Ok(None);
        };

        let lines: Vec<&str> = section
            .children()
            .filter_map(|child| match child.value() {
                Node::Text(text) => Some(text.trim()),
                _ => None,
            })
            .filter(|line| !line.is_empty())
            .collect();

        Ok(if lines.is_empty() {
            None
        } else {
            Some(lines.join("\n"))
        })
    }

    fn parse_current_price(&self, doc: &Html) -> ParseResult<Decimal> {
        let text = first_attr(doc, &PRICE, "content")
            .ok_or_else(|| ParserError::price_not_found(&["meta[itemprop='price'][content]"]))?;

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
        let mut images = Vec::new();

        for slide in doc.select(&SLIDESHOW_IMAGES) {
            let src = slide.value().attr("src").unwrap_or_default();
            let base = src.split('?').next().unwrap_or_default();
            if base.is_empty() {
                continue;
            }

            // Every img sharing the slide's query-stripped base URL is a
            // rendition of the same photo: document order, deduplicated.
            let mut image = Image::new();
            let mut seen: Vec<&str> = Vec::new();
            for img in doc.select(&IMG) {
                let Some(variant_src) = img.value().attr("src") else {
                    continue;
                };
                if !variant_src.starts_with(base) || seen.contains(&variant_src) {
                    continue;
                }
                seen.push(variant_src);
                image.add_variant(variant_from_url(variant_src)?);
            }
            images.push(image);
        }

        Ok(images)
    }
}

fn variant_from_url(url: &str) -> ParseResult<ImageVariant> {
    let captures = IMG_DIMENSIONS.captures(url).ok_or_else(|| {
        ParserError::extraction("images", format!("no dimension query in asset URL '{url}'"))
    })?;

    let width: u32 = captures[1].parse().unwrap_or_default();
    let height: u32 = captures[2].parse().unwrap_or_default();

    Ok(ImageVariant::new(url, width, height))
}
