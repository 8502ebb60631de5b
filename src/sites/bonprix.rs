//! BonPrix product pages (`bonprix.de`)

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use scraper::{Html, Selector};
use url::Url;

use crate::domain::{Discount, Image, ImageVariant};
use crate::error::{ParseResult, ParserError};
use crate::money::parse_decimal;
use crate::sites::helpers::{first_attr, first_text};
use crate::sites::SiteParser;

static PRODUCT_PAGE: Lazy<Selector> = Lazy::new(|| Selector::parse("div#product-page").unwrap());
static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("h1.product-name").unwrap());
static DESCRIPTION: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p.product-information-full-description").unwrap());
static PRICE: Lazy<Selector> = Lazy::new(|| Selector::parse("div#offer > span.price").unwrap());
static FORMER_PRICE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span.price.former-price").unwrap());
static IMAGE_WRAPPERS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div#carousel_product_look div.image-wrapper").unwrap());

/// Asset URLs embed their pixel size as a `/<height>x<width>/` path token.
static IMG_DIMENSIONS: Lazy<Regex> = Lazy::new(|| Regex::new(r"/(\d+)x(\d+)/").unwrap());

/// The three renditions each carousel wrapper links, in discovery order.
const VARIANT_ATTRS: [&str; 3] = ["data-image-src", "data-zoom-image-src", "data-preview-image-src"];

const IMAGE_PREFIX: &str = "https:";

pub struct BonPrixParser;

impl SiteParser for BonPrixParser {
    fn supported_domains(&self) -> &'static [&'static str] {
        &["bonprix.de"]
    }

    fn parse_external_id(&self, doc: &Html) -> ParseResult<String> {
        first_attr(doc, &PRODUCT_PAGE, "data-product-ordernumber")
            .ok_or_else(|| ParserError::required_field("external_id", "div#product-page"))
    }

    fn parse_title(&self, doc: &Html) -> ParseResult<String> {
        first_text(doc, &TITLE)
            .ok_or_else(|| ParserError::required_field("title", "h1.product-name"))
    }

    fn parse_description(&self, doc: &Html) -> ParseResult<Option<String>> {
        Ok(first_text(doc, &DESCRIPTION))
    }

    fn parse_current_price(&self, doc: &Html) -> ParseResult<Decimal> {
        let text = first_attr(doc, &PRICE, "content")
            .ok_or_else(|| ParserError::price_not_found(&["div#offer > span.price[content]"]))?;

        parse_decimal(&text)
    }

    fn parse_currency_code(&self, _url: &Url, _doc: &Html) -> ParseResult<String> {
        Ok("EUR".to_string())
    }

    fn parse_discount(&self, current_price: Decimal, doc: &Html) -> ParseResult<Option<Discount>> {
        let Some(former_price_text) = first_text(doc, &FORMER_PRICE) else {
            return Ok(None);
        };

        let old_price = parse_decimal(&former_price_text)?;
        Ok(Discount::between(old_price, current_price))
    }

    fn parse_images(&self, doc: &Html) -> ParseResult<Vec<Image>> {
        let mut images = Vec::new();

        for wrapper in doc.select(&IMAGE_WRAPPERS) {
            let mut image = Image::new();
            for attr in VARIANT_ATTRS {
                let src = wrapper.value().attr(attr).unwrap_or_default();
                image.add_variant(variant_from_url(src)?);
            }
            images.push(image);
        }

        Ok(images)
    }
}

fn variant_from_url(src: &str) -> ParseResult<ImageVariant> {
    let captures = IMG_DIMENSIONS.captures(src).ok_or_else(|| {
        ParserError::extraction("images", format!("no dimension token in asset URL '{src}'"))
    })?;

    // Capture groups are digits only; they always parse.
    let height: u32 = captures[1].parse().unwrap_or_default();
    let width: u32 = captures[2].parse().unwrap_or_default();

    Ok(ImageVariant::new(
        format!("{IMAGE_PREFIX}{src}"),
        width,
        height,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_carries_dimensions_from_the_path_token() {
        let variant =
            variant_from_url("//image01.bonprix.de/assets/319x448/1511338838/15045955-hDEd0CBM.jpg")
                .unwrap();
        assert_eq!(
            variant.url,
            "https://image01.bonprix.de/assets/319x448/1511338838/15045955-hDEd0CBM.jpg"
        );
        assert_eq!(variant.height, 319);
        assert_eq!(variant.width, 448);
    }

    #[test]
    fn asset_url_without_dimension_token_fails_extraction() {
        assert!(matches!(
            variant_from_url("//image01.bonprix.de/assets/original/15045955.jpg"),
            Err(ParserError::ExtractionFailed { .. })
        ));
    }

    #[test]
    fn each_wrapper_becomes_one_image_with_three_variants() {
        let doc = Html::parse_document(
            "<div id='carousel_product_look'>\
               <div class='image-wrapper' \
                    data-image-src='//i.bonprix.de/assets/319x448/a.jpg' \
                    data-zoom-image-src='//i.bonprix.de/assets/957x1344/a.jpg' \
                    data-preview-image-src='//i.bonprix.de/assets/31x44/a.jpg'></div>\
             </div>",
        );
        let images = BonPrixParser.parse_images(&doc).unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].variants().len(), 3);
        assert_eq!(images[0].variants()[1].height, 957);
    }
}
