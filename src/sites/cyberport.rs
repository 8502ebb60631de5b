//! Cyberport product pages (`cyberport.de`)

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use scraper::{Html, Selector};
use url::Url;

use crate::domain::{Discount, Image};
use crate::error::{ParseResult, ParserError};
use crate::money::parse_decimal;
use crate::sites::helpers::{first_attr, first_text};
use crate::sites::SiteParser;

static LOGIN_FORM: Lazy<Selector> = Lazy::new(|| Selector::parse("form#loginformleft").unwrap());
static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("h1 > span[itemprop='name']").unwrap());
static DESCRIPTION: Lazy<Selector> = Lazy::new(|| Selector::parse("div.article > p").unwrap());
static PRICE: Lazy<Selector> = Lazy::new(|| Selector::parse("meta[itemprop='price']").unwrap());
static OLD_PRICE: Lazy<Selector> = Lazy::new(|| Selector::parse("div.old-price2 > div").unwrap());

/// Cyberport article numbers (`1A09-0AY_8465`) appear in the login form's
/// action URL rather than in a dedicated element.
static EXTERNAL_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Z]|[0-9])+-([A-Z]|[0-9])+_([A-Z]|[0-9])+").unwrap());

pub struct CyberportParser;

impl SiteParser for CyberportParser {
    fn supported_domains(&self) -> &'static [&'static str] {
        &["cyberport.de"]
    }

    fn parse_external_id(&self, doc: &Html) -> ParseResult<String> {
        let action = first_attr(doc, &LOGIN_FORM, "action")
            .ok_or_else(|| ParserError::required_field("external_id", "form#loginformleft"))?;

        EXTERNAL_ID
            .find(&action)
            .map(|id| id.as_str().to_string())
            .ok_or_else(|| {
                ParserError::extraction("external_id", format!("no article number in '{action}'"))
            })
    }

    fn parse_title(&self, doc: &Html) -> ParseResult<String> {
        first_text(doc, &TITLE)
            .ok_or_else(|| ParserError::required_field("title", "h1 > span[itemprop='name']"))
    }

    fn parse_description(&self, doc: &Html) -> ParseResult<Option<String>> {
        // The description paragraph carries markup worth keeping.
        Ok(doc
            .select(&DESCRIPTION)
            .next()
            .map(|paragraph| paragraph.inner_html().trim().to_string())
            .filter(|html| !html.is_empty()))
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

    fn parse_images(&self, _doc: &Html) -> ParseResult<Vec<Image>> {
        // The gallery is assembled client-side; the served markup has none.
        Ok(Vec::new())
    }
}
