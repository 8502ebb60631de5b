//! Decimal parsing for locale-formatted price text
//!
//! Shop pages render prices in whatever their locale dictates: `"12,99 €"`,
//! `"EUR 29,99"`, `"1.234,56"`, or a canonical `"84.99"` inside a metadata
//! attribute. This module locates the numeric substring, normalizes the
//! separators, and constructs an exact [`Decimal`] — binary floating point is
//! never involved, so derived figures round-trip predictably.

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{ParseResult, ParserError};

/// Scale used for discount percentages throughout the crate.
pub const PERCENTAGE_SCALE: u32 = 2;

static NUMERIC_FRAGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9][0-9.,]*").unwrap());

/// Parse the first numeric substring out of locale-formatted text.
///
/// Currency symbols, labels and surrounding prose are ignored. Decimal commas
/// and thousands separators are resolved by position: when both `,` and `.`
/// appear, the later one is the decimal separator.
pub fn parse_decimal(text: &str) -> ParseResult<Decimal> {
    let fragment = NUMERIC_FRAGMENT
        .find(text)
        .ok_or_else(|| ParserError::invalid_decimal(text))?;

    let cleaned = fragment.as_str().trim_end_matches(['.', ',']);
    let normalized = normalize_separators(cleaned);

    Decimal::from_str(&normalized).map_err(|_| ParserError::invalid_decimal(text))
}

/// Round half-up (away from zero at the midpoint) to the given scale.
///
/// This is the single rounding rule used for every derived percentage in the
/// crate; see [`crate::domain::Discount`].
pub fn round_half_up(value: Decimal, scale: u32) -> Decimal {
    value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero)
}

fn normalize_separators(fragment: &str) -> String {
    let last_comma = fragment.rfind(',');
    let last_period = fragment.rfind('.');

    match (last_comma, last_period) {
        // Decimal comma: "99,99" -> "99.99"
        (Some(_), None) => fragment.replace(',', "."),
        // Already canonical: "99.99"
        (None, Some(_)) => fragment.to_string(),
        // Both present: the later separator is the decimal one
        (Some(c), Some(p)) if c > p => fragment.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => fragment.replace(',', ""),
        // Plain digits
        (None, None) => fragment.to_string(),
    }
}
