//! Error types for product page extraction
//!
//! Every failure of an extraction call surfaces as one of these variants.
//! They are terminal for the call: the pipeline never retries internally and
//! never substitutes defaults for missing required fields, so a caller gets
//! either a fully populated product or a reason precise enough to tell which
//! site or field broke.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("invalid product URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("no parser registered for domain '{domain}'")]
    NoParserFound { domain: String },

    #[error("page source unavailable for {url}")]
    SourceUnavailable {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("no price found in any known page location")]
    PriceNotFound { tried_selectors: Vec<String> },

    #[error("no parseable decimal in '{text}'")]
    InvalidDecimal { text: String },

    #[error("could not resolve an ISO-4217 currency code for '{domain}'")]
    UnsupportedCurrency { domain: String },

    #[error("required field '{field}' not found in page (selector: {selector})")]
    RequiredFieldMissing { field: String, selector: String },

    #[error("failed to extract {field}: {reason}")]
    ExtractionFailed { field: String, reason: String },
}

impl ParserError {
    /// Create an invalid URL error from the offending input.
    pub fn invalid_url(url: &str, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a price-not-found error recording the probed locations.
    pub fn price_not_found(tried_selectors: &[&str]) -> Self {
        Self::PriceNotFound {
            tried_selectors: tried_selectors.iter().map(ToString::to_string).collect(),
        }
    }

    /// Create an invalid decimal error from the text that failed to parse.
    pub fn invalid_decimal(text: &str) -> Self {
        Self::InvalidDecimal {
            text: text.to_string(),
        }
    }

    /// Create a required field missing error naming the selector that came up empty.
    pub fn required_field(field: &str, selector: &str) -> Self {
        Self::RequiredFieldMissing {
            field: field.to_string(),
            selector: selector.to_string(),
        }
    }

    /// Create an adapter-specific extraction failure.
    pub fn extraction(field: &str, reason: impl Into<String>) -> Self {
        Self::ExtractionFailed {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether this failure is an expected routing outcome rather than a
    /// broken page (callers commonly skip unsupported shops instead of
    /// alerting on them).
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::NoParserFound { .. })
    }
}

pub type ParseResult<T> = Result<T, ParserError>;
