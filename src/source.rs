//! Page source boundary
//!
//! The pipeline never talks to the network directly; it asks a [`PageSource`]
//! for the raw markup of a URL. The bundled [`HttpPageSource`] is a thin
//! reqwest client; tests substitute a stub that serves stored fixtures.
//!
//! Source errors are opaque here. The dispatcher converts any failure into
//! [`crate::ParserError::SourceUnavailable`] without retrying.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{redirect, Client, ClientBuilder};
use tracing::{debug, warn};

/// Supplies raw page markup for a URL.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the markup for `url`. Errors are opaque to the caller.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Configuration for the bundled HTTP page source.
#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    /// User agent string sent with every request.
    pub user_agent: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
    /// Whether to follow redirects.
    pub follow_redirects: bool,
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("ecommerce-parser/{}", env!("CARGO_PKG_VERSION")),
            timeout_seconds: 30,
            follow_redirects: true,
        }
    }
}

/// Reqwest-backed [`PageSource`].
///
/// Returns the body as a `String` rather than a parsed document so the
/// non-`Send` document type never crosses an await point; parsing happens
/// synchronously in the pipeline after the fetch completes.
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: Client,
}

impl HttpPageSource {
    pub fn new(config: &HttpSourceConfig) -> Result<Self> {
        let redirect_policy = if config.follow_redirects {
            redirect::Policy::limited(10)
        } else {
            redirect::Policy::none()
        };

        let client = ClientBuilder::new()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .redirect(redirect_policy)
            .gzip(true)
            .cookie_store(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self { client })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(&HttpSourceConfig::default())
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!(url, "fetching page source");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, status = %status, "page source request rejected");
            return Err(anyhow!("unexpected status {status} for {url}"));
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read response body from {url}"))?;

        debug!(url, bytes = body.len(), "page source fetched");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_identifies_the_crate() {
        let config = HttpSourceConfig::default();
        assert!(config.user_agent.starts_with("ecommerce-parser/"));
        assert_eq!(config.timeout_seconds, 30);
        assert!(config.follow_redirects);
    }

    #[test]
    fn client_builds_with_and_without_redirects() {
        assert!(HttpPageSource::with_defaults().is_ok());

        let pinned = HttpSourceConfig {
            follow_redirects: false,
            ..HttpSourceConfig::default()
        };
        assert!(HttpPageSource::new(&pinned).is_ok());
    }
}
