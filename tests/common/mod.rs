//! Shared test support: fixture loading and page source stubs.

use std::fs;
use std::path::Path;
use std::sync::Once;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use ecommerce_parser::PageSource;

static TRACING: Once = Once::new();

/// Install a log subscriber honoring `RUST_LOG` so failing extractions can
/// be traced with `RUST_LOG=debug cargo test`.
fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Serves one stored fixture page for every URL.
pub struct StaticSource {
    html: String,
}

impl StaticSource {
    /// Load a fixture by its path under `tests/fixtures/`.
    pub fn from_fixture(relative: &str) -> Self {
        init_tracing();
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(relative);
        let html = fs::read_to_string(&path)
            .unwrap_or_else(|err| panic!("cannot read fixture {}: {err}", path.display()));
        Self { html }
    }

    #[allow(dead_code)]
    pub fn from_markup(html: &str) -> Self {
        init_tracing();
        Self {
            html: html.to_string(),
        }
    }
}

#[async_trait]
impl PageSource for StaticSource {
    async fn fetch(&self, _url: &str) -> Result<String> {
        Ok(self.html.clone())
    }
}

/// Fails every fetch, simulating an unreachable shop.
#[allow(dead_code)]
pub struct FailingSource;

#[async_trait]
impl PageSource for FailingSource {
    async fn fetch(&self, url: &str) -> Result<String> {
        Err(anyhow!("connection refused: {url}"))
    }
}
