use anyhow::{Context, Result};
use std::time::Duration;

/// Catalog location published by the vendor.
pub const DEFAULT_CATALOG_URL: &str =
    "https://downloads.esri.com/patch_notification/patches.json";

/// Default fetch timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP client for retrieving the catalog document.
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    /// Builds a fetcher whose requests abort after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }

    /// GETs `url` and returns the full response body as text.
    ///
    /// A connection failure, timeout, or non-2xx status is an error; there
    /// is no retry.
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", url))?;

        let response = response
            .error_for_status()
            .with_context(|| format!("Catalog server returned an error for {}", url))?;

        response
            .text()
            .await
            .context("Failed to read catalog response body")
    }
}
