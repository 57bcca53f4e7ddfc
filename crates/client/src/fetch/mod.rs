//! HTTP fetch of DuckDuckGo's HTML results page.
//!
//! ### Request
//! - `GET <base_url>?q=<query>&kl=<locale>` with a browser User-Agent.
//! - Region codes map to DuckDuckGo locales (`US` -> `us-en`, ...).
//!
//! ### Limits
//! - Request timeout (default: 20s)
//! - Max body bytes: 5MB (configurable)
//!
//! No retries and no rate limiting; callers own that policy.

pub mod region;

use async_trait::async_trait;
use reqwest::{Client, header};
use std::time::{Duration, Instant};
use url::Url;

pub use region::{DEFAULT_LOCALE, locale_for_region};

use duckparse_core::{AppConfig, Error};

/// Source of results-page HTML.
#[async_trait]
pub trait HtmlFetcher: Send + Sync {
    /// Fetch the results page for `query` in `region`.
    async fn fetch(&self, query: &str, region: &str) -> Result<String, Error>;
}

/// Configuration for the DuckDuckGo fetcher.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Results page endpoint (default: https://duckduckgo.com/html/)
    pub base_url: String,

    /// User agent string (default: desktop Firefox)
    pub user_agent: String,

    /// Maximum response body size in bytes (default: 5MB)
    pub max_bytes: usize,

    /// Request timeout (default: 20s)
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for FetchConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            user_agent: config.user_agent.clone(),
            max_bytes: config.max_bytes,
            timeout: config.timeout(),
        }
    }
}

/// Fetches DuckDuckGo's HTML results page over HTTPS.
pub struct DuckDuckGoFetcher {
    http: Client,
    config: FetchConfig,
}

impl DuckDuckGoFetcher {
    /// Create a new fetcher with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        Url::parse(&config.base_url).map_err(|e| Error::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::HttpError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Build the results page URL for a query and region.
    pub fn search_url(&self, query: &str, region: &str) -> Result<Url, Error> {
        Url::parse_with_params(&self.config.base_url, &[("q", query), ("kl", locale_for_region(region))])
            .map_err(|e| Error::InvalidUrl(e.to_string()))
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

#[async_trait]
impl HtmlFetcher for DuckDuckGoFetcher {
    async fn fetch(&self, query: &str, region: &str) -> Result<String, Error> {
        let start = Instant::now();
        let url = self.search_url(query, region)?;

        let response = self
            .http
            .get(url.as_str())
            .header(header::ACCEPT, "text/html")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::FetchTimeout(format!("{} after {:?}", url, self.config.timeout))
                } else {
                    Error::HttpError(format!("network error: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpError(format!("DuckDuckGo returned {}", status.as_u16())));
        }

        if let Some(len) = response.content_length()
            && len as usize > self.config.max_bytes
        {
            return Err(Error::FetchTooLarge(format!("{} bytes exceeds {}", len, self.config.max_bytes)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::FetchTimeout(format!("{} body after {:?}", url, self.config.timeout))
                } else {
                    Error::HttpError(format!("failed to read response: {}", e))
                }
            })?;

        if bytes.len() > self.config.max_bytes {
            return Err(Error::FetchTooLarge(format!("{} bytes exceeds {}", bytes.len(), self.config.max_bytes)));
        }

        tracing::debug!(
            "fetched results for {:?} ({}) in {}ms ({} bytes)",
            query,
            region,
            start.elapsed().as_millis(),
            bytes.len()
        );

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
