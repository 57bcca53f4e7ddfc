//! Cached search orchestration.
//!
//! Builds a [`SearchKey`] from (query, region), answers from the
//! [`BoundedCache`] when possible, and otherwise fetches the results page,
//! extracts records and stores them.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use duckparse_core::{AppConfig, BoundedCache, CacheSettings, Error, ResultRecord, SearchKey};

use crate::extract::extract_results;
use crate::fetch::{DuckDuckGoFetcher, FetchConfig, HtmlFetcher};

/// A search response as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SearchPayload {
    /// The query as given by the caller.
    pub query: String,
    /// Region code used for the lookup.
    pub region: String,
    /// RFC 3339 time the payload was produced.
    pub timestamp: String,
    /// Whether the records came from the cache.
    pub cache_hit: bool,
    /// Number of records in `results`.
    pub count: usize,
    pub results: Vec<ResultRecord>,
}

/// Search front end combining a fetcher, the extractor and a result cache.
pub struct SearchService {
    fetcher: Arc<dyn HtmlFetcher>,
    cache: BoundedCache<SearchKey, Vec<ResultRecord>>,
    default_region: String,
}

impl SearchService {
    /// Create a service over any fetcher.
    pub fn new(fetcher: Arc<dyn HtmlFetcher>, settings: CacheSettings, default_region: impl Into<String>) -> Self {
        Self { fetcher, cache: BoundedCache::from_settings(settings), default_region: default_region.into() }
    }

    /// Create a service that fetches from DuckDuckGo using `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self, Error> {
        let fetcher = DuckDuckGoFetcher::new(FetchConfig::from(config))?;
        Ok(Self::new(Arc::new(fetcher), config.cache_settings(), config.default_region.clone()))
    }

    /// Search for `query`, using the cache unless `force_refresh` is set.
    ///
    /// Failed fetches are not cached.
    pub async fn search(
        &self, query: &str, region: Option<&str>, force_refresh: bool,
    ) -> Result<SearchPayload, Error> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::InvalidInput("query cannot be empty".into()));
        }

        let region = region
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(&self.default_region);
        let key = SearchKey::new(query, region);

        if !force_refresh && let Some(results) = self.cache.get(&key) {
            tracing::debug!("cache hit for search {}", key);
            return Ok(self.payload(query, &key, true, results));
        }

        tracing::debug!("cache miss for search {}", key);
        let html = self.fetcher.fetch(query, key.region()).await?;
        let results = extract_results(&html);

        tracing::debug!("extracted {} results for {}", results.len(), key);
        self.cache.set(key.clone(), results.clone());

        Ok(self.payload(query, &key, false, results))
    }

    /// Get reference to the result cache.
    pub fn cache(&self) -> &BoundedCache<SearchKey, Vec<ResultRecord>> {
        &self.cache
    }

    fn payload(&self, query: &str, key: &SearchKey, cache_hit: bool, results: Vec<ResultRecord>) -> SearchPayload {
        SearchPayload {
            query: query.to_string(),
            region: key.region().to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            cache_hit,
            count: results.len(),
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use duckparse_core::RecordKind;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const OPENCLAW_HTML: &str = include_str!("../../fixtures/html-openclaw.html");

    /// Serves a fixed page and records every request.
    struct StubFetcher {
        html: &'static str,
        fail: bool,
        calls: AtomicUsize,
        requests: Mutex<Vec<(String, String)>>,
    }

    impl StubFetcher {
        fn new(html: &'static str) -> Self {
            Self { html, fail: false, calls: AtomicUsize::new(0), requests: Mutex::new(Vec::new()) }
        }

        fn failing() -> Self {
            Self { fail: true, ..Self::new("") }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl HtmlFetcher for StubFetcher {
        async fn fetch(&self, query: &str, region: &str) -> Result<String, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests
                .lock()
                .unwrap()
                .push((query.to_string(), region.to_string()));
            if self.fail {
                return Err(Error::HttpError("DuckDuckGo returned 503".into()));
            }
            Ok(self.html.to_string())
        }
    }

    fn service(fetcher: Arc<StubFetcher>, max_entries: usize) -> SearchService {
        SearchService::new(fetcher, CacheSettings { ttl_minutes: 5, max_entries }, "US")
    }

    #[tokio::test]
    async fn test_search_extracts_records() {
        let fetcher = Arc::new(StubFetcher::new(OPENCLAW_HTML));
        let service = service(fetcher.clone(), 10);

        let payload = service.search("openclaw", Some("US"), false).await.unwrap();

        assert_eq!(payload.query, "openclaw");
        assert_eq!(payload.region, "US");
        assert!(!payload.cache_hit);
        assert_eq!(payload.results[0].kind, RecordKind::ZeroClick);
        assert_eq!(payload.count, 12);
        assert_eq!(payload.count, payload.results.len());
        assert!(chrono::DateTime::parse_from_rfc3339(&payload.timestamp).is_ok());
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn test_second_search_served_from_cache() {
        let fetcher = Arc::new(StubFetcher::new(OPENCLAW_HTML));
        let service = service(fetcher.clone(), 10);

        let first = service.search("openclaw", Some("US"), false).await.unwrap();
        let second = service.search("  OpenClaw ", Some("us"), false).await.unwrap();

        assert_eq!(fetcher.calls(), 1);
        assert!(second.cache_hit);
        assert_eq!(first.results, second.results);
        assert_eq!(second.count, first.count);
    }

    #[tokio::test]
    async fn test_force_refresh_bypasses_cache() {
        let fetcher = Arc::new(StubFetcher::new(OPENCLAW_HTML));
        let service = service(fetcher.clone(), 10);

        service.search("openclaw", None, false).await.unwrap();
        let refreshed = service.search("openclaw", None, true).await.unwrap();

        assert_eq!(fetcher.calls(), 2);
        assert!(!refreshed.cache_hit);
    }

    #[tokio::test]
    async fn test_regions_cached_separately() {
        let fetcher = Arc::new(StubFetcher::new(OPENCLAW_HTML));
        let service = service(fetcher.clone(), 10);

        service.search("openclaw", Some("US"), false).await.unwrap();
        service.search("openclaw", Some("DE"), false).await.unwrap();

        assert_eq!(fetcher.calls(), 2);
        assert_eq!(service.cache().len(), 2);
    }

    #[tokio::test]
    async fn test_default_region_used() {
        let fetcher = Arc::new(StubFetcher::new(OPENCLAW_HTML));
        let service = SearchService::new(fetcher.clone(), CacheSettings::default(), "GB");

        let payload = service.search("openclaw", Some("  "), false).await.unwrap();

        assert_eq!(payload.region, "GB");
        let requests = fetcher.requests.lock().unwrap();
        assert_eq!(requests[0], ("openclaw".to_string(), "GB".to_string()));
    }

    #[tokio::test]
    async fn test_empty_query_rejected() {
        let fetcher = Arc::new(StubFetcher::new(OPENCLAW_HTML));
        let service = service(fetcher.clone(), 10);

        let result = service.search("   ", None, false).await;

        assert!(matches!(result, Err(Error::InvalidInput(_))));
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_fetch_failure_not_cached() {
        let fetcher = Arc::new(StubFetcher::failing());
        let service = service(fetcher.clone(), 10);

        assert!(matches!(service.search("openclaw", None, false).await, Err(Error::HttpError(_))));
        assert!(service.search("openclaw", None, false).await.is_err());

        assert_eq!(fetcher.calls(), 2);
        assert!(service.cache().is_empty());
    }

    #[tokio::test]
    async fn test_capacity_evicts_oldest_query() {
        let fetcher = Arc::new(StubFetcher::new(OPENCLAW_HTML));
        let service = service(fetcher.clone(), 2);

        service.search("one", None, false).await.unwrap();
        service.search("two", None, false).await.unwrap();
        service.search("three", None, false).await.unwrap();
        assert_eq!(fetcher.calls(), 3);

        let again = service.search("one", None, false).await.unwrap();
        assert!(!again.cache_hit);
        assert_eq!(fetcher.calls(), 4);
    }

    #[test]
    fn test_payload_serializes_nulls() {
        let payload = SearchPayload {
            query: "q".into(),
            region: "US".into(),
            timestamp: "2025-01-20T00:00:00.000Z".into(),
            cache_hit: false,
            count: 1,
            results: vec![ResultRecord::new(RecordKind::Web, "Title")],
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert!(value["results"][0]["published_at"].is_null());
        assert_eq!(value["count"], 1);
        assert_eq!(value["results"][0]["kind"], "web");
    }

    #[test]
    fn test_from_config() {
        let service = SearchService::from_config(&AppConfig::default()).unwrap();
        assert_eq!(service.cache().max_entries(), 200);
        assert_eq!(service.cache().ttl(), std::time::Duration::from_secs(300));
    }
}
