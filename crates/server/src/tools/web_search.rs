//! web_search tool implementation.
//!
//! Fetches and parses DuckDuckGo results through the cached [`SearchService`].

use duckparse_client::SearchService;
use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input parameters for web_search tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct WebSearchParams {
    /// Search query (required).
    pub query: String,

    /// Region code (ISO 3166-1 alpha-2, e.g., "US"). Defaults to the configured region.
    #[serde(default)]
    pub region: Option<String>,

    /// Force a refresh, bypassing the cache.
    #[serde(default)]
    pub force_refresh: bool,
}

/// Implementation of the web_search tool.
pub async fn search_impl(service: &SearchService, params: WebSearchParams) -> Result<CallToolResult, McpError> {
    let payload = service
        .search(&params.query, params.region.as_deref(), params.force_refresh)
        .await?;

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&payload).unwrap_or_default(),
    )]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use duckparse_client::HtmlFetcher;
    use duckparse_core::{CacheSettings, Error};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const OPENCLAW_HTML: &str = include_str!("../../../client/fixtures/html-openclaw.html");

    struct FixtureFetcher {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl HtmlFetcher for FixtureFetcher {
        async fn fetch(&self, _query: &str, _region: &str) -> Result<String, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(OPENCLAW_HTML.to_string())
        }
    }

    fn service() -> (Arc<FixtureFetcher>, SearchService) {
        let fetcher = Arc::new(FixtureFetcher { calls: AtomicUsize::new(0) });
        let service = SearchService::new(fetcher.clone(), CacheSettings::default(), "US");
        (fetcher, service)
    }

    fn payload_json(result: &CallToolResult) -> serde_json::Value {
        let text = result.content[0].as_text().unwrap();
        serde_json::from_str(&text.text).unwrap()
    }

    #[tokio::test]
    async fn test_empty_query() {
        let (fetcher, service) = service();
        let params = WebSearchParams { query: "".into(), ..Default::default() };

        let err = search_impl(&service, params).await.unwrap_err();
        assert_eq!(err.code, ErrorCode(-32602));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_search_returns_payload() {
        let (_, service) = service();
        let params = WebSearchParams { query: "openclaw".into(), region: Some("DE".into()), force_refresh: false };

        let result = search_impl(&service, params).await.unwrap();
        let json = payload_json(&result);

        assert_eq!(json["query"], "openclaw");
        assert_eq!(json["region"], "DE");
        assert_eq!(json["cache_hit"], false);
        assert_eq!(json["count"], 12);
        assert_eq!(json["results"][0]["kind"], "zero_click");
        assert_eq!(json["results"][1]["is_ad"], true);
    }

    #[tokio::test]
    async fn test_cache_hit_reported() {
        let (fetcher, service) = service();
        let params = WebSearchParams { query: "openclaw".into(), ..Default::default() };

        search_impl(&service, params.clone()).await.unwrap();
        let result = search_impl(&service, params).await.unwrap();

        assert_eq!(payload_json(&result)["cache_hit"], true);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_params_defaults() {
        let params: WebSearchParams = serde_json::from_str(r#"{"query":"rust"}"#).unwrap();
        assert_eq!(params.region, None);
        assert!(!params.force_refresh);
    }
}
