//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use std::sync::Arc;

use crate::tools::parse_results::{ParseResultsParams, parse_impl};
use crate::tools::web_search::{WebSearchParams, search_impl};

use duckparse_client::SearchService;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

/// The main MCP server handler for ddg-mcp.
#[derive(Clone)]
pub struct DuckParseServer {
    service: Arc<SearchService>,
    tool_router: ToolRouter<Self>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl DuckParseServer {
    /// Create a new server handler around a shared search service.
    pub fn new(service: Arc<SearchService>) -> Self {
        Self { service, tool_router: Self::tool_router() }
    }

    /// Search DuckDuckGo and return structured result records.
    #[tool(
        description = "Search DuckDuckGo. Returns zero-click, web and ad results as JSON records. Results are cached per query and region."
    )]
    async fn web_search(&self, params: Parameters<WebSearchParams>) -> Result<CallToolResult, McpError> {
        search_impl(&self.service, params.0).await
    }

    /// Extract result records from a DuckDuckGo HTML results page.
    ///
    /// No network requests are made.
    #[tool(description = "Parse a DuckDuckGo HTML results page into JSON result records. No network I/O.")]
    async fn parse_results(&self, params: Parameters<ParseResultsParams>) -> Result<CallToolResult, McpError> {
        parse_impl(params.0)
    }
}

impl ServerHandler for DuckParseServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "duckparse".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duckparse_core::AppConfig;

    #[test]
    fn test_tools_registered() {
        let service = SearchService::from_config(&AppConfig::default()).unwrap();
        let server = DuckParseServer::new(Arc::new(service));

        let mut names: Vec<String> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();

        assert_eq!(names, vec!["parse_results", "web_search"]);
    }

    #[test]
    fn test_server_info() {
        let service = SearchService::from_config(&AppConfig::default()).unwrap();
        let info = DuckParseServer::new(Arc::new(service)).get_info();
        assert_eq!(info.server_info.name, "duckparse");
    }
}
