//! parse_results tool implementation.
//!
//! Extracts result records from caller-supplied DuckDuckGo HTML.
//! No network I/O is performed.

use duckparse_client::extract_results;
use duckparse_core::{Error, ResultRecord};
use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input parameters for parse_results tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ParseResultsParams {
    /// The raw HTML of a DuckDuckGo results page.
    pub html: String,
}

/// Output structure for parse_results tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ParseResultsOutput {
    /// Number of records extracted.
    pub count: usize,
    pub results: Vec<ResultRecord>,
}

/// Implementation of the parse_results tool.
pub fn parse_impl(params: ParseResultsParams) -> Result<CallToolResult, McpError> {
    if params.html.trim().is_empty() {
        return Err(Error::InvalidInput("html cannot be empty".into()).into());
    }

    let results = extract_results(&params.html);
    let output = ParseResultsOutput { count: results.len(), results };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize results: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
