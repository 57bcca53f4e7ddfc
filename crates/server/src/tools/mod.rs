//! MCP tool implementations.
//!
//! This module contains all tools exposed by the ddg-mcp server.

pub mod parse_results;
pub mod web_search;
