//! Client code for duckparse.
//!
//! This crate provides the DuckDuckGo HTML fetch, result extraction, and the
//! cached search service shared by the server and CLI.

pub mod extract;
pub mod fetch;
pub mod search;

pub use extract::{QueryNode, extract_from, extract_results};

pub use fetch::{DuckDuckGoFetcher, FetchConfig, HtmlFetcher, locale_for_region};

pub use search::{SearchPayload, SearchService};
