//! Composite cache keys for search requests.

use std::fmt;

/// Cache key built from a search query and a region code.
///
/// The query is whitespace-collapsed, trimmed and lowercased; the region is
/// trimmed and uppercased, so `"  Rust   Lang "`/`"us"` and `"rust lang"`/`"US"`
/// share an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchKey {
    query: String,
    region: String,
}

impl SearchKey {
    pub fn new(query: &str, region: &str) -> Self {
        let query = query.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
        let region = region.trim().to_uppercase();
        Self { query, region }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn region(&self) -> &str {
        &self.region
    }
}

impl fmt::Display for SearchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.query, self.region)
    }
}
