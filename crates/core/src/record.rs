//! Structured search result records.

use serde::{Deserialize, Serialize};

/// Which part of the results page a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Instant-answer panel shown above the organic results.
    ZeroClick,
    /// Organic result.
    Web,
    /// Sponsored result.
    Ad,
}

/// One search hit or the zero-click panel.
///
/// Optional fields serialize as `null` rather than being omitted, so consumers
/// can rely on every key being present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ResultRecord {
    pub kind: RecordKind,
    pub title: String,
    pub url: Option<String>,
    pub display_url: Option<String>,
    pub snippet: Option<String>,
    pub image: Option<String>,
    pub published_at: Option<String>,
    pub is_ad: bool,
    /// Attribution text: the citation link of a zero-click panel, or the
    /// displayed-URL link text of a web result.
    pub source: Option<String>,
}

impl ResultRecord {
    /// Create a record of the given kind with only the title set.
    pub fn new(kind: RecordKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            url: None,
            display_url: None,
            snippet: None,
            image: None,
            published_at: None,
            is_ad: kind == RecordKind::Ad,
            source: None,
        }
    }
}
