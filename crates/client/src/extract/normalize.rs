//! Text, timestamp and link normalization for extracted fields.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// `YYYY-MM-DDThh:mm:ss`, with optional fractional seconds and zone designator.
static TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(?:\.\d+)?(?:Z|[+-]\d{2}:?\d{2})?").expect("invalid timestamp regex")
});

/// Collapse whitespace runs to a single space and trim.
///
/// Returns `None` when nothing but whitespace remains.
pub fn normalize_text(text: &str) -> Option<String> {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() { None } else { Some(collapsed) }
}

/// Find the first ISO-8601-like timestamp in `text`.
///
/// The whole matched substring is kept, including any `Z` or `+hh:mm` offset.
pub fn find_timestamp(text: &str) -> Option<String> {
    TIMESTAMP.find(text).map(|m| m.as_str().to_string())
}

/// Turn a result link into an absolute target URL.
///
/// DuckDuckGo's HTML endpoint routes organic links through
/// `//duckduckgo.com/l/?uddg=<encoded target>`; the target is decoded.
/// Protocol-relative links get `https:`. Anything else is returned as written.
pub fn resolve_result_url(href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    let absolute = if href.starts_with("//") { format!("https:{href}") } else { href.to_string() };

    if let Ok(url) = Url::parse(&absolute)
        && url.path() == "/l/"
        && url.host_str().is_some_and(|host| host == "duckduckgo.com" || host.ends_with(".duckduckgo.com"))
        && let Some((_, target)) = url.query_pairs().find(|(key, _)| key == "uddg")
        && !target.is_empty()
    {
        return Some(target.into_owned());
    }

    Some(absolute)
}
