//! Result extraction from DuckDuckGo's HTML results page.
//!
//! ### Zero-click panel
//! - Heading link `div.zci h1.zci__heading a` plus body `div.zci__result`.
//! - Emitted first when both exist; skipped otherwise.
//!
//! ### Organic and sponsored results
//! - One record per `div.result.results_links` container, in document order.
//! - Containers without a title link are skipped.
//! - `result--ad` containers are kept and tagged as ads.
//!
//! ### Failure model
//! - Extraction never fails. Missing structure yields fewer records.
//!
//! The rules are written against [`QueryNode`], so the HTML parser can be
//! swapped without touching them.

pub mod normalize;
pub mod query;

pub use normalize::{find_timestamp, normalize_text, resolve_result_url};
pub use query::QueryNode;

use duckparse_core::{RecordKind, ResultRecord};
use scraper::Html;

const ZERO_CLICK_HEADING: &str = "div.zci h1.zci__heading a";
const ZERO_CLICK_BODY: &str = "div.zci__result";
const RESULT_CONTAINER: &str = "div.serp__results div.results div.result.results_links";
const TITLE_LINK: &str = "div.links_main h2.result__title > a.result__a";
const SNIPPET: &str = "div.links_main a.result__snippet";
const EXTRAS: &str = "div.links_main div.result__extras__url";
const DISPLAY_URL: &str = "a.result__url";
const AD_MARKER: &str = "result--ad";

/// Extract result records from a results page.
///
/// The zero-click record, if any, comes first; organic and ad records follow
/// in document order.
pub fn extract_results(html: &str) -> Vec<ResultRecord> {
    let document = Html::parse_document(html);
    extract_from(&document.root_element())
}

/// Extract result records from an already-parsed document root.
pub fn extract_from<N: QueryNode>(root: &N) -> Vec<ResultRecord> {
    let mut records = Vec::new();

    if let Some(zero_click) = parse_zero_click(root) {
        records.push(zero_click);
    }

    records.extend(root.select_all(RESULT_CONTAINER).iter().filter_map(parse_result));

    records
}

fn parse_zero_click<N: QueryNode>(root: &N) -> Option<ResultRecord> {
    let heading = root.select_first(ZERO_CLICK_HEADING)?;
    let body = root.select_first(ZERO_CLICK_BODY)?;
    let title = normalize_text(&heading.text())?;

    Some(ResultRecord {
        url: heading.attr("href").as_deref().and_then(resolve_result_url),
        snippet: normalize_text(&body.text()),
        image: body
            .select_first("img")
            .and_then(|img| img.attr("src"))
            .filter(|src| !src.trim().is_empty()),
        source: body.select_all("a").last().and_then(|link| normalize_text(&link.text())),
        ..ResultRecord::new(RecordKind::ZeroClick, title)
    })
}

fn parse_result<N: QueryNode>(container: &N) -> Option<ResultRecord> {
    let title_link = container.select_first(TITLE_LINK)?;
    let title = normalize_text(&title_link.text())?;

    let extras = container.select_first(EXTRAS);
    let is_ad = container.has_class(AD_MARKER);
    let kind = if is_ad { RecordKind::Ad } else { RecordKind::Web };

    Some(ResultRecord {
        url: title_link.attr("href").as_deref().and_then(resolve_result_url),
        display_url: extras
            .as_ref()
            .and_then(|extras| extras.select_first(DISPLAY_URL))
            .and_then(|link| normalize_text(&link.text())),
        snippet: container.select_first(SNIPPET).and_then(|el| normalize_text(&el.text())),
        published_at: extras.as_ref().and_then(published_at),
        is_ad,
        source: extras.as_ref().and_then(|extras| {
            let text: String = extras.select_all(DISPLAY_URL).iter().map(|link| link.text()).collect();
            normalize_text(&text)
        }),
        ..ResultRecord::new(kind, title)
    })
}

/// First timestamp found among the `span`s of an extras region.
fn published_at<N: QueryNode>(extras: &N) -> Option<String> {
    extras
        .select_all("span")
        .iter()
        .filter_map(|span| normalize_text(&span.text()))
        .find_map(|text| find_timestamp(&text))
}
