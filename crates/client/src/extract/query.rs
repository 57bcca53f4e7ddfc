//! Minimal queryable-document capability used by the extractor.
//!
//! The extraction rules only need selector lookups, text and attributes, so
//! they are written against [`QueryNode`] instead of a concrete parser.

use scraper::{ElementRef, Selector};

/// An element that can be queried with CSS selectors.
///
/// Selector strings that fail to parse match nothing.
pub trait QueryNode: Sized {
    /// First descendant matching `selector`, in document order.
    fn select_first(&self, selector: &str) -> Option<Self>;

    /// All descendants matching `selector`, in document order.
    fn select_all(&self, selector: &str) -> Vec<Self>;

    /// Concatenated text of all descendant text nodes.
    fn text(&self) -> String;

    fn attr(&self, name: &str) -> Option<String>;

    fn has_class(&self, class: &str) -> bool;
}

impl QueryNode for ElementRef<'_> {
    fn select_first(&self, selector: &str) -> Option<Self> {
        let selector = Selector::parse(selector).ok()?;
        self.select(&selector).next()
    }

    fn select_all(&self, selector: &str) -> Vec<Self> {
        match Selector::parse(selector) {
            Ok(selector) => self.select(&selector).collect(),
            Err(_) => Vec::new(),
        }
    }

    fn text(&self) -> String {
        ElementRef::text(self).collect()
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.value().attr(name).map(str::to_string)
    }

    fn has_class(&self, class: &str) -> bool {
        self.value().classes().any(|c| c == class)
    }
}
