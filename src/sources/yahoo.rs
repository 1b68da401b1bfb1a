//! Yahoo! Shopping search adapter.

use super::selectors::{generic, yahoo};
use super::{digits_only, scan, Layout, SourceAdapter};
use crate::models::{RawCandidate, Source};
use async_trait::async_trait;

/// Reads the Yahoo! Shopping search results page.
pub struct YahooAdapter {
    base_url: String,
}

impl YahooAdapter {
    pub fn new() -> Self {
        Self::with_base_url(Source::Yahoo.base_url())
    }

    /// Creates an adapter pointing at a custom base URL (for testing).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }
}

impl Default for YahooAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SourceAdapter for YahooAdapter {
    fn source(&self) -> Source {
        Source::Yahoo
    }

    fn search_url(&self, keyword: &str) -> String {
        format!("{}/search?p={}", self.base_url, urlencoding::encode(keyword))
    }

    fn parse(&self, html: &str) -> Vec<RawCandidate> {
        let layout = Layout {
            result: &yahoo::RESULT,
            title: &yahoo::TITLE,
            price: &yahoo::PRICE,
            link: &generic::LINK,
            image: &generic::IMAGE,
        };
        scan(html, Source::Yahoo, &self.base_url, &layout, digits_only)
    }
}
