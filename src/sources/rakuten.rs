//! Rakuten Ichiba search adapter.

use super::selectors::{generic, rakuten};
use super::{digits_only, scan, Layout, SourceAdapter};
use crate::models::{RawCandidate, Source};
use async_trait::async_trait;

/// Reads the Rakuten Ichiba search results page.
pub struct RakutenAdapter {
    base_url: String,
}

impl RakutenAdapter {
    pub fn new() -> Self {
        Self::with_base_url(Source::Rakuten.base_url())
    }

    /// Creates an adapter pointing at a custom base URL (for testing).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }
}

impl Default for RakutenAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SourceAdapter for RakutenAdapter {
    fn source(&self) -> Source {
        Source::Rakuten
    }

    fn search_url(&self, keyword: &str) -> String {
        format!("{}/search/mall/{}/", self.base_url, urlencoding::encode(keyword))
    }

    fn parse(&self, html: &str) -> Vec<RawCandidate> {
        let layout = Layout {
            result: &rakuten::RESULT,
            title: &rakuten::TITLE,
            price: &rakuten::PRICE,
            link: &generic::LINK,
            image: &generic::IMAGE,
        };
        scan(html, Source::Rakuten, &self.base_url, &layout, digits_only)
    }
}
