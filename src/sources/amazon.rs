//! Amazon.co.jp search adapter.

use super::selectors::amazon;
use super::{digits_only, scan, Layout, SourceAdapter};
use crate::models::{RawCandidate, Source};
use async_trait::async_trait;

/// Reads the Amazon.co.jp search results page.
pub struct AmazonAdapter {
    base_url: String,
}

impl AmazonAdapter {
    pub fn new() -> Self {
        Self::with_base_url(Source::Amazon.base_url())
    }

    /// Creates an adapter pointing at a custom base URL (for testing).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }
}

impl Default for AmazonAdapter {
    fn default() -> Self {
        Self::new()
    }
}

/// Whole-yen prices may carry grouping commas and a trailing decimal point.
fn parse_price(text: &str) -> Option<u32> {
    digits_only(text.split('.').next().unwrap_or_default())
}

#[async_trait]
impl SourceAdapter for AmazonAdapter {
    fn source(&self) -> Source {
        Source::Amazon
    }

    fn search_url(&self, keyword: &str) -> String {
        format!("{}/s?k={}", self.base_url, urlencoding::encode(keyword))
    }

    fn parse(&self, html: &str) -> Vec<RawCandidate> {
        let layout = Layout {
            result: &amazon::RESULT,
            title: &amazon::TITLE,
            price: &amazon::PRICE,
            link: &amazon::LINK,
            image: &amazon::IMAGE,
        };
        scan(html, Source::Amazon, &self.base_url, &layout, parse_price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS: &str = r#"
        <html><body>
            <div class="s-result-item" data-asin="B0PAMPERS1">
                <a class="a-link-normal s-no-outline" href="/dp/B0PAMPERS1">
                    <img class="s-image" src="https://m.media-amazon.com/images/I/pampers.jpg">
                </a>
                <h2><span>パンパース さらさらケア パンツ Mサイズ 58枚</span></h2>
                <span class="a-price"><span class="a-price-whole">1,980</span></span>
            </div>
            <div class="s-result-item">
                <h2><span>スポンサー広告</span></h2>
            </div>
            <div class="s-result-item">
                <span class="a-price-whole">500</span>
            </div>
        </body></html>
    "#;

    #[test]
    fn test_search_url() {
        let adapter = AmazonAdapter::new();
        assert_eq!(
            adapter.search_url("おむつ Mサイズ"),
            "https://www.amazon.co.jp/s?k=%E3%81%8A%E3%82%80%E3%81%A4%20M%E3%82%B5%E3%82%A4%E3%82%BA"
        );
    }

    #[test]
    fn test_parse_results() {
        let adapter = AmazonAdapter::new();
        let candidates = adapter.parse(RESULTS);

        // Cards without a title or price are skipped
        assert_eq!(candidates.len(), 1);

        let c = &candidates[0];
        assert_eq!(c.source, Source::Amazon);
        assert_eq!(c.title.as_deref(), Some("パンパース さらさらケア パンツ Mサイズ 58枚"));
        assert_eq!(c.price_text.as_deref(), Some("1,980"));
        assert_eq!(c.price, Some(1980));
        assert_eq!(c.url.as_deref(), Some("https://www.amazon.co.jp/dp/B0PAMPERS1"));
        assert_eq!(c.image_url.as_deref(), Some("https://m.media-amazon.com/images/I/pampers.jpg"));
    }

    #[test]
    fn test_parse_missing_link_and_image() {
        let html = r#"
            <div class="s-result-item">
                <h2>メリーズ テープ 64枚</h2>
                <span class="a-price-whole">2,480</span>
            </div>
        "#;
        let candidates = AmazonAdapter::new().parse(html);

        assert_eq!(candidates.len(), 1);
        assert!(candidates[0].url.is_none());
        assert!(candidates[0].image_url.is_none());
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("1,980"), Some(1980));
        assert_eq!(parse_price("1,980."), Some(1980));
        assert_eq!(parse_price("￥3,278"), Some(3278));
        assert_eq!(parse_price(""), None);
    }

    #[test]
    fn test_custom_base_url() {
        let adapter = AmazonAdapter::with_base_url("http://127.0.0.1:8080");
        assert_eq!(adapter.search_url("a b"), "http://127.0.0.1:8080/s?k=a%20b");
    }
}
