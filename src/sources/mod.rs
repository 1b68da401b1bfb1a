//! Source adapters: per-marketplace request URLs and result-page extraction.

pub mod amazon;
pub mod rakuten;
pub mod selectors;
pub mod yahoo;

use crate::http::PageFetch;
use crate::models::{RawCandidate, Source};
use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, trace, warn};

pub use amazon::AmazonAdapter;
pub use rakuten::RakutenAdapter;
pub use yahoo::YahooAdapter;

/// Fetches one marketplace's first results page and maps it to raw candidates.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Returns the marketplace this adapter reads.
    fn source(&self) -> Source;

    /// Builds the search URL for a keyword.
    fn search_url(&self, keyword: &str) -> String;

    /// Extracts candidates from a results page. Elements without a title or
    /// price are skipped.
    fn parse(&self, html: &str) -> Vec<RawCandidate>;

    /// Fetches and parses the results page. Page-level failures yield an
    /// empty list so one source never blocks the others.
    async fn fetch(&self, client: &dyn PageFetch, keyword: &str) -> Vec<RawCandidate> {
        let url = self.search_url(keyword);
        info!("Searching {}: {}", self.source(), keyword);

        match client.get(&url).await {
            Ok(html) => {
                let candidates = self.parse(&html);
                debug!("{} returned {} candidates", self.source(), candidates.len());
                candidates
            }
            Err(e) => {
                warn!("{} search failed: {:#}", self.source(), e);
                Vec::new()
            }
        }
    }
}

/// Returns the default adapters in result priority order.
pub fn default_adapters() -> Vec<Box<dyn SourceAdapter>> {
    Source::all().iter().map(|&source| adapter_for(source)).collect()
}

/// Returns the production adapter for a source.
pub fn adapter_for(source: Source) -> Box<dyn SourceAdapter> {
    match source {
        Source::Amazon => Box::new(AmazonAdapter::new()),
        Source::Rakuten => Box::new(RakutenAdapter::new()),
        Source::Yahoo => Box::new(YahooAdapter::new()),
    }
}

/// Selectors describing where a source keeps each field inside a result element.
pub(crate) struct Layout<'a> {
    pub result: &'a Selector,
    pub title: &'a [Selector],
    pub price: &'a [Selector],
    pub link: &'a Selector,
    pub image: &'a Selector,
}

/// Walks every result element in `html` and extracts a candidate from each.
pub(crate) fn scan(
    html: &str,
    source: Source,
    base_url: &str,
    layout: &Layout<'_>,
    parse_price: fn(&str) -> Option<u32>,
) -> Vec<RawCandidate> {
    let document = Html::parse_document(html);
    let mut candidates = Vec::new();

    for element in document.select(layout.result) {
        let Some(title) = first_text(element, layout.title) else {
            trace!("Skipping {} result without title", source);
            continue;
        };

        let Some(price_text) = first_text(element, layout.price) else {
            trace!("Skipping {} result without price: {}", source, title);
            continue;
        };

        let url = element
            .select(layout.link)
            .next()
            .and_then(|e| e.value().attr("href"))
            .map(|href| absolute_url(base_url, href));

        let image_url = element
            .select(layout.image)
            .next()
            .and_then(|e| e.value().attr("src").or_else(|| e.value().attr("data-src")))
            .map(String::from);

        candidates.push(RawCandidate {
            source,
            title: Some(title),
            price: parse_price(&price_text),
            price_text: Some(price_text),
            url,
            image_url,
        });
    }

    candidates
}

/// Returns the text of the first alternative whose first match is non-empty.
fn first_text(element: ElementRef, alternatives: &[Selector]) -> Option<String> {
    alternatives.iter().find_map(|selector| {
        let text = element.select(selector).next().map(element_text)?;
        (!text.is_empty()).then_some(text)
    })
}

/// Collects an element's text with whitespace runs collapsed.
fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Resolves an href against the source's base URL.
pub(crate) fn absolute_url(base_url: &str, href: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else if let Some(rest) = href.strip_prefix("//") {
        format!("https://{}", rest)
    } else if href.starts_with('/') {
        format!("{}{}", base_url.trim_end_matches('/'), href)
    } else {
        format!("{}/{}", base_url.trim_end_matches('/'), href)
    }
}

/// Parses a price by keeping only its ASCII digits ("1,000円" -> 1000).
pub(crate) fn digits_only(text: &str) -> Option<u32> {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}
