//! Normalization pipeline: runs every source adapter for a keyword and turns
//! their raw candidates into comparable listings.
//!
//! Sources are fetched concurrently but joined in adapter order, so the
//! output order is always source priority first, then document order.
//! Nothing in here returns an error: failed sources contribute no
//! candidates and malformed candidates are recorded as discards.

use crate::config::Config;
use crate::extract::{
    compute_unit_price, detect_brand, detect_product_type, Keywords, QuantityPattern,
};
use crate::http::{HttpClient, PageFetch};
use crate::models::{Listing, RawCandidate, Source};
use crate::sources::{self, digits_only, SourceAdapter};
use anyhow::Result;
use futures::future::join_all;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Why a candidate did not become a listing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscardReason {
    #[error("missing title")]
    MissingTitle,

    #[error("missing price")]
    MissingPrice,

    #[error("price is not a positive whole number: {0:?}")]
    InvalidPrice(String),

    #[error("no package count in title")]
    MissingQuantity,

    #[error("package count is zero")]
    ZeroQuantity,
}

/// A candidate that was dropped during normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct Discard {
    pub source: Source,
    pub title: Option<String>,
    pub reason: DiscardReason,
}

/// Outcome of one query: listings plus what was dropped along the way.
#[derive(Debug, Clone, Default)]
pub struct QueryReport {
    pub listings: Vec<Listing>,
    pub discards: Vec<Discard>,
    /// Raw candidates received per source, in source order
    pub candidate_counts: Vec<(Source, usize)>,
}

impl QueryReport {
    /// Returns the number of candidates received from `source`.
    pub fn candidates_from(&self, source: Source) -> usize {
        self.candidate_counts.iter().filter(|(s, _)| *s == source).map(|(_, n)| n).sum()
    }

    /// Returns how many candidates were discarded for `reason`.
    pub fn discards_for(&self, reason: &DiscardReason) -> usize {
        self.discards.iter().filter(|d| &d.reason == reason).count()
    }
}

/// Runs the source adapters and normalizes their output.
pub struct Pipeline {
    client: Box<dyn PageFetch>,
    adapters: Vec<Box<dyn SourceAdapter>>,
    keywords: Keywords,
    quantity: QuantityPattern,
}

impl Pipeline {
    /// Creates a pipeline over the given adapters, queried in the given order.
    pub fn new(
        client: impl PageFetch + 'static,
        adapters: Vec<Box<dyn SourceAdapter>>,
        keywords: Keywords,
    ) -> Self {
        let quantity = QuantityPattern::from(&keywords);
        Self { client: Box::new(client), adapters, keywords, quantity }
    }

    /// Creates a pipeline over Amazon, Rakuten and Yahoo using an HTTP client
    /// built from the configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = HttpClient::new(config)?;
        Ok(Self::new(client, sources::default_adapters(), config.keywords.clone()))
    }

    /// Returns listings for `keyword` from all sources.
    pub async fn run_query(&self, keyword: &str) -> Vec<Listing> {
        self.run_query_with_cancel(keyword, CancellationToken::new()).await
    }

    /// Like [`run_query`](Self::run_query), but sources still fetching when
    /// `cancel` fires contribute nothing.
    pub async fn run_query_with_cancel(
        &self,
        keyword: &str,
        cancel: CancellationToken,
    ) -> Vec<Listing> {
        self.run_report(keyword, cancel).await.listings
    }

    /// Runs the query and reports listings together with discarded candidates.
    pub async fn run_report(&self, keyword: &str, cancel: CancellationToken) -> QueryReport {
        info!("Querying {} sources for: {}", self.adapters.len(), keyword);

        let fetches = self.adapters.iter().map(|adapter| {
            let cancel = cancel.clone();
            async move {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        warn!("{} search cancelled", adapter.source());
                        Vec::new()
                    }
                    candidates = adapter.fetch(self.client.as_ref(), keyword) => candidates,
                }
            }
        });

        // Join point: batches come back in adapter order whatever order the
        // fetches completed in.
        let batches = join_all(fetches).await;

        let mut report = QueryReport::default();
        for (adapter, candidates) in self.adapters.iter().zip(batches) {
            report.candidate_counts.push((adapter.source(), candidates.len()));

            for candidate in candidates {
                let source = candidate.source;
                let title = candidate.title.clone();

                match normalize(candidate, &self.keywords, &self.quantity) {
                    Ok(listing) => report.listings.push(listing),
                    Err(reason) => {
                        debug!("Discarded {} candidate {:?}: {}", source, title, reason);
                        report.discards.push(Discard { source, title, reason });
                    }
                }
            }
        }

        info!(
            "Found {} listings ({} candidates discarded)",
            report.listings.len(),
            report.discards.len()
        );

        report
    }
}

/// Validates a raw candidate and derives the listing fields from it.
pub fn normalize(
    candidate: RawCandidate,
    keywords: &Keywords,
    quantity_pattern: &QuantityPattern,
) -> Result<Listing, DiscardReason> {
    let title = candidate
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or(DiscardReason::MissingTitle)?;

    let quantity = quantity_pattern.find(&title).ok_or(DiscardReason::MissingQuantity)?;

    let price_text = candidate.price_text;
    let price = match (candidate.price, &price_text) {
        (Some(price), _) => price,
        (None, Some(text)) => {
            digits_only(text).ok_or_else(|| DiscardReason::InvalidPrice(text.clone()))?
        }
        (None, None) => return Err(DiscardReason::MissingPrice),
    };
    if price == 0 {
        return Err(DiscardReason::InvalidPrice(price_text.unwrap_or_else(|| price.to_string())));
    }

    let unit_price = compute_unit_price(price, quantity).ok_or(DiscardReason::ZeroQuantity)?;

    Ok(Listing {
        source: candidate.source,
        product_type: detect_product_type(&title, keywords),
        brand: detect_brand(&title, keywords),
        title,
        price,
        quantity,
        unit_price,
        url: candidate.url.unwrap_or_default(),
        image_url: candidate.image_url.unwrap_or_default(),
    })
}
