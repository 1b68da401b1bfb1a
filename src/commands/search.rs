//! Search command: query all sources, filter, rank by unit price, and format.

use crate::config::Config;
use crate::filters::FilterChainBuilder;
use crate::format::Formatter;
use crate::models::{Brand, ProductType, OTHER_BRAND};
use crate::pipeline::Pipeline;
use crate::ranking;
use anyhow::{Context, Result};
use std::fmt;
use std::str::FromStr;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Diaper sizes offered by the search shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Size {
    Newborn,
    Small,
    #[default]
    Medium,
    Large,
}

impl Size {
    /// Returns the size as written in marketplace search keywords.
    pub fn keyword(&self) -> &'static str {
        match self {
            Size::Newborn => "新生児",
            Size::Small => "Sサイズ",
            Size::Medium => "Mサイズ",
            Size::Large => "Lサイズ",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for Size {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "newborn" | "nb" | "新生児" => Ok(Size::Newborn),
            "s" | "small" | "sサイズ" => Ok(Size::Small),
            "m" | "medium" | "mサイズ" => Ok(Size::Medium),
            "l" | "large" | "lサイズ" => Ok(Size::Large),
            _ => Err(format!("Unknown size: {}. Use: newborn, s, m, l", s)),
        }
    }
}

/// Parses a brand selection; "other" and "その他" select listings of no known brand.
pub fn parse_brand(s: &str) -> Brand {
    let trimmed = s.trim();
    if trimmed.eq_ignore_ascii_case("other") || trimmed == OTHER_BRAND {
        Brand::Other
    } else {
        Brand::Named(trimmed.to_string())
    }
}

/// Executes a price comparison search.
pub struct SearchCommand {
    config: Config,
    product_type: Option<ProductType>,
    brand: Option<Brand>,
}

impl SearchCommand {
    /// Creates a new search command with no type or brand restriction.
    pub fn new(config: Config) -> Self {
        Self { config, product_type: None, brand: None }
    }

    /// Restricts results to one product type.
    pub fn product_type(mut self, product_type: Option<ProductType>) -> Self {
        self.product_type = product_type;
        self
    }

    /// Restricts results to one brand.
    pub fn brand(mut self, brand: Option<Brand>) -> Self {
        self.brand = brand;
        self
    }

    /// Builds the search keyword for a size, e.g. "おむつ Mサイズ".
    pub fn keyword_for(&self, size: Size) -> String {
        format!("{} {}", self.config.category, size.keyword())
    }

    /// Executes the search and returns formatted output.
    pub async fn execute(&self, keyword: &str) -> Result<String> {
        let pipeline =
            Pipeline::from_config(&self.config).context("Failed to create HTTP client")?;

        let cancel = CancellationToken::new();
        let ctrl_c = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                ctrl_c.cancel();
            }
        });

        Ok(self.execute_with_pipeline(&pipeline, keyword, cancel).await)
    }

    /// Executes the search with a provided pipeline (for testing).
    pub async fn execute_with_pipeline(
        &self,
        pipeline: &Pipeline,
        keyword: &str,
        cancel: CancellationToken,
    ) -> String {
        info!("Searching for: {}", keyword);

        let filters = FilterChainBuilder::new()
            .product_type(self.product_type)
            .brand(self.brand.clone())
            .build();

        if !filters.is_empty() {
            debug!("Active filters: {}", filters.descriptions().join(", "));
        }

        let listings = pipeline.run_query_with_cancel(keyword, cancel).await;
        let total = listings.len();

        let filtered = filters.apply(listings);
        info!("{} of {} listings match the filters", filtered.len(), total);

        let ranked = ranking::rank(filtered);

        Formatter::new(self.config.format).format_listings(&ranked)
    }
}
