//! Data models for marketplace listings and raw search-result candidates.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Marketplaces searched, in result priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Amazon,
    Rakuten,
    Yahoo,
}

impl Source {
    /// Returns all sources in priority order.
    pub fn all() -> &'static [Source] {
        &[Source::Amazon, Source::Rakuten, Source::Yahoo]
    }

    /// Returns the name shown to users.
    pub fn display_name(&self) -> &'static str {
        match self {
            Source::Amazon => "Amazon",
            Source::Rakuten => "楽天",
            Source::Yahoo => "Yahoo",
        }
    }

    /// Returns the production base URL for this source.
    pub fn base_url(&self) -> &'static str {
        match self {
            Source::Amazon => "https://www.amazon.co.jp",
            Source::Rakuten => "https://search.rakuten.co.jp",
            Source::Yahoo => "https://shopping.yahoo.co.jp",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Diaper style, derived from title keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductType {
    #[serde(rename = "pants-style")]
    Pants,
    #[serde(rename = "tape-style")]
    Tape,
    #[serde(rename = "unknown")]
    Unknown,
}

impl ProductType {
    /// Returns the label shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            ProductType::Pants => "パンツ",
            ProductType::Tape => "テープ",
            ProductType::Unknown => "不明",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProductType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pants" | "pants-style" | "パンツ" => Ok(ProductType::Pants),
            "tape" | "tape-style" | "テープ" => Ok(ProductType::Tape),
            "unknown" | "不明" => Ok(ProductType::Unknown),
            _ => Err(format!("Unknown product type: {}. Use: pants, tape, unknown", s)),
        }
    }
}

/// Label used for titles that match no configured brand.
pub const OTHER_BRAND: &str = "その他";

/// Brand detected from a title: one of the configured brand names, or other.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Brand {
    Named(String),
    Other,
}

impl Brand {
    pub fn as_str(&self) -> &str {
        match self {
            Brand::Named(name) => name,
            Brand::Other => OTHER_BRAND,
        }
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Brand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Brand {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(if name == OTHER_BRAND { Brand::Other } else { Brand::Named(name) })
    }
}

/// A normalized, comparable product record from one source's search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// Marketplace the listing came from
    pub source: Source,
    /// Listing title as shown on the result page
    pub title: String,
    /// Price in whole yen
    pub price: u32,
    /// Items per package
    pub quantity: u32,
    /// Price per item, rounded to 2 decimals
    pub unit_price: f64,
    /// Pants or tape style
    pub product_type: ProductType,
    /// Detected brand
    pub brand: Brand,
    /// Product page URL (empty if not found)
    pub url: String,
    /// Product image URL (empty if not found)
    pub image_url: String,
}

/// Unvalidated listing data as extracted from a search result element.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCandidate {
    pub source: Source,
    pub title: Option<String>,
    /// Price text as found in the markup
    pub price_text: Option<String>,
    /// Price after the source's digit stripping
    pub price: Option<u32>,
    pub url: Option<String>,
    pub image_url: Option<String>,
}

impl RawCandidate {
    /// Creates an empty candidate for the given source.
    pub fn new(source: Source) -> Self {
        Self { source, title: None, price_text: None, price: None, url: None, image_url: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_order() {
        assert_eq!(Source::all(), &[Source::Amazon, Source::Rakuten, Source::Yahoo]);
    }

    #[test]
    fn test_source_display() {
        assert_eq!(Source::Amazon.to_string(), "Amazon");
        assert_eq!(Source::Rakuten.to_string(), "楽天");
        assert_eq!(Source::Yahoo.to_string(), "Yahoo");
    }

    #[test]
    fn test_product_type_serde() {
        assert_eq!(serde_json::to_string(&ProductType::Pants).unwrap(), "\"pants-style\"");
        assert_eq!(serde_json::to_string(&ProductType::Tape).unwrap(), "\"tape-style\"");
        assert_eq!(serde_json::to_string(&ProductType::Unknown).unwrap(), "\"unknown\"");
    }

    #[test]
    fn test_product_type_parsing() {
        assert_eq!("pants".parse::<ProductType>().unwrap(), ProductType::Pants);
        assert_eq!("TAPE".parse::<ProductType>().unwrap(), ProductType::Tape);
        assert_eq!("パンツ".parse::<ProductType>().unwrap(), ProductType::Pants);
        assert!("diaper".parse::<ProductType>().is_err());
    }

    #[test]
    fn test_brand_serialization() {
        let named = Brand::Named("メリーズ".to_string());
        assert_eq!(serde_json::to_string(&named).unwrap(), "\"メリーズ\"");
        assert_eq!(serde_json::to_string(&Brand::Other).unwrap(), "\"その他\"");

        let parsed: Brand = serde_json::from_str("\"その他\"").unwrap();
        assert_eq!(parsed, Brand::Other);
    }

    #[test]
    fn test_raw_candidate_new() {
        let candidate = RawCandidate::new(Source::Yahoo);
        assert_eq!(candidate.source, Source::Yahoo);
        assert!(candidate.title.is_none());
        assert!(candidate.price.is_none());
    }
}
