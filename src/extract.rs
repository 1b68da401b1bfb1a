//! Field extractors deriving listing attributes from title text.
//!
//! All extractors are total: they never fail, and degrade to a sentinel
//! (`None`, `ProductType::Unknown`, `Brand::Other`) instead.

use crate::models::{Brand, ProductType};
use regex_lite::Regex;
use serde::{Deserialize, Serialize};

/// Keyword tables driving type, brand and quantity detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keywords {
    /// Known brands, matched in this order
    #[serde(default = "default_brands")]
    pub brands: Vec<String>,

    /// Title keyword marking pants-style diapers
    #[serde(default = "default_pants_keyword")]
    pub pants_keyword: String,

    /// Title keyword marking tape-style diapers
    #[serde(default = "default_tape_keyword")]
    pub tape_keyword: String,

    /// Package-count unit following the item count (e.g. "58枚")
    #[serde(default = "default_unit_marker")]
    pub unit_marker: String,
}

fn default_brands() -> Vec<String> {
    ["パンパース", "メリーズ", "グーン", "ムーニー", "GENKI", "ネピア"]
        .iter()
        .map(|b| b.to_string())
        .collect()
}

fn default_pants_keyword() -> String {
    "パンツ".to_string()
}

fn default_tape_keyword() -> String {
    "テープ".to_string()
}

fn default_unit_marker() -> String {
    "枚".to_string()
}

impl Default for Keywords {
    fn default() -> Self {
        Self {
            brands: default_brands(),
            pants_keyword: default_pants_keyword(),
            tape_keyword: default_tape_keyword(),
            unit_marker: default_unit_marker(),
        }
    }
}

/// Compiled quantity matcher for a given unit marker.
///
/// Matches a 2-3 digit count (ASCII or full-width) immediately followed by
/// the marker and not preceded by another digit.
#[derive(Debug, Clone)]
pub struct QuantityPattern {
    regex: Regex,
}

impl QuantityPattern {
    pub fn new(unit_marker: &str) -> Self {
        let pattern =
            format!("(?:^|[^0-9０-９])([0-9０-９]{{2,3}}){}", regex_lite::escape(unit_marker));
        let regex = Regex::new(&pattern).expect("escaped marker forms a valid pattern");
        Self { regex }
    }

    /// Returns the package count in `title`, if any.
    pub fn find(&self, title: &str) -> Option<u32> {
        let digits = self.regex.captures(title)?.get(1)?.as_str();
        let count: u32 =
            digits.chars().filter_map(half_width_digit).collect::<String>().parse().ok()?;
        (count > 0).then_some(count)
    }
}

impl From<&Keywords> for QuantityPattern {
    fn from(keywords: &Keywords) -> Self {
        Self::new(&keywords.unit_marker)
    }
}

fn half_width_digit(c: char) -> Option<char> {
    match c {
        '0'..='9' => Some(c),
        '０'..='９' => char::from_digit(c as u32 - '０' as u32, 10),
        _ => None,
    }
}

/// Computes price per item rounded to 2 decimals; `None` when quantity is 0.
pub fn compute_unit_price(price: u32, quantity: u32) -> Option<f64> {
    if quantity == 0 {
        return None;
    }
    Some((f64::from(price) / f64::from(quantity) * 100.0).round() / 100.0)
}

/// Detects pants or tape style. Pants wins when both keywords appear.
pub fn detect_product_type(title: &str, keywords: &Keywords) -> ProductType {
    if title.contains(&keywords.pants_keyword) {
        ProductType::Pants
    } else if title.contains(&keywords.tape_keyword) {
        ProductType::Tape
    } else {
        ProductType::Unknown
    }
}

/// Returns the first configured brand found in the title, ignoring case.
pub fn detect_brand(title: &str, keywords: &Keywords) -> Brand {
    let title = title.to_lowercase();
    keywords
        .brands
        .iter()
        .find(|brand| title.contains(&brand.to_lowercase()))
        .map(|brand| Brand::Named(brand.clone()))
        .unwrap_or(Brand::Other)
}

/// Extracts the package count from a title, e.g. 58 from "… 58枚".
pub fn extract_quantity(title: &str, keywords: &Keywords) -> Option<u32> {
    QuantityPattern::from(keywords).find(title)
}
