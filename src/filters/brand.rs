//! Brand filter.

use super::Filter;
use crate::models::{Brand, Listing};

/// Keeps listings of a single brand, or of no known brand.
pub struct BrandFilter {
    brand: Brand,
}

impl BrandFilter {
    pub fn new(brand: Brand) -> Self {
        Self { brand }
    }
}

impl Filter for BrandFilter {
    fn matches(&self, listing: &Listing) -> bool {
        match (&self.brand, &listing.brand) {
            (Brand::Other, Brand::Other) => true,
            (Brand::Named(wanted), Brand::Named(actual)) => {
                wanted.to_lowercase() == actual.to_lowercase()
            }
            _ => false,
        }
    }

    fn description(&self) -> String {
        format!("Brand: {}", self.brand)
    }
}
