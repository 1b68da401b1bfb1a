//! Product type filter.

use super::Filter;
use crate::models::{Listing, ProductType};

/// Keeps listings of a single product type.
pub struct TypeFilter {
    product_type: ProductType,
}

impl TypeFilter {
    pub fn new(product_type: ProductType) -> Self {
        Self { product_type }
    }
}

impl Filter for TypeFilter {
    fn matches(&self, listing: &Listing) -> bool {
        listing.product_type == self.product_type
    }

    fn description(&self) -> String {
        format!("Type: {}", self.product_type)
    }
}
