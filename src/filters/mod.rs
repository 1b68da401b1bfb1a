//! Listing filtering system with composable filters.

pub mod brand;
pub mod product_type;

use crate::models::{Brand, Listing, ProductType};

pub use brand::BrandFilter;
pub use product_type::TypeFilter;

/// Trait for filtering listings.
pub trait Filter: Send + Sync {
    /// Returns true if the listing passes the filter.
    fn matches(&self, listing: &Listing) -> bool;

    /// Returns a description of this filter.
    fn description(&self) -> String;
}

/// A chain of filters that must all pass.
pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    /// Creates an empty filter chain.
    pub fn new() -> Self {
        Self { filters: Vec::new() }
    }

    /// Adds a filter to the chain.
    pub fn add(&mut self, filter: impl Filter + 'static) -> &mut Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Checks if a listing passes all filters.
    pub fn matches(&self, listing: &Listing) -> bool {
        self.filters.iter().all(|f| f.matches(listing))
    }

    /// Filters a collection of listings, keeping their order.
    pub fn apply(&self, listings: Vec<Listing>) -> Vec<Listing> {
        listings.into_iter().filter(|l| self.matches(l)).collect()
    }

    /// Returns true if no filters are configured.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Returns the number of filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns descriptions of all filters.
    pub fn descriptions(&self) -> Vec<String> {
        self.filters.iter().map(|f| f.description()).collect()
    }
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing a FilterChain from shell selections.
pub struct FilterChainBuilder {
    chain: FilterChain,
}

impl FilterChainBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self { chain: FilterChain::new() }
    }

    /// Keeps only the given product type. `None` means all types.
    pub fn product_type(mut self, product_type: Option<ProductType>) -> Self {
        if let Some(product_type) = product_type {
            self.chain.add(TypeFilter::new(product_type));
        }
        self
    }

    /// Keeps only the given brand. `None` means all brands.
    pub fn brand(mut self, brand: Option<Brand>) -> Self {
        if let Some(brand) = brand {
            self.chain.add(BrandFilter::new(brand));
        }
        self
    }

    /// Builds the filter chain.
    pub fn build(self) -> FilterChain {
        self.chain
    }
}

impl Default for FilterChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Source;

    fn make_listing(title: &str, product_type: ProductType, brand: Brand) -> Listing {
        Listing {
            source: Source::Amazon,
            title: title.to_string(),
            price: 1000,
            quantity: 50,
            unit_price: 20.0,
            product_type,
            brand,
            url: String::new(),
            image_url: String::new(),
        }
    }

    fn named(name: &str) -> Brand {
        Brand::Named(name.to_string())
    }

    #[test]
    fn test_filter_chain_new() {
        let chain = FilterChain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.len(), 0);
    }

    #[test]
    fn test_filter_chain_empty_matches_all() {
        let chain = FilterChain::default();
        assert!(chain.matches(&make_listing("x", ProductType::Unknown, Brand::Other)));
    }

    #[test]
    fn test_filter_chain_builder_no_filters_when_all_selected() {
        let chain = FilterChainBuilder::new().product_type(None).brand(None).build();
        assert!(chain.is_empty());
    }

    #[test]
    fn test_filter_chain_builder_combined() {
        let chain = FilterChainBuilder::default()
            .product_type(Some(ProductType::Pants))
            .brand(Some(named("メリーズ")))
            .build();

        assert_eq!(chain.len(), 2);
        assert!(chain.matches(&make_listing("a", ProductType::Pants, named("メリーズ"))));
        assert!(!chain.matches(&make_listing("b", ProductType::Tape, named("メリーズ"))));
        assert!(!chain.matches(&make_listing("c", ProductType::Pants, named("グーン"))));
    }

    #[test]
    fn test_filter_chain_apply_keeps_order() {
        let chain = FilterChainBuilder::new().product_type(Some(ProductType::Tape)).build();

        let listings = vec![
            make_listing("t1", ProductType::Tape, Brand::Other),
            make_listing("p1", ProductType::Pants, Brand::Other),
            make_listing("t2", ProductType::Tape, Brand::Other),
        ];

        let titles: Vec<String> = chain.apply(listings).into_iter().map(|l| l.title).collect();
        assert_eq!(titles, vec!["t1", "t2"]);
    }

    #[test]
    fn test_filter_chain_descriptions() {
        let chain = FilterChainBuilder::new()
            .product_type(Some(ProductType::Pants))
            .brand(Some(Brand::Other))
            .build();

        let descriptions = chain.descriptions();
        assert_eq!(descriptions, vec!["Type: パンツ", "Brand: その他"]);
    }
}
