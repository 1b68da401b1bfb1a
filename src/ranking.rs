//! Unit-price ordering and cheapest-listing marking.

use crate::models::Listing;
use serde::{Deserialize, Serialize};

/// A listing with its cheapest-in-results flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedListing {
    #[serde(flatten)]
    pub listing: Listing,
    /// True when this listing's unit price equals the lowest in the results
    pub is_cheapest: bool,
}

/// Returns the lowest unit price, if any listings are present.
pub fn cheapest_unit_price(listings: &[Listing]) -> Option<f64> {
    listings.iter().map(|l| l.unit_price).min_by(f64::total_cmp)
}

/// Sorts listings by unit price (stable, so ties keep discovery order) and
/// flags every listing sharing the minimum unit price.
pub fn rank(mut listings: Vec<Listing>) -> Vec<RankedListing> {
    let cheapest = cheapest_unit_price(&listings);
    listings.sort_by(|a, b| a.unit_price.total_cmp(&b.unit_price));

    listings
        .into_iter()
        .map(|listing| RankedListing {
            is_cheapest: Some(listing.unit_price) == cheapest,
            listing,
        })
        .collect()
}
