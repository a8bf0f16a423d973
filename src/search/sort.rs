use std::cmp::Ordering;

use crate::models::Listing;
use crate::search::types::SortStrategy;

/// Compare two listings under `strategy`. Equal keys compare `Equal`, so a
/// stable sort keeps their incoming order.
pub fn compare(a: &Listing, b: &Listing, strategy: SortStrategy) -> Ordering {
    match strategy {
        SortStrategy::LowestPrice => a.price_range_min.total_cmp(&b.price_range_min),
        SortStrategy::MostBeds => b.rooms_left().cmp(&a.rooms_left()),
        SortStrategy::VerifiedFirst | SortStrategy::Closest => b
            .verified
            .cmp(&a.verified)
            .then_with(|| b.rooms_left().cmp(&a.rooms_left())),
    }
}
