use tracing::debug;

use crate::models::Listing;
use crate::search::filter::FilterPredicate;
use crate::search::sort::compare;
use crate::search::types::{FilterState, QuickFilters};

/// Everything besides the listings that determines the displayed list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchInputs {
    pub query: String,
    pub filters: FilterState,
    pub quick: QuickFilters,
}

impl SearchInputs {
    /// Badge count for the filter button
    pub fn active_filter_count(&self) -> usize {
        self.filters.active_count()
    }
}

/// Filter then sort, recomputed from scratch on every call
pub fn compute<'a>(
    listings: &'a [Listing],
    query: &str,
    filters: &FilterState,
    quick: &QuickFilters,
) -> Vec<&'a Listing> {
    visible_indices(listings, query, filters, quick)
        .into_iter()
        .map(|idx| &listings[idx])
        .collect()
}

/// Positions in `listings` of the visible entries, in display order
pub fn visible_indices(
    listings: &[Listing],
    query: &str,
    filters: &FilterState,
    quick: &QuickFilters,
) -> Vec<usize> {
    let filters = filters.normalized();
    let predicate = FilterPredicate::new(query, &filters, quick);

    let mut order: Vec<usize> = listings
        .iter()
        .enumerate()
        .filter(|(_, listing)| {
            if !listing.has_consistent_price_range() {
                debug!(
                    "Listing {} has price_range_min {} above price_range_max {}",
                    listing.id, listing.price_range_min, listing.price_range_max
                );
            }
            predicate.matches(listing)
        })
        .map(|(idx, _)| idx)
        .collect();

    order.sort_by(|&a, &b| compare(&listings[a], &listings[b], filters.sort_by));
    order
}

/// Caches the last pipeline output and recomputes only when an input changed.
///
/// Listings are identified by a caller-supplied revision number, bumped
/// whenever a new snapshot replaces the collection.
#[derive(Debug, Default)]
pub struct SearchPipeline {
    cached: Option<CachedResult>,
}

#[derive(Debug)]
struct CachedResult {
    revision: u64,
    inputs: SearchInputs,
    order: Vec<usize>,
}

impl SearchPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ordered listings for display
    pub fn visible<'a>(
        &mut self,
        listings: &'a [Listing],
        revision: u64,
        inputs: &SearchInputs,
    ) -> Vec<&'a Listing> {
        let fresh = matches!(
            &self.cached,
            Some(cached) if cached.revision == revision && &cached.inputs == inputs
        );

        if !fresh {
            let order = visible_indices(listings, &inputs.query, &inputs.filters, &inputs.quick);
            debug!(
                "Recomputed search: {} of {} listings visible",
                order.len(),
                listings.len()
            );
            self.cached = Some(CachedResult {
                revision,
                inputs: inputs.clone(),
                order,
            });
        }

        self.cached
            .as_ref()
            .map(|cached| {
                cached
                    .order
                    .iter()
                    .filter_map(|&idx| listings.get(idx))
                    .collect()
            })
            .unwrap_or_default()
    }
}
