use crate::models::Listing;
use crate::search::types::{FilterState, QuickFilter, QuickFilters};

type ListingCheck = fn(&Listing) -> bool;

impl QuickFilter {
    /// Predicate a listing must satisfy while this chip is active
    pub fn check(&self) -> ListingCheck {
        match self {
            QuickFilter::Verified => |l: &Listing| l.verified,
            QuickFilter::Wifi => |l: &Listing| l.has_amenity("wifi"),
            QuickFilter::Security => |l: &Listing| l.has_amenity("security"),
            QuickFilter::NearCampus => |l: &Listing| l.distance_from_campus.to_lowercase().contains("min"),
            QuickFilter::Water247 => |l: &Listing| l.has_amenity("water"),
            QuickFilter::PowerBackup => |l: &Listing| l.has_amenity("generator"),
        }
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        (self.check())(listing)
    }
}

/// Decides whether a single listing is visible under the current search inputs
#[derive(Debug, Clone)]
pub struct FilterPredicate<'a> {
    needle: Option<String>,
    filters: &'a FilterState,
    quick: &'a QuickFilters,
}

impl<'a> FilterPredicate<'a> {
    /// `filters` is expected to be normalized by the caller
    pub fn new(query: &str, filters: &'a FilterState, quick: &'a QuickFilters) -> Self {
        // Whitespace-only counts as no query; otherwise the query is matched as typed
        let needle = (!query.trim().is_empty()).then(|| query.to_lowercase());
        Self {
            needle,
            filters,
            quick,
        }
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        self.text_matches(listing)
            && self.price_matches(listing)
            && self.verified_matches(listing)
            && self.room_type_matches(listing)
            && self.availability_matches(listing)
            && self.quick_filters_match(listing)
    }

    fn text_matches(&self, listing: &Listing) -> bool {
        match &self.needle {
            Some(needle) => listing.haystack().contains(needle.as_str()),
            None => true,
        }
    }

    // Only the listing's minimum price is bounded; its maximum is not consulted.
    fn price_matches(&self, listing: &Listing) -> bool {
        let price = listing.price_range_min;
        price >= self.filters.price_min && price <= self.filters.price_max
    }

    fn verified_matches(&self, listing: &Listing) -> bool {
        !self.filters.verified_only || listing.verified
    }

    fn room_type_matches(&self, listing: &Listing) -> bool {
        self.filters.room_types.is_empty()
            || self
                .filters
                .room_types
                .iter()
                .any(|room_type| listing.offers_room_type(room_type))
    }

    fn availability_matches(&self, listing: &Listing) -> bool {
        self.filters.show_sold_out || !listing.is_sold_out()
    }

    fn quick_filters_match(&self, listing: &Listing) -> bool {
        self.quick.iter().all(|filter| filter.matches(listing))
    }
}
