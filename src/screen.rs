//! Screen-level owner of the hostel search state.
//!
//! Holds the latest listing snapshot alongside the query, filter sheet,
//! quick filter chips and compare selection. Fetch results only ever replace
//! the listing collection; user edits to the other state are never clobbered.

use anyhow::Result;
use tracing::{debug, info};

use crate::backend::{load_listings, ListingSource};
use crate::compare::{CompareMode, CompareView, SelectionSetController, ToggleOutcome, MIN_COMPARE};
use crate::models::Listing;
use crate::search::{FilterState, QuickFilter, SearchInputs, SearchPipeline};

/// Identifies one outstanding fetch. Only the newest ticket may apply its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

#[derive(Debug, Default)]
pub struct HostelSearchScreen {
    listings: Vec<Listing>,
    revision: u64,
    latest_ticket: u64,
    unmounted: bool,
    inputs: SearchInputs,
    pipeline: SearchPipeline,
    selection: SelectionSetController,
}

impl HostelSearchScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn inputs(&self) -> &SearchInputs {
        &self.inputs
    }

    pub fn selection(&self) -> &SelectionSetController {
        &self.selection
    }

    pub fn is_mounted(&self) -> bool {
        !self.unmounted
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest_ticket += 1;
        FetchTicket(self.latest_ticket)
    }

    /// Replace the listing collection with a fetch result. Returns false, and
    /// changes nothing, when the screen is gone or a newer fetch was started.
    pub fn apply_snapshot(&mut self, ticket: FetchTicket, listings: Vec<Listing>) -> bool {
        if self.unmounted {
            debug!("Dropping fetch result for unmounted screen");
            return false;
        }
        if ticket.0 != self.latest_ticket {
            debug!(
                "Dropping stale fetch result (ticket {}, latest {})",
                ticket.0, self.latest_ticket
            );
            return false;
        }

        self.listings = listings;
        self.revision += 1;
        true
    }

    /// Fetch from `source` and apply the result
    pub async fn refresh<S>(&mut self, source: &S, viewer_id: Option<&str>) -> Result<bool>
    where
        S: ListingSource + ?Sized,
    {
        let ticket = self.begin_fetch();
        let listings = load_listings(source, viewer_id).await?;
        Ok(self.apply_snapshot(ticket, listings))
    }

    pub fn unmount(&mut self) {
        self.unmounted = true;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.inputs.query = query.into();
    }

    /// Apply the filter sheet
    pub fn apply_filters(&mut self, filters: FilterState) {
        self.inputs.filters = filters;
    }

    pub fn reset_filters(&mut self) {
        self.inputs.filters.reset();
        self.inputs.quick.clear();
    }

    /// Flip a quick filter chip, returning whether it is now active
    pub fn toggle_quick_filter(&mut self, filter: QuickFilter) -> bool {
        if self.inputs.quick.remove(&filter) {
            false
        } else {
            self.inputs.quick.insert(filter);
            true
        }
    }

    /// Listings to render, in display order
    pub fn visible(&mut self) -> Vec<&Listing> {
        self.pipeline
            .visible(&self.listings, self.revision, &self.inputs)
    }

    pub fn active_filter_count(&self) -> usize {
        self.inputs.active_filter_count()
    }

    pub fn favourites(&self) -> Vec<&Listing> {
        self.listings.iter().filter(|l| l.is_favourite).collect()
    }

    /// Compare mode is only offered once two hostels are saved
    pub fn can_offer_compare(&self) -> bool {
        self.favourites().len() >= MIN_COMPARE
    }

    /// Enter or leave compare mode. Entering is refused while fewer than two
    /// hostels are saved; leaving is always allowed.
    pub fn toggle_compare_mode(&mut self) -> CompareMode {
        if self.selection.is_comparing() || self.can_offer_compare() {
            self.selection.toggle_compare_mode()
        } else {
            self.selection.mode()
        }
    }

    pub fn toggle_select(&mut self, id: &str) -> ToggleOutcome {
        let outcome = self.selection.toggle_select(id);
        if let Some(notice) = outcome.notice() {
            info!("{}", notice);
        }
        outcome
    }

    /// Update the saved flag. Unsaving also drops the hostel from the compare selection.
    pub fn set_favourite(&mut self, id: &str, saved: bool) -> bool {
        let Some(listing) = self.listings.iter_mut().find(|l| l.id == id) else {
            return false;
        };
        listing.is_favourite = saved;
        if !saved {
            self.selection.remove_member(id);
        }
        true
    }

    pub fn launch_compare<V: CompareView + ?Sized>(&self, view: &mut V) -> bool {
        self.selection.launch_compare(view)
    }
}
