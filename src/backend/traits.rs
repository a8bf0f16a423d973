use std::collections::HashSet;

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use crate::models::{mark_favourites, Listing};

/// Common trait for all listing backends
/// Screens receive one of these explicitly instead of reaching for a shared client
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Active listings with their images, rooms and amenities
    async fn fetch_listings(&self) -> Result<Vec<Listing>>;

    /// Ids of the listings `viewer_id` has saved
    async fn fetch_favourites(&self, viewer_id: &str) -> Result<HashSet<String>>;

    /// Get the name of the backend
    fn source_name(&self) -> &'static str;
}

/// Fetch listings and, for a signed-in viewer, flag their saved ones
pub async fn load_listings<S>(source: &S, viewer_id: Option<&str>) -> Result<Vec<Listing>>
where
    S: ListingSource + ?Sized,
{
    let mut listings = source.fetch_listings().await?;
    info!("Fetched {} listings from {}", listings.len(), source.source_name());

    if let Some(viewer) = viewer_id {
        let saved = source.fetch_favourites(viewer).await?;
        info!("Viewer {} has {} saved hostels", viewer, saved.len());
        mark_favourites(&mut listings, &saved);
    }

    Ok(listings)
}
