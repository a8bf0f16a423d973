use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, info};

use crate::backend::traits::ListingSource;
use crate::models::{Listing, ListingStatus};

/// Listings read from a JSON file, e.g. a saved query result
pub struct SnapshotSource {
    path: PathBuf,
}

impl SnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Vec<Listing>> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read snapshot {}", self.path.display()))?;
        debug!("Read {} bytes from {}", raw.len(), self.path.display());

        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse snapshot {}", self.path.display()))
    }

    /// Save listings so they can be served later by a `SnapshotSource`
    pub async fn save(&self, listings: &[Listing]) -> Result<()> {
        let json = serde_json::to_string_pretty(listings)?;
        tokio::fs::write(&self.path, json)
            .await
            .with_context(|| format!("Failed to write snapshot {}", self.path.display()))?;
        info!("💾 Saved {} listings to {}", listings.len(), self.path.display());
        Ok(())
    }
}

#[async_trait]
impl ListingSource for SnapshotSource {
    async fn fetch_listings(&self) -> Result<Vec<Listing>> {
        let listings = self.read_all().await?;
        Ok(listings
            .into_iter()
            .filter(|l| l.status == ListingStatus::Active)
            .collect())
    }

    /// Snapshots carry the favourite flag inline, so the viewer is not consulted
    async fn fetch_favourites(&self, _viewer_id: &str) -> Result<HashSet<String>> {
        let listings = self.read_all().await?;
        Ok(listings
            .into_iter()
            .filter(|l| l.is_favourite)
            .map(|l| l.id)
            .collect())
    }

    fn source_name(&self) -> &'static str {
        "snapshot"
    }
}
