use std::collections::HashSet;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::backend::traits::ListingSource;
use crate::config::AppConfig;
use crate::models::{Favourite, Listing};

const LISTINGS_SELECT: &str = "*,images(*),rooms(*),amenities(*)";

/// Hosted REST backend (PostgREST-style tables)
pub struct RestListingSource {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestListingSource {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, api_key, Duration::from_secs(30))
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("hostel-finder/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let base_url = config
            .backend_url
            .clone()
            .context("backend_url is not configured")?;
        Self::with_timeout(
            base_url,
            config.api_key.clone().unwrap_or_default(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn get(&self, table: &str) -> RequestBuilder {
        self.client
            .get(self.table_url(table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder, what: &str) -> Result<T> {
        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", what))?;

        if !response.status().is_success() {
            warn!("Backend returned status {} for {}", response.status(), what);
            anyhow::bail!("Failed to fetch {}: {}", what, response.status());
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to decode {}", what))
    }
}

#[async_trait]
impl ListingSource for RestListingSource {
    async fn fetch_listings(&self) -> Result<Vec<Listing>> {
        debug!("Fetching listings from {}", self.table_url("listings"));

        let request = self
            .get("listings")
            .query(&[("select", LISTINGS_SELECT), ("status", "eq.active")]);
        self.send_json(request, "listings").await
    }

    async fn fetch_favourites(&self, viewer_id: &str) -> Result<HashSet<String>> {
        let user_filter = format!("eq.{}", viewer_id);
        let request = self
            .get("favourites")
            .query(&[("select", "listing_id,created_at"), ("user_id", user_filter.as_str())]);

        let rows: Vec<Favourite> = self.send_json(request, "favourites").await?;
        Ok(rows.into_iter().map(|row| row.listing_id).collect())
    }

    fn source_name(&self) -> &'static str {
        "REST backend"
    }
}
