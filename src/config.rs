use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Where listings come from and who is looking at them
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the hosted backend
    pub backend_url: Option<String>,
    /// Public API key sent with every backend request
    pub api_key: Option<String>,
    /// Signed-in viewer, used to flag saved hostels
    pub viewer_id: Option<String>,
    /// Read listings from this JSON file instead of the backend
    pub snapshot_path: Option<PathBuf>,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: None,
            api_key: None,
            viewer_id: None,
            snapshot_path: None,
            request_timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// Load from `HOSTEL_*` environment variables. `HOSTEL_CONFIG` names a
    /// JSON file whose values the other variables override.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("Failed to parse config {}", path.display()))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = match lookup("HOSTEL_CONFIG") {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(url) = lookup("HOSTEL_BACKEND_URL") {
            config.backend_url = Some(url);
        }
        if let Some(key) = lookup("HOSTEL_API_KEY") {
            config.api_key = Some(key);
        }
        if let Some(viewer) = lookup("HOSTEL_VIEWER_ID") {
            config.viewer_id = Some(viewer);
        }
        if let Some(path) = lookup("HOSTEL_SNAPSHOT") {
            config.snapshot_path = Some(PathBuf::from(path));
        }
        if let Some(secs) = lookup("HOSTEL_TIMEOUT_SECS") {
            config.request_timeout_secs = secs
                .parse()
                .with_context(|| format!("Invalid HOSTEL_TIMEOUT_SECS: {}", secs))?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.snapshot_path.is_none() && self.backend_url.is_none() {
            anyhow::bail!("Set HOSTEL_SNAPSHOT or HOSTEL_BACKEND_URL to choose a listing source");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than zero");
        }
        Ok(())
    }
}
