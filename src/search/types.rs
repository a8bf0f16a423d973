use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const DEFAULT_PRICE_MIN: f64 = 0.0;
pub const DEFAULT_PRICE_MAX: f64 = 5000.0;

/// Ordering applied to the filtered listings
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortStrategy {
    /// Verified hostels first, then most rooms available. Also "best match".
    #[default]
    VerifiedFirst,
    LowestPrice,
    MostBeds,
    /// No distance data yet, ranks like `VerifiedFirst`
    Closest,
}

impl SortStrategy {
    pub fn key(&self) -> &'static str {
        match self {
            SortStrategy::VerifiedFirst => "verified_first",
            SortStrategy::LowestPrice => "lowest_price",
            SortStrategy::MostBeds => "most_beds",
            SortStrategy::Closest => "closest",
        }
    }

    /// Parse a sort key, falling back to the default for anything unknown
    pub fn from_key(key: &str) -> Self {
        match key.trim() {
            "lowest_price" => SortStrategy::LowestPrice,
            "most_beds" => SortStrategy::MostBeds,
            "closest" => SortStrategy::Closest,
            _ => SortStrategy::VerifiedFirst,
        }
    }
}

impl FromStr for SortStrategy {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SortStrategy::from_key(s))
    }
}

impl fmt::Display for SortStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One-tap filter chips shown above the results
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum QuickFilter {
    Verified,
    Wifi,
    Security,
    NearCampus,
    #[serde(rename = "water_247")]
    Water247,
    PowerBackup,
}

impl QuickFilter {
    pub const ALL: [QuickFilter; 6] = [
        QuickFilter::Verified,
        QuickFilter::Wifi,
        QuickFilter::Security,
        QuickFilter::NearCampus,
        QuickFilter::Water247,
        QuickFilter::PowerBackup,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            QuickFilter::Verified => "verified",
            QuickFilter::Wifi => "wifi",
            QuickFilter::Security => "security",
            QuickFilter::NearCampus => "near_campus",
            QuickFilter::Water247 => "water_247",
            QuickFilter::PowerBackup => "power_backup",
        }
    }
}

impl FromStr for QuickFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuickFilter::ALL
            .into_iter()
            .find(|f| f.key() == s.trim())
            .ok_or_else(|| anyhow::anyhow!("Unknown quick filter: {}", s))
    }
}

impl fmt::Display for QuickFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Active quick filter chips
pub type QuickFilters = BTreeSet<QuickFilter>;

/// Filter sheet state, owned by the screen and never persisted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FilterState {
    pub price_min: f64,
    pub price_max: f64,
    pub room_types: BTreeSet<String>,
    pub amenities: BTreeSet<String>,
    pub verified_only: bool,
    pub show_sold_out: bool,
    pub sort_by: SortStrategy,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            price_min: DEFAULT_PRICE_MIN,
            price_max: DEFAULT_PRICE_MAX,
            room_types: BTreeSet::new(),
            amenities: BTreeSet::new(),
            verified_only: false,
            show_sold_out: false,
            sort_by: SortStrategy::default(),
        }
    }
}

impl FilterState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Copy with an inverted price range swapped back into order
    pub fn normalized(&self) -> Self {
        let mut state = self.clone();
        if state.price_min > state.price_max {
            std::mem::swap(&mut state.price_min, &mut state.price_max);
        }
        state
    }

    pub fn price_changed(&self) -> bool {
        self.price_min != DEFAULT_PRICE_MIN || self.price_max != DEFAULT_PRICE_MAX
    }

    /// Number of filter dimensions that differ from the defaults, for the badge
    pub fn active_count(&self) -> usize {
        [
            self.price_changed(),
            !self.room_types.is_empty(),
            !self.amenities.is_empty(),
            self.verified_only,
            self.show_sold_out,
            self.sort_by != SortStrategy::default(),
        ]
        .into_iter()
        .filter(|changed| *changed)
        .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_no_active_filters() {
        assert_eq!(FilterState::default().active_count(), 0);
    }

    #[test]
    fn each_dimension_counts_once() {
        let state = FilterState {
            price_min: 100.0,
            price_max: 4000.0,
            room_types: ["Single Room".to_string(), "Shared".to_string()].into(),
            amenities: ["WiFi".to_string()].into(),
            verified_only: true,
            show_sold_out: true,
            sort_by: SortStrategy::MostBeds,
        };
        assert_eq!(state.active_count(), 6);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut state = FilterState {
            verified_only: true,
            sort_by: SortStrategy::LowestPrice,
            ..Default::default()
        };
        state.reset();
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn normalized_swaps_inverted_range() {
        let state = FilterState {
            price_min: 900.0,
            price_max: 100.0,
            ..Default::default()
        };
        let fixed = state.normalized();
        assert_eq!((fixed.price_min, fixed.price_max), (100.0, 900.0));
    }

    #[test]
    fn sort_keys_fall_back_to_verified_first() {
        assert_eq!(SortStrategy::from_key("lowest_price"), SortStrategy::LowestPrice);
        assert_eq!(SortStrategy::from_key("best_match"), SortStrategy::VerifiedFirst);
        assert_eq!(SortStrategy::from_key("rating"), SortStrategy::VerifiedFirst);
        assert_eq!("most_beds".parse::<SortStrategy>(), Ok(SortStrategy::MostBeds));
    }

    #[test]
    fn quick_filter_keys_parse() {
        assert_eq!("water_247".parse::<QuickFilter>().unwrap(), QuickFilter::Water247);
        assert!("pool".parse::<QuickFilter>().is_err());
        for filter in QuickFilter::ALL {
            assert_eq!(filter.key().parse::<QuickFilter>().unwrap(), filter);
        }
    }
}
