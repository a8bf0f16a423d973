use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Publication status of a listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    #[default]
    Active,
    Inactive,
    Pending,
}

/// A room type offered by a hostel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Room {
    #[serde(deserialize_with = "null_as_default")]
    pub room_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub price_per_month: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub available_count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_count: i64,
}

/// A listing photo
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Image {
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub display_order: i32,
}

/// Amenity tag. Joined rows come back as `{"name": ...}`, plain snapshots as strings.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Amenity(pub String);

impl Amenity {
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Case-insensitive substring match against `needle` (expected lowercase)
    pub fn mentions(&self, needle: &str) -> bool {
        self.0.to_lowercase().contains(needle)
    }
}

impl From<&str> for Amenity {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl<'de> Deserialize<'de> for Amenity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Tag(String),
            Row { name: Option<String> },
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Tag(name) => Amenity(name),
            Raw::Row { name } => Amenity(name.unwrap_or_default()),
        })
    }
}

/// Core hostel listing data model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Listing {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address: String,
    /// Free-text label such as "5 min walk"
    #[serde(deserialize_with = "null_as_default")]
    pub distance_from_campus: String,
    pub description: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub price_range_min: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub price_range_max: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub available_rooms: i64,
    pub rating: Option<f64>,
    #[serde(deserialize_with = "null_as_default")]
    pub review_count: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub verified: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub status: ListingStatus,
    #[serde(deserialize_with = "null_as_default")]
    pub rooms: Vec<Room>,
    #[serde(deserialize_with = "null_as_default")]
    pub amenities: Vec<Amenity>,
    #[serde(deserialize_with = "null_as_default")]
    pub images: Vec<Image>,
    pub owner_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    /// Derived per session from the viewer's saved set, never stored upstream
    #[serde(deserialize_with = "null_as_default")]
    pub is_favourite: bool,
}

impl Listing {
    /// Rooms left, with negative counts treated as sold out
    pub fn rooms_left(&self) -> u32 {
        self.available_rooms.clamp(0, u32::MAX as i64) as u32
    }

    pub fn is_sold_out(&self) -> bool {
        self.rooms_left() == 0
    }

    pub fn has_consistent_price_range(&self) -> bool {
        self.price_range_min <= self.price_range_max
    }

    pub fn has_amenity(&self, needle: &str) -> bool {
        self.amenities.iter().any(|a| a.mentions(needle))
    }

    pub fn offers_room_type(&self, room_type: &str) -> bool {
        self.rooms.iter().any(|r| r.room_type == room_type)
    }

    pub fn cover_image(&self) -> Option<&Image> {
        self.images.iter().min_by_key(|img| img.display_order)
    }

    /// Text searched by the free-text query
    pub fn haystack(&self) -> String {
        format!(
            "{} {} {} {}",
            self.name,
            self.address,
            self.distance_from_campus,
            self.description.as_deref().unwrap_or("")
        )
        .to_lowercase()
    }
}

/// A row of the viewer's saved hostels
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Favourite {
    pub listing_id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Set the favourite flag on every listing from the viewer's saved ids
pub fn mark_favourites(listings: &mut [Listing], saved: &HashSet<String>) {
    for listing in listings.iter_mut() {
        listing.is_favourite = saved.contains(&listing.id);
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
