pub mod rest;
pub mod snapshot;
pub mod traits;

pub use rest::RestListingSource;
pub use snapshot::SnapshotSource;
pub use traits::{load_listings, ListingSource};
