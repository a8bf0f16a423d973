pub mod backend;
pub mod compare;
pub mod config;
pub mod models;
pub mod screen;
pub mod search;

pub use compare::{CompareView, SelectionSetController, ToggleOutcome};
pub use config::AppConfig;
pub use models::{Listing, Room};
pub use screen::HostelSearchScreen;
pub use search::{compute, FilterState, QuickFilter, SearchPipeline, SortStrategy};
