pub mod filter;
pub mod pipeline;
pub mod sort;
pub mod types;

pub use filter::FilterPredicate;
pub use pipeline::{compute, SearchInputs, SearchPipeline};
pub use sort::compare;
pub use types::{FilterState, QuickFilter, QuickFilters, SortStrategy};
