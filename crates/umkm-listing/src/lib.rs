//! Client-side listing state for the business directory.
//!
//! [`ListingViewController`] owns the full record collection and an immutable
//! [`FilterState`] snapshot. Every setter swaps in a new snapshot; every read
//! (`visible_page`, `facet_options`, counts) is a pure derivation over the
//! records and the current snapshot.

pub mod error;
pub mod facet;
pub mod search;
pub mod sort;
pub mod state;
pub mod view;

pub use error::ListingError;
pub use facet::{facet_options, facet_passes, FacetName};
pub use search::{matches_query, rank_item, Rank};
pub use sort::{SortDirection, SortKey, SortSpec};
pub use state::{FilterState, DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};
pub use view::{filter_records, ListingViewController, PageView};
