//! Search result views for hitview
//!
//! This crate adapts raw search backend responses into typed results:
//! - PagedSearchResult: pagination metadata, lazy batch hydration of hit
//!   identifiers into domain records, facet and range extraction
//! - ScrollResultIterator: one single-record fetch per hit, for scroll-style
//!   consumption of large result sets
//! - Paginable: page arithmetic and page-window rendering
//!
//! # Usage
//!
//! ```ignore
//! use hitview_search::{Paginable, PagedSearchResult};
//!
//! let result = PagedSearchResult::new(&query, Some(response));
//! for record in result.iter()? {
//!     // record: Option<&Record>
//! }
//! let pages = result.iter_pages(&config);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod paged;
pub mod paginate;
pub mod scroll;

// Re-export commonly used types
pub use paged::{PagedSearchResult, RangeSummary, Resolved};
pub use paginate::{page_window, Paginable};
pub use scroll::ScrollResultIterator;
