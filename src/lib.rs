//! hitview - typed views over search backend responses
//!
//! A search backend returns lightweight hits: identifiers, scores and
//! aggregation buckets. hitview turns them into:
//! - [`PagedSearchResult`]: pagination metadata, lazily hydrated domain
//!   records (one batch fetch per result), facets and numeric ranges
//! - [`ScrollResultIterator`]: one record per hit, fetched on demand
//!
//! # Quick Start
//!
//! ```
//! use hitview::{InMemoryStore, ModelAdapter, PagedSearchResult, RawSearchResponse, SearchQuery};
//! use std::sync::Arc;
//!
//! let store = InMemoryStore::new().with_record("42".to_string(), "The answer");
//! let query = SearchQuery::new(Arc::new(ModelAdapter::new("Page", store))).with_page(1);
//! let raw = RawSearchResponse::new().with_total(1).with_ids(["42"]);
//!
//! let result = PagedSearchResult::new(&query, Some(raw));
//! assert_eq!(result.current_page(), 1);
//! assert_eq!(result.at(0).unwrap().unwrap().as_deref(), Some(&"The answer"));
//! ```
//!
//! # Architecture
//!
//! Collaborator contracts (store, facet and filter specs, query, raw
//! response) live in `hitview-core`; the result components live in
//! `hitview-search`. Both are re-exported here.

pub use hitview_core::*;
pub use hitview_search::*;
