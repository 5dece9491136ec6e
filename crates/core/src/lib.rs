//! Core types and contracts for hitview
//!
//! This crate defines what the result layer consumes:
//! - RawSearchResponse: decoded search backend response (hits, aggregations)
//! - SearchQuery / ModelAdapter: page position, requested facets and the
//!   model's facet/filter specifications
//! - Store, FacetSpec, FilterSpec: collaborator capability traits
//! - ObjectId: 12-byte hex document identifier
//! - IntegerRange, FloatRange, DateRange, TermsFacet: stock specs
//! - InMemoryStore: fetch-counting store for tests and demos
//! - PaginationConfig: page window and default page size
//! - SearchError: error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod contract;
pub mod error;
pub mod facets;
pub mod filters;
pub mod object_id;
pub mod query;
pub mod response;
pub mod store;

pub use config::{PaginationConfig, CONFIG_FILE_NAME};
pub use contract::{FacetResult, FacetSpec, FilterSpec, Store, StoreId, TypedValue};
pub use error::{SearchError, SearchResult, StoreError};
pub use facets::TermsFacet;
pub use filters::{DateRange, FloatRange, IntegerRange};
pub use object_id::{ObjectId, ObjectIdError};
pub use query::{ModelAdapter, SearchQuery};
pub use response::{HitsEnvelope, RawHit, RawSearchResponse, TotalHits};
pub use store::InMemoryStore;
