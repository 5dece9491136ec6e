//! Query and model adapter
//!
//! - ModelAdapter: binds a domain model (name + store) to its facet and
//!   filter specifications
//! - SearchQuery: the page position, page size and requested facets of one
//!   executed search
//!
//! Both are built by the query layer; result components only read them.

use crate::config::PaginationConfig;
use crate::contract::{FacetSpec, FilterSpec, Store};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

// ============================================================================
// ModelAdapter
// ============================================================================

/// Search adapter for one domain model
///
/// # Examples
///
/// ```
/// use hitview_core::{FloatRange, InMemoryStore, ModelAdapter, TermsFacet};
///
/// let store: InMemoryStore<String, String> = InMemoryStore::new();
/// let adapter = ModelAdapter::new("Dataset", store)
///     .with_facet("category", TermsFacet::new())
///     .with_filter("price", FloatRange);
///
/// assert!(adapter.has_facet("category"));
/// assert!(adapter.has_filter("price"));
/// assert!(!adapter.has_facet("price"));
/// ```
pub struct ModelAdapter<S: Store> {
    model_name: String,
    store: S,
    facets: HashMap<String, Arc<dyn FacetSpec>>,
    filters: HashMap<String, Arc<dyn FilterSpec>>,
}

impl<S: Store> ModelAdapter<S> {
    /// Create an adapter with no facets or filters
    pub fn new(model_name: impl Into<String>, store: S) -> Self {
        ModelAdapter {
            model_name: model_name.into(),
            store,
            facets: HashMap::new(),
            filters: HashMap::new(),
        }
    }

    /// Builder: register a facet
    pub fn with_facet(mut self, name: impl Into<String>, spec: impl FacetSpec + 'static) -> Self {
        self.facets.insert(name.into(), Arc::new(spec));
        self
    }

    /// Builder: register a filter
    pub fn with_filter(mut self, name: impl Into<String>, spec: impl FilterSpec + 'static) -> Self {
        self.filters.insert(name.into(), Arc::new(spec));
        self
    }

    /// Name of the target domain type
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Backing store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Facet spec by name
    pub fn facet(&self, name: &str) -> Option<&dyn FacetSpec> {
        self.facets.get(name).map(|f| f.as_ref())
    }

    /// Filter spec by name
    pub fn filter(&self, name: &str) -> Option<&dyn FilterSpec> {
        self.filters.get(name).map(|f| f.as_ref())
    }

    /// True if `name` is a known facet
    pub fn has_facet(&self, name: &str) -> bool {
        self.facets.contains_key(name)
    }

    /// True if `name` is a known filter
    pub fn has_filter(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }

    /// Known facet names, sorted
    pub fn facet_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.facets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<S: Store> fmt::Debug for ModelAdapter<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut filters: Vec<&str> = self.filters.keys().map(String::as_str).collect();
        filters.sort_unstable();
        f.debug_struct("ModelAdapter")
            .field("model_name", &self.model_name)
            .field("facets", &self.facet_names())
            .field("filters", &filters)
            .finish()
    }
}

// ============================================================================
// SearchQuery
// ============================================================================

/// An executed search query, as seen by the result layer
pub struct SearchQuery<S: Store> {
    page: Option<u32>,
    page_size: u32,
    adapter: Arc<ModelAdapter<S>>,
    facets_requested: BTreeSet<String>,
}

impl<S: Store> SearchQuery<S> {
    /// Create a query with no page set and the default page size
    pub fn new(adapter: Arc<ModelAdapter<S>>) -> Self {
        Self::with_config(adapter, &PaginationConfig::default())
    }

    /// Create a query whose page size comes from `config`
    pub fn with_config(adapter: Arc<ModelAdapter<S>>, config: &PaginationConfig) -> Self {
        SearchQuery {
            page: None,
            page_size: config.default_page_size,
            adapter,
            facets_requested: BTreeSet::new(),
        }
    }

    /// Builder: set the 1-based page number (0 means unset)
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Builder: set the page size
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Builder: request facets by name
    pub fn with_facets<I, N>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        self.facets_requested
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Requested page, `None` when absent or zero
    pub fn page(&self) -> Option<u32> {
        self.page.filter(|&p| p > 0)
    }

    /// Page size
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Model adapter
    pub fn adapter(&self) -> &ModelAdapter<S> {
        &self.adapter
    }

    /// Facets requested for this query
    pub fn facets_requested(&self) -> &BTreeSet<String> {
        &self.facets_requested
    }
}

impl<S: Store> fmt::Debug for SearchQuery<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchQuery")
            .field("page", &self.page)
            .field("page_size", &self.page_size)
            .field("model", &self.adapter.model_name())
            .field("facets_requested", &self.facets_requested)
            .finish()
    }
}
