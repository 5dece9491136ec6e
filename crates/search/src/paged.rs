//! Paged search result with lazy batch hydration
//!
//! This module provides:
//! - PagedSearchResult: wraps one backend response plus the query that
//!   produced it
//! - RangeSummary: min/max bounds of a range-filterable field
//!
//! # Hydration
//!
//! Hit identifiers are resolved into domain records with a single batch
//! fetch on first access. The resolved sequence is cached for the lifetime
//! of the result and never refreshed. It follows response order exactly,
//! duplicates included; an identifier the store no longer knows yields
//! `None` at its position.
//!
//! The cache is a `OnceCell`: concurrent first accesses block until one
//! batch fetch completes, and every reader sees the same sequence. A failed
//! hydration is not cached.

use crate::paginate::Paginable;
use hitview_core::{
    FacetResult, RawSearchResponse, SearchError, SearchQuery, SearchResult, Store, StoreId,
    TypedValue,
};
use once_cell::sync::OnceCell;
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// One hydrated position: the record, or `None` if it could not be resolved
pub type Resolved<R> = Option<Arc<R>>;

// ============================================================================
// RangeSummary
// ============================================================================

/// Bounds of a range-filterable field across the matching documents
///
/// `query_min` / `query_max` are always 0 here. The presentation layer
/// overwrites them with the bounds the caller actually filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RangeSummary {
    /// Smallest value in the result set
    pub min: TypedValue,
    /// Largest value in the result set
    pub max: TypedValue,
    /// Lower bound applied by the query (placeholder)
    pub query_min: i64,
    /// Upper bound applied by the query (placeholder)
    pub query_max: i64,
}

// ============================================================================
// PagedSearchResult
// ============================================================================

/// One page of search results over a domain model
///
/// The query is borrowed and must outlive the result.
///
/// # Examples
///
/// ```
/// use hitview_core::{InMemoryStore, ModelAdapter, RawSearchResponse, SearchQuery};
/// use hitview_search::PagedSearchResult;
/// use std::sync::Arc;
///
/// let store = InMemoryStore::new()
///     .with_record("a".to_string(), "Alpha")
///     .with_record("b".to_string(), "Beta");
/// let query = SearchQuery::new(Arc::new(ModelAdapter::new("Word", store))).with_page(1);
/// let raw = RawSearchResponse::new().with_total(2).with_ids(["b", "a"]);
///
/// let result = PagedSearchResult::new(&query, Some(raw));
/// let words: Vec<_> = result.iter().unwrap().map(|w| w.copied()).collect();
/// assert_eq!(words, vec![Some("Beta"), Some("Alpha")]);
/// ```
pub struct PagedSearchResult<'q, S: Store> {
    query: &'q SearchQuery<S>,
    response: RawSearchResponse,
    objects: OnceCell<Vec<Resolved<S::Record>>>,
}

impl<'q, S: Store> PagedSearchResult<'q, S> {
    /// Wrap a response; `None` is treated as the empty response
    pub fn new(query: &'q SearchQuery<S>, response: Option<RawSearchResponse>) -> Self {
        PagedSearchResult {
            query,
            response: response.unwrap_or_default(),
            objects: OnceCell::new(),
        }
    }

    /// Wrap a JSON response body; JSON `null` is treated as the empty response
    ///
    /// # Errors
    ///
    /// Returns `MalformedResponse` if the JSON is not shaped like a response.
    pub fn from_json(query: &'q SearchQuery<S>, body: Value) -> SearchResult<Self> {
        let response = RawSearchResponse::from_json(body)?;
        Ok(Self::new(query, Some(response)))
    }

    /// The wrapped response
    pub fn response(&self) -> &RawSearchResponse {
        &self.response
    }

    /// The query that produced this result
    pub fn query(&self) -> &'q SearchQuery<S> {
        self.query
    }

    // ========================================================================
    // Pagination metadata
    // ========================================================================

    /// Total number of matching documents (0 when absent)
    pub fn total(&self) -> u64 {
        self.response.total()
    }

    /// Best score (0.0 when absent)
    pub fn max_score(&self) -> f64 {
        self.response.max_score()
    }

    /// Requested page if this result has hits and a page was set, else 1
    pub fn current_page(&self) -> u32 {
        if self.is_empty() {
            return 1;
        }
        self.query.page().unwrap_or(1)
    }

    /// Page size of the query
    pub fn page_size(&self) -> u32 {
        self.query.page_size()
    }

    /// Name of the domain model the hits refer to
    pub fn model_name(&self) -> &str {
        self.query.adapter().model_name()
    }

    // ========================================================================
    // Hits and hydration
    // ========================================================================

    /// Number of hits in the response, independent of hydration
    pub fn count(&self) -> usize {
        self.response.hits().len()
    }

    /// True if the response carries no hits
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Hit identifiers in response order, without hydration
    ///
    /// # Errors
    ///
    /// Returns `MalformedResponse` if any hit lacks an `_id`.
    pub fn hit_identifiers(&self) -> SearchResult<Vec<&str>> {
        self.response
            .hits()
            .iter()
            .enumerate()
            .map(|(position, hit)| {
                hit.id().ok_or_else(|| {
                    SearchError::malformed(format!("hit at position {} has no _id", position))
                })
            })
            .collect()
    }

    /// True once hydration has completed
    pub fn is_resolved(&self) -> bool {
        self.objects.get().is_some()
    }

    /// Hydrated records in hit order
    ///
    /// The first successful call issues one batch fetch; later calls return
    /// the cached sequence without touching the store.
    ///
    /// # Errors
    ///
    /// - `MalformedResponse` if a hit lacks an `_id`
    /// - `InvalidIdentifier` if any id cannot be converted (nothing is fetched)
    /// - `Store` if the batch fetch fails
    pub fn objects(&self) -> SearchResult<&[Resolved<S::Record>]> {
        self.objects
            .get_or_try_init(|| self.hydrate())
            .map(Vec::as_slice)
    }

    /// Hydrated record at `index`
    ///
    /// `Ok(None)` when `index` is past the end, `Ok(Some(None))` when the
    /// hit at `index` could not be resolved.
    pub fn at(&self, index: usize) -> SearchResult<Option<&Resolved<S::Record>>> {
        Ok(self.objects()?.get(index))
    }

    /// Iterate hydrated records in hit order
    ///
    /// Restartable: each call replays the cache once it is populated.
    pub fn iter(&self) -> SearchResult<impl Iterator<Item = Option<&S::Record>> + '_> {
        Ok(self.objects()?.iter().map(|r| r.as_deref()))
    }

    fn hydrate(&self) -> SearchResult<Vec<Resolved<S::Record>>> {
        let raw_ids = self.hit_identifiers()?;
        let ids = raw_ids
            .iter()
            .map(|raw| <S::Id as StoreId>::parse_id(raw))
            .collect::<SearchResult<Vec<S::Id>>>()?;

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        debug!(
            target: "hitview::search",
            model = self.model_name(),
            hits = ids.len(),
            "Hydrating search hits"
        );

        let unique: HashSet<S::Id> = ids.iter().cloned().collect();
        let found = self.query.adapter().store().fetch_batch(&unique)?;
        let found: HashMap<S::Id, Arc<S::Record>> =
            found.into_iter().map(|(id, r)| (id, Arc::new(r))).collect();

        let resolved: Vec<Resolved<S::Record>> = ids
            .iter()
            .zip(raw_ids.iter())
            .map(|(id, raw)| {
                let record = found.get(id).cloned();
                if record.is_none() {
                    warn!(
                        target: "hitview::search",
                        model = self.model_name(),
                        id = %raw,
                        "Search hit not found in store"
                    );
                }
                record
            })
            .collect();

        debug!(
            target: "hitview::search",
            model = self.model_name(),
            resolved = resolved.iter().filter(|r| r.is_some()).count(),
            missing = resolved.iter().filter(|r| r.is_none()).count(),
            "Hydration complete"
        );

        Ok(resolved)
    }

    // ========================================================================
    // Facets
    // ========================================================================

    /// Facet output for every requested facet the adapter knows
    ///
    /// Unknown names are skipped.
    pub fn facets(&self) -> BTreeMap<String, FacetResult> {
        self.query
            .facets_requested()
            .iter()
            .filter_map(|name| self.facet(name).map(|f| (name.clone(), f)))
            .collect()
    }

    /// Facet output for `name`, `None` if the adapter has no such facet
    ///
    /// Recomputed on every call.
    pub fn facet(&self, name: &str) -> Option<FacetResult> {
        match self.query.adapter().facet(name) {
            Some(spec) => Some(spec.from_response(name, &self.response)),
            None => {
                debug!(target: "hitview::search", facet = name, "Unknown facet");
                None
            }
        }
    }

    /// Labelizing function of facet `name`
    pub fn label_function(&self, name: &str) -> Option<impl Fn(&str) -> String + '_> {
        let spec = self.query.adapter().facet(name)?;
        Some(move |value: &str| spec.labelize(value))
    }

    /// Display label of `value` for facet `name`
    ///
    /// Unknown facets return the value unchanged.
    pub fn labelize(&self, name: &str, value: &str) -> String {
        match self.label_function(name) {
            Some(label) => label(value),
            None => value.to_string(),
        }
    }

    // ========================================================================
    // Ranges
    // ========================================================================

    /// Min/max bounds of filter `name` from the `{name}_min` and `{name}_max`
    /// aggregations
    ///
    /// `None` if the filter is unknown, there are no aggregations, or either
    /// bound is missing. A null bound value counts as 0.
    pub fn range(&self, name: &str) -> Option<RangeSummary> {
        let spec = self.query.adapter().filter(name)?;
        let aggs = self.response.aggregations()?;
        let min = aggs.get(&format!("{}_min", name))?;
        let max = aggs.get(&format!("{}_max", name))?;

        Some(RangeSummary {
            min: spec.cast(bound_value(min)),
            max: spec.cast(bound_value(max)),
            query_min: 0,
            query_max: 0,
        })
    }
}

fn bound_value(bucket: &Value) -> f64 {
    bucket.get("value").and_then(Value::as_f64).unwrap_or(0.0)
}

impl<'q, S: Store> Paginable for PagedSearchResult<'q, S> {
    fn total(&self) -> u64 {
        PagedSearchResult::total(self)
    }

    fn page_size(&self) -> u32 {
        PagedSearchResult::page_size(self)
    }

    fn current_page(&self) -> u32 {
        PagedSearchResult::current_page(self)
    }
}

impl<'q, S: Store> fmt::Debug for PagedSearchResult<'q, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagedSearchResult")
            .field("model", &self.model_name())
            .field("total", &self.total())
            .field("count", &self.count())
            .field("current_page", &self.current_page())
            .field("resolved", &self.is_resolved())
            .finish()
    }
}
