//! Raw search backend response types
//!
//! This module defines the lightweight structures returned by the search
//! backend before any hydration:
//! - RawSearchResponse: top-level response (hits envelope + aggregations)
//! - HitsEnvelope: `hits.total`, `hits.max_score`, `hits.hits`
//! - TotalHits: integer count or `{ value, relation }` object
//! - RawHit: one matched-document reference
//!
//! Absent subtrees are kept as `None` rather than being filled in at decode
//! time. Accessors apply the zero-value defaults.

use crate::error::{SearchError, SearchResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// TotalHits
// ============================================================================

/// Total hit count as reported by the backend
///
/// Older backends report a bare integer, newer ones an object with a
/// `relation` qualifier ("eq" or "gte").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TotalHits {
    /// Bare integer count
    Count(u64),
    /// Count with relation qualifier
    Bounded {
        /// Hit count
        value: u64,
        /// "eq" when exact, "gte" when a lower bound
        #[serde(default, skip_serializing_if = "Option::is_none")]
        relation: Option<String>,
    },
}

impl TotalHits {
    /// The numeric count regardless of representation
    pub fn value(&self) -> u64 {
        match self {
            TotalHits::Count(n) => *n,
            TotalHits::Bounded { value, .. } => *value,
        }
    }
}

impl Default for TotalHits {
    fn default() -> Self {
        TotalHits::Count(0)
    }
}

// ============================================================================
// RawHit
// ============================================================================

/// A single hit: identifier plus scoring/highlight metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawHit {
    /// Document identifier. Required, but kept optional so a missing id
    /// surfaces as a typed error instead of a decode failure.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Index the hit came from
    #[serde(rename = "_index", default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,

    /// Relevance score
    #[serde(rename = "_score", default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,

    /// Highlighted fragments keyed by field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<Map<String, Value>>,

    /// Stored source document, if the query asked for it
    #[serde(rename = "_source", default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Value>,
}

impl RawHit {
    /// Create a hit carrying only an identifier
    pub fn with_id(id: impl Into<String>) -> Self {
        RawHit {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    /// Builder: set score
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// Identifier, if present
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

// ============================================================================
// HitsEnvelope
// ============================================================================

/// The `hits` subtree of a response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HitsEnvelope {
    /// Total number of matching documents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<TotalHits>,

    /// Best score across all hits (null when sorting by field)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_score: Option<f64>,

    /// Hits of the current page, in rank order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hits: Option<Vec<RawHit>>,
}

// ============================================================================
// RawSearchResponse
// ============================================================================

/// Response from the search backend for one query
///
/// # Examples
///
/// ```
/// use hitview_core::RawSearchResponse;
/// use serde_json::json;
///
/// let raw = RawSearchResponse::from_json(json!({
///     "hits": {"total": 2, "max_score": 1.5, "hits": [{"_id": "a"}, {"_id": "b"}]}
/// })).unwrap();
///
/// assert_eq!(raw.total(), 2);
/// assert_eq!(raw.hits().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSearchResponse {
    /// Hits subtree
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hits: Option<HitsEnvelope>,

    /// Aggregation results keyed by aggregation name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregations: Option<Map<String, Value>>,
}

impl RawSearchResponse {
    /// Create an empty response (all defaults)
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a response from a JSON value
    ///
    /// JSON `null` normalizes to the empty response.
    ///
    /// # Errors
    ///
    /// Returns `MalformedResponse` if the JSON does not have the shape of a
    /// search response (e.g. `hits.hits` is not an array).
    pub fn from_json(value: Value) -> SearchResult<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(value).map_err(|e| SearchError::malformed(e.to_string()))
    }

    /// Decode a response from raw JSON bytes
    ///
    /// # Errors
    ///
    /// Returns `MalformedResponse` if the bytes are not valid JSON or do not
    /// have the shape of a search response.
    pub fn from_slice(bytes: &[u8]) -> SearchResult<Self> {
        let value: Value =
            serde_json::from_slice(bytes).map_err(|e| SearchError::malformed(e.to_string()))?;
        Self::from_json(value)
    }

    /// Builder: set total hit count
    pub fn with_total(mut self, total: u64) -> Self {
        self.hits_mut().total = Some(TotalHits::Count(total));
        self
    }

    /// Builder: set max score
    pub fn with_max_score(mut self, max_score: f64) -> Self {
        self.hits_mut().max_score = Some(max_score);
        self
    }

    /// Builder: append a hit
    pub fn with_hit(mut self, hit: RawHit) -> Self {
        self.hits_mut().hits.get_or_insert_with(Vec::new).push(hit);
        self
    }

    /// Builder: append hits with the given identifiers
    pub fn with_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let hits = self.hits_mut().hits.get_or_insert_with(Vec::new);
        hits.extend(ids.into_iter().map(RawHit::with_id));
        self
    }

    /// Builder: set one aggregation result
    pub fn with_aggregation(mut self, name: impl Into<String>, value: Value) -> Self {
        self.aggregations
            .get_or_insert_with(Map::new)
            .insert(name.into(), value);
        self
    }

    fn hits_mut(&mut self) -> &mut HitsEnvelope {
        self.hits.get_or_insert_with(HitsEnvelope::default)
    }

    /// `hits.total`, or 0 when absent
    pub fn total(&self) -> u64 {
        self.hits
            .as_ref()
            .and_then(|h| h.total.as_ref())
            .map(TotalHits::value)
            .unwrap_or(0)
    }

    /// `hits.max_score`, or 0.0 when absent or null
    pub fn max_score(&self) -> f64 {
        self.hits.as_ref().and_then(|h| h.max_score).unwrap_or(0.0)
    }

    /// `hits.hits`, or an empty slice when absent
    pub fn hits(&self) -> &[RawHit] {
        self.hits
            .as_ref()
            .and_then(|h| h.hits.as_deref())
            .unwrap_or(&[])
    }

    /// Aggregations map, if the response carried one
    pub fn aggregations(&self) -> Option<&Map<String, Value>> {
        self.aggregations.as_ref()
    }

    /// One aggregation result by name
    pub fn aggregation(&self, name: &str) -> Option<&Value> {
        self.aggregations.as_ref().and_then(|aggs| aggs.get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_normalizes_to_empty() {
        let raw = RawSearchResponse::from_json(Value::Null).unwrap();
        assert_eq!(raw, RawSearchResponse::default());
        assert_eq!(raw.total(), 0);
        assert_eq!(raw.max_score(), 0.0);
        assert!(raw.hits().is_empty());
        assert!(raw.aggregations().is_none());
    }

    #[test]
    fn test_empty_object_defaults() {
        let raw = RawSearchResponse::from_json(json!({})).unwrap();
        assert_eq!(raw.total(), 0);
        assert!(raw.hits().is_empty());
    }

    #[test]
    fn test_total_as_object() {
        let raw = RawSearchResponse::from_json(json!({
            "hits": {"total": {"value": 10000, "relation": "gte"}, "hits": []}
        }))
        .unwrap();
        assert_eq!(raw.total(), 10_000);
    }

    #[test]
    fn test_null_max_score_defaults_to_zero() {
        let raw = RawSearchResponse::from_json(json!({
            "hits": {"total": 1, "max_score": null, "hits": [{"_id": "x"}]}
        }))
        .unwrap();
        assert_eq!(raw.max_score(), 0.0);
    }

    #[test]
    fn test_hit_metadata_decoded() {
        let raw = RawSearchResponse::from_json(json!({
            "hits": {
                "total": 1,
                "max_score": 2.5,
                "hits": [{
                    "_id": "abc",
                    "_index": "datasets",
                    "_score": 2.5,
                    "highlight": {"title": ["<em>open</em> data"]}
                }]
            }
        }))
        .unwrap();
        let hit = &raw.hits()[0];
        assert_eq!(hit.id(), Some("abc"));
        assert_eq!(hit.index.as_deref(), Some("datasets"));
        assert_eq!(hit.score, Some(2.5));
        assert!(hit.highlight.as_ref().unwrap().contains_key("title"));
    }

    #[test]
    fn test_hit_without_id_decodes() {
        let raw = RawSearchResponse::from_json(json!({
            "hits": {"hits": [{"_score": 1.0}]}
        }))
        .unwrap();
        assert_eq!(raw.hits().len(), 1);
        assert!(raw.hits()[0].id().is_none());
    }

    #[test]
    fn test_wrong_shape_is_malformed() {
        let err = RawSearchResponse::from_json(json!({"hits": {"hits": "nope"}})).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_from_slice() {
        let raw = RawSearchResponse::from_slice(br#"{"hits": {"total": 3}}"#).unwrap();
        assert_eq!(raw.total(), 3);

        let raw = RawSearchResponse::from_slice(b"null").unwrap();
        assert_eq!(raw.total(), 0);

        assert!(RawSearchResponse::from_slice(b"{not json").unwrap_err().is_malformed());
    }

    #[test]
    fn test_builder() {
        let raw = RawSearchResponse::new()
            .with_total(5)
            .with_max_score(3.0)
            .with_ids(["a", "b"])
            .with_hit(RawHit::with_id("c").with_score(0.5))
            .with_aggregation("price_min", json!({"value": 1.0}));

        assert_eq!(raw.total(), 5);
        assert_eq!(raw.max_score(), 3.0);
        let ids: Vec<_> = raw.hits().iter().filter_map(RawHit::id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(raw.aggregation("price_min"), Some(&json!({"value": 1.0})));
        assert!(raw.aggregation("price_max").is_none());
    }
}
