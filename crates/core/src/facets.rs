//! Terms facet formatter
//!
//! Reads a terms aggregation (`{ "buckets": [{ "key": .., "doc_count": .. }] }`)
//! and produces a list of `{ value, count, label }` entries in bucket order.

use crate::contract::{FacetResult, FacetSpec};
use crate::response::RawSearchResponse;
use serde_json::{json, Value};
use std::collections::HashMap;

/// Facet over a categorical field backed by a terms aggregation
#[derive(Debug, Clone, Default)]
pub struct TermsFacet {
    labels: HashMap<String, String>,
}

impl TermsFacet {
    /// Create a facet with no labels (values display as themselves)
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a display label for one value
    pub fn with_label(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.labels.insert(value.into(), label.into());
        self
    }

    /// Builder: add display labels in bulk
    pub fn with_labels<I, K, V>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.labels
            .extend(labels.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }
}

fn bucket_key(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl FacetSpec for TermsFacet {
    fn from_response(&self, name: &str, response: &RawSearchResponse) -> FacetResult {
        let buckets = response
            .aggregation(name)
            .and_then(|agg| agg.get("buckets"))
            .and_then(Value::as_array);

        let entries: Vec<Value> = buckets
            .into_iter()
            .flatten()
            .filter_map(|bucket| {
                let key = bucket.get("key")?;
                let value = bucket_key(key);
                let count = bucket.get("doc_count").and_then(Value::as_u64).unwrap_or(0);
                Some(json!({
                    "value": value,
                    "count": count,
                    "label": self.labelize(&value),
                }))
            })
            .collect();

        Value::Array(entries)
    }

    fn labelize(&self, value: &str) -> String {
        self.labels
            .get(value)
            .cloned()
            .unwrap_or_else(|| value.to_string())
    }
}
