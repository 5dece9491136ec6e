//! Capability contracts for external collaborators
//!
//! This module defines the seams through which the result components talk to
//! the outside world:
//! - Store: batch and single fetch of domain records by identifier
//! - StoreId: conversion of a hit `_id` into the store's identifier type
//! - FacetSpec: formats a facet aggregation and labelizes its values
//! - FilterSpec: casts a numeric range bound to the filter's value type
//! - TypedValue: the typed output of a FilterSpec cast
//!
//! Implementations must be Send + Sync so result objects can be shared
//! across request handlers.

use crate::error::{SearchError, SearchResult, StoreError};
use crate::response::RawSearchResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

/// Opaque facet output produced by a [`FacetSpec`]
pub type FacetResult = Value;

// ============================================================================
// StoreId
// ============================================================================

/// Identifier type native to a [`Store`]
///
/// Blanket-implemented for every `FromStr` type whose error is displayable,
/// so `String`, integers, `ObjectId` and the like work out of the box.
pub trait StoreId: Clone + Eq + Hash + fmt::Debug + Send + Sync {
    /// Convert a raw hit identifier
    ///
    /// # Errors
    ///
    /// Returns `InvalidIdentifier` if `raw` is not a valid identifier.
    fn parse_id(raw: &str) -> SearchResult<Self>;
}

impl<T> StoreId for T
where
    T: FromStr + Clone + Eq + Hash + fmt::Debug + Send + Sync,
    T::Err: fmt::Display,
{
    fn parse_id(raw: &str) -> SearchResult<Self> {
        raw.parse()
            .map_err(|e| SearchError::invalid_identifier(raw, e))
    }
}

// ============================================================================
// Store
// ============================================================================

/// Persistent store holding the full domain records
///
/// # Contract
///
/// - `fetch_batch` returns a mapping containing only the identifiers it
///   found; missing identifiers are simply absent from the map.
/// - `fetch_one` returns `Ok(None)` when the record does not exist.
/// - Transport failures surface as [`StoreError`].
pub trait Store: Send + Sync {
    /// Native identifier type
    type Id: StoreId;
    /// Domain record type
    type Record;

    /// Fetch every record whose identifier is in `ids`, in one round trip
    fn fetch_batch(
        &self,
        ids: &HashSet<Self::Id>,
    ) -> Result<HashMap<Self::Id, Self::Record>, StoreError>;

    /// Fetch one record by identifier
    fn fetch_one(&self, id: &Self::Id) -> Result<Option<Self::Record>, StoreError>;
}

// ============================================================================
// FacetSpec
// ============================================================================

/// Formatter for one facet
pub trait FacetSpec: Send + Sync {
    /// Build the facet output for aggregation `name` from the raw response
    fn from_response(&self, name: &str, response: &RawSearchResponse) -> FacetResult;

    /// Display label for a facet value
    ///
    /// Defaults to the value itself.
    fn labelize(&self, value: &str) -> String {
        value.to_string()
    }
}

// ============================================================================
// FilterSpec / TypedValue
// ============================================================================

/// Typed value produced by casting a numeric aggregation bound
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypedValue {
    /// Integer value
    Integer(i64),
    /// Floating-point value
    Float(f64),
    /// Timestamp value
    Date(DateTime<Utc>),
}

impl TypedValue {
    /// Integer payload, if this is an Integer
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            TypedValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Float payload, if this is a Float
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TypedValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Timestamp payload, if this is a Date
    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            TypedValue::Date(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::Integer(v) => write!(f, "{}", v),
            TypedValue::Float(v) => write!(f, "{}", v),
            TypedValue::Date(v) => write!(f, "{}", v.to_rfc3339()),
        }
    }
}

/// Specification for one range-filterable field
pub trait FilterSpec: Send + Sync {
    /// Cast a raw numeric bound to the field's value type
    fn cast(&self, value: f64) -> TypedValue;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_string_id_never_fails() {
        assert_eq!(String::parse_id("anything").unwrap(), "anything");
    }

    #[test]
    fn test_parse_numeric_id() {
        assert_eq!(u64::parse_id("42").unwrap(), 42);
        let err = u64::parse_id("forty-two").unwrap_err();
        assert!(err.is_invalid_identifier());
        assert!(err.to_string().contains("forty-two"));
    }

    #[test]
    fn test_default_labelize_is_identity() {
        struct Plain;
        impl FacetSpec for Plain {
            fn from_response(&self, _name: &str, _response: &RawSearchResponse) -> FacetResult {
                Value::Null
            }
        }
        assert_eq!(Plain.labelize("tech"), "tech");
    }

    #[test]
    fn test_typed_value_accessors() {
        assert_eq!(TypedValue::Integer(3).as_i64(), Some(3));
        assert_eq!(TypedValue::Integer(3).as_f64(), None);
        assert_eq!(TypedValue::Float(1.5).as_f64(), Some(1.5));
        assert!(TypedValue::Float(1.5).as_date().is_none());
    }

    #[test]
    fn test_typed_value_serializes_untagged() {
        assert_eq!(serde_json::to_value(TypedValue::Integer(7)).unwrap(), 7);
        assert_eq!(serde_json::to_value(TypedValue::Float(2.5)).unwrap(), 2.5);
    }
}
