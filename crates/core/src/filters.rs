//! Range filter specifications
//!
//! Concrete [`FilterSpec`] implementations for the common field types.
//! Aggregation bounds always arrive as floating-point numbers; each spec
//! casts them to the field's natural type.

use crate::contract::{FilterSpec, TypedValue};
use chrono::{TimeZone, Utc};

/// Integer field; bounds are truncated toward zero
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerRange;

impl FilterSpec for IntegerRange {
    fn cast(&self, value: f64) -> TypedValue {
        // `as` saturates on overflow and maps NaN to 0
        TypedValue::Integer(value.trunc() as i64)
    }
}

/// Floating-point field
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatRange;

impl FilterSpec for FloatRange {
    fn cast(&self, value: f64) -> TypedValue {
        TypedValue::Float(value)
    }
}

/// Date field; bounds are epoch milliseconds
///
/// Values outside the representable timestamp range are passed through as
/// floats.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateRange;

impl FilterSpec for DateRange {
    fn cast(&self, value: f64) -> TypedValue {
        match Utc.timestamp_millis_opt(value.trunc() as i64).single() {
            Some(ts) => TypedValue::Date(ts),
            None => TypedValue::Float(value),
        }
    }
}
