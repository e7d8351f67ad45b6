//! FILENAME: report-model/src/value.rs
//! Report Values - the closed set of cell value types.
//!
//! Raw rows and aggregate results are polymorphic over a small closed set:
//! exact decimal numbers, text, timestamps, and null. Ordering is explicit
//! rather than inferred: null sorts below everything, values of one type
//! order naturally, and values of two different non-null types have no
//! order at all (the engine reports that as a comparison error instead of
//! guessing one).

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// VALUE
// ============================================================================

/// A single cell value in a raw or aggregated row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Absent value. Skipped during aggregation, sorts before everything.
    Null,
    /// Exact decimal number. Decimal (not float) keeps the output scale
    /// intact: 4.0 + 11.0 displays as "15.0", never "15".
    Number(Decimal),
    Text(String),
    Date(DateTime<Utc>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Type name used in comparison error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Number(_) => "number",
            Value::Text(_) => "text",
            Value::Date(_) => "date",
        }
    }

    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }
}

/// Null orders below every non-null value; same-type pairs order naturally;
/// pairs of two different non-null types do not order (`None`).
impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Null, Value::Null) => Some(Ordering::Equal),
            (Value::Null, _) => Some(Ordering::Less),
            (_, Value::Null) => Some(Ordering::Greater),
            (Value::Number(a), Value::Number(b)) => Some(a.cmp(b)),
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            (Value::Date(a), Value::Date(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
            Value::Date(d) => f.write_str(&d.to_rfc3339()),
        }
    }
}

impl From<Decimal> for Value {
    fn from(value: Decimal) -> Self {
        Value::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(Decimal::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Date(value)
    }
}

// ============================================================================
// TESTS
// ============================================================================
