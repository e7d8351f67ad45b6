//! FILENAME: report-model/src/aggregate.rs
//! Aggregate Functions - the closed set of re-aggregatable reducers.
//!
//! The data-table engine derives each coarser grouping level from the
//! previous level's already-aggregated output, so every function offered
//! here must be re-aggregatable: folding partial aggregates must give the
//! same result as folding the raw values directly. Sum, min, max and
//! running-sum counting satisfy that law; distinct-count and plain average
//! do not, which is why they are not members of this enum.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::value::Value;

// ============================================================================
// AGGREGATE
// ============================================================================

/// A `(seed, combine)` reducer over column values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Aggregate {
    /// Numeric addition.
    Sum,
    /// Smallest value by the value ordering. Works over text and dates too.
    Min,
    /// Largest value by the value ordering.
    Max,
    /// Running sum of pre-counted contributions (a count column holding 1
    /// per raw row, or partial counts from a finer level). Counting as a
    /// sum is what keeps the function re-aggregatable across levels.
    Count,
}

impl Default for Aggregate {
    fn default() -> Self {
        Aggregate::Sum
    }
}

impl Aggregate {
    /// Accumulator start value. The engine folds it in on the first
    /// non-null input only, so an all-null group stays null rather than
    /// surfacing the seed.
    pub fn seed(self) -> Value {
        match self {
            Aggregate::Sum | Aggregate::Count => Value::Number(Decimal::ZERO),
            Aggregate::Min | Aggregate::Max => Value::Null,
        }
    }

    /// Folds one value into the accumulator. A value the function cannot
    /// digest (wrong type, or no mutual order with the accumulator) leaves
    /// the accumulator unchanged.
    pub fn combine(self, accumulator: Value, value: &Value) -> Value {
        match self {
            Aggregate::Sum | Aggregate::Count => match (accumulator, value) {
                (Value::Number(a), Value::Number(b)) => Value::Number(a + *b),
                (accumulator, _) => accumulator,
            },
            Aggregate::Min => pick(accumulator, value, Ordering::Less),
            Aggregate::Max => pick(accumulator, value, Ordering::Greater),
        }
    }
}

/// Keeps the accumulator or replaces it with `value`, whichever sits on the
/// `keep` side of the ordering. A null accumulator is always replaced.
fn pick(accumulator: Value, value: &Value, keep: Ordering) -> Value {
    if accumulator.is_null() {
        return value.clone();
    }
    match accumulator.partial_cmp(value) {
        Some(order) if order == keep => accumulator,
        Some(_) => value.clone(),
        None => accumulator,
    }
}

// ============================================================================
// TESTS
// ============================================================================
