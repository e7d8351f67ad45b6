//! FILENAME: datatable-engine/src/error.rs
//! Error types for data-table calculation.

use thiserror::Error;

/// Errors raised while building a data table.
///
/// Configuration problems (unknown fields, missing aggregate functions)
/// are detected while the definition is resolved, before any row is
/// processed. Comparison failures surface during sorting, when two values
/// in one group column turn out to have no mutual order. Nothing here is
/// retryable: the caller must fix the configuration or the data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// A configured group or aggregate field is missing from the catalog.
    #[error("the field '{0}' is not found")]
    FieldNotFound(String),

    /// A totals entry does not name one of the group fields.
    #[error("the total field '{0}' is not one of the group fields")]
    TotalNotGrouped(String),

    /// An aggregate field carries no aggregate function in the catalog.
    #[error("the field '{0}' has no aggregate function")]
    NoAggregateFunction(String),

    /// Two values in the same group column cannot be ordered against each
    /// other.
    #[error("cannot compare {left} with {right} in group column {column}")]
    IncomparableValues {
        column: usize,
        left: &'static str,
        right: &'static str,
    },
}
