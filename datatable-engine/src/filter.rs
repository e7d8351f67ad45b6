//! FILENAME: datatable-engine/src/filter.rs
//! Row filtering seam.
//!
//! Filtering belongs to a collaborator, not to this crate; the pipeline
//! only reserves the spot where it runs. Until a filter implementation is
//! wired in, the contract is pass-through: every row survives.

use report_model::{Field, RawRow};

/// Applies the configured filters to the raw rows.
///
/// Pass-through for now. `_fields` and `_filters` are part of the seam's
/// signature so a real implementation can slot in without touching any
/// caller.
pub fn apply_filters(rows: Vec<RawRow>, _fields: &[Field], _filters: &[String]) -> Vec<RawRow> {
    rows
}
