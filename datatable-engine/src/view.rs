//! FILENAME: datatable-engine/src/view.rs
//! Data Table View - renderable output of the calculation.
//!
//! A flat list of display rows whose cells carry row-span/column-span
//! metadata: a renderer merges repeated group labels vertically (the first
//! row under a group holds the label, spanning every leaf row beneath it)
//! and stretches total labels horizontally across the group columns they
//! summarize.

use report_model::Value;
use serde::{Deserialize, Serialize};

// ============================================================================
// CELL TYPES
// ============================================================================

/// The role of a cell, for renderers that style totals differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    /// Group label (a group-key value).
    Group,
    /// Aggregated measure value.
    Aggregate,
    /// "Total" label of a subtotal row.
    Subtotal,
    /// "Grand total" label of the trailing whole-table row.
    GrandTotal,
}

// ============================================================================
// VIEW CELL
// ============================================================================

/// A single display cell with its span metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataCell {
    /// Display value. Total labels are plain text values.
    pub value: Value,

    /// Leaf rows this cell covers vertically. 1 for ordinary cells.
    pub row_span: u32,

    /// Group columns this cell covers horizontally. 1 for ordinary cells.
    pub col_span: u32,

    /// Role of the cell.
    pub kind: CellKind,
}

impl DataCell {
    /// Creates a group label cell.
    pub fn group(value: Value) -> Self {
        DataCell {
            value,
            row_span: 1,
            col_span: 1,
            kind: CellKind::Group,
        }
    }

    /// Creates an aggregated measure cell.
    pub fn aggregate(value: Value) -> Self {
        DataCell {
            value,
            row_span: 1,
            col_span: 1,
            kind: CellKind::Aggregate,
        }
    }

    /// Creates the "Total" label cell of a subtotal row.
    pub fn subtotal(col_span: u32) -> Self {
        DataCell {
            value: Value::text("Total"),
            row_span: 1,
            col_span,
            kind: CellKind::Subtotal,
        }
    }

    /// Creates the "Grand total" label cell.
    pub fn grand_total(col_span: u32) -> Self {
        DataCell {
            value: Value::text("Grand total"),
            row_span: 1,
            col_span,
            kind: CellKind::GrandTotal,
        }
    }

    /// Sets the vertical span (number of leaf rows covered).
    pub fn with_row_span(mut self, row_span: u32) -> Self {
        self.row_span = row_span;
        self
    }
}

// ============================================================================
// VIEW ROWS
// ============================================================================

/// One display row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataRow {
    pub cells: Vec<DataCell>,
}

impl DataRow {
    /// One row in the verification text form: cell values joined with `,`,
    /// with `(nR)`/`(nC)` suffixes for spans other than 1 and `<NULL>` for
    /// null values.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            if cell.value.is_null() {
                out.push_str("<NULL>");
            } else {
                out.push_str(&cell.value.to_string());
            }
            if cell.row_span != 1 {
                out.push_str(&format!("({}R)", cell.row_span));
            }
            if cell.col_span != 1 {
                out.push_str(&format!("({}C)", cell.col_span));
            }
        }
        out
    }
}

// ============================================================================
// VIEW
// ============================================================================

/// The calculated data table, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataTableView {
    /// Display rows in leaf order; the grand-total row (if any) is last.
    pub rows: Vec<DataRow>,

    /// Number of group columns the row labels cover.
    pub group_count: usize,

    /// Number of measure columns.
    pub aggregate_count: usize,
}

impl DataTableView {
    /// Plain-text form of the whole table, one line per display row. Used
    /// for verification and debugging.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&row.to_text());
        }
        out
    }
}

// ============================================================================
// TESTS
// ============================================================================
