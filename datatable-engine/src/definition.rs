//! FILENAME: datatable-engine/src/definition.rs
//! Data Table Definition - the serializable report configuration.
//!
//! Describes WHICH table to build: the ordered group fields, the measure
//! fields, where subtotal rows go, and whether a grand-total row is wanted.
//! Fields are referenced by name and resolved against the catalog when the
//! calculator is constructed, so a definition can be stored or sent over
//! the wire independently of any data set.

use serde::{Deserialize, Serialize};

// ============================================================================
// DEFINITION
// ============================================================================

/// Configuration for one data-table report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataTableDefinition {
    /// Optional display name for the table.
    #[serde(default)]
    pub name: Option<String>,

    /// Group fields, outermost first. The field at position i nests at
    /// depth i + 1.
    pub groups: Vec<String>,

    /// Measure fields. Each must resolve to a catalog field that carries
    /// an aggregate function.
    pub aggregates: Vec<String>,

    /// Group fields that get a "Total" row under each of their nodes.
    /// Every entry must also appear in `groups`. A subtotal on the
    /// innermost group field is accepted but never visible: no level
    /// exists below it to hold the row.
    #[serde(default)]
    pub totals: Vec<String>,

    /// Emit a trailing whole-table "Grand total" row.
    #[serde(default)]
    pub has_grand_total: bool,

    /// Opaque filter expressions, consumed by the filter layer before any
    /// grouping happens. This crate passes them through untouched.
    #[serde(default)]
    pub filters: Vec<String>,
}

impl DataTableDefinition {
    pub fn new(groups: Vec<String>, aggregates: Vec<String>) -> Self {
        DataTableDefinition {
            name: None,
            groups,
            aggregates,
            totals: Vec::new(),
            has_grand_total: false,
            filters: Vec::new(),
        }
    }

    /// Adds a subtotal under every node of the named group field.
    pub fn with_total(mut self, field: impl Into<String>) -> Self {
        self.totals.push(field.into());
        self
    }

    /// Requests the trailing grand-total row.
    pub fn with_grand_total(mut self) -> Self {
        self.has_grand_total = true;
        self
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_helpers() {
        let definition = DataTableDefinition::new(
            vec!["Color".to_string(), "Size".to_string()],
            vec!["Price".to_string()],
        )
        .with_total("Color")
        .with_grand_total();

        assert_eq!(definition.groups, vec!["Color", "Size"]);
        assert_eq!(definition.totals, vec!["Color"]);
        assert!(definition.has_grand_total);
    }

    #[test]
    fn test_round_trips_through_json() {
        let definition = DataTableDefinition::new(
            vec!["Color".to_string()],
            vec!["Price".to_string()],
        )
        .with_grand_total();

        let json = serde_json::to_string(&definition).unwrap();
        let back: DataTableDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(back.groups, definition.groups);
        assert_eq!(back.aggregates, definition.aggregates);
        assert!(back.has_grand_total);
    }

    #[test]
    fn test_optional_sections_default_when_absent() {
        let json = r#"{"groups":["Color"],"aggregates":["Price"]}"#;
        let definition: DataTableDefinition = serde_json::from_str(json).unwrap();
        assert!(definition.totals.is_empty());
        assert!(!definition.has_grand_total);
        assert!(definition.filters.is_empty());
    }
}
