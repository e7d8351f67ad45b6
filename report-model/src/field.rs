//! FILENAME: report-model/src/field.rs
//! Field Catalog - column descriptors for a report data set.
//!
//! A catalog is an ordered list of fields; raw rows align to it by
//! position. Each field declares a value type and, optionally, the
//! aggregate function used when the field is selected as a measure.

use serde::{Deserialize, Serialize};

use crate::aggregate::Aggregate;

// ============================================================================
// FIELD TYPE
// ============================================================================

/// Declared column type. Mirrors the value variants a column may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    Text,
    Number,
    Date,
}

impl FieldType {
    /// The aggregate a column of this type carries when none is set
    /// explicitly. Only numeric columns aggregate by default.
    pub fn default_aggregate(self) -> Option<Aggregate> {
        match self {
            FieldType::Number => Some(Aggregate::Sum),
            FieldType::Text | FieldType::Date => None,
        }
    }
}

// ============================================================================
// FIELD
// ============================================================================

/// One column of a report catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    /// Column name. Unique within a catalog; configuration refers to it.
    pub name: String,

    /// Declared value type of the column.
    pub field_type: FieldType,

    /// Aggregate applied when the column is selected as a measure.
    pub default_aggregate: Option<Aggregate>,
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Field {
            name: name.into(),
            field_type,
            default_aggregate: field_type.default_aggregate(),
        }
    }

    /// Replaces the type-derived default aggregate.
    pub fn with_aggregate(mut self, aggregate: Aggregate) -> Self {
        self.default_aggregate = Some(aggregate);
        self
    }
}

/// Position of `name` within the catalog, if present.
pub fn field_index(fields: &[Field], name: &str) -> Option<usize> {
    fields.iter().position(|field| field.name == name)
}

// ============================================================================
// TESTS
// ============================================================================
