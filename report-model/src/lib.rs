//! FILENAME: report-model/src/lib.rs
//! Shared data model for the reporting pipeline.
//!
//! This crate holds the leaf types every reporting collaborator speaks:
//! the closed `Value` variant with its explicit ordering, the field
//! catalog, and the re-aggregatable aggregate functions. The data-table
//! engine depends on it for computation; data sources depend on it to
//! describe what they produce.

pub mod aggregate;
pub mod field;
pub mod value;

// Re-export commonly used types at the crate root
pub use aggregate::Aggregate;
pub use field::{field_index, Field, FieldType};
pub use value::Value;

/// A raw data row: one value per catalog field, positionally aligned.
pub type RawRow = Vec<Value>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_row_alignment() {
        let fields = vec![
            Field::new("Color", FieldType::Text),
            Field::new("Price", FieldType::Number),
        ];
        let row: RawRow = vec![Value::from("Red"), Value::from(12)];

        let price = field_index(&fields, "Price").unwrap();
        assert_eq!(row[price], Value::from(12));
    }

    #[test]
    fn test_definitions_round_trip_through_json() {
        let field = Field::new("Price", FieldType::Number).with_aggregate(Aggregate::Min);
        let json = serde_json::to_string(&field).unwrap();
        let back: Field = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name, "Price");
        assert_eq!(back.default_aggregate, Some(Aggregate::Min));
    }

    #[test]
    fn test_values_round_trip_through_json() {
        let values: Vec<Value> = vec![Value::Null, Value::from("Red"), Value::from(42)];
        let json = serde_json::to_string(&values).unwrap();
        let back: Vec<Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, values);
    }
}
