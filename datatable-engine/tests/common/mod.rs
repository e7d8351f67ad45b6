//! FILENAME: tests/common/mod.rs
//! Shared fixtures for data-table engine integration tests.

use report_model::{Field, FieldType, RawRow, Value};

// ============================================================================
// VALUE HELPERS
// ============================================================================

/// Numeric value from a decimal literal, keeping its scale ("12.50" stays
/// two-decimal through every sum).
pub fn num(s: &str) -> Value {
    Value::Number(s.parse().unwrap())
}

/// Text value.
pub fn text(s: &str) -> Value {
    Value::from(s)
}

// ============================================================================
// TEST DATA FIXTURES
// ============================================================================

/// Product sales sample: 20 rows over three colors and three sizes, in
/// shuffled input order so the calculation has real sorting to do.
pub struct ProductFixture;

impl ProductFixture {
    pub fn fields() -> Vec<Field> {
        vec![
            Field::new("Color", FieldType::Text),
            Field::new("Size", FieldType::Text),
            Field::new("Price", FieldType::Number),
        ]
    }

    pub fn data() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            ("Red", "Large", "60.08"),
            ("Blue", "Medium", "64.92"),
            ("Green", "Large", "50.00"),
            ("Blue", "Large", "45.99"),
            ("Red", "Small", "22.00"),
            ("Green", "Medium", "53.02"),
            ("Blue", "Small", "20.00"),
            ("Red", "Medium", "34.54"),
            ("Green", "Large", "49.77"),
            ("Blue", "Large", "52.00"),
            ("Red", "Large", "59.00"),
            ("Green", "Small", "35.08"),
            ("Blue", "Medium", "64.92"),
            ("Red", "Medium", "34.54"),
            ("Green", "Medium", "53.03"),
            ("Blue", "Small", "21.83"),
            ("Red", "Large", "60.00"),
            ("Green", "Large", "60.00"),
            ("Blue", "Large", "34.98"),
            ("Red", "Small", "22.85"),
        ]
    }

    pub fn rows() -> Vec<RawRow> {
        Self::data()
            .into_iter()
            .map(|(color, size, price)| vec![text(color), text(size), num(price)])
            .collect()
    }
}

/// Order ledger sample: four nested group fields and two measures, small
/// enough to trace a deep subtotal layout by hand.
pub struct OrderFixture;

impl OrderFixture {
    pub fn fields() -> Vec<Field> {
        vec![
            Field::new("AppId", FieldType::Text),
            Field::new("Currency", FieldType::Text),
            Field::new("State", FieldType::Text),
            Field::new("Product", FieldType::Text),
            Field::new("Quantity", FieldType::Number),
            Field::new("Amount", FieldType::Number),
        ]
    }

    pub fn data() -> Vec<(&'static str, &'static str, &'static str, &'static str, &'static str, &'static str)> {
        vec![
            ("A", "USD", "On", "Car", "4.0", "13"),
            ("A", "USD", "On", "Bike", "1.0", "13"),
            ("A", "USD", "Off", "Bike", "1.0", "13"),
            ("A", "USD", "On", "Car", "4.0", "13"),
            ("A", "USD", "On", "Bike", "1.0", "13"),
            ("A", "USD", "On", "Car", "4.0", "13"),
        ]
    }

    pub fn rows() -> Vec<RawRow> {
        Self::data()
            .into_iter()
            .map(|(app, currency, state, product, quantity, amount)| {
                vec![
                    text(app),
                    text(currency),
                    text(state),
                    text(product),
                    num(quantity),
                    num(amount),
                ]
            })
            .collect()
    }
}
