//! FILENAME: datatable-engine/src/lib.rs
//! Data Table subsystem for Reportly.
//!
//! This crate turns flat report rows into a grouped, sub-totaled display
//! table, separate from the report data model. It depends on `report-model`
//! only for shared types (Value, Field, Aggregate).
//!
//! Layers:
//! - `definition`: Serializable configuration (what the data table IS)
//! - `filter`: Row admission ahead of the calculation
//! - `engine`: Calculation pipeline (HOW we calculate)
//! - `view`: Renderable output with span metadata (WHAT we display)
//! - `error`: Everything that can go wrong along the way

pub mod definition;
pub mod engine;
pub mod error;
pub mod filter;
pub mod view;

pub use definition::*;
pub use error::*;
pub use view::*;
pub use engine::{calculate_data_table, DataTableCalculator};
pub use filter::apply_filters;
