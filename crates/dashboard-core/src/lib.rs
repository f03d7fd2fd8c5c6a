//! Core domain types for the sales dashboard pipeline.
//!
//! Holds the cleaned record and dataset models, the filter selection that
//! drives every view, the field selector enums the aggregations dispatch on,
//! and the field-level parsers the loader cleans raw cells with.

pub mod error;
pub mod models;
pub mod parsers;
