//! Runtime layer for the sales dashboard.
//!
//! Owns the cached dataset a presentation layer reads from, so repeated
//! interactions reuse one cleaned dataset instead of re-parsing the source.

pub mod dataset_manager;

pub use dashboard_core as core;
pub use dashboard_data as data;
