//! Data pipeline for the sales dashboard.
//!
//! Responsible for loading and cleaning CSV exports, filtering the
//! resulting dataset, and rolling filtered views up into the aggregate
//! tables the dashboard renders.

pub mod aggregator;
pub mod loader;
pub mod summary;

pub use dashboard_core as core;
