//! Error types for the dashboard crates.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for loading and serving the sales dataset.
///
/// Per-row problems in the source file are not errors; the cleaning passes
/// drop those rows and count them in the loader's report. This enum covers
/// the failures that make the whole source unusable.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// The source file could not be opened or read.
    #[error("Failed to read source file {path}: {source}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source file could not be decoded as a CSV table.
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// The source table header lacks a column the dashboard needs.
    #[error("Source table is missing required column \"{0}\"")]
    MissingColumn(String),

    /// An I/O failure outside of reading the source file.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors bubbled up from other libraries.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashboardError>;

// ── Tests ────────────────────────────────────────────────────────────────────
