//! Cached dataset access for the dashboard runtime.
//!
//! Wraps [`load_csv`] with a single-slot cache keyed on the source file's
//! modification time. Callers use [`DatasetManager::dataset`] to obtain the
//! current [`Dataset`]; the manager reloads only when the file changed on
//! disk, so repeated dashboard interactions reuse one cleaned dataset.
//!
//! [`load_csv`]: dashboard_data::loader::load_csv

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use dashboard_core::error::Result;
use dashboard_core::models::Dataset;
use dashboard_data::loader::{self, CleaningReport};

// ── Cached slot ───────────────────────────────────────────────────────────────

/// One successful load: the cleaned dataset, its cleaning report, and the
/// source mtime it was read under.
struct CachedLoad {
    dataset: Dataset,
    report: CleaningReport,
    /// Modification time observed when the load started. `None` when the
    /// filesystem would not report one; such a cache never matches and the
    /// next access reloads.
    loaded_mtime: Option<SystemTime>,
}

// ── DatasetManager ────────────────────────────────────────────────────────────

/// Single-slot cache over the CSV loading pipeline.
///
/// The slot is keyed by the source file's modification time: the first
/// access loads, later accesses reload only when the file changed. A failed
/// load leaves the slot empty rather than serving a stale dataset.
///
/// # Example
/// ```no_run
/// use dashboard_runtime::dataset_manager::DatasetManager;
///
/// let mut manager = DatasetManager::new("superstore.csv");
/// if let Ok(dataset) = manager.dataset() {
///     println!("{} rows ready", dataset.len());
/// }
/// ```
pub struct DatasetManager {
    /// Path of the CSV export this manager serves.
    source: PathBuf,
    /// Most recent successful load, if any.
    slot: Option<CachedLoad>,
}

impl DatasetManager {
    /// Create a manager for the export at `source`. Nothing is loaded yet.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            slot: None,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Return the current dataset, loading or reloading as needed.
    ///
    /// Loads on first access. On later accesses the source file's
    /// modification time is compared against the cached one and the file is
    /// re-read only when it changed. Errors propagate from the load and
    /// leave the slot empty, so a failed reload never serves old data.
    pub fn dataset(&mut self) -> Result<&Dataset> {
        let cached = match self.slot.take() {
            Some(cached) if !self.is_stale(&cached) => {
                tracing::debug!("serving cached dataset for {}", self.source.display());
                cached
            }
            _ => self.load()?,
        };
        Ok(&self.slot.insert(cached).dataset)
    }

    /// Drop the slot and load fresh, regardless of modification time.
    pub fn reload(&mut self) -> Result<&Dataset> {
        self.invalidate();
        self.dataset()
    }

    /// Discard the cached dataset; the next [`dataset`] call reloads.
    ///
    /// [`dataset`]: DatasetManager::dataset
    pub fn invalidate(&mut self) {
        self.slot = None;
        tracing::debug!("dataset cache invalidated for {}", self.source.display());
    }

    /// Path of the CSV export this manager serves.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// `true` when the slot currently holds a loaded dataset.
    pub fn is_loaded(&self) -> bool {
        self.slot.is_some()
    }

    /// Cleaning report from the most recent successful load, or `None`.
    pub fn report(&self) -> Option<&CleaningReport> {
        self.slot.as_ref().map(|cached| &cached.report)
    }

    // ── Private helpers ───────────────────────────────────────────────────

    /// `true` when the source file's mtime no longer matches the cache.
    ///
    /// A failed mtime probe counts as stale: the follow-up load surfaces
    /// the real filesystem error instead of hiding it behind old data.
    fn is_stale(&self, cached: &CachedLoad) -> bool {
        match fs::metadata(&self.source).and_then(|meta| meta.modified()) {
            Ok(mtime) => {
                let changed = cached.loaded_mtime != Some(mtime);
                if changed {
                    tracing::debug!("{} changed on disk; reloading", self.source.display());
                }
                changed
            }
            Err(e) => {
                tracing::warn!(
                    "could not probe mtime of {}: {e}; treating cache as stale",
                    self.source.display()
                );
                true
            }
        }
    }

    /// Run the loading pipeline and package the result for the slot.
    ///
    /// The mtime is probed before the read; a write landing mid-load then
    /// shows up as a change on the next access.
    fn load(&self) -> Result<CachedLoad> {
        let loaded_mtime = fs::metadata(&self.source)
            .and_then(|meta| meta.modified())
            .ok();
        let (dataset, report) = loader::load_csv(&self.source)?;
        tracing::debug!(
            "cached {} records from {}",
            dataset.len(),
            self.source.display()
        );
        Ok(CachedLoad {
            dataset,
            report,
            loaded_mtime,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
