//! Save operation reporting.

use std::path::Path;
use std::time::Duration;

/// Report of a bulk source-save operation.
///
/// Bulk saves continue past individual failures; each failed entry leaves
/// a failure marker here instead of aborting the walk.
#[derive(Debug, Clone, Default)]
pub struct SaveReport {
    /// Number of files successfully written.
    pub files_saved: usize,

    /// Number of directories created.
    pub directories_created: usize,

    /// Number of entries skipped because no source saver matched.
    pub entries_skipped: usize,

    /// Total bytes written to disk.
    pub bytes_written: u64,

    /// Duration of the save operation.
    pub duration: Duration,

    /// Whether the operation was cancelled before completion.
    pub cancelled: bool,

    /// Per-entry failure markers (container-relative path, message).
    pub failures: Vec<SaveFailure>,

    /// Warnings generated during the save.
    pub warnings: Vec<String>,
}

/// One failed entry inside an otherwise continuing bulk save.
#[derive(Debug, Clone)]
pub struct SaveFailure {
    /// Container-relative path of the entry that failed.
    pub path: String,
    /// Human-readable failure description.
    pub message: String,
}

impl SaveReport {
    /// Creates a new empty save report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a failure marker for one entry.
    pub fn add_failure(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.failures.push(SaveFailure {
            path: path.into(),
            message: message.into(),
        });
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, message: String) {
        self.warnings.push(message);
    }

    /// Returns total number of items written.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.files_saved + self.directories_created
    }

    /// Returns whether any entry failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Callback trait for progress reporting during bulk saves.
///
/// The trait requires `Send` so a caller may drive the save from a worker
/// thread and marshal updates back itself.
pub trait ProgressCallback: Send {
    /// Called when starting to process an entry.
    ///
    /// `total` is the number of entries in the save scope and `current`
    /// is 1-indexed.
    fn on_entry_start(&mut self, path: &Path, total: usize, current: usize);

    /// Called when bytes are written.
    fn on_bytes_written(&mut self, bytes: u64);

    /// Called when an entry has been completely processed.
    fn on_entry_complete(&mut self, path: &Path);

    /// Called when the entire operation is complete.
    fn on_complete(&mut self);
}

/// No-op implementation of `ProgressCallback` that does nothing.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_entry_start(&mut self, _path: &Path, _total: usize, _current: usize) {}

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _path: &Path) {}

    fn on_complete(&mut self) {}
}
