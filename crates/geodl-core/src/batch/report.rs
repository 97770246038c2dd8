//! Per-task outcomes and the aggregate report for a batch run.
//!
//! Used by the dispatcher to report results to the CLI; consumers can count
//! downloaded / skipped / failed entries and walk the failures by name.

use crate::artifact;
use crate::downloader::{DownloadError, DownloadStatus};
use crate::manifest::ManifestEntry;

/// Result of one dispatched download task (CLI-friendly).
#[derive(Debug, Clone)]
pub struct TaskOutcome {
    /// The manifest entry the task ran for.
    pub entry: ManifestEntry,
    /// How the task ended.
    pub result: Result<DownloadStatus, DownloadError>,
}

impl TaskOutcome {
    /// On-disk filename the entry resolves to.
    pub fn artifact_filename(&self) -> String {
        artifact::artifact_filename(&self.entry.filename)
    }
}

/// Every task outcome of one batch run, in completion order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<TaskOutcome>,
}

impl BatchReport {
    /// Number of entries the batch ran.
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Entries fetched fresh from the network.
    pub fn downloaded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.result, Ok(DownloadStatus::Downloaded { .. })))
            .count()
    }

    /// Entries skipped because the artifact already existed.
    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.result, Ok(DownloadStatus::AlreadyExists)))
            .count()
    }

    /// Entries that failed.
    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_err()).count()
    }

    /// The failed outcomes, in completion order.
    pub fn failures(&self) -> impl Iterator<Item = &TaskOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }
}
