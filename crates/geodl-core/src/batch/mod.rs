//! Run manifest entries concurrently with a bounded pool.
//!
//! Keeps up to `max_concurrent` downloads running at once; when one
//! finishes, the next queued entry is started until the queue is empty.

mod report;

pub use report::{BatchReport, TaskOutcome};

use anyhow::{Context, Result};
use std::collections::VecDeque;
use std::path::PathBuf;

use crate::downloader;
use crate::manifest::ManifestEntry;

/// Settings for one batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Directory artifacts are written into.
    pub output_dir: PathBuf,
    /// Maximum downloads in flight at once (clamped to at least 1).
    pub max_concurrent: usize,
}

/// Runs all entries with up to `max_concurrent` downloads in flight at once.
///
/// Every entry produces exactly one [`TaskOutcome`] in the returned report;
/// a failed entry is recorded and never aborts its siblings. Outcomes are
/// also sent to `progress_tx` as they complete, so a caller can report
/// progress live. Returns Err only when a worker task itself dies.
pub async fn run_batch(
    entries: Vec<ManifestEntry>,
    opts: &BatchOptions,
    progress_tx: Option<tokio::sync::mpsc::Sender<TaskOutcome>>,
) -> Result<BatchReport> {
    let max_concurrent = opts.max_concurrent.max(1);
    let mut queue: VecDeque<ManifestEntry> = entries.into();
    let mut report = BatchReport::default();
    let mut join_set = tokio::task::JoinSet::new();

    loop {
        while join_set.len() < max_concurrent {
            let Some(entry) = queue.pop_front() else {
                break;
            };
            let output_dir = opts.output_dir.clone();
            join_set.spawn(async move {
                let task_entry = entry.clone();
                let result = tokio::task::spawn_blocking(move || {
                    downloader::download_artifact(&task_entry, &output_dir)
                })
                .await
                .context("download task join")?;
                Ok::<TaskOutcome, anyhow::Error>(TaskOutcome { entry, result })
            });
        }

        if join_set.is_empty() {
            break;
        }

        let Some(res) = join_set.join_next().await else {
            break;
        };
        let outcome = res.map_err(|e| anyhow::anyhow!("download task join: {}", e))??;
        if let Some(tx) = &progress_tx {
            let _ = tx.send(outcome.clone()).await;
        }
        report.outcomes.push(outcome);
    }

    Ok(report)
}
