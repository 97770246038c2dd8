//! `geodl fetch` – probe the endpoint, then download every manifest entry.

use anyhow::{Context, Result};
use geodl_core::batch::{self, BatchOptions, TaskOutcome};
use geodl_core::config::GeodlConfig;
use geodl_core::downloader::DownloadStatus;
use geodl_core::manifest;
use geodl_core::probe;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::resolve_output_dir;

pub async fn run_fetch(
    cfg: &GeodlConfig,
    manifest_path: &Path,
    output_dir: Option<PathBuf>,
    jobs: Option<usize>,
) -> Result<()> {
    let probe_url = cfg.probe_url.clone();
    let timeout = Duration::from_secs(cfg.probe_timeout_secs);
    let probe_result = tokio::task::spawn_blocking({
        let probe_url = probe_url.clone();
        move || probe::probe_endpoint(&probe_url, timeout)
    })
    .await
    .context("probe task join")?;

    // An unreachable endpoint skips the whole run; it is not an error.
    if let Err(err) = probe_result {
        tracing::warn!("connectivity probe failed: {:#}", err);
        eprintln!("cannot reach {}: {:#}", probe_url, err);
        eprintln!("skipping downloads.");
        return Ok(());
    }

    let entries = manifest::parse_manifest(manifest_path)?;
    if entries.is_empty() {
        println!("Manifest {} has no entries.", manifest_path.display());
        return Ok(());
    }

    let opts = BatchOptions {
        output_dir: resolve_output_dir(output_dir, cfg),
        max_concurrent: jobs.unwrap_or(cfg.max_concurrent_downloads),
    };
    println!(
        "Fetching {} file(s) into {} ({} at a time)",
        entries.len(),
        opts.output_dir.display(),
        opts.max_concurrent.max(1)
    );

    let (progress_tx, mut progress_rx) = tokio::sync::mpsc::channel::<TaskOutcome>(16);
    let progress_handle = tokio::spawn(async move {
        while let Some(outcome) = progress_rx.recv().await {
            let name = outcome.artifact_filename();
            match &outcome.result {
                Ok(DownloadStatus::Downloaded { bytes }) => {
                    println!("  downloaded {} ({} bytes)", name, bytes);
                }
                Ok(DownloadStatus::AlreadyExists) => {
                    println!("  {} already exists, skipped", name);
                }
                Err(err) => {
                    println!("  {} failed: {} ({})", name, err, outcome.entry.url);
                }
            }
        }
    });

    let report = batch::run_batch(entries, &opts, Some(progress_tx)).await?;
    let _ = progress_handle.await;

    println!(
        "{} downloaded, {} skipped, {} failed ({} total)",
        report.downloaded(),
        report.skipped(),
        report.failed(),
        report.total()
    );
    if report.failed() > 0 {
        tracing::warn!("batch finished with {} failure(s)", report.failed());
    } else {
        tracing::info!("batch completed: {} file(s)", report.total());
    }
    Ok(())
}
