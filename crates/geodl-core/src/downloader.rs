//! Streaming HTTP GET for a single artifact.
//!
//! The body is written to a `.part` temp file as chunks arrive, then renamed
//! into place so a final artifact is never observed half-written.

use anyhow::Context;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;

use crate::artifact;
use crate::manifest::ManifestEntry;
use crate::storage::StorageWriter;

// Temp names carry a sequence number so two entries resolving to the same
// artifact never share a temp file; the last finalize wins via rename.
static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Why a single artifact download failed. Carried per task so one bad entry
/// never aborts its siblings.
#[derive(Debug, Clone, Error)]
pub enum DownloadError {
    /// curl-level failure: DNS, connect, TLS, or an aborted transfer.
    #[error(transparent)]
    Transport(#[from] curl::Error),
    /// The server answered with a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Creating, writing, or finalizing the artifact file failed.
    #[error("storage: {0}")]
    Storage(String),
}

impl DownloadError {
    fn storage(err: anyhow::Error) -> Self {
        DownloadError::Storage(format!("{err:#}"))
    }
}

/// How a completed task ended: fetched fresh bytes, or found the artifact
/// already on disk and left it alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadStatus {
    Downloaded { bytes: u64 },
    AlreadyExists,
}

/// Downloads one manifest entry into `output_dir`.
///
/// The destination name comes from [`artifact::artifact_filename`]; if that
/// path already exists the entry is skipped without any network traffic.
/// Runs in the current thread; call from `spawn_blocking` if used from
/// async code.
pub fn download_artifact(
    entry: &ManifestEntry,
    output_dir: &Path,
) -> Result<DownloadStatus, DownloadError> {
    let filename = artifact::artifact_filename(&entry.filename);
    let final_path = output_dir.join(&filename);

    if final_path.exists() {
        tracing::debug!("{} already present, skipping", final_path.display());
        return Ok(DownloadStatus::AlreadyExists);
    }

    fs::create_dir_all(output_dir)
        .with_context(|| format!("create output directory {}", output_dir.display()))
        .map_err(DownloadError::storage)?;

    let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
    let temp_path = output_dir.join(format!("{filename}.{seq}.part"));
    let storage = StorageWriter::create(&temp_path).map_err(DownloadError::storage)?;

    let bytes = match stream_get(&entry.url, &storage) {
        Ok(n) => n,
        Err(err) => {
            remove_temp(&temp_path);
            return Err(err);
        }
    };

    if let Err(err) = storage.sync() {
        remove_temp(&temp_path);
        return Err(DownloadError::storage(err));
    }
    if let Err(err) = storage.finalize(&final_path) {
        remove_temp(&temp_path);
        return Err(DownloadError::storage(err));
    }

    tracing::info!("downloaded {} ({} bytes)", final_path.display(), bytes);
    Ok(DownloadStatus::Downloaded { bytes })
}

/// Performs the GET, writing the body sequentially to `storage`.
/// Returns the number of bytes written.
fn stream_get(url: &str, storage: &StorageWriter) -> Result<u64, DownloadError> {
    let offset = Arc::new(AtomicU64::new(0));
    let offset_cb = Arc::clone(&offset);
    let storage = storage.clone();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(move |data| {
            let off = offset_cb.fetch_add(data.len() as u64, Ordering::Relaxed);
            match storage.write_at(off, data) {
                Ok(()) => Ok(data.len()),
                Err(e) => {
                    tracing::warn!("artifact write failed: {}", e);
                    Ok(0) // abort transfer
                }
            }
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    if code < 200 || code >= 300 {
        return Err(DownloadError::Http(code));
    }

    Ok(offset.load(Ordering::Relaxed))
}

fn remove_temp(temp_path: &Path) {
    if let Err(err) = fs::remove_file(temp_path) {
        tracing::warn!(
            "could not remove temp file {}: {}",
            temp_path.display(),
            err
        );
    }
}
