//! Manifest parsing: a plain text file of alternating filename / URL lines.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// One (filename, URL) pair taken from the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Artifact name as written in the manifest (extension optional).
    pub filename: String,
    /// Direct HTTP/HTTPS URL serving the GeoJSON body.
    pub url: String,
}

/// Parse a manifest file into entries.
///
/// Lines are trimmed and blank lines are skipped before pairing, so a blank
/// line never shifts a URL into a filename slot. The first line of each pair
/// is the filename, the second the URL. A manifest with an odd number of
/// non-empty lines is rejected, naming the orphaned filename.
pub fn parse_manifest(path: &Path) -> Result<Vec<ManifestEntry>> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read manifest {}", path.display()))?;
    parse_lines(&data).with_context(|| format!("parse manifest {}", path.display()))
}

fn parse_lines(data: &str) -> Result<Vec<ManifestEntry>> {
    let lines: Vec<&str> = data
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.len() % 2 != 0 {
        let orphan = lines.last().copied().unwrap_or_default();
        anyhow::bail!(
            "odd number of non-empty lines ({}); filename {:?} has no URL",
            lines.len(),
            orphan
        );
    }

    Ok(lines
        .chunks(2)
        .map(|pair| ManifestEntry {
            filename: pair[0].to_string(),
            url: pair[1].to_string(),
        })
        .collect())
}
