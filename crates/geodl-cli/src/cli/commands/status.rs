//! `geodl status` – show which manifest artifacts are present on disk.

use anyhow::Result;
use geodl_core::artifact;
use geodl_core::config::GeodlConfig;
use geodl_core::manifest;
use std::path::{Path, PathBuf};

use super::resolve_output_dir;

pub fn run_status(
    cfg: &GeodlConfig,
    manifest_path: &Path,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    let entries = manifest::parse_manifest(manifest_path)?;
    if entries.is_empty() {
        println!("Manifest {} has no entries.", manifest_path.display());
        return Ok(());
    }

    let dir = resolve_output_dir(output_dir, cfg);
    println!("{:<34} {:<8} {:<10} {}", "ARTIFACT", "STATE", "SIZE", "URL");
    for entry in &entries {
        let path = artifact::artifact_path(&dir, &entry.filename);
        let (state, size_str) = match std::fs::metadata(&path) {
            Ok(meta) => ("present", format!("{}", meta.len())),
            Err(_) => ("missing", "-".to_string()),
        };
        println!(
            "{:<34} {:<8} {:<10} {}",
            artifact::artifact_filename(&entry.filename),
            state,
            size_str,
            entry.url
        );
    }
    Ok(())
}
