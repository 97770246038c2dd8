//! CLI command handlers. Each command is in its own file for clarity.

mod completions;
mod fetch;
mod probe;
mod status;

pub use completions::run_completions;
pub use fetch::run_fetch;
pub use probe::run_probe;
pub use status::run_status;

use geodl_core::config::GeodlConfig;
use std::path::PathBuf;

/// Artifact directory used when neither the flag nor the config sets one.
pub(crate) const DEFAULT_OUTPUT_DIR: &str = "data/geojson";

/// Resolves the artifact directory: `--output-dir` flag, then config, then
/// the built-in default.
pub(crate) fn resolve_output_dir(flag: Option<PathBuf>, cfg: &GeodlConfig) -> PathBuf {
    flag.or_else(|| cfg.download_dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
}
