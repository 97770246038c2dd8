use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Global configuration loaded from `~/.config/geodl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeodlConfig {
    /// Maximum number of artifact downloads in flight at once.
    pub max_concurrent_downloads: usize,
    /// Endpoint probed before a fetch run; the run is skipped when it is unreachable.
    pub probe_url: String,
    /// Total timeout for the connectivity probe, in seconds.
    pub probe_timeout_secs: u64,
    /// Optional default artifact directory. The `--output-dir` flag takes precedence.
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
}

impl Default for GeodlConfig {
    fn default() -> Self {
        Self {
            max_concurrent_downloads: 4,
            probe_url: "https://wms.ign.gob.ar".to_string(),
            probe_timeout_secs: 5,
            download_dir: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("geodl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<GeodlConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = GeodlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: GeodlConfig = toml::from_str(&data)?;
    Ok(cfg)
}
