//! `geodl probe` – check whether the download endpoint is reachable.

use anyhow::{Context, Result};
use geodl_core::config::GeodlConfig;
use geodl_core::probe;
use std::time::Duration;

pub async fn run_probe(cfg: &GeodlConfig, url: Option<&str>) -> Result<()> {
    let target = url.unwrap_or(&cfg.probe_url).to_string();
    let timeout = Duration::from_secs(cfg.probe_timeout_secs);

    let result = tokio::task::spawn_blocking({
        let target = target.clone();
        move || probe::probe_endpoint(&target, timeout)
    })
    .await
    .context("probe task join")?;

    match result {
        Ok(()) => println!("{} is reachable.", target),
        Err(err) => println!("{} is unreachable: {:#}", target, err),
    }
    Ok(())
}
