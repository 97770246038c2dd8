//! Connectivity probe.
//!
//! Uses the curl crate (libcurl) to issue a small GET against a well-known
//! endpoint before a batch run. The body is discarded; only reachability
//! and the response status matter.

use anyhow::{Context, Result};
use std::time::Duration;

/// Performs a GET against `url` and succeeds when the endpoint answers with
/// a status below 400 within `timeout`.
///
/// Follows redirects. Runs in the current thread; call from `spawn_blocking`
/// if used from async code.
pub fn probe_endpoint(url: &str, timeout: Duration) -> Result<()> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url).context("invalid URL")?;
    easy.follow_location(true)?;
    easy.timeout(timeout)?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| Ok(data.len()))?;
        transfer
            .perform()
            .with_context(|| format!("GET {} failed", url))?;
    }

    let code = easy.response_code().context("no response code")?;
    if code >= 400 {
        anyhow::bail!("probe {} returned HTTP {}", url, code);
    }

    Ok(())
}
