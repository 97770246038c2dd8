//! CLI for the geodl batch downloader.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use geodl_core::config;
use std::path::PathBuf;

use commands::{run_completions, run_fetch, run_probe, run_status};

/// Top-level CLI for the geodl batch downloader.
#[derive(Debug, Parser)]
#[command(name = "geodl")]
#[command(about = "geodl: parallel batch downloader for GeoJSON layers", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download every manifest entry that is not already on disk.
    Fetch {
        /// Path to the manifest (alternating filename / URL lines).
        #[arg(default_value = "links.txt")]
        manifest: PathBuf,

        /// Directory artifacts are written into (overrides config).
        #[arg(long, short = 'o', value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Run up to N downloads concurrently (overrides config).
        #[arg(long, value_name = "N")]
        jobs: Option<usize>,
    },

    /// Show which manifest artifacts are present on disk.
    Status {
        /// Path to the manifest (alternating filename / URL lines).
        #[arg(default_value = "links.txt")]
        manifest: PathBuf,

        /// Directory artifacts are checked in (overrides config).
        #[arg(long, short = 'o', value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Check whether the configured endpoint is reachable.
    Probe {
        /// URL to probe instead of the configured one.
        url: Option<String>,
    },

    /// Emit shell completions to stdout.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        // Completions must not touch (or create) the config file.
        if let CliCommand::Completions { shell } = cli.command {
            run_completions(shell);
            return Ok(());
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Fetch {
                manifest,
                output_dir,
                jobs,
            } => run_fetch(&cfg, &manifest, output_dir, jobs).await?,
            CliCommand::Status {
                manifest,
                output_dir,
            } => run_status(&cfg, &manifest, output_dir)?,
            CliCommand::Probe { url } => run_probe(&cfg, url.as_deref()).await?,
            // Handled before config init.
            CliCommand::Completions { .. } => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
