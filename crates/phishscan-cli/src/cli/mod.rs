//! CLI for the phishscan URL feature extractor.

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use phishscan_core::config::{self, ScanConfig};
use std::path::{Path, PathBuf};

use commands::{run_batch, run_completions, run_extract, run_features};

/// Top-level CLI for phishscan.
#[derive(Debug, Parser)]
#[command(name = "phishscan")]
#[command(about = "phishscan: phishing-detection feature vectors for URLs", long_about = None)]
pub struct Cli {
    /// Load configuration from this file instead of ~/.config/phishscan/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Tracing filter directives (e.g. "debug" or "warn,phishscan_core=trace"); overrides RUST_LOG.
    #[arg(long, global = true, value_name = "DIRECTIVES")]
    pub log_filter: Option<String>,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Output encoding for feature vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Extract the 30-feature vector for one URL.
    Extract {
        /// URL to analyse.
        url: String,
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
        /// Also report which features fell back and how long extraction took.
        #[arg(long, short)]
        verbose: bool,
    },

    /// Extract vectors for every URL in a file (one per line).
    Batch {
        /// File of URLs; blank lines and lines starting with '#' are skipped.
        path: PathBuf,
        #[arg(long, value_enum, default_value = "csv")]
        format: OutputFormat,
        /// Concurrent extractions (overrides batch_parallelism from config).
        #[arg(long, value_name = "N")]
        jobs: Option<usize>,
    },

    /// List feature names in model order.
    Features,

    /// Print a shell completion script.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            CliCommand::Features => run_features(),
            CliCommand::Completions { shell } => run_completions(shell),
            CliCommand::Extract {
                url,
                format,
                verbose,
            } => {
                let cfg = load_config(self.config.as_deref())?;
                run_extract(cfg, &url, format, verbose).await?;
            }
            CliCommand::Batch { path, format, jobs } => {
                let mut cfg = load_config(self.config.as_deref())?;
                if let Some(n) = jobs {
                    cfg.batch_parallelism = n.max(1);
                }
                run_batch(cfg, &path, format).await?;
            }
        }

        Ok(())
    }
}

fn load_config(explicit: Option<&Path>) -> Result<ScanConfig> {
    let cfg = match explicit {
        Some(path) => config::load_from_path(path)?,
        None => config::load_or_init()?,
    };
    tracing::debug!("loaded config: {:?}", cfg);
    Ok(cfg)
}

#[cfg(test)]
mod tests;
