//! Logging init: file under XDG state dir, or graceful fallback to stderr.
//!
//! Stdout carries extraction output, so no sink here ever writes there.

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info,phishscan=debug,phishscan_core=debug";

fn env_filter(filter_override: Option<&str>) -> EnvFilter {
    match filter_override {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    }
}

/// Path of the log file: `~/.local/state/phishscan/phishscan.log`.
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("phishscan")?;
    Ok(xdg_dirs.get_state_home().join("phishscan.log"))
}

/// Structured logging to the XDG state log file. Errs when the file or the
/// subscriber cannot be set up.
fn init_logging(filter_override: Option<&str>) -> Result<()> {
    let log_file_path = log_file_path()?;
    if let Some(dir) = log_file_path.parent() {
        fs::create_dir_all(dir)?;
    }

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(filter_override))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing subscriber: {}", e))?;

    tracing::info!("phishscan logging initialized at {}", log_file_path.display());
    Ok(())
}

fn init_logging_stderr(filter_override: Option<&str>) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(filter_override))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}

/// File logging with stderr fallback.
///
/// `filter_override` (e.g. from `--log-filter`) replaces both `RUST_LOG` and
/// the default directives.
pub fn init(filter_override: Option<&str>) {
    if let Err(e) = init_logging(filter_override) {
        init_logging_stderr(filter_override);
        tracing::warn!("log file unavailable ({:#}); logging to stderr", e);
    }
}
