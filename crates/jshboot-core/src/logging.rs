//! Tracing setup.
//!
//! stdout belongs to the launched program and to `fetch`/`path` output, so
//! events go to `$XDG_STATE_HOME/jshboot/jshboot.log`, or to stderr when the
//! state directory cannot be used.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,jshboot_core=debug,jshboot_cli=debug";

pub const LOG_FILE_NAME: &str = "jshboot.log";

/// `RUST_LOG` if set and valid, otherwise the default filter.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Log file location; creates the state directory.
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("jshboot")?;
    xdg_dirs
        .place_state_file(LOG_FILE_NAME)
        .context("create log directory")
}

/// Append structured logs to the state log file and return its path.
/// On failure the caller falls back to [`init_logging_stderr`].
pub fn init_logging() -> Result<PathBuf> {
    let path = log_file_path()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(path)
}

pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
