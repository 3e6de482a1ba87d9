//! Logging setup.
//!
//! The terminal binary owns stdout for the game screen, so logs go to a file
//! and only when `RAINDROP_LOG_PATH` is set. The filter comes from `RUST_LOG`
//! (default `info`).

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_PATH_VAR: &str = "RAINDROP_LOG_PATH";

/// Install the global subscriber if `RAINDROP_LOG_PATH` names a file.
///
/// Returns whether logging was enabled.
pub fn init_from_env() -> Result<bool> {
    let Some(path) = std::env::var(LOG_PATH_VAR)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
    else {
        return Ok(false);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {path}"))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing log subscriber: {e}"))?;
    Ok(true)
}
