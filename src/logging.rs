//! Tracing setup.
//!
//! The terminal UI owns stdout and stderr, so events only go to a log file.
//! `RUST_LOG` takes precedence over the level passed on the command line.
//! The `ansi` feature is off, so the file gets plain text.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{AppError, Result};

/// Install a file-backed subscriber. Without a path nothing is installed and
/// events are dropped.
pub fn init_tracing(log_file: Option<&Path>, level: &str) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| AppError::Logging(format!("cannot open {}: {e}", path.display())))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_target(false)
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))
}
