//! Tracing setup.
//!
//! The terminal is in raw mode while the app runs, so log lines go to
//! `<data_dir>/wordgate.log` instead of stderr. `WORDGATE_LOG` takes the usual
//! `EnvFilter` directives (e.g. "debug" or "info,wordgate::session=debug").

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "wordgate.log";
pub const LOG_ENV: &str = "WORDGATE_LOG";

pub fn init_tracing(data_dir: &Path) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join(LOG_FILE))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;
    Ok(())
}
