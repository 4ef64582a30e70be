//! Logging initialization for the pulse dashboard.
//!
//! Configures the `tracing` subscriber with level filtering via the
//! `PULSE_LOG` environment variable. Falls back to `log.level` from the
//! configuration when the variable is unset or invalid.
//!
//! The TUI owns the terminal, so while it runs log output goes to
//! `log.file` when one is configured and is discarded otherwise. CLI
//! subcommands log to stderr unless a file is configured.
//!
//! # Usage
//!
//! ```bash
//! # Debug level
//! PULSE_LOG=debug pulse config validate
//!
//! # Module-specific filtering, written to the configured log file
//! PULSE_LOG=pulse_dashboard::query=trace,info pulse tui
//! ```

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::schema::LogConfig;
use crate::config::xdg;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "PULSE_LOG";

/// Where log output goes when no file is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Discard output; the terminal is in use.
    Discard,
    /// Write to stderr.
    Stderr,
}

/// Filter from `PULSE_LOG`, or the configured level.
pub fn filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(config.level.as_directive()))
}

/// Log file from the configuration, with `~` expanded.
pub fn log_path(config: &LogConfig) -> Option<PathBuf> {
    let file = config.file.trim();
    if file.is_empty() {
        None
    } else {
        Some(xdg::expand_tilde(file))
    }
}

/// Initialize the tracing subscriber.
///
/// Returns an error only if the configured log file cannot be opened. A
/// second call leaves the first subscriber in place.
pub fn init(config: &LogConfig, fallback: Fallback) -> std::io::Result<()> {
    let filter = filter(config);
    let builder = fmt().with_env_filter(filter).with_target(false);

    let result = match (log_path(config), fallback) {
        (Some(path), _) => {
            xdg::ensure_parent_dir(&path)?;
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        (None, Fallback::Discard) => builder.with_writer(std::io::sink).try_init(),
        (None, Fallback::Stderr) => builder.with_writer(std::io::stderr).try_init(),
    };

    if let Err(e) = result {
        tracing::debug!("tracing subscriber already installed: {}", e);
    }
    Ok(())
}
