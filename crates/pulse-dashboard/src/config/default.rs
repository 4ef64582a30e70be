//! Default configuration template and file creation utilities.
//!
//! Provides a well-commented TOML template that matches `Config::default()`
//! and functions to write it to the XDG config path or an explicit path.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::error::ConfigError;
use crate::config::xdg;

// ---------------------------------------------------------------------------
// Default TOML template
// ---------------------------------------------------------------------------

/// A well-commented TOML template with all default values.
///
/// Every value here must match `Config::default()` from `schema.rs`.
/// Sections: `[dashboard]`, `[weather]`, `[news]`, `[finance]`, `[feed]`,
/// `[tui]`, `[log]`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Pulse Dashboard Configuration
#
# This file was auto-generated with default values.
# All values shown below are the built-in defaults.
# Modify options to customize your dashboard.
#
# Location: $XDG_CONFIG_HOME/pulse-dashboard/config.toml

# ==============================================================================
# Dashboard
# ==============================================================================

[dashboard]

# Widgets in render order. Press `c` in the dashboard to rearrange them.
# Available widgets: "weather", "news", "finance", "realtime"
# Unknown ids are ignored when rendering; repeated ids are dropped.
widgets = ["weather", "news", "finance"]

# Theme preference.
# Options: "light", "dark", "system"
theme = "system"

# Show the navigation sidebar on startup.
sidebar_open = false

# ==============================================================================
# Weather
# ==============================================================================

[weather]

# Location to forecast. Empty uses the default location.
location = ""

# Measurement system. Options: "metric", "imperial"
unit = "metric"

# Bookmarked locations.
saved_locations = []

# ==============================================================================
# News
# ==============================================================================

[news]

# Headline category.
# Options: "technology", "business", "sports", "health", "entertainment"
category = "technology"

# ==============================================================================
# Finance
# ==============================================================================

[finance]

# Symbol shown in the quote and chart.
symbol = "AAPL"

# Chart range. Options: "1D", "1W", "1M", "3M", "1Y", "5Y"
time_range = "1D"

# Watched symbols.
watchlist = ["AAPL", "MSFT", "GOOGL", "AMZN", "META"]

# ==============================================================================
# Real-time feed
# ==============================================================================

[feed]

# Delay before the simulated connection opens.
# Examples: "500ms", "1s"
connect_delay = "1s"

# Time between samples.
interval = "2s"

# Points kept in the chart window.
window = 20

# Notifications kept, newest first.
notifications = 10

# ==============================================================================
# Terminal UI
# ==============================================================================

[tui]

# Render tick rate as a human-readable duration.
# Lower values = smoother but more CPU.
# Examples: "250ms", "500ms", "1s"
tick_rate = "250ms"

# ==============================================================================
# Logging
# ==============================================================================

[log]

# Logging verbosity when PULSE_LOG is not set.
# Options: "error", "warn", "info", "debug", "trace"
level = "info"

# Path to log file. Empty string means no log output while the dashboard is
# open and stderr for other commands.
# Examples: "~/.local/state/pulse-dashboard/pulse.log"
file = ""
"#;

// ---------------------------------------------------------------------------
// File creation functions
// ---------------------------------------------------------------------------

/// Creates (or force-overwrites) the default config file at the XDG path.
///
/// See [`create_default_config_at`].
pub fn create_default_config(force: bool) -> Result<PathBuf, ConfigError> {
    let path = xdg::config_path();
    create_default_config_at(&path, force)?;
    Ok(path)
}

/// Creates (or force-overwrites) the default config file at `path`.
///
/// - If the file exists and `force` is `false`, returns `ConfigError::AlreadyExists`.
/// - If the file exists and `force` is `true`, backs it up to `.toml.backup` first.
pub fn create_default_config_at(path: &Path, force: bool) -> Result<(), ConfigError> {
    if path.exists() {
        if !force {
            return Err(ConfigError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }
        let backup_path = path.with_extension("toml.backup");
        fs::rename(path, &backup_path).map_err(|e| ConfigError::WriteError {
            path: backup_path.clone(),
            source: e,
        })?;
        tracing::info!("Backed up existing config to {}", backup_path.display());
    }

    write_default_config(path)?;
    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}

/// Writes the default template to `path`, creating parent dirs and setting 0600 permissions.
fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let write_error = |e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    };

    xdg::ensure_parent_dir(path).map_err(write_error)?;
    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(write_error)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(write_error)?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
