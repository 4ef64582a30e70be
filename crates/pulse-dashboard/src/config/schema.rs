//! TOML configuration schema types for the Pulse dashboard.
//!
//! All structs derive `Deserialize` and `Serialize` with sensible defaults via
//! `#[serde(default)]`, so a partial file only overrides what it names.
//!
//! Duration fields use human-readable strings (e.g. `"2s"`, `"250ms"`)
//! parsed by the `humantime` crate through [`parse_duration`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::layout::DEFAULT_WIDGETS;
use crate::slices::finance::DEFAULT_WATCHLIST;
use crate::slices::news::DEFAULT_CATEGORY;
use crate::{Theme, TimeRange, Unit};

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration encompassing all sections.
///
/// Corresponds to the full TOML file structure:
/// ```toml
/// [dashboard]
/// [weather]
/// [news]
/// [finance]
/// [feed]
/// [tui]
/// [log]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Initial layout and UI preferences.
    pub dashboard: DashboardConfig,
    /// Initial weather preferences.
    pub weather: WeatherConfig,
    /// Initial news preferences.
    pub news: NewsConfig,
    /// Initial finance preferences.
    pub finance: FinanceConfig,
    /// Real-time feed timing and buffer sizes.
    pub feed: FeedConfig,
    /// Terminal UI settings.
    pub tui: TuiConfig,
    /// Logging settings.
    pub log: LogConfig,
}

impl Config {
    /// Checks values that TOML typing alone cannot.
    ///
    /// Durations must parse and the feed buffers must hold at least one item.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.feed.connect_delay()?;
        self.feed.interval()?;
        self.tui.tick_rate()?;
        if self.feed.window == 0 {
            return Err(ConfigError::InvalidValue {
                field: "feed.window",
                message: "must be at least 1".to_string(),
            });
        }
        if self.feed.notifications == 0 {
            return Err(ConfigError::InvalidValue {
                field: "feed.notifications",
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Parses a human-readable duration, naming `field` on failure.
pub fn parse_duration(field: &'static str, value: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(value).map_err(|e| ConfigError::InvalidDuration {
        field,
        value: value.to_string(),
        message: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Dashboard layout and UI preferences at startup.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    /// Widget ids in render order. Unknown ids are kept but not rendered;
    /// repeated ids are dropped.
    pub widgets: Vec<String>,
    /// Theme preference.
    pub theme: Theme,
    /// Whether the sidebar starts open.
    pub sidebar_open: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            widgets: DEFAULT_WIDGETS.iter().map(|s| s.to_string()).collect(),
            theme: Theme::System,
            sidebar_open: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Weather / News / Finance
// ---------------------------------------------------------------------------

/// Weather preferences at startup.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct WeatherConfig {
    /// Location to forecast. Empty means the source's fallback location.
    pub location: String,
    /// Measurement system.
    pub unit: Unit,
    /// Bookmarked locations.
    pub saved_locations: Vec<String>,
}

/// News preferences at startup.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct NewsConfig {
    /// Headline category.
    pub category: String,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            category: DEFAULT_CATEGORY.to_string(),
        }
    }
}

/// Finance preferences at startup.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct FinanceConfig {
    /// Focused symbol.
    pub symbol: String,
    /// Chart range (`"1D"`, `"1W"`, `"1M"`, `"3M"`, `"1Y"`, `"5Y"`).
    pub time_range: TimeRange,
    /// Watched symbols. Repeated symbols are dropped.
    pub watchlist: Vec<String>,
}

impl Default for FinanceConfig {
    fn default() -> Self {
        Self {
            symbol: "AAPL".to_string(),
            time_range: TimeRange::OneDay,
            watchlist: DEFAULT_WATCHLIST.iter().map(|s| s.to_string()).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Feed
// ---------------------------------------------------------------------------

/// Real-time feed configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct FeedConfig {
    /// Delay before the simulated connection opens (e.g. `"1s"`).
    pub connect_delay: String,
    /// Time between samples (e.g. `"2s"`).
    pub interval: String,
    /// Points kept in the sliding window.
    pub window: usize,
    /// Notifications kept in the ring.
    pub notifications: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            connect_delay: "1s".to_string(),
            interval: "2s".to_string(),
            window: 20,
            notifications: 10,
        }
    }
}

impl FeedConfig {
    /// Parsed `connect_delay`.
    pub fn connect_delay(&self) -> Result<Duration, ConfigError> {
        parse_duration("feed.connect_delay", &self.connect_delay)
    }

    /// Parsed `interval`.
    pub fn interval(&self) -> Result<Duration, ConfigError> {
        parse_duration("feed.interval", &self.interval)
    }
}

// ---------------------------------------------------------------------------
// TUI
// ---------------------------------------------------------------------------

/// Terminal UI configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TuiConfig {
    /// Render tick rate as a human-readable duration (e.g. `"250ms"`).
    pub tick_rate: String,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate: "250ms".to_string(),
        }
    }
}

impl TuiConfig {
    /// Parsed `tick_rate`.
    pub fn tick_rate(&self) -> Result<Duration, ConfigError> {
        parse_duration("tui.tick_rate", &self.tick_rate)
    }
}

// ---------------------------------------------------------------------------
// Log
// ---------------------------------------------------------------------------

/// Logging configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Verbosity when `PULSE_LOG` is unset.
    pub level: LogLevel,
    /// Log file path. Empty means no log output while the TUI runs and
    /// stderr for other commands. `~` is expanded.
    pub file: String,
}

/// Log verbosity levels (kebab-case in TOML).
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    Warn,
    /// Informational messages (default).
    #[default]
    Info,
    /// Debug-level detail.
    Debug,
    /// Full trace output.
    Trace,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
