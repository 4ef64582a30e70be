//! Pulse Dashboard library
//!
//! This crate provides the state machinery behind the `pulse` terminal
//! dashboard: preference slices, the store that aggregates them, the layout
//! editor that reorders widgets, the widget registry, the demo data caches
//! and the simulated real-time feed.
//!
//! All state transitions run on the UI loop. Background tasks (data fetches,
//! the feed timer) only send messages back to that loop, which applies them
//! through [`store::Store::dispatch`].

use std::fmt;
use std::str::FromStr;

/// Configuration loading, schema and XDG path resolution.
pub mod config;

/// Simulated real-time feed with bounded sliding window and notification ring.
pub mod feed;

/// Dashboard layout and the layout editor state machine.
pub mod layout;

/// Tracing subscriber initialization.
pub mod logging;

/// Remote data caches and demo data sources.
pub mod query;

/// Preference slices and their pure reducers.
pub mod slices;

/// Store aggregating slices and query caches behind a single dispatch.
pub mod store;

/// TUI module providing the terminal user interface for the dashboard.
pub mod tui;

/// Widget system: registry and renderable dashboard widgets.
pub mod widgets;

/// Opaque token identifying a widget kind (`"weather"`, `"news"`, ...).
///
/// Ids are free-form so that layouts loaded from configuration can name
/// widgets this build does not know about. Such ids resolve to nothing
/// rendered (see [`widgets::WidgetRegistry::resolve`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct WidgetId(String);

impl WidgetId {
    /// Creates a widget id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WidgetId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for WidgetId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Error type for parsing preference enums from strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: {value}")]
pub struct ParseEnumError {
    /// Name of the enum being parsed (e.g. `"theme"`).
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl ParseEnumError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Color theme preference.
///
/// Only the preference is tracked; palette switching is left to the
/// presentation layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light background.
    Light,
    /// Dark background.
    Dark,
    /// Follow the terminal / system setting.
    #[default]
    System,
}

impl Theme {
    /// Returns the next theme in the `light -> dark -> system` cycle.
    pub fn next(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::System,
            Theme::System => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Theme {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "system" => Ok(Theme::System),
            _ => Err(ParseEnumError::new("theme", s)),
        }
    }
}

/// Measurement system for weather readings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Celsius, km/h.
    #[default]
    Metric,
    /// Fahrenheit, mph.
    Imperial,
}

impl Unit {
    /// Returns the other unit.
    pub fn toggled(self) -> Self {
        match self {
            Unit::Metric => Unit::Imperial,
            Unit::Imperial => Unit::Metric,
        }
    }

    /// Temperature suffix shown next to readings.
    pub fn temperature_suffix(self) -> &'static str {
        match self {
            Unit::Metric => "°C",
            Unit::Imperial => "°F",
        }
    }

    /// Wind speed suffix shown next to readings.
    pub fn speed_suffix(self) -> &'static str {
        match self {
            Unit::Metric => "km/h",
            Unit::Imperial => "mph",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Unit::Metric => "metric",
            Unit::Imperial => "imperial",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Unit {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metric" => Ok(Unit::Metric),
            "imperial" => Ok(Unit::Imperial),
            _ => Err(ParseEnumError::new("unit", s)),
        }
    }
}

/// Chart time range for the finance widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum TimeRange {
    /// One day, intraday samples.
    #[default]
    #[serde(rename = "1D")]
    OneDay,
    /// One week, daily samples.
    #[serde(rename = "1W")]
    OneWeek,
    /// One month, daily samples.
    #[serde(rename = "1M")]
    OneMonth,
    /// Three months, weekly samples.
    #[serde(rename = "3M")]
    ThreeMonths,
    /// One year, monthly samples.
    #[serde(rename = "1Y")]
    OneYear,
    /// Five years, yearly samples.
    #[serde(rename = "5Y")]
    FiveYears,
}

impl TimeRange {
    /// All ranges in display order.
    pub const ALL: [TimeRange; 6] = [
        TimeRange::OneDay,
        TimeRange::OneWeek,
        TimeRange::OneMonth,
        TimeRange::ThreeMonths,
        TimeRange::OneYear,
        TimeRange::FiveYears,
    ];

    /// Wire label (`"1D"`, `"1W"`, ...).
    pub fn label(self) -> &'static str {
        match self {
            TimeRange::OneDay => "1D",
            TimeRange::OneWeek => "1W",
            TimeRange::OneMonth => "1M",
            TimeRange::ThreeMonths => "3M",
            TimeRange::OneYear => "1Y",
            TimeRange::FiveYears => "5Y",
        }
    }

    /// Next longer range, saturating at five years.
    pub fn next(self) -> Self {
        let idx = self.index();
        Self::ALL[(idx + 1).min(Self::ALL.len() - 1)]
    }

    /// Next shorter range, saturating at one day.
    pub fn previous(self) -> Self {
        Self::ALL[self.index().saturating_sub(1)]
    }

    fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|r| *r == self)
            .unwrap_or_default()
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeRange {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .into_iter()
            .find(|r| r.label() == upper)
            .ok_or_else(|| ParseEnumError::new("time range", s))
    }
}

#[cfg(test)]
mod tests;
