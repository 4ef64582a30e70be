//! Widget system for the pulse dashboard.
//!
//! This module defines the `Widget` trait that all dashboard panels
//! implement, and the `WidgetRegistry` that turns a [`DashboardLayout`]
//! into the panels to draw.
//!
//! # Architecture
//!
//! Widgets are stateless renderers. Each one receives a [`WidgetContext`]
//! holding the current store snapshot and feed state, reads whatever cache
//! entries it needs, and draws itself into the inner area of its panel.
//! Widgets never start fetches; the TUI issues queries for the same
//! parameters (see [`weather::request`], [`news::request`],
//! [`finance::quote_request`] and [`finance::series_request`]) before each
//! frame.
//!
//! The registry is keyed by [`WidgetKind`]. A [`WidgetId`] either names a
//! registered kind or is [`Resolution::Unregistered`]; unregistered ids are
//! skipped during resolution without affecting their neighbours.
//!
//! # Example
//!
//! ```
//! use pulse_dashboard::layout::DashboardLayout;
//! use pulse_dashboard::widgets::WidgetRegistry;
//!
//! let registry = WidgetRegistry::new();
//! let layout = DashboardLayout::from_ids(["weather", "globe", "finance"]);
//! let resolved = registry.resolve(&layout);
//! assert_eq!(resolved.len(), 2);
//! assert_eq!(resolved[1].slot, 2);
//! ```

pub mod context;
pub mod finance;
pub mod news;
pub mod realtime;
pub mod weather;

pub use context::WidgetContext;

use crate::layout::DashboardLayout;
use crate::query::QueryResult;
use crate::WidgetId;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use std::collections::HashMap;
use std::fmt;

/// Trait for dashboard widgets.
///
/// Widgets must be thread-safe (`Send + Sync`) so that a registry can be
/// shared across tasks.
pub trait Widget: Send + Sync {
    /// Draws the widget into `area` of `buf`.
    ///
    /// `area` is the inner area of the panel; borders and the title are
    /// drawn by the caller.
    fn render(&self, area: Rect, buf: &mut Buffer, context: &WidgetContext);

    /// Kind this widget renders.
    fn kind(&self) -> WidgetKind;

    /// Panel title.
    fn title(&self) -> &'static str {
        self.kind().title()
    }

    /// Minimum inner height in rows for useful output.
    fn min_height(&self) -> u16;
}

/// Built-in widget kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WidgetKind {
    /// Current conditions and forecast.
    Weather,
    /// Headlines for the selected category.
    News,
    /// Quote, price chart and watchlist.
    Finance,
    /// Live feed chart and notifications.
    Realtime,
}

impl WidgetKind {
    /// Every kind, in registration order.
    pub const ALL: [WidgetKind; 4] = [
        WidgetKind::Weather,
        WidgetKind::News,
        WidgetKind::Finance,
        WidgetKind::Realtime,
    ];

    /// Id used in layouts and configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            WidgetKind::Weather => "weather",
            WidgetKind::News => "news",
            WidgetKind::Finance => "finance",
            WidgetKind::Realtime => "realtime",
        }
    }

    /// Human-readable panel title.
    pub fn title(self) -> &'static str {
        match self {
            WidgetKind::Weather => "Weather",
            WidgetKind::News => "News",
            WidgetKind::Finance => "Finance",
            WidgetKind::Realtime => "Real-time",
        }
    }

    /// Parses a layout id into a kind, if it names one.
    pub fn from_id(id: &WidgetId) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == id.as_str())
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of looking up a [`WidgetId`] in a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The id names a kind with a registered factory.
    Registered(WidgetKind),
    /// Nothing is rendered for the id.
    Unregistered,
}

/// A widget resolved from one layout slot.
pub struct ResolvedWidget {
    /// Index of the id in the layout it was resolved from.
    pub slot: usize,
    /// Id that produced the widget.
    pub id: WidgetId,
    /// The renderable widget.
    pub widget: Box<dyn Widget>,
}

impl fmt::Debug for ResolvedWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedWidget")
            .field("slot", &self.slot)
            .field("id", &self.id)
            .field("kind", &self.widget.kind())
            .finish()
    }
}

/// Factory function type for creating widget instances.
pub type WidgetFactory = fn() -> Box<dyn Widget>;

/// Registry mapping widget kinds to factory functions.
///
/// # Example
///
/// ```
/// use pulse_dashboard::widgets::{Resolution, WidgetKind, WidgetRegistry};
/// use pulse_dashboard::WidgetId;
///
/// let registry = WidgetRegistry::new();
/// assert_eq!(
///     registry.lookup(&WidgetId::from("news")),
///     Resolution::Registered(WidgetKind::News)
/// );
/// assert_eq!(registry.lookup(&WidgetId::from("globe")), Resolution::Unregistered);
/// ```
pub struct WidgetRegistry {
    factories: HashMap<WidgetKind, WidgetFactory>,
}

impl WidgetRegistry {
    /// Creates a registry with every built-in kind registered.
    pub fn new() -> Self {
        let mut reg = Self::empty();
        reg.register(WidgetKind::Weather, weather::create);
        reg.register(WidgetKind::News, news::create);
        reg.register(WidgetKind::Finance, finance::create);
        reg.register(WidgetKind::Realtime, realtime::create);
        reg
    }

    /// Creates a registry with nothing registered.
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a widget factory for `kind`.
    ///
    /// Overwrites any existing factory for the same kind.
    pub fn register(&mut self, kind: WidgetKind, factory: WidgetFactory) {
        self.factories.insert(kind, factory);
    }

    /// Create a widget instance for `kind`.
    ///
    /// Returns `None` if no factory is registered.
    pub fn create(&self, kind: WidgetKind) -> Option<Box<dyn Widget>> {
        self.factories.get(&kind).map(|f| f())
    }

    /// Looks up `id`.
    pub fn lookup(&self, id: &WidgetId) -> Resolution {
        match WidgetKind::from_id(id) {
            Some(kind) if self.factories.contains_key(&kind) => Resolution::Registered(kind),
            _ => Resolution::Unregistered,
        }
    }

    /// Widgets for every registered id in `layout`, in layout order.
    ///
    /// Unregistered ids are skipped.
    pub fn resolve(&self, layout: &DashboardLayout) -> Vec<ResolvedWidget> {
        layout
            .ids()
            .iter()
            .enumerate()
            .filter_map(|(slot, id)| match self.lookup(id) {
                Resolution::Registered(kind) => {
                    self.create(kind).map(|widget| ResolvedWidget {
                        slot,
                        id: id.clone(),
                        widget,
                    })
                }
                Resolution::Unregistered => {
                    tracing::debug!("skipping unregistered widget id '{}'", id);
                    None
                }
            })
            .collect()
    }

    /// Registered kinds, sorted.
    pub fn kinds(&self) -> Vec<WidgetKind> {
        let mut kinds: Vec<WidgetKind> = self.factories.keys().copied().collect();
        kinds.sort();
        kinds
    }
}

impl Default for WidgetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WidgetRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

/// Writes `line` into row `y` of `area`, clipped to the area's width.
///
/// Does nothing when `y` falls outside `area`.
pub(crate) fn put_line(buf: &mut Buffer, area: Rect, y: u16, line: &Line<'_>) {
    if y >= area.height {
        return;
    }
    buf.set_line(area.x, area.y + y, line, area.width);
}

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// One-row trace of `values`, scaled between their minimum and maximum.
///
/// A flat series renders at the lowest level.
pub(crate) fn sparkline(values: &[f64]) -> String {
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        });
    let span = max - min;
    values
        .iter()
        .map(|v| {
            let level = if span > 0.0 {
                ((v - min) / span * 7.0).round() as usize
            } else {
                0
            };
            SPARK_LEVELS[level.min(SPARK_LEVELS.len() - 1)]
        })
        .collect()
}

/// Placeholder line for a query without data, or `None` once data arrived.
pub(crate) fn pending_line<T>(result: &QueryResult<T>, noun: &str) -> Option<Line<'static>> {
    match result {
        QueryResult::Data(_) => None,
        QueryResult::Loading => Some(Line::styled(
            format!("Loading {noun}..."),
            Style::default().fg(Color::DarkGray),
        )),
        QueryResult::Skipped => Some(Line::styled(
            format!("No {noun} requested"),
            Style::default().fg(Color::DarkGray),
        )),
        QueryResult::Error(e) => Some(Line::styled(
            format!("Error: {e}"),
            Style::default().fg(Color::Red),
        )),
    }
}
