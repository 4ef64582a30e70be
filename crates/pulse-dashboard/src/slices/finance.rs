//! Finance preferences: focused symbol, chart range, watchlist.

use super::UniqueList;
use crate::TimeRange;

/// Symbols on the watchlist of a fresh store.
pub const DEFAULT_WATCHLIST: [&str; 5] = ["AAPL", "MSFT", "GOOGL", "AMZN", "META"];

/// Finance slice state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinancePreferences {
    /// Symbol shown in the quote and chart.
    pub symbol: String,
    /// Range of the price chart.
    pub time_range: TimeRange,
    /// Watched symbols, duplicate-free, in the order they were added.
    pub watchlist: UniqueList<String>,
}

impl Default for FinancePreferences {
    fn default() -> Self {
        Self {
            symbol: "AAPL".to_string(),
            time_range: TimeRange::OneDay,
            watchlist: DEFAULT_WATCHLIST.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Actions accepted by [`reduce`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinanceAction {
    /// Focus a different symbol.
    SetSymbol(String),
    /// Change the chart range.
    SetTimeRange(TimeRange),
    /// Watch a symbol (no-op if already watched).
    AddToWatchlist(String),
    /// Stop watching a symbol (no-op if absent).
    RemoveFromWatchlist(String),
}

/// Applies `action` to `state`, returning the next state.
pub fn reduce(state: &FinancePreferences, action: FinanceAction) -> FinancePreferences {
    let mut next = state.clone();
    match action {
        FinanceAction::SetSymbol(symbol) => next.symbol = symbol,
        FinanceAction::SetTimeRange(range) => next.time_range = range,
        FinanceAction::AddToWatchlist(symbol) => {
            next.watchlist.insert(symbol);
        }
        FinanceAction::RemoveFromWatchlist(symbol) => {
            next.watchlist.remove(&symbol);
        }
    }
    next
}

/// Watchlist symbol next to `state.symbol`, wrapping around.
///
/// A symbol that is not watched steps onto the first entry going forward
/// and the last going backward. Returns `None` for an empty watchlist.
pub fn adjacent_symbol(state: &FinancePreferences, forward: bool) -> Option<&str> {
    let list = state.watchlist.as_slice();
    if list.is_empty() {
        return None;
    }
    let current = list
        .iter()
        .position(|s| s.eq_ignore_ascii_case(&state.symbol));
    let idx = match (current, forward) {
        (Some(i), true) => (i + 1) % list.len(),
        (Some(i), false) => (i + list.len() - 1) % list.len(),
        (None, true) => 0,
        (None, false) => list.len() - 1,
    };
    Some(list[idx].as_str())
}
