//! Widget context providing shared state for widget rendering.
//!
//! The [`WidgetContext`] struct carries all the data that widgets may need
//! during rendering: the store snapshot (slices and query caches) and the
//! feed state owned by the UI loop. It is passed by reference to each
//! widget's `render` method.

use crate::feed::FeedState;
use crate::store::RootState;

/// Shared context passed to widgets during rendering.
///
/// All fields are borrowed to avoid cloning the state tree on every frame.
///
/// # Example
///
/// ```
/// use pulse_dashboard::feed::FeedState;
/// use pulse_dashboard::store::RootState;
/// use pulse_dashboard::widgets::WidgetContext;
///
/// let state = RootState::default();
/// let feed = FeedState::default();
/// let ctx = WidgetContext::new(&state, &feed);
/// assert!(ctx.is_watched("AAPL"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct WidgetContext<'a> {
    /// Store snapshot for this frame.
    pub state: &'a RootState,

    /// Live feed window and notifications.
    pub feed: &'a FeedState,
}

impl<'a> WidgetContext<'a> {
    /// Creates a context over a state snapshot and the feed.
    pub fn new(state: &'a RootState, feed: &'a FeedState) -> Self {
        Self { state, feed }
    }

    /// Returns `true` if the article with `id` is bookmarked.
    pub fn is_saved_article(&self, id: &str) -> bool {
        self.state.news.saved_articles.iter().any(|saved| saved == id)
    }

    /// Returns `true` if `symbol` is on the watchlist.
    pub fn is_watched(&self, symbol: &str) -> bool {
        self.state
            .finance
            .watchlist
            .iter()
            .any(|watched| watched.eq_ignore_ascii_case(symbol))
    }
}
