//! Root state tree, store actions and the root reducer.

use crate::config::Config;
use crate::layout::DashboardLayout;
use crate::query::{
    CacheAction, FinanceData, FinanceRequest, NewsPage, NewsRequest, QueryCache, WeatherReport,
    WeatherRequest,
};
use crate::slices::{
    self, FinanceAction, FinancePreferences, NewsAction, NewsPreferences, UiAction,
    UiPreferences, WeatherAction, WeatherPreferences,
};

/// Immutable snapshot of the whole application state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RootState {
    /// Weather preferences.
    pub weather: WeatherPreferences,
    /// News preferences.
    pub news: NewsPreferences,
    /// Finance preferences.
    pub finance: FinancePreferences,
    /// UI preferences, including the committed layout.
    pub ui: UiPreferences,
    /// Cached forecast queries.
    pub weather_api: QueryCache<WeatherRequest, WeatherReport>,
    /// Cached headline and search queries.
    pub news_api: QueryCache<NewsRequest, NewsPage>,
    /// Cached quote, series and symbol search queries.
    pub finance_api: QueryCache<FinanceRequest, FinanceData>,
}

impl RootState {
    /// Initial state seeded from configuration.
    ///
    /// Query caches always start empty.
    pub fn from_config(config: &Config) -> Self {
        let weather = WeatherPreferences {
            location: config.weather.location.clone(),
            unit: config.weather.unit,
            saved_locations: config.weather.saved_locations.iter().cloned().collect(),
        };
        let news = NewsPreferences {
            category: config.news.category.clone(),
            ..NewsPreferences::default()
        };
        let finance = FinancePreferences {
            symbol: config.finance.symbol.clone(),
            time_range: config.finance.time_range,
            watchlist: config.finance.watchlist.iter().cloned().collect(),
        };
        let ui = UiPreferences {
            sidebar_open: config.dashboard.sidebar_open,
            theme: config.dashboard.theme,
            dashboard_layout: DashboardLayout::from_ids(config.dashboard.widgets.iter().cloned()),
        };

        Self {
            weather,
            news,
            finance,
            ui,
            ..Self::default()
        }
    }
}

/// Application lifecycle signals that invalidate cached queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// The terminal regained focus.
    Focused,
    /// Connectivity was restored.
    Reconnected,
    /// The user asked for fresh data.
    Refreshed,
}

/// Everything that can be dispatched to the store.
///
/// Each variant is routed to exactly one slice reducer or cache, except
/// [`Action::Lifecycle`], which invalidates all three caches at once.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Weather slice action.
    Weather(WeatherAction),
    /// News slice action.
    News(NewsAction),
    /// Finance slice action.
    Finance(FinanceAction),
    /// UI slice action.
    Ui(UiAction),
    /// Weather cache transition.
    WeatherApi(CacheAction<WeatherRequest, WeatherReport>),
    /// News cache transition.
    NewsApi(CacheAction<NewsRequest, NewsPage>),
    /// Finance cache transition.
    FinanceApi(CacheAction<FinanceRequest, FinanceData>),
    /// Lifecycle signal.
    Lifecycle(LifecycleEvent),
}

/// Applies `action` to `state`, returning the next state.
pub fn reduce(state: &RootState, action: Action) -> RootState {
    let mut next = state.clone();
    match action {
        Action::Weather(a) => next.weather = slices::weather::reduce(&state.weather, a),
        Action::News(a) => next.news = slices::news::reduce(&state.news, a),
        Action::Finance(a) => next.finance = slices::finance::reduce(&state.finance, a),
        Action::Ui(a) => next.ui = slices::ui::reduce(&state.ui, a),
        Action::WeatherApi(a) => next.weather_api = state.weather_api.apply(a),
        Action::NewsApi(a) => next.news_api = state.news_api.apply(a),
        Action::FinanceApi(a) => next.finance_api = state.finance_api.apply(a),
        Action::Lifecycle(event) => {
            tracing::debug!("{:?}: invalidating cached queries", event);
            next.weather_api = state.weather_api.apply(CacheAction::InvalidateAll);
            next.news_api = state.news_api.apply(CacheAction::InvalidateAll);
            next.finance_api = state.finance_api.apply(CacheAction::InvalidateAll);
        }
    }
    next
}
