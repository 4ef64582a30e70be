//! Initial state construction from configuration.

use super::RootState;
use crate::config::schema::Config;
use crate::{Theme, TimeRange, Unit, WidgetId};

#[test]
fn test_default_config_matches_default_state() {
    let state = RootState::from_config(&Config::default());
    assert_eq!(state, RootState::default());
}

#[test]
fn test_config_values_seed_slices() {
    let mut config = Config::default();
    config.dashboard.widgets = vec!["finance".into(), "globe".into(), "finance".into()];
    config.dashboard.theme = Theme::Light;
    config.dashboard.sidebar_open = true;
    config.weather.unit = Unit::Imperial;
    config.weather.saved_locations = vec!["Oslo".into(), "Oslo".into()];
    config.news.category = "health".into();
    config.finance.symbol = "NVDA".into();
    config.finance.time_range = TimeRange::FiveYears;
    config.finance.watchlist = vec!["NVDA".into(), "AMD".into(), "NVDA".into()];

    let state = RootState::from_config(&config);

    assert_eq!(
        state.ui.dashboard_layout.ids(),
        &[WidgetId::from("finance"), WidgetId::from("globe")]
    );
    assert_eq!(state.ui.theme, Theme::Light);
    assert!(state.ui.sidebar_open);
    assert_eq!(state.weather.unit, Unit::Imperial);
    assert_eq!(state.weather.saved_locations.len(), 1);
    assert_eq!(state.news.category, "health");
    assert_eq!(state.finance.symbol, "NVDA");
    assert_eq!(state.finance.time_range, TimeRange::FiveYears);
    assert_eq!(state.finance.watchlist.as_slice(), &["NVDA", "AMD"]);
    assert!(state.weather_api.is_empty());
}
