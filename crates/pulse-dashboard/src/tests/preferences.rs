use crate::{ParseEnumError, Theme, TimeRange, Unit, WidgetId};

#[test]
fn test_theme_parse_and_display_agree() {
    for theme in [Theme::Light, Theme::Dark, Theme::System] {
        let parsed: Theme = theme.to_string().parse().expect("display output parses");
        assert_eq!(parsed, theme);
    }
}

#[test]
fn test_theme_parse_is_case_insensitive() {
    assert_eq!("DARK".parse::<Theme>(), Ok(Theme::Dark));
}

#[test]
fn test_theme_parse_rejects_unknown() {
    let err = "sepia".parse::<Theme>().expect_err("sepia is not a theme");
    assert_eq!(
        err,
        ParseEnumError {
            kind: "theme",
            value: "sepia".to_string()
        }
    );
    assert_eq!(err.to_string(), "invalid theme: sepia");
}

#[test]
fn test_theme_cycle_visits_all_variants() {
    let start = Theme::System;
    assert_eq!(start.next(), Theme::Light);
    assert_eq!(start.next().next(), Theme::Dark);
    assert_eq!(start.next().next().next(), Theme::System);
}

#[test]
fn test_unit_toggle_round_trips() {
    assert_eq!(Unit::Metric.toggled(), Unit::Imperial);
    assert_eq!(Unit::Metric.toggled().toggled(), Unit::Metric);
}

#[test]
fn test_unit_suffixes() {
    assert_eq!(Unit::Metric.temperature_suffix(), "°C");
    assert_eq!(Unit::Imperial.speed_suffix(), "mph");
}

#[test]
fn test_time_range_labels() {
    let labels: Vec<&str> = TimeRange::ALL.iter().map(|r| r.label()).collect();
    assert_eq!(labels, vec!["1D", "1W", "1M", "3M", "1Y", "5Y"]);
}

#[test]
fn test_time_range_parse_lowercase() {
    assert_eq!("3m".parse::<TimeRange>(), Ok(TimeRange::ThreeMonths));
    assert!("2D".parse::<TimeRange>().is_err());
}

#[test]
fn test_time_range_next_and_previous_saturate() {
    assert_eq!(TimeRange::FiveYears.next(), TimeRange::FiveYears);
    assert_eq!(TimeRange::OneDay.previous(), TimeRange::OneDay);
    assert_eq!(TimeRange::OneDay.next(), TimeRange::OneWeek);
    assert_eq!(TimeRange::OneYear.previous(), TimeRange::ThreeMonths);
}

#[test]
fn test_time_range_serde_uses_labels() {
    let json = serde_json::to_string(&TimeRange::OneYear).expect("serialize");
    assert_eq!(json, "\"1Y\"");
    let parsed: TimeRange = serde_json::from_str("\"5Y\"").expect("deserialize");
    assert_eq!(parsed, TimeRange::FiveYears);
}

#[test]
fn test_widget_id_is_transparent_string() {
    let id = WidgetId::from("weather");
    assert_eq!(id.as_str(), "weather");
    assert_eq!(id.to_string(), "weather");
    let json = serde_json::to_string(&id).expect("serialize");
    assert_eq!(json, "\"weather\"");
}
