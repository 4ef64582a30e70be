//! Weather widget: current conditions and the daily forecast.
//!
//! # Display
//!
//! ```text
//! New York, US
//! 18°C  Partly Cloudy
//! Humidity 65%  Wind 12 km/h
//! Mon  18°C  Partly Cloudy
//! Tue  20°C  Sunny
//! ...
//! ```
//!
//! Forecast rows are dropped from the bottom when the panel is short.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use super::{pending_line, put_line, Widget, WidgetContext, WidgetKind};
use crate::query::{WeatherReport, WeatherRequest};
use crate::store::RootState;

/// Forecast query for the current weather preferences.
pub fn request(state: &RootState) -> WeatherRequest {
    WeatherRequest::new(state.weather.location.clone(), state.weather.unit)
}

/// Widget showing the forecast for the preferred location.
pub struct WeatherWidget;

/// Factory registered for [`WidgetKind::Weather`].
pub fn create() -> Box<dyn Widget> {
    Box::new(WeatherWidget)
}

impl Widget for WeatherWidget {
    fn render(&self, area: Rect, buf: &mut Buffer, context: &WidgetContext) {
        let result = context.state.weather_api.read(&request(context.state));
        if let Some(line) = pending_line(&result, "weather") {
            put_line(buf, area, 0, &line);
            return;
        }
        if let Some(report) = result.data() {
            for (y, line) in report_lines(report).iter().enumerate() {
                put_line(buf, area, y as u16, line);
            }
        }
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::Weather
    }

    fn min_height(&self) -> u16 {
        3
    }
}

fn report_lines(report: &WeatherReport) -> Vec<Line<'static>> {
    let temp = report.unit.temperature_suffix();
    let mut lines = vec![
        Line::styled(
            report.location.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::from(vec![
            Span::styled(
                format!("{}{}", report.temperature, temp),
                Style::default().fg(temperature_color(report)),
            ),
            Span::raw(format!("  {}", report.condition)),
        ]),
        Line::styled(
            format!(
                "Humidity {}%  Wind {} {}",
                report.humidity,
                report.wind_speed,
                report.unit.speed_suffix()
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    lines.extend(report.forecast.iter().map(|day| {
        Line::raw(format!(
            "{}  {}{}  {}",
            day.day, day.temperature, temp, day.condition
        ))
    }));
    lines
}

/// Warm readings in yellow, cold in cyan.
fn temperature_color(report: &WeatherReport) -> Color {
    let celsius = match report.unit {
        crate::Unit::Metric => report.temperature,
        crate::Unit::Imperial => (report.temperature - 32) * 5 / 9,
    };
    if celsius >= 25 {
        Color::Yellow
    } else if celsius <= 5 {
        Color::Cyan
    } else {
        Color::Reset
    }
}
