//! Weather forecast queries and the demo weather source.

use super::{DataSource, QueryError};
use crate::Unit;
use async_trait::async_trait;
use std::time::Duration;

/// Location reported when the request names none.
pub const FALLBACK_LOCATION: &str = "New York, US";

/// Forecast length requested by default.
pub const DEFAULT_FORECAST_DAYS: u8 = 7;

/// Parameters of a forecast query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WeatherRequest {
    /// Free-text location; empty means the fallback location.
    pub location: String,
    /// Unit the readings are reported in.
    pub unit: Unit,
    /// Number of forecast days.
    pub days: u8,
}

impl WeatherRequest {
    /// Seven-day forecast for `location` in `unit`.
    pub fn new(location: impl Into<String>, unit: Unit) -> Self {
        Self {
            location: location.into(),
            unit,
            days: DEFAULT_FORECAST_DAYS,
        }
    }
}

/// One forecast day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastDay {
    /// Short weekday name.
    pub day: String,
    /// Expected temperature in the report's unit.
    pub temperature: i32,
    /// Condition summary.
    pub condition: String,
}

/// Current conditions plus a daily forecast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherReport {
    /// Resolved location name.
    pub location: String,
    /// Unit of temperature and wind speed.
    pub unit: Unit,
    /// Current temperature.
    pub temperature: i32,
    /// Current condition summary.
    pub condition: String,
    /// Relative humidity in percent.
    pub humidity: u8,
    /// Wind speed in km/h or mph.
    pub wind_speed: u32,
    /// Daily forecast, at most the requested number of days.
    pub forecast: Vec<ForecastDay>,
}

// (day, celsius, condition)
const FORECAST: [(&str, i32, &str); 7] = [
    ("Mon", 18, "Partly Cloudy"),
    ("Tue", 20, "Sunny"),
    ("Wed", 17, "Cloudy"),
    ("Thu", 16, "Rain"),
    ("Fri", 15, "Rain"),
    ("Sat", 19, "Partly Cloudy"),
    ("Sun", 21, "Sunny"),
];

fn convert_temperature(celsius: i32, unit: Unit) -> i32 {
    match unit {
        Unit::Metric => celsius,
        Unit::Imperial => (f64::from(celsius) * 9.0 / 5.0 + 32.0).round() as i32,
    }
}

fn convert_speed(kph: u32, unit: Unit) -> u32 {
    match unit {
        Unit::Metric => kph,
        Unit::Imperial => (f64::from(kph) * 0.621_371).round() as u32,
    }
}

/// Demo source returning fixed conditions for any location.
#[derive(Debug, Clone)]
pub struct MockWeatherSource {
    latency: Duration,
}

impl Default for MockWeatherSource {
    fn default() -> Self {
        Self::with_latency(Duration::from_millis(1500))
    }
}

impl MockWeatherSource {
    /// Source that answers after `latency`.
    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    /// Builds the report without waiting.
    pub fn report(request: &WeatherRequest) -> WeatherReport {
        let location = match request.location.trim() {
            "" => FALLBACK_LOCATION.to_string(),
            other => other.to_string(),
        };
        let forecast = FORECAST
            .iter()
            .take(usize::from(request.days))
            .map(|(day, celsius, condition)| ForecastDay {
                day: day.to_string(),
                temperature: convert_temperature(*celsius, request.unit),
                condition: condition.to_string(),
            })
            .collect();

        WeatherReport {
            location,
            unit: request.unit,
            temperature: convert_temperature(18, request.unit),
            condition: "Partly Cloudy".to_string(),
            humidity: 65,
            wind_speed: convert_speed(12, request.unit),
            forecast,
        }
    }
}

#[async_trait]
impl DataSource<WeatherRequest, WeatherReport> for MockWeatherSource {
    async fn fetch(&self, params: WeatherRequest) -> Result<WeatherReport, QueryError> {
        tokio::time::sleep(self.latency).await;
        Ok(Self::report(&params))
    }
}
