//! Stock quote and price series queries, plus the demo finance source.

use super::{DataSource, QueryError};
use crate::TimeRange;
use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;

/// Parameters of a finance query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FinanceRequest {
    /// Latest quote for a symbol.
    Quote {
        /// Ticker symbol.
        symbol: String,
    },
    /// Price history for a symbol over a range.
    TimeSeries {
        /// Ticker symbol.
        symbol: String,
        /// Chart range.
        time_range: TimeRange,
    },
}

/// Payload of a finance query; the variant follows the request.
#[derive(Debug, Clone, PartialEq)]
pub enum FinanceData {
    /// Answer to [`FinanceRequest::Quote`].
    Quote(Quote),
    /// Answer to [`FinanceRequest::TimeSeries`].
    Series(PriceSeries),
}

/// Latest trading data for a symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    /// Ticker symbol.
    pub symbol: String,
    /// Company name.
    pub name: String,
    /// Last price.
    pub price: f64,
    /// Absolute change since previous close.
    pub change: f64,
    /// Relative change in percent.
    pub change_percent: f64,
    /// Session low.
    pub day_low: f64,
    /// Session high.
    pub day_high: f64,
    /// Traded volume, abbreviated.
    pub volume: String,
    /// Market capitalisation, abbreviated.
    pub market_cap: String,
}

/// One chart sample.
#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    /// Axis label (`"9:30"`, `"Tue"`, `"Week 3"`, ...).
    pub label: String,
    /// Closing price.
    pub price: f64,
}

/// Price history for a symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    /// Ticker symbol.
    pub symbol: String,
    /// Range covered.
    pub time_range: TimeRange,
    /// Samples, oldest first, at most [`point_limit`] of them.
    pub points: Vec<PricePoint>,
}

/// Number of samples in a series for `range`.
///
/// Intraday half-hours for a day, daily closes for a week or month, weekly
/// closes for three months, monthly for a year and yearly for five years.
pub fn point_limit(range: TimeRange) -> usize {
    match range {
        TimeRange::OneDay => 24,
        TimeRange::OneWeek => 7,
        TimeRange::OneMonth => 30,
        TimeRange::ThreeMonths => 12,
        TimeRange::OneYear => 12,
        TimeRange::FiveYears => 5,
    }
}

const COMPANIES: [(&str, &str); 8] = [
    ("AAPL", "Apple Inc."),
    ("MSFT", "Microsoft Corporation"),
    ("GOOGL", "Alphabet Inc."),
    ("AMZN", "Amazon.com Inc."),
    ("META", "Meta Platforms Inc."),
    ("TSLA", "Tesla Inc."),
    ("NVDA", "NVIDIA Corporation"),
    ("NFLX", "Netflix Inc."),
];

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

fn company_name(symbol: &str) -> Option<&'static str> {
    COMPANIES
        .iter()
        .find(|(s, _)| s.eq_ignore_ascii_case(symbol))
        .map(|(_, name)| *name)
}

fn point_label(range: TimeRange, i: usize) -> String {
    match range {
        TimeRange::OneDay => format!("{}:{}", 9 + i / 2, if i % 2 == 0 { "00" } else { "30" }),
        TimeRange::OneWeek => WEEKDAYS[i % WEEKDAYS.len()].to_string(),
        TimeRange::OneMonth => format!("Day {}", i + 1),
        TimeRange::ThreeMonths => format!("Week {}", i + 1),
        TimeRange::OneYear => format!("Month {}", i + 1),
        TimeRange::FiveYears => format!("Year {}", i + 1),
    }
}

// (base, spread) of the random walk for each range
fn price_band(range: TimeRange) -> (f64, f64) {
    match range {
        TimeRange::OneDay | TimeRange::OneWeek | TimeRange::OneMonth => (170.0, 15.0),
        TimeRange::ThreeMonths => (165.0, 20.0),
        TimeRange::OneYear => (160.0, 30.0),
        TimeRange::FiveYears => (120.0, 70.0),
    }
}

/// Demo source with fixed quotes and random price series.
#[derive(Debug, Clone)]
pub struct MockFinanceSource {
    latency: Duration,
}

impl Default for MockFinanceSource {
    fn default() -> Self {
        Self::with_latency(Duration::from_millis(600))
    }
}

impl MockFinanceSource {
    /// Source that answers after `latency`.
    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    /// Builds the response without waiting.
    pub fn respond(request: &FinanceRequest) -> Result<FinanceData, QueryError> {
        match request {
            FinanceRequest::Quote { symbol } => Self::quote(symbol).map(FinanceData::Quote),
            FinanceRequest::TimeSeries { symbol, time_range } => {
                Self::series(symbol, *time_range).map(FinanceData::Series)
            }
        }
    }

    fn quote(symbol: &str) -> Result<Quote, QueryError> {
        let name = company_name(symbol).ok_or_else(|| QueryError::UnknownSymbol(symbol.to_string()))?;
        Ok(Quote {
            symbol: symbol.to_uppercase(),
            name: name.to_string(),
            price: 178.72,
            change: 2.34,
            change_percent: 1.32,
            day_low: 176.5,
            day_high: 179.25,
            volume: "32.5M".to_string(),
            market_cap: "2.82T".to_string(),
        })
    }

    fn series(symbol: &str, range: TimeRange) -> Result<PriceSeries, QueryError> {
        if company_name(symbol).is_none() {
            return Err(QueryError::UnknownSymbol(symbol.to_string()));
        }
        let (base, spread) = price_band(range);
        let mut rng = rand::thread_rng();
        let points = (0..point_limit(range))
            .map(|i| PricePoint {
                label: point_label(range, i),
                price: base + rng.gen::<f64>() * spread,
            })
            .collect();
        Ok(PriceSeries {
            symbol: symbol.to_uppercase(),
            time_range: range,
            points,
        })
    }
}

#[async_trait]
impl DataSource<FinanceRequest, FinanceData> for MockFinanceSource {
    async fn fetch(&self, params: FinanceRequest) -> Result<FinanceData, QueryError> {
        tokio::time::sleep(self.latency).await;
        Self::respond(&params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(range: TimeRange) -> PriceSeries {
        let request = FinanceRequest::TimeSeries {
            symbol: "AAPL".to_string(),
            time_range: range,
        };
        match MockFinanceSource::respond(&request) {
            Ok(FinanceData::Series(series)) => series,
            other => panic!("expected series, got {:?}", other),
        }
    }

    #[test]
    fn test_point_limits() {
        let expected = [
            (TimeRange::OneDay, 24),
            (TimeRange::OneWeek, 7),
            (TimeRange::OneMonth, 30),
            (TimeRange::ThreeMonths, 12),
            (TimeRange::OneYear, 12),
            (TimeRange::FiveYears, 5),
        ];
        for (range, limit) in expected {
            assert_eq!(point_limit(range), limit);
            assert_eq!(series(range).points.len(), limit, "{range}");
        }
    }

    #[test]
    fn test_series_labels_and_band() {
        let day = series(TimeRange::OneDay);
        assert_eq!(day.points[0].label, "9:00");
        assert_eq!(day.points[1].label, "9:30");
        assert_eq!(day.points[23].label, "20:30");
        for point in &day.points {
            assert!((170.0..=185.0).contains(&point.price));
        }
        let week = series(TimeRange::OneWeek);
        assert_eq!(week.points[6].label, "Sun");
        let years = series(TimeRange::FiveYears);
        assert_eq!(years.points[4].label, "Year 5");
    }

    #[test]
    fn test_quote_for_known_symbol() {
        let request = FinanceRequest::Quote {
            symbol: "msft".to_string(),
        };
        let Ok(FinanceData::Quote(quote)) = MockFinanceSource::respond(&request) else {
            panic!("expected quote");
        };
        assert_eq!(quote.symbol, "MSFT");
        assert_eq!(quote.name, "Microsoft Corporation");
        assert_eq!(quote.price, 178.72);
    }

    #[test]
    fn test_unknown_symbol_is_error() {
        let request = FinanceRequest::Quote {
            symbol: "ZZZZ".to_string(),
        };
        assert_eq!(
            MockFinanceSource::respond(&request),
            Err(QueryError::UnknownSymbol("ZZZZ".to_string()))
        );
    }
}
