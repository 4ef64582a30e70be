//! Finance widget: quote, price trace and watchlist.
//!
//! # Display
//!
//! ```text
//! AAPL  Apple Inc.
//! 178.72  +2.34 (+1.32%)
//! 1D  low 176.50  high 179.25
//! ▃▄▅▃▂▁▄▆█▇▅▄...
//! Watch: [AAPL] MSFT GOOGL AMZN META
//! ```
//!
//! The quote and the series are separate cache entries, so each part shows
//! its own loading or error state.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use super::{pending_line, put_line, sparkline, Widget, WidgetContext, WidgetKind};
use crate::query::{FinanceData, FinanceRequest, PriceSeries, Quote, QueryResult};
use crate::store::RootState;

/// Quote query for the selected symbol.
pub fn quote_request(state: &RootState) -> FinanceRequest {
    FinanceRequest::Quote {
        symbol: state.finance.symbol.clone(),
    }
}

/// Price series query for the selected symbol and range.
pub fn series_request(state: &RootState) -> FinanceRequest {
    FinanceRequest::TimeSeries {
        symbol: state.finance.symbol.clone(),
        time_range: state.finance.time_range,
    }
}

/// Widget showing the selected symbol.
pub struct FinanceWidget;

/// Factory registered for [`WidgetKind::Finance`].
pub fn create() -> Box<dyn Widget> {
    Box::new(FinanceWidget)
}

impl Widget for FinanceWidget {
    fn render(&self, area: Rect, buf: &mut Buffer, context: &WidgetContext) {
        let state = context.state;
        let mut y = 0;

        let quote = state.finance_api.read(&quote_request(state));
        match (pending_line(&quote, "quote"), quote.data()) {
            (Some(line), _) => {
                put_line(buf, area, y, &line);
                y += 1;
            }
            (None, Some(FinanceData::Quote(quote))) => {
                for line in quote_lines(quote) {
                    put_line(buf, area, y, &line);
                    y += 1;
                }
            }
            (None, _) => {}
        }

        let range = Line::styled(
            format!("Range {}", state.finance.time_range),
            Style::default().fg(Color::DarkGray),
        );
        put_line(buf, area, y, &range);
        y += 1;

        let series = state.finance_api.read(&series_request(state));
        put_line(buf, area, y, &series_line(&series, area.width));
        y += 1;

        // Watchlist takes the last row when there is room to spare.
        let last = area.height.saturating_sub(1).max(y);
        put_line(buf, area, last, &watchlist_line(context));
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::Finance
    }

    fn min_height(&self) -> u16 {
        5
    }
}

fn quote_lines(quote: &Quote) -> [Line<'static>; 2] {
    let color = if quote.change >= 0.0 {
        Color::Green
    } else {
        Color::Red
    };
    [
        Line::from(vec![
            Span::styled(
                quote.symbol.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  {}", quote.name)),
        ]),
        Line::from(vec![
            Span::raw(format!("{:.2}  ", quote.price)),
            Span::styled(
                format!("{:+.2} ({:+.2}%)", quote.change, quote.change_percent),
                Style::default().fg(color),
            ),
            Span::styled(
                format!("  low {:.2}  high {:.2}", quote.day_low, quote.day_high),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    ]
}

fn series_line(series: &QueryResult<FinanceData>, width: u16) -> Line<'static> {
    if let Some(line) = pending_line(series, "chart") {
        return line;
    }
    match series.data() {
        Some(FinanceData::Series(series)) => trace(series, width),
        _ => Line::default(),
    }
}

/// Most recent points that fit in `width` columns.
fn trace(series: &PriceSeries, width: u16) -> Line<'static> {
    let skip = series.points.len().saturating_sub(usize::from(width));
    let prices: Vec<f64> = series.points.iter().skip(skip).map(|p| p.price).collect();
    Line::styled(sparkline(&prices), Style::default().fg(Color::Cyan))
}

fn watchlist_line(context: &WidgetContext) -> Line<'static> {
    let selected = &context.state.finance.symbol;
    let mut spans = vec![Span::styled("Watch:", Style::default().fg(Color::DarkGray))];
    for symbol in context.state.finance.watchlist.iter() {
        spans.push(Span::raw(" "));
        if symbol.eq_ignore_ascii_case(selected) {
            spans.push(Span::styled(
                format!("[{symbol}]"),
                Style::default().fg(Color::Cyan),
            ));
        } else {
            spans.push(Span::raw(symbol.clone()));
        }
    }
    if context.state.finance.watchlist.is_empty() {
        spans.push(Span::styled(" (empty)", Style::default().fg(Color::DarkGray)));
    }
    Line::from(spans)
}
