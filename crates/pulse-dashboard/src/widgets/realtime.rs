//! Real-time widget: live trace of the feed window and recent alerts.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use super::{put_line, sparkline, Widget, WidgetContext, WidgetKind};
use crate::feed::{Direction, FeedState};

/// Widget showing the simulated feed.
pub struct RealtimeWidget;

/// Factory registered for [`WidgetKind::Realtime`].
pub fn create() -> Box<dyn Widget> {
    Box::new(RealtimeWidget)
}

impl Widget for RealtimeWidget {
    fn render(&self, area: Rect, buf: &mut Buffer, context: &WidgetContext) {
        let feed = context.feed;
        if !feed.is_connected() {
            put_line(
                buf,
                area,
                0,
                &Line::styled("Connecting to feed...", Style::default().fg(Color::DarkGray)),
            );
            return;
        }

        put_line(buf, area, 0, &summary_line(feed));
        put_line(buf, area, 1, &trace_line(feed, area.width));

        if feed.notifications().is_empty() {
            put_line(
                buf,
                area,
                2,
                &Line::styled("No alerts", Style::default().fg(Color::DarkGray)),
            );
            return;
        }
        for (i, notification) in feed.notifications().iter().enumerate() {
            let color = match notification.direction {
                Direction::Increase => Color::Green,
                Direction::Decrease => Color::Red,
            };
            let line = Line::from(vec![
                Span::styled(
                    notification.at.format("%H:%M:%S ").to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(notification.message.clone(), Style::default().fg(color)),
            ]);
            put_line(buf, area, 2 + i as u16, &line);
        }
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::Realtime
    }

    fn min_height(&self) -> u16 {
        3
    }
}

fn summary_line(feed: &FeedState) -> Line<'static> {
    let latest = feed
        .window()
        .latest()
        .map_or_else(|| "--".to_string(), |p| p.value.to_string());
    Line::from(vec![
        Span::styled("Live", Style::default().fg(Color::Green)),
        Span::raw(format!("  latest {latest}")),
        Span::styled(
            format!("  {} pts", feed.window().len()),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

fn trace_line(feed: &FeedState, width: u16) -> Line<'static> {
    let skip = feed.window().len().saturating_sub(usize::from(width));
    let values: Vec<f64> = feed
        .window()
        .iter()
        .skip(skip)
        .map(|p| f64::from(p.value))
        .collect();
    Line::styled(sparkline(&values), Style::default().fg(Color::Cyan))
}
