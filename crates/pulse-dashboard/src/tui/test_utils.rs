//! Shared test utilities for TUI testing with ratatui TestBackend.
//!
//! Provides helper functions for creating test terminals, extracting buffer
//! content and asserting colors.

#![cfg(test)]

use ratatui::{backend::TestBackend, buffer::Buffer, style::Color, Terminal};

/// Creates a Terminal with TestBackend at the specified dimensions.
pub fn test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("failed to create test terminal")
}

/// Extracts all text from a specific row in the buffer as a single String.
pub fn row_text(buffer: &Buffer, row: u16) -> String {
    let area = buffer.area();
    if row >= area.height {
        return String::new();
    }
    (0..area.width)
        .map(|col| {
            buffer
                .cell((col, row))
                .map(|cell| cell.symbol())
                .unwrap_or(" ")
        })
        .collect()
}

/// Checks if a specific row contains the given substring.
pub fn row_contains(buffer: &Buffer, row: u16, text: &str) -> bool {
    row_text(buffer, row).contains(text)
}

/// Finds the first row index that contains the given text, or None if not found.
pub fn find_row_with_text(buffer: &Buffer, text: &str) -> Option<u16> {
    let area = buffer.area();
    for row in 0..area.height {
        if row_contains(buffer, row, text) {
            return Some(row);
        }
    }
    None
}

/// Asserts that the cell at (col, row) has the specified foreground color.
pub fn assert_fg_color(buffer: &Buffer, col: u16, row: u16, color: Color) {
    let cell = buffer
        .cell((col, row))
        .unwrap_or_else(|| panic!("cell at ({}, {}) does not exist", col, row));
    assert_eq!(
        cell.fg, color,
        "expected fg color {:?} at ({}, {}), got {:?}",
        color, col, row, cell.fg
    );
}

/// Finds the first occurrence of `text` in the specified row and checks
/// if the first character of that text has the specified foreground color.
pub fn assert_text_fg_in_row(buffer: &Buffer, row: u16, text: &str, color: Color) {
    let row_string = row_text(buffer, row);
    let byte_idx = row_string
        .find(text)
        .unwrap_or_else(|| panic!("text '{}' not found in row {}: '{}'", text, row, row_string));
    // Cells hold one char each; border glyphs are multi-byte.
    let col = row_string[..byte_idx].chars().count();
    assert_fg_color(buffer, col as u16, row, color);
}

/// Renders the full dashboard to a buffer and returns the buffer for inspection.
///
/// Creates a terminal of the specified size, renders the dashboard using
/// `render_dashboard`, and returns the resulting buffer.
pub fn render_app(app: &crate::tui::app::App, width: u16, height: u16) -> Buffer {
    let mut terminal = test_terminal(width, height);
    terminal
        .draw(|frame| {
            crate::tui::ui::render_dashboard(frame, app);
        })
        .expect("draw failed");
    terminal.backend().buffer().clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::{Constraint, Direction, Layout};
    use ratatui::widgets::Paragraph;

    fn two_rows(first: &str, second: &str) -> Buffer {
        let mut terminal = test_terminal(24, 4);
        terminal
            .draw(|frame| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(1), Constraint::Length(1)])
                    .split(frame.area());
                frame.render_widget(Paragraph::new(first.to_string()), chunks[0]);
                frame.render_widget(Paragraph::new(second.to_string()), chunks[1]);
            })
            .expect("draw failed");
        terminal.backend().buffer().clone()
    }

    #[test]
    fn test_row_text_pads_to_width() {
        let buffer = two_rows("Weather", "News");
        assert_eq!(row_text(&buffer, 0).len(), 24);
        assert!(row_text(&buffer, 0).starts_with("Weather "));
    }

    #[test]
    fn test_row_text_out_of_range_is_empty() {
        let buffer = two_rows("Weather", "News");
        assert_eq!(row_text(&buffer, 10), "");
    }

    #[test]
    fn test_find_row_with_text() {
        let buffer = two_rows("Weather", "Finance");
        assert_eq!(find_row_with_text(&buffer, "Finance"), Some(1));
        assert_eq!(find_row_with_text(&buffer, "Globe"), None);
        assert!(row_contains(&buffer, 0, "eath"));
    }

    #[test]
    fn test_render_app_matches_requested_size() {
        let app = crate::tui::app::App::with_sources(
            &crate::config::Config::default(),
            crate::query::Sources::instant(),
        )
        .expect("default config is valid");
        let buffer = render_app(&app, 60, 12);
        assert_eq!(buffer.area().width, 60);
        assert_eq!(buffer.area().height, 12);
    }
}
