//! Main rendering orchestration for the TUI dashboard.
//!
//! Provides the top-level `render_dashboard` function that composes the
//! header, the optional side panel, the widget grid and the footer.
//!
//! The grid lays resolved widgets out two per row in layout order. While a
//! layout edit session is active the side panel lists the staged order,
//! including ids that render nothing, so every slot can be selected and
//! moved.

use crate::tui::app::App;
use crate::widgets::{Resolution, WidgetContext};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

/// Header text displayed at the top of the dashboard.
const HEADER_TEXT: &str = "Pulse Dashboard";

/// Footer text showing available keybindings.
const FOOTER_TEXT: &str = "[c] Customize  [b] Sidebar  [t] Theme  [u] Unit  [[/]] Range  [n] News  [,/.] Symbol  [w/x] Watch  [a] Save  [r] Refresh  [q] Quit";

/// Footer text while editing the layout.
const EDITING_FOOTER_TEXT: &str = "[j/k] Select  [J/K] Move  [s/Enter/Esc] Save layout  [q] Quit";

/// Version string shown in the header (right-aligned).
const VERSION_TEXT: &str = concat!("v", env!("CARGO_PKG_VERSION"));

/// Width of the side panel in columns.
const SIDE_PANEL_WIDTH: u16 = 28;

/// Widgets per grid row.
const GRID_COLUMNS: usize = 2;

/// Renders the full dashboard layout.
pub fn render_dashboard(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(3),    // body
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);

    let state = app.state();
    let body = chunks[1];
    let grid_area = if app.is_editing() {
        let [side, grid] = split_side_panel(body);
        render_layout_panel(frame, app, side);
        grid
    } else if state.ui.sidebar_open {
        let [side, grid] = split_side_panel(body);
        render_sidebar(frame, app, side);
        grid
    } else {
        body
    };
    render_grid(frame, app, grid_area);

    render_footer(frame, app, chunks[2]);
}

fn split_side_panel(area: Rect) -> [Rect; 2] {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDE_PANEL_WIDTH), Constraint::Min(10)])
        .split(area);
    [chunks[0], chunks[1]]
}

/// Header with title (left) and version (right-aligned).
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(HEADER_TEXT, Style::default().fg(Color::Cyan))];
    let mut title_len = HEADER_TEXT.len();
    if app.is_editing() {
        const EDITING: &str = "  EDITING LAYOUT";
        spans.push(Span::styled(
            EDITING,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
        title_len += EDITING.len();
    }

    let padding_len = (area.width as usize)
        .saturating_sub(title_len)
        .saturating_sub(VERSION_TEXT.len());
    spans.push(Span::raw(" ".repeat(padding_len)));
    spans.push(Span::styled(VERSION_TEXT, Style::default().fg(Color::DarkGray)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Splits `area` into `count` grid cells, `GRID_COLUMNS` per row.
///
/// A trailing row with fewer widgets stretches them across the full width.
pub fn grid_cells(area: Rect, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let rows = count.div_ceil(GRID_COLUMNS);
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows as u32); rows])
        .split(area);

    let mut cells = Vec::with_capacity(count);
    for (row, row_area) in row_areas.iter().enumerate() {
        let in_row = (count - row * GRID_COLUMNS).min(GRID_COLUMNS);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, in_row as u32); in_row])
            .split(*row_area);
        cells.extend(columns.iter().copied());
    }
    cells
}

fn render_grid(frame: &mut Frame, app: &App, area: Rect) {
    let layout = app.visible_layout();
    let resolved = app.registry().resolve(&layout);
    if resolved.is_empty() {
        let hint = Paragraph::new(Line::styled(
            "No widgets to show. Press [c] to customize the layout.",
            Style::default().fg(Color::DarkGray),
        ))
        .block(Block::bordered());
        frame.render_widget(hint, area);
        return;
    }

    let state = app.state();
    let ctx = WidgetContext::new(&state, app.feed());
    let editing = app.is_editing();

    for (entry, cell) in resolved.iter().zip(grid_cells(area, resolved.len())) {
        let selected = entry.slot == app.selected_slot;
        let border_style = match (selected, editing) {
            (true, true) => Style::default().fg(Color::Yellow),
            (true, false) => Style::default().fg(Color::Cyan),
            (false, _) => Style::default().fg(Color::DarkGray),
        };
        let title = if editing {
            format!(" {}. {} ", entry.slot + 1, entry.widget.title())
        } else {
            format!(" {} ", entry.widget.title())
        };
        let block = Block::bordered().title(title).border_style(border_style);
        let inner = block.inner(cell);
        frame.render_widget(block, cell);
        entry.widget.render(inner, frame.buffer_mut(), &ctx);
    }
}

/// Staged order with the selected slot highlighted.
fn render_layout_panel(frame: &mut Frame, app: &App, area: Rect) {
    let layout = app.visible_layout();
    let lines: Vec<Line> = layout
        .ids()
        .iter()
        .enumerate()
        .map(|(slot, id)| {
            let selected = slot == app.selected_slot;
            let marker = if selected { "> " } else { "  " };
            let (mut style, suffix) = match app.registry().lookup(id) {
                Resolution::Registered(_) => (Style::default(), ""),
                Resolution::Unregistered => (Style::default().fg(Color::DarkGray), " (hidden)"),
            };
            if selected {
                style = style.fg(Color::Yellow).add_modifier(Modifier::BOLD);
            }
            Line::styled(format!("{marker}{}. {id}{suffix}", slot + 1), style)
        })
        .collect();

    let panel = Paragraph::new(lines).block(
        Block::bordered()
            .title(" Layout ")
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(panel, area);
}

/// Preference summary.
fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let state = app.state();
    let location = if state.weather.location.trim().is_empty() {
        "(default)"
    } else {
        state.weather.location.as_str()
    };
    let rows = [
        ("Theme", state.ui.theme.to_string()),
        ("Unit", state.weather.unit.to_string()),
        ("Location", location.to_string()),
        ("Category", state.news.category.clone()),
        ("Symbol", state.finance.symbol.clone()),
        ("Range", state.finance.time_range.to_string()),
        ("Watchlist", state.finance.watchlist.len().to_string()),
        ("Saved", state.news.saved_articles.len().to_string()),
    ];
    let lines: Vec<Line> = rows
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{label:<10}"), Style::default().fg(Color::DarkGray)),
                Span::raw(value),
            ])
        })
        .collect();

    let panel = Paragraph::new(lines).block(Block::bordered().title(" Preferences "));
    frame.render_widget(panel, area);
}

/// Footer (with optional status message overlay).
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let line = match app.status_text() {
        Some(msg) => Line::styled(msg.to_string(), Style::default().fg(Color::Yellow)),
        None => {
            let hints = if app.is_editing() {
                EDITING_FOOTER_TEXT
            } else {
                FOOTER_TEXT
            };
            Line::styled(hints, Style::default().fg(Color::DarkGray))
        }
    };
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::query::Sources;
    use crate::tui::event::Command;
    use crate::tui::test_utils::{
        assert_text_fg_in_row, find_row_with_text, render_app, row_contains, row_text,
    };

    fn make_app(widgets: &[&str]) -> App {
        let mut config = Config::default();
        config.dashboard.widgets = widgets.iter().map(|w| w.to_string()).collect();
        App::with_sources(&config, Sources::instant()).expect("valid config")
    }

    #[test]
    fn test_header_shows_title_and_version() {
        let app = make_app(&["weather"]);
        let buffer = render_app(&app, 80, 20);
        assert!(row_text(&buffer, 0).starts_with(HEADER_TEXT));
        assert!(row_contains(&buffer, 0, VERSION_TEXT));
    }

    #[test]
    fn test_default_layout_renders_panels_in_order() {
        let app = make_app(&["weather", "news", "finance"]);
        let buffer = render_app(&app, 100, 30);
        let weather = find_row_with_text(&buffer, " Weather ").expect("weather panel");
        let finance = find_row_with_text(&buffer, " Finance ").expect("finance panel");
        assert!(row_contains(&buffer, weather, " News "));
        assert!(finance > weather);
        assert!(row_text(&buffer, weather).find(" Weather ") < row_text(&buffer, weather).find(" News "));
    }

    #[test]
    fn test_unregistered_id_is_skipped() {
        let app = make_app(&["globe", "news"]);
        let buffer = render_app(&app, 80, 20);
        assert!(find_row_with_text(&buffer, " News ").is_some());
        assert!(find_row_with_text(&buffer, "globe").is_none());
    }

    #[test]
    fn test_empty_layout_shows_hint() {
        let app = make_app(&[]);
        let buffer = render_app(&app, 80, 10);
        assert!(find_row_with_text(&buffer, "No widgets to show").is_some());
    }

    #[test]
    fn test_footer_shows_hints() {
        let app = make_app(&["weather"]);
        let buffer = render_app(&app, 140, 10);
        assert!(row_text(&buffer, 9).starts_with("[c] Customize"));
    }

    #[test]
    fn test_sidebar_lists_preferences() {
        let mut app = make_app(&["weather"]);
        app.apply(Command::ToggleSidebar);
        let buffer = render_app(&app, 100, 20);
        assert!(find_row_with_text(&buffer, " Preferences ").is_some());
        assert!(find_row_with_text(&buffer, "Symbol    AAPL").is_some());
        assert!(find_row_with_text(&buffer, "Location  (default)").is_some());
    }

    #[test]
    fn test_editing_shows_staged_order_and_hidden_ids() {
        let mut app = make_app(&["weather", "globe", "finance"]);
        app.apply(Command::Customize);
        app.apply(Command::SelectNext);
        app.status_message = None;
        let buffer = render_app(&app, 100, 20);

        assert!(row_contains(&buffer, 0, "EDITING LAYOUT"));
        assert!(find_row_with_text(&buffer, " Layout ").is_some());
        assert!(find_row_with_text(&buffer, "  1. weather").is_some());
        let hidden = find_row_with_text(&buffer, "> 2. globe (hidden)").expect("hidden row");
        assert_text_fg_in_row(&buffer, hidden, "> 2. globe", Color::Yellow);
        assert!(find_row_with_text(&buffer, " 3. Finance ").is_some());
        assert!(row_text(&buffer, 19).starts_with("[j/k] Select"));
    }

    #[test]
    fn test_status_message_replaces_footer() {
        let mut app = make_app(&["weather"]);
        app.apply(Command::Refresh);
        let buffer = render_app(&app, 80, 10);
        assert!(row_text(&buffer, 9).starts_with("Refreshing"));
        assert_text_fg_in_row(&buffer, 9, "Refreshing", Color::Yellow);
    }

    #[test]
    fn test_grid_cells_two_per_row() {
        let area = Rect::new(0, 0, 100, 40);
        let cells = grid_cells(area, 3);
        assert_eq!(cells.len(), 3);
        assert_eq!(cells[0], Rect::new(0, 0, 50, 20));
        assert_eq!(cells[1], Rect::new(50, 0, 50, 20));
        assert_eq!(cells[2], Rect::new(0, 20, 100, 20));
    }

    #[test]
    fn test_grid_cells_empty() {
        assert!(grid_cells(Rect::new(0, 0, 10, 10), 0).is_empty());
    }
}
