//! Event handling for the TUI.
//!
//! Wraps crossterm events and adds a tick variant for periodic UI refresh.
//! Key presses are translated into [`Command`]s by [`key_command`], a pure
//! function of the key and the editor mode, and then applied to the
//! [`App`].

use crate::tui::app::App;
use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::interval;

/// Application-level event variants.
#[derive(Debug, Clone, Copy)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// The terminal window regained focus.
    FocusGained,
    /// Periodic tick for UI refresh.
    Tick,
}

/// Event handler that merges terminal input events with periodic ticks.
pub struct EventHandler {
    /// Tick interval duration.
    tick_rate: Duration,
}

impl EventHandler {
    /// Creates a new EventHandler with the specified tick rate.
    ///
    /// A zero tick rate is raised to one millisecond.
    pub fn new(tick_rate: Duration) -> Self {
        Self {
            tick_rate: tick_rate.max(Duration::from_millis(1)),
        }
    }

    /// Waits for the next event, returning either a terminal event or a tick.
    ///
    /// Uses `tokio::select!` to race between crossterm input and the tick timer.
    pub async fn next(&self, reader: &mut EventStream) -> std::io::Result<Event> {
        let mut tick = interval(self.tick_rate);
        // Consume the first immediate tick
        tick.tick().await;

        loop {
            tokio::select! {
                maybe_event = reader.next() => {
                    match maybe_event {
                        Some(Ok(CrosstermEvent::Key(key))) => return Ok(Event::Key(key)),
                        Some(Ok(CrosstermEvent::Resize(w, h))) => return Ok(Event::Resize(w, h)),
                        Some(Ok(CrosstermEvent::FocusGained)) => return Ok(Event::FocusGained),
                        Some(Err(e)) => return Err(e),
                        // Ignore mouse, paste and focus-lost events
                        Some(Ok(_)) => continue,
                        None => return Err(std::io::Error::new(
                            std::io::ErrorKind::UnexpectedEof,
                            "event stream ended",
                        )),
                    }
                }
                _ = tick.tick() => {
                    return Ok(Event::Tick);
                }
            }
        }
    }
}

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Nothing bound to the key.
    None,
    /// Exit the dashboard.
    Quit,
    /// Start a layout edit session.
    Customize,
    /// Commit the staged layout.
    SaveLayout,
    /// Select the next slot.
    SelectNext,
    /// Select the previous slot.
    SelectPrevious,
    /// Move the selected widget one slot towards the back.
    MoveDown,
    /// Move the selected widget one slot towards the front.
    MoveUp,
    /// Show or hide the sidebar.
    ToggleSidebar,
    /// Advance the theme preference.
    CycleTheme,
    /// Switch between metric and imperial.
    ToggleUnit,
    /// Shorter chart range.
    PreviousRange,
    /// Longer chart range.
    NextRange,
    /// Add the current symbol to the watchlist.
    WatchSymbol,
    /// Remove the current symbol from the watchlist.
    UnwatchSymbol,
    /// Focus the next watchlist symbol.
    NextSymbol,
    /// Focus the previous watchlist symbol.
    PreviousSymbol,
    /// Next headline category.
    NextCategory,
    /// Bookmark the first headline.
    SaveFirstArticle,
    /// Invalidate every cached query.
    Refresh,
}

/// Result of handling a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Keep running.
    None,
    /// Quit the application.
    Quit,
}

/// Maps a key to a command.
///
/// Layout keys (`s`, `Enter`, `Esc`, `J`, `K`) only do something during an
/// edit session. `Esc` saves: leaving an edit session always commits.
pub fn key_command(key: KeyEvent, editing: bool) -> Command {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Command::Quit,
            _ => Command::None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Command::Quit,
        KeyCode::Char('j') | KeyCode::Down => Command::SelectNext,
        KeyCode::Char('k') | KeyCode::Up => Command::SelectPrevious,
        KeyCode::Char('c') if !editing => Command::Customize,
        KeyCode::Char('s') | KeyCode::Enter | KeyCode::Esc if editing => Command::SaveLayout,
        KeyCode::Char('J') if editing => Command::MoveDown,
        KeyCode::Char('K') if editing => Command::MoveUp,
        KeyCode::Char('b') => Command::ToggleSidebar,
        KeyCode::Char('t') => Command::CycleTheme,
        KeyCode::Char('u') => Command::ToggleUnit,
        KeyCode::Char('[') => Command::PreviousRange,
        KeyCode::Char(']') => Command::NextRange,
        KeyCode::Char('w') => Command::WatchSymbol,
        KeyCode::Char('x') => Command::UnwatchSymbol,
        KeyCode::Char('.') => Command::NextSymbol,
        KeyCode::Char(',') => Command::PreviousSymbol,
        KeyCode::Char('n') => Command::NextCategory,
        KeyCode::Char('a') => Command::SaveFirstArticle,
        KeyCode::Char('r') => Command::Refresh,
        _ => Command::None,
    }
}

/// Handles a key event by applying its command to `app`.
///
/// Only key presses count; release and repeat events are ignored.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Action {
    if key.kind != KeyEventKind::Press {
        return Action::None;
    }
    match key_command(key, app.is_editing()) {
        Command::Quit => Action::Quit,
        Command::None => Action::None,
        command => {
            app.apply(command);
            Action::None
        }
    }
}

/// Returns true if the key event should trigger application quit.
pub fn should_quit(key: KeyEvent) -> bool {
    key_command(key, false) == Command::Quit
}
