//! Application state and main event loop for the TUI.
//!
//! Manages terminal setup/teardown, panic hooks, and the core render loop.
//! The [`App`] owns the store handle, the layout editor, the widget
//! registry, the query client and the feed state. Background tasks report
//! back through two channels that the loop drains before every frame:
//! store actions from finished fetches, and feed messages.

use crate::config::{Config, ConfigError};
use crate::feed::{spawn_feed, FeedHandle, FeedMessage, FeedSettings, FeedState, SampleGenerator};
use crate::layout::{DashboardLayout, LayoutEditor};
use crate::query::{FinanceApi, NewsApi, QueryClient, QueryOptions, Sources, WeatherApi};
use crate::slices::finance::adjacent_symbol;
use crate::slices::news::next_category;
use crate::slices::{FinanceAction, NewsAction, UiAction, WeatherAction};
use crate::store::{Action as StoreAction, LifecycleEvent, RootState, Store};
use crate::tui::event::{handle_key_event, Action, Command, Event, EventHandler};
use crate::tui::ui::render_dashboard;
use crate::widgets::{self, Resolution, WidgetKind, WidgetRegistry};
use crossterm::{
    event::{DisableFocusChange, EnableFocusChange, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Capacity of the channels background tasks report through.
const CHANNEL_CAPACITY: usize = 64;

/// How long a footer status message stays visible.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(2);

/// Core application state for the TUI.
#[derive(Debug)]
pub struct App {
    /// Whether the application should exit.
    pub should_quit: bool,
    /// Count of ticks processed (useful for testing/diagnostics).
    pub tick_count: u64,
    /// Index of the selected slot in the visible layout.
    pub selected_slot: usize,
    /// Temporary status message shown in footer, with expiry time.
    pub status_message: Option<(String, Instant)>,
    store: Store,
    editor: LayoutEditor,
    registry: WidgetRegistry,
    client: QueryClient,
    actions: mpsc::Receiver<StoreAction>,
    feed: FeedState,
    feed_settings: FeedSettings,
    feed_tx: mpsc::Sender<FeedMessage>,
    feed_rx: mpsc::Receiver<FeedMessage>,
    feed_handle: Option<FeedHandle>,
    tick_rate: Duration,
}

impl App {
    /// Creates an app seeded from `config`, backed by the demo sources.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Self::with_sources(config, Sources::demo())
    }

    /// Creates an app seeded from `config`, fetching from `sources`.
    pub fn with_sources(config: &Config, sources: Sources) -> Result<Self, ConfigError> {
        config.validate()?;
        let feed_settings = FeedSettings::from_config(&config.feed)?;
        let (action_tx, actions) = mpsc::channel(CHANNEL_CAPACITY);
        let (feed_tx, feed_rx) = mpsc::channel(CHANNEL_CAPACITY);

        Ok(Self {
            should_quit: false,
            tick_count: 0,
            selected_slot: 0,
            status_message: None,
            store: Store::new(RootState::from_config(config)),
            editor: LayoutEditor::new(),
            registry: WidgetRegistry::new(),
            client: QueryClient::new(sources, action_tx),
            actions,
            feed: feed_settings.initial_state(),
            feed_settings,
            feed_tx,
            feed_rx,
            feed_handle: None,
            tick_rate: config.tui.tick_rate()?,
        })
    }

    /// Current store snapshot.
    pub fn state(&self) -> Arc<RootState> {
        self.store.get_state()
    }

    /// The store handle.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// The layout editor.
    pub fn editor(&self) -> &LayoutEditor {
        &self.editor
    }

    /// The widget registry.
    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    /// Live feed state.
    pub fn feed(&self) -> &FeedState {
        &self.feed
    }

    /// Returns `true` during a layout edit session.
    pub fn is_editing(&self) -> bool {
        self.editor.is_editing()
    }

    /// Layout being shown: staged while editing, committed otherwise.
    pub fn visible_layout(&self) -> DashboardLayout {
        self.editor.visible_layout(&self.store)
    }

    /// Starts the feed task. Must be called from within a tokio runtime.
    pub fn start_feed(&mut self, generator: SampleGenerator) {
        let handle = spawn_feed(self.feed_settings.clone(), generator, self.feed_tx.clone());
        self.feed_handle = Some(handle);
    }

    /// Stops the feed task and aborts outstanding fetches.
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.feed_handle.take() {
            handle.stop();
        }
        self.client.shutdown();
    }

    /// Issues queries for every visible widget.
    ///
    /// Namespaces with no visible widget are skipped, so hidden widgets do
    /// not fetch. Must be called from within a tokio runtime.
    pub fn sync_queries(&self) {
        let state = self.store.get_state();
        let layout = self.visible_layout();
        let visible = |kind: WidgetKind| {
            layout
                .ids()
                .iter()
                .any(|id| self.registry.lookup(id) == Resolution::Registered(kind))
        };

        let weather = QueryOptions::skip_if(!visible(WidgetKind::Weather));
        let news = QueryOptions::skip_if(!visible(WidgetKind::News));
        let finance = QueryOptions::skip_if(!visible(WidgetKind::Finance));

        self.client
            .query::<WeatherApi>(&self.store, widgets::weather::request(&state), weather);
        self.client
            .query::<NewsApi>(&self.store, widgets::news::request(&state), news);
        self.client
            .query::<FinanceApi>(&self.store, widgets::finance::quote_request(&state), finance);
        self.client
            .query::<FinanceApi>(&self.store, widgets::finance::series_request(&state), finance);
    }

    /// Applies everything background tasks have reported.
    ///
    /// Returns `true` if anything arrived.
    pub fn drain_messages(&mut self) -> bool {
        let mut changed = false;
        while let Ok(action) = self.actions.try_recv() {
            self.store.dispatch(action);
            changed = true;
        }
        while let Ok(message) = self.feed_rx.try_recv() {
            self.feed.apply(message);
            changed = true;
        }
        changed
    }

    /// Applies a key command.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::None | Command::Quit => {}
            Command::Customize => {
                self.editor.customize(&self.store);
                self.set_status("Editing layout: [J/K] move, [s] save");
            }
            Command::SaveLayout => match self.editor.save(&self.store) {
                Ok(()) => self.set_status("Layout saved"),
                Err(e) => tracing::debug!("save ignored: {}", e),
            },
            Command::SelectNext => {
                let last = self.visible_layout().len().saturating_sub(1);
                self.selected_slot = (self.selected_slot + 1).min(last);
            }
            Command::SelectPrevious => {
                self.selected_slot = self.selected_slot.saturating_sub(1);
            }
            Command::MoveDown => self.move_selected(LayoutEditor::move_down),
            Command::MoveUp => self.move_selected(LayoutEditor::move_up),
            Command::ToggleSidebar => self.dispatch(StoreAction::Ui(UiAction::ToggleSidebar)),
            Command::CycleTheme => {
                let theme = self.state().ui.theme.next();
                self.dispatch(StoreAction::Ui(UiAction::SetTheme(theme)));
            }
            Command::ToggleUnit => self.dispatch(StoreAction::Weather(WeatherAction::ToggleUnit)),
            Command::PreviousRange => {
                let range = self.state().finance.time_range.previous();
                self.dispatch(StoreAction::Finance(FinanceAction::SetTimeRange(range)));
            }
            Command::NextRange => {
                let range = self.state().finance.time_range.next();
                self.dispatch(StoreAction::Finance(FinanceAction::SetTimeRange(range)));
            }
            Command::WatchSymbol => {
                let symbol = self.state().finance.symbol.clone();
                let action = FinanceAction::AddToWatchlist(symbol.clone());
                if self.dispatch_changed(StoreAction::Finance(action)) {
                    self.set_status(format!("Watching {symbol}"));
                } else {
                    self.set_status(format!("Already watching {symbol}"));
                }
            }
            Command::UnwatchSymbol => {
                let symbol = self.state().finance.symbol.clone();
                let action = FinanceAction::RemoveFromWatchlist(symbol.clone());
                if self.dispatch_changed(StoreAction::Finance(action)) {
                    self.set_status(format!("Stopped watching {symbol}"));
                } else {
                    self.set_status(format!("{symbol} is not on the watchlist"));
                }
            }
            Command::NextSymbol => self.step_symbol(true),
            Command::PreviousSymbol => self.step_symbol(false),
            Command::NextCategory => {
                let category = next_category(&self.state().news.category);
                self.dispatch(StoreAction::News(NewsAction::SetCategory(
                    category.to_string(),
                )));
            }
            Command::SaveFirstArticle => self.save_first_article(),
            Command::Refresh => {
                self.dispatch(StoreAction::Lifecycle(LifecycleEvent::Refreshed));
                self.set_status("Refreshing");
            }
        }
    }

    /// Handles the terminal regaining focus.
    pub fn on_focus_gained(&mut self) {
        self.dispatch(StoreAction::Lifecycle(LifecycleEvent::Focused));
    }

    /// Clears the status message if its expiry time has passed.
    pub fn expire_status_message(&mut self) {
        if let Some((_, expiry)) = &self.status_message {
            if Instant::now() >= *expiry {
                self.status_message = None;
            }
        }
    }

    /// Active status message, if it has not expired.
    pub fn status_text(&self) -> Option<&str> {
        match &self.status_message {
            Some((msg, expiry)) if Instant::now() < *expiry => Some(msg.as_str()),
            _ => None,
        }
    }

    fn dispatch(&self, action: StoreAction) {
        self.store.dispatch(action);
    }

    /// Dispatches `action`, returning `true` if it produced a new snapshot.
    fn dispatch_changed(&self, action: StoreAction) -> bool {
        let before = self.store.get_state();
        self.store.dispatch(action);
        !Arc::ptr_eq(&before, &self.store.get_state())
    }

    /// Focuses the watchlist entry next to the current symbol.
    fn step_symbol(&mut self, forward: bool) {
        let state = self.state();
        let Some(symbol) = adjacent_symbol(&state.finance, forward) else {
            self.set_status("Watchlist is empty");
            return;
        };
        let symbol = symbol.to_string();
        self.dispatch(StoreAction::Finance(FinanceAction::SetSymbol(symbol)));
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now() + STATUS_MESSAGE_TTL));
    }

    fn move_selected(
        &mut self,
        gesture: fn(&mut LayoutEditor, usize) -> Result<usize, crate::layout::LayoutError>,
    ) {
        if !self.editor.is_editing() {
            self.set_status("Press [c] to customize the layout");
            return;
        }
        match gesture(&mut self.editor, self.selected_slot) {
            Ok(slot) => self.selected_slot = slot,
            Err(e) => {
                tracing::warn!("layout move rejected: {}", e);
                self.set_status(e.to_string());
            }
        }
    }

    fn save_first_article(&mut self) {
        let state = self.state();
        let page = state.news_api.read(&widgets::news::request(&state));
        let Some(article) = page.data().and_then(|page| page.articles.first()) else {
            self.set_status("No headline to save");
            return;
        };
        let title = article.title.clone();
        self.dispatch(StoreAction::News(NewsAction::SaveArticle(article.id.clone())));
        self.set_status(format!("Saved: {title}"));
    }

    /// Runs the TUI application: sets up terminal, enters event loop, restores on exit.
    pub async fn run(&mut self) -> io::Result<()> {
        // Install panic hook that restores terminal before printing panic info
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = restore_terminal();
            original_hook(panic_info);
        }));

        setup_terminal()?;
        self.start_feed(SampleGenerator::from_entropy());

        let result = self.event_loop().await;

        self.shutdown();
        restore_terminal()?;
        result
    }

    /// Main event loop: renders UI and processes events.
    async fn event_loop(&mut self) -> io::Result<()> {
        let backend = CrosstermBackend::new(stdout());
        let mut terminal = Terminal::new(backend)?;
        let event_handler = EventHandler::new(self.tick_rate);
        let mut reader = EventStream::new();

        loop {
            self.drain_messages();
            self.sync_queries();
            terminal.draw(|frame| render_dashboard(frame, self))?;

            match event_handler.next(&mut reader).await? {
                Event::Key(key) => {
                    if handle_key_event(self, key) == Action::Quit {
                        self.should_quit = true;
                    }
                }
                Event::FocusGained => self.on_focus_gained(),
                Event::Tick => {
                    self.tick_count += 1;
                    self.expire_status_message();
                }
                Event::Resize(_, _) => {}
            }

            if self.should_quit {
                tracing::info!("quitting dashboard");
                return Ok(());
            }
        }
    }
}

/// Enables raw mode and switches to the alternate screen.
fn setup_terminal() -> io::Result<()> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableFocusChange)?;
    Ok(())
}

/// Restores the terminal to its original state.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen, DisableFocusChange)?;
    Ok(())
}

#[cfg(test)]
mod tests;
