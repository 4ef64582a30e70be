//! UI preferences: sidebar visibility, theme, dashboard widget order.

use crate::layout::DashboardLayout;
use crate::Theme;

/// UI slice state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiPreferences {
    /// Whether the navigation sidebar is shown.
    pub sidebar_open: bool,
    /// Theme preference.
    pub theme: Theme,
    /// Committed widget order.
    pub dashboard_layout: DashboardLayout,
}

/// Actions accepted by [`reduce`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    /// Flip sidebar visibility.
    ToggleSidebar,
    /// Set sidebar visibility explicitly.
    SetSidebarOpen(bool),
    /// Change the theme preference.
    SetTheme(Theme),
    /// Replace the whole widget order in one step.
    ///
    /// This is the only action that touches the layout; the layout editor
    /// dispatches it once when an edit session is saved.
    UpdateWidgetOrder(DashboardLayout),
}

/// Applies `action` to `state`, returning the next state.
pub fn reduce(state: &UiPreferences, action: UiAction) -> UiPreferences {
    let mut next = state.clone();
    match action {
        UiAction::ToggleSidebar => next.sidebar_open = !next.sidebar_open,
        UiAction::SetSidebarOpen(open) => next.sidebar_open = open,
        UiAction::SetTheme(theme) => next.theme = theme,
        UiAction::UpdateWidgetOrder(layout) => next.dashboard_layout = layout,
    }
    next
}
