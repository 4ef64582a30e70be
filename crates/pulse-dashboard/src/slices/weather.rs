//! Weather preferences: active location, measurement unit, saved locations.

use super::UniqueList;
use crate::Unit;

/// Weather slice state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeatherPreferences {
    /// Location being displayed. Empty means the data source default.
    pub location: String,
    /// Unit used for temperatures and wind speed.
    pub unit: Unit,
    /// Locations the user bookmarked, in the order they were added.
    pub saved_locations: UniqueList<String>,
}

/// Actions accepted by [`reduce`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeatherAction {
    /// Replace the active location.
    SetLocation(String),
    /// Switch between metric and imperial.
    ToggleUnit,
    /// Bookmark a location (no-op if already saved).
    AddSavedLocation(String),
    /// Remove a bookmarked location (no-op if absent).
    RemoveSavedLocation(String),
}

/// Applies `action` to `state`, returning the next state.
pub fn reduce(state: &WeatherPreferences, action: WeatherAction) -> WeatherPreferences {
    let mut next = state.clone();
    match action {
        WeatherAction::SetLocation(location) => next.location = location,
        WeatherAction::ToggleUnit => next.unit = next.unit.toggled(),
        WeatherAction::AddSavedLocation(location) => {
            next.saved_locations.insert(location);
        }
        WeatherAction::RemoveSavedLocation(location) => {
            next.saved_locations.remove(&location);
        }
    }
    next
}
