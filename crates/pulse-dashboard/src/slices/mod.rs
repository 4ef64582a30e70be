//! Preference slices.
//!
//! Each slice is an independent partition of the state tree owned by one
//! feature area. A slice exposes a closed set of actions and a pure
//! `reduce(&State, Action) -> State` transition function. Transitions are
//! total: inputs are validated at the UI boundary, so no action can fail.
//!
//! Collections that must stay duplicate-free (watchlist, saved articles,
//! saved locations, widget order) share the [`UniqueList`] type, whose
//! add and remove operations are idempotent.

pub mod finance;
pub mod news;
pub mod ui;
pub mod weather;

pub use finance::{FinanceAction, FinancePreferences};
pub use news::{NewsAction, NewsPreferences};
pub use ui::{UiAction, UiPreferences};
pub use weather::{WeatherAction, WeatherPreferences};

use serde::{Deserialize, Serialize};

/// Ordered sequence without duplicates.
///
/// Insertion order is preserved. Building a list from an iterator keeps the
/// first occurrence of each value and drops later repeats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<T>", into = "Vec<T>")]
#[serde(bound(
    serialize = "T: Clone + PartialEq + Serialize",
    deserialize = "T: PartialEq + Deserialize<'de>"
))]
pub struct UniqueList<T: PartialEq> {
    items: Vec<T>,
}

impl<T: PartialEq> UniqueList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Appends `item` unless it is already present.
    ///
    /// Returns `true` if the item was added.
    pub fn insert(&mut self, item: T) -> bool {
        if self.items.contains(&item) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Removes `item` if present, preserving the order of the rest.
    ///
    /// Returns `true` if the item was removed.
    pub fn remove(&mut self, item: &T) -> bool {
        let before = self.items.len();
        self.items.retain(|existing| existing != item);
        self.items.len() != before
    }

    /// Returns `true` if `item` is in the list.
    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the list holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in insertion order.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Iterates over the items in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T: PartialEq> Default for UniqueList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> FromIterator<T> for UniqueList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for item in iter {
            list.insert(item);
        }
        list
    }
}

impl<T: PartialEq> From<Vec<T>> for UniqueList<T> {
    fn from(items: Vec<T>) -> Self {
        items.into_iter().collect()
    }
}

impl<T: PartialEq> From<UniqueList<T>> for Vec<T> {
    fn from(list: UniqueList<T>) -> Self {
        list.items
    }
}

impl<'a, T: PartialEq> IntoIterator for &'a UniqueList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
