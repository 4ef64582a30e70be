//! Dashboard layout and layout editing.
//!
//! [`DashboardLayout`] is the committed widget order stored in the UI slice.
//! [`LayoutEditor`] stages a working copy while the user rearranges widgets
//! and writes it back to the store only when the session is saved.

mod editor;

pub use editor::{EditorState, LayoutEditor};

use crate::slices::UniqueList;
use crate::WidgetId;
use serde::{Deserialize, Serialize};

/// Widget order of a fresh store.
pub const DEFAULT_WIDGETS: [&str; 3] = ["weather", "news", "finance"];

/// Ordered widget ids; order is render order.
///
/// Duplicate ids are dropped on construction (first occurrence wins), so a
/// layout never renders the same widget twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DashboardLayout(UniqueList<WidgetId>);

impl DashboardLayout {
    /// Builds a layout from ids, dropping repeats.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<WidgetId>,
    {
        Self(ids.into_iter().map(Into::into).collect())
    }

    /// Ids in render order.
    pub fn ids(&self) -> &[WidgetId] {
        self.0.as_slice()
    }

    /// Number of widgets in the layout.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the layout has no widgets.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if `candidate` holds exactly the same ids, in any order.
    ///
    /// Repeated ids in `candidate` never match, since a layout has none.
    pub fn is_permutation(&self, candidate: &[WidgetId]) -> bool {
        if candidate.len() != self.len() {
            return false;
        }
        let mut expected: Vec<&WidgetId> = self.ids().iter().collect();
        let mut actual: Vec<&WidgetId> = candidate.iter().collect();
        expected.sort();
        actual.sort();
        expected == actual
    }
}

impl Default for DashboardLayout {
    fn default() -> Self {
        Self::from_ids(DEFAULT_WIDGETS)
    }
}

/// Errors raised by the layout editor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// A reorder or save was requested outside an edit session.
    #[error("layout editor is not in an edit session")]
    NotEditing,

    /// The proposed order adds, drops or repeats widgets.
    #[error("reorder must be a permutation of the staged widgets: expected {expected:?}, got {actual:?}")]
    NotAPermutation {
        /// Staged order at the time of the request.
        expected: Vec<WidgetId>,
        /// The rejected order.
        actual: Vec<WidgetId>,
    },

    /// A move gesture referenced a slot past the end of the layout.
    #[error("slot {index} is out of range for a layout of {len} widgets")]
    SlotOutOfRange {
        /// Requested slot.
        index: usize,
        /// Number of slots in the staged order.
        len: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<WidgetId> {
        raw.iter().map(|s| WidgetId::from(*s)).collect()
    }

    #[test]
    fn test_default_layout() {
        let layout = DashboardLayout::default();
        assert_eq!(layout.ids(), ids(&["weather", "news", "finance"]).as_slice());
    }

    #[test]
    fn test_from_ids_drops_duplicates() {
        let layout = DashboardLayout::from_ids(["news", "weather", "news"]);
        assert_eq!(layout.ids(), ids(&["news", "weather"]).as_slice());
    }

    #[test]
    fn test_is_permutation_accepts_reordering() {
        let layout = DashboardLayout::default();
        assert!(layout.is_permutation(&ids(&["finance", "weather", "news"])));
        assert!(layout.is_permutation(&ids(&["weather", "news", "finance"])));
    }

    #[test]
    fn test_is_permutation_rejects_changed_sets() {
        let layout = DashboardLayout::default();
        assert!(!layout.is_permutation(&ids(&["weather", "news"])));
        assert!(!layout.is_permutation(&ids(&["weather", "news", "globe"])));
        assert!(!layout.is_permutation(&ids(&["weather", "news", "news"])));
        assert!(!layout.is_permutation(&ids(&["weather", "news", "finance", "globe"])));
    }

    #[test]
    fn test_deserialize_from_string_list() {
        let layout: DashboardLayout =
            serde_json::from_str(r#"["finance","news","finance"]"#).expect("valid json");
        assert_eq!(layout.ids(), ids(&["finance", "news"]).as_slice());
    }
}
