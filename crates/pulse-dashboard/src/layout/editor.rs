//! Layout editor state machine.
//!
//! ```text
//!            customize                    save
//! Viewing ─────────────▶ Editing ─────────────────▶ Viewing
//!                         │  ▲       (dispatches UpdateWidgetOrder)
//!                         └──┘ reorder / move_up / move_down
//! ```
//!
//! While editing, the editor owns a staged copy of the layout. The store is
//! never touched until `save`, which replaces the committed order with one
//! dispatch so every subscriber sees the new order at once. Every exit from
//! an edit session commits; there is no discard transition.

use super::{DashboardLayout, LayoutError};
use crate::slices::UiAction;
use crate::store::{Action, Store};
use crate::WidgetId;

/// Current state of the editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditorState {
    /// Showing the committed layout.
    #[default]
    Viewing,
    /// Rearranging a staged copy of the layout.
    Editing {
        /// Working order, committed on save.
        staged: DashboardLayout,
    },
}

/// Interactive reordering surface for the dashboard grid.
#[derive(Debug, Clone, Default)]
pub struct LayoutEditor {
    state: EditorState,
}

impl LayoutEditor {
    /// Creates an editor in the `Viewing` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Returns `true` during an edit session.
    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditorState::Editing { .. })
    }

    /// Staged order, if an edit session is active.
    pub fn staged(&self) -> Option<&DashboardLayout> {
        match &self.state {
            EditorState::Editing { staged } => Some(staged),
            EditorState::Viewing => None,
        }
    }

    /// Starts an edit session by copying the committed layout.
    ///
    /// Calling this while already editing keeps the current staged order.
    pub fn customize(&mut self, store: &Store) {
        if self.is_editing() {
            return;
        }
        let staged = store.get_state().ui.dashboard_layout.clone();
        tracing::debug!("layout edit session started with {} widgets", staged.len());
        self.state = EditorState::Editing { staged };
    }

    /// Replaces the staged order with `permutation`.
    ///
    /// The permutation must hold exactly the staged ids. Anything else is
    /// rejected and the staged order is left as it was.
    pub fn reorder(&mut self, permutation: Vec<WidgetId>) -> Result<(), LayoutError> {
        let EditorState::Editing { staged } = &mut self.state else {
            return Err(LayoutError::NotEditing);
        };
        if !staged.is_permutation(&permutation) {
            tracing::warn!("rejected reorder {:?} of {:?}", permutation, staged.ids());
            return Err(LayoutError::NotAPermutation {
                expected: staged.ids().to_vec(),
                actual: permutation,
            });
        }
        *staged = DashboardLayout::from_ids(permutation);
        Ok(())
    }

    /// Moves the widget at `index` one slot towards the front.
    ///
    /// Returns the widget's new index. Moving the first widget is a no-op.
    pub fn move_up(&mut self, index: usize) -> Result<usize, LayoutError> {
        if index == 0 {
            self.check_slot(index)?;
            return Ok(0);
        }
        self.swap(index - 1, index)?;
        Ok(index - 1)
    }

    /// Moves the widget at `index` one slot towards the back.
    ///
    /// Returns the widget's new index. Moving the last widget is a no-op.
    pub fn move_down(&mut self, index: usize) -> Result<usize, LayoutError> {
        let len = self.check_slot(index)?;
        if index + 1 == len {
            return Ok(index);
        }
        self.swap(index, index + 1)?;
        Ok(index + 1)
    }

    /// Commits the staged order to the store and returns to `Viewing`.
    pub fn save(&mut self, store: &Store) -> Result<(), LayoutError> {
        match std::mem::take(&mut self.state) {
            EditorState::Editing { staged } => {
                tracing::info!("saving dashboard layout: {:?}", staged.ids());
                store.dispatch(Action::Ui(UiAction::UpdateWidgetOrder(staged)));
                Ok(())
            }
            EditorState::Viewing => Err(LayoutError::NotEditing),
        }
    }

    /// Layout to render: the staged order while editing, otherwise the
    /// committed one.
    pub fn visible_layout(&self, store: &Store) -> DashboardLayout {
        match &self.state {
            EditorState::Editing { staged } => staged.clone(),
            EditorState::Viewing => store.get_state().ui.dashboard_layout.clone(),
        }
    }

    /// Validates `index` against the staged order, returning its length.
    fn check_slot(&self, index: usize) -> Result<usize, LayoutError> {
        let staged = self.staged().ok_or(LayoutError::NotEditing)?;
        if index >= staged.len() {
            return Err(LayoutError::SlotOutOfRange {
                index,
                len: staged.len(),
            });
        }
        Ok(staged.len())
    }

    fn swap(&mut self, a: usize, b: usize) -> Result<(), LayoutError> {
        self.check_slot(b)?;
        let mut order = self
            .staged()
            .map(|s| s.ids().to_vec())
            .ok_or(LayoutError::NotEditing)?;
        order.swap(a, b);
        self.reorder(order)
    }
}
