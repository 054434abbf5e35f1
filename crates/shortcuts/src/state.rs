//! Dispatcher state and its transitions.
//!
//! Invariants:
//! - Selection and mode updates overwrite the cached values (last write wins).
//! - The clipboard holds its own copy of the element state; later changes to
//!   the selection never reach it.

use crate::model::{DrawElementState, SelectedElement};

/// Selection, clipboard and mode as seen by the dispatcher.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShortcutState {
    selection: Option<SelectedElement>,
    clipboard: Option<DrawElementState>,
    editable: bool,
}

impl ShortcutState {
    pub fn new(editable: bool) -> Self {
        Self {
            editable,
            ..Self::default()
        }
    }

    pub fn selection(&self) -> Option<&SelectedElement> {
        self.selection.as_ref()
    }

    pub fn clipboard(&self) -> Option<&DrawElementState> {
        self.clipboard.as_ref()
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn select(&mut self, selection: Option<SelectedElement>) {
        self.selection = selection;
    }

    pub fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
    }

    /// Snapshot the selection into the clipboard.
    ///
    /// With nothing selected the clipboard is emptied. Returns true if the
    /// clipboard now holds an element.
    pub fn copy_selection(&mut self) -> bool {
        self.clipboard = self.selection.as_ref().map(|selected| selected.state.clone());
        self.clipboard.is_some()
    }

    /// Forget selection and clipboard.
    pub fn clear(&mut self) {
        self.selection = None;
        self.clipboard = None;
    }
}
