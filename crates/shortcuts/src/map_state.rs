//! Contract of the map-state collaborator.
//!
//! The dispatcher never owns map data. It observes the selection and the
//! editable mode, and asks the map state to perform edits.

use thiserror::Error;
use tokio::sync::watch;

use crate::model::{DrawElementKind, DrawElementState, SelectedElement};

/// Failures reported by the map state. The dispatcher absorbs all of them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MapStateError {
    #[error("no active layer")]
    NoActiveLayer,

    #[error("element '{0}' not found")]
    ElementNotFound(String),

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,

    #[error("map state rejected the change: {0}")]
    Rejected(String),
}

/// A layer that can start a draw interaction.
pub trait DrawLayer {
    /// Arm the draw tool for `kind` on this layer.
    fn draw(&mut self, kind: DrawElementKind) -> Result<(), MapStateError>;
}

/// Operations the dispatcher consumes from the map state.
pub trait MapState {
    /// Current selection; the receiver's value is the latest selection.
    fn observe_selected_element(&self) -> watch::Receiver<Option<SelectedElement>>;

    /// Current editable mode.
    fn observe_editable_mode(&self) -> watch::Receiver<bool>;

    fn active_layer(&mut self) -> Option<&mut dyn DrawLayer>;

    fn remove_element(&mut self, id: &str) -> Result<(), MapStateError>;

    fn add_element(&mut self, element: DrawElementState) -> Result<(), MapStateError>;

    fn undo(&mut self) -> Result<(), MapStateError>;

    fn redo(&mut self) -> Result<(), MapStateError>;

    fn cancel_drawing(&mut self) -> Result<(), MapStateError>;
}
