//! Shared test helpers: a recording map state.

#![allow(dead_code)]

use tokio::sync::watch;
use zskarte_shortcuts::{
    DisplayMode, DrawElementKind, DrawElementState, DrawLayer, MapState, MapStateError,
    SelectedElement,
};

/// Everything the dispatcher asked the map to do, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum MapCall {
    Draw(String, DrawElementKind),
    Remove(String),
    Add(DrawElementState),
    Undo,
    Redo,
    CancelDrawing,
}

#[derive(Debug)]
pub struct RecordingLayer {
    pub id: String,
    pub calls: Vec<MapCall>,
}

impl DrawLayer for RecordingLayer {
    fn draw(&mut self, kind: DrawElementKind) -> Result<(), MapStateError> {
        self.calls.push(MapCall::Draw(self.id.clone(), kind));
        Ok(())
    }
}

#[derive(Debug)]
pub struct RecordingMap {
    pub calls: Vec<MapCall>,
    pub layer: Option<RecordingLayer>,
    pub fail_undo: bool,
    selection: watch::Sender<Option<SelectedElement>>,
    display_mode: watch::Sender<DisplayMode>,
    editable: watch::Sender<bool>,
}

impl RecordingMap {
    pub fn new(display_mode: DisplayMode) -> Self {
        Self {
            calls: Vec::new(),
            layer: Some(RecordingLayer {
                id: "layer-1".to_string(),
                calls: Vec::new(),
            }),
            fail_undo: false,
            selection: watch::channel(None).0,
            display_mode: watch::channel(display_mode).0,
            editable: watch::channel(display_mode.is_editable()).0,
        }
    }

    pub fn editable() -> Self {
        Self::new(DisplayMode::Draw)
    }

    pub fn without_layer(mut self) -> Self {
        self.layer = None;
        self
    }

    pub fn select(&self, selection: Option<SelectedElement>) {
        self.selection.send_replace(selection);
    }

    /// Edit the live selection in place, as the map editor does.
    pub fn edit_selection(&self, edit: impl FnOnce(&mut DrawElementState)) {
        self.selection.send_modify(|selection| {
            if let Some(selected) = selection.as_mut() {
                edit(&mut selected.state);
            }
        });
    }

    pub fn set_display_mode(&self, mode: DisplayMode) {
        self.display_mode.send_replace(mode);
        self.editable.send_replace(mode.is_editable());
    }

    /// Every call, layer draws included, in order per target.
    pub fn all_calls(&self) -> Vec<MapCall> {
        let mut calls = self.calls.clone();
        if let Some(layer) = &self.layer {
            calls.extend(layer.calls.iter().cloned());
        }
        calls
    }
}

impl MapState for RecordingMap {
    fn observe_selected_element(&self) -> watch::Receiver<Option<SelectedElement>> {
        self.selection.subscribe()
    }

    fn observe_editable_mode(&self) -> watch::Receiver<bool> {
        self.editable.subscribe()
    }

    fn active_layer(&mut self) -> Option<&mut dyn DrawLayer> {
        self.layer.as_mut().map(|layer| layer as &mut dyn DrawLayer)
    }

    fn remove_element(&mut self, id: &str) -> Result<(), MapStateError> {
        self.calls.push(MapCall::Remove(id.to_string()));
        Ok(())
    }

    fn add_element(&mut self, element: DrawElementState) -> Result<(), MapStateError> {
        self.calls.push(MapCall::Add(element));
        Ok(())
    }

    fn undo(&mut self) -> Result<(), MapStateError> {
        if self.fail_undo {
            return Err(MapStateError::NothingToUndo);
        }
        self.calls.push(MapCall::Undo);
        Ok(())
    }

    fn redo(&mut self) -> Result<(), MapStateError> {
        self.calls.push(MapCall::Redo);
        Ok(())
    }

    fn cancel_drawing(&mut self) -> Result<(), MapStateError> {
        self.calls.push(MapCall::CancelDrawing);
        Ok(())
    }
}

pub fn polygon(id: &str, name: &str) -> SelectedElement {
    let mut state = DrawElementState::new(DrawElementKind::Polygon);
    state.id = Some(id.to_string());
    state.layer = Some("layer-1".to_string());
    state.properties.name = Some(name.to_string());
    SelectedElement::new(id, state)
}
