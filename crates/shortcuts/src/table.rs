//! Command table: which combination triggers which command.
//!
//! Responsibilities:
//! - Bind every `ShortcutCommand` to a descriptor, applying user overrides.
//! - Execute a command against the dispatcher state and the map state.
//! - Produce rows for a shortcut help overlay.
//!
//! Invariants:
//! - Bindings keep `ShortcutCommand::ALL` order; matches run in that order.
//! - Only `Copy` is active outside the editable mode.
//! - Invalid overrides never reach the table; it falls back to the defaults.

use zskarte_config::keybind::{KeyFilter, validate_overrides};
use zskarte_config::{ShortcutCommand, ShortcutConfig, ShortcutOverrides};

use crate::event::KeyEvent;
use crate::map_state::{MapState, MapStateError};
use crate::matcher::{ListenOptions, ShortcutDescriptor};
use crate::model::DrawElementKind;
use crate::state::ShortcutState;

/// One row of the command table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutBinding {
    pub command: ShortcutCommand,
    pub descriptor: ShortcutDescriptor,
}

/// A help overlay row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpEntry {
    pub keys: String,
    pub description: &'static str,
    pub editable_only: bool,
}

fn requires_editable_mode(command: ShortcutCommand) -> bool {
    !matches!(command, ShortcutCommand::Copy)
}

fn description(command: ShortcutCommand) -> &'static str {
    match command {
        ShortcutCommand::RemoveSelection => "Remove the selected element",
        ShortcutCommand::DrawText => "Draw text",
        ShortcutCommand::DrawPolygon => "Draw polygon",
        ShortcutCommand::DrawLine => "Draw line",
        ShortcutCommand::DrawFreehand => "Draw freehand",
        ShortcutCommand::DrawSymbol => "Place symbol",
        ShortcutCommand::Copy => "Copy the selected element",
        ShortcutCommand::Paste => "Paste the copied element",
        ShortcutCommand::Undo => "Undo",
        ShortcutCommand::Redo => "Redo",
        ShortcutCommand::CancelDrawing => "Cancel drawing",
    }
}

fn draw_kind(command: ShortcutCommand) -> Option<DrawElementKind> {
    match command {
        ShortcutCommand::DrawText => Some(DrawElementKind::Text),
        ShortcutCommand::DrawPolygon => Some(DrawElementKind::Polygon),
        ShortcutCommand::DrawLine => Some(DrawElementKind::Line),
        ShortcutCommand::DrawFreehand => Some(DrawElementKind::Freehand),
        ShortcutCommand::DrawSymbol => Some(DrawElementKind::Symbol),
        _ => None,
    }
}

/// The fixed set of command bindings of a dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutTable {
    bindings: Vec<ShortcutBinding>,
}

impl ShortcutTable {
    /// Built-in bindings.
    pub fn defaults(prevent_default: bool) -> Self {
        Self::build(&ShortcutOverrides::default(), prevent_default)
    }

    /// Bindings with user overrides applied.
    ///
    /// If the overrides do not validate, a warning is logged and the
    /// defaults are used instead.
    pub fn from_overrides(overrides: &ShortcutOverrides, prevent_default: bool) -> Self {
        if overrides.is_empty() {
            tracing::debug!("No shortcut overrides configured");
            return Self::defaults(prevent_default);
        }

        if let Err(e) = validate_overrides(&overrides.overrides) {
            tracing::warn!("Shortcut override validation failed: {}. Using default shortcuts.", e);
            return Self::defaults(prevent_default);
        }

        tracing::info!("Loaded {} shortcut override(s)", overrides.overrides.len());
        Self::build(overrides, prevent_default)
    }

    pub fn from_config(config: &ShortcutConfig) -> Self {
        Self::from_overrides(&config.overrides, config.prevent_default)
    }

    fn build(overrides: &ShortcutOverrides, prevent_default: bool) -> Self {
        let bindings = ShortcutCommand::ALL
            .into_iter()
            .map(|command| ShortcutBinding {
                command,
                descriptor: ShortcutDescriptor::with_filter(
                    KeyFilter::parse(overrides.spec_for(command)),
                    ListenOptions {
                        requires_editable_mode: requires_editable_mode(command),
                        prevent_default,
                    },
                ),
            })
            .collect();
        Self { bindings }
    }

    pub fn bindings(&self) -> &[ShortcutBinding] {
        &self.bindings
    }

    pub fn binding(&self, command: ShortcutCommand) -> Option<&ShortcutBinding> {
        self.bindings.iter().find(|binding| binding.command == command)
    }

    /// Commands triggered by `event`, in table order.
    pub fn matching(&self, event: &KeyEvent, editable: bool) -> Vec<ShortcutCommand> {
        self.bindings
            .iter()
            .filter(|binding| binding.descriptor.matches(event, editable))
            .map(|binding| binding.command)
            .collect()
    }

    pub fn help_entries(&self) -> Vec<HelpEntry> {
        self.bindings
            .iter()
            .map(|binding| HelpEntry {
                keys: binding.descriptor.filter().to_string(),
                description: description(binding.command),
                editable_only: binding.descriptor.requires_editable_mode(),
            })
            .collect()
    }
}

impl Default for ShortcutTable {
    fn default() -> Self {
        Self::defaults(true)
    }
}

/// Run `command`. Missing preconditions (no selection, empty clipboard) are no-ops.
pub(crate) fn execute<M>(
    command: ShortcutCommand,
    state: &mut ShortcutState,
    map: &mut M,
) -> Result<(), MapStateError>
where
    M: MapState + ?Sized,
{
    if let Some(kind) = draw_kind(command) {
        let layer = map.active_layer().ok_or(MapStateError::NoActiveLayer)?;
        return layer.draw(kind);
    }

    match command {
        ShortcutCommand::RemoveSelection => match state.selection() {
            Some(selected) => map.remove_element(&selected.id),
            None => Ok(()),
        },
        ShortcutCommand::Copy => {
            state.copy_selection();
            Ok(())
        }
        ShortcutCommand::Paste => match state.clipboard() {
            Some(element) => map.add_element(element.clone()),
            None => Ok(()),
        },
        ShortcutCommand::Undo => map.undo(),
        ShortcutCommand::Redo => map.redo(),
        ShortcutCommand::CancelDrawing => map.cancel_drawing(),
        ShortcutCommand::DrawText
        | ShortcutCommand::DrawPolygon
        | ShortcutCommand::DrawLine
        | ShortcutCommand::DrawFreehand
        | ShortcutCommand::DrawSymbol => Ok(()),
    }
}
