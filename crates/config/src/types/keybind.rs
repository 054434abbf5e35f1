//! Shortcut command identifiers and user overrides.
//!
//! Responsibilities:
//! - Define the commands the dispatcher can bind (`ShortcutCommand`).
//! - Define each command's default combination spec.
//! - Define `ShortcutOverrides` for user-defined replacements.
//!
//! Does NOT handle:
//! - Combination parsing or validation (see `keybind` module at crate root).
//! - Runtime key event matching or command execution (see shortcuts crate).
//!
//! Invariants:
//! - `ShortcutCommand` uses snake_case serialization for config file consistency.
//! - `ShortcutOverrides` uses `BTreeMap` for deterministic serialization.
//! - Only commands explicitly listed in overrides replace the defaults.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A bindable shortcut command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ShortcutCommand {
    /// Remove the selected element
    RemoveSelection,
    /// Start drawing a text element on the active layer
    DrawText,
    /// Start drawing a polygon on the active layer
    DrawPolygon,
    /// Start drawing a line on the active layer
    DrawLine,
    /// Start a freehand drawing on the active layer
    DrawFreehand,
    /// Start placing a symbol on the active layer
    DrawSymbol,
    /// Copy the selected element into the clipboard
    Copy,
    /// Paste the clipboard as a new element
    Paste,
    /// Undo the last map state change
    Undo,
    /// Redo the last undone map state change
    Redo,
    /// Cancel the current drawing operation
    CancelDrawing,
}

impl ShortcutCommand {
    /// Every command, in command table order.
    pub const ALL: [Self; 11] = [
        Self::RemoveSelection,
        Self::DrawText,
        Self::DrawPolygon,
        Self::DrawLine,
        Self::DrawFreehand,
        Self::DrawSymbol,
        Self::Copy,
        Self::Paste,
        Self::Undo,
        Self::Redo,
        Self::CancelDrawing,
    ];

    /// The built-in combination spec for this command.
    pub fn default_spec(self) -> &'static str {
        match self {
            Self::RemoveSelection => "mod+backspace",
            Self::DrawText => "mod+1",
            Self::DrawPolygon => "mod+2",
            Self::DrawLine => "mod+3",
            Self::DrawFreehand => "mod+4",
            Self::DrawSymbol => "mod+5",
            Self::Copy => "mod+c",
            Self::Paste => "mod+v",
            Self::Undo => "mod+z",
            Self::Redo => "mod+y",
            Self::CancelDrawing => "escape",
        }
    }
}

impl fmt::Display for ShortcutCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::RemoveSelection => "remove_selection",
            Self::DrawText => "draw_text",
            Self::DrawPolygon => "draw_polygon",
            Self::DrawLine => "draw_line",
            Self::DrawFreehand => "draw_freehand",
            Self::DrawSymbol => "draw_symbol",
            Self::Copy => "copy",
            Self::Paste => "paste",
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::CancelDrawing => "cancel_drawing",
        };
        write!(f, "{}", name)
    }
}

/// User-defined shortcut overrides.
///
/// Maps commands to combination specs. Serialized as a plain JSON object
/// (`{"undo": "mod+shift+z"}`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortcutOverrides {
    /// Map of command -> combination spec.
    pub overrides: BTreeMap<ShortcutCommand, String>,
}

impl ShortcutOverrides {
    /// Returns true if there are no overrides configured.
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    /// Get the override for a specific command, if any.
    pub fn get(&self, command: ShortcutCommand) -> Option<&str> {
        self.overrides.get(&command).map(|s| s.as_str())
    }

    /// The effective spec for a command: its override, or the default.
    pub fn spec_for(&self, command: ShortcutCommand) -> &str {
        self.get(command).unwrap_or_else(|| command.default_spec())
    }
}
