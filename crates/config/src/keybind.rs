//! Shortcut combination parsing and validation.
//!
//! Responsibilities:
//! - Parse `+`-joined shortcut specs (`"mod+shift+z"`) into `KeyCombination`s.
//! - Provide the lenient `KeyFilter` used at registration time, where a
//!   malformed or empty spec degrades to "match every event".
//! - Validate user overrides for syntax errors, reserved combinations and conflicts.
//!
//! Does NOT handle:
//! - Runtime key event matching (see the shortcuts crate).
//! - Loading overrides from disk (see `loader`).
//!
//! Invariants:
//! - `mod`, `meta`, `cmd` and `ctrl` all map to the single primary modifier flag.
//! - Base keys are stored lower-cased with aliases resolved to physical code names.
//! - A `KeyCombination` always carries exactly one non-empty base key.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use thiserror::Error;

use crate::types::keybind::ShortcutCommand;

/// Errors that can occur when parsing or validating shortcut combinations.
#[derive(Debug, Error, PartialEq)]
pub enum KeybindError {
    /// Invalid combination syntax
    #[error("Invalid shortcut syntax: '{key}'. Expected format like 'z', 'mod+z', 'shift+alt+f1'")]
    InvalidSyntax {
        /// The invalid spec
        key: String,
    },

    /// More than one non-modifier token
    #[error("Shortcut '{key}' names more than one base key ('{first}' and '{extra}')")]
    MultipleKeys {
        /// The full spec
        key: String,
        /// The base key that would be used
        first: String,
        /// The first ignored token
        extra: String,
    },

    /// Conflicting keybindings
    #[error("Conflicting shortcuts: '{key}' is assigned to both {action1} and {action2}")]
    Conflict {
        /// The conflicting combination
        key: String,
        /// First command using this combination
        action1: String,
        /// Second command using this combination
        action2: String,
    },

    /// Combination owned by the browser
    #[error("Reserved shortcut: '{key}' is handled by the browser and cannot be bound")]
    ReservedKey {
        /// The reserved combination
        key: String,
    },
}

/// Modifier flags of a key combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct ModifierFlags {
    /// Shift key pressed
    pub shift: bool,
    /// Alt/Option key pressed
    pub alt: bool,
    /// Ctrl (Windows/Linux) or Cmd (macOS) pressed
    pub primary: bool,
}

impl ModifierFlags {
    /// No modifiers.
    pub const NONE: Self = Self {
        shift: false,
        alt: false,
        primary: false,
    };

    /// Only the primary modifier.
    pub const PRIMARY: Self = Self {
        shift: false,
        alt: false,
        primary: true,
    };

    /// Returns true if no modifier is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

impl fmt::Display for ModifierFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.primary {
            parts.push("Mod");
        }
        if self.shift {
            parts.push("Shift");
        }
        if self.alt {
            parts.push("Alt");
        }
        if parts.is_empty() {
            write!(f, "None")
        } else {
            write!(f, "{}", parts.join("+"))
        }
    }
}

/// A parsed key combination: modifier flags plus exactly one base key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombination {
    /// Modifier flags
    pub modifiers: ModifierFlags,
    key: String,
}

impl KeyCombination {
    /// Build a combination from modifiers and a base key token.
    ///
    /// The token is lower-cased and aliases are resolved (`esc` -> `escape`).
    pub fn new(modifiers: ModifierFlags, key: &str) -> Self {
        Self {
            modifiers,
            key: canonical_key(&key.trim().to_ascii_lowercase()),
        }
    }

    /// The normalized base key (`"z"`, `"1"`, `"backspace"`).
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for KeyCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.modifiers.is_empty() {
            write!(f, "{}+", self.modifiers)?;
        }
        let mut chars = self.key.chars();
        match chars.next() {
            Some(first) => write!(f, "{}{}", first.to_ascii_uppercase(), chars.as_str()),
            None => Ok(()),
        }
    }
}

/// Key filter of a registered shortcut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyFilter {
    /// No key filter: every qualifying event matches.
    Any,
    /// Only events with exactly this combination match.
    Combination(KeyCombination),
}

impl KeyFilter {
    /// Parse a spec leniently.
    ///
    /// Empty specs and specs without a base key yield `KeyFilter::Any`.
    /// Extra non-modifier tokens are ignored; the first one wins.
    pub fn parse(spec: &str) -> Self {
        let split = split_spec(spec);
        let mut keys = split.keys.into_iter();
        let Some(first) = keys.next() else {
            if !spec.trim().is_empty() {
                tracing::debug!(spec, "Shortcut spec has no base key, matching every event");
            }
            return Self::Any;
        };
        let ignored: Vec<String> = keys.collect();
        if !ignored.is_empty() {
            tracing::warn!(
                spec,
                key = %first,
                ?ignored,
                "Shortcut spec names more than one base key, ignoring the rest"
            );
        }
        Self::Combination(KeyCombination::new(split.modifiers, &first))
    }

    /// Parse an optional spec; `None` means "match every event".
    pub fn from_spec(spec: Option<&str>) -> Self {
        spec.map_or(Self::Any, Self::parse)
    }

    /// The combination, if this filter has one.
    pub fn combination(&self) -> Option<&KeyCombination> {
        match self {
            Self::Any => None,
            Self::Combination(combination) => Some(combination),
        }
    }
}

impl fmt::Display for KeyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "Any"),
            Self::Combination(combination) => write!(f, "{}", combination),
        }
    }
}

struct SplitSpec {
    modifiers: ModifierFlags,
    keys: Vec<String>,
}

fn split_spec(spec: &str) -> SplitSpec {
    let mut modifiers = ModifierFlags::default();
    let mut keys = Vec::new();

    for token in spec.split('+').map(|s| s.trim().to_ascii_lowercase()) {
        match token.as_str() {
            "" => {}
            "shift" => modifiers.shift = true,
            "alt" => modifiers.alt = true,
            "mod" | "meta" | "cmd" | "ctrl" => modifiers.primary = true,
            _ => keys.push(token),
        }
    }

    SplitSpec { modifiers, keys }
}

/// Resolve common key aliases to their physical code names.
fn canonical_key(token: &str) -> String {
    match token {
        "esc" => "escape",
        "return" => "enter",
        "del" => "delete",
        "ins" => "insert",
        "spacebar" => "space",
        "up" => "arrowup",
        "down" => "arrowdown",
        "left" => "arrowleft",
        "right" => "arrowright",
        "pgup" | "page_up" => "pageup",
        "pgdn" | "page_down" => "pagedown",
        other => other,
    }
    .to_string()
}

/// Parse a spec strictly.
///
/// # Examples
///
/// ```
/// use zskarte_config::keybind::{parse_combination, ModifierFlags};
///
/// let combination = parse_combination("shift+mod+1").unwrap();
/// assert_eq!(combination.key(), "1");
/// assert!(combination.modifiers.primary && combination.modifiers.shift);
///
/// assert!(parse_combination("mod+shift").is_err());
/// ```
pub fn parse_combination(spec: &str) -> Result<KeyCombination, KeybindError> {
    let split = split_spec(spec);
    match split.keys.as_slice() {
        [] => Err(KeybindError::InvalidSyntax {
            key: spec.to_string(),
        }),
        [key] => Ok(KeyCombination::new(split.modifiers, key)),
        [first, extra, ..] => Err(KeybindError::MultipleKeys {
            key: spec.to_string(),
            first: first.clone(),
            extra: extra.clone(),
        }),
    }
}

/// Combinations the browser handles before page scripts see them.
pub const RESERVED_KEYS: &[&str] = &[
    "mod+w",
    "mod+t",
    "mod+n",
    "mod+shift+w",
    "mod+shift+t",
    "mod+shift+n",
];

fn is_reserved(combination: &KeyCombination) -> bool {
    RESERVED_KEYS
        .iter()
        .filter_map(|spec| parse_combination(spec).ok())
        .any(|reserved| &reserved == combination)
}

/// Validate a set of shortcut overrides.
///
/// Every override must parse strictly, must not be reserved, and the
/// effective table (defaults with overrides applied) must not bind one
/// combination to two commands.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use zskarte_config::keybind::validate_overrides;
/// use zskarte_config::types::ShortcutCommand;
///
/// let mut overrides = BTreeMap::new();
/// overrides.insert(ShortcutCommand::Redo, "mod+shift+z".to_string());
/// assert!(validate_overrides(&overrides).is_ok());
///
/// overrides.insert(ShortcutCommand::Paste, "mod+c".to_string());
/// assert!(validate_overrides(&overrides).is_err());
/// ```
pub fn validate_overrides(
    overrides: &BTreeMap<ShortcutCommand, String>,
) -> Result<(), KeybindError> {
    for (command, spec) in overrides {
        let combination = parse_combination(spec).map_err(|e| KeybindError::InvalidSyntax {
            key: format!("{} for command '{}': {}", spec, command, e),
        })?;
        if is_reserved(&combination) {
            return Err(KeybindError::ReservedKey { key: spec.clone() });
        }
    }

    let mut seen: HashMap<KeyCombination, ShortcutCommand> = HashMap::new();
    for command in ShortcutCommand::ALL {
        let spec = overrides
            .get(&command)
            .map(String::as_str)
            .unwrap_or_else(|| command.default_spec());
        let combination = parse_combination(spec)?;

        if let Some(existing) = seen.get(&combination) {
            return Err(KeybindError::Conflict {
                key: spec.to_string(),
                action1: existing.to_string(),
                action2: command.to_string(),
            });
        }
        seen.insert(combination, command);
    }

    Ok(())
}
