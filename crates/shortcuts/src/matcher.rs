//! Shortcut descriptors and the matching predicate.
//!
//! Invariants:
//! - Matching is a pure function of (descriptor, event, editable) apart from
//!   cancelling the default action of a matched event.
//! - Modifier flags compare exactly; a superset of modifiers never matches.
//! - Events targeting a text-entry control never match, even with no key filter.

use zskarte_config::keybind::{KeyCombination, KeyFilter};

use crate::event::KeyEvent;

/// Registration options for a shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenOptions {
    /// Only match while the map is editable.
    pub requires_editable_mode: bool,
    /// Cancel the browser default action of a matched event.
    pub prevent_default: bool,
}

impl Default for ListenOptions {
    fn default() -> Self {
        Self {
            requires_editable_mode: false,
            prevent_default: true,
        }
    }
}

impl ListenOptions {
    pub fn editable_only() -> Self {
        Self {
            requires_editable_mode: true,
            ..Self::default()
        }
    }
}

/// An immutable registered shortcut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutDescriptor {
    filter: KeyFilter,
    requires_editable_mode: bool,
    prevent_default: bool,
}

impl ShortcutDescriptor {
    /// Parse `spec` leniently; an empty or malformed spec matches every event.
    pub fn new(spec: Option<&str>, options: ListenOptions) -> Self {
        Self::with_filter(KeyFilter::from_spec(spec), options)
    }

    pub fn with_filter(filter: KeyFilter, options: ListenOptions) -> Self {
        Self {
            filter,
            requires_editable_mode: options.requires_editable_mode,
            prevent_default: options.prevent_default,
        }
    }

    pub fn filter(&self) -> &KeyFilter {
        &self.filter
    }

    pub fn requires_editable_mode(&self) -> bool {
        self.requires_editable_mode
    }

    pub fn prevent_default(&self) -> bool {
        self.prevent_default
    }

    /// Decide whether `event` triggers this shortcut.
    ///
    /// Cancels the event's default action when it matches a key filter and
    /// the descriptor asks for it.
    pub fn matches(&self, event: &KeyEvent, editable: bool) -> bool {
        if self.requires_editable_mode && !editable {
            return false;
        }

        // Typing into a form field must never trigger a shortcut.
        if event.target.accepts_text() {
            return false;
        }

        let Some(combination) = self.filter.combination() else {
            return true;
        };

        if !combination_matches(combination, event) {
            return false;
        }

        if self.prevent_default {
            event.prevent_default();
        }
        true
    }
}

fn combination_matches(combination: &KeyCombination, event: &KeyEvent) -> bool {
    let modifiers = combination.modifiers;
    if modifiers.shift != event.shift
        || modifiers.alt != event.alt
        || modifiers.primary != event.primary()
    {
        return false;
    }
    // Compare physical codes, not produced characters, so dead keys and
    // keyboard layouts do not matter.
    event.normalized_code() == combination.key()
}
