//! Keyboard shortcut dispatcher for the ZS Karte map editor.
//!
//! Key presses arrive through an owned [`KeyEventSource`]. The
//! [`ShortcutService`] matches them against its [`ShortcutTable`], gated by
//! the editable mode and by the focused element, and drives the
//! [`MapState`] collaborator.
//!
//! # Example
//!
//! ```ignore
//! use zskarte_shortcuts::{KeyEvent, KeyEventSource, ShortcutService};
//!
//! let source = KeyEventSource::started(64);
//! let mut service = ShortcutService::new(map, &source, &config)?;
//! source.emit(KeyEvent::new("KeyZ").with_ctrl());
//! service.pump();
//! ```

pub mod error;
pub mod event;
pub mod logging;
pub mod map_state;
pub mod matcher;
pub mod model;
pub mod service;
pub mod state;
pub mod table;

pub use error::ShortcutError;
pub use event::{EventTarget, KeyEvent, KeyEventSource, KeySubscription};
pub use map_state::{DrawLayer, MapState, MapStateError};
pub use matcher::{ListenOptions, ShortcutDescriptor};
pub use model::{DisplayMode, DrawElementKind, DrawElementState, SelectedElement};
pub use service::{DispatchOutcome, ShortcutService, ShortcutStream};
pub use state::ShortcutState;
pub use table::{HelpEntry, ShortcutBinding, ShortcutTable};
pub use zskarte_config::ShortcutCommand;
