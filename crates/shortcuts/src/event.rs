//! Key events and the broadcast source that delivers them.
//!
//! Responsibilities:
//! - Define the raw key event handed over by the environment.
//! - Own the live event channel with an explicit start/stop lifecycle.
//! - Hand out independent subscriptions that see every event emitted after
//!   they attach.
//!
//! Does NOT handle:
//! - Shortcut matching (see `matcher`).
//!
//! Invariants:
//! - Subscriptions never replay events emitted before they were created.
//! - `stop()` is idempotent; subscriptions end once buffered events are drained.
//! - A subscriber that falls behind skips the lost events and keeps going.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use zskarte_config::constants::MAX_CHANNEL_CAPACITY;

use crate::error::ShortcutError;

/// Element tags that accept typed text.
const TEXT_ENTRY_TAGS: &[&str] = &["INPUT", "TEXTAREA"];

/// Where a key event was dispatched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EventTarget {
    /// The document body or the map canvas.
    #[default]
    Document,
    /// A focused element, identified by its tag name.
    Element(String),
}

impl EventTarget {
    pub fn element(tag: impl Into<String>) -> Self {
        Self::Element(tag.into())
    }

    /// Returns true for text fields and text areas.
    pub fn accepts_text(&self) -> bool {
        match self {
            Self::Document => false,
            Self::Element(tag) => TEXT_ENTRY_TAGS
                .iter()
                .any(|input| tag.eq_ignore_ascii_case(input)),
        }
    }
}

/// A raw key press.
///
/// Clones share the default-prevented flag, so cancelling the default action
/// through any clone is visible on all of them.
#[derive(Debug, Clone)]
pub struct KeyEvent {
    /// Physical, layout-independent key code (`KeyZ`, `Digit1`, `Backspace`).
    pub code: String,
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
    pub target: EventTarget,
    default_prevented: Arc<AtomicBool>,
}

impl KeyEvent {
    /// A key press on the document with no modifiers held.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            shift: false,
            alt: false,
            ctrl: false,
            meta: false,
            target: EventTarget::Document,
            default_prevented: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn with_target(mut self, target: EventTarget) -> Self {
        self.target = target;
        self
    }

    /// Ctrl on Windows/Linux, Cmd on macOS: either counts.
    pub fn primary(&self) -> bool {
        self.ctrl || self.meta
    }

    /// The key code with `Key`/`Digit` prefixes stripped, lower-cased.
    pub fn normalized_code(&self) -> String {
        normalize_code(&self.code)
    }

    /// Cancel the environment's default handling of this key press.
    pub fn prevent_default(&self) {
        self.default_prevented.store(true, Ordering::Relaxed);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.load(Ordering::Relaxed)
    }
}

/// Normalize a physical key code for comparison with a parsed base key.
///
/// `KeyZ` -> `z`, `Digit1` -> `1`, `Backspace` -> `backspace`.
pub fn normalize_code(code: &str) -> String {
    let lower = code.to_ascii_lowercase();
    lower
        .strip_prefix("key")
        .or_else(|| lower.strip_prefix("digit"))
        .filter(|rest| !rest.is_empty())
        .map_or_else(|| lower.clone(), str::to_string)
}

/// Owned source of live key events.
#[derive(Debug)]
pub struct KeyEventSource {
    capacity: usize,
    sender: Option<broadcast::Sender<KeyEvent>>,
}

impl KeyEventSource {
    /// A stopped source; call `start()` before emitting.
    ///
    /// The capacity is clamped to `1..=MAX_CHANNEL_CAPACITY`.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.clamp(1, MAX_CHANNEL_CAPACITY),
            sender: None,
        }
    }

    /// A source that is already running.
    pub fn started(capacity: usize) -> Self {
        let mut source = Self::new(capacity);
        source.start();
        source
    }

    /// Open the channel. Does nothing if already running.
    pub fn start(&mut self) {
        if self.sender.is_none() {
            let (sender, _) = broadcast::channel(self.capacity);
            self.sender = Some(sender);
            tracing::debug!(capacity = self.capacity, "Key event source started");
        }
    }

    /// Close the channel. Returns false if it was not running.
    pub fn stop(&mut self) -> bool {
        let stopped = self.sender.take().is_some();
        if stopped {
            tracing::debug!("Key event source stopped");
        }
        stopped
    }

    pub fn is_running(&self) -> bool {
        self.sender.is_some()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Publish an event to every current subscription.
    ///
    /// Returns the number of subscriptions that received it.
    pub fn emit(&self, event: KeyEvent) -> usize {
        let Some(sender) = &self.sender else {
            tracing::trace!(code = %event.code, "Dropping key event, source is stopped");
            return 0;
        };
        sender.send(event).unwrap_or(0)
    }

    /// Attach a new subscription that sees events from now on.
    pub fn subscribe(&self) -> Result<KeySubscription, ShortcutError> {
        self.sender
            .as_ref()
            .map(|sender| KeySubscription {
                receiver: sender.subscribe(),
            })
            .ok_or(ShortcutError::SourceStopped)
    }
}

/// An independent cursor into the key event stream.
#[derive(Debug)]
pub struct KeySubscription {
    receiver: broadcast::Receiver<KeyEvent>,
}

impl KeySubscription {
    /// Wait for the next event. `None` once the source is stopped and drained.
    pub async fn recv(&mut self) -> Option<KeyEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Key event subscriber lagged, skipping events");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Take the next pending event without waiting.
    pub fn try_recv(&mut self) -> Option<KeyEvent> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => return Some(event),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Key event subscriber lagged, skipping events");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return None,
            }
        }
    }

    /// A new subscription on the same source, starting at the live tail.
    pub fn resubscribe(&self) -> Self {
        Self {
            receiver: self.receiver.resubscribe(),
        }
    }
}
