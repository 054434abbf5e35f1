//! The shortcut dispatcher.
//!
//! Responsibilities:
//! - Subscribe to an injected `KeyEventSource` and route matching events to
//!   the command table.
//! - Mirror the map state's selection and editable mode into `ShortcutState`.
//! - Hand out additional filtered subscriptions (`ShortcutStream`).
//! - Release every subscription on shutdown.
//!
//! Does NOT handle:
//! - Producing key events (the environment owns the source).
//! - Editing map data (delegated to the `MapState` collaborator).
//!
//! Invariants:
//! - Events are handled one at a time in delivery order; bindings run in table order.
//! - Observer updates are applied before the key events pending alongside them.
//! - Action failures are logged and absorbed; nothing escapes `handle_event`.
//! - `shutdown()` is idempotent and detaches every stream from the source.
//! - Streams read the map's editable mode directly, not the service's cache.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use zskarte_config::{ShortcutCommand, ShortcutConfig};

use crate::error::ShortcutError;
use crate::event::{KeyEvent, KeyEventSource, KeySubscription};
use crate::map_state::MapState;
use crate::matcher::{ListenOptions, ShortcutDescriptor};
use crate::model::SelectedElement;
use crate::state::ShortcutState;
use crate::table::{ShortcutTable, execute};

/// What a batch of key events did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Commands whose action completed.
    pub executed: Vec<ShortcutCommand>,
    /// Commands whose action failed and was ignored.
    pub absorbed: Vec<ShortcutCommand>,
}

impl DispatchOutcome {
    pub fn is_empty(&self) -> bool {
        self.executed.is_empty() && self.absorbed.is_empty()
    }

    fn extend(&mut self, other: DispatchOutcome) {
        self.executed.extend(other.executed);
        self.absorbed.extend(other.absorbed);
    }
}

enum Wake {
    Shutdown,
    Key(KeyEvent),
    SourceClosed,
    Selection(Option<Option<SelectedElement>>),
    Editable(Option<bool>),
}

/// Wait for the next value of an observer; pends forever once it is gone.
async fn next_change<T: Clone>(receiver: &mut Option<watch::Receiver<T>>) -> Option<T> {
    match receiver {
        Some(rx) => match rx.changed().await {
            Ok(()) => Some(rx.borrow_and_update().clone()),
            Err(_) => None,
        },
        None => std::future::pending().await,
    }
}

type ListenerSlot = Mutex<Option<KeySubscription>>;

fn lock_slot(slot: &ListenerSlot) -> MutexGuard<'_, Option<KeySubscription>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Take the observer's value if it changed since the last look.
fn take_change<T: Clone>(receiver: &mut Option<watch::Receiver<T>>) -> Option<T> {
    let rx = receiver.as_mut()?;
    match rx.has_changed() {
        Ok(true) => Some(rx.borrow_and_update().clone()),
        Ok(false) => None,
        Err(_) => {
            *receiver = None;
            None
        }
    }
}

/// Keyboard shortcut dispatcher for one map view.
#[derive(Debug)]
pub struct ShortcutService<M: MapState> {
    map: M,
    table: ShortcutTable,
    state: ShortcutState,
    events: Option<KeySubscription>,
    selection: Option<watch::Receiver<Option<SelectedElement>>>,
    editable: Option<watch::Receiver<bool>>,
    mode: watch::Sender<bool>,
    listeners: CancellationToken,
    streams: Vec<Weak<ListenerSlot>>,
}

impl<M: MapState> ShortcutService<M> {
    /// Attach to `source` with the command table described by `config`.
    pub fn new(
        map: M,
        source: &KeyEventSource,
        config: &ShortcutConfig,
    ) -> Result<Self, ShortcutError> {
        Self::with_table(map, source, ShortcutTable::from_config(config))
    }

    /// Attach to `source` with an explicit command table.
    pub fn with_table(
        map: M,
        source: &KeyEventSource,
        table: ShortcutTable,
    ) -> Result<Self, ShortcutError> {
        let events = source.subscribe()?;

        let mut selection = map.observe_selected_element();
        let mut editable = map.observe_editable_mode();
        let mut state = ShortcutState::new(*editable.borrow_and_update());
        state.select(selection.borrow_and_update().clone());

        let (mode, _) = watch::channel(state.is_editable());

        Ok(Self {
            map,
            table,
            state,
            events: Some(events),
            selection: Some(selection),
            editable: Some(editable),
            mode,
            listeners: CancellationToken::new(),
            streams: Vec::new(),
        })
    }

    pub fn state(&self) -> &ShortcutState {
        &self.state
    }

    pub fn table(&self) -> &ShortcutTable {
        &self.table
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    pub fn is_shut_down(&self) -> bool {
        self.events.is_none()
    }

    /// Replace the cached selection.
    pub fn set_selection(&mut self, selection: Option<SelectedElement>) {
        tracing::trace!(id = ?selection.as_ref().map(|s| &s.id), "Selection changed");
        self.state.select(selection);
    }

    /// Replace the cached editable mode.
    ///
    /// Open streams see the value only once the map's mode observer is gone.
    pub fn set_editable(&mut self, editable: bool) {
        tracing::trace!(editable, "Editable mode changed");
        self.state.set_editable(editable);
        self.mode.send_replace(editable);
    }

    /// Apply pending selection and mode updates from the map state.
    pub fn sync_observers(&mut self) {
        if let Some(selection) = take_change(&mut self.selection) {
            self.set_selection(selection);
        }
        if let Some(editable) = take_change(&mut self.editable) {
            self.set_editable(editable);
        }
    }

    /// Route one key event through the command table.
    ///
    /// Uses the cached selection and mode as they are; call `sync_observers`
    /// first to pick up map changes. Does nothing after shutdown.
    pub fn handle_event(&mut self, event: &KeyEvent) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();
        if self.is_shut_down() {
            return outcome;
        }

        for binding in self.table.bindings() {
            if !binding.descriptor.matches(event, self.state.is_editable()) {
                continue;
            }

            let command = binding.command;
            tracing::debug!(%command, code = %event.code, "Shortcut matched");

            match execute(command, &mut self.state, &mut self.map) {
                Ok(()) => outcome.executed.push(command),
                Err(e) => {
                    tracing::debug!(%command, error = %e, "Shortcut action failed, ignoring");
                    outcome.absorbed.push(command);
                }
            }
        }

        outcome
    }

    /// Handle everything that is pending right now, without waiting.
    pub fn pump(&mut self) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();
        self.sync_observers();

        while let Some(event) = self.events.as_mut().and_then(KeySubscription::try_recv) {
            let handled = self.handle_event(&event);
            outcome.extend(handled);
        }

        outcome
    }

    /// Dispatch until `shutdown` is cancelled or the source stops, then shut down.
    pub async fn run(&mut self, shutdown: CancellationToken) {
        loop {
            let Some(events) = self.events.as_mut() else {
                break;
            };

            let wake = tokio::select! {
                biased;
                _ = shutdown.cancelled() => Wake::Shutdown,
                selection = next_change(&mut self.selection) => Wake::Selection(selection),
                editable = next_change(&mut self.editable) => Wake::Editable(editable),
                event = events.recv() => match event {
                    Some(event) => Wake::Key(event),
                    None => Wake::SourceClosed,
                },
            };

            match wake {
                Wake::Shutdown => break,
                Wake::SourceClosed => {
                    tracing::debug!("Key event source closed, stopping dispatcher");
                    break;
                }
                Wake::Selection(Some(selection)) => self.set_selection(selection),
                Wake::Selection(None) => self.selection = None,
                Wake::Editable(Some(editable)) => self.set_editable(editable),
                Wake::Editable(None) => self.editable = None,
                Wake::Key(event) => {
                    self.handle_event(&event);
                }
            }
        }

        self.shutdown();
    }

    /// Open an extra filtered subscription on the same event source.
    ///
    /// The stream sees events emitted from now on and follows the map's
    /// editable mode without the service being pumped.
    pub fn listen(
        &mut self,
        spec: Option<&str>,
        options: ListenOptions,
    ) -> Result<ShortcutStream, ShortcutError> {
        let events = self.events.as_ref().ok_or(ShortcutError::ShutDown)?;
        let slot = Arc::new(Mutex::new(Some(events.resubscribe())));

        self.streams.retain(|stream| stream.strong_count() > 0);
        self.streams.push(Arc::downgrade(&slot));

        let editable = match &self.editable {
            Some(rx) => rx.clone(),
            None => self.mode.subscribe(),
        };

        Ok(ShortcutStream {
            descriptor: ShortcutDescriptor::new(spec, options),
            slot,
            editable,
            released: self.listeners.clone(),
        })
    }

    /// Release every subscription and forget selection and clipboard.
    ///
    /// Returns false if the service was already shut down.
    pub fn shutdown(&mut self) -> bool {
        if self.events.take().is_none() {
            return false;
        }
        self.selection = None;
        self.editable = None;
        self.listeners.cancel();
        for stream in self.streams.drain(..) {
            if let Some(slot) = stream.upgrade() {
                lock_slot(&slot).take();
            }
        }
        self.state.clear();
        tracing::debug!("Shortcut service shut down");
        true
    }
}

/// A filtered view of the key event stream for one descriptor.
#[derive(Debug)]
pub struct ShortcutStream {
    descriptor: ShortcutDescriptor,
    slot: Arc<ListenerSlot>,
    editable: watch::Receiver<bool>,
    released: CancellationToken,
}

impl ShortcutStream {
    pub fn descriptor(&self) -> &ShortcutDescriptor {
        &self.descriptor
    }

    /// Whether the stream is still attached to the source.
    pub fn is_attached(&self) -> bool {
        lock_slot(&self.slot).is_some()
    }

    fn accepts(&self, event: &KeyEvent) -> bool {
        self.descriptor.matches(event, *self.editable.borrow())
    }

    /// Next pending matching event, without waiting.
    pub fn try_next(&mut self) -> Option<KeyEvent> {
        let mut slot = lock_slot(&self.slot);
        loop {
            let event = slot.as_mut()?.try_recv()?;
            if self.accepts(&event) {
                return Some(event);
            }
        }
    }

    /// Wait for the next matching event. `None` once released or the source stops.
    pub async fn next(&mut self) -> Option<KeyEvent> {
        let mut held = HeldSubscription::take(&self.slot, &self.released)?;
        loop {
            let event = tokio::select! {
                biased;
                _ = self.released.cancelled() => None,
                event = held.recv() => event,
            };
            let event = event?;
            if self.accepts(&event) {
                return Some(event);
            }
        }
    }
}

/// A subscription taken out of its slot for the length of an await.
///
/// Put back on drop unless the stream was released in the meantime.
struct HeldSubscription {
    slot: Arc<ListenerSlot>,
    released: CancellationToken,
    subscription: Option<KeySubscription>,
}

impl HeldSubscription {
    fn take(slot: &Arc<ListenerSlot>, released: &CancellationToken) -> Option<Self> {
        let subscription = lock_slot(slot).take()?;
        Some(Self {
            slot: Arc::clone(slot),
            released: released.clone(),
            subscription: Some(subscription),
        })
    }

    async fn recv(&mut self) -> Option<KeyEvent> {
        self.subscription.as_mut()?.recv().await
    }
}

impl Drop for HeldSubscription {
    fn drop(&mut self) {
        let mut slot = lock_slot(&self.slot);
        if !self.released.is_cancelled() {
            *slot = self.subscription.take();
        }
    }
}
