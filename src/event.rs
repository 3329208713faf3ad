//! Events and the subscription registry.
//!
//! Events are addressed by a structured key: a [`Topic`] (the whole
//! collection, or one pin id) paired with an [`EventKind`]. Every key holds
//! an ordered list of callbacks. Delivery is synchronous and in
//! registration order; a slow callback delays everything after it.

#[cfg(test)]
#[path = "event_test.rs"]
mod event_test;

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::camera::Position;
use crate::input::PointerEvent;
use crate::store::PinId;

/// The kinds of event a callback can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A pin was added to the collection.
    Created,
    /// An operation on the collection was rejected.
    Warning,
    /// A pin was double-clicked.
    DoubleClick,
    /// The pointer moved over a pin.
    Move,
    /// The pointer left a pin.
    Leave,
}

impl EventKind {
    /// Whether events of this kind are addressed to a single pin.
    #[must_use]
    pub fn is_pin_scoped(self) -> bool {
        matches!(self, Self::DoubleClick | Self::Move | Self::Leave)
    }
}

/// Who an event is addressed to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Collection-wide lifecycle and warning events.
    Collection,
    /// Interaction events for one pin.
    Pin(PinId),
}

/// An event delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PinEvent {
    Created { id: PinId, position: Position },
    Warning { id: PinId, message: String },
    DoubleClick { id: PinId, position: Position, pointer: PointerEvent },
    Move { id: PinId, position: Position, pointer: PointerEvent },
    Leave { id: PinId, pointer: PointerEvent },
}

impl PinEvent {
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Created { .. } => EventKind::Created,
            Self::Warning { .. } => EventKind::Warning,
            Self::DoubleClick { .. } => EventKind::DoubleClick,
            Self::Move { .. } => EventKind::Move,
            Self::Leave { .. } => EventKind::Leave,
        }
    }

    /// The pin this event concerns.
    #[must_use]
    pub fn pin_id(&self) -> &str {
        match self {
            Self::Created { id, .. }
            | Self::Warning { id, .. }
            | Self::DoubleClick { id, .. }
            | Self::Move { id, .. }
            | Self::Leave { id, .. } => id,
        }
    }

    #[must_use]
    pub fn topic(&self) -> Topic {
        if self.kind().is_pin_scoped() { Topic::Pin(self.pin_id().to_string()) } else { Topic::Collection }
    }
}

/// A subscriber callback.
pub type Callback = Box<dyn FnMut(&PinEvent)>;

/// Ordered callbacks keyed by `(topic, kind)`.
#[derive(Default)]
pub struct Subscriptions {
    handlers: HashMap<(Topic, EventKind), Vec<Callback>>,
}

impl Subscriptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a callback for `(topic, kind)`.
    pub fn on(&mut self, topic: Topic, kind: EventKind, callback: Callback) {
        self.handlers.entry((topic, kind)).or_default().push(callback);
    }

    /// Deliver `event` to every callback under its key, in registration order.
    /// Returns how many callbacks ran.
    pub fn dispatch(&mut self, event: &PinEvent) -> usize {
        let Some(callbacks) = self.handlers.get_mut(&(event.topic(), event.kind())) else {
            return 0;
        };
        for callback in callbacks.iter_mut() {
            callback(event);
        }
        callbacks.len()
    }

    /// Drop every callback addressed to pin `id`.
    pub fn remove_pin(&mut self, id: &str) {
        self.handlers
            .retain(|(topic, _), _| !matches!(topic, Topic::Pin(pin) if pin == id));
    }

    /// Number of callbacks registered under `(topic, kind)`.
    #[must_use]
    pub fn count(&self, topic: &Topic, kind: EventKind) -> usize {
        self.handlers
            .get(&(topic.clone(), kind))
            .map_or(0, Vec::len)
    }
}

impl fmt::Debug for Subscriptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self
            .handlers
            .iter()
            .map(|((topic, kind), cbs)| (format!("{topic:?}/{kind:?}"), cbs.len()))
            .collect();
        keys.sort();
        f.debug_struct("Subscriptions").field("handlers", &keys).finish()
    }
}
