//! Input model: raw pointer events and the hover state they drive.
//!
//! `PointerEvent` is what the host forwards from its input source for both
//! pointer-move and double-click notifications. `HoverState` is the single
//! pin, if any, currently considered under the pointer; only the router
//! writes it.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::store::PinId;

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub meta: bool,
}

/// A raw pointer notification, delivered unchanged to callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Pointer location in screen space (CSS pixels).
    pub position: Point,
    /// Milliseconds on the input source's monotonic clock.
    pub timestamp_ms: u64,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl PointerEvent {
    #[must_use]
    pub fn new(x: f64, y: f64, timestamp_ms: u64) -> Self {
        Self { position: Point::new(x, y), timestamp_ms, modifiers: Modifiers::default() }
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Which pin, if any, is under the pointer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HoverState {
    /// No pin hovered.
    #[default]
    Idle,
    /// The pointer rests on this pin.
    Hovering(PinId),
}

impl HoverState {
    /// The hovered pin id, if any.
    #[must_use]
    pub fn pin_id(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Hovering(id) => Some(id.as_str()),
        }
    }
}
