//! Pin entities and the store that owns them.
//!
//! `PinStore` maps identifiers to [`Pin`]s and is the only writer of the
//! visibility flag. The hover flag is written by the router through the
//! crate-private hover methods, which keep at most one pin hovered.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashMap;

use uuid::Uuid;

use crate::camera::Position;
use crate::config::OptionsError;
use crate::hit::Candidate;
use crate::style::{PinStyle, Rgb};
use crate::visual::VisualHandle;

/// Unique identifier for a pin within its collection.
pub type PinId = String;

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PinError {
    #[error("a pin with id `{0}` is already loaded")]
    DuplicateId(PinId),
    #[error("invalid pin options: {0}")]
    InvalidOptions(#[from] OptionsError),
}

// =============================================================================
// PIN
// =============================================================================

/// A uniquely identified marker anchored at a world position.
#[derive(Debug, Clone, PartialEq)]
pub struct Pin {
    id: PinId,
    position: Position,
    visible: bool,
    hovered: bool,
    style: PinStyle,
    visual: VisualHandle,
}

impl Pin {
    /// A new, un-hovered pin.
    #[must_use]
    pub fn new(id: impl Into<PinId>, position: Position, visible: bool, style: PinStyle, visual: VisualHandle) -> Self {
        Self { id: id.into(), position, visible, hovered: false, style, visual }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    #[must_use]
    pub fn style(&self) -> &PinStyle {
        &self.style
    }

    #[must_use]
    pub fn visual(&self) -> VisualHandle {
        self.visual
    }

    /// Colour to render with, highlighted while hovered.
    #[must_use]
    pub fn display_color(&self) -> Rgb {
        self.style.display_color(self.hovered)
    }
}

// =============================================================================
// STORE
// =============================================================================

/// In-memory map of pin id to pin.
#[derive(Debug, Default)]
pub struct PinStore {
    pins: HashMap<PinId, Pin>,
}

impl PinStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { pins: HashMap::new() }
    }

    #[must_use]
    pub fn has(&self, id: &str) -> bool {
        self.pins.contains_key(id)
    }

    /// Insert `pin` under its own id. Never overwrites.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateId` if a pin with the same id is already stored.
    pub fn add(&mut self, pin: Pin) -> Result<(), PinError> {
        if self.has(&pin.id) {
            return Err(PinError::DuplicateId(pin.id));
        }
        self.pins.insert(pin.id.clone(), pin);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Pin> {
        self.pins.get(id)
    }

    /// Make a pin visible. Returns true if the flag changed; unknown ids are ignored.
    pub fn show(&mut self, id: &str) -> bool {
        self.set_visible(id, true)
    }

    /// Hide a pin. Returns true if the flag changed; unknown ids are ignored.
    pub fn hide(&mut self, id: &str) -> bool {
        self.set_visible(id, false)
    }

    fn set_visible(&mut self, id: &str, visible: bool) -> bool {
        match self.pins.get_mut(id) {
            Some(pin) if pin.visible != visible => {
                pin.visible = visible;
                true
            }
            _ => false,
        }
    }

    /// Remove a pin by id, returning it if it was present.
    pub fn remove(&mut self, id: &str) -> Option<Pin> {
        self.pins.remove(id)
    }

    /// Generate an id not currently in use.
    #[must_use]
    pub fn generate_id(&self) -> PinId {
        loop {
            let id = Uuid::new_v4().simple().to_string();
            if !self.has(&id) {
                return id;
            }
        }
    }

    /// The hit-test candidate set: every visible pin.
    #[must_use]
    pub fn candidates(&self) -> Vec<Candidate<'_>> {
        self.pins
            .values()
            .filter(|p| p.visible)
            .map(|p| Candidate { id: &p.id, position: p.position })
            .collect()
    }

    /// Mark `id` as the only hovered pin.
    pub(crate) fn set_hovered(&mut self, id: &str) {
        for pin in self.pins.values_mut() {
            pin.hovered = pin.id == id;
        }
    }

    /// Clear hovered styling on every pin.
    pub(crate) fn clear_hover(&mut self) {
        for pin in self.pins.values_mut() {
            pin.hovered = false;
        }
    }

    /// Ids of pins currently carrying hovered styling.
    #[must_use]
    pub fn hovered_ids(&self) -> Vec<&str> {
        self.pins
            .values()
            .filter(|p| p.hovered)
            .map(|p| p.id.as_str())
            .collect()
    }

    /// All ids, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.pins.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of pins currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pins.len()
    }

    /// Returns `true` if the store contains no pins.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }
}
