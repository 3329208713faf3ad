//! Interaction routing: raw pointer signals in, per-pin events out.
//!
//! DESIGN
//! ======
//! The router owns the hover state and the move throttle as plain fields.
//! Each admitted pointer-move sample runs one hit test against the visible
//! pins and produces, in order, at most one `leave` followed by at most one
//! `move`. A pin never receives `move` while another pin is still hovered.
//! Double-clicks bypass the throttle and ignore hover state entirely.
//!
//! The router returns events instead of delivering them; the owning
//! collection syncs the scene and dispatches them synchronously.

#[cfg(test)]
#[path = "router_test.rs"]
mod router_test;

use tracing::{debug, trace};

use crate::config::PinsConfig;
use crate::event::PinEvent;
use crate::hit::{Hit, HitTester};
use crate::input::{HoverState, PointerEvent};
use crate::store::PinStore;
use crate::throttle::MoveThrottle;

#[derive(Debug, Default)]
pub struct InteractionRouter {
    hover: HoverState,
    throttle: MoveThrottle,
}

impl InteractionRouter {
    #[must_use]
    pub fn new(move_throttle_ms: u64) -> Self {
        Self { hover: HoverState::Idle, throttle: MoveThrottle::new(move_throttle_ms) }
    }

    #[must_use]
    pub fn from_config(config: &PinsConfig) -> Self {
        Self::new(config.move_throttle_ms)
    }

    #[must_use]
    pub fn hover_state(&self) -> &HoverState {
        &self.hover
    }

    /// The hovered pin id, if any.
    #[must_use]
    pub fn hovered(&self) -> Option<&str> {
        self.hover.pin_id()
    }

    /// Handle a raw pointer-move notification.
    ///
    /// Samples inside the throttle window are dropped and yield no events.
    pub fn on_pointer_move(
        &mut self,
        pointer: &PointerEvent,
        store: &mut PinStore,
        hit_tester: &dyn HitTester,
    ) -> Vec<PinEvent> {
        if !self.throttle.admit(pointer.timestamp_ms) {
            trace!(t = pointer.timestamp_ms, "pointer move throttled");
            return Vec::new();
        }

        let mut events = Vec::with_capacity(2);
        let Some(hit) = query(pointer, store, hit_tester) else {
            store.clear_hover();
            if let HoverState::Hovering(prev) = std::mem::take(&mut self.hover) {
                debug!(pin = %prev, "hover left");
                events.push(PinEvent::Leave { id: prev, pointer: *pointer });
            }
            return events;
        };

        if let HoverState::Hovering(prev) = &self.hover {
            if *prev != hit.pin_id {
                debug!(from = %prev, to = %hit.pin_id, "hover moved to another pin");
                events.push(PinEvent::Leave { id: prev.clone(), pointer: *pointer });
            }
        } else {
            debug!(pin = %hit.pin_id, "hover entered");
        }

        store.set_hovered(&hit.pin_id);
        events.push(PinEvent::Move { id: hit.pin_id.clone(), position: hit.position, pointer: *pointer });
        self.hover = HoverState::Hovering(hit.pin_id);
        events
    }

    /// Handle a raw double-click notification. Never throttled.
    #[must_use]
    pub fn on_double_click(&self, pointer: &PointerEvent, store: &PinStore, hit_tester: &dyn HitTester) -> Option<PinEvent> {
        let hit = query(pointer, store, hit_tester)?;
        debug!(pin = %hit.pin_id, "double click");
        Some(PinEvent::DoubleClick { id: hit.pin_id, position: hit.position, pointer: *pointer })
    }

    /// Forget `id` if it is hovered, without emitting `leave`. Used when the
    /// pin is detached.
    pub(crate) fn release(&mut self, id: &str) {
        if self.hover.pin_id() == Some(id) {
            self.hover = HoverState::Idle;
        }
    }
}

/// Hit-test against the visible pins, discarding ids the store does not know.
fn query(pointer: &PointerEvent, store: &PinStore, hit_tester: &dyn HitTester) -> Option<Hit> {
    let candidates = store.candidates();
    let hit = hit_tester.query(pointer.position, &candidates)?;
    if candidates.iter().any(|c| c.id == hit.pin_id) {
        Some(hit)
    } else {
        debug!(pin = %hit.pin_id, "hit tester reported a pin outside the candidate set; treating as miss");
        None
    }
}
