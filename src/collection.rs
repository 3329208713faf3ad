//! The pin collection: public API over store, router and subscriptions.
//!
//! DESIGN
//! ======
//! `PinCollection` owns every piece of mutable state (pins, hover, throttle,
//! callbacks) plus the three host collaborators. The host forwards raw
//! pointer notifications to [`PinCollection::pointer_move`] and
//! [`PinCollection::double_click`]; events are delivered synchronously on
//! that call, after the scene has been told about any styling change.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here is fatal. A rejected `add_pin` returns the error and also
//! emits one `warning` event; operations on unknown ids are silent no-ops.

#[cfg(test)]
#[path = "collection_test.rs"]
mod collection_test;

use tracing::{debug, info, warn};

use crate::camera::Position;
use crate::config::{PinOptions, PinsConfig};
use crate::event::{EventKind, PinEvent, Subscriptions, Topic};
use crate::hit::HitTester;
use crate::input::PointerEvent;
use crate::router::InteractionRouter;
use crate::scene::{Scene, SceneNode};
use crate::store::{Pin, PinError, PinId, PinStore};
use crate::visual::VisualFactory;

pub struct PinCollection<H, S, V> {
    store: PinStore,
    router: InteractionRouter,
    subscriptions: Subscriptions,
    hit_tester: H,
    scene: S,
    visuals: V,
}

impl<H: HitTester, S: Scene, V: VisualFactory> PinCollection<H, S, V> {
    /// Create an empty collection with default tuning.
    #[must_use]
    pub fn new(hit_tester: H, scene: S, visuals: V) -> Self {
        Self::with_config(&PinsConfig::default(), hit_tester, scene, visuals)
    }

    #[must_use]
    pub fn with_config(config: &PinsConfig, hit_tester: H, scene: S, visuals: V) -> Self {
        Self {
            store: PinStore::new(),
            router: InteractionRouter::from_config(config),
            subscriptions: Subscriptions::new(),
            hit_tester,
            scene,
            visuals,
        }
    }

    // --- Subscriptions ---

    /// Subscribe to `created` events for every pin.
    pub fn on_created(&mut self, callback: impl FnMut(&PinEvent) + 'static) {
        self.subscriptions
            .on(Topic::Collection, EventKind::Created, Box::new(callback));
    }

    /// Subscribe to `warning` events.
    pub fn on_warning(&mut self, callback: impl FnMut(&PinEvent) + 'static) {
        self.subscriptions
            .on(Topic::Collection, EventKind::Warning, Box::new(callback));
    }

    /// Subscribe to a pin's `move`, `leave` or `double-click` events.
    ///
    /// Returns false, registering nothing, for unknown ids and for
    /// collection-wide kinds.
    pub fn add_callback(&mut self, id: &str, kind: EventKind, callback: impl FnMut(&PinEvent) + 'static) -> bool {
        if !self.store.has(id) {
            debug!(pin = %id, ?kind, "callback for unknown pin ignored");
            return false;
        }
        if !kind.is_pin_scoped() {
            debug!(pin = %id, ?kind, "collection-wide kind cannot be scoped to a pin");
            return false;
        }
        self.subscriptions
            .on(Topic::Pin(id.to_string()), kind, Box::new(callback));
        true
    }

    // --- Pins ---

    /// Add a pin at `position`.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateId` when `options.id` is taken and `InvalidOptions`
    /// when an option fails validation. Either way a `warning` event is
    /// emitted and the collection is left unchanged.
    pub fn add_pin(&mut self, position: Position, mut options: PinOptions) -> Result<PinId, PinError> {
        let id = options.id.take().unwrap_or_else(|| self.store.generate_id());
        match self.build_pin(id.clone(), position, options) {
            Ok(()) => Ok(id),
            Err(err) => {
                warn!(pin = %id, error = %err, "pin rejected");
                self.emit(&PinEvent::Warning { id, message: err.to_string() });
                Err(err)
            }
        }
    }

    fn build_pin(&mut self, id: PinId, position: Position, options: PinOptions) -> Result<(), PinError> {
        if self.store.has(&id) {
            return Err(PinError::DuplicateId(id));
        }
        let resolved = options.resolve()?;
        let visual = self.visuals.create(&resolved.style);
        let pin = Pin::new(id.clone(), position, resolved.visible, resolved.style, visual);
        let node = SceneNode::from_pin(&pin);
        self.store.add(pin)?;
        self.scene.add_to_scene(&node);
        for (kind, callback) in resolved.handlers {
            self.subscriptions.on(Topic::Pin(id.clone()), kind, callback);
        }

        info!(pin = %id, visible = node.visible, "pin created");
        self.emit(&PinEvent::Created { id, position });
        Ok(())
    }

    #[must_use]
    pub fn has(&self, id: &str) -> bool {
        self.store.has(id)
    }

    /// Show a pin; unknown ids are ignored.
    pub fn show(&mut self, id: &str) {
        if self.store.show(id) {
            debug!(pin = %id, "pin shown");
            self.sync_node(id);
        }
    }

    /// Hide a pin; unknown ids are ignored.
    ///
    /// A hovered pin that is hidden stays hovered, highlight included, until
    /// the next admitted pointer-move sample delivers its `leave`. Showing it
    /// again before that sample brings it back highlighted.
    pub fn hide(&mut self, id: &str) {
        if self.store.hide(id) {
            debug!(pin = %id, "pin hidden");
            self.sync_node(id);
        }
    }

    /// Remove a pin from the collection and the scene.
    ///
    /// Its callbacks are dropped and, if it was hovered, hover resets to idle
    /// without a `leave`. Afterwards `has(id)` is false and the id may be
    /// reused. Unknown ids are ignored.
    pub fn detach(&mut self, id: &str) {
        if self.store.remove(id).is_none() {
            return;
        }
        self.scene.remove_from_scene(id);
        self.router.release(id);
        self.subscriptions.remove_pin(id);
        info!(pin = %id, "pin detached");
    }

    // --- Input events ---

    /// Forward a raw pointer-move notification.
    pub fn pointer_move(&mut self, pointer: &PointerEvent) {
        let events = self
            .router
            .on_pointer_move(pointer, &mut self.store, &self.hit_tester);
        for event in &events {
            self.sync_node(event.pin_id());
            self.emit(event);
        }
    }

    /// Forward a raw double-click notification.
    pub fn double_click(&mut self, pointer: &PointerEvent) {
        if let Some(event) = self
            .router
            .on_double_click(pointer, &self.store, &self.hit_tester)
        {
            self.emit(&event);
        }
    }

    // --- Queries ---

    /// The hovered pin id, if any.
    #[must_use]
    pub fn hovered(&self) -> Option<&str> {
        self.router.hovered()
    }

    #[must_use]
    pub fn pin(&self, id: &str) -> Option<&Pin> {
        self.store.get(id)
    }

    #[must_use]
    pub fn store(&self) -> &PinStore {
        &self.store
    }

    #[must_use]
    pub fn scene(&self) -> &S {
        &self.scene
    }

    #[must_use]
    pub fn visuals(&self) -> &V {
        &self.visuals
    }

    #[must_use]
    pub fn hit_tester(&self) -> &H {
        &self.hit_tester
    }

    /// Number of pins in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    // --- Internals ---

    fn sync_node(&mut self, id: &str) {
        if let Some(pin) = self.store.get(id) {
            self.scene.update_node(&SceneNode::from_pin(pin));
        }
    }

    fn emit(&mut self, event: &PinEvent) {
        let delivered = self.subscriptions.dispatch(event);
        debug!(pin = %event.pin_id(), kind = ?event.kind(), delivered, "event dispatched");
    }
}
