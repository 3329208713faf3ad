//! Scenario replay: drive a collection from a JSON script.
//!
//! A scenario lists pins to add and a sequence of input steps. Running it
//! builds a `PinCollection` over the reference collaborators, subscribes to
//! every event and returns them in delivery order.
//!
//! ```json
//! {
//!   "camera": { "pan_x": 0, "pan_y": 0, "zoom": 1 },
//!   "pins": [{ "position": { "x": 0, "y": 0, "z": 0 }, "options": { "id": "a" } }],
//!   "steps": [{ "move": { "x": 0, "y": 0, "t": 0 } }, { "detach": { "id": "a" } }]
//! }
//! ```

#[cfg(test)]
#[path = "replay_test.rs"]
mod replay_test;

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use serde::Deserialize;
use tracing::info;

use crate::camera::{Camera, Position};
use crate::collection::PinCollection;
use crate::config::{PinOptions, PinsConfig};
use crate::event::{EventKind, PinEvent};
use crate::hit::PlanarHitTester;
use crate::input::{Modifiers, PointerEvent};
use crate::scene::PinContainer;
use crate::visual::StencilFactory;

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid scenario JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Scenario {
    /// Camera used to map pointer samples onto the pin plane.
    pub camera: Option<Camera>,
    pub pins: Vec<PinSpec>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
pub struct PinSpec {
    pub position: Position,
    #[serde(default)]
    pub options: PinOptions,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Move {
        x: f64,
        y: f64,
        t: u64,
        #[serde(default)]
        modifiers: Modifiers,
    },
    DoubleClick {
        x: f64,
        y: f64,
        t: u64,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Show { id: String },
    Hide { id: String },
    Detach { id: String },
}

impl Scenario {
    /// Parse a scenario from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `ReplayError::Json` on malformed input.
    pub fn from_json(text: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a scenario file.
    ///
    /// # Errors
    ///
    /// Returns `ReplayError::Io` if the file cannot be read and
    /// `ReplayError::Json` if it is not a valid scenario.
    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

type Recorder = Rc<RefCell<Vec<PinEvent>>>;

fn record_into(log: &Recorder) -> impl FnMut(&PinEvent) + 'static {
    let log = Rc::clone(log);
    move |event: &PinEvent| log.borrow_mut().push(event.clone())
}

/// Run `scenario` and return every delivered event in order.
///
/// Rejected pins show up as `warning` events; the replay carries on.
#[must_use]
pub fn run(scenario: Scenario, config: &PinsConfig) -> Vec<PinEvent> {
    let camera = scenario.camera.unwrap_or_default();
    let picker = PlanarHitTester::new(camera, config.pick_threshold);
    let mut pins = PinCollection::with_config(config, picker, PinContainer::new(), StencilFactory::new());

    let log = Recorder::default();
    pins.on_created(record_into(&log));
    pins.on_warning(record_into(&log));

    for spec in scenario.pins {
        let Ok(id) = pins.add_pin(spec.position, spec.options) else {
            continue;
        };
        for kind in [EventKind::DoubleClick, EventKind::Move, EventKind::Leave] {
            pins.add_callback(&id, kind, record_into(&log));
        }
    }

    let steps = scenario.steps.len();
    for step in scenario.steps {
        match step {
            Step::Move { x, y, t, modifiers } => {
                pins.pointer_move(&PointerEvent::new(x, y, t).with_modifiers(modifiers));
            }
            Step::DoubleClick { x, y, t, modifiers } => {
                pins.double_click(&PointerEvent::new(x, y, t).with_modifiers(modifiers));
            }
            Step::Show { id } => pins.show(&id),
            Step::Hide { id } => pins.hide(&id),
            Step::Detach { id } => pins.detach(&id),
        }
    }

    let events = log.take();
    info!(pins = pins.len(), steps, events = events.len(), "replay finished");
    events
}
