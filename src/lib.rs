//! Interactive pin markers for a shared 3D scene.
//!
//! A pin is a uniquely identified marker anchored at a world position. This
//! crate owns the pin collection and routes raw pointer input to per-pin
//! callbacks: pointer-move samples are throttled, hit-tested against the
//! visible pins, and turned into `move` / `leave` events with strict
//! enter/leave ordering; double-clicks are hit-tested immediately and
//! produce `double-click` events. Rendering, bitmap drawing and 3D picking
//! stay with the host, behind the [`scene::Scene`], [`visual::VisualFactory`]
//! and [`hit::HitTester`] traits.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`collection`] | Public API: [`collection::PinCollection`] |
//! | [`store`] | Pin entities and the id → pin map |
//! | [`router`] | Hover state machine and pointer routing |
//! | [`event`] | Event types and the subscription registry |
//! | [`input`] | Raw pointer events and hover state |
//! | [`throttle`] | Leading-edge pointer-move throttle |
//! | [`hit`] | Hit-testing seam and a planar reference picker |
//! | [`visual`] | Visual factory seam and procedural stencils |
//! | [`scene`] | Scene seam and an in-memory pin container |
//! | [`style`] | Colours, shapes and hover styling |
//! | [`config`] | Pin options and router tuning |
//! | [`camera`] | Screen/world points and the pan/zoom camera |
//! | [`replay`] | Scenario replay used by the `pin-replay` binary |
//! | [`consts`] | Shared defaults |

pub mod camera;
pub mod collection;
pub mod config;
pub mod consts;
pub mod event;
pub mod hit;
pub mod input;
pub mod replay;
pub mod router;
pub mod scene;
pub mod store;
pub mod style;
pub mod throttle;
pub mod visual;
