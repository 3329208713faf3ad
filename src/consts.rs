//! Shared defaults for the pin crate.

// ── Pointer routing ─────────────────────────────────────────────

/// Minimum spacing between admitted pointer-move samples, in milliseconds.
pub const DEFAULT_MOVE_THROTTLE_MS: u64 = 100;

/// World-space pick radius used by the planar hit tester.
pub const DEFAULT_PICK_THRESHOLD: f64 = 500.0;

// ── Pin options ─────────────────────────────────────────────────

/// Pin colour when none is given.
pub const DEFAULT_COLOR: &str = "#FFFFFF";

/// Pin diameter in world units (scenes are usually in microns).
pub const DEFAULT_SIZE: f64 = 1000.0;

/// Number of branches on a star pin.
pub const DEFAULT_STAR_SIDES: u32 = 16;

/// Star spikiness in `[0, 1]`; 0 draws a regular polygon, 1 pulls the inner vertices to the centre.
pub const DEFAULT_STAR_SPIKINESS: f64 = 0.3;

/// A star needs at least this many branches to enclose an area.
pub const MIN_STAR_SIDES: u32 = 2;

/// Upper bound on star branches; beyond this the outline is indistinguishable from a disc.
pub const MAX_STAR_SIDES: u32 = 1024;

// ── Styling ─────────────────────────────────────────────────────

/// Amount added to each colour channel while a pin is hovered.
pub const HOVER_HIGHLIGHT: f32 = 0.3;

// ── Stencils ────────────────────────────────────────────────────

/// Side length of a procedural stencil texture, in pixels.
pub const STENCIL_TEXTURE_PX: f64 = 512.0;

/// Circle stencil radius, leaving a one-pixel antialiasing margin.
pub const CIRCLE_STENCIL_RADIUS_PX: f64 = 254.0;
