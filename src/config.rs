//! Pin options and router tuning.
//!
//! `PinOptions` enumerates every option `add_pin` recognises, with its
//! default, and is validated once by [`PinOptions::resolve`]. `PinsConfig`
//! carries the router and picker knobs, optionally read from environment
//! variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::fmt;

use serde::Deserialize;

use crate::consts::{
    DEFAULT_COLOR, DEFAULT_MOVE_THROTTLE_MS, DEFAULT_PICK_THRESHOLD, DEFAULT_SIZE, DEFAULT_STAR_SIDES,
    DEFAULT_STAR_SPIKINESS, MAX_STAR_SIDES, MIN_STAR_SIDES,
};
use crate::event::{Callback, EventKind, PinEvent};
use crate::style::{PinShape, PinSkin, PinStyle, Rgb, ShapeKind, StyleError};

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OptionsError {
    #[error(transparent)]
    Color(#[from] StyleError),
    #[error("invalid size {0} (must be a positive finite number)")]
    InvalidSize(f64),
    #[error("invalid star sides {0} (must be between 2 and 1024)")]
    InvalidSides(u32),
    #[error("invalid spikiness {0} (must be within [0, 1])")]
    InvalidSpikiness(f64),
}

// =============================================================================
// PIN OPTIONS
// =============================================================================

/// Options accepted by `PinCollection::add_pin`.
///
/// Deserialisable from JSON with every field optional; callbacks can only be
/// attached in code.
#[derive(Deserialize)]
#[serde(default)]
pub struct PinOptions {
    /// Unique id; generated when absent.
    pub id: Option<String>,
    pub visible: bool,
    /// `#RGB` or `#RRGGBB`.
    pub color: String,
    /// Diameter in world units.
    pub size: f64,
    pub shape: ShapeKind,
    /// Image to use instead of the procedural shape.
    pub texture_url: Option<String>,
    /// Star branches; ignored for circles.
    pub sides: u32,
    /// Star spikiness in `[0, 1]`; ignored for circles.
    pub spikiness: f64,
    #[serde(skip)]
    pub on_double_click: Option<Callback>,
    #[serde(skip)]
    pub on_mouse_move: Option<Callback>,
    #[serde(skip)]
    pub on_leave: Option<Callback>,
}

impl Default for PinOptions {
    fn default() -> Self {
        Self {
            id: None,
            visible: true,
            color: DEFAULT_COLOR.to_string(),
            size: DEFAULT_SIZE,
            shape: ShapeKind::Circle,
            texture_url: None,
            sides: DEFAULT_STAR_SIDES,
            spikiness: DEFAULT_STAR_SPIKINESS,
            on_double_click: None,
            on_mouse_move: None,
            on_leave: None,
        }
    }
}

/// Validated pin options, ready to build a pin from.
pub struct ResolvedOptions {
    pub visible: bool,
    pub style: PinStyle,
    /// Callbacks to register under the new pin's id, in option order.
    pub handlers: Vec<(EventKind, Callback)>,
}

impl PinOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    #[must_use]
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    #[must_use]
    pub fn size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    /// Use a star stencil with the given branch count and spikiness.
    #[must_use]
    pub fn star(mut self, sides: u32, spikiness: f64) -> Self {
        self.shape = ShapeKind::Star;
        self.sides = sides;
        self.spikiness = spikiness;
        self
    }

    #[must_use]
    pub fn texture_url(mut self, url: impl Into<String>) -> Self {
        self.texture_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn on_double_click(mut self, f: impl FnMut(&PinEvent) + 'static) -> Self {
        self.on_double_click = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_mouse_move(mut self, f: impl FnMut(&PinEvent) + 'static) -> Self {
        self.on_mouse_move = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_leave(mut self, f: impl FnMut(&PinEvent) + 'static) -> Self {
        self.on_leave = Some(Box::new(f));
        self
    }

    /// Validate and default everything except the id.
    ///
    /// A texture URL wins over the procedural shape; star parameters are
    /// only checked when a star stencil will actually be drawn.
    ///
    /// # Errors
    ///
    /// Returns the first invalid option found.
    pub fn resolve(self) -> Result<ResolvedOptions, OptionsError> {
        let color: Rgb = self.color.parse()?;
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(OptionsError::InvalidSize(self.size));
        }

        let skin = match (self.texture_url, self.shape) {
            (Some(url), _) => PinSkin::Texture(url),
            (None, ShapeKind::Circle) => PinSkin::Shape(PinShape::Circle),
            (None, ShapeKind::Star) => {
                if !(MIN_STAR_SIDES..=MAX_STAR_SIDES).contains(&self.sides) {
                    return Err(OptionsError::InvalidSides(self.sides));
                }
                if !(0.0..=1.0).contains(&self.spikiness) {
                    return Err(OptionsError::InvalidSpikiness(self.spikiness));
                }
                PinSkin::Shape(PinShape::Star { sides: self.sides, spikiness: self.spikiness })
            }
        };

        let handlers = [
            (EventKind::DoubleClick, self.on_double_click),
            (EventKind::Move, self.on_mouse_move),
            (EventKind::Leave, self.on_leave),
        ]
        .into_iter()
        .filter_map(|(kind, cb)| cb.map(|cb| (kind, cb)))
        .collect();

        Ok(ResolvedOptions { visible: self.visible, style: PinStyle { color, size: self.size, skin }, handlers })
    }
}

impl fmt::Debug for PinOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinOptions")
            .field("id", &self.id)
            .field("visible", &self.visible)
            .field("color", &self.color)
            .field("size", &self.size)
            .field("shape", &self.shape)
            .field("texture_url", &self.texture_url)
            .field("sides", &self.sides)
            .field("spikiness", &self.spikiness)
            .field("on_double_click", &self.on_double_click.is_some())
            .field("on_mouse_move", &self.on_mouse_move.is_some())
            .field("on_leave", &self.on_leave.is_some())
            .finish()
    }
}

// =============================================================================
// ROUTER CONFIG
// =============================================================================

/// Router and picker tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinsConfig {
    /// Leading-edge throttle window for pointer-move samples.
    pub move_throttle_ms: u64,
    /// World-space pick radius for the planar hit tester.
    pub pick_threshold: f64,
}

impl Default for PinsConfig {
    fn default() -> Self {
        Self { move_throttle_ms: DEFAULT_MOVE_THROTTLE_MS, pick_threshold: DEFAULT_PICK_THRESHOLD }
    }
}

impl PinsConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `PINS_MOVE_THROTTLE_MS`: default 100
    /// - `PINS_PICK_THRESHOLD`: default 500
    ///
    /// Absent or unparsable values fall back to the default.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            move_throttle_ms: env_parse("PINS_MOVE_THROTTLE_MS", DEFAULT_MOVE_THROTTLE_MS),
            pick_threshold: env_parse("PINS_PICK_THRESHOLD", DEFAULT_PICK_THRESHOLD),
        }
    }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key).map_or(default, |v| v.trim().parse::<T>().unwrap_or(default))
}
