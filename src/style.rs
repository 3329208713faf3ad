//! Pin styling: colours, procedural shapes and hover highlighting.
//!
//! A pin's [`PinStyle`] is fixed at creation. Hovering never mutates it; the
//! renderer asks for [`PinStyle::display_color`] with the pin's hovered flag,
//! so leaving a pin restores its exact base colour.

#[cfg(test)]
#[path = "style_test.rs"]
mod style_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::HOVER_HIGHLIGHT;

/// Error returned when a colour string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StyleError {
    #[error("invalid color `{0}` (expected #RGB, #RRGGBB or a basic CSS color name)")]
    InvalidColor(String),
}

/// An RGB colour with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };

    /// Build a colour from 8-bit channels.
    #[must_use]
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self { r: f32::from(r) / 255.0, g: f32::from(g) / 255.0, b: f32::from(b) / 255.0 }
    }

    /// Add `amount` to every channel, clamping to `[0, 1]`.
    #[must_use]
    pub fn brighten(self, amount: f32) -> Self {
        Self {
            r: (self.r + amount).clamp(0.0, 1.0),
            g: (self.g + amount).clamp(0.0, 1.0),
            b: (self.b + amount).clamp(0.0, 1.0),
        }
    }

    /// Lower-case `#rrggbb` form.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", channel_u8(self.r), channel_u8(self.g), channel_u8(self.b))
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn channel_u8(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// The sixteen basic CSS colour keywords.
const NAMED_COLORS: [(&str, [u8; 3]); 16] = [
    ("black", [0x00, 0x00, 0x00]),
    ("silver", [0xc0, 0xc0, 0xc0]),
    ("gray", [0x80, 0x80, 0x80]),
    ("white", [0xff, 0xff, 0xff]),
    ("maroon", [0x80, 0x00, 0x00]),
    ("red", [0xff, 0x00, 0x00]),
    ("purple", [0x80, 0x00, 0x80]),
    ("fuchsia", [0xff, 0x00, 0xff]),
    ("green", [0x00, 0x80, 0x00]),
    ("lime", [0x00, 0xff, 0x00]),
    ("olive", [0x80, 0x80, 0x00]),
    ("yellow", [0xff, 0xff, 0x00]),
    ("navy", [0x00, 0x00, 0x80]),
    ("blue", [0x00, 0x00, 0xff]),
    ("teal", [0x00, 0x80, 0x80]),
    ("aqua", [0x00, 0xff, 0xff]),
];

impl FromStr for Rgb {
    type Err = StyleError;

    /// Accepts `#RGB`, `#RRGGBB` or a basic CSS colour name (case-insensitive).
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || StyleError::InvalidColor(raw.to_string());
        let trimmed = raw.trim();
        if let Some((_, [r, g, b])) = NAMED_COLORS.iter().find(|(name, _)| name.eq_ignore_ascii_case(trimmed)) {
            return Ok(Self::from_u8(*r, *g, *b));
        }
        let hex = trimmed.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let digits: Vec<u8> = match hex.len() {
            6 => (0..3)
                .map(|i| u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16))
                .collect::<Result<_, _>>()
                .map_err(|_| invalid())?,
            3 => hex
                .chars()
                .map(|c| c.to_digit(16).map_or(0, |d| u8::try_from(d * 17).unwrap_or(u8::MAX)))
                .collect(),
            _ => return Err(invalid()),
        };
        Ok(Self::from_u8(digits[0], digits[1], digits[2]))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Procedural shape requested through pin options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Circle,
    Star,
}

/// A validated procedural shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PinShape {
    /// Filled disc.
    Circle,
    /// Star with `sides` branches; `spikiness` in `[0, 1]`.
    Star { sides: u32, spikiness: f64 },
}

/// What the pin's material is drawn from.
#[derive(Debug, Clone, PartialEq)]
pub enum PinSkin {
    /// A procedurally drawn stencil.
    Shape(PinShape),
    /// An externally loaded image.
    Texture(String),
}

/// Visual style descriptor for a pin. Opaque to the router.
#[derive(Debug, Clone, PartialEq)]
pub struct PinStyle {
    /// Base colour; never changed by hovering.
    pub color: Rgb,
    /// Diameter in world units.
    pub size: f64,
    pub skin: PinSkin,
}

impl PinStyle {
    /// The colour the renderer should use right now.
    #[must_use]
    pub fn display_color(&self, hovered: bool) -> Rgb {
        if hovered { self.color.brighten(HOVER_HIGHLIGHT) } else { self.color }
    }
}
