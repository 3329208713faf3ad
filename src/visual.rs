//! Pin visuals.
//!
//! The store and router only ever hold a [`VisualHandle`]; what it refers
//! to belongs to the [`VisualFactory`]. [`StencilFactory`] is the built-in
//! factory: it computes the outline a renderer fills into a square stencil
//! texture (disc or star) and passes texture URLs through untouched.

#[cfg(test)]
#[path = "visual_test.rs"]
mod visual_test;

use std::f64::consts::PI;

use crate::camera::Point;
use crate::consts::{CIRCLE_STENCIL_RADIUS_PX, MAX_STAR_SIDES, STENCIL_TEXTURE_PX};
use crate::style::{PinShape, PinSkin, PinStyle};

/// Opaque reference to a pin's material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisualHandle(pub u64);

/// Produces pin materials from style descriptors.
pub trait VisualFactory {
    fn create(&mut self, style: &PinStyle) -> VisualHandle;
}

/// Fill geometry for a pin material, in stencil-texture pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum Stencil {
    /// Filled disc centred on the texture.
    Disc { center: Point, radius: f64 },
    /// Filled closed polygon.
    Polygon(Vec<Point>),
    /// Load this image instead of drawing.
    Image(String),
}

/// Builds stencils and hands out sequential handles to them.
#[derive(Debug, Default)]
pub struct StencilFactory {
    stencils: Vec<Stencil>,
}

impl StencilFactory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn stencil(&self, handle: VisualHandle) -> Option<&Stencil> {
        usize::try_from(handle.0)
            .map_or(None, |i| self.stencils.get(i))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stencils.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stencils.is_empty()
    }
}

impl VisualFactory for StencilFactory {
    fn create(&mut self, style: &PinStyle) -> VisualHandle {
        let stencil = match &style.skin {
            PinSkin::Texture(url) => Stencil::Image(url.clone()),
            PinSkin::Shape(PinShape::Circle) => Stencil::Disc {
                center: Point::new(STENCIL_TEXTURE_PX / 2.0, STENCIL_TEXTURE_PX / 2.0),
                radius: CIRCLE_STENCIL_RADIUS_PX,
            },
            PinSkin::Shape(PinShape::Star { sides, spikiness }) => Stencil::Polygon(star_outline(*sides, *spikiness)),
        };
        let handle = VisualHandle(self.stencils.len() as u64);
        self.stencils.push(stencil);
        handle
    }
}

/// Outline of a star inscribed in the stencil texture.
///
/// Alternates outer and inner vertices starting at the top (angle 3π/2,
/// y pointing down), `2 * sides` vertices in total. The inner radius is the
/// outer radius scaled by `1 - spikiness`. `sides` is capped at
/// [`MAX_STAR_SIDES`].
#[must_use]
pub fn star_outline(sides: u32, spikiness: f64) -> Vec<Point> {
    let sides = sides.min(MAX_STAR_SIDES);
    let center = STENCIL_TEXTURE_PX / 2.0;
    let outer = STENCIL_TEXTURE_PX / 2.0;
    let inner = outer * (1.0 - spikiness);
    let step = PI / f64::from(sides);

    (0..sides * 2)
        .map(|i| {
            let angle = PI * 1.5 + step * f64::from(i);
            let radius = if i % 2 == 0 { outer } else { inner };
            Point::new(center + angle.cos() * radius, center + angle.sin() * radius)
        })
        .collect()
}
