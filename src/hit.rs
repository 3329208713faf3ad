//! Hit-testing seam.
//!
//! The router never picks on its own. It hands a [`HitTester`] the pointer
//! position plus the candidate set (the visible pins, nothing else in the
//! scene) and gets back at most one [`Hit`]. [`PlanarHitTester`] is a simple
//! reference picker for hosts with a top-down orthographic view.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Camera, Point, Position};
use crate::consts::DEFAULT_PICK_THRESHOLD;
use crate::store::PinId;

/// A pin the hit tester may report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate<'a> {
    pub id: &'a str,
    pub position: Position,
}

/// Result of a hit test.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub pin_id: PinId,
    /// World position of the intersected pin.
    pub position: Position,
}

/// Picks the pin under the pointer, if any.
pub trait HitTester {
    /// Return the nearest intersected candidate. Must only ever report ids
    /// taken from `candidates`.
    fn query(&self, pointer: Point, candidates: &[Candidate<'_>]) -> Option<Hit>;
}

/// Picks on the world XY plane through a pan/zoom camera looking down −Z.
///
/// The closest candidate within `threshold` world units of the pointer wins;
/// on equal distance the one nearer the viewer (larger `z`) wins, then the
/// smaller id. The radius is the same for every pin regardless of its size,
/// like the fixed raycast threshold of a point cloud.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarHitTester {
    pub camera: Camera,
    pub threshold: f64,
}

impl Default for PlanarHitTester {
    fn default() -> Self {
        Self { camera: Camera::default(), threshold: DEFAULT_PICK_THRESHOLD }
    }
}

impl PlanarHitTester {
    #[must_use]
    pub fn new(camera: Camera, threshold: f64) -> Self {
        Self { camera, threshold }
    }
}

impl HitTester for PlanarHitTester {
    fn query(&self, pointer: Point, candidates: &[Candidate<'_>]) -> Option<Hit> {
        let world = self.camera.screen_to_world(pointer);
        candidates
            .iter()
            .map(|c| (c, c.position.planar_distance(world)))
            .filter(|(_, d)| *d <= self.threshold)
            .min_by(|(a, da), (b, db)| {
                da.total_cmp(db)
                    .then_with(|| b.position.z.total_cmp(&a.position.z))
                    .then_with(|| a.id.cmp(b.id))
            })
            .map(|(c, _)| Hit { pin_id: c.id.to_string(), position: c.position })
    }
}
