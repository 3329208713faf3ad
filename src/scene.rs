//! Scene seam: where pin visuals get attached for rendering.
//!
//! The collection pushes a [`SceneNode`] snapshot whenever a pin enters the
//! scene or its visibility or hover styling changes, and unlinks it on
//! detach. [`PinContainer`] is an in-memory node container for hosts that
//! pull state each frame, and for tests.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use std::collections::HashMap;

use crate::camera::Position;
use crate::store::{Pin, PinId};
use crate::style::Rgb;
use crate::visual::VisualHandle;

/// What the renderer needs to draw one pin.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub id: PinId,
    pub visual: VisualHandle,
    pub position: Position,
    /// Diameter in world units.
    pub size: f64,
    pub visible: bool,
    /// Current display colour, already highlighted when hovered.
    pub color: Rgb,
}

impl SceneNode {
    #[must_use]
    pub fn from_pin(pin: &Pin) -> Self {
        Self {
            id: pin.id().to_string(),
            visual: pin.visual(),
            position: pin.position(),
            size: pin.style().size,
            visible: pin.is_visible(),
            color: pin.display_color(),
        }
    }
}

/// Render-side container the pin visuals live in.
pub trait Scene {
    fn add_to_scene(&mut self, node: &SceneNode);
    fn remove_from_scene(&mut self, id: &str);
    /// Refresh an attached node after a visibility or styling change.
    fn update_node(&mut self, node: &SceneNode);
}

/// In-memory container of pin nodes.
#[derive(Debug, Default)]
pub struct PinContainer {
    nodes: HashMap<PinId, SceneNode>,
}

impl PinContainer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn node(&self, id: &str) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes sorted by id, for stable draw order.
    #[must_use]
    pub fn sorted_nodes(&self) -> Vec<&SceneNode> {
        let mut nodes: Vec<&SceneNode> = self.nodes.values().collect();
        nodes.sort_by(|a, b| a.id.cmp(&b.id));
        nodes
    }
}

impl Scene for PinContainer {
    fn add_to_scene(&mut self, node: &SceneNode) {
        self.nodes.insert(node.id.clone(), node.clone());
    }

    fn remove_from_scene(&mut self, id: &str) {
        self.nodes.remove(id);
    }

    fn update_node(&mut self, node: &SceneNode) {
        if let Some(existing) = self.nodes.get_mut(&node.id) {
            *existing = node.clone();
        }
    }
}
