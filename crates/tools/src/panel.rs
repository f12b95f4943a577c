//! Debug panel: numeric sliders two-way-bound to scene node coordinates.

use texcube_common::{Axis, NodeId};
use texcube_scene::SceneGraph;

#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    #[error("no slider at index {0}")]
    NoSuchSlider(usize),
    #[error("bound node {0:?} is not in the scene")]
    NodeMissing(NodeId),
}

/// One slider bound to one position axis of one node.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderBinding {
    pub label: String,
    pub node: NodeId,
    pub axis: Axis,
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl SliderBinding {
    /// Bind a node's position axis, labelled with the axis name.
    pub fn position(node: NodeId, axis: Axis, min: f32, max: f32, step: f32) -> Self {
        Self {
            label: axis.label().to_string(),
            node,
            axis,
            min,
            max,
            step,
        }
    }

    /// Clamp into range, then snap to the nearest step.
    pub fn normalize(&self, value: f32) -> f32 {
        let clamped = value.clamp(self.min, self.max);
        if self.step <= 0.0 {
            return clamped;
        }
        let snapped = (clamped / self.step).round() * self.step;
        snapped.clamp(self.min, self.max)
    }

    /// Current bound value, read straight from the scene.
    pub fn value(&self, scene: &SceneGraph) -> Result<f32, PanelError> {
        let t = scene
            .transform(self.node)
            .map_err(|_| PanelError::NodeMissing(self.node))?;
        Ok(self.axis.get(t.position))
    }

    /// Write a value through to the scene. Returns the value actually stored.
    pub fn set(&self, scene: &mut SceneGraph, value: f32) -> Result<f32, PanelError> {
        let v = self.normalize(value);
        let node = scene
            .get_mut(self.node)
            .ok_or(PanelError::NodeMissing(self.node))?;
        self.axis.set(&mut node.transform.position, v);
        Ok(v)
    }
}

/// Collection of slider bindings plus visibility.
#[derive(Debug, Clone)]
pub struct DebugPanel {
    bindings: Vec<SliderBinding>,
    visible: bool,
}

impl Default for DebugPanel {
    fn default() -> Self {
        Self {
            bindings: Vec::new(),
            visible: true,
        }
    }
}

impl DebugPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Three sliders for x, y and z of a node's position.
    pub fn for_position(node: NodeId, min: f32, max: f32, step: f32) -> Self {
        let mut panel = Self::new();
        for axis in Axis::ALL {
            panel.add(SliderBinding::position(node, axis, min, max, step));
        }
        panel
    }

    pub fn add(&mut self, binding: SliderBinding) -> usize {
        self.bindings.push(binding);
        self.bindings.len() - 1
    }

    pub fn bindings(&self) -> &[SliderBinding] {
        &self.bindings
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn toggle_visible(&mut self) {
        self.visible = !self.visible;
    }

    pub fn value(&self, scene: &SceneGraph, index: usize) -> Result<f32, PanelError> {
        self.bindings
            .get(index)
            .ok_or(PanelError::NoSuchSlider(index))?
            .value(scene)
    }

    /// Apply a slider write to the scene immediately.
    pub fn set(&self, scene: &mut SceneGraph, index: usize, value: f32) -> Result<f32, PanelError> {
        let binding = self
            .bindings
            .get(index)
            .ok_or(PanelError::NoSuchSlider(index))?;
        let stored = binding.set(scene, value)?;
        tracing::debug!("slider {} = {stored}", binding.label);
        Ok(stored)
    }
}
