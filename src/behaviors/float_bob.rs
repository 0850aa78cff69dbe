//! Sinusoidal bobbing for floating props (clouds, boats, balloons)

use cgmath::Vector3;
use serde::{Deserialize, Serialize};
use std::any::Any;

use crate::component::Component;
use crate::scene::{NodeId, Scene};

/// Axis the bob offset is applied on
///
/// Config values go through [`Axis::from_attr`], so an unknown axis name
/// falls back to `y` instead of failing the whole file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Axis {
    X,
    #[default]
    Y,
    Z,
}

impl Axis {
    /// Parse a host attribute; anything other than `x` or `z` means `y`
    pub fn from_attr(value: &str) -> Self {
        match value {
            "x" => Axis::X,
            "z" => Axis::Z,
            _ => Axis::Y,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

impl From<String> for Axis {
    fn from(value: String) -> Self {
        Axis::from_attr(&value)
    }
}

impl From<Axis> for String {
    fn from(axis: Axis) -> Self {
        axis.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloatBobParams {
    pub amplitude: f32,
    pub speed: f32,
    pub phase: f32,
    pub axis: Axis,
}

impl Default for FloatBobParams {
    fn default() -> Self {
        Self {
            amplitude: 0.08,
            speed: 1.0,
            phase: 0.0,
            axis: Axis::Y,
        }
    }
}

/// Moves its node back and forth around the position it had when bound
pub struct FloatBob {
    node: NodeId,
    params: FloatBobParams,
    origin: Option<Vector3<f32>>,
}

impl FloatBob {
    pub fn new(node: NodeId, params: FloatBobParams) -> Self {
        Self {
            node,
            params,
            origin: None,
        }
    }

    pub fn params(&self) -> &FloatBobParams {
        &self.params
    }

    pub fn set_params(&mut self, params: FloatBobParams) {
        self.params = params;
    }

    /// Offset along the axis at `time_ms`
    pub fn offset_at(&self, time_ms: f64) -> f32 {
        let p = &self.params;
        ((time_ms * 0.001 * p.speed as f64 + p.phase as f64).sin() * p.amplitude as f64) as f32
    }
}

impl Component for FloatBob {
    fn name(&self) -> &'static str {
        "float-bob"
    }

    fn node(&self) -> NodeId {
        self.node
    }

    fn bind(&mut self, scene: &mut Scene) {
        self.origin = scene.node(self.node).map(|n| n.transform.position);
    }

    fn tick(&mut self, time_ms: f64, _delta_ms: f64, scene: &mut Scene) {
        let Some(origin) = self.origin else {
            return;
        };
        let offset = self.offset_at(time_ms);
        let axis = self.params.axis;
        let Some(node) = scene.node_mut(self.node) else {
            return;
        };

        let mut position = origin;
        match axis {
            Axis::X => position.x += offset,
            Axis::Y => position.y += offset,
            Axis::Z => position.z += offset,
        }
        node.transform.position = position;
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
