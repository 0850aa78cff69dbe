//! Keeps the player inside the playable island disk

use serde::{Deserialize, Serialize};
use std::any::Any;

use crate::component::Component;
use crate::scene::{NodeId, Scene};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IslandBoundaryParams {
    pub radius: f32,
    pub min_y: f32,
    pub lock_y: bool,
}

impl Default for IslandBoundaryParams {
    fn default() -> Self {
        Self {
            radius: 36.0,
            min_y: 1.46,
            lock_y: true,
        }
    }
}

pub struct IslandBoundary {
    node: NodeId,
    params: IslandBoundaryParams,
}

impl IslandBoundary {
    pub fn new(node: NodeId, params: IslandBoundaryParams) -> Self {
        Self { node, params }
    }

    pub fn set_params(&mut self, params: IslandBoundaryParams) {
        self.params = params;
    }
}

impl Component for IslandBoundary {
    fn name(&self) -> &'static str {
        "island-boundary"
    }

    fn node(&self) -> NodeId {
        self.node
    }

    fn bind(&mut self, _scene: &mut Scene) {}

    fn tick(&mut self, _time_ms: f64, _delta_ms: f64, scene: &mut Scene) {
        let Some(node) = scene.node_mut(self.node) else {
            return;
        };
        let pos = &mut node.transform.position;

        let dist_sq = pos.x * pos.x + pos.z * pos.z;
        let max_dist_sq = self.params.radius * self.params.radius;
        if dist_sq > max_dist_sq {
            let scale = self.params.radius / dist_sq.sqrt();
            pos.x *= scale;
            pos.z *= scale;
        }

        if self.params.lock_y && (pos.y - self.params.min_y).abs() > 0.001 {
            pos.y = self.params.min_y;
        }
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
