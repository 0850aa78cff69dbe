//! Circular flight path with vertical bob, facing along the direction of travel

use cgmath::{Deg, Rad, Vector3};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::f64::consts::TAU;

use crate::component::Component;
use crate::math::{RandomStream, Seed};
use crate::scene::{NodeId, Scene};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitParams {
    pub radius: f32,
    /// Radians per second
    pub speed: f32,
    pub height: f32,
    pub bob: f32,
    pub center: [f32; 3],
    /// Added to the travel heading, in degrees
    pub yaw_offset: f32,
    /// Seed for the start angle; unseeded orbits start anywhere
    pub seed: Option<Seed>,
}

impl Default for OrbitParams {
    fn default() -> Self {
        Self {
            radius: 24.0,
            speed: 0.2,
            height: 8.0,
            bob: 0.4,
            center: [0.0, 0.0, 0.0],
            yaw_offset: 90.0,
            seed: None,
        }
    }
}

pub struct OrbitMotion {
    node: NodeId,
    params: OrbitParams,
    start_angle: f64,
    yaw_offset: Rad<f64>,
}

impl OrbitMotion {
    pub fn new(node: NodeId, params: OrbitParams) -> Self {
        let yaw_offset = Rad::from(Deg(params.yaw_offset as f64));
        Self {
            node,
            params,
            start_angle: 0.0,
            yaw_offset,
        }
    }

    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    /// Position and yaw (degrees) at `time_ms`
    pub fn pose_at(&self, time_ms: f64) -> (Vector3<f32>, f32) {
        let p = &self.params;
        let angle = self.start_angle + time_ms * 0.001 * p.speed as f64;
        let position = Vector3::new(
            (p.center[0] as f64 + angle.cos() * p.radius as f64) as f32,
            (p.height as f64 + (angle * 1.8).sin() * p.bob as f64) as f32,
            (p.center[2] as f64 + angle.sin() * p.radius as f64) as f32,
        );
        let yaw = Deg::from(Rad(-angle) + self.yaw_offset);
        (position, yaw.0 as f32)
    }
}

impl Component for OrbitMotion {
    fn name(&self) -> &'static str {
        "orbit-motion"
    }

    fn node(&self) -> NodeId {
        self.node
    }

    fn bind(&mut self, _scene: &mut Scene) {
        self.start_angle = match self.params.seed {
            Some(seed) => RandomStream::new(seed).next_f64() * TAU,
            None => rand::random::<f64>() * TAU,
        };
        self.yaw_offset = Rad::from(Deg(self.params.yaw_offset as f64));
    }

    fn tick(&mut self, time_ms: f64, _delta_ms: f64, scene: &mut Scene) {
        let (position, yaw) = self.pose_at(time_ms);
        if let Some(node) = scene.node_mut(self.node) {
            node.transform.position = position;
            node.transform.rotation.y = yaw;
        }
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
