//! Procedural stair flights
//!
//! Emits one box per step plus a landing at the top, all as children of the
//! component's node. The flight climbs along +Y and runs along +Z.

use serde::{Deserialize, Serialize};
use std::any::Any;

use log::debug;

use crate::component::Component;
use crate::geometry::Primitive;
use crate::scene::{Color, Material, NodeId, Scene, SceneNode, Shadow, Transform};

const LANDING_THICKNESS: f32 = 0.12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StairFlightParams {
    pub steps: u32,
    /// Height of one step
    pub rise: f32,
    /// Depth of one step
    pub run: f32,
    pub width: f32,
    pub landing_depth: f32,
    pub color: Color,
    pub roughness: f32,
    pub metalness: f32,
}

impl Default for StairFlightParams {
    fn default() -> Self {
        Self {
            steps: 14,
            rise: 0.232,
            run: 0.22,
            width: 1.4,
            landing_depth: 0.9,
            color: Color::hex(0xd8d5ce),
            roughness: 0.75,
            metalness: 0.02,
        }
    }
}

/// Box descriptor for one piece of the flight, in the flight's local frame
#[derive(Debug, Clone, PartialEq)]
pub struct StairPiece {
    pub size: [f32; 3],
    pub center: [f32; 3],
}

/// Layout of every step followed by the landing
pub fn layout_flight(params: &StairFlightParams) -> Vec<StairPiece> {
    let steps = params.steps.max(1);
    let (rise, run, width) = (params.rise, params.run, params.width);

    let mut pieces: Vec<StairPiece> = (0..steps)
        .map(|i| {
            let mid = i as f32 + 0.5;
            StairPiece {
                size: [width, rise, run],
                center: [0.0, mid * rise, mid * run],
            }
        })
        .collect();

    pieces.push(StairPiece {
        size: [width, LANDING_THICKNESS, params.landing_depth],
        center: [
            0.0,
            steps as f32 * rise + LANDING_THICKNESS * 0.5,
            steps as f32 * run + params.landing_depth * 0.5,
        ],
    });

    pieces
}

pub struct StairFlight {
    node: NodeId,
    params: StairFlightParams,
}

impl StairFlight {
    pub fn new(node: NodeId, params: StairFlightParams) -> Self {
        Self { node, params }
    }

    pub fn params(&self) -> &StairFlightParams {
        &self.params
    }

    /// Replace parameters and rebuild the flight
    pub fn set_params(&mut self, params: StairFlightParams, scene: &mut Scene) {
        self.params = params;
        self.build(scene);
    }

    fn build(&self, scene: &mut Scene) {
        scene.clear_children(self.node);
        if !scene.contains(self.node) {
            return;
        }

        let material = Material::new(self.params.color, self.params.roughness, self.params.metalness);
        let pieces = layout_flight(&self.params);
        let landing_index = pieces.len() - 1;

        for (i, piece) in pieces.iter().enumerate() {
            let name = if i == landing_index {
                "landing".to_string()
            } else {
                format!("step{i}")
            };
            let node = SceneNode::new(&name)
                .with_geometry(Primitive::Box {
                    width: piece.size[0],
                    height: piece.size[1],
                    depth: piece.size[2],
                })
                .with_transform(Transform::at(piece.center.into()))
                .with_material(material.clone())
                .with_shadow(Shadow::BOTH);
            scene.add_child(self.node, node);
        }

        debug!("stair flight built with {} steps", landing_index);
    }
}

impl Component for StairFlight {
    fn name(&self) -> &'static str {
        "stair-flight"
    }

    fn node(&self) -> NodeId {
        self.node
    }

    fn bind(&mut self, scene: &mut Scene) {
        self.build(scene);
    }

    fn teardown(&mut self, scene: &mut Scene) {
        scene.clear_children(self.node);
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
