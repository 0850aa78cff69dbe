//! Live water plane over a loaded pool model
//!
//! Pool models ship with baked water meshes that look flat. The overlay
//! fades those meshes out and lays an animated plane just below the pool's
//! top edge. Rebuilds are deferred to the next tick so autofit can settle
//! the model first.

use cgmath::Vector3;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::any::Any;

use super::surface::{WaterSurface, WaterSurfaceParams};
use crate::component::Component;
use crate::geometry::{generate_plane, Primitive};
use crate::math::Aabb;
use crate::scene::{
    Color, EventOutcome, Material, NodeId, Scene, SceneEvent, SceneNode, Shadow, TextureMap, Transform,
};

pub const WATER_NORMALS: &str = "waterNormals";
const SOFTENED_COLOR: Color = Color::hex(0x77d0f2);
const SOFTENED_MAX_OPACITY: f32 = 0.15;
const MIN_PLANE_SIZE: f32 = 0.6;
const PLANE_INSET: f32 = 0.94;
/// Fraction of the half height above center where the surface sits
const SURFACE_LEVEL: f32 = 0.48;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolWaterParams {
    pub color: Color,
    pub opacity: f32,
    pub roughness: f32,
    pub metalness: f32,
    pub water_height_offset: f32,
    pub segments: u32,
}

impl Default for PoolWaterParams {
    fn default() -> Self {
        Self {
            color: Color::hex(0x55c8f2),
            opacity: 0.8,
            roughness: 0.14,
            metalness: 0.08,
            water_height_offset: 0.03,
            segments: 60,
        }
    }
}

/// Wave settings for the small pool plane
pub fn pool_wave_params() -> WaterSurfaceParams {
    WaterSurfaceParams {
        amplitude: 0.035,
        frequency: 2.6,
        speed: 1.08,
        uv_speed_x: 0.03,
        uv_speed_y: 0.02,
    }
}

/// True for model parts that carry baked pool water
pub fn is_water_part(name: &str) -> bool {
    name.to_lowercase().contains("water")
}

fn soften(material: &mut Material) {
    material.transparent = true;
    material.opacity = material.opacity.min(SOFTENED_MAX_OPACITY);
    material.depth_write = false;
    material.color = SOFTENED_COLOR;
    material.needs_update = true;
}

pub struct PoolWaterOverlay {
    node: NodeId,
    params: PoolWaterParams,
    pending_build: bool,
    water: Option<WaterSurface>,
}

impl PoolWaterOverlay {
    pub fn new(node: NodeId, params: PoolWaterParams) -> Self {
        Self {
            node,
            params,
            pending_build: false,
            water: None,
        }
    }

    pub fn params(&self) -> &PoolWaterParams {
        &self.params
    }

    /// Replace parameters; the plane is rebuilt on the next tick
    pub fn set_params(&mut self, params: PoolWaterParams) {
        self.params = params;
        self.queue_build();
    }

    /// Node of the current water plane
    pub fn water_node(&self) -> Option<NodeId> {
        self.water.as_ref().map(|w| w.node())
    }

    pub fn is_build_pending(&self) -> bool {
        self.pending_build
    }

    fn queue_build(&mut self) {
        self.pending_build = true;
    }

    fn remove_water(&mut self, scene: &mut Scene) {
        if let Some(mut water) = self.water.take() {
            water.teardown(scene);
            scene.remove_node(water.node());
        }
    }

    fn build(&mut self, scene: &mut Scene) {
        self.pending_build = false;

        let Some(model) = scene.node_mut(self.node).and_then(|n| n.model.as_mut()) else {
            debug!("pool overlay: no model on target yet");
            return;
        };

        let mut bounds = Aabb::empty();
        let mut water_parts = 0;
        let (scale, position) = (model.scale, model.position);
        for part in model.parts.iter_mut().filter(|p| is_water_part(&p.name)) {
            bounds.union(&part.bounds.scaled_and_translated(scale, position));
            part.materials.iter_mut().for_each(soften);
            water_parts += 1;
        }
        if water_parts == 0 {
            bounds = model.bounds();
        }

        self.remove_water(scene);

        if bounds.is_empty() {
            debug!("pool overlay: model bounds are empty");
            return;
        }

        let size = bounds.size();
        let center = bounds.center();
        let width = (size.x * PLANE_INSET).max(MIN_PLANE_SIZE);
        let depth = (size.z * PLANE_INSET).max(MIN_PLANE_SIZE);
        let water_y = center.y + size.y * SURFACE_LEVEL + self.params.water_height_offset;
        let segments = self.params.segments;

        let material = Material::new(self.params.color, self.params.roughness, self.params.metalness)
            .with_normal_map(TextureMap::new(WATER_NORMALS).with_repeat(6.0, 6.0))
            .with_opacity(self.params.opacity)
            .double_sided();

        let plane = SceneNode::new("pool-water")
            .with_geometry(Primitive::Plane {
                width,
                height: depth,
                segments_width: segments,
                segments_height: segments,
            })
            .with_surface(generate_plane(width, depth, segments, segments))
            .with_material(material)
            .with_transform(
                Transform::at(Vector3::new(center.x, water_y, center.z))
                    .with_rotation(Vector3::new(-90.0, 0.0, 0.0)),
            )
            .with_shadow(Shadow::RECEIVE);
        let water_node = scene.add_child(self.node, plane);

        let mut water = WaterSurface::new(water_node, pool_wave_params());
        water.bind(scene);
        self.water = Some(water);

        info!(
            "pool water plane {:.3} x {:.3} at y {:.3} ({} water parts softened)",
            width, depth, water_y, water_parts
        );
    }
}

impl Component for PoolWaterOverlay {
    fn name(&self) -> &'static str {
        "pool-water-overlay"
    }

    fn node(&self) -> NodeId {
        self.node
    }

    fn bind(&mut self, _scene: &mut Scene) {
        self.queue_build();
    }

    fn tick(&mut self, time_ms: f64, delta_ms: f64, scene: &mut Scene) {
        if self.pending_build {
            self.build(scene);
        }
        if let Some(water) = self.water.as_mut() {
            water.tick(time_ms, delta_ms, scene);
        }
    }

    fn handle_event(&mut self, event: &SceneEvent, _scene: &mut Scene) -> EventOutcome {
        if matches!(event, SceneEvent::ModelLoaded | SceneEvent::AutofitComplete) {
            self.queue_build();
        }
        EventOutcome::Ignored
    }

    fn teardown(&mut self, scene: &mut Scene) {
        self.pending_build = false;
        self.remove_water(scene);
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
