//! Animated water surfaces
//!
//! [`SurfaceDisplacement`] is the pure wave model: it snapshots a point
//! buffer once and rewrites the z of every point from that snapshot each
//! frame, so waves never accumulate drift. [`WaterSurface`] drives it against
//! a node's surface mesh and scrolls the surface texture.

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::any::Any;

use crate::component::Component;
use crate::scene::{EventOutcome, NodeId, Scene, SceneEvent, TextureWrap};

/// Normals are recomputed on every 16th frame
const NORMALS_EVERY_MASK: u64 = 15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterSurfaceParams {
    /// Wave terms are evaluated in f64; vertex positions stay f32
    pub amplitude: f64,
    pub frequency: f64,
    pub speed: f64,
    pub uv_speed_x: f32,
    pub uv_speed_y: f32,
}

impl Default for WaterSurfaceParams {
    fn default() -> Self {
        Self {
            amplitude: 0.2,
            frequency: 0.14,
            speed: 0.45,
            uv_speed_x: 0.006,
            uv_speed_y: 0.003,
        }
    }
}

impl WaterSurfaceParams {
    /// Height offset of a point with base coordinates `(x, y)` at scaled time `t`
    pub fn wave_offset(&self, x: f64, y: f64, t: f64) -> f64 {
        let f = self.frequency;
        let wave_a = (x * f + t * 2.1).sin();
        let wave_b = (y * (f * 1.6) + t * 1.35).cos();
        let wave_c = ((x + y) * (f * 0.42) + t * 2.85).sin();
        (wave_a + wave_b * 0.72 + wave_c * 0.36) * self.amplitude
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
enum DisplacementState {
    #[default]
    Unbound,
    Bound {
        base: Vec<[f32; 3]>,
        frame: u64,
    },
}

/// Wave displacement over a captured base snapshot
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SurfaceDisplacement {
    state: DisplacementState,
}

impl SurfaceDisplacement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture `positions` as the immutable base and restart the frame count
    ///
    /// An empty buffer leaves the displacement unbound.
    pub fn bind(&mut self, positions: &[[f32; 3]]) {
        self.state = if positions.is_empty() {
            DisplacementState::Unbound
        } else {
            DisplacementState::Bound {
                base: positions.to_vec(),
                frame: 0,
            }
        };
    }

    pub fn unbind(&mut self) {
        self.state = DisplacementState::Unbound;
    }

    pub fn is_bound(&self) -> bool {
        matches!(self.state, DisplacementState::Bound { .. })
    }

    /// Frames displaced since the last bind
    pub fn frame(&self) -> u64 {
        match self.state {
            DisplacementState::Bound { frame, .. } => frame,
            DisplacementState::Unbound => 0,
        }
    }

    pub fn base_positions(&self) -> Option<&[[f32; 3]]> {
        match &self.state {
            DisplacementState::Bound { base, .. } => Some(base),
            DisplacementState::Unbound => None,
        }
    }

    /// Write displaced points into `out`
    ///
    /// Returns `true` when this frame is due a normals recompute. Does
    /// nothing and returns `false` while unbound. Only the first
    /// `min(out.len(), base.len())` points are touched.
    pub fn displace(&mut self, params: &WaterSurfaceParams, time_ms: f64, out: &mut [[f32; 3]]) -> bool {
        let DisplacementState::Bound { base, frame } = &mut self.state else {
            return false;
        };

        let t = time_ms * 0.001 * params.speed;
        for (point, base) in out.iter_mut().zip(base.iter()) {
            let offset = params.wave_offset(base[0] as f64, base[1] as f64, t);
            *point = [base[0], base[1], (base[2] as f64 + offset) as f32];
        }

        let normals_due = *frame & NORMALS_EVERY_MASK == 0;
        *frame += 1;
        normals_due
    }
}

/// Water animation bound to the surface mesh of its node
///
/// Rebinds whenever the host replaces the mesh ([`SceneEvent::MeshSet`]).
pub struct WaterSurface {
    node: NodeId,
    params: WaterSurfaceParams,
    displacement: SurfaceDisplacement,
}

impl WaterSurface {
    pub fn new(node: NodeId, params: WaterSurfaceParams) -> Self {
        Self {
            node,
            params,
            displacement: SurfaceDisplacement::new(),
        }
    }

    pub fn params(&self) -> &WaterSurfaceParams {
        &self.params
    }

    pub fn set_params(&mut self, params: WaterSurfaceParams) {
        self.params = params;
    }

    pub fn displacement(&self) -> &SurfaceDisplacement {
        &self.displacement
    }

    fn capture(&mut self, scene: &mut Scene) {
        let Some(node) = scene.node_mut(self.node) else {
            debug!("water surface target missing, staying unbound");
            return;
        };
        let Some(surface) = node.surface.as_ref() else {
            debug!("water surface on '{}' has no mesh yet", node.name);
            return;
        };
        self.displacement.bind(&surface.vertices);
        if !self.displacement.is_bound() {
            debug!("water surface on '{}' has an empty point buffer", node.name);
            return;
        }

        if let Some(map) = node.material.as_mut().and_then(|m| m.map.as_mut()) {
            map.wrap_s = TextureWrap::Repeat;
            map.wrap_t = TextureWrap::Repeat;
            map.needs_update = true;
        }
        trace!("water surface bound to '{}'", node.name);
    }
}

impl Component for WaterSurface {
    fn name(&self) -> &'static str {
        "water-surface"
    }

    fn node(&self) -> NodeId {
        self.node
    }

    fn bind(&mut self, scene: &mut Scene) {
        self.capture(scene);
    }

    fn tick(&mut self, time_ms: f64, delta_ms: f64, scene: &mut Scene) {
        if !self.displacement.is_bound() {
            return;
        }
        let Some(node) = scene.node_mut(self.node) else {
            return;
        };
        let Some(surface) = node.surface.as_mut() else {
            return;
        };

        let normals_due = self.displacement.displace(&self.params, time_ms, &mut surface.vertices);
        surface.positions_dirty = true;
        if normals_due {
            surface.recompute_normals();
        }

        if let Some(map) = node.material.as_mut().and_then(|m| m.map.as_mut()) {
            let delta_s = (delta_ms * 0.001) as f32;
            map.offset[0] = (map.offset[0] + self.params.uv_speed_x * delta_s) % 1.0;
            map.offset[1] = (map.offset[1] + self.params.uv_speed_y * delta_s) % 1.0;
        }
    }

    fn handle_event(&mut self, event: &SceneEvent, scene: &mut Scene) -> EventOutcome {
        if *event == SceneEvent::MeshSet {
            self.capture(scene);
        }
        EventOutcome::Ignored
    }

    fn teardown(&mut self, _scene: &mut Scene) {
        self.displacement.unbind();
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::generate_plane;
    use crate::scene::{Color, Material, SceneNode, TextureMap};

    fn ocean(scene: &mut Scene) -> NodeId {
        let material = Material::new(Color::hex(0x62bce8), 0.2, 0.0).with_map(TextureMap::new("oceanTex"));
        scene.add_node(
            SceneNode::new("ocean")
                .with_surface(generate_plane(40.0, 40.0, 8, 8))
                .with_material(material),
        )
    }

    #[test]
    fn test_zero_amplitude_keeps_base() {
        let base = generate_plane(10.0, 10.0, 4, 4).vertices;
        let mut displacement = SurfaceDisplacement::new();
        displacement.bind(&base);

        let params = WaterSurfaceParams {
            amplitude: 0.0,
            ..Default::default()
        };
        let mut out = base.clone();
        for frame in 0..5 {
            displacement.displace(&params, frame as f64 * 16.0, &mut out);
            assert_eq!(out, base);
        }
    }

    #[test]
    fn test_wave_terms_use_exact_parameters() {
        let params = WaterSurfaceParams::default();
        assert_eq!(params.frequency, 0.14);
        assert_eq!(params.speed, 0.45);

        let (x, y, t) = (12.5, -7.25, 3.0);
        let f = 0.14_f64;
        let expected = ((x * f + t * 2.1).sin()
            + (y * (f * 1.6) + t * 1.35).cos() * 0.72
            + ((x + y) * (f * 0.42) + t * 2.85).sin() * 0.36)
            * 0.2;
        assert_eq!(params.wave_offset(x, y, t), expected);
    }

    #[test]
    fn test_displacement_is_bounded_and_stateless() {
        let base = generate_plane(30.0, 30.0, 6, 6).vertices;
        let params = WaterSurfaceParams::default();
        let mut displacement = SurfaceDisplacement::new();
        displacement.bind(&base);

        let mut out = base.clone();
        displacement.displace(&params, 1234.0, &mut out);
        let first = out.clone();
        for point in &first {
            // |offset| <= (1 + 0.72 + 0.36) * amplitude
            assert!(point[2].abs() <= 2.08 * 0.2 + 1e-6);
        }

        // Same time, same output, regardless of what ran in between
        displacement.displace(&params, 9999.0, &mut out);
        displacement.displace(&params, 1234.0, &mut out);
        assert_eq!(out, first);
    }

    #[test]
    fn test_normals_schedule() {
        let base = generate_plane(4.0, 4.0, 2, 2).vertices;
        let params = WaterSurfaceParams::default();
        let mut displacement = SurfaceDisplacement::new();
        displacement.bind(&base);

        let mut out = base.clone();
        let due: Vec<u64> = (0..40)
            .filter(|i| displacement.displace(&params, *i as f64 * 16.0, &mut out))
            .collect();
        assert_eq!(due, vec![0, 16, 32]);
    }

    #[test]
    fn test_rebind_resets_frame() {
        let base = generate_plane(4.0, 4.0, 2, 2).vertices;
        let params = WaterSurfaceParams::default();
        let mut displacement = SurfaceDisplacement::new();
        displacement.bind(&base);

        let mut out = base.clone();
        for _ in 0..5 {
            displacement.displace(&params, 0.0, &mut out);
        }
        assert_eq!(displacement.frame(), 5);

        displacement.bind(&base);
        assert_eq!(displacement.frame(), 0);
        assert!(displacement.displace(&params, 0.0, &mut out));
    }

    #[test]
    fn test_empty_buffer_stays_unbound() {
        let mut displacement = SurfaceDisplacement::new();
        displacement.bind(&[]);
        assert!(!displacement.is_bound());
        assert!(!displacement.displace(&WaterSurfaceParams::default(), 0.0, &mut []));
    }

    #[test]
    fn test_component_animates_node_mesh() {
        let mut scene = Scene::new();
        let node = ocean(&mut scene);
        let mut water = WaterSurface::new(node, WaterSurfaceParams::default());
        water.bind(&mut scene);

        let map = scene.node(node).unwrap().material.as_ref().unwrap().map.as_ref().unwrap();
        assert_eq!(map.wrap_s, TextureWrap::Repeat);
        assert!(map.needs_update);

        for i in 0..17 {
            water.tick(i as f64 * 16.0, 16.0, &mut scene);
        }

        let node_ref = scene.node(node).unwrap();
        let surface = node_ref.surface.as_ref().unwrap();
        assert!(surface.positions_dirty);
        assert_eq!(surface.normals_revision, 2);

        let offset = node_ref.material.as_ref().unwrap().map.as_ref().unwrap().offset;
        assert!((offset[0] - 0.006 * 0.016 * 17.0).abs() < 1e-6);
        assert!((offset[1] - 0.003 * 0.016 * 17.0).abs() < 1e-6);
    }

    #[test]
    fn test_unbound_tick_is_noop() {
        let mut scene = Scene::new();
        let node = scene.add_node(SceneNode::new("ocean"));
        let mut water = WaterSurface::new(node, WaterSurfaceParams::default());
        water.bind(&mut scene);
        water.tick(100.0, 16.0, &mut scene);
        assert!(scene.node(node).unwrap().surface.is_none());
        assert!(!water.displacement().is_bound());
    }

    #[test]
    fn test_mesh_set_rebinds() {
        let mut scene = Scene::new();
        let node = scene.add_node(SceneNode::new("ocean"));
        let mut water = WaterSurface::new(node, WaterSurfaceParams::default());
        water.bind(&mut scene);
        assert!(!water.displacement().is_bound());

        scene.node_mut(node).unwrap().surface = Some(generate_plane(2.0, 2.0, 1, 1));
        water.handle_event(&SceneEvent::MeshSet, &mut scene);
        assert!(water.displacement().is_bound());
        assert_eq!(water.displacement().base_positions().unwrap().len(), 4);
    }
}
