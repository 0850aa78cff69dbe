//! Fit a loaded model into a target box while keeping its proportions

use cgmath::Vector3;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::any::Any;

use crate::component::Component;
use crate::scene::{EventOutcome, NodeId, Scene, SceneEvent};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelAutofitParams {
    /// Target extents; 0 leaves the axis unconstrained
    pub width: f32,
    pub depth: f32,
    pub height: f32,
    pub center_x: bool,
    pub center_z: bool,
    pub align_ground: bool,
    pub ground_offset: f32,
}

impl Default for ModelAutofitParams {
    fn default() -> Self {
        Self {
            width: 0.0,
            depth: 0.0,
            height: 0.0,
            center_x: true,
            center_z: true,
            align_ground: true,
            ground_offset: 0.0,
        }
    }
}

impl ModelAutofitParams {
    /// Smallest scale that fits every constrained axis, or 1 when none applies
    pub fn uniform_scale(&self, size: Vector3<f32>) -> f32 {
        [(self.width, size.x), (self.height, size.y), (self.depth, size.z)]
            .into_iter()
            .filter(|(target, extent)| *target > 0.0 && *extent > 0.0)
            .map(|(target, extent)| target / extent)
            .reduce(f32::min)
            .unwrap_or(1.0)
    }
}

/// Root transform of the model as it was before the first fit
#[derive(Debug, Clone, Copy, PartialEq)]
struct BaseTransform {
    position: Vector3<f32>,
    scale: Vector3<f32>,
}

pub struct ModelAutofit {
    node: NodeId,
    params: ModelAutofitParams,
    base: Option<BaseTransform>,
}

impl ModelAutofit {
    pub fn new(node: NodeId, params: ModelAutofitParams) -> Self {
        Self {
            node,
            params,
            base: None,
        }
    }

    pub fn params(&self) -> &ModelAutofitParams {
        &self.params
    }

    /// Replace parameters and refit from the base transform
    pub fn set_params(&mut self, params: ModelAutofitParams, scene: &mut Scene) {
        self.params = params;
        self.fit(scene);
    }

    /// Returns `true` when the model was refit
    pub fn fit(&mut self, scene: &mut Scene) -> bool {
        let Some(model) = scene.node_mut(self.node).and_then(|n| n.model.as_mut()) else {
            trace!("autofit: no model on target yet");
            return false;
        };

        let base = *self.base.get_or_insert(BaseTransform {
            position: model.position,
            scale: model.scale,
        });
        model.position = base.position;
        model.scale = base.scale;

        let initial = model.bounds();
        if initial.is_empty() {
            debug!("autofit: model bounds are empty");
            return false;
        }

        let scale = self.params.uniform_scale(initial.size());
        model.scale *= scale;

        let fitted = model.bounds();
        let center = fitted.center();
        if self.params.center_x {
            model.position.x -= center.x;
        }
        if self.params.center_z {
            model.position.z -= center.z;
        }
        if self.params.align_ground {
            model.position.y -= fitted.min.y;
        }
        model.position.y += self.params.ground_offset;

        debug!("autofit: uniform scale {:.4}", scale);
        scene.emit(self.node, SceneEvent::AutofitComplete);
        true
    }
}

impl Component for ModelAutofit {
    fn name(&self) -> &'static str {
        "model-autofit"
    }

    fn node(&self) -> NodeId {
        self.node
    }

    fn bind(&mut self, scene: &mut Scene) {
        self.fit(scene);
    }

    fn handle_event(&mut self, event: &SceneEvent, scene: &mut Scene) -> EventOutcome {
        if *event == SceneEvent::ModelLoaded {
            self.fit(scene);
        }
        EventOutcome::Ignored
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Aabb;
    use crate::scene::{Model, ModelPart, SceneNode};

    fn scene_with_box(min: [f32; 3], max: [f32; 3]) -> (Scene, NodeId) {
        let mut scene = Scene::new();
        let model = Model::new(vec![ModelPart {
            name: "Body".to_string(),
            bounds: Aabb::new(min.into(), max.into()),
            materials: Vec::new(),
        }]);
        let node = scene.add_node(SceneNode::new("pool").with_model(model));
        (scene, node)
    }

    fn approx(a: Vector3<f32>, b: Vector3<f32>) -> bool {
        (a.x - b.x).abs() < 1e-5 && (a.y - b.y).abs() < 1e-5 && (a.z - b.z).abs() < 1e-5
    }

    #[test]
    fn test_uniform_scale_picks_tightest_axis() {
        let params = ModelAutofitParams {
            width: 10.0,
            depth: 4.0,
            ..Default::default()
        };
        assert_eq!(params.uniform_scale(Vector3::new(5.0, 1.0, 4.0)), 1.0);
        assert_eq!(params.uniform_scale(Vector3::new(20.0, 1.0, 2.0)), 0.5);
        // zero extents are skipped
        assert_eq!(params.uniform_scale(Vector3::new(0.0, 1.0, 0.0)), 1.0);
        assert_eq!(ModelAutofitParams::default().uniform_scale(Vector3::new(3.0, 3.0, 3.0)), 1.0);
    }

    #[test]
    fn test_fit_scales_centers_and_grounds() {
        let (mut scene, node) = scene_with_box([2.0, 1.0, -4.0], [6.0, 3.0, 0.0]);
        let mut autofit = ModelAutofit::new(
            node,
            ModelAutofitParams {
                width: 2.0,
                ..Default::default()
            },
        );
        autofit.bind(&mut scene);

        let model = scene.node(node).unwrap().model.as_ref().unwrap();
        assert!(approx(model.scale, Vector3::new(0.5, 0.5, 0.5)));
        let bounds = model.bounds();
        assert!(approx(bounds.center(), Vector3::new(0.0, 0.5, 0.0)));
        assert!(bounds.min.y.abs() < 1e-5);
        assert!((bounds.size().x - 2.0).abs() < 1e-5);
        assert_eq!(scene.pending_events(), 1);
    }

    #[test]
    fn test_refit_starts_from_base_transform() {
        let (mut scene, node) = scene_with_box([0.0, 0.0, 0.0], [4.0, 4.0, 4.0]);
        let mut autofit = ModelAutofit::new(
            node,
            ModelAutofitParams {
                height: 2.0,
                ground_offset: 0.25,
                ..Default::default()
            },
        );
        autofit.bind(&mut scene);
        autofit.handle_event(&SceneEvent::ModelLoaded, &mut scene);
        autofit.set_params(
            ModelAutofitParams {
                height: 1.0,
                ground_offset: 0.25,
                ..Default::default()
            },
            &mut scene,
        );

        let model = scene.node(node).unwrap().model.as_ref().unwrap();
        assert!(approx(model.scale, Vector3::new(0.25, 0.25, 0.25)));
        assert!((model.bounds().min.y - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_keeps_axes_when_disabled() {
        let (mut scene, node) = scene_with_box([2.0, 1.0, 2.0], [4.0, 3.0, 4.0]);
        let mut autofit = ModelAutofit::new(
            node,
            ModelAutofitParams {
                center_x: false,
                center_z: false,
                align_ground: false,
                ..Default::default()
            },
        );
        assert!(autofit.fit(&mut scene));
        let model = scene.node(node).unwrap().model.as_ref().unwrap();
        assert_eq!(model.position, Vector3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_empty_or_missing_model() {
        let mut scene = Scene::new();
        let bare = scene.add_node(SceneNode::new("bare"));
        let empty = scene.add_node(SceneNode::new("empty").with_model(Model::new(Vec::new())));

        assert!(!ModelAutofit::new(bare, ModelAutofitParams::default()).fit(&mut scene));
        assert!(!ModelAutofit::new(empty, ModelAutofitParams::default()).fit(&mut scene));
        assert_eq!(scene.pending_events(), 0);
    }
}
