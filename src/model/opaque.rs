//! Force imported model materials back to plain opaque rendering
//!
//! Some exported models come in with transmission or blending enabled on
//! surfaces that should be solid, which causes sorting artifacts.

use serde::{Deserialize, Serialize};
use std::any::Any;

use log::trace;

use crate::component::Component;
use crate::scene::{EventOutcome, Material, NodeId, Scene, SceneEvent};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceOpaqueParams {
    pub transmission: f32,
    pub opacity: f32,
}

impl Default for ForceOpaqueParams {
    fn default() -> Self {
        Self {
            transmission: 0.0,
            opacity: 1.0,
        }
    }
}

impl ForceOpaqueParams {
    pub fn apply_to(&self, material: &mut Material) {
        if let Some(transmission) = material.transmission.as_mut() {
            *transmission = self.transmission;
        }
        material.opacity = self.opacity;
        material.transparent = false;
        material.depth_write = true;
        if let Some(alpha_test) = material.alpha_test.as_mut() {
            *alpha_test = 0.0;
        }
        material.needs_update = true;
    }
}

pub struct ForceOpaqueMaterials {
    node: NodeId,
    params: ForceOpaqueParams,
}

impl ForceOpaqueMaterials {
    pub fn new(node: NodeId, params: ForceOpaqueParams) -> Self {
        Self { node, params }
    }

    pub fn params(&self) -> &ForceOpaqueParams {
        &self.params
    }

    pub fn set_params(&mut self, params: ForceOpaqueParams, scene: &mut Scene) {
        self.params = params;
        self.apply(scene);
    }

    /// Rewrite every material of the node's model; returns how many changed
    pub fn apply(&self, scene: &mut Scene) -> usize {
        let Some(model) = scene.node_mut(self.node).and_then(|n| n.model.as_mut()) else {
            return 0;
        };

        let mut count = 0;
        for material in model.parts.iter_mut().flat_map(|p| p.materials.iter_mut()) {
            self.params.apply_to(material);
            count += 1;
        }
        trace!("forced {} materials opaque", count);
        count
    }
}

impl Component for ForceOpaqueMaterials {
    fn name(&self) -> &'static str {
        "force-opaque-materials"
    }

    fn node(&self) -> NodeId {
        self.node
    }

    fn bind(&mut self, scene: &mut Scene) {
        self.apply(scene);
    }

    fn handle_event(&mut self, event: &SceneEvent, scene: &mut Scene) -> EventOutcome {
        if *event == SceneEvent::ModelLoaded {
            self.apply(scene);
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
    use crate::scene::{Color, Model, ModelPart, SceneNode};

    fn glassy() -> Material {
        let mut material = Material::new(Color::hex(0xaaccee), 0.1, 0.0).with_opacity(0.4);
        material.transmission = Some(0.9);
        material.depth_write = false;
        material
    }

    #[test]
    fn test_apply_resets_blending() {
        let mut scene = Scene::new();
        let mut cutout = glassy().with_alpha_test(0.5);
        cutout.transmission = None;
        let model = Model::new(vec![ModelPart {
            name: "House".to_string(),
            bounds: Aabb::empty(),
            materials: vec![glassy(), cutout],
        }]);
        let node = scene.add_node(SceneNode::new("house").with_model(model));

        let opaque = ForceOpaqueMaterials::new(node, ForceOpaqueParams::default());
        assert_eq!(opaque.apply(&mut scene), 2);

        let materials = &scene.node(node).unwrap().model.as_ref().unwrap().parts[0].materials;
        assert_eq!(materials[0].transmission, Some(0.0));
        assert_eq!(materials[0].opacity, 1.0);
        assert!(!materials[0].transparent);
        assert!(materials[0].depth_write);
        assert!(materials[0].needs_update);
        assert_eq!(materials[0].alpha_test, None);

        assert_eq!(materials[1].transmission, None);
        assert_eq!(materials[1].alpha_test, Some(0.0));
    }

    #[test]
    fn test_custom_values_and_missing_model() {
        let mut scene = Scene::new();
        let bare = scene.add_node(SceneNode::new("bare"));
        let mut opaque = ForceOpaqueMaterials::new(bare, ForceOpaqueParams::default());
        opaque.set_params(
            ForceOpaqueParams {
                transmission: 0.2,
                opacity: 0.9,
            },
            &mut scene,
        );
        assert_eq!(opaque.apply(&mut scene), 0);

        let mut material = glassy();
        opaque.params().apply_to(&mut material);
        assert_eq!(material.transmission, Some(0.2));
        assert_eq!(material.opacity, 0.9);
    }
}
