//! Click-to-toggle group of lights with glowing indicator meshes

use log::debug;
use std::any::Any;

use crate::component::Component;
use crate::scene::{Color, EventOutcome, Material, NodeId, Scene, SceneEvent};

const INDICATOR_COLOR: Color = Color::hex(0xffd187);
const INDICATOR_ROUGHNESS: f32 = 0.4;
const GLOW_ON: (Color, f32) = (Color::hex(0xf5b460), 0.85);
const GLOW_OFF: (Color, f32) = (Color::hex(0x1f1f1f), 0.08);

pub struct ToggleLightGroup {
    node: NodeId,
    targets: Vec<NodeId>,
    indicators: Vec<NodeId>,
    label: Option<NodeId>,
    /// Intensity each target had when bound
    defaults: Vec<f32>,
    is_on: bool,
}

impl ToggleLightGroup {
    pub fn new(node: NodeId, targets: Vec<NodeId>, indicators: Vec<NodeId>, label: Option<NodeId>) -> Self {
        Self {
            node,
            targets,
            indicators,
            label,
            defaults: Vec::new(),
            is_on: true,
        }
    }

    pub fn is_on(&self) -> bool {
        self.is_on
    }

    pub fn toggle(&mut self, scene: &mut Scene) {
        self.is_on = !self.is_on;

        for (target, default) in self.targets.iter().zip(&self.defaults) {
            if let Some(light) = scene.node_mut(*target).and_then(|n| n.light.as_mut()) {
                light.intensity = if self.is_on { *default } else { 0.0 };
            }
        }

        self.refresh(scene);
        debug!("light group {}", if self.is_on { "on" } else { "off" });
    }

    fn refresh(&self, scene: &mut Scene) {
        let (emissive, intensity) = if self.is_on { GLOW_ON } else { GLOW_OFF };
        for indicator in &self.indicators {
            if let Some(node) = scene.node_mut(*indicator) {
                let material = node.material.get_or_insert_with(Material::default);
                material.color = INDICATOR_COLOR;
                material.emissive = Some(emissive);
                material.emissive_intensity = intensity;
                material.roughness = INDICATOR_ROUGHNESS;
                material.needs_update = true;
            }
        }

        if let Some(label) = self.label.and_then(|id| scene.node_mut(id)) {
            let text = if self.is_on { "Dock: On" } else { "Dock: Off" };
            label.text = Some(text.to_string());
        }
    }
}

impl Component for ToggleLightGroup {
    fn name(&self) -> &'static str {
        "toggle-light-group"
    }

    fn node(&self) -> NodeId {
        self.node
    }

    fn bind(&mut self, scene: &mut Scene) {
        self.defaults = self
            .targets
            .iter()
            .map(|id| {
                scene
                    .node(*id)
                    .and_then(|n| n.light.as_ref())
                    .map_or(1.0, |light| light.intensity)
            })
            .collect();
        self.is_on = true;
        self.refresh(scene);
    }

    fn handle_event(&mut self, event: &SceneEvent, scene: &mut Scene) -> EventOutcome {
        if *event != SceneEvent::Click {
            return EventOutcome::Ignored;
        }
        self.toggle(scene);
        EventOutcome::Consumed
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
