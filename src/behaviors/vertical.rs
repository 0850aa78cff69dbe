//! Keyboard-driven vertical movement between floors

use serde::{Deserialize, Serialize};
use std::any::Any;

use crate::component::Component;
use crate::scene::{EventOutcome, FocusTarget, NodeId, Scene, SceneEvent};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerticalControlsParams {
    pub up_key: String,
    pub down_key: String,
    /// Units per second
    pub speed: f32,
    pub min_y: f32,
    pub max_y: f32,
    pub enabled: bool,
}

impl Default for VerticalControlsParams {
    fn default() -> Self {
        Self {
            up_key: "KeyE".to_string(),
            down_key: "KeyQ".to_string(),
            speed: 4.2,
            min_y: 1.6,
            max_y: 24.0,
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct HeldKeys {
    up: bool,
    down: bool,
}

pub struct VerticalControls {
    node: NodeId,
    params: VerticalControlsParams,
    input: HeldKeys,
}

impl VerticalControls {
    pub fn new(node: NodeId, params: VerticalControlsParams) -> Self {
        Self {
            node,
            params,
            input: HeldKeys::default(),
        }
    }

    pub fn set_params(&mut self, params: VerticalControlsParams) {
        self.params = params;
    }

    /// -1, 0 or 1 depending on held keys
    pub fn direction(&self) -> f32 {
        (self.input.up as i32 - self.input.down as i32) as f32
    }
}

impl Component for VerticalControls {
    fn name(&self) -> &'static str {
        "vertical-controls"
    }

    fn node(&self) -> NodeId {
        self.node
    }

    fn bind(&mut self, _scene: &mut Scene) {
        self.input = HeldKeys::default();
    }

    fn handle_event(&mut self, event: &SceneEvent, _scene: &mut Scene) -> EventOutcome {
        match event {
            SceneEvent::KeyDown(key) => {
                if !self.params.enabled || key.focus == FocusTarget::TextInput {
                    return EventOutcome::Ignored;
                }
                if key.code == self.params.up_key {
                    self.input.up = true;
                    EventOutcome::Consumed
                } else if key.code == self.params.down_key {
                    self.input.down = true;
                    EventOutcome::Consumed
                } else {
                    EventOutcome::Ignored
                }
            }
            SceneEvent::KeyUp(key) => {
                if key.code == self.params.up_key {
                    self.input.up = false;
                } else if key.code == self.params.down_key {
                    self.input.down = false;
                }
                EventOutcome::Ignored
            }
            SceneEvent::WindowBlur => {
                self.input = HeldKeys::default();
                EventOutcome::Ignored
            }
            _ => EventOutcome::Ignored,
        }
    }

    fn tick(&mut self, _time_ms: f64, delta_ms: f64, scene: &mut Scene) {
        if !self.params.enabled || delta_ms == 0.0 {
            return;
        }
        let direction = self.direction();
        if direction == 0.0 {
            return;
        }
        let Some(node) = scene.node_mut(self.node) else {
            return;
        };

        let pos = &mut node.transform.position;
        pos.y += direction * self.params.speed * (delta_ms / 1000.0) as f32;
        pos.y = pos.y.clamp(self.params.min_y, self.params.max_y);
    }

    fn teardown(&mut self, _scene: &mut Scene) {
        self.input = HeldKeys::default();
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
