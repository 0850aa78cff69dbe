//! Day/night switching for sky, fog, lights and the ocean tint

use log::info;
use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::component::Component;
use crate::scene::{Color, EventOutcome, Fog, Material, NodeId, Scene, SceneEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayNightMode {
    #[default]
    Day,
    Night,
}

impl DayNightMode {
    pub fn flipped(self) -> Self {
        match self {
            DayNightMode::Day => DayNightMode::Night,
            DayNightMode::Night => DayNightMode::Day,
        }
    }
}

impl fmt::Display for DayNightMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayNightMode::Day => write!(f, "Day"),
            DayNightMode::Night => write!(f, "Night"),
        }
    }
}

/// Look of one light in one mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightLook {
    pub color: Color,
    pub ground_color: Option<Color>,
    pub intensity: f32,
}

/// Every value that differs between day and night
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub sky: Color,
    pub sun_visible: bool,
    pub fog: Fog,
    pub sun: LightLook,
    pub ambient: LightLook,
    pub fill: LightLook,
    pub ocean_color: Color,
    pub ocean_opacity: f32,
}

pub const DAY: Palette = Palette {
    sky: Color::hex(0x8ccfff),
    sun_visible: true,
    fog: Fog {
        color: Color::hex(0x9ed3f7),
        density: 0.0038,
    },
    sun: LightLook {
        color: Color::hex(0xfff4d4),
        ground_color: None,
        intensity: 1.12,
    },
    ambient: LightLook {
        color: Color::hex(0xcfe8ff),
        ground_color: None,
        intensity: 0.58,
    },
    fill: LightLook {
        color: Color::hex(0x8cb9ff),
        ground_color: Some(Color::hex(0x6e8d5a)),
        intensity: 0.42,
    },
    ocean_color: Color::hex(0x62bce8),
    ocean_opacity: 0.95,
};

pub const NIGHT: Palette = Palette {
    sky: Color::hex(0x0f1f3b),
    sun_visible: false,
    fog: Fog {
        color: Color::hex(0x111f35),
        density: 0.0055,
    },
    sun: LightLook {
        color: Color::hex(0x8aa8d8),
        ground_color: None,
        intensity: 0.2,
    },
    ambient: LightLook {
        color: Color::hex(0x8ea7cc),
        ground_color: None,
        intensity: 0.26,
    },
    fill: LightLook {
        color: Color::hex(0x5673a2),
        ground_color: Some(Color::hex(0x21301f)),
        intensity: 0.3,
    },
    ocean_color: Color::hex(0x1d4f7a),
    ocean_opacity: 0.9,
};

impl DayNightMode {
    pub fn palette(self) -> &'static Palette {
        match self {
            DayNightMode::Day => &DAY,
            DayNightMode::Night => &NIGHT,
        }
    }
}

/// Nodes restyled on every mode change; any of them may be absent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayNightTargets {
    pub sky: Option<NodeId>,
    pub sun: Option<NodeId>,
    pub sun_visual: Option<NodeId>,
    pub ambient: Option<NodeId>,
    pub fill: Option<NodeId>,
    pub ocean: Option<NodeId>,
}

/// Only touches nodes that already carry a light
fn set_light(scene: &mut Scene, target: Option<NodeId>, look: &LightLook) {
    let Some(light) = target.and_then(|id| scene.node_mut(id)).and_then(|n| n.light.as_mut()) else {
        return;
    };
    light.color = look.color;
    if look.ground_color.is_some() {
        light.ground_color = look.ground_color;
    }
    light.intensity = look.intensity;
}

/// Scene-wide mode switch living on the node that carries the fog
pub struct DayNightCycle {
    node: NodeId,
    targets: DayNightTargets,
    mode: DayNightMode,
}

pub type SharedDayNight = Rc<RefCell<DayNightCycle>>;

impl DayNightCycle {
    pub fn new(node: NodeId, targets: DayNightTargets) -> Self {
        Self {
            node,
            targets,
            mode: DayNightMode::Day,
        }
    }

    pub fn shared(node: NodeId, targets: DayNightTargets) -> SharedDayNight {
        Rc::new(RefCell::new(Self::new(node, targets)))
    }

    pub fn mode(&self) -> DayNightMode {
        self.mode
    }

    pub fn targets(&self) -> &DayNightTargets {
        &self.targets
    }

    pub fn apply_mode(&mut self, mode: DayNightMode, scene: &mut Scene) {
        self.mode = mode;
        let palette = mode.palette();

        if let Some(sky) = self.targets.sky.and_then(|id| scene.node_mut(id)) {
            let material = sky.material.get_or_insert_with(Material::default);
            material.color = palette.sky;
            material.needs_update = true;
        }

        if let Some(sun_visual) = self.targets.sun_visual.and_then(|id| scene.node_mut(id)) {
            sun_visual.visible = palette.sun_visible;
        }

        if let Some(node) = scene.node_mut(self.node) {
            node.fog = Some(palette.fog);
        }

        set_light(scene, self.targets.sun, &palette.sun);
        set_light(scene, self.targets.ambient, &palette.ambient);
        set_light(scene, self.targets.fill, &palette.fill);

        if let Some(material) = self
            .targets
            .ocean
            .and_then(|id| scene.node_mut(id))
            .and_then(|n| n.material.as_mut())
        {
            material.color = palette.ocean_color;
            material.opacity = palette.ocean_opacity;
            material.needs_update = true;
        }

        info!("switched to {} mode", mode);
    }

    pub fn toggle(&mut self, scene: &mut Scene) {
        self.apply_mode(self.mode.flipped(), scene);
    }
}

impl Component for DayNightCycle {
    fn name(&self) -> &'static str {
        "day-night-cycle"
    }

    fn node(&self) -> NodeId {
        self.node
    }

    fn bind(&mut self, scene: &mut Scene) {
        self.apply_mode(DayNightMode::Day, scene);
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Clickable switch for a shared [`DayNightCycle`]
pub struct ToggleDayNight {
    node: NodeId,
    cycle: Option<SharedDayNight>,
    label: Option<NodeId>,
}

impl ToggleDayNight {
    pub fn new(node: NodeId, cycle: Option<SharedDayNight>, label: Option<NodeId>) -> Self {
        Self { node, cycle, label }
    }

    fn refresh_label(&self, scene: &mut Scene) {
        let Some(label) = self.label.and_then(|id| scene.node_mut(id)) else {
            return;
        };
        let mode = self
            .cycle
            .as_ref()
            .map(|c| c.borrow().mode())
            .unwrap_or_default();
        label.text = Some(format!("Mode: {mode}"));
    }
}

impl Component for ToggleDayNight {
    fn name(&self) -> &'static str {
        "toggle-day-night"
    }

    fn node(&self) -> NodeId {
        self.node
    }

    fn bind(&mut self, scene: &mut Scene) {
        self.refresh_label(scene);
    }

    fn handle_event(&mut self, event: &SceneEvent, scene: &mut Scene) -> EventOutcome {
        if *event != SceneEvent::Click {
            return EventOutcome::Ignored;
        }
        let Some(cycle) = self.cycle.as_ref() else {
            return EventOutcome::Ignored;
        };
        cycle.borrow_mut().toggle(scene);
        self.refresh_label(scene);
        EventOutcome::Consumed
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Light, LightKind, SceneNode};

    struct Rig {
        scene: Scene,
        root: NodeId,
        targets: DayNightTargets,
    }

    fn rig() -> Rig {
        let mut scene = Scene::new();
        let root = scene.add_node(SceneNode::new("scene"));
        let sky = scene.add_child(root, SceneNode::new("sky"));
        let sun = scene.add_child(
            root,
            SceneNode::new("sunLight").with_light(Light::new(LightKind::Directional, Color::WHITE, 1.0)),
        );
        let sun_visual = scene.add_child(root, SceneNode::new("sunVisual"));
        let ambient = scene.add_child(
            root,
            SceneNode::new("ambientLight").with_light(Light::new(LightKind::Ambient, Color::WHITE, 1.0)),
        );
        // fill without a light component is skipped
        let fill = scene.add_child(root, SceneNode::new("fillLight"));
        let ocean = scene.add_child(
            root,
            SceneNode::new("ocean").with_material(Material::new(Color::WHITE, 0.2, 0.0)),
        );
        let targets = DayNightTargets {
            sky: Some(sky),
            sun: Some(sun),
            sun_visual: Some(sun_visual),
            ambient: Some(ambient),
            fill: Some(fill),
            ocean: Some(ocean),
        };
        Rig { scene, root, targets }
    }

    #[test]
    fn test_bind_applies_day() {
        let Rig {
            mut scene,
            root,
            targets,
        } = rig();
        let mut cycle = DayNightCycle::new(root, targets);
        cycle.bind(&mut scene);

        assert_eq!(cycle.mode(), DayNightMode::Day);
        assert_eq!(scene.node(root).unwrap().fog, Some(DAY.fog));
        let sun = scene.node(targets.sun.unwrap()).unwrap().light.as_ref().unwrap();
        assert_eq!(sun.color, Color::hex(0xfff4d4));
        assert_eq!(sun.intensity, 1.12);
        assert!(scene.node(targets.sun_visual.unwrap()).unwrap().visible);
        assert!(scene.node(targets.fill.unwrap()).unwrap().light.is_none());
    }

    #[test]
    fn test_toggle_switches_everything() {
        let Rig {
            mut scene,
            root,
            targets,
        } = rig();
        let mut cycle = DayNightCycle::new(root, targets);
        cycle.bind(&mut scene);
        cycle.toggle(&mut scene);

        assert_eq!(cycle.mode(), DayNightMode::Night);
        let sky = scene.node(targets.sky.unwrap()).unwrap();
        assert_eq!(sky.material.as_ref().unwrap().color, Color::hex(0x0f1f3b));
        assert!(!scene.node(targets.sun_visual.unwrap()).unwrap().visible);
        let fog = scene.node(root).unwrap().fog.unwrap();
        assert_eq!(fog.density, 0.0055);
        let ambient = scene.node(targets.ambient.unwrap()).unwrap().light.as_ref().unwrap();
        assert_eq!(ambient.intensity, 0.26);
        let ocean = scene.node(targets.ocean.unwrap()).unwrap().material.as_ref().unwrap();
        assert_eq!(ocean.color, Color::hex(0x1d4f7a));
        assert_eq!(ocean.opacity, 0.9);

        cycle.toggle(&mut scene);
        assert_eq!(cycle.mode(), DayNightMode::Day);
    }

    #[test]
    fn test_fill_gets_ground_color() {
        let mut scene = Scene::new();
        let root = scene.add_node(SceneNode::new("scene"));
        let fill = scene.add_child(
            root,
            SceneNode::new("fill").with_light(Light::new(LightKind::Hemisphere, Color::WHITE, 1.0)),
        );
        let mut cycle = DayNightCycle::new(
            root,
            DayNightTargets {
                fill: Some(fill),
                ..Default::default()
            },
        );
        cycle.apply_mode(DayNightMode::Night, &mut scene);
        let light = scene.node(fill).unwrap().light.as_ref().unwrap();
        assert_eq!(light.ground_color, Some(Color::hex(0x21301f)));
        assert_eq!(light.intensity, 0.3);
    }

    #[test]
    fn test_toggle_button_updates_label() {
        let Rig {
            mut scene,
            root,
            targets,
        } = rig();
        let button = scene.add_child(root, SceneNode::new("modeButton"));
        let label = scene.add_child(root, SceneNode::new("modeLabel"));

        let cycle = DayNightCycle::shared(root, targets);
        cycle.borrow_mut().bind(&mut scene);
        let mut toggle = ToggleDayNight::new(button, Some(cycle.clone()), Some(label));
        toggle.bind(&mut scene);
        assert_eq!(scene.node(label).unwrap().text.as_deref(), Some("Mode: Day"));

        let outcome = toggle.handle_event(&SceneEvent::Click, &mut scene);
        assert!(outcome.is_consumed());
        assert_eq!(cycle.borrow().mode(), DayNightMode::Night);
        assert_eq!(scene.node(label).unwrap().text.as_deref(), Some("Mode: Night"));

        assert_eq!(toggle.handle_event(&SceneEvent::WindowBlur, &mut scene), EventOutcome::Ignored);
    }

    #[test]
    fn test_toggle_without_cycle_shows_day() {
        let mut scene = Scene::new();
        let button = scene.add_node(SceneNode::new("modeButton"));
        let label = scene.add_node(SceneNode::new("modeLabel"));
        let mut toggle = ToggleDayNight::new(button, None, Some(label));
        toggle.bind(&mut scene);
        assert_eq!(toggle.handle_event(&SceneEvent::Click, &mut scene), EventOutcome::Ignored);
        assert_eq!(scene.node(label).unwrap().text.as_deref(), Some("Mode: Day"));
    }
}
