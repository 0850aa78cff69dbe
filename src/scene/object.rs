use cgmath::{Deg, Vector3};

use super::material::{Color, Material};
use crate::geometry::{Primitive, SurfaceMesh};
use crate::math::Aabb;

/// Translation, Euler rotation (degrees) and scale of a node relative to its parent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    /// Euler angles in degrees, applied Y-X-Z like the host does
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    pub fn at(position: Vector3<f32>) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn with_yaw(mut self, yaw: Deg<f32>) -> Self {
        self.rotation.y = yaw.0;
        self
    }

    pub fn with_rotation(mut self, rotation: Vector3<f32>) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vector3::new(scale, scale, scale);
        self
    }
}

/// Shadow participation flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Shadow {
    pub cast: bool,
    pub receive: bool,
}

impl Shadow {
    pub const BOTH: Shadow = Shadow {
        cast: true,
        receive: true,
    };
    pub const RECEIVE: Shadow = Shadow {
        cast: false,
        receive: true,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind {
    Ambient,
    Directional,
    Hemisphere,
    Point,
}

/// Light attached to a node
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub color: Color,
    /// Only meaningful for hemisphere lights
    pub ground_color: Option<Color>,
    pub intensity: f32,
}

impl Light {
    pub fn new(kind: LightKind, color: Color, intensity: f32) -> Self {
        Self {
            kind,
            color,
            ground_color: None,
            intensity,
        }
    }
}

/// Scene-wide exponential fog
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    pub color: Color,
    pub density: f32,
}

/// One named mesh of a loaded model
#[derive(Debug, Clone, PartialEq)]
pub struct ModelPart {
    pub name: String,
    /// Bounds in the model root's frame
    pub bounds: Aabb,
    pub materials: Vec<Material>,
}

/// A host-loaded model: a root transform over named parts
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    /// Root offset inside the owning node
    pub position: Vector3<f32>,
    /// Root scale inside the owning node
    pub scale: Vector3<f32>,
    pub parts: Vec<ModelPart>,
}

impl Model {
    pub fn new(parts: Vec<ModelPart>) -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
            parts,
        }
    }

    /// Bounds of one part in the owning node's frame
    pub fn part_bounds(&self, part: &ModelPart) -> Aabb {
        part.bounds.scaled_and_translated(self.scale, self.position)
    }

    /// Bounds of every part in the owning node's frame
    pub fn bounds(&self) -> Aabb {
        let mut aabb = Aabb::empty();
        for part in &self.parts {
            aabb.union(&self.part_bounds(part));
        }
        aabb
    }
}

/// A node of the scene graph
///
/// Everything optional is `None` until the host or a behavior provides it.
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    pub transform: Transform,
    pub visible: bool,
    pub geometry: Option<Primitive>,
    pub material: Option<Material>,
    pub surface: Option<SurfaceMesh>,
    pub model: Option<Model>,
    /// Host asset id for a model to instantiate, e.g. `flowerModel`
    pub model_source: Option<String>,
    pub light: Option<Light>,
    pub fog: Option<Fog>,
    pub shadow: Shadow,
    /// Text value for label nodes
    pub text: Option<String>,
    pub(crate) parent: Option<super::NodeId>,
    pub(crate) children: Vec<super::NodeId>,
}

impl SceneNode {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            transform: Transform::default(),
            visible: true,
            geometry: None,
            material: None,
            surface: None,
            model: None,
            model_source: None,
            light: None,
            fog: None,
            shadow: Shadow::default(),
            text: None,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.position = Vector3::new(x, y, z);
        self
    }

    pub fn with_geometry(mut self, geometry: Primitive) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }

    pub fn with_surface(mut self, surface: SurfaceMesh) -> Self {
        self.surface = Some(surface);
        self
    }

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = Some(model);
        self
    }

    pub fn with_light(mut self, light: Light) -> Self {
        self.light = Some(light);
        self
    }

    pub fn with_shadow(mut self, shadow: Shadow) -> Self {
        self.shadow = shadow;
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn parent(&self) -> Option<super::NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[super::NodeId] {
        &self.children
    }
}
