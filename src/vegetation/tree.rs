//! Billboard trees: an optional trunk plus three crossed textured cards

use cgmath::{Deg, Vector3};

use super::planner::PlacedItem;
use crate::geometry::Primitive;
use crate::math::RandomStream;
use crate::scene::{Color, Material, NodeId, Scene, SceneNode, Shadow, TextureMap, Transform};

/// Width / height of the billboard texture
pub const TREE_TEXTURE_ASPECT: f64 = 315.0 / 350.0;
pub const TREE_TEXTURE: &str = "treeBillboardTex";
const CARD_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trunk {
    pub height: f64,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BillboardTree {
    pub height: f64,
    pub width: f64,
    pub tint: Color,
    pub trunk: Option<Trunk>,
    /// Yaw of each card in degrees, relative to the tree
    pub card_yaws: [f64; CARD_COUNT],
}

/// Per-population look shared by every tree of one planting
#[derive(Debug, Clone, Copy)]
pub struct TreeStyle {
    pub trunk_color: Color,
    pub alpha_test: f32,
}

/// Card yaws: 60° apart with `±jitter/2` of noise, one draw per card
pub(crate) fn draw_card_yaws(rng: &mut RandomStream, jitter: f64) -> [f64; CARD_COUNT] {
    let mut yaws = [0.0; CARD_COUNT];
    for (c, yaw) in yaws.iter_mut().enumerate() {
        *yaw = c as f64 * 60.0 + (rng.next_f64() * jitter - jitter * 0.5);
    }
    yaws
}

/// Add one tree under `parent`
pub fn spawn_tree(scene: &mut Scene, parent: NodeId, item: &PlacedItem<BillboardTree>, style: &TreeStyle) -> NodeId {
    let tree = &item.variant;
    let root = SceneNode::new("tree").with_transform(
        Transform::at(Vector3::new(item.position.x as f32, 0.0, item.position.z as f32))
            .with_yaw(Deg(item.rotation_y_degrees as f32)),
    );
    let root = scene.add_child(parent, root);

    if let Some(trunk) = tree.trunk {
        let node = SceneNode::new("trunk")
            .with_geometry(Primitive::Cylinder {
                radius: trunk.radius as f32,
                height: trunk.height as f32,
                segments_radial: 8,
            })
            .with_material(Material::new(style.trunk_color, 1.0, 0.0))
            .with_position(0.0, (trunk.height * 0.5) as f32, 0.0)
            .with_shadow(Shadow::BOTH);
        scene.add_child(root, node);
    }

    let card_material = Material::new(tree.tint, 1.0, 0.0)
        .with_map(TextureMap::new(TREE_TEXTURE))
        .with_opacity(1.0)
        .with_alpha_test(style.alpha_test)
        .double_sided();

    for yaw in tree.card_yaws {
        let node = SceneNode::new("card")
            .with_geometry(Primitive::Plane {
                width: tree.width as f32,
                height: tree.height as f32,
                segments_width: 1,
                segments_height: 1,
            })
            .with_material(card_material.clone())
            .with_transform(
                Transform::at(Vector3::new(0.0, (tree.height * 0.5) as f32, 0.0)).with_yaw(Deg(yaw as f32)),
            )
            .with_shadow(Shadow::BOTH);
        scene.add_child(root, node);
    }

    root
}
