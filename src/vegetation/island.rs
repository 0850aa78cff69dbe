//! Island vegetation: billboard trees, shrubs, flowers and pebbles scattered
//! over the ring between the clearing and the shoreline.

use cgmath::{Deg, Vector3};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::any::Any;

use super::planner::{DeadZone, Limit, PlacedItem, Placement, RingScatter};
use super::tree::{draw_card_yaws, spawn_tree, BillboardTree, TreeStyle, Trunk, TREE_TEXTURE_ASPECT};
use crate::component::Component;
use crate::geometry::Primitive;
use crate::math::{ExclusionRect, Point2D, RandomStream, Seed};
use crate::scene::{Color, Material, NodeId, Scene, SceneNode, Shadow, Transform};

/// Areas kept clear of vegetation: the pool and the house/lawn strip
pub const NO_VEGETATION_RECTS: [ExclusionRect; 2] = [
    ExclusionRect::new(11.0, 25.0, -20.0, -7.0),
    ExclusionRect::new(-40.0, 40.0, 2.0, 78.0),
];

const TREE_DEAD_ZONES: [DeadZone; 2] = [
    DeadZone::new(Limit::Below(-10.0), Limit::Below(-6.0)),
    DeadZone::new(Limit::Above(6.0), Limit::Above(11.0)),
];

const PLANT_DEAD_ZONES: [DeadZone; 1] = [DeadZone::new(Limit::Below(-11.0), Limit::Below(-5.5))];

const TREE_TINTS: [Color; 4] = [
    Color::hex(0xffffff),
    Color::hex(0xf5f9ef),
    Color::hex(0xedf5e4),
    Color::hex(0xf8fff3),
];

const PLANT_PALETTE: [Color; 3] = [Color::hex(0x5f9c4d), Color::hex(0x4f7c40), Color::hex(0x669f58)];

const TREE_STYLE: TreeStyle = TreeStyle {
    trunk_color: Color::hex(0x674827),
    alpha_test: 0.45,
};

const ROCK_COLOR: Color = Color::hex(0x7f7f7f);
pub const FLOWER_MODEL: &str = "flowerModel";

/// Every 7th plant slot is a flower; every 9th shrub slot gets a pebble
const FLOWER_EVERY: usize = 7;
const ROCK_EVERY: usize = 9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IslandVegetationParams {
    pub tree_count: u32,
    pub plant_count: u32,
    pub island_radius: f64,
    pub inner_clear_radius: f64,
    pub seed: Seed,
}

impl Default for IslandVegetationParams {
    fn default() -> Self {
        Self {
            tree_count: 40,
            plant_count: 70,
            island_radius: 33.0,
            inner_clear_radius: 10.0,
            seed: 11,
        }
    }
}

/// One cone of a shrub
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    pub radius_bottom: f64,
    pub radius_top: f64,
    pub height: f64,
    pub color: Color,
    pub offset: [f64; 3],
    pub yaw: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rock {
    pub size: f64,
    pub offset: [f64; 3],
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shrub {
    pub leaves: [Leaf; 2],
    pub rock: Option<Rock>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Plant {
    Flower { scale: f64 },
    Shrub(Shrub),
}

/// Result of one planning run; trees are drawn first from the shared stream
#[derive(Debug, Clone, PartialEq)]
pub struct IslandPlan {
    pub trees: Placement<BillboardTree>,
    pub plants: Placement<Plant>,
}

impl IslandPlan {
    pub fn flower_count(&self) -> usize {
        self.plants
            .items
            .iter()
            .filter(|p| matches!(p.variant, Plant::Flower { .. }))
            .count()
    }

    pub fn rock_count(&self) -> usize {
        self.plants
            .items
            .iter()
            .filter(|p| matches!(&p.variant, Plant::Shrub(s) if s.rock.is_some()))
            .count()
    }
}

fn describe_tree(rng: &mut RandomStream, _index: usize, position: Point2D) -> PlacedItem<BillboardTree> {
    let rotation = rng.whole_degrees(360.0);
    let height = 4.8 + rng.next_f64() * 3.2;
    let width = height * TREE_TEXTURE_ASPECT * (0.9 + rng.next_f64() * 0.2);
    let trunk_height = height * (0.22 + rng.next_f64() * 0.05);
    let trunk_radius = 0.14 + rng.next_f64() * 0.08;
    let tint = *rng.pick(&TREE_TINTS);
    let card_yaws = draw_card_yaws(rng, 8.0);

    PlacedItem {
        position,
        rotation_y_degrees: rotation,
        variant: BillboardTree {
            height,
            width,
            tint,
            trunk: Some(Trunk {
                height: trunk_height,
                radius: trunk_radius,
            }),
            card_yaws,
        },
    }
}

fn describe_plant(rng: &mut RandomStream, index: usize, position: Point2D) -> PlacedItem<Plant> {
    let rotation = rng.whole_degrees(360.0);

    if index % FLOWER_EVERY == 0 {
        let scale = 0.55 + rng.next_f64() * 0.4;
        return PlacedItem {
            position,
            rotation_y_degrees: rotation,
            variant: Plant::Flower { scale },
        };
    }

    let leaf_a = {
        let radius_bottom = 0.18 + rng.next_f64() * 0.1;
        let height = 0.5 + rng.next_f64() * 0.3;
        let color = *rng.pick(&PLANT_PALETTE);
        let y = 0.25 + rng.next_f64() * 0.08;
        Leaf {
            radius_bottom,
            radius_top: 0.02,
            height,
            color,
            offset: [0.0, y, 0.0],
            yaw: 0.0,
        }
    };

    let leaf_b = {
        let radius_bottom = 0.14 + rng.next_f64() * 0.08;
        let height = 0.42 + rng.next_f64() * 0.24;
        let color = *rng.pick(&PLANT_PALETTE);
        let x = rng.next_f64() * 0.16 - 0.08;
        let y = 0.2 + rng.next_f64() * 0.08;
        let z = rng.next_f64() * 0.16 - 0.08;
        let yaw = rng.whole_degrees(180.0);
        Leaf {
            radius_bottom,
            radius_top: 0.01,
            height,
            color,
            offset: [x, y, z],
            yaw,
        }
    };

    let rock = (index % ROCK_EVERY == 0).then(|| {
        let size = 0.1 + rng.next_f64() * 0.12;
        let x = rng.next_f64() * 0.28 - 0.14;
        let z = rng.next_f64() * 0.28 - 0.14;
        Rock {
            size,
            offset: [x, size * 0.6, z],
        }
    });

    PlacedItem {
        position,
        rotation_y_degrees: rotation,
        variant: Plant::Shrub(Shrub {
            leaves: [leaf_a, leaf_b],
            rock,
        }),
    }
}

/// Plan the whole island from a fresh stream
pub fn plan_island(params: &IslandVegetationParams) -> IslandPlan {
    let mut rng = RandomStream::new(params.seed);

    let trees = RingScatter {
        count: params.tree_count as usize,
        inner_radius: params.inner_clear_radius + 3.0,
        outer_radius: params.island_radius - 1.6,
        exclusions: &NO_VEGETATION_RECTS,
        dead_zones: &TREE_DEAD_ZONES,
    }
    .run(&mut rng, describe_tree);

    let plants = RingScatter {
        count: params.plant_count as usize,
        inner_radius: params.inner_clear_radius + 1.5,
        outer_radius: params.island_radius - 0.7,
        exclusions: &NO_VEGETATION_RECTS,
        dead_zones: &PLANT_DEAD_ZONES,
    }
    .run(&mut rng, describe_plant);

    IslandPlan { trees, plants }
}

fn vec3(v: [f64; 3]) -> Vector3<f32> {
    Vector3::new(v[0] as f32, v[1] as f32, v[2] as f32)
}

fn spawn_plant(scene: &mut Scene, parent: NodeId, item: &PlacedItem<Plant>) {
    let transform = Transform::at(Vector3::new(item.position.x as f32, 0.0, item.position.z as f32))
        .with_yaw(Deg(item.rotation_y_degrees as f32));

    let shrub = match &item.variant {
        Plant::Flower { scale } => {
            let mut flower = SceneNode::new("flower").with_transform(transform.with_uniform_scale(*scale as f32));
            flower.model_source = Some(FLOWER_MODEL.to_string());
            scene.add_child(parent, flower);
            return;
        }
        Plant::Shrub(shrub) => shrub,
    };

    let root = scene.add_child(parent, SceneNode::new("shrub").with_transform(transform));

    for leaf in &shrub.leaves {
        let node = SceneNode::new("leaf")
            .with_geometry(Primitive::Cone {
                radius_bottom: leaf.radius_bottom as f32,
                radius_top: leaf.radius_top as f32,
                height: leaf.height as f32,
                segments_radial: 6,
            })
            .with_material(Material::new(leaf.color, 1.0, 0.0))
            .with_transform(Transform::at(vec3(leaf.offset)).with_yaw(Deg(leaf.yaw as f32)))
            .with_shadow(Shadow::BOTH);
        scene.add_child(root, node);
    }

    if let Some(rock) = &shrub.rock {
        let node = SceneNode::new("rock")
            .with_geometry(Primitive::Dodecahedron {
                radius: rock.size as f32,
            })
            .with_material(Material::new(ROCK_COLOR, 1.0, 0.0))
            .with_transform(Transform::at(vec3(rock.offset)))
            .with_shadow(Shadow::BOTH);
        scene.add_child(root, node);
    }
}

/// Deterministic island planting under the component's node
pub struct IslandVegetation {
    node: NodeId,
    params: IslandVegetationParams,
    last_plan: Option<IslandPlan>,
}

impl IslandVegetation {
    pub fn new(node: NodeId, params: IslandVegetationParams) -> Self {
        Self {
            node,
            params,
            last_plan: None,
        }
    }

    pub fn params(&self) -> &IslandVegetationParams {
        &self.params
    }

    /// Plan behind the current children, if built
    pub fn plan(&self) -> Option<&IslandPlan> {
        self.last_plan.as_ref()
    }

    /// Replace parameters and regenerate everything
    pub fn set_params(&mut self, params: IslandVegetationParams, scene: &mut Scene) {
        self.params = params;
        self.build(scene);
    }

    fn build(&mut self, scene: &mut Scene) {
        scene.clear_children(self.node);
        if !scene.contains(self.node) {
            debug!("island vegetation target missing, skipping build");
            return;
        }

        let plan = plan_island(&self.params);
        for tree in &plan.trees.items {
            spawn_tree(scene, self.node, tree, &TREE_STYLE);
        }
        for plant in &plan.plants.items {
            spawn_plant(scene, self.node, plant);
        }

        info!(
            "island vegetation (seed {}): {}/{} trees, {}/{} plants ({} flowers, {} rocks)",
            self.params.seed,
            plan.trees.stats.placed,
            plan.trees.stats.requested,
            plan.plants.stats.placed,
            plan.plants.stats.requested,
            plan.flower_count(),
            plan.rock_count(),
        );
        self.last_plan = Some(plan);
    }
}

impl Component for IslandVegetation {
    fn name(&self) -> &'static str {
        "island-vegetation"
    }

    fn node(&self) -> NodeId {
        self.node
    }

    fn bind(&mut self, scene: &mut Scene) {
        self.build(scene);
    }

    fn teardown(&mut self, scene: &mut Scene) {
        scene.clear_children(self.node);
        self.last_plan = None;
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::point_in_rect;

    #[test]
    fn test_default_plan_matches_reference_counts() {
        let plan = plan_island(&IslandVegetationParams::default());
        assert_eq!(plan.trees.stats.placed, 16);
        assert_eq!(plan.flower_count(), 2);
        assert_eq!(plan.plants.stats.placed - plan.flower_count(), 16);
        assert_eq!(plan.rock_count(), 4);
    }

    #[test]
    fn test_plan_is_reproducible() {
        let params = IslandVegetationParams::default();
        assert_eq!(plan_island(&params), plan_island(&params));

        let other = plan_island(&IslandVegetationParams {
            seed: 12,
            ..Default::default()
        });
        assert_ne!(other, plan_island(&params));
    }

    #[test]
    fn test_placements_respect_exclusions() {
        let plan = plan_island(&IslandVegetationParams {
            tree_count: 400,
            plant_count: 400,
            ..Default::default()
        });

        for tree in &plan.trees.items {
            let p = tree.position;
            assert!(!NO_VEGETATION_RECTS.iter().any(|r| point_in_rect(p, r)));
            assert!(!(p.x < -10.0 && p.z < -6.0));
            assert!(!(p.x > 6.0 && p.z > 11.0));
            let d = p.length();
            assert!(d >= 13.0 - 1e-9 && d <= 31.4 + 1e-9);
        }
        for plant in &plan.plants.items {
            let p = plant.position;
            assert!(!NO_VEGETATION_RECTS.iter().any(|r| point_in_rect(p, r)));
            assert!(!(p.x < -11.0 && p.z < -5.5));
        }
    }

    #[test]
    fn test_tree_variant_ranges() {
        let plan = plan_island(&IslandVegetationParams {
            tree_count: 200,
            ..Default::default()
        });
        for tree in &plan.trees.items {
            let t = &tree.variant;
            assert!(t.height >= 4.8 && t.height < 8.0);
            let trunk = t.trunk.unwrap();
            assert!(trunk.height >= t.height * 0.22 && trunk.height < t.height * 0.27);
            assert!(TREE_TINTS.contains(&t.tint));
            assert_eq!(tree.rotation_y_degrees.fract(), 0.0);
        }
    }

    #[test]
    fn test_shrub_variant_ranges() {
        let plan = plan_island(&IslandVegetationParams {
            tree_count: 0,
            plant_count: 300,
            ..Default::default()
        });
        for item in &plan.plants.items {
            match &item.variant {
                Plant::Flower { scale } => assert!(*scale >= 0.55 && *scale < 0.95),
                Plant::Shrub(shrub) => {
                    let [a, b] = &shrub.leaves;
                    assert!(a.radius_bottom >= 0.18 && a.radius_bottom < 0.28);
                    assert!(b.offset[0] >= -0.08 && b.offset[0] < 0.08);
                    assert!(b.yaw < 180.0 && b.yaw.fract() == 0.0);
                    assert!(PLANT_PALETTE.contains(&a.color));
                    if let Some(rock) = &shrub.rock {
                        assert!((rock.offset[1] - rock.size * 0.6).abs() < 1e-12);
                    }
                }
            }
        }
    }

    #[test]
    fn test_component_builds_and_rebuilds() {
        let mut scene = Scene::new();
        let node = scene.add_node(SceneNode::new("vegetation"));
        let mut vegetation = IslandVegetation::new(node, IslandVegetationParams::default());
        vegetation.bind(&mut scene);

        // 16 trees + 2 flowers + 16 shrubs at top level
        assert_eq!(scene.children(node).len(), 34);
        // each tree: trunk + 3 cards; each shrub: 2 leaves (+ rock)
        assert_eq!(scene.descendant_count(node), 34 + 16 * 4 + 16 * 2 + 4);

        vegetation.set_params(
            IslandVegetationParams {
                tree_count: 0,
                plant_count: 0,
                ..Default::default()
            },
            &mut scene,
        );
        assert_eq!(scene.descendant_count(node), 0);

        vegetation.teardown(&mut scene);
        assert!(vegetation.plan().is_none());
    }
}
