//! Back forest: a dense band of billboard trees behind the island plus a
//! line of taller trees along the far shore.

use log::info;
use serde::{Deserialize, Serialize};
use std::any::Any;

use super::planner::{scatter_bounded, scatter_dropping, PlacedItem, Placement};
use super::tree::{draw_card_yaws, spawn_tree, BillboardTree, TreeStyle, Trunk, TREE_TEXTURE_ASPECT};
use crate::component::Component;
use crate::math::{Point2D, RandomStream, Seed};
use crate::scene::{Color, NodeId, Scene};

const NEAR_TINTS: [Color; 4] = [
    Color::hex(0xf8fff3),
    Color::hex(0xeef8e7),
    Color::hex(0xe6f2db),
    Color::hex(0xdeecd1),
];

const FAR_TINTS: [Color; 4] = [
    Color::hex(0xdbe7cd),
    Color::hex(0xd0dfc1),
    Color::hex(0xc7d7ba),
    Color::hex(0xbfd1b2),
];

const TREE_STYLE: TreeStyle = TreeStyle {
    trunk_color: Color::hex(0x634323),
    alpha_test: 0.43,
};

const MIN_BODY_ATTEMPTS: usize = 3000;
/// Skews body depth toward the far edge
const DEPTH_BIAS: f64 = 0.42;
const EDGE_START_DEGREES: f64 = 40.0;
const EDGE_END_DEGREES: f64 = 140.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackForestParams {
    pub tree_count: u32,
    pub edge_count: u32,
    pub island_radius: f64,
    pub min_z: f64,
    pub max_z: f64,
    pub center_clear_width: f64,
    pub center_clear_z: f64,
    pub seed: Seed,
}

impl Default for BackForestParams {
    fn default() -> Self {
        Self {
            tree_count: 240,
            edge_count: 120,
            island_radius: 82.0,
            min_z: 54.0,
            max_z: 82.0,
            center_clear_width: 14.0,
            center_clear_z: 63.0,
            seed: 73,
        }
    }
}

/// Derived sampling bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForestBounds {
    pub max_radius: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl ForestBounds {
    pub fn from_params(params: &BackForestParams) -> Self {
        let max_radius = (params.island_radius - 0.8).max(2.0);
        let max_z = params.max_z.min(max_radius);
        let min_z = params.min_z.min(max_z - 0.5);
        Self { max_radius, min_z, max_z }
    }
}

/// Size and look ranges of one tree population
#[derive(Debug, Clone, Copy)]
struct TreeRange {
    min_height: f64,
    max_height: f64,
    tints: &'static [Color],
    trunk_probability: f64,
}

const BODY_TREES: TreeRange = TreeRange {
    min_height: 5.4,
    max_height: 8.9,
    tints: &NEAR_TINTS,
    trunk_probability: 0.82,
};

const EDGE_TREES: TreeRange = TreeRange {
    min_height: 7.1,
    max_height: 11.3,
    tints: &FAR_TINTS,
    trunk_probability: 0.55,
};

impl TreeRange {
    fn describe(&self, rng: &mut RandomStream, position: Point2D) -> PlacedItem<BillboardTree> {
        let rotation = rng.whole_degrees(360.0);
        let height = rng.range(self.min_height, self.max_height);
        let width = height * TREE_TEXTURE_ASPECT * (0.88 + rng.next_f64() * 0.26);
        let tint = *rng.pick(self.tints);

        let trunk = (rng.next_f64() < self.trunk_probability).then(|| {
            let trunk_height = height * (0.2 + rng.next_f64() * 0.06);
            let radius = 0.14 + rng.next_f64() * 0.11;
            Trunk {
                height: trunk_height,
                radius,
            }
        });

        let card_yaws = draw_card_yaws(rng, 9.0);

        PlacedItem {
            position,
            rotation_y_degrees: rotation,
            variant: BillboardTree {
                height,
                width,
                tint,
                trunk,
                card_yaws,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForestPlan {
    pub bounds: ForestBounds,
    pub body: Placement<BillboardTree>,
    pub edge: Placement<BillboardTree>,
}

impl ForestPlan {
    pub fn tree_count(&self) -> usize {
        self.body.items.len() + self.edge.items.len()
    }

    pub fn trees(&self) -> impl Iterator<Item = &PlacedItem<BillboardTree>> {
        self.body.items.iter().chain(self.edge.items.iter())
    }
}

/// Plan the body band then the shoreline edge from one stream
pub fn plan_forest(params: &BackForestParams) -> ForestPlan {
    let mut rng = RandomStream::new(params.seed);
    let bounds = ForestBounds::from_params(params);
    let max_radius_sq = bounds.max_radius * bounds.max_radius;

    let body = scatter_bounded(
        &mut rng,
        params.tree_count as usize,
        MIN_BODY_ATTEMPTS,
        |rng| {
            let x = (rng.next_f64() * 2.0 - 1.0) * bounds.max_radius;
            let z = bounds.min_z + rng.next_f64().powf(DEPTH_BIAS) * (bounds.max_z - bounds.min_z);
            if x * x + z * z > max_radius_sq {
                return None;
            }
            if x.abs() < params.center_clear_width * 0.5 && z < params.center_clear_z {
                return None;
            }
            Some(Point2D::new(x, z))
        },
        |rng, _, point| BODY_TREES.describe(rng, point),
    );

    let edge_count = params.edge_count as usize;
    let start = EDGE_START_DEGREES.to_radians();
    let end = EDGE_END_DEGREES.to_radians();
    let edge = scatter_dropping(
        &mut rng,
        edge_count,
        |rng, i| {
            let t = if edge_count <= 1 {
                0.5
            } else {
                i as f64 / (edge_count - 1) as f64
            };
            let angle = start + t * (end - start) + (rng.next_f64() * 0.035 - 0.0175);
            let radius = bounds.max_radius - (0.6 + rng.next_f64() * 2.4);
            let point = Point2D::new(angle.cos() * radius, angle.sin() * radius);
            (point.z >= bounds.min_z + 1.0).then_some(point)
        },
        |rng, _, point| EDGE_TREES.describe(rng, point),
    );

    ForestPlan { bounds, body, edge }
}

pub struct BackForest {
    node: NodeId,
    params: BackForestParams,
    last_plan: Option<ForestPlan>,
}

impl BackForest {
    pub fn new(node: NodeId, params: BackForestParams) -> Self {
        Self {
            node,
            params,
            last_plan: None,
        }
    }

    pub fn params(&self) -> &BackForestParams {
        &self.params
    }

    pub fn plan(&self) -> Option<&ForestPlan> {
        self.last_plan.as_ref()
    }

    pub fn set_params(&mut self, params: BackForestParams, scene: &mut Scene) {
        self.params = params;
        self.build(scene);
    }

    fn build(&mut self, scene: &mut Scene) {
        scene.clear_children(self.node);
        if !scene.contains(self.node) {
            return;
        }

        let plan = plan_forest(&self.params);
        for tree in plan.trees() {
            spawn_tree(scene, self.node, tree, &TREE_STYLE);
        }

        info!(
            "back forest (seed {}): {}/{} body trees in {} attempts, {}/{} edge trees",
            self.params.seed,
            plan.body.stats.placed,
            plan.body.stats.requested,
            plan.body.stats.attempts,
            plan.edge.stats.placed,
            plan.edge.stats.requested,
        );
        self.last_plan = Some(plan);
    }
}

impl Component for BackForest {
    fn name(&self) -> &'static str {
        "back-forest"
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
    use crate::scene::SceneNode;

    #[test]
    fn test_default_plan_matches_reference_counts() {
        let plan = plan_forest(&BackForestParams::default());
        assert_eq!(plan.body.stats.placed, 240);
        assert_eq!(plan.body.stats.attempts, 578);
        assert_eq!(plan.edge.stats.placed, 109);
        assert_eq!(plan.tree_count(), 349);
    }

    #[test]
    fn test_bounds_are_clamped() {
        let bounds = ForestBounds::from_params(&BackForestParams::default());
        assert!((bounds.max_radius - 81.2).abs() < 1e-12);
        assert_eq!(bounds.max_z, 81.2);
        assert_eq!(bounds.min_z, 54.0);

        let tiny = ForestBounds::from_params(&BackForestParams {
            island_radius: 1.0,
            ..Default::default()
        });
        assert_eq!(tiny.max_radius, 2.0);
        assert_eq!(tiny.max_z, 2.0);
        assert_eq!(tiny.min_z, 1.5);
    }

    #[test]
    fn test_body_respects_disk_and_clearing() {
        let params = BackForestParams::default();
        let plan = plan_forest(&params);
        let r = plan.bounds.max_radius;
        for tree in &plan.body.items {
            let p = tree.position;
            assert!(p.x * p.x + p.z * p.z <= r * r);
            assert!(!(p.x.abs() < 7.0 && p.z < 63.0));
            assert!(p.z >= plan.bounds.min_z && p.z <= plan.bounds.max_z);
            assert!(tree.variant.height >= 5.4 && tree.variant.height < 8.9);
            assert!(NEAR_TINTS.contains(&tree.variant.tint));
        }
        for tree in &plan.edge.items {
            assert!(tree.position.z >= plan.bounds.min_z + 1.0);
            assert!(tree.variant.height >= 7.1 && tree.variant.height < 11.3);
            assert!(FAR_TINTS.contains(&tree.variant.tint));
        }
    }

    #[test]
    fn test_trunk_probability_is_roughly_honored() {
        let plan = plan_forest(&BackForestParams::default());
        let with_trunk = plan.body.items.iter().filter(|t| t.variant.trunk.is_some()).count();
        let ratio = with_trunk as f64 / plan.body.items.len() as f64;
        assert!(ratio > 0.7 && ratio < 0.94, "ratio {ratio}");
    }

    #[test]
    fn test_single_edge_tree_sits_mid_arc() {
        let plan = plan_forest(&BackForestParams {
            tree_count: 0,
            edge_count: 1,
            ..Default::default()
        });
        assert_eq!(plan.body.stats.attempts, 0);
        // 90 degrees plus jitter puts it straight behind the island
        let tree = &plan.edge.items[0];
        assert!(tree.position.x.abs() < 2.0);
    }

    #[test]
    fn test_component_rebuilds_on_params() {
        let mut scene = Scene::new();
        let node = scene.add_node(SceneNode::new("forest"));
        let mut forest = BackForest::new(node, BackForestParams::default());
        forest.bind(&mut scene);
        assert_eq!(scene.children(node).len(), 349);

        forest.set_params(
            BackForestParams {
                tree_count: 5,
                edge_count: 0,
                ..Default::default()
            },
            &mut scene,
        );
        assert_eq!(scene.children(node).len(), 5);

        forest.teardown(&mut scene);
        assert_eq!(scene.children(node).len(), 0);
    }
}
