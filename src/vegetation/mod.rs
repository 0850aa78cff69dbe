//! Seeded vegetation planting
//!
//! Planning is pure and reproducible from a seed; the components turn a plan
//! into child nodes and rebuild whenever their parameters change.

pub mod forest;
pub mod island;
pub mod planner;
pub mod tree;

pub use forest::{plan_forest, BackForest, BackForestParams, ForestBounds, ForestPlan};
pub use island::{plan_island, IslandPlan, IslandVegetation, IslandVegetationParams, Plant};
pub use planner::{
    scatter_bounded, scatter_dropping, DeadZone, Limit, PlacedItem, Placement, PlacementStats, RingScatter,
};
pub use tree::{spawn_tree, BillboardTree, TreeStyle, Trunk};
