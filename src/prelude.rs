//! # isle-fx Prelude
//!
//! Commonly used types and traits in one import.
//!
//! ```rust
//! use isle_fx::prelude::*;
//!
//! let mut scene = Scene::new();
//! let island = scene.add_node(SceneNode::new("island"));
//!
//! let mut manager = ComponentManager::new();
//! manager.attach(IslandVegetation::new(island, IslandVegetationParams::default()), &mut scene);
//! manager.tick(16.0, &mut scene);
//! assert!(scene.descendant_count(island) > 0);
//! ```

// Scene model
pub use crate::scene::{
    Color, EventOutcome, KeyInput, Light, LightKind, Material, Model, ModelPart, NodeId, Scene, SceneEvent, SceneNode,
    Shadow, Transform,
};

// Component framework
pub use crate::component::{Component, ComponentHandle, ComponentManager};

// Math
pub use crate::math::{Aabb, ExclusionRect, Point2D, RandomStream, Seed};

// Behaviors
pub use crate::behaviors::{FloatBob, FloatBobParams, IslandBoundary, OrbitMotion, VerticalControls};
pub use crate::builders::{StairFlight, StairFlightParams};
pub use crate::lighting::{DayNightCycle, DayNightMode, DayNightTargets, ToggleDayNight, ToggleLightGroup};
pub use crate::model::{ForceOpaqueMaterials, ModelAutofit};
pub use crate::vegetation::{BackForest, BackForestParams, IslandVegetation, IslandVegetationParams};
pub use crate::water::{PoolWaterOverlay, WaterSurface, WaterSurfaceParams};

// Configuration
pub use crate::config::SceneConfig;

// Common external types
pub use cgmath::Vector3;
