//! Scene model
//!
//! An arena of nodes that mirrors the host's scene graph. The host owns
//! rendering; behaviors only read and write this data.

pub mod events;
pub mod material;
pub mod object;
#[allow(clippy::module_inception)]
pub mod scene;

pub use events::{EventOutcome, FocusTarget, KeyInput, SceneEvent};
pub use material::{Color, Material, Side, TextureMap, TextureWrap};
pub use object::{Fog, Light, LightKind, Model, ModelPart, SceneNode, Shadow, Transform};
pub use scene::{NodeId, Scene};
