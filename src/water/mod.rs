//! Water: wave displacement for surface meshes and the pool overlay

pub mod pool_overlay;
pub mod surface;

pub use pool_overlay::{PoolWaterOverlay, PoolWaterParams};
pub use surface::{SurfaceDisplacement, WaterSurface, WaterSurfaceParams};
