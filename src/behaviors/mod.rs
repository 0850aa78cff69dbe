//! Simple per-frame motion and player constraints

pub mod boundary;
pub mod float_bob;
pub mod orbit;
pub mod vertical;

pub use boundary::{IslandBoundary, IslandBoundaryParams};
pub use float_bob::{Axis, FloatBob, FloatBobParams};
pub use orbit::{OrbitMotion, OrbitParams};
pub use vertical::{VerticalControls, VerticalControlsParams};
