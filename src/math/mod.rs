//! Math primitives shared by the placement and fitting code
//!
//! - **rng**: seeded, platform-independent random stream
//! - **sampling**: ring sampling and rectangle containment on the ground plane
//! - **bounds**: axis-aligned bounding boxes

pub mod bounds;
pub mod rng;
pub mod sampling;

pub use bounds::Aabb;
pub use rng::{RandomStream, Seed};
pub use sampling::{point_in_rect, point_in_ring, ExclusionRect, Point2D};
