//! Component system
//!
//! Framework for per-node behaviors driven by the host's frame loop.

pub mod manager;
pub mod traits;

pub use manager::{ComponentHandle, ComponentManager};
pub use traits::Component;
