// src/lib.rs
//! isle-fx
//!
//! Deterministic scene behaviors for a small island: seeded vegetation
//! placement, animated water, model fitting, lighting switches and simple
//! motion. The host renderer owns drawing; this crate keeps a data mirror of
//! the scene graph and drives it frame by frame.

pub mod behaviors;
pub mod builders;
pub mod component;
pub mod config;
pub mod error;
pub mod geometry;
pub mod lighting;
pub mod math;
pub mod model;
pub mod prelude;
pub mod scene;
pub mod vegetation;
pub mod water;

pub use component::{Component, ComponentManager};
pub use scene::{NodeId, Scene};
