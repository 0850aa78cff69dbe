//! Builders that generate child geometry from a few parameters

pub mod stairs;

pub use stairs::{layout_flight, StairFlight, StairFlightParams, StairPiece};
