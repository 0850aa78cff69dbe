//! Lighting switches driven by clicks

pub mod day_night;
pub mod light_group;

pub use day_night::{DayNightCycle, DayNightMode, DayNightTargets, SharedDayNight, ToggleDayNight};
pub use light_group::ToggleLightGroup;
