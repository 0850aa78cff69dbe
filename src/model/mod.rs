//! Utilities for host-loaded models

pub mod autofit;
pub mod opaque;

pub use autofit::{ModelAutofit, ModelAutofitParams};
pub use opaque::{ForceOpaqueMaterials, ForceOpaqueParams};
