//! Scene configuration (TOML)
//!
//! Every section is optional; missing sections and missing keys fall back to
//! the documented defaults of each component.
//!
//! ```toml
//! [island]
//! seed = 7
//! tree_count = 60
//!
//! [ocean]
//! amplitude = 0.3
//!
//! [preview]
//! frames = 120
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::behaviors::{FloatBobParams, IslandBoundaryParams, OrbitParams, VerticalControlsParams};
use crate::builders::StairFlightParams;
use crate::error::ConfigError;
use crate::model::{ForceOpaqueParams, ModelAutofitParams};
use crate::vegetation::{BackForestParams, IslandVegetationParams};
use crate::water::{PoolWaterParams, WaterSurfaceParams};

/// Parameters for every component of the island scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SceneConfig {
    #[serde(default)]
    pub island: IslandVegetationParams,
    #[serde(default)]
    pub forest: BackForestParams,
    /// Open ocean around the island
    #[serde(default)]
    pub ocean: WaterSurfaceParams,
    #[serde(default)]
    pub pool: PoolWaterParams,
    #[serde(default)]
    pub pool_fit: ModelAutofitParams,
    #[serde(default)]
    pub house_materials: ForceOpaqueParams,
    #[serde(default)]
    pub stairs: StairFlightParams,
    /// Bobbing applied to the boat
    #[serde(default)]
    pub boat: FloatBobParams,
    /// Seagull flight path
    #[serde(default)]
    pub gull: OrbitParams,
    #[serde(default)]
    pub boundary: IslandBoundaryParams,
    #[serde(default)]
    pub vertical: VerticalControlsParams,
    #[serde(default)]
    pub preview: PreviewConfig,
}

/// Headless preview run settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Number of frames to simulate (default: 600)
    #[serde(default = "default_frames")]
    pub frames: u32,
    /// Frame length in milliseconds (default: 16.667)
    #[serde(default = "default_frame_ms")]
    pub frame_ms: f64,
    /// Frame on which the day/night toggle is clicked, if any (default: half way)
    #[serde(default)]
    pub toggle_at: Option<u32>,
}

fn default_frames() -> u32 {
    600
}
fn default_frame_ms() -> f64 {
    1000.0 / 60.0
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            frames: default_frames(),
            frame_ms: default_frame_ms(),
            toggle_at: None,
        }
    }
}

/// Parse a scene configuration from TOML text
pub fn from_toml_str(content: &str) -> Result<SceneConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Load a scene configuration file
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file cannot be read and
/// [`ConfigError::Parse`] if it is not a valid scene description.
pub fn load(path: impl AsRef<Path>) -> Result<SceneConfig, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_toml_str(&content)
}

/// Render a configuration back to TOML
pub fn to_toml_string(config: &SceneConfig) -> Result<String, toml::ser::Error> {
    toml::to_string_pretty(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behaviors::Axis;
    use crate::scene::Color;

    // =============================================================
    // Default value tests
    // =============================================================

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = from_toml_str("").unwrap();
        assert_eq!(config, SceneConfig::default());
        assert_eq!(config.island.seed, 11);
        assert_eq!(config.forest.seed, 73);
        assert_eq!(config.preview.frames, 600);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = from_toml_str(
            r##"
            [island]
            seed = 7
            tree_count = 60

            [pool]
            color = "#336699"

            [boat]
            axis = "x"
            "##,
        )
        .unwrap();

        assert_eq!(config.island.seed, 7);
        assert_eq!(config.island.tree_count, 60);
        assert_eq!(config.island.plant_count, 70);
        assert_eq!(config.island.island_radius, 33.0);
        assert_eq!(config.pool.color, Color::hex(0x336699));
        assert_eq!(config.pool.opacity, 0.8);
        assert_eq!(config.boat.axis, Axis::X);
        assert_eq!(config.boat.amplitude, 0.08);
    }

    #[test]
    fn test_unknown_axis_falls_back_to_y() {
        let config = from_toml_str("[boat]\naxis = \"w\"\n").unwrap();
        assert_eq!(config.boat.axis, Axis::Y);
    }

    #[test]
    fn test_optional_seed() {
        let config = from_toml_str("[gull]\nseed = 5\n").unwrap();
        assert_eq!(config.gull.seed, Some(5));
        assert_eq!(SceneConfig::default().gull.seed, None);
    }

    // =============================================================
    // Error tests
    // =============================================================

    #[test]
    fn test_bad_color_is_a_parse_error() {
        let err = from_toml_str("[stairs]\ncolor = \"d8d5ce\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("must start with '#'"));
    }

    #[test]
    fn test_wrong_type_is_a_parse_error() {
        let err = from_toml_str("[forest]\ntree_count = \"many\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load("/definitely/not/here/scene.toml").unwrap_err();
        match err {
            ConfigError::Io { path, .. } => assert!(path.ends_with("scene.toml")),
            other => panic!("expected io error, got {other:?}"),
        }
    }

    // =============================================================
    // Serialization tests
    // =============================================================

    #[test]
    fn test_serialized_config_reloads() {
        let mut config = SceneConfig::default();
        config.forest.edge_count = 12;
        config.vertical.up_key = "Space".to_string();
        config.preview.toggle_at = Some(30);

        let text = to_toml_string(&config).unwrap();
        assert!(text.contains("[forest]"));
        assert_eq!(from_toml_str(&text).unwrap(), config);
    }
}
