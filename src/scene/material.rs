//! Material description mirrored to the host renderer
//!
//! Behaviors only ever tweak a handful of PBR properties (color, opacity,
//! transparency, emissive) and texture offsets, so the material is plain data
//! with builder-style setters. The host picks up changes via `needs_update`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ColorParseError;

/// 8-bit sRGB color, written as `#rrggbb` in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::hex(0xffffff);

    /// Build from a `0xRRGGBB` literal
    pub const fn hex(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xff) as u8,
            g: ((value >> 8) & 0xff) as u8,
            b: (value & 0xff) as u8,
        }
    }

    /// Parse `#rrggbb` or the `#rgb` shorthand
    pub fn parse(text: &str) -> Result<Self, ColorParseError> {
        let digits = text
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(text.to_string()))?;

        let expanded = match digits.len() {
            6 => digits.to_string(),
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            _ => return Err(ColorParseError::BadLength(text.to_string())),
        };

        if !expanded.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::BadDigit(text.to_string()));
        }
        let value = u32::from_str_radix(&expanded, 16)
            .map_err(|_| ColorParseError::BadDigit(text.to_string()))?;
        Ok(Self::hex(value))
    }

    /// Linear-ish float components in `[0, 1]`
    pub fn to_rgb_f32(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Texture addressing outside `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureWrap {
    #[default]
    Clamp,
    Repeat,
}

/// Which faces a material renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    #[default]
    Front,
    Double,
}

/// Reference to a host-owned texture plus its sampling state
#[derive(Debug, Clone, PartialEq)]
pub struct TextureMap {
    /// Host asset id, e.g. `treeBillboardTex`
    pub source: String,
    pub offset: [f32; 2],
    pub repeat: [f32; 2],
    pub wrap_s: TextureWrap,
    pub wrap_t: TextureWrap,
    pub needs_update: bool,
}

impl TextureMap {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
            offset: [0.0, 0.0],
            repeat: [1.0, 1.0],
            wrap_s: TextureWrap::Clamp,
            wrap_t: TextureWrap::Clamp,
            needs_update: false,
        }
    }

    pub fn with_repeat(mut self, u: f32, v: f32) -> Self {
        self.repeat = [u, v];
        self
    }
}

/// Material definition with PBR properties
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub color: Color,
    pub roughness: f32,
    pub metalness: f32,
    pub opacity: f32,
    pub transparent: bool,
    pub depth_write: bool,
    /// Present only on physical materials that support transmission
    pub transmission: Option<f32>,
    /// Present only on materials that use alpha testing
    pub alpha_test: Option<f32>,
    pub emissive: Option<Color>,
    pub emissive_intensity: f32,
    pub map: Option<TextureMap>,
    pub normal_map: Option<TextureMap>,
    pub side: Side,
    /// Set whenever a behavior changes the material so the host re-uploads it
    pub needs_update: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            roughness: 0.5,
            metalness: 0.0,
            opacity: 1.0,
            transparent: false,
            depth_write: true,
            transmission: None,
            alpha_test: None,
            emissive: None,
            emissive_intensity: 1.0,
            map: None,
            normal_map: None,
            side: Side::Front,
            needs_update: false,
        }
    }
}

impl Material {
    /// Creates a new material with basic PBR properties
    ///
    /// # Arguments
    /// * `color` - Base color
    /// * `roughness` - Surface roughness (0.0 = mirror, 1.0 = rough)
    /// * `metalness` - Metallic factor (0.0 = dielectric, 1.0 = metallic)
    pub fn new(color: Color, roughness: f32, metalness: f32) -> Self {
        Self {
            color,
            roughness: roughness.clamp(0.0, 1.0),
            metalness: metalness.clamp(0.0, 1.0),
            ..Default::default()
        }
    }

    /// Builder pattern: Set opacity and enable blending
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self.transparent = true;
        self
    }

    /// Builder pattern: Set alpha test threshold
    pub fn with_alpha_test(mut self, threshold: f32) -> Self {
        self.alpha_test = Some(threshold);
        self
    }

    /// Builder pattern: Set diffuse texture
    pub fn with_map(mut self, map: TextureMap) -> Self {
        self.map = Some(map);
        self
    }

    /// Builder pattern: Set normal texture
    pub fn with_normal_map(mut self, map: TextureMap) -> Self {
        self.normal_map = Some(map);
        self
    }

    /// Builder pattern: Set emissive color
    pub fn with_emission(mut self, color: Color, intensity: f32) -> Self {
        self.emissive = Some(color);
        self.emissive_intensity = intensity;
        self
    }

    /// Builder pattern: Render both faces
    pub fn double_sided(mut self) -> Self {
        self.side = Side::Double;
        self
    }
}
