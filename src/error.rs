//! Error types for parsing and configuration
//!
//! Runtime behaviors never fail: missing nodes and empty buffers are skipped.
//! Errors only come from turning text (colors, scene files) into values.

use std::path::PathBuf;
use thiserror::Error;

/// A color string that is not `#rrggbb` or `#rgb`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("color `{0}` must start with '#'")]
    MissingHash(String),
    #[error("color `{0}` must have 3 or 6 hex digits")]
    BadLength(String),
    #[error("color `{0}` contains a non-hex digit")]
    BadDigit(String),
}

/// Failure to load a scene configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scene config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scene config: {0}")]
    Parse(#[from] toml::de::Error),
}
