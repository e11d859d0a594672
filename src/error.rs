//! Error types for cave generation.

use thiserror::Error;

/// Errors produced by the cave grid and its harness.
///
/// Core grid operations only produce `InvalidConfiguration` and `OutOfBounds`,
/// and always fail before mutating anything.
#[derive(Error, Debug)]
pub enum CaveError {
    /// Bad dimensions, rule thresholds, or generation parameters.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Coordinate outside `[0, width) x [0, height)`.
    #[error("coordinate ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// Config file could not be read.
    #[error("failed to read config: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// Config file is not valid JSON for `CaveParams`.
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Window creation or presentation failed.
    #[error("window error: {0}")]
    Window(String),
}

pub type Result<T> = std::result::Result<T, CaveError>;
