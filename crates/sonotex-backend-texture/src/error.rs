//! Texture engine errors.

use thiserror::Error;

/// Errors raised while generating or composing cell textures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TextureError {
    /// A line was requested with a non-positive or non-finite length.
    #[error("line length must be positive, got {0}")]
    InvalidLength(f64),

    /// Zigzag offset bounds are negative, non-finite, or inverted.
    #[error("zigzag offsets must satisfy 0 <= min <= max, got {min}..={max}")]
    InvalidZigZagOffsets { min: f64, max: f64 },

    /// Zigzag density of zero.
    #[error("zigzag density must be at least 1")]
    ZeroZigZagDensity,

    /// Wiggle parameters out of range.
    #[error("invalid wiggle parameters: {0}")]
    InvalidWiggle(String),

    /// A marker was requested with a non-positive size.
    #[error("marker size must be positive, got {0}")]
    InvalidMarkerSize(f64),

    /// Cell width or radius is not positive.
    #[error("cell width must be positive, got {0}")]
    InvalidCellWidth(f64),

    /// Grid configuration was rejected before drawing.
    #[error("invalid grid: {0}")]
    InvalidGrid(String),
}
