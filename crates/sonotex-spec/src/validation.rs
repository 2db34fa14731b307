//! Configuration validation.
//!
//! Malformed geometry must be caught before any drawing begins, so every
//! check here runs up front and collects all problems rather than stopping
//! at the first.

use crate::config::{CanvasSpec, RenderConfig, TextureStyle};
use crate::error::{ErrorCode, ValidationError, ValidationResult};
use crate::grid::GridSpec;

/// Largest accepted canvas side, in pixels.
pub const MAX_CANVAS_SIZE: u32 = 16384;

/// Validate a grid layout.
pub fn validate_grid(grid: &GridSpec) -> ValidationResult {
    let mut result = ValidationResult::success();

    if grid.columns == 0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidColumns,
            "grid must have at least one column",
            "grid.columns",
        ));
    }
    if grid.rows == 0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidRows,
            "grid must have at least one row",
            "grid.rows",
        ));
    }
    if !(grid.radius.is_finite() && grid.radius > 0.0) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidRadius,
            format!("cell radius must be positive, got {}", grid.radius),
            "grid.radius",
        ));
    }
    if !grid.origin.is_finite() {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidOrigin,
            "grid origin must be finite",
            "grid.origin",
        ));
    }

    result
}

/// Validate canvas dimensions.
pub fn validate_canvas(canvas: &CanvasSpec) -> ValidationResult {
    let mut result = ValidationResult::success();
    if canvas.width == 0 || canvas.height == 0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidCanvasSize,
            format!("canvas must be non-empty, got {}x{}", canvas.width, canvas.height),
            "canvas",
        ));
    }
    if canvas.width > MAX_CANVAS_SIZE || canvas.height > MAX_CANVAS_SIZE {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidCanvasSize,
            format!(
                "canvas sides must be at most {}, got {}x{}",
                MAX_CANVAS_SIZE, canvas.width, canvas.height
            ),
            "canvas",
        ));
    }
    result
}

/// Validate stroke widths, marker sizes, and line-pattern parameters.
pub fn validate_style(style: &TextureStyle) -> ValidationResult {
    let mut result = ValidationResult::success();

    for (path, width) in [
        ("style.line_stroke_width", style.line_stroke_width),
        ("style.marker_stroke_width", style.marker_stroke_width),
        ("style.outline_stroke_width", style.outline_stroke_width),
    ] {
        if !(width.is_finite() && width >= 0.0) {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidStrokeWidth,
                format!("stroke width must be >= 0, got {}", width),
                path,
            ));
        }
    }

    for (path, size) in [
        ("style.markers.arrow", style.markers.arrow),
        ("style.markers.circle", style.markers.circle),
        ("style.markers.triangle", style.markers.triangle),
    ] {
        if !(size.is_finite() && size > 0.0) {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidMarkerSize,
                format!("marker size must be positive, got {}", size),
                path,
            ));
        }
    }

    let zigzag = &style.zigzag;
    if !(zigzag.offset_min >= 0.0 && zigzag.offset_min <= zigzag.offset_max && zigzag.offset_max.is_finite()) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidZigZagOffsets,
            format!(
                "zigzag offsets must satisfy 0 <= min <= max, got {}..={}",
                zigzag.offset_min, zigzag.offset_max
            ),
            "style.zigzag",
        ));
    }
    if zigzag.density == 0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidZigZagDensity,
            "zigzag density must be at least 1",
            "style.zigzag.density",
        ));
    }

    let wiggle = &style.wiggle;
    if !(wiggle.wave_length.is_finite() && wiggle.wave_length > 0.0) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidWiggle,
            format!("wiggle wave length must be positive, got {}", wiggle.wave_length),
            "style.wiggle.wave_length",
        ));
    }
    if !(wiggle.amplitude.is_finite() && wiggle.amplitude >= 0.0) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidWiggle,
            format!("wiggle amplitude must be >= 0, got {}", wiggle.amplitude),
            "style.wiggle.amplitude",
        ));
    }
    if !(0.0..=1.0).contains(&wiggle.curve_squaring) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidCurveSquaring,
            format!("curve squaring must be in [0, 1], got {}", wiggle.curve_squaring),
            "style.wiggle.curve_squaring",
        ));
    }

    result
}

/// Validate a complete configuration.
pub fn validate_config(config: &RenderConfig) -> ValidationResult {
    let mut result = validate_grid(&config.grid);
    result.merge(validate_canvas(&config.canvas));
    result.merge(validate_style(&config.style));
    result
}
