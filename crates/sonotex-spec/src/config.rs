//! Run configuration.
//!
//! A [`RenderConfig`] is loaded from JSON. Every field except the grid
//! dimensions has a default matching the reference poster
//! look: 1512px canvas, 40px cells, heavy black strokes.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SpecError;
use crate::grid::GridSpec;

/// Complete configuration for one render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// Grid layout.
    #[serde(default)]
    pub grid: GridSpec,
    /// Seed for zigzag jitter.
    #[serde(default)]
    pub seed: u32,
    /// Output canvas.
    #[serde(default)]
    pub canvas: CanvasSpec,
    /// Stroke widths, marker sizes, and line-pattern parameters.
    #[serde(default)]
    pub style: TextureStyle,
    /// Descriptor table to read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<PathBuf>,
}

impl RenderConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self, SpecError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Serialize to a JSON value.
    pub fn to_value(&self) -> Result<serde_json::Value, SpecError> {
        Ok(serde_json::to_value(self)?)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            grid: GridSpec::default(),
            seed: 0,
            canvas: CanvasSpec::default(),
            style: TextureStyle::default(),
            input: None,
        }
    }
}

/// Output canvas size and paint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CanvasSpec {
    /// Width in pixels.
    #[serde(default = "default_canvas_size")]
    pub width: u32,
    /// Height in pixels.
    #[serde(default = "default_canvas_size")]
    pub height: u32,
    /// Background color (RGB, 0-255).
    #[serde(default = "default_background")]
    pub background: [u8; 3],
    /// Ink color for strokes and filled markers (RGB, 0-255).
    #[serde(default = "default_ink")]
    pub ink: [u8; 3],
}

fn default_canvas_size() -> u32 {
    1512
}

fn default_background() -> [u8; 3] {
    [255, 255, 255]
}

fn default_ink() -> [u8; 3] {
    [0, 0, 0]
}

impl Default for CanvasSpec {
    fn default() -> Self {
        Self {
            width: default_canvas_size(),
            height: default_canvas_size(),
            background: default_background(),
            ink: default_ink(),
        }
    }
}

/// Visual parameters of a textured cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TextureStyle {
    /// Stroke width of timbre lines.
    #[serde(default = "default_line_stroke")]
    pub line_stroke_width: f64,
    /// Stroke width of pitch markers.
    #[serde(default = "default_marker_stroke")]
    pub marker_stroke_width: f64,
    /// Stroke width of the cell outline.
    #[serde(default = "default_outline_stroke")]
    pub outline_stroke_width: f64,
    /// Whether circle and triangle markers are filled.
    #[serde(default = "default_true")]
    pub markers_filled: bool,
    /// Marker sizes.
    #[serde(default)]
    pub markers: MarkerSizes,
    /// Zigzag line parameters.
    #[serde(default)]
    pub zigzag: ZigZagParams,
    /// Wiggle line parameters.
    #[serde(default)]
    pub wiggle: WiggleParams,
}

fn default_line_stroke() -> f64 {
    4.0
}

fn default_marker_stroke() -> f64 {
    3.0
}

fn default_outline_stroke() -> f64 {
    4.0
}

fn default_true() -> bool {
    true
}

impl Default for TextureStyle {
    fn default() -> Self {
        Self {
            line_stroke_width: default_line_stroke(),
            marker_stroke_width: default_marker_stroke(),
            outline_stroke_width: default_outline_stroke(),
            markers_filled: true,
            markers: MarkerSizes::default(),
            zigzag: ZigZagParams::default(),
            wiggle: WiggleParams::default(),
        }
    }
}

/// Marker sizes in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarkerSizes {
    /// Side length of the arrow (high pitch).
    #[serde(default = "default_triangle_side")]
    pub arrow: f64,
    /// Radius of the circle (low pitch).
    #[serde(default = "default_circle_radius")]
    pub circle: f64,
    /// Side length of the triangle (no pitch).
    #[serde(default = "default_triangle_side")]
    pub triangle: f64,
}

fn default_triangle_side() -> f64 {
    12.0
}

fn default_circle_radius() -> f64 {
    8.0
}

impl Default for MarkerSizes {
    fn default() -> Self {
        Self {
            arrow: default_triangle_side(),
            circle: default_circle_radius(),
            triangle: default_triangle_side(),
        }
    }
}

/// Parameters for the jittered zigzag line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZigZagParams {
    /// Minimum horizontal offset of a vertex.
    #[serde(default = "default_offset_min")]
    pub offset_min: f64,
    /// Maximum horizontal offset of a vertex.
    #[serde(default = "default_offset_max")]
    pub offset_max: f64,
    /// Number of intermediate vertices between the endpoints.
    #[serde(default = "default_zigzag_density")]
    pub density: u32,
}

fn default_offset_min() -> f64 {
    5.0
}

fn default_offset_max() -> f64 {
    10.0
}

fn default_zigzag_density() -> u32 {
    15
}

impl Default for ZigZagParams {
    fn default() -> Self {
        Self {
            offset_min: default_offset_min(),
            offset_max: default_offset_max(),
            density: default_zigzag_density(),
        }
    }
}

/// Parameters for the smooth wiggle line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WiggleParams {
    /// Target length of one half-wave along the line.
    #[serde(default = "default_wave_length")]
    pub wave_length: f64,
    /// Peak-to-peak height of the control polygon.
    #[serde(default = "default_wave_height")]
    pub amplitude: f64,
    /// How square the bumps are: 0 puts control points mid-wave, 1 above the anchors.
    #[serde(default = "default_curve_squaring")]
    pub curve_squaring: f64,
}

fn default_wave_length() -> f64 {
    36.0
}

fn default_wave_height() -> f64 {
    36.0
}

fn default_curve_squaring() -> f64 {
    0.75
}

impl Default for WiggleParams {
    fn default() -> Self {
        Self {
            wave_length: default_wave_length(),
            amplitude: default_wave_height(),
            curve_squaring: default_curve_squaring(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Point, ShapeKind};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_object_is_default() {
        let config = RenderConfig::from_json("{}").unwrap();
        assert_eq!(config, RenderConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config = RenderConfig::from_json(
            r#"{
                "grid": {"columns": 16, "rows": 12, "radius": 54.0, "shape": "hexagon",
                         "origin": {"x": 65.0, "y": 97.0}},
                "seed": 7,
                "style": {"zigzag": {"density": 9}}
            }"#,
        )
        .unwrap();
        assert_eq!(config.grid.shape, ShapeKind::Hexagon);
        assert_eq!(config.grid.origin, Point::new(65.0, 97.0));
        assert_eq!(config.seed, 7);
        assert_eq!(config.style.zigzag.density, 9);
        assert_eq!(config.style.zigzag.offset_min, 5.0);
        assert_eq!(config.style.wiggle, WiggleParams::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = RenderConfig::from_json(r#"{"colour": "red"}"#).unwrap_err();
        assert!(matches!(err, SpecError::JsonParse(_)));
    }
}
