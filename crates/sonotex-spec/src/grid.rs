//! Grid layout types.

use serde::{Deserialize, Serialize};

/// A point in canvas space (y grows downward).
///
/// Serialized as `{"x": .., "y": ..}`.
pub use kurbo::Point;

/// Cell shape used to tile the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    /// Axis-aligned squares, traversed row-major.
    #[default]
    Square,
    /// Flat-topped hexagons, traversed with alternating column offsets.
    Hexagon,
}

impl ShapeKind {
    /// Get the shape name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Square => "square",
            ShapeKind::Hexagon => "hexagon",
        }
    }

    /// Parse a shape name (case-insensitive).
    pub fn from_name(name: &str) -> Option<ShapeKind> {
        match name.trim().to_ascii_lowercase().as_str() {
            "square" => Some(ShapeKind::Square),
            "hexagon" | "hex" => Some(ShapeKind::Hexagon),
            _ => None,
        }
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grid layout for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridSpec {
    /// Number of columns.
    pub columns: u32,
    /// Number of rows.
    pub rows: u32,
    /// Cell radius (half the cell width for squares, circumradius for hexagons).
    pub radius: f64,
    /// Center of the first (top-left) cell.
    #[serde(default = "default_origin")]
    pub origin: Point,
    /// Cell shape.
    #[serde(default)]
    pub shape: ShapeKind,
}

fn default_origin() -> Point {
    Point::new(65.0, 97.0)
}

impl GridSpec {
    /// Create a grid layout.
    pub fn new(shape: ShapeKind, columns: u32, rows: u32, radius: f64, origin: Point) -> Self {
        Self {
            columns,
            rows,
            radius,
            origin,
            shape,
        }
    }

    /// Total number of cells visited by one traversal.
    pub fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Width of a cell's texture field.
    pub fn cell_width(&self) -> f64 {
        self.radius * 2.0
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::new(ShapeKind::Square, 5, 8, 40.0, default_origin())
    }
}
