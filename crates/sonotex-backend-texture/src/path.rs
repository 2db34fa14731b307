//! Vector paths.
//!
//! A [`Path`] is a kurbo [`BezPath`] plus the stroke width and fill flag it
//! should be painted with. Generators build paths in place; tiling appends
//! transformed copies of one path to another.

use kurbo::{Affine, BezPath, Ellipse, PathEl, Rect, Shape};
use sonotex_spec::Point;

/// Maximum distance between a curve and its line or cubic approximation.
pub const CURVE_TOLERANCE: f64 = 0.01;

/// A flattened subpath.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub points: Vec<Point>,
    pub closed: bool,
}

/// An ordered sequence of path elements with paint attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    bez: BezPath,
    /// Stroke width in canvas units; 0 means no stroke.
    pub stroke_width: f64,
    /// Whether the interior is painted.
    pub filled: bool,
}

impl Path {
    /// Create an empty, unfilled path.
    pub fn new(stroke_width: f64) -> Self {
        Self {
            bez: BezPath::new(),
            stroke_width,
            filled: false,
        }
    }

    /// Set the fill flag.
    pub fn with_fill(mut self, filled: bool) -> Self {
        self.filled = filled;
        self
    }

    pub fn elements(&self) -> &[PathEl] {
        self.bez.elements()
    }

    pub fn is_empty(&self) -> bool {
        self.bez.elements().is_empty()
    }

    /// Number of subpaths (one per `MoveTo`).
    pub fn subpath_count(&self) -> usize {
        self.elements()
            .iter()
            .filter(|el| matches!(el, PathEl::MoveTo(_)))
            .count()
    }

    pub fn move_to(&mut self, p: Point) {
        self.bez.move_to(p);
    }

    pub fn line_to(&mut self, p: Point) {
        self.bez.line_to(p);
    }

    pub fn curve_to(&mut self, control_out: Point, control_in: Point, anchor: Point) {
        self.bez.curve_to(control_out, control_in, anchor);
    }

    pub fn close(&mut self) {
        self.bez.close_path();
    }

    /// Add a polygon through `points`, optionally closed.
    pub fn polygon(&mut self, points: &[Point], close: bool) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.move_to(*first);
        for p in rest {
            self.line_to(*p);
        }
        if close {
            self.close();
        }
    }

    /// Add a closed ellipse with radii `rx`, `ry` around `center`.
    ///
    /// The ellipse starts at its rightmost point and is approximated by
    /// cubics within [`CURVE_TOLERANCE`].
    pub fn oval(&mut self, center: Point, rx: f64, ry: f64) {
        let ellipse = Ellipse::new(center, (rx, ry), 0.0);
        self.bez.extend(
            ellipse
                .path_elements(CURVE_TOLERANCE)
                .filter(|el| !matches!(el, PathEl::ClosePath)),
        );
        self.close();
    }

    /// Append all elements of `other`.
    pub fn append(&mut self, other: &Path) {
        self.bez.extend(other.elements().iter().copied());
    }

    /// Append `other` mapped through `t`.
    pub fn append_transformed(&mut self, other: &Path, t: Affine) {
        self.bez
            .extend(other.elements().iter().map(|el| t * *el));
    }

    /// A copy of this path mapped through `t`.
    pub fn transformed(&self, t: Affine) -> Path {
        let mut out = self.clone();
        out.bez.apply_affine(t);
        out
    }

    /// Flatten into polylines within [`CURVE_TOLERANCE`] of the curves.
    pub fn flatten(&self) -> Vec<Polyline> {
        let mut out = Vec::new();
        let mut current: Vec<Point> = Vec::new();

        self.bez.flatten(CURVE_TOLERANCE, |el| match el {
            PathEl::MoveTo(p) => {
                finish_polyline(&mut current, false, &mut out);
                current.push(p);
            }
            PathEl::LineTo(p) => current.push(p),
            PathEl::ClosePath => finish_polyline(&mut current, true, &mut out),
            // flattening only emits moves, lines, and closes
            PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
        });
        finish_polyline(&mut current, false, &mut out);
        out
    }

    /// Exact axis-aligned bounds of the path's geometry.
    pub fn bounds(&self) -> Option<Rect> {
        if self.is_empty() {
            return None;
        }
        Some(self.bez.bounding_box())
    }
}

fn finish_polyline(current: &mut Vec<Point>, closed: bool, out: &mut Vec<Polyline>) {
    if !current.is_empty() {
        out.push(Polyline {
            points: std::mem::take(current),
            closed,
        });
    }
}
