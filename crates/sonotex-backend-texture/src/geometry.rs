//! Cell geometry: polygons and point tests.
//!
//! Canvas space is y-down. "Counter-clockwise" here means a positive
//! signed area as kurbo's [`Shape::area`] reports it, which is the
//! mathematical orientation regardless of which way the y axis points on
//! screen.

use kurbo::{BezPath, Line, ParamCurveNearest, Shape};
use sonotex_spec::{Point, ShapeKind};

use crate::path::Path;

/// Tolerance used by geometric comparisons.
pub const EPSILON: f64 = 1e-9;

/// Distance within which a point counts as lying on a polygon edge.
const EDGE_TOLERANCE: f64 = 1e-6;

/// A closed cell polygon with its center and characteristic radius.
#[derive(Debug, Clone, PartialEq)]
pub struct CellShape {
    pub kind: ShapeKind,
    pub center: Point,
    pub radius: f64,
    /// Vertices in counter-clockwise order, without repeating the first.
    pub vertices: Vec<Point>,
}

impl CellShape {
    /// Build the polygon for `kind` at `center`.
    pub fn new(kind: ShapeKind, center: Point, radius: f64) -> Self {
        match kind {
            ShapeKind::Square => square_vertices(center, radius),
            ShapeKind::Hexagon => hexagon_vertices(center, radius),
        }
    }

    /// Closed outline path of the polygon.
    pub fn outline(&self, stroke_width: f64) -> Path {
        let mut path = Path::new(stroke_width);
        path.polygon(&self.vertices, true);
        path
    }

    /// Returns true if `p` is inside or on the boundary.
    pub fn contains(&self, p: Point) -> bool {
        point_in_polygon(p, &self.vertices)
    }
}

/// Four axis-aligned corners at `center ± half_side`, counter-clockwise.
pub fn square_vertices(center: Point, half_side: f64) -> CellShape {
    let Point { x, y } = center;
    let r = half_side;
    CellShape {
        kind: ShapeKind::Square,
        center,
        radius: half_side,
        vertices: vec![
            Point::new(x + r, y - r),
            Point::new(x + r, y + r),
            Point::new(x - r, y + r),
            Point::new(x - r, y - r),
        ],
    }
}

/// Six vertices at 0°, 60°, ..., 300° from `center`, each at distance `radius`.
///
/// Vertex 0 sits due east. Grid spacing is derived from vertices 0, 1, 2
/// and 4, so this exact angle set must not change.
pub fn hexagon_vertices(center: Point, radius: f64) -> CellShape {
    let vertices = (0..6)
        .map(|k| {
            let angle = (k as f64 * 60.0).to_radians();
            Point::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            )
        })
        .collect();
    CellShape {
        kind: ShapeKind::Hexagon,
        center,
        radius,
        vertices,
    }
}

/// Equilateral triangle centered at `center`: apex above, base below.
///
/// The apex sits at the circumradius `side·√3/3` from the center; the base
/// corners at `±side/2` horizontally and `side·√3/6` vertically.
pub fn triangle_vertices(center: Point, side: f64) -> [Point; 3] {
    let sqrt3 = 3f64.sqrt();
    [
        Point::new(center.x, center.y - side * sqrt3 / 3.0),
        Point::new(center.x - side / 2.0, center.y + side * sqrt3 / 6.0),
        Point::new(center.x + side / 2.0, center.y + side * sqrt3 / 6.0),
    ]
}

/// A closed circle of `radius` around `center`.
pub fn circle_path(center: Point, radius: f64, stroke_width: f64) -> Path {
    let mut path = Path::new(stroke_width);
    path.oval(center, radius, radius);
    path
}

/// Closed polygon through `vertices`.
pub fn polygon_path(vertices: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    if let Some((first, rest)) = vertices.split_first() {
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
        path.close_path();
    }
    path
}

/// Containment test against a closed polygon path, counting boundary
/// points as inside.
pub fn polygon_contains(polygon: &BezPath, p: Point) -> bool {
    polygon.winding(p) != 0
        || polygon
            .segments()
            .any(|seg| seg.nearest(p, EPSILON).distance_sq <= EDGE_TOLERANCE * EDGE_TOLERANCE)
}

/// Point-in-polygon test that counts boundary points as inside.
pub fn point_in_polygon(p: Point, vertices: &[Point]) -> bool {
    vertices.len() >= 3 && polygon_contains(&polygon_path(vertices), p)
}

/// Distance from `p` to the segment `a`-`b`.
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    Line::new(a, b).nearest(p, EPSILON).distance_sq.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Vec2;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_square_is_ccw_and_sized() {
        let cell = square_vertices(Point::new(100.0, 100.0), 40.0);
        assert_eq!(cell.vertices.len(), 4);
        let area = polygon_path(&cell.vertices).area();
        assert!(area > 0.0);
        assert!(approx(area, 80.0 * 80.0));
        assert_eq!(cell.vertices[0], Point::new(140.0, 60.0));
    }

    #[test]
    fn test_hexagon_vertices_on_circle_at_sixty_degree_steps() {
        let center = Point::new(-3.0, 12.5);
        for &r in &[0.5, 1.0, 40.0, 54.0, 1000.0] {
            let cell = hexagon_vertices(center, r);
            assert_eq!(cell.vertices.len(), 6);
            assert!(polygon_path(&cell.vertices).area() > 0.0);
            for (k, v) in cell.vertices.iter().enumerate() {
                let expected = Vec2::from_angle((k as f64 * 60.0).to_radians());
                let actual = (*v - center) / r;
                assert!((actual - expected).hypot() < 1e-9, "r={} vertex {}", r, k);
            }
        }
    }

    #[test]
    fn test_triangle_is_equilateral_and_centered() {
        let c = Point::new(10.0, 20.0);
        let [a, b, d] = triangle_vertices(c, 12.0);
        assert!(approx(a.distance(b), 12.0));
        assert!(approx(b.distance(d), 12.0));
        assert!(approx(d.distance(a), 12.0));
        let centroid = Point::new((a.x + b.x + d.x) / 3.0, (a.y + b.y + d.y) / 3.0);
        assert!(approx(centroid.x, c.x) && approx(centroid.y, c.y));
        assert!(a.y < c.y, "apex should sit above the center");
    }

    #[test]
    fn test_point_in_polygon() {
        let cell = hexagon_vertices(Point::ZERO, 10.0);
        assert!(cell.contains(Point::ZERO));
        assert!(cell.contains(Point::new(10.0, 0.0)));
        assert!(!cell.contains(Point::new(9.0, 8.0)));
        assert!(!cell.contains(Point::new(-11.0, 0.0)));

        let mut reversed = cell.vertices.clone();
        reversed.reverse();
        assert!(point_in_polygon(Point::new(2.0, 3.0), &reversed));
        assert!(!point_in_polygon(Point::ZERO, &cell.vertices[..2]));
    }

    #[test]
    fn test_distance_to_segment() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert!(approx(distance_to_segment(Point::new(5.0, 3.0), a, b), 3.0));
        assert!(approx(distance_to_segment(Point::new(13.0, 4.0), a, b), 5.0));
        assert!(approx(distance_to_segment(Point::new(1.0, 1.0), a, a), 2f64.sqrt()));
    }
}
