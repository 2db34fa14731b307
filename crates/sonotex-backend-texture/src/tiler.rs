//! Repeating a unit path across a cell.
//!
//! Tiling moves a pen offset while appending translated copies of the unit
//! path. The pen is walked back to where it started before returning, and
//! the residual offset is reported so callers can check that no net
//! translation leaks out of a tiling.

use std::f64::consts::FRAC_PI_2;

use kurbo::Affine;
use sonotex_spec::Point;

use crate::path::Path;

/// Direction of a one-dimensional run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Copies step toward +x.
    Horizontal,
    /// Copies step toward +y.
    Vertical,
}

impl Axis {
    fn step(self, gap: f64) -> (f64, f64) {
        match self {
            Axis::Horizontal => (gap, 0.0),
            Axis::Vertical => (0.0, gap),
        }
    }
}

/// How a unit fills a two-dimensional field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTiling {
    /// A run of lines plus the same run rotated 90° about the field center.
    Crossed,
    /// `count × count` copies in rows and columns.
    Grid,
}

/// Result of a tiling.
#[derive(Debug, Clone, PartialEq)]
pub struct TiledPath {
    pub path: Path,
    /// Number of unit copies appended.
    pub copies: usize,
    /// Pen offset left over after the tiling; zero when the frame was restored.
    pub net_offset: (f64, f64),
}

/// Pen that accumulates translations.
#[derive(Debug, Default)]
struct Pen {
    x: f64,
    y: f64,
}

impl Pen {
    fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    fn stamp(&self, out: &mut Path, unit: &Path) {
        out.append_transformed(unit, Affine::translate((self.x, self.y)));
    }
}

/// Place `count` copies of `unit`, each `gap` further along `axis`.
pub fn repeat_along_axis(unit: &Path, count: u32, gap: f64, axis: Axis) -> TiledPath {
    let mut out = Path::new(unit.stroke_width).with_fill(unit.filled);
    let mut pen = Pen::default();
    let (dx, dy) = axis.step(gap);

    for _ in 0..count {
        pen.stamp(&mut out, unit);
        pen.translate(dx, dy);
    }
    pen.translate(-dx * count as f64, -dy * count as f64);

    TiledPath {
        path: out,
        copies: count as usize,
        net_offset: (pen.x, pen.y),
    }
}

/// A horizontal run of `unit` plus the same run rotated 90° about `center`.
///
/// With a vertical unit line this yields `count` vertical and `count`
/// horizontal lines.
pub fn tile_crossed(unit: &Path, count: u32, gap: f64, center: Point) -> TiledPath {
    let run = repeat_along_axis(unit, count, gap, Axis::Horizontal);

    let mut out = run.path.transformed(Affine::rotate_about(FRAC_PI_2, center));
    out.append(&run.path);

    TiledPath {
        path: out,
        copies: run.copies * 2,
        net_offset: run.net_offset,
    }
}

/// `count` rows of `count` copies, stepping `gap` right then `gap` down.
pub fn tile_grid(unit: &Path, count: u32, gap: f64) -> TiledPath {
    let mut out = Path::new(unit.stroke_width).with_fill(unit.filled);
    let mut pen = Pen::default();
    let mut copies = 0;

    for _ in 0..count {
        for _ in 0..count {
            pen.stamp(&mut out, unit);
            copies += 1;
            pen.translate(gap, 0.0);
        }
        pen.translate(-gap * count as f64, gap);
    }
    pen.translate(0.0, -gap * count as f64);

    TiledPath {
        path: out,
        copies,
        net_offset: (pen.x, pen.y),
    }
}

/// Fill a field with `unit` using the given tiling.
pub fn tile_over_field(
    unit: &Path,
    count: u32,
    gap: f64,
    tiling: FieldTiling,
    center: Point,
) -> TiledPath {
    match tiling {
        FieldTiling::Crossed => tile_crossed(unit, count, gap, center),
        FieldTiling::Grid => tile_grid(unit, count, gap),
    }
}
