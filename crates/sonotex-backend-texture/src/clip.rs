//! Clipping textures to cell outlines.
//!
//! [`ClipCompositor::compose_cell`] paints one cell in a fixed z-order:
//! background fill, timbre lines, pitch markers, then the outline stroke.
//! The two textures are drawn inside a clip scope on the cell polygon, so
//! nothing they draw reaches past the outline, and the clip is released
//! before the outline is stroked.

use kurbo::{Line, ParamCurve};
use sonotex_spec::{Point, SoundDescriptor};

use crate::canvas::{Canvas, CanvasScope};
use crate::color::Color;
use crate::error::TextureError;
use crate::geometry::{polygon_contains, polygon_path, CellShape, EPSILON};
use crate::rng::DeterministicRng;
use crate::texture::{CellTexture, TextureComposer};

/// Paints cells with clipped textures.
#[derive(Debug, Clone)]
pub struct ClipCompositor {
    composer: TextureComposer,
    ink: Color,
    background: Option<Color>,
}

impl ClipCompositor {
    /// Create a compositor painting with `ink` and no cell background.
    pub fn new(composer: TextureComposer, ink: Color) -> Self {
        Self {
            composer,
            ink,
            background: None,
        }
    }

    /// Fill each cell with `color` before its textures are drawn.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn composer(&self) -> &TextureComposer {
        &self.composer
    }

    /// Paint one cell and return the textures that were drawn.
    ///
    /// Any clip or paint state pushed here is popped before returning,
    /// whether or not texture generation succeeds.
    pub fn compose_cell<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        descriptor: &SoundDescriptor,
        cell: &CellShape,
        rng: &mut DeterministicRng,
    ) -> Result<CellTexture, TextureError> {
        let mut painted = CanvasScope::paint(canvas);

        if let Some(background) = self.background {
            painted.set_fill(Some(background));
            painted.set_stroke(None);
            painted.draw_polygon(&cell.vertices, true);
        }

        painted.set_fill(Some(self.ink));
        painted.set_stroke(Some(self.ink));

        let texture = {
            let mut clipped = CanvasScope::clip(&mut *painted, &cell.vertices);
            let texture =
                self.composer
                    .compose(descriptor, cell.center, cell.radius * 2.0, rng)?;
            clipped.draw_path(&texture.lines.path);
            clipped.draw_path(&texture.markers.path);
            texture
        };

        painted.set_fill(None);
        painted.draw_path(&cell.outline(self.composer.style().outline_stroke_width));

        Ok(texture)
    }
}

/// Cut a polyline to a polygon.
///
/// Each segment is split where it crosses a polygon edge, and the pieces
/// whose midpoints lie inside the polygon are kept. Returns the visible
/// runs in order; consecutive visible pieces are joined into one run.
pub fn clip_polyline(points: &[Point], region: &[Point]) -> Vec<Vec<Point>> {
    let mut runs: Vec<Vec<Point>> = Vec::new();
    if region.len() < 3 {
        return runs;
    }
    let polygon = polygon_path(region);

    let mut current: Vec<Point> = Vec::new();
    for pair in points.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let segment = Line::new(from, to);
        let at = |t: f64| {
            if t <= 0.0 {
                from
            } else if t >= 1.0 {
                to
            } else {
                segment.eval(t)
            }
        };

        let mut cuts = vec![0.0, 1.0];
        cuts.extend(
            polygon
                .segments()
                .flat_map(|edge| edge.intersect_line(segment))
                .map(|hit| hit.line_t),
        );
        cuts.sort_by(f64::total_cmp);
        cuts.dedup_by(|a, b| (*a - *b).abs() < EPSILON);

        for piece in cuts.windows(2) {
            let (t0, t1) = (piece[0], piece[1]);
            if !polygon_contains(&polygon, at((t0 + t1) / 2.0)) {
                if current.len() > 1 {
                    runs.push(std::mem::take(&mut current));
                }
                current.clear();
                continue;
            }
            let start = at(t0);
            let joins = current
                .last()
                .map(|last| last.distance(start) < EPSILON)
                .unwrap_or(false);
            if !joins {
                if current.len() > 1 {
                    runs.push(std::mem::take(&mut current));
                }
                current.clear();
                current.push(start);
            }
            current.push(at(t1));
        }
    }
    if current.len() > 1 {
        runs.push(current);
    }
    runs
}
