//! Rasterizing recorded drawings.
//!
//! Pixels are sampled at their centers with no anti-aliasing. A pixel is
//! filled when an odd number of the path's closed subpaths contain it, and
//! stroked when it lies within half the stroke width of a segment. Both
//! tests are also gated by every clip polygon of the command.

use kurbo::{BezPath, Shape};
use sonotex_spec::{Point, MAX_CANVAS_SIZE};
use thiserror::Error;

use crate::canvas::{DrawCommand, RecordingCanvas};
use crate::color::Color;
use crate::geometry::{distance_to_segment, polygon_contains, polygon_path};
use crate::path::Polyline;

/// Errors from allocating a pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RasterError {
    /// A side exceeds [`MAX_CANVAS_SIZE`] or the pixels could not be allocated.
    #[error("cannot allocate a {width}x{height} pixel buffer")]
    TooLarge { width: u32, height: u32 },
}

/// A 2D RGBA pixel buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureBuffer {
    pub width: u32,
    pub height: u32,
    /// Pixel data, row-major.
    pub data: Vec<Color>,
}

impl TextureBuffer {
    /// Create a buffer filled with a color.
    pub fn new(width: u32, height: u32, fill: Color) -> Result<Self, RasterError> {
        let too_large = RasterError::TooLarge { width, height };
        if width > MAX_CANVAS_SIZE || height > MAX_CANVAS_SIZE {
            return Err(too_large);
        }
        let size = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| too_large.clone())?;
        let mut data = Vec::new();
        data.try_reserve_exact(size).map_err(|_| too_large)?;
        data.resize(size, fill);
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.data[y as usize * self.width as usize + x as usize]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let idx = y as usize * self.width as usize + x as usize;
        self.data[idx] = color;
    }

    /// Composite `color` over the pixel using its alpha.
    pub fn blend(&mut self, x: u32, y: u32, color: Color) {
        if color.a >= 1.0 {
            self.set(x, y, color);
            return;
        }
        let under = self.get(x, y);
        let a = color.a.clamp(0.0, 1.0);
        self.set(
            x,
            y,
            Color {
                r: color.r * a + under.r * (1.0 - a),
                g: color.g * a + under.g * (1.0 - a),
                b: color.b * a + under.b * (1.0 - a),
                a: a + under.a * (1.0 - a),
            },
        );
    }

    /// Convert to 8-bit RGBA bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.data.len() * 4);
        for color in &self.data {
            bytes.extend_from_slice(&color.to_rgba8());
        }
        bytes
    }

    /// Number of pixels equal to `color`.
    pub fn count(&self, color: Color) -> usize {
        let target = color.to_rgba8();
        self.data.iter().filter(|c| c.to_rgba8() == target).count()
    }
}

/// Flattened geometry of one command, ready for per-pixel tests.
struct PreparedCommand<'a> {
    command: &'a DrawCommand,
    polylines: Vec<Polyline>,
    /// Closed subpaths only; open ones never fill.
    fill_area: BezPath,
    clips: Vec<BezPath>,
    half_width: f64,
}

impl<'a> PreparedCommand<'a> {
    fn new(command: &'a DrawCommand) -> Self {
        let polylines = command.path.flatten();
        let mut fill_area = BezPath::new();
        for poly in polylines.iter().filter(|p| p.closed && p.points.len() > 2) {
            fill_area.extend(polygon_path(&poly.points).elements().iter().copied());
        }
        Self {
            command,
            polylines,
            fill_area,
            clips: command.clips.iter().map(|clip| polygon_path(clip)).collect(),
            half_width: command.path.stroke_width / 2.0,
        }
    }

    /// Pixel range touched by the command, clamped to the buffer.
    fn pixel_bounds(&self, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
        let bounds = self.command.path.bounds()?;
        let pad = self.half_width + 1.0;
        let clamp_x = |v: f64| v.clamp(0.0, width as f64) as u32;
        let clamp_y = |v: f64| v.clamp(0.0, height as f64) as u32;
        let (x0, x1) = (clamp_x((bounds.x0 - pad).floor()), clamp_x((bounds.x1 + pad).ceil()));
        let (y0, y1) = (clamp_y((bounds.y0 - pad).floor()), clamp_y((bounds.y1 + pad).ceil()));
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0, x1, y0, y1))
    }

    fn clipped(&self, p: Point) -> bool {
        self.clips.iter().any(|clip| !polygon_contains(clip, p))
    }

    fn in_fill(&self, p: Point) -> bool {
        self.fill_area.winding(p) % 2 != 0
    }

    fn in_stroke(&self, p: Point) -> bool {
        self.polylines.iter().any(|poly| {
            let points = &poly.points;
            let closing = if poly.closed && points.len() > 1 {
                Some((points[points.len() - 1], points[0]))
            } else {
                None
            };
            points
                .windows(2)
                .map(|w| (w[0], w[1]))
                .chain(closing)
                .any(|(a, b)| distance_to_segment(p, a, b) <= self.half_width)
        })
    }
}

/// Render recorded commands over a background.
///
/// Fails when the canvas is too large to hold as a pixel buffer.
pub fn rasterize(canvas: &RecordingCanvas, background: Color) -> Result<TextureBuffer, RasterError> {
    let width = canvas.width().max(0.0).ceil() as u32;
    let height = canvas.height().max(0.0).ceil() as u32;
    let mut buffer = TextureBuffer::new(width, height, background)?;

    for command in canvas.commands() {
        let prepared = PreparedCommand::new(command);
        let Some((x0, x1, y0, y1)) = prepared.pixel_bounds(width, height) else {
            continue;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let p = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                if prepared.clipped(p) {
                    continue;
                }
                if let Some(stroke) = command.stroke {
                    if prepared.half_width > 0.0 && prepared.in_stroke(p) {
                        buffer.blend(x, y, stroke);
                        continue;
                    }
                }
                if let Some(fill) = command.fill {
                    if prepared.in_fill(p) {
                        buffer.blend(x, y, fill);
                    }
                }
            }
        }
    }

    log::debug!(
        "rasterized {} commands into {}x{}",
        canvas.commands().len(),
        width,
        height
    );
    Ok(buffer)
}
