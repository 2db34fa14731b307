//! Drawing surface abstraction.
//!
//! A [`Canvas`] holds a paint state (fill, stroke, stroke width), a stack of
//! clip polygons, and a stack of affine transforms. Every push has a matching
//! pop; [`CanvasScope`] pairs them so state is restored on every exit path,
//! including early returns through `?`.
//!
//! [`RecordingCanvas`] is the in-memory backend. It records each drawn path
//! in canvas coordinates together with the clip polygons active at the time,
//! which the SVG and raster exporters then replay.

use std::ops::{Deref, DerefMut};

use kurbo::Affine;
use sonotex_spec::Point;

use crate::clip::clip_polyline;
use crate::color::Color;
use crate::path::Path;

/// A surface that paths are drawn onto.
pub trait Canvas {
    /// Set the fill color; `None` disables fill.
    fn set_fill(&mut self, color: Option<Color>);

    /// Set the stroke color; `None` disables stroke.
    fn set_stroke(&mut self, color: Option<Color>);

    /// Set the width used by [`Canvas::draw_polygon`] and friends.
    fn set_stroke_width(&mut self, width: f64);

    /// Current stroke width.
    fn stroke_width(&self) -> f64;

    /// Push the current paint state.
    fn save_paint(&mut self);

    /// Pop the paint state pushed by the last [`Canvas::save_paint`].
    fn restore_paint(&mut self);

    /// Intersect the clip region with a convex polygon given in local coordinates.
    fn push_clip(&mut self, polygon: &[Point]);

    /// Remove the clip pushed last.
    fn pop_clip(&mut self);

    /// Prepend `transform` to the current transform.
    fn push_transform(&mut self, transform: Affine);

    /// Restore the transform in effect before the last push.
    fn pop_transform(&mut self);

    /// Paint a path with the current colors.
    ///
    /// The path is filled when `path.filled` is set and stroked when its
    /// stroke width is positive.
    fn draw_path(&mut self, path: &Path);

    /// Draw a polygon with the current stroke width.
    fn draw_polygon(&mut self, points: &[Point], filled: bool) {
        let mut path = Path::new(self.stroke_width()).with_fill(filled);
        path.polygon(points, true);
        self.draw_path(&path);
    }

    /// Draw an axis-aligned ellipse with the current stroke width.
    fn draw_oval(&mut self, center: Point, rx: f64, ry: f64, filled: bool) {
        let mut path = Path::new(self.stroke_width()).with_fill(filled);
        path.oval(center, rx, ry);
        self.draw_path(&path);
    }

    /// Stroke a single cubic.
    fn draw_curve(&mut self, from: Point, control_out: Point, control_in: Point, to: Point) {
        let mut path = Path::new(self.stroke_width());
        path.move_to(from);
        path.curve_to(control_out, control_in, to);
        self.draw_path(&path);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScopeKind {
    Clip,
    Transform,
    Paint,
}

/// Guard that pops one piece of canvas state when dropped.
///
/// Dereferences to the canvas, so drawing continues through the guard.
pub struct CanvasScope<'a, C: Canvas + ?Sized> {
    canvas: &'a mut C,
    kind: ScopeKind,
}

impl<'a, C: Canvas + ?Sized> CanvasScope<'a, C> {
    /// Push a clip polygon for the lifetime of the guard.
    pub fn clip(canvas: &'a mut C, polygon: &[Point]) -> Self {
        canvas.push_clip(polygon);
        Self {
            canvas,
            kind: ScopeKind::Clip,
        }
    }

    /// Push a transform for the lifetime of the guard.
    pub fn transform(canvas: &'a mut C, transform: Affine) -> Self {
        canvas.push_transform(transform);
        Self {
            canvas,
            kind: ScopeKind::Transform,
        }
    }

    /// Save the paint state for the lifetime of the guard.
    pub fn paint(canvas: &'a mut C) -> Self {
        canvas.save_paint();
        Self {
            canvas,
            kind: ScopeKind::Paint,
        }
    }
}

impl<C: Canvas + ?Sized> Deref for CanvasScope<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.canvas
    }
}

impl<C: Canvas + ?Sized> DerefMut for CanvasScope<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.canvas
    }
}

impl<C: Canvas + ?Sized> Drop for CanvasScope<'_, C> {
    fn drop(&mut self) {
        match self.kind {
            ScopeKind::Clip => self.canvas.pop_clip(),
            ScopeKind::Transform => self.canvas.pop_transform(),
            ScopeKind::Paint => self.canvas.restore_paint(),
        }
    }
}

/// Fill, stroke, and width in effect for drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintState {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
}

impl Default for PaintState {
    fn default() -> Self {
        Self {
            fill: Some(Color::black()),
            stroke: None,
            stroke_width: 1.0,
        }
    }
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    /// Geometry in canvas coordinates.
    pub path: Path,
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    /// Clip polygons in canvas coordinates, outermost first.
    pub clips: Vec<Vec<Point>>,
}

/// Visible piece of a recorded command after clipping.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleRun {
    /// Index into [`RecordingCanvas::commands`].
    pub command: usize,
    pub points: Vec<Point>,
}

/// Canvas that records draw commands in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
    paint: PaintState,
    paint_stack: Vec<PaintState>,
    transform: Affine,
    transform_stack: Vec<Affine>,
    clips: Vec<Vec<Point>>,
}

impl RecordingCanvas {
    /// Create an empty canvas of the given size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Recorded commands in draw order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn paint(&self) -> PaintState {
        self.paint
    }

    pub fn current_transform(&self) -> Affine {
        self.transform
    }

    pub fn clip_depth(&self) -> usize {
        self.clips.len()
    }

    pub fn transform_depth(&self) -> usize {
        self.transform_stack.len()
    }

    pub fn paint_depth(&self) -> usize {
        self.paint_stack.len()
    }

    /// Returns true if no clip, transform, or paint state is pushed.
    pub fn is_balanced(&self) -> bool {
        self.clips.is_empty() && self.transform_stack.is_empty() && self.paint_stack.is_empty()
    }

    /// Flattened geometry of every command, cut to its clip polygons.
    ///
    /// Closed subpaths are treated as outlines, so a filled marker
    /// contributes its boundary.
    pub fn visible_runs(&self) -> Vec<VisibleRun> {
        let mut out = Vec::new();
        for (index, command) in self.commands.iter().enumerate() {
            for polyline in command.path.flatten() {
                let mut runs = vec![polyline.points];
                if polyline.closed {
                    if let Some(first) = runs[0].first().copied() {
                        runs[0].push(first);
                    }
                }
                for clip in &command.clips {
                    runs = runs
                        .iter()
                        .flat_map(|run| clip_polyline(run, clip))
                        .collect();
                }
                out.extend(runs.into_iter().map(|points| VisibleRun {
                    command: index,
                    points,
                }));
            }
        }
        out
    }
}

impl Canvas for RecordingCanvas {
    fn set_fill(&mut self, color: Option<Color>) {
        self.paint.fill = color;
    }

    fn set_stroke(&mut self, color: Option<Color>) {
        self.paint.stroke = color;
    }

    fn set_stroke_width(&mut self, width: f64) {
        self.paint.stroke_width = width;
    }

    fn stroke_width(&self) -> f64 {
        self.paint.stroke_width
    }

    fn save_paint(&mut self) {
        self.paint_stack.push(self.paint);
    }

    fn restore_paint(&mut self) {
        match self.paint_stack.pop() {
            Some(paint) => self.paint = paint,
            None => log::warn!("restore_paint without matching save_paint"),
        }
    }

    fn push_clip(&mut self, polygon: &[Point]) {
        let transform = self.transform;
        self.clips
            .push(polygon.iter().map(|p| transform * *p).collect());
    }

    fn pop_clip(&mut self) {
        if self.clips.pop().is_none() {
            log::warn!("pop_clip without matching push_clip");
        }
    }

    fn push_transform(&mut self, transform: Affine) {
        self.transform_stack.push(self.transform);
        self.transform = self.transform * transform;
    }

    fn pop_transform(&mut self) {
        match self.transform_stack.pop() {
            Some(transform) => self.transform = transform,
            None => log::warn!("pop_transform without matching push_transform"),
        }
    }

    fn draw_path(&mut self, path: &Path) {
        if path.is_empty() {
            return;
        }
        let fill = if path.filled { self.paint.fill } else { None };
        let stroke = if path.stroke_width > 0.0 {
            self.paint.stroke
        } else {
            None
        };
        if fill.is_none() && stroke.is_none() {
            return;
        }
        self.commands.push(DrawCommand {
            path: path.transformed(self.transform),
            fill,
            stroke,
            clips: self.clips.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Vec<Point> {
        vec![
            Point::new(1.0, -1.0),
            Point::new(1.0, 1.0),
            Point::new(-1.0, 1.0),
            Point::new(-1.0, -1.0),
        ]
    }

    fn stroked_canvas() -> RecordingCanvas {
        let mut canvas = RecordingCanvas::new(100.0, 100.0);
        canvas.set_stroke(Some(Color::black()));
        canvas.set_fill(None);
        canvas
    }

    #[test]
    fn test_transform_applies_to_recorded_geometry() {
        let mut canvas = stroked_canvas();
        canvas.push_transform(Affine::translate((10.0, 20.0)));
        canvas.push_transform(Affine::rotate_about(
            std::f64::consts::FRAC_PI_2,
            Point::new(0.0, 5.0),
        ));
        let mut path = Path::new(1.0);
        path.move_to(Point::ZERO);
        path.line_to(Point::new(0.0, 5.0));
        canvas.draw_path(&path);
        canvas.pop_transform();
        canvas.pop_transform();

        // rotation first, then translation
        let points = canvas.commands()[0].path.flatten().remove(0).points;
        assert!(points[0].distance(Point::new(15.0, 25.0)) < 1e-9);
        assert!(points[1].distance(Point::new(10.0, 25.0)) < 1e-9);
        assert_eq!(canvas.current_transform(), Affine::IDENTITY);
        assert!(canvas.is_balanced());
    }

    #[test]
    fn test_scope_pops_on_drop() {
        let mut canvas = stroked_canvas();
        {
            let mut clipped = CanvasScope::clip(&mut canvas, &unit_square());
            let mut moved = CanvasScope::transform(&mut *clipped, Affine::translate((5.0, 5.0)));
            let painted = CanvasScope::paint(&mut *moved);
            assert_eq!(painted.clip_depth(), 1);
            assert_eq!(painted.transform_depth(), 1);
            assert_eq!(painted.paint_depth(), 1);
        }
        assert!(canvas.is_balanced());
    }

    #[test]
    fn test_scope_pops_on_early_return() {
        fn failing(canvas: &mut RecordingCanvas) -> Result<(), String> {
            let mut scope = CanvasScope::clip(canvas, &unit_square());
            scope.set_stroke_width(3.0);
            let generated: Result<(), String> = Err("generator failed".to_string());
            generated?;
            Ok(())
        }

        let mut canvas = stroked_canvas();
        assert!(failing(&mut canvas).is_err());
        assert_eq!(canvas.clip_depth(), 0);
    }

    #[test]
    fn test_paint_restore() {
        let mut canvas = stroked_canvas();
        canvas.save_paint();
        canvas.set_fill(Some(Color::white()));
        canvas.set_stroke_width(9.0);
        canvas.restore_paint();
        assert_eq!(canvas.paint().fill, None);
        assert_eq!(canvas.stroke_width(), 1.0);
    }

    #[test]
    fn test_unpainted_paths_are_skipped() {
        let mut canvas = RecordingCanvas::new(10.0, 10.0);
        canvas.set_fill(None);
        canvas.set_stroke(Some(Color::black()));
        // filled path with no stroke and no fill color
        let mut path = Path::new(0.0).with_fill(true);
        path.oval(Point::ZERO, 1.0, 1.0);
        canvas.draw_path(&path);
        assert!(canvas.commands().is_empty());

        canvas.draw_polygon(&unit_square(), false);
        assert_eq!(canvas.commands().len(), 1);
    }

    #[test]
    fn test_visible_runs_respect_clip() {
        let mut canvas = stroked_canvas();
        let mut clipped = CanvasScope::clip(&mut canvas, &unit_square());
        let mut path = Path::new(1.0);
        path.move_to(Point::new(-5.0, 0.0));
        path.line_to(Point::new(5.0, 0.0));
        clipped.draw_path(&path);
        drop(clipped);

        let runs = canvas.visible_runs();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].points.len(), 2);
        assert!(runs[0].points[0].distance(Point::new(-1.0, 0.0)) < 1e-9);
        assert!(runs[0].points[1].distance(Point::new(1.0, 0.0)) < 1e-9);
    }
}
