//! Marker shapes keyed by pitch.

use sonotex_spec::{MarkerSizes, PitchType, Point};

use crate::error::TextureError;
use crate::geometry::{circle_path, triangle_vertices};
use crate::path::Path;

/// Marker drawn for a pitch class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerVariant {
    /// Open, unfilled triangle outline.
    Arrow,
    Circle,
    Triangle,
}

/// Pitch classes with a dedicated marker.
const PITCH_MARKERS: &[(PitchType, MarkerVariant)] = &[
    (PitchType::High, MarkerVariant::Arrow),
    (PitchType::Low, MarkerVariant::Circle),
];

type MarkerFn = fn(Point, f64, bool, f64) -> Path;

const MARKER_GENERATORS: &[(MarkerVariant, MarkerFn)] = &[
    (MarkerVariant::Arrow, arrow_marker as MarkerFn),
    (MarkerVariant::Circle, circle_marker as MarkerFn),
    (MarkerVariant::Triangle, triangle_marker as MarkerFn),
];

impl MarkerVariant {
    /// Marker for a pitch class; unlisted classes get [`MarkerVariant::Triangle`].
    pub fn for_pitch(pitch: PitchType) -> MarkerVariant {
        PITCH_MARKERS
            .iter()
            .find(|(p, _)| *p == pitch)
            .map(|(_, m)| *m)
            .unwrap_or(MarkerVariant::Triangle)
    }

    /// Marker for a raw class name; unrecognized names get [`MarkerVariant::Triangle`].
    pub fn for_pitch_name(name: &str) -> MarkerVariant {
        Self::for_pitch(PitchType::from_name_or_default(name))
    }

    /// Configured size of this marker: side length, or radius for circles.
    pub fn size_from(&self, sizes: &MarkerSizes) -> f64 {
        match self {
            MarkerVariant::Arrow => sizes.arrow,
            MarkerVariant::Circle => sizes.circle,
            MarkerVariant::Triangle => sizes.triangle,
        }
    }

    /// Build one marker centered at `center`.
    ///
    /// Filled markers are painted without a stroke. Arrows are never filled.
    pub fn generate(
        &self,
        center: Point,
        size: f64,
        filled: bool,
        stroke_width: f64,
    ) -> Result<Path, TextureError> {
        if !(size.is_finite() && size > 0.0) {
            return Err(TextureError::InvalidMarkerSize(size));
        }
        let generate = MARKER_GENERATORS
            .iter()
            .find(|(m, _)| m == self)
            .map(|(_, f)| *f)
            .unwrap_or(triangle_marker);
        Ok(generate(center, size, filled, stroke_width))
    }
}

fn paint(path: Path, filled: bool) -> Path {
    if filled {
        let mut path = path.with_fill(true);
        path.stroke_width = 0.0;
        path
    } else {
        path
    }
}

fn arrow_marker(center: Point, size: f64, _filled: bool, stroke_width: f64) -> Path {
    let mut path = Path::new(stroke_width);
    path.polygon(&triangle_vertices(center, size), false);
    path
}

fn circle_marker(center: Point, radius: f64, filled: bool, stroke_width: f64) -> Path {
    paint(circle_path(center, radius, stroke_width), filled)
}

fn triangle_marker(center: Point, size: f64, filled: bool, stroke_width: f64) -> Path {
    let mut path = Path::new(stroke_width);
    path.polygon(&triangle_vertices(center, size), true);
    paint(path, filled)
}
