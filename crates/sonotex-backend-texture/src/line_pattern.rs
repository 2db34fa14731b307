//! Line patterns keyed by timbre.
//!
//! Every variant draws one vertical path from `(x, y)` to `(x, y + length)`:
//! a straight segment, a jittered zigzag, or a smooth wiggle. The timbre to
//! variant mapping is a table; anything not in it draws straight lines.

use sonotex_spec::{Point, TextureStyle, TimbreType, ZigZagParams};

use crate::error::TextureError;
use crate::path::Path;
use crate::rng::DeterministicRng;
use crate::wiggle::calc_wiggle;

/// Shape of the line drawn for a timbre class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineVariant {
    Straight,
    ZigZag,
    Wiggle,
}

/// Timbre classes with a dedicated line variant.
const TIMBRE_LINES: &[(TimbreType, LineVariant)] = &[
    (TimbreType::Organic, LineVariant::Wiggle),
    (TimbreType::Mechanical, LineVariant::ZigZag),
];

/// Parameters shared by all line variants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineRequest {
    /// Top end of the line.
    pub origin: Point,
    /// Vertical extent.
    pub length: f64,
    pub stroke_width: f64,
}

type LineFn = fn(&LineRequest, &TextureStyle, &mut DeterministicRng) -> Result<Path, TextureError>;

/// Generator function for each variant.
const LINE_GENERATORS: &[(LineVariant, LineFn)] = &[
    (LineVariant::Straight, straight_line as LineFn),
    (LineVariant::ZigZag, zigzag_line as LineFn),
    (LineVariant::Wiggle, wiggle_line as LineFn),
];

impl LineVariant {
    /// Variant for a timbre class; unlisted classes get [`LineVariant::Straight`].
    pub fn for_timbre(timbre: TimbreType) -> LineVariant {
        TIMBRE_LINES
            .iter()
            .find(|(t, _)| *t == timbre)
            .map(|(_, v)| *v)
            .unwrap_or(LineVariant::Straight)
    }

    /// Variant for a raw class name; unrecognized names get [`LineVariant::Straight`].
    pub fn for_timbre_name(name: &str) -> LineVariant {
        Self::for_timbre(TimbreType::from_name_or_default(name))
    }

    /// Generate one line of this variant.
    pub fn generate(
        &self,
        request: &LineRequest,
        style: &TextureStyle,
        rng: &mut DeterministicRng,
    ) -> Result<Path, TextureError> {
        if !(request.length.is_finite() && request.length > 0.0) {
            return Err(TextureError::InvalidLength(request.length));
        }
        let generate = LINE_GENERATORS
            .iter()
            .find(|(v, _)| v == self)
            .map(|(_, f)| *f)
            .unwrap_or(straight_line);
        generate(request, style, rng)
    }
}

/// Single segment from the origin straight down.
fn straight_line(
    request: &LineRequest,
    _style: &TextureStyle,
    _rng: &mut DeterministicRng,
) -> Result<Path, TextureError> {
    let Point { x, y } = request.origin;
    let mut path = Path::new(request.stroke_width);
    path.move_to(Point::new(x, y));
    path.line_to(Point::new(x, y + request.length));
    Ok(path)
}

/// Zigzag through `density` evenly spaced vertices.
///
/// Vertex `i` (1-based) is pushed right by a random offset when `i` is even
/// and left when odd. Offsets are drawn uniformly from
/// `[offset_min, offset_max]` using the supplied RNG.
fn zigzag_line(
    request: &LineRequest,
    style: &TextureStyle,
    rng: &mut DeterministicRng,
) -> Result<Path, TextureError> {
    let ZigZagParams {
        offset_min,
        offset_max,
        density,
    } = style.zigzag;
    if !(offset_min >= 0.0 && offset_min <= offset_max && offset_max.is_finite()) {
        return Err(TextureError::InvalidZigZagOffsets {
            min: offset_min,
            max: offset_max,
        });
    }
    if density == 0 {
        return Err(TextureError::ZeroZigZagDensity);
    }

    let Point { x, y } = request.origin;
    let step = request.length / (density as f64 + 1.0);
    let mut path = Path::new(request.stroke_width);
    path.move_to(Point::new(x, y));
    for i in 1..=density {
        let offset: f64 = rng.gen_range(offset_min..=offset_max);
        let vx = if i % 2 == 0 { x + offset } else { x - offset };
        path.line_to(Point::new(vx, y + step * i as f64));
    }
    path.line_to(Point::new(x, y + request.length));
    Ok(path)
}

/// Smooth wave along the line.
fn wiggle_line(
    request: &LineRequest,
    style: &TextureStyle,
    _rng: &mut DeterministicRng,
) -> Result<Path, TextureError> {
    let Point { x, y } = request.origin;
    let curve = calc_wiggle(Point::new(x, y), Point::new(x, y + request.length), &style.wiggle)?;
    let mut path = Path::new(request.stroke_width);
    path.move_to(curve.start);
    for segment in curve.segments {
        path.curve_to(segment.p1, segment.p2, segment.p3);
    }
    Ok(path)
}
