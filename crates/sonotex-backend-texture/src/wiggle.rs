//! Smooth wave curve between two points.
//!
//! The line from `from` to `to` is divided into half-waves of roughly
//! `wave_length`. Each half-wave is one cubic whose two control points sit
//! `amplitude / 2` off the axis, alternating sides, so consecutive segments
//! join with matching tangents at the axis crossings.

use kurbo::{CubicBez, Vec2};
use sonotex_spec::{Point, WiggleParams};

use crate::error::TextureError;
use crate::geometry::EPSILON;

/// A wave as a start anchor followed by connected cubic segments.
#[derive(Debug, Clone, PartialEq)]
pub struct WiggleCurve {
    pub start: Point,
    /// Half-waves in order; each starts where the previous one ends.
    pub segments: Vec<CubicBez>,
}

/// Check wiggle parameters.
pub fn check_params(params: &WiggleParams) -> Result<(), TextureError> {
    if !(params.wave_length.is_finite() && params.wave_length > 0.0) {
        return Err(TextureError::InvalidWiggle(format!(
            "wave length must be positive, got {}",
            params.wave_length
        )));
    }
    if !(params.amplitude.is_finite() && params.amplitude >= 0.0) {
        return Err(TextureError::InvalidWiggle(format!(
            "amplitude must be >= 0, got {}",
            params.amplitude
        )));
    }
    if !(0.0..=1.0).contains(&params.curve_squaring) {
        return Err(TextureError::InvalidWiggle(format!(
            "curve squaring must be in [0, 1], got {}",
            params.curve_squaring
        )));
    }
    Ok(())
}

/// Compute the wave from `from` to `to`.
pub fn calc_wiggle(from: Point, to: Point, params: &WiggleParams) -> Result<WiggleCurve, TextureError> {
    check_params(params)?;

    let axis = to - from;
    let distance = axis.hypot();
    if distance < EPSILON {
        return Ok(WiggleCurve {
            start: from,
            segments: Vec::new(),
        });
    }

    let count = ((distance / params.wave_length).round() as usize).max(1);
    let step = distance / count as f64;
    let unit = axis / distance;
    let normal = Vec2::new(-unit.y, unit.x);
    let half_height = params.amplitude / 2.0;
    let handle = unit * (step * (1.0 - params.curve_squaring) / 2.0);

    let on_axis = |i: usize| {
        if i == count {
            to
        } else {
            from + unit * (step * i as f64)
        }
    };

    let segments = (0..count)
        .map(|i| {
            let side = if i % 2 == 0 {
                normal * half_height
            } else {
                normal * -half_height
            };
            let a = on_axis(i);
            let b = on_axis(i + 1);
            CubicBez::new(a, a + handle + side, b - handle + side, b)
        })
        .collect();

    Ok(WiggleCurve {
        start: from,
        segments,
    })
}
