//! Angle utilities and arc planning.
//!
//! Painter arcs are specified in center form (center, radius, start and end
//! angle) while most native primitives take an endpoint form (target point,
//! radius, size and sweep flags). [`plan_arc`] does that conversion once so
//! every backend receives the same segments.

use std::f64::consts::{PI, TAU};

use crate::kurbo::Point;

/// Angles closer than this to zero, or to a full turn, are snapped.
pub const ANGLE_EPSILON: f64 = 1e-5;

/// Whether an arc spans more than half a turn.
///
/// A start point, end point and radius describe two possible arcs; this flag
/// selects between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcSize {
    Small,
    Large,
}

/// The direction an arc sweeps, as seen on a y-down surface.
///
/// `Clockwise` is the direction of increasing angle when the y axis points
/// down, which is the only direction the painter produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepDirection {
    Clockwise,
    CounterClockwise,
}

/// One arc segment in endpoint form, with the center form kept alongside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSegment {
    /// The point the segment ends at.
    pub end: Point,
    pub radius: f64,
    /// The angle swept by this segment, in radians, always non-negative.
    pub sweep_angle: f64,
    pub size: ArcSize,
    pub sweep: SweepDirection,
    pub center: Point,
    /// The angle of the segment's start point around `center`.
    pub start_angle: f64,
}

/// The result of converting a center-form arc into segments.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcPlan {
    pub start: Point,
    pub end: Point,
    /// `true` when the arc covers the whole circle and was split in two.
    pub full_circle: bool,
    pub segments: Vec<ArcSegment>,
}

/// Normalize an angle in radians into `[0, 2π)`.
///
/// A nonzero angle that normalizes to zero (`2π`, `4π`, ...) is returned as
/// `2π` so that "to the end of the circle" survives normalization.
pub fn normalize_angle(angle: f64) -> f64 {
    let mut normalized = angle % TAU;
    if normalized.abs() < ANGLE_EPSILON {
        normalized = 0.0;
    }
    if normalized == 0.0 && angle != 0.0 {
        return TAU;
    }
    if normalized < 0.0 {
        normalized += TAU;
    }
    normalized
}

/// The point at `angle` on the circle around `center`.
pub fn point_on_angle(center: Point, radius: f64, angle: f64) -> Point {
    Point::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}

/// Convert a center-form arc into endpoint-form segments.
///
/// The arc always sweeps in the direction of increasing angle. A swept
/// difference within [`ANGLE_EPSILON`] of zero or of a full turn is treated
/// as a complete circle and split into two half turns, since a single
/// endpoint-form segment from a point back to itself is degenerate.
pub fn plan_arc(center: Point, radius: f64, start_angle: f64, end_angle: f64) -> ArcPlan {
    let sa = normalize_angle(start_angle);
    let ea = normalize_angle(end_angle);
    let start = point_on_angle(center, radius, sa);
    let end = point_on_angle(center, radius, ea);

    let mut difference = ea - sa;
    if difference < 0.0 {
        difference += TAU;
    }
    let full_circle = difference < ANGLE_EPSILON || (difference - TAU).abs() < ANGLE_EPSILON;
    let sweep = SweepDirection::Clockwise;

    let segments = if full_circle {
        let mid_angle = sa + PI;
        let half = |end, start_angle| ArcSegment {
            end,
            radius,
            sweep_angle: PI,
            size: ArcSize::Small,
            sweep,
            center,
            start_angle,
        };
        vec![
            half(point_on_angle(center, radius, mid_angle), sa),
            half(start, mid_angle),
        ]
    } else {
        let size = if difference > PI {
            ArcSize::Large
        } else {
            ArcSize::Small
        };
        vec![ArcSegment {
            end,
            radius,
            sweep_angle: difference,
            size,
            sweep,
            center,
            start_angle: sa,
        }]
    };

    let end = if full_circle { start } else { end };
    ArcPlan {
        start,
        end,
        full_circle,
        segments,
    }
}
