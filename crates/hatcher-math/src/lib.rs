#![warn(missing_docs)]

//! Math types for the hatcher pattern synthesizer.
//!
//! Thin wrappers around nalgebra providing 2D points and vectors,
//! plus the angle and rounding helpers shared by the solver and the
//! pattern codec.

use std::f64::consts::TAU;

/// A point in the 2D tile plane.
pub type Point2 = nalgebra::Point2<f64>;

/// A vector in the 2D tile plane.
pub type Vec2 = nalgebra::Vector2<f64>;

/// Absolute tolerance for float closeness checks.
pub const ABS_TOL: f64 = 1.0e-8;

/// Relative tolerance for float closeness checks.
pub const REL_TOL: f64 = 1.0e-5;

/// Check whether `a` is close to `b` under the shared tolerances.
///
/// `|a - b| <= ABS_TOL + REL_TOL * |b|`, so comparisons against zero
/// reduce to the absolute tolerance alone.
pub fn is_close(a: f64, b: f64) -> bool {
    (a - b).abs() <= ABS_TOL + REL_TOL * b.abs()
}

/// Four-quadrant direction angle of `(dx, dy)`, normalized into `[0, 2π)`.
///
/// Negative arctangent results are shifted up by a full turn, so a
/// segment pointing into the lower half-plane reports an angle in
/// `(π, 2π)` rather than a negative one.
pub fn direction_angle(dx: f64, dy: f64) -> f64 {
    let angle = dy.atan2(dx);
    if angle < 0.0 {
        angle + TAU
    } else {
        angle
    }
}

/// Rotate point `p` about `origin` by `angle` radians.
pub fn rotate_about(p: Point2, origin: Point2, angle: f64) -> Point2 {
    let (s, c) = angle.sin_cos();
    let dx = p.x - origin.x;
    let dy = p.y - origin.y;
    Point2::new(
        origin.x + c * dx - s * dy,
        origin.y + s * dx + c * dy,
    )
}

/// Round `value` to `decimals` fractional digits.
pub fn round_to_decimals(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}
