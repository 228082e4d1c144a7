//! Lattice-closure solver.
//!
//! A hatch line repeats across the plane by translating along its own
//! direction and stepping sideways by a fixed offset. For the tiled
//! copies to land back on the source segments at every tile boundary,
//! the translation must hit an exact integer multiple of the tile width
//! and height at once. With a rational slope `p/q` that condition is a
//! two-variable linear Diophantine equation, solved here in closed form.

use hatcher_math::{is_close, Vec2};
use num_integer::{ExtendedGcd, Integer};

use crate::error::{HatcherError, Result};
use crate::rational::{limit_denominator, pow10, ratio_to_f64, Rational};

/// Slope magnitude above which a direction is treated as vertical.
pub const VERTICAL_SLOPE_LIMIT: f64 = 1.0e5;

/// The rectangular period over which the segment set repeats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    /// Tile width.
    pub width: f64,
    /// Tile height.
    pub height: f64,
}

impl Tile {
    /// Create a tile, rejecting degenerate dimensions.
    pub fn new(width: f64, height: f64) -> Result<Self> {
        let tile = Self { width, height };
        tile.validate()?;
        Ok(tile)
    }

    /// Reject zero, negative, or non-finite dimensions.
    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
        {
            return Err(HatcherError::DegenerateTile {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Height-to-width ratio.
    pub fn ratio(&self) -> f64 {
        self.height / self.width
    }
}

/// Solver tuning knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverParams {
    /// Decimal digits bounding the slope's rational denominator.
    ///
    /// Values below 5 keep spurious last-bit angle noise from leaking
    /// into the approximation.
    pub round_decimals: u32,
    /// Decimal digits bounding the equation coefficients' denominators.
    pub precision: u32,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            round_decimals: 4,
            precision: 8,
        }
    }
}

/// Minimal translation that maps the tiled pattern onto itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeSolution {
    /// Closure translation; each component is an exact integer multiple
    /// of the corresponding tile dimension.
    pub period_vector: Vec2,
    /// Repeat distance along the line (length of the period vector).
    pub period: f64,
    /// Component of the repeat parallel to the line.
    pub shift: f64,
    /// Component of the repeat perpendicular to the line.
    pub offset: f64,
}

/// Solve the tiling-closure problem for one direction over a tile.
///
/// `angle` is the direction in radians, normalized into `[0, 2π)`.
/// Vertical, horizontal, and square-tile diagonal directions take exact
/// shortcuts; everything else goes through the rationalized Diophantine
/// solve. Fails with [`HatcherError::NoTilingSolution`] when no closure
/// point exists for the rationalized slope.
pub fn solve(angle: f64, tile: &Tile, params: &SolverParams) -> Result<LatticeSolution> {
    tile.validate()?;

    let tan = angle.tan();
    let tan_abs = tan.abs();
    log::debug!(
        "solving direction {:.4}\u{b0} (tan {tan:.6e}) over tile {} x {}",
        angle.to_degrees(),
        tile.width,
        tile.height
    );

    if tan_abs > VERTICAL_SLOPE_LIMIT {
        log::debug!("vertical shortcut");
        return Ok(LatticeSolution {
            period_vector: Vec2::new(0.0, tile.height),
            period: tile.height,
            shift: 0.0,
            offset: tile.width,
        });
    }
    if is_close(tan_abs, 0.0) {
        log::debug!("horizontal shortcut");
        return Ok(LatticeSolution {
            period_vector: Vec2::new(tile.width, 0.0),
            period: tile.width,
            shift: 0.0,
            offset: tile.height,
        });
    }
    if is_close(tan_abs, 1.0) && is_close(tile.ratio(), 1.0) {
        log::debug!("square-tile diagonal shortcut");
        let period = (tile.width * tile.width + tile.height * tile.height).sqrt();
        let y_sign = if tan > 0.0 { 1.0 } else { -1.0 };
        return Ok(LatticeSolution {
            period_vector: Vec2::new(tile.width, y_sign * tile.height),
            period,
            shift: period / 2.0,
            offset: -period / 2.0,
        });
    }

    solve_general(angle, tan, tile, params)
}

/// General-direction solve: rationalize the slope, find the closure
/// point, then derive the parallel/perpendicular decomposition from a
/// second solve anchored at the perpendicular intercept.
fn solve_general(
    angle: f64,
    tan: f64,
    tile: &Tile,
    params: &SolverParams,
) -> Result<LatticeSolution> {
    let no_solution = || HatcherError::NoTilingSolution {
        angle_degrees: angle.to_degrees(),
    };

    let slope = limit_denominator(tan.abs(), pow10(params.round_decimals));
    let slope_f = ratio_to_f64(slope);
    let corrected = slope_f.atan();
    log::debug!("rationalized slope {slope} (corrected {:.6}\u{b0})", corrected.to_degrees());

    let primary =
        solve_closure(slope_f, tile, 0.0, 1, params.precision).ok_or_else(no_solution)?;
    let period = primary.distance;
    let tan_sign = if tan > 0.0 { 1.0 } else { -1.0 };
    let mut offset = tan_sign * tile.width * tile.height / period;

    let intercept = offset / corrected.cos().abs();
    let secondary =
        solve_closure(slope_f, tile, intercept, 0, params.precision).ok_or_else(no_solution)?;
    if secondary.x != 0 {
        offset *= if secondary.x > 0 { 1.0 } else { -1.0 };
    }
    let shift = secondary.distance + offset * slope_f;
    offset *= tan_sign;

    log::debug!(
        "closure point ({}, {}) period {period:.6} shift {shift:.6} offset {offset:.6}",
        primary.x,
        primary.y
    );
    Ok(LatticeSolution {
        period_vector: Vec2::new(primary.x_scaled, tan_sign * primary.y_scaled),
        period,
        shift,
        offset,
    })
}

/// One integer solution of the closure equation, scaled back to tile units.
struct ClosurePoint {
    x: i128,
    y: i128,
    x_scaled: f64,
    y_scaled: f64,
    distance: f64,
}

/// Solve `a·x − b·y + c = 0` over the integers, where `a = width·slope`,
/// `b = height`, and `c` is the intercept, all scaled through the LCM of
/// their bounded-denominator rationalizations.
///
/// Homogeneous equations take the minimal nontrivial solution scaled by
/// `solve_at`; inhomogeneous ones take the extended-Euclid family member
/// at parameter `solve_at`. Returns `None` when no integer solution
/// exists or the scaled coefficients overflow.
fn solve_closure(
    slope: f64,
    tile: &Tile,
    intercept: f64,
    solve_at: i128,
    precision: u32,
) -> Option<ClosurePoint> {
    let bound = pow10(precision);
    let a_r = limit_denominator(tile.width * slope, bound);
    let b_r = limit_denominator(tile.height, bound);
    let c_r = limit_denominator(intercept, bound);

    let scale = checked_lcm3(*a_r.denom(), *b_r.denom(), *c_r.denom())?;
    let a = scale_to_integer(a_r, scale)?;
    let b = scale_to_integer(b_r, scale)?;
    let c = scale_to_integer(c_r, scale)?;
    if a == 0 && b == 0 {
        return None;
    }
    log::debug!("integer equation {a}x - {b}y + {c} = 0");

    let (x, y) = if c == 0 {
        let g = a.gcd(&b);
        (
            (b / g).checked_mul(solve_at)?,
            (a / g).checked_mul(solve_at)?,
        )
    } else {
        let ExtendedGcd { gcd: g, x: u, y: v } = a.extended_gcd(&b);
        let rhs = -c;
        if rhs % g != 0 {
            return None;
        }
        let t = rhs / g;
        (u.checked_mul(t)?, v.checked_mul(t)?.checked_neg()?)
    };
    if x == 0 && y == 0 {
        return None;
    }

    let x_scaled = x as f64 * tile.width;
    let y_scaled = y as f64 * tile.height;
    let dy = y_scaled - intercept;
    Some(ClosurePoint {
        x,
        y,
        x_scaled,
        y_scaled,
        distance: (x_scaled * x_scaled + dy * dy).sqrt(),
    })
}

/// Overflow-checked LCM of three denominators.
fn checked_lcm3(a: i128, b: i128, c: i128) -> Option<i128> {
    let ab = (a / a.gcd(&b)).checked_mul(b)?;
    (ab / ab.gcd(&c)).checked_mul(c)
}

/// Multiply a rational by a common denominator multiple, yielding an integer.
fn scale_to_integer(r: Rational, scale: i128) -> Option<i128> {
    (scale / r.denom()).checked_mul(*r.numer())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    fn assert_closure(solution: &LatticeSolution, tile: &Tile) {
        let kx = solution.period_vector.x / tile.width;
        let ky = solution.period_vector.y / tile.height;
        assert_relative_eq!(kx, kx.round(), epsilon = 1e-6);
        assert_relative_eq!(ky, ky.round(), epsilon = 1e-6);
    }

    #[test]
    fn test_tile_rejects_degenerate() {
        assert!(Tile::new(0.0, 1.0).is_err());
        assert!(Tile::new(1.0, -2.0).is_err());
        assert!(Tile::new(f64::NAN, 1.0).is_err());
        assert!(Tile::new(1.0, f64::INFINITY).is_err());
        assert!(Tile::new(0.5, 1.0).is_ok());
    }

    #[test]
    fn test_vertical_shortcut() {
        let tile = Tile::new(0.5, 1.0).unwrap();
        let s = solve(FRAC_PI_2, &tile, &SolverParams::default()).unwrap();
        assert_relative_eq!(s.shift, 0.0);
        assert_relative_eq!(s.offset, 0.5);
        assert_relative_eq!(s.period, 1.0);
        assert_closure(&s, &tile);
    }

    #[test]
    fn test_horizontal_shortcut() {
        let tile = Tile::new(1.0, 1.0).unwrap();
        let s = solve(0.0, &tile, &SolverParams::default()).unwrap();
        assert_relative_eq!(s.shift, 0.0);
        assert_relative_eq!(s.offset, 1.0);
        assert_relative_eq!(s.period, 1.0);
        assert_closure(&s, &tile);
    }

    #[test]
    fn test_diagonal_shortcut_square_tile() {
        let tile = Tile::new(1.0, 1.0).unwrap();
        let s = solve(FRAC_PI_4, &tile, &SolverParams::default()).unwrap();
        let diag = 2f64.sqrt();
        assert_relative_eq!(s.period, diag);
        assert_relative_eq!(s.shift, diag / 2.0);
        assert_relative_eq!(s.offset, -diag / 2.0);
        assert_closure(&s, &tile);
    }

    #[test]
    fn test_unit_slope_on_tall_tile_goes_general() {
        // Slope magnitude one, but the tile is not square, so the
        // diagonal shortcut must not fire.
        let tile = Tile::new(0.5, 1.0).unwrap();
        let angle = 7.0 * FRAC_PI_4; // 315 degrees
        let s = solve(angle, &tile, &SolverParams::default()).unwrap();
        assert_relative_eq!(s.period, 2f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(s.shift, 0.35355339059327373, epsilon = 1e-12);
        assert_relative_eq!(s.offset, 0.35355339059327373, epsilon = 1e-12);
        assert_relative_eq!(s.period_vector.x, 1.0);
        assert_relative_eq!(s.period_vector.y, -1.0);
        assert_closure(&s, &tile);
    }

    #[test]
    fn test_thirty_degrees_unit_tile() {
        let tile = Tile::new(1.0, 1.0).unwrap();
        let s = solve(30f64.to_radians(), &tile, &SolverParams::default()).unwrap();
        assert_relative_eq!(s.period, 5822.00008588114, epsilon = 1e-6);
        assert_relative_eq!(s.shift, 1560.000320512778, epsilon = 1e-6);
        assert_relative_eq!(s.offset, -1.7176227846940221e-4, epsilon = 1e-12);
        assert_relative_eq!(s.period_vector.x, 5042.0);
        assert_relative_eq!(s.period_vector.y, 2911.0);
        assert_closure(&s, &tile);
    }

    #[test]
    fn test_closure_invariant_angle_sweep() {
        let tile = Tile::new(0.7, 1.3).unwrap();
        let params = SolverParams::default();
        for deg in (1..360).step_by(7) {
            let angle = (deg as f64).to_radians();
            if let Ok(s) = solve(angle, &tile, &params) {
                assert_closure(&s, &tile);
                assert!(s.period > 0.0, "period must be positive at {deg} degrees");
            }
        }
    }

    #[test]
    fn test_general_path_agrees_with_horizontal_shortcut() {
        // A slope small enough to rationalize to zero, yet too large for
        // the horizontal shortcut, must still land on the shortcut's
        // solution through the full Diophantine machinery.
        let tile = Tile::new(1.0, 1.0).unwrap();
        let tan: f64 = 1.0e-6;
        let s = solve_general(tan.atan(), tan, &tile, &SolverParams::default()).unwrap();
        assert_relative_eq!(s.shift, 0.0);
        assert_relative_eq!(s.offset, tile.height);
        assert_relative_eq!(s.period, tile.width);
    }

    #[test]
    fn test_no_tiling_solution_reports_angle() {
        // At the default four-decimal slope bound this direction's
        // secondary intercept is indivisible by the coefficient gcd.
        let tile = Tile::new(2.103, 1.86).unwrap();
        let angle = hatcher_math::direction_angle(1.2603, 2.1313);
        let err = solve(angle, &tile, &SolverParams::default()).unwrap_err();
        match err {
            HatcherError::NoTilingSolution { angle_degrees } => {
                assert_relative_eq!(angle_degrees, 59.40293399013006, epsilon = 1e-9);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_oversized_precision_saturates() {
        // A precision beyond the native width must degrade into a
        // saturated denominator bound, not an arithmetic panic.
        let tile = Tile::new(1.0, 1.0).unwrap();
        let params = SolverParams {
            precision: 40,
            ..SolverParams::default()
        };
        let _ = solve(30f64.to_radians(), &tile, &params);
    }

    #[test]
    fn test_coarser_slope_bound_recovers() {
        let tile = Tile::new(2.183, 2.1).unwrap();
        let angle = hatcher_math::direction_angle(0.917, 0.925);
        let params = SolverParams {
            round_decimals: 3,
            ..SolverParams::default()
        };
        let s = solve(angle, &tile, &params).unwrap();
        assert_relative_eq!(s.shift, 50346.45713938212, epsilon = 1e-3);
        assert_relative_eq!(s.offset, 1.9193814124796306e-5, epsilon = 1e-12);
        assert_closure(&s, &tile);
    }

    #[test]
    fn test_indivisible_intercept_has_no_solution() {
        // gcd(a, b) = 2 cannot divide an odd intercept.
        let tile = Tile::new(1.0, 2.0).unwrap();
        assert!(solve_closure(2.0, &tile, 1.0, 0, 8).is_none());
    }

    #[test]
    fn test_near_degenerate_direction_terminates() {
        // atan2 of nearly equal floats: an in-practice irrational slope
        // must come back quickly as either a solution or a clean error.
        let tile = Tile::new(1.0, 1.0).unwrap();
        let angle = hatcher_math::direction_angle(0.1234567, 0.1234568);
        let _ = solve(angle, &tile, &SolverParams::default());
    }
}
