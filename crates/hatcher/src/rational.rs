//! Bounded-denominator rational approximation.
//!
//! Converts a floating slope into the closest rational number whose
//! denominator does not exceed a caller-chosen bound. The lattice solver
//! needs rational slopes: an irrational or full-precision slope has no
//! finite repeat period over a rectangular tile.

use num_rational::Ratio;

/// Rational number used throughout the solver.
///
/// `i128` keeps the least-common-multiple scaling of up to three
/// denominators (each bounded by `10^precision`) inside native-width
/// arithmetic.
pub type Rational = Ratio<i128>;

/// `10^exp` as an `i128` denominator bound, saturating at `i128::MAX`.
///
/// Exponents of 39 and above exceed the native width; a saturated
/// bound makes [`limit_denominator`] return the exact binary fraction,
/// which the solver's overflow checks then handle like any other
/// oversized coefficients.
pub fn pow10(exp: u32) -> i128 {
    10i128.checked_pow(exp).unwrap_or(i128::MAX)
}

/// Best rational approximation of `value` with denominator at most
/// `max_denominator`.
///
/// Continued-fraction convergents of the exact binary value of `value`,
/// finished with the last admissible semiconvergent; ties prefer the
/// full convergent. Values already representable within the bound come
/// back exactly: `limit_denominator(0.5, 100) == 1/2`.
pub fn limit_denominator(value: f64, max_denominator: i128) -> Rational {
    debug_assert!(max_denominator >= 1);
    let (n, d) = match float_to_fraction(value) {
        Some(frac) => frac,
        None => return coarse_fallback(value),
    };
    if d <= max_denominator {
        return Rational::new(n, d);
    }

    let negative = n < 0;
    let (mut n, mut d) = (n.abs(), d);

    // Stern-Brocot walk: (p0/q0, p1/q1) are consecutive convergents.
    let (mut p0, mut q0, mut p1, mut q1) = (0i128, 1i128, 1i128, 0i128);
    loop {
        let a = n / d;
        let q2 = q0 + a * q1;
        if q2 > max_denominator {
            break;
        }
        let p2 = p0 + a * p1;
        p0 = p1;
        q0 = q1;
        p1 = p2;
        q1 = q2;
        let r = n - a * d;
        n = d;
        d = r;
        // d == 0 cannot happen here: an exact terminating expansion
        // means the original denominator was within the bound.
    }

    let k = (max_denominator - q0) / q1;
    let bound1 = Rational::new(p0 + k * p1, q0 + k * q1);
    let bound2 = Rational::new(p1, q1);
    let target = value.abs();
    let err1 = (ratio_to_f64(bound1) - target).abs();
    let err2 = (ratio_to_f64(bound2) - target).abs();
    let best = if err2 <= err1 { bound2 } else { bound1 };
    if negative {
        -best
    } else {
        best
    }
}

/// Convert a rational back to floating point.
pub fn ratio_to_f64(r: Rational) -> f64 {
    *r.numer() as f64 / *r.denom() as f64
}

/// Exact fraction for a finite `f64`, when it fits in `i128`.
fn float_to_fraction(value: f64) -> Option<(i128, i128)> {
    if !value.is_finite() {
        return None;
    }
    if value == 0.0 {
        return Some((0, 1));
    }
    let bits = value.to_bits();
    let sign = if bits >> 63 == 1 { -1i128 } else { 1i128 };
    let biased = ((bits >> 52) & 0x7ff) as i64;
    let fraction = bits & 0xf_ffff_ffff_ffff;
    let (mut mantissa, mut exponent) = if biased == 0 {
        (fraction as i128, -1074i64)
    } else {
        ((fraction | (1 << 52)) as i128, biased - 1075)
    };
    while mantissa & 1 == 0 && exponent < 0 {
        mantissa >>= 1;
        exponent += 1;
    }
    // Magnitudes beyond i128 scaling cannot occur for sane slopes; the
    // caller falls back to a coarse value instead.
    if exponent > 73 || exponent < -100 {
        return None;
    }
    if exponent >= 0 {
        Some((sign * (mantissa << exponent), 1))
    } else {
        Some((sign * mantissa, 1i128 << (-exponent)))
    }
}

/// Fallback for magnitudes outside exact-fraction range.
fn coarse_fallback(value: f64) -> Rational {
    if !value.is_finite() || value.abs() < 1.0e-30 {
        Rational::new(0, 1)
    } else {
        Rational::new(value.round() as i128, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_small_denominator() {
        assert_eq!(limit_denominator(0.5, 100), Rational::new(1, 2));
        assert_eq!(limit_denominator(0.25, 100), Rational::new(1, 4));
        assert_eq!(limit_denominator(3.0, 10), Rational::new(3, 1));
        assert_eq!(limit_denominator(0.0, 10), Rational::new(0, 1));
    }

    #[test]
    fn test_pi_convergents() {
        let pi = std::f64::consts::PI;
        assert_eq!(limit_denominator(pi, 10), Rational::new(22, 7));
        assert_eq!(limit_denominator(pi, 1000), Rational::new(355, 113));
    }

    #[test]
    fn test_negative_values() {
        let pi = std::f64::consts::PI;
        assert_eq!(limit_denominator(-pi, 10), Rational::new(-22, 7));
        assert_eq!(limit_denominator(-0.5, 100), Rational::new(-1, 2));
    }

    #[test]
    fn test_decimal_slope() {
        // tan(30 deg) ~ 0.5773502691896257 at four decimal digits.
        let t = 30f64.to_radians().tan();
        let r = limit_denominator(t, pow10(4));
        assert!(*r.denom() <= 10_000);
        assert!((ratio_to_f64(r) - t).abs() < 1e-4);
    }

    #[test]
    fn test_tiny_value_rounds_to_zero() {
        assert_eq!(limit_denominator(1.0e-6, pow10(4)), Rational::new(0, 1));
    }

    #[test]
    fn test_near_half_resolves_exactly() {
        // A float a hair below 1/2 must still collapse onto 1/2.
        assert_eq!(
            limit_denominator(0.49999999999999994, pow10(8)),
            Rational::new(1, 2)
        );
    }

    #[test]
    fn test_pow10_saturates() {
        assert_eq!(pow10(38), 10i128.pow(38));
        assert_eq!(pow10(39), i128::MAX);
        assert_eq!(pow10(40), i128::MAX);
    }

    #[test]
    fn test_saturated_bound_returns_exact_fraction() {
        // Every finite double fits within the saturated bound.
        let t = 30f64.to_radians().tan();
        let r = limit_denominator(t, i128::MAX);
        assert_eq!(ratio_to_f64(r), t);
    }

    #[test]
    fn test_determinism() {
        let v = 0.123456789;
        assert_eq!(limit_denominator(v, 1000), limit_denominator(v, 1000));
    }
}
