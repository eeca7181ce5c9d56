//! Numeric interface shared by the pivoting engine.
//!
//! The tableau, the BFS snapshots and the profile normalization are written
//! once against [`Scalar`]. Two instantiations are provided:
//!
//! - `f64`: fast, tolerance-based comparisons
//! - [`BigRational`]: exact arithmetic, zero tolerance

use std::fmt::Debug;

use num_rational::BigRational;
use num_traits::{Num, Signed, ToPrimitive, Zero};

/// A field-like number the Lemke-Howson engine can pivot over.
///
/// Ring and field operations come from [`Num`], sign tests from [`Signed`].
/// Everything else is the type-specific notion of "close enough".
pub trait Scalar: Clone + Debug + PartialOrd + Num + Signed + Send + Sync + 'static {
    /// Tolerance used by every equality and sign test downstream.
    ///
    /// Exactly zero for exact arithmetic.
    fn tolerance() -> Self;

    /// Convert an exact payoff into this representation.
    fn from_rational(value: &BigRational) -> Self;

    /// Render for output.
    ///
    /// Floating point types use `decimals` fixed-point digits; exact types
    /// ignore it and print their native form.
    fn render(&self, decimals: usize) -> String;

    /// Lossy conversion for reporting.
    fn as_f64(&self) -> f64;

    /// `|self - other| <= eps`.
    fn approx_eq(&self, other: &Self, eps: &Self) -> bool {
        (self.clone() - other.clone()).abs() <= *eps
    }

    /// Strict sign test against the tolerance: `self > eps`.
    fn exceeds(&self, eps: &Self) -> bool {
        self > eps
    }
}

impl Scalar for f64 {
    fn tolerance() -> Self {
        1e-9
    }

    fn from_rational(value: &BigRational) -> Self {
        value.to_f64().unwrap_or(f64::NAN)
    }

    fn render(&self, decimals: usize) -> String {
        // Avoid printing "-0.000" for values that are zero up to rounding.
        let value = if self.abs() < 0.5 * 10f64.powi(-(decimals as i32)) {
            0.0
        } else {
            *self
        };
        format!("{:.*}", decimals, value)
    }

    fn as_f64(&self) -> f64 {
        *self
    }
}

impl Scalar for BigRational {
    fn tolerance() -> Self {
        BigRational::zero()
    }

    fn from_rational(value: &BigRational) -> Self {
        value.clone()
    }

    fn render(&self, _decimals: usize) -> String {
        self.to_string()
    }

    fn as_f64(&self) -> f64 {
        self.to_f64().unwrap_or(f64::NAN)
    }

    fn approx_eq(&self, other: &Self, _eps: &Self) -> bool {
        self == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn ratio(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    #[test]
    fn test_tolerances() {
        assert!(f64::tolerance() > 0.0);
        assert!(BigRational::tolerance().is_zero());
    }

    #[test]
    fn test_float_approx_eq() {
        let eps = f64::tolerance();
        assert!(0.5f64.approx_eq(&(0.5 + 1e-12), &eps));
        assert!(!0.5f64.approx_eq(&0.6, &eps));
        assert!(!1e-10f64.exceeds(&eps));
        assert!(1e-3f64.exceeds(&eps));
    }

    #[test]
    fn test_rational_is_exact() {
        let eps = BigRational::tolerance();
        let third = ratio(1, 3);
        assert!(third.approx_eq(&ratio(2, 6), &eps));
        assert!(!third.approx_eq(&ratio(333_333, 1_000_000), &eps));
        assert!(ratio(1, 1_000_000_000_000).exceeds(&eps));
    }

    #[test]
    fn test_render() {
        assert_eq!(0.5f64.render(3), "0.500");
        assert_eq!((-1e-12f64).render(4), "0.0000");
        assert_eq!(ratio(1, 2).render(3), "1/2");
        assert_eq!(ratio(4, 2).render(3), "2");
    }

    #[test]
    fn test_from_rational() {
        assert_eq!(f64::from_rational(&ratio(1, 4)), 0.25);
        assert_eq!(BigRational::from_rational(&ratio(1, 3)), ratio(1, 3));
    }
}
