//! Scalar traits for dense linear algebra
//!
//! Two capability levels are used throughout the crate:
//! - [`Scalar`]: exact ring arithmetic (`+`, `-`, `*`, zero, one). Enough for
//!   construction, products, transposes and cofactor determinants, so integer
//!   matrices work too.
//! - [`RealField`]: real floating-point numbers. Required by everything that
//!   divides, pivots or takes square roots (the solver layer).

use num_traits::{Float, FromPrimitive, Num, NumAssign, ToPrimitive};
use std::fmt::{Debug, Display};

/// Element type usable in a [`DenseMatrix`](crate::DenseMatrix) with exact arithmetic.
pub trait Scalar: Num + Copy + Send + Sync + Debug + 'static {}

impl<T> Scalar for T where T: Num + Copy + Send + Sync + Debug + 'static {}

/// Trait for real scalar types used by the solvers.
///
/// # Implementations
///
/// Provided for:
/// - `f64` (default for most problems)
/// - `f32` (for memory-constrained applications)
pub trait RealField:
    Scalar + Float + NumAssign + FromPrimitive + ToPrimitive + Display
{
    /// Convert an `f64` constant, rounding if the target is narrower
    fn from_f64_lossy(value: f64) -> Self;

    /// The constant `2`
    #[inline]
    fn two() -> Self {
        Self::one() + Self::one()
    }
}

impl RealField for f64 {
    #[inline]
    fn from_f64_lossy(value: f64) -> Self {
        value
    }
}

impl RealField for f32 {
    #[inline]
    fn from_f64_lossy(value: f64) -> Self {
        value as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sin_cos_atan2<T: RealField>(x: T) -> (T, T, T) {
        (x.sin(), x.cos(), x.atan2(T::one()))
    }

    #[test]
    fn test_f64_field() {
        let x: f64 = -3.0;
        assert_relative_eq!(x.abs(), 3.0);
        assert_relative_eq!(<f64 as RealField>::two(), 2.0);
        assert_relative_eq!(f64::from_f64_lossy(0.25), 0.25);
    }

    #[test]
    fn test_f32_field() {
        let x: f32 = 9.0;
        assert_relative_eq!(Float::sqrt(x), 3.0);
        assert_relative_eq!(f32::from_f64_lossy(1e-12), 1e-12_f32);
    }

    #[test]
    fn test_trig_f64() {
        use std::f64::consts::PI;
        let s2 = 2.0_f64.sqrt() / 2.0;
        let s3 = 3.0_f64.sqrt() / 2.0;
        let cases = [
            (0.0, 0.0, 1.0),
            (PI / 6.0, 0.5, s3),
            (PI / 4.0, s2, s2),
            (PI / 2.0, 1.0, 0.0),
            (PI, 0.0, -1.0),
            (-PI / 2.0, -1.0, 0.0),
        ];
        for (angle, sin, cos) in cases {
            let (s, c, _) = sin_cos_atan2(angle);
            assert_relative_eq!(s, sin, epsilon = 1e-9);
            assert_relative_eq!(c, cos, epsilon = 1e-9);
        }

        let atan = [
            (0.0, 1.0, 0.0),
            (1.0, 0.0, PI / 2.0),
            (1.0, 1.0, PI / 4.0),
            (1.0, -1.0, 3.0 * PI / 4.0),
            (-1.0, -1.0, -3.0 * PI / 4.0),
            (-1.0, 1.0, -PI / 4.0),
        ];
        for (y, x, expected) in atan {
            assert_relative_eq!(Float::atan2(y, x), expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_trig_f32() {
        use std::f32::consts::PI;
        let (s, c, a) = sin_cos_atan2(PI / 6.0);
        assert_relative_eq!(s, 0.5, epsilon = 1e-6);
        assert_relative_eq!(c, 3.0_f32.sqrt() / 2.0, epsilon = 1e-6);
        assert_relative_eq!(a, (PI / 6.0).atan2(1.0), epsilon = 1e-6);
        assert_relative_eq!(Float::atan2(-1.0_f32, -1.0), -3.0 * PI / 4.0, epsilon = 1e-6);
    }
}
