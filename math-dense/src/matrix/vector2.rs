//! Two-dimensional vector
//!
//! Used as the shape type of [`DenseMatrix`](crate::DenseMatrix) and as a
//! small geometry helper (rotations, projections, interpolation).

use crate::traits::{RealField, Scalar};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

/// A 2D vector with components `x` and `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Vector2<T> {
    /// First component
    pub x: T,
    /// Second component
    pub y: T,
}

impl<T> Vector2<T> {
    /// Create a vector from its components
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Vector with the components exchanged
    pub fn swapped(self) -> Self {
        Self::new(self.y, self.x)
    }

    /// Exchange the components in place
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.x, &mut self.y);
    }

    /// Copy with `x` replaced
    pub fn with_x(self, x: T) -> Self {
        Self::new(x, self.y)
    }

    /// Copy with `y` replaced
    pub fn with_y(self, y: T) -> Self {
        Self::new(self.x, y)
    }
}

impl<T: Clone> Vector2<T> {
    /// Build from the first two elements of a slice
    ///
    /// # Panics
    ///
    /// Panics if the slice has fewer than two elements.
    pub fn from_slice(values: &[T]) -> Self {
        assert!(
            values.len() >= 2,
            "need at least 2 elements, got {}",
            values.len()
        );
        Self::new(values[0].clone(), values[1].clone())
    }
}

impl<T> From<[T; 2]> for Vector2<T> {
    fn from([x, y]: [T; 2]) -> Self {
        Self::new(x, y)
    }
}

impl<T> From<(T, T)> for Vector2<T> {
    fn from((x, y): (T, T)) -> Self {
        Self::new(x, y)
    }
}

impl<T> Index<usize> for Vector2<T> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        match i {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("Vector2 index out of range: {i}"),
        }
    }
}

impl<T> IndexMut<usize> for Vector2<T> {
    fn index_mut(&mut self, i: usize) -> &mut T {
        match i {
            0 => &mut self.x,
            1 => &mut self.y,
            _ => panic!("Vector2 index out of range: {i}"),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Vector2<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector2({}, {})", self.x, self.y)
    }
}

impl<T: Scalar> Vector2<T> {
    /// The zero vector
    pub fn zero() -> Self {
        Self::new(T::zero(), T::zero())
    }

    /// Unit vector along x
    pub fn unit_x() -> Self {
        Self::new(T::one(), T::zero())
    }

    /// Unit vector along y
    pub fn unit_y() -> Self {
        Self::new(T::zero(), T::one())
    }

    /// Squared Euclidean length
    #[inline]
    pub fn length2(self) -> T {
        self.x * self.x + self.y * self.y
    }

    /// Dot product
    #[inline]
    pub fn dot(self, other: Self) -> T {
        self.x * other.x + self.y * other.y
    }

    /// z-component of the 3D cross product: `x1·y2 − y1·x2`
    #[inline]
    pub fn cross(self, other: Self) -> T {
        self.x * other.y - self.y * other.x
    }
}

impl<T: Scalar> Add for Vector2<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Scalar> Sub for Vector2<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<T: Scalar> Mul<T> for Vector2<T> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl<T: Scalar> AddAssign for Vector2<T> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Scalar> SubAssign for Vector2<T> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: Scalar> MulAssign<T> for Vector2<T> {
    fn mul_assign(&mut self, rhs: T) {
        *self = *self * rhs;
    }
}

macro_rules! impl_scalar_lhs_mul {
    ($($t:ty),*) => {
        $(
            impl Mul<Vector2<$t>> for $t {
                type Output = Vector2<$t>;

                fn mul(self, rhs: Vector2<$t>) -> Vector2<$t> {
                    rhs * self
                }
            }
        )*
    };
}

impl_scalar_lhs_mul!(f32, f64, i32, i64);

impl<T: RealField> Neg for Vector2<T> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl<T: RealField> Div<T> for Vector2<T> {
    type Output = Self;

    fn div(self, rhs: T) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl<T: RealField> DivAssign<T> for Vector2<T> {
    fn div_assign(&mut self, rhs: T) {
        *self = *self / rhs;
    }
}

impl<T: RealField> Vector2<T> {
    /// Euclidean length
    #[inline]
    pub fn length(self) -> T {
        self.length2().sqrt()
    }

    /// Unit vector in the same direction (NaN components for the zero vector)
    pub fn normalized(self) -> Self {
        self / self.length()
    }

    /// Normalize in place
    pub fn normalize(&mut self) {
        *self = self.normalized();
    }

    /// Rotate counter-clockwise by `angle` radians around the origin
    pub fn rotated(self, angle: T) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(self.x * c - self.y * s, self.x * s + self.y * c)
    }

    /// Rotate in place around the origin
    pub fn rotate(&mut self, angle: T) {
        *self = self.rotated(angle);
    }

    /// Rotate counter-clockwise by `angle` radians around `center`
    pub fn rotated_around(self, angle: T, center: Self) -> Self {
        (self - center).rotated(angle) + center
    }

    /// Rotate in place around `center`
    pub fn rotate_around(&mut self, angle: T, center: Self) {
        *self = self.rotated_around(angle, center);
    }

    /// Perpendicular vector, rotated by +90°
    pub fn perp(self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Polar angle `atan2(y, x)` in `(-π, π]`
    pub fn angle(self) -> T {
        self.y.atan2(self.x)
    }

    /// Distance to another point
    pub fn distance(self, other: Self) -> T {
        (self - other).length()
    }

    /// Squared distance to another point
    pub fn distance2(self, other: Self) -> T {
        (self - other).length2()
    }

    /// Signed length of the projection on `other`
    pub fn scalar_projection(self, other: Self) -> T {
        self.dot(other) / other.length()
    }

    /// Projection on `other`; NaN components when `other` is zero
    pub fn project(self, other: Self) -> Self {
        let denom = other.length2();
        let k = if denom.is_zero() {
            T::nan()
        } else {
            self.dot(other) / denom
        };
        other * k
    }

    /// Component orthogonal to `other`
    pub fn reject(self, other: Self) -> Self {
        self - self.project(other)
    }

    /// Linear interpolation, `t = 0` gives `self` and `t = 1` gives `to`
    pub fn lerp(self, to: Self, t: T) -> Self {
        self + (to - self) * t
    }
}
