// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Homogeneous 2D vectors.

use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use kurbo::{Point, Vec2};

use crate::error::MathError;

/// A 2D point or direction in homogeneous form.
///
/// Points carry `z == 1` before they are transformed and directions carry `z == 0`.
/// Transformed points come back with `z == 0`, so the result of a transform can be
/// fed straight into a dot product against an axis.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vector {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
    /// Homogeneous component.
    pub z: f64,
}

impl Vector {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a vector from its three components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// A point (`z == 1`).
    pub const fn point(x: f64, y: f64) -> Self {
        Self::new(x, y, 1.0)
    }

    /// A direction (`z == 0`).
    pub const fn direction(x: f64, y: f64) -> Self {
        Self::new(x, y, 0.0)
    }

    /// Overwrite all three components.
    pub fn set(&mut self, x: f64, y: f64, z: f64) {
        self.x = x;
        self.y = y;
        self.z = z;
    }

    /// Dot product over all three components.
    pub fn dot(self, other: Self) -> f64 {
        self.to_vec2().dot(other.to_vec2()) + self.z * other.z
    }

    /// Dot product of the planar parts; `z` is ignored.
    pub fn dot2(self, other: Self) -> f64 {
        self.to_vec2().dot(other.to_vec2())
    }

    /// Euclidean length over all three components.
    pub fn magnitude(self) -> f64 {
        Vec2::new(self.to_vec2().hypot(), self.z).hypot()
    }

    /// Length of the planar part.
    pub fn planar_length(self) -> f64 {
        self.to_vec2().hypot()
    }

    /// True if every component is finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Unit vector in the same direction.
    pub fn normalize(self) -> Result<Self, MathError> {
        let len = self.magnitude();
        if len == 0.0 || !len.is_finite() {
            return Err(MathError::ZeroLengthVector);
        }
        let planar = self.to_vec2() / len;
        Ok(Self::new(planar.x, planar.y, self.z / len))
    }

    /// The (unnormalized) planar normal `(-y, x, 0)`, a quarter turn from `self`.
    pub fn normal(self) -> Result<Self, MathError> {
        if self.planar_length() == 0.0 {
            return Err(MathError::ZeroLengthVector);
        }
        Ok(Self::from(self.to_vec2().turn_90()))
    }

    /// The representative of this axis on the half-plane `x >= 0`.
    ///
    /// When `x == 0` the representative has `y >= 0`. Negative zeros are folded to
    /// positive zero so equal axes compare equal.
    pub fn canonical_axis(self) -> Self {
        let flip = self.x < 0.0 || (self.x == 0.0 && self.y < 0.0);
        let v = if flip { -self } else { self };
        Self::new(v.x + 0.0, v.y + 0.0, v.z + 0.0)
    }

    /// Component-wise comparison within `eps`.
    pub fn approx_eq(self, other: Self, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps
            && (self.y - other.y).abs() <= eps
            && (self.z - other.z).abs() <= eps
    }

    /// The planar part as a kurbo point.
    pub fn to_point(self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The planar part as a kurbo vector.
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl From<Point> for Vector {
    fn from(p: Point) -> Self {
        Self::point(p.x, p.y)
    }
}

impl From<Vec2> for Vector {
    fn from(v: Vec2) -> Self {
        Self::direction(v.x, v.y)
    }
}

impl From<(f64, f64)> for Vector {
    fn from((x, y): (f64, f64)) -> Self {
        Self::direction(x, y)
    }
}

impl Add for Vector {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vector {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vector {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul<f64> for Vector {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vector {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn normal_is_a_quarter_turn() {
        let v = Vector::direction(3.0, 4.0);
        let n = v.normal().unwrap();
        assert_eq!(n, Vector::direction(-4.0, 3.0));
        assert_eq!(n.dot(v), 0.0);
        assert_eq!(n.z, 0.0, "normals are directions");
    }

    #[test]
    fn zero_length_is_rejected() {
        assert_eq!(Vector::ZERO.normal(), Err(MathError::ZeroLengthVector));
        assert_eq!(Vector::ZERO.normalize(), Err(MathError::ZeroLengthVector));
    }

    #[test]
    fn normalize_yields_unit_length() {
        let v = Vector::direction(-1.0, 1.0).normalize().unwrap();
        assert_relative_eq!(v.magnitude(), 1.0);
        assert_relative_eq!(v.x, -core::f64::consts::FRAC_1_SQRT_2);
    }

    #[test]
    fn canonical_axis_prefers_right_then_down() {
        assert_eq!(
            Vector::direction(-1.0, 2.0).canonical_axis(),
            Vector::direction(1.0, -2.0)
        );
        assert_eq!(
            Vector::direction(0.0, -1.0).canonical_axis(),
            Vector::direction(0.0, 1.0)
        );
        let folded = Vector::direction(-0.0, 1.0).canonical_axis();
        assert!(folded.x.is_sign_positive(), "negative zero must be folded");
    }

    #[test]
    fn lengths_split_planar_and_homogeneous() {
        let p = Vector::point(3.0, 4.0);
        assert_eq!(p.planar_length(), 5.0);
        assert_relative_eq!(p.magnitude(), 26.0_f64.sqrt());
        assert_eq!(p.dot(p), 26.0);
        assert_eq!(p.dot2(p), 25.0);
        assert_eq!(Vector::direction(0.0, 10.0).normalize().unwrap(), Vector::direction(0.0, 1.0));
    }

    #[test]
    fn kurbo_conversions() {
        let p: Vector = Point::new(2.0, 3.0).into();
        assert_eq!(p, Vector::point(2.0, 3.0));
        let d: Vector = Vec2::new(2.0, 3.0).into();
        assert_eq!(d, Vector::direction(2.0, 3.0));
        assert_eq!(p.to_point(), Point::new(2.0, 3.0));
    }
}
