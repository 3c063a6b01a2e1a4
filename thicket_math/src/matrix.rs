// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row-major 3x3 matrices for 2D affine transforms.

use core::ops::{Mul, MulAssign};

use kurbo::{Affine, Vec2};

use crate::error::MathError;
use crate::vector::Vector;

/// A 3x3 affine transform, addressed row-major.
///
/// Matrices act on column vectors: `m * v` transforms `v`, and `a * b` applies
/// `b` first, then `a`. The bottom row is always `(0, 0, 1)`; the six free
/// entries live in a [`kurbo::Affine`], which does the composition and inversion.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Matrix(Affine);

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix {
    /// The identity matrix.
    pub const IDENTITY: Self = Self(Affine::IDENTITY);

    /// Build a matrix from its top two rows; the third row is `(0, 0, 1)`.
    pub const fn from_rows(r0: [f64; 3], r1: [f64; 3]) -> Self {
        Self(Affine::new([r0[0], r1[0], r0[1], r1[1], r0[2], r1[2]]))
    }

    /// Translation by `(x, y)`.
    pub const fn translation(x: f64, y: f64) -> Self {
        Self::from_rows([1.0, 0.0, x], [0.0, 1.0, y])
    }

    /// Axis scaling by `(x, y)`.
    pub const fn scaling(x: f64, y: f64) -> Self {
        Self::from_rows([x, 0.0, 0.0], [0.0, y, 0.0])
    }

    /// Rotation from a precomputed cosine and sine.
    ///
    /// Maps `(x, y)` to `(x·cos + y·sin, −x·sin + y·cos)`.
    pub const fn rotation(cos: f64, sin: f64) -> Self {
        Self::from_rows([cos, sin, 0.0], [-sin, cos, 0.0])
    }

    /// Entry at `(row, col)`.
    ///
    /// Panics if either index is out of `0..3`.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < 3 && col < 3, "matrix index ({row}, {col}) out of range");
        let [a, b, c, d, e, f] = self.0.as_coeffs();
        [[a, c, e], [b, d, f], [0.0, 0.0, 1.0]][row][col]
    }

    /// Overwrite the entry at `(row, col)`.
    ///
    /// Panics if `row` is not 0 or 1 or `col` is out of `0..3`; the bottom row is fixed.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        assert!(row < 2 && col < 3, "matrix index ({row}, {col}) is not writable");
        let mut coeffs = self.0.as_coeffs();
        coeffs[col * 2 + row] = value;
        self.0 = Affine::new(coeffs);
    }

    /// Reset to identity in place.
    pub fn set_identity(&mut self) {
        *self = Self::IDENTITY;
    }

    /// True if this is exactly the identity.
    pub fn is_identity(&self) -> bool {
        self.0 == Affine::IDENTITY
    }

    /// Determinant.
    pub fn determinant(&self) -> f64 {
        self.0.determinant()
    }

    /// Inverse, or [`MathError::SingularMatrix`] when none exists.
    pub fn inverse(&self) -> Result<Self, MathError> {
        let determinant = self.determinant();
        if determinant == 0.0 || !determinant.is_finite() {
            return Err(MathError::SingularMatrix { determinant });
        }
        Ok(Self(self.0.inverse()))
    }

    /// Transform `v` as a point: `z` is forced to 1 on input and to 0 on output.
    pub fn transform_point(&self, v: Vector) -> Vector {
        let p = self.0 * v.to_point();
        Vector::direction(p.x, p.y)
    }

    /// Transform `v` by the inverse of this matrix, as a point.
    pub fn untransform_point(&self, v: Vector) -> Result<Vector, MathError> {
        Ok(self.inverse()?.transform_point(v))
    }

    /// Transform `v` as a direction: translation is ignored.
    pub fn transform_direction(&self, v: Vector) -> Vector {
        let p = self.linear() * v.to_point();
        Vector::direction(p.x, p.y)
    }

    /// Apply the transpose of the upper-left 2x2 block to `v`.
    ///
    /// This pulls a global axis back into local space the way surface normals
    /// are transformed.
    pub fn transpose_linear_apply(&self, v: Vector) -> Vector {
        let [a, b, c, d, ..] = self.0.as_coeffs();
        let p = Affine::new([a, c, b, d, 0.0, 0.0]) * v.to_point();
        Vector::direction(p.x, p.y)
    }

    /// The six free entries in kurbo order `[a, b, c, d, e, f]`.
    pub fn as_coeffs(&self) -> [f64; 6] {
        self.0.as_coeffs()
    }

    /// The equivalent kurbo affine.
    pub fn to_affine(&self) -> Affine {
        self.0
    }

    /// Build from a kurbo affine.
    pub const fn from_affine(affine: Affine) -> Self {
        Self(affine)
    }

    fn linear(&self) -> Affine {
        self.0.with_translation(Vec2::ZERO)
    }
}

impl From<Affine> for Matrix {
    fn from(affine: Affine) -> Self {
        Self(affine)
    }
}

impl From<Matrix> for Affine {
    fn from(m: Matrix) -> Self {
        m.0
    }
}

impl Mul for Matrix {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self(self.0 * rhs.0)
    }
}

impl MulAssign for Matrix {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Mul<Vector> for Matrix {
    type Output = Vector;

    /// Full homogeneous product: the translation is weighted by `v.z`.
    fn mul(self, v: Vector) -> Vector {
        let planar = (self.linear() * v.to_point()).to_vec2() + self.0.translation() * v.z;
        Vector::new(planar.x, planar.y, v.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use kurbo::{Point, Vec2};

    #[test]
    fn composition_applies_right_to_left() {
        let t = Matrix::translation(10.0, 0.0);
        let s = Matrix::scaling(2.0, 2.0);
        let p = Vector::point(1.0, 1.0);
        assert_eq!((t * s).transform_point(p), Vector::direction(12.0, 2.0));
        assert_eq!((s * t).transform_point(p), Vector::direction(22.0, 2.0));
    }

    #[test]
    fn rotation_quarter_turn() {
        let r = Matrix::rotation(0.0, 1.0);
        let p = r.transform_point(Vector::point(1.0, 0.0));
        assert_eq!(p, Vector::direction(0.0, -1.0));
    }

    #[test]
    fn inverse_round_trips() {
        let m = Matrix::translation(3.0, -4.0) * Matrix::rotation(0.6, 0.8) * Matrix::scaling(2.0, 0.5);
        let inv = m.inverse().unwrap();
        let id = m * inv;
        for row in 0..3 {
            for col in 0..3 {
                let expected = if row == col { 1.0 } else { 0.0 };
                assert_relative_eq!(id.get(row, col), expected, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn singular_matrix_is_rejected() {
        let m = Matrix::scaling(0.0, 1.0);
        assert!(matches!(
            m.inverse(),
            Err(MathError::SingularMatrix { .. })
        ));
        assert!(m.untransform_point(Vector::point(1.0, 1.0)).is_err());
    }

    #[test]
    fn directions_ignore_translation() {
        let m = Matrix::translation(100.0, 100.0) * Matrix::scaling(2.0, 3.0);
        assert_eq!(
            m.transform_direction(Vector::direction(1.0, 1.0)),
            Vector::direction(2.0, 3.0)
        );
    }

    #[test]
    fn transpose_linear_apply_uses_columns() {
        let m = Matrix::from_rows([1.0, 2.0, 9.0], [3.0, 4.0, 9.0]);
        assert_eq!(
            m.transpose_linear_apply(Vector::direction(1.0, 0.0)),
            Vector::direction(1.0, 2.0)
        );
    }

    #[test]
    fn entries_read_row_major() {
        let mut m = Matrix::from_rows([1.0, 2.0, 3.0], [4.0, 5.0, 6.0]);
        assert_eq!(m.get(0, 1), 2.0);
        assert_eq!(m.get(1, 2), 6.0);
        assert_eq!(m.get(2, 2), 1.0);
        assert_eq!(m.as_coeffs(), [1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
        m.set(1, 0, -4.0);
        assert_eq!(m.get(1, 0), -4.0);
        assert_relative_eq!(m.determinant(), 1.0 * 5.0 - 2.0 * -4.0);
    }

    #[test]
    fn homogeneous_product_weights_translation() {
        let m = Matrix::translation(10.0, 20.0) * Matrix::scaling(2.0, 3.0);
        assert_eq!(m * Vector::point(1.0, 1.0), Vector::new(12.0, 23.0, 1.0));
        assert_eq!(m * Vector::direction(1.0, 1.0), Vector::direction(2.0, 3.0));
    }

    #[test]
    fn affine_interop_matches() {
        let m = Matrix::translation(5.0, 7.0) * Matrix::rotation(0.6, 0.8);
        let a = m.to_affine();
        let p = a * Point::new(1.0, 2.0);
        let q = m.transform_point(Vector::point(1.0, 2.0));
        assert_relative_eq!(p.x, q.x);
        assert_relative_eq!(p.y, q.y);
        assert_eq!(Matrix::from_affine(a), m);
        let t = Matrix::from(Affine::translate(Vec2::new(1.0, 2.0)));
        assert_eq!(t, Matrix::translation(1.0, 2.0));
    }
}
