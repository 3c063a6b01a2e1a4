// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node affine transform with a lazily recomposed matrix.

use core::cell::Cell;

use kurbo::Vec2;
use thicket_math::{Matrix, Vector, exact_sin_cos};

use crate::error::SceneError;

/// A two-axis scale factor.
///
/// Built from a single `f64` (applied to both axes), a [`Vec2`], or an `(x, y)` tuple.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Scale {
    /// Horizontal factor.
    pub x: f64,
    /// Vertical factor.
    pub y: f64,
}

impl Scale {
    /// No scaling.
    pub const ONE: Self = Self { x: 1.0, y: 1.0 };

    /// Create a scale from its two factors.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::ONE
    }
}

impl From<f64> for Scale {
    fn from(s: f64) -> Self {
        Self::new(s, s)
    }
}

impl From<Vec2> for Scale {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<(f64, f64)> for Scale {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    struct Dirty: u8 {
        const CENTER      = 0b0000_0001;
        const SCALE       = 0b0000_0010;
        const ROTATION    = 0b0000_0100;
        const TRANSLATION = 0b0000_1000;
        const COMPOSED    = 0b0001_0000;
    }
}

/// Center, scale, rotation, and translation of one node.
///
/// The composed matrix is `T · R · S · C`: a point is shifted by minus the center,
/// then scaled, rotated, and translated. Each component keeps its own sub-matrix
/// with a dirty bit, and [`to_matrix`](Self::to_matrix) only rebuilds what changed.
#[derive(Clone)]
pub struct Transform {
    center: Vec2,
    scale: Scale,
    rotation: f64,
    translation: Vec2,

    center_matrix: Cell<Matrix>,
    scale_matrix: Cell<Matrix>,
    rotation_matrix: Cell<Matrix>,
    translation_matrix: Cell<Matrix>,
    composed: Cell<Matrix>,
    dirty: Cell<Dirty>,
}

impl core::fmt::Debug for Transform {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Transform")
            .field("center", &self.center)
            .field("scale", &self.scale)
            .field("rotation", &self.rotation)
            .field("translation", &self.translation)
            .field("dirty", &!self.dirty.get().is_empty())
            .finish_non_exhaustive()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform {
    /// The identity transform.
    pub fn new() -> Self {
        Self {
            center: Vec2::ZERO,
            scale: Scale::ONE,
            rotation: 0.0,
            translation: Vec2::ZERO,
            center_matrix: Cell::new(Matrix::IDENTITY),
            scale_matrix: Cell::new(Matrix::IDENTITY),
            rotation_matrix: Cell::new(Matrix::IDENTITY),
            translation_matrix: Cell::new(Matrix::IDENTITY),
            composed: Cell::new(Matrix::IDENTITY),
            dirty: Cell::new(Dirty::empty()),
        }
    }

    /// Restore the identity transform.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Pivot point in local space.
    pub fn center(&self) -> Vec2 {
        self.center
    }

    /// Scale factors.
    pub fn scale(&self) -> Scale {
        self.scale
    }

    /// Rotation in radians.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Translation.
    pub fn translation(&self) -> Vec2 {
        self.translation
    }

    /// Horizontal translation.
    pub fn x(&self) -> f64 {
        self.translation.x
    }

    /// Vertical translation.
    pub fn y(&self) -> f64 {
        self.translation.y
    }

    /// Set the pivot point.
    pub fn set_center(&mut self, center: impl Into<Vec2>) -> Result<(), SceneError> {
        let center = center.into();
        finite_pair("center", center.x, center.y)?;
        self.center = center;
        self.mark(Dirty::CENTER);
        Ok(())
    }

    /// Set the horizontal component of the pivot.
    pub fn set_center_x(&mut self, x: f64) -> Result<(), SceneError> {
        self.set_center(Vec2::new(x, self.center.y))
    }

    /// Set the vertical component of the pivot.
    pub fn set_center_y(&mut self, y: f64) -> Result<(), SceneError> {
        self.set_center(Vec2::new(self.center.x, y))
    }

    /// Set the scale from a scalar (both axes) or a pair.
    pub fn set_scale(&mut self, scale: impl Into<Scale>) -> Result<(), SceneError> {
        let scale = scale.into();
        finite_pair("scale", scale.x, scale.y)?;
        self.scale = scale;
        self.mark(Dirty::SCALE);
        Ok(())
    }

    /// Set the horizontal scale factor.
    pub fn set_scale_x(&mut self, x: f64) -> Result<(), SceneError> {
        self.set_scale((x, self.scale.y))
    }

    /// Set the vertical scale factor.
    pub fn set_scale_y(&mut self, y: f64) -> Result<(), SceneError> {
        self.set_scale((self.scale.x, y))
    }

    /// Set the rotation in radians.
    pub fn set_rotation(&mut self, radians: f64) -> Result<(), SceneError> {
        if !radians.is_finite() {
            return Err(SceneError::invalid(format!(
                "rotation must be finite, got {radians}"
            )));
        }
        self.rotation = radians;
        self.mark(Dirty::ROTATION);
        Ok(())
    }

    /// Set the translation.
    pub fn set_translation(&mut self, translation: impl Into<Vec2>) -> Result<(), SceneError> {
        let translation = translation.into();
        finite_pair("translation", translation.x, translation.y)?;
        self.translation = translation;
        self.mark(Dirty::TRANSLATION);
        Ok(())
    }

    /// Set the horizontal translation.
    pub fn set_x(&mut self, x: f64) -> Result<(), SceneError> {
        self.set_translation(Vec2::new(x, self.translation.y))
    }

    /// Set the vertical translation.
    pub fn set_y(&mut self, y: f64) -> Result<(), SceneError> {
        self.set_translation(Vec2::new(self.translation.x, y))
    }

    /// True if a mutation happened since the last [`to_matrix`](Self::to_matrix).
    pub fn is_dirty(&self) -> bool {
        !self.dirty.get().is_empty()
    }

    /// The composed matrix `T · R · S · C`.
    ///
    /// Rebuilds only the sub-matrices whose component changed. Two calls with no
    /// mutation in between return bit-identical results.
    pub fn to_matrix(&self) -> Matrix {
        let dirty = self.dirty.get();
        if dirty.is_empty() {
            return self.composed.get();
        }
        if dirty.contains(Dirty::CENTER) {
            self.center_matrix
                .set(Matrix::translation(-self.center.x, -self.center.y));
        }
        if dirty.contains(Dirty::SCALE) {
            self.scale_matrix
                .set(Matrix::scaling(self.scale.x, self.scale.y));
        }
        if dirty.contains(Dirty::ROTATION) {
            let (sin, cos) = exact_sin_cos(self.rotation);
            self.rotation_matrix.set(Matrix::rotation(cos, sin));
        }
        if dirty.contains(Dirty::TRANSLATION) {
            self.translation_matrix
                .set(Matrix::translation(self.translation.x, self.translation.y));
        }
        let composed = self.translation_matrix.get()
            * self.rotation_matrix.get()
            * self.scale_matrix.get()
            * self.center_matrix.get();
        self.composed.set(composed);
        self.dirty.set(Dirty::empty());
        composed
    }

    /// Apply the transform to `point` (treated as a point).
    pub fn transform_point(&self, point: Vector) -> Vector {
        self.to_matrix().transform_point(point)
    }

    /// Apply the inverse transform to `point`.
    ///
    /// Fails when the transform is singular, for example with a zero scale factor.
    pub fn untransform_point(&self, point: Vector) -> Result<Vector, SceneError> {
        Ok(self.to_matrix().untransform_point(point)?)
    }

    fn mark(&mut self, component: Dirty) {
        self.dirty.set(self.dirty.get() | component | Dirty::COMPOSED);
    }
}

fn finite_pair(what: &str, x: f64, y: f64) -> Result<(), SceneError> {
    if x.is_finite() && y.is_finite() {
        Ok(())
    } else {
        Err(SceneError::invalid(format!(
            "{what} must be finite, got ({x}, {y})"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use core::f64::consts::FRAC_PI_2;
    use proptest::prelude::*;

    fn finite() -> impl Strategy<Value = f64> {
        -1.0e3..1.0e3
    }

    fn non_degenerate_scale() -> impl Strategy<Value = f64> {
        prop_oneof![0.1..10.0, -10.0..-0.1]
    }

    fn assert_round_trip(t: &Transform, px: f64, py: f64) {
        let back = t.untransform_point(t.transform_point(Vector::point(px, py))).unwrap();
        assert_abs_diff_eq!(back.x, px, epsilon = 1e-6);
        assert_abs_diff_eq!(back.y, py, epsilon = 1e-6);
        let pushed = t.transform_point(t.untransform_point(Vector::point(px, py)).unwrap());
        assert_abs_diff_eq!(pushed.x, px, epsilon = 1e-6);
        assert_abs_diff_eq!(pushed.y, py, epsilon = 1e-6);
    }

    proptest! {
        #[test]
        fn round_trips_through_lazy_composition(
            px in finite(), py in finite(),
            cx in finite(), cy in finite(),
            sx in non_degenerate_scale(), sy in non_degenerate_scale(),
            angle in -10.0..10.0_f64,
            turn in -10.0..10.0_f64,
            tx in finite(), ty in finite(),
        ) {
            let mut t = Transform::new();
            t.set_center((cx, cy)).unwrap();
            t.set_scale((sx, sy)).unwrap();
            t.set_rotation(angle).unwrap();
            t.set_translation((tx, ty)).unwrap();
            assert_round_trip(&t, px, py);
            prop_assert!(!t.is_dirty());

            // Only the rotation sub-matrix is rebuilt; the result must match a
            // transform composed from scratch.
            t.set_rotation(turn).unwrap();
            prop_assert!(t.is_dirty());
            assert_round_trip(&t, px, py);
            let mut fresh = Transform::new();
            fresh.set_center((cx, cy)).unwrap();
            fresh.set_scale((sx, sy)).unwrap();
            fresh.set_rotation(turn).unwrap();
            fresh.set_translation((tx, ty)).unwrap();
            prop_assert_eq!(t.to_matrix(), fresh.to_matrix());
        }
    }

    #[test]
    fn composition_order_fixture() {
        let mut t = Transform::new();
        t.set_center((10.0, 20.0)).unwrap();
        t.set_scale((2.0, 0.5)).unwrap();
        t.set_rotation(FRAC_PI_2).unwrap();
        t.set_translation((1024.0, 768.0)).unwrap();
        assert_eq!(
            t.transform_point(Vector::point(0.0, -50.0)),
            Vector::direction(989.0, 788.0)
        );
        assert_eq!(
            t.untransform_point(Vector::point(989.0, 788.0)).unwrap(),
            Vector::direction(0.0, -50.0)
        );
    }

    #[test]
    fn cached_matrix_is_stable_until_mutated() {
        let mut t = Transform::new();
        t.set_rotation(0.3).unwrap();
        t.set_translation((4.0, 5.0)).unwrap();
        assert!(t.is_dirty());
        let a = t.to_matrix();
        assert!(!t.is_dirty());
        let b = t.to_matrix();
        assert_eq!(a.as_coeffs(), b.as_coeffs());

        t.set_rotation(FRAC_PI_2).unwrap();
        let c = t.to_matrix();
        assert_ne!(a, c);
        let expected = Matrix::translation(4.0, 5.0) * Matrix::rotation(0.0, 1.0);
        assert_eq!(c, expected);
    }

    #[test]
    fn scalar_scale_broadcasts() {
        let mut t = Transform::new();
        t.set_scale(3.0).unwrap();
        assert_eq!(t.scale(), Scale::new(3.0, 3.0));
        t.set_scale_y(0.5).unwrap();
        assert_eq!(t.scale(), Scale::new(3.0, 0.5));
        t.set_scale(Vec2::new(1.0, 2.0)).unwrap();
        assert_eq!(t.scale(), Scale::new(1.0, 2.0));
    }

    #[test]
    fn per_axis_setters_keep_the_other_axis() {
        let mut t = Transform::new();
        t.set_translation((1.0, 2.0)).unwrap();
        t.set_x(7.0).unwrap();
        assert_eq!(t.translation(), Vec2::new(7.0, 2.0));
        t.set_y(8.0).unwrap();
        assert_eq!((t.x(), t.y()), (7.0, 8.0));
        t.set_center_x(3.0).unwrap();
        t.set_center_y(4.0).unwrap();
        assert_eq!(t.center(), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let mut t = Transform::new();
        assert!(matches!(
            t.set_rotation(f64::NAN),
            Err(SceneError::InvalidArgument(_))
        ));
        assert!(t.set_rotation(f64::INFINITY).is_err());
        assert!(t.set_scale(f64::NAN).is_err());
        assert!(t.set_center((0.0, f64::NEG_INFINITY)).is_err());
        assert!(t.set_translation((f64::NAN, 0.0)).is_err());
        assert!(t.to_matrix().is_identity(), "rejected input must not stick");
    }

    #[test]
    fn singular_transform_cannot_be_inverted() {
        let mut t = Transform::new();
        t.set_scale(0.0).unwrap();
        assert!(matches!(
            t.untransform_point(Vector::point(1.0, 1.0)),
            Err(SceneError::Math(_))
        ));
    }

    #[test]
    fn reset_restores_identity() {
        let mut t = Transform::new();
        t.set_translation((5.0, 5.0)).unwrap();
        t.set_scale(2.0).unwrap();
        let _ = t.to_matrix();
        t.reset();
        assert!(t.to_matrix().is_identity());
        assert_eq!(t.scale(), Scale::ONE);
    }
}
