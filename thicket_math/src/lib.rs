// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thicket Math: homogeneous 2D vectors and matrices, recycling pools, and separating-axis primitives.
//!
//! This is the leaf crate of the Thicket workspace. It has no notion of scene nodes; it only
//! knows about numbers laid out as points, directions, and affine transforms.
//!
//! - [`Vector`]: a 3-component homogeneous point (`z == 1`) or direction (`z == 0`).
//! - [`Matrix`]: a row-major 3x3 affine transform acting on column vectors.
//! - [`exact_sin_cos`]: sine and cosine that are exact on the four axis-aligned angles.
//! - [`Pool`], [`VectorPool`], [`MatrixPool`], [`VertexPool`], and [`Scratch`]: explicit
//!   recycling pools for hot geometric paths.
//! - [`sat`]: axis enumeration, projection, and point-in-shape over resolved [`Geometry`].
//!
//! ## Conventions
//!
//! `a * b` applies `b` first. A node transform is composed as `T · R · S · C`, where `C`
//! shifts by minus the pivot, and a global transform is `parent_global · own`.
//!
//! Rotation by `θ` maps `(x, y)` to `(x·cosθ + y·sinθ, −x·sinθ + y·cosθ)`.
//!
//! ## Kurbo interop
//!
//! [`Vector`] converts from `kurbo::Point` (as a point) and `kurbo::Vec2` (as a direction),
//! and [`Matrix`] converts to and from `kurbo::Affine`.
//!
//! ## Example
//!
//! ```
//! use thicket_math::{exact_sin_cos, Matrix, Vector};
//! use core::f64::consts::FRAC_PI_2;
//!
//! let (sin, cos) = exact_sin_cos(FRAC_PI_2);
//! let m = Matrix::translation(1024.0, 768.0)
//!     * Matrix::rotation(cos, sin)
//!     * Matrix::scaling(2.0, 0.5)
//!     * Matrix::translation(-10.0, -20.0);
//!
//! let p = m.transform_point(Vector::point(0.0, -50.0));
//! assert_eq!(p, Vector::direction(989.0, 788.0));
//! assert_eq!(m.untransform_point(p).unwrap(), Vector::direction(0.0, -50.0));
//! ```

mod error;
mod matrix;
mod pool;
pub mod sat;
mod trig;
mod vector;

pub use error::MathError;
pub use matrix::Matrix;
pub use pool::{MatrixPool, Pool, Recycle, Scratch, VectorPool, VertexPool};
pub use sat::{AXIS_EPSILON, Geometry, Projection};
pub use trig::exact_sin_cos;
pub use vector::Vector;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    fn finite() -> impl Strategy<Value = f64> {
        -1.0e3..1.0e3
    }

    fn non_degenerate_scale() -> impl Strategy<Value = f64> {
        prop_oneof![0.1..10.0, -10.0..-0.1]
    }

    proptest! {
        #[test]
        fn transform_round_trips(
            px in finite(), py in finite(),
            cx in finite(), cy in finite(),
            sx in non_degenerate_scale(), sy in non_degenerate_scale(),
            angle in -10.0..10.0_f64,
            tx in finite(), ty in finite(),
        ) {
            let (sin, cos) = exact_sin_cos(angle);
            let m = Matrix::translation(tx, ty)
                * Matrix::rotation(cos, sin)
                * Matrix::scaling(sx, sy)
                * Matrix::translation(-cx, -cy);
            let p = Vector::point(px, py);

            let there = m.transform_point(p);
            let back = m.untransform_point(there).unwrap();
            assert_abs_diff_eq!(back.x, px, epsilon = 1e-6);
            assert_abs_diff_eq!(back.y, py, epsilon = 1e-6);
            prop_assert_eq!(back.z, 0.0);

            let pulled = m.untransform_point(p).unwrap();
            let pushed = m.transform_point(pulled);
            assert_abs_diff_eq!(pushed.x, px, epsilon = 1e-6);
            assert_abs_diff_eq!(pushed.y, py, epsilon = 1e-6);
        }
    }

    #[test]
    fn composition_fixture_is_exact() {
        let (sin, cos) = exact_sin_cos(core::f64::consts::FRAC_PI_2);
        let m = Matrix::translation(1024.0, 768.0)
            * Matrix::rotation(cos, sin)
            * Matrix::scaling(2.0, 0.5)
            * Matrix::translation(-10.0, -20.0);
        assert_eq!(
            m.transform_point(Vector::point(0.0, -50.0)),
            Vector::direction(989.0, 788.0)
        );
    }
}
