// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type shared by the vector, matrix, and separating-axis routines.

use thiserror::Error;

/// Degenerate geometry handed to an operation that needs a direction or an inverse.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum MathError {
    /// A zero-length vector was passed where a direction is required.
    #[error("cannot derive a direction from a zero-length vector")]
    ZeroLengthVector,
    /// The matrix has no inverse.
    #[error("matrix is not invertible (determinant {determinant})")]
    SingularMatrix {
        /// Determinant of the rejected matrix.
        determinant: f64,
    },
}
