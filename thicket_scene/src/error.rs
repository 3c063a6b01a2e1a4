// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised by scene mutation and geometry queries.

use thicket_math::MathError;
use thiserror::Error;

use crate::types::NodeId;

/// Failures surfaced by [`Tree`](crate::Tree), [`Transform`](crate::Transform), and the shapes.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SceneError {
    /// An argument had the wrong range, arity, or was not finite.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The requested link would break the parent/child invariants.
    #[error("ancestry violation: {0}")]
    Ancestry(&'static str),
    /// The id does not refer to a live node.
    #[error("unknown or removed node {0:?}")]
    UnknownNode(NodeId),
    /// Degenerate geometry, such as inverting a singular transform.
    #[error(transparent)]
    Math(#[from] MathError),
}

impl SceneError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}
