// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thicket_math::MathError;
use thicket_scene::{NodeId, SceneError};
use thiserror::Error;

/// Failures surfaced by the [`CollisionEngine`](crate::CollisionEngine).
#[derive(Clone, Debug, PartialEq, Error)]
pub enum CollisionError {
    /// A scene lookup failed.
    #[error(transparent)]
    Scene(#[from] SceneError),
    /// Degenerate geometry.
    #[error(transparent)]
    Math(#[from] MathError),
    /// A buffered id no longer refers to a live node.
    #[error("buffered node {0:?} is no longer in the tree")]
    UnknownNode(NodeId),
}
