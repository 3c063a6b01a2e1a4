// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thicket_math::Vector;
use thicket_scene::NodeId;

/// Result of a detailed pairwise test.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CollisionInfo {
    /// The pair tested, in argument order.
    pub shapes: (NodeId, NodeId),
    /// Whether the shapes overlap by more than the configured tolerance.
    pub colliding: bool,
    /// Depth along the minimum-translation axis, when one exists.
    pub overlap: Option<f64>,
    /// Unit minimum-translation axis times `overlap`.
    ///
    /// Adding it to the second shape's position separates the pair.
    pub penetration: Option<Vector>,
}

impl CollisionInfo {
    pub(crate) fn apart(a: NodeId, b: NodeId) -> Self {
        Self {
            shapes: (a, b),
            colliding: false,
            overlap: None,
            penetration: None,
        }
    }
}
