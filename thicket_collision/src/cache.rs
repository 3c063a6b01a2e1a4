// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-shape global geometry captured at buffering time.

use std::collections::HashMap;

use thicket_math::{Matrix, Vector, VertexPool};
use thicket_scene::NodeId;

/// Global transform, position, and (for polygons) vertices keyed by node.
///
/// Entries are written by [`buffer_shapes`](crate::CollisionEngine::buffer_shapes)
/// and only change when the shape is buffered again. Vertex lists come from and
/// return to a [`VertexPool`].
///
/// Positions are kept for callers only; collision tests never read them. A
/// circle's center comes from its cached transform instead.
#[derive(Clone, Debug, Default)]
pub struct ShapeCache {
    transforms: HashMap<NodeId, Matrix>,
    positions: HashMap<NodeId, Vector>,
    vertices: HashMap<NodeId, Vec<Vector>>,
}

impl ShapeCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store fresh geometry for `id`, recycling any vertex list it replaces.
    pub fn store(
        &mut self,
        id: NodeId,
        transform: Matrix,
        position: Vector,
        vertices: Option<Vec<Vector>>,
        pool: &mut VertexPool,
    ) {
        self.transforms.insert(id, transform);
        self.positions.insert(id, position);
        let old = match vertices {
            Some(v) => self.vertices.insert(id, v),
            None => self.vertices.remove(&id),
        };
        if let Some(old) = old {
            pool.recycle(old);
        }
    }

    /// Forget `id`, recycling its vertex list.
    pub fn remove(&mut self, id: NodeId, pool: &mut VertexPool) {
        self.transforms.remove(&id);
        self.positions.remove(&id);
        if let Some(old) = self.vertices.remove(&id) {
            pool.recycle(old);
        }
    }

    /// Forget everything, recycling every vertex list.
    pub fn clear(&mut self, pool: &mut VertexPool) {
        self.transforms.clear();
        self.positions.clear();
        pool.recycle_all(self.vertices.drain().map(|(_, v)| v));
    }

    /// Cached global transform.
    pub fn transform(&self, id: NodeId) -> Option<Matrix> {
        self.transforms.get(&id).copied()
    }

    /// Cached global position. Not used by the collision tests themselves.
    pub fn position(&self, id: NodeId) -> Option<Vector> {
        self.positions.get(&id).copied()
    }

    /// Cached global vertices.
    pub fn vertices(&self, id: NodeId) -> Option<&[Vector]> {
        self.vertices.get(&id).map(Vec::as_slice)
    }

    /// Number of entries in the transform, position, and vertex maps.
    pub fn sizes(&self) -> (usize, usize, usize) {
        (self.transforms.len(), self.positions.len(), self.vertices.len())
    }

    /// True if all three maps are empty.
    pub fn is_empty(&self) -> bool {
        self.sizes() == (0, 0, 0)
    }
}
