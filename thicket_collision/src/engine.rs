// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pairwise SAT tests over tree nodes and the buffered sweep protocol.

use kurbo::Point;
use log::{debug, trace};
use thicket_math::sat::{self, Geometry, Projection};
use thicket_math::{MathError, Matrix, Scratch, Vector, VertexPool};
use thicket_scene::{Circle, NodeId, ShapeKind, Tree};

use crate::cache::ShapeCache;
use crate::config::{CollisionConfig, DegeneratePolicy};
use crate::cursor::PairCursor;
use crate::error::CollisionError;
use crate::info::CollisionInfo;

/// Narrow-phase collision detection between shapes of a [`Tree`].
///
/// Bare nodes (no shape) never collide and nothing collides with itself.
///
/// ## Buffering
///
/// [`buffer_shapes`](Self::buffer_shapes) snapshots the global geometry of a set of
/// shapes. Every query then uses the snapshot for buffered shapes, even if the tree
/// changed since; buffer a shape again to refresh it. The buffer also drives a sweep
/// over every unordered pair: [`next_collision_info`](Self::next_collision_info),
/// [`peek_at_next_collision`](Self::peek_at_next_collision), and
/// [`skip_next_collision`](Self::skip_next_collision).
#[derive(Debug, Default)]
pub struct CollisionEngine {
    config: CollisionConfig,
    buffer: Vec<NodeId>,
    cache: ShapeCache,
    cursor: PairCursor,
    scratch: Scratch,
    axes: Vec<Vector>,
}

impl CollisionEngine {
    /// An engine with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine with a custom configuration.
    pub fn with_config(config: CollisionConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    /// True if `a` and `b` overlap. Touching counts.
    ///
    /// A pair with no candidate axis follows [`CollisionConfig::degenerate`].
    pub fn test<S>(&mut self, tree: &Tree<S>, a: NodeId, b: NodeId) -> Result<bool, CollisionError> {
        let policy = self.config.degenerate;
        let hit = self.with_pair(tree, a, b, |ga, gb, axes| {
            sat::separation_axes(ga, gb, axes);
            if axes.is_empty() {
                return Ok::<bool, MathError>(policy == DegeneratePolicy::AssumeOverlap);
            }
            for &axis in axes.iter() {
                if !sat::project(ga, axis)?.overlaps(&sat::project(gb, axis)?) {
                    return Ok(false);
                }
            }
            Ok(true)
        })?;
        Ok(hit.transpose()?.unwrap_or(false))
    }

    /// Whether `a` and `b` collide, and if so by how much and in which direction.
    ///
    /// The penetration vector lies on the axis of least overlap and points the way
    /// `b` has to move to leave `a`.
    pub fn collision_info<S>(
        &mut self,
        tree: &Tree<S>,
        a: NodeId,
        b: NodeId,
    ) -> Result<CollisionInfo, CollisionError> {
        let config = self.config;
        let info = self.with_pair(tree, a, b, |ga, gb, axes| {
            measure(a, b, ga, gb, axes, &config)
        })?;
        Ok(info.transpose()?.unwrap_or_else(|| CollisionInfo::apart(a, b)))
    }

    /// True if the global `point` is inside `shape`, boundary included.
    pub fn is_point_in_shape<S>(
        &mut self,
        tree: &Tree<S>,
        point: Point,
        shape: NodeId,
    ) -> Result<bool, CollisionError> {
        let Self {
            cache,
            scratch,
            axes,
            ..
        } = self;
        let pool = &mut scratch.vertices;
        let Some(resolved) = resolve(tree, cache, pool, shape)? else {
            return Ok(false);
        };
        let inside = sat::point_in_shape(Vector::from(point), &resolved.geometry(), axes);
        resolved.release(pool);
        Ok(inside)
    }

    /// The canonical, de-duplicated candidate axes for a pair.
    ///
    /// Empty for bare nodes, for a node against itself, and for concentric circles.
    pub fn separation_axes<S>(
        &mut self,
        tree: &Tree<S>,
        a: NodeId,
        b: NodeId,
    ) -> Result<Vec<Vector>, CollisionError> {
        let axes = self.with_pair(tree, a, b, |ga, gb, axes| {
            sat::separation_axes(ga, gb, axes);
            axes.clone()
        })?;
        Ok(axes.unwrap_or_default())
    }

    /// Project `shape` onto `axis`; `None` for bare nodes.
    ///
    /// An axis with no planar length is rejected with
    /// [`MathError::ZeroLengthVector`](thicket_math::MathError::ZeroLengthVector).
    pub fn project_onto_axis<S>(
        &mut self,
        tree: &Tree<S>,
        shape: NodeId,
        axis: Vector,
    ) -> Result<Option<Projection>, CollisionError> {
        let Self { cache, scratch, .. } = self;
        let pool = &mut scratch.vertices;
        let Some(resolved) = resolve(tree, cache, pool, shape)? else {
            return Ok(None);
        };
        let projection = sat::project(&resolved.geometry(), axis);
        resolved.release(pool);
        Ok(Some(projection?))
    }

    /// Add shapes to the buffer and snapshot their global geometry.
    ///
    /// Bare nodes are skipped. Shapes already buffered keep their place and have
    /// their snapshot refreshed. Every id is checked before anything changes, and
    /// the sweep restarts from the first pair. On error, vertex lists taken for
    /// the rejected batch go back to the pool.
    pub fn buffer_shapes<S>(
        &mut self,
        tree: &Tree<S>,
        shapes: impl IntoIterator<Item = NodeId>,
    ) -> Result<(), CollisionError> {
        let pool = &mut self.scratch.vertices;
        let mut fresh = Vec::new();
        for id in shapes {
            match snapshot(tree, pool, id) {
                Ok(Some(snap)) => fresh.push(snap),
                Ok(None) => {}
                Err(e) => {
                    pool.recycle_all(fresh.into_iter().filter_map(|s| s.vertices));
                    return Err(e);
                }
            }
        }
        let count = fresh.len();
        for Snapshot {
            id,
            transform,
            position,
            vertices,
        } in fresh
        {
            if !self.buffer.contains(&id) {
                self.buffer.push(id);
            }
            self.cache
                .store(id, transform, position, vertices, &mut self.scratch.vertices);
        }
        self.cursor.reset();
        debug!(
            "buffered {count} shapes; buffer holds {} ({} pairs)",
            self.buffer.len(),
            self.remaining_pairs()
        );
        Ok(())
    }

    /// Remove shapes and their snapshots from the buffer. Unbuffered ids are ignored.
    ///
    /// The sweep restarts from the first pair.
    pub fn unbuffer_shapes(&mut self, shapes: impl IntoIterator<Item = NodeId>) {
        for id in shapes {
            if let Some(pos) = self.buffer.iter().position(|b| *b == id) {
                self.buffer.remove(pos);
            }
            self.cache.remove(id, &mut self.scratch.vertices);
        }
        self.cursor.reset();
        debug!("unbuffered shapes; buffer holds {}", self.buffer.len());
    }

    /// Empty the buffer and every snapshot.
    pub fn clear_buffer(&mut self) {
        self.buffer.clear();
        self.cache.clear(&mut self.scratch.vertices);
        self.cursor.reset();
        debug!("cleared collision buffer");
    }

    /// Test the pair under the sweep cursor and move on.
    ///
    /// Returns `Ok(None)` once every pair has been visited. The pair is consumed
    /// even when the test fails, so a sweep can continue past a removed node.
    pub fn next_collision_info<S>(
        &mut self,
        tree: &Tree<S>,
    ) -> Result<Option<CollisionInfo>, CollisionError> {
        let Some((a, b)) = self.peek_at_next_collision() else {
            return Ok(None);
        };
        self.cursor.advance();
        for id in [a, b] {
            if !tree.is_alive(id) {
                return Err(CollisionError::UnknownNode(id));
            }
        }
        let info = self.collision_info(tree, a, b)?;
        trace!("pair {a:?}/{b:?}: colliding={}", info.colliding);
        Ok(Some(info))
    }

    /// The pair under the sweep cursor, without testing it or moving on.
    pub fn peek_at_next_collision(&self) -> Option<(NodeId, NodeId)> {
        self.cursor
            .current(self.buffer.len())
            .map(|(i, j)| (self.buffer[i], self.buffer[j]))
    }

    /// Move past the pair under the sweep cursor without testing it.
    pub fn skip_next_collision(&mut self) {
        if let Some((a, b)) = self.peek_at_next_collision() {
            trace!("skipped pair {a:?}/{b:?}");
            self.cursor.advance();
        }
    }

    /// Pairs the sweep has yet to visit.
    pub fn remaining_pairs(&self) -> usize {
        self.cursor.remaining(self.buffer.len())
    }

    /// Buffered shapes in insertion order.
    pub fn buffer(&self) -> &[NodeId] {
        &self.buffer
    }

    /// Number of buffered shapes.
    pub fn buffer_len(&self) -> usize {
        self.buffer.len()
    }

    /// True if `id` is buffered.
    pub fn is_buffered(&self, id: NodeId) -> bool {
        self.buffer.contains(&id)
    }

    /// The snapshots behind the buffer.
    pub fn cache(&self) -> &ShapeCache {
        &self.cache
    }

    /// Snapshot of a buffered shape's global transform.
    pub fn cached_transform(&self, id: NodeId) -> Option<Matrix> {
        self.cache.transform(id)
    }

    /// Snapshot of a buffered shape's global position, for callers.
    ///
    /// Collision tests derive circle centers from the cached transform.
    pub fn cached_position(&self, id: NodeId) -> Option<Vector> {
        self.cache.position(id)
    }

    /// Snapshot of a buffered polygon's global vertices.
    pub fn cached_vertices(&self, id: NodeId) -> Option<&[Vector]> {
        self.cache.vertices(id)
    }

    /// The scratch pools.
    pub fn scratch(&self) -> &Scratch {
        &self.scratch
    }

    /// Drop every pooled scratch value. Buffered snapshots are kept.
    pub fn clear_pools(&mut self) {
        self.scratch.clear();
        self.axes = Vec::new();
    }

    /// Resolve both shapes and run `f` on their geometry.
    ///
    /// Yields `None` when `a == b` or either node is bare.
    fn with_pair<S, R>(
        &mut self,
        tree: &Tree<S>,
        a: NodeId,
        b: NodeId,
        f: impl FnOnce(&Geometry<'_>, &Geometry<'_>, &mut Vec<Vector>) -> R,
    ) -> Result<Option<R>, CollisionError> {
        tree.shape(a)?;
        tree.shape(b)?;
        if a == b {
            return Ok(None);
        }
        let Self {
            cache,
            scratch,
            axes,
            ..
        } = self;
        let pool = &mut scratch.vertices;
        let Some(ra) = resolve(tree, cache, pool, a)? else {
            return Ok(None);
        };
        let rb = match resolve(tree, cache, pool, b) {
            Ok(Some(rb)) => rb,
            Ok(None) => {
                ra.release(pool);
                return Ok(None);
            }
            Err(e) => {
                ra.release(pool);
                return Err(e);
            }
        };
        let out = f(&ra.geometry(), &rb.geometry(), axes);
        ra.release(pool);
        rb.release(pool);
        Ok(Some(out))
    }
}

/// Global geometry of one shape about to enter the buffer.
struct Snapshot {
    id: NodeId,
    transform: Matrix,
    position: Vector,
    vertices: Option<Vec<Vector>>,
}

/// Snapshot `id` from the live tree. `None` for bare nodes.
fn snapshot<S>(
    tree: &Tree<S>,
    pool: &mut VertexPool,
    id: NodeId,
) -> Result<Option<Snapshot>, CollisionError> {
    let Some(shape) = tree.shape(id)? else {
        return Ok(None);
    };
    let transform = tree.global_transform(id)?;
    let position = tree.global_position(id)?;
    let vertices = match shape.kind() {
        ShapeKind::Circle => None,
        ShapeKind::Polygon => Some(global_vertices(tree, pool, id)?),
    };
    Ok(Some(Snapshot {
        id,
        transform,
        position,
        vertices,
    }))
}

/// `id`'s global vertices in a pooled list. The list is recycled on error.
fn global_vertices<S>(
    tree: &Tree<S>,
    pool: &mut VertexPool,
    id: NodeId,
) -> Result<Vec<Vector>, CollisionError> {
    let mut v = pool.get();
    match tree.global_vertices_into(id, &mut v) {
        Ok(()) => Ok(v),
        Err(e) => {
            pool.recycle(v);
            Err(e.into())
        }
    }
}

/// Minimum-translation search over the candidate axes.
fn measure(
    a: NodeId,
    b: NodeId,
    ga: &Geometry<'_>,
    gb: &Geometry<'_>,
    axes: &mut Vec<Vector>,
    config: &CollisionConfig,
) -> Result<CollisionInfo, MathError> {
    let mut info = CollisionInfo::apart(a, b);
    sat::separation_axes(ga, gb, axes);
    if axes.is_empty() {
        info.colliding = config.degenerate == DegeneratePolicy::AssumeOverlap;
        return Ok(info);
    }
    let mut best: Option<(f64, Vector, bool)> = None;
    for &axis in axes.iter() {
        let pa = sat::project(ga, axis)?;
        let pb = sat::project(gb, axis)?;
        let overlap = pa.overlap(&pb);
        if overlap.is_nan() || overlap <= config.overlap_tolerance {
            return Ok(info);
        }
        if best.is_none_or(|(least, ..)| overlap < least) {
            best = Some((overlap, axis, pa.midpoint() > pb.midpoint()));
        }
    }
    if let Some((overlap, axis, flip)) = best {
        let axis = if flip { -axis } else { axis };
        info.colliding = true;
        info.overlap = Some(overlap);
        info.penetration = Some(axis * overlap);
    }
    Ok(info)
}

/// A polygon's global vertices, either borrowed from the buffer snapshot or
/// computed into a pooled list.
enum Vertices<'c> {
    Cached(&'c [Vector]),
    Pooled(Vec<Vector>),
}

enum Resolved<'c> {
    Circle { transform: Matrix, radius: f64 },
    Polygon(Vertices<'c>),
}

impl Resolved<'_> {
    fn geometry(&self) -> Geometry<'_> {
        match self {
            Self::Circle { transform, radius } => Geometry::Circle {
                transform: *transform,
                radius: *radius,
            },
            Self::Polygon(Vertices::Cached(v)) => Geometry::Polygon { vertices: v },
            Self::Polygon(Vertices::Pooled(v)) => Geometry::Polygon { vertices: v },
        }
    }

    fn release(self, pool: &mut VertexPool) {
        if let Self::Polygon(Vertices::Pooled(v)) = self {
            pool.recycle(v);
        }
    }
}

/// Global geometry of `id`, preferring the buffer snapshot. `None` for bare nodes.
fn resolve<'c, S>(
    tree: &Tree<S>,
    cache: &'c ShapeCache,
    pool: &mut VertexPool,
    id: NodeId,
) -> Result<Option<Resolved<'c>>, CollisionError> {
    let Some(shape) = tree.shape(id)? else {
        return Ok(None);
    };
    match shape.kind() {
        ShapeKind::Circle => {
            let transform = match cache.transform(id) {
                Some(m) => m,
                None => tree.global_transform(id)?,
            };
            let radius = shape.as_circle().map_or(0.0, Circle::radius);
            Ok(Some(Resolved::Circle { transform, radius }))
        }
        ShapeKind::Polygon => {
            if let Some(v) = cache.vertices(id) {
                return Ok(Some(Resolved::Polygon(Vertices::Cached(v))));
            }
            let v = global_vertices(tree, pool, id)?;
            Ok(Some(Resolved::Polygon(Vertices::Pooled(v))))
        }
    }
}
