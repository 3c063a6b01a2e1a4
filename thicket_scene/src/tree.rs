// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: node arena, hierarchy updates, drawing, and queries.

use kurbo::Point;
use log::trace;
use thicket_math::sat::{self, Geometry};
use thicket_math::{Matrix, Vector, VertexPool};

use crate::error::SceneError;
use crate::shape::Shape;
use crate::surface::{DrawList, Surface};
use crate::transform::Transform;
use crate::types::{Color, NodeFlags, NodeId};

/// Arena of scene nodes plus the surface they draw to.
///
/// Nodes are inserted standalone and linked with [`add_child`](Self::add_child).
/// A node owns its [`Transform`], an optional [`Shape`], a [`Color`], and
/// [`NodeFlags`]. A parent's child list is authoritative; the child's parent id
/// always agrees with it.
pub struct Tree<S = DrawList> {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    surface: S,
}

impl<S> core::fmt::Debug for Tree<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .finish_non_exhaustive()
    }
}

impl Default for Tree<DrawList> {
    fn default() -> Self {
        Self::new(DrawList::new())
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    transform: Transform,
    shape: Option<Shape>,
    color: Color,
    flags: NodeFlags,
}

impl Node {
    fn new(generation: u32, shape: Option<Shape>) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
            shape,
            color: Color::default(),
            flags: NodeFlags::default(),
        }
    }
}

impl<S> Tree<S> {
    /// Create an empty tree drawing to `surface`.
    pub fn new(surface: S) -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            surface,
        }
    }

    /// The surface handed in at construction.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface, for example to drain a [`DrawList`].
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// True if no node is alive.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert a bare node with no shape. It draws nothing and is never hit.
    pub fn insert_actor(&mut self) -> NodeId {
        self.insert(None)
    }

    /// Insert a node carrying `shape`.
    pub fn insert_shape(&mut self, shape: impl Into<Shape>) -> NodeId {
        self.insert(Some(shape.into()))
    }

    fn insert(&mut self, shape: Option<Shape>) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, shape));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, shape)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        NodeId::new(idx, generation)
    }

    /// Remove a node and its whole subtree, detaching it from its parent first.
    ///
    /// Freed slots are reused with a bumped generation, so `id` and the ids of
    /// every removed descendant become stale.
    pub fn remove(&mut self, id: NodeId) -> Result<(), SceneError> {
        if let Some(parent) = self.node(id)?.parent {
            self.unlink_parent(id, parent)?;
        }
        self.free_subtree(id);
        Ok(())
    }

    fn free_subtree(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get_mut(id.idx()).and_then(Option::take) else {
            return;
        };
        self.free_list.push(id.idx());
        for child in node.children {
            self.free_subtree(child);
        }
    }

    /// Returns true if `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .is_some_and(|n| n.generation == id.1)
    }

    /// Make `child` the last child of `parent`.
    ///
    /// Does nothing if `child` already belongs to `parent`. Fails with
    /// [`SceneError::Ancestry`] if `child` is `parent` or one of its ancestors.
    /// Otherwise `child` is detached from its previous parent first.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        self.node(child)?;
        if self.node(parent)?.children.contains(&child) {
            return Ok(());
        }
        if child == parent {
            return Err(SceneError::Ancestry("a node cannot be a child of itself"));
        }
        let mut ancestor = self.node(parent)?.parent;
        while let Some(a) = ancestor {
            if a == child {
                return Err(SceneError::Ancestry(
                    "adding an ancestor as a child would create a cycle",
                ));
            }
            ancestor = self.node(a)?.parent;
        }
        if let Some(previous) = self.node(child)?.parent {
            self.unlink_parent(child, previous)?;
        }
        self.link_parent(child, parent)?;
        trace!("reparented {child:?} under {parent:?}");
        Ok(())
    }

    /// Detach `child` from `parent`. It becomes a root and stays alive.
    ///
    /// Does nothing if `child` is not currently a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        self.node(child)?;
        if !self.node(parent)?.children.contains(&child) {
            return Ok(());
        }
        self.unlink_parent(child, parent)?;
        trace!("detached {child:?} from {parent:?}");
        Ok(())
    }

    /// True if `child` is a direct child of `parent`.
    pub fn has_child(&self, parent: NodeId, child: NodeId) -> Result<bool, SceneError> {
        Ok(self.node(parent)?.children.contains(&child))
    }

    /// The parent of `id`, if it has one.
    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>, SceneError> {
        Ok(self.node(id)?.parent)
    }

    /// Children of `id` in draw order.
    pub fn children(&self, id: NodeId) -> Result<&[NodeId], SceneError> {
        Ok(&self.node(id)?.children)
    }

    /// The node's local transform.
    pub fn transform(&self, id: NodeId) -> Result<&Transform, SceneError> {
        Ok(&self.node(id)?.transform)
    }

    /// Mutable access to the node's local transform.
    pub fn transform_mut(&mut self, id: NodeId) -> Result<&mut Transform, SceneError> {
        Ok(&mut self.node_mut(id)?.transform)
    }

    /// The node's shape; `None` for bare nodes.
    pub fn shape(&self, id: NodeId) -> Result<Option<&Shape>, SceneError> {
        Ok(self.node(id)?.shape.as_ref())
    }

    /// Mutable access to the node's shape.
    pub fn shape_mut(&mut self, id: NodeId) -> Result<Option<&mut Shape>, SceneError> {
        Ok(self.node_mut(id)?.shape.as_mut())
    }

    /// Replace (or clear) the node's shape.
    pub fn set_shape(&mut self, id: NodeId, shape: Option<Shape>) -> Result<(), SceneError> {
        self.node_mut(id)?.shape = shape;
        Ok(())
    }

    /// True if the node carries a circle.
    pub fn is_circle(&self, id: NodeId) -> Result<bool, SceneError> {
        Ok(self.node(id)?.shape.as_ref().is_some_and(Shape::is_circle))
    }

    /// Node flags.
    pub fn flags(&self, id: NodeId) -> Result<NodeFlags, SceneError> {
        Ok(self.node(id)?.flags)
    }

    /// Replace the node flags.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) -> Result<(), SceneError> {
        self.node_mut(id)?.flags = flags;
        Ok(())
    }

    /// Turn individual flags on or off.
    pub fn set_flag(&mut self, id: NodeId, flag: NodeFlags, on: bool) -> Result<(), SceneError> {
        self.node_mut(id)?.flags.set(flag, on);
        Ok(())
    }

    /// The node's draw color (or tint, for sprites).
    pub fn color(&self, id: NodeId) -> Result<Color, SceneError> {
        Ok(self.node(id)?.color)
    }

    /// Mutable access to the node's color; channel setters saturate.
    pub fn color_mut(&mut self, id: NodeId) -> Result<&mut Color, SceneError> {
        Ok(&mut self.node_mut(id)?.color)
    }

    /// The node's transform composed with every ancestor's: `parent_global · own`.
    pub fn global_transform(&self, id: NodeId) -> Result<Matrix, SceneError> {
        let node = self.node(id)?;
        let mut matrix = node.transform.to_matrix();
        let mut ancestor = node.parent;
        while let Some(a) = ancestor {
            let n = self.node(a)?;
            matrix = n.transform.to_matrix() * matrix;
            ancestor = n.parent;
        }
        Ok(matrix)
    }

    /// The node's local center carried through its global transform.
    pub fn global_position(&self, id: NodeId) -> Result<Vector, SceneError> {
        let center = self.node(id)?.transform.center();
        Ok(self
            .global_transform(id)?
            .transform_point(Vector::point(center.x, center.y)))
    }

    /// Every local vertex of a polygon-like shape in global space.
    ///
    /// Circles and bare nodes have no vertices and yield an empty list.
    pub fn global_vertices(&self, id: NodeId) -> Result<Vec<Vector>, SceneError> {
        let mut out = Vec::new();
        self.global_vertices_into(id, &mut out)?;
        Ok(out)
    }

    /// Like [`global_vertices`](Self::global_vertices), writing into a reusable buffer.
    ///
    /// `out` is cleared first.
    pub fn global_vertices_into(&self, id: NodeId, out: &mut Vec<Vector>) -> Result<(), SceneError> {
        out.clear();
        let Some(local) = self.node(id)?.shape.as_ref().and_then(Shape::local_vertices) else {
            return Ok(());
        };
        let matrix = self.global_transform(id)?;
        out.extend(local.iter().map(|v| matrix.transform_point(*v)));
        Ok(())
    }

    /// True if the global `point` lies inside the node's shape, boundary included.
    ///
    /// Bare nodes contain nothing.
    pub fn is_point_in_bounds(&self, id: NodeId, point: Point) -> Result<bool, SceneError> {
        self.is_point_in_bounds_pooled(id, point, &mut VertexPool::new())
    }

    /// [`is_point_in_bounds`](Self::is_point_in_bounds) with scratch lists taken
    /// from, and returned to, `pool`.
    pub fn is_point_in_bounds_pooled(
        &self,
        id: NodeId,
        point: Point,
        pool: &mut VertexPool,
    ) -> Result<bool, SceneError> {
        let Some(shape) = self.node(id)?.shape.as_ref() else {
            return Ok(false);
        };
        let transform = self.global_transform(id)?;
        let point = Vector::from(point);
        let mut axes = pool.get();
        let inside = match shape.local_vertices() {
            None => {
                let radius = shape.as_circle().map_or(0.0, |c| c.radius());
                sat::point_in_shape(point, &Geometry::Circle { transform, radius }, &mut axes)
            }
            Some(local) => {
                let mut vertices = pool.get();
                vertices.extend(local.iter().map(|v| transform.transform_point(*v)));
                let inside =
                    sat::point_in_shape(point, &Geometry::Polygon { vertices: &vertices }, &mut axes);
                pool.recycle(vertices);
                inside
            }
        };
        pool.recycle(axes);
        Ok(inside)
    }

    /// The front-most node under `point` in the subtree rooted at `root`.
    ///
    /// Children are searched before their parent, last child first, and only when
    /// [`NodeFlags::CHILDREN_TANGIBLE`] is set. A node itself is a candidate when
    /// [`NodeFlags::TANGIBLE`] is set and `point` is inside its shape. A hit on a
    /// [`NodeFlags::MASK`] node is reported as a hit on its parent (or nothing, for
    /// a root mask).
    pub fn actor_at(&self, root: NodeId, point: Point) -> Result<Option<NodeId>, SceneError> {
        self.actor_at_pooled(root, point, &mut VertexPool::new())
    }

    fn actor_at_pooled(
        &self,
        root: NodeId,
        point: Point,
        pool: &mut VertexPool,
    ) -> Result<Option<NodeId>, SceneError> {
        let node = self.node(root)?;
        let mut hit = None;
        if node.flags.contains(NodeFlags::CHILDREN_TANGIBLE) {
            for &child in node.children.iter().rev() {
                hit = self.actor_at_pooled(child, point, pool)?;
                if hit.is_some() {
                    break;
                }
            }
        }
        if hit.is_none()
            && node.flags.contains(NodeFlags::TANGIBLE)
            && self.is_point_in_bounds_pooled(root, point, pool)?
        {
            hit = Some(root);
        }
        if node.flags.contains(NodeFlags::MASK) && hit == Some(root) {
            hit = node.parent;
        }
        Ok(hit)
    }

    /// Every node under `point` in the subtree rooted at `root`, front-most first.
    ///
    /// Uses the same rules as [`actor_at`](Self::actor_at). Each node appears at
    /// most once; mask nodes are replaced by their parent, which is also reported once.
    pub fn actors_at(&self, root: NodeId, point: Point) -> Result<Vec<NodeId>, SceneError> {
        self.actors_at_pooled(root, point, &mut VertexPool::new())
    }

    fn actors_at_pooled(
        &self,
        root: NodeId,
        point: Point,
        pool: &mut VertexPool,
    ) -> Result<Vec<NodeId>, SceneError> {
        let node = self.node(root)?;
        let mut actors = Vec::new();
        if node.flags.contains(NodeFlags::CHILDREN_TANGIBLE) {
            for &child in node.children.iter().rev() {
                for hit in self.actors_at_pooled(child, point, pool)? {
                    push_unique(&mut actors, hit);
                }
            }
        }
        if node.flags.contains(NodeFlags::TANGIBLE)
            && self.is_point_in_bounds_pooled(root, point, pool)?
        {
            push_unique(&mut actors, root);
        }
        if node.flags.contains(NodeFlags::MASK) {
            let hits = core::mem::take(&mut actors);
            for hit in hits {
                let reported = if hit == root { node.parent } else { Some(hit) };
                if let Some(r) = reported {
                    push_unique(&mut actors, r);
                }
            }
        }
        Ok(actors)
    }

    // --- internals ---

    fn node(&self, id: NodeId) -> Result<&Node, SceneError> {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .filter(|n| n.generation == id.1)
            .ok_or(SceneError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, SceneError> {
        self.nodes
            .get_mut(id.idx())
            .and_then(|n| n.as_mut())
            .filter(|n| n.generation == id.1)
            .ok_or(SceneError::UnknownNode(id))
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) -> Result<(), SceneError> {
        self.node_mut(parent)?.children.push(id);
        self.node_mut(id)?.parent = Some(parent);
        Ok(())
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) -> Result<(), SceneError> {
        self.node_mut(parent)?.children.retain(|c| *c != id);
        self.node_mut(id)?.parent = None;
        Ok(())
    }
}

impl<S: Surface> Tree<S> {
    /// Draw `id` and its visible descendants.
    ///
    /// The node's matrix is composed as `ancestor · local`. Its shape is rendered
    /// when [`NodeFlags::VISIBLE`] is set, and children are drawn in list order when
    /// [`NodeFlags::CHILDREN_VISIBLE`] is set. Pass [`Matrix::IDENTITY`] for a root.
    pub fn draw(&mut self, id: NodeId, ancestor: &Matrix) -> Result<(), SceneError> {
        self.node(id)?;
        let Self { nodes, surface, .. } = self;
        draw_node(nodes, surface, id, ancestor);
        Ok(())
    }
}

fn draw_node<S: Surface>(nodes: &[Option<Node>], surface: &mut S, id: NodeId, ancestor: &Matrix) {
    let Some(node) = nodes.get(id.idx()).and_then(Option::as_ref) else {
        return;
    };
    let matrix = *ancestor * node.transform.to_matrix();
    if node.flags.contains(NodeFlags::VISIBLE)
        && let Some(shape) = &node.shape
    {
        shape.render(&matrix, node.color, surface);
    }
    if node.flags.contains(NodeFlags::CHILDREN_VISIBLE) {
        for &child in &node.children {
            draw_node(nodes, surface, child, &matrix);
        }
    }
}

fn push_unique(list: &mut Vec<NodeId>, id: NodeId) {
    if !list.contains(&id) {
        list.push(id);
    }
}
