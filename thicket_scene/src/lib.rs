// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thicket Scene: a tree of transformable, drawable 2D shapes.
//!
//! - Keeps a hierarchy of nodes, each with a local [`Transform`] (center, scale, rotation,
//!   translation), an optional [`Shape`], a [`Color`], and [`NodeFlags`].
//! - Composes local and ancestor transforms into global transforms, positions, and vertices.
//! - Hit-tests points front to back, with tangibility and mask substitution.
//! - Emits triangle fans and image quads to a host [`Surface`].
//!
//! ## API overview
//!
//! - [`Tree`]: arena of nodes and the surface they draw to.
//! - [`NodeId`]: generational handle of a node. Stale ids fail with [`SceneError::UnknownNode`].
//! - [`Transform`]: lazily composed `T · R · S · C` matrix with per-component dirty bits.
//! - [`Shape`]: [`Circle`], [`Polygon`], [`Rect`], or [`Sprite`]; [`ShapeKind`] folds the
//!   last three into polygons.
//! - [`Surface`] / [`Image`]: the render and image boundaries. [`DrawList`] records draw calls.
//!
//! Key operations:
//! - [`Tree::insert_actor`] / [`Tree::insert_shape`] → [`NodeId`]
//! - [`Tree::add_child`] / [`Tree::remove_child`] / [`Tree::remove`]
//! - [`Tree::global_transform`], [`Tree::global_position`], [`Tree::global_vertices`]
//! - [`Tree::actor_at`] and [`Tree::actors_at`]
//! - [`Tree::draw`]
//!
//! ## Hierarchy rules
//!
//! A node has at most one parent and the parent graph never has a cycle. Linking goes through
//! [`Tree::add_child`], which detaches the child from its old parent first and rejects cycles
//! with [`SceneError::Ancestry`]. There is no way to set a parent directly.
//!
//! ## Example
//!
//! ```
//! use thicket_scene::{Circle, NodeFlags, Rect, Tree};
//! use thicket_math::Matrix;
//! use kurbo::Point;
//!
//! let mut tree = Tree::default();
//! let board = tree.insert_shape(Rect::new(100.0, 100.0)?);
//! let token = tree.insert_shape(Circle::new(5.0)?);
//! tree.add_child(board, token)?;
//! tree.transform_mut(token)?.set_translation((50.0, 50.0))?;
//!
//! // The token is in front of the board.
//! assert_eq!(tree.actor_at(board, Point::new(52.0, 50.0))?, Some(token));
//! assert_eq!(tree.actors_at(board, Point::new(52.0, 50.0))?, vec![token, board]);
//!
//! // Make the token proxy its hits to the board.
//! tree.set_flag(token, NodeFlags::MASK, true)?;
//! assert_eq!(tree.actor_at(board, Point::new(52.0, 50.0))?, Some(board));
//!
//! tree.draw(board, &Matrix::IDENTITY)?;
//! assert!(!tree.surface().is_empty());
//! # Ok::<(), thicket_scene::SceneError>(())
//! ```

mod error;
mod shape;
mod surface;
mod transform;
mod tree;
mod types;

pub use error::SceneError;
pub use shape::{CIRCLE_RENDER_VERTEX_COUNT, Circle, Polygon, Rect, Shape, ShapeKind, Sprite};
pub use surface::{DrawCommand, DrawList, Image, Surface};
pub use transform::{Scale, Transform};
pub use tree::Tree;
pub use types::{Color, NodeFlags, NodeId};
