// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thicket Collision: separating-axis collision detection for Thicket scene shapes.
//!
//! - Tests pairs of circles and convex polygons in global space, including circles
//!   distorted by non-uniform scale.
//! - Reports the minimum translation that separates a colliding pair.
//! - Buffers a set of shapes, snapshots their geometry, and sweeps every unordered pair.
//!
//! ## API overview
//!
//! - [`CollisionEngine`]: pairwise queries and the buffer protocol.
//! - [`CollisionInfo`]: outcome of a detailed test.
//! - [`CollisionConfig`] / [`DegeneratePolicy`]: overlap tolerance and what to do
//!   when a pair has no candidate axis.
//! - [`ShapeCache`] and [`PairCursor`]: the buffer's snapshot store and sweep position.
//!
//! Key operations:
//! - [`CollisionEngine::test`] and [`CollisionEngine::collision_info`]
//! - [`CollisionEngine::is_point_in_shape`]
//! - [`CollisionEngine::buffer_shapes`] then [`CollisionEngine::next_collision_info`]
//!   until it yields `None`
//!
//! Shapes are nodes of a [`thicket_scene::Tree`]. Nodes without a shape never collide.
//!
//! ## Example
//!
//! ```
//! use thicket_collision::CollisionEngine;
//! use thicket_scene::{Circle, Rect, Tree};
//!
//! let mut tree = Tree::default();
//! let wall = tree.insert_shape(Rect::new(10.0, 100.0)?);
//! let ball = tree.insert_shape(Circle::new(5.0)?);
//! tree.transform_mut(ball)?.set_translation((13.0, 50.0))?;
//!
//! let mut engine = CollisionEngine::new();
//! let info = engine.collision_info(&tree, wall, ball)?;
//! assert!(info.colliding);
//! let push = info.penetration.unwrap();
//! assert!((push.x - 2.0).abs() < 1e-9 && push.y.abs() < 1e-9);
//!
//! engine.buffer_shapes(&tree, [wall, ball])?;
//! let mut hits = 0;
//! while let Some(info) = engine.next_collision_info(&tree)? {
//!     hits += usize::from(info.colliding);
//! }
//! assert_eq!(hits, 1);
//! # Ok::<(), thicket_collision::CollisionError>(())
//! ```

mod cache;
mod config;
mod cursor;
mod engine;
mod error;
mod info;

pub use cache::ShapeCache;
pub use config::{AXIS_EPSILON, CollisionConfig, DegeneratePolicy, OVERLAP_TOLERANCE};
pub use cursor::PairCursor;
pub use engine::CollisionEngine;
pub use error::CollisionError;
pub use info::CollisionInfo;
