// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collision sweep.
//!
//! Buffer a handful of shapes, sweep every pair, and push colliding shapes apart
//! along their penetration vectors.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p thicket_demos --example collision_sweep`

use log::info;
use thicket_collision::{CollisionEngine, CollisionError};
use thicket_scene::{Circle, Rect, Tree};

fn main() -> Result<(), CollisionError> {
    env_logger::init();

    let mut tree = Tree::default();
    let floor = tree.insert_shape(Rect::new(400.0, 20.0)?);
    tree.transform_mut(floor)?.set_translation((0.0, 300.0))?;
    let mut balls = Vec::new();
    for i in 0..4 {
        let ball = tree.insert_shape(Circle::new(15.0)?);
        tree.transform_mut(ball)?
            .set_translation((60.0 + 25.0 * f64::from(i), 290.0 - 5.0 * f64::from(i)))?;
        balls.push(ball);
    }

    let mut engine = CollisionEngine::new();
    for round in 0..3 {
        engine.buffer_shapes(&tree, balls.iter().copied().chain([floor]))?;
        let mut pushes = Vec::new();
        while let Some(hit) = engine.next_collision_info(&tree)? {
            if let (true, Some(push)) = (hit.colliding, hit.penetration) {
                info!("{:?} overlaps {:?} by {:.3}", hit.shapes.0, hit.shapes.1, hit.overlap.unwrap_or(0.0));
                pushes.push((hit.shapes.1, push));
            }
        }
        println!("round {round}: {} colliding pairs", pushes.len());
        if pushes.is_empty() {
            break;
        }
        for (shape, push) in pushes {
            if shape == floor {
                continue;
            }
            let t = tree.transform_mut(shape)?;
            let moved = t.translation() + push.to_vec2();
            t.set_translation(moved)?;
        }
    }
    Ok(())
}
