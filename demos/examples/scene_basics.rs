// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene basics.
//!
//! Build a small hierarchy, move a parent, and draw the tree into a command list.
//!
//! Run:
//! - `cargo run -p thicket_demos --example scene_basics`

use core::f64::consts::FRAC_PI_2;

use thicket_math::Matrix;
use thicket_scene::{Circle, Color, DrawCommand, Polygon, Rect, SceneError, Tree};

fn main() -> Result<(), SceneError> {
    env_logger::init();

    let mut tree = Tree::default();
    let board = tree.insert_shape(Rect::new(200.0, 200.0)?);
    let arm = tree.insert_actor();
    let hand = tree.insert_shape(Circle::new(10.0)?);
    let flag = tree.insert_shape(Polygon::new([(0.0, 0.0), (20.0, 5.0), (0.0, 10.0)])?);
    tree.add_child(board, arm)?;
    tree.add_child(arm, hand)?;
    tree.add_child(arm, flag)?;
    *tree.color_mut(board)? = Color::rgb(40, 40, 40);
    *tree.color_mut(hand)? = Color::rgb(220, 60, 60);

    tree.transform_mut(arm)?.set_translation((100.0, 100.0))?;
    tree.transform_mut(hand)?.set_x(50.0)?;
    println!("hand at {:?}", tree.global_position(hand)?);

    // A quarter turn of the arm carries both children with it.
    tree.transform_mut(arm)?.set_rotation(FRAC_PI_2)?;
    println!("hand at {:?} after rotating the arm", tree.global_position(hand)?);
    println!("flag corners: {:?}", tree.global_vertices(flag)?);

    tree.draw(board, &Matrix::IDENTITY)?;
    let commands = tree.surface_mut().take();
    let triangles = commands
        .iter()
        .filter(|c| matches!(c, DrawCommand::Triangle { .. }))
        .count();
    println!("{} draw commands, {triangles} triangles", commands.len());
    Ok(())
}
