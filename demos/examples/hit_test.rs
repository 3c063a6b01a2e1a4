// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit testing.
//!
//! Pick the frontmost node under a point, collect every node under it, and use a
//! mask so a decoration reports its owner instead of itself.
//!
//! Run:
//! - `cargo run -p thicket_demos --example hit_test`

use kurbo::Point;
use thicket_scene::{Circle, NodeFlags, Rect, SceneError, Tree};

fn main() -> Result<(), SceneError> {
    env_logger::init();

    let mut tree = Tree::default();
    let table = tree.insert_shape(Rect::new(300.0, 200.0)?);
    let card = tree.insert_shape(Rect::new(60.0, 90.0)?);
    let badge = tree.insert_shape(Circle::new(8.0)?);
    tree.add_child(table, card)?;
    tree.add_child(card, badge)?;
    tree.transform_mut(card)?.set_translation((100.0, 50.0))?;
    tree.transform_mut(badge)?.set_translation((60.0, 0.0))?;

    let corner = Point::new(160.0, 50.0);
    println!("frontmost at {corner:?}: {:?}", tree.actor_at(table, corner)?);
    println!("all at {corner:?}: {:?}", tree.actors_at(table, corner)?);

    // The badge is part of the card: clicks on it go to the card.
    tree.set_flag(badge, NodeFlags::MASK, true)?;
    let hit = tree.actor_at(table, corner)?;
    assert_eq!(hit, Some(card), "masked badge should proxy to its card");
    println!("with mask: {hit:?}, all: {:?}", tree.actors_at(table, corner)?);

    // Make the card's subtree intangible: only the table remains.
    tree.set_flag(card, NodeFlags::TANGIBLE | NodeFlags::CHILDREN_TANGIBLE, false)?;
    println!("intangible card: {:?}", tree.actor_at(table, corner)?);
    Ok(())
}
