// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The render and image boundaries.
//!
//! The scene computes global geometry and hands it to a host-provided [`Surface`].
//! It never rasterizes or loads images itself.

use core::fmt::Debug;
use std::rc::Rc;

use kurbo::Point;

use crate::types::Color;

/// An externally loaded image. Only its size is visible to the scene.
pub trait Image: Debug {
    /// Width in pixels.
    fn width(&self) -> u32;
    /// Height in pixels.
    fn height(&self) -> u32;
}

/// A host rendering target.
///
/// Draw calls arrive in scene order: parents before children, children in list order.
pub trait Surface {
    /// Fill a flat-colored triangle given in global coordinates.
    fn fill_triangle(&mut self, points: [Point; 3], color: Color);

    /// Draw `image` stretched over a quad. Corners map to the image's top-left,
    /// top-right, bottom-right, and bottom-left, in that order.
    fn draw_image_quad(&mut self, image: &Rc<dyn Image>, corners: [Point; 4], tint: Color);
}

/// One recorded draw call.
#[derive(Clone, Debug)]
pub enum DrawCommand {
    /// A call to [`Surface::fill_triangle`].
    Triangle {
        /// Global corner positions.
        points: [Point; 3],
        /// Fill color.
        color: Color,
    },
    /// A call to [`Surface::draw_image_quad`].
    ImageQuad {
        /// The image drawn.
        image: Rc<dyn Image>,
        /// Global corner positions.
        corners: [Point; 4],
        /// Tint applied to the image.
        tint: Color,
    },
}

/// A [`Surface`] that records draw calls for later replay or inspection.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded commands in submission order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of recorded commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// True if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drain the recorded commands, leaving the list empty.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        core::mem::take(&mut self.commands)
    }

    /// Forget every recorded command.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Surface for DrawList {
    fn fill_triangle(&mut self, points: [Point; 3], color: Color) {
        self.commands.push(DrawCommand::Triangle { points, color });
    }

    fn draw_image_quad(&mut self, image: &Rc<dyn Image>, corners: [Point; 4], tint: Color) {
        self.commands.push(DrawCommand::ImageQuad {
            image: Rc::clone(image),
            corners,
            tint,
        });
    }
}
