// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene tree: node identifiers, flags, and colors.

/// Identifier for a node in the [`Tree`](crate::Tree).
///
/// This is a small, copyable handle made of a slot index and a generation counter.
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On [`Tree::remove`](crate::Tree::remove), the slot is freed; any existing `NodeId`
///   that pointed to it is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// Stale ids never alias a different live node. Operations given a stale id fail with
/// [`SceneError::UnknownNode`](crate::SceneError::UnknownNode).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Slot index, stable for the lifetime of the node.
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Generation of the slot at the time this id was issued.
    pub const fn generation(self) -> u32 {
        self.1
    }
}

bitflags::bitflags! {
    /// Node flags controlling drawing and hit testing.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// The node's own shape is drawn.
        const VISIBLE           = 0b0000_0001;
        /// The node's own shape takes part in hit testing.
        const TANGIBLE          = 0b0000_0010;
        /// Children are drawn.
        const CHILDREN_VISIBLE  = 0b0000_0100;
        /// Children take part in hit testing.
        const CHILDREN_TANGIBLE = 0b0000_1000;
        /// Hits on this node (or through it) are reported on its parent instead.
        const MASK              = 0b0001_0000;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::TANGIBLE | Self::CHILDREN_VISIBLE | Self::CHILDREN_TANGIBLE
    }
}

/// An 8-bit RGBA color.
///
/// The `set_*` methods take any integer and saturate it into `0..=255`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
    /// Alpha channel; 255 is opaque.
    pub alpha: u8,
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);

    /// Build a color from its channels.
    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Build an opaque color.
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::rgba(red, green, blue, 255)
    }

    /// Set the red channel, saturating into `0..=255`.
    pub fn set_red(&mut self, value: i32) {
        self.red = clamp_channel(value);
    }

    /// Set the green channel, saturating into `0..=255`.
    pub fn set_green(&mut self, value: i32) {
        self.green = clamp_channel(value);
    }

    /// Set the blue channel, saturating into `0..=255`.
    pub fn set_blue(&mut self, value: i32) {
        self.blue = clamp_channel(value);
    }

    /// Set the alpha channel, saturating into `0..=255`.
    pub fn set_alpha(&mut self, value: i32) {
        self.alpha = clamp_channel(value);
    }

    /// Packed as `0xAARRGGBB`.
    pub const fn to_argb(self) -> u32 {
        ((self.alpha as u32) << 24)
            | ((self.red as u32) << 16)
            | ((self.green as u32) << 8)
            | (self.blue as u32)
    }
}

fn clamp_channel(value: i32) -> u8 {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "Clamped into u8 range first."
    )]
    let channel = value.clamp(0, 255) as u8;
    channel
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_flags_exclude_mask() {
        let f = NodeFlags::default();
        assert!(f.contains(NodeFlags::VISIBLE | NodeFlags::TANGIBLE));
        assert!(f.contains(NodeFlags::CHILDREN_VISIBLE | NodeFlags::CHILDREN_TANGIBLE));
        assert!(!f.contains(NodeFlags::MASK));
    }

    #[test]
    fn channels_saturate() {
        let mut c = Color::default();
        c.set_red(-20);
        c.set_green(300);
        c.set_blue(128);
        c.set_alpha(i32::MAX);
        assert_eq!(c, Color::rgba(0, 255, 128, 255));
    }

    #[test]
    fn argb_packing() {
        assert_eq!(Color::rgba(0x12, 0x34, 0x56, 0x78).to_argb(), 0x7812_3456);
        assert_eq!(Color::WHITE.to_argb(), 0xFFFF_FFFF);
    }
}
