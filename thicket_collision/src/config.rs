// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunables for the collision engine.

pub use thicket_math::AXIS_EPSILON;

/// Overlap depth that must be exceeded on every axis for a pair to count as colliding.
///
/// Exactly touching shapes and floating-point jitter stay below it.
pub const OVERLAP_TOLERANCE: f64 = 1e-6;

/// What to report for a pair with no candidate separating axis.
///
/// Two concentric circles are the typical case: nothing can separate them, but
/// there is no axis to measure overlap along either.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DegeneratePolicy {
    /// Report the pair as colliding, with no overlap or penetration.
    #[default]
    AssumeOverlap,
    /// Report the pair as apart.
    AssumeSeparate,
}

/// Collision engine configuration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CollisionConfig {
    /// See [`OVERLAP_TOLERANCE`].
    pub overlap_tolerance: f64,
    /// See [`DegeneratePolicy`].
    pub degenerate: DegeneratePolicy,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            overlap_tolerance: OVERLAP_TOLERANCE,
            degenerate: DegeneratePolicy::AssumeOverlap,
        }
    }
}
