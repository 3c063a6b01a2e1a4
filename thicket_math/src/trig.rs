// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sine and cosine with exact results on the four axis-aligned angles.

use core::f64::consts::{FRAC_PI_2, PI, TAU};

const THREE_HALVES_PI: f64 = PI * 3.0 / 2.0;

/// Returns `(sin, cos)` of `radians`.
///
/// The angle is reduced into `[0, 2π)` first. Exactly `0`, `π/2`, `π`, and `3π/2`
/// return exact zeros and ones so repeated axis-aligned rotations do not drift.
pub fn exact_sin_cos(radians: f64) -> (f64, f64) {
    let r = radians.rem_euclid(TAU);
    if r == 0.0 {
        (0.0, 1.0)
    } else if r == FRAC_PI_2 {
        (1.0, 0.0)
    } else if r == PI {
        (0.0, -1.0)
    } else if r == THREE_HALVES_PI {
        (-1.0, 0.0)
    } else {
        r.sin_cos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_angles_are_exact() {
        assert_eq!(exact_sin_cos(0.0), (0.0, 1.0));
        assert_eq!(exact_sin_cos(FRAC_PI_2), (1.0, 0.0));
        assert_eq!(exact_sin_cos(PI), (0.0, -1.0));
        assert_eq!(exact_sin_cos(THREE_HALVES_PI), (-1.0, 0.0));
        assert_eq!(exact_sin_cos(TAU), (0.0, 1.0));
    }

    #[test]
    fn other_angles_fall_through() {
        let (s, c) = exact_sin_cos(0.5);
        assert_eq!(s, 0.5_f64.sin());
        assert_eq!(c, 0.5_f64.cos());
    }
}
