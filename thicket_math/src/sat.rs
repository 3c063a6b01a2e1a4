// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Separating-axis primitives over resolved global geometry.
//!
//! Nothing here knows about scene nodes. Callers resolve a shape into a
//! [`Geometry`] (a circle's global transform, or a polygon's global vertex loop)
//! and then enumerate axes, project, and compare intervals.

use crate::error::MathError;
use crate::matrix::Matrix;
use crate::vector::Vector;

/// Two axes closer than this, component-wise, are treated as the same axis.
pub const AXIS_EPSILON: f64 = 1e-9;

/// A shape resolved into global space.
#[derive(Copy, Clone, Debug)]
pub enum Geometry<'a> {
    /// A circle of `radius` around the local origin of `transform`.
    ///
    /// Non-uniform scale in `transform` turns the circle into an ellipse.
    Circle {
        /// Global transform of the circle.
        transform: Matrix,
        /// Local radius.
        radius: f64,
    },
    /// A closed loop of global vertices.
    Polygon {
        /// Vertices in order; the last connects back to the first.
        vertices: &'a [Vector],
    },
}

impl Geometry<'_> {
    /// True for circles.
    pub fn is_circle(&self) -> bool {
        matches!(self, Self::Circle { .. })
    }

    /// The global geometric center of a circle.
    pub fn circle_center(&self) -> Option<Vector> {
        match self {
            Self::Circle { transform, .. } => Some(transform.transform_point(Vector::ZERO)),
            Self::Polygon { .. } => None,
        }
    }
}

/// A closed interval on an axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projection {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl Projection {
    /// An interval covering `a` and `b` in either order.
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// True if the intervals share at least one point. Touching counts.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min <= other.max && other.min <= self.max
    }

    /// Signed length of the shared part; zero when touching, negative when apart.
    pub fn overlap(&self, other: &Self) -> f64 {
        self.max.min(other.max) - self.min.max(other.min)
    }

    /// True if `value` lies inside, bounds included.
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Middle of the interval.
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) * 0.5
    }
}

/// Collect the candidate separating axes for `a` against `b` into `out`.
///
/// Polygons contribute the unit normal of every non-degenerate edge. A circle
/// contributes one axis: toward the other circle's center, or toward the nearest
/// vertex of the other polygon. Axes are canonicalized (see
/// [`Vector::canonical_axis`]) and de-duplicated, so the result does not depend
/// on argument order. `out` is cleared first.
pub fn separation_axes(a: &Geometry<'_>, b: &Geometry<'_>, out: &mut Vec<Vector>) {
    out.clear();
    for g in [a, b] {
        if let Geometry::Polygon { vertices } = g {
            edge_normals(vertices, out);
        }
    }
    match (a, b) {
        (Geometry::Circle { .. }, Geometry::Circle { .. }) => {
            if let (Some(ca), Some(cb)) = (a.circle_center(), b.circle_center()) {
                push_direction(out, cb - ca);
            }
        }
        (circle @ Geometry::Circle { .. }, Geometry::Polygon { vertices })
        | (Geometry::Polygon { vertices }, circle @ Geometry::Circle { .. }) => {
            if let Some(center) = circle.circle_center()
                && let Some(nearest) = nearest_vertex(center, vertices)
            {
                push_direction(out, nearest - center);
            }
        }
        (Geometry::Polygon { .. }, Geometry::Polygon { .. }) => {}
    }
}

/// Append the unit normals of every edge of a closed vertex loop.
///
/// Zero-length edges are skipped. Results are canonicalized and de-duplicated
/// against what `out` already holds.
pub fn edge_normals(vertices: &[Vector], out: &mut Vec<Vector>) {
    let n = vertices.len();
    for i in 0..n {
        let edge = vertices[(i + 1) % n] - vertices[i];
        if let Ok(normal) = edge.normal() {
            push_direction(out, normal);
        }
    }
}

/// Project `geometry` onto `axis`.
///
/// Circles project exactly even when non-uniformly scaled: the axis is pulled
/// back through the transpose of the linear part, and the boundary point in that
/// local direction and its antipode are mapped forward again. A polygon with no
/// vertices yields an empty interval (`min > max`) that overlaps nothing.
///
/// An axis with no planar length is [`MathError::ZeroLengthVector`].
pub fn project(geometry: &Geometry<'_>, axis: Vector) -> Result<Projection, MathError> {
    if axis.planar_length() == 0.0 || !axis.is_finite() {
        return Err(MathError::ZeroLengthVector);
    }
    Ok(support(geometry, axis))
}

/// Projection onto an axis already known to be usable.
fn support(geometry: &Geometry<'_>, axis: Vector) -> Projection {
    match geometry {
        Geometry::Polygon { vertices } => {
            let mut min = f64::INFINITY;
            let mut max = f64::NEG_INFINITY;
            for v in *vertices {
                let d = v.dot2(axis);
                min = min.min(d);
                max = max.max(d);
            }
            Projection { min, max }
        }
        Geometry::Circle { transform, radius } => {
            let center = transform.transform_point(Vector::ZERO);
            let Ok(local) = transform.transpose_linear_apply(axis).normalize() else {
                // The linear part flattens everything onto the center along this axis.
                let c = center.dot2(axis);
                return Projection::new(c, c);
            };
            let offset = local * *radius;
            let front = transform.transform_point(offset);
            let back = transform.transform_point(-offset);
            Projection::new(front.dot2(axis), back.dot2(axis))
        }
    }
}

/// True if `point` lies inside `geometry`, boundary included.
///
/// Polygons test against every edge normal; circles test along the single axis
/// from the center toward `point`. With no usable axis (a point on a circle's
/// center, or a polygon with only degenerate edges) the point counts as inside.
/// `axes` is scratch storage and is cleared first.
pub fn point_in_shape(point: Vector, geometry: &Geometry<'_>, axes: &mut Vec<Vector>) -> bool {
    axes.clear();
    match geometry {
        Geometry::Polygon { vertices } => edge_normals(vertices, axes),
        Geometry::Circle { transform, .. } => {
            let center = transform.transform_point(Vector::ZERO);
            push_direction(axes, Vector::direction(point.x, point.y) - center);
        }
    }
    axes.iter()
        .all(|axis| support(geometry, *axis).contains(point.dot2(*axis)))
}

fn nearest_vertex(to: Vector, vertices: &[Vector]) -> Option<Vector> {
    let mut best: Option<(f64, Vector)> = None;
    for v in vertices {
        let d = *v - to;
        let dist = d.dot2(d);
        if best.is_none_or(|(b, _)| dist < b) {
            best = Some((dist, *v));
        }
    }
    best.map(|(_, v)| v)
}

fn push_direction(out: &mut Vec<Vector>, direction: Vector) {
    let planar = Vector::direction(direction.x, direction.y);
    let Ok(unit) = planar.normalize() else {
        return;
    };
    let axis = unit.canonical_axis();
    if !out.iter().any(|a| a.approx_eq(axis, AXIS_EPSILON)) {
        out.push(axis);
    }
}
