// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Local-space shape geometry and its rendering.

use core::f64::consts::TAU;
use std::rc::Rc;

use kurbo::{Point, Vec2};
use thicket_math::{Matrix, Vector};

use crate::error::SceneError;
use crate::surface::{Image, Surface};
use crate::types::Color;

/// Number of boundary vertices used when a circle is drawn as a triangle fan.
pub const CIRCLE_RENDER_VERTEX_COUNT: usize = 16;

/// The geometric class of a shape, as seen by collision code.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// A (possibly non-uniformly scaled) circle.
    Circle,
    /// A closed vertex loop.
    Polygon,
}

/// A circle of non-negative radius around the local origin.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Circle {
    radius: f64,
}

impl Circle {
    /// Create a circle.
    pub fn new(radius: f64) -> Result<Self, SceneError> {
        check_radius(radius)?;
        Ok(Self { radius })
    }

    /// The radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Change the radius. Negative or non-finite values are rejected.
    pub fn set_radius(&mut self, radius: f64) -> Result<(), SceneError> {
        check_radius(radius)?;
        self.radius = radius;
        Ok(())
    }

    /// The local boundary point at `radians`: `(cos θ · r, sin θ · r, 0)`.
    pub fn point_at_angle(&self, radians: f64) -> Vector {
        let (sin, cos) = radians.sin_cos();
        Vector::direction(cos * self.radius, sin * self.radius)
    }
}

fn check_radius(radius: f64) -> Result<(), SceneError> {
    if radius.is_finite() && radius >= 0.0 {
        Ok(())
    } else {
        Err(SceneError::invalid(format!(
            "circle radius must be finite and non-negative, got {radius}"
        )))
    }
}

/// An ordered loop of at least three local vertices.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vector>,
}

impl Polygon {
    /// Create a polygon from `(x, y)`-like vertices.
    pub fn new<I, P>(vertices: I) -> Result<Self, SceneError>
    where
        I: IntoIterator<Item = P>,
        P: Into<Vec2>,
    {
        Ok(Self {
            vertices: collect_vertices(vertices)?,
        })
    }

    /// Local vertices.
    pub fn vertices(&self) -> &[Vector] {
        &self.vertices
    }

    /// Replace every vertex. The old list is kept if the new one is rejected.
    pub fn set_vertices<I, P>(&mut self, vertices: I) -> Result<(), SceneError>
    where
        I: IntoIterator<Item = P>,
        P: Into<Vec2>,
    {
        self.vertices = collect_vertices(vertices)?;
        Ok(())
    }
}

fn collect_vertices<I, P>(vertices: I) -> Result<Vec<Vector>, SceneError>
where
    I: IntoIterator<Item = P>,
    P: Into<Vec2>,
{
    let mut out = Vec::new();
    for (i, v) in vertices.into_iter().enumerate() {
        let v = v.into();
        if !v.is_finite() {
            return Err(SceneError::invalid(format!(
                "polygon vertex {i} must be finite, got ({}, {})",
                v.x, v.y
            )));
        }
        out.push(Vector::direction(v.x, v.y));
    }
    if out.len() < 3 {
        return Err(SceneError::invalid(format!(
            "a polygon needs at least 3 vertices, got {}",
            out.len()
        )));
    }
    Ok(out)
}

/// An axis-aligned rectangle spanning `(0, 0)` to `(width, height)` in local space.
///
/// Its vertices are derived from the size and cannot be set directly.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    width: f64,
    height: f64,
    vertices: [Vector; 4],
}

impl Rect {
    /// Create a rectangle. Both sizes must be positive and finite.
    pub fn new(width: f64, height: f64) -> Result<Self, SceneError> {
        check_side("width", width)?;
        check_side("height", height)?;
        Ok(Self {
            width,
            height,
            vertices: rect_vertices(width, height),
        })
    }

    /// Width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Height.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Change the width and regenerate the vertices.
    pub fn set_width(&mut self, width: f64) -> Result<(), SceneError> {
        check_side("width", width)?;
        self.width = width;
        self.vertices = rect_vertices(self.width, self.height);
        Ok(())
    }

    /// Change the height and regenerate the vertices.
    pub fn set_height(&mut self, height: f64) -> Result<(), SceneError> {
        check_side("height", height)?;
        self.height = height;
        self.vertices = rect_vertices(self.width, self.height);
        Ok(())
    }

    /// Local vertices, clockwise from the origin in a y-down space.
    pub fn vertices(&self) -> &[Vector] {
        &self.vertices
    }
}

fn check_side(what: &str, value: f64) -> Result<(), SceneError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SceneError::invalid(format!(
            "rect {what} must be positive and finite, got {value}"
        )))
    }
}

fn rect_vertices(width: f64, height: f64) -> [Vector; 4] {
    [
        Vector::direction(0.0, 0.0),
        Vector::direction(width, 0.0),
        Vector::direction(width, height),
        Vector::direction(0.0, height),
    ]
}

/// A rectangle sized by an image and drawn with it.
#[derive(Clone, Debug)]
pub struct Sprite {
    image: Rc<dyn Image>,
    rect: Rect,
}

impl Sprite {
    /// Create a sprite showing `image`.
    pub fn new(image: Rc<dyn Image>) -> Result<Self, SceneError> {
        let rect = image_rect(&*image)?;
        Ok(Self { image, rect })
    }

    /// The image drawn.
    pub fn image(&self) -> &Rc<dyn Image> {
        &self.image
    }

    /// Swap the image; the size follows it.
    pub fn set_image(&mut self, image: Rc<dyn Image>) -> Result<(), SceneError> {
        self.rect = image_rect(&*image)?;
        self.image = image;
        Ok(())
    }

    /// Width, taken from the image.
    pub fn width(&self) -> f64 {
        self.rect.width()
    }

    /// Height, taken from the image.
    pub fn height(&self) -> f64 {
        self.rect.height()
    }

    /// Local vertices of the image rectangle.
    pub fn vertices(&self) -> &[Vector] {
        self.rect.vertices()
    }
}

fn image_rect(image: &dyn Image) -> Result<Rect, SceneError> {
    let (w, h) = (image.width(), image.height());
    if w == 0 || h == 0 {
        return Err(SceneError::invalid(format!(
            "sprite image must have a non-zero size, got {w}x{h}"
        )));
    }
    Rect::new(f64::from(w), f64::from(h))
}

/// Geometry attached to a node.
#[derive(Clone, Debug)]
pub enum Shape {
    /// See [`Circle`].
    Circle(Circle),
    /// See [`Polygon`].
    Polygon(Polygon),
    /// See [`Rect`].
    Rect(Rect),
    /// See [`Sprite`].
    Sprite(Sprite),
}

impl Shape {
    /// Whether this behaves as a circle or a polygon.
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Circle(_) => ShapeKind::Circle,
            Self::Polygon(_) | Self::Rect(_) | Self::Sprite(_) => ShapeKind::Polygon,
        }
    }

    /// True for circles.
    pub fn is_circle(&self) -> bool {
        self.kind() == ShapeKind::Circle
    }

    /// The circle, if this is one.
    pub fn as_circle(&self) -> Option<&Circle> {
        match self {
            Self::Circle(c) => Some(c),
            _ => None,
        }
    }

    /// Local vertices of polygon-like shapes; `None` for circles.
    pub fn local_vertices(&self) -> Option<&[Vector]> {
        match self {
            Self::Circle(_) => None,
            Self::Polygon(p) => Some(p.vertices()),
            Self::Rect(r) => Some(r.vertices()),
            Self::Sprite(s) => Some(s.vertices()),
        }
    }

    /// Issue draw calls for this shape under the composed `matrix`.
    pub(crate) fn render<S: Surface>(&self, matrix: &Matrix, color: Color, surface: &mut S) {
        match self {
            Self::Circle(c) => {
                let fan: Vec<Point> = (0..CIRCLE_RENDER_VERTEX_COUNT)
                    .map(|i| {
                        let angle = TAU * i as f64 / CIRCLE_RENDER_VERTEX_COUNT as f64;
                        matrix.transform_point(c.point_at_angle(angle)).to_point()
                    })
                    .collect();
                fill_fan(&fan, color, surface);
            }
            Self::Polygon(_) | Self::Rect(_) => {
                let fan: Vec<Point> = self
                    .local_vertices()
                    .unwrap_or_default()
                    .iter()
                    .map(|v| matrix.transform_point(*v).to_point())
                    .collect();
                fill_fan(&fan, color, surface);
            }
            Self::Sprite(s) => {
                let v = s.vertices();
                let corners = [0, 1, 2, 3].map(|i| matrix.transform_point(v[i]).to_point());
                surface.draw_image_quad(&s.image, corners, color);
            }
        }
    }
}

fn fill_fan<S: Surface>(fan: &[Point], color: Color, surface: &mut S) {
    for i in 2..fan.len() {
        surface.fill_triangle([fan[0], fan[i - 1], fan[i]], color);
    }
}

impl From<Circle> for Shape {
    fn from(c: Circle) -> Self {
        Self::Circle(c)
    }
}

impl From<Polygon> for Shape {
    fn from(p: Polygon) -> Self {
        Self::Polygon(p)
    }
}

impl From<Rect> for Shape {
    fn from(r: Rect) -> Self {
        Self::Rect(r)
    }
}

impl From<Sprite> for Shape {
    fn from(s: Sprite) -> Self {
        Self::Sprite(s)
    }
}
