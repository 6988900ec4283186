// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned rectangles in `(x, y, width, height)` form.

use kurbo::{Affine, Point, Rect};

use crate::{HitTest, PathSink};

/// An axis-aligned rectangle with its origin at the top-left corner.
///
/// This mirrors the canvas `rect(x, y, w, h)` argument order. Width and height
/// may be negative as recorded; [`Rectangle::normalized`] flips them.
///
/// Overlap tests use open intervals: rectangles that only share an edge do not
/// intersect.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rectangle {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Rectangle {
    /// Creates a rectangle from its origin and extent.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The rectangle spanned by two opposite corners, in either order.
    #[must_use]
    pub fn from_points(a: Point, b: Point) -> Self {
        Self::new(a.x.min(b.x), a.y.min(b.y), (b.x - a.x).abs(), (b.y - a.y).abs())
    }

    /// Converts from a kurbo [`Rect`] (`x0, y0, x1, y1`).
    #[must_use]
    pub fn from_rect(rect: Rect) -> Self {
        Self::new(rect.x0, rect.y0, rect.width(), rect.height())
    }

    /// Converts into a kurbo [`Rect`].
    #[must_use]
    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Returns an equivalent rectangle with non-negative width and height.
    #[must_use]
    pub fn normalized(self) -> Self {
        let (x, width) = if self.width < 0.0 {
            (self.x + self.width, -self.width)
        } else {
            (self.x, self.width)
        };
        let (y, height) = if self.height < 0.0 {
            (self.y + self.height, -self.height)
        } else {
            (self.y, self.height)
        };
        Self::new(x, y, width, height)
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Returns `true` if this rectangle encloses no area.
    ///
    /// Zero or negative extents count as empty, as does any non-finite field.
    /// An empty query rectangle intersects nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0
            && self.height > 0.0
            && self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite())
    }

    /// Open-interval overlap test.
    ///
    /// `a.x < b.x + b.w && a.x + a.w > b.x` and likewise for `y`.
    pub fn intersects(&self, other: &Self) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Returns `true` if `pt` lies strictly inside.
    pub fn contains_strict(&self, pt: Point) -> bool {
        pt.x > self.x && pt.x < self.right() && pt.y > self.y && pt.y < self.bottom()
    }

    /// The four corners, clockwise on a y-down surface from the origin.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x, self.y),
            Point::new(self.right(), self.y),
            Point::new(self.right(), self.bottom()),
            Point::new(self.x, self.bottom()),
        ]
    }

    /// Maps the rectangle through the scale and translation parts of `m`.
    ///
    /// With coefficients `[a, b, c, d, e, f]` the result is
    /// `x' = e + x·a + y·c`, `y' = f + y·d + x·b`, `w' = w·a`, `h' = h·d`,
    /// normalized so the extent is non-negative. Rotation and skew are not
    /// representable in an axis-aligned rectangle and are ignored for the
    /// extent.
    #[must_use]
    pub fn transform(&self, m: &Affine) -> Self {
        let [a, b, c, d, e, f] = m.as_coeffs();
        Self::new(
            e + self.x * a + self.y * c,
            f + self.y * d + self.x * b,
            self.width * a,
            self.height * d,
        )
        .normalized()
    }
}

impl HitTest for Rectangle {
    fn bounds(&self) -> Rect {
        self.normalized().to_rect()
    }

    fn intersects(&self, rect: &Rectangle) -> bool {
        !rect.is_empty() && Rectangle::intersects(&self.normalized(), rect)
    }

    fn winding(&self, pt: Point) -> i32 {
        i32::from(self.normalized().contains_strict(pt))
    }

    fn replay(&self, sink: &mut dyn PathSink) {
        sink.rect(*self);
    }
}

impl From<Rect> for Rectangle {
    fn from(rect: Rect) -> Self {
        Self::from_rect(rect)
    }
}

impl From<Rectangle> for Rect {
    fn from(rect: Rectangle) -> Self {
        rect.to_rect()
    }
}
