// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect};

use crate::{
    Arc, Circle, CubicBezier, HitTest, PathSink, Placed, QuadraticBezier, Rectangle, Subpath,
};

/// Any primitive a drawing surface can record.
#[derive(Clone, Debug)]
pub enum Shape {
    /// Filled or stroked axis-aligned rectangle.
    Rectangle(Rectangle),
    /// Full disc.
    Circle(Circle),
    /// Circular arc.
    Arc(Arc),
    /// Quadratic Bézier segment.
    Quadratic(QuadraticBezier),
    /// Cubic Bézier segment.
    Cubic(CubicBezier),
    /// Contiguous path.
    Subpath(Subpath),
}

impl Shape {
    fn as_hit_test(&self) -> &dyn HitTest {
        match self {
            Self::Rectangle(r) => r,
            Self::Circle(c) => c,
            Self::Arc(a) => a,
            Self::Quadratic(q) => q,
            Self::Cubic(c) => c,
            Self::Subpath(s) => s,
        }
    }

    /// Selection test in local space.
    ///
    /// Subpaths use their memoized [`Subpath::hit`]; every other shape is hit
    /// exactly when it [intersects](HitTest::intersects) `rect`.
    pub fn hit(&mut self, rect: &Rectangle, anchor: Point) -> bool {
        match self {
            Self::Subpath(s) => s.hit(rect, anchor),
            other => other.intersects(rect),
        }
    }

    /// Forgets memoized containment, if this shape keeps any.
    pub fn reset_containment(&mut self) {
        if let Self::Subpath(s) = self {
            s.reset_containment();
        }
    }
}

impl HitTest for Shape {
    fn bounds(&self) -> Rect {
        self.as_hit_test().bounds()
    }

    fn intersects(&self, rect: &Rectangle) -> bool {
        self.as_hit_test().intersects(rect)
    }

    fn winding(&self, pt: Point) -> i32 {
        self.as_hit_test().winding(pt)
    }

    fn replay(&self, sink: &mut dyn PathSink) {
        self.as_hit_test().replay(sink);
    }
}

impl From<Rectangle> for Shape {
    fn from(r: Rectangle) -> Self {
        Self::Rectangle(r)
    }
}

impl From<Circle> for Shape {
    fn from(c: Circle) -> Self {
        Self::Circle(c)
    }
}

impl From<Subpath> for Shape {
    fn from(s: Subpath) -> Self {
        Self::Subpath(s)
    }
}

impl Placed<Shape> {
    /// Device-space selection test.
    pub fn hit(&mut self, rect: &Rectangle, anchor: Point) -> bool {
        if rect.is_empty() {
            return false;
        }
        let local_rect = self.local_rect(rect);
        let local_anchor = self.local_point(anchor);
        self.geometry.hit(&local_rect, local_anchor)
    }
}

impl Placed<Subpath> {
    /// Device-space selection test.
    pub fn hit(&mut self, rect: &Rectangle, anchor: Point) -> bool {
        if rect.is_empty() {
            return false;
        }
        let local_rect = self.local_rect(rect);
        let local_anchor = self.local_point(anchor);
        self.geometry.hit(&local_rect, local_anchor)
    }
}
