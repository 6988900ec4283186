// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect};

use crate::kernel::TAU;
use crate::{HitTest, PathSink, Rectangle};

/// A filled disc.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    center: Point,
    radius: f64,
    bounds: Rect,
}

impl Circle {
    /// Creates a disc. Negative radii are treated as their magnitude.
    pub fn new(center: Point, radius: f64) -> Self {
        let radius = radius.abs();
        Self {
            center,
            radius,
            bounds: Rect::new(
                center.x - radius,
                center.y - radius,
                center.x + radius,
                center.y + radius,
            ),
        }
    }

    /// Center point.
    pub fn center(&self) -> Point {
        self.center
    }

    /// Radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns `true` if `pt` is within the radius, boundary included.
    pub fn contains_point(&self, pt: Point) -> bool {
        (pt - self.center).hypot2() <= self.radius * self.radius
    }
}

impl HitTest for Circle {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn intersects(&self, rect: &Rectangle) -> bool {
        if rect.is_empty() || !Rectangle::from_rect(self.bounds).intersects(rect) {
            return false;
        }
        // Nearest point of the rectangle to the center.
        let nearest = Point::new(
            self.center.x.clamp(rect.x, rect.right()),
            self.center.y.clamp(rect.y, rect.bottom()),
        );
        (nearest - self.center).hypot2() < self.radius * self.radius
    }

    fn winding(&self, pt: Point) -> i32 {
        i32::from((pt - self.center).hypot2() < self.radius * self.radius)
    }

    fn replay(&self, sink: &mut dyn PathSink) {
        sink.arc(self.center, self.radius, 0.0, TAU, false);
    }
}
