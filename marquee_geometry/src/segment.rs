// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Straight segments and helpers shared by the curve primitives.

use kurbo::{Point, Rect};

use crate::Rectangle;

/// Exact segment-vs-rectangle test.
///
/// Axis-aligned segments are tested as zero-thickness rectangles. Other
/// segments are rejected when both endpoints lie beyond the same rectangle
/// edge, then accepted when the rectangle's corners fall on both sides of
/// the segment's supporting line.
pub(crate) fn line_intersects_rect(p0: Point, p1: Point, rect: &Rectangle) -> bool {
    if rect.is_empty() {
        return false;
    }
    if p0.x == p1.x || p0.y == p1.y {
        return Rectangle::from_points(p0, p1).intersects(rect);
    }
    let (x0, x1, y0, y1) = (rect.x, rect.right(), rect.y, rect.bottom());
    if (p0.x <= x0 && p1.x <= x0)
        || (p0.x >= x1 && p1.x >= x1)
        || (p0.y <= y0 && p1.y <= y0)
        || (p0.y >= y1 && p1.y >= y1)
    {
        return false;
    }
    let dir = p1 - p0;
    let mut above = false;
    let mut below = false;
    for corner in rect.corners() {
        let side = dir.cross(corner - p0);
        if side > 0.0 {
            above = true;
        } else if side < 0.0 {
            below = true;
        }
    }
    above && below
}

/// Winding contribution of a straight segment around `pt`.
pub(crate) fn line_winding(p0: Point, p1: Point, pt: Point) -> i32 {
    if p0.y == p1.y {
        return 0;
    }
    let (dir, lo, hi) = if p0.y < p1.y {
        (1, p0.y, p1.y)
    } else {
        (-1, p1.y, p0.y)
    };
    if pt.y < lo || pt.y >= hi {
        return 0;
    }
    let x = p0.x + (pt.y - p0.y) * (p1.x - p0.x) / (p1.y - p0.y);
    if x > pt.x { dir } else { 0 }
}

/// Returns `true` if `bounds` overlaps the open interior of `rect`.
///
/// Degenerate bounds (a horizontal or vertical curve) still count when they
/// pass through the interior.
pub(crate) fn bounds_reach(bounds: Rect, rect: &Rectangle) -> bool {
    bounds.x0 < rect.right() && bounds.x1 > rect.x && bounds.y0 < rect.bottom() && bounds.y1 > rect.y
}

/// Checks a curve against the four edges of `rect`.
///
/// `at_x(x)` and `at_y(y)` return the curve points on the vertical line `x`
/// and the horizontal line `y`. A hit needs a crossing strictly between the
/// edge's end corners.
pub(crate) fn crosses_edges<I>(
    rect: &Rectangle,
    at_x: impl Fn(f64) -> I,
    at_y: impl Fn(f64) -> I,
) -> bool
where
    I: IntoIterator<Item = Point>,
{
    let (x0, x1, y0, y1) = (rect.x, rect.right(), rect.y, rect.bottom());
    [y0, y1]
        .into_iter()
        .any(|y| at_y(y).into_iter().any(|p| p.x > x0 && p.x < x1))
        || [x0, x1]
            .into_iter()
            .any(|x| at_x(x).into_iter().any(|p| p.y > y0 && p.y < y1))
}

#[cfg(test)]
mod tests {
    use super::*;

    const R: Rectangle = Rectangle::new(0.0, 0.0, 10.0, 10.0);

    #[test]
    fn axis_aligned_segments() {
        let hit = line_intersects_rect(Point::new(-5.0, 5.0), Point::new(15.0, 5.0), &R);
        assert!(hit, "horizontal line through the middle");
        let on_edge = line_intersects_rect(Point::new(-5.0, 0.0), Point::new(15.0, 0.0), &R);
        assert!(!on_edge, "running along the top edge only touches");
        let vertical = line_intersects_rect(Point::new(3.0, -5.0), Point::new(3.0, 1.0), &R);
        assert!(vertical, "vertical line poking into the top");
    }

    #[test]
    fn diagonal_segments() {
        assert!(line_intersects_rect(
            Point::new(-1.0, 5.0),
            Point::new(5.0, -1.0),
            &R
        ));
        assert!(
            !line_intersects_rect(Point::new(-5.0, 3.0), Point::new(3.0, -5.0), &R),
            "cuts past the corner without entering"
        );
        assert!(
            !line_intersects_rect(Point::new(11.0, 0.0), Point::new(20.0, 9.0), &R),
            "entirely to the right"
        );
        assert!(
            line_intersects_rect(Point::new(2.0, 2.0), Point::new(3.0, 4.0), &R),
            "entirely inside"
        );
    }

    #[test]
    fn touching_a_corner_is_not_a_hit() {
        assert!(!line_intersects_rect(
            Point::new(-5.0, 5.0),
            Point::new(5.0, -5.0),
            &R
        ));
    }

    #[test]
    fn winding_uses_half_open_ranges() {
        let down = (Point::new(5.0, 0.0), Point::new(5.0, 10.0));
        assert_eq!(line_winding(down.0, down.1, Point::new(0.0, 0.0)), 1);
        assert_eq!(line_winding(down.0, down.1, Point::new(0.0, 10.0)), 0);
        assert_eq!(line_winding(down.1, down.0, Point::new(0.0, 5.0)), -1);
        assert_eq!(line_winding(down.0, down.1, Point::new(6.0, 5.0)), 0);
        assert_eq!(
            line_winding(Point::new(0.0, 3.0), Point::new(9.0, 3.0), Point::new(1.0, 3.0)),
            0
        );
    }
}
