// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Circular arcs.
//!
//! Two constructions are supported, matching the two canvas arc calls:
//!
//! - [`Arc::from_tangents`]: the rounded corner drawn by `arcTo`. The arc of
//!   the given radius is tangent to the line from the current point toward
//!   the control point and to the line from the control point toward the end
//!   point.
//! - [`Arc::from_center`]: the arc drawn by `arc(x, y, r, start, end, ccw)`.
//!
//! Angles are measured from `+X` toward `+Y`. On a y-down surface an
//! increasing angle is a clockwise turn on screen, which is what
//! [`Arc::is_clockwise`] reports.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Rect, Vec2};
use smallvec::SmallVec;

use crate::kernel::{HALF_PI, THREE_HALF_PI, TAU, normalize_angle};
use crate::{HitTest, PathSink, Rectangle};

/// Slack for angular membership at the ends of a sweep.
const ANGLE_EPSILON: f64 = 1e-9;

/// Legs closer to parallel than this do not define a corner.
const COLLINEAR_EPSILON: f64 = 1e-12;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Construction {
    Tangent {
        control: Point,
        end: Point,
    },
    Center {
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    },
}

/// Piece of the arc that is monotone in `y`.
#[derive(Clone, Copy, Debug)]
struct MonoArc {
    from: Point,
    to: Point,
    /// `+1` for the right half of the circle, `-1` for the left half.
    side: f64,
}

impl MonoArc {
    fn winding(&self, center: Point, radius: f64, pt: Point) -> i32 {
        let (y0, y1) = (self.from.y, self.to.y);
        if y0 == y1 {
            return 0;
        }
        let (dir, lo, hi) = if y0 < y1 { (1, y0, y1) } else { (-1, y1, y0) };
        if pt.y < lo || pt.y >= hi {
            return 0;
        }
        let dy = pt.y - center.y;
        let x = center.x + self.side * (radius * radius - dy * dy).max(0.0).sqrt();
        if x > pt.x { dir } else { 0 }
    }
}

/// A circular arc with cached bounds and monotone decomposition.
#[derive(Clone, Debug)]
pub struct Arc {
    center: Point,
    radius: f64,
    start_angle: f64,
    sweep: f64,
    start: Point,
    end: Point,
    bounds: Rect,
    pieces: SmallVec<[MonoArc; 3]>,
    construction: Construction,
}

impl Arc {
    /// Builds the rounded corner from `p0` through `p1` toward `p2`.
    ///
    /// Returns `None` when the corner is degenerate: `p0 == p1`, `p1 == p2`,
    /// collinear legs, or a radius that is not strictly positive. The canvas
    /// contract draws a straight line to `p1` in those cases.
    pub fn from_tangents(p0: Point, p1: Point, p2: Point, radius: f64) -> Option<Self> {
        if !radius.is_finite() || radius <= 0.0 || p0 == p1 || p1 == p2 {
            return None;
        }
        let before = unit(p1 - p0);
        let after = unit(p2 - p1);
        let cross = before.cross(after);
        if cross.abs() < COLLINEAR_EPSILON {
            return None;
        }
        // Distance from the corner to each tangent point, r·tan(θ/2).
        let dist = (radius * (1.0 - before.dot(after)) / cross).abs();
        let t1 = p1 - before * dist;
        let t2 = p1 + after * dist;
        let clockwise = cross > 0.0;
        let center = center_from_chord(t1, t2, radius, clockwise);

        let start_angle = normalize_angle((t1.y - center.y).atan2(t1.x - center.x));
        let end_angle = normalize_angle((t2.y - center.y).atan2(t2.x - center.x));
        let sweep = if clockwise {
            normalize_angle(end_angle - start_angle)
        } else {
            -normalize_angle(start_angle - end_angle)
        };
        Some(Self::build(
            center,
            radius,
            start_angle,
            sweep,
            t1,
            t2,
            Construction::Tangent { control: p1, end: p2 },
        ))
    }

    /// Builds an arc around `center` from `start_angle` to `end_angle`.
    ///
    /// The sweep follows the canvas rules: a difference of at least a full
    /// turn in the drawing direction yields the whole circle, anything else is
    /// reduced into `[0, 2π)`. Returns `None` for a radius that is not
    /// strictly positive.
    pub fn from_center(
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    ) -> Option<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return None;
        }
        let sweep = if anticlockwise {
            let d = start_angle - end_angle;
            -(if d >= TAU { TAU } else { normalize_angle(d) })
        } else {
            let d = end_angle - start_angle;
            if d >= TAU { TAU } else { normalize_angle(d) }
        };
        let start = point_at(center, radius, start_angle);
        let end = if sweep.abs() >= TAU {
            start
        } else {
            point_at(center, radius, start_angle + sweep)
        };
        Some(Self::build(
            center,
            radius,
            normalize_angle(start_angle),
            sweep,
            start,
            end,
            Construction::Center {
                start_angle,
                end_angle,
                anticlockwise,
            },
        ))
    }

    fn build(
        center: Point,
        radius: f64,
        start_angle: f64,
        sweep: f64,
        start: Point,
        end: Point,
        construction: Construction,
    ) -> Self {
        let mut arc = Self {
            center,
            radius,
            start_angle,
            sweep,
            start,
            end,
            bounds: Rect::from_points(start, end),
            pieces: SmallVec::new(),
            construction,
        };
        arc.bounds = arc.compute_bounds();
        arc.pieces = arc.compute_pieces();
        arc
    }

    /// Center of the arc's circle.
    pub fn center(&self) -> Point {
        self.center
    }

    /// Radius of the arc's circle.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Angle of the first point, in `[0, 2π)`.
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    /// Angle of the last point, in `[0, 2π)`.
    pub fn end_angle(&self) -> f64 {
        normalize_angle(self.start_angle + self.sweep)
    }

    /// Signed angular extent. Positive sweeps increase the angle.
    pub fn sweep(&self) -> f64 {
        self.sweep
    }

    /// Returns `true` if the angle increases along the arc.
    pub fn is_clockwise(&self) -> bool {
        self.sweep > 0.0
    }

    /// First point of the arc.
    pub fn start(&self) -> Point {
        self.start
    }

    /// Last point of the arc.
    pub fn end(&self) -> Point {
        self.end
    }

    /// The two points where the arc meets its tangent legs.
    ///
    /// For center-form arcs these are simply the first and last points.
    pub fn tangent_points(&self) -> (Point, Point) {
        (self.start, self.end)
    }

    /// Returns `true` if `angle` lies on the directed sweep.
    pub fn contains_angle(&self, angle: f64) -> bool {
        let extent = self.sweep.abs();
        if extent >= TAU {
            return true;
        }
        let rel = if self.sweep >= 0.0 {
            normalize_angle(angle - self.start_angle)
        } else {
            normalize_angle(self.start_angle - angle)
        };
        rel <= extent + ANGLE_EPSILON || rel >= TAU - ANGLE_EPSILON
    }

    /// Offset along the sweep at which `angle` is reached, if strictly inside.
    fn interior_offset(&self, angle: f64) -> Option<f64> {
        let rel = if self.sweep >= 0.0 {
            normalize_angle(angle - self.start_angle)
        } else {
            normalize_angle(self.start_angle - angle)
        };
        (rel > ANGLE_EPSILON && rel < self.sweep.abs() - ANGLE_EPSILON).then_some(rel)
    }

    fn quadrant_points(&self) -> [(f64, Point); 4] {
        let (c, r) = (self.center, self.radius);
        [
            (0.0, Point::new(c.x + r, c.y)),
            (HALF_PI, Point::new(c.x, c.y + r)),
            (core::f64::consts::PI, Point::new(c.x - r, c.y)),
            (THREE_HALF_PI, Point::new(c.x, c.y - r)),
        ]
    }

    fn compute_bounds(&self) -> Rect {
        let mut bounds = Rect::from_points(self.start, self.end);
        for (angle, pt) in self.quadrant_points() {
            if self.contains_angle(angle) {
                bounds = bounds.union_pt(pt);
            }
        }
        bounds
    }

    fn compute_pieces(&self) -> SmallVec<[MonoArc; 3]> {
        let mut pieces = SmallVec::new();
        if self.sweep == 0.0 {
            return pieces;
        }
        // y extremes sit at π/2 and 3π/2.
        let [_, bottom, _, top] = self.quadrant_points();
        let mut cuts: SmallVec<[(f64, Point); 2]> = SmallVec::new();
        for (angle, pt) in [bottom, top] {
            if let Some(rel) = self.interior_offset(angle) {
                cuts.push((rel, pt));
            }
        }
        cuts.sort_unstable_by(|a, b| a.0.total_cmp(&b.0));

        let dir = self.sweep.signum();
        let mut from = (0.0, self.start);
        for to in cuts.into_iter().chain([(self.sweep.abs(), self.end)]) {
            let mid = self.start_angle + dir * 0.5 * (from.0 + to.0);
            pieces.push(MonoArc {
                from: from.1,
                to: to.1,
                side: if mid.cos() >= 0.0 { 1.0 } else { -1.0 },
            });
            from = to;
        }
        pieces
    }

    fn hits_edge_point(&self, rel: Vec2, lo: f64, hi: f64, along: f64) -> bool {
        along > lo && along < hi && self.contains_angle(rel.y.atan2(rel.x))
    }
}

impl HitTest for Arc {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn intersects(&self, rect: &Rectangle) -> bool {
        if rect.is_empty() {
            return false;
        }
        if rect.contains_strict(self.start) || rect.contains_strict(self.end) {
            return true;
        }
        let (c, r) = (self.center, self.radius);
        if c.x + r <= rect.x || c.x - r >= rect.right() || c.y + r <= rect.y || c.y - r >= rect.bottom()
        {
            return false;
        }
        let r2 = r * r;
        for edge_y in [rect.y, rect.bottom()] {
            let dy = edge_y - c.y;
            if dy.abs() < r {
                let dx = (r2 - dy * dy).sqrt();
                for dx in [dx, -dx] {
                    if self.hits_edge_point(Vec2::new(dx, dy), rect.x, rect.right(), c.x + dx) {
                        return true;
                    }
                }
            }
        }
        for edge_x in [rect.x, rect.right()] {
            let dx = edge_x - c.x;
            if dx.abs() < r {
                let dy = (r2 - dx * dx).sqrt();
                for dy in [dy, -dy] {
                    if self.hits_edge_point(Vec2::new(dx, dy), rect.y, rect.bottom(), c.y + dy) {
                        return true;
                    }
                }
            }
        }
        false
    }

    fn winding(&self, pt: Point) -> i32 {
        self.pieces
            .iter()
            .map(|piece| piece.winding(self.center, self.radius, pt))
            .sum()
    }

    fn replay(&self, sink: &mut dyn PathSink) {
        match self.construction {
            Construction::Tangent { control, end } => sink.arc_to(control, end, self.radius),
            Construction::Center {
                start_angle,
                end_angle,
                anticlockwise,
            } => sink.arc(self.center, self.radius, start_angle, end_angle, anticlockwise),
        }
    }
}

fn unit(v: Vec2) -> Vec2 {
    v / v.hypot()
}

fn point_at(center: Point, radius: f64, angle: f64) -> Point {
    Point::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}

/// Center of the circle of `radius` through `t1` and `t2`, on the side the
/// path turns toward.
fn center_from_chord(t1: Point, t2: Point, radius: f64, clockwise: bool) -> Point {
    let mid = t1.midpoint(t2);
    let chord = t2 - t1;
    let len = chord.hypot();
    let h = (radius * radius - 0.25 * len * len).max(0.0).sqrt();
    let normal = Vec2::new(-chord.y, chord.x) / len;
    if clockwise {
        mid + normal * h
    } else {
        mid - normal * h
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::{FRAC_PI_4, PI};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn corner() -> Arc {
        Arc::from_tangents(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            3.0,
        )
        .unwrap()
    }

    #[test]
    fn tangent_construction() {
        let arc = corner();
        let (t1, t2) = arc.tangent_points();
        assert!(t1.distance(Point::new(7.0, 0.0)) < 1e-9, "t1 = {t1:?}");
        assert!(t2.distance(Point::new(10.0, 3.0)) < 1e-9, "t2 = {t2:?}");
        assert!(arc.center().distance(Point::new(7.0, 3.0)) < 1e-9);
        assert!(close(arc.start_angle(), THREE_HALF_PI));
        assert!(close(arc.end_angle(), 0.0) || close(arc.end_angle(), TAU));
        assert!(close(arc.sweep(), HALF_PI));
        assert!(arc.is_clockwise(), "turning toward +y increases the angle");
    }

    #[test]
    fn tangent_points_symmetric_and_center_equidistant() {
        let arc = corner();
        let control = Point::new(10.0, 0.0);
        let (t1, t2) = arc.tangent_points();
        assert!((t1.distance(control) - t2.distance(control)).abs() < 1e-6);
        let c = arc.center();
        assert!((c.distance(t1) - c.distance(t2)).abs() < 1e-6);
        assert!((c.distance(t1) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn anticlockwise_corner() {
        let arc = Arc::from_tangents(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, -10.0),
            3.0,
        )
        .unwrap();
        assert!(!arc.is_clockwise());
        assert!(arc.center().distance(Point::new(7.0, -3.0)) < 1e-9);
        assert!(close(arc.sweep(), -HALF_PI));
    }

    #[test]
    fn degenerate_corners() {
        let p = Point::new(1.0, 1.0);
        let q = Point::new(5.0, 1.0);
        assert!(Arc::from_tangents(p, p, q, 2.0).is_none());
        assert!(Arc::from_tangents(p, q, q, 2.0).is_none());
        assert!(Arc::from_tangents(p, q, Point::new(9.0, 1.0), 2.0).is_none());
        assert!(Arc::from_tangents(p, q, Point::new(5.0, 9.0), 0.0).is_none());
    }

    #[test]
    fn bounds_cover_the_corner() {
        let b = corner().bounds();
        assert!(close(b.x0, 7.0) && close(b.y0, 0.0));
        assert!(close(b.x1, 10.0) && close(b.y1, 3.0));
    }

    #[test]
    fn bounds_include_crossed_quadrants() {
        let arc = Arc::from_center(Point::ZERO, 10.0, 0.0, PI, false).unwrap();
        let b = arc.bounds();
        assert!(close(b.x0, -10.0) && close(b.x1, 10.0));
        assert!(close(b.y0, 0.0) && close(b.y1, 10.0));
    }

    #[test]
    fn edge_crossing_on_the_sweep() {
        let arc = corner();
        assert!(arc.intersects(&Rectangle::new(8.5, -1.0, 3.0, 2.0)));
    }

    #[test]
    fn rectangle_inside_the_circle_misses_the_arc() {
        let arc = corner();
        assert!(!arc.intersects(&Rectangle::new(6.0, 2.0, 1.0, 1.0)));
    }

    #[test]
    fn crossing_outside_the_sweep_is_ignored() {
        let arc = corner();
        // This box crosses the circle near angle 3π/4, far from the corner.
        assert!(!arc.intersects(&Rectangle::new(3.0, 4.0, 2.0, 2.0)));
    }

    #[test]
    fn start_point_inside() {
        let arc = corner();
        assert!(arc.intersects(&Rectangle::new(6.5, -0.5, 1.0, 1.0)));
    }

    #[test]
    fn reflex_center_arc() {
        let arc = Arc::from_center(Point::ZERO, 10.0, 0.0, THREE_HALF_PI, false).unwrap();
        assert!(close(arc.sweep(), THREE_HALF_PI));
        assert!(arc.contains_angle(PI));
        assert!(!arc.contains_angle(7.0 * FRAC_PI_4));
        assert!(arc.intersects(&Rectangle::new(-11.0, -1.0, 2.0, 2.0)));
        assert!(!arc.intersects(&Rectangle::new(6.07, -8.07, 2.0, 2.0)));
    }

    #[test]
    fn anticlockwise_center_arc_takes_the_long_way() {
        let arc = Arc::from_center(Point::ZERO, 10.0, 0.0, HALF_PI, true).unwrap();
        assert!(close(arc.sweep(), -THREE_HALF_PI));
        assert!(!arc.contains_angle(FRAC_PI_4));
        assert!(arc.contains_angle(PI));
    }

    #[test]
    fn full_circle_winding() {
        let arc = Arc::from_center(Point::ZERO, 10.0, 0.0, TAU, false).unwrap();
        assert!(close(arc.sweep(), TAU));
        assert_eq!(arc.winding(Point::ZERO), 1);
        assert_eq!(arc.winding(Point::new(3.0, -4.0)), 1);
        assert_eq!(arc.winding(Point::new(11.0, 0.0)), 0);
        assert_eq!(arc.winding(Point::new(-11.0, 5.0)), 0);
    }

    #[test]
    fn corner_winding_contribution() {
        let arc = corner();
        assert_eq!(arc.winding(Point::new(8.0, 1.0)), 1);
        assert_eq!(arc.winding(Point::new(9.5, 1.0)), 0);
        assert_eq!(arc.winding(Point::new(8.0, 3.5)), 0);
    }

    #[test]
    fn zero_radius_center_arc() {
        assert!(Arc::from_center(Point::ZERO, 0.0, 0.0, PI, false).is_none());
    }
}
