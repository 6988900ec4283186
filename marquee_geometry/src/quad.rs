// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{ParamCurve, Point, QuadBez, Rect};
use smallvec::SmallVec;

use crate::kernel::{EPSILON, solve_unit_quadratic};
use crate::segment::{bounds_reach, crosses_edges};
use crate::{HitTest, PathSink, Rectangle};

/// Power-basis coefficients `(a, b, c)` of one axis: `a·t² + b·t + c`.
fn coeffs(p0: f64, p1: f64, p2: f64) -> (f64, f64, f64) {
    (p0 - 2.0 * p1 + p2, 2.0 * (p1 - p0), p0)
}

/// Parameters where the curve reaches an extreme along one axis.
fn extrema(p0: f64, p1: f64, p2: f64) -> SmallVec<[f64; 2]> {
    let (a, b, _) = coeffs(p0, p1, p2);
    solve_unit_quadratic(0.0, 2.0 * a, b)
}

/// A quadratic Bézier segment.
#[derive(Clone, Debug)]
pub struct QuadraticBezier {
    curve: QuadBez,
    bounds: Rect,
    pieces: SmallVec<[QuadBez; 2]>,
}

impl QuadraticBezier {
    /// Creates the curve from `p0` through control point `p1` to `p2`.
    pub fn new(p0: Point, p1: Point, p2: Point) -> Self {
        let curve = QuadBez::new(p0, p1, p2);

        let mut bounds = Rect::from_points(p0, p2);
        for t in extrema(p0.x, p1.x, p2.x)
            .into_iter()
            .chain(extrema(p0.y, p1.y, p2.y))
        {
            bounds = bounds.union_pt(curve.eval(t));
        }

        let mut pieces = SmallVec::new();
        match extrema(p0.y, p1.y, p2.y)
            .into_iter()
            .find(|&t| t > EPSILON && t < 1.0 - EPSILON)
        {
            Some(t) => {
                let (left, right) = split(&curve, t);
                pieces.push(left);
                pieces.push(right);
            }
            None => pieces.push(curve),
        }

        Self {
            curve,
            bounds,
            pieces,
        }
    }

    /// The underlying kurbo segment.
    pub fn curve(&self) -> QuadBez {
        self.curve
    }

    /// First point.
    pub fn start(&self) -> Point {
        self.curve.p0
    }

    /// Control point.
    pub fn control(&self) -> Point {
        self.curve.p1
    }

    /// Last point.
    pub fn end(&self) -> Point {
        self.curve.p2
    }

    /// Point at parameter `t`.
    pub fn eval(&self, t: f64) -> Point {
        self.curve.eval(t)
    }

    /// De Casteljau subdivision at `t`.
    pub fn split_at(&self, t: f64) -> (QuadBez, QuadBez) {
        split(&self.curve, t)
    }

    /// Pieces of the curve that are monotone in `y`.
    pub fn monotone_pieces(&self) -> &[QuadBez] {
        &self.pieces
    }

    /// Points where the curve meets the vertical line at `x`.
    pub fn crossings_at_x(&self, x: f64) -> SmallVec<[Point; 2]> {
        let QuadBez { p0, p1, p2 } = self.curve;
        let (a, b, c) = coeffs(p0.x, p1.x, p2.x);
        solve_unit_quadratic(a, b, c - x)
            .into_iter()
            .map(|t| Point::new(x, self.curve.eval(t).y))
            .collect()
    }

    /// Points where the curve meets the horizontal line at `y`.
    pub fn crossings_at_y(&self, y: f64) -> SmallVec<[Point; 2]> {
        let QuadBez { p0, p1, p2 } = self.curve;
        let (a, b, c) = coeffs(p0.y, p1.y, p2.y);
        solve_unit_quadratic(a, b, c - y)
            .into_iter()
            .map(|t| Point::new(self.curve.eval(t).x, y))
            .collect()
    }
}

fn split(q: &QuadBez, t: f64) -> (QuadBez, QuadBez) {
    let p01 = q.p0.lerp(q.p1, t);
    let p12 = q.p1.lerp(q.p2, t);
    let mid = p01.lerp(p12, t);
    (QuadBez::new(q.p0, p01, mid), QuadBez::new(mid, p12, q.p2))
}

fn mono_winding(q: &QuadBez, pt: Point) -> i32 {
    let (y0, y1) = (q.p0.y, q.p2.y);
    if y0 == y1 {
        return 0;
    }
    let (dir, lo, hi) = if y0 < y1 { (1, y0, y1) } else { (-1, y1, y0) };
    if pt.y < lo || pt.y >= hi {
        return 0;
    }
    let (a, b, c) = coeffs(q.p0.y, q.p1.y, q.p2.y);
    let Some(&t) = solve_unit_quadratic(a, b, c - pt.y).first() else {
        return 0;
    };
    if q.eval(t).x > pt.x { dir } else { 0 }
}

impl HitTest for QuadraticBezier {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn intersects(&self, rect: &Rectangle) -> bool {
        if rect.is_empty() {
            return false;
        }
        if rect.contains_strict(self.start()) || rect.contains_strict(self.end()) {
            return true;
        }
        bounds_reach(self.bounds, rect)
            && crosses_edges(rect, |x| self.crossings_at_x(x), |y| self.crossings_at_y(y))
    }

    fn winding(&self, pt: Point) -> i32 {
        self.pieces.iter().map(|q| mono_winding(q, pt)).sum()
    }

    fn replay(&self, sink: &mut dyn PathSink) {
        sink.quad_to(self.control(), self.end());
    }
}
