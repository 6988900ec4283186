// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{CubicBez, ParamCurve, Point, Rect};
use smallvec::SmallVec;

use crate::kernel::{EPSILON, QuadRoots, solve_unit_cubic, solve_unit_quadratic};
use crate::segment::{bounds_reach, crosses_edges};
use crate::{HitTest, PathSink, Rectangle};

/// Power-basis coefficients `(a, b, c, d)` of one axis: `a·t³ + b·t² + c·t + d`.
fn coeffs(p0: f64, p1: f64, p2: f64, p3: f64) -> (f64, f64, f64, f64) {
    (
        -p0 + 3.0 * p1 - 3.0 * p2 + p3,
        3.0 * p0 - 6.0 * p1 + 3.0 * p2,
        3.0 * (p1 - p0),
        p0,
    )
}

/// Roots of the derivative `3a·t² + 2b·t + c` in the unit interval.
fn extrema(p0: f64, p1: f64, p2: f64, p3: f64) -> QuadRoots {
    let (a, b, c, _) = coeffs(p0, p1, p2, p3);
    solve_unit_quadratic(3.0 * a, 2.0 * b, c)
}

/// A cubic Bézier segment.
#[derive(Clone, Debug)]
pub struct CubicBezier {
    curve: CubicBez,
    bounds: Rect,
    pieces: SmallVec<[CubicBez; 3]>,
}

impl CubicBezier {
    /// Creates the curve from `p0` through control points `p1`, `p2` to `p3`.
    pub fn new(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        let curve = CubicBez::new(p0, p1, p2, p3);

        let mut bounds = Rect::from_points(p0, p3);
        for t in extrema(p0.x, p1.x, p2.x, p3.x)
            .into_iter()
            .chain(extrema(p0.y, p1.y, p2.y, p3.y))
        {
            bounds = bounds.union_pt(curve.eval(t));
        }

        // Roots come back sorted, so splitting left to right only needs the
        // remaining parameter rescaled onto the right-hand piece.
        let mut pieces = SmallVec::new();
        let mut rest = curve;
        let mut consumed = 0.0;
        for t in extrema(p0.y, p1.y, p2.y, p3.y) {
            if t <= EPSILON || t >= 1.0 - EPSILON {
                continue;
            }
            let local = (t - consumed) / (1.0 - consumed);
            if local <= EPSILON || local >= 1.0 - EPSILON {
                continue;
            }
            let (left, right) = split(&rest, local);
            pieces.push(left);
            rest = right;
            consumed = t;
        }
        pieces.push(rest);

        Self {
            curve,
            bounds,
            pieces,
        }
    }

    /// The underlying kurbo segment.
    pub fn curve(&self) -> CubicBez {
        self.curve
    }

    /// First point.
    pub fn start(&self) -> Point {
        self.curve.p0
    }

    /// First control point.
    pub fn control1(&self) -> Point {
        self.curve.p1
    }

    /// Second control point.
    pub fn control2(&self) -> Point {
        self.curve.p2
    }

    /// Last point.
    pub fn end(&self) -> Point {
        self.curve.p3
    }

    /// Point at parameter `t`.
    pub fn eval(&self, t: f64) -> Point {
        self.curve.eval(t)
    }

    /// De Casteljau subdivision at `t`.
    pub fn split_at(&self, t: f64) -> (CubicBez, CubicBez) {
        split(&self.curve, t)
    }

    /// Pieces of the curve that are monotone in `y` (between one and three).
    pub fn monotone_pieces(&self) -> &[CubicBez] {
        &self.pieces
    }

    /// Points where the curve meets the vertical line at `x`.
    pub fn crossings_at_x(&self, x: f64) -> SmallVec<[Point; 3]> {
        let CubicBez { p0, p1, p2, p3 } = self.curve;
        let (a, b, c, d) = coeffs(p0.x, p1.x, p2.x, p3.x);
        solve_unit_cubic(a, b, c, d - x)
            .into_iter()
            .map(|t| Point::new(x, self.curve.eval(t).y))
            .collect()
    }

    /// Points where the curve meets the horizontal line at `y`.
    pub fn crossings_at_y(&self, y: f64) -> SmallVec<[Point; 3]> {
        let CubicBez { p0, p1, p2, p3 } = self.curve;
        let (a, b, c, d) = coeffs(p0.y, p1.y, p2.y, p3.y);
        solve_unit_cubic(a, b, c, d - y)
            .into_iter()
            .map(|t| Point::new(self.curve.eval(t).x, y))
            .collect()
    }
}

fn split(c: &CubicBez, t: f64) -> (CubicBez, CubicBez) {
    let p01 = c.p0.lerp(c.p1, t);
    let p12 = c.p1.lerp(c.p2, t);
    let p23 = c.p2.lerp(c.p3, t);
    let p012 = p01.lerp(p12, t);
    let p123 = p12.lerp(p23, t);
    let mid = p012.lerp(p123, t);
    (
        CubicBez::new(c.p0, p01, p012, mid),
        CubicBez::new(mid, p123, p23, c.p3),
    )
}

fn mono_winding(c: &CubicBez, pt: Point) -> i32 {
    let (y0, y1) = (c.p0.y, c.p3.y);
    if y0 == y1 {
        return 0;
    }
    let (dir, lo, hi) = if y0 < y1 { (1, y0, y1) } else { (-1, y1, y0) };
    if pt.y < lo || pt.y >= hi {
        return 0;
    }
    let (a, b, cc, d) = coeffs(c.p0.y, c.p1.y, c.p2.y, c.p3.y);
    let Some(&t) = solve_unit_cubic(a, b, cc, d - pt.y).first() else {
        return 0;
    };
    if c.eval(t).x > pt.x { dir } else { 0 }
}

impl HitTest for CubicBezier {
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
        self.pieces.iter().map(|c| mono_winding(c, pt)).sum()
    }

    fn replay(&self, sink: &mut dyn PathSink) {
        sink.curve_to(self.control1(), self.control2(), self.end());
    }
}
