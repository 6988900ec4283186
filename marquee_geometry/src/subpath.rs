// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contiguous command sequences.

use alloc::vec::Vec;
use core::slice;

use hashbrown::HashMap;
use kurbo::{Point, Rect};

use crate::segment::{bounds_reach, line_intersects_rect, line_winding};
use crate::{Arc, CubicBezier, HitTest, PathSink, QuadraticBezier, Rectangle};

/// One recorded path command.
///
/// Curve and arc commands carry their fully constructed primitive, including
/// the start point they were drawn from.
#[derive(Clone, Debug)]
pub enum PathCommand {
    /// Begins the subpath.
    MoveTo(Point),
    /// Straight segment to the point.
    LineTo(Point),
    /// Quadratic Bézier segment.
    Quad(QuadraticBezier),
    /// Cubic Bézier segment.
    Cubic(CubicBezier),
    /// Circular arc. Any connecting line is recorded as a separate `LineTo`.
    Arc(Arc),
    /// Straight segment back to the start point.
    Close,
}

/// Hashable identity of an anchor point.
type PointKey = (u64, u64);

fn point_key(p: Point) -> PointKey {
    // Adding zero folds -0.0 onto 0.0.
    ((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits())
}

/// Endpoint equality up to accumulated rounding from curve construction.
fn coincident(a: Point, b: Point) -> bool {
    let tolerance = 1e-9 * (1.0 + a.x.abs().max(a.y.abs()));
    (a.x - b.x).abs() <= tolerance && (a.y - b.y).abs() <= tolerance
}

#[derive(Clone, Copy, Debug)]
struct LastQuery {
    rect: Rectangle,
    anchor: PointKey,
    verdict: bool,
}

/// A contiguous sequence of path commands.
///
/// Drawing methods follow canvas semantics. A segment command on an empty
/// subpath first moves to its first point, and closing returns the current
/// point to the start.
///
/// [`Subpath::hit`] answers the selection question for a query rectangle and
/// an anchor point. It memoizes the anchor's containment verdict, which stays
/// valid until the subpath grows or [`Subpath::reset_containment`] is called.
#[derive(Clone, Debug, Default)]
pub struct Subpath {
    commands: Vec<PathCommand>,
    start: Option<Point>,
    current: Option<Point>,
    bounds: Option<Rect>,
    containment: HashMap<PointKey, bool>,
    last_query: Option<LastQuery>,
    edge_walks: u64,
}

impl Subpath {
    /// Creates an empty subpath.
    pub fn new() -> Self {
        Self::default()
    }

    /// A closed rectangular subpath, as produced by `rect()`.
    pub fn from_rect(rect: Rectangle) -> Self {
        let mut sp = Self::new();
        let [a, b, c, d] = rect.corners();
        sp.move_to(a);
        sp.line_to(b);
        sp.line_to(c);
        sp.line_to(d);
        sp.close_path();
        sp
    }

    /// Recorded commands, in order.
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Point the next segment starts from, if any.
    pub fn current_point(&self) -> Option<Point> {
        self.current
    }

    /// Point a `close_path` returns to, if any.
    pub fn start_point(&self) -> Option<Point> {
        self.start
    }

    /// Number of edge walks performed by [`Subpath::hit`] so far.
    pub fn edge_walks(&self) -> u64 {
        self.edge_walks
    }

    /// Returns `true` if the last command closes the subpath, or the current
    /// point has come back to the start.
    pub fn is_closed(&self) -> bool {
        match self.commands.last() {
            None | Some(PathCommand::MoveTo(_)) => false,
            Some(PathCommand::Close) => true,
            Some(_) => match (self.start, self.current) {
                (Some(start), Some(current)) => coincident(start, current),
                _ => false,
            },
        }
    }

    /// Returns `true` once anything beyond a move has been recorded.
    pub fn has_segments(&self) -> bool {
        self.commands
            .iter()
            .any(|c| !matches!(c, PathCommand::MoveTo(_)))
    }

    /// Starts (or restarts) the subpath at `p`.
    ///
    /// Consecutive moves collapse into the last one.
    pub fn move_to(&mut self, p: Point) {
        self.invalidate();
        if let Some(PathCommand::MoveTo(last)) = self.commands.last_mut() {
            *last = p;
        } else {
            self.commands.push(PathCommand::MoveTo(p));
        }
        self.start = Some(p);
        self.current = Some(p);
    }

    /// Adds a straight segment. On an empty subpath this is a move.
    pub fn line_to(&mut self, p: Point) {
        let Some(from) = self.current else {
            self.move_to(p);
            return;
        };
        self.push_line(from, p);
    }

    /// Adds a quadratic Bézier segment.
    pub fn quad_to(&mut self, p1: Point, p2: Point) {
        let from = self.ensure_started(p1);
        let q = QuadraticBezier::new(from, p1, p2);
        self.push(q.bounds(), p2, PathCommand::Quad(q));
    }

    /// Adds a cubic Bézier segment.
    pub fn curve_to(&mut self, p1: Point, p2: Point, p3: Point) {
        let from = self.ensure_started(p1);
        let c = CubicBezier::new(from, p1, p2, p3);
        self.push(c.bounds(), p3, PathCommand::Cubic(c));
    }

    /// Adds a tangent arc toward `p1` and then `p2`.
    ///
    /// Returns `false` if the corner is degenerate, in which case a straight
    /// line to `p1` is recorded instead.
    pub fn arc_to(&mut self, p1: Point, p2: Point, radius: f64) -> bool {
        let from = self.ensure_started(p1);
        match Arc::from_tangents(from, p1, p2, radius) {
            Some(arc) => {
                self.push_arc(arc);
                true
            }
            None => {
                self.push_line(from, p1);
                false
            }
        }
    }

    /// Adds a center-form arc, connected to the current point by a line.
    ///
    /// A zero radius degenerates to the center point.
    pub fn arc(
        &mut self,
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    ) {
        match Arc::from_center(center, radius, start_angle, end_angle, anticlockwise) {
            Some(arc) => {
                if self.current.is_none() {
                    self.move_to(arc.start());
                }
                self.push_arc(arc);
            }
            None => self.line_to(center),
        }
    }

    /// Closes the subpath. Does nothing before the first move.
    pub fn close_path(&mut self) {
        let (Some(_), Some(start)) = (self.current, self.start) else {
            return;
        };
        self.invalidate();
        self.commands.push(PathCommand::Close);
        self.current = Some(start);
    }

    /// Forgets every memoized containment verdict.
    pub fn reset_containment(&mut self) {
        self.containment.clear();
        self.last_query = None;
    }

    /// Selection test for a query rectangle dragged from `anchor`.
    ///
    /// The subpath is hit when any segment crosses `rect`, or when it is
    /// closed and `anchor` lies inside it under the nonzero rule. The second
    /// case selects a region whose outline the rectangle never touches
    /// because it was drawn entirely inside.
    ///
    /// Containment verdicts are cached per anchor. An inside verdict answers
    /// without walking the edges. An outside verdict still walks them, since a
    /// growing rectangle may cross the outline later. Repeating the previous
    /// query verbatim does no work at all.
    pub fn hit(&mut self, rect: &Rectangle, anchor: Point) -> bool {
        if rect.is_empty() || self.commands.is_empty() {
            return false;
        }
        let key = point_key(anchor);
        if let Some(last) = self.last_query
            && last.anchor == key
            && last.rect == *rect
        {
            return last.verdict;
        }

        let cached = self.containment.get(&key).copied();
        let verdict = if cached == Some(true) {
            true
        } else {
            let reach = bounds_reach(self.bounds(), rect);
            let want_winding = cached.is_none() && self.is_closed();
            let mut crossed = false;
            let mut winding = 0;
            if reach || want_winding {
                self.edge_walks += 1;
                for seg in self.segments() {
                    if reach && seg.intersects(rect) {
                        crossed = true;
                        break;
                    }
                    if want_winding {
                        winding += seg.winding(anchor);
                    }
                }
            }
            if crossed {
                true
            } else {
                let inside = want_winding && winding != 0;
                self.containment.insert(key, inside);
                inside
            }
        };

        self.last_query = Some(LastQuery {
            rect: *rect,
            anchor: key,
            verdict,
        });
        verdict
    }

    fn segments(&self) -> Segments<'_> {
        Segments {
            commands: self.commands.iter(),
            start: Point::ZERO,
            current: Point::ZERO,
        }
    }

    fn ensure_started(&mut self, p: Point) -> Point {
        match self.current {
            Some(from) => from,
            None => {
                self.move_to(p);
                p
            }
        }
    }

    fn push_line(&mut self, from: Point, to: Point) {
        self.push(Rect::from_points(from, to), to, PathCommand::LineTo(to));
    }

    fn push_arc(&mut self, arc: Arc) {
        if let Some(from) = self.current
            && from != arc.start()
        {
            self.push_line(from, arc.start());
        }
        self.push(arc.bounds(), arc.end(), PathCommand::Arc(arc));
    }

    fn push(&mut self, bounds: Rect, to: Point, command: PathCommand) {
        self.invalidate();
        self.bounds = Some(match self.bounds {
            Some(b) => b.union(bounds),
            None => bounds,
        });
        self.commands.push(command);
        self.current = Some(to);
    }

    fn invalidate(&mut self) {
        if self.last_query.is_some() || !self.containment.is_empty() {
            self.reset_containment();
        }
    }
}

impl HitTest for Subpath {
    fn bounds(&self) -> Rect {
        self.bounds
            .or_else(|| self.start.map(|p| Rect::from_points(p, p)))
            .unwrap_or(Rect::ZERO)
    }

    fn intersects(&self, rect: &Rectangle) -> bool {
        if rect.is_empty() || !bounds_reach(self.bounds(), rect) {
            return false;
        }
        self.segments().any(|seg| seg.intersects(rect))
    }

    fn winding(&self, pt: Point) -> i32 {
        if !self.is_closed() {
            return 0;
        }
        self.segments().map(|seg| seg.winding(pt)).sum()
    }

    fn replay(&self, sink: &mut dyn PathSink) {
        for command in &self.commands {
            match command {
                PathCommand::MoveTo(p) => sink.move_to(*p),
                PathCommand::LineTo(p) => sink.line_to(*p),
                PathCommand::Quad(q) => q.replay(sink),
                PathCommand::Cubic(c) => c.replay(sink),
                PathCommand::Arc(a) => a.replay(sink),
                PathCommand::Close => sink.close_path(),
            }
        }
    }
}

enum Segment<'a> {
    Line(Point, Point),
    Quad(&'a QuadraticBezier),
    Cubic(&'a CubicBezier),
    Arc(&'a Arc),
}

impl Segment<'_> {
    fn intersects(&self, rect: &Rectangle) -> bool {
        match self {
            Self::Line(p0, p1) => line_intersects_rect(*p0, *p1, rect),
            Self::Quad(q) => q.intersects(rect),
            Self::Cubic(c) => c.intersects(rect),
            Self::Arc(a) => a.intersects(rect),
        }
    }

    fn winding(&self, pt: Point) -> i32 {
        match self {
            Self::Line(p0, p1) => line_winding(*p0, *p1, pt),
            Self::Quad(q) => q.winding(pt),
            Self::Cubic(c) => c.winding(pt),
            Self::Arc(a) => a.winding(pt),
        }
    }
}

/// Walks the drawn segments, turning `Close` into the closing line.
struct Segments<'a> {
    commands: slice::Iter<'a, PathCommand>,
    start: Point,
    current: Point,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let from = self.current;
            let segment = match self.commands.next()? {
                PathCommand::MoveTo(p) => {
                    self.start = *p;
                    self.current = *p;
                    continue;
                }
                PathCommand::LineTo(p) => {
                    self.current = *p;
                    Segment::Line(from, *p)
                }
                PathCommand::Close => {
                    self.current = self.start;
                    Segment::Line(from, self.start)
                }
                PathCommand::Quad(q) => {
                    self.current = q.end();
                    Segment::Quad(q)
                }
                PathCommand::Cubic(c) => {
                    self.current = c.end();
                    Segment::Cubic(c)
                }
                PathCommand::Arc(a) => {
                    self.current = a.end();
                    Segment::Arc(a)
                }
            };
            return Some(segment);
        }
    }
}
