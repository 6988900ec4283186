// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless surface that logs what it is asked to draw.
//!
//! [`RecordingSurface`] does not rasterize anything. It is intended for tests,
//! benches, and hosts that want a display list of the commands a
//! [`TrackingSurface`](crate::TrackingSurface) forwarded or a range query
//! replayed.

use alloc::vec::Vec;

use kurbo::{Affine, Point};
use marquee_geometry::{PathSink, Rectangle};

use crate::{DrawingSurface, TransformProvider, TransformStack};

/// A drawing command as received by the surface.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceOp {
    /// `begin_path()`.
    BeginPath,
    /// `move_to(p)`.
    MoveTo(Point),
    /// `line_to(p)`.
    LineTo(Point),
    /// `quad_to(p1, p2)`.
    QuadTo(Point, Point),
    /// `curve_to(p1, p2, p3)`.
    CurveTo(Point, Point, Point),
    /// `arc_to(p1, p2, radius)`.
    ArcTo {
        /// Corner point.
        p1: Point,
        /// Point the second tangent heads toward.
        p2: Point,
        /// Corner radius.
        radius: f64,
    },
    /// `arc(center, radius, start_angle, end_angle, anticlockwise)`.
    Arc {
        /// Circle center.
        center: Point,
        /// Circle radius.
        radius: f64,
        /// Start angle in radians.
        start_angle: f64,
        /// End angle in radians.
        end_angle: f64,
        /// Drawing direction.
        anticlockwise: bool,
    },
    /// `rect(r)`.
    Rect(Rectangle),
    /// `close_path()`.
    ClosePath,
    /// `fill_rect(r)`.
    FillRect(Rectangle),
    /// `stroke_rect(r)`.
    StrokeRect(Rectangle),
    /// `clear_rect(r)`.
    ClearRect(Rectangle),
}

/// An op together with the transform that was current when it arrived.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceEvent {
    /// The command.
    pub op: SurfaceOp,
    /// Current transform at the time of the command.
    pub transform: Affine,
}

/// Drawing surface that records every command it receives.
#[derive(Clone, Default, Debug)]
pub struct RecordingSurface {
    events: Vec<SurfaceEvent>,
    transforms: TransformStack,
}

impl RecordingSurface {
    /// An empty log with an identity transform.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded command with its transform, in arrival order.
    pub fn events(&self) -> &[SurfaceEvent] {
        &self.events
    }

    /// Recorded commands without their transforms.
    pub fn ops(&self) -> impl Iterator<Item = &SurfaceOp> + '_ {
        self.events.iter().map(|e| &e.op)
    }

    /// Drops the log. The transform state is kept.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// The surface's transform state.
    pub fn transforms(&self) -> &TransformStack {
        &self.transforms
    }

    /// Mutable access to the surface's transform state.
    pub fn transforms_mut(&mut self) -> &mut TransformStack {
        &mut self.transforms
    }

    fn push(&mut self, op: SurfaceOp) {
        self.events.push(SurfaceEvent {
            op,
            transform: self.transforms.current(),
        });
    }
}

impl PathSink for RecordingSurface {
    fn move_to(&mut self, p: Point) {
        self.push(SurfaceOp::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.push(SurfaceOp::LineTo(p));
    }

    fn quad_to(&mut self, p1: Point, p2: Point) {
        self.push(SurfaceOp::QuadTo(p1, p2));
    }

    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point) {
        self.push(SurfaceOp::CurveTo(p1, p2, p3));
    }

    fn arc_to(&mut self, p1: Point, p2: Point, radius: f64) {
        self.push(SurfaceOp::ArcTo { p1, p2, radius });
    }

    fn arc(
        &mut self,
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    ) {
        self.push(SurfaceOp::Arc {
            center,
            radius,
            start_angle,
            end_angle,
            anticlockwise,
        });
    }

    fn rect(&mut self, rect: Rectangle) {
        self.push(SurfaceOp::Rect(rect));
    }

    fn close_path(&mut self) {
        self.push(SurfaceOp::ClosePath);
    }
}

impl DrawingSurface for RecordingSurface {
    fn begin_path(&mut self) {
        self.push(SurfaceOp::BeginPath);
    }

    fn fill_rect(&mut self, rect: Rectangle) {
        self.push(SurfaceOp::FillRect(rect));
    }

    fn stroke_rect(&mut self, rect: Rectangle) {
        self.push(SurfaceOp::StrokeRect(rect));
    }

    fn clear_rect(&mut self, rect: Rectangle) {
        self.push(SurfaceOp::ClearRect(rect));
    }

    fn save(&mut self) {
        self.transforms.save();
    }

    fn restore(&mut self) {
        self.transforms.restore();
    }

    fn set_transform(&mut self, transform: Affine) {
        let [a, b, c, d, e, f] = transform.as_coeffs();
        self.transforms.set_transform(a, b, c, d, e, f);
    }
}

impl TransformProvider for RecordingSurface {
    fn current_transform(&self) -> Affine {
        self.transforms.current()
    }
}
