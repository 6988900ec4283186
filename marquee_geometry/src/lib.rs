// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=marquee_geometry --heading-base-level=0

//! Marquee Geometry: analytic rectangle-selection tests for 2D path primitives.
//!
//! This crate answers one question for each primitive a drawing surface can
//! emit: _does this axis-aligned query rectangle touch it?_ Everything is
//! closed form. Curves are intersected against the four rectangle edges by
//! solving their quadratic or cubic polynomials, arcs by intersecting each
//! edge with the arc's circle and checking the angular sweep.
//!
//! Closed regions additionally answer _is this point inside?_ with a
//! nonzero winding number, computed over monotone-in-Y pieces so that every
//! curve crosses a horizontal ray at most once per piece.
//!
//! ## Primitives
//!
//! - [`Rectangle`]: the query box and the filled rectangle shape.
//! - [`Circle`]: a full disc.
//! - [`Arc`]: a circular arc, either tangent-constructed (`arc_to`) or
//!   center-constructed (`arc`).
//! - [`QuadraticBezier`] and [`CubicBezier`].
//! - [`Subpath`]: one contiguous command sequence with memoized anchor
//!   containment.
//! - [`Shape`]: the closed sum of the above.
//!
//! All of them implement [`HitTest`]. Geometry is stored in the local space of
//! the surface that drew it; [`Placed`] pairs geometry with the transform that
//! was current at draw time and maps device-space queries into local space.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use marquee_geometry::{HitTest, Rectangle, Subpath};
//!
//! let mut tri = Subpath::new();
//! tri.move_to(Point::new(0.0, 0.0));
//! tri.line_to(Point::new(100.0, 0.0));
//! tri.line_to(Point::new(50.0, 80.0));
//! tri.close_path();
//!
//! // A box straddling the right edge crosses the outline.
//! assert!(tri.intersects(&Rectangle::new(70.0, 20.0, 20.0, 20.0)));
//!
//! // A box wholly inside does not cross any edge, but its anchor corner lies
//! // inside the closed region, so the subpath still counts as hit.
//! let inner = Rectangle::new(45.0, 10.0, 10.0, 10.0);
//! assert!(!tri.intersects(&inner));
//! assert!(tri.hit(&inner, Point::new(45.0, 10.0)));
//! ```
//!
//! ## Numeric conventions
//!
//! - Query rectangles use open intervals: touching an edge is not a hit.
//! - An empty rectangle (zero or negative extent, or any non-finite field)
//!   intersects nothing.
//! - Winding uses a ray toward `+X` and the half-open `[ymin, ymax)` rule.
//! - Roots are accepted within [`kernel::EPSILON`] of the unit interval.
//!
//! This crate is `no_std` compatible (with `alloc`). Enable the `libm` feature
//! when building without `std`.

#![no_std]

extern crate alloc;

pub mod kernel;

mod arc;
mod circle;
mod cubic;
mod placed;
mod quad;
mod rectangle;
mod segment;
mod shape;
mod subpath;

pub use arc::Arc;
pub use circle::Circle;
pub use cubic::CubicBezier;
pub use placed::Placed;
pub use quad::QuadraticBezier;
pub use rectangle::Rectangle;
pub use shape::Shape;
pub use subpath::{PathCommand, Subpath};

use kurbo::{Point, Rect};

/// Spatial capability shared by every primitive.
///
/// All methods work in the primitive's local coordinate space.
pub trait HitTest {
    /// Axis-aligned bounding box, computed once at construction.
    fn bounds(&self) -> Rect;

    /// Returns `true` if the primitive touches the interior of `rect`.
    ///
    /// For curves and arcs this is a crossing test against the outline. For
    /// filled primitives ([`Rectangle`], [`Circle`]) it is an area overlap.
    /// Always `false` when `rect` [is empty](Rectangle::is_empty).
    fn intersects(&self, rect: &Rectangle) -> bool;

    /// Signed winding contribution around `pt`.
    ///
    /// Segments count `+1` when they cross the ray from `pt` toward `+X`
    /// while moving toward `+Y`, and `-1` while moving toward `-Y`.
    /// Filled primitives report `1` for points strictly inside.
    fn winding(&self, pt: Point) -> i32;

    /// Re-emits the drawing commands that produced this primitive.
    fn replay(&self, sink: &mut dyn PathSink);
}

/// Target for replayed path commands.
///
/// Method names and argument order follow the 2D canvas path API. Angles are
/// in radians, with `0` along `+X` and increasing toward `+Y`.
pub trait PathSink {
    /// Starts a new subpath at `p`.
    fn move_to(&mut self, p: Point);

    /// Adds a straight segment to `p`.
    fn line_to(&mut self, p: Point);

    /// Adds a quadratic Bézier segment.
    fn quad_to(&mut self, p1: Point, p2: Point);

    /// Adds a cubic Bézier segment.
    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point);

    /// Adds a tangent arc of `radius` touching the lines toward `p1` and from
    /// `p1` toward `p2`.
    fn arc_to(&mut self, p1: Point, p2: Point, radius: f64);

    /// Adds a center-form arc.
    fn arc(
        &mut self,
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    );

    /// Adds a closed rectangular subpath.
    fn rect(&mut self, rect: Rectangle);

    /// Closes the current subpath.
    fn close_path(&mut self);
}
