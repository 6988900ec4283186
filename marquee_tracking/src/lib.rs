// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=marquee_tracking --heading-base-level=0

//! Marquee Tracking: rectangle selection over whatever a surface has drawn.
//!
//! [`TrackingSurface`] wraps any [`DrawingSurface`] and records each path or
//! rectangle command into a [`ShapeRegistry`] before forwarding it. The
//! registry can then answer _which drawn things does this marquee rectangle
//! select?_ and replay each selected item back onto the surface so the host
//! can highlight it.
//!
//! - Rectangle and `arc` commands issued outside a path become single
//!   [`Shape`](marquee_geometry::Shape)s. Inside a path they join it.
//! - Everything between two `begin_path` calls becomes one [`Feature`],
//!   selected when any of its subpaths crosses the rectangle or, for closed
//!   subpaths, when the rectangle's anchor lies inside.
//! - Each entry keeps the transform that was current when it was drawn, so
//!   queries are expressed in device space and hits are replayed where they
//!   were drawn.
//! - `clear_rect` forgets everything.
//!
//! Invalid commands (non-finite coordinates, negative radii) are logged
//! through [`tracing`] and dropped before they reach the inner surface.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Point;
//! use marquee_geometry::{PathSink, Rectangle};
//! use marquee_tracking::{
//!     DrawingSurface, Hit, Marquee, RecordingSurface, SurfaceOp, TrackingSurface,
//! };
//!
//! let mut surface = TrackingSurface::new(RecordingSurface::new());
//! surface.begin_path();
//! surface.move_to(Point::new(0.0, 0.0));
//! surface.line_to(Point::new(100.0, 0.0));
//! surface.line_to(Point::new(50.0, 80.0));
//! surface.close_path();
//! surface.fill_rect(Rectangle::new(200.0, 0.0, 20.0, 20.0));
//! surface.inner_mut().clear_events();
//!
//! // Drag from inside the triangle: nothing is crossed, but the anchor is
//! // inside a closed subpath.
//! let marquee = Marquee::new(Point::new(45.0, 10.0));
//! let mut selected = Vec::new();
//! let hits = marquee.select(&mut surface, Point::new(55.0, 20.0), |inner, hit| {
//!     inner.stroke_rect(Rectangle::new(0.0, 0.0, 1.0, 1.0));
//!     selected.push(hit);
//! });
//! assert_eq!(hits, 1);
//! assert_eq!(selected, [Hit::Feature(0)]);
//!
//! // The hit was replayed onto the inner surface before the commit.
//! assert_eq!(surface.inner().ops().next(), Some(&SurfaceOp::BeginPath));
//! ```
//!
//! This crate is `no_std` compatible (with `alloc`). Enable the `libm` feature
//! when building without `std`.

#![no_std]

extern crate alloc;

mod error;
mod index;
mod marquee;
mod recording;
mod registry;
mod surface;
mod tracking;
mod transform;

pub use error::CommandError;
pub use marquee::{Growth, Marquee};
pub use recording::{RecordingSurface, SurfaceEvent, SurfaceOp};
pub use registry::{Feature, Hit, ShapeRegistry};
pub use surface::{DrawingSurface, TransformProvider};
pub use tracking::TrackingSurface;
pub use transform::TransformStack;
