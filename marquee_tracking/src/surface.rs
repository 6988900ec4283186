// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Affine;
use marquee_geometry::{PathSink, Rectangle};

/// A 2D drawing surface with canvas-style path and rectangle commands.
///
/// Path construction comes from [`PathSink`]; this trait adds the commands
/// that operate outside the current path and the transform state needed to
/// replay a recorded path where it was drawn.
pub trait DrawingSurface: PathSink {
    /// Discards the current path and starts a new one.
    fn begin_path(&mut self);

    /// Fills `rect` without touching the current path.
    fn fill_rect(&mut self, rect: Rectangle);

    /// Strokes `rect` without touching the current path.
    fn stroke_rect(&mut self, rect: Rectangle);

    /// Clears `rect` to transparent.
    fn clear_rect(&mut self, rect: Rectangle);

    /// Pushes the current transform.
    fn save(&mut self);

    /// Pops the transform pushed by the matching [`save`](Self::save).
    fn restore(&mut self);

    /// Replaces the current transform.
    fn set_transform(&mut self, transform: Affine);
}

/// Exposes the surface's current user-to-device transform.
pub trait TransformProvider {
    /// The transform applied to commands issued right now.
    fn current_transform(&self) -> Affine;
}
