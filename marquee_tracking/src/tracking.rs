// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point};
use marquee_geometry::{PathSink, Rectangle};

use crate::{CommandError, DrawingSurface, Hit, ShapeRegistry, TransformProvider};

/// A drawing surface that records what passes through it.
///
/// Each call is validated, recorded into a [`ShapeRegistry`] together with
/// the inner surface's current transform, and then forwarded unchanged. A
/// call that fails validation is logged at `debug` level and dropped: it is
/// neither recorded nor forwarded.
///
/// Transform state lives on the inner surface; `save`, `restore`, and
/// `set_transform` are forwarded to it, and the rest is reached through
/// [`TrackingSurface::inner_mut`].
#[derive(Debug)]
pub struct TrackingSurface<S> {
    inner: S,
    registry: ShapeRegistry,
}

impl<S> TrackingSurface<S> {
    /// Wraps `inner` with an empty registry.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            registry: ShapeRegistry::new(),
        }
    }

    /// The wrapped surface.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Mutable access to the wrapped surface. Commands issued here bypass
    /// tracking.
    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    /// Unwraps the surface, dropping the registry.
    pub fn into_inner(self) -> S {
        self.inner
    }

    /// What has been recorded so far.
    pub fn registry(&self) -> &ShapeRegistry {
        &self.registry
    }

    /// Drops every memoized containment verdict; see
    /// [`ShapeRegistry::begin_gesture`].
    pub fn begin_gesture(&mut self) {
        self.registry.begin_gesture();
    }
}

impl<S: DrawingSurface + TransformProvider> TrackingSurface<S> {
    /// Runs a selection query and replays each hit onto the inner surface.
    ///
    /// `commit` is called once per hit, right after the hit's commands were
    /// replayed under their draw-time transform, so it can stroke or fill
    /// them. The inner surface's transform is restored afterwards. Replayed
    /// commands are not recorded again. Returns the number of hits.
    pub fn range_query(
        &mut self,
        rect: &Rectangle,
        anchor: Point,
        commit: impl FnMut(&mut S, Hit),
    ) -> usize {
        self.registry
            .range_query(rect, anchor, &mut self.inner, commit)
    }

    fn track(
        &mut self,
        record: impl FnOnce(&mut ShapeRegistry, Affine) -> Result<(), CommandError>,
    ) -> bool {
        let transform = self.inner.current_transform();
        match record(&mut self.registry, transform) {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(error = %err, "dropping drawing command");
                false
            }
        }
    }
}

impl<S: DrawingSurface + TransformProvider> PathSink for TrackingSurface<S> {
    fn move_to(&mut self, p: Point) {
        if self.track(|r, t| r.move_to(t, p)) {
            self.inner.move_to(p);
        }
    }

    fn line_to(&mut self, p: Point) {
        if self.track(|r, t| r.line_to(t, p)) {
            self.inner.line_to(p);
        }
    }

    fn quad_to(&mut self, p1: Point, p2: Point) {
        if self.track(|r, t| r.quad_to(t, p1, p2)) {
            self.inner.quad_to(p1, p2);
        }
    }

    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point) {
        if self.track(|r, t| r.curve_to(t, p1, p2, p3)) {
            self.inner.curve_to(p1, p2, p3);
        }
    }

    fn arc_to(&mut self, p1: Point, p2: Point, radius: f64) {
        if self.track(|r, t| r.arc_to(t, p1, p2, radius)) {
            self.inner.arc_to(p1, p2, radius);
        }
    }

    fn arc(
        &mut self,
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    ) {
        if self.track(|r, t| r.arc(t, center, radius, start_angle, end_angle, anticlockwise)) {
            self.inner
                .arc(center, radius, start_angle, end_angle, anticlockwise);
        }
    }

    fn rect(&mut self, rect: Rectangle) {
        if self.track(|r, t| r.rect(t, rect)) {
            self.inner.rect(rect);
        }
    }

    fn close_path(&mut self) {
        self.registry.close_path();
        self.inner.close_path();
    }
}

impl<S: DrawingSurface + TransformProvider> DrawingSurface for TrackingSurface<S> {
    fn begin_path(&mut self) {
        self.registry.begin_path();
        self.inner.begin_path();
    }

    fn fill_rect(&mut self, rect: Rectangle) {
        if self.track(|r, t| r.fill_rect(t, rect)) {
            self.inner.fill_rect(rect);
        }
    }

    fn stroke_rect(&mut self, rect: Rectangle) {
        if self.track(|r, t| r.stroke_rect(t, rect)) {
            self.inner.stroke_rect(rect);
        }
    }

    fn clear_rect(&mut self, rect: Rectangle) {
        if self.track(|r, _| r.clear_rect(rect)) {
            self.inner.clear_rect(rect);
        }
    }

    fn save(&mut self) {
        self.inner.save();
    }

    fn restore(&mut self) {
        self.inner.restore();
    }

    fn set_transform(&mut self, transform: Affine) {
        self.inner.set_transform(transform);
    }
}

impl<S: TransformProvider> TransformProvider for TrackingSurface<S> {
    fn current_transform(&self) -> Affine {
        self.inner.current_transform()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RecordingSurface, SurfaceOp};

    #[test]
    fn valid_calls_are_recorded_and_forwarded() {
        let mut s = TrackingSurface::new(RecordingSurface::new());
        s.fill_rect(Rectangle::new(0.0, 0.0, 5.0, 5.0));
        assert_eq!(s.registry().shapes().len(), 1);
        assert_eq!(
            s.inner().ops().collect::<alloc::vec::Vec<_>>(),
            [&SurfaceOp::FillRect(Rectangle::new(0.0, 0.0, 5.0, 5.0))]
        );
    }

    #[test]
    fn invalid_calls_are_dropped() {
        let mut s = TrackingSurface::new(RecordingSurface::new());
        s.begin_path();
        s.move_to(Point::new(f64::NAN, 0.0));
        s.arc(Point::ZERO, -3.0, 0.0, 1.0, false);
        assert_eq!(s.inner().ops().count(), 1, "only begin_path got through");
        assert!(s.registry().is_empty());
    }

    #[test]
    fn snapshot_comes_from_the_inner_surface() {
        let mut s = TrackingSurface::new(RecordingSurface::new());
        s.inner_mut().transforms_mut().translate(100.0, 0.0);
        s.fill_rect(Rectangle::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(s.current_transform(), Affine::translate((100.0, 0.0)));
        let hit = s.range_query(
            &Rectangle::new(105.0, 5.0, 1.0, 1.0),
            Point::new(105.0, 5.0),
            |_, _| {},
        );
        assert_eq!(hit, 1);
    }
}
