// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shapes and features recorded from a drawing surface.
//!
//! Rectangle and `arc` commands issued while no path is being built become
//! standalone [`Shape`]s.
//! Everything issued between `begin_path` calls is grouped into one
//! [`Feature`] made of one or more subpaths.
//!
//! Every entry keeps the surface transform that was current when it was
//! drawn. When the transform changes in the middle of a subpath, later points
//! are mapped into the space of the subpath's first snapshot. Radii are kept
//! as given.

use alloc::vec::Vec;

use kurbo::{Affine, Point};
use marquee_geometry::kernel::TAU;
use marquee_geometry::{Arc, Circle, HitTest, PathSink, Placed, Rectangle, Shape, Subpath};

use crate::DrawingSurface;
use crate::error::{self, CommandError};
use crate::index::BoundsIndex;

/// A selected registry entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hit {
    /// Index into [`ShapeRegistry::shapes`].
    Shape(usize),
    /// Index into [`ShapeRegistry::features`].
    Feature(usize),
}

/// One `begin_path` worth of subpaths.
#[derive(Clone, Debug, Default)]
pub struct Feature {
    subpaths: Vec<Placed<Subpath>>,
}

impl Feature {
    /// The subpaths, in drawing order.
    pub fn subpaths(&self) -> &[Placed<Subpath>] {
        &self.subpaths
    }

    /// Returns `true` if no subpath has been started.
    pub fn is_empty(&self) -> bool {
        self.subpaths.is_empty()
    }

    /// Device-space selection test: hit when any subpath is.
    pub fn hit(&mut self, rect: &Rectangle, anchor: Point) -> bool {
        self.subpaths.iter_mut().any(|s| s.hit(rect, anchor))
    }

    /// Replays every subpath in local coordinates.
    pub fn replay(&self, sink: &mut dyn PathSink) {
        for subpath in &self.subpaths {
            subpath.geometry.replay(sink);
        }
    }

    fn reset_containment(&mut self) {
        for subpath in &mut self.subpaths {
            subpath.geometry.reset_containment();
        }
    }
}

/// Hit-testable record of everything drawn on a surface.
///
/// Recording methods take the transform current at the time of the call and
/// validate their arguments first. A rejected call returns a
/// [`CommandError`] and leaves the registry untouched.
#[derive(Debug, Default)]
pub struct ShapeRegistry {
    shapes: Vec<Placed<Shape>>,
    features: Vec<Feature>,
    shape_bounds: BoundsIndex,
    feature_bounds: BoundsIndex,
    active_feature: Option<usize>,
    // The last subpath of the active feature still accepts segments.
    subpath_open: bool,
    path_in_progress: bool,
    // Device space, so a later snapshot can map it into its own local space.
    pending_start: Option<Point>,
}

impl ShapeRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Standalone shapes, in drawing order.
    pub fn shapes(&self) -> &[Placed<Shape>] {
        &self.shapes
    }

    /// Path features, in drawing order.
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Returns `true` if nothing has been recorded since the last clear.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty() && self.features.iter().all(Feature::is_empty)
    }

    /// Returns `true` between the first path command and the next
    /// `close_path`.
    pub fn path_in_progress(&self) -> bool {
        self.path_in_progress
    }

    /// Starts a new feature. An active feature that is still empty is reused.
    pub fn begin_path(&mut self) {
        let reusable = self
            .active_feature
            .is_some_and(|f| self.features[f].is_empty());
        if !reusable {
            self.open_feature();
        }
        self.subpath_open = false;
        self.pending_start = None;
        self.path_in_progress = true;
    }

    /// Starts a new subpath in the active feature.
    ///
    /// A preceding subpath that holds nothing but a move is replaced.
    pub fn move_to(&mut self, transform: Affine, p: Point) -> Result<(), CommandError> {
        error::finite_points("move_to", &[p])?;
        let f = self.active_feature();
        let feature = &mut self.features[f];
        if self.subpath_open
            && feature
                .subpaths
                .last()
                .is_some_and(|s| !s.geometry.has_segments())
        {
            feature.subpaths.pop();
        }
        let mut subpath = Subpath::new();
        subpath.move_to(p);
        feature.subpaths.push(Placed::new(subpath, transform));
        self.subpath_open = true;
        self.pending_start = None;
        self.path_in_progress = true;
        Ok(())
    }

    /// Extends the open subpath with a line.
    pub fn line_to(&mut self, transform: Affine, p: Point) -> Result<(), CommandError> {
        error::finite_points("line_to", &[p])?;
        self.extend(transform, |sp, map| sp.line_to(map(p)));
        Ok(())
    }

    /// Extends the open subpath with a quadratic Bézier.
    pub fn quad_to(&mut self, transform: Affine, p1: Point, p2: Point) -> Result<(), CommandError> {
        error::finite_points("quad_to", &[p1, p2])?;
        self.extend(transform, |sp, map| sp.quad_to(map(p1), map(p2)));
        Ok(())
    }

    /// Extends the open subpath with a cubic Bézier.
    pub fn curve_to(
        &mut self,
        transform: Affine,
        p1: Point,
        p2: Point,
        p3: Point,
    ) -> Result<(), CommandError> {
        error::finite_points("curve_to", &[p1, p2, p3])?;
        self.extend(transform, |sp, map| sp.curve_to(map(p1), map(p2), map(p3)));
        Ok(())
    }

    /// Extends the open subpath with a tangent arc.
    ///
    /// A degenerate corner is recorded as a line to `p1`.
    pub fn arc_to(
        &mut self,
        transform: Affine,
        p1: Point,
        p2: Point,
        radius: f64,
    ) -> Result<(), CommandError> {
        error::finite_points("arc_to", &[p1, p2])?;
        error::radius("arc_to", radius)?;
        let rounded = self.extend(transform, |sp, map| sp.arc_to(map(p1), map(p2), radius));
        if !rounded {
            tracing::debug!(radius, "arc_to corner is degenerate, recorded as a line");
        }
        Ok(())
    }

    /// Records a center-form arc.
    ///
    /// While a path is in progress the arc joins the open subpath. Otherwise
    /// it becomes a standalone [`Circle`] when it covers a full turn, or a
    /// standalone [`Arc`] when it does not.
    pub fn arc(
        &mut self,
        transform: Affine,
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    ) -> Result<(), CommandError> {
        error::finite_points("arc", &[center])?;
        error::finite_scalars("arc", &[start_angle, end_angle])?;
        error::radius("arc", radius)?;
        if self.path_in_progress {
            self.extend(transform, |sp, map| {
                sp.arc(map(center), radius, start_angle, end_angle, anticlockwise);
            });
            return Ok(());
        }
        let Some(arc) = Arc::from_center(center, radius, start_angle, end_angle, anticlockwise)
        else {
            return Ok(());
        };
        let shape = if arc.sweep().abs() >= TAU {
            Shape::Circle(Circle::new(center, radius))
        } else {
            Shape::Arc(arc)
        };
        self.push_shape(shape, transform);
        Ok(())
    }

    /// Records `rect()`: a closed subpath while a path is in progress, a
    /// standalone rectangle otherwise.
    pub fn rect(&mut self, transform: Affine, rect: Rectangle) -> Result<(), CommandError> {
        self.record_rect("rect", transform, rect)
    }

    /// Records a filled rectangle, placed like [`rect`](Self::rect).
    pub fn fill_rect(&mut self, transform: Affine, rect: Rectangle) -> Result<(), CommandError> {
        self.record_rect("fill_rect", transform, rect)
    }

    /// Records a stroked rectangle, placed like [`rect`](Self::rect).
    pub fn stroke_rect(&mut self, transform: Affine, rect: Rectangle) -> Result<(), CommandError> {
        self.record_rect("stroke_rect", transform, rect)
    }

    /// Closes the open subpath and ends the path in progress.
    ///
    /// The feature stays active, so later segments start a new subpath in it
    /// from the closed subpath's start point.
    pub fn close_path(&mut self) {
        if self.subpath_open
            && let Some(f) = self.active_feature
            && let Some(placed) = self.features[f].subpaths.last_mut()
        {
            placed.geometry.close_path();
            self.pending_start = placed
                .geometry
                .start_point()
                .map(|p| placed.transform() * p);
        }
        self.subpath_open = false;
        self.path_in_progress = false;
    }

    /// `clear_rect` on the surface: forgets everything, whatever the
    /// rectangle.
    pub fn clear_rect(&mut self, rect: Rectangle) -> Result<(), CommandError> {
        error::rectangle("clear_rect", &rect)?;
        self.clear();
        Ok(())
    }

    /// Forgets every shape and feature.
    pub fn clear(&mut self) {
        tracing::debug!(
            shapes = self.shapes.len(),
            features = self.features.len(),
            "clearing shape registry"
        );
        self.shapes.clear();
        self.features.clear();
        self.shape_bounds.clear();
        self.feature_bounds.clear();
        self.active_feature = None;
        self.subpath_open = false;
        self.path_in_progress = false;
        self.pending_start = None;
    }

    /// Drops every memoized containment verdict.
    ///
    /// Call this when a new drag gesture starts.
    pub fn begin_gesture(&mut self) {
        for shape in &mut self.shapes {
            shape.geometry.reset_containment();
        }
        for feature in &mut self.features {
            feature.reset_containment();
        }
    }

    /// Entries selected by `rect`, dragged from `anchor`.
    ///
    /// Shapes are reported before features, each in drawing order. An empty
    /// rectangle selects nothing.
    pub fn hits(&mut self, rect: &Rectangle, anchor: Point) -> Vec<Hit> {
        let mut hits = Vec::new();
        if rect.is_empty() {
            return hits;
        }
        let query = rect.normalized().to_rect();

        let shapes = &mut self.shapes;
        self.shape_bounds.visit(query, anchor, |i| {
            if shapes[i].hit(rect, anchor) {
                hits.push(Hit::Shape(i));
            }
        });
        let features = &mut self.features;
        self.feature_bounds.visit(query, anchor, |i| {
            if features[i].hit(rect, anchor) {
                hits.push(Hit::Feature(i));
            }
        });
        hits
    }

    /// Runs a selection query and replays each hit onto `surface`.
    ///
    /// For every hit, `surface` is saved and receives `begin_path` and the
    /// hit's commands, each under the transform it was drawn with. Then
    /// `on_hit` is called once so the caller can stroke or fill the replayed
    /// path, and the surface is restored. Returns the number of hits.
    pub fn range_query<S: DrawingSurface>(
        &mut self,
        rect: &Rectangle,
        anchor: Point,
        surface: &mut S,
        mut on_hit: impl FnMut(&mut S, Hit),
    ) -> usize {
        let hits = self.hits(rect, anchor);
        tracing::trace!(
            shapes = self.shapes.len(),
            features = self.features.len(),
            hits = hits.len(),
            "range query"
        );
        for &hit in &hits {
            surface.save();
            surface.begin_path();
            self.replay_placed(hit, surface);
            on_hit(surface, hit);
            surface.restore();
        }
        hits.len()
    }

    fn replay_placed<S: DrawingSurface>(&self, hit: Hit, surface: &mut S) {
        match hit {
            Hit::Shape(i) => {
                if let Some(shape) = self.shapes.get(i) {
                    surface.set_transform(shape.transform());
                    shape.geometry.replay(surface);
                }
            }
            Hit::Feature(i) => {
                for subpath in self.features.get(i).map_or(&[][..], Feature::subpaths) {
                    surface.set_transform(subpath.transform());
                    subpath.geometry.replay(surface);
                }
            }
        }
    }

    /// Replays the commands of `hit` in local coordinates.
    pub fn replay(&self, hit: Hit, sink: &mut dyn PathSink) {
        match hit {
            Hit::Shape(i) => {
                if let Some(shape) = self.shapes.get(i) {
                    shape.geometry.replay(sink);
                }
            }
            Hit::Feature(i) => {
                if let Some(feature) = self.features.get(i) {
                    feature.replay(sink);
                }
            }
        }
    }

    /// Draw-time transform of `hit`. For features, that of the first subpath.
    pub fn transform_of(&self, hit: Hit) -> Option<Affine> {
        match hit {
            Hit::Shape(i) => self.shapes.get(i).map(Placed::transform),
            Hit::Feature(i) => self
                .features
                .get(i)
                .and_then(|f| f.subpaths.first())
                .map(Placed::transform),
        }
    }

    fn open_feature(&mut self) -> usize {
        let f = self.features.len();
        self.features.push(Feature::default());
        self.feature_bounds.reserve(f);
        self.active_feature = Some(f);
        f
    }

    fn active_feature(&mut self) -> usize {
        match self.active_feature {
            Some(f) => f,
            None => self.open_feature(),
        }
    }

    fn record_rect(
        &mut self,
        op: &'static str,
        transform: Affine,
        rect: Rectangle,
    ) -> Result<(), CommandError> {
        error::rectangle(op, &rect)?;
        if !self.path_in_progress {
            self.push_shape(Shape::Rectangle(rect), transform);
            return Ok(());
        }
        let f = self.active_feature();
        let placed = Placed::new(Subpath::from_rect(rect), transform);
        self.feature_bounds.grow(f, placed.device_bounds());
        self.features[f].subpaths.push(placed);
        self.subpath_open = false;
        self.pending_start = Some(transform * Point::new(rect.x, rect.y));
        Ok(())
    }

    fn push_shape(&mut self, shape: Shape, transform: Affine) {
        let placed = Placed::new(shape, transform);
        self.shape_bounds.grow(self.shapes.len(), placed.device_bounds());
        self.shapes.push(placed);
    }

    /// Runs `draw` on the open subpath, opening one first if needed.
    ///
    /// `draw` receives a mapping from the caller's user space into the
    /// subpath's local space.
    fn extend<R>(
        &mut self,
        transform: Affine,
        draw: impl FnOnce(&mut Subpath, &dyn Fn(Point) -> Point) -> R,
    ) -> R {
        let f = self.active_feature();
        let pending = self.pending_start.take();
        let feature = &mut self.features[f];
        if !self.subpath_open || feature.subpaths.is_empty() {
            let mut placed = Placed::new(Subpath::new(), transform);
            if let Some(device) = pending {
                let local = placed.local_point(device);
                placed.geometry.move_to(local);
            }
            feature.subpaths.push(placed);
            self.subpath_open = true;
        }
        self.path_in_progress = true;

        let last = feature.subpaths.len() - 1;
        let placed = &mut feature.subpaths[last];
        let to_local =
            (placed.transform() != transform).then(|| placed.transform().inverse() * transform);
        let map = move |p: Point| match to_local {
            Some(m) => m * p,
            None => p,
        };
        let out = draw(&mut placed.geometry, &map);
        let bounds = placed.device_bounds();
        self.feature_bounds.grow(f, bounds);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    const ID: Affine = Affine::IDENTITY;

    fn square_path(registry: &mut ShapeRegistry, x: f64, y: f64, size: f64) {
        registry.begin_path();
        registry.move_to(ID, Point::new(x, y)).unwrap();
        registry.line_to(ID, Point::new(x + size, y)).unwrap();
        registry.line_to(ID, Point::new(x + size, y + size)).unwrap();
        registry.line_to(ID, Point::new(x, y + size)).unwrap();
        registry.close_path();
    }

    #[test]
    fn standalone_and_path_rectangles() {
        let mut r = ShapeRegistry::new();
        r.fill_rect(ID, Rectangle::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        r.rect(ID, Rectangle::new(20.0, 0.0, 10.0, 10.0)).unwrap();
        assert_eq!(r.shapes().len(), 2, "no path in progress");

        r.begin_path();
        r.rect(ID, Rectangle::new(40.0, 0.0, 10.0, 10.0)).unwrap();
        r.fill_rect(ID, Rectangle::new(60.0, 0.0, 10.0, 10.0)).unwrap();
        r.stroke_rect(ID, Rectangle::new(80.0, 0.0, 10.0, 10.0)).unwrap();
        assert_eq!(r.shapes().len(), 2, "all three joined the path");
        assert_eq!(r.features().len(), 1);
        assert_eq!(r.features()[0].subpaths().len(), 3);
        let inside = Rectangle::new(62.0, 2.0, 1.0, 1.0);
        assert_eq!(r.hits(&inside, Point::new(62.0, 2.0)), vec![Hit::Feature(0)]);

        r.close_path();
        r.stroke_rect(ID, Rectangle::new(0.0, 20.0, 10.0, 10.0)).unwrap();
        assert_eq!(r.shapes().len(), 3, "standalone again once the path is closed");
    }

    #[test]
    fn feature_selected_from_inside() {
        let mut r = ShapeRegistry::new();
        square_path(&mut r, 0.0, 0.0, 100.0);
        let inner = Rectangle::new(10.0, 10.0, 5.0, 5.0);
        assert_eq!(r.hits(&inner, Point::new(10.0, 10.0)), vec![Hit::Feature(0)]);
        let outside = Rectangle::new(150.0, 150.0, 5.0, 5.0);
        assert!(r.hits(&outside, Point::new(150.0, 150.0)).is_empty());
    }

    #[test]
    fn shapes_are_reported_before_features() {
        let mut r = ShapeRegistry::new();
        square_path(&mut r, 0.0, 0.0, 10.0);
        r.fill_rect(ID, Rectangle::new(5.0, 5.0, 10.0, 10.0)).unwrap();
        let hits = r.hits(&Rectangle::new(8.0, 8.0, 4.0, 4.0), Point::new(8.0, 8.0));
        assert_eq!(hits, vec![Hit::Shape(0), Hit::Feature(0)]);
    }

    #[test]
    fn empty_query_selects_nothing() {
        let mut r = ShapeRegistry::new();
        r.fill_rect(ID, Rectangle::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        assert!(r.hits(&Rectangle::new(5.0, 5.0, 0.0, 3.0), Point::new(5.0, 5.0)).is_empty());
    }

    #[test]
    fn begin_path_reuses_an_empty_feature() {
        let mut r = ShapeRegistry::new();
        r.begin_path();
        r.begin_path();
        assert_eq!(r.features().len(), 1);
        r.move_to(ID, Point::ZERO).unwrap();
        r.begin_path();
        assert_eq!(r.features().len(), 2);
    }

    #[test]
    fn lone_moves_are_replaced() {
        let mut r = ShapeRegistry::new();
        r.begin_path();
        r.move_to(ID, Point::new(1.0, 1.0)).unwrap();
        r.move_to(ID, Point::new(2.0, 2.0)).unwrap();
        r.line_to(ID, Point::new(3.0, 3.0)).unwrap();
        let subpaths = r.features()[0].subpaths();
        assert_eq!(subpaths.len(), 1);
        assert_eq!(subpaths[0].geometry.start_point(), Some(Point::new(2.0, 2.0)));
    }

    #[test]
    fn segments_after_close_start_at_the_closed_start() {
        let mut r = ShapeRegistry::new();
        square_path(&mut r, 5.0, 5.0, 10.0);
        assert!(!r.path_in_progress());
        r.line_to(ID, Point::new(40.0, 40.0)).unwrap();
        let subpaths = r.features()[0].subpaths();
        assert_eq!(subpaths.len(), 2, "new subpath in the same feature");
        assert_eq!(subpaths[1].geometry.start_point(), Some(Point::new(5.0, 5.0)));
        assert!(r.path_in_progress());
    }

    #[test]
    fn transform_change_inside_a_subpath() {
        let mut r = ShapeRegistry::new();
        r.begin_path();
        r.move_to(ID, Point::ZERO).unwrap();
        r.line_to(Affine::translate((10.0, 0.0)), Point::ZERO).unwrap();
        let sp = &r.features()[0].subpaths()[0];
        assert_eq!(sp.transform(), ID, "first snapshot is kept");
        assert_eq!(sp.geometry.current_point(), Some(Point::new(10.0, 0.0)));
    }

    #[test]
    fn standalone_arcs() {
        let mut r = ShapeRegistry::new();
        r.arc(ID, Point::ZERO, 10.0, 0.0, TAU, false).unwrap();
        r.arc(ID, Point::ZERO, 10.0, 0.0, 1.0, false).unwrap();
        r.arc(ID, Point::ZERO, 0.0, 0.0, 1.0, false).unwrap();
        assert!(matches!(r.shapes()[0].geometry, Shape::Circle(_)));
        assert!(matches!(r.shapes()[1].geometry, Shape::Arc(_)));
        assert_eq!(r.shapes().len(), 2, "zero radius records nothing");
    }

    #[test]
    fn arc_in_a_path_joins_the_subpath() {
        let mut r = ShapeRegistry::new();
        r.begin_path();
        r.arc(ID, Point::new(50.0, 50.0), 20.0, 0.0, TAU, false).unwrap();
        assert!(r.shapes().is_empty());
        let inner = Rectangle::new(45.0, 45.0, 2.0, 2.0);
        assert_eq!(r.hits(&inner, Point::new(45.0, 45.0)), vec![Hit::Feature(0)]);
    }

    #[test]
    fn rejected_commands_leave_no_trace() {
        let mut r = ShapeRegistry::new();
        r.begin_path();
        assert_eq!(
            r.line_to(ID, Point::new(f64::NAN, 0.0)),
            Err(CommandError::NonFinite { op: "line_to" })
        );
        assert_eq!(
            r.arc(ID, Point::ZERO, -1.0, 0.0, 1.0, false),
            Err(CommandError::NegativeRadius {
                op: "arc",
                radius: -1.0
            })
        );
        assert!(r.fill_rect(ID, Rectangle::new(0.0, f64::INFINITY, 1.0, 1.0)).is_err());
        assert!(r.is_empty());
    }

    #[test]
    fn clear_forgets_everything() {
        let mut r = ShapeRegistry::new();
        square_path(&mut r, 0.0, 0.0, 10.0);
        r.fill_rect(ID, Rectangle::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        r.clear_rect(Rectangle::new(0.0, 0.0, 1.0, 1.0)).unwrap();
        assert!(r.is_empty());
        assert!(r.features().is_empty());
        assert!(r.hits(&Rectangle::new(-1e6, -1e6, 2e6, 2e6), Point::ZERO).is_empty());
    }

    #[test]
    fn scaled_shape_is_queried_in_device_space() {
        let mut r = ShapeRegistry::new();
        r.fill_rect(Affine::scale(2.0), Rectangle::new(10.0, 10.0, 5.0, 5.0)).unwrap();
        // Device extent is (20, 20) to (30, 30).
        assert_eq!(
            r.hits(&Rectangle::new(25.0, 25.0, 10.0, 10.0), Point::new(25.0, 25.0)),
            vec![Hit::Shape(0)]
        );
        assert!(r.hits(&Rectangle::new(12.0, 12.0, 3.0, 3.0), Point::new(12.0, 12.0)).is_empty());
        assert_eq!(r.transform_of(Hit::Shape(0)), Some(Affine::scale(2.0)));
        assert_eq!(r.transform_of(Hit::Feature(0)), None);
    }
}
