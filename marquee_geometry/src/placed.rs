// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect};

use crate::{HitTest, Rectangle};

/// Geometry paired with the surface transform that was current when it was
/// drawn.
///
/// The snapshot never changes after construction. Queries arrive in device
/// space and are mapped back into the geometry's local space through the
/// inverse of the snapshot, restricted to scale and translation like
/// [`Rectangle::transform`]. A singular snapshot maps every query to a
/// non-finite rectangle, which intersects nothing.
#[derive(Clone, Debug)]
pub struct Placed<T> {
    /// Local-space geometry.
    pub geometry: T,
    transform: Affine,
    inverse: Affine,
}

impl<T> Placed<T> {
    /// Pairs `geometry` with its draw-time `transform`.
    pub fn new(geometry: T, transform: Affine) -> Self {
        Self {
            geometry,
            transform,
            inverse: transform.inverse(),
        }
    }

    /// The draw-time transform snapshot.
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Maps a device-space rectangle into local space.
    pub fn local_rect(&self, rect: &Rectangle) -> Rectangle {
        rect.transform(&self.inverse)
    }

    /// Maps a device-space point into local space.
    pub fn local_point(&self, pt: Point) -> Point {
        self.inverse * pt
    }
}

impl<T: HitTest> Placed<T> {
    /// Device-space bounding box.
    pub fn device_bounds(&self) -> Rect {
        self.transform.transform_rect_bbox(self.geometry.bounds())
    }

    /// Device-space rectangle intersection.
    pub fn intersects(&self, rect: &Rectangle) -> bool {
        if rect.is_empty() {
            return false;
        }
        self.geometry.intersects(&self.local_rect(rect))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Circle;

    #[test]
    fn query_is_mapped_into_local_space() {
        let circle = Circle::new(Point::new(0.0, 0.0), 5.0);
        let placed = Placed::new(circle, Affine::translate((100.0, 100.0)));
        assert!(placed.intersects(&Rectangle::new(98.0, 98.0, 4.0, 4.0)));
        assert!(!placed.intersects(&Rectangle::new(-2.0, -2.0, 4.0, 4.0)));
        assert_eq!(placed.device_bounds(), Rect::new(95.0, 95.0, 105.0, 105.0));
    }

    #[test]
    fn scaled_snapshot() {
        let circle = Circle::new(Point::new(10.0, 10.0), 2.0);
        let placed = Placed::new(circle, Affine::scale(2.0));
        // Local disc spans 8..12, device disc spans 16..24.
        assert!(placed.intersects(&Rectangle::new(23.0, 19.0, 10.0, 2.0)));
        assert!(!placed.intersects(&Rectangle::new(25.0, 19.0, 10.0, 2.0)));
        assert_eq!(placed.local_point(Point::new(20.0, 20.0)), Point::new(10.0, 10.0));
    }

    #[test]
    fn singular_snapshot_never_hits() {
        let circle = Circle::new(Point::new(0.0, 0.0), 5.0);
        let placed = Placed::new(circle, Affine::scale(0.0));
        assert!(!placed.intersects(&Rectangle::new(-1.0, -1.0, 2.0, 2.0)));
    }
}
