// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marquee drag bookkeeping.
//!
//! A [`Marquee`] remembers where a selection drag started and turns the
//! current pointer position into a normalized query rectangle. [`Growth`]
//! compares two consecutive rectangles, which hosts use to decide whether
//! highlights from the previous frame can only have grown.
//!
//! ## Usage
//!
//! 1. On pointer down, create a [`Marquee`] and call
//!    [`TrackingSurface::begin_gesture`](crate::TrackingSurface::begin_gesture).
//! 2. On each pointer move, query with [`Marquee::rect_to`] and
//!    [`Marquee::anchor`].
//! 3. On pointer up, drop the marquee.
//!
//! ```rust
//! use kurbo::Point;
//! use marquee_geometry::Rectangle;
//! use marquee_tracking::{Growth, Marquee};
//!
//! let marquee = Marquee::new(Point::new(50.0, 50.0));
//! let first = marquee.rect_to(Point::new(40.0, 60.0));
//! assert_eq!(first, Rectangle::new(40.0, 50.0, 10.0, 10.0));
//!
//! let second = marquee.rect_to(Point::new(20.0, 55.0));
//! let growth = Growth::between(&first, &second);
//! assert!(growth.width);
//! assert!(!growth.height);
//! ```

use kurbo::Point;
use marquee_geometry::Rectangle;

use crate::{DrawingSurface, Hit, TrackingSurface, TransformProvider};

/// An in-progress rectangle selection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marquee {
    anchor: Point,
}

impl Marquee {
    /// Starts a selection at `anchor`.
    pub fn new(anchor: Point) -> Self {
        Self { anchor }
    }

    /// Where the drag started.
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// The rectangle spanned by the anchor and `pointer`, never negative in
    /// size.
    pub fn rect_to(&self, pointer: Point) -> Rectangle {
        Rectangle::from_points(self.anchor, pointer)
    }

    /// Runs the selection query for `pointer` against `surface`.
    pub fn select<S: DrawingSurface + TransformProvider>(
        &self,
        surface: &mut TrackingSurface<S>,
        pointer: Point,
        commit: impl FnMut(&mut S, Hit),
    ) -> usize {
        surface.range_query(&self.rect_to(pointer), self.anchor, commit)
    }
}

/// Which sides of the selection grew between two consecutive rectangles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Growth {
    /// Width increased.
    pub width: bool,
    /// Height increased.
    pub height: bool,
}

impl Growth {
    /// Compares `previous` with `current`.
    pub fn between(previous: &Rectangle, current: &Rectangle) -> Self {
        let (previous, current) = (previous.normalized(), current.normalized());
        Self {
            width: current.width > previous.width,
            height: current.height > previous.height,
        }
    }

    /// Returns `true` when neither dimension grew.
    pub fn is_shrinking(&self) -> bool {
        !self.width && !self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_is_normalized_whichever_way_the_pointer_goes() {
        let m = Marquee::new(Point::new(10.0, 10.0));
        assert_eq!(m.rect_to(Point::new(0.0, 0.0)), Rectangle::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(m.rect_to(Point::new(15.0, 5.0)), Rectangle::new(10.0, 5.0, 5.0, 5.0));
        assert!(m.rect_to(m.anchor()).is_empty(), "no drag yet");
    }

    #[test]
    fn growth_flags() {
        let small = Rectangle::new(0.0, 0.0, 5.0, 5.0);
        let wide = Rectangle::new(0.0, 0.0, 8.0, 5.0);
        assert_eq!(
            Growth::between(&small, &wide),
            Growth {
                width: true,
                height: false
            }
        );
        assert!(Growth::between(&wide, &small).is_shrinking());
        assert!(Growth::between(&small, &small).is_shrinking(), "unchanged");
    }
}
