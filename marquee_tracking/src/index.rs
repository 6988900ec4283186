// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Device-space bounding boxes per registry slot, scanned linearly.

use alloc::vec::Vec;
use core::fmt::Debug;

use kurbo::{Point, Rect};

/// Coarse prefilter in front of the exact per-shape tests.
///
/// A slot is a candidate when its box meets the query rectangle or contains
/// the anchor. Comparisons are closed, so the filter never rejects something
/// the exact test would accept.
#[derive(Default)]
pub(crate) struct BoundsIndex {
    entries: Vec<Option<Rect>>,
}

impl Debug for BoundsIndex {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.entries.len();
        let alive = self.entries.iter().filter(|e| e.is_some()).count();
        f.debug_struct("BoundsIndex")
            .field("total_slots", &total)
            .field("alive", &alive)
            .finish_non_exhaustive()
    }
}

impl BoundsIndex {
    /// Reserves `slot` with no bounds yet.
    pub(crate) fn reserve(&mut self, slot: usize) {
        if self.entries.len() <= slot {
            self.entries.resize_with(slot + 1, || None);
        }
    }

    /// Widens the box of `slot` to cover `bounds`.
    pub(crate) fn grow(&mut self, slot: usize, bounds: Rect) {
        self.reserve(slot);
        let entry = &mut self.entries[slot];
        *entry = Some(match *entry {
            Some(b) => b.union(bounds),
            None => bounds,
        });
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn visit<F: FnMut(usize)>(&self, query: Rect, anchor: Point, mut f: F) {
        for (i, slot) in self.entries.iter().enumerate() {
            if let Some(b) = slot.as_ref()
                && (meets(b, &query) || contains(b, anchor))
            {
                f(i);
            }
        }
    }
}

fn meets(a: &Rect, b: &Rect) -> bool {
    a.x0 <= b.x1 && a.x1 >= b.x0 && a.y0 <= b.y1 && a.y1 >= b.y0
}

fn contains(a: &Rect, p: Point) -> bool {
    p.x >= a.x0 && p.x <= a.x1 && p.y >= a.y0 && p.y <= a.y1
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn collect(index: &BoundsIndex, query: Rect, anchor: Point) -> Vec<usize> {
        let mut out = Vec::new();
        index.visit(query, anchor, |i| out.push(i));
        out
    }

    #[test]
    fn touching_boxes_are_candidates() {
        let mut index = BoundsIndex::default();
        index.grow(0, Rect::new(0.0, 0.0, 10.0, 10.0));
        index.grow(1, Rect::new(50.0, 50.0, 60.0, 60.0));
        let query = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert_eq!(collect(&index, query, Point::new(20.0, 20.0)), vec![0]);
    }

    #[test]
    fn anchor_alone_selects_the_slot() {
        let mut index = BoundsIndex::default();
        index.grow(0, Rect::new(0.0, 0.0, 100.0, 100.0));
        let query = Rect::new(200.0, 200.0, 210.0, 210.0);
        assert!(collect(&index, query, Point::new(200.0, 200.0)).is_empty());
        assert_eq!(collect(&index, query, Point::new(50.0, 50.0)), vec![0]);
    }

    #[test]
    fn reserved_slots_are_skipped_until_grown() {
        let mut index = BoundsIndex::default();
        index.reserve(2);
        let everything = Rect::new(-1e9, -1e9, 1e9, 1e9);
        assert!(collect(&index, everything, Point::ZERO).is_empty());
        index.grow(2, Rect::new(0.0, 0.0, 1.0, 1.0));
        index.grow(2, Rect::new(5.0, 5.0, 6.0, 6.0));
        assert_eq!(collect(&index, Rect::new(3.0, 3.0, 4.0, 4.0), Point::new(3.0, 3.0)), vec![2]);
        index.clear();
        assert!(collect(&index, everything, Point::ZERO).is_empty());
    }
}
