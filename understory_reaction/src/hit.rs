// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit-test index over the picker's items.
//!
//! ## Overview
//!
//! The index keeps one slot per reaction, index-aligned with the reaction list.
//! Each item reports its own bounds as it is laid out; an update replaces exactly
//! one slot, so partial and out-of-order updates are fine. Slots that have never
//! been reported do not match anything.
//!
//! ## Matching
//!
//! Hit testing is precise horizontally and tolerant vertically:
//!
//! - The point's y must fall within the strip (the whole picker surface), not
//!   within an individual item.
//! - The point's x must fall within an item's bounds inflated by the hit margin.
//!
//! When inflated bounds of neighbors overlap, an item whose uninflated bounds
//! contain x wins. Otherwise the lowest index wins.
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_reaction::hit::HitIndex;
//!
//! let mut index = HitIndex::new(3, 2.0);
//! for i in 0..3 {
//!     let x = i as f64 * 40.0;
//!     index.update(i, Rect::new(x, 0.0, x + 40.0, 40.0));
//! }
//! index.set_strip_bounds(Rect::new(0.0, 0.0, 120.0, 40.0));
//!
//! assert_eq!(index.resolve(Point::new(39.0, 20.0)), Some(0));
//! assert_eq!(index.resolve(Point::new(41.0, 20.0)), Some(1));
//! assert_eq!(index.resolve(Point::new(200.0, 20.0)), None);
//! ```

use alloc::vec;
use alloc::vec::Vec;

use kurbo::{Point, Rect};

#[derive(Copy, Clone, Debug, PartialEq)]
struct Slot {
    bounds: Rect,
    inflated: Rect,
}

/// Index-aligned item bounds with strip-tolerant hit testing.
#[derive(Clone, Debug, PartialEq)]
pub struct HitIndex {
    slots: Vec<Option<Slot>>,
    strip: Option<Rect>,
    margin: f64,
}

impl HitIndex {
    /// Create an index for `len` items, inflating each item by `margin` on every side.
    pub fn new(len: usize, margin: f64) -> Self {
        Self {
            slots: vec![None; len],
            strip: None,
            margin,
        }
    }

    /// Number of item slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the index has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Margin applied around each item.
    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// Replace the bounds of item `index`.
    ///
    /// Returns `false` and leaves the index untouched when `index` is out of range.
    pub fn update(&mut self, index: usize, bounds: Rect) -> bool {
        let Some(slot) = self.slots.get_mut(index) else {
            return false;
        };
        *slot = Some(Slot {
            bounds,
            inflated: bounds.inflate(self.margin, self.margin),
        });
        true
    }

    /// Set the bounds of the whole picker surface used for the vertical test.
    pub fn set_strip_bounds(&mut self, strip: Rect) {
        self.strip = Some(strip);
    }

    /// Bounds of the picker surface, if reported.
    pub fn strip_bounds(&self) -> Option<Rect> {
        self.strip
    }

    /// Last reported (uninflated) bounds of item `index`.
    pub fn bounds(&self, index: usize) -> Option<Rect> {
        self.slots.get(index).copied().flatten().map(|s| s.bounds)
    }

    /// Inflated bounds of item `index` as used for hit testing.
    pub fn hit_bounds(&self, index: usize) -> Option<Rect> {
        self.slots.get(index).copied().flatten().map(|s| s.inflated)
    }

    /// Resolve a point to the item under it.
    pub fn resolve(&self, pt: Point) -> Option<usize> {
        let strip = self.strip?;
        if pt.y < strip.y0 || pt.y > strip.y1 {
            return None;
        }

        let mut fallback = None;
        for (i, slot) in self.slots.iter().enumerate() {
            let Some(slot) = slot else { continue };
            if slot.bounds.x0 <= pt.x && pt.x < slot.bounds.x1 {
                return Some(i);
            }
            if fallback.is_none() && slot.inflated.x0 <= pt.x && pt.x <= slot.inflated.x1 {
                fallback = Some(i);
            }
        }
        fallback
    }

    /// Forget every item's bounds. The strip bounds are kept.
    pub fn clear(&mut self) {
        self.slots.fill(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_items() -> HitIndex {
        let mut index = HitIndex::new(3, 2.0);
        index.update(0, Rect::new(0.0, 0.0, 40.0, 40.0));
        index.update(1, Rect::new(40.0, 0.0, 80.0, 40.0));
        index.update(2, Rect::new(80.0, 0.0, 120.0, 40.0));
        index.set_strip_bounds(Rect::new(0.0, 0.0, 120.0, 40.0));
        index
    }

    #[test]
    fn adjacent_items_resolve_precisely() {
        let index = three_items();
        assert_eq!(index.resolve(Point::new(39.0, 20.0)), Some(0));
        assert_eq!(index.resolve(Point::new(41.0, 20.0)), Some(1));
        assert_eq!(index.resolve(Point::new(200.0, 20.0)), None);
    }

    #[test]
    fn margin_extends_outer_edges() {
        let index = three_items();
        assert_eq!(index.resolve(Point::new(-1.5, 20.0)), Some(0));
        assert_eq!(index.resolve(Point::new(121.0, 20.0)), Some(2));
        assert_eq!(index.resolve(Point::new(122.5, 20.0)), None);
        assert_eq!(index.hit_bounds(1), Some(Rect::new(38.0, -2.0, 82.0, 42.0)));
    }

    #[test]
    fn margin_reaches_across_gaps() {
        let mut index = HitIndex::new(2, 2.0);
        index.update(0, Rect::new(0.0, 0.0, 40.0, 40.0));
        index.update(1, Rect::new(44.0, 0.0, 84.0, 40.0));
        index.set_strip_bounds(Rect::new(0.0, 0.0, 84.0, 40.0));
        // Both margins cover x = 42; the lower index wins.
        assert_eq!(index.resolve(Point::new(42.0, 10.0)), Some(0));
        assert_eq!(index.resolve(Point::new(42.5, 10.0)), Some(1));
    }

    #[test]
    fn vertical_test_uses_strip() {
        let mut index = three_items();
        // Outside every item vertically but inside a taller strip.
        index.set_strip_bounds(Rect::new(0.0, -30.0, 120.0, 70.0));
        assert_eq!(index.resolve(Point::new(50.0, -25.0)), Some(1));
        assert_eq!(index.resolve(Point::new(50.0, 71.0)), None);
    }

    #[test]
    fn no_strip_no_hits() {
        let mut index = HitIndex::new(1, 2.0);
        index.update(0, Rect::new(0.0, 0.0, 40.0, 40.0));
        assert_eq!(index.resolve(Point::new(10.0, 10.0)), None);
    }

    #[test]
    fn out_of_order_and_partial_updates() {
        let mut index = HitIndex::new(3, 0.0);
        index.set_strip_bounds(Rect::new(0.0, 0.0, 300.0, 50.0));
        assert!(index.update(2, Rect::new(200.0, 0.0, 240.0, 40.0)));
        assert_eq!(index.resolve(Point::new(10.0, 10.0)), None);
        assert_eq!(index.resolve(Point::new(210.0, 10.0)), Some(2));
        assert!(index.update(0, Rect::new(0.0, 0.0, 40.0, 40.0)));
        assert_eq!(index.resolve(Point::new(10.0, 10.0)), Some(0));
        // An item grows into its neighbor's old space; the newest bounds win.
        assert!(index.update(0, Rect::new(0.0, 0.0, 72.0, 72.0)));
        assert_eq!(index.resolve(Point::new(60.0, 10.0)), Some(0));
        assert!(!index.update(3, Rect::ZERO));
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn clear_forgets_items() {
        let mut index = three_items();
        index.clear();
        for x in [10.0, 50.0, 90.0] {
            assert_eq!(index.resolve(Point::new(x, 20.0)), None);
        }
        assert!(index.bounds(0).is_none());
        assert!(index.strip_bounds().is_some());
    }
}
