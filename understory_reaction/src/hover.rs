// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover transitions between picker items.
//!
//! [`HoverTracker`] remembers the hovered item and, when the hit test produces a
//! new one, reports the minimal leave/enter pair. Hosts use these transitions to
//! drive haptics and label tooltips without diffing state themselves.
//!
//! ```
//! use understory_reaction::hover::{HoverEvent, HoverTracker};
//!
//! let mut h = HoverTracker::new();
//! let first = h.update(Some(1));
//! assert_eq!(first.events().collect::<Vec<_>>(), [HoverEvent::Enter(1)]);
//! let second = h.update(Some(2));
//! assert_eq!(
//!     second.events().collect::<Vec<_>>(),
//!     [HoverEvent::Leave(1), HoverEvent::Enter(2)]
//! );
//! assert!(h.update(Some(2)).is_empty());
//! ```

/// A hover transition for one item index.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HoverEvent {
    /// The pointer left the item.
    Leave(usize),
    /// The pointer entered the item.
    Enter(usize),
}

/// The transitions produced by one hover update.
///
/// Leave is always ordered before enter.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct HoverChange {
    /// Item the pointer left, if any.
    pub left: Option<usize>,
    /// Item the pointer entered, if any.
    pub entered: Option<usize>,
}

impl HoverChange {
    /// Returns `true` when nothing changed.
    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.entered.is_none()
    }

    /// Transitions in delivery order: leave, then enter.
    pub fn events(self) -> impl Iterator<Item = HoverEvent> {
        self.left
            .map(HoverEvent::Leave)
            .into_iter()
            .chain(self.entered.map(HoverEvent::Enter))
    }
}

/// Tracks the hovered item across pointer updates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct HoverTracker {
    current: Option<usize>,
}

impl HoverTracker {
    /// Create a tracker with nothing hovered.
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Currently hovered item.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Move hover to `next`, returning the transitions needed to get there.
    pub fn update(&mut self, next: Option<usize>) -> HoverChange {
        if self.current == next {
            return HoverChange::default();
        }
        let change = HoverChange {
            left: self.current,
            entered: next,
        };
        self.current = next;
        change
    }

    /// Drop the hovered item, returning its leave transition.
    pub fn clear(&mut self) -> HoverChange {
        self.update(None)
    }
}
