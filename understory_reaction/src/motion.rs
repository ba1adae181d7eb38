// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transition targets for the rendering collaborator.
//!
//! ## Overview
//!
//! The engine does not interpolate. It decides which value each animated property
//! converges to, when a transition starts, and which completion ends it. This module
//! produces those [`Ramp`] descriptions and the one named curve the engine owns,
//! [`fly_back`], used when a selected item returns to the anchor.
//!
//! ## Sequencing
//!
//! Each item enters with two ramps (alpha and vertical slide) staggered by index.
//! Drag tracking is armed when the last item's entrance completes. On dismissal every
//! item exits. With a selection the selected item fades and flies back to the anchor
//! and its completion ends the exit; otherwise the last item's completion does.
//!
//! [`Choreography`] bundles the ramps of one picker session into [`JoinAll`] barriers
//! and turns part completions into the signals the
//! [gesture machine](crate::gesture::GestureMachine) consumes.

use alloc::vec::Vec;
use core::time::Duration;

use kurbo::Rect;

use crate::join::{JoinAll, JoinStatus};
use crate::state::PickerState;
use crate::types::Placement;

/// Duration of an item's entrance or plain exit.
pub const ITEM_DURATION: Duration = Duration::from_millis(100);
/// Entrance delay added per item index.
pub const ITEM_STAGGER: Duration = Duration::from_millis(50);
/// Duration of the selected item's flight back to the anchor.
pub const FLY_BACK_DURATION: Duration = Duration::from_millis(300);
/// Duration of the container's entrance and exit.
pub const CONTAINER_DURATION: Duration = Duration::from_millis(100);
/// Control-point height of the [`fly_back`] curve.
pub const FLY_BACK_AMPLITUDE: f64 = -300.0;

/// An animated property of an item or the container.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Property {
    /// Opacity in `0.0..=1.0`.
    Alpha,
    /// Horizontal translation in logical pixels.
    TranslationX,
    /// Vertical translation in logical pixels.
    TranslationY,
}

/// A single value ramp for the animation system to run.
///
/// `from` is the nominal start value. When a ramp replaces a cancelled one, the
/// animation system should start from the property's current value instead.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ramp {
    /// Animated property.
    pub property: Property,
    /// Nominal start value.
    pub from: f64,
    /// Target value.
    pub to: f64,
    /// Delay before the ramp starts.
    pub delay: Duration,
    /// Ramp duration after the delay.
    pub duration: Duration,
}

impl Ramp {
    fn new(property: Property, from: f64, to: f64, duration: Duration) -> Self {
        Self {
            property,
            from,
            to,
            delay: Duration::ZERO,
            duration,
        }
    }

    #[must_use]
    fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Entrance ramps of item `index`: fade in and slide up from the anchor's height.
pub fn item_entrance(index: usize, anchor_bounds: Rect) -> [Ramp; 2] {
    let delay = ITEM_STAGGER * u32::try_from(index).unwrap_or(u32::MAX);
    [
        Ramp::new(Property::Alpha, 0.0, 1.0, ITEM_DURATION).delayed(delay),
        Ramp::new(
            Property::TranslationY,
            anchor_bounds.height(),
            0.0,
            ITEM_DURATION,
        )
        .delayed(delay),
    ]
}

/// Exit ramps of an item.
///
/// A flying item fades out while translating horizontally onto the anchor's left
/// edge; its vertical offset follows [`fly_back_translation_y`]. Every other item
/// fades out and slides back down by the anchor's height.
pub fn item_exit(item_bounds: Rect, anchor_bounds: Rect, flies_back: bool) -> [Ramp; 2] {
    if flies_back {
        [
            Ramp::new(Property::Alpha, 1.0, 0.0, FLY_BACK_DURATION),
            Ramp::new(
                Property::TranslationX,
                0.0,
                anchor_bounds.x0 - item_bounds.x0,
                FLY_BACK_DURATION,
            ),
        ]
    } else {
        [
            Ramp::new(Property::Alpha, 1.0, 0.0, ITEM_DURATION),
            Ramp::new(
                Property::TranslationY,
                0.0,
                anchor_bounds.height(),
                ITEM_DURATION,
            ),
        ]
    }
}

/// Entrance ramps of the container background.
pub fn container_entrance(anchor_bounds: Rect) -> [Ramp; 2] {
    [
        Ramp::new(Property::Alpha, 0.0, 1.0, CONTAINER_DURATION),
        Ramp::new(
            Property::TranslationY,
            anchor_bounds.height(),
            0.0,
            CONTAINER_DURATION,
        ),
    ]
}

/// Exit ramps of the container background.
pub fn container_exit(anchor_bounds: Rect) -> [Ramp; 2] {
    [
        Ramp::new(Property::Alpha, 1.0, 0.0, CONTAINER_DURATION),
        Ramp::new(
            Property::TranslationY,
            0.0,
            anchor_bounds.height(),
            CONTAINER_DURATION,
        ),
    ]
}

/// The fly-back curve: a cubic Bézier from 0 to 0 with both control points at
/// [`FLY_BACK_AMPLITUDE`], sampled at `progress` in `0.0..=1.0`.
pub fn fly_back(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    let q = 1.0 - p;
    3.0 * p * q * q * FLY_BACK_AMPLITUDE + 3.0 * p * p * q * FLY_BACK_AMPLITUDE
}

/// Vertical offset of a flying item given its current alpha.
///
/// The item arcs away from the anchor side as it fades, so the offset is
/// mirrored when the picker is below the anchor.
pub fn fly_back_translation_y(alpha: f64, placement: Placement) -> f64 {
    fly_back(1.0 - alpha) * placement.direction_sign()
}

/// Index of the item whose exit completion ends a dismissal.
///
/// The selected item when dismissing with a selection that is in the list, the last
/// item otherwise.
pub fn exit_completing_index(len: usize, selected: Option<usize>, with_selection: bool) -> usize {
    let last = len.saturating_sub(1);
    match selected {
        Some(i) if with_selection && i < len => i,
        _ => last,
    }
}

/// What a set of ramps animates.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MotionTarget {
    /// The container background.
    Container,
    /// The item at this index.
    Item(usize),
}

/// Signal for the engine produced when an item's barrier finishes.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MotionSignal {
    /// Item finished entering; report with
    /// [`GestureMachine::item_entered`](crate::gesture::GestureMachine::item_entered).
    Entered(usize),
    /// Item finished exiting; report with
    /// [`GestureMachine::item_exited`](crate::gesture::GestureMachine::item_exited).
    Exited(usize),
}

/// Ramps of one picker session grouped into per-target barriers.
#[derive(Clone, Debug, PartialEq)]
pub struct Choreography {
    exiting: bool,
    container: JoinAll<Ramp>,
    items: Vec<JoinAll<Ramp>>,
}

impl Choreography {
    /// Start the entrance of every item and the container.
    pub fn enter(state: &PickerState) -> Self {
        let anchor = state.anchor_bounds();
        Self {
            exiting: false,
            container: JoinAll::new(container_entrance(anchor)),
            items: (0..state.reactions().len())
                .map(|i| JoinAll::new(item_entrance(i, anchor)))
                .collect(),
        }
    }

    /// Switch to the exit transition.
    ///
    /// Running entrance barriers are cancelled; the returned parts must be stopped
    /// by the animation system before the new ramps start.
    pub fn exit(&mut self, state: &PickerState) -> Vec<(MotionTarget, usize)> {
        let mut cancelled: Vec<_> = self
            .container
            .cancel()
            .into_iter()
            .map(|part| (MotionTarget::Container, part))
            .collect();
        for (i, join) in self.items.iter_mut().enumerate() {
            cancelled.extend(join.cancel().into_iter().map(|part| (MotionTarget::Item(i), part)));
        }

        let anchor = state.anchor_bounds();
        self.exiting = true;
        self.container = JoinAll::new(container_exit(anchor));
        self.items = state
            .reactions()
            .iter()
            .enumerate()
            .map(|(i, reaction)| {
                let flies = state.is_dismissing_with_selection() && state.is_selected(reaction);
                let item = state.item_bounds(i).unwrap_or(Rect::ZERO);
                JoinAll::new(item_exit(item, anchor, flies))
            })
            .collect();
        cancelled
    }

    /// Whether the exit transition is running.
    pub fn is_exiting(&self) -> bool {
        self.exiting
    }

    /// Barrier of `target`.
    pub fn barrier(&self, target: MotionTarget) -> Option<&JoinAll<Ramp>> {
        match target {
            MotionTarget::Container => Some(&self.container),
            MotionTarget::Item(i) => self.items.get(i),
        }
    }

    /// Whether every barrier has finished.
    pub fn is_settled(&self) -> bool {
        self.container.status() != JoinStatus::Running
            && self.items.iter().all(|j| j.status() != JoinStatus::Running)
    }

    /// Report that `part` of `target` finished.
    ///
    /// Returns a signal when this finishes an item's barrier.
    pub fn complete(&mut self, target: MotionTarget, part: usize) -> Option<MotionSignal> {
        match target {
            MotionTarget::Container => {
                let _ = self.container.complete(part);
                None
            }
            MotionTarget::Item(i) => {
                let finished = self.items.get_mut(i)?.complete(part);
                match (finished, self.exiting) {
                    (false, _) => None,
                    (true, false) => Some(MotionSignal::Entered(i)),
                    (true, true) => Some(MotionSignal::Exited(i)),
                }
            }
        }
    }

    /// Complete every part of `target`, returning the resulting signal.
    pub fn complete_all(&mut self, target: MotionTarget) -> Option<MotionSignal> {
        let parts = self.barrier(target).map_or(0, JoinAll::len);
        let mut signal = None;
        for part in 0..parts {
            signal = signal.or(self.complete(target, part));
        }
        signal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reaction::{Icon, Label, Reaction};
    use alloc::vec;

    fn state() -> PickerState {
        let reactions = vec![
            Reaction::new(Label::text("Like"), Icon::Image(1)),
            Reaction::new(Label::text("Love"), Icon::Image(2)),
            Reaction::new(Label::text("Wow"), Icon::Image(3)),
        ];
        let mut s = PickerState::new(reactions, None, |_| {}).unwrap();
        s.set_anchor_bounds(Rect::new(10.0, 300.0, 110.0, 340.0));
        for i in 0..3 {
            let x = 20.0 + i as f64 * 44.0;
            s.update_item_bounds(i, Rect::new(x, 200.0, x + 40.0, 240.0));
        }
        s
    }

    #[test]
    fn entrance_is_staggered() {
        let anchor = Rect::new(0.0, 0.0, 10.0, 40.0);
        let [alpha, slide] = item_entrance(2, anchor);
        assert_eq!(alpha.delay, Duration::from_millis(100));
        assert_eq!((alpha.from, alpha.to), (0.0, 1.0));
        assert_eq!(slide.property, Property::TranslationY);
        assert_eq!((slide.from, slide.to), (40.0, 0.0));
    }

    #[test]
    fn flying_item_targets_anchor_edge() {
        let item = Rect::new(120.0, 0.0, 160.0, 40.0);
        let anchor = Rect::new(20.0, 60.0, 200.0, 100.0);
        let [alpha, x] = item_exit(item, anchor, true);
        assert_eq!(alpha.duration, FLY_BACK_DURATION);
        assert_eq!(x.property, Property::TranslationX);
        assert_eq!(x.to, -100.0);
        let [_, y] = item_exit(item, anchor, false);
        assert_eq!((y.property, y.to), (Property::TranslationY, 40.0));
    }

    #[test]
    fn fly_back_arcs_and_returns() {
        assert_eq!(fly_back(0.0), 0.0);
        assert_eq!(fly_back(1.0), 0.0);
        assert!((fly_back(0.5) + 225.0).abs() < 1e-9);
        assert_eq!(fly_back_translation_y(1.0, Placement::Above), 0.0);
        assert!((fly_back_translation_y(0.5, Placement::Below) - 225.0).abs() < 1e-9);
    }

    #[test]
    fn completing_index_rule() {
        assert_eq!(exit_completing_index(5, Some(1), true), 1);
        assert_eq!(exit_completing_index(5, Some(1), false), 4);
        assert_eq!(exit_completing_index(5, None, true), 4);
        assert_eq!(exit_completing_index(5, Some(9), true), 4);
    }

    #[test]
    fn choreography_signals_entry_and_exit() {
        let mut s = state();
        s.show(None);
        let mut c = Choreography::enter(&s);
        assert_eq!(c.complete(MotionTarget::Item(0), 0), None);
        assert_eq!(c.complete(MotionTarget::Item(0), 1), Some(MotionSignal::Entered(0)));
        assert_eq!(c.complete_all(MotionTarget::Container), None);

        // Dismiss while item 2 is still entering.
        let love = s.reactions()[1].clone();
        s.dismiss(Some(&love));
        let cancelled = c.exit(&s);
        assert!(cancelled.contains(&(MotionTarget::Item(2), 0)));
        assert!(cancelled.contains(&(MotionTarget::Item(1), 1)));
        assert!(!cancelled.iter().any(|(t, _)| *t == MotionTarget::Item(0)));
        assert!(c.is_exiting());

        let flying = c.barrier(MotionTarget::Item(1)).unwrap();
        assert_eq!(flying.part(1).unwrap().property, Property::TranslationX);
        assert_eq!(flying.part(1).unwrap().to, 10.0 - 64.0);
        let other = c.barrier(MotionTarget::Item(0)).unwrap();
        assert_eq!(other.part(1).unwrap().property, Property::TranslationY);

        assert_eq!(c.complete_all(MotionTarget::Item(1)), Some(MotionSignal::Exited(1)));
        assert!(!c.is_settled());
        let _ = c.complete_all(MotionTarget::Item(0));
        let _ = c.complete_all(MotionTarget::Item(2));
        let _ = c.complete_all(MotionTarget::Container);
        assert!(c.is_settled());
    }
}
