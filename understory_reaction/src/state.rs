// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The picker session model observed by rendering.
//!
//! ## Overview
//!
//! One [`PickerState`] exists per anchor. The [gesture machine](crate::gesture) and
//! the [host](crate::registry::PickerHost) mutate it; rendering reads it and reports
//! measured bounds and transition completions back into it.
//!
//! ## Observation
//!
//! Fields are grouped into [`Changes`]. Consumers [`subscribe`](PickerState::subscribe)
//! to the groups they need and are called once per mutating operation with the
//! groups that changed and a shared view of the state. Observers receive the state
//! by reference and must not try to borrow a [`SharedPicker`] holding it.
//!
//! ## Selection versus hover
//!
//! Hover is transient and pointer driven. Selection is committed only by
//! [`react`](PickerState::react), [`dismiss`](PickerState::dismiss) with a reaction,
//! [`toggle_reaction`](PickerState::toggle_reaction), and
//! [`invalidate_reaction`](PickerState::invalidate_reaction). Each commit calls the
//! `on_reacted` callback exactly once. Hover changes never do.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use kurbo::{Point, Rect, Size};

use crate::error::Error;
use crate::hit::HitIndex;
use crate::hover::{HoverChange, HoverTracker};
use crate::motion::exit_completing_index;
use crate::placement::{PositionProvider, resolve_placement};
use crate::properties::PickerProperties;
use crate::reaction::{Reaction, position_of};
use crate::types::{LayoutDirection, Placement};

bitflags::bitflags! {
    /// Groups of picker fields that change together.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Changes: u8 {
        /// `is_visible`, `is_dismissing_with_selection`, `is_exit_pending`, trigger position.
        const VISIBILITY = 0b0000_0001;
        /// Committed selection.
        const SELECTION  = 0b0000_0010;
        /// Hovered item, pointer position, and drag arming.
        const HOVER      = 0b0000_0100;
        /// Anchor, picker, and item bounds, and the resolved placement.
        const BOUNDS     = 0b0000_1000;
    }
}

/// Shared handle to a picker state, as held by anchors and hosts.
pub type SharedPicker = Rc<RefCell<PickerState>>;

/// Callback invoked with the newly committed selection.
///
/// It runs inside the mutating call, while a [`SharedPicker`] holding the state is
/// mutably borrowed. Like observers, it must not borrow that picker; it may query
/// the [`PickerHost`](crate::registry::PickerHost).
pub type OnReacted = Box<dyn FnMut(Option<&Reaction>)>;

type Observer = Box<dyn FnMut(&PickerState, Changes)>;

/// Handle returned by [`PickerState::subscribe`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct SubscriptionId(u32);

#[derive(Default)]
struct Observers {
    next_id: u32,
    list: Vec<(SubscriptionId, Changes, Observer)>,
}

/// Mutable session state of one anchor's picker.
pub struct PickerState {
    reactions: Vec<Reaction>,
    properties: PickerProperties,
    visible: bool,
    dismissing_with_selection: bool,
    exit_pending: bool,
    can_drag: bool,
    trigger_position: Option<Point>,
    pointer_position: Option<Point>,
    hover: HoverTracker,
    selected: Option<Reaction>,
    anchor_bounds: Rect,
    placement: Placement,
    hits: HitIndex,
    on_reacted: OnReacted,
    observers: Observers,
    disposed: bool,
}

impl core::fmt::Debug for PickerState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PickerState")
            .field("reactions", &self.reactions.len())
            .field("visible", &self.visible)
            .field("dismissing_with_selection", &self.dismissing_with_selection)
            .field("exit_pending", &self.exit_pending)
            .field("can_drag", &self.can_drag)
            .field("hovered", &self.hover.current())
            .field("selected", &self.selected)
            .field("placement", &self.placement)
            .field("observers", &self.observers.list.len())
            .finish_non_exhaustive()
    }
}

impl PickerState {
    /// Create the state for an anchor with default [`PickerProperties`].
    ///
    /// Fails with [`Error::EmptyReactions`] if `reactions` is empty.
    pub fn new(
        reactions: Vec<Reaction>,
        initial_selection: Option<Reaction>,
        on_reacted: impl FnMut(Option<&Reaction>) + 'static,
    ) -> Result<Self, Error> {
        if reactions.is_empty() {
            return Err(Error::EmptyReactions);
        }
        let properties = PickerProperties::default();
        let hits = HitIndex::new(reactions.len(), properties.hit_margin);
        Ok(Self {
            reactions,
            properties,
            visible: false,
            dismissing_with_selection: false,
            exit_pending: false,
            can_drag: false,
            trigger_position: None,
            pointer_position: None,
            hover: HoverTracker::new(),
            selected: initial_selection,
            anchor_bounds: Rect::ZERO,
            placement: Placement::Above,
            hits,
            on_reacted: Box::new(on_reacted),
            observers: Observers::default(),
            disposed: false,
        })
    }

    /// Replace the properties. Call before any bounds are reported.
    #[must_use]
    pub fn with_properties(mut self, properties: PickerProperties) -> Self {
        self.properties = properties;
        self.hits = HitIndex::new(self.reactions.len(), properties.hit_margin);
        self
    }

    /// Wrap into a [`SharedPicker`].
    pub fn into_shared(self) -> SharedPicker {
        Rc::new(RefCell::new(self))
    }

    /// Reactions, fixed for the state's lifetime.
    pub fn reactions(&self) -> &[Reaction] {
        &self.reactions
    }

    /// Picker configuration.
    pub fn properties(&self) -> &PickerProperties {
        &self.properties
    }

    /// Whether the picker is shown or animating in.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the running exit follows a selection rather than a plain cancel.
    pub fn is_dismissing_with_selection(&self) -> bool {
        self.dismissing_with_selection
    }

    /// Whether an exit transition has started and not yet reported completion.
    pub fn is_exit_pending(&self) -> bool {
        self.exit_pending
    }

    /// Whether pointer movement currently updates hover.
    pub fn can_drag(&self) -> bool {
        self.can_drag
    }

    /// Where the long press happened, relative to the anchor's origin.
    pub fn trigger_position(&self) -> Option<Point> {
        self.trigger_position
    }

    /// Tracked pointer position while dragging.
    pub fn pointer_position(&self) -> Option<Point> {
        self.pointer_position
    }

    /// Index of the hovered reaction.
    pub fn hovered_index(&self) -> Option<usize> {
        self.hover.current()
    }

    /// Reaction under the pointer.
    pub fn hovered_reaction(&self) -> Option<&Reaction> {
        self.hover.current().and_then(|i| self.reactions.get(i))
    }

    /// Committed selection.
    pub fn selected_reaction(&self) -> Option<&Reaction> {
        self.selected.as_ref()
    }

    /// Index of the committed selection within [`reactions`](Self::reactions).
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
            .as_ref()
            .and_then(|r| position_of(&self.reactions, r))
    }

    /// Whether `reaction` is the committed selection.
    pub fn is_selected(&self, reaction: &Reaction) -> bool {
        self.selected.as_ref().is_some_and(|s| s.is_same(reaction))
    }

    /// Last measured anchor bounds.
    pub fn anchor_bounds(&self) -> Rect {
        self.anchor_bounds
    }

    /// Last measured picker surface bounds.
    pub fn picker_bounds(&self) -> Rect {
        self.hits.strip_bounds().unwrap_or(Rect::ZERO)
    }

    /// Current orientation.
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Last measured bounds of item `index`.
    pub fn item_bounds(&self, index: usize) -> Option<Rect> {
        self.hits.bounds(index)
    }

    /// The hit-test index backing [`reaction_at`](Self::reaction_at).
    pub fn hit_index(&self) -> &HitIndex {
        &self.hits
    }

    /// Target size of item `index` under the current hover.
    pub fn item_target_size(&self, index: usize) -> f64 {
        self.properties.item_size(index, self.hover.current())
    }

    /// Whether [`dispose`](Self::dispose) has run.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Show the picker for a long press at `trigger_position` (anchor-relative).
    ///
    /// Ignored once the state has been [disposed](Self::dispose).
    pub fn show(&mut self, trigger_position: Option<Point>) {
        if self.disposed {
            log::debug!("ignoring show on a disposed reaction picker");
            return;
        }
        self.visible = true;
        self.exit_pending = false;
        self.dismissing_with_selection = false;
        self.trigger_position = trigger_position;
        log::debug!("reaction picker shown at {trigger_position:?}");
        self.notify(Changes::VISIBILITY);
    }

    /// Index of the reaction under `pt`.
    pub fn index_at(&self, pt: Point) -> Option<usize> {
        self.hits.resolve(pt)
    }

    /// Reaction under `pt`.
    pub fn reaction_at(&self, pt: Point) -> Option<&Reaction> {
        self.index_at(pt).and_then(|i| self.reactions.get(i))
    }

    /// Record the measured bounds of item `index`.
    ///
    /// Out-of-range indices are ignored.
    pub fn update_item_bounds(&mut self, index: usize, bounds: Rect) {
        if !self.hits.update(index, bounds) {
            log::warn!(
                "ignoring bounds for reaction item {index}: picker has {} items",
                self.reactions.len()
            );
            return;
        }
        log::trace!("reaction item {index} bounds {bounds:?}");
        self.notify(Changes::BOUNDS);
    }

    /// Record the measured anchor bounds.
    pub fn set_anchor_bounds(&mut self, bounds: Rect) {
        if self.anchor_bounds != bounds {
            self.anchor_bounds = bounds;
            self.notify(Changes::BOUNDS);
        }
    }

    /// Record the measured picker surface bounds.
    pub fn set_picker_bounds(&mut self, bounds: Rect) {
        if self.hits.strip_bounds() != Some(bounds) {
            self.hits.set_strip_bounds(bounds);
            self.notify(Changes::BOUNDS);
        }
    }

    /// Set the orientation directly.
    ///
    /// Prefer [`place`](Self::place), which derives it from the resolved offset.
    pub fn set_placement(&mut self, placement: Placement) {
        if self.placement != placement {
            self.placement = placement;
            self.notify(Changes::BOUNDS);
        }
    }

    /// Resolve the picker offset for the current anchor and trigger.
    ///
    /// Updates [`placement`](Self::placement) from the resolved offset and returns
    /// the offset. An unspecified trigger places the picker at the anchor origin.
    pub fn place<P: PositionProvider + ?Sized>(
        &mut self,
        provider: &P,
        window_size: Size,
        layout_direction: LayoutDirection,
        content_size: Size,
    ) -> Point {
        let tapped = self.trigger_position.unwrap_or(Point::ZERO).to_vec2();
        let resolved = resolve_placement(
            provider,
            self.anchor_bounds,
            window_size,
            layout_direction,
            content_size,
            tapped,
        );
        self.set_placement(resolved.placement);
        resolved.offset
    }

    /// Hide the picker, committing `reaction` first if given.
    ///
    /// Without a reaction the previous selection is left untouched.
    pub fn dismiss(&mut self, reaction: Option<&Reaction>) {
        let mut changes = Changes::VISIBILITY;
        if let Some(reaction) = reaction {
            self.commit(Some(reaction.clone()));
            changes |= Changes::SELECTION;
        }
        self.dismissing_with_selection = reaction.is_some();
        if self.visible {
            self.exit_pending = true;
        }
        self.visible = false;
        changes |= self.invalidate_pointer();
        log::debug!(
            "reaction picker dismissed (with selection: {})",
            self.dismissing_with_selection
        );
        self.notify(changes);
    }

    /// Move the tracked pointer and update hover.
    ///
    /// Ignored unless dragging is armed.
    pub fn track_pointer(&mut self, position: Point) -> HoverChange {
        if !self.can_drag {
            return HoverChange::default();
        }
        self.pointer_position = Some(position);
        let change = self.hover.update(self.hits.resolve(position));
        if !change.is_empty() {
            log::trace!("reaction hover {:?} -> {:?}", change.left, change.entered);
        }
        self.notify(Changes::HOVER);
        change
    }

    /// Arm drag tracking.
    pub fn enable_pointer_tracking(&mut self) {
        if !self.can_drag {
            self.can_drag = true;
            self.notify(Changes::HOVER);
        }
    }

    /// Disarm drag tracking and forget the pointer position.
    pub fn disable_pointer_tracking(&mut self) {
        let changed = self.can_drag || self.pointer_position.is_some();
        self.can_drag = false;
        self.pointer_position = None;
        if changed {
            self.notify(Changes::HOVER);
        }
    }

    /// Forget the pointer position and hover, keeping drag tracking armed.
    ///
    /// Used when a drag is released over nothing and the picker stays open, so a
    /// later drag on the strip hovers again.
    pub fn release_pointer(&mut self) {
        let changed = self.pointer_position.is_some() || self.hover.current().is_some();
        self.pointer_position = None;
        let _ = self.hover.clear();
        if changed {
            self.notify(Changes::HOVER);
        }
    }

    /// Toggle the selection.
    ///
    /// With nothing selected, selects `reaction` (the first reaction when `None`).
    /// With a selection, clears it.
    pub fn toggle_reaction(&mut self, reaction: Option<&Reaction>) {
        if self.selected.is_some() {
            self.invalidate_reaction();
            return;
        }
        let reaction = reaction.unwrap_or(&self.reactions[0]).clone();
        self.react(&reaction);
    }

    /// Commit `reaction` as the selection.
    pub fn react(&mut self, reaction: &Reaction) {
        self.commit(Some(reaction.clone()));
        self.notify(Changes::SELECTION);
    }

    /// Clear the selection.
    pub fn invalidate_reaction(&mut self) {
        self.commit(None);
        self.notify(Changes::SELECTION);
    }

    /// Report that item `index` finished its entrance.
    ///
    /// Returns `true` when this arms drag tracking (the last item entered).
    pub fn item_entered(&mut self, index: usize) -> bool {
        if !self.visible || index + 1 != self.reactions.len() || self.can_drag {
            return false;
        }
        self.enable_pointer_tracking();
        true
    }

    /// Report that item `index` finished its exit.
    ///
    /// Returns `true` when this completes the dismissal. With a selection that is the
    /// selected item; otherwise the last item.
    pub fn item_exited(&mut self, index: usize) -> bool {
        if !self.exit_pending {
            return false;
        }
        let completing = exit_completing_index(
            self.reactions.len(),
            self.selected_index(),
            self.dismissing_with_selection,
        );
        if index != completing {
            return false;
        }
        self.finish_dismissal();
        true
    }

    /// Reset after the exit transition, whether or not it was observed.
    pub fn finish_dismissal(&mut self) {
        self.exit_pending = false;
        self.dismissing_with_selection = false;
        let changes = Changes::VISIBILITY | self.invalidate_pointer();
        self.notify(changes);
    }

    /// Tear the state down with its anchor.
    ///
    /// Hover and drag tracking are invalidated synchronously, even if an exit is in
    /// flight, and every item's bounds are forgotten.
    pub fn dispose(&mut self) {
        self.dismiss(None);
        self.exit_pending = false;
        self.dismissing_with_selection = false;
        self.hits.clear();
        self.disposed = true;
        self.notify(Changes::VISIBILITY | Changes::BOUNDS);
    }

    /// Observe the groups in `mask`.
    pub fn subscribe(
        &mut self,
        mask: Changes,
        observer: impl FnMut(&Self, Changes) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.observers.next_id);
        self.observers.next_id += 1;
        self.observers.list.push((id, mask, Box::new(observer)));
        id
    }

    /// Stop observing. Returns `false` for unknown ids.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.list.len();
        self.observers.list.retain(|(sid, _, _)| *sid != id);
        self.observers.list.len() != before
    }

    fn commit(&mut self, selection: Option<Reaction>) {
        self.selected = selection;
        (self.on_reacted)(self.selected.as_ref());
    }

    fn invalidate_pointer(&mut self) -> Changes {
        let had =
            self.can_drag || self.pointer_position.is_some() || self.hover.current().is_some();
        self.can_drag = false;
        self.pointer_position = None;
        let _ = self.hover.clear();
        if had {
            Changes::HOVER
        } else {
            Changes::empty()
        }
    }

    fn notify(&mut self, changes: Changes) {
        if changes.is_empty() || self.observers.list.is_empty() {
            return;
        }
        let mut list = core::mem::take(&mut self.observers.list);
        for (_, mask, observer) in &mut list {
            let hit = *mask & changes;
            if !hit.is_empty() {
                observer(self, hit);
            }
        }
        self.observers.list = list;
    }
}
