// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-picker coordination across anchors.
//!
//! ## Overview
//!
//! Many anchors may share one hosting surface, but at most one picker is open at a
//! time. [`PickerRegistry`] holds a non-owning reference to the open
//! [`PickerState`](crate::state::PickerState); anchors own their states.
//!
//! [`PickerHost`] is the shared handle anchors are attached with. Opening a picker
//! through it dismisses the previously open one first (last show wins, no stacking),
//! so an outside reader never observes two visible pickers.
//!
//! ## Re-entrancy
//!
//! The host releases its own borrow before mutating any picker state, so state
//! observers may query the host. They must not borrow the picker being notified.

use alloc::rc::{Rc, Weak};
use core::cell::RefCell;

use kurbo::Point;

use crate::reaction::Reaction;
use crate::state::{PickerState, SharedPicker};

/// Non-owning record of the currently open picker.
#[derive(Debug, Default)]
pub struct PickerRegistry {
    open: Option<Weak<RefCell<PickerState>>>,
}

impl PickerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { open: None }
    }

    /// The registered picker, if its anchor is still alive.
    pub fn current(&self) -> Option<SharedPicker> {
        self.open.as_ref().and_then(Weak::upgrade)
    }

    /// Whether `state` is the registered picker.
    pub fn is_current(&self, state: &SharedPicker) -> bool {
        self.open
            .as_ref()
            .is_some_and(|w| core::ptr::eq(w.as_ptr(), Rc::as_ptr(state)))
    }

    /// Register `state`, returning the previously registered picker if it differs.
    pub fn replace(&mut self, state: &SharedPicker) -> Option<SharedPicker> {
        let previous = self.current().filter(|p| !Rc::ptr_eq(p, state));
        self.open = Some(Rc::downgrade(state));
        previous
    }

    /// Clear the registration if it refers to `state`.
    pub fn release(&mut self, state: &SharedPicker) -> bool {
        if self.is_current(state) {
            self.open = None;
            true
        } else {
            false
        }
    }

    /// Drop a registration whose anchor has been torn down.
    pub fn prune(&mut self) {
        if self.open.is_some() && self.current().is_none() {
            self.open = None;
        }
    }
}

/// Shared handle to a [`PickerRegistry`], passed explicitly to every anchor.
#[derive(Clone, Debug, Default)]
pub struct PickerHost {
    registry: Rc<RefCell<PickerRegistry>>,
}

impl PickerHost {
    /// Create a host with an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The open picker, if any.
    pub fn current(&self) -> Option<SharedPicker> {
        let mut registry = self.registry.borrow_mut();
        registry.prune();
        registry.current()
    }

    /// Whether `state` is the registered picker.
    pub fn is_current(&self, state: &SharedPicker) -> bool {
        self.registry.borrow().is_current(state)
    }

    /// Open `state`, dismissing any other open picker first.
    ///
    /// A disposed state is neither registered nor shown.
    pub fn open(&self, state: &SharedPicker, trigger_position: Option<Point>) {
        if state.borrow().is_disposed() {
            return;
        }
        let previous = self.registry.borrow_mut().replace(state);
        if let Some(previous) = previous {
            let mut previous = previous.borrow_mut();
            if previous.is_visible() {
                log::debug!("dismissing open reaction picker before showing another");
                previous.dismiss(None);
            }
        }
        state.borrow_mut().show(trigger_position);
    }

    /// Dismiss the open picker with an optional reaction.
    ///
    /// Returns `false`, doing nothing, when no picker is open.
    pub fn dismiss(&self, reaction: Option<&Reaction>) -> bool {
        let Some(open) = self.current() else {
            return false;
        };
        let mut open = open.borrow_mut();
        if !open.is_visible() {
            return false;
        }
        open.dismiss(reaction);
        true
    }

    /// Route a tap that no anchor claimed.
    ///
    /// Dismisses the open picker without a reaction when `position` lies outside its
    /// surface. Returns whether a dismissal happened.
    pub fn dismiss_if_outside(&self, position: Point) -> bool {
        let Some(open) = self.current() else {
            return false;
        };
        let mut open = open.borrow_mut();
        if !open.is_visible() || open.picker_bounds().contains(position) {
            return false;
        }
        log::debug!("tap at {position:?} outside the reaction picker");
        open.dismiss(None);
        true
    }

    /// Clear the registration if it refers to `state`.
    pub fn release(&self, state: &SharedPicker) -> bool {
        self.registry.borrow_mut().release(state)
    }
}
