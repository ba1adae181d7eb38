// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Reaction: a hold-to-reveal, drag-to-select reaction picker engine.
//!
//! ## Overview
//!
//! A user long-presses an anchor (a post, a message bubble), a horizontal strip of
//! reactions appears next to it, and the user either drags across the strip and
//! releases over a reaction, or releases at once over one. This crate is the
//! interaction engine behind that gesture. It does not draw anything.
//!
//! - [`gesture`]: the per-anchor state machine turning pointer events into
//!   show, hover, and dismiss operations.
//! - [`state`]: the observable [`PickerState`](crate::state::PickerState) a renderer
//!   reads and reports measured bounds back into.
//! - [`placement`]: above/below resolution of the picker and its item tooltips.
//! - [`hit`]: the index mapping pointer positions to reactions.
//! - [`registry`]: the host that keeps at most one picker open.
//! - [`join`] and [`motion`]: the fan-in barrier and ramp targets for entrance and
//!   exit transitions.
//!
//! ## Coordinates and time
//!
//! Positions and bounds are [`kurbo`] values in the host's root coordinate space.
//! Events carry a monotonic timestamp; the engine never reads a clock.
//!
//! ## Workflow
//!
//! 1) Create a [`PickerState`](crate::state::PickerState) per anchor and attach it to
//!    a shared [`PickerHost`](crate::registry::PickerHost) with
//!    [`AnchorBuilder`](crate::gesture::AnchorBuilder).
//! 2) Report the anchor bounds, then feed pointer events to
//!    [`GestureMachine::handle_event`](crate::gesture::GestureMachine::handle_event)
//!    and drive its timer with
//!    [`advance`](crate::gesture::GestureMachine::advance).
//! 3) When the picker becomes visible, place it with
//!    [`PickerState::place`](crate::state::PickerState::place), lay out the items,
//!    and report their bounds.
//! 4) Run the transitions and report entrance and exit completions back to the
//!    machine. Drag tracking is armed when the last item has entered.
//!
//! ```
//! use core::time::Duration;
//! use kurbo::{Point, Rect};
//! use understory_reaction::gesture::{AnchorBuilder, GesturePhase};
//! use understory_reaction::reaction::{Icon, Label, Reaction};
//! use understory_reaction::registry::PickerHost;
//! use understory_reaction::state::PickerState;
//! use understory_reaction::types::{PointerEvent, PointerEventKind};
//!
//! let reactions = vec![
//!     Reaction::new(Label::text("Like"), Icon::Image(1)),
//!     Reaction::new(Label::text("Love"), Icon::Image(2)),
//! ];
//! let state = PickerState::new(reactions, None, |_| {})?.into_shared();
//! state.borrow_mut().set_anchor_bounds(Rect::new(0.0, 400.0, 300.0, 440.0));
//!
//! let host = PickerHost::new();
//! let mut anchor = AnchorBuilder::new(state.clone()).host(host).attach()?;
//!
//! let press = Point::new(20.0, 420.0);
//! anchor.handle_event(PointerEvent::touch(PointerEventKind::Down, press, Duration::ZERO));
//! anchor.advance(Duration::from_millis(400));
//! assert_eq!(anchor.phase(), GesturePhase::VisibleLocked);
//! assert!(state.borrow().is_visible());
//!
//! // The renderer lays out the strip above the anchor.
//! state.borrow_mut().set_picker_bounds(Rect::new(0.0, 300.0, 100.0, 396.0));
//! state.borrow_mut().update_item_bounds(0, Rect::new(8.0, 340.0, 48.0, 380.0));
//! state.borrow_mut().update_item_bounds(1, Rect::new(52.0, 340.0, 92.0, 380.0));
//!
//! // Released straight away over "Love".
//! let release = Point::new(60.0, 350.0);
//! anchor.handle_event(PointerEvent::touch(PointerEventKind::Up, release, Duration::from_millis(410)));
//! assert_eq!(state.borrow().selected_index(), Some(1));
//! assert!(anchor.item_exited(1));
//! assert_eq!(anchor.phase(), GesturePhase::Idle);
//! # Ok::<(), understory_reaction::error::Error>(())
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod error;
pub mod gesture;
pub mod hit;
pub mod hover;
pub mod join;
pub mod motion;
pub mod placement;
pub mod properties;
pub mod reaction;
pub mod registry;
pub mod state;
pub mod types;
