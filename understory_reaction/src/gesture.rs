// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hold-to-reveal, drag-to-select gesture machine.
//!
//! ## Overview
//!
//! One [`GestureMachine`] runs per anchor. The host feeds it the anchor's
//! [`PointerEvent`]s and the pointer events that land on the open picker surface;
//! the machine drives the anchor's [`PickerState`](crate::state::PickerState) and
//! answers each event with an [`Outcome`].
//!
//! ```text
//! Idle --down--> PressPending --long press--> VisibleLocked --grace--> VisibleTracking
//!                     |                           |  up: item under release   |  up: hovered item
//!                  up/cancel                      v                           v
//!                     '---------> Idle <--exit-- Dismissing <-----------------'
//! ```
//!
//! [`Open`](GesturePhase::Open) is entered only when a drag is released over nothing
//! and [`GestureConfig::keep_open_on_empty_release`] is set. A later press on the
//! picker surface goes through [`VisibleLocked`](GesturePhase::VisibleLocked) again;
//! a press outside it dismisses.
//!
//! ## Timers
//!
//! The machine never sleeps. It holds at most one pending timer, exposed by
//! [`next_deadline`](GestureMachine::next_deadline). Hosts call
//! [`advance`](GestureMachine::advance) when it elapses. A timer due at or before an
//! event's timestamp fires before that event is handled, so the tap versus long-press
//! race resolves the same way whether or not the host polled. A competing event
//! drops the timer, and firing re-checks the phase it was armed in.
//!
//! ## External dismissal
//!
//! The [host](crate::registry::PickerHost), a back press or another anchor may hide
//! the picker between events. The machine reconciles its phase with the state before
//! handling each input.
//!
//! A press on an idle anchor first goes to the host. If it lands outside another
//! anchor's open picker, that picker is dismissed and the press is consumed. While
//! dismissing, every event is drained until the exit completes.

use core::time::Duration;

use kurbo::Point;

use crate::error::Error;
use crate::properties::GestureConfig;
use crate::reaction::Reaction;
use crate::registry::PickerHost;
use crate::state::SharedPicker;
use crate::types::{Outcome, PointerEvent, PointerEventKind};

/// Phase of an anchor's gesture.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum GesturePhase {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A contact is down on the anchor and the long-press timer is running.
    PressPending,
    /// The picker is shown; a release inside the grace window selects under the pointer.
    VisibleLocked,
    /// The pointer is being dragged over the picker and hover is live.
    VisibleTracking,
    /// The picker stays open with no pointer held.
    Open,
    /// The exit transition is running; the rest of the gesture is drained.
    Dismissing,
}

impl GesturePhase {
    /// Whether the picker is shown in this phase.
    pub const fn is_visible(self) -> bool {
        matches!(self, Self::VisibleLocked | Self::VisibleTracking | Self::Open)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum TimerKind {
    LongPress,
    Grace,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct Timer {
    kind: TimerKind,
    deadline: Duration,
}

/// Attaches a [`GestureMachine`] to an anchor.
///
/// The picker host must be supplied explicitly; attaching without one fails with
/// [`Error::MissingHost`].
#[derive(Debug)]
pub struct AnchorBuilder {
    state: SharedPicker,
    host: Option<PickerHost>,
    config: GestureConfig,
}

impl AnchorBuilder {
    /// Start attaching the anchor that owns `state`.
    pub fn new(state: SharedPicker) -> Self {
        Self {
            state,
            host: None,
            config: GestureConfig::default(),
        }
    }

    /// Set the picker host the anchor opens its picker through.
    #[must_use]
    pub fn host(mut self, host: PickerHost) -> Self {
        self.host = Some(host);
        self
    }

    /// Override the gesture timing and release policy.
    #[must_use]
    pub fn config(mut self, config: GestureConfig) -> Self {
        self.config = config;
        self
    }

    /// Finish attaching.
    pub fn attach(self) -> Result<GestureMachine, Error> {
        let host = self.host.ok_or(Error::MissingHost)?;
        Ok(GestureMachine {
            state: self.state,
            host,
            config: self.config,
            phase: GesturePhase::Idle,
            timer: None,
            press_position: None,
            last_position: None,
        })
    }
}

/// Per-anchor gesture state machine.
#[derive(Debug)]
pub struct GestureMachine {
    state: SharedPicker,
    host: PickerHost,
    config: GestureConfig,
    phase: GesturePhase,
    timer: Option<Timer>,
    press_position: Option<Point>,
    last_position: Option<Point>,
}

impl GestureMachine {
    /// Current phase.
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// The anchor's picker state.
    pub fn state(&self) -> &SharedPicker {
        &self.state
    }

    /// The host this anchor opens through.
    pub fn host(&self) -> &PickerHost {
        &self.host
    }

    /// Timing and release policy.
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// When the pending timer fires, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timer.map(|t| t.deadline)
    }

    /// Fire every timer due at or before `now`.
    pub fn advance(&mut self, now: Duration) {
        while let Some(timer) = self.timer.filter(|t| t.deadline <= now) {
            self.timer = None;
            self.sync();
            self.fire(timer);
        }
    }

    /// Handle one pointer event for this anchor or its open picker.
    ///
    /// A press that lands outside another anchor's open picker only dismisses that
    /// picker and is consumed. Events for a disposed anchor are ignored.
    pub fn handle_event(&mut self, event: PointerEvent) -> Outcome {
        if self.state.borrow().is_disposed() {
            return Outcome::Continue;
        }
        self.advance(event.time);
        self.sync();
        let position = event.position;
        match (self.phase, event.kind) {
            (GesturePhase::Idle, PointerEventKind::Down) => {
                if self.host.dismiss_if_outside(position) {
                    return Outcome::Consume;
                }
                if !event.pointer_type.supports_long_press() {
                    return Outcome::Continue;
                }
                self.press_position = Some(position);
                self.last_position = Some(position);
                self.timer = Some(Timer {
                    kind: TimerKind::LongPress,
                    deadline: event.time + self.config.long_press_timeout,
                });
                self.set_phase(GesturePhase::PressPending);
                Outcome::Continue
            }
            (GesturePhase::Idle, _) => Outcome::Continue,
            (GesturePhase::PressPending, PointerEventKind::Move) => {
                let anchor = self.state.borrow().anchor_bounds();
                if !anchor.is_zero_area() && !anchor.contains(position) {
                    self.cancel_press();
                } else {
                    self.last_position = Some(position);
                }
                Outcome::Continue
            }
            (GesturePhase::PressPending, PointerEventKind::Up | PointerEventKind::Cancel) => {
                self.cancel_press();
                Outcome::Continue
            }
            (GesturePhase::PressPending, PointerEventKind::Down) => Outcome::Continue,
            (GesturePhase::VisibleLocked, PointerEventKind::Up) => {
                let reaction = self.state.borrow().reaction_at(position).cloned();
                self.dismiss(reaction);
                Outcome::Consume
            }
            (GesturePhase::VisibleTracking, PointerEventKind::Move) => {
                self.last_position = Some(position);
                let _ = self.state.borrow_mut().track_pointer(position);
                Outcome::Consume
            }
            (GesturePhase::VisibleTracking, PointerEventKind::Up) => {
                self.last_position = Some(position);
                let hovered = {
                    let mut state = self.state.borrow_mut();
                    let _ = state.track_pointer(position);
                    state.hovered_reaction().cloned()
                };
                if hovered.is_none() && self.config.keep_open_on_empty_release {
                    self.state.borrow_mut().release_pointer();
                    self.set_phase(GesturePhase::Open);
                } else {
                    self.dismiss(hovered);
                }
                Outcome::Consume
            }
            (
                GesturePhase::VisibleLocked | GesturePhase::VisibleTracking,
                PointerEventKind::Cancel,
            ) => {
                self.dismiss(None);
                Outcome::Consume
            }
            (GesturePhase::VisibleLocked, PointerEventKind::Move) => {
                self.last_position = Some(position);
                Outcome::Consume
            }
            (GesturePhase::Open, PointerEventKind::Down) => {
                if self.state.borrow().picker_bounds().contains(position) {
                    self.last_position = Some(position);
                    self.timer = Some(Timer {
                        kind: TimerKind::Grace,
                        deadline: event.time + self.config.grace_window,
                    });
                    self.set_phase(GesturePhase::VisibleLocked);
                } else {
                    self.dismiss(None);
                }
                Outcome::Consume
            }
            (
                GesturePhase::VisibleLocked | GesturePhase::VisibleTracking | GesturePhase::Open,
                _,
            )
            | (GesturePhase::Dismissing, _) => Outcome::Consume,
        }
    }

    /// Report that item `index` finished its entrance transition.
    ///
    /// Returns `true` when this arms drag tracking. A drag already in progress is
    /// re-evaluated at the last pointer position.
    pub fn item_entered(&mut self, index: usize) -> bool {
        let mut state = self.state.borrow_mut();
        if !state.item_entered(index) {
            return false;
        }
        if self.phase == GesturePhase::VisibleTracking
            && let Some(position) = self.last_position
        {
            let _ = state.track_pointer(position);
        }
        true
    }

    /// Report that item `index` finished its exit transition.
    ///
    /// Returns `true` when this completes the dismissal, which releases the host
    /// registration and returns the machine to [`Idle`](GesturePhase::Idle).
    pub fn item_exited(&mut self, index: usize) -> bool {
        self.sync();
        if !self.state.borrow_mut().item_exited(index) {
            return false;
        }
        let _ = self.host.release(&self.state);
        if self.phase == GesturePhase::Dismissing {
            self.set_phase(GesturePhase::Idle);
        }
        true
    }

    /// Handle a back press.
    ///
    /// Dismisses without a reaction when the picker is shown and
    /// [`dismiss_on_back_press`](crate::properties::PickerProperties::dismiss_on_back_press)
    /// is set. Returns whether the press was consumed.
    pub fn back_pressed(&mut self) -> bool {
        self.sync();
        if !self.phase.is_visible() || !self.state.borrow().properties().dismiss_on_back_press {
            return false;
        }
        self.dismiss(None);
        true
    }

    /// Tear the anchor down.
    ///
    /// Drops any pending timer, disposes the state, and releases the host
    /// registration if it is held.
    pub fn dispose(&mut self) {
        self.timer = None;
        self.press_position = None;
        self.last_position = None;
        self.state.borrow_mut().dispose();
        let _ = self.host.release(&self.state);
        self.set_phase(GesturePhase::Idle);
    }

    fn fire(&mut self, timer: Timer) {
        match (timer.kind, self.phase) {
            (TimerKind::LongPress, GesturePhase::PressPending) => {
                let anchor = self.state.borrow().anchor_bounds();
                let trigger = self
                    .press_position
                    .map(|p| Point::new(p.x - anchor.x0, p.y - anchor.y0));
                self.host.open(&self.state, trigger);
                self.timer = Some(Timer {
                    kind: TimerKind::Grace,
                    deadline: timer.deadline + self.config.grace_window,
                });
                self.set_phase(GesturePhase::VisibleLocked);
            }
            (TimerKind::Grace, GesturePhase::VisibleLocked) => {
                self.set_phase(GesturePhase::VisibleTracking);
                if let Some(position) = self.last_position {
                    let _ = self.state.borrow_mut().track_pointer(position);
                }
            }
            (kind, phase) => {
                log::trace!("dropping stale {kind:?} timer in {phase:?}");
            }
        }
    }

    fn cancel_press(&mut self) {
        self.timer = None;
        self.press_position = None;
        self.set_phase(GesturePhase::Idle);
    }

    fn dismiss(&mut self, reaction: Option<Reaction>) {
        self.timer = None;
        self.press_position = None;
        let exit_pending = {
            let mut state = self.state.borrow_mut();
            state.dismiss(reaction.as_ref());
            state.is_exit_pending()
        };
        if exit_pending {
            self.set_phase(GesturePhase::Dismissing);
        } else {
            let _ = self.host.release(&self.state);
            self.set_phase(GesturePhase::Idle);
        }
    }

    fn sync(&mut self) {
        let (visible, exit_pending) = {
            let state = self.state.borrow();
            (state.is_visible(), state.is_exit_pending())
        };
        let next = match self.phase {
            phase if phase.is_visible() && !visible => {
                self.timer = None;
                if exit_pending {
                    GesturePhase::Dismissing
                } else {
                    GesturePhase::Idle
                }
            }
            GesturePhase::Idle | GesturePhase::Dismissing if visible => GesturePhase::Open,
            GesturePhase::Dismissing if !exit_pending => {
                let _ = self.host.release(&self.state);
                GesturePhase::Idle
            }
            phase => phase,
        };
        self.set_phase(next);
    }

    fn set_phase(&mut self, next: GesturePhase) {
        if self.phase != next {
            log::debug!("reaction gesture {:?} -> {:?}", self.phase, next);
            self.phase = next;
        }
    }
}
