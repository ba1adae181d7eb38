// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core input and layout types: placement, pointers, events, and outcomes.
//!
//! These describe what the host delivers to the [gesture machine](crate::gesture)
//! and what the engine reports back. Geometry comes from Kurbo.

use core::time::Duration;

use kurbo::Point;

/// Where the picker surface renders relative to its anchor.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Placement {
    /// The picker sits above the anchor.
    #[default]
    Above,
    /// The picker sits below the anchor.
    Below,
}

impl Placement {
    /// Sign applied to vertical motion so that it always travels away from the anchor.
    ///
    /// `1.0` for [`Above`](Self::Above), `-1.0` for [`Below`](Self::Below).
    pub const fn direction_sign(self) -> f64 {
        match self {
            Self::Above => 1.0,
            Self::Below => -1.0,
        }
    }
}

/// Horizontal layout direction of the host.
///
/// Passed through to [`PositionProvider`](crate::placement::PositionProvider)
/// implementations; the default provider ignores it.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum LayoutDirection {
    /// Left to right.
    #[default]
    Ltr,
    /// Right to left.
    Rtl,
}

/// Kind of device that produced a pointer event.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum PointerType {
    /// A finger on a touch surface.
    #[default]
    Touch,
    /// A stylus contact.
    Stylus,
    /// A mouse or other precision pointer.
    Mouse,
    /// A stylus eraser tip.
    Eraser,
    /// Anything the host could not classify.
    Unknown,
}

impl PointerType {
    /// Whether this pointer has press-and-hold semantics.
    ///
    /// Only touch and stylus contacts can open the picker with a long press.
    pub const fn supports_long_press(self) -> bool {
        matches!(self, Self::Touch | Self::Stylus)
    }
}

/// What happened to the pointer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PointerEventKind {
    /// The pointer made contact.
    Down,
    /// The pointer moved while in contact.
    Move,
    /// The pointer was released.
    Up,
    /// The host cancelled the gesture (for example a parent started scrolling).
    Cancel,
}

/// A single pointer event delivered by the host.
///
/// `position` is in the host's root coordinate space, the same space as the
/// anchor, picker, and item bounds reported to the engine. `time` is a
/// monotonic timestamp from an arbitrary epoch.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// What happened.
    pub kind: PointerEventKind,
    /// Pointer position in root coordinates.
    pub position: Point,
    /// Device that produced the event.
    pub pointer_type: PointerType,
    /// Monotonic timestamp.
    pub time: Duration,
}

impl PointerEvent {
    /// Create an event from a touch contact.
    pub const fn touch(kind: PointerEventKind, position: Point, time: Duration) -> Self {
        Self {
            kind,
            position,
            pointer_type: PointerType::Touch,
            time,
        }
    }

    /// Return a copy of this event produced by a different device.
    #[must_use]
    pub const fn with_pointer_type(mut self, pointer_type: PointerType) -> Self {
        self.pointer_type = pointer_type;
        self
    }
}

/// Whether the engine consumed an event.
///
/// A consumed event should not reach descendant tap handlers in the host.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Outcome {
    /// The engine did not claim the event; the host may process it normally.
    #[default]
    Continue,
    /// The engine claimed the event; suppress default tap behavior.
    Consume,
}

impl Outcome {
    /// Returns `true` for [`Consume`](Self::Consume).
    pub const fn is_consumed(self) -> bool {
        matches!(self, Self::Consume)
    }
}
