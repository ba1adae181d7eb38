// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement resolution: where the picker and its labels appear on screen.
//!
//! ## Picker
//!
//! [`AnchoredPositionProvider`] starts the picker at the tapped x-position and
//! shifts it left when its right edge would leave the window. Vertically it prefers
//! the space above the anchor and flips below when the top edge would be negative.
//!
//! The orientation is never taken from the provider's inputs. It is derived from the
//! resolved offset by [`placement_for_offset`], so custom providers and downstream
//! alignment logic always agree.
//!
//! ## Labels
//!
//! [`TooltipPositionProvider`] centers a label over an item's bounds, following the
//! same above-then-flip rule, keyed off the item instead of the whole picker.

use kurbo::{Point, Rect, Size, Vec2};

use crate::properties::DEFAULT_ANCHOR_SPACING;
use crate::types::{LayoutDirection, Placement};

/// Computes the top-left screen offset of the picker.
///
/// Implement this to customize placement. The resulting [`Placement`] is derived
/// separately with [`placement_for_offset`].
pub trait PositionProvider {
    /// Position the picker.
    ///
    /// - `anchor_bounds`: anchor rectangle in root coordinates.
    /// - `window_size`: size of the host window.
    /// - `layout_direction`: host layout direction.
    /// - `content_size`: measured picker size, or zero before the first measurement.
    /// - `tapped`: offset of the long press within the anchor.
    fn position(
        &self,
        anchor_bounds: Rect,
        window_size: Size,
        layout_direction: LayoutDirection,
        content_size: Size,
        tapped: Vec2,
    ) -> Point;
}

/// Default picker placement: start at the tap, above the anchor, flipping as needed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AnchoredPositionProvider {
    /// Gap kept between picker and anchor, and between picker and the right window edge.
    pub anchor_spacing: f64,
}

impl Default for AnchoredPositionProvider {
    fn default() -> Self {
        Self::new(DEFAULT_ANCHOR_SPACING)
    }
}

impl AnchoredPositionProvider {
    /// Create a provider with the given anchor spacing.
    pub const fn new(anchor_spacing: f64) -> Self {
        Self { anchor_spacing }
    }
}

impl PositionProvider for AnchoredPositionProvider {
    fn position(
        &self,
        anchor_bounds: Rect,
        window_size: Size,
        _layout_direction: LayoutDirection,
        content_size: Size,
        tapped: Vec2,
    ) -> Point {
        let mut x = anchor_bounds.x0 + tapped.x;
        if x + content_size.width > window_size.width {
            x = window_size.width - content_size.width - self.anchor_spacing;
        }

        let mut y = anchor_bounds.y0 - content_size.height - self.anchor_spacing;
        if y < 0.0 {
            y = anchor_bounds.y1 + self.anchor_spacing;
        }

        Point::new(x, y)
    }
}

/// Orientation implied by a resolved picker offset.
///
/// An offset at or past the anchor's bottom edge is [`Placement::Below`];
/// anything else is [`Placement::Above`].
pub fn placement_for_offset(offset: Point, anchor_bounds: Rect) -> Placement {
    if offset.y >= anchor_bounds.y1 {
        Placement::Below
    } else {
        Placement::Above
    }
}

/// A resolved picker position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ResolvedPlacement {
    /// Top-left screen offset of the picker.
    pub offset: Point,
    /// Orientation derived from `offset`.
    pub placement: Placement,
}

/// Run `provider` and derive the orientation from its result.
pub fn resolve_placement<P: PositionProvider + ?Sized>(
    provider: &P,
    anchor_bounds: Rect,
    window_size: Size,
    layout_direction: LayoutDirection,
    content_size: Size,
    tapped: Vec2,
) -> ResolvedPlacement {
    let offset = provider.position(
        anchor_bounds,
        window_size,
        layout_direction,
        content_size,
        tapped,
    );
    ResolvedPlacement {
        offset,
        placement: placement_for_offset(offset, anchor_bounds),
    }
}

/// Label placement for a single item.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TooltipPositionProvider {
    /// Gap between the item and its label.
    pub spacing: f64,
    /// Current orientation of the picker.
    pub placement: Placement,
}

impl TooltipPositionProvider {
    /// Create a label provider for a picker with the given orientation.
    pub const fn new(spacing: f64, placement: Placement) -> Self {
        Self { spacing, placement }
    }

    /// Top-left offset of a label of `content_size` for the item at `item_bounds`.
    ///
    /// Labels of an upward picker prefer the space above the item and flip below
    /// when that would be off-screen. Labels of a downward picker go below.
    pub fn position(&self, item_bounds: Rect, content_size: Size) -> Point {
        let x = item_bounds.x0 + (item_bounds.width() - content_size.width) / 2.0;
        let y = match self.placement {
            Placement::Above => {
                let above = item_bounds.y0 - content_size.height - self.spacing;
                if above < 0.0 {
                    item_bounds.y1 + self.spacing
                } else {
                    above
                }
            }
            Placement::Below => item_bounds.y1 + self.spacing,
        };
        Point::new(x, y)
    }
}
