// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Picker configuration and the size targets derived from it.
//!
//! Sizes are logical pixels. Density conversion is the host's job.

use core::time::Duration;

/// Spacing between the picker and its anchor.
pub const DEFAULT_ANCHOR_SPACING: f64 = 4.0;

/// Visual and behavioral configuration of a picker.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PickerProperties {
    /// Item size while nothing is hovered.
    pub idle_size: f64,
    /// Size of the hovered item.
    pub active_size: f64,
    /// Size of every other item while something is hovered.
    pub inactive_size: f64,
    /// Horizontal spacing between items.
    pub spacing_between_reactions: f64,
    /// Spacing between an item and its label tooltip.
    pub spacing_between_reaction_and_label: f64,
    /// Whether the host should play haptics on show and hover changes.
    pub haptics_enabled: bool,
    /// Whether a back press dismisses the picker.
    pub dismiss_on_back_press: bool,
    /// Margin added around each item's bounds before hit testing.
    pub hit_margin: f64,
    /// Strip height as a multiple of [`active_size`](Self::active_size).
    pub height_factor: f64,
    /// Padding between the container edge and the items.
    pub content_padding: f64,
}

impl Default for PickerProperties {
    fn default() -> Self {
        Self {
            idle_size: 40.0,
            active_size: 72.0,
            inactive_size: 34.0,
            spacing_between_reactions: 4.0,
            spacing_between_reaction_and_label: 8.0,
            haptics_enabled: true,
            dismiss_on_back_press: true,
            hit_margin: 2.0,
            height_factor: 1.6,
            content_padding: 8.0,
        }
    }
}

impl PickerProperties {
    /// Target size of item `index` given the currently hovered item.
    pub fn item_size(&self, index: usize, hovered: Option<usize>) -> f64 {
        match hovered {
            Some(h) if h == index => self.active_size,
            Some(_) => self.inactive_size,
            None => self.idle_size,
        }
    }

    /// Target height of the container background.
    ///
    /// It shrinks while something is hovered so the enlarged item overflows it.
    pub fn container_height(&self, any_hovered: bool) -> f64 {
        let item = if any_hovered {
            self.inactive_size
        } else {
            self.idle_size
        };
        item + 2.0 * self.content_padding
    }

    /// Height reserved for the whole strip, large enough for a hovered item.
    pub fn strip_height(&self) -> f64 {
        self.active_size * self.height_factor
    }

    /// Whether an item's label should be showing at its current animated size.
    pub fn shows_label(&self, current_size: f64) -> bool {
        current_size > self.active_size - 8.0
    }
}

/// Timing and release policy of the [gesture machine](crate::gesture::GestureMachine).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GestureConfig {
    /// How long a contact must be held before the picker opens.
    pub long_press_timeout: Duration,
    /// Window after a press on the open picker in which a release counts as a tap.
    pub grace_window: Duration,
    /// Keep the picker open when a drag is released over nothing.
    ///
    /// When `false`, such a release dismisses without a reaction.
    pub keep_open_on_empty_release: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            long_press_timeout: Duration::from_millis(400),
            grace_window: Duration::from_millis(20),
            keep_open_on_empty_release: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_sizes_follow_hover() {
        let p = PickerProperties::default();
        assert_eq!(p.item_size(0, None), 40.0);
        assert_eq!(p.item_size(1, Some(1)), 72.0);
        assert_eq!(p.item_size(0, Some(1)), 34.0);
    }

    #[test]
    fn container_and_strip_heights() {
        let p = PickerProperties::default();
        assert_eq!(p.container_height(false), 56.0);
        assert_eq!(p.container_height(true), 50.0);
        assert!((p.strip_height() - 115.2).abs() < 1e-9);
    }

    #[test]
    fn label_appears_near_full_size() {
        let p = PickerProperties::default();
        assert!(!p.shows_label(40.0));
        assert!(!p.shows_label(64.0));
        assert!(p.shows_label(64.5));
    }
}
