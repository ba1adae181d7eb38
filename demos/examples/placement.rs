// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Where the picker and its labels land for anchors across the window.
//!
//! Walks an anchor from the top of the window to the bottom and taps at both
//! horizontal edges, printing the resolved offset, the derived orientation, and where
//! a hovered item's label would go.
//!
//! Run:
//! - `cargo run -p understory_reaction_demos --example placement`

use kurbo::{Point, Rect, Size, Vec2};
use understory_reaction::placement::{
    AnchoredPositionProvider, TooltipPositionProvider, resolve_placement,
};
use understory_reaction::properties::PickerProperties;
use understory_reaction::types::{LayoutDirection, Placement};

fn main() {
    env_logger::init();

    let window = Size::new(360.0, 640.0);
    let props = PickerProperties::default();
    let content = Size::new(276.0, props.strip_height());
    let provider = AnchoredPositionProvider::default();

    println!("== Picker placement ==");
    for top in [10.0, 120.0, 300.0, 560.0] {
        let anchor = Rect::new(0.0, top, window.width, top + 60.0);
        for tap_x in [20.0, 320.0] {
            let resolved = resolve_placement(
                &provider,
                anchor,
                window,
                LayoutDirection::Ltr,
                content,
                Vec2::new(tap_x, 30.0),
            );
            println!(
                "  anchor top {top:>5}, tap x {tap_x:>5}: offset {:?} {:?}",
                resolved.offset, resolved.placement
            );
            // The right edge never leaves the window.
            assert!(resolved.offset.x + content.width <= window.width);
            // The orientation always agrees with the offset.
            let expected = if resolved.offset.y >= anchor.y1 {
                Placement::Below
            } else {
                Placement::Above
            };
            assert_eq!(resolved.placement, expected);
        }
    }

    println!("== Label placement ==");
    let label = Size::new(48.0, 20.0);
    let item = Rect::from_center_size(Point::new(100.0, 40.0), Size::new(72.0, 72.0));
    for placement in [Placement::Above, Placement::Below] {
        let tooltip =
            TooltipPositionProvider::new(props.spacing_between_reaction_and_label, placement);
        let at = tooltip.position(item, label);
        println!("  {placement:?} picker: label at {at:?}");
        assert_eq!(at.x, 76.0);
    }
    // An item near the top edge flips its label below even in an upward picker.
    let tooltip = TooltipPositionProvider::new(8.0, Placement::Above);
    assert_eq!(tooltip.position(item, label).y, item.y1 + 8.0);
    log::info!("placement walkthrough finished");
}
