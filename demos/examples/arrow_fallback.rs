// Copyright 2026 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arrow popover fallback and clamping.
//!
//! Resolves every one of the twelve placements for a popover near the top of
//! the viewport, showing which ones fall back to another side. Then clamps a
//! popover that is wider than the viewport.
//!
//! Run:
//! - `cargo run -p understory_anchor_demos --example arrow_fallback`

use kurbo::{Rect, Size};
use understory_anchor::clamp::{clamp_to_viewport, is_within_viewport};
use understory_anchor::place::{ARROW_GAP, arrow_offset, place_measured};
use understory_anchor::types::Placement;

fn main() {
    let viewport = Size::new(1000.0, 800.0);
    let trigger = Rect::new(100.0, 30.0, 180.0, 60.0);
    let popover = Size::new(200.0, 120.0);

    println!("== trigger {trigger:?}, popover {popover:?} ==");
    for desired in Placement::ALL {
        let out = place_measured(trigger, popover, viewport, desired, ARROW_GAP);
        let landed = Rect::from_origin_size(out.origin, popover);
        let origin = clamp_to_viewport(landed, viewport);
        let clamped = Rect::from_origin_size(origin, popover);
        let arrow = arrow_offset(trigger, clamped, out.placement.side, 8.0);
        let note = if out.placement == desired { "" } else { "  (fallback)" };
        println!(
            "{:>12} -> {:>12} at ({:>6.1}, {:>6.1}) arrow {arrow:>5.1}{note}",
            desired.to_string(),
            out.placement.to_string(),
            origin.x,
            origin.y,
        );
    }

    // top-start keeps its alignment when it flips.
    let top_start: Placement = "top-start".parse().unwrap();
    let out = place_measured(trigger, popover, viewport, top_start, ARROW_GAP);
    assert_eq!(out.placement.to_string(), "bottom-start");

    // A popover wider than the viewport: one clamp pass pins the left edge.
    let narrow = Size::new(300.0, 800.0);
    let wide = Rect::new(-40.0, 100.0, 460.0, 180.0);
    let origin = clamp_to_viewport(wide, narrow);
    let clamped = Rect::from_origin_size(origin, wide.size());
    println!("== wide popover {wide:?} in {narrow:?} ==");
    println!(
        "clamped to {clamped:?}, fits: {}",
        is_within_viewport(clamped, narrow)
    );
    assert_eq!(clamped.x0, 0.0);
}
