// Copyright 2026 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tooltip flipping.
//!
//! Places a tooltip to the side of a trigger in the top-left corner, then
//! below a trigger in the bottom-right corner, where it has to flip upward.
//!
//! Run:
//! - `cargo run -p understory_anchor_demos --example tooltip_flip`

use kurbo::{Rect, Size};
use understory_anchor::place::{SIMPLE_GAP, place_floating};
use understory_anchor::space::available_space;
use understory_anchor::types::{LogicalPosition, Side};

fn main() {
    let viewport = Size::new(1000.0, 800.0);

    // A button near the top-left corner with an inline-end tooltip.
    let button = Rect::new(10.0, 10.0, 110.0, 40.0);
    let space = available_space(button, viewport);
    println!("== inline-end next to {button:?} ==");
    println!("available: {space:?}");
    let out = place_floating(button, viewport, LogicalPosition::InlineEnd, SIMPLE_GAP);
    println!(
        "side={} left={} top={} transform={}",
        out.side, out.anchor.x, out.anchor.y, out.transform
    );
    assert_eq!(out.side, Side::Right);
    assert_eq!((out.anchor.x, out.anchor.y), (114.0, 25.0));

    // A button wedged into the bottom-right corner. Nothing fits below.
    let corner = Rect::new(980.0, 780.0, 1000.0, 800.0);
    let space = available_space(corner, viewport);
    println!("== block-end below {corner:?} ==");
    println!("available: {space:?}");
    let out = place_floating(corner, viewport, LogicalPosition::BlockEnd, SIMPLE_GAP);
    println!(
        "side={} left={} top={} transform={}",
        out.side, out.anchor.x, out.anchor.y, out.transform
    );
    assert_eq!(out.side, Side::Top);

    // Where would an 80×24 tooltip actually land?
    println!("tooltip rect: {:?}", out.rect(Size::new(80.0, 24.0)));
}
