// Copyright 2026 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binding lifecycle on the headless host.
//!
//! Binds a menu to a button, scrolls the page so the menu has to flip, switches
//! a second binding to per-frame updates, and disposes both.
//!
//! Run:
//! - `cargo run -p understory_anchor_demos --example headless_bind`

use kurbo::{Rect, Size};
use understory_anchor::bind::{BindOptions, Positioner, StyleProperty};
use understory_anchor::headless::{ElementId, HeadlessHost};
use understory_anchor::types::LogicalPosition;
use understory_anchor::update::{Strategy, Triggers};

fn show(host: &HeadlessHost, label: &str, id: ElementId) {
    let styles: Vec<String> = StyleProperty::ALL
        .into_iter()
        .filter_map(|p| host.style_of(id, p).map(|v| format!("{}: {v}", p.css_name())))
        .collect();
    println!("{label}: {}", styles.join("; "));
}

fn main() {
    let host = HeadlessHost::new(Size::new(1000.0, 800.0));
    let button = host.add_element(Rect::new(100.0, 100.0, 180.0, 130.0));
    let menu = host.add_element(Rect::new(0.0, 0.0, 160.0, 240.0));

    let positioner = Positioner::new(host.clone());
    let disposer = positioner.bind(menu, button, LogicalPosition::BlockEndStartAligned);
    show(&host, "open", menu);

    // Scroll: the button moves toward the bottom of the viewport.
    host.set_rect(button, Rect::new(100.0, 680.0, 180.0, 710.0));
    host.dispatch(Triggers::SCROLL);
    show(&host, "after scroll", menu);
    println!("placement: {:?}", disposer.placement());

    // A second binding that follows its trigger every frame.
    let tip_trigger = host.add_element(Rect::new(600.0, 300.0, 640.0, 320.0));
    let tip = host.add_element(Rect::new(0.0, 0.0, 90.0, 24.0));
    let each_frame = positioner.clone().with_options(BindOptions {
        strategy: Strategy::EachFrame,
        ..BindOptions::default()
    });
    let tip_disposer = each_frame.bind(tip, tip_trigger, LogicalPosition::InlineEnd);
    for step in 0..3 {
        let dx = 10.0 * f64::from(step);
        host.set_rect(tip_trigger, Rect::new(600.0 + dx, 300.0, 640.0 + dx, 320.0));
        host.run_frame();
        show(&host, &format!("frame {step}"), tip);
    }

    disposer.dispose();
    tip_disposer.dispose();
    show(&host, "menu disposed", menu);
    println!(
        "listeners: {}, pending frames: {}",
        host.listener_count(),
        host.pending_frames()
    );
}
