// Copyright 2026 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser smoke tests. Run with `wasm-pack test --headless --firefox understory_anchor_web`.

#![cfg(target_arch = "wasm32")]

use std::rc::Rc;

use understory_anchor::bind::{Host, Positioner, StyleProperty};
use understory_anchor::types::{LogicalPosition, Placement, Side};
use understory_anchor::update::{Callback, Invalidation, Triggers};
use understory_anchor_web::{DomHost, bind_popover};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::HtmlElement;

wasm_bindgen_test_configure!(run_in_browser);

/// A fixed-position box appended to `<body>`.
fn fixed_box(left: f64, top: f64, width: f64, height: f64) -> HtmlElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let el: HtmlElement = document.create_element("div").unwrap().dyn_into().unwrap();
    let style = el.style();
    style.set_property("position", "fixed").unwrap();
    style.set_property("margin", "0").unwrap();
    style.set_property("left", &format!("{left}px")).unwrap();
    style.set_property("top", &format!("{top}px")).unwrap();
    style.set_property("width", &format!("{width}px")).unwrap();
    style.set_property("height", &format!("{height}px")).unwrap();
    document.body().unwrap().append_child(&el).unwrap();
    el
}

#[wasm_bindgen_test]
fn reads_geometry() {
    let host = DomHost::new().unwrap();
    let el = fixed_box(10.0, 20.0, 30.0, 40.0);
    let rect = host.bounding_rect(&el);
    assert_eq!((rect.x0, rect.y0, rect.x1, rect.y1), (10.0, 20.0, 40.0, 60.0));
    assert!(host.viewport_size().width > 0.0);
    el.remove();
}

#[wasm_bindgen_test]
fn binds_and_restores_inline_styles() {
    let trigger = fixed_box(10.0, 10.0, 100.0, 30.0);
    let tooltip = fixed_box(500.0, 500.0, 80.0, 24.0);

    let disposer = bind_popover(tooltip.clone(), trigger.clone(), LogicalPosition::BlockEnd).unwrap();
    assert_eq!(disposer.placement(), Some(Placement::centered(Side::Bottom)));
    let style = tooltip.style();
    assert_eq!(style.get_property_value("top").unwrap(), "44px");
    assert_eq!(style.get_property_value("left").unwrap(), "60px");
    assert!(style.get_property_value("transform").unwrap().starts_with("translate(-50%"));

    disposer.dispose();
    assert_eq!(style.get_property_value("top").unwrap(), "500px");
    assert_eq!(style.get_property_value("left").unwrap(), "500px");
    assert_eq!(style.get_property_value("transform").unwrap(), "");
    trigger.remove();
    tooltip.remove();
}

#[wasm_bindgen_test]
fn measured_binding_writes_explicit_origin() {
    let trigger = fixed_box(200.0, 200.0, 80.0, 30.0);
    let popover = fixed_box(0.0, 0.0, 120.0, 60.0);

    let host = DomHost::new().unwrap();
    let disposer = Positioner::new(host.clone()).bind_measured(
        popover.clone(),
        trigger.clone(),
        "bottom-start".parse().unwrap(),
    );
    assert_eq!(host.style(&popover, StyleProperty::Transform).as_deref(), Some("none"));
    let rect = host.bounding_rect(&popover);
    assert_eq!((rect.x0, rect.y0), (200.0, 238.0));
    drop(disposer);
    trigger.remove();
    popover.remove();
}

#[wasm_bindgen_test]
fn measured_binding_sizes_the_popover_once_fixed() {
    let document = web_sys::window().unwrap().document().unwrap();
    let trigger = fixed_box(200.0, 200.0, 80.0, 30.0);
    // In normal flow and scaled down, so it measures 100×50 until it is fixed and untransformed.
    let popover: HtmlElement = document.create_element("div").unwrap().dyn_into().unwrap();
    let style = popover.style();
    style.set_property("width", "200px").unwrap();
    style.set_property("height", "100px").unwrap();
    style.set_property("margin", "0").unwrap();
    style.set_property("transform", "scale(0.5)").unwrap();
    document.body().unwrap().append_child(&popover).unwrap();

    let host = DomHost::new().unwrap();
    let disposer = Positioner::new(host.clone()).bind_measured(
        popover.clone(),
        trigger.clone(),
        Placement::centered(Side::Bottom),
    );
    let rect = host.bounding_rect(&popover);
    // Centered under the trigger (center x = 240) at its full 200px width.
    assert_eq!((rect.x0, rect.y0, rect.width()), (140.0, 238.0, 200.0));
    drop(disposer);
    trigger.remove();
    popover.remove();
}

#[wasm_bindgen_test]
fn cancelled_frames_release_their_callback() {
    let host = DomHost::new().unwrap();
    let callback: Callback = Rc::new(|| panic!("cancelled frame ran"));
    let weak = Rc::downgrade(&callback);
    let frame = host.request_frame(callback);
    assert!(weak.upgrade().is_some());
    host.cancel_frame(frame);
    assert!(weak.upgrade().is_none());
}

#[wasm_bindgen_test]
fn removed_listeners_release_their_callback() {
    let host = DomHost::new().unwrap();
    let callback: Callback = Rc::new(|| {});
    let weak = Rc::downgrade(&callback);
    let listener = host.listen(Triggers::SCROLL, callback);
    host.unlisten(listener);
    assert!(weak.upgrade().is_none());
}
