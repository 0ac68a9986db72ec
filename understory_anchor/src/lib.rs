// Copyright 2026 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_anchor --heading-base-level=0

//! Understory Anchor: positioning floating elements against a trigger.
//!
//! Understory Anchor is the fallback path for anchored popovers, tooltips, and
//! menus when the host has no native anchor positioning.
//!
//! - Measures the space between a trigger and each viewport edge.
//! - Picks a side for the floating element, flipping when the desired side lacks room.
//! - Computes coordinates with start/center/end alignment and clamps them into the viewport.
//! - Keeps the placement current on scroll and resize, or on every frame.
//!
//! ## Layering
//!
//! The geometry is pure and host-independent:
//! - [`space`]: available space and side selection.
//! - [`place`]: transform-based and measured calculators, plus arrow offsets.
//! - [`clamp`]: one-pass viewport clamping.
//!
//! On top of that, [`update`] schedules re-placement against an
//! [`Invalidation`](update::Invalidation) source and [`bind`] wires a floating
//! element to its trigger on a [`Host`](bind::Host), returning a
//! [`Disposer`](bind::Disposer). [`headless`] provides an in-memory host.
//! A browser host lives in `understory_anchor_web`.
//!
//! ## Not a layout engine
//!
//! This crate does not measure text or lay out content. It reads rectangles the
//! host already computed and writes the floating element's inline position.
//!
//! ## Tooltip example
//!
//! ```
//! use kurbo::{Rect, Size};
//! use understory_anchor::place::{SIMPLE_GAP, place_floating};
//! use understory_anchor::types::{LogicalPosition, Side};
//!
//! // A trigger tucked into the bottom-right corner of a 1000×800 viewport.
//! let trigger = Rect::new(980.0, 780.0, 1000.0, 800.0);
//! let out = place_floating(trigger, Size::new(1000.0, 800.0), LogicalPosition::BlockEnd, SIMPLE_GAP);
//!
//! // No room below, so it goes above, centered on the trigger.
//! assert_eq!(out.side, Side::Top);
//! assert_eq!((out.anchor.x, out.anchor.y), (990.0, 776.0));
//! assert_eq!(out.transform.to_string(), "translate(-50%, -100%)");
//! ```
//!
//! ## Binding example
//!
//! ```
//! use kurbo::{Rect, Size};
//! use understory_anchor::bind::{Positioner, StyleProperty};
//! use understory_anchor::headless::HeadlessHost;
//! use understory_anchor::types::{Alignment, Placement, Side};
//! use understory_anchor::update::Triggers;
//!
//! let host = HeadlessHost::new(Size::new(1000.0, 800.0));
//! let trigger = host.add_element(Rect::new(100.0, 30.0, 180.0, 60.0));
//! let popover = host.add_element(Rect::new(0.0, 0.0, 200.0, 120.0));
//!
//! let positioner = Positioner::new(host.clone());
//! let disposer = positioner.bind_measured(popover, trigger, "top-start".parse().unwrap());
//!
//! // Too close to the top: it flips below and keeps its start alignment.
//! assert_eq!(disposer.placement(), Some(Placement::new(Side::Bottom, Alignment::Start)));
//! assert_eq!(host.style_of(popover, StyleProperty::Top).as_deref(), Some("68px"));
//!
//! // After disposal nothing moves anymore.
//! disposer.dispose();
//! let writes = host.mutations();
//! host.dispatch(Triggers::SCROLL);
//! assert_eq!(host.mutations(), writes);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod bind;
pub mod clamp;
pub mod headless;
pub mod place;
pub mod space;
pub mod types;
pub mod update;
