// Copyright 2026 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser host for Understory Anchor.
//!
//! [`DomHost`] implements [`Host`] on top of the DOM:
//!
//! - Geometry from `getBoundingClientRect` and `innerWidth`/`innerHeight`.
//! - Scroll notifications from a capturing, passive `scroll` listener on `window`,
//!   which also sees scrolls of every nested scroll container.
//! - Resize notifications from a `resize` listener on `window`.
//! - Frames from `requestAnimationFrame`.
//! - Inline styles through `HTMLElement.style`.
//!
//! JS exceptions from listener registration and style writes are logged and
//! otherwise ignored; a failed write leaves the previous position in place.
//!
//! ```no_run
//! use understory_anchor::types::LogicalPosition;
//! # fn demo(tooltip: web_sys::HtmlElement, button: web_sys::HtmlElement) -> Result<(), understory_anchor_web::HostError> {
//! let disposer = understory_anchor_web::bind_popover(tooltip, button, LogicalPosition::BlockEnd)?;
//! // ... later, when the tooltip hides:
//! disposer.dispose();
//! # Ok(())
//! # }
//! ```

#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Rect, Size};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, HtmlElement, Window};

use understory_anchor::bind::{Disposer, Host, Positioner, StyleProperty};
use understory_anchor::types::LogicalPosition;
use understory_anchor::update::{Callback, Invalidation, Triggers};

// Direct global bindings: infallible, and no `Window` lookup per frame.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "requestAnimationFrame")]
    fn request_animation_frame(callback: &JsValue) -> i32;

    #[wasm_bindgen(js_name = "cancelAnimationFrame")]
    fn cancel_animation_frame(id: i32);
}

/// Errors constructing a [`DomHost`].
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// There is no global `window`, e.g. inside a worker.
    #[error("no global `window` object; a DOM host needs the main browser thread")]
    NoWindow,
}

/// A [`Host`] backed by the browser DOM.
#[derive(Clone, Debug)]
pub struct DomHost {
    window: Window,
}

impl DomHost {
    /// Create a host for the global `window`.
    pub fn new() -> Result<Self, HostError> {
        web_sys::window()
            .map(Self::with_window)
            .ok_or(HostError::NoWindow)
    }

    /// Create a host for a specific window.
    pub fn with_window(window: Window) -> Self {
        Self { window }
    }

    /// The window this host observes.
    pub fn window(&self) -> &Window {
        &self.window
    }
}

/// A registered DOM listener. Hand it back to [`Invalidation::unlisten`] to remove it.
pub struct DomListener {
    events: Vec<DomEvent>,
    closure: Closure<dyn FnMut()>,
}

impl core::fmt::Debug for DomListener {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomListener")
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

/// A pending `requestAnimationFrame` request.
///
/// Owns the frame's closure, so dropping or cancelling the request frees it.
/// wasm-bindgen defers freeing a closure that is dropped while it runs.
pub struct DomFrame {
    id: i32,
    _closure: Closure<dyn FnMut()>,
}

impl DomFrame {
    /// The id `requestAnimationFrame` returned.
    #[must_use]
    pub fn id(&self) -> i32 {
        self.id
    }
}

impl core::fmt::Debug for DomFrame {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomFrame")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// A DOM event name and whether it is observed in the capture phase.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct DomEvent {
    name: &'static str,
    capture: bool,
}

/// The window events that deliver `triggers`.
///
/// `scroll` does not bubble, so it is captured at the window to see nested
/// scroll containers.
fn dom_events(triggers: Triggers) -> Vec<DomEvent> {
    triggers
        .iter()
        .filter_map(|flag| {
            if flag == Triggers::SCROLL {
                Some(DomEvent {
                    name: "scroll",
                    capture: true,
                })
            } else if flag == Triggers::RESIZE {
                Some(DomEvent {
                    name: "resize",
                    capture: false,
                })
            } else {
                None
            }
        })
        .collect()
}

/// An empty inline value means the property is unset.
fn inline_value(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

/// A viewport extent read from `window`, or zero (with a warning) when it is unavailable.
fn viewport_extent(name: &str, value: Result<JsValue, JsValue>) -> f64 {
    match value {
        Ok(value) => value.as_f64().unwrap_or_else(|| {
            log::warn!("`{name}` is not a number: {value:?}");
            0.0
        }),
        Err(err) => {
            log::warn!("failed to read `{name}`: {err:?}");
            0.0
        }
    }
}

impl Invalidation for DomHost {
    type Listener = DomListener;
    type Frame = DomFrame;

    fn listen(&self, trigger: Triggers, callback: Callback) -> DomListener {
        let closure = Closure::<dyn FnMut()>::new(move || callback());
        let events = dom_events(trigger);
        for event in &events {
            let options = AddEventListenerOptions::new();
            options.set_capture(event.capture);
            options.set_passive(true);
            if let Err(err) = self
                .window
                .add_event_listener_with_callback_and_add_event_listener_options(
                    event.name,
                    closure.as_ref().unchecked_ref(),
                    &options,
                )
            {
                log::warn!("failed to listen for `{}`: {err:?}", event.name);
            }
        }
        DomListener { events, closure }
    }

    fn unlisten(&self, listener: DomListener) {
        for event in &listener.events {
            if let Err(err) = self.window.remove_event_listener_with_callback_and_bool(
                event.name,
                listener.closure.as_ref().unchecked_ref(),
                event.capture,
            ) {
                log::warn!("failed to remove `{}` listener: {err:?}", event.name);
            }
        }
    }

    fn request_frame(&self, callback: Callback) -> DomFrame {
        let closure = Closure::<dyn FnMut()>::new(move || callback());
        let id = request_animation_frame(closure.as_ref());
        DomFrame {
            id,
            _closure: closure,
        }
    }

    fn cancel_frame(&self, frame: DomFrame) {
        cancel_animation_frame(frame.id);
    }
}

impl Host for DomHost {
    type Element = HtmlElement;

    fn bounding_rect(&self, element: &HtmlElement) -> Rect {
        let r = element.get_bounding_client_rect();
        Rect::new(r.left(), r.top(), r.right(), r.bottom())
    }

    fn viewport_size(&self) -> Size {
        Size::new(
            viewport_extent("innerWidth", self.window.inner_width()),
            viewport_extent("innerHeight", self.window.inner_height()),
        )
    }

    fn style(&self, element: &HtmlElement, property: StyleProperty) -> Option<String> {
        element
            .style()
            .get_property_value(property.css_name())
            .ok()
            .and_then(inline_value)
    }

    fn set_style(&self, element: &HtmlElement, property: StyleProperty, value: Option<&str>) {
        let style = element.style();
        let result = match value {
            Some(value) => style.set_property(property.css_name(), value),
            None => style.remove_property(property.css_name()).map(drop),
        };
        if let Err(err) = result {
            log::warn!("failed to write `{}`: {err:?}", property.css_name());
        }
    }
}

/// Bind `floating` to `trigger` on the global window with default options.
///
/// Keep the returned [`Disposer`] for as long as the floating element is shown;
/// dropping it stops tracking and restores the element's inline styles.
pub fn bind_popover(
    floating: HtmlElement,
    trigger: HtmlElement,
    position: LogicalPosition,
) -> Result<Disposer<DomHost>, HostError> {
    let host = DomHost::new()?;
    Ok(Positioner::new(host).bind(floating, trigger, position))
}
