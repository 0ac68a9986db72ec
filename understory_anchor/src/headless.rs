// Copyright 2026 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory [`Host`] for tests and headless layout.
//!
//! [`HeadlessHost`] keeps element rectangles, inline styles, listeners, and
//! frame requests in memory. Nothing happens on its own: call
//! [`dispatch`](HeadlessHost::dispatch) to deliver a scroll/resize notification
//! and [`run_frame`](HeadlessHost::run_frame) to run queued frame callbacks.
//!
//! Styled elements report a rectangle at their inline `left`/`top` (in `px`)
//! with their registered size, which is enough to observe measured placements
//! and viewport clamping. Transforms are not applied to reported rectangles.
//!
//! ```
//! use kurbo::{Rect, Size};
//! use understory_anchor::bind::{Positioner, StyleProperty};
//! use understory_anchor::headless::HeadlessHost;
//! use understory_anchor::types::LogicalPosition;
//!
//! let host = HeadlessHost::new(Size::new(1000.0, 800.0));
//! let trigger = host.add_element(Rect::new(10.0, 10.0, 110.0, 40.0));
//! let tooltip = host.add_element(Rect::new(0.0, 0.0, 80.0, 24.0));
//!
//! let disposer = Positioner::new(host.clone()).bind(tooltip, trigger, LogicalPosition::InlineEnd);
//! assert_eq!(host.style_of(tooltip, StyleProperty::Left).as_deref(), Some("114px"));
//! assert_eq!(host.style_of(tooltip, StyleProperty::Top).as_deref(), Some("25px"));
//! disposer.dispose();
//! ```

use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use kurbo::{Point, Rect, Size};

use crate::bind::{Host, StyleProperty};
use crate::update::{Callback, Invalidation, Triggers};

/// Handle to an element registered with a [`HeadlessHost`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ElementId(u32);

/// Token for a listener or frame request on a [`HeadlessHost`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Token(u64);

#[derive(Default)]
struct State {
    viewport: Cell<Size>,
    elements: RefCell<Vec<Element>>,
    listeners: RefCell<Vec<(Token, Triggers, Callback)>>,
    frames: RefCell<Vec<(Token, Callback)>>,
    next_token: Cell<u64>,
    mutations: Cell<usize>,
    measure_hook: RefCell<Option<Callback>>,
}

struct Element {
    rect: Rect,
    styles: BTreeMap<StyleProperty, String>,
}

/// A scriptable, single-threaded host that records everything in memory.
///
/// Clones share state.
#[derive(Clone, Default)]
pub struct HeadlessHost {
    state: Rc<State>,
}

impl core::fmt::Debug for HeadlessHost {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HeadlessHost")
            .field("viewport", &self.state.viewport.get())
            .field("elements", &self.state.elements.borrow().len())
            .field("listeners", &self.listener_count())
            .field("pending_frames", &self.pending_frames())
            .finish_non_exhaustive()
    }
}

fn parse_px(value: &str) -> Option<f64> {
    value.strip_suffix("px")?.parse().ok()
}

impl HeadlessHost {
    /// Create a host with a viewport of `viewport` size.
    pub fn new(viewport: Size) -> Self {
        let host = Self::default();
        host.state.viewport.set(viewport);
        host
    }

    /// Resize the viewport. Does not notify listeners; see [`dispatch`](Self::dispatch).
    pub fn set_viewport(&self, viewport: Size) {
        self.state.viewport.set(viewport);
    }

    /// Register an element with an unstyled bounding rectangle.
    pub fn add_element(&self, rect: Rect) -> ElementId {
        let mut elements = self.state.elements.borrow_mut();
        #[expect(
            clippy::cast_possible_truncation,
            reason = "headless scenes hold far fewer than 2^32 elements"
        )]
        let id = elements.len() as u32;
        elements.push(Element {
            rect,
            styles: BTreeMap::new(),
        });
        ElementId(id)
    }

    /// Move or resize an element. Styled elements keep their inline position and take the new size.
    pub fn set_rect(&self, id: ElementId, rect: Rect) {
        if let Some(element) = self.state.elements.borrow_mut().get_mut(id.0 as usize) {
            element.rect = rect;
        }
    }

    /// Current inline value of `property` on `id`.
    pub fn style_of(&self, id: ElementId, property: StyleProperty) -> Option<String> {
        self.state
            .elements
            .borrow()
            .get(id.0 as usize)?
            .styles
            .get(&property)
            .cloned()
    }

    /// Number of inline style writes so far, across all elements.
    pub fn mutations(&self) -> usize {
        self.state.mutations.get()
    }

    /// Run `hook` every time an element is measured. Used to simulate
    /// collaborators reacting in the middle of a placement pass.
    pub fn set_measure_hook(&self, hook: Option<Callback>) {
        *self.state.measure_hook.borrow_mut() = hook;
    }

    /// Deliver a notification to every listener registered for any flag in `triggers`.
    pub fn dispatch(&self, triggers: Triggers) {
        let callbacks: Vec<Callback> = self
            .state
            .listeners
            .borrow()
            .iter()
            .filter(|(_, kind, _)| kind.intersects(triggers))
            .map(|(_, _, callback)| callback.clone())
            .collect();
        for callback in callbacks {
            callback();
        }
    }

    /// Run every frame callback queued so far and return how many ran.
    ///
    /// Frames requested while running are queued for the next call.
    pub fn run_frame(&self) -> usize {
        let frames = core::mem::take(&mut *self.state.frames.borrow_mut());
        let count = frames.len();
        for (_, callback) in frames {
            callback();
        }
        count
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.state.listeners.borrow().len()
    }

    /// Number of queued frame requests.
    pub fn pending_frames(&self) -> usize {
        self.state.frames.borrow().len()
    }

    fn token(&self) -> Token {
        let next = self.state.next_token.get() + 1;
        self.state.next_token.set(next);
        Token(next)
    }
}

impl Invalidation for HeadlessHost {
    type Listener = Token;
    type Frame = Token;

    fn listen(&self, trigger: Triggers, callback: Callback) -> Token {
        let token = self.token();
        self.state
            .listeners
            .borrow_mut()
            .push((token, trigger, callback));
        token
    }

    fn unlisten(&self, listener: Token) {
        self.state
            .listeners
            .borrow_mut()
            .retain(|(token, _, _)| *token != listener);
    }

    fn request_frame(&self, callback: Callback) -> Token {
        let token = self.token();
        self.state.frames.borrow_mut().push((token, callback));
        token
    }

    fn cancel_frame(&self, frame: Token) {
        self.state
            .frames
            .borrow_mut()
            .retain(|(token, _)| *token != frame);
    }
}

impl Host for HeadlessHost {
    type Element = ElementId;

    fn bounding_rect(&self, element: &ElementId) -> Rect {
        let hook = self.state.measure_hook.borrow().clone();
        if let Some(hook) = hook {
            hook();
        }
        let elements = self.state.elements.borrow();
        let Some(element) = elements.get(element.0 as usize) else {
            return Rect::ZERO;
        };
        let styled = |p: StyleProperty| element.styles.get(&p).and_then(|v| parse_px(v));
        match (styled(StyleProperty::Left), styled(StyleProperty::Top)) {
            (Some(x), Some(y)) => Rect::from_origin_size(Point::new(x, y), element.rect.size()),
            _ => element.rect,
        }
    }

    fn viewport_size(&self) -> Size {
        self.state.viewport.get()
    }

    fn style(&self, element: &ElementId, property: StyleProperty) -> Option<String> {
        self.style_of(*element, property)
    }

    fn set_style(&self, element: &ElementId, property: StyleProperty, value: Option<&str>) {
        let mut elements = self.state.elements.borrow_mut();
        let Some(element) = elements.get_mut(element.0 as usize) else {
            return;
        };
        match value {
            Some(value) => {
                element.styles.insert(property, value.into());
            }
            None => {
                element.styles.remove(&property);
            }
        }
        self.state.mutations.set(self.state.mutations.get() + 1);
    }
}
