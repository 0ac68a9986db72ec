// Copyright 2026 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Re-running placement when geometry may have changed.
//!
//! ## Strategies
//!
//! - [`Strategy::OnChange`] runs the pass once, then again on every scroll and
//!   resize notification from the [`Invalidation`] source. Scroll notifications
//!   must cover every scrollable ancestor of the trigger, not only the root.
//! - [`Strategy::EachFrame`] runs the pass once, then on every frame until
//!   stopped. This also catches movement that produces no event, such as a CSS
//!   transition on the trigger.
//!
//! There is no debouncing: every notification runs one synchronous pass.
//!
//! ## Stopping
//!
//! [`AutoUpdate::stop`] is idempotent and can be called from inside a pass.
//! Once stopped, callbacks that were already queued return without running,
//! and the frame loop never reschedules itself.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

/// Callback handed to an [`Invalidation`] source.
pub type Callback = Rc<dyn Fn()>;

bitflags::bitflags! {
    /// Notifications that can invalidate a placement.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Triggers: u8 {
        /// Any scroll of the document or of a scrollable ancestor.
        const SCROLL = 0b0000_0001;
        /// Viewport resize.
        const RESIZE = 0b0000_0010;
    }
}

/// When to re-run a placement pass.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Strategy {
    /// On scroll and resize notifications.
    #[default]
    OnChange,
    /// On every animation frame.
    EachFrame,
}

impl Strategy {
    /// Notifications this strategy subscribes to.
    #[must_use]
    pub const fn triggers(self) -> Triggers {
        match self {
            Self::OnChange => Triggers::SCROLL.union(Triggers::RESIZE),
            Self::EachFrame => Triggers::empty(),
        }
    }
}

/// Source of layout invalidation: event subscriptions and frame callbacks.
///
/// In a browser this is capturing `scroll` and `resize` listeners on the window
/// plus `requestAnimationFrame`. Elsewhere, it is whatever reports layout
/// changes for the element's whole ancestor chain.
pub trait Invalidation {
    /// Handle for a registered listener.
    type Listener;
    /// Handle for a requested frame.
    type Frame;

    /// Call `callback` on every notification of kind `trigger` (a single flag).
    fn listen(&self, trigger: Triggers, callback: Callback) -> Self::Listener;

    /// Remove a listener registered with [`listen`](Self::listen).
    fn unlisten(&self, listener: Self::Listener);

    /// Call `callback` once, before the next frame is drawn.
    fn request_frame(&self, callback: Callback) -> Self::Frame;

    /// Cancel a pending frame request. Cancelling a frame that already ran is a no-op.
    fn cancel_frame(&self, frame: Self::Frame);
}

/// A running placement subscription.
///
/// Create with [`AutoUpdate::start`]. Dropping the handle stops it.
pub struct AutoUpdate<S: Invalidation> {
    inner: Rc<Inner<S>>,
}

struct Inner<S: Invalidation> {
    source: S,
    /// The placement pass. Kept apart from the bookkeeping below so a pass can
    /// stop its own subscription.
    pass: RefCell<Box<dyn FnMut()>>,
    running: Cell<bool>,
    passes: Cell<u64>,
    listeners: RefCell<Vec<S::Listener>>,
    /// The outstanding frame request, if the loop is waiting on one.
    frame: RefCell<Option<S::Frame>>,
}

impl<S: Invalidation> Inner<S> {
    fn run_pass(&self) {
        if !self.running.get() {
            return;
        }
        match self.pass.try_borrow_mut() {
            Ok(mut pass) => {
                pass();
                self.passes.set(self.passes.get() + 1);
            }
            Err(_) => log::warn!("placement pass re-entered itself; skipping"),
        }
    }

    fn stop(&self) {
        if !self.running.replace(false) {
            return;
        }
        let listeners = core::mem::take(&mut *self.listeners.borrow_mut());
        for listener in listeners {
            self.source.unlisten(listener);
        }
        let frame = self.frame.borrow_mut().take();
        if let Some(frame) = frame {
            self.source.cancel_frame(frame);
        }
        log::trace!("auto-update stopped after {} passes", self.passes.get());
    }
}

impl<S: Invalidation + 'static> AutoUpdate<S> {
    /// Run `pass` now, then keep re-running it according to `strategy`.
    pub fn start(source: S, strategy: Strategy, pass: impl FnMut() + 'static) -> Self {
        let inner = Rc::new(Inner {
            source,
            pass: RefCell::new(Box::new(pass)),
            running: Cell::new(true),
            passes: Cell::new(0),
            listeners: RefCell::new(Vec::new()),
            frame: RefCell::new(None),
        });

        inner.run_pass();
        // The first pass may already have stopped us.
        if inner.running.get() {
            match strategy {
                Strategy::OnChange => {
                    for trigger in strategy.triggers().iter() {
                        let weak = Rc::downgrade(&inner);
                        let callback: Callback = Rc::new(move || {
                            if let Some(inner) = weak.upgrade() {
                                inner.run_pass();
                            }
                        });
                        let listener = inner.source.listen(trigger, callback);
                        inner.listeners.borrow_mut().push(listener);
                    }
                }
                Strategy::EachFrame => schedule_frame(&inner),
            }
        }
        Self { inner }
    }
}

fn schedule_frame<S: Invalidation + 'static>(inner: &Rc<Inner<S>>) {
    let weak: Weak<Inner<S>> = Rc::downgrade(inner);
    let callback: Callback = Rc::new(move || {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        // This request is spent.
        drop(inner.frame.borrow_mut().take());
        if !inner.running.get() {
            return;
        }
        inner.run_pass();
        if inner.running.get() {
            schedule_frame(&inner);
        }
    });
    let frame = inner.source.request_frame(callback);
    *inner.frame.borrow_mut() = Some(frame);
}

impl<S: Invalidation> AutoUpdate<S> {
    /// Stop re-running the pass. Safe to call repeatedly and from inside the pass.
    pub fn stop(&self) {
        self.inner.stop();
    }

    /// Whether the subscription is still live.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.inner.running.get()
    }

    /// Number of passes run so far, including the initial one.
    #[must_use]
    pub fn passes(&self) -> u64 {
        self.inner.passes.get()
    }
}

impl<S: Invalidation> Drop for AutoUpdate<S> {
    fn drop(&mut self) {
        self.inner.stop();
    }
}

impl<S: Invalidation> core::fmt::Debug for AutoUpdate<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AutoUpdate")
            .field("running", &self.inner.running.get())
            .field("passes", &self.inner.passes.get())
            .field("listeners", &self.inner.listeners.borrow().len())
            .finish_non_exhaustive()
    }
}
