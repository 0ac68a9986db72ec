// Copyright 2026 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binding a floating element to its trigger.
//!
//! ## Overview
//!
//! A [`Positioner`] wraps a [`Host`] (the DOM, or [`HeadlessHost`](crate::headless::HeadlessHost))
//! and binds floating elements to triggers. Each binding:
//!
//! 1. Snapshots the floating element's inline positioning styles.
//! 2. Runs a placement pass immediately.
//! 3. Keeps re-running it with an [`AutoUpdate`] per the configured [`Strategy`].
//! 4. Returns a [`Disposer`] that stops updates and restores the snapshot.
//!
//! Passes only touch `position`, `top`, `left`, `right`, `bottom`, and
//! `transform` on the floating element. The trigger is only measured.
//!
//! ## Two kinds of binding
//!
//! - [`Positioner::bind`]: tooltips and menus. Flips along one axis and uses a CSS
//!   transform, so the floating element is never measured.
//! - [`Positioner::bind_measured`]: arrow-decorated popovers. Measures the
//!   floating element, honors all twelve [`Placement`]s with fallback, and
//!   clamps the result into the viewport.
//!
//! Both elements must be attached to the document for the lifetime of the binding.

use alloc::format;
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use core::cell::{Cell, RefCell};

use kurbo::{Rect, Size};

use crate::clamp::clamp_to_viewport;
use crate::place::{ARROW_GAP, SIMPLE_GAP, Translate, arrow_offset, place_floating, place_measured};
use crate::types::{Alignment, LogicalPosition, Placement};
use crate::update::{AutoUpdate, Invalidation, Strategy};

/// Inline style properties a binding writes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum StyleProperty {
    /// `position`
    Position,
    /// `top`
    Top,
    /// `left`
    Left,
    /// `right`
    Right,
    /// `bottom`
    Bottom,
    /// `transform`
    Transform,
}

impl StyleProperty {
    /// Every property a binding may write, in write order.
    pub const ALL: [Self; 6] = [
        Self::Position,
        Self::Top,
        Self::Left,
        Self::Right,
        Self::Bottom,
        Self::Transform,
    ];

    /// The CSS property name.
    #[must_use]
    pub const fn css_name(self) -> &'static str {
        match self {
            Self::Position => "position",
            Self::Top => "top",
            Self::Left => "left",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Transform => "transform",
        }
    }
}

/// Geometry and style access for a UI host.
///
/// Rectangles are in viewport coordinates, read fresh on every call.
pub trait Host: Invalidation {
    /// Element handle.
    type Element;

    /// Current bounding rectangle of `element` in viewport coordinates.
    fn bounding_rect(&self, element: &Self::Element) -> Rect;

    /// Current viewport size; the viewport spans from `(0, 0)`.
    fn viewport_size(&self) -> Size;

    /// Current inline value of `property`, or `None` if unset.
    fn style(&self, element: &Self::Element, property: StyleProperty) -> Option<String>;

    /// Set (`Some`) or remove (`None`) an inline style property.
    fn set_style(&self, element: &Self::Element, property: StyleProperty, value: Option<&str>);
}

/// Per-binding configuration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BindOptions {
    /// When to re-run placement.
    pub strategy: Strategy,
    /// Gap between trigger and floating element. `None` picks
    /// [`SIMPLE_GAP`] for [`Positioner::bind`] and [`ARROW_GAP`] for
    /// [`Positioner::bind_measured`].
    pub gap: Option<f64>,
    /// Restore the floating element's original inline styles on dispose.
    pub restore_style: bool,
    /// Minimum distance between an arrow and the floating element's corners.
    pub arrow_padding: f64,
}

impl Default for BindOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::OnChange,
            gap: None,
            restore_style: true,
            arrow_padding: 8.0,
        }
    }
}

/// Binds floating elements to triggers on a [`Host`].
///
/// Pass one of these to every component that shows floating content.
#[derive(Clone, Debug)]
pub struct Positioner<H> {
    host: H,
    options: BindOptions,
}

impl<H> Positioner<H> {
    /// Create a positioner with default options.
    pub fn new(host: H) -> Self {
        Self {
            host,
            options: BindOptions::default(),
        }
    }

    /// Replace the options used by subsequent bindings.
    #[must_use]
    pub fn with_options(mut self, options: BindOptions) -> Self {
        self.options = options;
        self
    }

    /// Options used by new bindings.
    pub fn options(&self) -> &BindOptions {
        &self.options
    }

    /// The host this positioner binds on.
    pub fn host(&self) -> &H {
        &self.host
    }
}

#[derive(Debug)]
struct Binding {
    live: Cell<bool>,
    placement: Cell<Option<Placement>>,
    arrow: Cell<Option<f64>>,
}

impl Binding {
    fn new() -> Rc<Self> {
        Rc::new(Self {
            live: Cell::new(true),
            placement: Cell::new(None),
            arrow: Cell::new(None),
        })
    }
}

fn px(value: f64) -> String {
    format!("{value}px")
}

impl<H> Positioner<H>
where
    H: Host + Clone + 'static,
    H::Element: Clone + 'static,
{
    /// Bind a tooltip or menu with the configured strategy.
    pub fn bind(
        &self,
        floating: H::Element,
        trigger: H::Element,
        position: LogicalPosition,
    ) -> Disposer<H> {
        self.bind_with(floating, trigger, position, self.options.strategy)
    }

    /// Bind a tooltip or menu with an explicit strategy.
    pub fn bind_with(
        &self,
        floating: H::Element,
        trigger: H::Element,
        position: LogicalPosition,
        strategy: Strategy,
    ) -> Disposer<H> {
        let gap = self.options.gap.unwrap_or(SIMPLE_GAP);
        let binding = Binding::new();
        let saved = self.snapshot(&floating);
        let pass = {
            let host = self.host.clone();
            let floating = floating.clone();
            let binding = binding.clone();
            move || {
                let trigger_rect = host.bounding_rect(&trigger);
                let viewport = host.viewport_size();
                let out = place_floating(trigger_rect, viewport, position, gap);
                if !binding.live.get() {
                    return;
                }
                log::trace!("placing on {} at {:?}", out.side, out.anchor);
                write_frame(&host, &floating, out.transform);
                host.set_style(&floating, StyleProperty::Top, Some(&px(out.anchor.y)));
                host.set_style(&floating, StyleProperty::Left, Some(&px(out.anchor.x)));
                let align = if position.is_start_aligned() {
                    Alignment::Start
                } else {
                    Alignment::Center
                };
                binding
                    .placement
                    .set(Some(Placement::new(out.side, align)));
            }
        };
        self.finish(floating, binding, saved, strategy, pass)
    }

    /// Bind an arrow-decorated popover at `desired`, falling back to another side
    /// when it does not fit and clamping into the viewport.
    pub fn bind_measured(
        &self,
        floating: H::Element,
        trigger: H::Element,
        desired: Placement,
    ) -> Disposer<H> {
        let gap = self.options.gap.unwrap_or(ARROW_GAP);
        let padding = self.options.arrow_padding;
        let binding = Binding::new();
        let saved = self.snapshot(&floating);
        let pass = {
            let host = self.host.clone();
            let floating = floating.clone();
            let binding = binding.clone();
            move || {
                if !binding.live.get() {
                    return;
                }
                // Measure the box the way it will be laid out: fixed and untransformed.
                write_frame(&host, &floating, Translate::NONE);
                let trigger_rect = host.bounding_rect(&trigger);
                let size = host.bounding_rect(&floating).size();
                let viewport = host.viewport_size();
                let out = place_measured(trigger_rect, size, viewport, desired, gap);
                if !binding.live.get() {
                    return;
                }
                host.set_style(&floating, StyleProperty::Top, Some(&px(out.origin.y)));
                host.set_style(&floating, StyleProperty::Left, Some(&px(out.origin.x)));

                // Clamp against where the box actually landed.
                let applied = host.bounding_rect(&floating);
                let shift = clamp_to_viewport(applied, viewport) - applied.origin();
                let origin = out.origin + shift;
                if shift.x != 0.0 || shift.y != 0.0 {
                    if !binding.live.get() {
                        return;
                    }
                    log::debug!("clamped {} by {shift:?}", out.placement);
                    host.set_style(&floating, StyleProperty::Top, Some(&px(origin.y)));
                    host.set_style(&floating, StyleProperty::Left, Some(&px(origin.x)));
                }
                let landed = applied + shift;
                binding.placement.set(Some(out.placement));
                binding.arrow.set(Some(arrow_offset(
                    trigger_rect,
                    landed,
                    out.placement.side,
                    padding,
                )));
            }
        };
        self.finish(floating, binding, saved, self.options.strategy, pass)
    }

    fn snapshot(&self, floating: &H::Element) -> Option<[Option<String>; 6]> {
        self.options
            .restore_style
            .then(|| StyleProperty::ALL.map(|p| self.host.style(floating, p)))
    }

    fn finish(
        &self,
        floating: H::Element,
        binding: Rc<Binding>,
        saved: Option<[Option<String>; 6]>,
        strategy: Strategy,
        pass: impl FnMut() + 'static,
    ) -> Disposer<H> {
        let update = AutoUpdate::start(self.host.clone(), strategy, pass);
        log::debug!("bound floating element ({strategy:?})");
        Disposer {
            update,
            host: self.host.clone(),
            floating,
            binding,
            saved: RefCell::new(saved),
        }
    }
}

/// Writes the properties every pass sets besides `top`/`left`.
fn write_frame<H: Host>(host: &H, floating: &H::Element, transform: Translate) {
    host.set_style(floating, StyleProperty::Position, Some("fixed"));
    host.set_style(floating, StyleProperty::Right, Some("auto"));
    host.set_style(floating, StyleProperty::Bottom, Some("auto"));
    host.set_style(
        floating,
        StyleProperty::Transform,
        Some(&transform.to_string()),
    );
}

/// Undoes a binding.
///
/// [`dispose`](Self::dispose) stops all updates and restores the floating
/// element's inline styles (when [`BindOptions::restore_style`] is set). After
/// that, the binding never touches the element again. Dropping the disposer
/// disposes it.
pub struct Disposer<H: Host> {
    update: AutoUpdate<H>,
    host: H,
    floating: H::Element,
    binding: Rc<Binding>,
    saved: RefCell<Option<[Option<String>; 6]>>,
}

impl<H: Host> Disposer<H> {
    /// Stop updating and restore styles. Idempotent; callable from inside a pass.
    pub fn dispose(&self) {
        if !self.binding.live.replace(false) {
            return;
        }
        self.update.stop();
        let saved = self.saved.borrow_mut().take();
        if let Some(saved) = saved {
            for (property, value) in StyleProperty::ALL.into_iter().zip(saved) {
                self.host
                    .set_style(&self.floating, property, value.as_deref());
            }
        }
        log::debug!("disposed binding after {} passes", self.update.passes());
    }

    /// Whether [`dispose`](Self::dispose) has run.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        !self.binding.live.get()
    }

    /// Placement chosen by the most recent pass.
    #[must_use]
    pub fn placement(&self) -> Option<Placement> {
        self.binding.placement.get()
    }

    /// Arrow offset along the facing edge from the most recent measured pass.
    #[must_use]
    pub fn arrow_offset(&self) -> Option<f64> {
        self.binding.arrow.get()
    }

    /// Number of placement passes run so far.
    #[must_use]
    pub fn passes(&self) -> u64 {
        self.update.passes()
    }
}

impl<H: Host> Drop for Disposer<H> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<H: Host> core::fmt::Debug for Disposer<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Disposer")
            .field("update", &self.update)
            .field("binding", &self.binding)
            .finish_non_exhaustive()
    }
}
