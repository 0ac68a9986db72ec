// Copyright 2026 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement calculators.
//!
//! ## Transform-based
//!
//! [`transform_placement`] anchors a point on the trigger's edge and shifts the
//! floating element by a fraction of its own size with a CSS transform. The
//! floating element does not need to be measured first, so it can be placed
//! before its first paint. Only centered or start-aligned placement is possible.
//!
//! ## Measured
//!
//! [`measured_origin`] takes the floating element's size and returns an explicit
//! top-left corner for any of the twelve [`Placement`]s. Arrow-decorated popovers
//! use this path since the arrow needs the alignment spelled out, and
//! [`arrow_offset`] then tells where along the edge the arrow goes.

use core::fmt;

use kurbo::{Point, Rect, Size, Vec2};

use crate::space::{available_space, best_side, best_side_with_fit};
use crate::types::{Alignment, LogicalPosition, Placement, Side};

/// Gap between trigger and floating element for tooltips and menus.
pub const SIMPLE_GAP: f64 = 4.0;

/// Gap between trigger and floating element for arrow-decorated popovers.
pub const ARROW_GAP: f64 = 8.0;

/// A shift by a fraction of the floating element's own size, toward the
/// top/left.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Shift {
    /// No shift.
    #[default]
    None,
    /// Half the size (centers the element on the anchor point).
    Half,
    /// The full size (puts the element's far edge on the anchor point).
    Full,
}

impl Shift {
    const fn fraction(self) -> f64 {
        match self {
            Self::None => 0.0,
            Self::Half => 0.5,
            Self::Full => 1.0,
        }
    }

    const fn as_css(self) -> &'static str {
        match self {
            Self::None => "0",
            Self::Half => "-50%",
            Self::Full => "-100%",
        }
    }
}

/// A CSS `translate()` relative to the element's own size.
///
/// Displays as the CSS value, e.g. `translate(-50%, -100%)`, or `none` when
/// neither axis shifts.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Translate {
    /// Horizontal shift.
    pub x: Shift,
    /// Vertical shift.
    pub y: Shift,
}

impl Translate {
    /// The identity transform.
    pub const NONE: Self = Self {
        x: Shift::None,
        y: Shift::None,
    };

    /// Offset this transform produces for an element of `size`.
    #[must_use]
    pub fn offset(self, size: Size) -> Vec2 {
        Vec2::new(
            -size.width * self.x.fraction(),
            -size.height * self.y.fraction(),
        )
    }
}

impl fmt::Display for Translate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::NONE {
            f.write_str("none")
        } else {
            write!(f, "translate({}, {})", self.x.as_css(), self.y.as_css())
        }
    }
}

/// Output of the transform-based calculator.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TransformPlacement {
    /// Side the element was placed on.
    pub side: Side,
    /// Viewport position written to the element's `top`/`left`.
    pub anchor: Point,
    /// Transform written to the element's `transform`.
    pub transform: Translate,
}

impl TransformPlacement {
    /// Where an element of `size` ends up once the transform applies.
    #[must_use]
    pub fn rect(&self, size: Size) -> Rect {
        Rect::from_origin_size(self.anchor + self.transform.offset(size), size)
    }
}

/// Anchor a floating element on `side` of `trigger` without measuring it.
///
/// Top and bottom placements are centered on the trigger, or keep its left
/// edge when `position` is [`LogicalPosition::BlockEndStartAligned`]. Left and
/// right placements are vertically centered. `gap` separates the two boxes.
#[must_use]
pub fn transform_placement(
    trigger: Rect,
    side: Side,
    position: LogicalPosition,
    gap: f64,
) -> TransformPlacement {
    let center = trigger.center();
    let (x, shift_x) = if position.is_start_aligned() {
        (trigger.x0, Shift::None)
    } else {
        (center.x, Shift::Half)
    };
    let (anchor, transform) = match side {
        Side::Bottom => (
            Point::new(x, trigger.y1 + gap),
            Translate {
                x: shift_x,
                y: Shift::None,
            },
        ),
        Side::Top => (
            Point::new(x, trigger.y0 - gap),
            Translate {
                x: shift_x,
                y: Shift::Full,
            },
        ),
        Side::Right => (
            Point::new(trigger.x1 + gap, center.y),
            Translate {
                x: Shift::None,
                y: Shift::Half,
            },
        ),
        Side::Left => (
            Point::new(trigger.x0 - gap, center.y),
            Translate {
                x: Shift::Full,
                y: Shift::Half,
            },
        ),
    };
    TransformPlacement {
        side,
        anchor,
        transform,
    }
}

/// Choose a side for `position` and anchor the floating element there.
#[must_use]
pub fn place_floating(
    trigger: Rect,
    viewport: Size,
    position: LogicalPosition,
    gap: f64,
) -> TransformPlacement {
    let side = best_side(position, &available_space(trigger, viewport));
    if side != position.preferred_side() {
        log::debug!("flipping {position} to {side}");
    }
    transform_placement(trigger, side, position, gap)
}

/// Top-left corner for a floating element of `floating` size at `placement`.
#[must_use]
pub fn measured_origin(trigger: Rect, floating: Size, placement: Placement, gap: f64) -> Point {
    let center = trigger.center();
    let along_x = || match placement.align {
        Alignment::Start => trigger.x0,
        Alignment::Center => center.x - floating.width / 2.0,
        Alignment::End => trigger.x1 - floating.width,
    };
    let along_y = || match placement.align {
        Alignment::Start => trigger.y0,
        Alignment::Center => center.y - floating.height / 2.0,
        Alignment::End => trigger.y1 - floating.height,
    };
    match placement.side {
        Side::Top => Point::new(along_x(), trigger.y0 - floating.height - gap),
        Side::Bottom => Point::new(along_x(), trigger.y1 + gap),
        Side::Left => Point::new(trigger.x0 - floating.width - gap, along_y()),
        Side::Right => Point::new(trigger.x1 + gap, along_y()),
    }
}

/// Pick a side for `desired` that fits, keeping its alignment.
#[must_use]
pub fn resolve_placement(
    desired: Placement,
    trigger: Rect,
    floating: Size,
    viewport: Size,
    gap: f64,
) -> Placement {
    let available = available_space(trigger, viewport);
    let side = best_side_with_fit(desired.side, &available, floating, gap);
    if side != desired.side {
        log::debug!("{desired} does not fit, using {side}");
    }
    desired.with_side(side)
}

/// Output of the measured calculator.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MeasuredPlacement {
    /// Placement after fallback.
    pub placement: Placement,
    /// Top-left corner before viewport clamping.
    pub origin: Point,
}

/// Resolve `desired` against the viewport and compute the top-left corner.
///
/// ```
/// use kurbo::{Rect, Size};
/// use understory_anchor::place::{ARROW_GAP, place_measured};
/// use understory_anchor::types::Placement;
///
/// // Not enough room above a trigger near the top edge.
/// let trigger = Rect::new(100.0, 20.0, 180.0, 50.0);
/// let out = place_measured(
///     trigger,
///     Size::new(160.0, 90.0),
///     Size::new(1000.0, 800.0),
///     "top-start".parse::<Placement>().unwrap(),
///     ARROW_GAP,
/// );
/// assert_eq!(out.placement.to_string(), "bottom-start");
/// assert_eq!((out.origin.x, out.origin.y), (100.0, 58.0));
/// ```
#[must_use]
pub fn place_measured(
    trigger: Rect,
    floating: Size,
    viewport: Size,
    desired: Placement,
    gap: f64,
) -> MeasuredPlacement {
    let placement = resolve_placement(desired, trigger, floating, viewport, gap);
    MeasuredPlacement {
        placement,
        origin: measured_origin(trigger, floating, placement, gap),
    }
}

/// Distance from the floating element's start edge to the arrow's center.
///
/// The arrow sits on the edge of `floating` that faces the trigger and points
/// at the trigger's center, kept at least `padding` away from both corners.
/// Edges shorter than `2 * padding`, and NaN inputs, get the arrow at the
/// edge midpoint.
#[must_use]
pub fn arrow_offset(trigger: Rect, floating: Rect, side: Side, padding: f64) -> f64 {
    let center = trigger.center();
    let (target, length) = match side {
        Side::Top | Side::Bottom => (center.x - floating.x0, floating.width()),
        Side::Left | Side::Right => (center.y - floating.y0, floating.height()),
    };
    // `f64::clamp` panics on NaN bounds.
    if length.is_nan() || padding.is_nan() || length < 2.0 * padding {
        return length / 2.0;
    }
    target.clamp(padding, length - padding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    const VIEWPORT: Size = Size::new(1000.0, 800.0);

    #[test]
    fn inline_end_scenario() {
        let trigger = Rect::new(10.0, 10.0, 110.0, 40.0);
        let out = place_floating(trigger, VIEWPORT, LogicalPosition::InlineEnd, SIMPLE_GAP);
        assert_eq!(out.side, Side::Right);
        assert_eq!(out.anchor, Point::new(114.0, 25.0));
        assert_eq!(out.transform.to_string(), "translate(0, -50%)");
    }

    #[test]
    fn block_end_flips_above_near_bottom() {
        let trigger = Rect::new(980.0, 780.0, 1000.0, 800.0);
        let out = place_floating(trigger, VIEWPORT, LogicalPosition::BlockEnd, SIMPLE_GAP);
        assert_eq!(out.side, Side::Top);
        assert_eq!(out.anchor, Point::new(990.0, 776.0));
        assert_eq!(out.transform.to_string(), "translate(-50%, -100%)");
    }

    #[test]
    fn start_aligned_keeps_left_edge() {
        let trigger = Rect::new(200.0, 100.0, 260.0, 130.0);
        let below = transform_placement(
            trigger,
            Side::Bottom,
            LogicalPosition::BlockEndStartAligned,
            SIMPLE_GAP,
        );
        assert_eq!(below.anchor, Point::new(200.0, 134.0));
        assert_eq!(below.transform, Translate::NONE);
        assert_eq!(below.transform.to_string(), "none");

        let above = transform_placement(
            trigger,
            Side::Top,
            LogicalPosition::BlockEndStartAligned,
            SIMPLE_GAP,
        );
        assert_eq!(above.anchor, Point::new(200.0, 96.0));
        assert_eq!(above.transform.to_string(), "translate(0, -100%)");
    }

    #[test]
    fn left_side_shifts_full_width() {
        let trigger = Rect::new(500.0, 100.0, 540.0, 120.0);
        let out = transform_placement(trigger, Side::Left, LogicalPosition::InlineEnd, 4.0);
        assert_eq!(out.anchor, Point::new(496.0, 110.0));
        assert_eq!(
            out.rect(Size::new(80.0, 30.0)),
            Rect::new(416.0, 95.0, 496.0, 125.0)
        );
    }

    #[test]
    fn transform_rect_clears_trigger_by_gap() {
        let trigger = Rect::new(300.0, 300.0, 400.0, 340.0);
        let size = Size::new(90.0, 50.0);
        for side in Side::ALL {
            let rect = transform_placement(trigger, side, LogicalPosition::BlockEnd, 4.0).rect(size);
            let clearance = match side {
                Side::Top => trigger.y0 - rect.y1,
                Side::Bottom => rect.y0 - trigger.y1,
                Side::Left => trigger.x0 - rect.x1,
                Side::Right => rect.x0 - trigger.x1,
            };
            assert_eq!(clearance, 4.0, "{side}");
        }
    }

    #[test]
    fn measured_alignment_on_vertical_sides() {
        let trigger = Rect::new(100.0, 100.0, 200.0, 140.0);
        let size = Size::new(60.0, 30.0);
        let at = |s: &str| measured_origin(trigger, size, s.parse().unwrap(), ARROW_GAP);
        assert_eq!(at("top-start"), Point::new(100.0, 62.0));
        assert_eq!(at("top"), Point::new(120.0, 62.0));
        assert_eq!(at("top-end"), Point::new(140.0, 62.0));
        assert_eq!(at("bottom-start"), Point::new(100.0, 148.0));
        assert_eq!(at("bottom-end"), Point::new(140.0, 148.0));
    }

    #[test]
    fn measured_alignment_on_horizontal_sides() {
        let trigger = Rect::new(100.0, 100.0, 200.0, 140.0);
        let size = Size::new(60.0, 20.0);
        let at = |s: &str| measured_origin(trigger, size, s.parse().unwrap(), ARROW_GAP);
        assert_eq!(at("left-start"), Point::new(32.0, 100.0));
        assert_eq!(at("left"), Point::new(32.0, 110.0));
        assert_eq!(at("right-end"), Point::new(208.0, 120.0));
    }

    #[test]
    fn top_start_falls_back_to_bottom_start() {
        let trigger = Rect::new(100.0, 30.0, 180.0, 60.0);
        let desired = Placement::new(Side::Top, Alignment::Start);
        let out = place_measured(trigger, Size::new(200.0, 120.0), VIEWPORT, desired, ARROW_GAP);
        assert_eq!(out.placement, Placement::new(Side::Bottom, Alignment::Start));
        assert_eq!(out.origin, Point::new(100.0, 68.0));
    }

    #[test]
    fn arrow_points_at_trigger_center() {
        let trigger = Rect::new(100.0, 100.0, 140.0, 120.0);
        let floating = Rect::new(100.0, 128.0, 300.0, 200.0);
        assert_eq!(arrow_offset(trigger, floating, Side::Bottom, 8.0), 20.0);
    }

    #[test]
    fn arrow_stays_off_the_corners() {
        let trigger = Rect::new(0.0, 100.0, 10.0, 120.0);
        let floating = Rect::new(0.0, 128.0, 200.0, 200.0);
        assert_eq!(arrow_offset(trigger, floating, Side::Bottom, 12.0), 12.0);
        let side_panel = Rect::new(18.0, 0.0, 118.0, 40.0);
        assert_eq!(arrow_offset(trigger, side_panel, Side::Right, 12.0), 28.0);
        let tiny = Rect::new(18.0, 100.0, 28.0, 110.0);
        assert_eq!(arrow_offset(trigger, tiny, Side::Right, 12.0), 5.0);
    }

    #[test]
    fn arrow_with_nan_padding_goes_to_the_midpoint() {
        let trigger = Rect::new(100.0, 100.0, 140.0, 120.0);
        let floating = Rect::new(100.0, 128.0, 300.0, 200.0);
        assert_eq!(arrow_offset(trigger, floating, Side::Bottom, f64::NAN), 100.0);
        assert_eq!(arrow_offset(trigger, floating, Side::Left, f64::NAN), 36.0);

        let unmeasured = Rect::new(100.0, 128.0, f64::NAN, 200.0);
        assert!(arrow_offset(trigger, unmeasured, Side::Bottom, 8.0).is_nan());
    }
}
