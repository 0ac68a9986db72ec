// Copyright 2026 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Available space around a trigger and side selection.
//!
//! These are pure functions over [`Rect`]/[`Size`] values. Read geometry fresh
//! for every call; nothing here caches.

use kurbo::{Rect, Size};

use crate::types::{Axis, AvailableSpace, LogicalPosition, Side};

/// Space between each edge of `trigger` and the matching edge of the viewport.
///
/// The viewport spans `(0, 0)` to `(viewport.width, viewport.height)`. Values
/// are not clamped, so a trigger hanging off an edge yields negative space on
/// that side.
///
/// ```
/// use kurbo::{Rect, Size};
/// use understory_anchor::space::available_space;
///
/// let space = available_space(Rect::new(10.0, 10.0, 110.0, 40.0), Size::new(1000.0, 800.0));
/// assert_eq!((space.top, space.right, space.bottom, space.left), (10.0, 890.0, 760.0, 10.0));
/// ```
#[must_use]
pub fn available_space(trigger: Rect, viewport: Size) -> AvailableSpace {
    AvailableSpace {
        top: trigger.y0,
        right: viewport.width - trigger.x1,
        bottom: viewport.height - trigger.y1,
        left: trigger.x0,
    }
}

/// Pick the side for a tooltip or menu.
///
/// Inline positions go right unless the left has strictly more space; block
/// positions go below unless the top has strictly more space.
#[must_use]
pub fn best_side(position: LogicalPosition, available: &AvailableSpace) -> Side {
    match position.axis() {
        Axis::Inline => {
            if available.right >= available.left {
                Side::Right
            } else {
                Side::Left
            }
        }
        Axis::Block => {
            if available.bottom >= available.top {
                Side::Bottom
            } else {
                Side::Top
            }
        }
    }
}

/// Size the floating element occupies away from the trigger when placed on `side`.
fn extent(floating: Size, side: Side) -> f64 {
    match side.axis() {
        Axis::Block => floating.height,
        Axis::Inline => floating.width,
    }
}

/// Pick a side that fits a floating element of known size.
///
/// Tried in order, keeping the first that has room for `floating` plus `gap`:
///
/// 1. `desired`.
/// 2. The opposite of `desired`.
/// 3. The perpendicular side with more space (the first in clockwise order on a tie).
/// 4. Otherwise, whichever side has the most space overall
///    (see [`AvailableSpace::max_side`]).
///
/// Always returns a side, including when every value is negative.
#[must_use]
pub fn best_side_with_fit(
    desired: Side,
    available: &AvailableSpace,
    floating: Size,
    gap: f64,
) -> Side {
    let fits = |side: Side| available.get(side) >= extent(floating, side) + gap;

    if fits(desired) {
        return desired;
    }
    let opposite = desired.opposite();
    if fits(opposite) {
        return opposite;
    }
    // Both perpendicular sides need the same extent, so only the roomier one can fit.
    let [a, b] = desired.perpendicular();
    let roomier = if available.get(b) > available.get(a) {
        b
    } else {
        a
    };
    if fits(roomier) {
        return roomier;
    }
    available.max_side()
}
