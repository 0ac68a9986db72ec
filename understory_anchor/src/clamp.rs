// Copyright 2026 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport clamping for measured placements.
//!
//! The clamp runs once per placement pass on the box as it was actually laid
//! out. It does not iterate: a box larger than the viewport is pushed so its
//! start edge is visible and overflows on the far side.

use kurbo::{Point, Rect, Size};

/// Corrected top-left for `applied` so it stays inside the viewport.
///
/// Per axis, an overflowing far edge (right/bottom) is pulled back onto the
/// viewport boundary first; then a negative near edge (left/top) is pushed to
/// zero. Applying the result and clamping again yields the same point.
///
/// ```
/// use kurbo::{Point, Rect, Size};
/// use understory_anchor::clamp::clamp_to_viewport;
///
/// let viewport = Size::new(1000.0, 800.0);
/// // Hangs off the right edge by 50px.
/// let clamped = clamp_to_viewport(Rect::new(900.0, 10.0, 1050.0, 60.0), viewport);
/// assert_eq!(clamped, Point::new(850.0, 10.0));
/// ```
#[must_use]
pub fn clamp_to_viewport(applied: Rect, viewport: Size) -> Point {
    Point::new(
        clamp_axis(applied.x0, applied.x1, viewport.width),
        clamp_axis(applied.y0, applied.y1, viewport.height),
    )
}

fn clamp_axis(start: f64, end: f64, limit: f64) -> f64 {
    let mut start = start;
    if end > limit {
        start -= end - limit;
    }
    if start < 0.0 {
        start = 0.0;
    }
    start
}

/// Whether `rect` lies entirely inside a viewport of `viewport` size.
#[must_use]
pub fn is_within_viewport(rect: Rect, viewport: Size) -> bool {
    rect.x0 >= 0.0 && rect.y0 >= 0.0 && rect.x1 <= viewport.width && rect.y1 <= viewport.height
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size::new(1000.0, 800.0);

    #[test]
    fn inside_is_untouched() {
        let rect = Rect::new(10.0, 20.0, 110.0, 70.0);
        assert!(is_within_viewport(rect, VIEWPORT));
        assert_eq!(clamp_to_viewport(rect, VIEWPORT), rect.origin());
    }

    #[test]
    fn each_edge_lands_on_the_boundary() {
        let left = clamp_to_viewport(Rect::new(-30.0, 100.0, 70.0, 150.0), VIEWPORT);
        assert_eq!(left, Point::new(0.0, 100.0));
        let top = clamp_to_viewport(Rect::new(100.0, -12.0, 200.0, 38.0), VIEWPORT);
        assert_eq!(top, Point::new(100.0, 0.0));
        let bottom = clamp_to_viewport(Rect::new(100.0, 780.0, 200.0, 830.0), VIEWPORT);
        assert_eq!(bottom, Point::new(100.0, 750.0));
        let corner = clamp_to_viewport(Rect::new(960.0, 790.0, 1060.0, 840.0), VIEWPORT);
        assert_eq!(corner, Point::new(900.0, 750.0));
    }

    #[test]
    fn wider_than_viewport_keeps_left_edge_visible() {
        let rect = Rect::new(-50.0, 100.0, 1150.0, 200.0);
        let clamped = clamp_to_viewport(rect, VIEWPORT);
        assert_eq!(clamped, Point::new(0.0, 100.0));
        // The right edge still overflows after the single pass.
        let after = Rect::from_origin_size(clamped, rect.size());
        assert_eq!(after.x1, 1200.0);
        assert!(!is_within_viewport(after, VIEWPORT));
    }

    #[test]
    fn taller_than_viewport_keeps_top_edge_visible() {
        let rect = Rect::new(10.0, 300.0, 60.0, 1300.0);
        assert_eq!(clamp_to_viewport(rect, VIEWPORT), Point::new(10.0, 0.0));
    }
}
