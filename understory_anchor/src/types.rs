// Copyright 2026 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement vocabulary: sides, alignments, logical positions, and available space.
//!
//! ## Overview
//!
//! A caller expresses intent with a [`LogicalPosition`] (or, for arrow-decorated
//! popovers, a desired [`Placement`]). The [`space`](crate::space) helpers turn
//! that intent into a concrete [`Side`] using the [`AvailableSpace`] around the
//! trigger.
//!
//! All textual forms follow the spelling popular in web positioning libraries,
//! e.g. `"bottom"`, `"top-start"`, `"left-end"`.

use core::fmt;
use core::str::FromStr;

/// Layout axis of a logical position.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Axis {
    /// Horizontal axis in a horizontal-tb, left-to-right writing mode.
    Inline,
    /// Vertical axis in a horizontal-tb writing mode.
    Block,
}

/// A concrete visual side of the trigger.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Side {
    /// Above the trigger.
    Top,
    /// To the right of the trigger.
    Right,
    /// Below the trigger.
    Bottom,
    /// To the left of the trigger.
    Left,
}

impl Side {
    /// All sides in clockwise order starting at the top.
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// The side across the trigger.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }

    /// The axis along which a floating element on this side is offset.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Top | Self::Bottom => Axis::Block,
            Self::Left | Self::Right => Axis::Inline,
        }
    }

    /// The two sides perpendicular to this one, in clockwise order.
    #[must_use]
    pub const fn perpendicular(self) -> [Self; 2] {
        match self.axis() {
            Axis::Block => [Self::Right, Self::Left],
            Axis::Inline => [Self::Top, Self::Bottom],
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        }
    }
}

/// Secondary-axis alignment of the floating element along the chosen side.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Alignment {
    /// Match the trigger's start edge (left or top).
    Start,
    /// Center on the trigger.
    #[default]
    Center,
    /// Match the trigger's end edge (right or bottom).
    End,
}

impl Alignment {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Center => "center",
            Self::End => "end",
        }
    }
}

/// A side combined with an alignment.
///
/// There are twelve values. The centered ones print as the bare side name
/// (`"bottom"`), the others with a suffix (`"bottom-start"`).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Placement {
    /// Side of the trigger the floating element sits on.
    pub side: Side,
    /// Alignment along that side.
    pub align: Alignment,
}

impl Placement {
    /// Every side/alignment combination, grouped by side.
    pub const ALL: [Self; 12] = {
        let mut out = [Self::new(Side::Top, Alignment::Start); 12];
        let aligns = [Alignment::Start, Alignment::Center, Alignment::End];
        let mut i = 0;
        while i < 12 {
            out[i] = Self::new(Side::ALL[i / 3], aligns[i % 3]);
            i += 1;
        }
        out
    };

    /// Create a placement.
    #[must_use]
    pub const fn new(side: Side, align: Alignment) -> Self {
        Self { side, align }
    }

    /// A centered placement on `side`.
    #[must_use]
    pub const fn centered(side: Side) -> Self {
        Self::new(side, Alignment::Center)
    }

    /// The same alignment on a different side.
    #[must_use]
    pub const fn with_side(self, side: Side) -> Self {
        Self::new(side, self.align)
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::centered(Side::Bottom)
    }
}

/// Desired placement relative to the trigger, independent of viewport geometry.
///
/// The final visual side may differ: see [`best_side`](crate::space::best_side).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum LogicalPosition {
    /// After the trigger in the inline direction (to its side).
    InlineEnd,
    /// After the trigger in the block direction (below it), centered.
    #[default]
    BlockEnd,
    /// After the trigger in the block direction, aligned to its start edge.
    BlockEndStartAligned,
}

impl LogicalPosition {
    /// Axis the position flips along.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::InlineEnd => Axis::Inline,
            Self::BlockEnd | Self::BlockEndStartAligned => Axis::Block,
        }
    }

    /// The side used when space allows.
    #[must_use]
    pub const fn preferred_side(self) -> Side {
        match self.axis() {
            Axis::Inline => Side::Right,
            Axis::Block => Side::Bottom,
        }
    }

    /// Whether the floating element keeps the trigger's start edge instead of centering.
    #[must_use]
    pub const fn is_start_aligned(self) -> bool {
        matches!(self, Self::BlockEndStartAligned)
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::InlineEnd => "inline-end",
            Self::BlockEnd => "block-end",
            Self::BlockEndStartAligned => "block-end-start",
        }
    }
}

/// Pixels between each trigger edge and the matching viewport edge.
///
/// Values are negative when the trigger extends past the viewport on that side.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct AvailableSpace {
    /// Space above the trigger.
    pub top: f64,
    /// Space right of the trigger.
    pub right: f64,
    /// Space below the trigger.
    pub bottom: f64,
    /// Space left of the trigger.
    pub left: f64,
}

impl AvailableSpace {
    /// Space on `side`.
    #[must_use]
    pub const fn get(&self, side: Side) -> f64 {
        match side {
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
        }
    }

    /// The side with the most space.
    ///
    /// Equal values keep clockwise order from the top, so the earliest of
    /// top, right, bottom, left wins a tie.
    #[must_use]
    pub fn max_side(&self) -> Side {
        let mut best = Side::Top;
        for side in Side::ALL {
            if self.get(side) > self.get(best) {
                best = side;
            }
        }
        best
    }
}

/// Error returned when parsing a placement keyword fails.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ParseError {
    kind: &'static str,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized {} keyword", self.kind)
    }
}

impl core::error::Error for ParseError {}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|side| side.as_str() == s)
            .ok_or(ParseError { kind: "side" })
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Alignment {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Start, Self::Center, Self::End]
            .into_iter()
            .find(|align| align.as_str() == s)
            .ok_or(ParseError { kind: "alignment" })
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.align {
            Alignment::Center => write!(f, "{}", self.side),
            align => write!(f, "{}-{}", self.side, align),
        }
    }
}

impl FromStr for Placement {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = ParseError { kind: "placement" };
        match s.split_once('-') {
            None => Ok(Self::centered(s.parse().map_err(|_| err)?)),
            Some((side, align)) => {
                let align: Alignment = align.parse().map_err(|_| err)?;
                // Centered placements are spelled with the bare side.
                if align == Alignment::Center {
                    return Err(err);
                }
                Ok(Self::new(side.parse().map_err(|_| err)?, align))
            }
        }
    }
}

impl fmt::Display for LogicalPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogicalPosition {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::InlineEnd, Self::BlockEnd, Self::BlockEndStartAligned]
            .into_iter()
            .find(|pos| pos.as_str() == s)
            .ok_or(ParseError {
                kind: "logical position",
            })
    }
}
