#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Surfaces are positioned by relationships between their edges, so the
//! vocabulary here is edges, axes and dimensions rather than pixel grids.
//! [`Frame`] is only used where a concrete rectangle is needed (resolving
//! relationships headlessly, debug export).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Direction along which a region is subdivided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Axis {
    /// Left to right.
    Horizontal,
    /// Top to bottom.
    Vertical,
}

impl Axis {
    /// The perpendicular axis.
    #[must_use]
    pub const fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// Edge where subdivision along this axis starts.
    #[must_use]
    pub const fn leading_edge(self) -> Edge {
        match self {
            Self::Horizontal => Edge::Leading,
            Self::Vertical => Edge::Top,
        }
    }

    /// Edge where subdivision along this axis ends.
    #[must_use]
    pub const fn trailing_edge(self) -> Edge {
        match self {
            Self::Horizontal => Edge::Trailing,
            Self::Vertical => Edge::Bottom,
        }
    }

    /// Center line perpendicular to this axis.
    #[must_use]
    pub const fn center(self) -> Edge {
        match self {
            Self::Horizontal => Edge::CenterX,
            Self::Vertical => Edge::CenterY,
        }
    }

    /// Extent measured along this axis.
    #[must_use]
    pub const fn dimension(self) -> Dimension {
        match self {
            Self::Horizontal => Dimension::Width,
            Self::Vertical => Dimension::Height,
        }
    }
}

/// A positional anchor on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Edge {
    Leading,
    Trailing,
    Top,
    Bottom,
    CenterX,
    CenterY,
}

impl Edge {
    /// Axis the edge coordinate is measured on.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Leading | Self::Trailing | Self::CenterX => Axis::Horizontal,
            Self::Top | Self::Bottom | Self::CenterY => Axis::Vertical,
        }
    }

    /// Coordinate of this edge within `frame`.
    #[must_use]
    pub fn of(self, frame: &Frame) -> f64 {
        match self {
            Self::Leading => frame.x,
            Self::Trailing => frame.right(),
            Self::Top => frame.y,
            Self::Bottom => frame.bottom(),
            Self::CenterX => frame.x + frame.width / 2.0,
            Self::CenterY => frame.y + frame.height / 2.0,
        }
    }
}

/// A measured extent of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Dimension {
    Width,
    Height,
}

impl Dimension {
    /// Value of this dimension in `size`.
    #[must_use]
    pub const fn of(self, size: Size) -> f64 {
        match self {
            Self::Width => size.width,
            Self::Height => size.height,
        }
    }
}

/// Width and height of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Check if the size has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// A resolved rectangle (origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Frame {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    /// Create a new frame.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a frame at the origin with the given size.
    #[inline]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Area of the frame.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Shrink the frame by `insets`, never producing a negative extent.
    pub fn inset(&self, insets: Insets) -> Frame {
        Frame {
            x: self.x + insets.left,
            y: self.y + insets.top,
            width: (self.width - insets.horizontal_sum()).max(0.0),
            height: (self.height - insets.vertical_sum()).max(0.0),
        }
    }

    /// Area shared with `other`, or `0.0` when they do not overlap.
    pub fn overlap_area(&self, other: &Frame) -> f64 {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if x < right && y < bottom {
            (right - x) * (bottom - y)
        } else {
            0.0
        }
    }
}

/// Insets applied when positioning content inside a pane.
///
/// Values are never negative; constructors clamp negative or non-finite input
/// to zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Insets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

impl Insets {
    /// No insets.
    pub const ZERO: Self = Self {
        top: 0.0,
        left: 0.0,
        bottom: 0.0,
        right: 0.0,
    };

    /// Create insets with specific values.
    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top: non_negative(top),
            left: non_negative(left),
            bottom: non_negative(bottom),
            right: non_negative(right),
        }
    }

    /// Create insets with equal values on every side.
    pub fn all(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// Inset for the given edge. Center lines have no inset.
    #[must_use]
    pub const fn for_edge(&self, edge: Edge) -> f64 {
        match edge {
            Edge::Top => self.top,
            Edge::Leading => self.left,
            Edge::Bottom => self.bottom,
            Edge::Trailing => self.right,
            Edge::CenterX | Edge::CenterY => 0.0,
        }
    }

    /// Sum of left and right.
    #[inline]
    pub fn horizontal_sum(&self) -> f64 {
        self.left + self.right
    }

    /// Sum of top and bottom.
    #[inline]
    pub fn vertical_sum(&self) -> f64 {
        self.top + self.bottom
    }
}
