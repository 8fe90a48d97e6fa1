//! Geometry types produced and consumed by the layout pipeline.

use std::fmt;

/// Resolved column geometry for the current container width.
///
/// Cached by the engine and replaced only when the container width or the
/// column constraints actually change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    /// Number of columns, within the configured min/max.
    pub column_count: usize,
    /// Width of each column in pixels (gutters excluded).
    pub column_width: f64,
}

/// Placement of a single item within the laid-out content.
///
/// Positions are index-aligned with the validated item sequence that
/// produced them, not grouped by column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    /// Column index, `0..column_count`.
    pub column: usize,
    /// Vertical offset from the top of the content, in pixels.
    pub top: f64,
    /// Resolved item height in pixels.
    pub height: f64,
    /// Horizontal offset of the item's column, in pixels.
    pub left: f64,
}

impl Position {
    /// Bottom edge of the item (`top + height`).
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Vertical window, in content coordinates, that the viewport filter
/// renders into. Includes overscan padding on both edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBounds {
    /// Upper edge (may be negative near the top of the content).
    pub top: f64,
    /// Lower edge.
    pub bottom: f64,
}

/// 2D render offset for one visible item.
///
/// Carries the numeric offsets for native hosts; the `Display` impl emits
/// the equivalent CSS transform for web-style hosts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Translate {
    /// Horizontal offset in pixels.
    pub x: f64,
    /// Vertical offset in pixels.
    pub y: f64,
}

impl fmt::Display for Translate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "translate3d({}px,{}px,0)", self.x, self.y)
    }
}

/// One item of the visible projection: the borrowed item, where it goes,
/// and which index it came from.
///
/// Ephemeral; rebuilt on every recomputation pass and never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleItem<'a, T> {
    /// The host's item.
    pub item: &'a T,
    /// Index of the item in the slice the host supplied.
    pub index: usize,
    /// Placement of the item.
    pub position: Position,
    /// Precomputed render offset (`position.left`, `position.top`).
    pub transform: Translate,
}
