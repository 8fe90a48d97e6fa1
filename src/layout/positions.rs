//! Greedy shortest-column-first masonry packing.

use crate::model::{Dimensions, GridItem, Position};

/// Positions for one validated item sequence plus the resulting content
/// height.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedLayout {
    /// One position per validated item, in input order.
    pub positions: Vec<Position>,
    /// `max(column end offsets) - gutter`, floored at zero.
    pub total_height: f64,
}

impl PositionedLayout {
    /// An empty layout (no items, zero height).
    pub fn empty() -> Self {
        Self {
            positions: Vec::new(),
            total_height: 0.0,
        }
    }
}

/// Packs the validated items (`valid` holds indices into `items`) into
/// columns, shortest column first.
///
/// Invariant: on equal column heights the leftmost column wins. The scan
/// runs left to right with a strict `<`, so layout is reproducible for
/// identical inputs.
///
/// Each item's height is resolved from its aspect data (see
/// [`resolve_height`]) and the chosen column's accumulator advances by
/// `height + gutter`. Output order matches input order; complexity is
/// O(items × columns).
pub fn calculate_positions<T: GridItem>(
    items: &[T],
    valid: &[usize],
    dimensions: &Dimensions,
    gutter_size: f64,
) -> PositionedLayout {
    let column_count = dimensions.column_count;
    let column_width = dimensions.column_width;

    let mut column_heights = vec![0.0f64; column_count];
    let column_step = column_width + gutter_size;

    let mut positions = Vec::with_capacity(valid.len());

    for &original in valid {
        let Some(item) = items.get(original) else {
            continue;
        };

        let mut column = 0;
        let mut min_height = column_heights[0];
        for (c, &h) in column_heights.iter().enumerate().skip(1) {
            if h < min_height {
                min_height = h;
                column = c;
            }
        }

        let height = resolve_height(item, column_width);
        let top = column_heights[column];

        positions.push(Position {
            column,
            top,
            height,
            left: column as f64 * column_step,
        });
        column_heights[column] = top + height + gutter_size;
    }

    let max_height = column_heights.iter().cloned().fold(0.0f64, f64::max);

    PositionedLayout {
        positions,
        total_height: if max_height > 0.0 {
            max_height - gutter_size
        } else {
            0.0
        },
    }
}

/// Resolves the rendered height of an item at the given column width.
///
/// Precedence: a width/height pair is used only when both are present,
/// non-zero and *unequal*; an equal (or zero) pair falls through to the
/// explicit aspect ratio, and absent that the item renders as a square of
/// one column width. Hosts porting data that relied on the fall-through
/// get identical layouts, so the quirk is part of the contract.
pub fn resolve_height<T: GridItem>(item: &T, column_width: f64) -> f64 {
    match (item.width(), item.height()) {
        (Some(w), Some(h)) if w != 0.0 && h != 0.0 && w != h => (column_width * h / w).round(),
        _ => match item.aspect_ratio() {
            Some(ar) if ar > 0.0 => (column_width / ar).round(),
            _ => column_width,
        },
    }
}
