//! Visible-window projection.

use crate::model::{GridItem, Position, Translate, ViewBounds, VisibleItem};

/// Projects the positioned items intersecting `bounds`, in input order.
///
/// An item survives iff `top <= bounds.bottom && top + height >=
/// bounds.top`; items wholly above or below the window are dropped. Each
/// survivor carries a precomputed [`Translate`] so the renderer can place
/// it directly.
///
/// `valid[i]` is the original index of `positions[i]` within `items`; a
/// stale index that no longer resolves is skipped rather than panicking.
/// Pure and idempotent: identical inputs yield identical output.
pub fn visible_items<'a, T: GridItem>(
    items: &'a [T],
    valid: &[usize],
    positions: &[Position],
    bounds: ViewBounds,
) -> Vec<VisibleItem<'a, T>> {
    let mut result = Vec::new();

    for (pos, &original) in positions.iter().zip(valid) {
        if pos.top > bounds.bottom {
            continue;
        }
        if pos.bottom() < bounds.top {
            continue;
        }
        let Some(item) = items.get(original) else {
            continue;
        };
        result.push(VisibleItem {
            item,
            index: original,
            position: *pos,
            transform: Translate {
                x: pos.left,
                y: pos.top,
            },
        });
    }

    result
}
