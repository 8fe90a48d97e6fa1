//! Item identity and the validity filter.
//!
//! The engine lays out anything that can describe its own identity and,
//! optionally, its aspect. Hosts implement [`GridItem`] for their own item
//! type; the engine borrows the host's slice and never copies items.

/// An item that can participate in masonry layout.
///
/// Only [`id`](GridItem::id) matters for admission to layout; the size
/// accessors feed height resolution in the position calculator and every
/// one of them may be absent (the item then lays out as a square of one
/// column width).
pub trait GridItem {
    /// Stable unique identity. Items without one are excluded from layout.
    fn id(&self) -> Option<&str>;

    /// Source pixel width, when known (used together with `height` to derive
    /// the aspect ratio).
    fn width(&self) -> Option<f64> {
        None
    }

    /// Source pixel height, when known.
    fn height(&self) -> Option<f64> {
        None
    }

    /// Explicit width/height aspect ratio, when known. Consulted only when
    /// the width/height pair does not determine the aspect.
    fn aspect_ratio(&self) -> Option<f64> {
        None
    }
}

/// Returns the indices of items admitted to layout, in input order.
///
/// An item is valid iff it has an identity. Invalid items are silently
/// skipped; this is a filtering policy, not an error, and the remainder of
/// the set lays out normally.
pub fn filter_valid<T: GridItem>(items: &[T]) -> Vec<usize> {
    let mut valid = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        if item.id().is_some() {
            valid.push(index);
        }
    }
    valid
}
