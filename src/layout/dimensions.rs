//! Column count and width derivation.

use crate::model::Dimensions;

/// Derives column geometry from the available container width.
///
/// Returns `None` when the width is zero: the container has not been
/// measured yet and no layout is possible. Callers must treat that as a
/// loading state, not an error.
///
/// Otherwise the column count is `floor(width / (min_column_width +
/// gutter))` clamped to `[min_column_count, max_column_count]`, and the
/// column width divides the remaining space evenly after gutters.
///
/// # Examples
///
/// ```
/// use ashlar::layout::calculate_dimensions;
///
/// let dims = calculate_dimensions(1000.0, 5, 2, 240.0, 1.5).unwrap();
/// assert_eq!(dims.column_count, 4);
/// assert_eq!(dims.column_width, 248.875);
///
/// assert!(calculate_dimensions(0.0, 5, 2, 240.0, 1.5).is_none());
/// ```
pub fn calculate_dimensions(
    container_width: f64,
    max_column_count: usize,
    min_column_count: usize,
    min_column_width: f64,
    gutter_size: f64,
) -> Option<Dimensions> {
    if container_width == 0.0 {
        return None;
    }

    let fit = (container_width / (min_column_width + gutter_size)).floor() as usize;
    let column_count = fit.max(min_column_count).min(max_column_count);
    let column_width =
        (container_width - (column_count as f64 - 1.0) * gutter_size) / column_count as f64;

    Some(Dimensions {
        column_count,
        column_width,
    })
}
