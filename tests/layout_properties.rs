//! Property-based tests for the layout pipeline.
//!
//! Properties under test:
//! - position output is index-aligned with the validated item sequence
//! - no two items sharing a column overlap vertically
//! - total height equals the tallest column end minus one gutter
//! - columns stay balanced within one resolved item height (plus gutter)
//! - the viewport filter is idempotent and order-preserving
//! - the bounds tracker rejects sub-hysteresis candidates

use ashlar::layout::{calculate_dimensions, calculate_positions, resolve_height};
use ashlar::model::{filter_valid, GridItem, ViewBounds};
use ashlar::viewport::{bounds_changed_significantly, visible_items, BoundsTracker, ScrollSignal};
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct TestItem {
    id: Option<String>,
    width: Option<f64>,
    height: Option<f64>,
    aspect_ratio: Option<f64>,
}

impl GridItem for TestItem {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
    fn width(&self) -> Option<f64> {
        self.width
    }
    fn height(&self) -> Option<f64> {
        self.height
    }
    fn aspect_ratio(&self) -> Option<f64> {
        self.aspect_ratio
    }
}

fn arb_item() -> impl Strategy<Value = TestItem> {
    (
        prop::option::weighted(0.9, "[a-z0-9]{1,12}"),
        prop::option::of(50.0f64..2000.0),
        prop::option::of(50.0f64..2000.0),
        prop::option::of(0.25f64..4.0),
    )
        .prop_map(|(id, width, height, aspect_ratio)| TestItem {
            id,
            width,
            height,
            aspect_ratio,
        })
}

fn arb_items() -> impl Strategy<Value = Vec<TestItem>> {
    prop::collection::vec(arb_item(), 0..80)
}

proptest! {
    /// Every validated item gets exactly one position, in order.
    #[test]
    fn position_count_matches_validated_count(
        items in arb_items(),
        width in 300.0f64..3000.0,
    ) {
        let dims = calculate_dimensions(width, 5, 2, 240.0, 1.5).unwrap();
        let valid = filter_valid(&items);
        let layout = calculate_positions(&items, &valid, &dims, 1.5);
        prop_assert_eq!(layout.positions.len(), valid.len());
        for pos in &layout.positions {
            prop_assert!(pos.column < dims.column_count);
            prop_assert!(pos.top >= 0.0);
        }
    }

    /// Two items in the same column never overlap: the earlier one ends
    /// (plus gutter) at or above where the later one starts.
    #[test]
    fn same_column_items_never_overlap(
        items in arb_items(),
        width in 300.0f64..3000.0,
    ) {
        let gutter = 1.5;
        let dims = calculate_dimensions(width, 5, 2, 240.0, gutter).unwrap();
        let valid = filter_valid(&items);
        let layout = calculate_positions(&items, &valid, &dims, gutter);

        for column in 0..dims.column_count {
            let mut stacked: Vec<_> = layout
                .positions
                .iter()
                .filter(|p| p.column == column)
                .collect();
            stacked.sort_by(|a, b| a.top.total_cmp(&b.top));
            for pair in stacked.windows(2) {
                prop_assert!(
                    pair[0].top + pair[0].height + gutter <= pair[1].top,
                    "overlap in column {}: {:?} then {:?}",
                    column,
                    pair[0],
                    pair[1]
                );
            }
        }
    }

    /// Total height is the tallest column end minus the trailing gutter,
    /// and zero for an empty validated set.
    #[test]
    fn total_height_is_tallest_column_end(
        items in arb_items(),
        width in 300.0f64..3000.0,
    ) {
        let gutter = 1.5;
        let dims = calculate_dimensions(width, 5, 2, 240.0, gutter).unwrap();
        let valid = filter_valid(&items);
        let layout = calculate_positions(&items, &valid, &dims, gutter);

        if valid.is_empty() {
            prop_assert_eq!(layout.total_height, 0.0);
        } else {
            let max_end = layout
                .positions
                .iter()
                .map(|p| p.top + p.height + gutter)
                .fold(0.0f64, f64::max);
            prop_assert_eq!(layout.total_height, max_end - gutter);
        }
    }

    /// Greedy packing keeps columns within one item height (plus gutter)
    /// of each other.
    #[test]
    fn columns_stay_balanced(
        items in arb_items(),
        width in 300.0f64..3000.0,
    ) {
        let gutter = 1.5;
        let dims = calculate_dimensions(width, 5, 2, 240.0, gutter).unwrap();
        let valid = filter_valid(&items);
        prop_assume!(!valid.is_empty());
        let layout = calculate_positions(&items, &valid, &dims, gutter);

        let mut ends = vec![0.0f64; dims.column_count];
        for pos in &layout.positions {
            ends[pos.column] = ends[pos.column].max(pos.top + pos.height + gutter);
        }
        let max_end = ends.iter().cloned().fold(0.0f64, f64::max);
        let min_end = ends.iter().cloned().fold(f64::INFINITY, f64::min);

        let tallest_item = valid
            .iter()
            .map(|&i| resolve_height(&items[i], dims.column_width))
            .fold(0.0f64, f64::max);
        prop_assert!(max_end - min_end <= tallest_item + gutter);
    }

    /// The viewport filter returns the same subset twice, in input order.
    #[test]
    fn viewport_filter_is_idempotent_and_ordered(
        items in arb_items(),
        width in 300.0f64..3000.0,
        top in -2000.0f64..8000.0,
        span in 100.0f64..4000.0,
    ) {
        let dims = calculate_dimensions(width, 5, 2, 240.0, 1.5).unwrap();
        let valid = filter_valid(&items);
        let layout = calculate_positions(&items, &valid, &dims, 1.5);
        let bounds = ViewBounds { top, bottom: top + span };

        let first = visible_items(&items, &valid, &layout.positions, bounds);
        let second = visible_items(&items, &valid, &layout.positions, bounds);

        prop_assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            prop_assert_eq!(a.index, b.index);
            prop_assert_eq!(a.position, b.position);
        }
        for pair in first.windows(2) {
            prop_assert!(pair[0].index < pair[1].index);
        }
        for v in &first {
            prop_assert!(v.position.top <= bounds.bottom);
            prop_assert!(v.position.bottom() >= bounds.top);
        }
    }

    /// A candidate below the hysteresis threshold on both edges never
    /// replaces the tracked bounds; at or above it on either edge always
    /// does.
    #[test]
    fn hysteresis_gate_accepts_and_rejects_correctly(
        base_offset in 0.0f64..10_000.0,
        delta in -500.0f64..500.0,
        hysteresis in 1.0f64..300.0,
    ) {
        let mut tracker = BoundsTracker::new(1000.0, hysteresis);
        let signal = |offset: f64| ScrollSignal {
            offset,
            viewport: 800.0,
            container_offset: 0.0,
        };
        // Keep clear of the accept/reject boundary, where floating-point
        // rounding of the candidate edges could go either way.
        prop_assume!((delta.abs() - hysteresis).abs() > 1e-6);
        prop_assume!(tracker.offer(&signal(base_offset)));
        let before = tracker.bounds();

        let accepted = tracker.offer(&signal(base_offset + delta));
        if delta.abs() >= hysteresis {
            prop_assert!(accepted);
            prop_assert!(tracker.bounds() != before);
        } else {
            prop_assert!(!accepted);
            prop_assert_eq!(tracker.bounds(), before);
        }
    }

    /// `bounds_changed_significantly` fires on either edge independently.
    #[test]
    fn either_edge_can_clear_the_gate(
        top_delta in -300.0f64..300.0,
        bottom_delta in -300.0f64..300.0,
        threshold in 1.0f64..200.0,
    ) {
        prop_assume!((top_delta.abs() - threshold).abs() > 1e-6);
        prop_assume!((bottom_delta.abs() - threshold).abs() > 1e-6);
        let prev = ViewBounds { top: 0.0, bottom: 1000.0 };
        let next = ViewBounds {
            top: prev.top + top_delta,
            bottom: prev.bottom + bottom_delta,
        };
        let expected = top_delta.abs() >= threshold || bottom_delta.abs() >= threshold;
        prop_assert_eq!(
            bounds_changed_significantly(prev, next, threshold),
            expected
        );
    }
}
