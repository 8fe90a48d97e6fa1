//! Layout orchestrator.
//!
//! [`GridEngine`] composes the pure calculators with the bounds tracker
//! and fetch trigger, and owns the whole recomputation lifecycle: debounced
//! resize, frame-coalesced scroll, dirty-flag-ordered recomputation, and
//! teardown. The host drives it with raw signals and one `on_frame` call
//! per frame; the engine is single-threaded and every pass is synchronous.
//!
//! Stage ordering within a pass is fixed: a due resize recomputes
//! dimensions first; dimension or item changes recompute positions next;
//! the visible projection always derives last, from whatever bounds the
//! hysteresis gate has let through.

use crate::config::{ConfigError, GridConfig};
use crate::layout::{calculate_dimensions, calculate_positions, PositionedLayout};
use crate::model::{filter_valid, Dimensions, GridItem, VisibleItem};
use crate::scroll::{distance_to_end, FetchState, InfiniteScroll};
use crate::viewport::{visible_items, BoundsTracker, ScrollSignal};
use std::time::Instant;
use tracing::{debug, trace};

/// What the engine can tell a renderer after a recomputation pass.
#[derive(Debug)]
pub enum LayoutState<'a, T> {
    /// The container has not produced a usable width yet; nothing can be
    /// laid out. Render a loading state.
    Loading,
    /// Dimensions are known but the validated item set is empty.
    Empty {
        /// Current column geometry.
        dimensions: Dimensions,
    },
    /// Content is laid out and the visible projection is current.
    Ready {
        /// Current column geometry.
        dimensions: Dimensions,
        /// Full content height in pixels (drives the scrollbar).
        total_height: f64,
        /// Items intersecting the padded viewport, in input order.
        visible: Vec<VisibleItem<'a, T>>,
    },
}

impl<T> LayoutState<'_, T> {
    /// True for the `Ready` variant.
    pub fn is_ready(&self) -> bool {
        matches!(self, LayoutState::Ready { .. })
    }

    /// Visible items, empty for non-ready states.
    pub fn visible(&self) -> &[VisibleItem<'_, T>] {
        match self {
            LayoutState::Ready { visible, .. } => visible,
            _ => &[],
        }
    }
}

/// The composed layout engine. See the module docs for the driving
/// contract.
#[derive(Debug)]
pub struct GridEngine {
    config: GridConfig,
    dimensions: Option<Dimensions>,
    measured: bool,
    pending_resize: Option<(f64, Instant)>,
    pending_scroll: Option<ScrollSignal>,
    last_scroll: Option<ScrollSignal>,
    tracker: BoundsTracker,
    trigger: InfiniteScroll,
    valid: Vec<usize>,
    layout: PositionedLayout,
    items_dirty: bool,
    positions_dirty: bool,
    torn_down: bool,
}

impl GridEngine {
    /// Builds an engine from a validated configuration.
    pub fn new(config: GridConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let tracker = BoundsTracker::new(config.overscan, config.hysteresis);
        let trigger = InfiniteScroll::new(config.scroll_threshold, config.use_window);
        Ok(Self {
            config,
            dimensions: None,
            measured: false,
            pending_resize: None,
            pending_scroll: None,
            last_scroll: None,
            tracker,
            trigger,
            valid: Vec::new(),
            layout: PositionedLayout::empty(),
            items_dirty: true,
            positions_dirty: false,
            torn_down: false,
        })
    }

    /// The configuration this engine was built with.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Current column geometry, `None` while undetermined.
    pub fn dimensions(&self) -> Option<Dimensions> {
        self.dimensions
    }

    /// Current total content height in pixels.
    pub fn total_height(&self) -> f64 {
        self.layout.total_height
    }

    /// True once [`teardown`](Self::teardown) has run.
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Reports a container width measurement.
    ///
    /// The first measurement applies immediately so the initial paint does
    /// not wait out the debounce; later measurements are coalesced and the
    /// width only lands once the debounce interval elapses without another
    /// resize (checked on the next `on_frame`).
    pub fn measure_container(&mut self, width: f64, now: Instant) {
        if self.torn_down {
            return;
        }
        if !self.measured {
            self.measured = true;
            self.apply_width(width);
        } else {
            self.pending_resize = Some((width, now + self.config.resize_debounce));
        }
    }

    /// Records a scroll observation. Bursts collapse into a single pending
    /// slot holding the latest signal; returns true when this is the first
    /// signal of a burst and the host should schedule a frame.
    pub fn record_scroll(&mut self, signal: ScrollSignal) -> bool {
        if self.torn_down {
            return false;
        }
        self.last_scroll = Some(signal);
        let first = self.pending_scroll.is_none();
        self.pending_scroll = Some(signal);
        first
    }

    /// Marks the item collection as changed (items appended, removed or
    /// replaced). The next pass revalidates and repositions.
    pub fn items_changed(&mut self) {
        if !self.torn_down {
            self.items_dirty = true;
        }
    }

    /// Runs one recomputation pass and returns the resulting layout state.
    ///
    /// `items` must be the same collection across passes unless
    /// [`items_changed`](Self::items_changed) was called in between.
    /// Torn-down engines do no work and report `Loading`.
    pub fn on_frame<'a, T: GridItem>(
        &mut self,
        items: &'a [T],
        now: Instant,
    ) -> LayoutState<'a, T> {
        if self.torn_down {
            return LayoutState::Loading;
        }

        if let Some((width, deadline)) = self.pending_resize {
            if now >= deadline {
                self.pending_resize = None;
                self.apply_width(width);
            }
        }

        if self.items_dirty {
            self.items_dirty = false;
            self.valid = filter_valid(items);
            self.positions_dirty = true;
        }

        if self.positions_dirty {
            self.positions_dirty = false;
            self.layout = match self.dimensions {
                Some(dims) if !self.valid.is_empty() => {
                    calculate_positions(items, &self.valid, &dims, self.config.gutter_size)
                }
                _ => PositionedLayout::empty(),
            };
            trace!(
                items = self.valid.len(),
                total_height = self.layout.total_height,
                "positions recomputed"
            );
        }

        if let Some(signal) = self.pending_scroll.take() {
            if self.tracker.offer(&signal) {
                trace!(bounds = ?self.tracker.bounds(), "view bounds advanced");
            }
        }

        let Some(dimensions) = self.dimensions else {
            return LayoutState::Loading;
        };
        if self.valid.is_empty() {
            return LayoutState::Empty { dimensions };
        }
        LayoutState::Ready {
            dimensions,
            total_height: self.layout.total_height,
            visible: visible_items(
                items,
                &self.valid,
                &self.layout.positions,
                self.tracker.bounds(),
            ),
        }
    }

    /// Evaluates the infinite-scroll trigger against the latest scroll
    /// observation and the current content height, invoking `fetch` at
    /// most once. Call after `on_frame` and whenever the item count or the
    /// external fetch state changes; appended content re-evaluates
    /// proximity through the grown total height.
    pub fn maybe_fetch(&mut self, state: FetchState, fetch: impl FnOnce()) -> bool {
        if self.torn_down {
            return false;
        }
        let Some(signal) = &self.last_scroll else {
            return false;
        };
        let distance = distance_to_end(signal, self.layout.total_height);
        self.trigger.poll(state, distance, fetch)
    }

    /// Cancels all pending work. Every later call is a no-op; no
    /// recomputation runs after teardown, including already-scheduled
    /// resize or scroll work.
    pub fn teardown(&mut self) {
        debug!("grid engine torn down");
        self.torn_down = true;
        self.pending_resize = None;
        self.pending_scroll = None;
    }

    fn apply_width(&mut self, width: f64) {
        let next = calculate_dimensions(
            width,
            self.config.max_column_count,
            self.config.min_column_count,
            self.config.min_column_width,
            self.config.gutter_size,
        );
        if next != self.dimensions {
            debug!(width, dimensions = ?next, "container dimensions changed");
            self.dimensions = next;
            self.positions_dirty = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[derive(Debug)]
    struct Card {
        id: Option<&'static str>,
        aspect_ratio: Option<f64>,
    }

    impl Card {
        fn square(id: &'static str) -> Self {
            Self {
                id: Some(id),
                aspect_ratio: None,
            }
        }
    }

    impl GridItem for Card {
        fn id(&self) -> Option<&str> {
            self.id
        }
        fn aspect_ratio(&self) -> Option<f64> {
            self.aspect_ratio
        }
    }

    fn engine() -> GridEngine {
        GridEngine::new(GridConfig::default()).expect("default config is valid")
    }

    fn cards(n: usize) -> Vec<Card> {
        (0..n).map(|_| Card::square("c")).collect()
    }

    #[test]
    fn unmeasured_engine_reports_loading() {
        let mut e = engine();
        let items = cards(3);
        assert!(matches!(
            e.on_frame(&items, Instant::now()),
            LayoutState::Loading
        ));
    }

    #[test]
    fn empty_item_set_reports_empty_with_dimensions() {
        let mut e = engine();
        let now = Instant::now();
        e.measure_container(800.0, now);
        let items: Vec<Card> = Vec::new();
        match e.on_frame(&items, now) {
            LayoutState::Empty { dimensions } => {
                assert_eq!(dimensions.column_count, 3);
            }
            other => panic!("expected Empty, got {other:?}"),
        }
        assert_eq!(e.total_height(), 0.0);
    }

    #[test]
    fn first_measurement_applies_without_debounce() {
        let mut e = engine();
        let now = Instant::now();
        e.measure_container(1000.0, now);
        let dims = e.dimensions().expect("dimensions determined");
        assert_eq!(dims.column_count, 4);
        assert_eq!(dims.column_width, 248.875);
    }

    #[test]
    fn resize_bursts_coalesce_to_the_last_width() {
        let mut e = engine();
        let t0 = Instant::now();
        e.measure_container(1000.0, t0);

        // Burst of resizes within the debounce interval.
        e.measure_container(600.0, t0 + Duration::from_millis(10));
        e.measure_container(700.0, t0 + Duration::from_millis(20));
        e.measure_container(800.0, t0 + Duration::from_millis(30));

        let items = cards(4);
        // Too early: still the initial width.
        e.on_frame(&items, t0 + Duration::from_millis(50));
        assert_eq!(e.dimensions().unwrap().column_count, 4);

        // Past the deadline of the last measurement only.
        e.on_frame(&items, t0 + Duration::from_millis(200));
        assert_eq!(e.dimensions().unwrap().column_count, 3);
    }

    #[test]
    fn unchanged_width_does_not_dirty_positions() {
        let mut e = engine();
        let t0 = Instant::now();
        e.measure_container(1000.0, t0);
        let items = cards(4);
        e.on_frame(&items, t0);

        e.measure_container(1000.0, t0);
        e.on_frame(&items, t0 + Duration::from_millis(200));
        assert!(!e.positions_dirty);
        assert_eq!(e.dimensions().unwrap().column_count, 4);
    }

    #[test]
    fn ready_state_projects_visible_items() {
        let mut e = engine();
        let now = Instant::now();
        e.measure_container(1000.0, now);
        let items = cards(8);
        match e.on_frame(&items, now) {
            LayoutState::Ready {
                total_height,
                visible,
                ..
            } => {
                // Two rows of squares fit well inside the initial bounds.
                assert_eq!(visible.len(), 8);
                assert!(total_height > 0.0);
            }
            other => panic!("expected Ready, got {other:?}"),
        }
    }

    #[test]
    fn scroll_bursts_collapse_to_one_pending_frame() {
        let mut e = engine();
        let sig = |offset| ScrollSignal {
            offset,
            viewport: 800.0,
            container_offset: 0.0,
        };
        assert!(e.record_scroll(sig(0.0)));
        assert!(!e.record_scroll(sig(10.0)));
        assert!(!e.record_scroll(sig(20.0)));

        let now = Instant::now();
        e.measure_container(1000.0, now);
        let items = cards(4);
        e.on_frame(&items, now);

        // The pending slot was consumed; a new burst schedules again.
        assert!(e.record_scroll(sig(30.0)));
    }

    #[test]
    fn items_changed_triggers_relayout() {
        let mut e = engine();
        let now = Instant::now();
        e.measure_container(1000.0, now);
        let items = cards(4);
        e.on_frame(&items, now);
        let before = e.total_height();

        let grown = cards(16);
        e.items_changed();
        e.on_frame(&grown, now);
        assert!(e.total_height() > before);
    }

    #[test]
    fn invalid_items_are_excluded_from_layout() {
        let mut e = engine();
        let now = Instant::now();
        e.measure_container(1000.0, now);
        let items = vec![
            Card::square("a"),
            Card {
                id: None,
                aspect_ratio: None,
            },
            Card::square("c"),
        ];
        match e.on_frame(&items, now) {
            LayoutState::Ready { visible, .. } => {
                let indices: Vec<usize> = visible.iter().map(|v| v.index).collect();
                assert_eq!(indices, vec![0, 2]);
            }
            other => panic!("expected Ready, got {other:?}"),
        }
    }

    #[test]
    fn fetch_fires_once_within_threshold_and_respects_in_flight() {
        let mut e = engine();
        let now = Instant::now();
        e.measure_container(1000.0, now);
        let items = cards(40);
        e.record_scroll(ScrollSignal {
            offset: 0.0,
            viewport: 800.0,
            container_offset: 0.0,
        });
        e.on_frame(&items, now);

        // 40 squares of ~248.875px in 4 columns: ten rows, well past the
        // viewport, but scroll the viewport near the end first.
        let total = e.total_height();
        e.record_scroll(ScrollSignal {
            offset: total - 1000.0,
            viewport: 800.0,
            container_offset: 0.0,
        });
        e.on_frame(&items, now);

        let idle = FetchState {
            has_more: true,
            is_fetching: false,
        };
        let mut fired = 0;
        assert!(e.maybe_fetch(idle, || fired += 1));

        let busy = FetchState {
            has_more: true,
            is_fetching: true,
        };
        for _ in 0..5 {
            assert!(!e.maybe_fetch(busy, || fired += 1));
        }
        assert_eq!(fired, 1);
    }

    #[test]
    fn fetch_does_not_fire_before_any_scroll_observation() {
        let mut e = engine();
        let idle = FetchState {
            has_more: true,
            is_fetching: false,
        };
        assert!(!e.maybe_fetch(idle, || panic!("must not fetch")));
    }

    #[test]
    fn teardown_discards_pending_work() {
        let mut e = engine();
        let t0 = Instant::now();
        e.measure_container(1000.0, t0);
        e.measure_container(500.0, t0 + Duration::from_millis(5));
        e.record_scroll(ScrollSignal {
            offset: 500.0,
            viewport: 800.0,
            container_offset: 0.0,
        });

        e.teardown();

        let items = cards(4);
        assert!(matches!(
            e.on_frame(&items, t0 + Duration::from_secs(1)),
            LayoutState::Loading
        ));
        // The scheduled resize never landed.
        assert_eq!(e.dimensions().unwrap().column_count, 4);

        // All entry points are no-ops now.
        assert!(!e.record_scroll(ScrollSignal {
            offset: 0.0,
            viewport: 800.0,
            container_offset: 0.0,
        }));
        e.items_changed();
        assert!(!e.items_dirty);
        assert!(!e.maybe_fetch(
            FetchState {
                has_more: true,
                is_fetching: false,
            },
            || panic!("must not fetch after teardown"),
        ));
    }
}
