//! Infinite-scroll trigger.
//!
//! Watches how close the viewport is to the end of the laid-out content
//! and asks the external data owner for more, at most once per crossing.
//! The owner's `is_fetching` flag is the single source of truth for
//! in-flight state; the trigger deliberately keeps no "already fired"
//! memory of its own, so a completed (even failed) fetch re-arms it.

use crate::viewport::ScrollSignal;
use tracing::debug;

/// Externally owned fetch state, supplied on every evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchState {
    /// Whether the data owner claims more pages exist.
    pub has_more: bool,
    /// Whether a fetch is currently outstanding.
    pub is_fetching: bool,
}

/// Remaining scrollable distance between the bottom of the viewport and
/// the end of the content, in pixels. Negative once the viewport has
/// scrolled past the content end.
pub fn distance_to_end(signal: &ScrollSignal, total_height: f64) -> f64 {
    signal.container_offset + total_height - (signal.offset + signal.viewport)
}

/// Proximity-to-end detector issuing a single in-flight fetch request.
#[derive(Debug, Clone)]
pub struct InfiniteScroll {
    threshold: f64,
    use_window: bool,
}

impl InfiniteScroll {
    /// Creates a trigger that arms within `threshold` pixels of the
    /// content end. `use_window` records which scroll source the host
    /// listens to (the global viewport or a designated element).
    pub fn new(threshold: f64, use_window: bool) -> Self {
        Self {
            threshold,
            use_window,
        }
    }

    /// The configured arming distance, in pixels.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Whether the host should listen on the global viewport.
    pub fn use_window(&self) -> bool {
        self.use_window
    }

    /// True when a fetch should be issued right now: more data is claimed
    /// available, nothing is in flight, and the remaining distance is
    /// within the threshold. Appending items grows the distance and
    /// disarms the trigger again; a completed fetch re-arms it.
    pub fn should_fetch(&self, state: FetchState, distance: f64) -> bool {
        state.has_more && !state.is_fetching && distance <= self.threshold
    }

    /// Evaluates proximity and invokes `fetch` at most once. Returns true
    /// when the callback ran. Fire-and-forget: the callback's only
    /// obligation is to eventually flip `is_fetching` back to false.
    pub fn poll(&self, state: FetchState, distance: f64, fetch: impl FnOnce()) -> bool {
        if self.should_fetch(state, distance) {
            debug!(distance, threshold = self.threshold, "requesting next page");
            fetch();
            true
        } else {
            false
        }
    }
}
