//! Scroll-signal to ViewBounds conversion with hysteresis gating.

use crate::model::ViewBounds;

/// Bounds published before any scroll measurement arrives.
///
/// A generous window around the origin so the first paint can render
/// something even when the scroll position has never been observed.
pub const INITIAL_BOUNDS: ViewBounds = ViewBounds {
    top: -1000.0,
    bottom: 2000.0,
};

/// One raw scroll observation from the host.
///
/// `offset` and `viewport` come from whichever scroll source the host is
/// using (a designated scrollable element or the global viewport);
/// `container_offset` is the grid container's vertical offset within that
/// source. A host whose tracked element has disappeared simply stops
/// producing signals; the tracker then keeps its last bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSignal {
    /// Current scroll offset of the source.
    pub offset: f64,
    /// Visible height of the source.
    pub viewport: f64,
    /// Vertical offset of the grid container inside the source.
    pub container_offset: f64,
}

/// True when `next` differs from `prev` by at least `threshold` on either
/// edge.
pub fn bounds_changed_significantly(prev: ViewBounds, next: ViewBounds, threshold: f64) -> bool {
    (next.top - prev.top).abs() >= threshold || (next.bottom - prev.bottom).abs() >= threshold
}

/// Converts raw scroll signals into the published [`ViewBounds`], accepting
/// a new window only when it moved far enough to matter.
///
/// The hysteresis baseline starts at the origin rather than at
/// [`INITIAL_BOUNDS`], so the first real measurement is (almost) always
/// accepted and replaces the pre-measurement window.
#[derive(Debug, Clone)]
pub struct BoundsTracker {
    published: ViewBounds,
    last_accepted: ViewBounds,
    overscan: f64,
    hysteresis: f64,
}

impl BoundsTracker {
    /// Creates a tracker with the given overscan padding and hysteresis
    /// threshold (both in pixels).
    pub fn new(overscan: f64, hysteresis: f64) -> Self {
        Self {
            published: INITIAL_BOUNDS,
            last_accepted: ViewBounds {
                top: 0.0,
                bottom: 0.0,
            },
            overscan,
            hysteresis,
        }
    }

    /// The bounds the viewport filter should currently use.
    pub fn bounds(&self) -> ViewBounds {
        self.published
    }

    /// Builds the candidate window for a scroll observation: the viewport
    /// translated into content coordinates, padded by overscan on both
    /// edges.
    pub fn candidate(&self, signal: &ScrollSignal) -> ViewBounds {
        let relative = signal.offset - signal.container_offset;
        ViewBounds {
            top: relative - self.overscan,
            bottom: relative + signal.viewport + self.overscan,
        }
    }

    /// Offers a scroll observation. Returns true when the candidate cleared
    /// the hysteresis gate and the published bounds changed; on false the
    /// previous bounds remain and no downstream recomputation is needed.
    pub fn offer(&mut self, signal: &ScrollSignal) -> bool {
        let candidate = self.candidate(signal);
        if bounds_changed_significantly(self.last_accepted, candidate, self.hysteresis) {
            self.last_accepted = candidate;
            self.published = candidate;
            true
        } else {
            false
        }
    }
}
