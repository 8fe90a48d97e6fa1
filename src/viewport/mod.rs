//! Viewport tracking and the visible-window projection.

pub mod bounds;
pub mod visible;

pub use bounds::{bounds_changed_significantly, BoundsTracker, ScrollSignal, INITIAL_BOUNDS};
pub use visible::visible_items;
