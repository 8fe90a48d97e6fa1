//! Core data types (pure).
//!
//! Geometry and item types shared by every stage of the layout pipeline.
//! Nothing in this module performs IO or holds mutable state; items are
//! only ever borrowed and all derived values are owned by the engine.

pub mod geometry;
pub mod item;

pub use geometry::{Dimensions, Position, Translate, ViewBounds, VisibleItem};
pub use item::{filter_valid, GridItem};
