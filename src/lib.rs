//! ashlar — masonry layout, viewport virtualization and infinite scroll.
//!
//! The core is a small, host-agnostic engine: given an item collection,
//! a container width and raw scroll signals, it computes a multi-column
//! masonry layout (greedy shortest-column-first packing), projects the
//! subset of items intersecting the padded viewport, and arms a
//! deduplicated "load more" trigger near the end of content.
//!
//! Layout math lives in pure modules ([`layout`], [`viewport`],
//! [`scroll`]); [`engine::GridEngine`] composes them and owns the
//! recomputation lifecycle (debounced resize, frame-coalesced scroll,
//! teardown). The binary in this crate is a terminal demo gallery that
//! hosts the engine; any renderer that can measure a container and report
//! scroll positions can do the same.
//!
//! ```
//! use ashlar::config::GridConfig;
//! use ashlar::engine::{GridEngine, LayoutState};
//! use ashlar::model::GridItem;
//! use std::time::Instant;
//!
//! struct Photo {
//!     id: String,
//!     aspect: f64,
//! }
//!
//! impl GridItem for Photo {
//!     fn id(&self) -> Option<&str> {
//!         Some(&self.id)
//!     }
//!     fn aspect_ratio(&self) -> Option<f64> {
//!         Some(self.aspect)
//!     }
//! }
//!
//! let photos = vec![
//!     Photo { id: "a".into(), aspect: 1.5 },
//!     Photo { id: "b".into(), aspect: 0.75 },
//! ];
//!
//! let mut engine = GridEngine::new(GridConfig::default()).unwrap();
//! engine.measure_container(1000.0, Instant::now());
//! let state = engine.on_frame(&photos, Instant::now());
//! assert!(state.is_ready());
//! ```

pub mod config;
pub mod engine;
pub mod layout;
pub mod logging;
pub mod model;
pub mod scroll;
pub mod source;
pub mod view;
pub mod viewport;
