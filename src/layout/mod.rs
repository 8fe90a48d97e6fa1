//! Column geometry and masonry bin packing (pure).
//!
//! Both calculators are deterministic functions of their inputs. The engine
//! decides *when* to run them; nothing here caches or observes anything.

pub mod dimensions;
pub mod positions;

pub use dimensions::calculate_dimensions;
pub use positions::{calculate_positions, resolve_height, PositionedLayout};
