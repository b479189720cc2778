//! Screen-space hit-testing over rendered markers.
//!
//! The index is rebuilt from scratch on every redraw: the draw pass already
//! visits each visible marker, so it registers the marker box at the same
//! time. Nothing is updated incrementally between redraws.

mod hover;
mod quadtree;

pub use hover::{HoverPoint, resolve_hover};
pub use quadtree::{DEFAULT_NODE_CAPACITY, IndexedItem, MAX_DEPTH, QuadTree, Rect};
