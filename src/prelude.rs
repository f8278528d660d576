//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the crate.
//! Users can import everything they need with:
//!
//! ```
//! use aabb_tree::prelude::*;
//! ```

pub use crate::{Aabb, AabbTree, AabbTreeBuilder, Intersects, Line, Point, Ray, Segment, Triangle};
