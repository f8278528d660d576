//! # AABB tree - static bounding volume hierarchy
//!
//! A Rust library indexing `D`-dimensional axis-aligned bounding boxes in a
//! static, array-backed binary tree.
//!
//! ## Features
//!
//! - **Z-order layout**: boxes are sorted along the Morton curve of their centers
//!   and stored in an implicit 1-indexed binary tree (children of `i` are `2i`
//!   and `2i + 1`)
//! - **Nearest element**: branch and bound with a caller supplied distance
//! - **Range queries**: boxes, points, rays, lines, segments and triangles
//! - **Overlap pairs**: all intersecting pairs within one tree or across two trees
//! - **Containment**: all boxes containing a point
//!
//! ## Quick Start
//!
//! ```rust
//! use aabb_tree::prelude::*;
//!
//! let tree = AabbTree::new(&[
//!     Aabb::new([0.0, 0.0], [2.0, 2.0]),
//!     Aabb::new([1.0, 1.0], [3.0, 3.0]),
//!     Aabb::new([5.0, 5.0], [6.0, 6.0]),
//!     Aabb::new([1.5, 1.5], [2.5, 2.5]),
//! ]);
//!
//! // Boxes intersecting a region
//! let mut results = Vec::new();
//! tree.query_intersecting_into(&Aabb::new([1.2, 1.2], [2.8, 2.8]), &mut results);
//! results.sort_unstable();
//! assert_eq!(results, vec![0, 1, 3]);
//!
//! // Overlapping pairs
//! let mut pairs: Vec<(usize, usize)> = tree
//!     .self_pairs()
//!     .into_iter()
//!     .map(|(i, j)| (i.min(j), i.max(j)))
//!     .collect();
//! pairs.sort_unstable();
//! assert_eq!(pairs, vec![(0, 1), (0, 3), (1, 3)]);
//!
//! // Box closest to a point
//! assert_eq!(tree.closest_box(&[5.5, 4.0]).map(|r| r.0), Some(2));
//! ```
//!
//! ## How It Works
//!
//! Every query is a recursive descent from the root. A node covers a
//! contiguous range of Morton-sorted leaves and stores the union of their
//! boxes, so a subtree whose box fails the query test is skipped whole.
//! The tree is immutable after construction and queries only borrow it, so
//! it can be shared between threads.

pub mod bbox;
pub mod builder;
mod closest;
pub mod error;
mod intersect;
pub mod morton;
mod pairs;
pub mod prelude;
pub mod shapes;
pub mod tree;

pub use bbox::{Aabb, Point};
pub use builder::AabbTreeBuilder;
pub use error::AabbError;
pub use morton::morton_mapping;
pub use shapes::{Intersects, Line, Ray, Segment, Triangle};
pub use tree::{AabbTree, DEFAULT_TOLERANCE, ROOT_INDEX};

#[cfg(test)]
mod comparison_tests;
