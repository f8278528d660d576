//! Static AABB tree stored as an implicit binary tree.
//!
//! Memory layout:
//! - `nodes[ROOT_INDEX]` is the root, the children of `nodes[i]` are
//!   `nodes[2 * i]` and `nodes[2 * i + 1]`; slot 0 is unused.
//! - Each node covers a contiguous range of leaf slots `[begin, end)`, split
//!   at `begin + (end - begin) / 2`.
//! - `mapping[slot]` is the input index of the element stored at `slot`,
//!   slots being ordered along the Z-order curve.
//!
//! N is not required to be a power of two, so some indices below the
//! highest used one are never written. The array length comes from a
//! pre-pass that replays the split recursion.
//!
//! ```text
//!                   ROOT
//!                 /      \
//!               A1        A2
//!             /    \     /   \
//!           B1     B2   B3    B4
//!
//! storage: |unused|ROOT|A1|A2|B1|B2|B3|B4|
//! ```

use std::time::Instant;

use tracing::debug;

use crate::bbox::{Aabb, Point};
use crate::morton::morton_mapping;

/// Index of the root node in the node array.
pub const ROOT_INDEX: usize = 1;

/// Tolerance used by box tests inside queries unless configured otherwise.
pub const DEFAULT_TOLERANCE: f64 = 0.0;

/// Static bounding volume hierarchy over `D`-dimensional boxes.
///
/// The tree is immutable once built: rebuild it to change its content.
/// Queries take `&self` only, so a tree can be shared between threads.
///
/// # Example
/// ```
/// use aabb_tree::{Aabb, AabbTree};
///
/// let tree = AabbTree::new(&[
///     Aabb::new([0.0, 0.0], [1.0, 1.0]),
///     Aabb::new([5.0, 5.0], [6.0, 6.0]),
/// ]);
/// assert_eq!(tree.len(), 2);
/// assert_eq!(tree.closest_box(&[4.0, 5.5]), Some((1, 1.0)));
/// ```
#[derive(Clone, Debug)]
pub struct AabbTree<const D: usize> {
    /// Node boxes, 1-indexed.
    pub(crate) nodes: Vec<Aabb<D>>,
    /// Leaf slot -> element index.
    pub(crate) mapping: Vec<usize>,
    /// Inflation applied by box tests in queries.
    pub(crate) tolerance: f64,
    /// Length of the longest root-to-leaf path.
    depth: usize,
}

/// A node together with the leaf slot range it covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cursor {
    pub(crate) node: usize,
    pub(crate) begin: usize,
    pub(crate) end: usize,
}

impl Cursor {
    #[inline]
    pub(crate) const fn root(len: usize) -> Self {
        Self {
            node: ROOT_INDEX,
            begin: 0,
            end: len,
        }
    }

    #[inline]
    pub(crate) const fn is_leaf(&self) -> bool {
        self.begin + 1 == self.end
    }

    #[inline]
    pub(crate) const fn len(&self) -> usize {
        self.end - self.begin
    }

    /// Left and right children.
    #[inline]
    pub(crate) fn split(&self) -> (Self, Self) {
        debug_assert!(self.len() > 1, "cannot split a leaf");
        let middle = self.begin + (self.end - self.begin) / 2;
        (
            Self {
                node: 2 * self.node,
                begin: self.begin,
                end: middle,
            },
            Self {
                node: 2 * self.node + 1,
                begin: middle,
                end: self.end,
            },
        )
    }
}

impl<const D: usize> AabbTree<D> {
    /// Builds a tree over `boxes` with the [`DEFAULT_TOLERANCE`].
    ///
    /// Element indices reported by queries are positions in `boxes`.
    pub fn new(boxes: &[Aabb<D>]) -> Self {
        Self::new_with_tolerance(boxes, DEFAULT_TOLERANCE)
    }

    /// Builds a tree whose queries inflate boxes by `tolerance`.
    ///
    /// NaN, infinite or negative tolerances are replaced by 0.
    pub fn new_with_tolerance(boxes: &[Aabb<D>], tolerance: f64) -> Self {
        let start = Instant::now();
        let centers: Vec<Point<D>> = boxes.iter().map(Aabb::center).collect();
        let mapping = morton_mapping(&centers);

        let mut tree = Self {
            nodes: Vec::new(),
            mapping,
            tolerance: sanitize_tolerance(tolerance),
            depth: 0,
        };
        if boxes.is_empty() {
            tree.nodes = vec![Aabb::empty(); ROOT_INDEX];
        } else {
            let root = Cursor::root(boxes.len());
            let (max_node_index, depth) = max_node_index(root, 0);
            tree.nodes = vec![Aabb::empty(); max_node_index + 1];
            tree.depth = depth;
            tree.build_recursive(boxes, root);
        }

        debug!(
            elements = boxes.len(),
            nodes = tree.nodes.len(),
            depth = tree.depth,
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "built aabb tree"
        );
        tree
    }

    fn build_recursive(&mut self, boxes: &[Aabb<D>], cursor: Cursor) {
        if cursor.is_leaf() {
            self.nodes[cursor.node] = boxes[self.mapping[cursor.begin]];
            return;
        }
        let (left, right) = cursor.split();
        self.build_recursive(boxes, left);
        self.build_recursive(boxes, right);
        self.nodes[cursor.node] = self.nodes[left.node].union(&self.nodes[right.node]);
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    /// Whether the tree holds no element.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    /// Box enclosing every element, `None` for an empty tree.
    pub fn bounding_box(&self) -> Option<Aabb<D>> {
        if self.is_empty() {
            None
        } else {
            Some(self.nodes[ROOT_INDEX])
        }
    }

    /// Length of the node array, unused slots included.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges on the longest root-to-leaf path.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Leaf slot to element index permutation.
    #[inline]
    pub fn mapping(&self) -> &[usize] {
        &self.mapping
    }

    /// Tolerance used by box tests in queries.
    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    #[inline]
    pub(crate) fn node(&self, index: usize) -> &Aabb<D> {
        debug_assert!(index < self.nodes.len(), "node {index} out of tree");
        &self.nodes[index]
    }

    /// Element stored at the first slot of `cursor`.
    #[inline]
    pub(crate) fn element(&self, cursor: Cursor) -> usize {
        self.mapping[cursor.begin]
    }
}

impl<const D: usize> Default for AabbTree<D> {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl<const D: usize> FromIterator<Aabb<D>> for AabbTree<D> {
    fn from_iter<I: IntoIterator<Item = Aabb<D>>>(iter: I) -> Self {
        let boxes: Vec<Aabb<D>> = iter.into_iter().collect();
        Self::new(&boxes)
    }
}

/// Highest node index and depth reached by the split recursion under `cursor`.
fn max_node_index(cursor: Cursor, depth: usize) -> (usize, usize) {
    if cursor.is_leaf() {
        return (cursor.node, depth);
    }
    let (left, right) = cursor.split();
    let (left_index, left_depth) = max_node_index(left, depth + 1);
    let (right_index, right_depth) = max_node_index(right, depth + 1);
    (left_index.max(right_index), left_depth.max(right_depth))
}

pub(crate) fn sanitize_tolerance(tolerance: f64) -> f64 {
    if tolerance.is_finite() && tolerance > 0.0 {
        tolerance
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_node_index_small_sizes() {
        assert_eq!(max_node_index(Cursor::root(1), 0), (1, 0));
        assert_eq!(max_node_index(Cursor::root(2), 0), (3, 1));
        assert_eq!(max_node_index(Cursor::root(3), 0), (7, 2));
        assert_eq!(max_node_index(Cursor::root(4), 0), (7, 2));
        // 5 = 2 + 3: the right subtree reaches node 15 while 8..=13 stay unused.
        assert_eq!(max_node_index(Cursor::root(5), 0), (15, 3));
    }

    #[test]
    fn cursor_split_covers_range() {
        let (left, right) = Cursor::root(7).split();
        assert_eq!(left, Cursor { node: 2, begin: 0, end: 3 });
        assert_eq!(right, Cursor { node: 3, begin: 3, end: 7 });
        assert!(!left.is_leaf());
        assert_eq!(left.len() + right.len(), 7);
    }

    #[test]
    fn tolerance_is_sanitized() {
        assert_eq!(sanitize_tolerance(-1.0), 0.0);
        assert_eq!(sanitize_tolerance(f64::NAN), 0.0);
        assert_eq!(sanitize_tolerance(f64::INFINITY), 0.0);
        assert_eq!(sanitize_tolerance(0.25), 0.25);
    }

    #[test]
    fn empty_tree_has_root_slot_only() {
        let tree = AabbTree::<3>::new(&[]);
        assert!(tree.is_empty());
        assert_eq!(tree.node_count(), ROOT_INDEX);
        assert_eq!(tree.bounding_box(), None);
    }

    #[test]
    fn internal_nodes_enclose_children() {
        let boxes: Vec<Aabb<2>> = (0..13)
            .map(|i| {
                let x = f64::from(i) * 1.5;
                Aabb::new([x, -x], [x + 2.0, 1.0 - x])
            })
            .collect();
        let tree = AabbTree::new(&boxes);
        fn check(tree: &AabbTree<2>, cursor: Cursor) {
            if cursor.is_leaf() {
                return;
            }
            let (left, right) = cursor.split();
            let parent = tree.node(cursor.node);
            assert!(parent.contains_box(tree.node(left.node)), "left child escapes parent");
            assert!(parent.contains_box(tree.node(right.node)), "right child escapes parent");
            check(tree, left);
            check(tree, right);
        }
        check(&tree, Cursor::root(tree.len()));
    }
}
