//! Overlapping pairs: dual-tree traversals within one tree and across two.

use tracing::trace;

use crate::tree::{AabbTree, Cursor};

/// Fixed context of a cross-tree traversal.
struct CrossPairs<'a, const D: usize> {
    other: &'a AabbTree<D>,
    tolerance: f64,
}

impl<const D: usize> AabbTree<D> {
    /// Calls `action(i, j)` once for every unordered pair of distinct elements
    /// whose boxes intersect within the tree tolerance.
    ///
    /// The order of `i` and `j` inside a pair is unspecified. Returns `true`
    /// if `action` stopped the traversal.
    ///
    /// # Example
    /// ```
    /// use aabb_tree::{Aabb, AabbTree};
    ///
    /// let tree = AabbTree::new(&[
    ///     Aabb::new([0.0, 0.0], [2.0, 2.0]),
    ///     Aabb::new([5.0, 5.0], [6.0, 6.0]),
    ///     Aabb::new([1.0, 1.0], [3.0, 3.0]),
    /// ]);
    /// let mut pairs = Vec::new();
    /// tree.query_self_pairs(|i, j| {
    ///     pairs.push((i.min(j), i.max(j)));
    ///     false
    /// });
    /// assert_eq!(pairs, vec![(0, 2)]);
    /// ```
    pub fn query_self_pairs<A>(&self, mut action: A) -> bool
    where
        A: FnMut(usize, usize) -> bool,
    {
        if self.is_empty() {
            return false;
        }
        trace!(elements = self.len(), "enumerating self pairs");
        let root = Cursor::root(self.len());
        self.self_recursive(root, root, &mut action)
    }

    fn self_recursive<A>(&self, first: Cursor, second: Cursor, action: &mut A) -> bool
    where
        A: FnMut(usize, usize) -> bool,
    {
        // Pairs are symmetric: only ranges where `second` does not precede
        // `first` are worth visiting.
        if second.end <= first.begin {
            return false;
        }
        if !self
            .node(first.node)
            .intersects_with_tolerance(self.node(second.node), self.tolerance)
        {
            return false;
        }
        if first.is_leaf() && second.is_leaf() {
            if first.node == second.node {
                return false;
            }
            return action(self.element(first), self.element(second));
        }

        if second.len() >= first.len() {
            let (left, right) = second.split();
            self.self_recursive(first, left, action) || self.self_recursive(first, right, action)
        } else {
            let (left, right) = first.split();
            self.self_recursive(left, second, action) || self.self_recursive(right, second, action)
        }
    }

    /// Collects the pairs reported by [`AabbTree::query_self_pairs`].
    pub fn self_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        let _ = self.query_self_pairs(|i, j| {
            pairs.push((i, j));
            false
        });
        pairs
    }

    /// Calls `action(i, j)` for every element `i` of this tree and `j` of
    /// `other` whose boxes intersect.
    ///
    /// Boxes are compared with the larger of the two trees' tolerances, so
    /// `a.pairs_with(&b)` and `b.pairs_with(&a)` report the same pairs with
    /// swapped indices. Returns `true` if `action` stopped the traversal.
    pub fn query_pairs_with<A>(&self, other: &Self, mut action: A) -> bool
    where
        A: FnMut(usize, usize) -> bool,
    {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        let tolerance = self.tolerance.max(other.tolerance);
        trace!(
            elements = self.len(),
            other_elements = other.len(),
            tolerance,
            "enumerating cross pairs"
        );
        let cross = CrossPairs { other, tolerance };
        self.cross_recursive(
            &cross,
            Cursor::root(self.len()),
            Cursor::root(other.len()),
            &mut action,
        )
    }

    fn cross_recursive<A>(&self, cross: &CrossPairs<'_, D>, first: Cursor, second: Cursor, action: &mut A) -> bool
    where
        A: FnMut(usize, usize) -> bool,
    {
        let other = cross.other;
        if !self
            .node(first.node)
            .intersects_with_tolerance(other.node(second.node), cross.tolerance)
        {
            return false;
        }
        if first.is_leaf() && second.is_leaf() {
            return action(self.element(first), other.element(second));
        }

        if second.len() >= first.len() {
            let (left, right) = second.split();
            self.cross_recursive(cross, first, left, action) || self.cross_recursive(cross, first, right, action)
        } else {
            let (left, right) = first.split();
            self.cross_recursive(cross, left, second, action) || self.cross_recursive(cross, right, second, action)
        }
    }

    /// Collects the pairs reported by [`AabbTree::query_pairs_with`].
    pub fn pairs_with(&self, other: &Self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        let _ = self.query_pairs_with(other, |i, j| {
            pairs.push((i, j));
            false
        });
        pairs
    }
}
