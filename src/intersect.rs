//! Range queries: one top-down traversal pruned by a box filter.
//!
//! Box, ray, line, segment and triangle queries only differ in the filter
//! plugged into [`AabbTree::query_with_filter`].

use crate::bbox::{Aabb, Point};
use crate::shapes::Intersects;
use crate::tree::{AabbTree, Cursor};

impl<const D: usize> AabbTree<D> {
    /// Visits the elements whose subtree passes `box_filter`.
    ///
    /// Every node box on the path to a leaf is tested, the leaf's box being
    /// the element's own box, so `action` only sees elements whose box passes
    /// the filter. Children are visited left then right. The traversal stops
    /// as soon as `action` returns `true`.
    ///
    /// Returns `true` if the traversal was stopped by `action`.
    pub fn query_with_filter<B, A>(&self, mut box_filter: B, mut action: A) -> bool
    where
        B: FnMut(&Aabb<D>) -> bool,
        A: FnMut(usize) -> bool,
    {
        if self.is_empty() {
            return false;
        }
        self.filter_recursive(Cursor::root(self.len()), &mut box_filter, &mut action)
    }

    fn filter_recursive<B, A>(&self, cursor: Cursor, box_filter: &mut B, action: &mut A) -> bool
    where
        B: FnMut(&Aabb<D>) -> bool,
        A: FnMut(usize) -> bool,
    {
        if !box_filter(self.node(cursor.node)) {
            return false;
        }
        if cursor.is_leaf() {
            return action(self.element(cursor));
        }
        let (left, right) = cursor.split();
        self.filter_recursive(left, box_filter, action) || self.filter_recursive(right, box_filter, action)
    }

    /// Visits the elements whose box intersects `shape`, boxes being inflated
    /// by the tree tolerance.
    ///
    /// `shape` may be an [`Aabb`], a point, a [`Ray`](crate::Ray), a
    /// [`Line`](crate::Line), a [`Segment`](crate::Segment) or, in 2D and 3D,
    /// a [`Triangle`](crate::Triangle). Returns `true` if `action` stopped the
    /// traversal.
    ///
    /// # Example
    /// ```
    /// use aabb_tree::{Aabb, AabbTree, Ray};
    ///
    /// let tree = AabbTree::new(&[
    ///     Aabb::new([0.0, 0.0], [1.0, 1.0]),
    ///     Aabb::new([0.0, 5.0], [1.0, 6.0]),
    ///     Aabb::new([4.0, 0.0], [5.0, 1.0]),
    /// ]);
    /// let mut hits = Vec::new();
    /// tree.query_intersecting(&Ray::new([-1.0, 0.5], [1.0, 0.0]), |i| {
    ///     hits.push(i);
    ///     false
    /// });
    /// hits.sort_unstable();
    /// assert_eq!(hits, vec![0, 2]);
    /// ```
    pub fn query_intersecting<S, A>(&self, shape: &S, action: A) -> bool
    where
        S: Intersects<D> + ?Sized,
        A: FnMut(usize) -> bool,
    {
        let tolerance = self.tolerance;
        self.query_with_filter(|aabb| shape.intersects_aabb(aabb, tolerance), action)
    }

    /// Appends to `results` every element whose box intersects `shape`.
    ///
    /// `results` is not cleared first.
    pub fn query_intersecting_into<S>(&self, shape: &S, results: &mut Vec<usize>)
    where
        S: Intersects<D> + ?Sized,
    {
        let _ = self.query_intersecting(shape, |index| {
            results.push(index);
            false
        });
    }

    /// Elements whose box contains `point`, in traversal order.
    ///
    /// Containment is exact: the tree tolerance does not apply.
    pub fn containing_boxes(&self, point: &Point<D>) -> Vec<usize> {
        let mut results = Vec::new();
        let _ = self.query_with_filter(
            |aabb| aabb.contains(point),
            |index| {
                results.push(index);
                false
            },
        );
        results
    }
}
