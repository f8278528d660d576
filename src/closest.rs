//! Nearest element queries (branch and bound).

use crate::bbox::Point;
use crate::tree::{AabbTree, Cursor};

/// Best candidate found so far.
#[derive(Clone, Copy, Debug)]
struct Nearest {
    index: usize,
    distance: f64,
}

impl<const D: usize> AabbTree<D> {
    /// Finds the element closest to `query`.
    ///
    /// `eval_distance(query, element)` returns the distance from `query` to
    /// the element. It must never be smaller than the signed distance from
    /// `query` to the element's box: subtrees are pruned on that bound, so
    /// a violating evaluator yields a wrong (but well-defined) answer.
    ///
    /// Returns `(element, distance)`, or `None` when the tree is empty. On
    /// ties the first element reached wins.
    ///
    /// # Example
    /// ```
    /// use aabb_tree::{Aabb, AabbTree};
    ///
    /// let centers = [[0.0, 0.0], [10.0, 0.0], [0.0, 10.0]];
    /// let tree: AabbTree<2> = centers.iter().map(|&c| Aabb::from_point(c)).collect();
    /// let distance = |q: &[f64; 2], i: usize| {
    ///     ((q[0] - centers[i][0]).powi(2) + (q[1] - centers[i][1]).powi(2)).sqrt()
    /// };
    /// assert_eq!(tree.closest_element_box(&[9.0, 1.0], distance).map(|r| r.0), Some(1));
    /// ```
    pub fn closest_element_box<F>(&self, query: &Point<D>, mut eval_distance: F) -> Option<(usize, f64)>
    where
        F: FnMut(&Point<D>, usize) -> f64,
    {
        let mapping = &self.mapping;
        self.closest_leaf(query, |point, cursor| {
            eval_distance(point, mapping[cursor.begin])
        })
    }

    /// Finds the element whose box is closest to `query`, using the box's own
    /// signed distance (negative inside).
    pub fn closest_box(&self, query: &Point<D>) -> Option<(usize, f64)> {
        self.closest_leaf(query, |point, cursor| {
            self.node(cursor.node).signed_distance(point)
        })
    }

    fn closest_leaf<F>(&self, query: &Point<D>, mut leaf_distance: F) -> Option<(usize, f64)>
    where
        F: FnMut(&Point<D>, Cursor) -> f64,
    {
        if self.is_empty() {
            return None;
        }
        let hint = self.closest_hint(query);
        let mut best = Nearest {
            index: self.element(hint),
            distance: leaf_distance(query, hint),
        };
        self.closest_recursive(query, Cursor::root(self.len()), &mut best, &mut leaf_distance);
        Some((best.index, best.distance))
    }

    /// Greedy descent towards the child with the smaller box distance.
    fn closest_hint(&self, query: &Point<D>) -> Cursor {
        let mut cursor = Cursor::root(self.len());
        while !cursor.is_leaf() {
            let (left, right) = cursor.split();
            cursor = if self.node(left.node).signed_distance(query)
                < self.node(right.node).signed_distance(query)
            {
                left
            } else {
                right
            };
        }
        cursor
    }

    fn closest_recursive<F>(&self, query: &Point<D>, cursor: Cursor, best: &mut Nearest, leaf_distance: &mut F)
    where
        F: FnMut(&Point<D>, Cursor) -> f64,
    {
        if cursor.is_leaf() {
            let distance = leaf_distance(query, cursor);
            if distance < best.distance {
                *best = Nearest {
                    index: self.element(cursor),
                    distance,
                };
            }
            return;
        }

        let (left, right) = cursor.split();
        let left_bound = self.node(left.node).signed_distance(query);
        let right_bound = self.node(right.node).signed_distance(query);

        // Nearest child first: it has more chances to prune the other one.
        let (first, first_bound, second, second_bound) = if left_bound < right_bound {
            (left, left_bound, right, right_bound)
        } else {
            (right, right_bound, left, left_bound)
        };
        if first_bound < best.distance {
            self.closest_recursive(query, first, best, leaf_distance);
        }
        if second_bound < best.distance {
            self.closest_recursive(query, second, best, leaf_distance);
        }
    }
}
