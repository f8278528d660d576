//! Incremental collection of boxes before building an [`AabbTree`].

use crate::bbox::{Aabb, Point};
use crate::error::AabbError;
use crate::tree::{AabbTree, DEFAULT_TOLERANCE, sanitize_tolerance};

/// Collects boxes and builds an [`AabbTree`] in one go.
///
/// Boxes are numbered in insertion order; that number is the element index
/// reported by the tree's queries.
///
/// # Example
/// ```
/// use aabb_tree::AabbTreeBuilder;
///
/// let mut builder = AabbTreeBuilder::with_capacity(2).with_tolerance(0.01);
/// builder.try_add([0.0, 0.0], [1.0, 1.0])?;
/// builder.add_point([3.0, 3.0]);
/// let tree = builder.build();
/// assert_eq!(tree.len(), 2);
/// # Ok::<(), aabb_tree::AabbError>(())
/// ```
#[derive(Clone, Debug)]
pub struct AabbTreeBuilder<const D: usize> {
    boxes: Vec<Aabb<D>>,
    tolerance: f64,
}

impl<const D: usize> AabbTreeBuilder<D> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty builder with room for `capacity` boxes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            boxes: Vec::with_capacity(capacity),
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Sets the tolerance the built tree uses in its box tests.
    ///
    /// NaN, infinite or negative values are replaced by 0.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = sanitize_tolerance(tolerance);
        self
    }

    /// Adds a box and returns its element index.
    pub fn add(&mut self, aabb: Aabb<D>) -> usize {
        self.boxes.push(aabb);
        self.boxes.len() - 1
    }

    /// Validates the corners, adds the box and returns its element index.
    ///
    /// # Errors
    /// Propagates [`Aabb::try_new`] failures; nothing is added in that case.
    pub fn try_add(&mut self, min: Point<D>, max: Point<D>) -> Result<usize, AabbError> {
        let aabb = Aabb::try_new(min, max)?;
        Ok(self.add(aabb))
    }

    /// Adds a degenerate box reduced to `point`.
    pub fn add_point(&mut self, point: Point<D>) -> usize {
        self.add(Aabb::from_point(point))
    }

    /// Number of boxes added so far.
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Whether no box was added.
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Boxes added so far, in element order.
    pub fn boxes(&self) -> &[Aabb<D>] {
        &self.boxes
    }

    /// Builds the tree.
    pub fn build(self) -> AabbTree<D> {
        AabbTree::new_with_tolerance(&self.boxes, self.tolerance)
    }
}

impl<const D: usize> Default for AabbTreeBuilder<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const D: usize> Extend<Aabb<D>> for AabbTreeBuilder<D> {
    fn extend<I: IntoIterator<Item = Aabb<D>>>(&mut self, iter: I) {
        self.boxes.extend(iter);
    }
}
