//! Axis-aligned bounding box in `D` dimensions.
//!
//! Boxes are closed: a point on the boundary is contained and two boxes that
//! share a face (or only a corner) intersect.

use crate::error::AabbError;

/// A point in `D` dimensions.
pub type Point<const D: usize> = [f64; D];

/// Axis-aligned bounding box defined by its min and max corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb<const D: usize> {
    min: Point<D>,
    max: Point<D>,
}

impl<const D: usize> Aabb<D> {
    /// Creates a box from its corners.
    ///
    /// The corners are expected to be ordered (`min[i] <= max[i]`) and free of
    /// NaN. Use [`Aabb::try_new`] for unchecked input.
    ///
    /// # Example
    /// ```
    /// use aabb_tree::Aabb;
    /// let b = Aabb::new([0.0, 0.0], [2.0, 1.0]);
    /// assert_eq!(b.center(), [1.0, 0.5]);
    /// ```
    #[inline]
    pub fn new(min: Point<D>, max: Point<D>) -> Self {
        debug_assert!(
            Self::try_new(min, max).is_ok(),
            "malformed box corners {min:?} {max:?}"
        );
        Self { min, max }
    }

    /// Creates a box from its corners, validating them.
    ///
    /// # Errors
    /// Returns [`AabbError::NonFinite`] when a coordinate is NaN and
    /// [`AabbError::Inverted`] when `min[i] > max[i]` on some axis.
    pub fn try_new(min: Point<D>, max: Point<D>) -> Result<Self, AabbError> {
        for axis in 0..D {
            if min[axis].is_nan() || max[axis].is_nan() {
                return Err(AabbError::NonFinite { axis });
            }
            if min[axis] > max[axis] {
                return Err(AabbError::Inverted {
                    axis,
                    min: min[axis],
                    max: max[axis],
                });
            }
        }
        Ok(Self { min, max })
    }

    /// Degenerate box reduced to a single point.
    #[inline]
    pub fn from_point(point: Point<D>) -> Self {
        Self::new(point, point)
    }

    /// The inverted box: identity element of [`Aabb::union`].
    #[inline]
    pub const fn empty() -> Self {
        Self {
            min: [f64::INFINITY; D],
            max: [f64::NEG_INFINITY; D],
        }
    }

    /// Smallest box enclosing all the given points.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Point<D>>,
    {
        let mut result = Self::empty();
        for point in points {
            result.add_point(&point);
        }
        result
    }

    /// Minimum corner.
    #[inline]
    pub fn min(&self) -> &Point<D> {
        &self.min
    }

    /// Maximum corner.
    #[inline]
    pub fn max(&self) -> &Point<D> {
        &self.max
    }

    /// Whether the box is inverted on some axis (contains nothing).
    #[inline]
    pub fn is_empty(&self) -> bool {
        (0..D).any(|axis| self.max[axis] < self.min[axis])
    }

    /// Box center.
    #[inline]
    pub fn center(&self) -> Point<D> {
        core::array::from_fn(|axis| (self.min[axis] + self.max[axis]) * 0.5)
    }

    /// Vector from the min corner to the max corner.
    #[inline]
    pub fn diagonal(&self) -> Point<D> {
        core::array::from_fn(|axis| self.max[axis] - self.min[axis])
    }

    /// Grows the box to enclose `point`.
    #[inline]
    pub fn add_point(&mut self, point: &Point<D>) {
        for ((low, high), &value) in self.min.iter_mut().zip(self.max.iter_mut()).zip(point) {
            *low = low.min(value);
            *high = high.max(value);
        }
    }

    /// Grows the box to enclose `other`.
    #[inline]
    pub fn add_box(&mut self, other: &Self) {
        self.add_point(&other.min);
        self.add_point(&other.max);
    }

    /// Smallest box enclosing both boxes.
    #[inline]
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut result = *self;
        result.add_box(other);
        result
    }

    /// Box inflated by `length` on every side.
    #[inline]
    #[must_use]
    pub fn extended(&self, length: f64) -> Self {
        Self {
            min: core::array::from_fn(|axis| self.min[axis] - length),
            max: core::array::from_fn(|axis| self.max[axis] + length),
        }
    }

    /// Whether `point` lies inside the box or on its boundary.
    #[inline]
    pub fn contains(&self, point: &Point<D>) -> bool {
        (0..D).all(|axis| self.min[axis] <= point[axis] && point[axis] <= self.max[axis])
    }

    /// Whether `other` lies entirely inside this box.
    #[inline]
    pub fn contains_box(&self, other: &Self) -> bool {
        self.contains(&other.min) && self.contains(&other.max)
    }

    /// Whether the two closed boxes overlap.
    ///
    /// # Example
    /// ```
    /// use aabb_tree::Aabb;
    /// let a = Aabb::new([0.0, 0.0], [1.0, 1.0]);
    /// let b = Aabb::new([1.0, 0.0], [2.0, 1.0]);
    /// assert!(a.intersects(&b)); // shared edge
    /// ```
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.intersects_with_tolerance(other, 0.0)
    }

    /// Whether the gap between the two boxes is at most `tolerance` on every
    /// axis.
    ///
    /// The test only looks at the gaps, so it gives the same answer when the
    /// boxes are swapped.
    #[inline]
    pub fn intersects_with_tolerance(&self, other: &Self, tolerance: f64) -> bool {
        (0..D).all(|axis| {
            other.min[axis] - self.max[axis] <= tolerance && self.min[axis] - other.max[axis] <= tolerance
        })
    }

    /// Distance from `point` to the box, negative when the point is inside.
    ///
    /// Outside the box this is the Euclidean distance to the closest box point.
    /// Inside it is minus the distance to the closest face.
    ///
    /// # Example
    /// ```
    /// use aabb_tree::Aabb;
    /// let b = Aabb::new([0.0, 0.0], [4.0, 4.0]);
    /// assert_eq!(b.signed_distance(&[7.0, 8.0]), 5.0);
    /// assert_eq!(b.signed_distance(&[1.0, 2.0]), -1.0);
    /// ```
    pub fn signed_distance(&self, point: &Point<D>) -> f64 {
        let mut inside = true;
        let mut squared = 0.0;
        for ((&value, &low), &high) in point.iter().zip(&self.min).zip(&self.max) {
            let delta = if value < low {
                value - low
            } else if value > high {
                value - high
            } else {
                continue;
            };
            inside = false;
            squared += delta * delta;
        }
        if inside {
            -self.inner_distance(point)
        } else {
            squared.sqrt()
        }
    }

    /// Distance from an inner point to the closest face.
    fn inner_distance(&self, point: &Point<D>) -> f64 {
        (0..D)
            .map(|axis| (point[axis] - self.min[axis]).min(self.max[axis] - point[axis]))
            .fold(f64::INFINITY, f64::min)
    }
}

impl<const D: usize> Default for Aabb<D> {
    fn default() -> Self {
        Self::empty()
    }
}
