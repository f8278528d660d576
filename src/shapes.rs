//! Query shapes and their box filters.
//!
//! A range query descends the tree and prunes every subtree whose box fails
//! the shape's [`Intersects::intersects_aabb`] test. Rays, lines and segments
//! work in any dimension (slab clipping). Triangles are supported in 2D and 3D
//! (separating axis theorem).

use crate::bbox::{Aabb, Point};

/// Box filter used by range queries.
pub trait Intersects<const D: usize> {
    /// Whether the shape touches `aabb` once the box is inflated by `tolerance`
    /// on every side.
    fn intersects_aabb(&self, aabb: &Aabb<D>, tolerance: f64) -> bool;
}

impl<const D: usize> Intersects<D> for Aabb<D> {
    #[inline]
    fn intersects_aabb(&self, aabb: &Self, tolerance: f64) -> bool {
        aabb.intersects_with_tolerance(self, tolerance)
    }
}

impl<const D: usize> Intersects<D> for Point<D> {
    #[inline]
    fn intersects_aabb(&self, aabb: &Aabb<D>, tolerance: f64) -> bool {
        aabb.extended(tolerance).contains(self)
    }
}

/// Half-line starting at `origin` and going along `direction`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray<const D: usize> {
    /// Start point.
    pub origin: Point<D>,
    /// Direction, not necessarily normalized.
    pub direction: Point<D>,
}

impl<const D: usize> Ray<D> {
    /// Creates a ray.
    pub const fn new(origin: Point<D>, direction: Point<D>) -> Self {
        Self { origin, direction }
    }
}

/// Infinite line through `origin` along `direction`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line<const D: usize> {
    /// A point on the line.
    pub origin: Point<D>,
    /// Direction, not necessarily normalized.
    pub direction: Point<D>,
}

impl<const D: usize> Line<D> {
    /// Creates a line.
    pub const fn new(origin: Point<D>, direction: Point<D>) -> Self {
        Self { origin, direction }
    }
}

/// Segment between two points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment<const D: usize> {
    /// First endpoint.
    pub start: Point<D>,
    /// Second endpoint.
    pub end: Point<D>,
}

impl<const D: usize> Segment<D> {
    /// Creates a segment.
    pub const fn new(start: Point<D>, end: Point<D>) -> Self {
        Self { start, end }
    }
}

/// Triangle given by its three vertices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle<const D: usize> {
    /// Vertices.
    pub vertices: [Point<D>; 3],
}

impl<const D: usize> Triangle<D> {
    /// Creates a triangle.
    pub const fn new(a: Point<D>, b: Point<D>, c: Point<D>) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Bounding box of the three vertices.
    pub fn bounding_box(&self) -> Aabb<D> {
        Aabb::from_points(self.vertices)
    }
}

impl<const D: usize> Intersects<D> for Ray<D> {
    fn intersects_aabb(&self, aabb: &Aabb<D>, tolerance: f64) -> bool {
        clip_slabs(
            &self.origin,
            &self.direction,
            &aabb.extended(tolerance),
            0.0,
            f64::INFINITY,
        )
    }
}

impl<const D: usize> Intersects<D> for Line<D> {
    fn intersects_aabb(&self, aabb: &Aabb<D>, tolerance: f64) -> bool {
        clip_slabs(
            &self.origin,
            &self.direction,
            &aabb.extended(tolerance),
            f64::NEG_INFINITY,
            f64::INFINITY,
        )
    }
}

impl<const D: usize> Intersects<D> for Segment<D> {
    fn intersects_aabb(&self, aabb: &Aabb<D>, tolerance: f64) -> bool {
        let direction = sub(&self.end, &self.start);
        clip_slabs(&self.start, &direction, &aabb.extended(tolerance), 0.0, 1.0)
    }
}

impl Intersects<2> for Triangle<2> {
    fn intersects_aabb(&self, aabb: &Aabb<2>, tolerance: f64) -> bool {
        let aabb = aabb.extended(tolerance);
        if !self.bounding_box().intersects(&aabb) {
            return false;
        }
        let center = aabb.center();
        let half = half_extents(&aabb);
        let v = self.vertices.map(|p| sub(&p, &center));
        for i in 0..3 {
            let edge = sub(&v[(i + 1) % 3], &v[i]);
            let axis = [-edge[1], edge[0]];
            if separated(&v, &axis, &half) {
                return false;
            }
        }
        true
    }
}

impl Intersects<3> for Triangle<3> {
    fn intersects_aabb(&self, aabb: &Aabb<3>, tolerance: f64) -> bool {
        let aabb = aabb.extended(tolerance);
        // Box face normals.
        if !self.bounding_box().intersects(&aabb) {
            return false;
        }
        let center = aabb.center();
        let half = half_extents(&aabb);
        let v = self.vertices.map(|p| sub(&p, &center));
        let edges = [sub(&v[1], &v[0]), sub(&v[2], &v[1]), sub(&v[0], &v[2])];

        // Cross products of box axes with triangle edges.
        for edge in &edges {
            for unit in 0..3 {
                let mut basis = [0.0; 3];
                basis[unit] = 1.0;
                if separated(&v, &cross(&basis, edge), &half) {
                    return false;
                }
            }
        }

        // Triangle plane.
        let normal = cross(&edges[0], &edges[1]);
        let offset = dot(&normal, &v[0]);
        let radius: f64 = (0..3).map(|axis| half[axis] * normal[axis].abs()).sum();
        offset.abs() <= radius
    }
}

/// Clips the parametric line `origin + t * direction`, `t` in
/// `[t_min, t_max]`, against every slab of `aabb`.
fn clip_slabs<const D: usize>(
    origin: &Point<D>,
    direction: &Point<D>,
    aabb: &Aabb<D>,
    mut t_min: f64,
    mut t_max: f64,
) -> bool {
    for axis in 0..D {
        let (low, high) = (aabb.min()[axis], aabb.max()[axis]);
        let start = origin[axis];
        let step = direction[axis];
        if step == 0.0 {
            if start < low || start > high {
                return false;
            }
            continue;
        }
        let inverse = 1.0 / step;
        let mut t_low = (low - start) * inverse;
        let mut t_high = (high - start) * inverse;
        if t_low > t_high {
            core::mem::swap(&mut t_low, &mut t_high);
        }
        t_min = t_min.max(t_low);
        t_max = t_max.min(t_high);
        if t_min > t_max {
            return false;
        }
    }
    true
}

/// Separating axis test for vertices already expressed relative to the box
/// center.
fn separated<const D: usize>(vertices: &[Point<D>; 3], axis: &Point<D>, half: &Point<D>) -> bool {
    let projections: [f64; 3] = core::array::from_fn(|i| dot(&vertices[i], axis));
    let low = projections.iter().copied().fold(f64::INFINITY, f64::min);
    let high = projections.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let radius: f64 = (0..D).map(|i| half[i] * axis[i].abs()).sum();
    low > radius || high < -radius
}

fn half_extents<const D: usize>(aabb: &Aabb<D>) -> Point<D> {
    aabb.diagonal().map(|length| length * 0.5)
}

#[inline]
fn sub<const D: usize>(a: &Point<D>, b: &Point<D>) -> Point<D> {
    core::array::from_fn(|i| a[i] - b[i])
}

#[inline]
fn dot<const D: usize>(a: &Point<D>, b: &Point<D>) -> f64 {
    (0..D).map(|i| a[i] * b[i]).sum()
}

#[inline]
fn cross(a: &Point<3>, b: &Point<3>) -> Point<3> {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}
