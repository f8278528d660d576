//! Z-order (Morton) ordering of points.
//!
//! Points are quantized on a grid spanning their bounding box, the grid
//! coordinates are bit-interleaved into a single `u64` key and the points are
//! sorted by key. Contiguous runs of the resulting permutation are spatially
//! clustered, which is what lets the tree split by array position only.

use crate::bbox::{Aabb, Point};

/// Maximum number of bits taken from one axis.
const MAX_AXIS_BITS: usize = 32;
const KEY_BITS: usize = u64::BITS as usize;

/// Returns a permutation of `0..points.len()` following the Z-order curve.
///
/// `mapping[slot]` is the index of the point stored at `slot`. Ties keep the
/// original order, so the result is deterministic.
///
/// # Example
/// ```
/// use aabb_tree::morton_mapping;
/// let mapping = morton_mapping(&[[9.0, 9.0], [0.0, 0.0], [9.0, 0.0], [0.0, 9.0]]);
/// assert_eq!(mapping, vec![1, 3, 2, 0]);
/// ```
pub fn morton_mapping<const D: usize>(points: &[Point<D>]) -> Vec<usize> {
    let mut mapping: Vec<usize> = (0..points.len()).collect();
    if points.len() <= 1 || D == 0 {
        return mapping;
    }

    let bounds = Aabb::from_points(points.iter().copied());
    let grid = Grid::new(&bounds);
    let keys: Vec<u64> = points.iter().map(|p| grid.key(p)).collect();

    mapping.sort_unstable_by_key(|&index| (keys[index], index));
    mapping
}

/// Quantization grid over the points' bounding box.
struct Grid<const D: usize> {
    origin: Point<D>,
    scale: Point<D>,
    axes: usize,
    bits: usize,
    max_cell: f64,
}

impl<const D: usize> Grid<D> {
    fn new(bounds: &Aabb<D>) -> Self {
        // Past 64 axes there is less than one key bit per axis.
        let axes = D.min(KEY_BITS);
        let bits = (KEY_BITS / axes).min(MAX_AXIS_BITS);
        let max_cell = ((1_u64 << bits) - 1) as f64;
        let extent = bounds.diagonal();
        let scale = extent.map(|length| {
            if length > 0.0 && length.is_finite() {
                max_cell / length
            } else {
                0.0
            }
        });
        Self {
            origin: *bounds.min(),
            scale,
            axes,
            bits,
            max_cell,
        }
    }

    #[expect(clippy::cast_possible_truncation, reason = "clamped to the grid")]
    fn cell(&self, point: &Point<D>, axis: usize) -> u64 {
        let scaled = (point[axis] - self.origin[axis]) * self.scale[axis];
        if scaled.is_nan() {
            return 0;
        }
        scaled.clamp(0.0, self.max_cell) as u64
    }

    fn key(&self, point: &Point<D>) -> u64 {
        let mut cells = [0_u64; KEY_BITS];
        for (axis, cell) in cells.iter_mut().take(self.axes).enumerate() {
            *cell = self.cell(point, axis);
        }
        let mut key = 0_u64;
        for bit in (0..self.bits).rev() {
            for cell in &cells[..self.axes] {
                key = (key << 1) | ((cell >> bit) & 1);
            }
        }
        key
    }
}
