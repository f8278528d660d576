//! Errors raised while validating input boxes.

use thiserror::Error;

/// Reasons a pair of corners cannot form a valid [`Aabb`](crate::Aabb).
#[derive(Clone, Copy, Debug, PartialEq, Error)]
#[non_exhaustive]
pub enum AabbError {
    /// A corner coordinate is NaN.
    #[error("coordinate on axis {axis} is NaN")]
    NonFinite {
        /// Offending axis.
        axis: usize,
    },
    /// The minimum corner is greater than the maximum corner on some axis.
    #[error("min {min} is greater than max {max} on axis {axis}")]
    Inverted {
        /// Offending axis.
        axis: usize,
        /// Minimum coordinate on that axis.
        min: f64,
        /// Maximum coordinate on that axis.
        max: f64,
    },
}
