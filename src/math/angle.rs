//! Tolerant comparison for angle sums and edge lengths
//!
//! Boundary angles accumulate drift from repeated transform composition,
//! so every geometric equality in the crate goes through an absolute
//! tolerance rather than exact float comparison.

use num_traits::Float;

/// Test whether two values agree within an absolute tolerance
pub fn nearly_equal<T: Float>(a: T, b: T, tolerance: T) -> bool {
    (a - b).abs() <= tolerance
}
