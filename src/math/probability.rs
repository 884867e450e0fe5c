//! Cumulative-weight selection for spawn-weighted tile choice
//!
//! Factored as a pure function of the draw value so the behavior at an
//! exact cumulative boundary is testable without a random source.

/// Select an index from non-negative weights using a cumulative scan
///
/// Walks the weights accumulating a running sum and returns the first
/// index whose cumulative weight is greater than or equal to `draw`.
/// A draw exactly equal to a cumulative boundary selects that entry.
/// Falls back to the last index when `draw` exceeds the total (for
/// example from float rounding in `draw = r * total`), and to 0 for an
/// empty slice.
pub fn weighted_index(weights: &[f64], draw: f64) -> usize {
    let mut cumulative = 0.0;
    for (index, &weight) in weights.iter().enumerate() {
        cumulative += weight;
        if cumulative >= draw {
            return index;
        }
    }
    weights.len().saturating_sub(1)
}

/// Sum of all weights, used to scale a uniform draw
pub fn total_weight(weights: &[f64]) -> f64 {
    weights.iter().sum()
}
