/// Validated tile sets and selection weights
pub mod catalog;
/// The collapse session committing placements
pub mod engine;
/// Seam reprobing and bounded placement prediction
pub mod lookahead;
/// Socket selection policies
pub mod strategy;
/// Per-socket feasibility bit rows
pub mod superposition;
