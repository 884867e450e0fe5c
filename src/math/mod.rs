/// Tolerant floating-point comparison utilities
pub mod angle;
/// Cumulative-weight random selection primitives
pub mod probability;
/// Minimal 2D vector arithmetic for boundary geometry
pub mod vec2;
