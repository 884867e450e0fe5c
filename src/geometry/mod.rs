/// Boundary edge sockets and the four-way compatibility test
pub mod socket;
/// Cyclic boundary shapes and the merge/splice algorithm
pub mod shape;
/// 2D rotations and rigid placement transforms
pub mod transform;
