//! Wave function collapse-inspired assembly of seamless 2D tilings from polygonal tiles
//!
//! Tiles attach edge to edge along the outer boundary of the assembly. Each
//! boundary edge carries a socket describing its connection class, length,
//! and claimed corner angles; a superposition grid tracks which tile
//! orientations remain feasible at every socket, and placement strategies
//! collapse those superpositions until a target region is covered.

#![forbid(unsafe_code)]

/// Superposition tracking, placement strategies, and the collapse engine
pub mod algorithm;
/// Boundary shapes, sockets, and the merge/splice algorithm
pub mod geometry;
/// Input/output operations, configuration, and error handling
pub mod io;
/// Mathematical utilities for vectors and weighted selection
pub mod math;

pub use io::error::{Result, TilingError};
