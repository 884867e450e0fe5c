//! Bounded lookahead over future placements around a splice seam
//!
//! Every merge only disturbs the sockets near its seam, so feasibility is
//! rechecked over that span alone. A placement is viable when its dry-run
//! merge succeeds and, for positive prediction depths, every socket on the
//! resulting seam still admits a follow-up placement, recursively up to
//! the requested depth.

use crate::algorithm::catalog::TileCatalog;
use crate::geometry::shape::{MergeResult, Shape};
use crate::io::configuration::SPLICE_RETEST_PADDING;

/// Boundary sockets whose feasibility a splice may have changed
///
/// Covers the sockets introduced by the splice plus one socket of slack
/// on each side of the seam, expressed against the post-merge ring.
pub fn retest_span(boundary_len: usize, growth: i32) -> Vec<usize> {
    if boundary_len == 0 {
        return Vec::new();
    }

    let len = boundary_len as i64;
    let count = (i64::from(growth) + i64::from(SPLICE_RETEST_PADDING)).clamp(0, len);
    (0..count)
        .map(|offset| (len - 1 - i64::from(growth) + offset).rem_euclid(len) as usize)
        .collect()
}

/// Whether attaching a tile here keeps the tiling alive for `depth` more
/// placements
///
/// Depth 0 accepts any geometrically valid merge. Depth `d >= 1` also
/// requires that every socket along the post-merge seam still admits a
/// follow-up placement, with `d - 1` further levels checked below it. A
/// single unfillable seam socket makes the whole placement infeasible.
pub fn placement_is_viable(
    boundary: &Shape,
    catalog: &TileCatalog,
    socket: usize,
    tile: usize,
    orientation: usize,
    depth: usize,
) -> bool {
    let Some(entry) = catalog.get(tile) else {
        return false;
    };
    let Ok((merged, result)) = boundary.merge(socket, &entry.shape, orientation) else {
        return false;
    };
    depth == 0 || seam_remains_fillable(&merged, catalog, &result, depth)
}

/// Whether every seam socket left by `result` admits some tile orientation
fn seam_remains_fillable(
    boundary: &Shape,
    catalog: &TileCatalog,
    result: &MergeResult,
    depth: usize,
) -> bool {
    'sockets: for socket in retest_span(boundary.len(), result.growth) {
        for entry in catalog.entries() {
            for orientation in 0..entry.orientations() {
                let Ok((merged, merge_result)) =
                    boundary.merge(socket, &entry.shape, orientation)
                else {
                    continue;
                };
                if depth <= 1
                    || seam_remains_fillable(&merged, catalog, &merge_result, depth - 1)
                {
                    continue 'sockets;
                }
            }
        }
        return false;
    }
    true
}
