//! Feasibility state for every socket/tile/orientation combination

use crate::algorithm::catalog::TileCatalog;
use bitvec::prelude::*;

/// Per-socket feasibility rows over all tile orientations
///
/// Row `s` holds one bit per (tile, orientation) pair telling whether that
/// tile can attach at boundary socket `s` in that orientation. Columns are
/// laid out as contiguous per-tile segments since tiles may have different
/// ring sizes. The empty boundary is represented by a single all-true
/// pseudo-row: before the first placement every tile fits everywhere.
#[derive(Debug, Clone)]
pub struct SuperpositionGrid {
    rows: Vec<BitVec>,
    /// Column offsets per tile, with a final entry equal to the row width
    offsets: Vec<usize>,
    width: usize,
    boundary_len: usize,
}

impl SuperpositionGrid {
    /// Build the grid for an empty boundary over `catalog`
    pub fn from_catalog(catalog: &TileCatalog) -> Self {
        let mut offsets = Vec::with_capacity(catalog.len() + 1);
        let mut width = 0;
        for entry in catalog.entries() {
            offsets.push(width);
            width += entry.orientations();
        }
        offsets.push(width);

        Self {
            rows: vec![bitvec![1; width]],
            offsets,
            width,
            boundary_len: 0,
        }
    }

    /// Drop all state back to the empty-boundary pseudo-row
    pub fn reset(&mut self) {
        self.rows = vec![bitvec![1; self.width]];
        self.boundary_len = 0;
    }

    /// Number of boundary sockets tracked (zero before the first placement)
    pub const fn boundary_len(&self) -> usize {
        self.boundary_len
    }

    /// Bits per row
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Column of a (tile, orientation) pair, if it exists
    pub fn column(&self, tile: usize, orientation: usize) -> Option<usize> {
        let start = self.offsets.get(tile)?;
        let end = self.offsets.get(tile + 1)?;
        let column = start + orientation;
        (column < *end).then_some(column)
    }

    /// Map a column back to its (tile, orientation) pair
    pub fn entry_of(&self, column: usize) -> (usize, usize) {
        let tile = self.offsets.partition_point(|&offset| offset <= column);
        let tile = tile.saturating_sub(1);
        let start = self.offsets.get(tile).copied().unwrap_or(0);
        (tile, column - start)
    }

    /// Whether a tile orientation is still feasible at a socket
    pub fn is_feasible(&self, socket: usize, tile: usize, orientation: usize) -> bool {
        let Some(column) = self.column(tile, orientation) else {
            return false;
        };
        self.rows
            .get(socket)
            .is_some_and(|row| row.get(column).as_deref() == Some(&true))
    }

    /// Record the feasibility of a tile orientation at a socket
    pub fn set(&mut self, socket: usize, tile: usize, orientation: usize, feasible: bool) {
        let Some(column) = self.column(tile, orientation) else {
            return;
        };
        if let Some(row) = self.rows.get_mut(socket)
            && let Some(mut bit) = row.get_mut(column)
        {
            *bit = feasible;
        }
    }

    /// Surviving (tile, orientation) pairs at a socket
    pub fn feasible_entries(&self, socket: usize) -> Vec<(usize, usize)> {
        self.rows.get(socket).map_or_else(Vec::new, |row| {
            row.iter_ones().map(|column| self.entry_of(column)).collect()
        })
    }

    /// Count of surviving bits at one socket
    pub fn socket_count(&self, socket: usize) -> usize {
        self.rows.get(socket).map_or(0, |row| row.count_ones())
    }

    /// Count of surviving bits across the whole boundary
    pub fn total_count(&self) -> usize {
        self.rows.iter().map(|row| row.count_ones()).sum()
    }

    /// The single surviving (socket, tile, orientation), if exactly one
    /// bit is set in the whole grid
    pub fn sole_entry(&self) -> Option<(usize, usize, usize)> {
        if self.total_count() != 1 {
            return None;
        }
        self.rows.iter().enumerate().find_map(|(socket, row)| {
            row.iter_ones().next().map(|column| {
                let (tile, orientation) = self.entry_of(column);
                (socket, tile, orientation)
            })
        })
    }

    /// Remap rows after a splice changed the boundary ring
    ///
    /// Socket `k` of the new boundary keeps the row of the old socket it
    /// descends from; sockets introduced by the incoming tile start fully
    /// feasible and are narrowed by the retest pass that follows every
    /// commit. `index_offset` and `consumed` come from the merge result.
    pub fn reindex(&mut self, new_len: usize, index_offset: i32, consumed: usize) {
        if new_len == 0 {
            self.reset();
            return;
        }

        let kept = self.boundary_len.saturating_sub(consumed);
        let old_len = self.boundary_len.max(1) as i64;
        let mut rows = Vec::with_capacity(new_len);
        for k in 0..new_len {
            if k < kept {
                let old = (k as i64 - i64::from(index_offset)).rem_euclid(old_len) as usize;
                rows.push(
                    self.rows
                        .get(old)
                        .cloned()
                        .unwrap_or_else(|| bitvec![1; self.width]),
                );
            } else {
                rows.push(bitvec![1; self.width]);
            }
        }

        self.rows = rows;
        self.boundary_len = new_len;
    }
}

#[cfg(test)]
mod tests {
    use super::SuperpositionGrid;
    use crate::algorithm::catalog::{TileCatalog, TileEntry};
    use crate::geometry::shape::Shape;
    use crate::math::vec2::Vec2;

    fn catalog() -> TileCatalog {
        let triangle = Shape::from_polygon(
            &[
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(0.0, 1.0),
            ],
            &[0, 0, 0],
        );
        let square = Shape::from_polygon(
            &[
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(0.0, 1.0),
            ],
            &[0, 0, 0, 0],
        );
        TileCatalog::new(vec![
            TileEntry::new(triangle, 1.0),
            TileEntry::new(square, 1.0),
        ])
        .unwrap_or_else(|_| unreachable!("catalog is valid"))
    }

    #[test]
    fn test_column_layout_is_ragged() {
        let grid = SuperpositionGrid::from_catalog(&catalog());
        assert_eq!(grid.width(), 7);
        assert_eq!(grid.column(0, 2), Some(2));
        assert_eq!(grid.column(0, 3), None);
        assert_eq!(grid.column(1, 0), Some(3));
        assert_eq!(grid.entry_of(5), (1, 2));
        assert_eq!(grid.entry_of(0), (0, 0));
    }

    #[test]
    fn test_empty_boundary_is_fully_feasible() {
        let grid = SuperpositionGrid::from_catalog(&catalog());
        assert_eq!(grid.boundary_len(), 0);
        assert!(grid.is_feasible(0, 0, 0));
        assert!(grid.is_feasible(0, 1, 3));
        assert_eq!(grid.total_count(), 7);
    }

    #[test]
    fn test_reindex_shifts_kept_rows_and_resets_new_ones() {
        let mut grid = SuperpositionGrid::from_catalog(&catalog());
        // First placement: boundary grows from nothing to 4 sockets.
        grid.reindex(4, 0, 0);
        assert_eq!(grid.boundary_len(), 4);

        // Mark socket 2 as narrowed, then splice one socket away with an
        // index shift of -1 and two sockets appended.
        grid.set(2, 1, 0, false);
        grid.reindex(5, -1, 1);
        // Old socket 2 maps to new socket 1.
        assert!(!grid.is_feasible(1, 1, 0));
        assert_eq!(grid.socket_count(1), 6);
        // Appended sockets start fully feasible.
        assert_eq!(grid.socket_count(3), 7);
        assert_eq!(grid.socket_count(4), 7);
    }

    #[test]
    fn test_sole_entry() {
        let mut grid = SuperpositionGrid::from_catalog(&catalog());
        grid.reindex(3, 0, 0);
        for socket in 0..3 {
            for column in 0..7 {
                let (tile, orientation) = grid.entry_of(column);
                grid.set(socket, tile, orientation, false);
            }
        }
        assert_eq!(grid.sole_entry(), None);
        grid.set(1, 1, 2, true);
        assert_eq!(grid.sole_entry(), Some((1, 1, 2)));
    }
}
