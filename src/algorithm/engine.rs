//! The collapse session: commits placements and keeps feasibility current
//!
//! A session owns the assembled boundary, the superposition grid over it,
//! and the log of committed placements. Every commit reindexes the grid to
//! the new ring, reprobes the sockets around the splice seam with the
//! configured prediction depth, and then drains any forced collapses: as
//! long as exactly one feasible bit survives in the whole grid, that
//! placement is committed automatically.

use crate::algorithm::catalog::TileCatalog;
use crate::algorithm::lookahead::{placement_is_viable, retest_span};
use crate::algorithm::strategy::{PlacementStrategy, Selection};
use crate::algorithm::superposition::SuperpositionGrid;
use crate::geometry::shape::{MergeResult, Shape};
use crate::geometry::transform::Isometry;
use crate::io::error::{Result, TilingError, invalid_parameter};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// One committed tile: which catalog entry, placed where
#[derive(Debug, Clone, Copy)]
pub struct Placement {
    /// Index of the tile in the catalog
    pub tile_index: usize,
    /// Maps the tile's local vertices into the tiling plane
    pub transform: Isometry,
}

/// Result of one explicit collapse attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollapseOutcome {
    /// The placement merged and is now part of the tiling
    Committed,
    /// The placement is infeasible here; its grid bit has been cleared
    Rejected,
}

/// Result of one strategy-driven step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// More placements remain; call again
    Continued,
    /// The strategy's goal is met
    Complete,
}

/// A running tiling assembly
#[derive(Debug, Clone)]
pub struct Session {
    catalog: TileCatalog,
    boundary: Shape,
    grid: SuperpositionGrid,
    rng: StdRng,
    placements: Vec<Placement>,
    prediction_depth: usize,
    step: usize,
}

impl Session {
    /// Start an empty session over a catalog
    pub fn new(catalog: TileCatalog, seed: u64, prediction_depth: usize) -> Self {
        let grid = SuperpositionGrid::from_catalog(&catalog);
        Self {
            catalog,
            boundary: Shape::empty(),
            grid,
            rng: StdRng::seed_from_u64(seed),
            placements: Vec::new(),
            prediction_depth,
            step: 0,
        }
    }

    /// The assembled boundary ring
    pub const fn boundary(&self) -> &Shape {
        &self.boundary
    }

    /// Feasibility state over the boundary
    pub const fn grid(&self) -> &SuperpositionGrid {
        &self.grid
    }

    /// The catalog this session places from
    pub const fn catalog(&self) -> &TileCatalog {
        &self.catalog
    }

    /// Committed placements in commit order
    pub const fn placements(&self) -> &[Placement] {
        self.placements.as_slice()
    }

    /// Number of committed placements
    pub const fn step(&self) -> usize {
        self.step
    }

    /// Discard the assembly and start over with the same catalog and rng
    pub fn reset_boundary(&mut self) {
        self.boundary = Shape::empty();
        self.grid.reset();
        self.placements.clear();
        self.step = 0;
    }

    /// Swap in a new catalog, discarding the current assembly
    pub fn refresh_catalog(&mut self, catalog: TileCatalog) {
        self.grid = SuperpositionGrid::from_catalog(&catalog);
        self.catalog = catalog;
        self.boundary = Shape::empty();
        self.placements.clear();
        self.step = 0;
    }

    /// Attempt to place a tile at a specific boundary socket
    ///
    /// A geometrically impossible placement clears its feasibility bit and
    /// reports [`CollapseOutcome::Rejected`]; a committed one updates the
    /// boundary, reprobes the seam, and drains any forced collapses it
    /// triggers.
    ///
    /// # Errors
    ///
    /// Returns [`TilingError::InvalidTileIndex`] for a tile outside the
    /// catalog and [`TilingError::InvalidParameter`] for a socket outside
    /// a non-empty boundary.
    pub fn collapse_at(
        &mut self,
        socket: usize,
        tile: usize,
        orientation: usize,
    ) -> Result<CollapseOutcome> {
        if tile >= self.catalog.len() {
            return Err(TilingError::InvalidTileIndex {
                index: tile,
                catalog_size: self.catalog.len(),
            });
        }
        if !self.boundary.is_empty() && socket >= self.boundary.len() {
            return Err(invalid_parameter(
                "socket",
                &socket,
                &format!("boundary has {} sockets", self.boundary.len()),
            ));
        }

        let outcome = self.try_commit(socket, tile, orientation);
        if outcome == CollapseOutcome::Committed {
            self.drain_forced();
        }
        Ok(outcome)
    }

    /// Let a placement strategy pick and commit the next placement
    ///
    /// # Errors
    ///
    /// Returns [`TilingError::DeadTiling`] when the strategy wants to keep
    /// placing but its chosen socket has no feasible candidates left.
    pub fn step_collapse(&mut self, strategy: &PlacementStrategy) -> Result<StepOutcome> {
        match strategy.select_next(&self.boundary, &self.grid, &self.catalog, &mut self.rng) {
            Selection::Complete => Ok(StepOutcome::Complete),
            Selection::Exhausted => Err(TilingError::DeadTiling {
                step: self.step,
                boundary_sockets: self.boundary.len(),
            }),
            Selection::Collapse {
                socket,
                tile,
                orientation,
                more,
            } => {
                self.collapse_at(socket, tile, orientation)?;
                if more {
                    Ok(StepOutcome::Continued)
                } else {
                    Ok(StepOutcome::Complete)
                }
            }
        }
    }

    /// Merge one tile into the boundary, or clear its bit on rejection
    fn try_commit(&mut self, socket: usize, tile: usize, orientation: usize) -> CollapseOutcome {
        let row = if self.boundary.is_empty() { 0 } else { socket };
        if !self.grid.is_feasible(row, tile, orientation) {
            return CollapseOutcome::Rejected;
        }

        let Some(entry) = self.catalog.get(tile) else {
            return CollapseOutcome::Rejected;
        };
        match self.boundary.merge(socket, &entry.shape, orientation) {
            Ok((merged, result)) => {
                self.boundary = merged;
                self.placements.push(Placement {
                    tile_index: tile,
                    transform: result.transform,
                });
                self.step += 1;
                self.grid
                    .reindex(self.boundary.len(), result.index_offset, result.consumed);
                self.reprobe_seam(&result);
                CollapseOutcome::Committed
            }
            Err(_) => {
                self.grid.set(row, tile, orientation, false);
                CollapseOutcome::Rejected
            }
        }
    }

    /// Recompute feasibility over the sockets a splice may have changed
    fn reprobe_seam(&mut self, result: &MergeResult) {
        for socket in retest_span(self.boundary.len(), result.growth) {
            for tile in 0..self.catalog.len() {
                let orientations = self.catalog.get(tile).map_or(0, |e| e.orientations());
                for orientation in 0..orientations {
                    let viable = placement_is_viable(
                        &self.boundary,
                        &self.catalog,
                        socket,
                        tile,
                        orientation,
                        self.prediction_depth,
                    );
                    self.grid.set(socket, tile, orientation, viable);
                }
            }
        }
    }

    /// Commit placements while exactly one feasible bit remains anywhere
    fn drain_forced(&mut self) {
        while let Some((socket, tile, orientation)) = self.grid.sole_entry() {
            if self.try_commit(socket, tile, orientation) == CollapseOutcome::Rejected {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CollapseOutcome, Session};
    use crate::algorithm::catalog::{TileCatalog, TileEntry};
    use crate::geometry::shape::Shape;
    use crate::io::error::TilingError;
    use crate::math::vec2::Vec2;

    fn square(connection: i32) -> Shape {
        Shape::from_polygon(
            &[
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(0.0, 1.0),
            ],
            &[connection; 4],
        )
    }

    fn session(tiles: Vec<TileEntry>) -> Session {
        let catalog =
            TileCatalog::new(tiles).unwrap_or_else(|_| unreachable!("catalog is valid"));
        Session::new(catalog, 42, 1)
    }

    #[test]
    fn test_seed_placement_on_empty_boundary() {
        let mut session = session(vec![TileEntry::new(square(0), 1.0)]);
        let outcome = session.collapse_at(0, 0, 0);
        assert!(matches!(outcome, Ok(CollapseOutcome::Committed)));
        assert_eq!(session.boundary().len(), 4);
        assert_eq!(session.placements().len(), 1);
        assert_eq!(session.grid().boundary_len(), 4);
        assert_eq!(session.step(), 1);
    }

    #[test]
    fn test_unknown_tile_is_an_error() {
        let mut session = session(vec![TileEntry::new(square(0), 1.0)]);
        assert!(matches!(
            session.collapse_at(0, 3, 0),
            Err(TilingError::InvalidTileIndex { index: 3, .. })
        ));
    }

    #[test]
    fn test_out_of_range_socket_is_an_error() {
        let mut session = session(vec![TileEntry::new(square(0), 1.0)]);
        let seeded = session.collapse_at(0, 0, 0);
        assert!(seeded.is_ok());
        assert!(matches!(
            session.collapse_at(9, 0, 0),
            Err(TilingError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_incompatible_tile_is_rejected_not_an_error() {
        // Tile 1 uses a connection class nothing else carries, so after
        // the seed placement every bit for it has been probed to false.
        let mut session = session(vec![
            TileEntry::new(square(0), 1.0),
            TileEntry::new(square(7), 1.0),
        ]);
        let seeded = session.collapse_at(0, 0, 0);
        assert!(seeded.is_ok());
        let outcome = session.collapse_at(0, 1, 0);
        assert!(matches!(outcome, Ok(CollapseOutcome::Rejected)));
        assert!(!session.grid().is_feasible(0, 1, 0));
        assert_eq!(session.placements().len(), 1);
    }

    #[test]
    fn test_second_square_extends_the_ring() {
        let mut session = session(vec![TileEntry::new(square(0), 1.0)]);
        let seeded = session.collapse_at(0, 0, 0);
        assert!(seeded.is_ok());
        let outcome = session.collapse_at(0, 0, 0);
        assert!(matches!(outcome, Ok(CollapseOutcome::Committed)));
        assert_eq!(session.boundary().len(), 6);
        assert_eq!(session.grid().boundary_len(), 6);
    }

    #[test]
    fn test_forced_cascade_commits_the_sole_survivor() {
        // One open edge and three sealed ones: after the seed commits, the
        // seam retest leaves exactly one feasible bit in the whole grid
        // (the open edge meeting its twin), so the cascade must commit it
        // unprompted. Depth 0 keeps feasibility purely geometric here.
        let tile = Shape::from_polygon(
            &[
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(0.0, 1.0),
            ],
            &[0, -1, -1, -1],
        );
        let catalog = TileCatalog::new(vec![TileEntry::new(tile, 1.0)])
            .unwrap_or_else(|_| unreachable!("catalog is valid"));
        let mut session = Session::new(catalog, 42, 0);

        let outcome = session.collapse_at(0, 0, 0);
        assert!(matches!(outcome, Ok(CollapseOutcome::Committed)));
        // The seed and the forced follow-up both committed.
        assert_eq!(session.placements().len(), 2);
        assert_eq!(session.step(), 2);
        assert_eq!(session.boundary().len(), 6);
        // The merged ring is sealed all around, so the cascade terminated
        // with nothing feasible anywhere.
        assert_eq!(session.grid().total_count(), 0);
    }

    #[test]
    fn test_reset_boundary_clears_assembly() {
        let mut session = session(vec![TileEntry::new(square(0), 1.0)]);
        let seeded = session.collapse_at(0, 0, 0);
        assert!(seeded.is_ok());
        session.reset_boundary();
        assert!(session.boundary().is_empty());
        assert_eq!(session.placements().len(), 0);
        assert_eq!(session.grid().boundary_len(), 0);
        assert_eq!(session.step(), 0);
    }
}
