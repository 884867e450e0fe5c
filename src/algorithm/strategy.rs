//! Placement strategies: which socket collapses next, with which tile
//!
//! Strategies only read state. They pick the next socket from the current
//! boundary, choose among its surviving tile orientations (weighted by
//! catalog weight, uniform over a tile's orientations), and report whether
//! their goal region still needs more placements. The session commits the
//! choice.

use crate::algorithm::catalog::TileCatalog;
use crate::algorithm::superposition::SuperpositionGrid;
use crate::geometry::shape::Shape;
use crate::math::probability::{total_weight, weighted_index};
use crate::math::vec2::Vec2;
use rand::Rng;

/// Policy for choosing the next placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlacementStrategy {
    /// Place one tile of a fixed kind at the socket nearest a target point
    PointNearest {
        /// Point the placement should approach
        target: Vec2,
        /// Catalog index of the tile to place
        tile_index: usize,
    },
    /// Fill a disc: repeatedly collapse the socket nearest the center
    /// until every boundary midpoint lies outside the radius
    AreaCircular {
        /// Center of the disc
        center: Vec2,
        /// Radius of the disc
        radius: f64,
    },
    /// Fill an axis-aligned box around the origin, sweeping left to right
    /// over the sockets whose midpoints lie inside it
    AreaRectangular {
        /// Half-size of the box along each axis
        extent: Vec2,
    },
}

/// What a strategy wants to happen next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Collapse this superposition entry
    Collapse {
        /// Boundary socket to attach at
        socket: usize,
        /// Catalog index of the tile
        tile: usize,
        /// Attachment orientation of the tile
        orientation: usize,
        /// Whether the strategy's goal needs further placements after this
        more: bool,
    },
    /// The chosen socket has no feasible candidates; the tiling is dead
    Exhausted,
    /// The goal region is covered
    Complete,
}

impl PlacementStrategy {
    /// Pick the next placement for the current boundary
    pub fn select_next<R: Rng>(
        &self,
        boundary: &Shape,
        grid: &SuperpositionGrid,
        catalog: &TileCatalog,
        rng: &mut R,
    ) -> Selection {
        if boundary.is_empty() {
            return self.seed(catalog);
        }

        match *self {
            Self::PointNearest { target, tile_index } => {
                let Some((socket, _)) = nearest_socket(boundary, target) else {
                    return Selection::Complete;
                };
                let tile = tile_index.min(catalog.len().saturating_sub(1));
                let orientations: Vec<usize> = grid
                    .feasible_entries(socket)
                    .into_iter()
                    .filter(|&(candidate, _)| candidate == tile)
                    .map(|(_, orientation)| orientation)
                    .collect();
                match pick_uniform(&orientations, rng) {
                    Some(orientation) => Selection::Collapse {
                        socket,
                        tile,
                        orientation,
                        more: false,
                    },
                    None => Selection::Exhausted,
                }
            }
            Self::AreaCircular { center, radius } => {
                let Some((socket, distance_squared)) = nearest_socket(boundary, center) else {
                    return Selection::Complete;
                };
                if distance_squared >= radius * radius {
                    return Selection::Complete;
                }
                match weighted_pick(grid, catalog, socket, rng) {
                    Some((tile, orientation)) => Selection::Collapse {
                        socket,
                        tile,
                        orientation,
                        more: true,
                    },
                    None => Selection::Exhausted,
                }
            }
            Self::AreaRectangular { extent } => {
                let Some(socket) = leftmost_socket_within(boundary, extent) else {
                    return Selection::Complete;
                };
                match weighted_pick(grid, catalog, socket, rng) {
                    Some((tile, orientation)) => Selection::Collapse {
                        socket,
                        tile,
                        orientation,
                        more: true,
                    },
                    None => Selection::Exhausted,
                }
            }
        }
    }

    /// First placement on an empty boundary
    fn seed(&self, catalog: &TileCatalog) -> Selection {
        let tile = match *self {
            Self::PointNearest { tile_index, .. } => {
                tile_index.min(catalog.len().saturating_sub(1))
            }
            Self::AreaCircular { .. } | Self::AreaRectangular { .. } => 0,
        };
        Selection::Collapse {
            socket: 0,
            tile,
            orientation: 0,
            more: true,
        }
    }
}

/// Socket whose midpoint is closest to `target`; ties keep the lowest index
fn nearest_socket(boundary: &Shape, target: Vec2) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for index in 0..boundary.len() {
        let distance_squared = boundary.socket_midpoint(index).distance_squared(target);
        if best.is_none_or(|(_, closest)| distance_squared < closest) {
            best = Some((index, distance_squared));
        }
    }
    best
}

/// Socket with the least absolute midpoint x among those inside the box;
/// ties keep the lowest index
fn leftmost_socket_within(boundary: &Shape, extent: Vec2) -> Option<usize> {
    let bounds = extent.abs();
    let mut best: Option<(usize, f64)> = None;
    for index in 0..boundary.len() {
        let midpoint = boundary.socket_midpoint(index).abs();
        if midpoint.x < bounds.x
            && midpoint.y < bounds.y
            && best.is_none_or(|(_, least)| midpoint.x < least)
        {
            best = Some((index, midpoint.x));
        }
    }
    best.map(|(index, _)| index)
}

/// Weighted tile pick over the socket's surviving candidates, then a
/// uniform orientation among that tile's surviving orientations
fn weighted_pick<R: Rng>(
    grid: &SuperpositionGrid,
    catalog: &TileCatalog,
    socket: usize,
    rng: &mut R,
) -> Option<(usize, usize)> {
    let entries = grid.feasible_entries(socket);
    if entries.is_empty() {
        return None;
    }

    let mut tiles: Vec<usize> = entries.iter().map(|&(tile, _)| tile).collect();
    tiles.dedup();
    let weights: Vec<f64> = tiles
        .iter()
        .map(|&tile| catalog.get(tile).map_or(0.0, |entry| entry.weight))
        .collect();

    let draw = rng.random_range(0.0..=total_weight(&weights));
    let tile = tiles.get(weighted_index(&weights, draw)).copied()?;

    let orientations: Vec<usize> = entries
        .iter()
        .filter(|&&(candidate, _)| candidate == tile)
        .map(|&(_, orientation)| orientation)
        .collect();
    pick_uniform(&orientations, rng).map(|orientation| (tile, orientation))
}

/// Uniformly random element of a candidate list
fn pick_uniform<R: Rng>(candidates: &[usize], rng: &mut R) -> Option<usize> {
    if candidates.is_empty() {
        return None;
    }
    candidates.get(rng.random_range(0..candidates.len())).copied()
}

#[cfg(test)]
mod tests {
    use super::{PlacementStrategy, Selection};
    use crate::algorithm::catalog::{TileCatalog, TileEntry};
    use crate::algorithm::superposition::SuperpositionGrid;
    use crate::geometry::shape::Shape;
    use crate::math::vec2::Vec2;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn unit_square() -> Shape {
        Shape::from_polygon(
            &[
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(0.0, 1.0),
            ],
            &[0, 0, 0, 0],
        )
    }

    fn catalog() -> TileCatalog {
        TileCatalog::new(vec![TileEntry::new(unit_square(), 1.0)])
            .unwrap_or_else(|_| unreachable!("catalog is valid"))
    }

    fn full_grid(catalog: &TileCatalog, sockets: usize) -> SuperpositionGrid {
        let mut grid = SuperpositionGrid::from_catalog(catalog);
        grid.reindex(sockets, 0, 0);
        grid
    }

    #[test]
    fn test_empty_boundary_seeds_with_configured_tile() {
        let catalog = catalog();
        let grid = SuperpositionGrid::from_catalog(&catalog);
        let mut rng = StdRng::seed_from_u64(1);
        let strategy = PlacementStrategy::PointNearest {
            target: Vec2::new(5.0, 5.0),
            tile_index: 0,
        };
        let selection = strategy.select_next(&Shape::empty(), &grid, &catalog, &mut rng);
        assert_eq!(
            selection,
            Selection::Collapse {
                socket: 0,
                tile: 0,
                orientation: 0,
                more: true,
            }
        );
    }

    #[test]
    fn test_point_nearest_tie_breaks_to_lowest_index() {
        let catalog = catalog();
        let boundary = unit_square();
        let grid = full_grid(&catalog, 4);
        let mut rng = StdRng::seed_from_u64(1);
        // The square's center is equidistant from all four midpoints.
        let strategy = PlacementStrategy::PointNearest {
            target: Vec2::new(0.5, 0.5),
            tile_index: 0,
        };
        let selection = strategy.select_next(&boundary, &grid, &catalog, &mut rng);
        assert!(matches!(
            selection,
            Selection::Collapse {
                socket: 0,
                more: false,
                ..
            }
        ));
    }

    #[test]
    fn test_circular_completes_outside_radius() {
        let catalog = catalog();
        let boundary = unit_square();
        let grid = full_grid(&catalog, 4);
        let mut rng = StdRng::seed_from_u64(1);
        // The closest midpoints sit half a unit from the origin.
        let strategy = PlacementStrategy::AreaCircular {
            center: Vec2::ZERO,
            radius: 0.4,
        };
        let selection = strategy.select_next(&boundary, &grid, &catalog, &mut rng);
        assert_eq!(selection, Selection::Complete);
    }

    #[test]
    fn test_circular_collapses_inside_radius() {
        let catalog = catalog();
        let boundary = unit_square();
        let grid = full_grid(&catalog, 4);
        let mut rng = StdRng::seed_from_u64(1);
        let strategy = PlacementStrategy::AreaCircular {
            center: Vec2::ZERO,
            radius: 3.0,
        };
        // Midpoints (0.5, 0) and (0, 0.5) tie; the lower index wins.
        let selection = strategy.select_next(&boundary, &grid, &catalog, &mut rng);
        assert!(matches!(
            selection,
            Selection::Collapse {
                socket: 0,
                more: true,
                ..
            }
        ));
    }

    #[test]
    fn test_rectangular_picks_least_absolute_x() {
        let catalog = catalog();
        let boundary = unit_square();
        let grid = full_grid(&catalog, 4);
        let mut rng = StdRng::seed_from_u64(1);
        // Midpoint |x| values are 0.5, 1.0, 0.5, 0.0; socket 3 wins.
        let strategy = PlacementStrategy::AreaRectangular {
            extent: Vec2::new(2.0, 2.0),
        };
        let selection = strategy.select_next(&boundary, &grid, &catalog, &mut rng);
        assert!(matches!(selection, Selection::Collapse { socket: 3, .. }));
    }

    #[test]
    fn test_rectangular_completes_when_no_socket_qualifies() {
        let catalog = catalog();
        let boundary = unit_square();
        let grid = full_grid(&catalog, 4);
        let mut rng = StdRng::seed_from_u64(1);
        let strategy = PlacementStrategy::AreaRectangular {
            extent: Vec2::new(0.1, 0.1),
        };
        let selection = strategy.select_next(&boundary, &grid, &catalog, &mut rng);
        assert_eq!(selection, Selection::Complete);
    }

    #[test]
    fn test_dead_socket_is_exhausted() {
        let catalog = catalog();
        let boundary = unit_square();
        let mut grid = full_grid(&catalog, 4);
        for orientation in 0..4 {
            grid.set(3, 0, orientation, false);
        }
        let mut rng = StdRng::seed_from_u64(1);
        let strategy = PlacementStrategy::AreaRectangular {
            extent: Vec2::new(2.0, 2.0),
        };
        let selection = strategy.select_next(&boundary, &grid, &catalog, &mut rng);
        assert_eq!(selection, Selection::Exhausted);
    }
}
