//! Validated tile sets fed to the collapse engine

use crate::geometry::shape::Shape;
use crate::io::error::{Result, malformed_catalog};

/// One placeable tile: its boundary ring plus a selection weight
#[derive(Debug, Clone)]
pub struct TileEntry {
    /// Boundary ring of the tile in its local frame
    pub shape: Shape,
    /// Relative likelihood of being picked among feasible candidates
    pub weight: f64,
}

impl TileEntry {
    /// Construct an entry from parts
    pub const fn new(shape: Shape, weight: f64) -> Self {
        Self { shape, weight }
    }

    /// Number of distinct attachment orientations, one per tile socket
    pub const fn orientations(&self) -> usize {
        self.shape.len()
    }
}

/// An immutable, validated set of tiles
///
/// Validation happens once at construction so the collapse engine can rely
/// on every entry having a real polygon and a usable weight.
#[derive(Debug, Clone)]
pub struct TileCatalog {
    entries: Vec<TileEntry>,
}

impl TileCatalog {
    /// Validate and wrap a tile set
    ///
    /// # Errors
    ///
    /// Returns [`TilingError::MalformedCatalog`](crate::io::error::TilingError::MalformedCatalog)
    /// when the set is empty, a tile has fewer than three edges, or a
    /// weight is non-positive or non-finite.
    pub fn new(entries: Vec<TileEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(malformed_catalog(None, &"catalog holds no tiles"));
        }

        for (index, entry) in entries.iter().enumerate() {
            if entry.shape.len() < 3 {
                return Err(malformed_catalog(
                    Some(index),
                    &format!("tile has {} edges, polygon needs at least 3", entry.shape.len()),
                ));
            }
            if !entry.weight.is_finite() || entry.weight <= 0.0 {
                return Err(malformed_catalog(
                    Some(index),
                    &format!("weight {} is not a positive finite number", entry.weight),
                ));
            }
        }

        Ok(Self { entries })
    }

    /// Number of tiles
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty (never true for a validated catalog)
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`
    pub fn get(&self, index: usize) -> Option<&TileEntry> {
        self.entries.get(index)
    }

    /// All entries in catalog order
    pub const fn entries(&self) -> &[TileEntry] {
        self.entries.as_slice()
    }

    /// Total attachment orientations across all tiles
    ///
    /// This is the width of one superposition row.
    pub fn total_orientations(&self) -> usize {
        self.entries.iter().map(TileEntry::orientations).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::{TileCatalog, TileEntry};
    use crate::geometry::shape::Shape;
    use crate::math::vec2::Vec2;

    fn triangle() -> Shape {
        Shape::from_polygon(
            &[
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(0.0, 1.0),
            ],
            &[0, 0, 0],
        )
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(TileCatalog::new(Vec::new()).is_err());
    }

    #[test]
    fn test_degenerate_polygon_rejected() {
        let flat = Shape::from_polygon(&[Vec2::ZERO, Vec2::new(1.0, 0.0)], &[0, 0]);
        assert!(TileCatalog::new(vec![TileEntry::new(flat, 1.0)]).is_err());
    }

    #[test]
    fn test_bad_weight_rejected() {
        assert!(TileCatalog::new(vec![TileEntry::new(triangle(), 0.0)]).is_err());
        assert!(TileCatalog::new(vec![TileEntry::new(triangle(), f64::NAN)]).is_err());
        assert!(TileCatalog::new(vec![TileEntry::new(triangle(), -2.0)]).is_err());
    }

    #[test]
    fn test_total_orientations_sums_ring_sizes() {
        let catalog = TileCatalog::new(vec![
            TileEntry::new(triangle(), 1.0),
            TileEntry::new(triangle(), 2.0),
        ]);
        assert!(catalog.is_ok());
        if let Ok(catalog) = catalog {
            assert_eq!(catalog.total_orientations(), 6);
        }
    }
}
