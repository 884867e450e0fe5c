//! Error types for tiling operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all tiling operations
#[derive(Debug)]
pub enum TilingError {
    /// Tile catalog fails validation
    MalformedCatalog {
        /// Index of the offending tile, if one is identifiable
        tile_index: Option<usize>,
        /// Description of what's wrong with the catalog
        reason: String,
    },

    /// No candidate placement survives feasibility and lookahead
    ///
    /// The assembled boundary has at least one open socket but nothing in
    /// the catalog can legally attach anywhere on it.
    DeadTiling {
        /// Collapse step at which the tiling died
        step: usize,
        /// Number of open sockets on the boundary
        boundary_sockets: usize,
    },

    /// Tile index exceeds the catalog
    InvalidTileIndex {
        /// The invalid tile index
        index: usize,
        /// Number of tiles in the catalog
        catalog_size: usize,
    },

    /// Runtime parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to save a rendered tiling to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for TilingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedCatalog { tile_index, reason } => match tile_index {
                Some(index) => write!(f, "Malformed catalog at tile {index}: {reason}"),
                None => write!(f, "Malformed catalog: {reason}"),
            },
            Self::DeadTiling {
                step,
                boundary_sockets,
            } => {
                write!(
                    f,
                    "Tiling died at step {step} with {boundary_sockets} open boundary sockets"
                )
            }
            Self::InvalidTileIndex {
                index,
                catalog_size,
            } => {
                write!(
                    f,
                    "Tile index {index} is out of bounds (catalog holds {catalog_size} tiles)"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for TilingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for tiling results
pub type Result<T> = std::result::Result<T, TilingError>;

impl From<std::io::Error> for TilingError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> TilingError {
    TilingError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a malformed catalog error
pub fn malformed_catalog(tile_index: Option<usize>, reason: &impl ToString) -> TilingError {
    TilingError::MalformedCatalog {
        tile_index,
        reason: reason.to_string(),
    }
}
