//! Command-line interface for assembling and rendering tilings

use crate::algorithm::catalog::{TileCatalog, TileEntry};
use crate::algorithm::engine::{Session, StepOutcome};
use crate::algorithm::strategy::PlacementStrategy;
use crate::geometry::shape::Shape;
use crate::io::configuration::{DEFAULT_MAX_STEPS, DEFAULT_PREDICTION_DEPTH, DEFAULT_SEED};
use crate::io::error::{Result, invalid_parameter};
use crate::io::progress::ProgressManager;
use crate::io::render::export_placements_as_png;
use crate::math::vec2::Vec2;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Built-in demonstration tile sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CatalogChoice {
    /// A single unit square
    Squares,
    /// Two unit squares with uneven weights
    Checker,
    /// A unit square plus a right triangle keyed along its hypotenuse
    Wedges,
}

impl CatalogChoice {
    /// Build the chosen demonstration catalog
    ///
    /// # Errors
    ///
    /// Propagates catalog validation failures; the built-in sets always
    /// validate.
    pub fn build(self) -> Result<TileCatalog> {
        let square = Shape::from_polygon(
            &[
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(0.0, 1.0),
            ],
            &[0, 0, 0, 0],
        );

        match self {
            Self::Squares => TileCatalog::new(vec![TileEntry::new(square, 1.0)]),
            Self::Checker => TileCatalog::new(vec![
                TileEntry::new(square.clone(), 1.0),
                TileEntry::new(square, 0.25),
            ]),
            Self::Wedges => {
                // The hypotenuse uses its own connection class, so wedges
                // pair up into squares before joining the rest.
                let wedge = Shape::from_polygon(
                    &[
                        Vec2::new(0.0, 0.0),
                        Vec2::new(1.0, 0.0),
                        Vec2::new(0.0, 1.0),
                    ],
                    &[0, 1, 0],
                );
                TileCatalog::new(vec![
                    TileEntry::new(square, 1.0),
                    TileEntry::new(wedge, 1.0),
                ])
            }
        }
    }
}

/// Placement strategy selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyChoice {
    /// Place a single tile at the socket nearest the target point
    Point,
    /// Fill a disc around the origin
    Circle,
    /// Fill an axis-aligned box around the origin
    Rect,
}

/// Command-line arguments for the tiling assembly tool
#[derive(Parser)]
#[command(name = "splicetile")]
#[command(
    author,
    version,
    about = "Assemble seamless tilings by collapsing boundary superpositions"
)]
pub struct Cli {
    /// Output PNG path
    #[arg(value_name = "OUTPUT", default_value = "tiling.png")]
    pub output: PathBuf,

    /// Tile set to assemble from
    #[arg(short, long, value_enum, default_value_t = CatalogChoice::Squares)]
    pub catalog: CatalogChoice,

    /// Placement strategy
    #[arg(short = 'S', long, value_enum, default_value_t = StrategyChoice::Circle)]
    pub strategy: StrategyChoice,

    /// Radius of the filled disc (circle strategy)
    #[arg(short, long, default_value_t = 4.0)]
    pub radius: f64,

    /// Half-width and half-height of the filled box (rect strategy)
    #[arg(short = 'e', long, num_args = 2, value_names = ["X", "Y"], default_values_t = [4.0, 4.0])]
    pub extent: Vec<f64>,

    /// Target point for the point strategy
    #[arg(short = 't', long, num_args = 2, value_names = ["X", "Y"], default_values_t = [0.0, 0.0])]
    pub target: Vec<f64>,

    /// Catalog index of the tile placed by the point strategy
    #[arg(long, default_value_t = 0)]
    pub tile: usize,

    /// Random seed for reproducible assembly
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Lookahead depth when probing candidate placements
    #[arg(short = 'd', long, default_value_t = DEFAULT_PREDICTION_DEPTH)]
    pub depth: usize,

    /// Maximum collapse steps before stopping
    #[arg(short, long, default_value_t = DEFAULT_MAX_STEPS)]
    pub iterations: usize,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Resolve the configured placement strategy
    ///
    /// # Errors
    ///
    /// Returns an error when the strategy's geometric parameters are
    /// non-positive or non-finite.
    pub fn placement_strategy(&self) -> Result<PlacementStrategy> {
        match self.strategy {
            StrategyChoice::Point => Ok(PlacementStrategy::PointNearest {
                target: pair(&self.target),
                tile_index: self.tile,
            }),
            StrategyChoice::Circle => {
                if !self.radius.is_finite() || self.radius <= 0.0 {
                    return Err(invalid_parameter(
                        "radius",
                        &self.radius,
                        &"must be a positive finite number",
                    ));
                }
                Ok(PlacementStrategy::AreaCircular {
                    center: Vec2::ZERO,
                    radius: self.radius,
                })
            }
            StrategyChoice::Rect => {
                let extent = pair(&self.extent);
                if !(extent.x.is_finite() && extent.y.is_finite())
                    || extent.x <= 0.0
                    || extent.y <= 0.0
                {
                    return Err(invalid_parameter(
                        "extent",
                        &format!("{} {}", extent.x, extent.y),
                        &"both components must be positive finite numbers",
                    ));
                }
                Ok(PlacementStrategy::AreaRectangular { extent })
            }
        }
    }
}

fn pair(values: &[f64]) -> Vec2 {
    Vec2::new(
        values.first().copied().unwrap_or(0.0),
        values.get(1).copied().unwrap_or(0.0),
    )
}

/// Drives one assembly run from parsed arguments to a rendered PNG
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a runner for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Assemble the tiling and export it
    ///
    /// # Errors
    ///
    /// Returns an error if parameter validation fails, the tiling dies
    /// before the strategy's goal is met, or the render cannot be saved.
    pub fn run(&self) -> Result<()> {
        let catalog = self.cli.catalog.build()?;
        let strategy = self.cli.placement_strategy()?;
        let mut session = Session::new(catalog, self.cli.seed, self.cli.depth);

        let progress = self
            .cli
            .should_show_progress()
            .then(|| ProgressManager::new(self.cli.iterations));

        for step in 1..=self.cli.iterations {
            if let Some(ref bar) = progress {
                bar.update(step, session.boundary().len());
            }
            if session.step_collapse(&strategy)? == StepOutcome::Complete {
                break;
            }
        }

        if let Some(ref bar) = progress {
            bar.finish(&format!("{} tiles placed", session.placements().len()));
        }

        let output = self.cli.output.to_string_lossy();
        export_placements_as_png(session.placements(), session.catalog(), &output)
    }
}

#[cfg(test)]
mod tests {
    use super::{CatalogChoice, Cli, StrategyChoice};
    use clap::Parser;

    #[test]
    fn test_builtin_catalogs_validate() {
        assert!(CatalogChoice::Squares.build().is_ok());
        assert!(CatalogChoice::Checker.build().is_ok());
        assert!(CatalogChoice::Wedges.build().is_ok());
    }

    #[test]
    fn test_default_arguments_parse() {
        let cli = Cli::parse_from(["splicetile"]);
        assert_eq!(cli.catalog, CatalogChoice::Squares);
        assert_eq!(cli.strategy, StrategyChoice::Circle);
        assert!(cli.placement_strategy().is_ok());
    }

    #[test]
    fn test_non_positive_radius_is_rejected() {
        let cli = Cli::parse_from(["splicetile", "--strategy", "circle", "--radius=-2"]);
        assert!(cli.placement_strategy().is_err());
    }

    #[test]
    fn test_rect_extent_parses_as_pair() {
        let cli = Cli::parse_from([
            "splicetile",
            "--strategy",
            "rect",
            "--extent",
            "3.0",
            "2.5",
        ]);
        let strategy = cli.placement_strategy();
        assert!(strategy.is_ok());
    }
}
