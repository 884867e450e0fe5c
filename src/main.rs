//! CLI entry point for the tiling assembly tool

use clap::Parser;
use splicetile::io::cli::{Cli, Runner};

fn main() -> splicetile::Result<()> {
    let cli = Cli::parse();
    let runner = Runner::new(cli);
    runner.run()
}
