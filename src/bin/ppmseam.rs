// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use anyhow::{Context, Result};
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use ppmseam::{calculate_energy, load_image, save_energy_map, save_image, SeamCarver};
use std::path::{Path, PathBuf};

/// Seam carving for plain-text (P3) portable pixmaps
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The P3 image to carve
    input: PathBuf,

    /// Width of the input image
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    /// Height of the input image
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,

    /// Width to carve down to
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    target_width: u32,

    /// Height to carve down to
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    target_height: u32,

    /// Where to write the result [default: carved_<INPUT> beside the input]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write the input's energy map as an ASCII greymap
    #[arg(long, value_name = "PATH")]
    energy_map: Option<PathBuf>,

    /// Precompute each iteration's energy map instead of recomputing
    /// energies on demand
    #[arg(long)]
    cache_energy: bool,

    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

fn default_output(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("carved_{}", name))
}

fn run(cli: &Cli) -> Result<()> {
    let mut grid = load_image(&cli.input, cli.width, cli.height)
        .with_context(|| format!("failed to load {:?}", cli.input))?;

    if let Some(path) = &cli.energy_map {
        save_energy_map(path, &calculate_energy(&grid, cli.width, cli.height))
            .with_context(|| format!("failed to write energy map {:?}", path))?;
    }

    let (width, height) = SeamCarver::new(&mut grid, cli.width, cli.height)
        .with_cached_energy(cli.cache_energy)
        .carve(cli.target_width, cli.target_height)
        .context("cannot carve to the requested size")?;

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output(&cli.input));
    save_image(&output, &grid, width, height)
        .with_context(|| format!("failed to write {:?}", output))?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .format_timestamp(None)
        .init();

    run(&cli)
}
