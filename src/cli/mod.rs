//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod analyze;
mod fix;

use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::CliOverrides;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Regrid - Recover the pixel grid of unevenly scaled pixel art
#[derive(Parser)]
#[command(name = "regrid")]
#[command(about = "Regrid - Recover the pixel grid of unevenly scaled pixel art and re-render it")]
#[command(version)]
pub struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (default: regrid.toml found from the working directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Re-render images on a clean, uniform integer grid
    Fix {
        /// Input files or directories (directories are expanded to the files inside)
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Output file or directory.
        /// If omitted: {input_stem}{suffix}.{ext} next to each input
        /// If file (single input only): output.gif
        /// If directory (ends with / or exists): dir/{input_file_name}
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Use the larger inferred scale on both axes
        #[arg(long, conflicts_with = "force_scale")]
        force_square: bool,

        /// Render at this scale instead of the inferred one (one value for both
        /// axes, or VERTICAL HORIZONTAL). Takes up to two values, so give the
        /// paths first or end the values with `--`
        #[arg(
            long,
            num_args = 1..=2,
            value_names = ["VERTICAL", "HORIZONTAL"],
            value_parser = clap::value_parser!(u32).range(1..)
        )]
        force_scale: Option<Vec<u32>>,

        /// Keep transparency in animated GIF output
        #[arg(long)]
        transparent: bool,

        /// Run gifsicle over animated outputs
        #[arg(long)]
        optimize: bool,

        /// Number of files processed in parallel (default: available parallelism)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        jobs: Option<u32>,
    },
    /// Report the inferred grid of images without writing anything
    Analyze {
        /// Input files or directories
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Print one JSON object per file
        #[arg(long)]
        json: bool,
    },
}

/// Build the config overrides for `fix` from its flags.
fn fix_overrides(
    force_square: bool,
    force_scale: Option<&[u32]>,
    transparent: bool,
    optimize: bool,
    jobs: Option<u32>,
) -> CliOverrides {
    let force_scale = force_scale.and_then(|values| match *values {
        [factor] => Some([factor as usize, factor as usize]),
        [vertical, horizontal] => Some([vertical as usize, horizontal as usize]),
        _ => None,
    });

    CliOverrides {
        force_square: force_square.then_some(true),
        force_scale,
        transparent: transparent.then_some(true),
        optimize_gif: optimize.then_some(true),
        jobs: jobs.map(|j| j as usize),
    }
}

/// Initialise `env_logger` at the level selected by `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    // A logger may already be installed when running inside tests
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Fix { paths, output, force_square, force_scale, transparent, optimize, jobs } => {
            let overrides =
                fix_overrides(force_square, force_scale.as_deref(), transparent, optimize, jobs);
            fix::run_fix(&paths, output.as_deref(), cli.config.as_deref(), &overrides)
        }
        Commands::Analyze { paths, json } => {
            analyze::run_analyze(&paths, json, cli.config.as_deref())
        }
    }
}
