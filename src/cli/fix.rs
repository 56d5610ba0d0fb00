//! Fix command implementation

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::config::{load_config, merge_cli_overrides, CliOverrides};
use crate::discover::directories_to_files;
use crate::fix::{fix_file, FixOptions, FixReport};
use crate::output::generate_output_path;
use crate::staging::StagingDir;

/// Default number of parallel jobs (uses available parallelism).
fn default_jobs() -> usize {
    std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}

/// Execute the fix command
pub fn run_fix(
    paths: &[PathBuf],
    output: Option<&Path>,
    config_path: Option<&Path>,
    overrides: &CliOverrides,
) -> ExitCode {
    let config = match load_config(config_path).and_then(|c| merge_cli_overrides(c, overrides)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let inputs = directories_to_files(paths);
    if inputs.is_empty() {
        eprintln!("Error: No input files found");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    // Resolve every output path up front so argument errors stop the batch
    // before any file is written
    let is_single_input = inputs.len() == 1;
    let mut work = Vec::with_capacity(inputs.len());
    for input in inputs {
        match generate_output_path(&input, output, &config.output.suffix, is_single_input) {
            Ok(out) => work.push((input, out)),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_INVALID_ARGS);
            }
        }
    }

    let options = FixOptions {
        policy: config.defaults.scale_policy(),
        transparent: config.defaults.transparent,
        transparent_fill: config.defaults.transparent_fill,
        optimize_gif: config.output.optimize_gif,
        gifsicle: config.output.gifsicle.clone(),
    };

    let staging = match StagingDir::new() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: Failed to create staging directory: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let jobs = config.defaults.jobs.unwrap_or_else(default_jobs);
    let pool = match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: Failed to start {} workers: {}", jobs, e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    log::info!("Fixing {} file(s) with {} worker(s)", work.len(), jobs);

    let results: Vec<_> = pool.install(|| {
        work.par_iter()
            .enumerate()
            .map(|(index, (input, out))| fix_file(input, out, &options, &staging, index))
            .collect()
    });

    let mut failures = 0;
    for ((input, _), result) in work.iter().zip(results) {
        match result {
            Ok(report) => print_report(&report),
            Err(e) => {
                eprintln!("Error: {}: {}", input.display(), e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        eprintln!("{} of {} file(s) failed", failures, work.len());
        ExitCode::from(EXIT_ERROR)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}

fn print_report(report: &FixReport) {
    println!(
        "Fixed: {} ({}x{} -> {}x{}, scale {})",
        report.output.display(),
        report.input_size.0,
        report.input_size.1,
        report.output_size.0,
        report.output_size.1,
        report.scale
    );
    log::info!(
        "{}: {} frame(s), canonical grid {}x{}, apparent scale {}",
        report.input.display(),
        report.frames,
        report.canonical_size.1,
        report.canonical_size.0,
        report.inferred
    );
}
