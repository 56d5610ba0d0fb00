//! Analyze command implementation

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::config::load_config;
use crate::decode::load_image;
use crate::discover::directories_to_files;
use crate::grid::{analyze_input_grid, into_normalized, GridAnalysis};

/// Per-file analysis output
#[derive(Debug, Serialize)]
struct AnalyzeReport {
    path: PathBuf,
    width: usize,
    height: usize,
    frames: usize,
    /// `[vertical, horizontal]`
    scale: [usize; 2],
    /// `[rows, columns]` of the canonical grid, vertical first like `scale`
    grid: [usize; 2],
    vertical_starts: Vec<usize>,
    horizontal_starts: Vec<usize>,
}

impl AnalyzeReport {
    fn new(path: &Path, size: (usize, usize), frames: usize, analysis: GridAnalysis) -> Self {
        let (rows, cols) = analysis.canonical_size();
        Self {
            path: path.to_path_buf(),
            width: size.0,
            height: size.1,
            frames,
            scale: [analysis.vertical.scale, analysis.horizontal.scale],
            grid: [rows, cols],
            vertical_starts: analysis.vertical.block_starts,
            horizontal_starts: analysis.horizontal.block_starts,
        }
    }
}

/// Execute the analyze command
pub fn run_analyze(paths: &[PathBuf], json: bool, config_path: Option<&Path>) -> ExitCode {
    let config = match load_config(config_path) {
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

    let mut failures = 0;
    for input in &inputs {
        match analyze_file(input, config.defaults.transparent_fill) {
            Ok(report) if json => match serde_json::to_string(&report) {
                Ok(line) => println!("{}", line),
                Err(e) => {
                    eprintln!("Error: {}: {}", input.display(), e);
                    failures += 1;
                }
            },
            Ok(report) => println!(
                "{}: {}x{}, {} frame(s), scale {}x{}, grid {}x{} (vertical x horizontal)",
                report.path.display(),
                report.width,
                report.height,
                report.frames,
                report.scale[0],
                report.scale[1],
                report.grid[0],
                report.grid[1]
            ),
            Err(e) => {
                eprintln!("Error: {}: {}", input.display(), e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        ExitCode::from(EXIT_ERROR)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}

fn analyze_file(
    path: &Path,
    fill: [u8; 3],
) -> Result<AnalyzeReport, Box<dyn std::error::Error + Send + Sync>> {
    let decoded = load_image(path)?;
    let size = decoded.dimensions();
    let frames = decoded.frame_count();

    let normalized = into_normalized(decoded.frames, fill)?;
    let analysis = analyze_input_grid(&normalized)?;
    Ok(AnalyzeReport::new(path, size, frames, analysis))
}
