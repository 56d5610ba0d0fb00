//! Regrid - Command-line tool for re-rendering pixel art on a clean integer grid

use std::process::ExitCode;

use regrid::cli;

fn main() -> ExitCode {
    cli::run()
}
