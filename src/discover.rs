//! Input path discovery

use glob::{glob, Pattern};
use std::path::{Path, PathBuf};

/// Expand directory arguments into the files they contain.
///
/// Directories are replaced by the files directly inside them (not
/// recursively), in sorted order. Other arguments are kept as given.
pub fn directories_to_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            files.extend(files_in_dir(path));
        } else {
            files.push(path.clone());
        }
    }
    files
}

/// Files directly inside `dir`, sorted.
fn files_in_dir(dir: &Path) -> Vec<PathBuf> {
    let pattern = format!("{}/*", Pattern::escape(&dir.display().to_string()));

    let mut files: Vec<PathBuf> = match glob(&pattern) {
        Ok(paths) => paths.filter_map(Result::ok).filter(|p| p.is_file()).collect(),
        Err(e) => {
            log::warn!("Cannot list '{}': {}", dir.display(), e);
            Vec::new()
        }
    };
    files.sort();
    files
}
