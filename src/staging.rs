//! Scoped staging directory for encoded outputs
//!
//! Outputs are encoded (and optionally optimized) inside a private temporary
//! directory and only moved to their destination once complete. The directory
//! and anything left in it are removed when the [`StagingDir`] is dropped.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A caller-owned temporary directory.
#[derive(Debug)]
pub struct StagingDir {
    dir: TempDir,
}

impl StagingDir {
    /// Create a fresh staging directory under the system temp dir.
    pub fn new() -> io::Result<Self> {
        let dir = tempfile::Builder::new().prefix("regrid-").tempdir()?;
        Ok(Self { dir })
    }

    /// Create a fresh staging directory under `parent`.
    pub fn new_in(parent: &Path) -> io::Result<Self> {
        let dir = tempfile::Builder::new().prefix("regrid-").tempdir_in(parent)?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path for the `index`-th staged output, keeping the destination's
    /// extension so encoders can pick the format from it.
    pub fn stage_path(&self, index: usize, destination: &Path) -> PathBuf {
        let name = match destination.extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("out{:03}.{}", index, ext),
            None => format!("out{:03}", index),
        };
        self.dir.path().join(name)
    }

    /// Move a staged file to `destination`, creating parent directories.
    ///
    /// Falls back to copy-and-remove when a rename is not possible (for example
    /// across file systems).
    pub fn persist(&self, staged: &Path, destination: &Path) -> io::Result<()> {
        if let Some(parent) = destination.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        if fs::rename(staged, destination).is_err() {
            fs::copy(staged, destination)?;
            fs::remove_file(staged)?;
        }
        Ok(())
    }
}
