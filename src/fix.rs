//! Fixing image files end to end
//!
//! Decodes an input file, regrids it and writes the result through a
//! [`StagingDir`].

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::decode::{load_image, DecodeError};
use crate::gif::{optimize_gif, render_gif};
use crate::grid::{GridError, OutputScale, ScalePolicy};
use crate::output::{frames_to_images, save_still, OutputError};
use crate::pipeline::{regrid, RegridOptions};
use crate::staging::StagingDir;

/// Error while fixing one file
#[derive(Debug, Error)]
pub enum FixError {
    #[error("Failed to decode image: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },
    #[error("Grid reconstruction failed: {0}")]
    Grid(#[from] GridError),
    #[error(transparent)]
    Output(#[from] OutputError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Settings shared by every file of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOptions {
    pub policy: ScalePolicy,
    /// Keep alpha in animated GIF output
    pub transparent: bool,
    /// Color given to fully transparent pixels before analysis
    pub transparent_fill: [u8; 3],
    /// Run the GIF optimizer on animated outputs
    pub optimize_gif: bool,
    pub gifsicle: String,
}

impl Default for FixOptions {
    fn default() -> Self {
        Self {
            policy: ScalePolicy::Inferred,
            transparent: false,
            transparent_fill: [0, 0, 0],
            optimize_gif: false,
            gifsicle: "gifsicle".to_string(),
        }
    }
}

/// Summary of one fixed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub frames: usize,
    /// `(width, height)` of the input
    pub input_size: (usize, usize),
    /// `(width, height)` of the output
    pub output_size: (usize, usize),
    /// `(rows, columns)` of the canonical grid
    pub canonical_size: (usize, usize),
    /// Apparent scale of the input
    pub inferred: OutputScale,
    /// Scale the output was rendered at
    pub scale: OutputScale,
}

/// Fix `input` and write the result to `output`.
///
/// `index` distinguishes this file's staged output from the other files of
/// the batch sharing `staging`.
pub fn fix_file(
    input: &Path,
    output: &Path,
    options: &FixOptions,
    staging: &StagingDir,
    index: usize,
) -> Result<FixReport, FixError> {
    let decoded = load_image(input)
        .map_err(|source| FixError::Decode { path: input.to_path_buf(), source })?;
    let input_size = decoded.dimensions();
    let frame_count = decoded.frame_count();
    let animated = decoded.is_animated();
    log::debug!(
        "{}: {}x{}, {} frame(s), format {:?}",
        input.display(),
        input_size.0,
        input_size.1,
        frame_count,
        decoded.format
    );

    let regrid_options =
        RegridOptions { policy: options.policy, transparent_fill: Some(options.transparent_fill) };
    let result = regrid(decoded.frames, &regrid_options)?;
    if !result.scale.is_square() {
        log::info!(
            "{}: rendering non-square pixels at {}, --force-square renders square ones",
            input.display(),
            result.scale
        );
    }
    let images = frames_to_images(&result.frames)?;

    let staged = staging.stage_path(index, output);
    if animated {
        if !has_gif_extension(output) {
            log::warn!("{}: animated output is always GIF encoded", output.display());
        }
        render_gif(&images, &decoded.delays, options.transparent, &staged)?;
        if options.optimize_gif {
            optimize_gif(&staged, &options.gifsicle)?;
        }
    } else {
        save_still(&images[0], &staged)?;
    }
    staging.persist(&staged, output)?;

    let output_size = images
        .first()
        .map(|image| (image.width() as usize, image.height() as usize))
        .unwrap_or_default();

    Ok(FixReport {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        frames: frame_count,
        input_size,
        output_size,
        canonical_size: result.canonical_size(),
        inferred: result.analysis.inferred_scale(),
        scale: result.scale,
    })
}

fn has_gif_extension(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()).is_some_and(|e| e.eq_ignore_ascii_case("gif"))
}
