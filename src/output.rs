//! Still image output and file path generation

use image::RgbaImage;
use ndarray::{ArrayD, Axis, Ix4};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::decode::CHANNELS;

/// Error type for output operations
#[derive(Debug, Error)]
pub enum OutputError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    /// Tensor is not a rank 3 or rank 4 RGBA tensor
    #[error("Cannot encode tensor of shape {0:?} as RGBA frames")]
    Layout(Vec<usize>),
    /// A single output file was given for several inputs
    #[error("Output '{0}' is a file but several inputs were given; use a directory")]
    AmbiguousOutput(PathBuf),
    /// The resolved output would overwrite its own input
    #[error("Output '{0}' is the input file itself; choose another output path")]
    OverwritesInput(PathBuf),
    /// The external GIF optimizer exited with an error
    #[error("'{program}' failed with {status}")]
    Optimizer { program: String, status: std::process::ExitStatus },
}

/// Convert a `(frame?, channel, vertical, horizontal)` RGBA tensor into images.
///
/// A rank 3 tensor yields one image.
pub fn frames_to_images(frames: &ArrayD<u8>) -> Result<Vec<RgbaImage>, OutputError> {
    let layout_error = || OutputError::Layout(frames.shape().to_vec());

    let view = match frames.ndim() {
        3 => frames.view().insert_axis(Axis(0)),
        4 => frames.view(),
        _ => return Err(layout_error()),
    };
    let view = view.into_dimensionality::<Ix4>().map_err(|_| layout_error())?;

    let (_, channels, height, width) = view.dim();
    if channels != CHANNELS {
        return Err(layout_error());
    }

    view.axis_iter(Axis(0))
        .map(|frame| {
            // (channel, vertical, horizontal) -> (vertical, horizontal, channel)
            let data: Vec<u8> = frame.permuted_axes([1, 2, 0]).iter().copied().collect();
            RgbaImage::from_raw(width as u32, height as u32, data).ok_or_else(layout_error)
        })
        .collect()
}

/// Save a still image. The format follows the file extension.
///
/// # Arguments
///
/// * `image` - The image to save
/// * `path` - The output file path
///
/// # Returns
///
/// * `Ok(())` on success
/// * `Err(OutputError)` on failure
pub fn save_still(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    image.save(path)?;
    Ok(())
}

/// Generate the output path for a fixed image.
///
/// # Output Naming Rules
///
/// | Scenario | Output |
/// |----------|--------|
/// | No `-o` | `{dir}/{stem}{suffix}.{ext}` next to the input |
/// | `-o dir/` or existing directory | `dir/{file_name}` |
/// | `-o out.gif`, single input | `out.gif` |
/// | `-o out.gif`, several inputs | error |
/// | Any rule resolving to the input itself | error |
///
/// # Arguments
///
/// * `input` - The input file path
/// * `output_arg` - The `-o` argument value, if provided
/// * `suffix` - Appended to the input stem when no `-o` is given
/// * `is_single_input` - Whether only one file is being processed
pub fn generate_output_path(
    input: &Path,
    output_arg: Option<&Path>,
    suffix: &str,
    is_single_input: bool,
) -> Result<PathBuf, OutputError> {
    let output = resolve_output_path(input, output_arg, suffix, is_single_input)?;
    if is_same_file(input, &output) {
        return Err(OutputError::OverwritesInput(output));
    }
    Ok(output)
}

fn resolve_output_path(
    input: &Path,
    output_arg: Option<&Path>,
    suffix: &str,
    is_single_input: bool,
) -> Result<PathBuf, OutputError> {
    let file_name = input.file_name().map(PathBuf::from).unwrap_or_else(|| "output".into());

    match output_arg {
        Some(output) => {
            // Check if output is a directory (ends with / or is existing directory)
            let is_dir = output.as_os_str().to_string_lossy().ends_with('/') || output.is_dir();

            if is_dir {
                Ok(output.join(file_name))
            } else if is_single_input {
                Ok(output.to_path_buf())
            } else {
                Err(OutputError::AmbiguousOutput(output.to_path_buf()))
            }
        }
        None => {
            let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("output");
            let name = match input.extension().and_then(|e| e.to_str()) {
                Some(ext) => format!("{}{}.{}", stem, suffix, ext),
                None => format!("{}{}", stem, suffix),
            };
            let parent = input.parent().unwrap_or(Path::new(""));
            if parent.as_os_str().is_empty() {
                Ok(PathBuf::from(name))
            } else {
                Ok(parent.join(name))
            }
        }
    }
}

/// Whether `a` and `b` name the same file, textually or once resolved.
fn is_same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
