//! Animated GIF output

use crate::output::OutputError;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;
use std::process::Command;

/// Delay used for frames without timing information.
pub const DEFAULT_DELAY_MS: u32 = 100;

/// Render a sequence of frames as an infinitely looping animated GIF.
///
/// # Arguments
///
/// * `frames` - The image frames to include in the animation
/// * `delays` - Display time of each frame; missing entries use [`DEFAULT_DELAY_MS`]
/// * `transparent` - Keep the alpha channel; otherwise every pixel is made opaque
/// * `path` - Output file path
///
/// # Returns
///
/// * `Ok(())` on success
/// * `Err(OutputError)` on failure
pub fn render_gif(
    frames: &[RgbaImage],
    delays: &[Delay],
    transparent: bool,
    path: &Path,
) -> Result<(), OutputError> {
    if frames.is_empty() {
        return Ok(());
    }

    // Create parent directories if they don't exist
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let mut encoder = GifEncoder::new(writer);
    encoder.set_repeat(Repeat::Infinite)?;

    for (index, rgba_image) in frames.iter().enumerate() {
        let delay = delays
            .get(index)
            .copied()
            .unwrap_or_else(|| Delay::from_numer_denom_ms(DEFAULT_DELAY_MS, 1));

        let mut buffer = rgba_image.clone();
        if !transparent {
            for pixel in buffer.pixels_mut() {
                pixel[3] = u8::MAX;
            }
        }
        encoder.encode_frame(Frame::from_parts(buffer, 0, 0, delay))?;
    }

    Ok(())
}

/// Run an external palette optimizer (`gifsicle`) over a GIF in place.
///
/// Returns `Ok(false)` when the program is not installed.
pub fn optimize_gif(path: &Path, program: &str) -> Result<bool, OutputError> {
    let status = match Command::new(program).args(["-O3", "--batch"]).arg(path).status() {
        Ok(status) => status,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("'{}' not found, skipping GIF optimization", program);
            return Ok(false);
        }
        Err(e) => return Err(e.into()),
    };

    if !status.success() {
        return Err(OutputError::Optimizer { program: program.to_string(), status });
    }
    log::debug!("Optimized {} with {}", path.display(), program);
    Ok(true)
}
