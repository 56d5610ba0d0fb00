//! Image decoding into pixel tensors
//!
//! Every input is decoded as RGBA8 frames and stacked into a tensor laid out as
//! `(frame, channel, vertical, horizontal)`. Still images drop the frame axis.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use image::codecs::gif::GifDecoder;
use image::io::Reader as ImageReader;
use image::{AnimationDecoder, Delay, ImageFormat, RgbaImage};
use ndarray::{Array4, ArrayD, Axis};
use thiserror::Error;

/// Channels per pixel in decoded tensors (RGBA).
pub const CHANNELS: usize = 4;

/// Error when decoding an input image
#[derive(Debug, Error)]
pub enum DecodeError {
    /// File could not be opened or read
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Unsupported or corrupt image data
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    /// The image has no frames or a zero dimension
    #[error("Image has no pixels")]
    Empty,
    /// Frames of an animation disagree in size
    #[error("Frame {index} is {actual_w}x{actual_h}, expected {expected_w}x{expected_h}", actual_w = actual.0, actual_h = actual.1, expected_w = expected.0, expected_h = expected.1)]
    FrameSizeMismatch { index: usize, actual: (u32, u32), expected: (u32, u32) },
    /// Pixel buffers do not fit the tensor shape
    #[error("Tensor layout error: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

/// A decoded still image or animation.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Rank 4 `(frame, channel, vertical, horizontal)` for animations, rank 3
    /// `(channel, vertical, horizontal)` for still images
    pub frames: ArrayD<u8>,
    /// Per-frame display time, empty for still images
    pub delays: Vec<Delay>,
    /// Container format detected from the file contents
    pub format: Option<ImageFormat>,
}

impl DecodedImage {
    pub fn is_animated(&self) -> bool {
        self.frames.ndim() == 4
    }

    pub fn frame_count(&self) -> usize {
        if self.is_animated() {
            self.frames.len_of(Axis(0))
        } else {
            1
        }
    }

    /// `(width, height)` in pixels.
    pub fn dimensions(&self) -> (usize, usize) {
        let ndim = self.frames.ndim();
        (self.frames.len_of(Axis(ndim - 1)), self.frames.len_of(Axis(ndim - 2)))
    }
}

/// Decode the image at `path`.
///
/// The format is guessed from the file contents. GIF files yield every
/// composited frame with its delay; other formats yield one still frame.
pub fn load_image(path: &Path) -> Result<DecodedImage, DecodeError> {
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    let format = reader.format();

    let (images, delays) = match format {
        Some(ImageFormat::Gif) => decode_gif(path)?,
        _ => (vec![reader.decode()?.to_rgba8()], Vec::new()),
    };

    let frames = images_to_tensor(&images)?;
    let delays = if frames.ndim() == 4 { delays } else { Vec::new() };
    Ok(DecodedImage { frames, delays, format })
}

fn decode_gif(path: &Path) -> Result<(Vec<RgbaImage>, Vec<Delay>), DecodeError> {
    let decoder = GifDecoder::new(BufReader::new(File::open(path)?))?;
    let frames = decoder.into_frames().collect_frames()?;

    let delays = frames.iter().map(|frame| frame.delay()).collect();
    let images = frames.into_iter().map(|frame| frame.into_buffer()).collect();
    Ok((images, delays))
}

/// Stack RGBA frames into a `(frame, channel, vertical, horizontal)` tensor.
///
/// A single frame is returned as `(channel, vertical, horizontal)`.
pub fn images_to_tensor(images: &[RgbaImage]) -> Result<ArrayD<u8>, DecodeError> {
    let first = images.first().ok_or(DecodeError::Empty)?;
    let (width, height) = first.dimensions();
    if width == 0 || height == 0 {
        return Err(DecodeError::Empty);
    }

    let mut data = Vec::with_capacity(images.len() * first.as_raw().len());
    for (index, image) in images.iter().enumerate() {
        if image.dimensions() != (width, height) {
            return Err(DecodeError::FrameSizeMismatch {
                index,
                actual: image.dimensions(),
                expected: (width, height),
            });
        }
        data.extend_from_slice(image.as_raw());
    }

    let stacked =
        Array4::from_shape_vec((images.len(), height as usize, width as usize, CHANNELS), data)?;
    let frames = spatial_axes_to_end(stacked);

    if images.len() == 1 {
        Ok(frames.index_axis_move(Axis(0), 0).into_dyn())
    } else {
        Ok(frames.into_dyn())
    }
}

/// Reorder `(frame, vertical, horizontal, channel)` to
/// `(frame, channel, vertical, horizontal)`.
pub fn spatial_axes_to_end(frames: Array4<u8>) -> Array4<u8> {
    frames.permuted_axes([0, 3, 1, 2])
}
