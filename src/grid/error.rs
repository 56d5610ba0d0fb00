//! Error types for grid reconstruction

use thiserror::Error;

/// A caller contract violation detected by the grid engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// The tensor has fewer axes than the layout requires
    #[error("Tensor of rank {ndim} has no (vertical, horizontal) axes")]
    RankTooLow { ndim: usize },
    /// The requested axis is not one of the two spatial axes
    #[error("Axis {axis} is not a spatial axis of a rank-{ndim} tensor")]
    InvalidAxis { axis: usize, ndim: usize },
    /// A spatial axis has no pixels
    #[error("Axis {axis} has size 0")]
    EmptyAxis { axis: usize },
    /// Transparency normalization needs an RGBA channel axis
    #[error("Expected at least 4 channels (RGBA), found {channels}")]
    MissingAlpha { channels: usize },
    /// A block-start index does not address a pixel
    #[error("Index {index} is out of range for axis {axis} of size {len}")]
    IndexOutOfRange { axis: usize, index: usize, len: usize },
    /// Upscale factors must be positive
    #[error("Scale factors must be positive integers")]
    ZeroScale,
}
