//! Grid reconstruction engine
//!
//! Infers the block grid of stretched pixel art, collapses it to one sample per
//! block and re-expands the result at a uniform integer scale.
//!
//! Every function here works on `ndarray` tensors laid out as
//! `(frame, channel, vertical, horizontal)` or `(channel, vertical, horizontal)`.
//! Axis positions are always derived from the rank via [`axes`].

pub mod analyze;
pub mod axes;
pub mod edges;
pub mod error;
pub mod mask;
pub mod mode;
pub mod transparency;
pub mod upscale;

pub use analyze::{analyze_input_grid, infer_axis_scale};
pub use axes::{channel_axis, spatial_axes};
pub use edges::axis_edges;
pub use error::GridError;
pub use mask::mask_by_row_indices;
pub use mode::dominant_length;
pub use transparency::{into_normalized, normalize_transparent};
pub use upscale::integer_upscale;

/// Block layout detected along one spatial axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisScale {
    /// Index of the first pixel of every block, strictly increasing, starting at 0
    pub block_starts: Vec<usize>,
    /// Most frequent block length along the axis
    pub scale: usize,
}

impl AxisScale {
    /// Number of blocks detected along the axis.
    pub fn block_count(&self) -> usize {
        self.block_starts.len()
    }
}

/// Block-start indices for both spatial axes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GridIndices {
    pub vertical: Vec<usize>,
    pub horizontal: Vec<usize>,
}

/// Result of analyzing both spatial axes of a tensor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridAnalysis {
    pub vertical: AxisScale,
    pub horizontal: AxisScale,
}

impl GridAnalysis {
    /// Block-start indices of both axes, as consumed by [`mask_by_row_indices`].
    pub fn indices(&self) -> GridIndices {
        GridIndices {
            vertical: self.vertical.block_starts.clone(),
            horizontal: self.horizontal.block_starts.clone(),
        }
    }

    /// The apparent per-axis scale.
    pub fn inferred_scale(&self) -> OutputScale {
        OutputScale::new(self.vertical.scale, self.horizontal.scale)
    }

    /// Size of the canonical grid as `(rows, columns)`.
    pub fn canonical_size(&self) -> (usize, usize) {
        (self.vertical.block_count(), self.horizontal.block_count())
    }
}

/// Integer repetition factors applied by [`integer_upscale`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputScale {
    pub vertical: usize,
    pub horizontal: usize,
}

impl OutputScale {
    pub fn new(vertical: usize, horizontal: usize) -> Self {
        Self { vertical, horizontal }
    }

    /// Same factor on both axes.
    pub fn uniform(factor: usize) -> Self {
        Self { vertical: factor, horizontal: factor }
    }

    pub fn is_square(&self) -> bool {
        self.vertical == self.horizontal
    }
}

impl From<usize> for OutputScale {
    fn from(factor: usize) -> Self {
        Self::uniform(factor)
    }
}

impl From<(usize, usize)> for OutputScale {
    fn from((vertical, horizontal): (usize, usize)) -> Self {
        Self::new(vertical, horizontal)
    }
}

impl std::fmt::Display for OutputScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.vertical, self.horizontal)
    }
}

/// How the output scale is chosen from an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScalePolicy {
    /// Re-expand each axis by its own inferred scale
    #[default]
    Inferred,
    /// Use the larger inferred scale on both axes
    ForceSquare,
    /// Ignore the inferred scale
    Forced(OutputScale),
}

impl ScalePolicy {
    pub fn resolve(&self, analysis: &GridAnalysis) -> OutputScale {
        match self {
            ScalePolicy::Inferred => analysis.inferred_scale(),
            ScalePolicy::ForceSquare => {
                OutputScale::uniform(analysis.vertical.scale.max(analysis.horizontal.scale))
            }
            ScalePolicy::Forced(scale) => *scale,
        }
    }
}
