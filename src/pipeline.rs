//! End-to-end grid reconstruction of one tensor
//!
//! Chains transparency normalization, grid analysis, canonical grid
//! reconstruction and integer upscaling.

use ndarray::{Array, Dimension, RemoveAxis};

use crate::grid::{
    analyze_input_grid, channel_axis, integer_upscale, mask_by_row_indices, normalize_transparent,
    GridAnalysis, GridError, OutputScale, ScalePolicy,
};

/// Options for [`regrid`].
#[derive(Debug, Clone, PartialEq)]
pub struct RegridOptions<A> {
    /// How the output scale is chosen
    pub policy: ScalePolicy,
    /// Color given to fully transparent pixels before analysis. Skipped when
    /// `None` or when the tensor has no alpha channel.
    pub transparent_fill: Option<[A; 3]>,
}

impl<A: Default> Default for RegridOptions<A> {
    fn default() -> Self {
        Self { policy: ScalePolicy::default(), transparent_fill: Some(Default::default()) }
    }
}

/// Output of [`regrid`].
#[derive(Debug, Clone, PartialEq)]
pub struct Regridded<A, D: Dimension> {
    /// The re-rendered tensor, same layout as the input
    pub frames: Array<A, D>,
    /// Grid inferred from the (normalized) input
    pub analysis: GridAnalysis,
    /// Scale the canonical grid was expanded by
    pub scale: OutputScale,
}

impl<A, D: Dimension> Regridded<A, D> {
    /// Canonical grid size as `(rows, columns)`.
    pub fn canonical_size(&self) -> (usize, usize) {
        self.analysis.canonical_size()
    }
}

/// Re-render `frames` on a uniform integer grid.
pub fn regrid<A, D>(
    mut frames: Array<A, D>,
    options: &RegridOptions<A>,
) -> Result<Regridded<A, D>, GridError>
where
    A: Copy + PartialEq + Default + Sync,
    D: Dimension + RemoveAxis,
{
    if let Some(fill) = options.transparent_fill {
        if has_alpha(&frames) {
            normalize_transparent(&mut frames, fill)?;
        }
    }

    let analysis = analyze_input_grid(&frames)?;
    let canonical = mask_by_row_indices(&frames, &analysis.indices())?;

    let scale = options.policy.resolve(&analysis);
    log::debug!("Output scale {} ({:?})", scale, options.policy);

    let frames = integer_upscale(&canonical, scale)?;
    Ok(Regridded { frames, analysis, scale })
}

fn has_alpha<A, D: Dimension>(frames: &Array<A, D>) -> bool {
    channel_axis(frames.ndim()).map(|axis| frames.len_of(axis) >= 4).unwrap_or(false)
}
