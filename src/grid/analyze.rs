//! Per-axis grid inference

use ndarray::{ArrayBase, Axis, Data, Dimension, RemoveAxis};

use super::axes::spatial_axes;
use super::edges::axis_edges;
use super::mode::dominant_length;
use super::{AxisScale, GridAnalysis, GridError};

/// Infer the block starts and the apparent scale along one spatial axis.
///
/// Every edge between pixel `i` and `i + 1` opens a block at `i + 1`. The block
/// boundaries are bookended with `0` and the axis size, their consecutive
/// differences are the block lengths, and the most frequent length is the
/// apparent scale. An axis without edges is a single block spanning the axis.
///
/// # Errors
///
/// * `GridError::InvalidAxis` if `axis` is not a spatial axis
/// * `GridError::EmptyAxis` if `axis` has size 0
pub fn infer_axis_scale<S, D>(frames: &ArrayBase<S, D>, axis: Axis) -> Result<AxisScale, GridError>
where
    S: Data,
    S::Elem: PartialEq + Sync,
    D: Dimension + RemoveAxis,
{
    let edges = axis_edges(frames, axis)?;
    let size = frames.len_of(axis);

    let mut bounds = Vec::with_capacity(edges.len() + 2);
    bounds.push(0);
    bounds.extend(edges.iter().enumerate().filter(|&(_, &edge)| edge).map(|(i, _)| i + 1));
    bounds.push(size);

    let lengths: Vec<usize> = bounds.windows(2).map(|w| w[1] - w[0]).collect();
    log::debug!("axis {} block lengths: {:?}", axis.index(), lengths);

    // `bounds` holds at least [0, size] with size > 0, so there is one length
    let scale = dominant_length(&lengths).ok_or(GridError::EmptyAxis { axis: axis.index() })?;

    bounds.pop();
    Ok(AxisScale { block_starts: bounds, scale })
}

/// Infer the grid along both spatial axes.
///
/// The two axes are analyzed independently and concurrently; the result is the
/// same as analyzing them one after the other in either order.
pub fn analyze_input_grid<S, D>(frames: &ArrayBase<S, D>) -> Result<GridAnalysis, GridError>
where
    S: Data,
    S::Elem: PartialEq + Sync,
    D: Dimension + RemoveAxis,
{
    let (v_axis, h_axis) = spatial_axes(frames.ndim())?;
    let view = frames.view();

    let (vertical, horizontal) =
        rayon::join(|| infer_axis_scale(&view, v_axis), || infer_axis_scale(&view, h_axis));
    let analysis = GridAnalysis { vertical: vertical?, horizontal: horizontal? };

    log::info!(
        "Apparent vscale, hscale: {}, {} ({}x{} blocks)",
        analysis.vertical.scale,
        analysis.horizontal.scale,
        analysis.vertical.block_count(),
        analysis.horizontal.block_count()
    );
    Ok(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array3, Array4};

    #[test]
    fn test_infer_uneven_blocks() {
        // Columns stretched as 2, 3, 3, 1
        let frames = array![[[1u8, 1, 2, 2, 2, 3, 3, 3, 4]]];
        let h = infer_axis_scale(&frames, Axis(2)).unwrap();
        assert_eq!(h.block_starts, vec![0, 2, 5, 8]);
        assert_eq!(h.scale, 3);
    }

    #[test]
    fn test_infer_uniform_axis_is_one_block() {
        let frames = Array4::<u8>::zeros((3, 4, 16, 30));
        let v = infer_axis_scale(&frames, Axis(2)).unwrap();
        assert_eq!(v, AxisScale { block_starts: vec![0], scale: 16 });
        let h = infer_axis_scale(&frames, Axis(3)).unwrap();
        assert_eq!(h, AxisScale { block_starts: vec![0], scale: 30 });
    }

    #[test]
    fn test_infer_size_one_axis() {
        let frames = Array3::<u8>::zeros((4, 1, 5));
        let v = infer_axis_scale(&frames, Axis(1)).unwrap();
        assert_eq!(v, AxisScale { block_starts: vec![0], scale: 1 });
    }

    #[test]
    fn test_infer_tie_picks_smallest_length() {
        // Blocks of 1, 2 and 3 pixels, each once
        let frames = array![[[0u8, 1, 1, 2, 2, 2]]];
        let h = infer_axis_scale(&frames, Axis(2)).unwrap();
        assert_eq!(h.block_starts, vec![0, 1, 3]);
        assert_eq!(h.scale, 1);
    }

    #[test]
    fn test_infer_rejects_channel_axis() {
        let frames = Array3::<u8>::zeros((4, 2, 2));
        assert_eq!(
            infer_axis_scale(&frames, Axis(0)),
            Err(GridError::InvalidAxis { axis: 0, ndim: 3 })
        );
    }

    #[test]
    fn test_analyze_matches_serial_in_either_order() {
        let mut frames = Array4::<u8>::zeros((2, 4, 12, 10));
        frames[[0, 0, 3, 4]] = 1;
        frames[[1, 3, 9, 2]] = 200;

        let analysis = analyze_input_grid(&frames).unwrap();

        let h_first = infer_axis_scale(&frames, Axis(3)).unwrap();
        let v_second = infer_axis_scale(&frames, Axis(2)).unwrap();
        assert_eq!(analysis.vertical, v_second);
        assert_eq!(analysis.horizontal, h_first);
    }

    #[test]
    fn test_analyze_rejects_low_rank() {
        let frames = ndarray::Array1::<u8>::zeros(4);
        assert_eq!(analyze_input_grid(&frames), Err(GridError::RankTooLow { ndim: 1 }));
    }
}
