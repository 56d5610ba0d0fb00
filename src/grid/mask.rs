//! Canonical grid reconstruction

use ndarray::{Array, ArrayBase, Axis, Data, Dimension, RemoveAxis};

use super::axes::spatial_axes;
use super::{GridError, GridIndices};

/// Keep one sample per detected block along both spatial axes.
///
/// A mask with a mark at every block start is built for each spatial axis and
/// only the marked rows, then the marked columns, are kept. The first pixel of
/// each block is its representative. Frame and channel axes are untouched.
///
/// # Errors
///
/// * `GridError::IndexOutOfRange` if a block start is outside its axis
pub fn mask_by_row_indices<S, D>(
    frames: &ArrayBase<S, D>,
    grid_indices: &GridIndices,
) -> Result<Array<S::Elem, D>, GridError>
where
    S: Data,
    S::Elem: Clone,
    D: Dimension + RemoveAxis,
{
    let (v_axis, h_axis) = spatial_axes(frames.ndim())?;

    let rows = marked_positions(&grid_indices.vertical, frames.len_of(v_axis), v_axis)?;
    let cols = marked_positions(&grid_indices.horizontal, frames.len_of(h_axis), h_axis)?;

    let frames = frames.select(v_axis, &rows);
    Ok(frames.select(h_axis, &cols))
}

/// Positions marked in a `len`-long mask built from `indices`, ascending.
fn marked_positions(indices: &[usize], len: usize, axis: Axis) -> Result<Vec<usize>, GridError> {
    let mut mask = vec![false; len];
    for &index in indices {
        let slot = mask.get_mut(index).ok_or(GridError::IndexOutOfRange {
            axis: axis.index(),
            index,
            len,
        })?;
        *slot = true;
    }
    Ok(mask.iter().enumerate().filter_map(|(i, &marked)| marked.then_some(i)).collect())
}
