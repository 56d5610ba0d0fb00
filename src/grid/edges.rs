//! Edge detection along one spatial axis

use ndarray::{ArrayBase, Axis, Data, Dimension, RemoveAxis};
use rayon::prelude::*;

use super::axes::other_spatial_axis;
use super::GridError;

/// Find the positions along `axis` where adjacent pixels differ.
///
/// Entry `i` of the result is `true` iff slice `i` and slice `i + 1` along
/// `axis` differ anywhere: in any row/column of the orthogonal spatial axis, in
/// any channel and in any frame. The result has `size - 1` entries, so an axis
/// of size 1 has no edges.
///
/// # Errors
///
/// * `GridError::InvalidAxis` if `axis` is not one of the two trailing axes
/// * `GridError::EmptyAxis` if `axis` has size 0
pub fn axis_edges<S, D>(frames: &ArrayBase<S, D>, axis: Axis) -> Result<Vec<bool>, GridError>
where
    S: Data,
    S::Elem: PartialEq + Sync,
    D: Dimension + RemoveAxis,
{
    other_spatial_axis(frames.ndim(), axis)?;

    let size = frames.len_of(axis);
    if size == 0 {
        return Err(GridError::EmptyAxis { axis: axis.index() });
    }

    let view = frames.view();
    let edges = (0..size - 1)
        .into_par_iter()
        .map(|i| {
            let here = view.index_axis(axis, i);
            let next = view.index_axis(axis, i + 1);
            here.iter().zip(next.iter()).any(|(a, b)| a != b)
        })
        .collect();

    Ok(edges)
}
