//! Axis identification by tensor rank
//!
//! The vertical and horizontal axes are the last two axes whether or not a
//! frame axis is present. The channel axis sits right before them.

use ndarray::Axis;

use super::GridError;

/// Returns the `(vertical, horizontal)` axes of a tensor with `ndim` axes.
pub fn spatial_axes(ndim: usize) -> Result<(Axis, Axis), GridError> {
    if ndim < 2 {
        return Err(GridError::RankTooLow { ndim });
    }
    Ok((Axis(ndim - 2), Axis(ndim - 1)))
}

/// Returns the channel axis of a tensor with `ndim` axes.
pub fn channel_axis(ndim: usize) -> Result<Axis, GridError> {
    if ndim < 3 {
        return Err(GridError::RankTooLow { ndim });
    }
    Ok(Axis(ndim - 3))
}

/// The spatial axis orthogonal to `axis`.
pub(crate) fn other_spatial_axis(ndim: usize, axis: Axis) -> Result<Axis, GridError> {
    let (v_axis, h_axis) = spatial_axes(ndim)?;
    if axis == v_axis {
        Ok(h_axis)
    } else if axis == h_axis {
        Ok(v_axis)
    } else {
        Err(GridError::InvalidAxis { axis: axis.index(), ndim })
    }
}
