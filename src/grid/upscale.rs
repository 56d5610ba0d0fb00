//! Nearest-neighbor integer upscaling

use std::iter;

use ndarray::{Array, ArrayBase, Data, Dimension, RemoveAxis};

use super::axes::spatial_axes;
use super::{GridError, OutputScale};

/// Repeat every sample `scale.vertical` times vertically and
/// `scale.horizontal` times horizontally.
///
/// A single integer applies the same factor to both axes. The output's spatial
/// extent is exactly `(height * vertical, width * horizontal)`.
///
/// # Errors
///
/// * `GridError::ZeroScale` if either factor is 0
pub fn integer_upscale<S, D>(
    frames: &ArrayBase<S, D>,
    scale: impl Into<OutputScale>,
) -> Result<Array<S::Elem, D>, GridError>
where
    S: Data,
    S::Elem: Clone,
    D: Dimension + RemoveAxis,
{
    let scale = scale.into();
    if scale.vertical == 0 || scale.horizontal == 0 {
        return Err(GridError::ZeroScale);
    }
    let (v_axis, h_axis) = spatial_axes(frames.ndim())?;

    let rows = repeated_positions(frames.len_of(v_axis), scale.vertical);
    let cols = repeated_positions(frames.len_of(h_axis), scale.horizontal);

    let frames = frames.select(v_axis, &rows);
    Ok(frames.select(h_axis, &cols))
}

/// `0, 0, .., 1, 1, ..`: every position in `0..len` repeated `factor` times.
fn repeated_positions(len: usize, factor: usize) -> Vec<usize> {
    (0..len).flat_map(|i| iter::repeat(i).take(factor)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array3};

    #[test]
    fn test_upscale_pair() {
        let frames = array![[[1u8, 2], [3, 4]]];
        let upscaled = integer_upscale(&frames, OutputScale::new(2, 3)).unwrap();
        assert_eq!(
            upscaled,
            array![[
                [1u8, 1, 1, 2, 2, 2],
                [1, 1, 1, 2, 2, 2],
                [3, 3, 3, 4, 4, 4],
                [3, 3, 3, 4, 4, 4],
            ]]
        );
    }

    #[test]
    fn test_upscale_scalar_applies_to_both_axes() {
        let frames = Array3::<u8>::zeros((4, 3, 5));
        let upscaled = integer_upscale(&frames, 4usize).unwrap();
        assert_eq!(upscaled.shape(), &[4, 12, 20]);
    }

    #[test]
    fn test_upscale_by_one_is_identity() {
        let frames = array![[[1u8, 2, 3]], [[4, 5, 6]]];
        assert_eq!(integer_upscale(&frames, 1usize).unwrap(), frames);
    }

    #[test]
    fn test_upscale_rejects_zero() {
        let frames = Array3::<u8>::zeros((4, 3, 5));
        assert_eq!(integer_upscale(&frames, (0usize, 2usize)), Err(GridError::ZeroScale));
    }

    #[test]
    fn test_repeated_positions() {
        assert_eq!(repeated_positions(3, 2), vec![0, 0, 1, 1, 2, 2]);
        assert!(repeated_positions(0, 5).is_empty());
    }
}
