//! Canonical color for fully transparent pixels
//!
//! Encoders are free to leave arbitrary color values behind alpha 0. Those
//! values would show up as edges during grid inference, so every fully
//! transparent pixel gets the same color before analysis.

use ndarray::{Array, ArrayBase, DataMut, Dimension};

use super::axes::channel_axis;
use super::GridError;

/// Number of color channels overwritten in front of the alpha channel.
const COLOR_CHANNELS: usize = 3;

/// Overwrite the color channels of every fully transparent pixel with `fill`.
///
/// The alpha channel is the last channel and "fully transparent" is the
/// element type's default (0). Mutates `frames` in place in a single pass.
///
/// # Errors
///
/// * `GridError::MissingAlpha` if the channel axis has fewer than 4 channels
pub fn normalize_transparent<S, D>(
    frames: &mut ArrayBase<S, D>,
    fill: [S::Elem; COLOR_CHANNELS],
) -> Result<(), GridError>
where
    S: DataMut,
    S::Elem: Copy + PartialEq + Default,
    D: Dimension,
{
    let c_axis = channel_axis(frames.ndim())?;
    let channels = frames.len_of(c_axis);
    if channels <= COLOR_CHANNELS {
        return Err(GridError::MissingAlpha { channels });
    }

    let transparent = S::Elem::default();
    for mut pixel in frames.lanes_mut(c_axis) {
        if pixel[channels - 1] == transparent {
            for (channel, &value) in fill.iter().enumerate() {
                pixel[channel] = value;
            }
        }
    }
    Ok(())
}

/// Consuming form of [`normalize_transparent`].
pub fn into_normalized<A, D>(
    mut frames: Array<A, D>,
    fill: [A; COLOR_CHANNELS],
) -> Result<Array<A, D>, GridError>
where
    A: Copy + PartialEq + Default,
    D: Dimension,
{
    normalize_transparent(&mut frames, fill)?;
    Ok(frames)
}
