//! Fixed-grid slicing of gapless multi-channel blocks

use crate::data::block::{MultiChannelBlock, WindowedBlock};
use crate::error::WindowError;

/// Tolerance when checking that a window holds a whole number of samples
const INTEGER_TOLERANCE: f64 = 1e-9;

/// Cut every channel of `block` into consecutive windows of `win_len` seconds
///
/// # Returns
///
/// A block shaped `(window_samples, n_channels, num_windows)`
///
/// # Errors
///
/// Returns `WindowError::ShapeConstraintViolation` unless `win_len * fs` is a
/// whole number of samples that divides the per-channel length.
pub fn slice(block: &MultiChannelBlock, win_len: f64) -> Result<WindowedBlock, WindowError> {
    let exact = win_len * block.sample_rate();
    let window_samples = exact.round();
    if !exact.is_finite() || window_samples < 1.0 || (exact - window_samples).abs() > INTEGER_TOLERANCE
    {
        return Err(WindowError::ShapeConstraintViolation(format!(
            "Window of {} s at {} Hz is not a whole number of samples",
            win_len,
            block.sample_rate()
        )));
    }
    let window_samples = window_samples as usize;

    let samples_per_channel = block.samples_per_channel();
    if samples_per_channel % window_samples != 0 {
        return Err(WindowError::ShapeConstraintViolation(format!(
            "{} samples per channel is not divisible by a {} sample window",
            samples_per_channel, window_samples
        )));
    }

    let n_channels = block.n_channels();
    let num_windows = samples_per_channel / window_samples;

    log::debug!(
        "Slicing {} channels x {} samples into {} windows of {} samples",
        n_channels,
        samples_per_channel,
        num_windows,
        window_samples
    );

    let mut data = Vec::with_capacity(block.as_slice().len());
    for window in 0..num_windows {
        let offset = window * window_samples;
        for channel in 0..n_channels {
            let start = channel * samples_per_channel + offset;
            data.extend_from_slice(&block.as_slice()[start..start + window_samples]);
        }
    }

    Ok(WindowedBlock::from_parts(
        data,
        window_samples,
        n_channels,
        num_windows,
    ))
}
