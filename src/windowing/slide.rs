//! Sliding windows over a sample array
//!
//! Algorithm:
//! 1. Build the start grid `start, start + cc_step, ...` up to the end time
//! 2. Keep starts whose last sample (`start + cc_len - 1/fs`) fits before the end
//! 3. Equal step and length: reshape contiguous samples, dropping any remainder
//! 4. Otherwise copy each window from its rounded sample offset
//!
//! Grid arithmetic runs on integer microseconds; sample offsets round half
//! away from zero so the reshaping and copying paths agree.
//!
//! # Example
//!
//! ```
//! use seis_windows::slide;
//!
//! let samples: Vec<f32> = (0..3000).map(|i| i as f32).collect();
//! let windows = slide(&samples, 10.0, 5.0, 100.0, 0.0, 29.99)?;
//! assert_eq!(windows.starts(), &[0.0, 5.0, 10.0, 15.0, 20.0]);
//! assert_eq!(windows.window(4).unwrap()[0], 2000.0);
//! # Ok::<(), seis_windows::WindowError>(())
//! ```

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::span::start_end_micros;
use super::Windows;
use crate::config::{validate_len_step, validate_sample_rate, EndBoundary, WindowConfig};
use crate::data::channel::{Channel, Sampling};
use crate::error::WindowError;
use crate::time::{
    checked_seconds_to_micros, micros_to_samples, micros_to_seconds, sample_period_micros,
};

/// Cut `samples` into windows of `cc_len` seconds every `cc_step` seconds
///
/// `start_time` is the time of `samples[0]` and `end_time` the time of the
/// last usable sample, both in Unix seconds. A window is kept while its last
/// sample is at or before `end_time`.
///
/// # Arguments
///
/// * `samples` - Regularly sampled data
/// * `cc_len` - Window length in seconds
/// * `cc_step` - Step between window starts in seconds
/// * `sample_rate` - Sample rate in Hz
/// * `start_time` - Time of the first sample (Unix seconds)
/// * `end_time` - Time of the last usable sample (Unix seconds)
///
/// # Returns
///
/// Windows and their start times, positionally paired. Empty when no window
/// fits between `start_time` and `end_time`.
///
/// # Errors
///
/// Returns `WindowError::InvalidInput` for non-positive lengths or rate, a
/// window shorter than one sample, non-finite times, or `end_time < start_time`.
pub fn slide(
    samples: &[f32],
    cc_len: f64,
    cc_step: f64,
    sample_rate: f64,
    start_time: f64,
    end_time: f64,
) -> Result<Windows, WindowError> {
    let config = WindowConfig::new(cc_len, cc_step);
    slide_with(samples, sample_rate, start_time, end_time, &config)
}

/// [`slide`] with the window length, step and end comparison taken from `config`
pub fn slide_with(
    samples: &[f32],
    sample_rate: f64,
    start_time: f64,
    end_time: f64,
    config: &WindowConfig,
) -> Result<Windows, WindowError> {
    validate_len_step(config.cc_len, config.cc_step)?;
    validate_sample_rate(sample_rate)?;

    let start_us = checked_seconds_to_micros(start_time, "Start time")?;
    let end_us = checked_seconds_to_micros(end_time, "End time")?;

    if end_time < start_time {
        return Err(WindowError::InvalidInput(format!(
            "End time {} precedes start time {}",
            end_time, start_time
        )));
    }

    let window_samples = (config.cc_len * sample_rate).round() as usize;
    if window_samples == 0 {
        return Err(WindowError::InvalidInput(format!(
            "Window of {} s at {} Hz holds no samples",
            config.cc_len, sample_rate
        )));
    }

    let len_us = checked_seconds_to_micros(config.cc_len, "cc_len")?;
    let step_us = checked_seconds_to_micros(config.cc_step, "cc_step")?;
    if step_us == 0 {
        return Err(WindowError::InvalidInput(format!(
            "Step of {} s is below one microsecond",
            config.cc_step
        )));
    }

    log::debug!(
        "Sliding {} samples: cc_len={} s ({} samples), cc_step={} s, fs={} Hz, span=[{}, {}]",
        samples.len(),
        config.cc_len,
        window_samples,
        config.cc_step,
        sample_rate,
        start_time,
        end_time
    );

    let grid = window_grid(
        start_us,
        end_us,
        len_us,
        step_us,
        sample_period_micros(sample_rate),
        config.end_boundary,
        max_windows(samples.len(), window_samples, micros_to_samples(step_us, sample_rate)),
    );

    if grid.is_empty() {
        log::warn!(
            "No {} s window fits between {} and {}, returning no windows",
            config.cc_len,
            start_time,
            end_time
        );
        return Ok(Windows::empty(window_samples));
    }

    let windows = if step_us == len_us {
        reshape_contiguous(samples, window_samples, &grid)
    } else {
        copy_overlapping(samples, window_samples, sample_rate, start_us, &grid)
    };

    log::debug!("Cut {} windows of {} samples", windows.len(), window_samples);

    Ok(windows)
}

/// Slide over a channel, taking start and end from its recorded span
///
/// Samples are treated as contiguous, so gaps should be merged or filled
/// before calling this on gapped data.
///
/// # Errors
///
/// Returns `WindowError::InvalidInput` for irregularly sampled channels, plus
/// everything [`slide`] can return.
pub fn slide_channel(
    channel: &Channel,
    cc_len: f64,
    cc_step: f64,
) -> Result<Windows, WindowError> {
    let sample_rate = match channel.sampling() {
        Sampling::Regular(rate) => rate,
        Sampling::Irregular => {
            return Err(WindowError::InvalidInput(
                "Cannot slide over irregularly sampled data".to_string(),
            ))
        }
    };

    let (start, end) = start_end_micros(channel)?;
    slide(
        channel.samples(),
        cc_len,
        cc_step,
        sample_rate,
        micros_to_seconds(start),
        micros_to_seconds(end),
    )
}

/// Slide over every channel, returning one result per channel in input order
///
/// Channels are independent, so with the `parallel` feature they are
/// processed on the rayon thread pool.
pub fn slide_all(
    channels: &[Channel],
    cc_len: f64,
    cc_step: f64,
) -> Vec<Result<Windows, WindowError>> {
    log::debug!("Sliding {} channels", channels.len());

    #[cfg(feature = "parallel")]
    let results = channels
        .par_iter()
        .map(|channel| slide_channel(channel, cc_len, cc_step))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let results = channels
        .iter()
        .map(|channel| slide_channel(channel, cc_len, cc_step))
        .collect();

    results
}

/// Upper bound on the windows `n_samples` can hold at `step_samples` spacing
///
/// Counts offsets `k * step_samples` that round to at most
/// `n_samples - window_samples`.
fn max_windows(n_samples: usize, window_samples: usize, step_samples: f64) -> usize {
    if n_samples < window_samples {
        return 0;
    }
    let room = (n_samples - window_samples) as f64 + 0.5;
    (room / step_samples).floor() as usize + 1
}

/// Window start times (us) whose last sample fits before `end_us`
///
/// Ends grow with starts, so the grid stops at the first violation. It also
/// stops after `max_windows` starts or when the next start leaves `i64`.
fn window_grid(
    start_us: i64,
    end_us: i64,
    len_us: i64,
    step_us: i64,
    period_us: i64,
    boundary: EndBoundary,
    max_windows: usize,
) -> Vec<i64> {
    let mut grid = Vec::new();
    let mut next = Some(start_us);
    while let Some(start) = next {
        if start > end_us {
            break;
        }
        match start.checked_add(len_us - period_us) {
            Some(window_end) if boundary.admits(window_end, end_us) => {}
            _ => break,
        }
        if grid.len() == max_windows {
            log::warn!(
                "End time runs past the data, keeping the {} windows the samples hold",
                max_windows
            );
            break;
        }
        grid.push(start);
        next = start.checked_add(step_us);
    }
    grid
}

/// Non-overlapping windows: leading samples reshaped in place
fn reshape_contiguous(samples: &[f32], window_samples: usize, grid: &[i64]) -> Windows {
    let whole = samples.len() / window_samples;
    let remainder = samples.len() % window_samples;
    if remainder != 0 {
        log::warn!(
            "Dropping {} trailing samples that do not fill a {} sample window",
            remainder,
            window_samples
        );
    }

    let count = whole.min(grid.len());
    if count != grid.len() || count != whole {
        log::warn!(
            "Time grid holds {} windows but data holds {}, keeping {}",
            grid.len(),
            whole,
            count
        );
    }

    let data = samples[..count * window_samples].to_vec();
    let starts = grid[..count].iter().map(|&s| micros_to_seconds(s)).collect();
    Windows::from_parts(data, window_samples, starts)
}

/// Overlapping or gapped windows: each copied from its rounded sample offset
fn copy_overlapping(
    samples: &[f32],
    window_samples: usize,
    sample_rate: f64,
    start_us: i64,
    grid: &[i64],
) -> Windows {
    let mut data = Vec::with_capacity(window_samples * grid.len());
    let mut starts = Vec::with_capacity(grid.len());

    for &window_start in grid {
        let first = micros_to_samples(window_start - start_us, sample_rate).round() as usize;
        let last = first + window_samples;
        if last > samples.len() {
            log::warn!(
                "Window at sample {} runs past the {} available samples, stopping",
                first + 1,
                samples.len()
            );
            break;
        }
        data.extend_from_slice(&samples[first..last]);
        starts.push(micros_to_seconds(window_start));
    }

    Windows::from_parts(data, window_samples, starts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Vec<f32> {
        (0..n).map(|i| i as f32).collect()
    }

    #[test]
    fn test_overlapping_windows_100hz() {
        let samples = ramp(3000);
        let windows = slide(&samples, 10.0, 5.0, 100.0, 0.0, 29.99).unwrap();

        assert_eq!(windows.starts(), &[0.0, 5.0, 10.0, 15.0, 20.0]);
        assert_eq!(windows.window_samples(), 1000);
        for (i, (_, window)) in windows.iter().enumerate() {
            assert_eq!(window.len(), 1000);
            assert_eq!(window[0], (i * 500) as f32);
        }
        // 1-based sample 2001
        assert_eq!(windows.window(4).unwrap()[0], 2000.0);
    }

    #[test]
    fn test_end_equal_to_window_end_is_kept() {
        let samples = ramp(3001);
        let windows = slide(&samples, 10.0, 5.0, 100.0, 0.0, 30.0).unwrap();
        assert_eq!(windows.len(), 5);
    }

    #[test]
    fn test_exclusive_boundary_drops_touching_window() {
        let samples = ramp(3000);
        let config = WindowConfig {
            end_boundary: EndBoundary::Exclusive,
            ..WindowConfig::new(10.0, 5.0)
        };
        let windows = slide_with(&samples, 100.0, 0.0, 29.99, &config).unwrap();
        assert_eq!(windows.starts(), &[0.0, 5.0, 10.0, 15.0]);
    }

    #[test]
    fn test_equal_step_reshapes_exactly() {
        let samples = ramp(40);
        let windows = slide(&samples, 10.0, 10.0, 1.0, 100.0, 139.0).unwrap();
        assert_eq!(windows.len(), 4);
        assert_eq!(windows.starts(), &[100.0, 110.0, 120.0, 130.0]);
        assert_eq!(windows.as_slice(), samples.as_slice());
    }

    #[test]
    fn test_equal_step_truncates_remainder() {
        let samples = ramp(45);
        let windows = slide(&samples, 10.0, 10.0, 1.0, 0.0, 44.0).unwrap();
        assert_eq!(windows.len(), 4);
        assert_eq!(windows.as_slice(), &samples[..40]);
    }

    #[test]
    fn test_span_shorter_than_window_is_empty() {
        let samples = ramp(50);
        let windows = slide(&samples, 10.0, 5.0, 10.0, 0.0, 4.9).unwrap();
        assert!(windows.is_empty());
        assert_eq!(windows.window_samples(), 100);
    }

    #[test]
    fn test_step_longer_than_window_skips_samples() {
        let samples = ramp(100);
        let windows = slide(&samples, 2.0, 5.0, 10.0, 0.0, 9.9).unwrap();
        assert_eq!(windows.starts(), &[0.0, 5.0]);
        assert_eq!(windows.window(1).unwrap()[0], 50.0);
        assert_eq!(windows.window(1).unwrap().len(), 20);
    }

    #[test]
    fn test_window_past_array_stops() {
        // end time claims more data than the array holds
        let samples = ramp(25);
        let windows = slide(&samples, 10.0, 5.0, 1.0, 0.0, 40.0).unwrap();
        assert_eq!(windows.starts(), &[0.0, 5.0, 10.0, 15.0]);
    }

    #[test]
    fn test_far_end_time_is_bounded_by_samples() {
        // 100 samples at 10 Hz against an end time decades away
        let samples = ramp(100);
        let windows = slide(&samples, 2.0, 1.0, 10.0, 0.0, 1e9).unwrap();
        assert_eq!(windows.len(), 9);
        assert_eq!(windows.starts()[8], 8.0);

        let windows = slide(&samples, 2.0, 2.0, 10.0, 0.0, 1e9).unwrap();
        assert_eq!(windows.len(), 5);
        assert_eq!(windows.as_slice(), samples.as_slice());
    }

    #[test]
    fn test_grid_stops_before_i64_overflow() {
        let end = i64::MAX - 1;
        let start = end - 5_000_000;
        let grid = window_grid(
            start,
            end,
            2_000_000,
            2_000_000,
            1_000_000,
            EndBoundary::Inclusive,
            usize::MAX,
        );
        assert_eq!(grid, vec![start, start + 2_000_000, start + 4_000_000]);

        // next start would overflow
        let grid = window_grid(
            end - 1,
            end,
            1,
            i64::MAX,
            1,
            EndBoundary::Inclusive,
            usize::MAX,
        );
        assert_eq!(grid, vec![end - 1]);
    }

    #[test]
    fn test_max_windows() {
        assert_eq!(max_windows(5, 10, 1.0), 0);
        assert_eq!(max_windows(10, 10, 3.0), 1);
        assert_eq!(max_windows(45, 10, 10.0), 4);
        // offset 10.3 rounds to 10, which still fits
        assert_eq!(max_windows(20, 10, 10.3), 2);
    }

    #[test]
    fn test_non_finite_times_rejected() {
        let samples = ramp(100);
        assert!(matches!(
            slide(&samples, 2.0, 1.0, 10.0, f64::NAN, 9.9),
            Err(WindowError::InvalidInput(_))
        ));
        assert!(matches!(
            slide(&samples, 2.0, 1.0, 10.0, 0.0, f64::INFINITY),
            Err(WindowError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_invalid_parameters() {
        let samples = ramp(100);
        assert!(slide(&samples, 0.0, 5.0, 10.0, 0.0, 9.9).is_err());
        assert!(slide(&samples, 10.0, 0.0, 10.0, 0.0, 9.9).is_err());
        assert!(slide(&samples, 10.0, 5.0, 0.0, 0.0, 9.9).is_err());
        assert!(slide(&samples, 10.0, 5.0, 10.0, 9.9, 0.0).is_err());
        assert!(slide(&samples, 0.01, 0.01, 10.0, 0.0, 9.9).is_err());
    }

    #[test]
    fn test_slide_channel_uses_span() {
        let channel = Channel::regular(ramp(600), 20.0, 1_600_000_000_000_000).unwrap();
        let windows = slide_channel(&channel, 10.0, 10.0).unwrap();
        assert_eq!(windows.len(), 3);
        assert_eq!(windows.starts()[0], 1_600_000_000.0);
        assert_eq!(windows.starts()[2], 1_600_000_020.0);
    }

    #[test]
    fn test_slide_channel_rejects_irregular() {
        let channel = Channel::irregular(vec![0.0; 3], &[0, 1, 2]).unwrap();
        assert!(matches!(
            slide_channel(&channel, 1.0, 1.0),
            Err(WindowError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_slide_all_keeps_order() {
        let channels = vec![
            Channel::regular(ramp(100), 10.0, 0).unwrap(),
            Channel::irregular(vec![0.0; 2], &[0, 1]).unwrap(),
            Channel::regular(ramp(300), 10.0, 0).unwrap(),
        ];
        let results = slide_all(&channels, 5.0, 5.0);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().len(), 2);
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().len(), 6);
    }
}
