//! # Seis Windows
//!
//! Windowing and temporal alignment for continuous seismic waveform data.
//! Channels are cut into fixed-length, possibly overlapping windows anchored
//! to absolute clock time, ready for spectral analysis and cross-correlation.
//!
//! ## Features
//!
//! - **Span computation**: gap-aware start/end times for regular and irregular data
//! - **Sliding windows**: overlapping or contiguous windows with paired start times
//! - **Midnight alignment**: window grids shared across days and stations
//! - **Synchronization**: filter time-stamped records to a common range
//! - **Fixed-grid slicing**: reshape gapless multi-channel blocks
//!
//! ## Quick Start
//!
//! ```
//! use seis_windows::{window_channel, Channel, WindowConfig};
//!
//! // One hour at 20 Hz starting 2020-01-01T00:00:00Z
//! let channel = Channel::regular(vec![0.0; 72_000], 20.0, 1_577_836_800_000_000)?;
//!
//! let windows = window_channel(&channel, &WindowConfig::new(600.0, 300.0))?;
//! assert_eq!(windows.len(), 11);
//! assert_eq!(windows.window_samples(), 12_000);
//! # Ok::<(), seis_windows::WindowError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Channel → Span → Midnight Alignment → Index Mapping → Sliding Windows
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod data;
pub mod error;
pub mod time;
pub mod windowing;

// Re-export main types
pub use config::{EndBoundary, WindowConfig};
pub use data::block::{MultiChannelBlock, WindowedBlock};
pub use data::channel::{Channel, Sampling, TimeSegment};
pub use data::record::{Record, Stamped};
pub use error::WindowError;
pub use windowing::boundary::{
    nearest_start_end, nearest_start_end_calendar, nearest_start_end_channel,
};
pub use windowing::grid::slice;
pub use windowing::index::{slide_ind, SampleRange};
pub use windowing::slide::{slide, slide_all, slide_channel, slide_with};
pub use windowing::span::{start_end, start_end_all, start_end_micros};
pub use windowing::sync::{sync, sync_indices, TimeBound};
pub use windowing::Windows;

use time::{micros_to_seconds, round_digits};

/// Main windowing function
///
/// Computes the channel's span, optionally snaps it to the midnight-anchored
/// window grid, maps the result to sample indices and slides over that range.
///
/// # Arguments
///
/// * `channel` - Regularly sampled, gapless channel
/// * `config` - Window length, step and boundary handling
///
/// # Returns
///
/// `Windows` whose start times lie on the configured grid
///
/// # Errors
///
/// Returns `WindowError` if the channel is irregularly sampled or has gaps,
/// the configuration is invalid, or no aligned window fits in the data.
/// Samples are cut as one contiguous run, so gapped channels must be merged
/// or filled first.
pub fn window_channel(channel: &Channel, config: &WindowConfig) -> Result<Windows, WindowError> {
    config.validate()?;

    let sample_rate = channel.sample_rate().ok_or_else(|| {
        WindowError::InvalidInput("Cannot window irregularly sampled data".to_string())
    })?;

    let gap = channel.gap_micros();
    if gap != 0 {
        return Err(WindowError::InvalidInput(format!(
            "Cannot window gapped data ({} us missing across {} segments), merge or fill gaps first",
            gap,
            channel.segments().len()
        )));
    }

    log::debug!(
        "Windowing channel: {} samples at {} Hz, {} segments",
        channel.len(),
        sample_rate,
        channel.segments().len()
    );

    let (su, eu) = start_end_micros(channel)?;
    let (su, eu) = (micros_to_seconds(su), micros_to_seconds(eu));

    let (start, end) = if config.align_to_midnight {
        nearest_start_end(su, eu, sample_rate, config.cc_len, config.cc_step)?
    } else {
        (
            round_digits(su, config.time_digits),
            round_digits(eu, config.time_digits),
        )
    };

    let range = slide_ind(start, end, sample_rate, channel.segments())?.as_range();
    let samples = channel.samples();
    if range.start >= samples.len() {
        return Err(WindowError::InvalidRange(format!(
            "Aligned start at sample {} is past the {} available samples",
            range.start + 1,
            samples.len()
        )));
    }
    let range = range.start..range.end.min(samples.len());

    log::debug!(
        "Aligned span [{}, {}] covers samples {}..{}",
        start,
        end,
        range.start + 1,
        range.end
    );

    slide_with(&samples[range], sample_rate, start, end, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY_US: i64 = 1_577_836_800_000_000;

    #[test]
    fn test_window_channel_aligns_to_grid() {
        // starts 00:00:07 so the first aligned window is at 00:05:00
        let start_us = DAY_US + 7_000_000;
        let samples: Vec<f32> = (0..36_000).map(|i| i as f32).collect();
        let channel = Channel::regular(samples, 10.0, start_us).unwrap();

        let windows = window_channel(&channel, &WindowConfig::new(600.0, 300.0)).unwrap();
        let day = micros_to_seconds(DAY_US);
        assert_eq!(windows.starts()[0], day + 300.0);
        // (300 - 7) s into the data at 10 Hz
        assert_eq!(windows.window(0).unwrap()[0], 2930.0);
        // last aligned window ends at 00:59:59.9 and starts at 00:50:00
        assert_eq!(*windows.starts().last().unwrap(), day + 3000.0);
        assert_eq!(windows.len(), 10);
    }

    #[test]
    fn test_window_channel_without_alignment() {
        let channel = Channel::regular(vec![1.0; 1000], 10.0, DAY_US + 7_000_000).unwrap();
        let config = WindowConfig {
            align_to_midnight: false,
            ..WindowConfig::new(20.0, 20.0)
        };
        let windows = window_channel(&channel, &config).unwrap();
        assert_eq!(windows.len(), 5);
        assert_eq!(windows.starts()[0], micros_to_seconds(DAY_US + 7_000_000));
    }

    #[test]
    fn test_window_channel_too_short() {
        let channel = Channel::regular(vec![0.0; 100], 1.0, DAY_US).unwrap();
        let result = window_channel(&channel, &WindowConfig::default());
        assert!(matches!(result, Err(WindowError::InvalidRange(_))));
    }

    #[test]
    fn test_window_channel_rejects_gaps() {
        // 100 s outage before sample 101 would shift every later window
        let samples: Vec<f32> = (0..200).map(|i| i as f32).collect();
        let channel = Channel::with_gaps(samples, 1.0, DAY_US, &[(101, 100_000_000)]).unwrap();
        let config = WindowConfig {
            align_to_midnight: false,
            ..WindowConfig::new(50.0, 50.0)
        };
        assert!(matches!(
            window_channel(&channel, &config),
            Err(WindowError::InvalidInput(_))
        ));

        // a zero-length gap leaves the timeline intact
        let samples: Vec<f32> = (0..200).map(|i| i as f32).collect();
        let channel = Channel::with_gaps(samples, 1.0, DAY_US, &[(101, 0)]).unwrap();
        let windows = window_channel(&channel, &config).unwrap();
        assert_eq!(windows.len(), 4);
        assert_eq!(windows.window(2).unwrap()[0], 100.0);
    }

    #[test]
    fn test_window_channel_irregular() {
        let channel = Channel::irregular(vec![0.0; 2], &[0, 10]).unwrap();
        assert!(window_channel(&channel, &WindowConfig::default()).is_err());
    }
}
