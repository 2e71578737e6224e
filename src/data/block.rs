//! Rectangular multi-channel sample blocks

use crate::config::validate_sample_rate;
use crate::error::WindowError;

/// Gapless multi-channel data stored column-major as `(samples_per_channel, n_channels)`
#[derive(Debug, Clone, PartialEq)]
pub struct MultiChannelBlock {
    data: Vec<f32>,
    samples_per_channel: usize,
    n_channels: usize,
    sample_rate: f64,
}

impl MultiChannelBlock {
    /// Wrap column-major data
    pub fn new(
        data: Vec<f32>,
        samples_per_channel: usize,
        n_channels: usize,
        sample_rate: f64,
    ) -> Result<Self, WindowError> {
        validate_sample_rate(sample_rate)?;
        let expected = samples_per_channel.checked_mul(n_channels).ok_or_else(|| {
            WindowError::InvalidInput(format!(
                "Block of {} x {} overflows the address space",
                samples_per_channel, n_channels
            ))
        })?;
        if data.len() != expected {
            return Err(WindowError::InvalidInput(format!(
                "Block of {} x {} needs {} samples, got {}",
                samples_per_channel,
                n_channels,
                expected,
                data.len()
            )));
        }
        Ok(Self {
            data,
            samples_per_channel,
            n_channels,
            sample_rate,
        })
    }

    /// Build from equal-length channels
    pub fn from_channels(channels: &[Vec<f32>], sample_rate: f64) -> Result<Self, WindowError> {
        let samples_per_channel = channels.first().map_or(0, Vec::len);
        if let Some(bad) = channels.iter().find(|c| c.len() != samples_per_channel) {
            return Err(WindowError::InvalidInput(format!(
                "All channels must have {} samples, found one with {}",
                samples_per_channel,
                bad.len()
            )));
        }
        let data = channels.iter().flatten().copied().collect();
        Self::new(data, samples_per_channel, channels.len(), sample_rate)
    }

    /// Samples per channel
    pub fn samples_per_channel(&self) -> usize {
        self.samples_per_channel
    }

    /// Number of channels
    pub fn n_channels(&self) -> usize {
        self.n_channels
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// All samples of one channel
    pub fn channel(&self, channel: usize) -> Option<&[f32]> {
        if channel >= self.n_channels {
            return None;
        }
        let start = channel * self.samples_per_channel;
        Some(&self.data[start..start + self.samples_per_channel])
    }

    /// Column-major backing data
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

/// Block cut into windows, shaped `(window_samples, n_channels, num_windows)`
#[derive(Debug, Clone, PartialEq)]
pub struct WindowedBlock {
    data: Vec<f32>,
    window_samples: usize,
    n_channels: usize,
    num_windows: usize,
}

impl WindowedBlock {
    pub(crate) fn from_parts(
        data: Vec<f32>,
        window_samples: usize,
        n_channels: usize,
        num_windows: usize,
    ) -> Self {
        debug_assert_eq!(data.len(), window_samples * n_channels * num_windows);
        Self {
            data,
            window_samples,
            n_channels,
            num_windows,
        }
    }

    /// `(window_samples, n_channels, num_windows)`
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.window_samples, self.n_channels, self.num_windows)
    }

    /// Samples of one channel within one window
    pub fn window(&self, channel: usize, window: usize) -> Option<&[f32]> {
        if channel >= self.n_channels || window >= self.num_windows {
            return None;
        }
        let start = self.window_samples * (channel + self.n_channels * window);
        Some(&self.data[start..start + self.window_samples])
    }

    /// Single sample lookup
    pub fn get(&self, sample: usize, channel: usize, window: usize) -> Option<f32> {
        if sample >= self.window_samples {
            return None;
        }
        self.window(channel, window).map(|w| w[sample])
    }

    /// Backing data, sample index fastest, then channel, then window
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}
