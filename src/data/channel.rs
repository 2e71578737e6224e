//! Single-channel time series with gap-aware timing

use serde::{Deserialize, Serialize};

use crate::config::validate_sample_rate;
use crate::error::WindowError;

/// How a channel was sampled
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Sampling {
    /// Regularly sampled at the given rate in Hz
    Regular(f64),
    /// Irregularly sampled; every time segment is a discrete timestamped sample
    Irregular,
}

impl Sampling {
    /// Map a raw rate where `0.0` marks irregular data
    pub fn from_rate(sample_rate: f64) -> Self {
        if sample_rate == 0.0 {
            Sampling::Irregular
        } else {
            Sampling::Regular(sample_rate)
        }
    }

    /// Sample rate in Hz, `None` for irregular data
    pub fn rate(&self) -> Option<f64> {
        match self {
            Sampling::Regular(rate) => Some(*rate),
            Sampling::Irregular => None,
        }
    }
}

/// One row of a channel's timing table
///
/// The first row is always `(1, start_time_us)`. For regular data each later
/// row marks the first sample after a gap and holds the gap length in
/// microseconds. For irregular data each row holds the absolute timestamp of
/// its sample in microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSegment {
    /// 1-based sample index
    pub sample_index: usize,
    /// Start time, gap length or sample timestamp in microseconds
    pub micros: i64,
}

impl TimeSegment {
    /// Create a timing row
    pub fn new(sample_index: usize, micros: i64) -> Self {
        Self {
            sample_index,
            micros,
        }
    }
}

/// A recorded time series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Channel {
    samples: Vec<f32>,
    sampling: Sampling,
    segments: Vec<TimeSegment>,
}

impl Channel {
    /// Create a channel, validating the timing table
    ///
    /// # Errors
    ///
    /// Returns `WindowError::InvalidInput` if the samples are empty, the rate is
    /// not positive, or the segments are not a sorted table starting at sample 1
    /// and ending within the samples.
    pub fn new(
        samples: Vec<f32>,
        sampling: Sampling,
        segments: Vec<TimeSegment>,
    ) -> Result<Self, WindowError> {
        if samples.is_empty() {
            return Err(WindowError::InvalidInput(
                "Channel has no samples".to_string(),
            ));
        }

        if let Sampling::Regular(rate) = sampling {
            validate_sample_rate(rate)?;
        }

        let first = segments.first().ok_or_else(|| {
            WindowError::InvalidInput("Channel has no time segments".to_string())
        })?;
        if first.sample_index != 1 {
            return Err(WindowError::InvalidInput(format!(
                "First time segment must start at sample 1, got {}",
                first.sample_index
            )));
        }

        for pair in segments.windows(2) {
            if pair[1].sample_index <= pair[0].sample_index {
                return Err(WindowError::InvalidInput(format!(
                    "Time segments must be sorted by sample index ({} follows {})",
                    pair[1].sample_index, pair[0].sample_index
                )));
            }
        }

        // Sorted, so checking the tail bounds every row
        if let Some(last) = segments.last() {
            if last.sample_index > samples.len() {
                return Err(WindowError::InvalidInput(format!(
                    "Time segment at sample {} exceeds channel length {}",
                    last.sample_index,
                    samples.len()
                )));
            }
        }

        if sampling == Sampling::Irregular {
            for pair in segments.windows(2) {
                if pair[1].micros < pair[0].micros {
                    return Err(WindowError::InvalidInput(
                        "Irregular sample timestamps must not decrease".to_string(),
                    ));
                }
            }
        } else if segments.iter().skip(1).any(|s| s.micros < 0) {
            return Err(WindowError::InvalidInput(
                "Gap lengths must not be negative".to_string(),
            ));
        }

        Ok(Self {
            samples,
            sampling,
            segments,
        })
    }

    /// Gapless, regularly sampled channel starting at `start_micros`
    pub fn regular(
        samples: Vec<f32>,
        sample_rate: f64,
        start_micros: i64,
    ) -> Result<Self, WindowError> {
        Self::new(
            samples,
            Sampling::Regular(sample_rate),
            vec![TimeSegment::new(1, start_micros)],
        )
    }

    /// Regularly sampled channel with gaps
    ///
    /// Each `(sample_index, gap_micros)` pair marks the 1-based sample at which
    /// recording resumed and how long the preceding gap lasted.
    pub fn with_gaps(
        samples: Vec<f32>,
        sample_rate: f64,
        start_micros: i64,
        gaps: &[(usize, i64)],
    ) -> Result<Self, WindowError> {
        let mut segments = Vec::with_capacity(gaps.len() + 1);
        segments.push(TimeSegment::new(1, start_micros));
        segments.extend(gaps.iter().map(|&(index, gap)| TimeSegment::new(index, gap)));
        Self::new(samples, Sampling::Regular(sample_rate), segments)
    }

    /// Irregularly sampled channel with one timestamp per sample
    pub fn irregular(samples: Vec<f32>, timestamps_micros: &[i64]) -> Result<Self, WindowError> {
        if timestamps_micros.len() != samples.len() {
            return Err(WindowError::InvalidInput(format!(
                "Expected {} timestamps, got {}",
                samples.len(),
                timestamps_micros.len()
            )));
        }
        let segments = timestamps_micros
            .iter()
            .enumerate()
            .map(|(i, &t)| TimeSegment::new(i + 1, t))
            .collect();
        Self::new(samples, Sampling::Irregular, segments)
    }

    /// Sample values
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Sampling mode
    pub fn sampling(&self) -> Sampling {
        self.sampling
    }

    /// Sample rate in Hz, `None` when irregularly sampled
    pub fn sample_rate(&self) -> Option<f64> {
        self.sampling.rate()
    }

    /// Timing table
    pub fn segments(&self) -> &[TimeSegment] {
        &self.segments
    }

    /// Start time in microseconds since the epoch
    pub fn start_micros(&self) -> i64 {
        self.segments[0].micros
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the channel has no samples (never true for a validated channel)
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Total gap time in microseconds (always zero for irregular data)
    pub fn gap_micros(&self) -> i64 {
        match self.sampling {
            Sampling::Regular(_) => self.segments.iter().skip(1).map(|s| s.micros).sum(),
            Sampling::Irregular => 0,
        }
    }
}
