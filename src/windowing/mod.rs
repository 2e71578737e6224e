//! Windowing and alignment modules
//!
//! Cutting channels into fixed-length windows anchored to absolute time:
//! - Span computation (start/end of recorded data)
//! - Sliding windows
//! - Midnight-aligned window boundaries
//! - Time-to-index mapping
//! - Record synchronization
//! - Fixed-grid slicing of multi-channel blocks

pub mod boundary;
pub mod grid;
pub mod index;
pub mod slide;
pub mod span;
pub mod sync;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::WindowError;
use crate::time::{micros_to_datetime, seconds_to_micros};

/// Fixed-length windows paired with their absolute start times
///
/// Samples are stored column-major: window `i` occupies
/// `data[i * window_samples..(i + 1) * window_samples]` and starts at `starts[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Windows {
    data: Vec<f32>,
    window_samples: usize,
    starts: Vec<f64>,
}

impl Windows {
    pub(crate) fn from_parts(data: Vec<f32>, window_samples: usize, starts: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), window_samples * starts.len());
        Self {
            data,
            window_samples,
            starts,
        }
    }

    pub(crate) fn empty(window_samples: usize) -> Self {
        Self::from_parts(Vec::new(), window_samples, Vec::new())
    }

    /// Number of windows
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    /// Whether no window fit in the requested range
    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Samples per window
    pub fn window_samples(&self) -> usize {
        self.window_samples
    }

    /// Samples of window `index`
    pub fn window(&self, index: usize) -> Option<&[f32]> {
        if index >= self.len() {
            return None;
        }
        let start = index * self.window_samples;
        Some(&self.data[start..start + self.window_samples])
    }

    /// Iterate over `(start_time, samples)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (f64, &[f32])> + '_ {
        self.starts
            .iter()
            .copied()
            .zip(self.data.chunks_exact(self.window_samples.max(1)))
    }

    /// Window start times in Unix seconds
    pub fn starts(&self) -> &[f64] {
        &self.starts
    }

    /// Window start times as UTC timestamps
    pub fn start_times(&self) -> Result<Vec<DateTime<Utc>>, WindowError> {
        self.starts
            .iter()
            .map(|&s| micros_to_datetime(seconds_to_micros(s)))
            .collect()
    }

    /// Column-major backing data
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Split into owned per-window vectors and start times
    pub fn into_columns(self) -> (Vec<Vec<f32>>, Vec<f64>) {
        let columns = self
            .data
            .chunks_exact(self.window_samples.max(1))
            .map(<[f32]>::to_vec)
            .collect();
        (columns, self.starts)
    }
}
