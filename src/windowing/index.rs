//! Absolute time to sample index mapping

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::config::validate_sample_rate;
use crate::data::channel::TimeSegment;
use crate::error::WindowError;
use crate::time::{checked_seconds_to_micros, micros_to_samples, round_digits};

/// Decimal digits kept on fractional sample offsets before snapping
const OFFSET_DIGITS: i32 = 4;

/// Inclusive 1-based sample bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRange {
    /// First sample (1-based)
    pub first: usize,
    /// Last sample (1-based, inclusive)
    pub last: usize,
}

impl SampleRange {
    /// Number of samples covered
    pub fn len(&self) -> usize {
        self.last + 1 - self.first
    }

    /// Always false; a range covers at least one sample
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Equivalent 0-based half-open range for slicing
    pub fn as_range(&self) -> Range<usize> {
        self.first - 1..self.last
    }
}

/// Map `[start_slice, end_slice]` (Unix seconds) to sample indices
///
/// Offsets are measured from the first time segment, rounded to four decimal
/// digits, then snapped half away from zero to the nearest sample.
///
/// # Errors
///
/// Returns `WindowError::InvalidRange` if the slice starts before the data or
/// ends before it starts, and `WindowError::InvalidInput` for non-finite bounds.
///
/// # Example
///
/// ```
/// use seis_windows::{slide_ind, TimeSegment};
///
/// let segments = [TimeSegment::new(1, 1_000_000)];
/// let range = slide_ind(6.0, 15.99, 100.0, &segments)?;
/// assert_eq!((range.first, range.last), (501, 1500));
/// assert_eq!(range.as_range(), 500..1500);
/// # Ok::<(), seis_windows::WindowError>(())
/// ```
pub fn slide_ind(
    start_slice: f64,
    end_slice: f64,
    sample_rate: f64,
    segments: &[TimeSegment],
) -> Result<SampleRange, WindowError> {
    validate_sample_rate(sample_rate)?;

    let t0 = segments
        .first()
        .ok_or_else(|| WindowError::InvalidInput("No time segments".to_string()))?
        .micros;

    if end_slice < start_slice {
        return Err(WindowError::InvalidRange(format!(
            "Slice end {} precedes slice start {}",
            end_slice, start_slice
        )));
    }

    let start_us = checked_seconds_to_micros(start_slice, "Slice start")?;
    let end_us = checked_seconds_to_micros(end_slice, "Slice end")?;

    let offset = |t: i64| {
        round_digits(
            micros_to_samples(t.saturating_sub(t0), sample_rate),
            OFFSET_DIGITS,
        )
        .round()
    };

    let first = offset(start_us);
    let last = offset(end_us);
    if first < 0.0 {
        return Err(WindowError::InvalidRange(format!(
            "Slice start {} is before the data start ({} us)",
            start_slice, t0
        )));
    }

    let range = SampleRange {
        first: first as usize + 1,
        last: last as usize + 1,
    };

    log::debug!(
        "Mapped [{}, {}] at {} Hz to samples {}..={}",
        start_slice,
        end_slice,
        sample_rate,
        range.first,
        range.last
    );

    Ok(range)
}
