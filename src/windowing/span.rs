//! Recorded span of a channel
//!
//! The end time of gapped data is not `start + (N - 1) / fs`: every gap adds
//! its length on top of the sampled duration. Irregular channels carry one
//! timestamp per sample, so their end is simply the last timestamp.

use chrono::{DateTime, Utc};

use crate::data::channel::{Channel, Sampling};
use crate::error::WindowError;
use crate::time::{micros_to_datetime, MICROS_PER_SECOND};

/// Start and end of a channel in microseconds since the epoch
///
/// The end is the time of the last recorded sample.
pub fn start_end_micros(channel: &Channel) -> Result<(i64, i64), WindowError> {
    let segments = channel.segments();
    let start = channel.start_micros();

    let end = match channel.sampling() {
        Sampling::Regular(sample_rate) => {
            let sampled = channel.len().saturating_sub(1) as f64 * MICROS_PER_SECOND as f64
                / sample_rate;
            start
                .checked_add(channel.gap_micros())
                .and_then(|t| t.checked_add(sampled.round() as i64))
                .ok_or_else(|| {
                    WindowError::InvalidInput("Channel end time overflows".to_string())
                })?
        }
        Sampling::Irregular => segments[segments.len() - 1].micros,
    };

    log::debug!(
        "Channel span: {} samples, {} segments, {} -> {} us",
        channel.len(),
        segments.len(),
        start,
        end
    );

    Ok((start, end))
}

/// Start and end of a channel as UTC timestamps
///
/// # Example
///
/// ```
/// use seis_windows::{start_end, Channel};
///
/// // 100 samples at 10 Hz starting at the epoch
/// let channel = Channel::regular(vec![0.0; 100], 10.0, 0)?;
/// let (start, end) = start_end(&channel)?;
/// assert_eq!(start.timestamp(), 0);
/// assert_eq!((end - start).num_milliseconds(), 9_900);
/// # Ok::<(), seis_windows::WindowError>(())
/// ```
pub fn start_end(channel: &Channel) -> Result<(DateTime<Utc>, DateTime<Utc>), WindowError> {
    let (start, end) = start_end_micros(channel)?;
    Ok((micros_to_datetime(start)?, micros_to_datetime(end)?))
}

/// Start and end of every channel as two parallel vectors
pub fn start_end_all(
    channels: &[Channel],
) -> Result<(Vec<DateTime<Utc>>, Vec<DateTime<Utc>>), WindowError> {
    let mut starts = Vec::with_capacity(channels.len());
    let mut ends = Vec::with_capacity(channels.len());
    for channel in channels {
        let (start, end) = start_end(channel)?;
        starts.push(start);
        ends.push(end);
    }
    Ok((starts, ends))
}
