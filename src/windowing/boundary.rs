//! Midnight-aligned window boundaries
//!
//! Windows from different days and stations line up when their starts sit on
//! one grid: `midnight + k * cc_step`. Given a raw data span, the aligned start
//! is the first grid start inside the data and the aligned end is the last
//! grid window end inside the data.

use chrono::{DateTime, TimeZone, Utc};

use super::span::start_end_micros;
use crate::config::{validate_len_step, validate_sample_rate};
use crate::data::channel::{Channel, Sampling};
use crate::error::WindowError;
use crate::time::{
    checked_seconds_to_micros, datetime_to_micros, micros_to_datetime, micros_to_seconds,
    midnight_micros, round_digits, sample_period_micros, seconds_to_micros, MICROS_PER_SECOND,
};

/// Decimal digits kept when rounding a raw span
const SPAN_DIGITS: i32 = 4;

/// Aligned start and end for a span given in Unix seconds
///
/// # Arguments
///
/// * `su` - Raw data start (Unix seconds)
/// * `eu` - Raw data end (Unix seconds)
/// * `sample_rate` - Sample rate in Hz
/// * `cc_len` - Window length in seconds
/// * `cc_step` - Step between window starts in seconds
///
/// # Returns
///
/// `(start, end)` in Unix seconds, with `su <= start` and `end <= eu`
///
/// # Errors
///
/// Returns `WindowError::InvalidRange` when the span cannot hold one aligned
/// window.
///
/// # Example
///
/// ```
/// use seis_windows::nearest_start_end;
///
/// // 00:07:30 to 02:00:00 on 2020-01-01, hourly windows every 30 minutes
/// let midnight = 1_577_836_800.0;
/// let (start, end) =
///     nearest_start_end(midnight + 450.0, midnight + 7200.0, 100.0, 3600.0, 1800.0)?;
/// assert_eq!(start, midnight + 1800.0);
/// assert_eq!(end, midnight + 7199.99);
/// # Ok::<(), seis_windows::WindowError>(())
/// ```
pub fn nearest_start_end(
    su: f64,
    eu: f64,
    sample_rate: f64,
    cc_len: f64,
    cc_step: f64,
) -> Result<(f64, f64), WindowError> {
    validate_len_step(cc_len, cc_step)?;
    validate_sample_rate(sample_rate)?;

    let su_us = checked_seconds_to_micros(round_digits(su, SPAN_DIGITS), "Span start")?;
    let eu_us = checked_seconds_to_micros(round_digits(eu, SPAN_DIGITS), "Span end")?;

    log::debug!(
        "Aligning span [{}, {}] to cc_len={} s, cc_step={} s",
        su,
        eu,
        cc_len,
        cc_step
    );

    let (start, end) = align_micros(
        su_us,
        eu_us,
        midnight_micros(su_us),
        seconds_to_micros(cc_len),
        seconds_to_micros(cc_step),
        sample_period_micros(sample_rate),
    )?;

    Ok((micros_to_seconds(start), micros_to_seconds(end)))
}

/// Aligned start and end for calendar bounds, stepping in whole seconds
pub fn nearest_start_end_calendar(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    sample_rate: f64,
    cc_len: u32,
    cc_step: u32,
) -> Result<(DateTime<Utc>, DateTime<Utc>), WindowError> {
    validate_len_step(f64::from(cc_len), f64::from(cc_step))?;
    validate_sample_rate(sample_rate)?;

    let anchor = start
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|midnight| Utc.from_utc_datetime(&midnight))
        .ok_or_else(|| WindowError::InvalidInput(format!("No midnight for {}", start)))?;

    log::debug!(
        "Aligning span [{}, {}] from {} to cc_len={} s, cc_step={} s",
        start,
        end,
        anchor,
        cc_len,
        cc_step
    );

    let (aligned_start, aligned_end) = align_micros(
        datetime_to_micros(&start),
        datetime_to_micros(&end),
        datetime_to_micros(&anchor),
        i64::from(cc_len) * MICROS_PER_SECOND,
        i64::from(cc_step) * MICROS_PER_SECOND,
        sample_period_micros(sample_rate),
    )?;

    Ok((
        micros_to_datetime(aligned_start)?,
        micros_to_datetime(aligned_end)?,
    ))
}

/// Aligned start and end (Unix seconds) of a channel's recorded span
pub fn nearest_start_end_channel(
    channel: &Channel,
    cc_len: f64,
    cc_step: f64,
) -> Result<(f64, f64), WindowError> {
    let sample_rate = match channel.sampling() {
        Sampling::Regular(rate) => rate,
        Sampling::Irregular => {
            return Err(WindowError::InvalidInput(
                "Cannot align windows for irregularly sampled data".to_string(),
            ))
        }
    };
    let (su, eu) = start_end_micros(channel)?;
    nearest_start_end(
        micros_to_seconds(su),
        micros_to_seconds(eu),
        sample_rate,
        cc_len,
        cc_step,
    )
}

/// First grid start `>= su` and last grid end `<= eu` on `anchor + k * step`
fn align_micros(
    su: i64,
    eu: i64,
    anchor: i64,
    len: i64,
    step: i64,
    period: i64,
) -> Result<(i64, i64), WindowError> {
    if step <= 0 {
        return Err(WindowError::InvalidInput(
            "Step is below one microsecond".to_string(),
        ));
    }

    // grid only runs up to eu
    let first_k = ceil_div(su - anchor, step);
    let start = anchor + first_k * step;
    if start > eu {
        return Err(WindowError::InvalidRange(format!(
            "no valid start: first grid point {} us is after data end {} us",
            start, eu
        )));
    }

    let last_k = (eu - anchor - len + period).div_euclid(step);
    let end = anchor + last_k * step + len - period;
    if last_k < 0 || end < start {
        return Err(WindowError::InvalidRange(format!(
            "no valid end: span [{}, {}] us holds no aligned window",
            su, eu
        )));
    }

    Ok((start, end))
}

fn ceil_div(numerator: i64, denominator: i64) -> i64 {
    -((-numerator).div_euclid(denominator))
}
