//! Integer-microsecond time arithmetic
//!
//! All boundary comparisons run on `i64` microseconds since the Unix epoch.
//! Floating-point seconds and calendar time only appear at the API edges.

use chrono::{DateTime, TimeZone, Utc};

use crate::error::WindowError;

/// Microseconds per second
pub const MICROS_PER_SECOND: i64 = 1_000_000;

/// Microseconds per day
pub const MICROS_PER_DAY: i64 = 86_400 * MICROS_PER_SECOND;

/// Convert Unix seconds to microseconds, rounding half away from zero
pub fn seconds_to_micros(seconds: f64) -> i64 {
    (seconds * MICROS_PER_SECOND as f64).round() as i64
}

/// [`seconds_to_micros`] for caller-supplied times
///
/// # Errors
///
/// Returns `WindowError::InvalidInput` naming `what` when `seconds` is NaN,
/// infinite, or too large for `i64` microseconds.
pub fn checked_seconds_to_micros(seconds: f64, what: &str) -> Result<i64, WindowError> {
    let micros = (seconds * MICROS_PER_SECOND as f64).round();
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
    if !micros.is_finite() || micros < i64::MIN as f64 || micros >= i64::MAX as f64 {
        return Err(WindowError::InvalidInput(format!(
            "{} must be a finite time in range, got {}",
            what, seconds
        )));
    }
    Ok(micros as i64)
}

/// Convert microseconds to Unix seconds
pub fn micros_to_seconds(micros: i64) -> f64 {
    micros as f64 / MICROS_PER_SECOND as f64
}

/// Convert microseconds since the epoch to a UTC timestamp
pub fn micros_to_datetime(micros: i64) -> Result<DateTime<Utc>, WindowError> {
    let secs = micros.div_euclid(MICROS_PER_SECOND);
    let nanos = (micros.rem_euclid(MICROS_PER_SECOND) * 1_000) as u32;
    Utc.timestamp_opt(secs, nanos).single().ok_or_else(|| {
        WindowError::InvalidInput(format!("Timestamp {} us is out of range", micros))
    })
}

/// Convert a UTC timestamp to microseconds since the epoch
pub fn datetime_to_micros(time: &DateTime<Utc>) -> i64 {
    time.timestamp() * MICROS_PER_SECOND + i64::from(time.timestamp_subsec_micros())
}

/// Round to a fixed number of decimal digits, half away from zero
pub fn round_digits(value: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (value * scale).round() / scale
}

/// Start of the UTC day containing `micros`
pub fn midnight_micros(micros: i64) -> i64 {
    micros - micros.rem_euclid(MICROS_PER_DAY)
}

/// Length of one sample period in whole microseconds
pub fn sample_period_micros(sample_rate: f64) -> i64 {
    (MICROS_PER_SECOND as f64 / sample_rate).round() as i64
}

/// Sample offset covered by `micros` at `sample_rate`, before rounding
pub(crate) fn micros_to_samples(micros: i64, sample_rate: f64) -> f64 {
    micros as f64 * sample_rate / MICROS_PER_SECOND as f64
}
