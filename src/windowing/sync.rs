//! Record synchronization to a common time range

use chrono::{DateTime, Utc};

use crate::data::record::Record;
use crate::error::WindowError;
use crate::time::{checked_seconds_to_micros, datetime_to_micros, micros_to_datetime};

/// A time bound given as Unix seconds or as a UTC timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeBound {
    micros: i64,
}

impl TimeBound {
    /// Microseconds since the epoch
    pub fn micros(&self) -> i64 {
        self.micros
    }

    /// Calendar form of the bound
    pub fn as_datetime(&self) -> Result<DateTime<Utc>, WindowError> {
        micros_to_datetime(self.micros)
    }
}

impl TryFrom<f64> for TimeBound {
    type Error = WindowError;

    fn try_from(seconds: f64) -> Result<Self, Self::Error> {
        Ok(Self {
            micros: checked_seconds_to_micros(seconds, "Sync bound")?,
        })
    }
}

impl TryFrom<DateTime<Utc>> for TimeBound {
    type Error = WindowError;

    fn try_from(time: DateTime<Utc>) -> Result<Self, Self::Error> {
        Ok(Self {
            micros: datetime_to_micros(&time),
        })
    }
}

/// Indices of records with `start <= timestamp <= end`, in input order
///
/// # Errors
///
/// Returns `WindowError::EmptySelection` when nothing matches,
/// `WindowError::InvalidRange` when `end < start`, and
/// `WindowError::InvalidInput` for a non-finite bound or record timestamp.
pub fn sync_indices<R: Record>(
    records: &[R],
    start: impl TryInto<TimeBound, Error = WindowError>,
    end: impl TryInto<TimeBound, Error = WindowError>,
) -> Result<Vec<usize>, WindowError> {
    let start = start.try_into()?;
    let end = end.try_into()?;
    let start_time = start.as_datetime()?;
    let end_time = end.as_datetime()?;

    if end < start {
        return Err(WindowError::InvalidRange(format!(
            "Sync end {} precedes start {}",
            end_time, start_time
        )));
    }

    let mut indices = Vec::new();
    for (i, record) in records.iter().enumerate() {
        let what = format!("Record {} timestamp", i);
        let t = checked_seconds_to_micros(record.timestamp(), &what)?;
        if start.micros() <= t && t <= end.micros() {
            indices.push(i);
        }
    }

    log::debug!(
        "Synced {} of {} records to [{}, {}]",
        indices.len(),
        records.len(),
        start_time,
        end_time
    );

    if indices.is_empty() {
        return Err(WindowError::EmptySelection(format!(
            "No records between {} and {}",
            start_time, end_time
        )));
    }

    Ok(indices)
}

/// Records with `start <= timestamp <= end`, in input order
///
/// # Example
///
/// ```
/// use seis_windows::{sync, Stamped};
///
/// let records: Vec<_> = (1..=5).map(|t| Stamped::new(t as f64, t)).collect();
/// let synced = sync(&records, 2.0, 4.0)?;
/// let payloads: Vec<i32> = synced.iter().map(|r| r.payload).collect();
/// assert_eq!(payloads, vec![2, 3, 4]);
/// # Ok::<(), seis_windows::WindowError>(())
/// ```
pub fn sync<R: Record + Clone>(
    records: &[R],
    start: impl TryInto<TimeBound, Error = WindowError>,
    end: impl TryInto<TimeBound, Error = WindowError>,
) -> Result<Vec<R>, WindowError> {
    let indices = sync_indices(records, start, end)?;
    Ok(indices.into_iter().map(|i| records[i].clone()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::record::Stamped;
    use chrono::TimeZone;

    fn records(times: &[f64]) -> Vec<Stamped<usize>> {
        times
            .iter()
            .enumerate()
            .map(|(i, &t)| Stamped::new(t, i))
            .collect()
    }

    #[test]
    fn test_inclusive_bounds() {
        let records = records(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let synced = sync(&records, 2.0, 4.0).unwrap();
        let times: Vec<f64> = synced.iter().map(|r| r.timestamp).collect();
        assert_eq!(times, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_preserves_order_of_unsorted_records() {
        let records = records(&[9.0, 3.0, 7.0, 1.0, 5.0]);
        assert_eq!(sync_indices(&records, 3.0, 7.0).unwrap(), vec![1, 2, 4]);
    }

    #[test]
    fn test_calendar_bounds() {
        let base = 1_609_459_200.0; // 2021-01-01T00:00:00Z
        let records = records(&[base, base + 60.0, base + 120.0]);
        let start = Utc.with_ymd_and_hms(2021, 1, 1, 0, 1, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2021, 1, 1, 0, 5, 0).unwrap();
        assert_eq!(sync_indices(&records, start, end).unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_empty_selection_is_error() {
        let records = records(&[1.0, 2.0]);
        assert!(matches!(
            sync(&records, 10.0, 20.0),
            Err(WindowError::EmptySelection(_))
        ));
        let empty: Vec<Stamped<usize>> = Vec::new();
        assert!(sync(&empty, 0.0, 1.0).is_err());
    }

    #[test]
    fn test_reversed_bounds() {
        let records = records(&[1.0, 2.0]);
        assert!(matches!(
            sync(&records, 2.0, 1.0),
            Err(WindowError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_non_finite_bounds_rejected() {
        let records = records(&[0.0, 1.0, 2.0]);
        assert!(matches!(
            sync(&records, f64::NAN, f64::NAN),
            Err(WindowError::InvalidInput(_))
        ));
        assert!(matches!(
            sync(&records, 0.0, f64::INFINITY),
            Err(WindowError::InvalidInput(_))
        ));
        assert!(sync_indices(&records, f64::NEG_INFINITY, 1.0).is_err());
    }

    #[test]
    fn test_non_finite_record_timestamp_rejected() {
        let records = records(&[1.0, f64::NAN, 2.0]);
        assert!(matches!(
            sync_indices(&records, 0.0, 3.0),
            Err(WindowError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_idempotent() {
        let records = records(&[0.5, 1.5, 2.5, 3.5]);
        let once = sync(&records, 1.0, 3.0).unwrap();
        let twice = sync(&once, 1.0, 3.0).unwrap();
        assert_eq!(once, twice);
    }
}
