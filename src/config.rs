//! Configuration parameters for windowing

use serde::{Deserialize, Serialize};

use crate::error::WindowError;

/// How a candidate window's last sample is compared against the end of the data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndBoundary {
    /// Keep windows whose last sample is at or before the end time (`<=`)
    #[default]
    Inclusive,
    /// Keep windows whose last sample is strictly before the end time (`<`)
    Exclusive,
}

impl EndBoundary {
    /// Whether a window ending at `window_end` fits before `end`
    pub fn admits(self, window_end: i64, end: i64) -> bool {
        match self {
            EndBoundary::Inclusive => window_end <= end,
            EndBoundary::Exclusive => window_end < end,
        }
    }
}

/// Windowing configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window length in seconds (default: 1800.0)
    pub cc_len: f64,

    /// Step between consecutive window starts in seconds (default: 450.0)
    pub cc_step: f64,

    /// End-of-data comparison for the last window (default: Inclusive)
    pub end_boundary: EndBoundary,

    /// Decimal digits kept when rounding raw spans and sample offsets (default: 4)
    pub time_digits: i32,

    /// Snap the span to a midnight-anchored grid before slicing (default: true)
    pub align_to_midnight: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            cc_len: 1800.0,
            cc_step: 450.0,
            end_boundary: EndBoundary::Inclusive,
            time_digits: 4,
            align_to_midnight: true,
        }
    }
}

impl WindowConfig {
    /// Configuration with the given window length and step, other fields default
    pub fn new(cc_len: f64, cc_step: f64) -> Self {
        Self {
            cc_len,
            cc_step,
            ..Self::default()
        }
    }

    /// Check that lengths are finite and positive
    pub fn validate(&self) -> Result<(), WindowError> {
        validate_len_step(self.cc_len, self.cc_step)?;
        if !(0..=9).contains(&self.time_digits) {
            return Err(WindowError::InvalidInput(format!(
                "time_digits must be in 0..=9, got {}",
                self.time_digits
            )));
        }
        Ok(())
    }
}

pub(crate) fn validate_len_step(cc_len: f64, cc_step: f64) -> Result<(), WindowError> {
    if !cc_len.is_finite() || cc_len <= 0.0 {
        return Err(WindowError::InvalidInput(format!(
            "cc_len must be > 0, got {}",
            cc_len
        )));
    }
    if !cc_step.is_finite() || cc_step <= 0.0 {
        return Err(WindowError::InvalidInput(format!(
            "cc_step must be > 0, got {}",
            cc_step
        )));
    }
    Ok(())
}

pub(crate) fn validate_sample_rate(sample_rate: f64) -> Result<(), WindowError> {
    if !sample_rate.is_finite() || sample_rate <= 0.0 {
        return Err(WindowError::InvalidInput(format!(
            "Sample rate must be > 0, got {}",
            sample_rate
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = WindowConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.end_boundary, EndBoundary::Inclusive);
        assert_eq!(config.time_digits, 4);
    }

    #[test]
    fn test_invalid_lengths_rejected() {
        assert!(WindowConfig::new(0.0, 10.0).validate().is_err());
        assert!(WindowConfig::new(10.0, -1.0).validate().is_err());
        assert!(WindowConfig::new(f64::NAN, 10.0).validate().is_err());
    }

    #[test]
    fn test_end_boundary_admits() {
        assert!(EndBoundary::Inclusive.admits(10, 10));
        assert!(!EndBoundary::Exclusive.admits(10, 10));
        assert!(EndBoundary::Exclusive.admits(9, 10));
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: WindowConfig =
            serde_json::from_str(r#"{"cc_len": 3600.0, "end_boundary": "exclusive"}"#).unwrap();
        assert_eq!(config.cc_len, 3600.0);
        assert_eq!(config.cc_step, 450.0);
        assert_eq!(config.end_boundary, EndBoundary::Exclusive);
        assert!(config.align_to_midnight);
    }
}
