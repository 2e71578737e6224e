//! Time-stamped processed records (spectra, correlations)

use serde::{Deserialize, Serialize};

/// Anything carrying a single absolute timestamp
pub trait Record {
    /// Timestamp in Unix seconds
    fn timestamp(&self) -> f64;
}

/// A payload paired with its timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stamped<T> {
    /// Timestamp in Unix seconds
    pub timestamp: f64,
    /// Opaque record contents
    pub payload: T,
}

impl<T> Stamped<T> {
    /// Pair a payload with a timestamp
    pub fn new(timestamp: f64, payload: T) -> Self {
        Self { timestamp, payload }
    }
}

impl<T> Record for Stamped<T> {
    fn timestamp(&self) -> f64 {
        self.timestamp
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn timestamp(&self) -> f64 {
        (**self).timestamp()
    }
}
