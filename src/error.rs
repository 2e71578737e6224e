//! Error types for windowing and alignment

use std::fmt;

/// Errors that can occur while windowing or aligning waveform data
#[derive(Debug, Clone, PartialEq)]
pub enum WindowError {
    /// Invalid input parameters or malformed channel metadata
    InvalidInput(String),

    /// Requested range yields no valid start/end or index bounds
    InvalidRange(String),

    /// A time filter matched no records
    EmptySelection(String),

    /// Window length does not evenly divide the block
    ShapeConstraintViolation(String),
}

impl fmt::Display for WindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            WindowError::InvalidRange(msg) => write!(f, "Invalid range: {}", msg),
            WindowError::EmptySelection(msg) => write!(f, "Empty selection: {}", msg),
            WindowError::ShapeConstraintViolation(msg) => {
                write!(f, "Shape constraint violation: {}", msg)
            }
        }
    }
}

impl std::error::Error for WindowError {}
