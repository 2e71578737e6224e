//! Waveform data types
//!
//! Value types consumed by the windowing functions:
//! - Channels with gap-aware timing tables
//! - Time-stamped records
//! - Rectangular multi-channel blocks

pub mod block;
pub mod channel;
pub mod record;
