//! Example: Window a synthetic day of data
//!
//! Usage:
//!   cargo run --example window_day -- [cc_len] [cc_step]

use seis_windows::{
    nearest_start_end_channel, start_end, sync, window_channel, Channel, Stamped, WindowConfig,
};
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let cc_len: f64 = args.get(1).map(|s| s.parse::<f64>()).transpose()?.unwrap_or(1800.0);
    let cc_step: f64 = args.get(2).map(|s| s.parse::<f64>()).transpose()?.unwrap_or(450.0);

    // 2020-01-01T00:12:34Z, 20 Hz
    let sample_rate = 20.0;
    let start_us = 1_577_837_554_000_000;
    let n = 20 * 86_000;
    let samples: Vec<f32> = (0..n)
        .map(|i| (i as f32 / sample_rate as f32 * 0.2).sin())
        .collect();

    // Same data with a 90 s outage after the first six hours
    let gapped = Channel::with_gaps(
        samples.clone(),
        sample_rate,
        start_us,
        &[(20 * 21_600, 90_000_000)],
    )?;
    let (start, end) = start_end(&gapped)?;
    println!("Gapped span:   {} -> {}", start, end);
    if let Err(e) = window_channel(&gapped, &WindowConfig::new(cc_len, cc_step)) {
        println!("Gapped channel not windowed: {}", e);
    }

    let channel = Channel::regular(samples, sample_rate, start_us)?;
    let (start, end) = start_end(&channel)?;
    println!("Recorded span: {} -> {}", start, end);

    let (aligned_start, aligned_end) = nearest_start_end_channel(&channel, cc_len, cc_step)?;
    println!("Aligned span:  {:.4} -> {:.4}", aligned_start, aligned_end);

    let config = WindowConfig::new(cc_len, cc_step);
    let windows = window_channel(&channel, &config)?;
    println!(
        "{} windows of {} samples ({} s every {} s)",
        windows.len(),
        windows.window_samples(),
        cc_len,
        cc_step
    );

    let stamped: Vec<Stamped<f32>> = windows
        .iter()
        .map(|(t, w)| Stamped::new(t, w.iter().map(|x| x * x).sum::<f32>() / w.len() as f32))
        .collect();

    // Keep the morning only
    let morning = sync(&stamped, aligned_start, aligned_start + 6.0 * 3600.0)?;
    for (time, record) in windows.start_times()?.iter().zip(&morning) {
        println!("  {}  mean power {:.4}", time, record.payload);
    }

    Ok(())
}
