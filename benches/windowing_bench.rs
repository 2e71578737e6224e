//! Performance benchmarks for windowing

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use seis_windows::{slide, slide_all, Channel};

fn bench_slide(c: &mut Criterion) {
    // One day at 40 Hz
    let samples: Vec<f32> = (0..40 * 86_400)
        .map(|i| (i as f32 * 0.5 * 2.0 * std::f32::consts::PI / 40.0).sin())
        .collect();
    let end = 86_399.975;

    c.bench_function("slide_day_contiguous", |b| {
        b.iter(|| {
            let _ = slide(black_box(&samples), 1800.0, 1800.0, 40.0, 0.0, end);
        });
    });

    c.bench_function("slide_day_overlapping", |b| {
        b.iter(|| {
            let _ = slide(black_box(&samples), 1800.0, 450.0, 40.0, 0.0, end);
        });
    });

    let channels: Vec<Channel> = (0..16)
        .map(|_| Channel::regular(samples[..40 * 3600].to_vec(), 40.0, 0))
        .collect::<Result<_, _>>()
        .expect("valid channels");

    c.bench_function("slide_all_16_hours", |b| {
        b.iter(|| {
            let _ = slide_all(black_box(&channels), 600.0, 150.0);
        });
    });
}

criterion_group!(benches, bench_slide);
criterion_main!(benches);
