//! Benchmarks for the one-pole filter and its tangent tiers.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use modal_dsp::dsp::one_pole::{FrequencyApproximation, OnePole};
use modal_dsp::dsp::response::{HighPass, LowPass};

use crate::BLOCK_SIZES;

const TIERS: [(&str, FrequencyApproximation); 4] = [
    ("exact", FrequencyApproximation::Exact),
    ("accurate", FrequencyApproximation::Accurate),
    ("fast", FrequencyApproximation::Fast),
    ("dirty", FrequencyApproximation::Dirty),
];

pub fn bench_one_pole(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/one_pole");

    // Coefficient update cost per tier
    for &(name, tier) in &TIERS {
        let mut filter = OnePole::new();
        group.bench_function(BenchmarkId::new("set_frequency", name), |b| {
            b.iter(|| filter.set_frequency(black_box(0.031), tier))
        });
    }

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();

        let mut filter = OnePole::new();
        filter.set_frequency(0.02, FrequencyApproximation::Fast);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("lowpass", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.process_block::<LowPass>(black_box(&mut buffer));
            })
        });

        let mut filter = OnePole::new();
        filter.set_frequency(0.02, FrequencyApproximation::Fast);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("highpass", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.process_block::<HighPass>(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
