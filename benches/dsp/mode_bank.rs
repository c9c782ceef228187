//! Benchmarks for batched mode filters.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use modal_dsp::dsp::mode_bank::ModeBank;
use modal_dsp::dsp::response::BandPass;

use crate::BLOCK_SIZES;

pub fn bench_mode_bank(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/mode_bank");
    let frequency = [0.0046, 0.0092, 0.0138, 0.0184];
    let q = [30.0, 60.0, 90.0, 120.0];
    let gain = [0.25, 0.2, 0.15, 0.1];

    for &size in BLOCK_SIZES {
        let mut input = vec![0.0f32; size];
        input[0] = 1.0;
        let mut output = vec![0.0f32; size];

        let mut bank = ModeBank::<4>::new();
        group.bench_with_input(BenchmarkId::new("batch_4", size), &size, |b, _| {
            b.iter(|| {
                bank.process::<BandPass>(&frequency, &q, &gain, black_box(&input), black_box(&mut output), false);
            })
        });

        let mut bank = ModeBank::<4>::new();
        group.bench_with_input(BenchmarkId::new("batch_4_accumulate", size), &size, |b, _| {
            b.iter(|| {
                bank.process::<BandPass>(&frequency, &q, &gain, black_box(&input), black_box(&mut output), true);
            })
        });
    }

    group.finish();
}
