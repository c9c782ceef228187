//! Benchmarks for the full resonator at different mode counts.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use modal_dsp::dsp::resonator::{Resonator, ResonatorParams};

use crate::BLOCK_SIZES;

pub fn bench_resonator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/resonator");
    let params = ResonatorParams::default();
    let f0 = 220.0 / 48_000.0;

    for &size in BLOCK_SIZES {
        let mut input = vec![0.0f32; size];
        input[0] = 1.0;
        let mut output = vec![0.0f32; size];

        for &modes in &[16usize, 64, 128] {
            let mut resonator = Resonator::new(0.15, modes);
            group.bench_with_input(
                BenchmarkId::new(format!("modes_{}", modes), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        resonator.process(f0, black_box(&params), black_box(&input), black_box(&mut output));
                    })
                },
            );
        }
    }

    group.finish();
}
