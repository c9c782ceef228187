//! Benchmarks for the recursive cosine generator.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use modal_dsp::dsp::cosine::{CosineOscillator, CosineOscillatorMode};

pub fn bench_cosine(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/cosine");

    for (name, mode) in [
        ("approximate", CosineOscillatorMode::Approximate),
        ("exact", CosineOscillatorMode::Exact),
    ] {
        // A full 128-mode amplitude layout, as done on every resonator init
        let mut osc = CosineOscillator::new();
        group.bench_function(BenchmarkId::new("layout_128", name), |b| {
            b.iter(|| {
                osc.init(black_box(0.137), mode);
                let mut sum = 0.0;
                for _ in 0..128 {
                    sum += osc.next();
                }
                black_box(sum)
            })
        });
    }

    group.finish();
}
