//! Benchmarks for complete modal voices.
//!
//! Each voice is struck once before timing, so the measurement covers the
//! ringing resonator plus the exciter filter.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use modal_dsp::graph::{ExcitationMode, GraphNode, RenderCtx};
use modal_dsp::voices;

use crate::BLOCK_SIZES;

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");
    let ctx = RenderCtx::from_freq(48_000.0, 220.0, 100.0); // A3

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for (name, mut voice) in [
            ("mallet", voices::mallet()),
            ("marimba", voices::marimba()),
            ("bell", voices::bell()),
        ] {
            voice.note_on(&ctx);
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    voice.render_block(black_box(&mut buffer), black_box(&ctx));
                })
            });
        }

        // === NOISE-DRIVEN BELL ===
        // Worst case: 96 modes plus a noise source on every sample
        let mut bowed = voices::bell().with_excitation(ExcitationMode::Noise);
        group.bench_with_input(BenchmarkId::new("bell_noise", size), &size, |b, _| {
            b.iter(|| {
                bowed.render_block(black_box(&mut buffer), black_box(&ctx));
            })
        });
    }

    group.finish();
}
