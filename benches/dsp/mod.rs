//! Benchmarks for low-level DSP primitives.

mod cosine;
mod mode_bank;
mod one_pole;
mod resonator;

pub use cosine::bench_cosine;
pub use mode_bank::bench_mode_bank;
pub use one_pole::bench_one_pole;
pub use resonator::bench_resonator;
