//! Real-world scenario benchmarks.
//!
//! Complete struck voices as the `modal` player runs them.

mod voices;

pub use voices::bench_voices;
