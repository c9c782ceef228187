//! Low-level DSP primitives behind the modal resonator.
//!
//! Everything here is allocation-free and realtime-safe: fixed-size state
//! lives inline in each struct, and block processing never allocates or
//! dispatches dynamically. Per-block coefficient work is kept out of the
//! per-sample loops.

/// Recursive cosine generator for cheap block-rate curves.
pub mod cosine;
/// Batched zero-delay-feedback SVFs, one per mode.
pub mod mode_bank;
/// Single-pole TPT filter and the tangent approximations.
pub mod one_pole;
/// The modal resonator: mode layout and bank orchestration.
pub mod resonator;
/// Filter responses as values and as zero-sized types.
pub mod response;
/// Unit conversions and denormal handling.
pub mod units;

pub use cosine::{CosineOscillator, CosineOscillatorMode};
pub use mode_bank::ModeBank;
pub use one_pole::{FrequencyApproximation, OnePole};
pub use resonator::{Resonator, ResonatorParams, MAX_NUM_MODES, MODE_BATCH_SIZE};
pub use response::FilterMode;
