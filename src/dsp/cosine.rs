//! Recursive cosine generator for block-rate layout curves.
//!
//! A second-order recurrence `y[n+1] = c * y[n] - y[n-1]` with
//! `c = 2 cos(w)` traces `cos(w n)` using one multiply and one subtract per
//! step. The resonator uses it to spread amplitudes across up to 128 modes
//! without calling `cos` once per mode.

use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the recurrence coefficient is derived from the frequency.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CosineOscillatorMode {
    /// Parabolic fit of `2 cos(2 pi f)`, no transcendental call.
    ///
    /// The coefficient is within 0.12 of the true value over [0, 1), which
    /// keeps the first four samples within 0.1 of the exact sequence. The
    /// recurrence still traces a clean cosine, just at a slightly wrong
    /// rate: the phase drifts by at most 0.067 rad per step, so sample `n`
    /// is within `0.034 * n` of the exact sequence.
    Approximate,
    /// True coefficient from `cos`, for setup code that runs rarely.
    Exact,
}

/// Unipolar cosine sequence: starts at 1.0 and swings between 0 and 1.
#[derive(Debug, Clone, Default)]
pub struct CosineOscillator {
    y1: f32,
    y0: f32,
    iir_coefficient: f32,
    initial_amplitude: f32,
}

impl CosineOscillator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the coefficients for `frequency` (cycles per step, in [0, 1))
    /// and rewind to zero phase.
    pub fn init(&mut self, frequency: f32, mode: CosineOscillatorMode) {
        match mode {
            CosineOscillatorMode::Approximate => self.init_approximate(frequency),
            CosineOscillatorMode::Exact => {
                self.iir_coefficient = 2.0 * (TAU * frequency).cos();
                self.initial_amplitude = self.iir_coefficient * 0.25;
            }
        }
        self.start();
    }

    fn init_approximate(&mut self, frequency: f32) {
        // Fold onto [0, 0.25] around the zero crossing of the cosine, then
        // fit the quarter wave with a parabola.
        let mut sign = 16.0;
        let mut frequency = frequency - 0.25;
        if frequency < 0.0 {
            frequency = -frequency;
        } else if frequency > 0.5 {
            frequency -= 0.5;
        } else {
            sign = -16.0;
        }
        self.iir_coefficient = sign * frequency * (1.0 - 2.0 * frequency);
        self.initial_amplitude = self.iir_coefficient * 0.25;
    }

    /// Rewind to zero phase, keeping the coefficients.
    #[inline]
    pub fn start(&mut self) {
        self.y1 = self.initial_amplitude;
        self.y0 = 0.5;
    }

    /// Most recently returned value.
    #[inline]
    pub fn value(&self) -> f32 {
        self.y1 + 0.5
    }

    #[inline]
    pub fn next(&mut self) -> f32 {
        let temp = self.y0;
        self.y0 = self.iir_coefficient * self.y0 - self.y1;
        self.y1 = temp;
        temp + 0.5
    }
}
