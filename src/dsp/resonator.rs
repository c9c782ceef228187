use super::cosine::{CosineOscillator, CosineOscillatorMode};
use super::mode_bank::ModeBank;
use super::response::BandPass;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Modal Resonator
===============

A struck string, bar or plate rings at a set of frequencies (its modes),
each decaying at its own rate. The resonator models the body as up to 128
band-pass filters fed by the same excitation and summed:

  excitation ──┬──→ [mode 0] ──┐
               ├──→ [mode 1] ──┤
               │      ...      ├──→ (+) ──→ output
               └──→ [mode N] ──┘

Modes are processed four at a time by a ModeBank<4>; the first bank writes
the output buffer and every later bank adds to it.

Control Parameters (all 0..1)
-----------------------------

  structure   Mode spacing. 0 is a string (partials at n * f0), 1 is a free
              bar (partials at ((2n + 1) / 3)^2 * f0), in between blends.
  brightness  Spectral tilt. At 1 every mode keeps its gain, lower values
              attenuate each successive mode a little more (down to -6 dB
              per mode at 0).
  damping     Frequency-dependent loss. Each mode's Q scale is multiplied
              by (1 - 0.15 * damping) relative to the previous mode, so
              high modes die first.
  stretch     Stiffness. Partials are pushed progressively sharp, like a
              piano string or a stiff bar. f0 is compensated so the third
              partial stays put.
  loss        Overall decay. Q scale is 500 * 2^(10 * (1 - loss)), i.e.
              seconds of ring at 0 and a dull thud at 1.

Mode Q is 1 + f * q, where q is the Q scale for that mode. Q grows with
frequency, which gives every mode roughly the same decay time before the
damping term shortens the upper ones. Q is never below 1, so the bank is
always passive.

Listening Position
------------------

Modes whose antinodes sit near the excitation point ring loudest. The gain
of mode n follows a unipolar cosine of n * position, computed once at init
with the approximate CosineOscillator (no cos() per mode).
*/

pub const MAX_NUM_MODES: usize = 128;
pub const MODE_BATCH_SIZE: usize = 4;
const NUM_MODE_BANKS: usize = MAX_NUM_MODES / MODE_BATCH_SIZE;

/// Mode frequencies are clipped just below Nyquist.
const MAX_MODE_FREQUENCY: f32 = 0.499;

/// Per-block control inputs, each normalized to [0, 1].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResonatorParams {
    pub structure: f32,
    pub brightness: f32,
    pub damping: f32,
    pub stretch: f32,
    pub loss: f32,
}

impl Default for ResonatorParams {
    fn default() -> Self {
        Self {
            structure: 0.0,
            brightness: 0.8,
            damping: 0.5,
            stretch: 0.0,
            loss: 0.3,
        }
    }
}

/// Bank of up to 128 tuned modes driven by a shared excitation.
#[derive(Debug, Clone)]
pub struct Resonator {
    resolution: usize,
    position: f32,
    mode_amplitude: [f32; MAX_NUM_MODES],
    mode_filters: [ModeBank<MODE_BATCH_SIZE>; NUM_MODE_BANKS],
}

impl Default for Resonator {
    fn default() -> Self {
        Self {
            resolution: 0,
            position: 0.0,
            mode_amplitude: [0.0; MAX_NUM_MODES],
            mode_filters: std::array::from_fn(|_| ModeBank::new()),
        }
    }
}

impl Resonator {
    /// Create and initialize a resonator.
    pub fn new(position: f32, resolution: usize) -> Self {
        let mut resonator = Self::default();
        resonator.init(position, resolution);
        resonator
    }

    /// Set the listening position and the number of active modes, and clear
    /// all filter memory.
    pub fn init(&mut self, position: f32, resolution: usize) {
        self.resolution = resolution.min(MAX_NUM_MODES);
        self.position = position;

        let mut amplitudes = CosineOscillator::new();
        amplitudes.init(position, CosineOscillatorMode::Approximate);

        self.mode_amplitude = [0.0; MAX_NUM_MODES];
        for amplitude in self.mode_amplitude[..self.resolution].iter_mut() {
            *amplitude = amplitudes.next() * 0.25;
        }

        for filter in self.mode_filters.iter_mut() {
            filter.init();
        }
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    /// Static position-dependent gain of each active mode.
    pub fn mode_amplitudes(&self) -> &[f32] {
        &self.mode_amplitude[..self.resolution]
    }

    /// Summed state energy of every mode filter. Once the input goes quiet
    /// it only falls, up to `f32` rounding.
    #[cfg(test)]
    pub(crate) fn state_energy(&self) -> f64 {
        self.mode_filters.iter().map(ModeBank::state_energy).sum()
    }

    /// Render one block.
    ///
    /// `f0` is the fundamental as a fraction of the sample rate. `output` is
    /// overwritten; the block length is the shorter of the two buffers.
    pub fn process(&mut self, f0: f32, params: &ResonatorParams, input: &[f32], output: &mut [f32]) {
        if self.resolution == 0 {
            output.fill(0.0);
            return;
        }

        let ResonatorParams {
            structure,
            brightness,
            damping,
            stretch,
            loss,
        } = *params;

        let mut stiffness = stretch_to_stiffness(stretch);
        let f0 = f0 * nth_harmonic_compensation(3, stiffness);

        let mut stretch_factor = 1.0;
        let mut q = 500.0 * 2.0_f32.powf(10.0 * (1.0 - loss));
        let q_loss = 1.0 - 0.15 * damping;
        let tilt = 0.5 + 0.5 * brightness * (2.0 - brightness);
        let mut tilt_gain = 1.0;

        let mut mode_f = [0.0f32; MODE_BATCH_SIZE];
        let mut mode_q = [0.0f32; MODE_BATCH_SIZE];
        let mut mode_a = [0.0f32; MODE_BATCH_SIZE];
        let mut batch_counter = 0;
        let mut bank_index = 0;

        for i in 0..self.resolution {
            let partial = (i + 1) as f32;
            let bar = (2.0 * partial + 1.0) / 3.0;
            let ratio = partial + structure * (bar * bar - partial);

            let mode_frequency = (f0 * ratio * stretch_factor).min(MAX_MODE_FREQUENCY);
            let mode_attenuation = 1.0 - mode_frequency * 2.0;

            mode_f[batch_counter] = mode_frequency;
            mode_q[batch_counter] = 1.0 + mode_frequency * q;
            mode_a[batch_counter] = self.mode_amplitude[i] * mode_attenuation * tilt_gain;
            batch_counter += 1;

            if batch_counter == MODE_BATCH_SIZE {
                batch_counter = 0;
                self.mode_filters[bank_index].process::<BandPass>(
                    &mode_f,
                    &mode_q,
                    &mode_a,
                    input,
                    output,
                    bank_index > 0,
                );
                bank_index += 1;
            }

            stretch_factor += stiffness;
            // Keeps a few extra partials below Nyquist at high stretch.
            stiffness *= 0.98;
            q *= q_loss;
            tilt_gain *= tilt;
        }

        if batch_counter > 0 {
            // Silent padding for the unused slots of the last batch.
            for slot in batch_counter..MODE_BATCH_SIZE {
                mode_f[slot] = 0.25;
                mode_q[slot] = 1.0;
                mode_a[slot] = 0.0;
            }
            self.mode_filters[bank_index].process::<BandPass>(
                &mode_f,
                &mode_q,
                &mode_a,
                input,
                output,
                bank_index > 0,
            );
        }
    }
}

/// Map the stretch control to the per-partial stiffness increment.
#[inline]
fn stretch_to_stiffness(stretch: f32) -> f32 {
    0.01 * (10.0_f32.powf(2.0 * stretch) - 1.0)
}

/// Inverse of the stretch factor reached by partial `n`.
#[inline]
fn nth_harmonic_compensation(n: usize, mut stiffness: f32) -> f32 {
    let mut stretch_factor = 1.0;
    for _ in 0..n.saturating_sub(1) {
        stretch_factor += stiffness;
        stiffness *= 0.98;
    }
    1.0 / stretch_factor
}
