use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    dsp::{
        one_pole::{FrequencyApproximation, OnePole},
        resonator::{Resonator, ResonatorParams, MAX_NUM_MODES},
        response::LowPass,
        units::semitones_to_ratio,
    },
    graph::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/*
Mallet Voice
============

A modal voice: something hits the body, the body rings.

    click / noise ──→ [one-pole LPF] ──→ [resonator] ──→ out

The exciter has two modes:

  Strike  A single click on note-on. The click is scaled up by the
          inverse of the LPF's first-sample gain, so the filtered strike
          has the same peak whatever the hardness.
  Noise   Continuous white noise, for bowed or blown textures with no
          trigger at all.

Hardness sets the LPF cutoff relative to the note: a soft mallet (low
hardness) only excites the lowest modes, a hard one reaches the top of the
spectrum. Cutoff is f0 * 2 shifted by up to +-30 semitones.

Rendering is split into chunks of at most MAX_BLOCK_SIZE so the excitation
scratch buffer can live inside the node.
*/

/// Peak below which a struck voice counts as finished (-100 dB).
const SILENCE_THRESHOLD: f32 = 1.0e-5;
const MIN_EXCITER_CUTOFF: f32 = 1.0e-4;
/// Upper bound of the fast tangent tier's accurate range.
const MAX_EXCITER_CUTOFF: f32 = 0.25;
const NOISE_LEVEL: f32 = 0.02;

/// Excitation source for the mallet voice.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExcitationMode {
    Strike,
    Noise,
}

/// Settings fixed at construction (or on `reconfigure`).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MalletConfig {
    /// Excitation point along the body, 0.0-1.0.
    pub position: f32,
    /// Number of active modes, up to 128.
    pub resolution: usize,
    pub excitation: ExcitationMode,
    /// Mallet hardness, 0.0 (felt) to 1.0 (metal).
    pub hardness: f32,
    /// Output gain.
    pub level: f32,
}

impl Default for MalletConfig {
    fn default() -> Self {
        Self {
            position: 0.15,
            resolution: 64,
            excitation: ExcitationMode::Strike,
            hardness: 0.5,
            level: 1.0,
        }
    }
}

pub struct MalletNode {
    config: MalletConfig,
    params: ResonatorParams,
    exciter_filter: OnePole,
    resonator: Resonator,
    excitation: [f32; MAX_BLOCK_SIZE],
    rng: StdRng,
    /// Accent of a strike waiting for the next block.
    pending_strike: Option<f32>,
    last_peak: f32,
}

impl MalletNode {
    pub fn new(config: MalletConfig) -> Self {
        let resolution = config.resolution.min(MAX_NUM_MODES);
        debug!(
            position = config.position,
            resolution,
            excitation = ?config.excitation,
            "mallet voice configured"
        );

        Self {
            config: MalletConfig { resolution, ..config },
            params: ResonatorParams::default(),
            exciter_filter: OnePole::new(),
            resonator: Resonator::new(config.position, resolution),
            excitation: [0.0; MAX_BLOCK_SIZE],
            rng: StdRng::seed_from_u64(0x6d61_6c6c),
            pending_strike: None,
            last_peak: 0.0,
        }
    }

    /// Set the resonator controls used from the next block on.
    pub fn with_params(mut self, params: ResonatorParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_excitation(mut self, excitation: ExcitationMode) -> Self {
        self.config.excitation = excitation;
        self
    }

    pub fn params(&self) -> &ResonatorParams {
        &self.params
    }

    pub fn set_params(&mut self, params: ResonatorParams) {
        self.params = params;
    }

    pub fn config(&self) -> &MalletConfig {
        &self.config
    }

    pub fn set_excitation(&mut self, excitation: ExcitationMode) {
        self.config.excitation = excitation;
        if excitation == ExcitationMode::Noise {
            self.pending_strike = None;
        }
    }

    pub fn set_hardness(&mut self, hardness: f32) {
        self.config.hardness = hardness.clamp(0.0, 1.0);
    }

    /// Move the listening position or change the mode count.
    ///
    /// Re-initializes the resonator, which silences any ringing modes.
    pub fn reconfigure(&mut self, position: f32, resolution: usize) {
        let resolution = resolution.min(MAX_NUM_MODES);
        debug!(position, resolution, "mallet voice reconfigured");
        self.config.position = position;
        self.config.resolution = resolution;
        self.resonator.init(position, resolution);
        self.exciter_filter.reset();
        self.last_peak = 0.0;
    }

    /// Strike the body with the given accent (0.0-1.0).
    pub fn strike(&mut self, accent: f32) {
        if self.config.excitation == ExcitationMode::Strike {
            self.pending_strike = Some(accent.clamp(0.0, 1.0));
        }
    }

    fn exciter_cutoff(&self, f0: f32) -> f32 {
        let hardness = self.config.hardness;
        let shift = (hardness * (2.0 - hardness) - 0.5) * 60.0;
        (2.0 * f0 * semitones_to_ratio(shift)).clamp(MIN_EXCITER_CUTOFF, MAX_EXCITER_CUTOFF)
    }

    fn fill_excitation(&mut self, len: usize) {
        let excitation = &mut self.excitation[..len];
        match self.config.excitation {
            ExcitationMode::Strike => {
                excitation.fill(0.0);
                if let Some(accent) = self.pending_strike.take() {
                    let g = self.exciter_filter.g();
                    let amplitude = 0.12 + 0.08 * accent;
                    excitation[0] = amplitude * (1.0 + g) / g;
                }
            }
            ExcitationMode::Noise => {
                for sample in excitation.iter_mut() {
                    *sample = self.rng.gen_range(-1.0..1.0) * NOISE_LEVEL;
                }
            }
        }
    }
}

impl Default for MalletNode {
    fn default() -> Self {
        Self::new(MalletConfig::default())
    }
}

impl GraphNode for MalletNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let f0 = ctx.normalized_frequency();
        let cutoff = self.exciter_cutoff(f0);
        self.exciter_filter
            .set_frequency(cutoff, FrequencyApproximation::Fast);

        let level = self.config.level;
        let mut peak = 0.0f32;
        for chunk in out.chunks_mut(MAX_BLOCK_SIZE) {
            let len = chunk.len();
            self.fill_excitation(len);
            let excitation = &mut self.excitation[..len];
            self.exciter_filter.process_block::<LowPass>(excitation);
            self.resonator.process(f0, &self.params, excitation, chunk);

            for sample in chunk.iter_mut() {
                *sample *= level;
                peak = peak.max(sample.abs());
            }
        }
        self.last_peak = peak;
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.strike(ctx.accent());
    }

    fn is_active(&self) -> bool {
        match self.config.excitation {
            ExcitationMode::Noise => true,
            ExcitationMode::Strike => {
                self.pending_strike.is_some() || self.last_peak > SILENCE_THRESHOLD
            }
        }
    }
}
