//! Shared state types for UI communication
//!
//! Everything that crosses to the audio thread is `Copy` so the callback
//! never allocates or frees.

use modal_dsp::{
    dsp::ResonatorParams,
    graph::{ExcitationMode, MalletNode},
};

/// Commands sent from UI thread to audio thread
#[derive(Clone, Copy, Debug)]
pub enum ControlMessage {
    /// Hit the body (MIDI-style velocity, 0-127)
    Strike { velocity: f32 },
    SetExcitation(ExcitationMode),
    SetParams(ResonatorParams),
    SetHardness(f32),
}

/// Knobs shown in the parameter panel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Param {
    Structure,
    Brightness,
    Damping,
    Stretch,
    Loss,
    Hardness,
}

impl Param {
    pub const ALL: [Param; 6] = [
        Param::Structure,
        Param::Brightness,
        Param::Damping,
        Param::Stretch,
        Param::Loss,
        Param::Hardness,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Param::Structure => "Structure",
            Param::Brightness => "Brightness",
            Param::Damping => "Damping",
            Param::Stretch => "Stretch",
            Param::Loss => "Loss",
            Param::Hardness => "Hardness",
        }
    }
}

/// UI-side mirror of the voice's controls
#[derive(Clone, Copy, Debug)]
pub struct ControlState {
    pub params: ResonatorParams,
    pub hardness: f32,
    pub excitation: ExcitationMode,
}

impl ControlState {
    pub fn from_voice(voice: &MalletNode) -> Self {
        Self {
            params: *voice.params(),
            hardness: voice.config().hardness,
            excitation: voice.config().excitation,
        }
    }

    pub fn get(&self, param: Param) -> f32 {
        match param {
            Param::Structure => self.params.structure,
            Param::Brightness => self.params.brightness,
            Param::Damping => self.params.damping,
            Param::Stretch => self.params.stretch,
            Param::Loss => self.params.loss,
            Param::Hardness => self.hardness,
        }
    }

    /// Nudge a knob, clamped to [0, 1], and return the message that
    /// applies it on the audio thread.
    pub fn adjust(&mut self, param: Param, delta: f32) -> ControlMessage {
        let value = (self.get(param) + delta).clamp(0.0, 1.0);
        match param {
            Param::Structure => self.params.structure = value,
            Param::Brightness => self.params.brightness = value,
            Param::Damping => self.params.damping = value,
            Param::Stretch => self.params.stretch = value,
            Param::Loss => self.params.loss = value,
            Param::Hardness => {
                self.hardness = value;
                return ControlMessage::SetHardness(value);
            }
        }
        ControlMessage::SetParams(self.params)
    }

    pub fn toggle_excitation(&mut self) -> ControlMessage {
        self.excitation = match self.excitation {
            ExcitationMode::Strike => ExcitationMode::Noise,
            ExcitationMode::Noise => ExcitationMode::Strike,
        };
        ControlMessage::SetExcitation(self.excitation)
    }
}
