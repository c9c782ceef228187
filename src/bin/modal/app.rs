//! Audio stream setup and the realtime render callback

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use rtrb::RingBuffer;
use tracing::{info, warn};

use modal_dsp::{
    graph::{GraphNode, MalletNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

use super::ui::{ControlMessage, ControlState, UiApp};

/// Samples buffered towards the scope and spectrum.
const VIS_RING_SIZE: usize = 16_384;
const CONTROL_RING_SIZE: usize = 64;

/// Main application: one voice, one output stream, one terminal UI.
pub struct Modal {
    voice: MalletNode,
    note: u8,
}

impl Modal {
    pub fn new(voice: MalletNode, note: u8) -> Self {
        Self { voice, note }
    }

    /// Run the application (takes over the terminal, plays audio)
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;
        info!(sample_rate, channels, note = self.note, "opening output stream");

        let controls = ControlState::from_voice(&self.voice);
        let (control_tx, mut control_rx) = RingBuffer::<ControlMessage>::new(CONTROL_RING_SIZE);
        let (mut audio_tx, audio_rx) = RingBuffer::<f32>::new(VIS_RING_SIZE);

        let mut voice = self.voice;
        let mut ctx = RenderCtx::from_note(sample_rate, self.note, 100.0);
        let mut render_buf = [0.0f32; MAX_BLOCK_SIZE];

        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                while let Ok(message) = control_rx.pop() {
                    match message {
                        ControlMessage::Strike { velocity } => {
                            ctx.velocity = velocity;
                            voice.note_on(&ctx);
                        }
                        ControlMessage::SetExcitation(mode) => voice.set_excitation(mode),
                        ControlMessage::SetParams(params) => voice.set_params(params),
                        ControlMessage::SetHardness(hardness) => voice.set_hardness(hardness),
                    }
                }

                let total_frames = data.len() / channels;
                let mut frames_written = 0;
                while frames_written < total_frames {
                    let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                    let block = &mut render_buf[..frames_to_render];
                    voice.render_block(block, &ctx);

                    // Copy to output (mono to all channels)
                    let out_off = frames_written * channels;
                    for (i, &s) in block.iter().enumerate() {
                        for ch in 0..channels {
                            data[out_off + i * channels + ch] = s;
                        }
                        // Drop samples when the UI falls behind.
                        let _ = audio_tx.push(s);
                    }

                    frames_written += frames_to_render;
                }
            },
            |err| warn!("audio stream error: {}", err),
            None,
        )?;

        stream.play()?;

        let mut ui = UiApp::new(audio_rx, control_tx, controls, sample_rate, self.note);
        let mut terminal = ratatui::init();
        let result = ui.run(&mut terminal);
        ratatui::restore();
        result
    }
}
