//! modal - terminal modal synthesizer
//!
//! Run with: cargo run --bin modal -- --preset bell --note 60

mod app;
mod ui;

use clap::{Parser, ValueEnum};
use tracing::Level;

use app::Modal;
use modal_dsp::{graph::ExcitationMode, voices};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Preset {
    Mallet,
    Marimba,
    Bell,
}

#[derive(Parser, Debug)]
#[command(name = "modal", about = "Play a modal resonator from the terminal")]
struct Args {
    /// Starting preset
    #[arg(long, value_enum, default_value_t = Preset::Mallet)]
    preset: Preset,

    /// MIDI note to play
    #[arg(long, default_value_t = 57)]
    note: u8,

    /// Excitation position along the body (0.0-1.0), overrides the preset
    #[arg(long)]
    position: Option<f32>,

    /// Number of modes (1-128), overrides the preset
    #[arg(long)]
    resolution: Option<usize>,

    /// Start with the continuous noise exciter
    #[arg(long)]
    noise: bool,

    /// Log voice configuration to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let mut voice = match args.preset {
        Preset::Mallet => voices::mallet(),
        Preset::Marimba => voices::marimba(),
        Preset::Bell => voices::bell(),
    };

    if args.position.is_some() || args.resolution.is_some() {
        let config = *voice.config();
        voice.reconfigure(
            args.position.unwrap_or(config.position),
            args.resolution.unwrap_or(config.resolution),
        );
    }
    if args.noise {
        voice.set_excitation(ExcitationMode::Noise);
    }

    Modal::new(voice, args.note).run()
}
