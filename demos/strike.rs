//! Strike a preset voice offline and print its decay.
//!
//! Renders a few seconds of one preset after a single note-on, then prints
//! a coarse peak envelope in dB and the time it takes to fall 60 dB.
//!
//! Run with: cargo run --example strike -- --voice bell --note 72

use clap::{Parser, ValueEnum};
use color_eyre::eyre::eyre;
use modal_dsp::{
    graph::{GraphNode, MalletNode, RenderCtx},
    voices,
};

const SAMPLE_RATE: f32 = 48_000.0;
const BLOCK_SIZE: usize = 512;
/// Envelope resolution, 100 ms.
const SEGMENT: usize = 4_800;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Voice {
    Mallet,
    Marimba,
    Bell,
}

#[derive(Debug, Parser)]
struct Args {
    #[arg(long, value_enum, default_value = "bell")]
    voice: Voice,
    /// MIDI note number.
    #[arg(long, default_value_t = 60)]
    note: u8,
    #[arg(long, default_value_t = 100.0)]
    velocity: f32,
    /// Seconds to render.
    #[arg(long, default_value_t = 4.0)]
    seconds: f32,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    if args.note > 127 {
        return Err(eyre!("note {} is outside the MIDI range", args.note));
    }

    let mut voice: MalletNode = match args.voice {
        Voice::Mallet => voices::mallet(),
        Voice::Marimba => voices::marimba(),
        Voice::Bell => voices::bell(),
    };
    let ctx = RenderCtx::from_note(SAMPLE_RATE, args.note, args.velocity);
    voice.note_on(&ctx);

    let total = (args.seconds.max(0.1) * SAMPLE_RATE) as usize;
    let mut rendered = Vec::with_capacity(total);
    let mut block = [0.0f32; BLOCK_SIZE];
    while rendered.len() < total {
        voice.render_block(&mut block, &ctx);
        rendered.extend_from_slice(&block);
    }
    rendered.truncate(total);

    let envelope: Vec<f32> = rendered
        .chunks(SEGMENT)
        .map(|segment| segment.iter().fold(0.0f32, |acc, &x| acc.max(x.abs())))
        .collect();
    let peak = envelope.iter().copied().fold(0.0f32, f32::max);
    if peak <= 0.0 {
        return Err(eyre!("{:?} produced no output", args.voice));
    }

    println!("{:?}, note {}, peak {:.3}", args.voice, args.note, peak);
    for (i, &level) in envelope.iter().enumerate() {
        let db = 20.0 * (level.max(1e-9) / peak).log10();
        let bar = "#".repeat(((db + 80.0).max(0.0) / 2.0) as usize);
        println!("{:>5.1}s {:>7.1} dB {}", i as f32 * 0.1, db, bar);
    }

    let threshold = peak * 1.0e-3;
    match rendered.iter().rposition(|s| s.abs() > threshold) {
        Some(last) if last + 1 < rendered.len() => {
            println!("-60 dB after {:.2}s", (last + 1) as f32 / SAMPLE_RATE);
        }
        _ => println!("still above -60 dB after {:.1}s", args.seconds),
    }
    println!("voice active: {}", voice.is_active());
    Ok(())
}
