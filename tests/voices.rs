use modal_dsp::{
    graph::{ExcitationMode, GraphNode, MalletNode, RenderCtx},
    voices,
};

const SAMPLE_RATE: f32 = 48_000.0;

fn presets() -> Vec<(&'static str, MalletNode)> {
    vec![
        ("mallet", voices::mallet()),
        ("marimba", voices::marimba()),
        ("bell", voices::bell()),
    ]
}

fn render_seconds(node: &mut MalletNode, ctx: &RenderCtx, seconds: f32) -> Vec<f32> {
    let len = (seconds * ctx.sample_rate) as usize;
    let mut output = vec![0.0f32; len];
    for block in output.chunks_mut(512) {
        node.render_block(block, ctx);
    }
    output
}

#[test]
fn presets_ring_when_struck() {
    let ctx = RenderCtx::from_note(SAMPLE_RATE, 57, 100.0);
    for (name, mut voice) in presets() {
        voice.note_on(&ctx);
        let output = render_seconds(&mut voice, &ctx, 1.0);

        let peak = output.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        assert!(output.iter().all(|s| s.is_finite()), "{} went non-finite", name);
        assert!(peak > 0.01, "{} too quiet: {}", name, peak);
        assert!(peak < 4.0, "{} too loud: {}", name, peak);
    }
}

#[test]
fn marimba_dies_out() {
    let ctx = RenderCtx::from_note(SAMPLE_RATE, 60, 127.0);
    let mut voice = voices::marimba();
    voice.note_on(&ctx);
    assert!(voice.is_active());

    render_seconds(&mut voice, &ctx, 5.0);
    assert!(!voice.is_active());
}

#[test]
fn bell_outlasts_marimba() {
    let ctx = RenderCtx::from_note(SAMPLE_RATE, 60, 100.0);
    let tail_energy = |mut voice: MalletNode| {
        voice.note_on(&ctx);
        let output = render_seconds(&mut voice, &ctx, 1.5);
        output[output.len() - 4800..].iter().map(|s| s * s).sum::<f32>()
    };
    assert!(tail_energy(voices::bell()) > tail_energy(voices::marimba()) * 100.0);
}

#[test]
fn noise_excitation_sustains() {
    let ctx = RenderCtx::from_note(SAMPLE_RATE, 57, 100.0);
    for (name, voice) in presets() {
        let mut voice = voice.with_excitation(ExcitationMode::Noise);
        let output = render_seconds(&mut voice, &ctx, 2.0);

        let last_second = &output[output.len() / 2..];
        let rms = (last_second.iter().map(|s| s * s).sum::<f32>() / last_second.len() as f32).sqrt();
        assert!(rms > 0.0, "{} silent under noise", name);
        assert!(last_second.iter().all(|s| s.is_finite() && s.abs() < 10.0), "{} unbounded", name);
        assert!(voice.is_active());
    }
}
