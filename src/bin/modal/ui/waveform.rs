//! Waveform oscilloscope widget
//!
//! The scope draws the latest output scaled to its own peak, with the peak
//! envelope on top so the ring-down of the modes stays readable.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// Segments the envelope is measured over.
const ENVELOPE_SEGMENTS: usize = 32;

/// Peak magnitude per segment, as (segment centre in 0..1, peak).
fn peak_envelope(buffer: &[f32], segments: usize) -> Vec<(f64, f64)> {
    if buffer.is_empty() || segments == 0 {
        return Vec::new();
    }
    let segment_len = buffer.len().div_ceil(segments);
    let len = buffer.len() as f64;
    buffer
        .chunks(segment_len)
        .enumerate()
        .map(|(i, segment)| {
            let peak = segment.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
            let centre = (i * segment_len) as f64 + segment.len() as f64 / 2.0;
            (centre / len, peak as f64)
        })
        .collect()
}

/// Level change from the first to the last envelope segment, in dB.
fn decay_db(envelope: &[(f64, f64)]) -> Option<f64> {
    let first = envelope.first()?.1;
    let last = envelope.last()?.1;
    if first <= 0.0 || last <= 0.0 {
        return None;
    }
    Some(20.0 * (last / first).log10())
}

pub fn render_waveform(frame: &mut Frame, area: Rect, audio_buffer: &[f32]) {
    let envelope = peak_envelope(audio_buffer, ENVELOPE_SEGMENTS);
    let peak = envelope.iter().fold(0.0f64, |acc, &(_, p)| acc.max(p));
    let range = peak.max(1e-3);

    let title = match decay_db(&envelope) {
        Some(db) => format!(" Waveform  peak {:.3}  {:+.1} dB ", peak, db),
        None => format!(" Waveform  peak {:.3} ", peak),
    };
    let block = Block::default().title(title).borders(Borders::ALL);

    let len = audio_buffer.len().max(1) as f64;
    let samples: Vec<(f64, f64)> = audio_buffer
        .iter()
        .enumerate()
        .map(|(i, &sample)| (i as f64 / len, sample as f64))
        .collect();

    let datasets = vec![
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&samples),
        Dataset::default()
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Yellow))
            .data(&envelope),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-range, range])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
