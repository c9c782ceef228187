//! Spectrum analyzer widget
//!
//! Hann-windowed FFT, reduced to log-spaced bands so the mode ladder reads
//! evenly from the fundamental up.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// Number of log-spaced bands to display
const SPECTRUM_BANDS: usize = 96;
const FLOOR_DB: f64 = -100.0;

pub struct SpectrumAnalyzer {
    window: Vec<f32>,
    /// FFT bin range `[start, end)` covered by each band
    band_ranges: Vec<(usize, usize)>,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    /// (log10 of band centre in Hz, magnitude in dB)
    spectrum: Vec<(f64, f64)>,
}

impl SpectrumAnalyzer {
    /// `buffer_len` is the FFT size and must match the buffers passed to
    /// `update`.
    pub fn new(buffer_len: usize, sample_rate: f32) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(buffer_len);

        let denom = buffer_len.saturating_sub(1).max(1) as f32;
        let window: Vec<f32> = (0..buffer_len)
            .map(|i| 0.5 * (1.0 - (std::f32::consts::TAU * i as f32 / denom).cos()))
            .collect();

        let half = (buffer_len / 2).max(2);
        let bin_hz = sample_rate as f64 / buffer_len.max(1) as f64;
        let min_freq = 20.0f64;
        let max_freq = (sample_rate as f64 / 2.0).max(min_freq * 2.0);
        let ratio = max_freq / min_freq;

        let mut band_ranges = Vec::with_capacity(SPECTRUM_BANDS);
        let mut spectrum = Vec::with_capacity(SPECTRUM_BANDS);
        for i in 0..SPECTRUM_BANDS {
            let lo = min_freq * ratio.powf(i as f64 / SPECTRUM_BANDS as f64);
            let hi = min_freq * ratio.powf((i + 1) as f64 / SPECTRUM_BANDS as f64);
            let start = ((lo / bin_hz).floor() as usize).clamp(1, half - 1);
            let end = ((hi / bin_hz).ceil() as usize).clamp(start + 1, half);
            band_ranges.push((start, end));
            spectrum.push(((lo * hi).sqrt().log10(), FLOOR_DB));
        }

        Self {
            window,
            band_ranges,
            fft,
            scratch: vec![Complex::new(0.0, 0.0); buffer_len],
            spectrum,
        }
    }

    /// Recompute the bands from a new buffer; other lengths are ignored.
    pub fn update(&mut self, buffer: &[f32]) {
        if buffer.len() != self.window.len() {
            return;
        }

        for ((bin, &sample), &w) in self.scratch.iter_mut().zip(buffer).zip(&self.window) {
            *bin = Complex::new(sample * w, 0.0);
        }
        self.fft.process(&mut self.scratch);

        // Amplitude normalized so a full-scale sine reads about 0 dB.
        let scale = 2.0 / self.window.iter().sum::<f32>().max(1e-9);
        for (band, &(start, end)) in self.spectrum.iter_mut().zip(&self.band_ranges) {
            let peak = self.scratch[start..end]
                .iter()
                .map(|c| c.norm() * scale)
                .fold(0.0f32, f32::max);
            band.1 = (20.0 * (peak.max(1e-9) as f64).log10()).max(FLOOR_DB);
        }
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.spectrum
    }
}

/// Render the spectrum on a log-frequency axis
pub fn render_spectrum(frame: &mut Frame, area: Rect, spectrum: &[(f64, f64)]) {
    let block = Block::default()
        .title(" Spectrum ")
        .borders(Borders::ALL);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(spectrum);

    let (min_x, max_x) = match (spectrum.first(), spectrum.last()) {
        (Some(first), Some(last)) => (first.0, last.0.max(first.0 + 1.0)),
        _ => (1.0, 4.5),
    };

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([min_x, max_x])
                .labels(vec!["20", "200", "2k", "20k"])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, 0.0])
                .labels(vec!["-100", "-50", "0"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
