//! TUI module for modal
//!
//! Scope, spectrum and a parameter panel. Talks to the audio thread only
//! through lock-free ring buffers.

mod params;
mod spectrum;
pub mod state;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    DefaultTerminal, Frame,
};
use rtrb::{Consumer, Producer};
use std::time::Duration;

pub use state::{ControlMessage, ControlState, Param};

use params::render_params;
use spectrum::{render_spectrum, SpectrumAnalyzer};
use waveform::render_waveform;

/// Samples kept for the scope and the FFT
const VIS_BUFFER_SIZE: usize = 4096;
const PARAM_STEP: f32 = 0.05;
const STRIKE_VELOCITY: f32 = 100.0;

pub struct UiApp {
    audio_rx: Consumer<f32>,
    control_tx: Producer<ControlMessage>,
    controls: ControlState,
    selected: usize,
    audio_buffer: Vec<f32>,
    spectrum: SpectrumAnalyzer,
    sample_rate: f32,
    note: u8,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        audio_rx: Consumer<f32>,
        control_tx: Producer<ControlMessage>,
        controls: ControlState,
        sample_rate: f32,
        note: u8,
    ) -> Self {
        Self {
            audio_rx,
            control_tx,
            controls,
            selected: 0,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            spectrum: SpectrumAnalyzer::new(VIS_BUFFER_SIZE, sample_rate),
            sample_rate,
            note,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            if self.poll_audio() {
                self.spectrum.update(&self.audio_buffer);
            }

            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    /// Pull everything the audio thread produced, keeping the last
    /// VIS_BUFFER_SIZE samples. Returns whether anything arrived.
    fn poll_audio(&mut self) -> bool {
        let available = self.audio_rx.slots();
        if available == 0 {
            return false;
        }
        let keep = available.min(VIS_BUFFER_SIZE);
        for _ in keep..available {
            let _ = self.audio_rx.pop();
        }
        self.audio_buffer.drain(0..keep);
        while let Ok(sample) = self.audio_rx.pop() {
            self.audio_buffer.push(sample);
        }
        true
    }

    fn send(&mut self, message: ControlMessage) {
        if self.control_tx.push(message).is_err() {
            tracing::warn!(?message, "control queue full, message dropped");
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => self.send(ControlMessage::Strike {
                velocity: STRIKE_VELOCITY,
            }),
            KeyCode::Char('n') | KeyCode::Char('N') => {
                let message = self.controls.toggle_excitation();
                self.send(message);
            }
            KeyCode::Up => {
                self.selected = (self.selected + Param::ALL.len() - 1) % Param::ALL.len();
            }
            KeyCode::Down => {
                self.selected = (self.selected + 1) % Param::ALL.len();
            }
            KeyCode::Left | KeyCode::Right => {
                let delta = if key == KeyCode::Left { -PARAM_STEP } else { PARAM_STEP };
                let message = self.controls.adjust(Param::ALL[self.selected], delta);
                self.send(message);
            }
            _ => {}
        }
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Header
                Constraint::Min(8),     // Scope + spectrum
                Constraint::Length(8),  // Parameters
                Constraint::Length(1),  // Help bar
            ])
            .split(area);

        let header = Line::from(vec![
            Span::styled(format!(" note {}  ", self.note), Style::default().fg(Color::Cyan)),
            Span::styled(
                format!("{:.1}kHz", self.sample_rate / 1000.0),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(
            Paragraph::new(header).block(Block::default().title(" modal ").borders(Borders::ALL)),
            rows[0],
        );

        let scopes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);
        render_waveform(frame, scopes[0], &self.audio_buffer);
        render_spectrum(frame, scopes[1], self.spectrum.data());

        render_params(frame, rows[2], &self.controls, self.selected);

        let help = Paragraph::new(
            " [Space] Strike  [N] Noise on/off  [Up/Down] Select  [Left/Right] Adjust  [Q] Quit",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, rows[3]);
    }
}
