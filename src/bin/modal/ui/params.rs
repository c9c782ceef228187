//! Parameter panel - one bar per knob, the selected one highlighted

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::state::{ControlState, Param};

const BAR_WIDTH: usize = 24;

pub fn render_params(frame: &mut Frame, area: Rect, controls: &ControlState, selected: usize) {
    let block = Block::default()
        .title(format!(" Body ({:?}) ", controls.excitation))
        .borders(Borders::ALL);

    let lines: Vec<Line> = Param::ALL
        .iter()
        .enumerate()
        .map(|(i, &param)| {
            let value = controls.get(param);
            let filled = (value * BAR_WIDTH as f32).round() as usize;
            let bar = format!(
                "{}{}",
                "█".repeat(filled),
                "·".repeat(BAR_WIDTH.saturating_sub(filled))
            );
            let style = if i == selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(vec![
                Span::styled(format!(" {:<11}", param.label()), style),
                Span::styled(bar, Style::default().fg(Color::Cyan)),
                Span::styled(format!(" {:.2}", value), Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
