use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

use super::{bloch_canvas, palette, with_terminal, Term};
use crate::core::explorer::{ExplorerState, StateTone, STEP};

struct App {
    state: ExplorerState,
    status: String,
}

pub fn run_explorer_tui(state: ExplorerState) -> Result<()> {
    let app = App {
        state,
        status: "←/→ θ • ↑/↓ φ • Shift = ×10 • 0 reset • q/Esc quit".into(),
    };
    with_terminal("Myriad Explorer", |term| run_app(term, app))
}

fn run_app(term: &mut Term, mut app: App) -> Result<()> {
    let tick_rate = Duration::from_millis(100);
    loop {
        term.draw(|f| ui(f, &app))?;
        if !event::poll(tick_rate)? {
            continue;
        }
        if let Event::Key(KeyEvent { code, modifiers, kind, .. }) = event::read()? {
            if !matches!(kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                continue;
            }
            let step = if modifiers.contains(KeyModifiers::SHIFT) { STEP * 10.0 } else { STEP };
            match code {
                KeyCode::Esc | KeyCode::Char('q') => break,
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => break,
                KeyCode::Left => app.state.nudge_theta(-step),
                KeyCode::Right => app.state.nudge_theta(step),
                KeyCode::Down => app.state.nudge_phi(-step),
                KeyCode::Up => app.state.nudge_phi(step),
                KeyCode::Char('0') => {
                    app.state = ExplorerState::default();
                    app.status = "Reset to |0⟩".into();
                }
                _ => {}
            }
        }
    }
    Ok(())
}

fn ui(f: &mut ratatui::Frame<'_>, app: &App) {
    let (accent, violet, sky, dim) = palette();
    let s = &app.state;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(10), Constraint::Length(1)])
        .split(f.size());

    let header = Paragraph::new(Line::from(Span::styled(
        " Interactive Bloch Sphere Explorer ",
        Style::default().fg(Color::Black).bg(sky).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    f.render_widget(header, rows[0]);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // θ
            Constraint::Length(3), // φ
            Constraint::Length(4), // state
            Constraint::Length(3), // P0
            Constraint::Length(3), // P1
            Constraint::Min(4),    // circuit
        ])
        .split(cols[0]);

    let theta = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Theta (θ)"))
        .gauge_style(Style::default().fg(accent))
        .ratio(s.theta() / std::f64::consts::PI)
        .label(format!("{:.3} rad", s.theta()));
    f.render_widget(theta, left[0]);
    let phi = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Phi (φ)"))
        .gauge_style(Style::default().fg(violet))
        .ratio(s.phi() / std::f64::consts::TAU)
        .label(format!("{:.3} rad", s.phi()));
    f.render_widget(phi, left[1]);

    let (label, tone) = s.label();
    let tone_color = match tone {
        StateTone::Success => Color::Green,
        StateTone::Error => Color::Red,
        StateTone::Info => sky,
    };
    let analysis = Paragraph::new(vec![
        Line::from(vec![
            Span::raw("State: "),
            Span::styled(label, Style::default().fg(tone_color).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(s.ket()),
    ])
    .block(Block::default().borders(Borders::ALL).title("State Analysis"));
    f.render_widget(analysis, left[2]);

    let (p0, p1) = s.probabilities();
    for (area, p, title) in [(left[3], p0, "P(|0⟩)"), (left[4], p1, "P(|1⟩)")] {
        let g = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(title))
            .gauge_style(Style::default().fg(sky))
            .ratio(p.clamp(0.0, 1.0))
            .label(format!("{:.1}%", p * 100.0));
        f.render_widget(g, area);
    }

    let code = Paragraph::new(s.qasm_snippet())
        .style(Style::default().fg(dim))
        .block(Block::default().borders(Borders::ALL).title("OpenQASM"))
        .wrap(Wrap { trim: false });
    f.render_widget(code, left[5]);

    let canvas = bloch_canvas(format!(" |ψ⟩ {} ", s.bloch()), s.bloch(), sky);
    f.render_widget(canvas, cols[1]);

    f.render_widget(Paragraph::new(app.status.as_str()).style(Style::default().fg(dim)), rows[2]);
}
