use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use super::{bloch_canvas, palette, with_terminal, Term};
use crate::core::quantum::analysis::QubitClass;
use crate::core::quantum::bloch::BlochVector;
use crate::core::quantum::density::DensityMatrix;
use crate::core::realms::{PaletteGate, RealmsBoard, CITIZENS, MISSION_BRIEFING, MISSION_TITLE, STEPS};

struct App<'b> {
    board: &'b mut RealmsBoard,
    cursor: (usize, usize),
    labels: [QubitClass; CITIZENS],
    blochs: [BlochVector; CITIZENS],
    status: String,
    celebrate_until: Option<Instant>,
}

impl App<'_> {
    fn refresh(&mut self) -> Result<()> {
        let out = self.board.evaluate()?;
        for q in 0..CITIZENS {
            self.blochs[q] = BlochVector::from_density(&DensityMatrix::reduced_from_state(&out.state, q)?)?;
        }
        self.labels = out.labels;
        if out.just_completed {
            self.celebrate_until = Some(Instant::now() + Duration::from_secs(3));
            self.status = "BELL STATE CREATED!".into();
        }
        Ok(())
    }
}

/// Edits `board` in place; the caller persists it.
pub fn run_realms_tui(board: &mut RealmsBoard) -> Result<()> {
    let mut app = App {
        board,
        cursor: (0, 0),
        labels: [QubitClass::Idle; CITIZENS],
        blochs: [BlochVector::new(0.0, 0.0, 1.0); CITIZENS],
        status: "1-4 select gate • arrows move • Enter place • Del clear • r reset • q quit".into(),
        celebrate_until: None,
    };
    app.refresh()?;
    with_terminal("Quantum Realms", |term| run_app(term, &mut app))
}

fn run_app(term: &mut Term, app: &mut App<'_>) -> Result<()> {
    let tick_rate = Duration::from_millis(100);
    loop {
        term.draw(|f| ui(f, app))?;
        if !event::poll(tick_rate)? {
            continue;
        }
        let Event::Key(KeyEvent { code, modifiers, kind, .. }) = event::read()? else {
            continue;
        };
        if kind != KeyEventKind::Press {
            continue;
        }
        let (q, s) = app.cursor;
        match code {
            KeyCode::Esc | KeyCode::Char('q') => break,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => break,
            KeyCode::Char(d @ '1'..='4') => {
                let idx = d as usize - '1' as usize;
                let g = PaletteGate::ALL[idx];
                app.board.select(g);
                app.status = format!("Selected Gate: {}", g.title());
            }
            KeyCode::Up => app.cursor.0 = q.saturating_sub(1),
            KeyCode::Down => app.cursor.0 = (q + 1).min(CITIZENS - 1),
            KeyCode::Left => app.cursor.1 = s.saturating_sub(1),
            KeyCode::Right => app.cursor.1 = (s + 1).min(STEPS - 1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                app.board.place(q, s)?;
                app.refresh()?;
            }
            KeyCode::Delete | KeyCode::Backspace => {
                app.board.clear(q, s)?;
                app.refresh()?;
            }
            KeyCode::Char('r') => {
                app.board.reset();
                app.status = "Circuit reset".into();
                app.refresh()?;
            }
            _ => {}
        }
    }
    Ok(())
}

fn class_color(class: QubitClass) -> Color {
    let (_, violet, sky, dim) = palette();
    match class {
        QubitClass::Idle => dim,
        QubitClass::Superposition => sky,
        QubitClass::Entangled => violet,
    }
}

fn ui(f: &mut ratatui::Frame<'_>, app: &App<'_>) {
    let (accent, violet, _, dim) = palette();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Length(2), // briefing
            Constraint::Min(12),   // main
            Constraint::Length(3), // mission
            Constraint::Length(1), // status
        ])
        .split(f.size());

    let header = Paragraph::new(Line::from(Span::styled(
        " 🌌 Quantum Realms: The State Architect ",
        Style::default().fg(Color::White).bg(violet).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    f.render_widget(header, rows[0]);
    let briefing = Paragraph::new(vec![
        Line::from(Span::styled(MISSION_TITLE, Style::default().add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(MISSION_BRIEFING, Style::default().fg(dim))),
    ])
    .wrap(Wrap { trim: true });
    f.render_widget(briefing, rows[1]);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Length(40), Constraint::Min(20)])
        .split(rows[2]);

    // Palette
    let items: Vec<ListItem> = PaletteGate::ALL
        .iter()
        .enumerate()
        .map(|(i, g)| {
            let style = if app.board.selected == Some(*g) {
                Style::default().fg(Color::Black).bg(accent)
            } else {
                Style::default()
            };
            ListItem::new(format!("{} {}", i + 1, g.title())).style(style)
        })
        .collect();
    f.render_widget(
        List::new(items).block(Block::default().borders(Borders::ALL).title("Gate Palette")),
        cols[0],
    );

    draw_canvas_grid(f, cols[1], app);

    let spheres = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(cols[2]);
    for q in 0..CITIZENS {
        let color = class_color(app.labels[q]);
        let title = format!(" Citizen Q{q}: {} ", app.labels[q].label());
        f.render_widget(bloch_canvas(title, app.blochs[q], color), spheres[q]);
    }

    let celebrating = app.celebrate_until.map(|t| Instant::now() < t).unwrap_or(false);
    let mission = if app.board.mission_complete {
        let text = if celebrating { "🎉 BELL STATE CREATED! 🎉" } else { "🎉 Mission Complete! 🎉" };
        Paragraph::new(vec![
            Line::from(Span::styled(text, Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))),
            Line::from("You've successfully entangled two qubits and created a Bell State. Professor Qubit is proud!"),
        ])
    } else {
        Paragraph::new("Goal: (|00⟩ + |11⟩)/√2").style(Style::default().fg(dim))
    };
    f.render_widget(mission.block(Block::default().borders(Borders::TOP)), rows[3]);
    f.render_widget(Paragraph::new(app.status.as_str()).style(Style::default().fg(dim)), rows[4]);
}

fn draw_canvas_grid(f: &mut ratatui::Frame<'_>, area: Rect, app: &App<'_>) {
    let (accent, _, _, dim) = palette();
    let mut lines = vec![Line::from(""), Line::from("          step 0    step 1    step 2")];
    for (q, row) in app.board.grid.iter().enumerate() {
        let mut spans = vec![Span::raw(format!("  Q{q}  "))];
        for (s, cell) in row.iter().enumerate() {
            let text = format!("{:^10}", format!("[{}]", cell.map(|g| g.cell()).unwrap_or(" ")));
            let style = if app.cursor == (q, s) {
                Style::default().fg(Color::Black).bg(accent).add_modifier(Modifier::BOLD)
            } else if cell.is_some() {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(dim)
            };
            spans.push(Span::styled(text, style));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(spans));
    }
    let block = Block::default().borders(Borders::ALL).title("Quantum Circuit Canvas");
    f.render_widget(Paragraph::new(lines).block(block), area);
}
