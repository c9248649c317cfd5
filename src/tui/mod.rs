//! Interactive pages (ratatui + crossterm).

pub mod explorer;
pub mod realms;

use std::io;
use std::panic::{self, AssertUnwindSafe};

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    style::{Color, Style},
    text::Span,
    widgets::{
        canvas::{Canvas, Circle, Line as CanvasLine, Points},
        Block, Borders,
    },
    Terminal,
};

use crate::core::quantum::bloch::BlochVector;

pub type Term = Terminal<CrosstermBackend<io::Stdout>>;

// ---------- Palette / Theme ----------
pub fn palette() -> (Color, Color, Color, Color) {
    (
        Color::Rgb(15, 98, 254),   // IBM blue
        Color::Rgb(142, 45, 226),  // violet
        Color::Rgb(0, 191, 255),   // deep sky
        Color::Rgb(190, 190, 200), // dim
    )
}

/// Raw mode + alternate screen around `body`; the terminal is restored even
/// if `body` panics.
pub fn with_terminal<T>(title: &str, body: impl FnOnce(&mut Term) -> Result<T>) -> Result<T> {
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle(title))?;
    let backend = CrosstermBackend::new(stdout);
    let mut term = Terminal::new(backend)?;

    let res = panic::catch_unwind(AssertUnwindSafe(|| body(&mut term)));

    terminal::disable_raw_mode()?;
    execute!(term.backend_mut(), LeaveAlternateScreen, SetTitle("myriad"))?;
    term.show_cursor()?;

    match res {
        Ok(inner) => inner,
        Err(payload) => {
            let msg = if let Some(s) = payload.downcast_ref::<&str>() {
                (*s).to_string()
            } else if let Some(s) = payload.downcast_ref::<String>() {
                s.clone()
            } else {
                "<non-string panic>".into()
            };
            anyhow::bail!("{title} crashed (panic captured): {msg}")
        }
    }
}

/// Cabinet projection: x points out of the screen, down-left.
pub fn project(x: f64, y: f64, z: f64) -> (f64, f64) {
    (y - 0.35 * x, z - 0.35 * x)
}

/// Bloch sphere as a braille canvas.
pub fn bloch_canvas<'a>(title: String, v: BlochVector, color: Color) -> Canvas<'a, impl Fn(&mut ratatui::widgets::canvas::Context<'_>)> {
    let (_, _, _, dim) = palette();
    Canvas::default()
        .block(Block::default().borders(Borders::ALL).title(Span::styled(title, Style::default().fg(color))))
        .x_bounds([-1.4, 1.4])
        .y_bounds([-1.4, 1.4])
        .paint(move |ctx| {
            ctx.draw(&Circle { x: 0.0, y: 0.0, radius: 1.0, color: dim });
            let equator: Vec<(f64, f64)> = (0..72)
                .map(|k| {
                    let t = k as f64 * std::f64::consts::TAU / 72.0;
                    project(t.cos(), t.sin(), 0.0)
                })
                .collect();
            ctx.draw(&Points { coords: &equator, color: dim });
            for (axis, label) in [
                ((0.0, 0.0, 1.0), "|0⟩"),
                ((0.0, 0.0, -1.0), "|1⟩"),
                ((1.0, 0.0, 0.0), "x"),
                ((0.0, 1.0, 0.0), "y"),
            ] {
                let (px, py) = project(axis.0, axis.1, axis.2);
                ctx.draw(&CanvasLine { x1: 0.0, y1: 0.0, x2: px, y2: py, color: dim });
                ctx.print(px * 1.15, py * 1.15, Span::styled(label, Style::default().fg(dim)));
            }
            ctx.layer();
            let (px, py) = project(v.x, v.y, v.z);
            ctx.draw(&CanvasLine { x1: 0.0, y1: 0.0, x2: px, y2: py, color });
            ctx.print(px, py, Span::styled("●", Style::default().fg(color)));
        })
}

#[cfg(test)]
mod tests {
    use super::project;

    #[test]
    fn poles_project_vertically() {
        assert_eq!(project(0.0, 0.0, 1.0), (0.0, 1.0));
        let (px, py) = project(1.0, 0.0, 0.0);
        assert!(px < 0.0 && py < 0.0);
    }
}
