//! Quantum loader: spinning symbols and a message, once per session.

use std::io::{self, Write};
use std::thread::sleep;
use std::time::{Duration, Instant};

use anyhow::Result;
use colored::Colorize;
use crossterm::{cursor, execute, terminal};
use once_cell::sync::OnceCell;

use super::AppContext;

pub const SYMBOLS: [&str; 6] = ["|0⟩", "|1⟩", "|ψ⟩", "ℏ", "⊕", "⊗"];
const ORBIT: [&str; 8] = ["◐", "◓", "◑", "◒", "◐", "◓", "◑", "◒"];
const FRAME: Duration = Duration::from_millis(120);

static CTRLC: OnceCell<()> = OnceCell::new();

/// Ctrl+C while an animation runs would otherwise leave the cursor hidden.
pub fn install_cursor_guard() {
    CTRLC.get_or_init(|| {
        let res = ctrlc::set_handler(|| {
            let _ = execute!(io::stdout(), cursor::Show);
            println!();
            std::process::exit(130);
        });
        if let Err(e) = res {
            crate::debug_log!("ctrl-c handler not installed: {e}");
        }
    });
}

/// Text of one loader frame.
pub fn frame_text(tick: usize, message: &str) -> String {
    let orbit = ORBIT[tick % ORBIT.len()];
    let sym = SYMBOLS[tick % SYMBOLS.len()];
    format!("{orbit} {sym:<4} {message}")
}

/// Draw the loader in place for `duration`.
pub fn run_loader(message: &str, duration: Duration, accent: (u8, u8, u8)) -> Result<()> {
    install_cursor_guard();
    let mut out = io::stdout();
    execute!(out, cursor::Hide)?;
    let start = Instant::now();
    let mut tick = 0usize;
    while start.elapsed() < duration {
        let text = frame_text(tick, message);
        // blink: dim every other half-second
        let text = if (tick / 4) % 2 == 0 {
            text.truecolor(accent.0, accent.1, accent.2).to_string()
        } else {
            text.dimmed().to_string()
        };
        execute!(out, cursor::MoveToColumn(0), terminal::Clear(terminal::ClearType::CurrentLine))?;
        write!(out, "{text}")?;
        out.flush()?;
        sleep(FRAME);
        tick += 1;
    }
    execute!(out, cursor::MoveToColumn(0), terminal::Clear(terminal::ClearType::CurrentLine), cursor::Show)?;
    Ok(())
}

/// Show the loader unless disabled, non-interactive, or already shown this session.
pub fn maybe_show(ctx: &mut AppContext, suppressed: bool) -> Result<()> {
    if suppressed || !ctx.config.loader.enabled || ctx.session.state.loader_shown {
        return Ok(());
    }
    if ctx.animate() {
        let cfg = &ctx.config.loader;
        run_loader(&cfg.message, Duration::from_millis(cfg.duration_ms), ctx.accent())?;
    }
    ctx.session.state.loader_shown = true;
    ctx.session.save()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::session::Session;

    #[test]
    fn frames_cycle_symbols() {
        assert!(frame_text(0, "hi").contains("|0⟩"));
        assert!(frame_text(2, "hi").contains("|ψ⟩"));
        assert!(frame_text(6, "hi").ends_with("hi"));
    }

    #[test]
    fn loader_marks_session_once() {
        let mut ctx = AppContext::new(Config::default(), Session::in_memory(), true);
        maybe_show(&mut ctx, false).unwrap();
        assert!(ctx.session.state.loader_shown);

        let mut ctx = AppContext::new(Config::default(), Session::in_memory(), true);
        maybe_show(&mut ctx, true).unwrap();
        assert!(!ctx.session.state.loader_shown);
    }
}
