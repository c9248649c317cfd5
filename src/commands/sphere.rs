//! Landing page: the rotating sphere, then the welcome copy.

use std::io::{self, Write};
use std::thread::sleep;
use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use crossterm::{cursor, execute, terminal};

use super::{loader::install_cursor_guard, AppContext};
use crate::render::sphere::{PointSphere, EXPLORE_HINT, WELCOME_BODY, WELCOME_TITLE};

const ROWS: usize = 17;
const COLS: usize = 44;
pub const DEFAULT_FRAMES: u64 = 120;

pub fn welcome_text() -> String {
    let mut out = format!("{WELCOME_TITLE}\n\n");
    for p in WELCOME_BODY {
        out.push_str(p);
        out.push('\n');
    }
    out.push('\n');
    out.push_str(EXPLORE_HINT);
    out.push('\n');
    out
}

pub fn run(ctx: &AppContext, frames: Option<u64>) -> Result<()> {
    let sphere = PointSphere::new(600);
    let (r, g, b) = ctx.accent();
    let frames = if ctx.animate() { frames.unwrap_or(DEFAULT_FRAMES) } else { 0 };

    let mut out = io::stdout();
    if frames > 0 {
        install_cursor_guard();
        execute!(out, cursor::Hide)?;
        for tick in 0..frames {
            execute!(out, cursor::MoveTo(0, 0), terminal::Clear(terminal::ClearType::All))?;
            for line in sphere.frame(tick, ROWS, COLS) {
                writeln!(out, "{}", line.truecolor(r, g, b))?;
            }
            out.flush()?;
            sleep(Duration::from_millis(33));
        }
        execute!(out, cursor::Show)?;
    } else {
        for line in sphere.frame(0, ROWS, COLS) {
            writeln!(out, "{}", line.truecolor(r, g, b))?;
        }
    }
    writeln!(out)?;
    let text = welcome_text();
    let mut lines = text.lines();
    if let Some(title) = lines.next() {
        writeln!(out, "{}", title.bold())?;
    }
    for l in lines {
        writeln!(out, "{l}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn welcome_copy() {
        let t = welcome_text();
        assert!(t.starts_with("Welcome to Myriad"));
        assert!(t.contains("?page=visualization"));
    }
}
