// src/core/diagnostics.rs
//! Pretty, colored, file+line diagnostics for circuit text.

use colored::Colorize;

use crate::core::error::SimulationError;

pub struct Span {
    pub line: usize,
    pub col: usize,
    pub len: usize, // underline length (use 1 if unknown)
}

impl Span {
    pub fn single(line: usize, col: usize) -> Self {
        Self { line, col, len: 1 }
    }
}

/// Render the diagnostic block as plain text (no colors); shared by the
/// colored printer and by tests.
pub fn format_error(filename: &str, source: &str, title: &str, span: &Span) -> String {
    let (ln, col) = (span.line, span.col);
    let line_text = nth_line(source, ln).unwrap_or_default();
    let ln_str = format!("{:>4}", ln);
    let underline = " ".repeat(col.saturating_sub(1)) + &"^".repeat(span.len.max(1));
    format!(
        "error: {title}\n--> {filename}:{ln}:{col}\n {gutter} |\n{ln_str} | {line_text}\n {pad} | {underline}\n",
        gutter = " ".repeat(ln_str.len()),
        pad = " ".repeat(ln_str.len()),
    )
}

pub fn print_error(filename: &str, source: &str, title: &str, span: Span) {
    eprintln!("{} {}", "error:".bright_red().bold(), title.bright_white());
    let (ln, col) = (span.line, span.col);
    let line_text = nth_line(source, ln).unwrap_or_default();

    // line number gutter
    let ln_str = format!("{:>4}", ln);
    eprintln!("{} {}", "-->".bright_blue(), format!("{}:{}:{}", filename, ln, col).bright_white());
    eprintln!(" {} {}", " ".repeat(ln_str.len()).dimmed(), "|".dimmed());
    eprintln!("{} {} {}", ln_str.dimmed(), "|".dimmed(), line_text);

    // underline with ^^^^^
    let underline = " ".repeat(col.saturating_sub(1)) + &"^".repeat(span.len.max(1));
    eprintln!(
        " {} {} {}",
        " ".repeat(ln_str.len()).dimmed(),
        "|".dimmed(),
        underline.bright_red()
    );
    eprintln!();
}

/// Print a simulation error, with a source excerpt when it has a position.
pub fn report_simulation_error(filename: &str, source: &str, err: &SimulationError) {
    match err.position() {
        Some((line, col)) => print_error(filename, source, &err.to_string(), Span::single(line, col)),
        None => eprintln!("{} {}", "error:".bright_red().bold(), err.to_string().bright_white()),
    }
}

fn nth_line(src: &str, n: usize) -> Option<String> {
    src.lines().nth(n.saturating_sub(1)).map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caret_points_at_column() {
        let src = "qreg q[1];\nfoo q[0];\n";
        let out = format_error("demo.qasm", src, "Unsupported Gate (2:1): 'foo'", &Span::single(2, 1));
        assert!(out.contains("--> demo.qasm:2:1"));
        assert!(out.contains("   2 | foo q[0];"));
        assert!(out.lines().last().unwrap().ends_with("| ^"));
    }
}
