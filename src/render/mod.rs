//! Plain-text renderers shared by the CLI pages and the TUI.

pub mod bloch;
pub mod circuit;
pub mod sphere;

/// `[██████····]` for a fraction in [0, 1].
pub fn bar(frac: f64, width: usize) -> String {
    let filled = (frac.clamp(0.0, 1.0) * width as f64).round() as usize;
    format!("[{}{}]", "█".repeat(filled), "·".repeat(width - filled.min(width)))
}

#[cfg(test)]
mod tests {
    use super::bar;

    #[test]
    fn bar_widths() {
        assert_eq!(bar(0.5, 4), "[██··]");
        assert_eq!(bar(2.0, 3), "[███]");
        assert_eq!(bar(-1.0, 2), "[··]");
    }
}
