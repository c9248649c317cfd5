//! ASCII Bloch sphere: side (XZ) and top (XY) projections next to each other.

use crate::core::quantum::bloch::BlochVector;

#[derive(Clone, Debug)]
pub struct BlochRenderConfig {
    /// Radius in character cells (horizontal); rows use half of it.
    pub size: usize,
    pub show_labels: bool,
    pub show_coords: bool,
    pub point_char: char,
    /// Drawn instead of `point_char` for vectors strictly inside the sphere.
    pub mixed_char: char,
}

impl Default for BlochRenderConfig {
    fn default() -> Self {
        Self {
            size: 10,
            show_labels: true,
            show_coords: true,
            point_char: '●',
            mixed_char: '○',
        }
    }
}

/// One projection; `u` runs left→right, `v` bottom→top, both in [-1, 1].
fn plane(cfg: &BlochRenderConfig, u: f64, v: f64, point: char) -> Vec<Vec<char>> {
    let size = cfg.size.max(2);
    let half = size / 2;
    let (w, h) = (2 * size + 1, 2 * half + 1);
    let mut grid = vec![vec![' '; w]; h];
    let cell = |a: f64, b: f64| -> (usize, usize) {
        let col = ((1.0 + a.clamp(-1.0, 1.0)) * size as f64).round() as usize;
        let row = ((1.0 - b.clamp(-1.0, 1.0)) * half as f64).round() as usize;
        (row.min(h - 1), col.min(w - 1))
    };
    for deg in (0..360).step_by(3) {
        let t = (deg as f64).to_radians();
        let (r, c) = cell(t.cos(), t.sin());
        grid[r][c] = '·';
    }
    for row in grid.iter_mut() {
        row[size] = '│';
    }
    for c in grid[half].iter_mut() {
        *c = '─';
    }
    grid[half][size] = '┼';
    let (r, c) = cell(u, v);
    grid[r][c] = point;
    grid
}

fn lines_of(grid: &[Vec<char>]) -> Vec<String> {
    grid.iter().map(|r| r.iter().collect()).collect()
}

pub fn render_bloch(vector: &BlochVector, cfg: &BlochRenderConfig) -> String {
    let point = if vector.magnitude() < 1.0 - 1e-6 { cfg.mixed_char } else { cfg.point_char };
    let size = cfg.size.max(2);
    let width = 2 * size + 1;
    let side = lines_of(&plane(cfg, vector.x, vector.z, point));
    let top = lines_of(&plane(cfg, vector.x, vector.y, point));

    let mut out = String::new();
    if cfg.show_coords {
        out.push_str(&format!("Bloch vector: {vector}  |r| = {:.3}\n", vector.magnitude()));
    }
    let pad = |s: &str| format!("{s:^width$}");
    let mut push_row = |left: &str, right: &str| {
        let line = format!("{}   {}", pad(left), pad(right));
        out.push_str(line.trim_end());
        out.push('\n');
    };
    push_row("side (XZ)", "top (XY)");
    if cfg.show_labels {
        push_row("|0⟩", "|+i⟩");
    }
    for (l, r) in side.iter().zip(top.iter()) {
        push_row(l, r);
    }
    if cfg.show_labels {
        push_row("|1⟩", "|−i⟩");
        push_row("|−⟩ ← x → |+⟩", "|−⟩ ← x → |+⟩");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn north_pole_point_on_top_row() {
        let cfg = BlochRenderConfig { show_labels: false, show_coords: false, ..Default::default() };
        let text = render_bloch(&BlochVector::new(0.0, 0.0, 1.0), &cfg);
        let rows: Vec<&str> = text.lines().collect();
        // header, then the first grid row
        assert!(rows[1].contains('●'));
        assert!(!rows[2].contains('●'));
    }

    #[test]
    fn mixed_vector_uses_hollow_marker() {
        let text = render_bloch(&BlochVector::new(0.0, 0.0, 0.0), &BlochRenderConfig::default());
        assert!(text.contains('○'));
        assert!(!text.contains('●'));
        assert!(text.contains("|r| = 0.000"));
    }

    #[test]
    fn no_trailing_whitespace() {
        let text = render_bloch(&BlochVector::new(1.0, 0.0, 0.0), &BlochRenderConfig::default());
        assert!(text.lines().all(|l| l == l.trim_end()));
    }
}
