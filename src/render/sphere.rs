//! Landing page: a slowly rotating point-cloud sphere.

/// Brightness ramp from far side to near side.
const SHADES: &[char] = &['.', '·', ':', '+', '*', '●'];

pub const WELCOME_TITLE: &str = "Welcome to Myriad";
pub const WELCOME_BODY: [&str; 2] = [
    "Explore the quantum realm through interactive visualizations and engaging content.",
    "Myriad brings quantum computing concepts to life with beautiful animations and intuitive interfaces.",
];
pub const EXPLORE_HINT: &str = "Explore Now → myriad open \"?page=visualization\"";

pub struct PointSphere {
    points: Vec<[f64; 3]>,
}

impl PointSphere {
    /// Fibonacci lattice, roughly uniform over the unit sphere.
    pub fn new(count: usize) -> Self {
        let n = count.max(2);
        let golden = std::f64::consts::PI * (3.0 - 5f64.sqrt());
        let points = (0..n)
            .map(|i| {
                let y = 1.0 - 2.0 * (i as f64 + 0.5) / n as f64;
                let r = (1.0 - y * y).sqrt();
                let t = golden * i as f64;
                [r * t.cos(), y, r * t.sin()]
            })
            .collect();
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Frame `tick`: the sphere turns 0.02 rad/tick about Y and 0.01 about X.
    /// `rows × cols` is the character canvas; cells are taken as twice as tall
    /// as wide.
    pub fn frame(&self, tick: u64, rows: usize, cols: usize) -> Vec<String> {
        let (rows, cols) = (rows.max(3), cols.max(6));
        let mut grid = vec![vec![' '; cols]; rows];
        let mut depth = vec![vec![f64::MIN; cols]; rows];
        let (ay, ax) = (0.02 * tick as f64, 0.01 * tick as f64);
        let (sy, cy, sx, cx) = (ay.sin(), ay.cos(), ax.sin(), ax.cos());
        let radius = ((rows - 1) as f64 / 2.0).min((cols - 1) as f64 / 4.0);
        let (mid_r, mid_c) = ((rows - 1) as f64 / 2.0, (cols - 1) as f64 / 2.0);

        for &[x, y, z] in &self.points {
            // about Y, then about X
            let (x1, z1) = (x * cy + z * sy, -x * sy + z * cy);
            let (y2, z2) = (y * cx - z1 * sx, y * sx + z1 * cx);
            let r = (mid_r - y2 * radius).round();
            let c = (mid_c + x1 * radius * 2.0).round();
            if r < 0.0 || c < 0.0 {
                continue;
            }
            let (r, c) = (r as usize, c as usize);
            if r >= rows || c >= cols || z2 <= depth[r][c] {
                continue;
            }
            depth[r][c] = z2;
            let shade = ((z2 + 1.0) / 2.0 * (SHADES.len() - 1) as f64).round() as usize;
            grid[r][c] = SHADES[shade.min(SHADES.len() - 1)];
        }
        grid.into_iter()
            .map(|row| row.into_iter().collect::<String>().trim_end().to_string())
            .collect()
    }
}
