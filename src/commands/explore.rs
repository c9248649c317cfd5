//! Explorer page: one qubit from (θ, φ).

use anyhow::Result;
use colored::Colorize;

use super::AppContext;
use crate::core::explorer::{ExplorerState, StateTone};
use crate::render::bar;
use crate::render::bloch::{render_bloch, BlochRenderConfig};

pub struct ExploreOpts {
    pub theta: f64,
    pub phi: f64,
    pub shots: Option<usize>,
    pub tui: bool,
}

pub fn render_page(state: &ExplorerState) -> String {
    let mut out = String::new();
    out.push_str(&format!("θ = {:.3} rad   φ = {:.3} rad\n\n", state.theta(), state.phi()));

    let (label, tone) = state.label();
    let label = match tone {
        StateTone::Success => label.green().bold(),
        StateTone::Error => label.red().bold(),
        StateTone::Info => label.cyan().bold(),
    };
    out.push_str(&format!("State: {label}\n"));
    out.push_str(&format!("{}\n\n", state.ket()));

    let (p0, p1) = state.probabilities();
    out.push_str(&format!("P(|0⟩) {:>6.1}%  {}\n", p0 * 100.0, bar(p0, 30)));
    out.push_str(&format!("P(|1⟩) {:>6.1}%  {}\n\n", p1 * 100.0, bar(p1, 30)));

    out.push_str(&render_bloch(&state.bloch(), &BlochRenderConfig::default()));
    out.push('\n');
    out.push_str("Circuit that prepares this state from |0⟩ (Rz(φ)·Ry(θ), up to global phase):\n");
    out.push_str(&state.qasm_snippet());
    out
}

pub fn run(_ctx: &AppContext, opts: ExploreOpts) -> Result<()> {
    let state = ExplorerState::new(opts.theta, opts.phi);
    if opts.tui {
        return crate::tui::explorer::run_explorer_tui(state);
    }
    print!("{}", render_page(&state));
    if let Some(shots) = opts.shots {
        let (zeros, ones) = state.sample(&mut rand::thread_rng(), shots);
        println!("\nshots={shots} => 0: {zeros}, 1: {ones}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_contains_snippet_and_bars() {
        colored::control::set_override(false);
        let text = render_page(&ExplorerState::new(std::f64::consts::PI, 0.0));
        assert!(text.contains("State: Basis |1⟩"));
        assert!(text.contains("P(|1⟩)  100.0%"));
        assert!(text.contains("rz(0.0000) q[0];"));
    }
}
