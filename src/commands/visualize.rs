//! Visualization page: QASM in, per-qubit purity and Bloch spheres out.
//!
//! Examples:
//!   myriad visualize                       (built-in Bell demo)
//!   myriad visualize bell.qasm --json
//!   cat ghz.qasm | myriad visualize - --backend aer

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use super::AppContext;
use crate::core::diagnostics::report_simulation_error;
use crate::core::error::SimulationError;
use crate::core::qasm::{parse_qasm_with_limit, DEMO_QASM};
use crate::core::quantum::analysis::{analyze, Analysis, QubitClass, QubitReport};
use crate::core::quantum::simulator::select_backend;
use crate::render::bloch::{render_bloch, BlochRenderConfig};
use crate::render::circuit::render_circuit;

pub const ERROR_HINT: &str = "Please check your QASM code and try again…";

pub struct VisualizeOpts {
    pub input: Option<PathBuf>,
    pub backend: Option<String>,
    pub json: bool,
    pub no_diagram: bool,
}

/// `(display name, source)`; `-` reads stdin, no input uses the demo circuit.
pub fn read_source(input: Option<&Path>) -> Result<(String, String)> {
    match input {
        None => Ok(("<demo>".into(), DEMO_QASM.to_string())),
        Some(p) if p.as_os_str() == "-" => {
            let mut src = String::new();
            std::io::stdin().read_to_string(&mut src).context("read QASM from stdin")?;
            Ok(("<stdin>".into(), src))
        }
        Some(p) => {
            let src = std::fs::read_to_string(p)
                .with_context(|| format!("read QASM file {}", p.display()))?;
            Ok((p.display().to_string(), src))
        }
    }
}

/// Parse + simulate + analyze; every failure is a `SimulationError`.
pub fn run_pipeline(src: &str, backend: &str, max_qubits: usize) -> Result<Analysis, SimulationError> {
    let circuit = parse_qasm_with_limit(src, max_qubits)?;
    let sim = select_backend(backend, max_qubits)?;
    analyze(&circuit, sim.as_ref())
}

/// Red banner + caret excerpt + hint, the page-level failure display.
pub fn print_failure(filename: &str, src: &str, err: &SimulationError) {
    eprintln!("{} {}", "Error:".bright_red().bold(), err.to_string().bright_red());
    if err.position().is_some() {
        report_simulation_error(filename, src, err);
    }
    eprintln!("{}", ERROR_HINT.yellow());
}

/// Returns the process exit code: 0 on success, 1 when the circuit failed.
pub fn run(ctx: &AppContext, opts: VisualizeOpts) -> Result<i32> {
    let (name, src) = read_source(opts.input.as_deref())?;
    let backend = opts.backend.unwrap_or_else(|| ctx.config.visualize.default_backend.clone());

    let analysis = match run_pipeline(&src, &backend, ctx.config.max_qubits) {
        Ok(a) => a,
        Err(e) => {
            crate::debug_log!("visualize failed: {e:?}");
            print_failure(&name, &src, &e);
            return Ok(1);
        }
    };

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(0);
    }
    print!("{}", render_report(ctx, &analysis, !opts.no_diagram));
    Ok(0)
}

fn class_badge(class: QubitClass) -> String {
    match class {
        QubitClass::Idle => class.label().green().to_string(),
        QubitClass::Superposition => class.label().cyan().to_string(),
        QubitClass::Entangled => class.label().magenta().bold().to_string(),
    }
}

fn fmt_complex(z: num_complex::Complex64, prec: usize) -> String {
    let sign = if z.im < 0.0 { '-' } else { '+' };
    format!("{:.prec$}{sign}{:.prec$}i", z.re, z.im.abs())
}

fn render_qubit(ctx: &AppContext, q: &QubitReport) -> String {
    let prec = ctx.config.visualize.precision;
    let (r, g, b) = ctx.accent();
    let mut out = String::new();
    out.push_str(&format!("{}\n", format!("Qubit {} ({}):", q.index, q.label).truecolor(r, g, b).bold()));
    out.push_str(&format!("  Purity of Qubit {}: {:.prec$}\n", q.index, q.purity));
    let source = if q.plot.is_pure() { "pure statevector" } else { "density matrix" };
    out.push_str(&format!("  State: {} (plotted from {source})\n", class_badge(q.class)));
    out.push_str(&format!(
        "  ρ = [[{}, {}], [{}, {}]]\n",
        fmt_complex(q.reduced.get(0, 0), prec),
        fmt_complex(q.reduced.get(0, 1), prec),
        fmt_complex(q.reduced.get(1, 0), prec),
        fmt_complex(q.reduced.get(1, 1), prec),
    ));
    for line in render_bloch(&q.bloch, &BlochRenderConfig::default()).lines() {
        out.push_str("  ");
        out.push_str(line);
        out.push('\n');
    }
    out
}

pub fn render_report(ctx: &AppContext, a: &Analysis, diagram: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n",
        format!("Simulated Quantum Circuit ({} qubits, backend: {})", a.num_qubits, a.backend).bold()
    ));
    if a.skipped_measurements > 0 {
        out.push_str(&format!(
            "{} {} measure statement(s) skipped; showing the pre-measurement state\n",
            "warn:".yellow().bold(),
            a.skipped_measurements
        ));
    }
    if diagram {
        out.push('\n');
        out.push_str(&render_circuit(&a.circuit));
    }
    out.push('\n');
    out.push_str(&format!(
        "{}\n\n",
        "Single-Qubit Reduced Density Matrices (Partial Trace + Bloch Sphere)".bold()
    ));
    for q in &a.qubits {
        out.push_str(&render_qubit(ctx, q));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::session::Session;

    fn ctx() -> AppContext {
        colored::control::set_override(false);
        AppContext::new(Config::default(), Session::in_memory(), true)
    }

    #[test]
    fn demo_report_mentions_each_qubit() {
        let a = run_pipeline(DEMO_QASM, "native", 12).unwrap();
        let text = render_report(&ctx(), &a, true);
        assert!(text.contains("Simulated Quantum Circuit (2 qubits, backend: native)"));
        assert!(text.contains("Purity of Qubit 0: 0.5000"));
        assert!(text.contains("Purity of Qubit 1: 0.5000"));
        assert!(text.contains("Entangled (plotted from density matrix)"));
        assert!(text.contains("q[0]: ─H──■─"));
    }

    #[test]
    fn measurement_warning() {
        let src = "qreg q[1]; creg c[1]; h q[0]; measure q[0] -> c[0];";
        let a = run_pipeline(src, "native", 12).unwrap();
        assert!(render_report(&ctx(), &a, false).contains("1 measure statement(s) skipped"));
    }

    #[test]
    fn pipeline_errors() {
        assert!(matches!(run_pipeline("qreg q[1]; foo q[0];", "native", 12), Err(SimulationError::UnsupportedGate { .. })));
        assert!(matches!(run_pipeline("qreg q[4];", "native", 3), Err(SimulationError::TooManyQubits { .. })));
        assert!(matches!(run_pipeline(DEMO_QASM, "quantum-annealer", 12), Err(SimulationError::Backend(_))));
    }

    #[test]
    fn complex_formatting() {
        assert_eq!(fmt_complex(num_complex::Complex64::new(0.5, -0.25), 2), "0.50-0.25i");
    }
}
