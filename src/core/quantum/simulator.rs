//! Statevector backends.
//!
//! - `native` : local engine, applies each op in place on the amplitude vector
//! - `aer`    : Qiskit Aer through pyo3 (requires `--features qiskit` + Python/Qiskit)

use num_complex::Complex64 as C64;

use crate::core::circuit::{Circuit, GateKind, Op};
use crate::core::error::SimulationError;
use crate::core::quantum::{gates, ops, types::QState};

/// Default cap on register width.
pub const MAX_QUBITS: usize = 12;
/// Hard ceiling for any configured width; the statevector holds 2^n amplitudes.
pub const QUBIT_CEILING: usize = 16;

/// Anything that turns a circuit into its final statevector.
pub trait Simulator {
    fn name(&self) -> &'static str;
    fn statevector(&self, circuit: &Circuit) -> Result<QState, SimulationError>;
}

#[derive(Clone, Debug)]
pub struct NativeSimulator {
    pub max_qubits: usize,
}

impl Default for NativeSimulator {
    fn default() -> Self {
        Self { max_qubits: MAX_QUBITS }
    }
}

impl NativeSimulator {
    /// Limits above `QUBIT_CEILING` are lowered to it.
    pub fn with_limit(max_qubits: usize) -> Self {
        Self { max_qubits: max_qubits.min(QUBIT_CEILING) }
    }
}

impl Simulator for NativeSimulator {
    fn name(&self) -> &'static str {
        "native"
    }

    fn statevector(&self, circuit: &Circuit) -> Result<QState, SimulationError> {
        let n = circuit.n_qubits;
        if n == 0 {
            return Err(SimulationError::dimension("circuit has no qubits"));
        }
        if n > self.max_qubits {
            return Err(SimulationError::TooManyQubits { requested: n, limit: self.max_qubits });
        }
        let mut psi = QState::zero(n);
        for (idx, op) in circuit.ops.iter().enumerate() {
            apply_op(op, n, psi.data.as_mut_slice())?;
            crate::debug_log!("op #{idx} {} {:?} applied", op.kind.qasm_name(), op.qubits);
        }
        Ok(psi)
    }
}

/// The 2×2 matrix a gate applies to its target (controls excluded).
fn target_matrix(op: &Op) -> nalgebra::DMatrix<C64> {
    let p = |i: usize| op.params.get(i).copied().unwrap_or(0.0);
    match op.kind {
        GateKind::Id => gates::i2(),
        GateKind::X | GateKind::Cx | GateKind::Ccx => gates::x(),
        GateKind::Y | GateKind::Cy => gates::y(),
        GateKind::Z | GateKind::Cz => gates::z(),
        GateKind::H | GateKind::Ch => gates::h(),
        GateKind::S => gates::s(),
        GateKind::Sdg => gates::sdg(),
        GateKind::T => gates::t(),
        GateKind::Tdg => gates::tdg(),
        GateKind::Sx => gates::sx(),
        GateKind::Rx => gates::rx(p(0)),
        GateKind::Ry => gates::ry(p(0)),
        GateKind::Rz | GateKind::Crz => gates::rz(p(0)),
        GateKind::P | GateKind::Cp => gates::phase(p(0)),
        GateKind::U2 => gates::u2(p(0), p(1)),
        GateKind::U3 => gates::u3(p(0), p(1), p(2)),
        // handled as a permutation in `apply_op`
        GateKind::Swap => gates::i2(),
    }
}

/// Apply one op to the `2^n_qubits` amplitudes in place.
pub fn apply_op(op: &Op, n_qubits: usize, amps: &mut [C64]) -> Result<(), SimulationError> {
    if op.qubits.len() != op.kind.num_qubits() {
        return Err(SimulationError::dimension(format!(
            "{} expects {} qubit(s), got {}",
            op.kind.qasm_name(),
            op.kind.num_qubits(),
            op.qubits.len()
        )));
    }
    if let Some(&bad) = op.qubits.iter().find(|&&q| q >= n_qubits) {
        return Err(SimulationError::QubitOutOfRange { index: bad, num_qubits: n_qubits });
    }
    if op.qubits.iter().enumerate().any(|(i, q)| op.qubits[..i].contains(q)) {
        return Err(SimulationError::dimension(format!(
            "{} needs distinct qubits, got {:?}",
            op.kind.qasm_name(),
            op.qubits
        )));
    }
    if amps.len() != 1usize << n_qubits {
        return Err(SimulationError::dimension(format!(
            "{} amplitudes for a {n_qubits}-qubit register",
            amps.len()
        )));
    }
    if op.kind == GateKind::Swap {
        ops::apply_swap(amps, op.qubits[0], op.qubits[1]);
        return Ok(());
    }
    let nc = op.kind.num_controls();
    let u = target_matrix(op);
    ops::apply_controlled_1q(amps, &u, &op.qubits[..nc], op.qubits[nc]);
    Ok(())
}

/// Pick a backend by name (case-insensitive).
pub fn select_backend(name: &str, max_qubits: usize) -> Result<Box<dyn Simulator>, SimulationError> {
    match name.to_ascii_lowercase().as_str() {
        "native" | "titan" => Ok(Box::new(NativeSimulator::with_limit(max_qubits))),
        // Accept "aer" (and alias "qiskit") for convenience.
        "aer" | "qiskit" => {
            #[cfg(feature = "qiskit")]
            {
                Ok(Box::new(crate::core::quantum::qiskit_bridge::QiskitSimulator::with_limit(max_qubits)))
            }
            #[cfg(not(feature = "qiskit"))]
            {
                Err(SimulationError::backend(
                    "backend 'aer' requires `--features qiskit` and a working Python/Qiskit install",
                ))
            }
        }
        other => Err(SimulationError::backend(format!(
            "unsupported backend: {other} (try: native | aer)"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::qasm::{parse_qasm, DEMO_QASM};

    const S: f64 = std::f64::consts::FRAC_1_SQRT_2;

    #[test]
    fn bell_amplitudes() {
        let c = parse_qasm(DEMO_QASM).unwrap();
        let psi = NativeSimulator::default().statevector(&c).unwrap();
        let p = psi.probabilities();
        assert!((p[0] - 0.5).abs() < 1e-12);
        assert!(p[1].abs() < 1e-12 && p[2].abs() < 1e-12);
        assert!((p[3] - 0.5).abs() < 1e-12);
        assert!((psi.data[0].re - S).abs() < 1e-12);
    }

    #[test]
    fn toffoli_flips_when_both_controls_set() {
        let c = parse_qasm("qreg q[3]; x q[0]; x q[1]; ccx q[0],q[1],q[2];").unwrap();
        let psi = NativeSimulator::default().statevector(&c).unwrap();
        assert!((psi.data[7].norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn swap_and_controlled_phase() {
        let c = parse_qasm("qreg q[2]; x q[0]; swap q[0],q[1];").unwrap();
        let psi = NativeSimulator::default().statevector(&c).unwrap();
        assert!((psi.data[2].norm() - 1.0).abs() < 1e-12);

        let c = parse_qasm("qreg q[2]; x q; cp(pi) q[0],q[1];").unwrap();
        let psi = NativeSimulator::default().statevector(&c).unwrap();
        assert!((psi.data[3].re + 1.0).abs() < 1e-12);
    }

    #[test]
    fn width_limit_enforced() {
        let c = parse_qasm("qreg q[3]; h q;").unwrap();
        let err = NativeSimulator::with_limit(2).statevector(&c).unwrap_err();
        assert_eq!(err, SimulationError::TooManyQubits { requested: 3, limit: 2 });
    }

    #[test]
    fn repeated_qubit_is_an_error_not_a_panic() {
        let mut c = Circuit::new(2);
        c.gate(GateKind::Cx, &[0, 0]);
        let err = NativeSimulator::default().statevector(&c).unwrap_err();
        assert!(matches!(err, SimulationError::Dimension(ref m) if m.contains("distinct")));

        let mut c = Circuit::new(3);
        c.gate(GateKind::Ccx, &[0, 1, 1]);
        assert!(NativeSimulator::default().statevector(&c).is_err());
    }

    #[test]
    fn twelve_qubit_circuit_runs_in_place() {
        let c = parse_qasm("qreg q[12]; h q; cx q[0],q[11];").unwrap();
        let start = std::time::Instant::now();
        let psi = NativeSimulator::default().statevector(&c).unwrap();
        assert_eq!(psi.len(), 4096);
        let uniform = 1.0 / 4096.0;
        assert!(psi.probabilities().iter().all(|p| (p - uniform).abs() < 1e-12));
        assert!(start.elapsed() < std::time::Duration::from_secs(2), "took {:?}", start.elapsed());
    }

    #[test]
    fn limit_is_capped_at_ceiling() {
        assert_eq!(NativeSimulator::with_limit(64).max_qubits, QUBIT_CEILING);
        assert_eq!(NativeSimulator::with_limit(5).max_qubits, 5);
    }

    #[test]
    fn unknown_backend() {
        assert!(select_backend("ibmq", 4).is_err());
        assert_eq!(select_backend("Native", 4).unwrap().name(), "native");
    }
}
