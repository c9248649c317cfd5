//! Qiskit bridge via pyo3 (feature: `qiskit`).
//! Hands OpenQASM text to Qiskit Aer and reads back the saved statevector.

use anyhow::{anyhow, Result};
use nalgebra::DVector;
use num_complex::Complex64 as C64;
use numpy::PyReadonlyArray1;
use pyo3::prelude::*;
use pyo3::types::PyModule;

use crate::core::circuit::Circuit;
use crate::core::error::SimulationError;
use crate::core::quantum::simulator::{Simulator, MAX_QUBITS, QUBIT_CEILING};
use crate::core::quantum::types::QState;

const RUNNER: &str = r#"
import numpy as np
from qiskit import QuantumCircuit, transpile
from qiskit_aer import AerSimulator

def run_qasm(src):
    qc = QuantumCircuit.from_qasm_str(src)
    qc.save_statevector()
    sim = AerSimulator(method='statevector')
    tqc = transpile(qc, sim)
    state = sim.run(tqc).result().get_statevector(0)
    return np.ascontiguousarray(np.asarray(state, dtype=np.complex128))
"#;

/// Return Qiskit version as a quick smoke test.
pub fn qiskit_version() -> Result<String> {
    Python::with_gil(|py| {
        let qiskit = PyModule::import_bound(py, "qiskit")?;
        let ver: String = qiskit.getattr("__version__")?.extract()?;
        Ok(ver)
    })
}

/// Simulate OpenQASM text on Aer; amplitudes come back in Qiskit's
/// little-endian order, which is the order `QState` uses.
pub fn statevector_from_qasm(src: &str) -> Result<Vec<C64>> {
    Python::with_gil(|py| -> Result<Vec<C64>> {
        let m = PyModule::from_code_bound(py, RUNNER, "myriad_qiskit.py", "myriad_qiskit")?;
        let func = m.getattr("run_qasm")?;
        let out = func.call1((src,))?;
        let arr: PyReadonlyArray1<'_, C64> = out.extract()?;
        let amps = arr.as_slice().map_err(|e| anyhow!("{e}"))?.to_vec();
        Ok(amps)
    })
}

#[derive(Clone, Debug)]
pub struct QiskitSimulator {
    pub max_qubits: usize,
}

impl Default for QiskitSimulator {
    fn default() -> Self {
        Self { max_qubits: MAX_QUBITS }
    }
}

impl QiskitSimulator {
    pub fn with_limit(max_qubits: usize) -> Self {
        Self { max_qubits: max_qubits.min(QUBIT_CEILING) }
    }
}

impl Simulator for QiskitSimulator {
    fn name(&self) -> &'static str {
        "aer"
    }

    fn statevector(&self, circuit: &Circuit) -> Result<QState, SimulationError> {
        if circuit.n_qubits > self.max_qubits {
            return Err(SimulationError::TooManyQubits {
                requested: circuit.n_qubits,
                limit: self.max_qubits,
            });
        }
        let amps = statevector_from_qasm(&circuit.to_qasm())
            .map_err(|e| SimulationError::backend(format!("Qiskit Aer run failed: {e}")))?;
        QState::try_new(DVector::from_vec(amps), true)
    }
}
