//! Circuit → per-qubit reduced states.
//!
//! Simulate, trace |ψ⟩⟨ψ| down to qubit i (straight from the amplitudes), then decide
//! whether qubit i can be drawn from a pure statevector or only from its
//! density matrix.

use serde::ser::{SerializeSeq, SerializeStruct, Serializer};
use serde::Serialize;

use crate::core::circuit::Circuit;
use crate::core::error::SimulationError;
use crate::core::quantum::bloch::BlochVector;
use crate::core::quantum::density::{DensityMatrix, PURE_TOL};
use crate::core::quantum::simulator::Simulator;
use crate::core::quantum::types::QState;

/// P(|0⟩) band outside which a pure qubit counts as sitting on a pole.
pub const POLE_BAND: (f64, f64) = (0.01, 0.99);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QubitClass {
    Idle,
    Superposition,
    Entangled,
}

impl QubitClass {
    /// Entangled below purity 1 − 1e-6, otherwise judged by P(|0⟩).
    pub fn classify(purity: f64, p0: f64) -> Self {
        if purity < 1.0 - PURE_TOL {
            QubitClass::Entangled
        } else if p0 > POLE_BAND.0 && p0 < POLE_BAND.1 {
            QubitClass::Superposition
        } else {
            QubitClass::Idle
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QubitClass::Idle => "Idle",
            QubitClass::Superposition => "Superposition",
            QubitClass::Entangled => "Entangled",
        }
    }
}

/// What the Bloch plot is drawn from.
#[derive(Clone, Debug, PartialEq)]
pub enum PlotSource {
    Pure(QState),
    Mixed(DensityMatrix),
}

impl PlotSource {
    pub fn is_pure(&self) -> bool {
        matches!(self, PlotSource::Pure(_))
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct QubitReport {
    pub index: usize,
    pub label: String,
    #[serde(serialize_with = "ser_density")]
    pub reduced: DensityMatrix,
    pub purity: f64,
    pub bloch: BlochVector,
    #[serde(serialize_with = "ser_plot")]
    pub plot: PlotSource,
    pub class: QubitClass,
}

#[derive(Clone, Debug, Serialize)]
pub struct Analysis {
    pub backend: &'static str,
    pub num_qubits: usize,
    pub skipped_measurements: usize,
    #[serde(skip)]
    pub circuit: Circuit,
    #[serde(skip)]
    pub state: QState,
    /// Tr(ρ²) of the whole register; 1 for any statevector.
    pub full_purity: f64,
    pub qubits: Vec<QubitReport>,
}

/// Run the whole pipeline: one `(purity, plot)` per qubit, in qubit order.
pub fn analyze(circuit: &Circuit, sim: &dyn Simulator) -> Result<Analysis, SimulationError> {
    let state = sim.statevector(circuit)?;
    let mut qubits = Vec::with_capacity(circuit.n_qubits);
    for i in 0..circuit.n_qubits {
        qubits.push(report_qubit(circuit, &state, i)?);
    }
    // (Σ|ψᵢ|²)² = Tr(ρ²) for ρ = |ψ⟩⟨ψ|
    let full_purity = state.data.norm_squared().powi(2);
    crate::debug_log!(
        "analyze: backend={} qubits={} full purity={:.6}",
        sim.name(),
        circuit.n_qubits,
        full_purity
    );
    Ok(Analysis {
        backend: sim.name(),
        num_qubits: circuit.n_qubits,
        skipped_measurements: circuit.skipped_measurements,
        circuit: circuit.clone(),
        full_purity,
        state,
        qubits,
    })
}

fn report_qubit(circuit: &Circuit, state: &QState, index: usize) -> Result<QubitReport, SimulationError> {
    let reduced = DensityMatrix::reduced_from_state(state, index)?;
    let purity = reduced.purity();
    let bloch = BlochVector::from_density(&reduced)?;
    let plot = match reduced.to_pure_state(PURE_TOL) {
        Some(psi) => PlotSource::Pure(psi),
        None => PlotSource::Mixed(reduced.clone()),
    };
    let class = QubitClass::classify(purity, state.prob_zero(index));
    Ok(QubitReport {
        index,
        label: circuit.qubit_label(index),
        reduced,
        purity,
        bloch,
        plot,
        class,
    })
}

impl Analysis {
    /// `(purity, plot)` pairs, the minimal output of the pipeline.
    pub fn pairs(&self) -> Vec<(f64, &PlotSource)> {
        self.qubits.iter().map(|q| (q.purity, &q.plot)).collect()
    }
}

// JSON shape: matrices as rows of [re, im] pairs.

fn ser_density<S: Serializer>(rho: &DensityMatrix, s: S) -> Result<S::Ok, S::Error> {
    let d = rho.dimension();
    let mut rows = s.serialize_seq(Some(d))?;
    for i in 0..d {
        let row: Vec<[f64; 2]> = (0..d).map(|j| {
            let z = rho.get(i, j);
            [z.re, z.im]
        }).collect();
        rows.serialize_element(&row)?;
    }
    rows.end()
}

fn ser_plot<S: Serializer>(plot: &PlotSource, s: S) -> Result<S::Ok, S::Error> {
    let mut st = s.serialize_struct("PlotSource", 2)?;
    match plot {
        PlotSource::Pure(psi) => {
            let amps: Vec<[f64; 2]> = psi.data.iter().map(|z| [z.re, z.im]).collect();
            st.serialize_field("kind", "statevector")?;
            st.serialize_field("amplitudes", &amps)?;
        }
        PlotSource::Mixed(_) => {
            st.serialize_field("kind", "density_matrix")?;
            st.serialize_field("amplitudes", &Option::<Vec<[f64; 2]>>::None)?;
        }
    }
    st.end()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::qasm::{parse_qasm, DEMO_QASM};
    use crate::core::quantum::simulator::NativeSimulator;

    fn run(src: &str) -> Analysis {
        analyze(&parse_qasm(src).unwrap(), &NativeSimulator::default()).unwrap()
    }

    #[test]
    fn bell_qubits_are_entangled() {
        let a = run(DEMO_QASM);
        assert!((a.full_purity - 1.0).abs() < 1e-10);
        for q in &a.qubits {
            assert!((q.purity - 0.5).abs() < 1e-10);
            assert_eq!(q.class, QubitClass::Entangled);
            assert!(!q.plot.is_pure());
            assert!(q.bloch.magnitude() < 1e-10);
        }
    }

    #[test]
    fn idle_and_superposition() {
        let a = run("qreg q[2]; h q[1];");
        assert_eq!(a.qubits[0].class, QubitClass::Idle);
        assert_eq!(a.qubits[1].class, QubitClass::Superposition);
        assert!(a.qubits[1].plot.is_pure());
        assert!((a.qubits[1].bloch.x - 1.0).abs() < 1e-10);
    }

    #[test]
    fn excited_qubit_is_idle() {
        let a = run("qreg q[1]; x q[0];");
        assert_eq!(a.qubits[0].class, QubitClass::Idle);
        assert!((a.qubits[0].bloch.z + 1.0).abs() < 1e-10);
    }

    #[test]
    fn pairs_follow_qubit_order() {
        let a = run("qreg a[1]; qreg b[2]; h b[1];");
        let pairs = a.pairs();
        assert_eq!(pairs.len(), 3);
        assert_eq!(a.qubits[2].label, "b[1]");
        assert!(pairs.iter().all(|(p, _)| (p - 1.0).abs() < 1e-10));
    }

    #[test]
    fn json_shape() {
        let a = run(DEMO_QASM);
        let v = serde_json::to_value(&a).unwrap();
        assert_eq!(v["num_qubits"], 2);
        assert_eq!(v["qubits"][0]["class"], "entangled");
        assert_eq!(v["qubits"][0]["plot"]["kind"], "density_matrix");
        assert_eq!(v["qubits"][0]["reduced"].as_array().unwrap().len(), 2);
    }
}
