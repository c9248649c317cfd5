use myriad::core::circuit::{Circuit, GateKind};
use myriad::core::qasm::{parse_qasm, DEMO_QASM};
use myriad::core::quantum::{
    analysis::{analyze, PlotSource, QubitClass},
    density::DensityMatrix,
    simulator::{NativeSimulator, Simulator},
};

const TOL: f64 = 1e-10;

fn close(a: &DensityMatrix, b: &DensityMatrix) -> bool {
    a.dimension() == b.dimension()
        && (0..a.dimension()).all(|i| (0..a.dimension()).all(|j| (a.get(i, j) - b.get(i, j)).norm() < TOL))
}

#[test]
fn bell_reduced_states_are_maximally_mixed() {
    let c = parse_qasm(DEMO_QASM).unwrap();
    let a = analyze(&c, &NativeSimulator::default()).unwrap();
    assert!((a.full_purity - 1.0).abs() < TOL);
    for q in &a.qubits {
        assert!((q.purity - 0.5).abs() < TOL);
        assert!((q.reduced.get(0, 0).re - 0.5).abs() < TOL);
        assert!(q.reduced.get(0, 1).norm() < TOL);
        assert!(matches!(q.plot, PlotSource::Mixed(_)));
    }
}

#[test]
fn no_gates_leaves_every_qubit_in_zero() {
    let c = parse_qasm("OPENQASM 2.0;\ninclude \"qelib1.inc\";\nqreg q[3];\n").unwrap();
    let a = analyze(&c, &NativeSimulator::default()).unwrap();
    assert_eq!(a.qubits.len(), 3);
    for q in &a.qubits {
        assert!((q.purity - 1.0).abs() < TOL);
        assert!((q.reduced.get(0, 0).re - 1.0).abs() < TOL);
        assert!(q.reduced.get(1, 1).norm() < TOL);
        assert_eq!(q.class, QubitClass::Idle);
        match &q.plot {
            PlotSource::Pure(psi) => assert!((psi.data[0].re - 1.0).abs() < 1e-9),
            PlotSource::Mixed(_) => panic!("|0⟩ must be plotted from a statevector"),
        }
    }
}

/// Each qubit prepared on its own: ry(θ) then rz(φ).
fn product_circuit(angles: &[(f64, f64)]) -> Circuit {
    let mut c = Circuit::new(angles.len());
    for (q, &(t, p)) in angles.iter().enumerate() {
        c.gate_p(GateKind::Ry, &[t], &[q]).gate_p(GateKind::Rz, &[p], &[q]);
    }
    c
}

#[test]
fn tracing_a_product_state_recovers_each_factor() {
    let angles = [(0.3, 1.2), (2.0, 4.4), (1.1, 0.0), (3.0, 5.9)];
    let sim = NativeSimulator::default();
    let full = DensityMatrix::from_state(&sim.statevector(&product_circuit(&angles)).unwrap());

    for (q, &a) in angles.iter().enumerate() {
        let alone = DensityMatrix::from_state(&sim.statevector(&product_circuit(&[a])).unwrap());
        let reduced = full.reduced(q).unwrap();
        assert!(close(&reduced, &alone), "qubit {q} does not match its factor");
        assert!((reduced.purity() - 1.0).abs() < 1e-9);
    }
}

#[test]
fn two_stage_trace_equals_one_stage() {
    let c = parse_qasm("qreg q[3]; h q[0]; cx q[0],q[1]; ry(0.7) q[2]; cx q[2],q[0];").unwrap();
    let full = DensityMatrix::from_state(&NativeSimulator::default().statevector(&c).unwrap());

    // drop q2, then (what was) q0 → left with q1
    let staged = full.partial_trace(&[2]).unwrap().partial_trace(&[0]).unwrap();
    assert!(close(&staged, &full.reduced(1).unwrap()));

    // order of the trace-out list does not matter
    let a = full.partial_trace(&[0, 2]).unwrap();
    let b = full.partial_trace(&[2, 0]).unwrap();
    assert!(close(&a, &b));
    assert!((a.trace() - 1.0).abs() < TOL);
}

#[test]
fn kept_qubits_keep_their_order() {
    // |q2 q1 q0⟩ = |1 0 +⟩: keeping (q0, q2) gives |+⟩ on low bit, |1⟩ on high bit
    let c = parse_qasm("qreg q[3]; h q[0]; x q[2];").unwrap();
    let full = DensityMatrix::from_state(&NativeSimulator::default().statevector(&c).unwrap());
    let kept = full.partial_trace(&[1]).unwrap();
    assert_eq!(kept.num_qubits(), 2);
    // basis |10⟩ and |11⟩ (q2 = 1) carry all weight
    assert!((kept.get(2, 2).re - 0.5).abs() < TOL);
    assert!((kept.get(3, 3).re - 0.5).abs() < TOL);
    assert!((kept.get(2, 3).re - 0.5).abs() < TOL);
}

#[test]
fn ghz_qubits_all_entangled() {
    let c = parse_qasm("qreg q[3]; h q[0]; cx q[0],q[1]; cx q[1],q[2];").unwrap();
    let a = analyze(&c, &NativeSimulator::default()).unwrap();
    assert!(a.qubits.iter().all(|q| q.class == QubitClass::Entangled));
}

#[test]
fn twelve_qubit_analysis_stays_quick() {
    let mut src = String::from("qreg q[12]; h q[0];");
    for t in 1..12 {
        src.push_str(&format!(" cx q[0],q[{t}];"));
    }
    let c = parse_qasm(&src).unwrap();
    let started = std::time::Instant::now();
    let a = analyze(&c, &NativeSimulator::default()).unwrap();
    assert!(started.elapsed().as_secs_f64() < 2.0, "took {:?}", started.elapsed());
    assert_eq!(a.qubits.len(), 12);
    assert!((a.full_purity - 1.0).abs() < 1e-9);
    assert!(a.qubits.iter().all(|q| (q.purity - 0.5).abs() < 1e-9));
}
