#[cfg(feature = "qiskit")]
mod q {
    use myriad::core::qasm::{parse_qasm, DEMO_QASM};
    use myriad::core::quantum::qiskit_bridge::{self, QiskitSimulator};
    use myriad::core::quantum::simulator::{NativeSimulator, Simulator};

    #[test]
    fn qiskit_version_ok() {
        let v = qiskit_bridge::qiskit_version().unwrap();
        assert!(!v.is_empty());
        println!("Qiskit version: {}", v);
    }

    #[test]
    fn aer_matches_native_on_bell() {
        let c = parse_qasm(DEMO_QASM).unwrap();
        let aer = QiskitSimulator::default().statevector(&c).unwrap();
        let native = NativeSimulator::default().statevector(&c).unwrap();
        assert!(aer.allclose(native.data.as_slice()), "aer={:?} native={:?}", aer.data, native.data);
    }

    #[test]
    fn aer_keeps_little_endian_order() {
        // x on q[0] only → basis index 1
        let c = parse_qasm("OPENQASM 2.0;\ninclude \"qelib1.inc\";\nqreg q[3];\nx q[0];\n").unwrap();
        let psi = QiskitSimulator::default().statevector(&c).unwrap();
        assert!((psi.data[1].norm() - 1.0).abs() < 1e-9);
    }
}
