//! Quantum core: statevectors, gates, backends, reduced states.

pub mod analysis;
pub mod bloch;
pub mod density;
pub mod gates;
pub mod ops;
pub mod simulator;
pub mod types;

#[cfg(feature = "qiskit")]
pub mod qiskit_bridge;
