//! Single-qubit explorer: |ψ⟩ = cos(θ/2)|0⟩ + e^{iφ} sin(θ/2)|1⟩.

use std::f64::consts::PI;

use num_complex::Complex64 as C64;
use rand::Rng;
use serde::Serialize;

use crate::core::quantum::bloch::{BlochAngles, BlochVector};
use crate::core::quantum::types::{ALLCLOSE_ATOL, ALLCLOSE_RTOL};

/// Slider step used by the interactive explorer (radians).
pub const STEP: f64 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StateTone {
    Success,
    Error,
    Info,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ExplorerState {
    theta: f64,
    phi: f64,
}

impl Default for ExplorerState {
    fn default() -> Self {
        Self { theta: 0.0, phi: 0.0 }
    }
}

fn isclose(a: f64, b: f64) -> bool {
    (a - b).abs() <= ALLCLOSE_ATOL + ALLCLOSE_RTOL * b.abs()
}

impl ExplorerState {
    /// θ is clamped to [0, π]; φ is wrapped into [0, 2π).
    pub fn new(theta: f64, phi: f64) -> Self {
        let mut s = Self::default();
        s.set_theta(theta);
        s.set_phi(phi);
        s
    }

    pub fn theta(&self) -> f64 {
        self.theta
    }

    pub fn phi(&self) -> f64 {
        self.phi
    }

    pub fn set_theta(&mut self, theta: f64) {
        self.theta = if theta.is_finite() { theta.clamp(0.0, PI) } else { 0.0 };
    }

    pub fn set_phi(&mut self, phi: f64) {
        self.phi = if phi.is_finite() { phi.rem_euclid(2.0 * PI) } else { 0.0 };
    }

    pub fn nudge_theta(&mut self, delta: f64) {
        self.set_theta(self.theta + delta);
    }

    pub fn nudge_phi(&mut self, delta: f64) {
        self.set_phi(self.phi + delta);
    }

    pub fn label(&self) -> (&'static str, StateTone) {
        if isclose(self.theta, 0.0) {
            ("Basis |0⟩", StateTone::Success)
        } else if isclose(self.theta, PI) {
            ("Basis |1⟩", StateTone::Error)
        } else {
            ("Superposition", StateTone::Info)
        }
    }

    pub fn amplitudes(&self) -> [C64; 2] {
        BlochAngles { theta: self.theta, phi: self.phi }.to_state()
    }

    pub fn bloch(&self) -> BlochVector {
        BlochVector::from_angles(self.theta, self.phi)
    }

    /// `(P(0), P(1))`
    pub fn probabilities(&self) -> (f64, f64) {
        let c = (self.theta / 2.0).cos();
        let s = (self.theta / 2.0).sin();
        (c * c, s * s)
    }

    /// `|ψ⟩ = 0.707 |0⟩ + (0.500 + 0.500i) |1⟩`
    pub fn ket(&self) -> String {
        let [a, b] = self.amplitudes();
        let coeff = if isclose(b.im, 0.0) {
            format!("{:.3}", b.re)
        } else {
            let sign = if b.im > 0.0 { '+' } else { '-' };
            format!("({:.3} {} {:.3}i)", b.re, sign, b.im.abs())
        };
        format!("|ψ⟩ = {:.3} |0⟩ + {} |1⟩", a.re, coeff)
    }

    /// OpenQASM that prepares this state from |0⟩: Rz(φ)·Ry(θ)|0⟩, equal to
    /// |ψ⟩ up to a global phase.
    pub fn qasm_snippet(&self) -> String {
        format!(
            "OPENQASM 2.0;\ninclude \"qelib1.inc\";\nqreg q[1];\n// θ = {:.4}, φ = {:.4}\nry({:.4}) q[0];\nrz({:.4}) q[0];\n",
            self.theta, self.phi, self.theta, self.phi
        )
    }

    /// Sample `shots` Z-basis measurements; returns `(zeros, ones)`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, shots: usize) -> (usize, usize) {
        let (p0, _) = self.probabilities();
        let zeros = (0..shots).filter(|_| rng.gen::<f64>() < p0).count();
        (zeros, shots - zeros)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn default_is_ground_state() {
        let s = ExplorerState::default();
        assert_eq!(s.label().0, "Basis |0⟩");
        assert_eq!(s.probabilities(), (1.0, 0.0));
        assert_eq!(s.ket(), "|ψ⟩ = 1.000 |0⟩ + 0.000 |1⟩");
    }

    #[test]
    fn clamps_and_wraps() {
        let s = ExplorerState::new(5.0, -PI / 2.0);
        assert_eq!(s.theta(), PI);
        assert!((s.phi() - 1.5 * PI).abs() < 1e-12);
        assert_eq!(s.label(), ("Basis |1⟩", StateTone::Error));
    }

    #[test]
    fn probabilities_sum_to_one() {
        for k in 0..=20 {
            let s = ExplorerState::new(k as f64 * PI / 20.0, 1.0);
            let (p0, p1) = s.probabilities();
            assert!((p0 + p1 - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn complex_coefficient_formatting() {
        let s = ExplorerState::new(PI / 2.0, PI / 2.0);
        assert_eq!(s.label().0, "Superposition");
        assert_eq!(s.ket(), "|ψ⟩ = 0.707 |0⟩ + (0.000 + 0.707i) |1⟩");
        assert!(s.qasm_snippet().contains("ry(1.5708) q[0];"));
    }

    #[test]
    fn sampling_respects_extremes() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(ExplorerState::new(0.0, 0.0).sample(&mut rng, 100), (100, 0));
        assert_eq!(ExplorerState::new(PI, 0.0).sample(&mut rng, 50), (0, 50));
        let (z, o) = ExplorerState::new(PI / 2.0, 0.0).sample(&mut rng, 1000);
        assert_eq!(z + o, 1000);
        assert!(z > 350 && z < 650);
    }
}
