//! Bloch-sphere coordinates for single-qubit states.
//!
//! A qubit state ρ = (I + x·σx + y·σy + z·σz) / 2 maps to the point (x, y, z);
//! pure states sit on the unit sphere, mixed states inside it.

use std::f64::consts::PI;
use std::fmt;

use num_complex::Complex64 as C64;
use serde::Serialize;

use crate::core::error::SimulationError;
use crate::core::quantum::density::DensityMatrix;

/// A point in the Bloch ball in Cartesian coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BlochVector {
    pub x: f64,
    pub y: f64,
    /// +Z is |0⟩, −Z is |1⟩
    pub z: f64,
}

/// Polar angle θ ∈ [0, π], azimuth φ ∈ [0, 2π).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BlochAngles {
    pub theta: f64,
    pub phi: f64,
}

impl BlochVector {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// |ψ⟩ = α|0⟩ + β|1⟩ → (2Re(α*β), 2Im(α*β), |α|²−|β|²)
    pub fn from_state(state: &[C64; 2]) -> Self {
        let (alpha, beta) = (state[0], state[1]);
        let ab = alpha.conj() * beta;
        Self {
            x: 2.0 * ab.re,
            y: 2.0 * ab.im,
            z: alpha.norm_sqr() - beta.norm_sqr(),
        }
    }

    /// Expectation values ⟨σx⟩, ⟨σy⟩, ⟨σz⟩ of a single-qubit density matrix.
    pub fn from_density(rho: &DensityMatrix) -> Result<Self, SimulationError> {
        if rho.num_qubits() != 1 {
            return Err(SimulationError::dimension(format!(
                "Bloch vector needs a single-qubit state, got {} qubits",
                rho.num_qubits()
            )));
        }
        let r01 = rho.get(0, 1);
        Ok(Self {
            x: 2.0 * r01.re,
            y: -2.0 * r01.im,
            z: rho.get(0, 0).re - rho.get(1, 1).re,
        })
    }

    pub fn from_angles(theta: f64, phi: f64) -> Self {
        BlochAngles { theta, phi }.to_vector()
    }

    pub fn to_angles(&self) -> BlochAngles {
        let r = self.magnitude();
        if r < 1e-10 {
            return BlochAngles { theta: 0.0, phi: 0.0 };
        }
        let theta = (self.z / r).clamp(-1.0, 1.0).acos();
        let phi = self.y.atan2(self.x);
        let phi = if phi < 0.0 { phi + 2.0 * PI } else { phi };
        BlochAngles { theta, phi }
    }

    /// 1 for pure states, < 1 for mixed; purity = (1 + r²) / 2.
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn is_pure(&self, tolerance: f64) -> bool {
        (self.magnitude() - 1.0).abs() < tolerance
    }

    /// Name of the cardinal state this vector sits on, if any.
    pub fn pole_name(&self) -> Option<&'static str> {
        let near = |a: f64, b: f64| (a - b).abs() < 0.01;
        let on_equator = self.z.abs() < 0.01;
        if near(self.z, 1.0) {
            Some("|0⟩")
        } else if near(self.z, -1.0) {
            Some("|1⟩")
        } else if near(self.x, 1.0) && on_equator {
            Some("|+⟩")
        } else if near(self.x, -1.0) && on_equator {
            Some("|−⟩")
        } else if near(self.y, 1.0) && on_equator {
            Some("|+i⟩")
        } else if near(self.y, -1.0) && on_equator {
            Some("|−i⟩")
        } else {
            None
        }
    }

    pub fn describe(&self) -> String {
        let angles = self.to_angles();
        let mut desc = String::new();
        desc.push_str(&format!("Bloch Vector: ({:.4}, {:.4}, {:.4})\n", self.x, self.y, self.z));
        desc.push_str(&format!("Magnitude: {:.4}\n", self.magnitude()));
        desc.push_str(&format!("Angles: θ={:.4}, φ={:.4}\n", angles.theta, angles.phi));
        if let Some(name) = self.pole_name() {
            desc.push_str(&format!("State: {name}\n"));
        } else if self.magnitude() < 0.9 {
            desc.push_str("Mixed state (inside sphere)\n");
        }
        desc
    }
}

impl fmt::Display for BlochVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

impl BlochAngles {
    pub fn to_vector(&self) -> BlochVector {
        BlochVector {
            x: self.theta.sin() * self.phi.cos(),
            y: self.theta.sin() * self.phi.sin(),
            z: self.theta.cos(),
        }
    }

    /// [α, β] with |ψ⟩ = cos(θ/2)|0⟩ + e^{iφ} sin(θ/2)|1⟩
    pub fn to_state(&self) -> [C64; 2] {
        let half = self.theta / 2.0;
        [C64::new(half.cos(), 0.0), C64::from_polar(half.sin(), self.phi)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DMatrix;

    #[test]
    fn zero_state_is_north_pole() {
        let b = BlochVector::from_state(&[C64::new(1.0, 0.0), C64::new(0.0, 0.0)]);
        assert!((b.z - 1.0).abs() < 1e-12);
        assert_eq!(b.pole_name(), Some("|0⟩"));
    }

    #[test]
    fn density_and_state_agree() {
        let angles = BlochAngles { theta: 1.1, phi: 4.0 };
        let psi = angles.to_state();
        let rho = DMatrix::from_fn(2, 2, |i, j| psi[i] * psi[j].conj());
        let from_rho = BlochVector::from_density(&DensityMatrix::from_matrix(rho).unwrap()).unwrap();
        let from_psi = BlochVector::from_state(&psi);
        let direct = angles.to_vector();
        for (a, b) in [(from_rho, from_psi), (from_psi, direct)] {
            assert!((a.x - b.x).abs() < 1e-12 && (a.y - b.y).abs() < 1e-12 && (a.z - b.z).abs() < 1e-12);
        }
    }

    #[test]
    fn angles_round_trip() {
        let v = BlochVector::from_angles(0.7, 5.5);
        let a = v.to_angles();
        assert!((a.theta - 0.7).abs() < 1e-12);
        assert!((a.phi - 5.5).abs() < 1e-12);
    }

    #[test]
    fn mixed_state_described() {
        let v = BlochVector::new(0.0, 0.0, 0.0);
        assert!(v.describe().contains("Mixed state"));
        assert!(!v.is_pure(1e-6));
    }
}
