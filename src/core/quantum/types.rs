//! Core quantum types: statevectors, plus dense operators as a test oracle.
#[cfg(test)]
use nalgebra::DMatrix;
use nalgebra::DVector;
use num_complex::Complex64 as C64;

use crate::core::error::SimulationError;

pub const EPS: f64 = 1e-12;

/// Tolerance used wherever the original UI compared states "close enough"
/// (numpy's `allclose` defaults).
pub const ALLCLOSE_RTOL: f64 = 1e-5;
pub const ALLCLOSE_ATOL: f64 = 1e-8;

/// Statevector over `n` qubits. Qubit 0 is the least significant bit of the
/// basis index.
#[derive(Clone, Debug, PartialEq)]
pub struct QState {
    pub data: DVector<C64>,
}

impl QState {
    /// Create from raw vector; rejects non-normalized unless `auto_normalize = true`.
    pub fn try_new(vec: DVector<C64>, auto_normalize: bool) -> Result<Self, SimulationError> {
        if !vec.len().is_power_of_two() {
            return Err(SimulationError::dimension(format!(
                "statevector length {} is not a power of two",
                vec.len()
            )));
        }
        let mut v = vec;
        let norm = v.iter().map(|z| z.norm_sqr()).sum::<f64>().sqrt();
        if (norm - 1.0).abs() < 1e-9 {
            Ok(Self { data: v })
        } else if auto_normalize {
            if norm < EPS {
                return Err(SimulationError::NotNormalized(norm));
            }
            v /= C64::from(norm);
            Ok(Self { data: v })
        } else {
            Err(SimulationError::NotNormalized(norm))
        }
    }

    /// |0…0⟩ on `num_qubits` qubits.
    pub fn zero(num_qubits: usize) -> Self {
        let mut data = DVector::from_element(1usize << num_qubits, C64::new(0.0, 0.0));
        data[0] = C64::new(1.0, 0.0);
        Self { data }
    }

    pub fn from_amplitudes(amps: &[C64]) -> Result<Self, SimulationError> {
        Self::try_new(DVector::from_column_slice(amps), false)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn num_qubits(&self) -> usize {
        self.data.len().trailing_zeros() as usize
    }

    /// Born-rule probabilities per basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.data.iter().map(|z| z.norm_sqr()).collect()
    }

    /// Probability that `qubit` reads 0 in the Z basis.
    pub fn prob_zero(&self, qubit: usize) -> f64 {
        self.data
            .iter()
            .enumerate()
            .filter(|(idx, _)| (idx >> qubit) & 1 == 0)
            .map(|(_, z)| z.norm_sqr())
            .sum()
    }

    /// Element-wise closeness, phase sensitive (same rule as numpy `allclose`).
    pub fn allclose(&self, other: &[C64]) -> bool {
        self.len() == other.len()
            && self.data.iter().zip(other.iter()).all(|(a, b)| {
                (a - b).norm() <= ALLCLOSE_ATOL + ALLCLOSE_RTOL * b.norm()
            })
    }
}

/// Full-register operator; the simulator applies gates in place instead.
#[cfg(test)]
#[derive(Clone, Debug)]
pub struct QOp {
    pub m: DMatrix<C64>,
}

#[cfg(test)]
impl QOp {
    pub fn try_new_unitary(m: DMatrix<C64>) -> Result<Self, SimulationError> {
        if m.nrows() != m.ncols() {
            return Err(SimulationError::dimension("operator must be square"));
        }
        // Unitarity: U^† U = I
        let u_dag_u = m.adjoint() * &m;
        let i = DMatrix::<C64>::identity(m.nrows(), m.ncols());
        let max_diff = (u_dag_u - i)
            .iter()
            .map(|z| z.norm())
            .fold(0.0_f64, f64::max);
        if max_diff > 1e-8 {
            return Err(SimulationError::dimension(format!(
                "operator not unitary (‖UᴴU−I‖∞={max_diff:e})"
            )));
        }
        Ok(Self { m })
    }

    /// Apply to a full state vector (dimensions must match).
    pub fn apply(&self, psi: &QState) -> Result<QState, SimulationError> {
        if self.m.ncols() != psi.len() {
            return Err(SimulationError::dimension(format!(
                "operator of size {} applied to state of length {}",
                self.m.ncols(),
                psi.len()
            )));
        }
        Ok(QState { data: &self.m * &psi.data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_state_shape() {
        let z = QState::zero(3);
        assert_eq!(z.len(), 8);
        assert_eq!(z.num_qubits(), 3);
        assert_eq!(z.prob_zero(2), 1.0);
    }

    #[test]
    fn rejects_unnormalized_without_flag() {
        let v = DVector::from_vec(vec![C64::new(3.0, 0.0), C64::new(4.0, 0.0)]);
        assert!(matches!(QState::try_new(v.clone(), false), Err(SimulationError::NotNormalized(_))));
        let s = QState::try_new(v, true).unwrap();
        assert!((s.data[0].re - 0.6).abs() < 1e-12);
    }

    #[test]
    fn rejects_odd_length() {
        let v = DVector::from_vec(vec![C64::new(1.0, 0.0); 3]);
        assert!(matches!(QState::try_new(v, true), Err(SimulationError::Dimension(_))));
    }
}
