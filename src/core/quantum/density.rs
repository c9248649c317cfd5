//! Density matrices, partial trace and purity.
//!
//! ```
//! use myriad::core::qasm::{parse_qasm, DEMO_QASM};
//! use myriad::core::quantum::{density::DensityMatrix, simulator::{NativeSimulator, Simulator}};
//!
//! let psi = NativeSimulator::default().statevector(&parse_qasm(DEMO_QASM).unwrap()).unwrap();
//! let rho = DensityMatrix::from_state(&psi);
//! assert!((rho.purity() - 1.0).abs() < 1e-10);
//! assert!((rho.reduced(0).unwrap().purity() - 0.5).abs() < 1e-10);
//! ```

use std::fmt;

use nalgebra::{DMatrix, DVector};
use num_complex::Complex64 as C64;

use crate::core::error::SimulationError;
use crate::core::quantum::types::{QState, EPS};

/// Tolerance for calling a reduced state pure.
pub const PURE_TOL: f64 = 1e-6;

#[derive(Clone, PartialEq)]
pub struct DensityMatrix {
    num_qubits: usize,
    m: DMatrix<C64>,
}

impl DensityMatrix {
    /// ρ = |ψ⟩⟨ψ|
    pub fn from_state(psi: &QState) -> Self {
        let m = &psi.data * psi.data.adjoint();
        Self { num_qubits: psi.num_qubits(), m }
    }

    /// Wrap a raw matrix; it must be square with a power-of-two dimension.
    pub fn from_matrix(m: DMatrix<C64>) -> Result<Self, SimulationError> {
        if m.nrows() != m.ncols() || !m.nrows().is_power_of_two() {
            return Err(SimulationError::dimension(format!(
                "density matrix must be square with dimension 2^k, got {}x{}",
                m.nrows(),
                m.ncols()
            )));
        }
        Ok(Self { num_qubits: m.nrows().trailing_zeros() as usize, m })
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn dimension(&self) -> usize {
        self.m.nrows()
    }

    pub fn matrix(&self) -> &DMatrix<C64> {
        &self.m
    }

    pub fn get(&self, row: usize, col: usize) -> C64 {
        self.m[(row, col)]
    }

    pub fn trace(&self) -> f64 {
        self.m.trace().re
    }

    /// Tr(ρ²); for a Hermitian ρ this is Σ|ρᵢⱼ|².
    pub fn purity(&self) -> f64 {
        self.m.iter().map(|z| z.norm_sqr()).sum()
    }

    pub fn is_pure(&self, tol: f64) -> bool {
        (self.purity() - 1.0).abs() < tol
    }

    /// Sum out `trace_out`; the remaining qubits keep their relative order.
    pub fn partial_trace(&self, trace_out: &[usize]) -> Result<Self, SimulationError> {
        for &q in trace_out {
            if q >= self.num_qubits {
                return Err(SimulationError::QubitOutOfRange { index: q, num_qubits: self.num_qubits });
            }
        }
        let mut traced: Vec<usize> = trace_out.to_vec();
        traced.sort_unstable();
        traced.dedup();

        let keep: Vec<usize> = (0..self.num_qubits).filter(|q| !traced.contains(q)).collect();
        let reduced_dim = 1usize << keep.len();
        let env_dim = 1usize << traced.len();
        let mut out = DMatrix::<C64>::from_element(reduced_dim, reduced_dim, C64::new(0.0, 0.0));

        // full index = scatter(kept bits) | scatter(environment bits)
        let scatter = |bits: usize, positions: &[usize]| -> usize {
            positions
                .iter()
                .enumerate()
                .filter(|(k, _)| (bits >> k) & 1 == 1)
                .fold(0usize, |acc, (_, &q)| acc | (1usize << q))
        };
        let kept_idx: Vec<usize> = (0..reduced_dim).map(|r| scatter(r, &keep)).collect();
        let env_idx: Vec<usize> = (0..env_dim).map(|e| scatter(e, &traced)).collect();

        for (ri, &fi) in kept_idx.iter().enumerate() {
            for (rj, &fj) in kept_idx.iter().enumerate() {
                let mut acc = C64::new(0.0, 0.0);
                for &e in &env_idx {
                    acc += self.m[(fi | e, fj | e)];
                }
                out[(ri, rj)] = acc;
            }
        }
        Ok(Self { num_qubits: keep.len(), m: out })
    }

    /// Single-qubit reduced state of `keep`.
    pub fn reduced(&self, keep: usize) -> Result<Self, SimulationError> {
        if keep >= self.num_qubits {
            return Err(SimulationError::QubitOutOfRange { index: keep, num_qubits: self.num_qubits });
        }
        let others: Vec<usize> = (0..self.num_qubits).filter(|&q| q != keep).collect();
        self.partial_trace(&others)
    }

    /// Reduced state of qubit `keep` read straight off |ψ⟩, in O(2^n) without
    /// forming the 4^n-entry ρ.
    pub fn reduced_from_state(psi: &QState, keep: usize) -> Result<Self, SimulationError> {
        let n = psi.num_qubits();
        if keep >= n {
            return Err(SimulationError::QubitOutOfRange { index: keep, num_qubits: n });
        }
        let mask = 1usize << keep;
        let mut m = DMatrix::<C64>::from_element(2, 2, C64::new(0.0, 0.0));
        for (i, a) in psi.data.iter().enumerate() {
            if i & mask != 0 {
                continue;
            }
            let b = psi.data[i | mask];
            m[(0, 0)] += a * a.conj();
            m[(0, 1)] += a * b.conj();
            m[(1, 1)] += b * b.conj();
        }
        m[(1, 0)] = m[(0, 1)].conj();
        Ok(Self { num_qubits: 1, m })
    }

    /// Recover |ψ⟩ with ρ = |ψ⟩⟨ψ| when ρ is pure. The global phase is fixed
    /// so the first non-negligible amplitude is real and positive.
    pub fn to_pure_state(&self, tol: f64) -> Option<QState> {
        if !self.is_pure(tol) {
            return None;
        }
        // Column j of |ψ⟩⟨ψ| is ψ·conj(ψⱼ); take the best-conditioned column.
        let (j, pjj) = (0..self.dimension())
            .map(|j| (j, self.m[(j, j)].re))
            .fold((0, f64::MIN), |best, cur| if cur.1 > best.1 { cur } else { best });
        if pjj < EPS {
            return None;
        }
        let mut v: DVector<C64> = self.m.column(j).into_owned() / C64::from(pjj.sqrt());
        if let Some(first) = v.iter().copied().find(|z| z.norm() > 1e-9) {
            let phase = first.conj() / C64::from(first.norm());
            v *= phase;
        }
        QState::try_new(v, true).ok()
    }
}

impl fmt::Debug for DensityMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DensityMatrix {{ qubits: {}, dim: {}, purity: {:.4} }}",
            self.num_qubits,
            self.dimension(),
            self.purity()
        )
    }
}
