//! In-place gate kernels on a little-endian amplitude vector.
//!
//! A gate on qubit `t` mixes the amplitude pairs `(i, i | 1<<t)` with bit `t`
//! clear in `i`; controls restrict which pairs are touched. Work is O(2^n) per
//! gate, with no full-register matrix.
use nalgebra::DMatrix;
use num_complex::Complex64 as C64;

/// Apply the 2×2 `u` to `target` on every basis pair whose `controls` bits are
/// all 1. Callers check that qubits are in range and distinct.
pub fn apply_controlled_1q(amps: &mut [C64], u: &DMatrix<C64>, controls: &[usize], target: usize) {
    let (m00, m01, m10, m11) = (u[(0, 0)], u[(0, 1)], u[(1, 0)], u[(1, 1)]);
    let tmask = 1usize << target;
    let cmask = controls.iter().fold(0usize, |acc, &q| acc | (1usize << q));
    for i in 0..amps.len() {
        if i & tmask != 0 || i & cmask != cmask {
            continue;
        }
        let j = i | tmask;
        let (a0, a1) = (amps[i], amps[j]);
        amps[i] = m00 * a0 + m01 * a1;
        amps[j] = m10 * a0 + m11 * a1;
    }
}

pub fn apply_1q(amps: &mut [C64], u: &DMatrix<C64>, target: usize) {
    apply_controlled_1q(amps, u, &[], target);
}

/// Exchange qubits `a` and `b`.
pub fn apply_swap(amps: &mut [C64], a: usize, b: usize) {
    let (ma, mb) = (1usize << a, 1usize << b);
    for i in 0..amps.len() {
        // visit each |..1_a..0_b..⟩ once and swap with its mirror
        if i & ma != 0 && i & mb == 0 {
            amps.swap(i, (i & !ma) | mb);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::quantum::gates;
    use crate::core::quantum::types::{QOp, QState};

    fn c(r: f64, i: f64) -> C64 {
        C64::new(r, i)
    }

    // Dense reference operators, little-endian.

    fn kron(a: &DMatrix<C64>, b: &DMatrix<C64>) -> DMatrix<C64> {
        let (br, bc) = (b.nrows(), b.ncols());
        DMatrix::from_fn(a.nrows() * br, a.ncols() * bc, |r, col| a[(r / br, col / bc)] * b[(r % br, col % bc)])
    }

    fn lift_1q(u: &DMatrix<C64>, n_qubits: usize, target: usize) -> QOp {
        let i2 = DMatrix::<C64>::identity(2, 2);
        let mut acc = DMatrix::<C64>::from_element(1, 1, c(1.0, 0.0));
        for q in (0..n_qubits).rev() {
            acc = kron(&acc, if q == target { u } else { &i2 });
        }
        QOp { m: acc }
    }

    fn cnot_n(n_qubits: usize, control: usize, target: usize) -> QOp {
        let dim = 1usize << n_qubits;
        let mut m = DMatrix::<C64>::from_element(dim, dim, c(0.0, 0.0));
        for basis in 0..dim {
            let out = if (basis >> control) & 1 == 1 { basis ^ (1usize << target) } else { basis };
            m[(out, basis)] = c(1.0, 0.0);
        }
        QOp { m }
    }

    /// A state with every amplitude distinct, so permutations show up.
    fn ramp(n: usize) -> QState {
        let amps: Vec<C64> = (0..1usize << n).map(|k| c(1.0 + k as f64, 0.5 * k as f64)).collect();
        QState::try_new(nalgebra::DVector::from_vec(amps), true).unwrap()
    }

    fn close(a: &[C64], b: &[C64]) -> bool {
        a.iter().zip(b).all(|(x, y)| (x - y).norm() < 1e-12)
    }

    #[test]
    fn single_qubit_kernel_matches_lifted_matrix() {
        let psi = ramp(3);
        for target in 0..3 {
            for u in [gates::h(), gates::ry(0.3), gates::u3(0.4, 1.1, -0.7)] {
                let mut amps = psi.data.as_slice().to_vec();
                apply_1q(&mut amps, &u, target);
                let want = lift_1q(&u, 3, target).apply(&psi).unwrap();
                assert!(close(&amps, want.data.as_slice()), "target {target}");
            }
        }
    }

    #[test]
    fn x_targets_least_significant_bit() {
        let mut amps = QState::zero(2).data.as_slice().to_vec();
        apply_1q(&mut amps, &gates::x(), 0);
        assert!((amps[1].re - 1.0).abs() < 1e-12);
        let mut amps = QState::zero(2).data.as_slice().to_vec();
        apply_1q(&mut amps, &gates::x(), 1);
        assert!((amps[2].re - 1.0).abs() < 1e-12);
    }

    #[test]
    fn controlled_x_matches_cnot() {
        let psi = ramp(3);
        for (ctl, tgt) in [(2, 0), (0, 2), (1, 0)] {
            let mut amps = psi.data.as_slice().to_vec();
            apply_controlled_1q(&mut amps, &gates::x(), &[ctl], tgt);
            let want = cnot_n(3, ctl, tgt).apply(&psi).unwrap();
            assert!(close(&amps, want.data.as_slice()));
        }
    }

    #[test]
    fn swap_moves_excitation() {
        let mut amps = QState::zero(3).data.as_slice().to_vec();
        apply_1q(&mut amps, &gates::x(), 0);
        apply_swap(&mut amps, 0, 2);
        assert!((amps[4].re - 1.0).abs() < 1e-12);
        // swap is its own inverse
        let psi = ramp(3);
        let mut amps = psi.data.as_slice().to_vec();
        apply_swap(&mut amps, 2, 1);
        apply_swap(&mut amps, 1, 2);
        assert!(close(&amps, psi.data.as_slice()));
    }
}
