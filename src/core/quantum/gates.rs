//! Standard single-qubit gate matrices.
use nalgebra::DMatrix;
use num_complex::Complex64 as C64;

#[inline]
fn c(r: f64, i: f64) -> C64 {
    C64::new(r, i)
}

pub fn i2() -> DMatrix<C64> {
    DMatrix::identity(2, 2)
}
pub fn x() -> DMatrix<C64> {
    DMatrix::from_row_slice(2, 2, &[c(0.0, 0.0), c(1.0, 0.0), c(1.0, 0.0), c(0.0, 0.0)])
}
pub fn y() -> DMatrix<C64> {
    DMatrix::from_row_slice(2, 2, &[c(0.0, 0.0), c(0.0, -1.0), c(0.0, 1.0), c(0.0, 0.0)])
}
pub fn z() -> DMatrix<C64> {
    DMatrix::from_row_slice(2, 2, &[c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(-1.0, 0.0)])
}
pub fn h() -> DMatrix<C64> {
    let s = 1.0_f64 / 2.0_f64.sqrt();
    DMatrix::from_row_slice(2, 2, &[c(s, 0.0), c(s, 0.0), c(s, 0.0), c(-s, 0.0)])
}
pub fn s() -> DMatrix<C64> {
    phase(std::f64::consts::FRAC_PI_2)
}
pub fn sdg() -> DMatrix<C64> {
    phase(-std::f64::consts::FRAC_PI_2)
}
pub fn t() -> DMatrix<C64> {
    phase(std::f64::consts::FRAC_PI_4)
}
pub fn tdg() -> DMatrix<C64> {
    phase(-std::f64::consts::FRAC_PI_4)
}
/// √X
pub fn sx() -> DMatrix<C64> {
    DMatrix::from_row_slice(
        2,
        2,
        &[c(0.5, 0.5), c(0.5, -0.5), c(0.5, -0.5), c(0.5, 0.5)],
    )
}
pub fn rx(theta: f64) -> DMatrix<C64> {
    let (c0, s0) = ((theta / 2.0).cos(), (theta / 2.0).sin());
    DMatrix::from_row_slice(2, 2, &[c(c0, 0.0), c(0.0, -s0), c(0.0, -s0), c(c0, 0.0)])
}
pub fn ry(theta: f64) -> DMatrix<C64> {
    let (c0, s0) = ((theta / 2.0).cos(), (theta / 2.0).sin());
    DMatrix::from_row_slice(2, 2, &[c(c0, 0.0), c(-s0, 0.0), c(s0, 0.0), c(c0, 0.0)])
}
pub fn rz(theta: f64) -> DMatrix<C64> {
    let e_m = C64::from_polar(1.0, -theta / 2.0);
    let e_p = C64::from_polar(1.0, theta / 2.0);
    DMatrix::from_row_slice(2, 2, &[e_m, c(0.0, 0.0), c(0.0, 0.0), e_p])
}
/// diag(1, e^{iλ}); also `u1(λ)`.
pub fn phase(lambda: f64) -> DMatrix<C64> {
    DMatrix::from_row_slice(
        2,
        2,
        &[c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), C64::from_polar(1.0, lambda)],
    )
}
/// OpenQASM 2 `U(θ, φ, λ)`.
pub fn u3(theta: f64, phi: f64, lambda: f64) -> DMatrix<C64> {
    let (c0, s0) = ((theta / 2.0).cos(), (theta / 2.0).sin());
    DMatrix::from_row_slice(
        2,
        2,
        &[
            c(c0, 0.0),
            -C64::from_polar(s0, lambda),
            C64::from_polar(s0, phi),
            C64::from_polar(c0, phi + lambda),
        ],
    )
}
pub fn u2(phi: f64, lambda: f64) -> DMatrix<C64> {
    u3(std::f64::consts::FRAC_PI_2, phi, lambda)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::quantum::types::QOp;
    use std::f64::consts::PI;

    #[test]
    fn all_gates_unitary() {
        for m in [
            i2(), x(), y(), z(), h(), s(), sdg(), t(), tdg(), sx(),
            rx(0.3), ry(1.1), rz(-2.0), phase(0.7), u3(0.1, 0.2, 0.3), u2(0.4, 0.5),
        ] {
            assert!(QOp::try_new_unitary(m).is_ok());
        }
    }

    #[test]
    fn u3_matches_named_gates() {
        let close = |a: &DMatrix<C64>, b: &DMatrix<C64>| (a - b).iter().all(|z| z.norm() < 1e-12);
        assert!(close(&u3(PI, 0.0, PI), &x()));
        assert!(close(&u2(0.0, PI), &h()));
    }

    #[test]
    fn sx_squared_is_x() {
        let sx2 = sx() * sx();
        assert!((sx2 - x()).iter().all(|z| z.norm() < 1e-12));
    }
}
