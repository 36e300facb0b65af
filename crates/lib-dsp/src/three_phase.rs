//! Three-phase coordinate transforms.
//!
//! Every transform is a 3x3 change of basis applied independently to each
//! sample `(va, vb, vc)`. Clarke and Park use the power-invariant scaling
//! `sqrt(2/3)`, under which both matrices are orthogonal and the inverses are
//! plain transposes.
//!
//! Frequency conventions differ between the Park directions:
//! - [`park`] takes `omega` in rad/s: `theta = omega * t + gamma`.
//! - [`inverse_park`] takes `frequency` in Hz: `theta = 2 pi f t + gamma`.
//!
//! [`inverse_park_angular`] is the symmetric alternative that takes rad/s and
//! exactly undoes [`park`] for the same `omega`.

use crate::error::DspResult;
use crate::validate;
use lib_types::{Basis, Complex64, ThreePhase};
use std::f64::consts::{FRAC_1_SQRT_2, PI};

/// Real 3x3 matrix, row-major.
pub type Matrix3 = [[f64; 3]; 3];

/// Complex 3x3 matrix, row-major.
pub type ComplexMatrix3 = [[Complex64; 3]; 3];

const SQRT_3_2: f64 = 0.866_025_403_784_438_6;

#[inline]
fn power_invariant_scale() -> f64 {
    (2.0f64 / 3.0).sqrt()
}

/// Multiply a 3x3 matrix by a column vector.
#[inline]
pub fn apply(m: &Matrix3, v: [f64; 3]) -> [f64; 3] {
    [0, 1, 2].map(|r| m[r][0] * v[0] + m[r][1] * v[1] + m[r][2] * v[2])
}

/// Transpose of a 3x3 matrix.
#[inline]
pub fn transpose(m: &Matrix3) -> Matrix3 {
    [0, 1, 2].map(|r| [m[0][r], m[1][r], m[2][r]])
}

/// Map from (alpha, beta, zero) to (a, b, c): `sqrt(2/3) * M` with
/// `M = [[1, 0, 1/sqrt2], [-1/2, -sqrt3/2, 1/sqrt2], [-1/2, sqrt3/2, 1/sqrt2]]`.
pub fn inverse_clarke_matrix() -> Matrix3 {
    let k = power_invariant_scale();
    [
        [k, 0.0, k * FRAC_1_SQRT_2],
        [-0.5 * k, -SQRT_3_2 * k, k * FRAC_1_SQRT_2],
        [-0.5 * k, SQRT_3_2 * k, k * FRAC_1_SQRT_2],
    ]
}

/// Map from (a, b, c) to (alpha, beta, zero), the inverse (= transpose) of
/// [`inverse_clarke_matrix`].
pub fn clarke_matrix() -> Matrix3 {
    transpose(&inverse_clarke_matrix())
}

/// Park matrix at angle `theta`, mapping (a, b, c) to (d, q, zero).
pub fn park_matrix(theta: f64) -> Matrix3 {
    let k = power_invariant_scale();
    let shifts = [0.0, 2.0 * PI / 3.0, 4.0 * PI / 3.0];
    [
        shifts.map(|s| k * (theta - s).cos()),
        shifts.map(|s| k * (theta - s).sin()),
        [k * FRAC_1_SQRT_2; 3],
    ]
}

/// Operator `a = exp(j 2 pi / 3)`.
#[inline]
pub fn rotation_operator() -> Complex64 {
    Complex64::from_polar(1.0, 2.0 * PI / 3.0)
}

/// Map from (a, b, c) to (positive, negative, zero) sequence:
/// `(1/3) [[1, a, a^2], [1, a^2, a], [1, 1, 1]]`, the inverse of
/// `[[1, 1, 1], [a^2, a, 1], [a, a^2, 1]]`.
pub fn sequence_matrix() -> ComplexMatrix3 {
    let a = rotation_operator();
    let a2 = a * a;
    let one = Complex64::new(1.0, 0.0);
    let third = 1.0 / 3.0;
    [
        [one * third, a * third, a2 * third],
        [one * third, a2 * third, a * third],
        [one * third, one * third, one * third],
    ]
}

#[inline]
fn apply_complex(m: &ComplexMatrix3, v: [Complex64; 3]) -> [Complex64; 3] {
    [0, 1, 2].map(|r| m[r][0] * v[0] + m[r][1] * v[1] + m[r][2] * v[2])
}

/// Apply a per-sample matrix to every sample of three aligned arrays.
fn map_samples(
    t: &[f64],
    a: &[f64],
    b: &[f64],
    c: &[f64],
    basis: Basis,
    matrix_at: impl Fn(f64) -> Matrix3,
) -> DspResult<ThreePhase> {
    validate::three_phase(t, a, b, c)?;
    let mut out = ThreePhase::zeros(t.to_vec(), basis);
    for i in 0..t.len() {
        let m = matrix_at(t[i]);
        out.set_sample(i, apply(&m, [a[i], b[i], c[i]]));
    }
    Ok(out)
}

/// Clarke transform: (a, b, c) to (alpha, beta, zero).
pub fn clarke(t: &[f64], va: &[f64], vb: &[f64], vc: &[f64]) -> DspResult<ThreePhase> {
    let m = clarke_matrix();
    map_samples(t, va, vb, vc, Basis::AlphaBetaZero, |_| m)
}

/// Inverse Clarke transform: (alpha, beta, zero) to (a, b, c).
pub fn inverse_clarke(
    t: &[f64],
    alpha: &[f64],
    beta: &[f64],
    zero: &[f64],
) -> DspResult<ThreePhase> {
    let m = inverse_clarke_matrix();
    map_samples(t, alpha, beta, zero, Basis::Abc, |_| m)
}

/// Park transform with angular frequency `omega` (rad/s) and phase `gamma` (rad).
pub fn park(
    t: &[f64],
    va: &[f64],
    vb: &[f64],
    vc: &[f64],
    omega: f64,
    gamma: f64,
) -> DspResult<ThreePhase> {
    validate::finite("omega", omega)?;
    validate::finite("gamma", gamma)?;
    map_samples(t, va, vb, vc, Basis::Dq0, |ti| park_matrix(omega * ti + gamma))
}

/// Inverse Park transform with `frequency` in Hz and phase `gamma` (rad).
///
/// The angle is `2 pi frequency t + gamma`, unlike [`park`] which takes its
/// frequency already in rad/s.
pub fn inverse_park(
    t: &[f64],
    d: &[f64],
    q: &[f64],
    zero: &[f64],
    frequency: f64,
    gamma: f64,
) -> DspResult<ThreePhase> {
    validate::finite("frequency", frequency)?;
    validate::finite("gamma", gamma)?;
    let w1 = 2.0 * PI * frequency;
    map_samples(t, d, q, zero, Basis::Abc, |ti| transpose(&park_matrix(w1 * ti + gamma)))
}

/// Inverse Park transform taking `omega` in rad/s, the exact inverse of
/// [`park`] for the same `omega` and `gamma`.
pub fn inverse_park_angular(
    t: &[f64],
    d: &[f64],
    q: &[f64],
    zero: &[f64],
    omega: f64,
    gamma: f64,
) -> DspResult<ThreePhase> {
    validate::finite("omega", omega)?;
    validate::finite("gamma", gamma)?;
    map_samples(t, d, q, zero, Basis::Abc, |ti| transpose(&park_matrix(omega * ti + gamma)))
}

/// Sequence transform of real samples, keeping only the real part of each
/// (positive, negative, zero) component.
///
/// The imaginary parts carry genuine information for instantaneous samples;
/// use [`sequence_components`] on phasors when it is needed.
pub fn sequence_transform(t: &[f64], va: &[f64], vb: &[f64], vc: &[f64]) -> DspResult<ThreePhase> {
    validate::three_phase(t, va, vb, vc)?;
    let m = sequence_matrix();
    let mut out = ThreePhase::zeros(t.to_vec(), Basis::Sequence);
    for i in 0..t.len() {
        let v = [va[i], vb[i], vc[i]].map(|x| Complex64::new(x, 0.0));
        out.set_sample(i, apply_complex(&m, v).map(|z| z.re));
    }
    Ok(out)
}

/// Complex sequence components of phasor inputs.
///
/// Returns `[positive, negative, zero]`.
pub fn sequence_components(
    va: &[Complex64],
    vb: &[Complex64],
    vc: &[Complex64],
) -> DspResult<[Vec<Complex64>; 3]> {
    let n = va.len();
    for other in [vb.len(), vc.len()] {
        if other != n {
            return Err(crate::error::DspError::LengthMismatch {
                expected: n,
                actual: other,
            });
        }
    }

    let m = sequence_matrix();
    let mut out: [Vec<Complex64>; 3] = Default::default();
    for i in 0..n {
        let s = apply_complex(&m, [va[i], vb[i], vc[i]]);
        for (k, z) in s.into_iter().enumerate() {
            out[k].push(z);
        }
    }
    Ok(out)
}
