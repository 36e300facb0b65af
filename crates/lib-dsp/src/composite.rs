//! Instantaneous three-phase magnitudes.
//!
//! Pointwise reductions of raw phase samples; no windowing and no dependence on
//! the time step.

use crate::error::DspResult;
use crate::validate;

#[inline]
fn euclidean_norm(a: f64, b: f64, c: f64) -> f64 {
    (a * a + b * b + c * c).sqrt()
}

/// Instantaneous line-to-line RMS voltage, `sqrt(va^2 + vb^2 + vc^2)`.
///
/// This is the unscaled Euclidean norm of the phase voltages.
pub fn insta_ll_rms_voltage(t: &[f64], va: &[f64], vb: &[f64], vc: &[f64]) -> DspResult<Vec<f64>> {
    validate::three_phase(t, va, vb, vc)?;
    Ok((0..t.len()).map(|i| euclidean_norm(va[i], vb[i], vc[i])).collect())
}

/// Instantaneous line current, `sqrt(ia^2 + ib^2 + ic^2) / sqrt(3)`.
pub fn insta_line_current(t: &[f64], ia: &[f64], ib: &[f64], ic: &[f64]) -> DspResult<Vec<f64>> {
    validate::three_phase(t, ia, ib, ic)?;
    Ok((0..t.len())
        .map(|i| (1.0 / 3f64.sqrt()) * euclidean_norm(ia[i], ib[i], ic[i]))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_voltage_norm() {
        let v = insta_ll_rms_voltage(&[0.0, 1.0], &[3.0, 0.0], &[4.0, 0.0], &[0.0, 2.0]).unwrap();
        assert_eq!(v, vec![5.0, 2.0]);
    }

    #[test]
    fn test_balanced_current_is_constant() {
        // sum of cos^2 over a balanced set is 3/2: I = A * sqrt(1/2).
        let t: Vec<f64> = (0..100).map(|i| i as f64 * 1e-4).collect();
        let w = 2.0 * PI * 50.0;
        let ph = |s: f64| -> Vec<f64> { t.iter().map(|&t| 10.0 * (w * t - s).cos()).collect() };
        let i =
            insta_line_current(&t, &ph(0.0), &ph(2.0 * PI / 3.0), &ph(-2.0 * PI / 3.0)).unwrap();

        for v in i {
            assert_abs_diff_eq!(v, 10.0 * 0.5f64.sqrt(), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_length_mismatch() {
        assert!(insta_line_current(&[0.0, 1.0], &[1.0, 1.0], &[1.0], &[1.0, 1.0]).is_err());
    }
}
