//! Hodrick-Prescott style trend filter.
//!
//! The trend `y` minimises
//!
//! ```text
//! |x - y|^2 + 2 * lambda * |D y|^2
//! ```
//!
//! where `D` is the second-difference operator (rows `[1, -2, 1]` on a sliding
//! diagonal), giving the normal equations `(I + 2 lambda D^T D) y = x`.
//! Larger `lambda` flattens the trend.
//!
//! Inputs longer than [`MAX_TREND_SAMPLES`] are first down-sampled by
//! `ceil(n / MAX_TREND_SAMPLES)`, so the returned waveform may sit on a coarser
//! time base than the input.

use crate::banded::Pentadiagonal;
use crate::error::{DspError, DspResult};
use crate::validate;
use lib_types::waveform::downsample;
use lib_types::Waveform;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// Size above which the input is down-sampled before solving.
pub const MAX_TREND_SAMPLES: usize = 10_000;

/// Second-difference stencil.
const SECOND_DIFFERENCE: [f64; 3] = [1.0, -2.0, 1.0];

/// Linear solver used for the normal equations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendSolver {
    /// O(n) `L D L^T` solve of the pentadiagonal system.
    #[default]
    Banded,
    /// Dense LU solve with an explicitly assembled difference matrix.
    Dense,
}

/// Stride applied to an input of `n` samples by the size guardrail.
pub fn guardrail_stride(n: usize) -> usize {
    if n > MAX_TREND_SAMPLES {
        n.div_ceil(MAX_TREND_SAMPLES)
    } else {
        1
    }
}

/// Trend of `x` using the default banded solver.
pub fn trend_filter(t: &[f64], x: &[f64], lambda: f64) -> DspResult<Waveform> {
    trend_filter_with(t, x, lambda, TrendSolver::Banded)
}

/// Trend of `x` with an explicit solver choice.
pub fn trend_filter_with(
    t: &[f64],
    x: &[f64],
    lambda: f64,
    solver: TrendSolver,
) -> DspResult<Waveform> {
    validate::sample_step(t)?;
    validate::same_length(t, x)?;
    let lambda = validate::positive("lambda", lambda)?;

    let stride = guardrail_stride(t.len());
    let (time, signal) = if stride > 1 {
        tracing::warn!(
            "Trend filter input has {} samples (limit {}), down-sampling by {}",
            t.len(),
            MAX_TREND_SAMPLES,
            stride
        );
        (downsample(t, stride), downsample(x, stride))
    } else {
        (t.to_vec(), x.to_vec())
    };

    tracing::debug!(
        "Trend filter: {} samples, lambda={}, solver={:?}",
        signal.len(),
        lambda,
        solver
    );

    let trend = match solver {
        TrendSolver::Banded => solve_banded(&signal, lambda)?,
        TrendSolver::Dense => solve_dense(&signal, lambda)?,
    };
    Ok(Waveform::new(time, trend))
}

/// Assemble `I + 2 lambda D^T D` in band storage.
pub fn normal_matrix(n: usize, lambda: f64) -> Pentadiagonal {
    let mut a = Pentadiagonal::identity(n);
    for row in 0..n.saturating_sub(2) {
        a.add_outer3(row, SECOND_DIFFERENCE, 2.0 * lambda);
    }
    a
}

fn solve_banded(x: &[f64], lambda: f64) -> DspResult<Vec<f64>> {
    normal_matrix(x.len(), lambda).solve(x)
}

/// Second-difference matrix of shape `(n-1, n)` whose last row is zero.
fn difference_matrix(n: usize) -> DMatrix<f64> {
    let mut d = DMatrix::zeros(n.saturating_sub(1), n);
    for row in 0..n.saturating_sub(2) {
        for (k, &c) in SECOND_DIFFERENCE.iter().enumerate() {
            d[(row, row + k)] = c;
        }
    }
    d
}

fn solve_dense(x: &[f64], lambda: f64) -> DspResult<Vec<f64>> {
    let n = x.len();
    let d = difference_matrix(n);
    let a = DMatrix::<f64>::identity(n, n) + (d.transpose() * &d) * (2.0 * lambda);
    let b = DVector::from_column_slice(x);

    let y = a
        .lu()
        .solve(&b)
        .ok_or_else(|| DspError::NumericalFailure("trend filter system is singular".into()))?;
    if y.iter().any(|v| !v.is_finite()) {
        return Err(DspError::NumericalFailure(
            "dense solve produced a non-finite value".into(),
        ));
    }
    Ok(y.iter().copied().collect())
}

/// Sum of squared second differences, the roughness penalised by the filter.
pub fn roughness(y: &[f64]) -> f64 {
    y.windows(3)
        .map(|w| {
            let d = w[0] - 2.0 * w[1] + w[2];
            d * d
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use approx::assert_abs_diff_eq;

    fn noisy_ramp(n: usize) -> (Vec<f64>, Vec<f64>) {
        let t: Vec<f64> = (0..n).map(|i| i as f64 * 1e-3).collect();
        let x = (0..n)
            .map(|i| 0.01 * i as f64 + if i % 2 == 0 { 0.5 } else { -0.5 })
            .collect();
        (t, x)
    }

    #[test]
    fn test_linear_signal_is_unchanged() {
        let t: Vec<f64> = (0..50).map(|i| i as f64).collect();
        let x: Vec<f64> = t.iter().map(|&t| 2.0 * t - 3.0).collect();
        let y = trend_filter(&t, &x, 100.0).unwrap();

        assert_eq!(y.time, t);
        for (a, e) in y.samples.iter().zip(&x) {
            assert_abs_diff_eq!(a, e, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_banded_matches_dense() {
        let (t, x) = noisy_ramp(120);
        for lambda in [0.1, 5.0, 1e3] {
            let banded = trend_filter_with(&t, &x, lambda, TrendSolver::Banded).unwrap();
            let dense = trend_filter_with(&t, &x, lambda, TrendSolver::Dense).unwrap();
            for (a, b) in banded.samples.iter().zip(&dense.samples) {
                assert_abs_diff_eq!(a, b, epsilon = 1e-8);
            }
        }
    }

    #[test]
    fn test_smoothing_removes_alternation() {
        let (t, x) = noisy_ramp(200);
        let y = trend_filter(&t, &x, 50.0).unwrap();
        assert!(roughness(&y.samples) < 1e-3 * roughness(&x));
    }

    #[test]
    fn test_two_samples_pass_through() {
        let y = trend_filter(&[0.0, 1.0], &[3.0, -1.0], 10.0).unwrap();
        assert_eq!(y.samples, vec![3.0, -1.0]);
    }

    #[test]
    fn test_guardrail_stride() {
        assert_eq!(guardrail_stride(10), 1);
        assert_eq!(guardrail_stride(MAX_TREND_SAMPLES), 1);
        assert_eq!(guardrail_stride(MAX_TREND_SAMPLES + 1), 2);
        assert_eq!(guardrail_stride(35_000), 4);
    }

    #[test]
    fn test_large_input_is_downsampled() {
        let (t, x) = noisy_ramp(25_000);
        let y = trend_filter(&t, &x, 10.0).unwrap();

        assert_eq!(y.len(), 8_334);
        assert_eq!(y.time.len(), y.samples.len());
        assert_eq!(y.time[1], t[3]);
    }

    #[test]
    fn test_rejects_bad_lambda() {
        let (t, x) = noisy_ramp(10);
        assert_eq!(trend_filter(&t, &x, 0.0).unwrap_err().kind(), ErrorKind::InvalidArgument);
        assert_eq!(
            trend_filter(&t, &x, f64::NAN).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
    }

    #[test]
    fn test_difference_matrix_shape() {
        let d = difference_matrix(5);
        assert_eq!(d.shape(), (4, 5));
        assert_eq!(d.row(1).iter().copied().collect::<Vec<_>>(), vec![0.0, 1.0, -2.0, 1.0, 0.0]);
        assert!(d.row(3).iter().all(|&v| v == 0.0));
    }
}
