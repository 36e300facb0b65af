//! Discrete derivative and integral of uniformly sampled signals.
//!
//! Both operators take the step from the first two time samples. The integral
//! is the left rectangle rule, not the trapezoidal rule.

use crate::error::DspResult;
use crate::validate;

/// Backward difference: `y[0] = 0`, `y[i] = (x[i] - x[i-1]) / h`.
pub fn derivative(t: &[f64], x: &[f64]) -> DspResult<Vec<f64>> {
    let h = validate::sample_step(t)?.0;
    validate::same_length(t, x)?;

    let mut y = vec![0.0; t.len()];
    for i in 1..x.len() {
        y[i] = (x[i] - x[i - 1]) / h;
    }
    Ok(y)
}

/// Cumulative left-rectangle integral: `y[0] = 0`, `y[i] = y[i-1] + h * x[i-1]`.
pub fn integration(t: &[f64], x: &[f64]) -> DspResult<Vec<f64>> {
    let h = validate::sample_step(t)?.0;
    validate::same_length(t, x)?;

    let mut y = vec![0.0; t.len()];
    for i in 1..x.len() {
        y[i] = y[i - 1] + h * x[i - 1];
    }
    Ok(y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DspError;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_derivative_of_ramp() {
        let t = [0.0, 0.5, 1.0, 1.5];
        let x = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(derivative(&t, &x).unwrap(), vec![0.0, 2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_integration_is_left_rectangle() {
        let t = [0.0, 0.5, 1.0, 1.5];
        let x = [2.0, 4.0, 6.0, 8.0];
        // Last sample never contributes.
        assert_eq!(integration(&t, &x).unwrap(), vec![0.0, 1.0, 3.0, 6.0]);
    }

    #[test]
    fn test_integrate_constant() {
        let t: Vec<f64> = (0..101).map(|i| i as f64 * 0.01).collect();
        let x = vec![3.0; t.len()];
        let y = integration(&t, &x).unwrap();
        assert_abs_diff_eq!(y[100], 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert_eq!(
            derivative(&[0.0], &[1.0]),
            Err(DspError::InsufficientData { needed: 2, got: 1 })
        );
        assert_eq!(
            integration(&[0.0, 1.0, 2.0], &[1.0, 2.0]),
            Err(DspError::LengthMismatch { expected: 3, actual: 2 })
        );
    }
}
