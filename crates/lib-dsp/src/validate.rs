//! Argument checks shared by the kernel operators.
//!
//! The operators assume uniform sampling and never verify it; these checks only
//! reject input that would otherwise index out of bounds, divide by zero or
//! silently fill the output with NaN.

use crate::error::{DspError, DspResult};
use lib_types::units::Seconds;
use lib_types::waveform::time_step;

/// Require at least two time samples and return the step `t[1] - t[0]`.
pub fn sample_step(time: &[f64]) -> DspResult<Seconds> {
    let step = time_step(time).ok_or(DspError::InsufficientData {
        needed: 2,
        got: time.len(),
    })?;
    if !(step.0.is_finite() && step.0 > 0.0) {
        return Err(DspError::invalid(
            "time",
            format!("time step must be positive, got {}", step.0),
        ));
    }
    Ok(step)
}

/// Require `signal` to be aligned with `time`.
pub fn same_length(time: &[f64], signal: &[f64]) -> DspResult<()> {
    if signal.len() != time.len() {
        return Err(DspError::LengthMismatch {
            expected: time.len(),
            actual: signal.len(),
        });
    }
    Ok(())
}

/// Require three phase arrays aligned with `time`.
pub fn three_phase(time: &[f64], a: &[f64], b: &[f64], c: &[f64]) -> DspResult<()> {
    same_length(time, a)?;
    same_length(time, b)?;
    same_length(time, c)
}

/// Require a strictly positive, finite scalar.
pub fn positive(name: &'static str, value: f64) -> DspResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(DspError::invalid(
            name,
            format!("must be positive and finite, got {}", value),
        ))
    }
}

/// Require a finite scalar.
pub fn finite(name: &'static str, value: f64) -> DspResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DspError::invalid(name, format!("must be finite, got {}", value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_sample_step() {
        assert_eq!(sample_step(&[0.0, 0.25, 0.5]).unwrap(), Seconds(0.25));
        assert_eq!(
            sample_step(&[0.0]),
            Err(DspError::InsufficientData { needed: 2, got: 1 })
        );
        assert_eq!(
            sample_step(&[1.0, 1.0]).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
    }

    #[test]
    fn test_positive_rejects_zero_and_nan() {
        assert!(positive("tc", 0.0).is_err());
        assert!(positive("tc", f64::NAN).is_err());
        assert!(positive("tc", f64::INFINITY).is_err());
        assert_eq!(positive("tc", 1e-3), Ok(1e-3));
    }

    #[test]
    fn test_three_phase_lengths() {
        let t = [0.0, 1.0];
        assert!(three_phase(&t, &[1.0, 2.0], &[1.0, 2.0], &[1.0, 2.0]).is_ok());
        assert_eq!(
            three_phase(&t, &[1.0, 2.0], &[1.0], &[1.0, 2.0]),
            Err(DspError::LengthMismatch { expected: 2, actual: 1 })
        );
    }
}
