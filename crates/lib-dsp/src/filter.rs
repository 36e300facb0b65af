//! First-order low-pass and high-pass filters.
//!
//! Both filters are backward-Euler discretisations of a continuous RC stage
//! with time constant `tc`:
//!
//! ```text
//! x[0]   = u[0]
//! x[i+1] = (x[i] + (h/tc) * u[i+1]) / (1 + h/tc)
//! ```
//!
//! The low-pass output is `x` itself. The high-pass output is the complement
//! `u - x`, so `low_pass + high_pass == u` holds exactly at every sample.
//!
//! As `tc -> 0` the state tracks the input (`h/tc` dominates), so the low-pass
//! output tends to `u` and the high-pass output to zero. As `tc` grows the
//! state stays near `u[0]`.

use crate::error::DspResult;
use crate::validate;

/// Recursive filter state for every sample.
fn smoothed_state(t: &[f64], u: &[f64], tc: f64) -> DspResult<Vec<f64>> {
    let h = validate::sample_step(t)?.0;
    validate::same_length(t, u)?;
    validate::positive("time_constant", tc)?;

    let ratio = h / tc;
    let mut x = Vec::with_capacity(u.len());
    x.push(u[0]);
    for i in 0..u.len() - 1 {
        let next = (x[i] + (ratio * u[i + 1])) / (1.0 + ratio);
        x.push(next);
    }
    Ok(x)
}

/// First-order low-pass filter with time constant `tc` seconds.
pub fn low_pass(t: &[f64], u: &[f64], tc: f64) -> DspResult<Vec<f64>> {
    smoothed_state(t, u, tc)
}

/// First-order high-pass filter with time constant `tc` seconds.
pub fn high_pass(t: &[f64], u: &[f64], tc: f64) -> DspResult<Vec<f64>> {
    let x = smoothed_state(t, u, tc)?;
    Ok(u.iter().zip(&x).map(|(&u, &x)| -x + u).collect())
}
