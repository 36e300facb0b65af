//! Windowed phasor estimation.
//!
//! The estimator slides a window of `period` samples, spanning a whole number
//! of cycles of the dominant frequency, over a down-sampled copy of the input
//! and evaluates a single-bin DFT on each window:
//!
//! ```text
//! X = sqrt(2) / N * sum_k x[k] * exp(-j * omega * t[k])
//! ```
//!
//! The exponent uses absolute sample times, so the phase is referenced to
//! `t = 0` rather than to the start of each window. For a window covering whole
//! cycles of `A * sin(omega * t)` the magnitude is `A / sqrt(2)`, the RMS value
//! of the tone, and the angle is -90 degrees.
//!
//! Samples whose window has not filled yet (`i < period`) are zero.

use crate::error::{DspError, DspResult};
use crate::validate;
use lib_types::units::Hertz;
use lib_types::waveform::downsample;
use lib_types::PhasorSeries;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Parameters of the sliding phasor estimator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhasorParams {
    /// Down-sampling stride applied to both time and signal.
    #[serde(default = "default_stride")]
    pub stride: usize,

    /// Window length in cycles of the dominant frequency.
    #[serde(default = "default_cycles")]
    pub cycles: f64,

    /// Fundamental frequency to estimate.
    #[serde(default = "default_dominant_frequency")]
    pub dominant_frequency: Hertz,
}

fn default_stride() -> usize { 1 }
fn default_cycles() -> f64 { 1.0 }
fn default_dominant_frequency() -> Hertz { Hertz::MAINS_50 }

impl Default for PhasorParams {
    fn default() -> Self {
        Self {
            stride: default_stride(),
            cycles: default_cycles(),
            dominant_frequency: default_dominant_frequency(),
        }
    }
}

impl PhasorParams {
    /// Parameters for a given stride and cycle count at the default 50 Hz.
    pub fn new(stride: usize, cycles: f64) -> Self {
        Self {
            stride,
            cycles,
            ..Default::default()
        }
    }

    /// Override the dominant frequency.
    pub fn with_frequency(mut self, dominant_frequency: Hertz) -> Self {
        self.dominant_frequency = dominant_frequency;
        self
    }
}

/// Single-frequency DFT of one window, scaled by `sqrt(2) / N`.
///
/// `segment` and `segment_times` must have the same, non-zero length.
pub fn windowed_dft(segment: &[f64], segment_times: &[f64], omega: f64) -> Complex64 {
    let win_len = segment_times.len();
    let mut acc = Complex64::new(0.0, 0.0);
    for (&x, &t) in segment.iter().zip(segment_times) {
        acc += x * Complex64::new(0.0, -omega * t).exp();
    }
    std::f64::consts::SQRT_2 / win_len as f64 * acc
}

/// Window length in down-sampled samples: `round(cycles / (f * h))`.
///
/// Ties round to even.
pub fn window_period(cycles: f64, dominant_frequency: Hertz, step: f64) -> usize {
    let period = (cycles / (dominant_frequency.0 * step)).round_ties_even();
    if period.is_finite() && period > 0.0 {
        period as usize
    } else {
        0
    }
}

/// Complex phasor estimate for every down-sampled sample.
pub fn window_phasor(t: &[f64], x: &[f64], params: &PhasorParams) -> DspResult<PhasorSeries> {
    validate::same_length(t, x)?;
    if params.stride == 0 {
        return Err(DspError::invalid("stride", "must be at least 1"));
    }
    let cycles = validate::positive("cycles", params.cycles)?;
    let freq = validate::positive("dominant_frequency", params.dominant_frequency.0)?;

    let va = downsample(x, params.stride);
    let tnew = downsample(t, params.stride);
    let h = validate::sample_step(&tnew)?.0;

    let period = window_period(cycles, Hertz(freq), h);
    if period == 0 {
        return Err(DspError::invalid(
            "cycles",
            format!(
                "window of {} cycles at {} Hz is shorter than one sample (step {})",
                cycles, freq, h
            ),
        ));
    }

    tracing::debug!(
        "Windowed phasor: {} samples after stride {}, period {} samples",
        tnew.len(),
        params.stride,
        period
    );
    if period >= tnew.len() {
        tracing::warn!(
            "Phasor window ({} samples) never fills a {}-sample series; output is all zero",
            period,
            tnew.len()
        );
    }

    let omega = Hertz(freq).angular();
    let mut series = PhasorSeries::zeros(tnew);
    for i in period..series.time.len() {
        series.phasors[i] = windowed_dft(&va[i - period..i], &series.time[i - period..i], omega);
    }
    Ok(series)
}

/// Magnitude of the windowed phasor, with the down-sampled time array.
pub fn window_phasor_mag(
    t: &[f64],
    x: &[f64],
    params: &PhasorParams,
) -> DspResult<(Vec<f64>, Vec<f64>)> {
    let series = window_phasor(t, x, params)?;
    Ok((series.magnitudes(), series.time))
}

/// Angle of the windowed phasor in degrees, with the down-sampled time array.
pub fn window_phasor_angle(
    t: &[f64],
    x: &[f64],
    params: &PhasorParams,
) -> DspResult<(Vec<f64>, Vec<f64>)> {
    let series = window_phasor(t, x, params)?;
    Ok((series.angles_deg(), series.time))
}
