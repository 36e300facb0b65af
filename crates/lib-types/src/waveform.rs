//! Time-domain waveform representation.
//!
//! Waveforms pair an explicit time array with one sample array aligned
//! index-for-index. The kernel assumes (but does not verify) uniform spacing:
//!
//! ```text
//! h = t[1] - t[0]
//! ```
//!
//! is used as the step for every sample. Results that are computed on a
//! down-sampled time base (windowed phasors, large trend filters) carry their
//! own reduced time array, so a `Waveform` is always internally aligned.

use crate::units::Seconds;
use serde::{Deserialize, Serialize};

/// A sampled signal together with its time base.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Waveform {
    /// Sample times in seconds, strictly increasing.
    pub time: Vec<f64>,

    /// Sample values aligned with `time`.
    pub samples: Vec<f64>,
}

impl Waveform {
    /// Create a new waveform from a time array and its samples.
    pub fn new(time: Vec<f64>, samples: Vec<f64>) -> Self {
        Self { time, samples }
    }

    /// Build a waveform on a uniform grid `t_start + i * dt`.
    pub fn from_fn(len: usize, dt: Seconds, t_start: Seconds, f: impl Fn(f64) -> f64) -> Self {
        let time: Vec<f64> = (0..len).map(|i| t_start.0 + i as f64 * dt.0).collect();
        let samples = time.iter().map(|&t| f(t)).collect();
        Self { time, samples }
    }

    /// Number of samples in the waveform.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the waveform is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Step between the first two entries of a time array.
#[inline]
pub fn time_step(time: &[f64]) -> Option<Seconds> {
    match time {
        [t0, t1, ..] => Some(Seconds(t1 - t0)),
        _ => None,
    }
}

/// Every `stride`-th element of `values`, starting at index 0 (`values[0::stride]`).
pub fn downsample<T: Copy>(values: &[T], stride: usize) -> Vec<T> {
    values.iter().step_by(stride.max(1)).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fn_uniform_grid() {
        let wf = Waveform::from_fn(5, Seconds(0.5), Seconds(1.0), |t| 2.0 * t);

        assert_eq!(wf.len(), 5);
        assert_eq!(wf.time, vec![1.0, 1.5, 2.0, 2.5, 3.0]);
        assert_eq!(wf.samples[4], 6.0);
        assert_eq!(time_step(&wf.time), Some(Seconds(0.5)));
    }

    #[test]
    fn test_downsample_keeps_first_sample() {
        let values: Vec<f64> = (0..7).map(|i| i as f64 * 10.0).collect();

        assert_eq!(downsample(&values, 3), vec![0.0, 30.0, 60.0]);
        assert_eq!(downsample(&values, 0), values);
        assert_eq!(downsample(&values, 10), vec![0.0]);
    }

    #[test]
    fn test_step_requires_two_samples() {
        assert_eq!(time_step(&[1.0]), None);
        assert_eq!(time_step(&[]), None);
        assert!(Waveform::new(vec![], vec![]).is_empty());
    }
}
