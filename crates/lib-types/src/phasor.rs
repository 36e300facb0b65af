//! Phasor series produced by windowed Fourier estimation.

use crate::units::to_degrees;
use crate::waveform::Waveform;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// One complex phasor per sample on a (possibly down-sampled) time base.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhasorSeries {
    /// Sample times in seconds.
    pub time: Vec<f64>,

    /// Phasor estimate for the window ending at each sample.
    pub phasors: Vec<Complex64>,
}

impl PhasorSeries {
    /// Create a series with every phasor set to zero.
    pub fn zeros(time: Vec<f64>) -> Self {
        let phasors = vec![Complex64::new(0.0, 0.0); time.len()];
        Self { time, phasors }
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.phasors.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.phasors.is_empty()
    }

    /// Phasor magnitudes.
    pub fn magnitudes(&self) -> Vec<f64> {
        self.phasors.iter().map(|p| p.norm()).collect()
    }

    /// Phasor angles in degrees. A zero phasor has angle 0.
    pub fn angles_deg(&self) -> Vec<f64> {
        self.phasors.iter().map(|p| to_degrees(p.arg())).collect()
    }

    /// Magnitude view as a waveform.
    pub fn magnitude_waveform(&self) -> Waveform {
        Waveform::new(self.time.clone(), self.magnitudes())
    }

    /// Angle view (degrees) as a waveform.
    pub fn angle_waveform(&self) -> Waveform {
        Waveform::new(self.time.clone(), self.angles_deg())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_magnitude_and_angle() {
        let series = PhasorSeries {
            time: vec![0.0, 1.0, 2.0],
            phasors: vec![
                Complex64::new(0.0, 0.0),
                Complex64::new(3.0, 4.0),
                Complex64::new(0.0, -2.0),
            ],
        };

        assert_eq!(series.magnitudes(), vec![0.0, 5.0, 2.0]);
        let angles = series.angles_deg();
        assert_eq!(angles[0], 0.0);
        assert_abs_diff_eq!(angles[2], -90.0, epsilon = 1e-12);
    }

    #[test]
    fn test_waveform_views_share_time() {
        let series = PhasorSeries::zeros(vec![0.0, 0.5]);
        assert_eq!(series.magnitude_waveform().time, series.time);
        assert_eq!(series.angle_waveform().samples, vec![0.0, 0.0]);
    }
}
