//! Physical units with type safety.
//!
//! These newtypes keep sample steps, window lengths and frequencies from being
//! mixed up at the kernel boundary (e.g., passing a window length in samples
//! where seconds are expected).

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::ops::Div;

/// Time duration in seconds.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seconds(pub f64);

impl Seconds {
    pub const ZERO: Self = Self(0.0);

    /// Number of samples of step `step` spanned by this duration, un-truncated.
    #[inline]
    pub fn in_samples(&self, step: Seconds) -> f64 {
        self.0 / step.0
    }
}

impl Div<Seconds> for Seconds {
    type Output = f64;
    fn div(self, rhs: Seconds) -> f64 {
        self.0 / rhs.0
    }
}

/// Frequency in Hertz.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hertz(pub f64);

impl Hertz {
    /// European mains frequency, the default fundamental for phasor estimation.
    pub const MAINS_50: Self = Self(50.0);

    /// Angular frequency (omega = 2 * pi * f), in rad/s.
    #[inline]
    pub fn angular(&self) -> f64 {
        2.0 * PI * self.0
    }
}

/// Convert an angle in radians to degrees.
#[inline]
pub fn to_degrees(radians: f64) -> f64 {
    radians * 180.0 / PI
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_in_samples() {
        let window = Seconds(0.02);
        let step = Seconds(1e-4);
        assert!((window.in_samples(step) - 200.0).abs() < 1e-9);
        assert!((window / step - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_angular_frequency() {
        assert!((Hertz(1.0).angular() - 2.0 * PI).abs() < 1e-15);
        assert!((Hertz::MAINS_50.angular() - 100.0 * PI).abs() < 1e-12);
        assert!((to_degrees(PI) - 180.0).abs() < 1e-12);
    }

    #[test]
    fn test_serializes_as_plain_number() {
        assert_eq!(serde_json::to_string(&Hertz::MAINS_50).unwrap(), "50.0");
        let step: Seconds = serde_json::from_str("0.0001").unwrap();
        assert_eq!(step, Seconds(1e-4));
    }
}
