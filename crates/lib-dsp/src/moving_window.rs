//! Moving-window average and RMS over a trailing time window.
//!
//! The window is given in seconds and converted to `tw = window / h` samples
//! without rounding. The first output index is `trunc(tw)`; each output sums
//! the samples in `[trunc(i - tw), i)` and divides by the un-truncated `tw`.
//! Outputs before the first full window are zero.

use crate::error::DspResult;
use crate::validate;
use lib_types::units::Seconds;

/// Trailing window geometry shared by both statistics.
#[derive(Clone, Copy, Debug, PartialEq)]
struct TrailingWindow {
    /// Window length in samples, un-truncated.
    tw: f64,
}

impl TrailingWindow {
    fn new(t: &[f64], signal: &[f64], window: f64) -> DspResult<Self> {
        let h = validate::sample_step(t)?;
        validate::same_length(t, signal)?;
        let window = validate::positive("window", window)?;
        Ok(Self {
            tw: Seconds(window).in_samples(h),
        })
    }

    /// First index whose window is considered full.
    fn first(&self) -> usize {
        self.tw as usize
    }

    /// Start of the window ending (exclusively) at `i`.
    fn start(&self, i: usize) -> usize {
        // Negative offsets saturate to 0, matching truncation toward zero.
        (i as f64 - self.tw) as usize
    }

    fn apply(
        &self,
        signal: &[f64],
        f: impl Fn(f64) -> f64,
        finish: impl Fn(f64) -> f64,
    ) -> Vec<f64> {
        let n = signal.len();
        let mut out = vec![0.0; n];
        if self.first() >= n {
            tracing::debug!(
                "Moving window of {:.1} samples never fills a {}-sample series",
                self.tw,
                n
            );
            return out;
        }
        for i in self.first()..n {
            let mut sum = 0.0;
            for &v in &signal[self.start(i)..i] {
                sum += f(v);
            }
            out[i] = finish(sum);
        }
        out
    }
}

/// Trailing moving average over `window` seconds.
pub fn avg_moving_window(t: &[f64], v: &[f64], window: f64) -> DspResult<Vec<f64>> {
    let w = TrailingWindow::new(t, v, window)?;
    Ok(w.apply(v, |x| x, |sum| sum / w.tw))
}

/// Trailing moving RMS over `window` seconds.
pub fn rms_moving_window(t: &[f64], v: &[f64], window: f64) -> DspResult<Vec<f64>> {
    let w = TrailingWindow::new(t, v, window)?;
    Ok(w.apply(v, |x| x * x, |sum| (sum / w.tw).sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use approx::assert_abs_diff_eq;

    fn grid(n: usize, h: f64) -> Vec<f64> {
        (0..n).map(|i| i as f64 * h).collect()
    }

    #[test]
    fn test_average_of_ramp() {
        let t = grid(6, 1.0);
        let v = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let avg = avg_moving_window(&t, &v, 2.0).unwrap();
        // Window [i-2, i): mean of the two previous samples.
        assert_eq!(avg, vec![0.0, 0.0, 0.5, 1.5, 2.5, 3.5]);
    }

    #[test]
    fn test_fractional_window_divides_by_untruncated_length() {
        let t = grid(5, 1.0);
        let v = [2.0; 5];
        let avg = avg_moving_window(&t, &v, 2.5).unwrap();

        // i = 2: start trunc(-0.5) = 0, two samples over 2.5.
        assert_abs_diff_eq!(avg[2], 4.0 / 2.5, epsilon = 1e-12);
        // i = 3: start trunc(0.5) = 0, three samples over 2.5.
        assert_abs_diff_eq!(avg[3], 6.0 / 2.5, epsilon = 1e-12);
        assert_eq!(&avg[..2], &[0.0, 0.0]);
    }

    #[test]
    fn test_rms_of_alternating_signal() {
        let t = grid(8, 0.5);
        let v = [1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0];
        let rms = rms_moving_window(&t, &v, 2.0).unwrap();
        assert!(rms[..4].iter().all(|&r| r == 0.0));
        assert!(rms[4..].iter().all(|&r| r == 1.0));
    }

    #[test]
    fn test_window_longer_than_series() {
        let t = grid(4, 1.0);
        let v = [1.0; 4];
        assert_eq!(avg_moving_window(&t, &v, 10.0).unwrap(), vec![0.0; 4]);
    }

    #[test]
    fn test_rejects_bad_window() {
        let t = grid(4, 1.0);
        let v = [1.0; 4];
        assert_eq!(
            rms_moving_window(&t, &v, 0.0).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        assert!(avg_moving_window(&t, &v[..3], 1.0).is_err());
    }
}
