//! Built-in test signals.

use crate::input::SignalTable;
use anyhow::Result;
use lib_types::{Hertz, Seconds, Waveform};
use std::f64::consts::PI;

/// End of the pure 50 Hz segment.
const HARMONIC_START: f64 = 0.35;
/// End of the 50 Hz + 500 Hz segment; the signal is constant afterwards.
const STEP_START: f64 = 0.7;
/// Amplitude of the balanced three-phase set.
const THREE_PHASE_AMPLITUDE: f64 = 10.0;

/// Sample grid for a demo signal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DemoSettings {
    pub step: Seconds,
    pub duration: Seconds,
}

impl DemoSettings {
    pub fn new(step: f64, duration: f64) -> Result<Self> {
        if !(step.is_finite() && step > 0.0) {
            anyhow::bail!("Step must be positive and finite, got {}", step);
        }
        if !(duration.is_finite() && duration > step) {
            anyhow::bail!("Duration must exceed the step, got {} s", duration);
        }
        Ok(Self {
            step: Seconds(step),
            duration: Seconds(duration),
        })
    }

    /// Number of samples in `[0, duration)`.
    pub fn len(&self) -> usize {
        (self.duration / self.step).ceil() as usize
    }
}

/// Piecewise test signal: a 50 Hz tone, then a 500 Hz harmonic on top, then
/// a constant level.
pub fn test_signal(settings: &DemoSettings) -> Waveform {
    let fundamental = Hertz::MAINS_50.angular();
    let harmonic = Hertz(500.0).angular();
    Waveform::from_fn(settings.len(), settings.step, Seconds::ZERO, |t| {
        if t < HARMONIC_START {
            10.0 * (fundamental * t).sin()
        } else if t < STEP_START {
            10.0 * (fundamental * t).sin() + 2.0 * (harmonic * t).sin()
        } else {
            8.0
        }
    })
}

/// Test signal as a two-column table (`t`, `x`).
pub fn test_signal_table(settings: &DemoSettings) -> SignalTable {
    let w = test_signal(settings);
    SignalTable {
        headers: vec!["t".into(), "x".into()],
        columns: vec![w.time, w.samples],
    }
}

/// Balanced 50 Hz set `va`, `vb`, `vc` with `vb` lagging by 120 degrees.
pub fn three_phase_table(settings: &DemoSettings) -> SignalTable {
    let omega = Hertz::MAINS_50.angular();
    let phase = |shift: f64| {
        Waveform::from_fn(settings.len(), settings.step, Seconds::ZERO, |t| {
            THREE_PHASE_AMPLITUDE * (omega * t - shift).sin()
        })
    };
    let va = phase(0.0);
    let vb = phase(2.0 * PI / 3.0);
    let vc = phase(-2.0 * PI / 3.0);

    SignalTable {
        headers: vec!["t".into(), "va".into(), "vb".into(), "vc".into()],
        columns: vec![va.time, va.samples, vb.samples, vc.samples],
    }
}
