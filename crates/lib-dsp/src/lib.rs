//! # lib-dsp
//!
//! Waveform analysis kernel for power-system signals.
//!
//! This crate provides the numerical primitives behind the analysis tools:
//!
//! - **Calculus**: backward-difference derivative, rectangle-rule integral
//! - **Filters**: first-order low-pass and its high-pass complement
//! - **Windowed Phasors**: sliding single-bin DFT magnitude and angle
//! - **Trend Filter**: second-difference penalised smoothing with a banded solver
//! - **Moving Windows**: trailing average and RMS
//! - **Three-Phase Transforms**: Clarke, Park, symmetrical components
//! - **Composite Magnitudes**: instantaneous line-to-line voltage and line current
//! - **Operation Selector**: serde-friendly dispatch over all of the above
//!
//! Every function takes a time array and aligned sample arrays and returns new
//! arrays; inputs are never modified. The sample step is always taken from the
//! first two time samples.

pub mod error;
pub mod validate;
pub mod calculus;
pub mod filter;
pub mod phasor;
pub mod banded;
pub mod trend;
pub mod moving_window;
pub mod three_phase;
pub mod composite;
pub mod operation;

pub use error::{DspError, DspResult, ErrorKind};
pub use calculus::{derivative, integration};
pub use filter::{high_pass, low_pass};
pub use phasor::{window_phasor, window_phasor_angle, window_phasor_mag, PhasorParams};
pub use trend::{trend_filter, trend_filter_with, TrendSolver};
pub use moving_window::{avg_moving_window, rms_moving_window};
pub use three_phase::{
    clarke, inverse_clarke, inverse_park, inverse_park_angular, park, sequence_components,
    sequence_transform,
};
pub use composite::{insta_line_current, insta_ll_rms_voltage};
pub use operation::{execute, Inputs, Operation, OperationInfo, Output, CATALOG};
