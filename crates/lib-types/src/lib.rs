//! # lib-types
//!
//! Core type definitions for the waveform analysis kernel.
//!
//! This crate provides the value types shared by the kernel and its callers:
//! - Physical units (seconds, hertz) with compile-time separation
//! - Waveforms: a time array paired with aligned samples
//! - Phasor series from windowed Fourier estimation
//! - Three-phase component sets tagged with their coordinate basis

pub mod units;
pub mod waveform;
pub mod phasor;
pub mod three_phase;

pub use units::*;
pub use waveform::*;
pub use phasor::*;
pub use three_phase::*;

/// Re-export num_complex for convenience
pub use num_complex::Complex64;
