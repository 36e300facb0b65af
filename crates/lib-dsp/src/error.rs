//! Error types for kernel operations.

use thiserror::Error;

/// Errors that can occur during kernel operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DspError {
    /// A scalar parameter is out of its valid range.
    #[error("Invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// Input length mismatch.
    #[error("Input length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Insufficient data for operation.
    #[error("Insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Linear solve failed or produced a non-finite result.
    #[error("Numerical failure: {0}")]
    NumericalFailure(String),
}

/// Coarse classification of a [`DspError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller supplied malformed input.
    InvalidArgument,
    /// Input was well-formed but the computation broke down.
    NumericalFailure,
}

impl DspError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DspError::InvalidArgument { .. }
            | DspError::LengthMismatch { .. }
            | DspError::InsufficientData { .. } => ErrorKind::InvalidArgument,
            DspError::NumericalFailure(_) => ErrorKind::NumericalFailure,
        }
    }

    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        DspError::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

/// Result type for kernel operations.
pub type DspResult<T> = Result<T, DspError>;
