//! profiles::errors — error taxonomy for profile evaluation.
//!
//! Purpose
//! -------
//! Provide a single error enum and result alias for every model function,
//! the shape normalizer, and the halo-term combinator, together with a
//! conversion layer to Python exceptions for the PyO3 bindings.
//!
//! Key behaviors
//! -------------
//! - Define [`ProfileResult`] and [`ProfileError`] as the canonical result and
//!   error types of the crate.
//! - Group variants into four families via [`ErrorKind`]: shape, argument,
//!   configuration, and kernel failures.
//! - Attach human-readable `Display` messages to each variant so failures are
//!   meaningful without additional context.
//! - Map each family to its natural Python exception when the
//!   `python-bindings` feature is enabled.
//!
//! Invariants & assumptions
//! ------------------------
//! - Shape, argument, and configuration errors are raised *before* any kernel
//!   call; a kernel never observes an input that failed these checks.
//! - `KernelFailure` is produced only by a physics kernel and is propagated
//!   unchanged. This layer never downgrades it to a default value.
//!
//! Conventions
//! -----------
//! - Messages are phrased in terms of the caller's inputs ("radius input
//!   cannot be a >1D array") rather than internal buffer details.
//!
//! Testing notes
//! -------------
//! - Unit tests verify `Display` payload embedding and the family reported by
//!   [`ProfileError::kind`]. The PyO3 conversion is exercised by Python-level
//!   tests.

#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::{PyArithmeticError, PyTypeError, PyValueError},
    PyErr,
};

/// Crate-wide result alias for profile evaluation.
pub type ProfileResult<T> = Result<T, ProfileError>;

/// Error family of a [`ProfileError`].
///
/// - `Shape`: an array input has the wrong rank or cardinality.
/// - `Argument`: wrong number or type of arguments for a model.
/// - `Configuration`: an option value is not recognized.
/// - `Kernel`: the physics kernel reported a numerical failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Shape,
    Argument,
    Configuration,
    Kernel,
}

/// Unified error type for profile evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileError {
    // ---- Shape ----
    /// An array input has more than one dimension.
    RankTooHigh { name: &'static str, ndim: usize },

    /// Two inputs that must share a length do not.
    LengthMismatch { name: &'static str, expected: usize, actual: usize },

    /// Bin edges need at least two entries to define one bin.
    TooFewEdges { len: usize },

    // ---- Argument ----
    /// A flat parameter vector has the wrong number of entries for a model.
    ArityMismatch { model: &'static str, expected: usize, actual: usize },

    /// An argument could not be interpreted as the required numeric type.
    InvalidArgumentType { name: &'static str, expected: &'static str },

    // ---- Configuration ----
    /// Unknown halo-term combination rule.
    UnknownCombination { name: String },

    /// Unknown model name in runtime dispatch.
    UnknownModel { name: String },

    // ---- Kernel ----
    /// Numerical failure reported by a physics kernel entry point.
    KernelFailure { entry: &'static str, reason: String },
}

impl ProfileError {
    /// Family this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProfileError::RankTooHigh { .. }
            | ProfileError::LengthMismatch { .. }
            | ProfileError::TooFewEdges { .. } => ErrorKind::Shape,
            ProfileError::ArityMismatch { .. } | ProfileError::InvalidArgumentType { .. } => {
                ErrorKind::Argument
            }
            ProfileError::UnknownCombination { .. } | ProfileError::UnknownModel { .. } => {
                ErrorKind::Configuration
            }
            ProfileError::KernelFailure { .. } => ErrorKind::Kernel,
        }
    }
}

impl std::error::Error for ProfileError {}

impl std::fmt::Display for ProfileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Shape ----
            ProfileError::RankTooHigh { name, ndim } => {
                write!(f, "{name} cannot be a >1D array; got {ndim} dimensions.")
            }
            ProfileError::LengthMismatch { name, expected, actual } => {
                write!(f, "{name} length mismatch: expected {expected}, got {actual}.")
            }
            ProfileError::TooFewEdges { len } => {
                write!(f, "Bin edges must contain at least 2 values; got {len}.")
            }
            // ---- Argument ----
            ProfileError::ArityMismatch { model, expected, actual } => {
                write!(f, "{model} takes {expected} parameters but {actual} were given.")
            }
            ProfileError::InvalidArgumentType { name, expected } => {
                write!(f, "{name} must be {expected}.")
            }
            // ---- Configuration ----
            ProfileError::UnknownCombination { name } => {
                write!(f, "Unknown combination {name:?}; valid options are 'max' or 'sum'.")
            }
            ProfileError::UnknownModel { name } => {
                write!(f, "Unknown profile model {name:?}.")
            }
            // ---- Kernel ----
            ProfileError::KernelFailure { entry, reason } => {
                write!(f, "Kernel '{entry}' failed: {reason}")
            }
        }
    }
}

/// Convert a [`ProfileError`] into the Python exception matching its family.
#[cfg(feature = "python-bindings")]
impl From<ProfileError> for PyErr {
    fn from(err: ProfileError) -> PyErr {
        match err.kind() {
            ErrorKind::Argument => PyTypeError::new_err(err.to_string()),
            ErrorKind::Kernel => PyArithmeticError::new_err(err.to_string()),
            ErrorKind::Shape | ErrorKind::Configuration => PyValueError::new_err(err.to_string()),
        }
    }
}
