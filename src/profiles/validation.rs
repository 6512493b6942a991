//! profiles::validation — pre-kernel cardinality guards.
//!
//! Purpose
//! -------
//! Centralize the small set of checks this layer performs before dispatching
//! to a physics kernel: parallel-table lengths, flat parameter-vector arity,
//! and bin-edge counts. Rank checks live in [`shape`](crate::profiles::shape).
//!
//! Conventions
//! -----------
//! - Only cardinality is checked. Physical plausibility (positive masses,
//!   monotone wavenumbers, finite parameters) is left to the kernel.
//! - Every guard returns `ProfileResult<()>` and never panics.
use crate::profiles::errors::{ProfileError, ProfileResult};

/// Require `actual == expected` for a table named `name`.
pub fn check_same_length(name: &'static str, expected: usize, actual: usize) -> ProfileResult<()> {
    if expected != actual {
        return Err(ProfileError::LengthMismatch { name, expected, actual });
    }
    Ok(())
}

/// Require exactly `expected` parameters for `model`.
///
/// Errors
/// ------
/// - `ProfileError::ArityMismatch` when `params.len() != expected`; this covers
///   the zero, too-few, and too-many cases alike.
pub fn check_arity(model: &'static str, expected: usize, params: &[f64]) -> ProfileResult<()> {
    if params.len() != expected {
        return Err(ProfileError::ArityMismatch { model, expected, actual: params.len() });
    }
    Ok(())
}

/// Require at least two bin edges.
pub fn check_edges(edges: &[f64]) -> ProfileResult<()> {
    if edges.len() < 2 {
        return Err(ProfileError::TooFewEdges { len: edges.len() });
    }
    Ok(())
}
