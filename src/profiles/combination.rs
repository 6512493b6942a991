//! profiles::combination — one-halo/two-halo composition algebra.
//!
//! Purpose
//! -------
//! Merge an evaluated one-halo term and two-halo term into the halo-model
//! correlation function. The combinator is a pure elementwise operation with
//! no knowledge of how its inputs were produced, so it is reusable with any
//! pair of profiles.
//!
//! Key behaviors
//! -------------
//! - [`combine_halo_terms`] applies [`Combination::Max`] (elementwise maximum)
//!   or [`Combination::Sum`] (elementwise addition).
//! - [`combine_by_name`] parses the rule first, so an unknown name fails with
//!   `ProfileError::UnknownCombination` before any arithmetic.
//! - [`two_halo_term`] scales the matter correlation function by a linear
//!   halo bias.
//!
//! Invariants & assumptions
//! ------------------------
//! - Both terms must have the same length; otherwise
//!   `ProfileError::LengthMismatch` is returned.
//! - For inputs that are not pointwise equal, `Sum` and `Max` never produce
//!   the same array when the terms are positive.
use crate::profiles::{
    errors::ProfileResult,
    options::Combination,
    validation::check_same_length,
};
use ndarray::{Array1, ArrayView1, Zip};

/// Combine one-halo and two-halo terms elementwise.
///
/// Parameters
/// ----------
/// - `one_halo`: `ArrayView1<f64>`
///   Evaluated one-halo term.
/// - `two_halo`: `ArrayView1<f64>`
///   Evaluated two-halo term; must match `one_halo` in length.
/// - `mode`: [`Combination`]
///   Merge rule.
///
/// Errors
/// ------
/// - `ProfileError::LengthMismatch` when the terms differ in length.
///
/// Examples
/// --------
/// ```rust
/// # use halo_profiles::profiles::{combination::combine_halo_terms, options::Combination};
/// # use ndarray::array;
/// let a = array![1.0, 2.0, 3.0];
/// let b = array![3.0, 2.0, 1.0];
/// let max = combine_halo_terms(a.view(), b.view(), Combination::Max).unwrap();
/// let sum = combine_halo_terms(a.view(), b.view(), Combination::Sum).unwrap();
/// assert_eq!(max, array![3.0, 2.0, 3.0]);
/// assert_eq!(sum, array![4.0, 4.0, 4.0]);
/// ```
pub fn combine_halo_terms(
    one_halo: ArrayView1<'_, f64>, two_halo: ArrayView1<'_, f64>, mode: Combination,
) -> ProfileResult<Array1<f64>> {
    check_same_length("two-halo term", one_halo.len(), two_halo.len())?;
    let combined = match mode {
        Combination::Max => Zip::from(&one_halo).and(&two_halo).map_collect(|&a, &b| a.max(b)),
        Combination::Sum => Zip::from(&one_halo).and(&two_halo).map_collect(|&a, &b| a + b),
    };
    Ok(combined)
}

/// Same as [`combine_halo_terms`], with the rule given by name (`None` = max).
pub fn combine_by_name(
    one_halo: ArrayView1<'_, f64>, two_halo: ArrayView1<'_, f64>, mode: Option<&str>,
) -> ProfileResult<Array1<f64>> {
    let mode = Combination::from_name(mode)?;
    combine_halo_terms(one_halo, two_halo, mode)
}

/// Two-halo correlation term `bias · ξ_mm`.
pub fn two_halo_term(bias: f64, xi_mm: ArrayView1<'_, f64>) -> Array1<f64> {
    xi_mm.mapv(|xi| bias * xi)
}
