//! profiles::shape — scalar/vector normalization of caller inputs.
//!
//! Purpose
//! -------
//! Provide the single conversion point between heterogeneous caller inputs
//! (a bare number, a `Vec`, a slice, or an `ndarray` of any rank) and the
//! flat buffers consumed by physics kernels, and restore kernel results to
//! the caller's original form.
//!
//! Key behaviors
//! -------------
//! - [`Input`] is a tagged union `Scalar(f64) | Vector(Array1<f64>)`.
//!   Conversions from slices, vectors, and 1-D arrays all land in
//!   `Input::Vector`, so list-style and array-style callers are
//!   indistinguishable downstream.
//! - [`Input::from_dyn`] sniffs the rank of a dynamic array: rank 0 becomes a
//!   scalar, rank 1 a vector, and anything higher is rejected with
//!   [`ProfileError::RankTooHigh`].
//! - [`IntoInput`] is the fallible conversion used by model functions. It is
//!   implemented for plain numbers, vectors, slices, and `ndarray` arrays of
//!   every dimensionality, so a rank-2 array is a runtime `RankTooHigh`
//!   instead of a kernel call.
//! - [`normalize`] flattens an input into a contiguous buffer and remembers
//!   whether the caller passed a scalar; [`Normalized::restore`] unwraps a
//!   same-length kernel result back into [`Output`].
//!
//! Invariants & assumptions
//! ------------------------
//! - A normalized buffer of a scalar input always has length 1.
//! - Element order is the logical order of the caller's array, regardless of
//!   its memory layout.
//!
//! Testing notes
//! -------------
//! - Unit tests cover rank sniffing, the rank-2 rejection, list/array
//!   equivalence, and scalar unwrapping.
use crate::profiles::errors::{ProfileError, ProfileResult};
use ndarray::{Array1, ArrayBase, ArrayD, ArrayView1, Data, Dimension, Ix0, Ix1};

/// Caller-side distance, wavenumber, or mass argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Scalar(f64),
    Vector(Array1<f64>),
}

impl Input {
    /// Build an [`Input`] from an array of unknown rank.
    ///
    /// Parameters
    /// ----------
    /// - `name`: `&'static str`
    ///   Argument name used in the error message (e.g. `"R"`).
    /// - `values`: `ArrayD<f64>`
    ///   Caller array. Rank 0 is treated as a scalar and rank 1 as a vector.
    ///
    /// Errors
    /// ------
    /// - `ProfileError::RankTooHigh` when `values.ndim() > 1`. This holds even
    ///   for degenerate shapes such as `1×3`.
    pub fn from_dyn(name: &'static str, values: ArrayD<f64>) -> ProfileResult<Input> {
        let ndim = values.ndim();
        match ndim {
            0 => values
                .into_dimensionality::<Ix0>()
                .map(|a| Input::Scalar(a.into_scalar()))
                .map_err(|_| ProfileError::RankTooHigh { name, ndim }),
            1 => values
                .into_dimensionality::<Ix1>()
                .map(Input::Vector)
                .map_err(|_| ProfileError::RankTooHigh { name, ndim }),
            _ => Err(ProfileError::RankTooHigh { name, ndim }),
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Input::Scalar(_))
    }

    /// Number of values the kernel will see.
    pub fn len(&self) -> usize {
        match self {
            Input::Scalar(_) => 1,
            Input::Vector(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<f64> for Input {
    fn from(value: f64) -> Self {
        Input::Scalar(value)
    }
}

impl From<Array1<f64>> for Input {
    fn from(values: Array1<f64>) -> Self {
        Input::Vector(values)
    }
}

impl From<&Array1<f64>> for Input {
    fn from(values: &Array1<f64>) -> Self {
        Input::Vector(values.clone())
    }
}

impl From<ArrayView1<'_, f64>> for Input {
    fn from(values: ArrayView1<'_, f64>) -> Self {
        Input::Vector(values.to_owned())
    }
}

impl From<Vec<f64>> for Input {
    fn from(values: Vec<f64>) -> Self {
        Input::Vector(Array1::from(values))
    }
}

impl From<&Vec<f64>> for Input {
    fn from(values: &Vec<f64>) -> Self {
        Input::Vector(Array1::from(values.clone()))
    }
}

impl From<&[f64]> for Input {
    fn from(values: &[f64]) -> Self {
        Input::Vector(Array1::from(values.to_vec()))
    }
}

impl<const N: usize> From<[f64; N]> for Input {
    fn from(values: [f64; N]) -> Self {
        Input::Vector(Array1::from(values.to_vec()))
    }
}

impl TryFrom<ArrayD<f64>> for Input {
    type Error = ProfileError;

    fn try_from(values: ArrayD<f64>) -> ProfileResult<Self> {
        Input::from_dyn("input", values)
    }
}

/// Fallible conversion of a caller argument into an [`Input`].
///
/// `name` is the argument name reported by `ProfileError::RankTooHigh`.
pub trait IntoInput {
    fn into_input(self, name: &'static str) -> ProfileResult<Input>;
}

impl IntoInput for Input {
    fn into_input(self, _name: &'static str) -> ProfileResult<Input> {
        Ok(self)
    }
}

impl IntoInput for f64 {
    fn into_input(self, _name: &'static str) -> ProfileResult<Input> {
        Ok(Input::Scalar(self))
    }
}

impl IntoInput for Vec<f64> {
    fn into_input(self, _name: &'static str) -> ProfileResult<Input> {
        Ok(self.into())
    }
}

impl IntoInput for &Vec<f64> {
    fn into_input(self, _name: &'static str) -> ProfileResult<Input> {
        Ok(self.into())
    }
}

impl IntoInput for &[f64] {
    fn into_input(self, _name: &'static str) -> ProfileResult<Input> {
        Ok(self.into())
    }
}

impl<const N: usize> IntoInput for [f64; N] {
    fn into_input(self, _name: &'static str) -> ProfileResult<Input> {
        Ok(self.into())
    }
}

impl IntoInput for Output {
    fn into_input(self, _name: &'static str) -> ProfileResult<Input> {
        Ok(self.into())
    }
}

impl IntoInput for &Output {
    fn into_input(self, _name: &'static str) -> ProfileResult<Input> {
        Ok(self.into())
    }
}

impl<S, D> IntoInput for ArrayBase<S, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    fn into_input(self, name: &'static str) -> ProfileResult<Input> {
        (&self).into_input(name)
    }
}

impl<S, D> IntoInput for &ArrayBase<S, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    fn into_input(self, name: &'static str) -> ProfileResult<Input> {
        if self.ndim() > 1 {
            return Err(ProfileError::RankTooHigh { name, ndim: self.ndim() });
        }
        Input::from_dyn(name, self.to_owned().into_dyn())
    }
}

/// Flat kernel buffer plus the memory of whether the caller passed a scalar.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    values: Vec<f64>,
    was_scalar: bool,
}

impl Normalized {
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn was_scalar(&self) -> bool {
        self.was_scalar
    }

    /// Zeroed output buffer of the same length, for kernels to fill in place.
    pub fn output_buffer(&self) -> Vec<f64> {
        vec![0.0; self.values.len()]
    }

    /// Restore a kernel result to the caller's original form.
    ///
    /// Errors
    /// ------
    /// - `ProfileError::LengthMismatch` if `out` does not have the length of
    ///   the normalized input.
    pub fn restore(&self, out: Vec<f64>) -> ProfileResult<Output> {
        if out.len() != self.values.len() {
            return Err(ProfileError::LengthMismatch {
                name: "kernel output",
                expected: self.values.len(),
                actual: out.len(),
            });
        }
        match (self.was_scalar, out.first()) {
            (true, Some(&value)) => Ok(Output::Scalar(value)),
            _ => Ok(Output::Vector(Array1::from(out))),
        }
    }
}

/// Flatten an [`Input`] into a contiguous buffer.
///
/// A scalar becomes a length-1 buffer with `was_scalar = true`; a vector is
/// copied in logical order.
pub fn normalize(input: impl Into<Input>) -> Normalized {
    match input.into() {
        Input::Scalar(value) => Normalized { values: vec![value], was_scalar: true },
        Input::Vector(values) => Normalized { values: values.to_vec(), was_scalar: false },
    }
}

/// [`normalize`] for arguments whose rank is only known at runtime.
///
/// Errors
/// ------
/// - `ProfileError::RankTooHigh` for arrays with more than one dimension.
pub fn try_normalize(name: &'static str, input: impl IntoInput) -> ProfileResult<Normalized> {
    input.into_input(name).map(normalize)
}

/// Evaluated profile in the caller's original shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Scalar(f64),
    Vector(Array1<f64>),
}

impl Output {
    pub fn is_scalar(&self) -> bool {
        matches!(self, Output::Scalar(_))
    }

    pub fn scalar(&self) -> Option<f64> {
        match self {
            Output::Scalar(value) => Some(*value),
            Output::Vector(_) => None,
        }
    }

    pub fn vector(&self) -> Option<&Array1<f64>> {
        match self {
            Output::Scalar(_) => None,
            Output::Vector(values) => Some(values),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Output::Scalar(_) => 1,
            Output::Vector(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at position `index`; a scalar output answers only index 0.
    pub fn get(&self, index: usize) -> Option<f64> {
        match self {
            Output::Scalar(value) => (index == 0).then_some(*value),
            Output::Vector(values) => values.get(index).copied(),
        }
    }

    pub fn to_vec(&self) -> Vec<f64> {
        match self {
            Output::Scalar(value) => vec![*value],
            Output::Vector(values) => values.to_vec(),
        }
    }

    pub fn into_array(self) -> Array1<f64> {
        match self {
            Output::Scalar(value) => Array1::from(vec![value]),
            Output::Vector(values) => values,
        }
    }
}

impl From<Output> for Input {
    fn from(output: Output) -> Self {
        match output {
            Output::Scalar(value) => Input::Scalar(value),
            Output::Vector(values) => Input::Vector(values),
        }
    }
}

impl From<&Output> for Input {
    fn from(output: &Output) -> Self {
        output.clone().into()
    }
}
