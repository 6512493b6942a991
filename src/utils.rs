//! utils — conversion helpers between Python objects and profile inputs.
//!
//! Purpose
//! -------
//! Keep the PyO3 glue in `lib.rs` thin: every Python argument that may be a
//! number, a sequence, or a NumPy array is turned into an [`Input`] here, and
//! every [`Output`] is turned back into a Python float or a NumPy array.
//!
//! Conventions
//! -----------
//! - Candidates are tried as array, then sequence, then scalar. A size-1
//!   array stays a 1-element array and never collapses to a float.
//! - Rank is checked before any copy into a flat buffer; arrays with more
//!   than one dimension are rejected with `ProfileError::RankTooHigh`.
//! - Objects that are neither numbers nor numeric sequences raise
//!   `TypeError` through `ProfileError::InvalidArgumentType`.
//! - Everything in this module is compiled only with `python-bindings`.

#[cfg(feature = "python-bindings")]
use pyo3::{
    prelude::*,
    types::{PyAny, PyFloat},
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray, // Array1 → PyArray
    PyReadonlyArrayDyn,
    PyUntypedArrayMethods, // .ndim()
};

#[cfg(feature = "python-bindings")]
use crate::profiles::{
    errors::ProfileError,
    shape::{Input, IntoInput, Output},
};

#[cfg(feature = "python-bindings")]
const EXPECTED_NUMERIC: &str = "a float, a sequence of floats, or a 0-d/1-d float64 numpy.ndarray";

/// Convert a Python argument into an [`Input`].
///
/// Parameters
/// ----------
/// - `name`: `&'static str`
///   Python-facing argument name, used in error messages.
/// - `raw`: `&Bound<PyAny>`
///   A float, a numeric sequence, a NumPy array, or a pandas Series.
///
/// Returns
/// -------
/// `PyResult<Input>`
///   `Input::Scalar` for Python and NumPy scalars and 0-d arrays;
///   `Input::Vector` for sequences and 1-d arrays.
///
/// Errors
/// ------
/// - `ValueError` (via `ProfileError::RankTooHigh`) for arrays or nested
///   sequences with two or more dimensions.
/// - `TypeError` (via `ProfileError::InvalidArgumentType`) for anything else.
#[cfg(feature = "python-bindings")]
pub fn extract_input<'py>(name: &'static str, raw: &Bound<'py, PyAny>) -> PyResult<Input> {
    if let Ok(arr_ro) = raw.extract::<PyReadonlyArrayDyn<f64>>() {
        if arr_ro.ndim() > 1 {
            return Err(ProfileError::RankTooHigh { name, ndim: arr_ro.ndim() }.into());
        }
        return Ok(arr_ro.as_array().into_input(name)?);
    }

    // Non-float64 arrays and anything else exposing `ndim`.
    let ndim = raw.getattr("ndim").and_then(|d| d.extract::<usize>()).ok();
    if let Some(ndim) = ndim.filter(|&d| d > 1) {
        return Err(ProfileError::RankTooHigh { name, ndim }.into());
    }

    if let Ok(obj) = raw.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArrayDyn<f64>>() {
            return Ok(series_ro.as_array().into_input(name)?);
        }
    }

    if let Ok(values) = raw.extract::<Vec<f64>>() {
        return Ok(Input::from(values));
    }

    if raw.extract::<Vec<Vec<f64>>>().is_ok() {
        return Err(ProfileError::RankTooHigh { name, ndim: 2 }.into());
    }

    // Only true scalars reach this point; size-1 arrays were handled above.
    if ndim.unwrap_or(0) == 0 {
        if let Ok(value) = raw.extract::<f64>() {
            return Ok(Input::Scalar(value));
        }
    }

    Err(ProfileError::InvalidArgumentType { name, expected: EXPECTED_NUMERIC }.into())
}

/// Convert a Python table argument (`k`, `P`, `Marr`, `dndM`) into a `Vec<f64>`.
///
/// Scalars become one-element tables; the kernel decides whether that is
/// enough knots.
#[cfg(feature = "python-bindings")]
pub fn extract_table<'py>(name: &'static str, raw: &Bound<'py, PyAny>) -> PyResult<Vec<f64>> {
    match extract_input(name, raw)? {
        Input::Scalar(value) => Ok(vec![value]),
        Input::Vector(values) => Ok(values.to_vec()),
    }
}

/// Convert an [`Output`] into a Python float or a 1-d NumPy array.
#[cfg(feature = "python-bindings")]
pub fn output_to_py<'py>(py: Python<'py>, out: Output) -> PyResult<Bound<'py, PyAny>> {
    match out {
        Output::Scalar(value) => Ok(PyFloat::new(py, value).into_any()),
        Output::Vector(values) => Ok(values.into_pyarray(py).into_any()),
    }
}
