//! halo_profiles — halo-profile boost factors and correlation functions for
//! cluster weak lensing, with optional Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! the profile model functions to Python via the `_halo_profiles` extension
//! module. When the `python-bindings` feature is enabled, this module defines
//! the Python-facing functions and submodules used by the `halo_profiles`
//! package.
//!
//! Key behaviors
//! -------------
//! - Re-export the profile layer ([`profiles`]) and the default pure-Rust
//!   numerical kernel ([`physics`]) as the public crate surface.
//! - Define `#[pyfunction]` wrappers and the `#[pymodule]` initializer for the
//!   `_halo_profiles` Python extension.
//! - Create and register Python submodules (`boostfactors`, `xi`,
//!   `peak_height`, `bias`, `massfunction`) under `halo_profiles` so that
//!   dot-notation imports work as expected.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner Rust modules; this file performs
//!   only FFI glue and error mapping.
//! - A Python float argument returns a Python float. A list, tuple, or 1-D
//!   array returns a 1-D `numpy.ndarray` of the same length.
//!
//! Conventions
//! -----------
//! - Python names keep the capitalisation used in the lensing literature
//!   (`boost_nfw_at_R`, `sigma2_at_M`, `xi_DK`, `G_at_sigma`, `dndM_at_M`).
//! - Errors from core Rust code are propagated as [`ProfileError`] and
//!   converted to `PyErr` at the PyO3 boundary: argument errors become
//!   `TypeError`, kernel failures `ArithmeticError`, and the rest
//!   `ValueError`.
//! - Parameters with defaults (`delta`, `rhos`, `alpha`, `beta`, `gamma`,
//!   `exact`, and the mass-function shape `d, e, f, g`) are keyword-only, so an
//!   extra positional argument raises `TypeError`.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend directly on [`profiles`] and can ignore
//!   the PyO3 items guarded by the `python-bindings` feature.
//! - The Python packaging layer imports `_halo_profiles` and re-exports its
//!   submodules.
//!
//! Testing notes
//! -------------
//! - Core behavior is covered by unit tests in the inner modules and by
//!   `tests/integration_profiles_pipeline.rs`.
//! - The PyO3 wrappers are exercised by `tests/python/test_bindings.py`.

pub mod physics;
pub mod profiles;
pub mod utils;

pub use physics::AnalyticKernel;
pub use profiles::{
    Combination, HaloProfiles, Input, Output, PhysicsKernel, ProfileError, ProfileResult,
};

#[cfg(feature = "python-bindings")]
use numpy::IntoPyArray;

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    profiles::{
        kernel::{MassTable, Spectrum},
        models::shared_profiles,
        options::{DkOptions, HaloOptions, MassFunctionParams, MatterOptions},
    },
    utils::{extract_input, extract_table, output_to_py},
};

// ---- Boost factors ----

/// NFW boost factor B(R) = 1 + B0 (1 − F(x)) / (x² − 1), x = R / R_scale.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "boost_nfw_at_R", text_signature = "(R, B0, R_scale)")]
fn py_boost_nfw_at_r<'py>(
    py: Python<'py>, r: &Bound<'py, PyAny>, b0: f64, r_scale: f64,
) -> PyResult<Bound<'py, PyAny>> {
    let r = extract_input("R", r)?;
    output_to_py(py, shared_profiles().boost_nfw_at_r(r, b0, r_scale)?)
}

/// Power-law boost factor B(R) = 1 + B0 (R / R_scale)^alpha.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "boost_powerlaw_at_R", text_signature = "(R, B0, R_scale, alpha)")]
fn py_boost_powerlaw_at_r<'py>(
    py: Python<'py>, r: &Bound<'py, PyAny>, b0: f64, r_scale: f64, alpha: f64,
) -> PyResult<Bound<'py, PyAny>> {
    let r = extract_input("R", r)?;
    output_to_py(py, shared_profiles().boost_powerlaw_at_r(r, b0, r_scale, alpha)?)
}

// ---- Correlation functions ----

/// NFW halo correlation function ξ(r) = ρ_NFW(r) / ρ_m − 1.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    name = "xi_nfw_at_r",
    text_signature = "(r, M, c, Omega_m, *, delta=200)",
    signature = (r, mass, conc, omega_m, *, delta = 200.0)
)]
fn py_xi_nfw_at_r<'py>(
    py: Python<'py>, r: &Bound<'py, PyAny>, mass: f64, conc: f64, omega_m: f64, delta: f64,
) -> PyResult<Bound<'py, PyAny>> {
    let r = extract_input("r", r)?;
    let options = HaloOptions::new(delta, None);
    output_to_py(py, shared_profiles().xi_nfw_at_r_with(r, mass, conc, omega_m, &options)?)
}

/// Einasto halo correlation function; `rhos=None` derives ρ_s from `M`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    name = "xi_einasto_at_r",
    text_signature = "(r, M, c, alpha, Omega_m, *, delta=200, rhos=None)",
    signature = (r, mass, conc, alpha, omega_m, *, delta = 200.0, rhos = None)
)]
#[allow(clippy::too_many_arguments)]
fn py_xi_einasto_at_r<'py>(
    py: Python<'py>, r: &Bound<'py, PyAny>, mass: f64, conc: f64, alpha: f64, omega_m: f64,
    delta: f64, rhos: Option<f64>,
) -> PyResult<Bound<'py, PyAny>> {
    let r = extract_input("r", r)?;
    let options = HaloOptions::new(delta, rhos);
    let out = shared_profiles().xi_einasto_at_r_with(r, mass, conc, alpha, omega_m, &options)?;
    output_to_py(py, out)
}

/// Matter correlation function from tabulated `k` and `P(k)`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    name = "xi_mm_at_r",
    text_signature = "(r, k, P, *, exact=False)",
    signature = (r, k, p, *, exact = false)
)]
fn py_xi_mm_at_r<'py>(
    py: Python<'py>, r: &Bound<'py, PyAny>, k: &Bound<'py, PyAny>, p: &Bound<'py, PyAny>,
    exact: bool,
) -> PyResult<Bound<'py, PyAny>> {
    let r = extract_input("r", r)?;
    let (k, p) = (extract_table("k", k)?, extract_table("P", p)?);
    let spectrum = Spectrum::new(&k, &p)?;
    output_to_py(py, shared_profiles().xi_mm_at_r(r, &spectrum, &MatterOptions::new(exact))?)
}

/// Two-halo term `bias * xi_mm`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "xi_2halo", text_signature = "(bias, xi_mm)")]
fn py_xi_2halo<'py>(
    py: Python<'py>, bias: f64, xi_mm: &Bound<'py, PyAny>,
) -> PyResult<Bound<'py, PyAny>> {
    let xi_mm = extract_input("xi_mm", xi_mm)?;
    output_to_py(py, shared_profiles().xi_2halo(bias, xi_mm)?)
}

/// Halo-model correlation from one-halo and two-halo terms.
///
/// `combination` is `"max"` (default) or `"sum"`; anything else raises
/// `ValueError`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    name = "xi_hm",
    text_signature = "(xi_1halo, xi_2halo, combination='max')",
    signature = (xi_1halo, xi_2halo, combination = None)
)]
fn py_xi_hm<'py>(
    py: Python<'py>, xi_1halo: &Bound<'py, PyAny>, xi_2halo: &Bound<'py, PyAny>,
    combination: Option<&str>,
) -> PyResult<Bound<'py, PyAny>> {
    let combination = Combination::from_name(combination)?;
    let one = extract_input("xi_1halo", xi_1halo)?;
    let two = extract_input("xi_2halo", xi_2halo)?;
    output_to_py(py, shared_profiles().xi_hm(one, two, combination)?)
}

/// Diemer–Kravtsov correlation function.
///
/// `alpha`, `beta`, `gamma` default to the peak-height calibration; `rhos`
/// defaults to the mass normalisation.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    name = "xi_DK",
    text_signature = "(r, M, c, be, se, k, P, Omega_m, *, delta=200, rhos=None, alpha=None, \
                      beta=None, gamma=None)",
    signature = (
        r, mass, conc, be, se, k, p, omega_m, *,
        delta = 200.0, rhos = None, alpha = None, beta = None, gamma = None
    )
)]
#[allow(clippy::too_many_arguments)]
fn py_xi_dk<'py>(
    py: Python<'py>, r: &Bound<'py, PyAny>, mass: f64, conc: f64, be: f64, se: f64,
    k: &Bound<'py, PyAny>, p: &Bound<'py, PyAny>, omega_m: f64, delta: f64,
    rhos: Option<f64>, alpha: Option<f64>, beta: Option<f64>, gamma: Option<f64>,
) -> PyResult<Bound<'py, PyAny>> {
    let r = extract_input("r", r)?;
    let (k, p) = (extract_table("k", k)?, extract_table("P", p)?);
    let spectrum = Spectrum::new(&k, &p)?;
    let options = DkOptions { delta, rhos, alpha, beta, gamma };
    output_to_py(py, shared_profiles().xi_dk(r, mass, conc, be, se, &spectrum, omega_m, &options)?)
}

// ---- Peak height ----

/// Top-hat variance σ²(R).
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "sigma2_at_R", text_signature = "(R, k, P)")]
fn py_sigma2_at_r<'py>(
    py: Python<'py>, r: &Bound<'py, PyAny>, k: &Bound<'py, PyAny>, p: &Bound<'py, PyAny>,
) -> PyResult<Bound<'py, PyAny>> {
    let r = extract_input("R", r)?;
    let (k, p) = (extract_table("k", k)?, extract_table("P", p)?);
    let spectrum = Spectrum::new(&k, &p)?;
    output_to_py(py, shared_profiles().sigma2_at_r(r, &spectrum)?)
}

/// Top-hat variance σ²(M) at the Lagrangian radius of `M`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "sigma2_at_M", text_signature = "(M, k, P, Omega_m)")]
fn py_sigma2_at_m<'py>(
    py: Python<'py>, mass: &Bound<'py, PyAny>, k: &Bound<'py, PyAny>, p: &Bound<'py, PyAny>,
    omega_m: f64,
) -> PyResult<Bound<'py, PyAny>> {
    let mass = extract_input("M", mass)?;
    let (k, p) = (extract_table("k", k)?, extract_table("P", p)?);
    let spectrum = Spectrum::new(&k, &p)?;
    output_to_py(py, shared_profiles().sigma2_at_m(mass, &spectrum, omega_m)?)
}

/// Peak height ν(R) = δ_c / σ(R).
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "nu_at_R", text_signature = "(R, k, P)")]
fn py_nu_at_r<'py>(
    py: Python<'py>, r: &Bound<'py, PyAny>, k: &Bound<'py, PyAny>, p: &Bound<'py, PyAny>,
) -> PyResult<Bound<'py, PyAny>> {
    let r = extract_input("R", r)?;
    let (k, p) = (extract_table("k", k)?, extract_table("P", p)?);
    let spectrum = Spectrum::new(&k, &p)?;
    output_to_py(py, shared_profiles().nu_at_r(r, &spectrum)?)
}

/// Peak height ν(M) = δ_c / σ(M).
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "nu_at_M", text_signature = "(M, k, P, Omega_m)")]
fn py_nu_at_m<'py>(
    py: Python<'py>, mass: &Bound<'py, PyAny>, k: &Bound<'py, PyAny>, p: &Bound<'py, PyAny>,
    omega_m: f64,
) -> PyResult<Bound<'py, PyAny>> {
    let mass = extract_input("M", mass)?;
    let (k, p) = (extract_table("k", k)?, extract_table("P", p)?);
    let spectrum = Spectrum::new(&k, &p)?;
    output_to_py(py, shared_profiles().nu_at_m(mass, &spectrum, omega_m)?)
}

// ---- Bias ----

/// Tinker et al. (2010) halo bias at peak height `nu`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "bias_at_nu", text_signature = "(nu, *, delta=200)", signature = (nu, *, delta = 200.0))]
fn py_bias_at_nu<'py>(
    py: Python<'py>, nu: &Bound<'py, PyAny>, delta: f64,
) -> PyResult<Bound<'py, PyAny>> {
    let nu = extract_input("nu", nu)?;
    output_to_py(py, shared_profiles().bias_at_nu(nu, delta)?)
}

/// Tinker et al. (2010) halo bias at mass `M`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    name = "bias_at_M",
    text_signature = "(M, k, P, Omega_m, *, delta=200)",
    signature = (mass, k, p, omega_m, *, delta = 200.0)
)]
fn py_bias_at_m<'py>(
    py: Python<'py>, mass: &Bound<'py, PyAny>, k: &Bound<'py, PyAny>, p: &Bound<'py, PyAny>,
    omega_m: f64, delta: f64,
) -> PyResult<Bound<'py, PyAny>> {
    let mass = extract_input("M", mass)?;
    let (k, p) = (extract_table("k", k)?, extract_table("P", p)?);
    let spectrum = Spectrum::new(&k, &p)?;
    output_to_py(py, shared_profiles().bias_at_m(mass, &spectrum, omega_m, delta)?)
}

// ---- Mass function ----

/// Multiplicity function G(σ); the shape defaults to Tinker et al. (2008).
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    name = "G_at_sigma",
    text_signature = "(sigma, *, d=1.97, e=1.0, f=0.51, g=1.228)",
    signature = (sigma, *, d = 1.97, e = 1.0, f = 0.51, g = 1.228)
)]
fn py_g_at_sigma<'py>(
    py: Python<'py>, sigma: &Bound<'py, PyAny>, d: f64, e: f64, f: f64, g: f64,
) -> PyResult<Bound<'py, PyAny>> {
    let sigma = extract_input("sigma", sigma)?;
    let params = MassFunctionParams::new(d, e, f, g);
    output_to_py(py, shared_profiles().g_at_sigma(sigma, &params)?)
}

/// Multiplicity function G(σ(M)).
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    name = "G_at_M",
    text_signature = "(M, k, P, Omega_m, *, d=1.97, e=1.0, f=0.51, g=1.228)",
    signature = (mass, k, p, omega_m, *, d = 1.97, e = 1.0, f = 0.51, g = 1.228)
)]
#[allow(clippy::too_many_arguments)]
fn py_g_at_m<'py>(
    py: Python<'py>, mass: &Bound<'py, PyAny>, k: &Bound<'py, PyAny>, p: &Bound<'py, PyAny>,
    omega_m: f64, d: f64, e: f64, f: f64, g: f64,
) -> PyResult<Bound<'py, PyAny>> {
    let mass = extract_input("M", mass)?;
    let (k, p) = (extract_table("k", k)?, extract_table("P", p)?);
    let spectrum = Spectrum::new(&k, &p)?;
    let params = MassFunctionParams::new(d, e, f, g);
    output_to_py(py, shared_profiles().g_at_m(mass, &spectrum, omega_m, &params)?)
}

/// Differential mass function dn/dM.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    name = "dndM_at_M",
    text_signature = "(M, k, P, Omega_m, *, d=1.97, e=1.0, f=0.51, g=1.228)",
    signature = (mass, k, p, omega_m, *, d = 1.97, e = 1.0, f = 0.51, g = 1.228)
)]
#[allow(clippy::too_many_arguments)]
fn py_dndm_at_m<'py>(
    py: Python<'py>, mass: &Bound<'py, PyAny>, k: &Bound<'py, PyAny>, p: &Bound<'py, PyAny>,
    omega_m: f64, d: f64, e: f64, f: f64, g: f64,
) -> PyResult<Bound<'py, PyAny>> {
    let mass = extract_input("M", mass)?;
    let (k, p) = (extract_table("k", k)?, extract_table("P", p)?);
    let spectrum = Spectrum::new(&k, &p)?;
    let params = MassFunctionParams::new(d, e, f, g);
    output_to_py(py, shared_profiles().dndm_at_m(mass, &spectrum, omega_m, &params)?)
}

/// Halo number densities in consecutive mass bins given by `edges`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "n_in_bins", text_signature = "(edges, Marr, dndM)")]
fn py_n_in_bins<'py>(
    py: Python<'py>, edges: &Bound<'py, PyAny>, masses: &Bound<'py, PyAny>,
    dndm: &Bound<'py, PyAny>,
) -> PyResult<Bound<'py, PyAny>> {
    let edges = extract_input("edges", edges)?;
    let (masses, dndm) = (extract_table("Marr", masses)?, extract_table("dndM", dndm)?);
    let table = MassTable::new(&masses, &dndm)?;
    Ok(shared_profiles().n_in_bins(edges, &table)?.into_pyarray(py).into_any())
}

/// Halo number density between `Mlow` and `Mhigh`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "n_in_bin", text_signature = "(Mlow, Mhigh, Marr, dndM)")]
fn py_n_in_bin<'py>(
    lo: f64, hi: f64, masses: &Bound<'py, PyAny>, dndm: &Bound<'py, PyAny>,
) -> PyResult<f64> {
    let (masses, dndm) = (extract_table("Marr", masses)?, extract_table("dndM", dndm)?);
    let table = MassTable::new(&masses, &dndm)?;
    Ok(shared_profiles().n_in_bin(lo, hi, &table)?)
}

/// Initializer for the `_halo_profiles` extension module.
///
/// Notes
/// -----
/// - Invoked by Python when importing the compiled extension; it is not
///   called directly by user code.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _halo_profiles<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let boostfactors_mod = PyModule::new(_py, "boostfactors")?;
    let xi_mod = PyModule::new(_py, "xi")?;
    let peak_height_mod = PyModule::new(_py, "peak_height")?;
    let bias_mod = PyModule::new(_py, "bias")?;
    let massfunction_mod = PyModule::new(_py, "massfunction")?;
    boostfactors(_py, m, &boostfactors_mod)?;
    xi(_py, m, &xi_mod)?;
    peak_height(_py, m, &peak_height_mod)?;
    bias(_py, m, &bias_mod)?;
    massfunction(_py, m, &massfunction_mod)?;

    // Manually add submodules into sys.modules to allow for dot notation.
    let modules = _py.import("sys")?.getattr("modules")?;
    modules.set_item("halo_profiles.boostfactors", boostfactors_mod)?;
    modules.set_item("halo_profiles.xi", xi_mod)?;
    modules.set_item("halo_profiles.peak_height", peak_height_mod)?;
    modules.set_item("halo_profiles.bias", bias_mod)?;
    modules.set_item("halo_profiles.massfunction", massfunction_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn boostfactors<'py>(
    _py: Python, halo_profiles: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_boost_nfw_at_r, m)?)?;
    m.add_function(wrap_pyfunction!(py_boost_powerlaw_at_r, m)?)?;
    halo_profiles.add_submodule(m)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn xi<'py>(
    _py: Python, halo_profiles: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_xi_nfw_at_r, m)?)?;
    m.add_function(wrap_pyfunction!(py_xi_einasto_at_r, m)?)?;
    m.add_function(wrap_pyfunction!(py_xi_mm_at_r, m)?)?;
    m.add_function(wrap_pyfunction!(py_xi_2halo, m)?)?;
    m.add_function(wrap_pyfunction!(py_xi_hm, m)?)?;
    m.add_function(wrap_pyfunction!(py_xi_dk, m)?)?;
    halo_profiles.add_submodule(m)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn peak_height<'py>(
    _py: Python, halo_profiles: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_sigma2_at_r, m)?)?;
    m.add_function(wrap_pyfunction!(py_sigma2_at_m, m)?)?;
    m.add_function(wrap_pyfunction!(py_nu_at_r, m)?)?;
    m.add_function(wrap_pyfunction!(py_nu_at_m, m)?)?;
    halo_profiles.add_submodule(m)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn bias<'py>(
    _py: Python, halo_profiles: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_bias_at_nu, m)?)?;
    m.add_function(wrap_pyfunction!(py_bias_at_m, m)?)?;
    halo_profiles.add_submodule(m)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn massfunction<'py>(
    _py: Python, halo_profiles: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_g_at_sigma, m)?)?;
    m.add_function(wrap_pyfunction!(py_g_at_m, m)?)?;
    m.add_function(wrap_pyfunction!(py_dndm_at_m, m)?)?;
    m.add_function(wrap_pyfunction!(py_n_in_bins, m)?)?;
    m.add_function(wrap_pyfunction!(py_n_in_bin, m)?)?;
    halo_profiles.add_submodule(m)?;
    Ok(())
}
