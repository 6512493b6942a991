//! physics::mass_function — Tinker-style halo mass function and binned counts.
//!
//! Purpose
//! -------
//! Evaluate the multiplicity G(σ), the differential mass function dn/dM and
//! the number density of halos in mass bins.
//!
//! Key behaviors
//! -------------
//! - [`multiplicity`] uses the four-parameter form
//!   G = B e^{−g/σ²}((σ/e)^{−d} + σ^{−f}), with B fixed so that
//!   ∫ G d ln σ⁻¹ = 1.
//! - [`dndm`] differentiates ln σ⁻¹ with a central difference of relative
//!   step [`MASS_STEP`].
//! - [`bin_counts`] integrates a monotone cubic interpolant of a caller
//!   supplied dn/dM table, so bins never pick up spurious overshoot.
//!
//! Conventions
//! -----------
//! - Masses in M☉/h, number densities in (h/Mpc)³.
use crate::{
    physics::{
        interpolation::{LogLogSpectrum, MonotoneCubic},
        matter::sigma_at_mass,
        mean_matter_density,
        quadrature::GaussLegendre,
    },
    profiles::options::MassFunctionParams,
};
use statrs::function::gamma::gamma;

/// Relative mass step of the central difference in [`dndm`].
pub const MASS_STEP: f64 = 1e-8;

/// Normalisation B such that ∫ G d ln σ⁻¹ = 1.
pub fn normalization(params: &MassFunctionParams) -> f64 {
    let MassFunctionParams { d, e, f, g } = *params;
    2.0 / (e.powf(d) * g.powf(-d / 2.0) * gamma(d / 2.0) + g.powf(-f / 2.0) * gamma(f / 2.0))
}

/// G(σ) at every σ.
pub fn multiplicity(sigmas: &[f64], params: &MassFunctionParams, out: &mut [f64]) {
    let norm = normalization(params);
    for (o, &sigma) in out.iter_mut().zip(sigmas) {
        *o = multiplicity_at(sigma, params, norm);
    }
}

fn multiplicity_at(sigma: f64, params: &MassFunctionParams, norm: f64) -> f64 {
    let MassFunctionParams { d, e, f, g } = *params;
    norm * (-g / (sigma * sigma)).exp() * ((sigma / e).powf(-d) + sigma.powf(-f))
}

/// dn/dM at every mass.
pub fn dndm(
    masses: &[f64], spectrum: &LogLogSpectrum, rule: &GaussLegendre, omega_m: f64,
    params: &MassFunctionParams, out: &mut [f64],
) {
    let rho_m = mean_matter_density(omega_m);
    let norm = normalization(params);
    for (o, &mass) in out.iter_mut().zip(masses) {
        let dm = MASS_STEP * mass;
        let sigma = sigma_at_mass(spectrum, rule, mass, omega_m);
        let sigma_lo = sigma_at_mass(spectrum, rule, mass - 0.5 * dm, omega_m);
        let sigma_hi = sigma_at_mass(spectrum, rule, mass + 0.5 * dm, omega_m);
        let dln_inv_sigma_dm = (sigma_lo / sigma_hi).ln() / dm;
        *o = multiplicity_at(sigma, params, norm) * rho_m / mass * dln_inv_sigma_dm;
    }
}

/// Number density of halos between each `lower[i]` and `upper[i]`.
///
/// Errors
/// ------
/// - When the table is not a valid interpolation grid (fewer than two
///   points, non-increasing masses, non-finite values).
/// - When a bin reaches outside the tabulated mass range.
pub fn bin_counts(
    lower: &[f64], upper: &[f64], masses: &[f64], dndm: &[f64], out: &mut [f64],
) -> Result<(), String> {
    let spline = MonotoneCubic::new(masses, dndm)?;
    for ((o, &lo), &hi) in out.iter_mut().zip(lower).zip(upper) {
        *o = spline.integrate(lo, hi)?;
    }
    Ok(())
}
