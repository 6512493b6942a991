//! physics::density — halo density profiles and their correlation functions.
//!
//! Purpose
//! -------
//! Evaluate the 3-D halo-matter correlation ξ(r) = ρ(r)/ρ_m − 1 for the NFW,
//! Einasto and Diemer–Kravtsov profiles, with the scale density fixed by
//! requiring M(<R_Δ) = M unless the caller supplies ρ_s.
//!
//! Conventions
//! -----------
//! - Radii in Mpc/h, masses in M☉/h, densities in h² M☉/Mpc³.
//! - R_Δ is defined against the mean matter density: M = (4π/3) Δ ρ_m R_Δ³.
//! - At fixed concentration ρ_s does not depend on M while r_s grows with M,
//!   so both NFW and Einasto ξ(r) increase strictly with mass at any r > 0.
use crate::physics::mean_matter_density;
use statrs::function::gamma::{checked_gamma_lr, gamma};
use std::f64::consts::PI;

/// Halo radius R_Δ enclosing mean overdensity `delta` relative to ρ_m.
pub fn radius_delta(mass: f64, delta: f64, omega_m: f64) -> f64 {
    let rho_m = mean_matter_density(omega_m);
    (3.0 * mass / (4.0 * PI * delta * rho_m)).cbrt()
}

/// NFW ρ_s such that the profile encloses `mass` within `conc · r_s`.
pub fn nfw_scale_density(mass: f64, r_scale: f64, conc: f64) -> f64 {
    let m_c = (1.0 + conc).ln() - conc / (1.0 + conc);
    mass / (4.0 * PI * r_scale.powi(3) * m_c)
}

/// ξ_NFW at every radius.
pub fn xi_nfw(radii: &[f64], mass: f64, conc: f64, delta: f64, omega_m: f64, out: &mut [f64]) {
    let rho_m = mean_matter_density(omega_m);
    let r_scale = radius_delta(mass, delta, omega_m) / conc;
    let rho_s = nfw_scale_density(mass, r_scale, conc);
    for (o, &r) in out.iter_mut().zip(radii) {
        let x = r / r_scale;
        *o = rho_s / (x * (1.0 + x) * (1.0 + x)) / rho_m - 1.0;
    }
}

/// Einasto ρ_s such that M(<R_Δ) = `mass`.
///
/// Errors
/// ------
/// - When `alpha` or `conc` is not a positive finite number.
/// - When the incomplete-gamma argument (2/α)·c^α overflows or underflows,
///   or the resulting ρ_s is not a positive finite number.
pub fn einasto_scale_density(
    mass: f64, r_scale: f64, conc: f64, alpha: f64,
) -> Result<f64, String> {
    if !(alpha.is_finite() && alpha > 0.0) {
        return Err(format!("Einasto alpha must be positive and finite, got {alpha}"));
    }
    if !(conc.is_finite() && conc > 0.0) {
        return Err(format!("concentration must be positive and finite, got {conc}"));
    }
    let a = 3.0 / alpha;
    let x = 2.0 / alpha * conc.powf(alpha);
    if !(x.is_finite() && x > 0.0) {
        return Err(format!(
            "Einasto normalisation argument (2/alpha) c^alpha = {x} is out of range \
             (alpha = {alpha}, c = {conc})"
        ));
    }
    let regularized = checked_gamma_lr(a, x)
        .map_err(|err| format!("incomplete gamma at a = {a}, x = {x}: {err}"))?;
    let lower_gamma = regularized * gamma(a);
    let volume = 4.0 * PI * r_scale.powi(3) * (2.0 / alpha).exp() / alpha
        * (alpha / 2.0).powf(3.0 / alpha)
        * lower_gamma;
    let rho_s = mass / volume;
    if !(rho_s.is_finite() && rho_s > 0.0) {
        return Err(format!(
            "Einasto scale density is not positive and finite (alpha = {alpha}, c = {conc})"
        ));
    }
    Ok(rho_s)
}

/// Einasto density at `r`.
pub fn einasto_density(r: f64, rho_s: f64, r_scale: f64, alpha: f64) -> f64 {
    rho_s * (-2.0 / alpha * ((r / r_scale).powf(alpha) - 1.0)).exp()
}

/// ξ_Einasto at every radius; a supplied `rhos` overrides the mass normalisation.
#[allow(clippy::too_many_arguments)]
pub fn xi_einasto(
    radii: &[f64], mass: f64, conc: f64, alpha: f64, delta: f64, rhos: Option<f64>,
    omega_m: f64, out: &mut [f64],
) -> Result<(), String> {
    let rho_m = mean_matter_density(omega_m);
    let r_scale = radius_delta(mass, delta, omega_m) / conc;
    let rho_s = match rhos {
        Some(value) => value,
        None => einasto_scale_density(mass, r_scale, conc, alpha)?,
    };
    for (o, &r) in out.iter_mut().zip(radii) {
        *o = einasto_density(r, rho_s, r_scale, alpha) / rho_m - 1.0;
    }
    Ok(())
}

/// Resolved Diemer–Kravtsov shape for one halo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DkShape {
    pub rho_s: f64,
    pub r_scale: f64,
    pub r_delta: f64,
    pub r_trunc: f64,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl DkShape {
    /// Fill in the ν-calibrated defaults for any shape parameter left as `None`.
    #[allow(clippy::too_many_arguments)]
    pub fn resolve(
        mass: f64, conc: f64, nu: f64, delta: f64, omega_m: f64, rhos: Option<f64>,
        alpha: Option<f64>, beta: Option<f64>, gamma: Option<f64>,
    ) -> Result<Self, String> {
        let alpha = alpha.unwrap_or(0.155 + 0.0095 * nu * nu);
        let r_delta = radius_delta(mass, delta, omega_m);
        let r_scale = r_delta / conc;
        let rho_s = match rhos {
            Some(value) => value,
            None => einasto_scale_density(mass, r_scale, conc, alpha)?,
        };
        Ok(DkShape {
            rho_s,
            r_scale,
            r_delta,
            r_trunc: (1.9 - 0.18 * nu) * r_delta,
            alpha,
            beta: beta.unwrap_or(4.0),
            gamma: gamma.unwrap_or(8.0),
        })
    }
}

/// ξ_DK at every radius: truncated Einasto inner profile plus a power-law
/// outer term with amplitude `be` and slope `se`.
pub fn xi_dk(radii: &[f64], shape: &DkShape, be: f64, se: f64, omega_m: f64, out: &mut [f64]) {
    let rho_m = mean_matter_density(omega_m);
    let r_pivot = 5.0 * shape.r_delta;
    for (o, &r) in out.iter_mut().zip(radii) {
        let rho_inner = einasto_density(r, shape.rho_s, shape.r_scale, shape.alpha);
        let f_trans =
            (1.0 + (r / shape.r_trunc).powf(shape.beta)).powf(-shape.gamma / shape.beta);
        let rho_outer = rho_m * (be * (r / r_pivot).powf(-se) + 1.0);
        *o = (rho_inner * f_trans + rho_outer) / rho_m - 1.0;
    }
}
