//! physics — the default pure-Rust physics kernel.
//!
//! Purpose
//! -------
//! Provide [`AnalyticKernel`], an implementation of
//! [`PhysicsKernel`](crate::profiles::kernel::PhysicsKernel) that evaluates
//! every entry point from closed forms and fixed-node Gauss–Legendre
//! integrals, so the crate is usable without a compiled numerical library.
//!
//! Key behaviors
//! -------------
//! - Each [`KernelCall`] variant is routed to one function in
//!   [`boost`], [`density`], [`matter`], [`bias`] or [`mass_function`].
//! - Numerical domain problems (non-positive power spectrum, invalid Einasto
//!   shape, bins outside a table) surface as
//!   `ProfileError::KernelFailure` tagged with the entry-point name.
//!
//! Invariants & assumptions
//! ------------------------
//! - The kernel holds only immutable quadrature rules; it is `Send + Sync`
//!   and reentrant.
//! - Every output element depends only on its own input element and the
//!   call parameters, so results do not depend on how inputs are batched.
//!
//! Conventions
//! -----------
//! - ρ_crit = 2.77533742639e11 h² M☉/Mpc³ and ρ_m = Ω_m ρ_crit.
//! - Overdensities Δ are relative to the mean matter density.
pub mod bias;
pub mod boost;
pub mod density;
pub mod interpolation;
pub mod mass_function;
pub mod matter;
pub mod quadrature;

use crate::profiles::{
    errors::{ProfileError, ProfileResult},
    kernel::{Abscissa, KernelCall, PhysicsKernel, Spectrum},
};
use interpolation::LogLogSpectrum;
use quadrature::GaussLegendre;
use std::sync::OnceLock;

/// Critical density of the universe in h² M☉/Mpc³.
pub const RHO_CRIT: f64 = 2.775_337_426_39e11;

/// Linear collapse threshold.
pub const DELTA_C: f64 = 1.686;

/// Mean matter density ρ_m = Ω_m ρ_crit.
pub fn mean_matter_density(omega_m: f64) -> f64 {
    omega_m * RHO_CRIT
}

/// Pure-Rust physics kernel.
///
/// Holds an 8-point rule for the fixed-panel integrals and a 16-point rule
/// for the oscillation-resolved ξ_mm path.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticKernel {
    coarse: GaussLegendre,
    fine: GaussLegendre,
}

impl AnalyticKernel {
    pub fn new() -> Self {
        AnalyticKernel { coarse: GaussLegendre::new(8), fine: GaussLegendre::new(16) }
    }

    /// Process-wide shared instance used by the crate-level free functions.
    pub fn shared() -> &'static AnalyticKernel {
        static SHARED: OnceLock<AnalyticKernel> = OnceLock::new();
        SHARED.get_or_init(AnalyticKernel::new)
    }
}

impl Default for AnalyticKernel {
    fn default() -> Self {
        AnalyticKernel::new()
    }
}

impl PhysicsKernel for AnalyticKernel {
    fn evaluate(
        &self, call: &KernelCall<'_>, input: &[f64], out: &mut [f64],
    ) -> ProfileResult<()> {
        let fail = |reason: String| ProfileError::KernelFailure { entry: call.name(), reason };

        match *call {
            KernelCall::BoostNfw { b0, r_scale } => boost::boost_nfw(input, b0, r_scale, out),
            KernelCall::BoostPowerlaw { b0, r_scale, alpha } => {
                boost::boost_powerlaw(input, b0, r_scale, alpha, out)
            }
            KernelCall::XiNfw { mass, conc, delta, omega_m } => {
                density::xi_nfw(input, mass, conc, delta, omega_m, out)
            }
            KernelCall::XiEinasto { mass, conc, alpha, delta, rhos, omega_m } => {
                density::xi_einasto(input, mass, conc, alpha, delta, rhos, omega_m, out)
                    .map_err(fail)?
            }
            KernelCall::XiMatter { spectrum, exact } => {
                let spectrum = load(spectrum).map_err(fail)?;
                for (o, &r) in out.iter_mut().zip(input) {
                    *o = if exact {
                        matter::xi_mm_exact(&spectrum, &self.fine, r).map_err(fail)?
                    } else {
                        matter::xi_mm_approx(&spectrum, &self.coarse, r).map_err(fail)?
                    };
                }
            }
            KernelCall::XiDk { mass, conc, be, se, spectrum, omega_m, options } => {
                let spectrum = load(spectrum).map_err(fail)?;
                let sigma = matter::sigma_at_mass(&spectrum, &self.coarse, mass, omega_m);
                let nu = DELTA_C / sigma;
                let shape = density::DkShape::resolve(
                    mass,
                    conc,
                    nu,
                    options.delta,
                    omega_m,
                    options.rhos,
                    options.alpha,
                    options.beta,
                    options.gamma,
                )
                .map_err(fail)?;
                density::xi_dk(input, &shape, be, se, omega_m, out);
            }
            KernelCall::Sigma2 { spectrum, abscissa } => {
                let spectrum = load(spectrum).map_err(fail)?;
                for (o, &x) in out.iter_mut().zip(input) {
                    *o = matter::sigma2(&spectrum, &self.coarse, to_radius(x, abscissa));
                }
            }
            KernelCall::PeakHeight { spectrum, abscissa } => {
                let spectrum = load(spectrum).map_err(fail)?;
                for (o, &x) in out.iter_mut().zip(input) {
                    let s2 = matter::sigma2(&spectrum, &self.coarse, to_radius(x, abscissa));
                    *o = matter::peak_height(s2);
                }
            }
            KernelCall::Bias { delta } => {
                for (o, &nu) in out.iter_mut().zip(input) {
                    *o = bias::bias_tinker10(nu, delta);
                }
            }
            KernelCall::Multiplicity { params } => mass_function::multiplicity(input, &params, out),
            KernelCall::MassFunction { spectrum, omega_m, params } => {
                let spectrum = load(spectrum).map_err(fail)?;
                mass_function::dndm(input, &spectrum, &self.coarse, omega_m, &params, out);
            }
            KernelCall::BinCounts { upper, table } => {
                mass_function::bin_counts(input, upper, table.masses, table.dndm, out)
                    .map_err(fail)?
            }
        }
        Ok(())
    }
}

fn load(spectrum: Spectrum<'_>) -> Result<LogLogSpectrum, String> {
    LogLogSpectrum::new(spectrum.k, spectrum.p)
}

fn to_radius(x: f64, abscissa: Abscissa) -> f64 {
    match abscissa {
        Abscissa::Radius => x,
        Abscissa::Mass { omega_m } => matter::lagrangian_radius(x, omega_m),
    }
}
