//! profiles::dispatch — runtime model selection with flat parameter vectors.
//!
//! Purpose
//! -------
//! Let a likelihood loop pick a profile model by name and evaluate it with a
//! parameter vector whose length is only known at runtime. This is where
//! wrong-arity calls surface as `ProfileError::ArityMismatch`.
//!
//! Conventions
//! -----------
//! - Parameter order follows the model functions, after the radius argument:
//!   - `boost_nfw`: `[b0, r_scale]`
//!   - `boost_powerlaw`: `[b0, r_scale, alpha]`
//!   - `xi_nfw`: `[mass, conc, omega_m]`
//!   - `xi_einasto`: `[mass, conc, alpha, omega_m]`
//! - Names parse case-insensitively; `_at_r` suffixes are accepted.
use crate::profiles::{
    errors::{ProfileError, ProfileResult},
    kernel::PhysicsKernel,
    models::HaloProfiles,
    shape::{IntoInput, Output},
    validation::check_arity,
};
use std::str::FromStr;

/// Profile models selectable at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileModel {
    BoostNfw,
    BoostPowerlaw,
    XiNfw,
    XiEinasto,
}

impl ProfileModel {
    pub const ALL: [ProfileModel; 4] = [
        ProfileModel::BoostNfw,
        ProfileModel::BoostPowerlaw,
        ProfileModel::XiNfw,
        ProfileModel::XiEinasto,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ProfileModel::BoostNfw => "boost_nfw",
            ProfileModel::BoostPowerlaw => "boost_powerlaw",
            ProfileModel::XiNfw => "xi_nfw",
            ProfileModel::XiEinasto => "xi_einasto",
        }
    }

    /// Number of scalar parameters after the radius argument.
    pub fn arity(&self) -> usize {
        match self {
            ProfileModel::BoostNfw => 2,
            ProfileModel::BoostPowerlaw => 3,
            ProfileModel::XiNfw => 3,
            ProfileModel::XiEinasto => 4,
        }
    }

    /// Evaluate the model at `r` with a flat parameter vector.
    ///
    /// Errors
    /// ------
    /// - `ProfileError::ArityMismatch` when `params.len() != self.arity()`,
    ///   raised before the radius is inspected or the kernel is called.
    /// - Any error of the underlying model function.
    pub fn evaluate<K: PhysicsKernel>(
        &self, profiles: &HaloProfiles<K>, r: impl IntoInput, params: &[f64],
    ) -> ProfileResult<Output> {
        check_arity(self.name(), self.arity(), params)?;
        match *self {
            ProfileModel::BoostNfw => profiles.boost_nfw_at_r(r, params[0], params[1]),
            ProfileModel::BoostPowerlaw => {
                profiles.boost_powerlaw_at_r(r, params[0], params[1], params[2])
            }
            ProfileModel::XiNfw => profiles.xi_nfw_at_r(r, params[0], params[1], params[2]),
            ProfileModel::XiEinasto => {
                profiles.xi_einasto_at_r(r, params[0], params[1], params[2], params[3])
            }
        }
    }
}

impl FromStr for ProfileModel {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        let key = lowered.strip_suffix("_at_r").unwrap_or(&lowered);
        match key {
            "boost_nfw" => Ok(ProfileModel::BoostNfw),
            "boost_powerlaw" => Ok(ProfileModel::BoostPowerlaw),
            "xi_nfw" => Ok(ProfileModel::XiNfw),
            "xi_einasto" => Ok(ProfileModel::XiEinasto),
            _ => Err(ProfileError::UnknownModel { name: s.to_string() }),
        }
    }
}

impl std::fmt::Display for ProfileModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
