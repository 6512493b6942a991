//! profiles::options — per-call configuration records.
//!
//! Purpose
//! -------
//! Replace keyword defaults (`exact=False`, `combination='max'`,
//! `delta=200`) with explicit option records that carry documented
//! defaults, so every model call states its configuration in one value.
//!
//! Key behaviors
//! -------------
//! - [`Combination`] selects how one-halo and two-halo terms merge and parses
//!   case-insensitively from `"max"` / `"sum"`. Any other name is a
//!   configuration error, never a silent fallback.
//! - [`MatterOptions`] selects the approximate or exact ξ_mm kernel path.
//! - [`HaloOptions`] carries the overdensity and an optional fixed ρ_s for
//!   NFW/Einasto profiles.
//! - [`HaloModelOptions`] bundles the combination rule with the ξ_mm path
//!   used by the composite halo-model correlation.
//! - [`DkOptions`] carries the Diemer–Kravtsov shape overrides.
//! - [`MassFunctionParams`] carries the four multiplicity-function shape
//!   parameters, defaulting to the Tinker (2008) Δ = 200 calibration.
//!
//! Invariants & assumptions
//! ------------------------
//! - Records are plain data; they do not validate physical plausibility
//!   (e.g. a negative Δ is passed to the kernel as-is).
//!
//! Testing notes
//! -------------
//! - Unit tests verify defaults and `FromStr` parsing of [`Combination`].
use crate::profiles::errors::ProfileError;
use std::str::FromStr;

/// Mean-matter overdensity used when none is supplied.
pub const DEFAULT_DELTA: f64 = 200.0;

/// Rule for merging the one-halo and two-halo terms.
///
/// - `Max`: elementwise maximum (default).
/// - `Sum`: elementwise sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Combination {
    #[default]
    Max,
    Sum,
}

impl Combination {
    pub fn name(&self) -> &'static str {
        match self {
            Combination::Max => "max",
            Combination::Sum => "sum",
        }
    }

    /// Parse an optional name; `None` yields the default (`Max`).
    pub fn from_name(name: Option<&str>) -> Result<Self, ProfileError> {
        name.map_or(Ok(Combination::default()), Combination::from_str)
    }
}

impl FromStr for Combination {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "max" => Ok(Combination::Max),
            "sum" => Ok(Combination::Sum),
            _ => Err(ProfileError::UnknownCombination { name: s.to_string() }),
        }
    }
}

impl std::fmt::Display for Combination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Options for the matter correlation function.
///
/// - `exact`: when `true`, use the oscillation-resolved integration path;
///   otherwise the faster fixed-panel path. Default `false`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MatterOptions {
    pub exact: bool,
}

impl MatterOptions {
    pub fn new(exact: bool) -> Self {
        MatterOptions { exact }
    }

    pub fn exact() -> Self {
        MatterOptions { exact: true }
    }
}

/// Options shared by the NFW and Einasto correlation functions.
///
/// Fields
/// ------
/// - `delta`: `f64`
///   Overdensity with respect to the mean matter density defining R_Δ.
///   Default [`DEFAULT_DELTA`].
/// - `rhos`: `Option<f64>`
///   Fixed scale density in h² M☉/Mpc³. When `None` it is derived from the
///   halo mass so that M(<R_Δ) = M. Only the Einasto profile honours it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HaloOptions {
    pub delta: f64,
    pub rhos: Option<f64>,
}

impl HaloOptions {
    pub fn new(delta: f64, rhos: Option<f64>) -> Self {
        HaloOptions { delta, rhos }
    }
}

impl Default for HaloOptions {
    fn default() -> Self {
        HaloOptions { delta: DEFAULT_DELTA, rhos: None }
    }
}

/// Options for the composite halo-model correlation function.
///
/// - `combination`: one-halo/two-halo merge rule. Default [`Combination::Max`].
/// - `matter`: ξ_mm path used for the two-halo term. Default approximate.
/// - `halo`: NFW one-halo options. Default Δ = 200.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HaloModelOptions {
    pub combination: Combination,
    pub matter: MatterOptions,
    pub halo: HaloOptions,
}

impl HaloModelOptions {
    pub fn new(combination: Combination, matter: MatterOptions, halo: HaloOptions) -> Self {
        HaloModelOptions { combination, matter, halo }
    }

    pub fn with_combination(combination: Combination) -> Self {
        HaloModelOptions { combination, ..Default::default() }
    }
}

/// Options for the Diemer–Kravtsov profile.
///
/// Every `None` shape parameter falls back to the peak-height calibrated
/// value: α = 0.155 + 0.0095 ν², β = 4, γ = 8. A `None` ρ_s is derived from
/// the halo mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DkOptions {
    pub delta: f64,
    pub rhos: Option<f64>,
    pub alpha: Option<f64>,
    pub beta: Option<f64>,
    pub gamma: Option<f64>,
}

impl Default for DkOptions {
    fn default() -> Self {
        DkOptions { delta: DEFAULT_DELTA, rhos: None, alpha: None, beta: None, gamma: None }
    }
}

/// Shape parameters `(d, e, f, g)` of the multiplicity function
/// G(σ) = B e^{−g/σ²}((σ/e)^{−d} + σ^{−f}).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassFunctionParams {
    pub d: f64,
    pub e: f64,
    pub f: f64,
    pub g: f64,
}

impl MassFunctionParams {
    pub fn new(d: f64, e: f64, f: f64, g: f64) -> Self {
        MassFunctionParams { d, e, f, g }
    }
}

impl Default for MassFunctionParams {
    /// Tinker et al. (2008) at Δ = 200.
    fn default() -> Self {
        MassFunctionParams { d: 1.97, e: 1.0, f: 0.51, g: 1.228 }
    }
}
