//! profiles::models — caller-facing model functions.
//!
//! Purpose
//! -------
//! Offer one entry point per physical quantity (boost factors, halo and
//! matter correlation functions, peak height, bias, mass function). Each
//! entry point validates and normalizes its inputs, delegates the numerical
//! work to a [`PhysicsKernel`], and returns the result in the caller's
//! original shape.
//!
//! Key behaviors
//! -------------
//! - [`HaloProfiles`] is a stateless evaluator generic over its kernel;
//!   [`HaloProfiles::analytic`] wires in the pure-Rust
//!   [`AnalyticKernel`](crate::physics::AnalyticKernel).
//! - Array arguments accept anything implementing
//!   [`IntoInput`](crate::profiles::shape::IntoInput). A scalar input yields
//!   [`Output::Scalar`]; a list or 1-D array yields [`Output::Vector`]; an
//!   array of rank ≥ 2 fails with `ProfileError::RankTooHigh`.
//! - Composite quantities (`bias_at_m`, `g_at_m`, `xi_hm_at_r`) chain several
//!   kernel calls on the flat buffer and restore the shape once at the end.
//! - The crate-level free functions of the same names use the shared
//!   analytic kernel.
//!
//! Invariants & assumptions
//! ------------------------
//! - Shape and cardinality validation happens before the first kernel call;
//!   a rejected input never reaches the kernel.
//! - Kernel failures are propagated unchanged.
//! - Calls are pure: identical inputs give identical outputs, and a scalar
//!   call equals the matching element of the vector call.
//!
//! Conventions
//! -----------
//! - Radii in Mpc/h, masses in M☉/h, wavenumbers in h/Mpc, power spectra in
//!   (Mpc/h)³. Ω_m is the matter density fraction.
//! - Suffixes `_at_r` / `_at_m` / `_at_nu` / `_at_sigma` name the quantity
//!   the array argument holds.
//!
//! Downstream usage
//! ----------------
//! - Likelihood code constructs one `HaloProfiles` per kernel and calls it
//!   from as many threads as it likes when the kernel is `Sync`.
//! - The PyO3 layer in the crate root forwards to the free functions.
use crate::{
    physics::AnalyticKernel,
    profiles::{
        combination::{combine_halo_terms, two_halo_term},
        errors::ProfileResult,
        kernel::{Abscissa, KernelCall, MassTable, PhysicsKernel, Spectrum},
        options::{
            Combination, DkOptions, HaloModelOptions, HaloOptions, MassFunctionParams,
            MatterOptions, DEFAULT_DELTA,
        },
        shape::{try_normalize, IntoInput, Normalized, Output},
        validation::check_edges,
    },
};
use ndarray::{Array1, ArrayView1};

/// Stateless model evaluator backed by a physics kernel.
#[derive(Debug, Clone, Default)]
pub struct HaloProfiles<K = AnalyticKernel> {
    kernel: K,
}

impl HaloProfiles<AnalyticKernel> {
    /// Evaluator backed by the pure-Rust analytic kernel.
    pub fn analytic() -> Self {
        HaloProfiles { kernel: AnalyticKernel::new() }
    }
}

impl<K: PhysicsKernel> HaloProfiles<K> {
    pub fn new(kernel: K) -> Self {
        HaloProfiles { kernel }
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Run one kernel entry point over a flat buffer.
    fn eval_flat(&self, call: &KernelCall<'_>, input: &[f64]) -> ProfileResult<Vec<f64>> {
        let mut out = vec![0.0; input.len()];
        self.kernel.evaluate(call, input, &mut out)?;
        Ok(out)
    }

    /// Normalize, evaluate, restore.
    fn eval(
        &self, name: &'static str, input: impl IntoInput, call: &KernelCall<'_>,
    ) -> ProfileResult<Output> {
        let normalized = try_normalize(name, input)?;
        let out = self.eval_flat(call, normalized.as_slice())?;
        normalized.restore(out)
    }

    // ---- Boost factors ----

    /// NFW boost factor at projected radius `r`.
    ///
    /// Parameters
    /// ----------
    /// - `r`: projected radii in Mpc/h (scalar or 1-D).
    /// - `b0`: boost amplitude.
    /// - `r_scale`: scale radius in Mpc/h.
    ///
    /// Errors
    /// ------
    /// - `ProfileError::RankTooHigh` when `r` has more than one dimension.
    pub fn boost_nfw_at_r(&self, r: impl IntoInput, b0: f64, r_scale: f64) -> ProfileResult<Output> {
        self.eval("R", r, &KernelCall::BoostNfw { b0, r_scale })
    }

    /// Power-law boost factor `1 + b0 (R / r_scale)^alpha`.
    pub fn boost_powerlaw_at_r(
        &self, r: impl IntoInput, b0: f64, r_scale: f64, alpha: f64,
    ) -> ProfileResult<Output> {
        self.eval("R", r, &KernelCall::BoostPowerlaw { b0, r_scale, alpha })
    }

    // ---- Halo correlation functions ----

    /// NFW correlation function at 3-D radius `r` with Δ = 200.
    pub fn xi_nfw_at_r(
        &self, r: impl IntoInput, mass: f64, conc: f64, omega_m: f64,
    ) -> ProfileResult<Output> {
        self.xi_nfw_at_r_with(r, mass, conc, omega_m, &HaloOptions::default())
    }

    /// [`xi_nfw_at_r`](Self::xi_nfw_at_r) with an explicit overdensity.
    pub fn xi_nfw_at_r_with(
        &self, r: impl IntoInput, mass: f64, conc: f64, omega_m: f64, options: &HaloOptions,
    ) -> ProfileResult<Output> {
        self.eval("r", r, &KernelCall::XiNfw { mass, conc, delta: options.delta, omega_m })
    }

    /// Einasto correlation function at 3-D radius `r` with Δ = 200 and ρ_s
    /// derived from the mass.
    pub fn xi_einasto_at_r(
        &self, r: impl IntoInput, mass: f64, conc: f64, alpha: f64, omega_m: f64,
    ) -> ProfileResult<Output> {
        self.xi_einasto_at_r_with(r, mass, conc, alpha, omega_m, &HaloOptions::default())
    }

    /// [`xi_einasto_at_r`](Self::xi_einasto_at_r) with explicit Δ and ρ_s.
    ///
    /// Errors
    /// ------
    /// - `ProfileError::KernelFailure` when `alpha` or `conc` is outside the
    ///   domain of the mass normalisation.
    pub fn xi_einasto_at_r_with(
        &self, r: impl IntoInput, mass: f64, conc: f64, alpha: f64, omega_m: f64,
        options: &HaloOptions,
    ) -> ProfileResult<Output> {
        let call = KernelCall::XiEinasto {
            mass,
            conc,
            alpha,
            delta: options.delta,
            rhos: options.rhos,
            omega_m,
        };
        self.eval("r", r, &call)
    }

    // ---- Matter and halo-model correlation functions ----

    /// Matter correlation function from a tabulated power spectrum.
    ///
    /// Parameters
    /// ----------
    /// - `r`: 3-D radii in Mpc/h (scalar or 1-D).
    /// - `spectrum`: wavenumbers and power, checked for equal length only.
    /// - `options`: `exact = true` selects the oscillation-resolved path.
    ///
    /// Notes
    /// -----
    /// - Both paths honour the same shape contract. They agree to about 1e-3
    ///   of max |ξ| on smooth spectra, not bit for bit.
    pub fn xi_mm_at_r(
        &self, r: impl IntoInput, spectrum: &Spectrum<'_>, options: &MatterOptions,
    ) -> ProfileResult<Output> {
        self.eval("r", r, &KernelCall::XiMatter { spectrum: *spectrum, exact: options.exact })
    }

    /// Two-halo term `bias · ξ_mm`, in the shape of `xi_mm`.
    pub fn xi_2halo(&self, bias: f64, xi_mm: impl IntoInput) -> ProfileResult<Output> {
        let normalized = try_normalize("xi_mm", xi_mm)?;
        let scaled = two_halo_term(bias, ArrayView1::from(normalized.as_slice()));
        normalized.restore(scaled.to_vec())
    }

    /// Halo-model correlation from evaluated one-halo and two-halo terms.
    ///
    /// Errors
    /// ------
    /// - `ProfileError::LengthMismatch` when the terms differ in length.
    /// - `ProfileError::RankTooHigh` when either term has rank ≥ 2.
    pub fn xi_hm(
        &self, xi_1halo: impl IntoInput, xi_2halo: impl IntoInput, combination: Combination,
    ) -> ProfileResult<Output> {
        let one = try_normalize("xi_1halo", xi_1halo)?;
        let two = try_normalize("xi_2halo", xi_2halo)?;
        let combined = combine_flat(&one, two.as_slice(), combination)?;
        one.restore(combined)
    }

    /// Composite halo-model correlation at `r`: NFW one-halo term, biased
    /// matter correlation as two-halo term, merged by `options.combination`.
    #[allow(clippy::too_many_arguments)]
    pub fn xi_hm_at_r(
        &self, r: impl IntoInput, mass: f64, conc: f64, omega_m: f64, bias: f64,
        spectrum: &Spectrum<'_>, options: &HaloModelOptions,
    ) -> ProfileResult<Output> {
        let normalized = try_normalize("r", r)?;
        let radii = normalized.as_slice();
        let one = self.eval_flat(
            &KernelCall::XiNfw { mass, conc, delta: options.halo.delta, omega_m },
            radii,
        )?;
        let xi_mm = self.eval_flat(
            &KernelCall::XiMatter { spectrum: *spectrum, exact: options.matter.exact },
            radii,
        )?;
        let two = two_halo_term(bias, ArrayView1::from(&xi_mm));
        let combined = combine_halo_terms(ArrayView1::from(&one), two.view(), options.combination)?;
        normalized.restore(combined.to_vec())
    }

    /// Diemer–Kravtsov correlation function at `r`.
    ///
    /// Parameters
    /// ----------
    /// - `be`, `se`: amplitude and slope of the outer power-law term.
    /// - `spectrum`: linear power spectrum used for the peak height ν(M).
    /// - `options`: Δ, optional ρ_s and optional α, β, γ overrides.
    #[allow(clippy::too_many_arguments)]
    pub fn xi_dk(
        &self, r: impl IntoInput, mass: f64, conc: f64, be: f64, se: f64,
        spectrum: &Spectrum<'_>, omega_m: f64, options: &DkOptions,
    ) -> ProfileResult<Output> {
        let call = KernelCall::XiDk {
            mass,
            conc,
            be,
            se,
            spectrum: *spectrum,
            omega_m,
            options: *options,
        };
        self.eval("r", r, &call)
    }

    // ---- Peak height ----

    /// Top-hat variance σ²(R) at Lagrangian radius `r`.
    pub fn sigma2_at_r(&self, r: impl IntoInput, spectrum: &Spectrum<'_>) -> ProfileResult<Output> {
        self.eval("R", r, &KernelCall::Sigma2 { spectrum: *spectrum, abscissa: Abscissa::Radius })
    }

    /// σ²(M) through the Lagrangian radius of `mass`.
    pub fn sigma2_at_m(
        &self, mass: impl IntoInput, spectrum: &Spectrum<'_>, omega_m: f64,
    ) -> ProfileResult<Output> {
        let abscissa = Abscissa::Mass { omega_m };
        self.eval("M", mass, &KernelCall::Sigma2 { spectrum: *spectrum, abscissa })
    }

    /// Peak height ν = δ_c/σ at Lagrangian radius `r`.
    pub fn nu_at_r(&self, r: impl IntoInput, spectrum: &Spectrum<'_>) -> ProfileResult<Output> {
        let abscissa = Abscissa::Radius;
        self.eval("R", r, &KernelCall::PeakHeight { spectrum: *spectrum, abscissa })
    }

    /// Peak height of halos of mass `mass`.
    pub fn nu_at_m(
        &self, mass: impl IntoInput, spectrum: &Spectrum<'_>, omega_m: f64,
    ) -> ProfileResult<Output> {
        let abscissa = Abscissa::Mass { omega_m };
        self.eval("M", mass, &KernelCall::PeakHeight { spectrum: *spectrum, abscissa })
    }

    // ---- Bias ----

    /// Tinker (2010) halo bias at peak height `nu`.
    pub fn bias_at_nu(&self, nu: impl IntoInput, delta: f64) -> ProfileResult<Output> {
        self.eval("nu", nu, &KernelCall::Bias { delta })
    }

    /// Tinker (2010) halo bias of halos of mass `mass`.
    pub fn bias_at_m(
        &self, mass: impl IntoInput, spectrum: &Spectrum<'_>, omega_m: f64, delta: f64,
    ) -> ProfileResult<Output> {
        let normalized = try_normalize("M", mass)?;
        let abscissa = Abscissa::Mass { omega_m };
        let nu = self.eval_flat(
            &KernelCall::PeakHeight { spectrum: *spectrum, abscissa },
            normalized.as_slice(),
        )?;
        let bias = self.eval_flat(&KernelCall::Bias { delta }, &nu)?;
        normalized.restore(bias)
    }

    // ---- Mass function ----

    /// Multiplicity function G(σ).
    pub fn g_at_sigma(
        &self, sigma: impl IntoInput, params: &MassFunctionParams,
    ) -> ProfileResult<Output> {
        self.eval("sigma", sigma, &KernelCall::Multiplicity { params: *params })
    }

    /// Multiplicity function at σ(M).
    pub fn g_at_m(
        &self, mass: impl IntoInput, spectrum: &Spectrum<'_>, omega_m: f64,
        params: &MassFunctionParams,
    ) -> ProfileResult<Output> {
        let normalized = try_normalize("M", mass)?;
        let abscissa = Abscissa::Mass { omega_m };
        let sigma2 = self.eval_flat(
            &KernelCall::Sigma2 { spectrum: *spectrum, abscissa },
            normalized.as_slice(),
        )?;
        let sigma: Vec<f64> = sigma2.iter().map(|s2| s2.sqrt()).collect();
        let g = self.eval_flat(&KernelCall::Multiplicity { params: *params }, &sigma)?;
        normalized.restore(g)
    }

    /// Differential mass function dn/dM in (h/Mpc)³ per M☉/h.
    pub fn dndm_at_m(
        &self, mass: impl IntoInput, spectrum: &Spectrum<'_>, omega_m: f64,
        params: &MassFunctionParams,
    ) -> ProfileResult<Output> {
        let call = KernelCall::MassFunction { spectrum: *spectrum, omega_m, params: *params };
        self.eval("M", mass, &call)
    }

    /// Number density of halos in each bin `[edges[i], edges[i + 1]]`.
    ///
    /// Parameters
    /// ----------
    /// - `edges`: bin edges in M☉/h; at least two.
    /// - `table`: tabulated masses and dn/dM, interpolated with a monotone
    ///   cubic.
    ///
    /// Returns
    /// -------
    /// - `Array1<f64>` of length `edges.len() - 1`.
    ///
    /// Errors
    /// ------
    /// - `ProfileError::TooFewEdges` with fewer than two edges (a scalar
    ///   counts as one).
    /// - `ProfileError::KernelFailure` when a bin leaves the table range.
    pub fn n_in_bins(
        &self, edges: impl IntoInput, table: &MassTable<'_>,
    ) -> ProfileResult<Array1<f64>> {
        let edges = try_normalize("edges", edges)?;
        let edges = edges.as_slice();
        check_edges(edges)?;
        let (lower, upper) = (&edges[..edges.len() - 1], &edges[1..]);
        let counts = self.eval_flat(&KernelCall::BinCounts { upper, table: *table }, lower)?;
        Ok(Array1::from(counts))
    }

    /// Number density of halos between `lo` and `hi`.
    pub fn n_in_bin(&self, lo: f64, hi: f64, table: &MassTable<'_>) -> ProfileResult<f64> {
        let upper = [hi];
        let counts = self.eval_flat(&KernelCall::BinCounts { upper: &upper, table: *table }, &[lo])?;
        Ok(counts[0])
    }
}

fn combine_flat(
    one: &Normalized, two: &[f64], combination: Combination,
) -> ProfileResult<Vec<f64>> {
    let combined = combine_halo_terms(
        ArrayView1::from(one.as_slice()),
        ArrayView1::from(two),
        combination,
    )?;
    Ok(combined.to_vec())
}

// ---- Free functions on the shared analytic kernel ----

/// Evaluator on the process-wide analytic kernel.
pub fn shared_profiles() -> HaloProfiles<&'static AnalyticKernel> {
    HaloProfiles::new(AnalyticKernel::shared())
}

/// [`HaloProfiles::boost_nfw_at_r`] on the analytic kernel.
pub fn boost_nfw_at_r(r: impl IntoInput, b0: f64, r_scale: f64) -> ProfileResult<Output> {
    shared_profiles().boost_nfw_at_r(r, b0, r_scale)
}

/// [`HaloProfiles::boost_powerlaw_at_r`] on the analytic kernel.
pub fn boost_powerlaw_at_r(
    r: impl IntoInput, b0: f64, r_scale: f64, alpha: f64,
) -> ProfileResult<Output> {
    shared_profiles().boost_powerlaw_at_r(r, b0, r_scale, alpha)
}

pub fn xi_nfw_at_r(r: impl IntoInput, mass: f64, conc: f64, omega_m: f64) -> ProfileResult<Output> {
    shared_profiles().xi_nfw_at_r(r, mass, conc, omega_m)
}

pub fn xi_einasto_at_r(
    r: impl IntoInput, mass: f64, conc: f64, alpha: f64, omega_m: f64,
) -> ProfileResult<Output> {
    shared_profiles().xi_einasto_at_r(r, mass, conc, alpha, omega_m)
}

pub fn xi_mm_at_r(
    r: impl IntoInput, spectrum: &Spectrum<'_>, options: &MatterOptions,
) -> ProfileResult<Output> {
    shared_profiles().xi_mm_at_r(r, spectrum, options)
}

pub fn xi_2halo(bias: f64, xi_mm: impl IntoInput) -> ProfileResult<Output> {
    shared_profiles().xi_2halo(bias, xi_mm)
}

pub fn xi_hm(
    xi_1halo: impl IntoInput, xi_2halo: impl IntoInput, combination: Combination,
) -> ProfileResult<Output> {
    shared_profiles().xi_hm(xi_1halo, xi_2halo, combination)
}

#[allow(clippy::too_many_arguments)]
pub fn xi_dk(
    r: impl IntoInput, mass: f64, conc: f64, be: f64, se: f64, spectrum: &Spectrum<'_>,
    omega_m: f64, options: &DkOptions,
) -> ProfileResult<Output> {
    shared_profiles().xi_dk(r, mass, conc, be, se, spectrum, omega_m, options)
}

pub fn sigma2_at_r(r: impl IntoInput, spectrum: &Spectrum<'_>) -> ProfileResult<Output> {
    shared_profiles().sigma2_at_r(r, spectrum)
}

pub fn sigma2_at_m(
    mass: impl IntoInput, spectrum: &Spectrum<'_>, omega_m: f64,
) -> ProfileResult<Output> {
    shared_profiles().sigma2_at_m(mass, spectrum, omega_m)
}

pub fn nu_at_r(r: impl IntoInput, spectrum: &Spectrum<'_>) -> ProfileResult<Output> {
    shared_profiles().nu_at_r(r, spectrum)
}

pub fn nu_at_m(mass: impl IntoInput, spectrum: &Spectrum<'_>, omega_m: f64) -> ProfileResult<Output> {
    shared_profiles().nu_at_m(mass, spectrum, omega_m)
}

/// Bias at peak height `nu` with Δ = 200.
pub fn bias_at_nu(nu: impl IntoInput) -> ProfileResult<Output> {
    shared_profiles().bias_at_nu(nu, DEFAULT_DELTA)
}

pub fn bias_at_m(
    mass: impl IntoInput, spectrum: &Spectrum<'_>, omega_m: f64,
) -> ProfileResult<Output> {
    shared_profiles().bias_at_m(mass, spectrum, omega_m, DEFAULT_DELTA)
}

pub fn g_at_sigma(sigma: impl IntoInput, params: &MassFunctionParams) -> ProfileResult<Output> {
    shared_profiles().g_at_sigma(sigma, params)
}

pub fn g_at_m(
    mass: impl IntoInput, spectrum: &Spectrum<'_>, omega_m: f64, params: &MassFunctionParams,
) -> ProfileResult<Output> {
    shared_profiles().g_at_m(mass, spectrum, omega_m, params)
}

pub fn dndm_at_m(
    mass: impl IntoInput, spectrum: &Spectrum<'_>, omega_m: f64, params: &MassFunctionParams,
) -> ProfileResult<Output> {
    shared_profiles().dndm_at_m(mass, spectrum, omega_m, params)
}

pub fn n_in_bins(edges: impl IntoInput, table: &MassTable<'_>) -> ProfileResult<Array1<f64>> {
    shared_profiles().n_in_bins(edges, table)
}

pub fn n_in_bin(lo: f64, hi: f64, table: &MassTable<'_>) -> ProfileResult<f64> {
    shared_profiles().n_in_bin(lo, hi, table)
}
