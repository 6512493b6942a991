//! profiles::kernel — the physics-kernel boundary.
//!
//! Purpose
//! -------
//! Define the capability every model function delegates its numerical work
//! to: given a validated flat input buffer and a typed description of the
//! entry point with its scalar parameters, fill a pre-allocated output buffer
//! of the same length.
//!
//! Key behaviors
//! -------------
//! - [`PhysicsKernel`] is a single-method trait, so a compiled numerical
//!   library, the pure-Rust [`AnalyticKernel`](crate::physics::AnalyticKernel),
//!   a logging decorator, or a test double are interchangeable.
//! - [`KernelCall`] names the entry point (stable `name()`) and carries its
//!   ordered scalar parameters and borrowed tables.
//! - [`Spectrum`] and [`MassTable`] are borrowed parallel-table views whose
//!   constructors check only cardinality.
//!
//! Invariants & assumptions
//! ------------------------
//! - `input.len() == out.len()` on every call; the model layer guarantees it.
//! - Implementations must be reentrant with no shared mutable buffers, so
//!   concurrent callers can share one kernel by reference.
//! - A kernel reports numerical failures as `ProfileError::KernelFailure`;
//!   the model layer propagates them unchanged.
use crate::profiles::{
    errors::ProfileResult,
    options::{DkOptions, MassFunctionParams},
    validation::check_same_length,
};

/// Borrowed power-spectrum table: wavenumbers `k` [h/Mpc] and power `p`
/// [(Mpc/h)³]. Physical monotonicity is not checked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spectrum<'a> {
    pub k: &'a [f64],
    pub p: &'a [f64],
}

impl<'a> Spectrum<'a> {
    /// Errors with `ProfileError::LengthMismatch` if `k` and `p` differ in length.
    pub fn new(k: &'a [f64], p: &'a [f64]) -> ProfileResult<Self> {
        check_same_length("P", k.len(), p.len())?;
        Ok(Spectrum { k, p })
    }

    pub fn len(&self) -> usize {
        self.k.len()
    }

    pub fn is_empty(&self) -> bool {
        self.k.is_empty()
    }
}

/// Borrowed mass-function table: masses [M☉/h] and dn/dM values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassTable<'a> {
    pub masses: &'a [f64],
    pub dndm: &'a [f64],
}

impl<'a> MassTable<'a> {
    pub fn new(masses: &'a [f64], dndm: &'a [f64]) -> ProfileResult<Self> {
        check_same_length("dndM", masses.len(), dndm.len())?;
        Ok(MassTable { masses, dndm })
    }
}

/// What the kernel's input buffer holds for variance-type entries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Abscissa {
    /// Lagrangian radii in Mpc/h.
    Radius,
    /// Halo masses in M☉/h, converted with ρ_m = Ω_m ρ_crit.
    Mass { omega_m: f64 },
}

/// Kernel entry point together with its scalar parameters.
///
/// The input buffer meaning is fixed per variant: projected radii for boost
/// factors, 3-D radii for correlation functions, radii or masses for the
/// variance entries, ν for bias, σ for the multiplicity, masses for the mass
/// function, and lower bin edges for `BinCounts`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KernelCall<'a> {
    BoostNfw { b0: f64, r_scale: f64 },
    BoostPowerlaw { b0: f64, r_scale: f64, alpha: f64 },
    XiNfw { mass: f64, conc: f64, delta: f64, omega_m: f64 },
    XiEinasto { mass: f64, conc: f64, alpha: f64, delta: f64, rhos: Option<f64>, omega_m: f64 },
    XiMatter { spectrum: Spectrum<'a>, exact: bool },
    XiDk {
        mass: f64,
        conc: f64,
        be: f64,
        se: f64,
        spectrum: Spectrum<'a>,
        omega_m: f64,
        options: DkOptions,
    },
    Sigma2 { spectrum: Spectrum<'a>, abscissa: Abscissa },
    PeakHeight { spectrum: Spectrum<'a>, abscissa: Abscissa },
    Bias { delta: f64 },
    Multiplicity { params: MassFunctionParams },
    MassFunction { spectrum: Spectrum<'a>, omega_m: f64, params: MassFunctionParams },
    BinCounts { upper: &'a [f64], table: MassTable<'a> },
}

impl KernelCall<'_> {
    /// Stable entry-point name.
    pub fn name(&self) -> &'static str {
        match self {
            KernelCall::BoostNfw { .. } => "boost_nfw",
            KernelCall::BoostPowerlaw { .. } => "boost_powerlaw",
            KernelCall::XiNfw { .. } => "xi_nfw",
            KernelCall::XiEinasto { .. } => "xi_einasto",
            KernelCall::XiMatter { exact: false, .. } => "xi_mm",
            KernelCall::XiMatter { exact: true, .. } => "xi_mm_exact",
            KernelCall::XiDk { .. } => "xi_dk",
            KernelCall::Sigma2 { .. } => "sigma2",
            KernelCall::PeakHeight { .. } => "peak_height",
            KernelCall::Bias { .. } => "bias_tinker10",
            KernelCall::Multiplicity { .. } => "multiplicity",
            KernelCall::MassFunction { .. } => "mass_function",
            KernelCall::BinCounts { .. } => "bin_counts",
        }
    }
}

/// Numerical capability behind every model function.
pub trait PhysicsKernel {
    /// Evaluate `call` at every value of `input`, writing into `out`.
    ///
    /// `out` has the same length as `input` and arrives zero-filled.
    fn evaluate(&self, call: &KernelCall<'_>, input: &[f64], out: &mut [f64])
    -> ProfileResult<()>;
}

impl<K: PhysicsKernel + ?Sized> PhysicsKernel for &K {
    fn evaluate(
        &self, call: &KernelCall<'_>, input: &[f64], out: &mut [f64],
    ) -> ProfileResult<()> {
        (**self).evaluate(call, input, out)
    }
}

impl<K: PhysicsKernel + ?Sized> PhysicsKernel for Box<K> {
    fn evaluate(
        &self, call: &KernelCall<'_>, input: &[f64], out: &mut [f64],
    ) -> ProfileResult<()> {
        (**self).evaluate(call, input, out)
    }
}
