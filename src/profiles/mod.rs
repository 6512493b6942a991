//! profiles — the profile-evaluation and combination layer.
//!
//! Purpose
//! -------
//! Define the contract every halo-profile model function offers: which input
//! shapes are accepted, how scalars and arrays are normalized and restored,
//! which options exist and what they default to, how evaluated one-halo and
//! two-halo terms combine, and what may fail before the numerical kernel is
//! ever reached. The numerical work itself sits behind the [`PhysicsKernel`]
//! trait.
//!
//! Key behaviors
//! -------------
//! - [`shape`] is the single conversion point between caller inputs and flat
//!   kernel buffers ([`Input`], [`Output`], [`normalize`]).
//! - [`models`] exposes one function per physical quantity, as methods of the
//!   stateless [`HaloProfiles`] evaluator and as free functions on the shared
//!   analytic kernel.
//! - [`combination`] merges evaluated halo terms with [`Combination::Max`] or
//!   [`Combination::Sum`].
//! - [`dispatch`] selects a model by name at runtime with a flat parameter
//!   vector ([`ProfileModel`]).
//! - [`errors`] groups every failure into shape, argument, configuration, and
//!   kernel families.
//!
//! Invariants & assumptions
//! ------------------------
//! - No state survives a call. Identical inputs give identical outputs.
//! - Validation (rank, table lengths, arity, edges, option names) precedes
//!   every kernel call; kernel failures are propagated, never replaced by a
//!   default value.
//!
//! Downstream usage
//! ----------------
//! - Typical flow:
//!   1. Build a [`Spectrum`] from the caller's `k` / `P(k)` tables if the
//!      quantity needs one.
//!   2. Call a model function with a scalar or 1-D radius argument.
//!   3. Read the result as [`Output::Scalar`] or [`Output::Vector`].
//! - Alternative kernels plug in through `HaloProfiles::new(kernel)`.
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests; [`models`] uses a recording kernel
//!   to prove that rejected inputs never reach the kernel.
//! - `tests/integration_profiles_pipeline.rs` checks the end-to-end
//!   properties on the analytic kernel.

pub mod combination;
pub mod dispatch;
pub mod errors;
pub mod kernel;
pub mod models;
#[cfg(feature = "obs_slog")]
pub mod observer;
pub mod options;
pub mod shape;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::combination::{combine_by_name, combine_halo_terms, two_halo_term};
pub use self::dispatch::ProfileModel;
pub use self::errors::{ErrorKind, ProfileError, ProfileResult};
pub use self::kernel::{Abscissa, KernelCall, MassTable, PhysicsKernel, Spectrum};
pub use self::models::HaloProfiles;
#[cfg(feature = "obs_slog")]
pub use self::observer::ObservedKernel;
pub use self::options::{
    Combination, DkOptions, HaloModelOptions, HaloOptions, MassFunctionParams, MatterOptions,
    DEFAULT_DELTA,
};
pub use self::shape::{normalize, try_normalize, Input, IntoInput, Normalized, Output};

// ---- Optional convenience prelude -----------------------------------------
//
//     use halo_profiles::profiles::prelude::*;

pub mod prelude {
    pub use super::{
        Combination, DkOptions, HaloModelOptions, HaloOptions, HaloProfiles, Input, IntoInput,
        MassFunctionParams, MassTable, MatterOptions, Output, PhysicsKernel, ProfileError,
        ProfileModel, ProfileResult, Spectrum,
    };
}
