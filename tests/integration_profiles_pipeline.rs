//! Integration tests for the halo-profile model functions.
//!
//! Purpose
//! -------
//! - Validate the end-to-end evaluation path: caller inputs of every
//!   accepted shape, through normalization and the analytic kernel, back to
//!   results in the caller's shape.
//! - Exercise realistic cluster-lensing regimes (M = 1e13–1e15 M☉/h,
//!   c = 5, Ω_m = 0.3) on a smooth toy power spectrum.
//!
//! Coverage
//! --------
//! - `profiles::models`:
//!   - Shape contract: list/array equivalence, scalar unwrap, rank ≥ 2
//!     rejection.
//!   - Boost factors, halo correlations, ξ_mm on both paths, the halo-model
//!     chain, DK profile, peak height, bias, and mass-function entry points.
//! - `profiles::dispatch`:
//!   - Arity checks for runtime-selected models.
//! - `profiles::combination`:
//!   - Max and sum rules on evaluated terms.
//!
//! Exclusions
//! ----------
//! - Closed-form accuracy of the individual kernels; those are covered by
//!   unit tests under `physics`.
//! - Python bindings, which are tested in `tests/python/`.
use approx::assert_relative_eq;
use halo_profiles::{
    physics::DELTA_C,
    profiles::{errors::ErrorKind, prelude::*, DEFAULT_DELTA},
};
use ndarray::{array, Array1, Array2};

/// Purpose
/// -------
/// Tabulate a smooth, strictly positive linear power spectrum with a
/// turnover near k = 0.02 h/Mpc and σ₈ ≈ 0.8.
///
/// Returns
/// -------
/// - `(k, P)` with 251 log-spaced wavenumbers in [1e-4, 10] h/Mpc.
fn toy_spectrum() -> (Vec<f64>, Vec<f64>) {
    let k: Vec<f64> = (0..=250).map(|i| 10f64.powf(-4.0 + 5.0 * i as f64 / 250.0)).collect();
    let p = k
        .iter()
        .map(|&ki| 5e6 * ki / (1.0 + (ki / 0.02).powi(2)).powf(1.4) * (-0.25 * ki * ki).exp())
        .collect();
    (k, p)
}

/// Purpose
/// -------
/// Tabulate the same turnover without the small-scale cutoff, with a
/// k^-1.5 tail out to k = 100 h/Mpc, so that sin(kr) oscillates thousands of
/// times across the table at r = 100 Mpc/h.
///
/// Returns
/// -------
/// - `(k, P)` with 601 log-spaced wavenumbers in [1e-4, 100] h/Mpc.
fn tail_spectrum() -> (Vec<f64>, Vec<f64>) {
    let k: Vec<f64> = (0..=600).map(|i| 10f64.powf(-4.0 + 6.0 * i as f64 / 600.0)).collect();
    let p = k
        .iter()
        .map(|&ki| {
            5e6 * ki / (1.0 + (ki / 0.02).powi(2)).powf(1.4) + 50.0 * ki.sqrt() / (1.0 + ki * ki)
        })
        .collect();
    (k, p)
}

fn radii() -> Vec<f64> {
    vec![0.1, 0.5, 1.0, 5.0, 20.0]
}

fn assert_strictly_increasing(values: &[f64], label: &str) {
    for pair in values.windows(2) {
        assert!(pair[1] > pair[0], "{label}: {:?} not increasing", values);
    }
}

// ---- Shape contract ----

#[test]
// Purpose
// -------
// Lists, slices, owned arrays, and views of the same numbers are the same
// input; a scalar call equals the matching element of the vector call.
//
// Given
// -----
// - The NFW and Einasto correlation functions and the NFW boost factor.
//
// Expect
// ------
// - Identical `Output::Vector` for every container type.
// - `Output::Scalar` bit-equal to the vector element.
fn list_and_array_inputs_agree_and_scalars_unwrap() {
    // Arrange
    let profiles = HaloProfiles::analytic();
    let list = radii();
    let arr = Array1::from(list.clone());

    // Act
    let from_list = profiles.xi_einasto_at_r(&list, 1e14, 5.0, 0.19, 0.3).expect("valid");
    let from_array = profiles.xi_einasto_at_r(&arr, 1e14, 5.0, 0.19, 0.3).expect("valid");
    let from_view = profiles.xi_einasto_at_r(arr.view(), 1e14, 5.0, 0.19, 0.3).expect("valid");
    let from_slice = profiles.xi_einasto_at_r(&list[..], 1e14, 5.0, 0.19, 0.3).expect("valid");

    // Assert
    assert_eq!(from_list, from_array);
    assert_eq!(from_list, from_view);
    assert_eq!(from_list, from_slice);
    assert_eq!(from_list.len(), list.len());

    for (i, &r) in list.iter().enumerate() {
        let single = profiles.xi_nfw_at_r(r, 1e14, 5.0, 0.3).expect("valid");
        let batch = profiles.xi_nfw_at_r(&list, 1e14, 5.0, 0.3).expect("valid");
        assert!(single.is_scalar());
        assert_eq!(single.scalar().map(f64::to_bits), batch.get(i).map(f64::to_bits));

        let boost = profiles.boost_nfw_at_r(r, 0.2, 1.0).expect("valid");
        assert!(matches!(boost, Output::Scalar(_)));
    }
}

#[test]
// Purpose
// -------
// Every vectorised model entry point treats lists, owned arrays, and views
// alike and unwraps a scalar argument to the matching vector element.
//
// Given
// -----
// - One row per entry point with an abscissa in its physical range.
// - The toy spectrum for entries that need P(k); ξ_mm on both paths.
//
// Expect
// ------
// - Identical `Output::Vector` for list, array, and view inputs.
// - `Output::Scalar` bit-equal to the vector element, for every element.
fn every_entry_point_honours_the_shape_contract() {
    // Arrange
    let profiles = HaloProfiles::analytic();
    let (k, p) = toy_spectrum();
    let spectrum = Spectrum::new(&k, &p).expect("matching lengths");
    let tinker = MassFunctionParams::default();
    let dk = DkOptions::default();
    let halo_model = HaloModelOptions::default();
    let masses = vec![1e13, 1e14, 1e15];
    let cases: Vec<(&str, Vec<f64>, Box<dyn Fn(Input) -> ProfileResult<Output> + '_>)> = vec![
        ("boost_nfw_at_r", radii(), Box::new(|x: Input| profiles.boost_nfw_at_r(x, 0.2, 1.0))),
        ("boost_powerlaw_at_r", radii(), Box::new(|x: Input| profiles.boost_powerlaw_at_r(x, 0.2, 1.0, -1.0))),
        ("xi_nfw_at_r", radii(), Box::new(|x: Input| profiles.xi_nfw_at_r(x, 1e14, 5.0, 0.3))),
        ("xi_einasto_at_r", radii(), Box::new(|x: Input| profiles.xi_einasto_at_r(x, 1e14, 5.0, 0.19, 0.3))),
        ("xi_mm_at_r approx", radii(), Box::new(|x: Input| profiles.xi_mm_at_r(x, &spectrum, &MatterOptions::default()))),
        ("xi_mm_at_r exact", radii(), Box::new(|x: Input| profiles.xi_mm_at_r(x, &spectrum, &MatterOptions::exact()))),
        ("xi_2halo", radii(), Box::new(|x: Input| profiles.xi_2halo(2.0, x))),
        ("xi_hm_at_r", radii(), Box::new(|x: Input| profiles.xi_hm_at_r(x, 1e14, 5.0, 0.3, 2.0, &spectrum, &halo_model))),
        ("xi_dk", radii(), Box::new(|x: Input| profiles.xi_dk(x, 1e14, 5.0, 1.0, 1.5, &spectrum, 0.3, &dk))),
        ("sigma2_at_r", radii(), Box::new(|x: Input| profiles.sigma2_at_r(x, &spectrum))),
        ("sigma2_at_m", masses.clone(), Box::new(|x: Input| profiles.sigma2_at_m(x, &spectrum, 0.3))),
        ("nu_at_r", radii(), Box::new(|x: Input| profiles.nu_at_r(x, &spectrum))),
        ("nu_at_m", masses.clone(), Box::new(|x: Input| profiles.nu_at_m(x, &spectrum, 0.3))),
        ("bias_at_nu", vec![0.5, 1.0, 2.0, 4.0], Box::new(|x: Input| profiles.bias_at_nu(x, DEFAULT_DELTA))),
        ("bias_at_m", masses.clone(), Box::new(|x: Input| profiles.bias_at_m(x, &spectrum, 0.3, DEFAULT_DELTA))),
        ("g_at_sigma", vec![0.5, 1.0, 2.0], Box::new(|x: Input| profiles.g_at_sigma(x, &tinker))),
        ("g_at_m", masses.clone(), Box::new(|x: Input| profiles.g_at_m(x, &spectrum, 0.3, &tinker))),
        ("dndm_at_m", masses.clone(), Box::new(|x: Input| profiles.dndm_at_m(x, &spectrum, 0.3, &tinker))),
    ];

    for (label, values, eval) in &cases {
        let arr = Array1::from(values.clone());

        // Act
        let from_list = eval(values.into_input("x").expect("rank 1")).expect(label);
        let from_array = eval((&arr).into_input("x").expect("rank 1")).expect(label);
        let from_view = eval(arr.view().into_input("x").expect("rank 1")).expect(label);

        // Assert
        assert_eq!(from_list, from_array, "{label}: list vs array");
        assert_eq!(from_list, from_view, "{label}: list vs view");
        assert_eq!(from_list.len(), values.len(), "{label}: length");
        for (i, &x) in values.iter().enumerate() {
            let single = eval(x.into_input("x").expect("rank 0")).expect(label);
            assert!(single.is_scalar(), "{label}: scalar in, scalar out");
            assert_eq!(
                single.scalar().map(f64::to_bits),
                from_list.get(i).map(f64::to_bits),
                "{label}: element {i}"
            );
        }
    }
}

#[test]
// Purpose
// -------
// Einasto shapes whose mass normalisation overflows or underflows are
// reported as kernel failures through every entry point that builds an
// Einasto profile.
//
// Given
// -----
// - (c, α) = (5, 500): (2/α) c^α overflows to +∞.
// - (c, α) = (0.5, 2000): (2/α) c^α underflows to 0.
// - The DK profile with the same α override.
//
// Expect
// ------
// - `Err` with `ErrorKind::Kernel` for scalar and vector radii.
fn extreme_einasto_shapes_fail_as_kernel_errors() {
    // Arrange
    let profiles = HaloProfiles::analytic();
    let (k, p) = toy_spectrum();
    let spectrum = Spectrum::new(&k, &p).expect("matching lengths");

    for (conc, alpha) in [(5.0, 500.0), (0.5, 2000.0)] {
        let dk = DkOptions { alpha: Some(alpha), ..DkOptions::default() };

        // Act
        let results = [
            profiles.xi_einasto_at_r(vec![0.1, 1.0], 1e14, conc, alpha, 0.3),
            profiles.xi_einasto_at_r(1.0, 1e14, conc, alpha, 0.3),
            profiles.xi_dk(vec![0.1, 1.0], 1e14, conc, 1.0, 1.5, &spectrum, 0.3, &dk),
        ];

        // Assert
        for result in results {
            match result {
                Err(err) => assert_eq!(err.kind(), ErrorKind::Kernel, "c = {conc}, alpha = {alpha}"),
                Ok(out) => panic!("c = {conc}, alpha = {alpha}: expected an error, got {out:?}"),
            }
        }
    }
}

#[test]
// Purpose
// -------
// Arrays of rank ≥ 2 are rejected up front, even when they hold a single
// row of radii.
//
// Given
// -----
// - A 1×3 array passed to boost, halo, matter, and peak-height functions.
//
// Expect
// ------
// - `ProfileError::RankTooHigh` with `ndim = 2` and a shape-kind error.
fn rank_two_inputs_are_rejected_everywhere() {
    // Arrange
    let profiles = HaloProfiles::analytic();
    let grid: Array2<f64> = array![[0.1, 1.0, 10.0]];
    let (k, p) = toy_spectrum();
    let spectrum = Spectrum::new(&k, &p).expect("matching lengths");

    // Act
    let results = [
        profiles.boost_nfw_at_r(&grid, 0.2, 1.0),
        profiles.boost_powerlaw_at_r(&grid, 0.2, 1.0, -1.0),
        profiles.xi_nfw_at_r(&grid, 1e14, 5.0, 0.3),
        profiles.xi_einasto_at_r(&grid, 1e14, 5.0, 0.19, 0.3),
        profiles.xi_mm_at_r(&grid, &spectrum, &MatterOptions::default()),
        profiles.sigma2_at_r(&grid, &spectrum),
    ];

    // Assert
    for result in results {
        match result {
            Err(err @ ProfileError::RankTooHigh { ndim: 2, .. }) => {
                assert_eq!(err.kind(), ErrorKind::Shape)
            }
            other => panic!("expected RankTooHigh, got {other:?}"),
        }
    }
}

#[test]
fn runtime_dispatch_checks_arity_before_evaluating() {
    let profiles = HaloProfiles::analytic();
    let model: ProfileModel = "xi_einasto_at_r".parse().expect("known model");

    let err = model
        .evaluate(&profiles, radii(), &[1e14, 5.0, 0.19])
        .expect_err("three parameters for a four-parameter model");
    assert_eq!(err, ProfileError::ArityMismatch { model: "xi_einasto", expected: 4, actual: 3 });
    assert_eq!(err.kind(), ErrorKind::Argument);

    let ok = model.evaluate(&profiles, radii(), &[1e14, 5.0, 0.19, 0.3]).expect("valid arity");
    assert_eq!(ok, profiles.xi_einasto_at_r(radii(), 1e14, 5.0, 0.19, 0.3).expect("valid"));
}

#[test]
fn empty_inputs_give_empty_outputs() {
    let profiles = HaloProfiles::analytic();
    let out = profiles.xi_nfw_at_r(Vec::<f64>::new(), 1e14, 5.0, 0.3).expect("empty is valid");
    assert!(out.is_empty());
    assert!(!out.is_scalar());
}

// ---- Halo profiles ----

#[test]
// Purpose
// -------
// At fixed concentration, a heavier halo is denser at every fixed radius.
//
// Given
// -----
// - M ∈ {1e13, 1e14, 1e15}, c = 5, α = 0.19, Ω_m = 0.3, r ∈ {0.1, 1, 10}.
//
// Expect
// ------
// - ξ_NFW and ξ_Einasto strictly increase with mass at each radius.
fn halo_correlations_increase_with_mass() {
    // Arrange
    let profiles = HaloProfiles::analytic();
    let r = [0.1, 1.0, 10.0];
    let masses = [1e13, 1e14, 1e15];

    // Act
    let nfw: Vec<Output> = masses
        .iter()
        .map(|&m| profiles.xi_nfw_at_r(r, m, 5.0, 0.3).expect("valid"))
        .collect();
    let ein: Vec<Output> = masses
        .iter()
        .map(|&m| profiles.xi_einasto_at_r(r, m, 5.0, 0.19, 0.3).expect("valid"))
        .collect();

    // Assert
    for i in 0..r.len() {
        let nfw_at_r: Vec<f64> = nfw.iter().filter_map(|o| o.get(i)).collect();
        let ein_at_r: Vec<f64> = ein.iter().filter_map(|o| o.get(i)).collect();
        assert_strictly_increasing(&nfw_at_r, "xi_nfw");
        assert_strictly_increasing(&ein_at_r, "xi_einasto");
    }
}

#[test]
fn boost_factors_tend_to_one_far_from_the_cluster() {
    let profiles = HaloProfiles::analytic();
    let far = profiles.boost_nfw_at_r(1e4, 0.3, 0.5).expect("valid");
    let pl = profiles.boost_powerlaw_at_r(1e4, 0.3, 0.5, -1.0).expect("valid");
    assert_relative_eq!(far.scalar().expect("scalar"), 1.0, epsilon = 1e-3);
    assert_relative_eq!(pl.scalar().expect("scalar"), 1.0, epsilon = 1e-3);
}

// ---- Matter correlation and halo model ----

#[test]
// Purpose
// -------
// Both ξ_mm integration paths honour the same shape contract and agree
// radius by radius, with and without a small-scale cutoff in P(k).
//
// Given
// -----
// - The toy spectrum and r from 0.1 to 20 Mpc/h.
// - The uncut spectrum with a k^-1.5 tail and r out to 100 Mpc/h.
//
// Expect
// ------
// - |ξ_approx − ξ_exact| ≤ 1e-3 · |ξ_exact(r)| + 1e-6 · max |ξ_exact| at
//   every radius.
// - A scalar radius returns a scalar on both paths.
fn matter_correlation_paths_agree() {
    let profiles = HaloProfiles::analytic();
    let cases = [(toy_spectrum(), radii()), (tail_spectrum(), vec![0.1, 1.0, 10.0, 50.0, 100.0])];

    for ((k, p), rs) in &cases {
        // Arrange
        let spectrum = Spectrum::new(k, p).expect("matching lengths");

        // Act
        let approx = profiles.xi_mm_at_r(rs, &spectrum, &MatterOptions::default()).expect("ok");
        let exact = profiles.xi_mm_at_r(rs, &spectrum, &MatterOptions::exact()).expect("ok");

        // Assert
        let exact = exact.to_vec();
        let scale = exact.iter().fold(0.0f64, |acc, v| acc.max(v.abs()));
        for ((r, a), e) in rs.iter().zip(approx.to_vec()).zip(&exact) {
            let tolerance = 1e-3 * e.abs() + 1e-6 * scale;
            assert!((a - e).abs() <= tolerance, "r = {r}: approx {a} vs exact {e}");
        }
        for options in [MatterOptions::default(), MatterOptions::exact()] {
            let single = profiles.xi_mm_at_r(1.0, &spectrum, &options).expect("ok");
            assert!(single.is_scalar());
        }
    }
}

#[test]
// Purpose
// -------
// The composite halo-model entry point equals the manual chain of its
// parts.
//
// Given
// -----
// - M = 1e14, c = 5, Ω_m = 0.3, bias from the Tinker (2010) fit.
//
// Expect
// ------
// - `xi_hm_at_r` equals `xi_hm(xi_nfw, xi_2halo(bias, xi_mm))` exactly, for
//   both combination rules.
fn halo_model_chain_matches_composite_entry_point() {
    // Arrange
    let profiles = HaloProfiles::analytic();
    let (k, p) = toy_spectrum();
    let spectrum = Spectrum::new(&k, &p).expect("matching lengths");
    let bias = profiles
        .bias_at_m(1e14, &spectrum, 0.3, DEFAULT_DELTA)
        .expect("valid")
        .scalar()
        .expect("scalar mass");
    assert!(bias > 0.0);

    let one = profiles.xi_nfw_at_r(radii(), 1e14, 5.0, 0.3).expect("valid");
    let xi_mm = profiles.xi_mm_at_r(radii(), &spectrum, &MatterOptions::default()).expect("ok");
    let two = profiles.xi_2halo(bias, &xi_mm).expect("valid");

    for combination in [Combination::Max, Combination::Sum] {
        // Act
        let manual = profiles.xi_hm(&one, &two, combination).expect("same length");
        let composite = profiles
            .xi_hm_at_r(
                radii(),
                1e14,
                5.0,
                0.3,
                bias,
                &spectrum,
                &HaloModelOptions::with_combination(combination),
            )
            .expect("valid");

        // Assert
        assert_eq!(manual, composite, "{combination}");
    }
}

#[test]
fn combination_rules_on_evaluated_terms() {
    let profiles = HaloProfiles::analytic();
    let one = vec![1.0, 2.0, 3.0];
    let two = vec![3.0, 2.0, 1.0];

    let max = profiles.xi_hm(&one, &two, Combination::Max).expect("same length");
    let sum = profiles.xi_hm(&one, &two, Combination::Sum).expect("same length");
    assert_eq!(max.to_vec(), vec![3.0, 2.0, 3.0]);
    assert_eq!(sum.to_vec(), vec![4.0, 4.0, 4.0]);

    assert!(matches!(
        Combination::from_name(Some("avg")),
        Err(ProfileError::UnknownCombination { .. })
    ));
    assert!(matches!(
        profiles.xi_hm(&one, vec![1.0, 2.0], Combination::Max),
        Err(ProfileError::LengthMismatch { .. })
    ));
}

#[test]
fn diemer_kravtsov_profile_is_finite_and_falls_with_radius() {
    let profiles = HaloProfiles::analytic();
    let (k, p) = toy_spectrum();
    let spectrum = Spectrum::new(&k, &p).expect("matching lengths");

    let xi = profiles
        .xi_dk(radii(), 1e14, 5.0, 1.0, 1.5, &spectrum, 0.3, &DkOptions::default())
        .expect("valid")
        .to_vec();

    assert!(xi.iter().all(|v| v.is_finite()));
    for pair in xi.windows(2) {
        assert!(pair[1] < pair[0], "{xi:?}");
    }
}

// ---- Peak height, bias, mass function ----

#[test]
fn peak_height_is_collapse_threshold_over_sigma() {
    let profiles = HaloProfiles::analytic();
    let (k, p) = toy_spectrum();
    let spectrum = Spectrum::new(&k, &p).expect("matching lengths");
    let masses = vec![1e13, 1e14, 1e15];

    let s2 = profiles.sigma2_at_m(&masses, &spectrum, 0.3).expect("valid").to_vec();
    let nu = profiles.nu_at_m(&masses, &spectrum, 0.3).expect("valid").to_vec();

    assert_strictly_increasing(&nu, "nu_at_m");
    for (s2, nu) in s2.iter().zip(&nu) {
        assert_relative_eq!(nu * s2.sqrt(), DELTA_C, max_relative = 1e-12);
    }

    let bias = profiles.bias_at_m(&masses, &spectrum, 0.3, DEFAULT_DELTA).expect("valid");
    assert_strictly_increasing(&bias.to_vec(), "bias_at_m");
}

#[test]
fn multiplicity_at_mass_chains_through_sigma() {
    let profiles = HaloProfiles::analytic();
    let (k, p) = toy_spectrum();
    let spectrum = Spectrum::new(&k, &p).expect("matching lengths");
    let params = MassFunctionParams::default();

    let s2 = profiles.sigma2_at_m(1e14, &spectrum, 0.3).expect("valid").scalar().expect("scalar");
    let direct = profiles.g_at_sigma(s2.sqrt(), &params).expect("valid");
    let chained = profiles.g_at_m(1e14, &spectrum, 0.3, &params).expect("valid");

    assert_eq!(direct, chained);
}

#[test]
// Purpose
// -------
// Bin counts integrate a tabulated dn/dM; lighter bins hold more halos.
//
// Given
// -----
// - dn/dM tabulated on 50 log-spaced masses in [1e13, 1e15].
// - Edges [2e13, 1e14, 5e14].
//
// Expect
// ------
// - Two positive counts, the first larger.
// - `n_in_bin` over the first bin equals the first count.
// - A single edge is rejected before integration.
fn mass_function_bins_are_positive_and_consistent() {
    // Arrange
    let profiles = HaloProfiles::analytic();
    let (k, p) = toy_spectrum();
    let spectrum = Spectrum::new(&k, &p).expect("matching lengths");
    let masses: Vec<f64> = (0..50).map(|i| 10f64.powf(13.0 + 2.0 * i as f64 / 49.0)).collect();
    let dndm = profiles
        .dndm_at_m(&masses, &spectrum, 0.3, &MassFunctionParams::default())
        .expect("valid")
        .to_vec();
    assert!(dndm.iter().all(|&v| v > 0.0));
    let table = MassTable::new(&masses, &dndm).expect("matching lengths");

    // Act
    let counts = profiles.n_in_bins(vec![2e13, 1e14, 5e14], &table).expect("inside table");
    let first = profiles.n_in_bin(2e13, 1e14, &table).expect("inside table");

    // Assert
    assert_eq!(counts.len(), 2);
    assert!(counts[0] > counts[1] && counts[1] > 0.0, "{counts:?}");
    assert_relative_eq!(first, counts[0], max_relative = 1e-12);
    assert!(matches!(
        profiles.n_in_bins(1e14, &table),
        Err(ProfileError::TooFewEdges { len: 1 })
    ));
}

#[test]
fn non_positive_power_surfaces_as_kernel_failure() {
    let profiles = HaloProfiles::analytic();
    let k = [0.01, 0.1, 1.0];
    let p = [1.0, -1.0, 1.0];
    let spectrum = Spectrum::new(&k, &p).expect("matching lengths");

    let err = profiles
        .sigma2_at_r(8.0, &spectrum)
        .expect_err("log–log interpolation needs positive power");
    assert_eq!(err.kind(), ErrorKind::Kernel);
}

#[test]
fn crate_level_functions_match_analytic_evaluator() {
    let profiles = HaloProfiles::analytic();
    assert_eq!(
        halo_profiles::profiles::models::xi_nfw_at_r(radii(), 1e14, 5.0, 0.3).expect("valid"),
        profiles.xi_nfw_at_r(radii(), 1e14, 5.0, 0.3).expect("valid")
    );
    assert_eq!(
        halo_profiles::profiles::models::bias_at_nu(2.0).expect("valid"),
        profiles.bias_at_nu(2.0, DEFAULT_DELTA).expect("valid")
    );
}
