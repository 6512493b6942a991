//! Linear halo bias of Tinker et al. (2010) as a function of peak height.
use crate::physics::DELTA_C;

/// b(ν) for halos defined at mean overdensity `delta`.
pub fn bias_tinker10(nu: f64, delta: f64) -> f64 {
    let y = delta.log10();
    let cutoff = (-(4.0 / y).powi(4)).exp();
    let big_a = 1.0 + 0.24 * y * cutoff;
    let a = 0.44 * y - 0.88;
    let big_b = 0.183;
    let b = 1.5;
    let big_c = 0.019 + 0.107 * y + 0.19 * cutoff;
    let c = 2.4;
    let nu_a = nu.powf(a);
    1.0 - big_a * nu_a / (nu_a + DELTA_C.powf(a)) + big_b * nu.powf(b) + big_c * nu.powf(c)
}
