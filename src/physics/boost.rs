//! Boost-factor closed forms: B(R) = (1 - f_cl)⁻¹.

/// Projected NFW boost factor at every `R`, with amplitude `b0` and scale
/// radius `r_scale` in the same units as `R`.
pub fn boost_nfw(radii: &[f64], b0: f64, r_scale: f64, out: &mut [f64]) {
    for (o, &r) in out.iter_mut().zip(radii) {
        let x = r / r_scale;
        *o = if x == 1.0 { 1.0 + b0 / 3.0 } else { 1.0 + b0 * (1.0 - nfw_projection(x)) / (x * x - 1.0) };
    }
}

/// Power-law boost factor `1 + B0 (R / R_s)^α`.
pub fn boost_powerlaw(radii: &[f64], b0: f64, r_scale: f64, alpha: f64, out: &mut [f64]) {
    for (o, &r) in out.iter_mut().zip(radii) {
        *o = 1.0 + b0 * (r / r_scale).powf(alpha);
    }
}

/// Projection kernel of the NFW surface density; f(1) = 1.
fn nfw_projection(x: f64) -> f64 {
    if x < 1.0 {
        let s = (1.0 - x * x).sqrt();
        s.atanh() / s
    } else if x > 1.0 {
        let s = (x * x - 1.0).sqrt();
        s.atan() / s
    } else {
        1.0
    }
}
