//! Monotone cubic Hermite interpolation and log–log power-spectrum lookup.
//!
//! Slopes follow Fritsch–Carlson, so the interpolant never overshoots
//! between knots. Integrals of the interpolant are exact (two-point
//! Gauss–Legendre on each cubic segment).
//!
//! Errors are returned as plain reasons; the analytic kernel attaches its
//! entry-point name when converting them into `ProfileError::KernelFailure`.

/// Monotone cubic Hermite interpolant through `(x, y)` knots.
#[derive(Debug, Clone, PartialEq)]
pub struct MonotoneCubic {
    x: Vec<f64>,
    y: Vec<f64>,
    m: Vec<f64>,
}

impl MonotoneCubic {
    /// Build from knots with strictly increasing, finite `x` and finite `y`.
    pub fn new(x: &[f64], y: &[f64]) -> Result<Self, String> {
        if x.len() != y.len() {
            return Err(format!("knot lengths differ ({} vs {})", x.len(), y.len()));
        }
        if x.len() < 2 {
            return Err(format!("need at least 2 knots, got {}", x.len()));
        }
        if let Some(i) = (0..x.len()).find(|&i| !x[i].is_finite() || !y[i].is_finite()) {
            return Err(format!("non-finite knot at index {i}: ({}, {})", x[i], y[i]));
        }
        if let Some(i) = (1..x.len()).find(|&i| x[i] <= x[i - 1]) {
            return Err(format!("abscissae must be strictly increasing at index {i}"));
        }
        let m = fritsch_carlson_slopes(x, y);
        Ok(MonotoneCubic { x: x.to_vec(), y: y.to_vec(), m })
    }

    pub fn x_min(&self) -> f64 {
        self.x[0]
    }

    pub fn x_max(&self) -> f64 {
        self.x[self.x.len() - 1]
    }

    /// Evaluate at `t`. Outside the knot range the end segments extrapolate.
    pub fn eval(&self, t: f64) -> f64 {
        let i = self.segment(t);
        self.eval_segment(i, t)
    }

    /// ∫ₐᵇ of the interpolant; requires `x_min ≤ a ≤ b ≤ x_max`.
    pub fn integrate(&self, a: f64, b: f64) -> Result<f64, String> {
        if !(a >= self.x_min() && b <= self.x_max() && a <= b) {
            return Err(format!(
                "integration bounds [{a}, {b}] outside the table range [{}, {}]",
                self.x_min(),
                self.x_max()
            ));
        }
        let first = self.segment(a);
        let last = self.segment(b);
        let mut total = 0.0;
        for i in first..=last {
            let lo = a.max(self.x[i]);
            let hi = b.min(self.x[i + 1]);
            if hi > lo {
                total += self.integrate_segment(i, lo, hi);
            }
        }
        Ok(total)
    }

    /// Index `i` such that `x[i] <= t < x[i + 1]`, clamped to valid segments.
    fn segment(&self, t: f64) -> usize {
        let upper = self.x.partition_point(|&xi| xi <= t);
        upper.saturating_sub(1).min(self.x.len() - 2)
    }

    fn eval_segment(&self, i: usize, t: f64) -> f64 {
        let h = self.x[i + 1] - self.x[i];
        let s = (t - self.x[i]) / h;
        let h00 = (1.0 + 2.0 * s) * (1.0 - s) * (1.0 - s);
        let h10 = s * (1.0 - s) * (1.0 - s);
        let h01 = s * s * (3.0 - 2.0 * s);
        let h11 = s * s * (s - 1.0);
        h00 * self.y[i] + h10 * h * self.m[i] + h01 * self.y[i + 1] + h11 * h * self.m[i + 1]
    }

    fn integrate_segment(&self, i: usize, lo: f64, hi: f64) -> f64 {
        // Two-point Gauss–Legendre is exact for cubics.
        const NODE: f64 = 0.577_350_269_189_625_8;
        let mid = 0.5 * (lo + hi);
        let half = 0.5 * (hi - lo);
        half * (self.eval_segment(i, mid - half * NODE) + self.eval_segment(i, mid + half * NODE))
    }
}

/// Fritsch–Carlson slopes for strictly increasing `x`.
fn fritsch_carlson_slopes(x: &[f64], y: &[f64]) -> Vec<f64> {
    let k = x.len();
    let delta: Vec<f64> = (0..k - 1).map(|i| (y[i + 1] - y[i]) / (x[i + 1] - x[i])).collect();

    let mut m = vec![0.0; k];
    m[0] = delta[0];
    for i in 1..k - 1 {
        m[i] = if delta[i - 1].signum() != delta[i].signum() {
            0.0
        } else {
            0.5 * (delta[i - 1] + delta[i])
        };
    }
    m[k - 1] = delta[k - 2];

    for i in 0..k - 1 {
        if delta[i].abs() < 1e-300 {
            m[i] = 0.0;
            m[i + 1] = 0.0;
            continue;
        }
        let alpha = m[i] / delta[i];
        let beta = m[i + 1] / delta[i];
        let phi = alpha * alpha + beta * beta;
        if phi > 9.0 {
            let tau = 3.0 / phi.sqrt();
            m[i] = tau * alpha * delta[i];
            m[i + 1] = tau * beta * delta[i];
        }
    }
    m
}

/// Power spectrum P(k) interpolated in (ln k, ln P).
#[derive(Debug, Clone, PartialEq)]
pub struct LogLogSpectrum {
    spline: MonotoneCubic,
}

impl LogLogSpectrum {
    /// Requires strictly positive `k` and `p` of equal length ≥ 2.
    pub fn new(k: &[f64], p: &[f64]) -> Result<Self, String> {
        if let Some(i) = k.iter().zip(p).position(|(&ki, &pi)| !(ki > 0.0 && pi > 0.0)) {
            return Err(format!(
                "power spectrum must be strictly positive for log-log interpolation; \
                 index {i} has k = {}, P = {}",
                k[i], p[i]
            ));
        }
        let ln_k: Vec<f64> = k.iter().map(|v| v.ln()).collect();
        let ln_p: Vec<f64> = p.iter().map(|v| v.ln()).collect();
        Ok(LogLogSpectrum { spline: MonotoneCubic::new(&ln_k, &ln_p)? })
    }

    pub fn ln_k_min(&self) -> f64 {
        self.spline.x_min()
    }

    pub fn ln_k_max(&self) -> f64 {
        self.spline.x_max()
    }

    /// P at `ln k`.
    pub fn power_at_ln_k(&self, ln_k: f64) -> f64 {
        self.spline.eval(ln_k).exp()
    }
}
