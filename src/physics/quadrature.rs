//! Gauss–Legendre quadrature on bounded intervals.
//!
//! Nodes and weights are computed once per rule with Newton iteration on the
//! Legendre polynomial P_n, exploiting symmetry. Rules are immutable after
//! construction and can be shared across threads.

/// Gauss–Legendre rule on `[-1, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussLegendre {
    nodes: Vec<f64>,
    weights: Vec<f64>,
}

impl GaussLegendre {
    /// Build an `n`-point rule. `n == 0` yields an empty rule that integrates
    /// everything to zero.
    pub fn new(n: usize) -> Self {
        let mut nodes = vec![0.0; n];
        let mut weights = vec![0.0; n];
        if n == 0 {
            return GaussLegendre { nodes, weights };
        }
        if n == 1 {
            weights[0] = 2.0;
            return GaussLegendre { nodes, weights };
        }

        let nf = n as f64;
        for i in 0..n.div_ceil(2) {
            // Chebyshev-like initial guess, then Newton on P_n.
            let mut x = (std::f64::consts::PI * (i as f64 + 0.75) / (nf + 0.5)).cos();
            for _ in 0..100 {
                let (p_n, dp_n) = legendre_with_derivative(n, x);
                let dx = p_n / dp_n;
                x -= dx;
                if dx.abs() < 1e-15 {
                    break;
                }
            }
            let (_, dp_n) = legendre_with_derivative(n, x);
            let w = 2.0 / ((1.0 - x * x) * dp_n * dp_n);

            nodes[i] = -x;
            nodes[n - 1 - i] = x;
            weights[i] = w;
            weights[n - 1 - i] = w;
        }

        GaussLegendre { nodes, weights }
    }

    pub fn order(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> &[f64] {
        &self.nodes
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// ∫ₐᵇ f(x) dx with this rule on a single panel.
    pub fn integrate<F>(&self, a: f64, b: f64, mut f: F) -> f64
    where
        F: FnMut(f64) -> f64,
    {
        let half = 0.5 * (b - a);
        let mid = 0.5 * (a + b);
        let sum: f64 =
            self.nodes.iter().zip(&self.weights).map(|(&x, &w)| w * f(mid + half * x)).sum();
        sum * half
    }

    /// ∫ₐᵇ f(x) dx over equal panels no wider than `max_width`.
    pub fn integrate_panels<F>(&self, a: f64, b: f64, max_width: f64, mut f: F) -> f64
    where
        F: FnMut(f64) -> f64,
    {
        if a.is_nan() || b.is_nan() || b <= a {
            return 0.0;
        }
        let panels = ((b - a) / max_width).ceil().max(1.0) as usize;
        let width = (b - a) / panels as f64;
        (0..panels)
            .map(|i| {
                let lo = a + width * i as f64;
                let hi = if i + 1 == panels { b } else { lo + width };
                self.integrate(lo, hi, &mut f)
            })
            .sum()
    }
}

/// P_n(x) and P'_n(x) via the three-term recurrence.
fn legendre_with_derivative(n: usize, x: f64) -> (f64, f64) {
    let mut p0 = 1.0;
    let mut p1 = x;
    for j in 2..=n {
        let jf = j as f64;
        let p2 = ((2.0 * jf - 1.0) * x * p1 - (jf - 1.0) * p0) / jf;
        p0 = p1;
        p1 = p2;
    }
    let dp = n as f64 * (x * p1 - p0) / (x * x - 1.0);
    (p1, dp)
}
