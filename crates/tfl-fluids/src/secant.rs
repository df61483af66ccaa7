//! Secant root finder used by every table inversion.

use tracing::{debug, trace};

/// Secant solver configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SecantConfig {
    /// Maximum number of secant updates
    pub max_iterations: usize,
    /// Residual tolerance, relative to the magnitude of the seed
    pub rel_tol: f64,
    /// Factor applied to the seed to get the second starting point
    pub perturbation: f64,
}

impl Default for SecantConfig {
    fn default() -> Self {
        Self {
            max_iterations: 20,
            rel_tol: 1e-9,
            perturbation: 1.01,
        }
    }
}

/// Outcome of a secant solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecantSolution {
    /// Final estimate of the root
    pub x: f64,
    /// Function value at `x`
    pub residual: f64,
    /// Number of secant updates performed
    pub iterations: usize,
    /// Whether `|residual|` dropped below the tolerance
    pub converged: bool,
}

/// Find `x` with `f(x) ≈ 0` starting from `x0`.
///
/// The second starting point is `perturbation * x0`, or `x0 + (perturbation - 1)`
/// when `x0` is exactly zero. Iteration stops once `|f(x)| <= rel_tol * |x0|`,
/// after `max_iterations` updates, or when an update degenerates (equal
/// consecutive residuals or a non-finite step). The last evaluated point is
/// returned in every case; check `converged` to tell them apart.
pub fn secant<F>(x0: f64, mut f: F, config: &SecantConfig) -> SecantSolution
where
    F: FnMut(f64) -> f64,
{
    let tol = config.rel_tol * x0.abs();

    let mut x = x0;
    let mut y = f(x);
    let mut x_next = if x0 == 0.0 {
        x0 + (config.perturbation - 1.0)
    } else {
        config.perturbation * x0
    };

    let mut iterations = 0;
    while y.abs() > tol && iterations < config.max_iterations {
        let y_next = f(x_next);
        let dy = y - y_next;
        let dx = x - x_next;
        x = x_next;
        y = y_next;
        iterations += 1;

        let step = y_next * dx / dy;
        if !step.is_finite() {
            trace!(x, y, dy, "secant update degenerate");
            break;
        }
        x_next -= step;
    }

    let converged = y.abs() <= tol;
    if !converged {
        debug!(x0, x, residual = y, iterations, "secant exited without converging");
    }

    SecantSolution {
        x,
        residual: y,
        iterations,
        converged,
    }
}
