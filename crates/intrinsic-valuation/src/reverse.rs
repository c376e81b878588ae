//! Reverse DCF
//!
//! Recovers the growth rate the market price implies by inverting the forward
//! model with bisection. The forward value is monotonically increasing in the
//! growth rate for positive free cash flow, so the bracket halves each step:
//! an estimate above the price moves the upper bound down, otherwise the lower
//! bound moves up.

use crate::dcf::DcfModel;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Bisection solver configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Lower bound of the growth bracket (default: -0.50)
    pub lower: f64,
    /// Upper bound of the growth bracket (default: 1.00)
    pub upper: f64,
    /// Accepted absolute gap between estimate and price (default: 0.001)
    pub tolerance: f64,
    /// Iteration cap (default: 100)
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            lower: -0.50,
            upper: 1.00,
            tolerance: 0.001,
            max_iterations: 100,
        }
    }
}

/// Outcome of a reverse-DCF solve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpliedGrowth {
    /// Implied growth rate (fraction)
    pub rate: f64,
    /// Iterations performed
    pub iterations: u32,
    /// |estimate - price| at `rate`; `None` for degenerate input
    pub residual: Option<f64>,
    /// Whether the tolerance was met
    pub converged: bool,
}

impl ImpliedGrowth {
    const fn degenerate() -> Self {
        Self {
            rate: 0.0,
            iterations: 0,
            residual: None,
            converged: false,
        }
    }
}

/// Reverse DCF solver over a forward model
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReverseDcf {
    model: DcfModel,
    solver: SolverConfig,
}

impl ReverseDcf {
    /// Create a solver
    pub const fn new(model: DcfModel, solver: SolverConfig) -> Self {
        Self { model, solver }
    }

    /// Solve for the implied growth rate.
    ///
    /// Returns rate 0 without iterating when shares is zero, or price or free
    /// cash flow is not positive. Without convergence the midpoint of the final
    /// bracket is returned.
    pub fn solve(&self, price: f64, initial_fcf: f64, shares: f64) -> ImpliedGrowth {
        if shares == 0.0 || price <= 0.0 || initial_fcf <= 0.0 {
            return ImpliedGrowth::degenerate();
        }

        let value_at = |g: f64| self.model.intrinsic_value_per_share(initial_fcf, g, shares);
        let (mut lower, mut upper) = (self.solver.lower, self.solver.upper);

        for iteration in 1..=self.solver.max_iterations {
            let mid = (lower + upper) / 2.0;
            let estimate = value_at(mid);
            let residual = (estimate - price).abs();

            if residual < self.solver.tolerance {
                return ImpliedGrowth {
                    rate: mid,
                    iterations: iteration,
                    residual: Some(residual),
                    converged: true,
                };
            }

            if estimate > price {
                upper = mid;
            } else {
                lower = mid;
            }
        }

        let rate = (lower + upper) / 2.0;
        let residual = (value_at(rate) - price).abs();
        debug!(
            price,
            rate,
            residual,
            iterations = self.solver.max_iterations,
            "reverse DCF did not converge"
        );

        ImpliedGrowth {
            rate,
            iterations: self.solver.max_iterations,
            residual: Some(residual),
            converged: false,
        }
    }

    /// Implied growth rate only.
    pub fn implied_growth_rate(&self, price: f64, initial_fcf: f64, shares: f64) -> f64 {
        self.solve(price, initial_fcf, shares).rate
    }
}
