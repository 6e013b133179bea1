//! Root-finding algorithms.
//!
//! - [`hybrid`]: Newton-Raphson safeguarded by bisection inside a bracket
//!
//! Newton converges quadratically near a root but can overshoot on flat or
//! strongly curved functions. The hybrid keeps a sign-changing bracket and
//! falls back to a bisection step whenever the Newton step would leave it,
//! so it retains the guaranteed convergence of bisection.
//!
//! # Example: YTM Calculation
//!
//! ```rust
//! use convex_math::solvers::{hybrid, SolverConfig};
//!
//! // Bond: 5% annual coupon, 5 years, price 95
//! let price_fn = |y: f64| {
//!     let mut pv = 0.0;
//!     for t in 1..=5 {
//!         pv += 5.0 / (1.0 + y).powi(t);
//!     }
//!     pv += 100.0 / (1.0 + y).powi(5);
//!     pv - 95.0
//! };
//!
//! let d_price_fn = |y: f64| {
//!     let mut dpv = 0.0;
//!     for t in 1..=5 {
//!         dpv -= f64::from(t) * 5.0 / (1.0 + y).powi(t + 1);
//!     }
//!     dpv -= 5.0 * 100.0 / (1.0 + y).powi(6);
//!     dpv
//! };
//!
//! let result = hybrid(price_fn, d_price_fn, 0.05, (-0.5, 2.0), &SolverConfig::default()).unwrap();
//! assert!(result.root > 0.05);
//! ```

mod hybrid;

pub use hybrid::hybrid;

/// Default tolerance on the absolute function value.
pub const DEFAULT_TOLERANCE: f64 = 1e-8;

/// Default tolerance on the absolute step in the argument.
pub const DEFAULT_STEP_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
///
/// A solve converges when `|f(x)| < tolerance` or when the last step moved
/// `x` by less than `step_tolerance`, whichever happens first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Tolerance on `|f(x)|`.
    pub tolerance: f64,
    /// Tolerance on `|x_{n+1} - x_n|`.
    pub step_tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            step_tolerance: DEFAULT_STEP_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, step_tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            step_tolerance,
            max_iterations,
        }
    }

    /// Sets the function-value tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the step tolerance.
    #[must_use]
    pub fn with_step_tolerance(mut self, step_tolerance: f64) -> Self {
        self.step_tolerance = step_tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a root-finding operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
}
