//! Hybrid root-finding algorithm.
//!
//! Newton-Raphson iterations confined to a bracket, with bisection as the
//! fallback step.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Hybrid Newton-Raphson / bisection root finder.
///
/// Requires a bracket `(a, b)` over which `f` changes sign. Each iteration
/// shrinks the bracket around the current iterate, then tries a Newton step
/// `x - f(x) / f'(x)`. If that step is not finite or leaves the bracket, the
/// midpoint of the bracket is taken instead.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `df` - The derivative of the function
/// * `initial_guess` - Starting point; the midpoint is used if it lies outside the bracket
/// * `bracket` - Interval `(a, b)` with `f(a)` and `f(b)` of opposite sign
/// * `config` - Solver configuration
///
/// # Errors
///
/// - `MathError::InvalidBracket` if `f` does not change sign over the bracket
/// - `MathError::InvalidInput` if `f` is not finite at a bracket end
/// - `MathError::ConvergenceFailed` if `config.max_iterations` is reached
///
/// # Example
///
/// ```rust
/// use convex_math::solvers::{hybrid, SolverConfig};
///
/// // Find root of x^3 - x - 2
/// let f = |x: f64| x * x * x - x - 2.0;
/// let df = |x: f64| 3.0 * x * x - 1.0;
///
/// let result = hybrid(f, df, 1.5, (1.0, 2.0), &SolverConfig::default()).unwrap();
/// assert!(f(result.root).abs() < 1e-8);
/// ```
pub fn hybrid<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    bracket: (f64, f64),
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let mut lo = bracket.0.min(bracket.1);
    let mut hi = bracket.0.max(bracket.1);

    let f_lo = f(lo);
    let f_hi = f(hi);

    if !f_lo.is_finite() || !f_hi.is_finite() {
        return Err(MathError::invalid_input(format!(
            "non-finite function value at bracket [{lo}, {hi}]"
        )));
    }

    // Handle case where endpoint is the root
    if f_lo.abs() < config.tolerance {
        return Ok(SolverResult {
            root: lo,
            iterations: 0,
            residual: f_lo,
        });
    }
    if f_hi.abs() < config.tolerance {
        return Ok(SolverResult {
            root: hi,
            iterations: 0,
            residual: f_hi,
        });
    }

    if f_lo.signum() == f_hi.signum() {
        return Err(MathError::InvalidBracket {
            a: lo,
            b: hi,
            fa: f_lo,
            fb: f_hi,
        });
    }

    // The lower end keeps the sign of f_lo for the whole solve
    let lo_sign = f_lo.signum();

    let mut x = if initial_guess > lo && initial_guess < hi {
        initial_guess
    } else {
        0.5 * (lo + hi)
    };
    let mut fx = f(x);

    for iteration in 0..config.max_iterations {
        if fx.abs() < config.tolerance {
            log::debug!("hybrid converged on residual: x={x}, iterations={iteration}");
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
            });
        }

        // Shrink the bracket around x
        if fx.signum() == lo_sign {
            lo = x;
        } else {
            hi = x;
        }

        let dfx = df(x);
        let newton = x - fx / dfx;
        let next = if newton.is_finite() && newton > lo && newton < hi {
            newton
        } else {
            0.5 * (lo + hi)
        };

        let step = next - x;
        x = next;
        fx = f(x);

        if step.abs() < config.step_tolerance {
            log::debug!(
                "hybrid converged on step: x={x}, iterations={}",
                iteration + 1
            );
            return Ok(SolverResult {
                root: x,
                iterations: iteration + 1,
                residual: fx,
            });
        }
    }

    if fx.abs() < config.tolerance {
        return Ok(SolverResult {
            root: x,
            iterations: config.max_iterations,
            residual: fx,
        });
    }

    log::warn!(
        "hybrid failed to converge after {} iterations (residual {fx:.2e})",
        config.max_iterations
    );
    Err(MathError::convergence_failed(config.max_iterations, fx.abs()))
}
