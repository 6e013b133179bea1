//! Yield-to-maturity solver.
//!
//! Inverts [`price_from_ytm`](super::price_from_ytm) with a bracketed
//! Newton-Raphson search that falls back to bisection whenever a Newton
//! step would leave the bracket. The analytic derivative of price with
//! respect to yield drives the Newton steps.
//!
//! # Example
//!
//! ```rust
//! use convex_bonds::instruments::FixedRateBond;
//! use convex_bonds::pricing::YieldSolver;
//! use convex_core::types::Date;
//! use rust_decimal_macros::dec;
//!
//! let bond = FixedRateBond::builder()
//!     .issue_date(Date::from_ymd(2020, 1, 1).unwrap())
//!     .maturity(Date::from_ymd(2030, 1, 1).unwrap())
//!     .coupon_rate(dec!(0.05))
//!     .build()
//!     .unwrap();
//!
//! let settlement = Date::from_ymd(2023, 1, 1).unwrap();
//! let result = YieldSolver::new().solve(&bond, settlement, 100.0).unwrap();
//! assert!((result.yield_value - 0.05).abs() < 1e-9);
//! ```

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use convex_core::types::Date;
use convex_math::solvers::{
    hybrid, SolverConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_STEP_TOLERANCE, DEFAULT_TOLERANCE,
};
use convex_math::MathError;

use super::{
    accrued_interest, check_conventions, discount_base, present_value, present_value_derivative,
};
use crate::cashflows::{
    check_settlement, remaining_cash_flows, settlement_out_of_range, ProjectedCashFlow,
};
use crate::error::{BondError, BondResult};
use crate::instruments::FixedRateBond;
use crate::FACE_VALUE;

/// Result of a yield calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YieldResult {
    /// The calculated yield (as a decimal, e.g., 0.05 for 5%).
    pub yield_value: f64,
    /// Number of iterations to converge.
    pub iterations: u32,
    /// Final price residual (should be near zero).
    pub residual: f64,
}

/// Tunable limits of the yield search.
///
/// Defaults: price tolerance 1e-8, yield step tolerance 1e-10, 100
/// iterations, bracket `[-0.5, 2.0]`, clean price ceiling of 10x face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Converged once `|price(y) - target| <` this.
    pub price_tolerance: f64,
    /// Converged once a yield step is smaller than this.
    pub yield_step_tolerance: f64,
    /// Iteration cap.
    pub max_iterations: u32,
    /// Lowest yield searched.
    pub lower_bound: f64,
    /// Highest yield searched.
    pub upper_bound: f64,
    /// Clean prices above `max_price_multiple * 100` are rejected.
    pub max_price_multiple: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            price_tolerance: DEFAULT_TOLERANCE,
            yield_step_tolerance: DEFAULT_STEP_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            lower_bound: -0.5,
            upper_bound: 2.0,
            max_price_multiple: 10.0,
        }
    }
}

impl SolverSettings {
    /// Checks the settings describe a usable search.
    ///
    /// # Errors
    ///
    /// Returns `BondError::SolverError` if a tolerance is not positive, the
    /// bracket is empty, or the lower bound would make the annual discount
    /// base non-positive.
    pub fn validate(&self) -> BondResult<()> {
        fn invalid(reason: String) -> BondResult<()> {
            Err(MathError::invalid_input(reason).into())
        }

        if !(self.price_tolerance > 0.0 && self.yield_step_tolerance > 0.0) {
            return invalid(format!(
                "tolerances must be positive (price {}, step {})",
                self.price_tolerance, self.yield_step_tolerance
            ));
        }
        if self.max_iterations == 0 {
            return invalid("max_iterations must be at least 1".to_string());
        }
        if !(self.lower_bound > -1.0 && self.lower_bound < self.upper_bound)
            || !self.upper_bound.is_finite()
        {
            return invalid(format!(
                "yield bracket [{}, {}] must be finite, ordered and above -1",
                self.lower_bound, self.upper_bound
            ));
        }
        if !(self.max_price_multiple > 0.0) {
            return invalid(format!(
                "max_price_multiple {} must be positive",
                self.max_price_multiple
            ));
        }
        Ok(())
    }

    /// Root finder configuration for these settings.
    #[must_use]
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig::new(
            self.price_tolerance,
            self.yield_step_tolerance,
            self.max_iterations,
        )
    }
}

/// Yield-to-maturity solver.
#[derive(Debug, Clone, Default)]
pub struct YieldSolver {
    settings: SolverSettings,
}

impl YieldSolver {
    /// Creates a new yield solver with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a solver with explicit settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings fail [`SolverSettings::validate`].
    pub fn with_settings(settings: SolverSettings) -> BondResult<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    /// Returns the solver settings.
    #[must_use]
    pub fn settings(&self) -> &SolverSettings {
        &self.settings
    }

    /// Solves for the yield that reproduces `clean_price` at `settlement`.
    ///
    /// # Errors
    ///
    /// - `BondError::PriceOutOfBounds` if the price is not positive, exceeds
    ///   the ceiling, or no yield inside the bracket reproduces it
    /// - `BondError::SettlementOutOfRange` outside `[issue, maturity)`; at
    ///   maturity every yield gives the same price
    /// - `BondError::YieldNotConverged` if the iteration cap is reached
    pub fn solve(
        &self,
        bond: &FixedRateBond,
        settlement: Date,
        clean_price: f64,
    ) -> BondResult<YieldResult> {
        check_conventions(bond)?;

        let ceiling = self.settings.max_price_multiple * FACE_VALUE;
        if !clean_price.is_finite() || clean_price <= 0.0 {
            return Err(BondError::price_out_of_bounds(
                clean_price,
                "clean price must be positive",
            ));
        }
        if clean_price > ceiling {
            return Err(BondError::price_out_of_bounds(
                clean_price,
                format!("clean price exceeds the ceiling of {}", ceiling),
            ));
        }

        check_settlement(bond, settlement)?;
        if settlement == bond.maturity() {
            return Err(settlement_out_of_range(
                bond,
                settlement,
                "yield is undefined at maturity",
            ));
        }

        let accrued = accrued_interest(bond, settlement)?;
        let target = clean_price + accrued;
        let flows = remaining_cash_flows(bond, settlement)?;
        let periods_per_year = f64::from(bond.periods_per_year());

        let lower = self.settings.lower_bound;
        let upper = self.settings.upper_bound;
        let base_lower = discount_base(bond, lower)?;
        let base_upper = discount_base(bond, upper)?;

        let highest = present_value(&flows, base_lower);
        let lowest = present_value(&flows, base_upper);
        if target > highest {
            return Err(BondError::price_out_of_bounds(
                clean_price,
                format!(
                    "dirty price {:.6} is above {:.6}, the price at yield {}",
                    target, highest, lower
                ),
            ));
        }
        if target < lowest {
            return Err(BondError::price_out_of_bounds(
                clean_price,
                format!(
                    "dirty price {:.6} is below {:.6}, the price at yield {}",
                    target, lowest, upper
                ),
            ));
        }

        let objective = |y: f64| present_value(&flows, 1.0 + y / periods_per_year) - target;
        let derivative = |y: f64| {
            present_value_derivative(&flows, 1.0 + y / periods_per_year, periods_per_year)
        };

        let guess = self.initial_guess(bond, &flows, clean_price);
        let config = self.settings.solver_config();

        match hybrid(objective, derivative, guess, (lower, upper), &config) {
            Ok(result) => {
                debug!(
                    "solved ytm {:.10} for clean price {} in {} iterations (residual {:.2e})",
                    result.root, clean_price, result.iterations, result.residual
                );
                Ok(YieldResult {
                    yield_value: result.root,
                    iterations: result.iterations,
                    residual: result.residual,
                })
            }
            Err(MathError::ConvergenceFailed {
                iterations,
                residual,
            }) => {
                warn!(
                    "ytm solve for clean price {} stopped after {} iterations (residual {:.2e})",
                    clean_price, iterations, residual
                );
                Err(BondError::YieldNotConverged {
                    iterations,
                    residual,
                })
            }
            Err(MathError::InvalidBracket { a, b, .. }) => Err(BondError::price_out_of_bounds(
                clean_price,
                format!("no yield in [{}, {}] reproduces the price", a, b),
            )),
            Err(err) => Err(err.into()),
        }
    }

    /// Textbook yield approximation `(C + (100 - P) / n) / ((100 + P) / 2)`,
    /// clamped into the bracket.
    fn initial_guess(
        &self,
        bond: &FixedRateBond,
        flows: &[ProjectedCashFlow],
        clean_price: f64,
    ) -> f64 {
        let annual_coupon = bond.coupon_per_period() * f64::from(bond.periods_per_year());
        let years = flows
            .last()
            .map_or(0.0, |cf| cf.years(bond.periods_per_year()));

        let guess = if years > 0.0 {
            (annual_coupon + (FACE_VALUE - clean_price) / years) / ((FACE_VALUE + clean_price) / 2.0)
        } else {
            annual_coupon / FACE_VALUE
        };

        if guess.is_finite() {
            guess.clamp(self.settings.lower_bound, self.settings.upper_bound)
        } else {
            0.5 * (self.settings.lower_bound + self.settings.upper_bound)
        }
    }
}

/// Solves the yield for `clean_price` with default [`SolverSettings`].
pub fn ytm_from_price(
    bond: &FixedRateBond,
    settlement: Date,
    clean_price: f64,
) -> BondResult<YieldResult> {
    YieldSolver::default().solve(bond, settlement, clean_price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::price_from_ytm;
    use approx::assert_relative_eq;
    use convex_core::daycounts::DayCountConvention;
    use convex_core::types::Frequency;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn ten_year() -> FixedRateBond {
        FixedRateBond::new(
            date(2020, 1, 1),
            date(2030, 1, 1),
            dec!(0.05),
            Frequency::SemiAnnual,
            DayCountConvention::ActActIsda,
        )
        .unwrap()
    }

    #[test]
    fn test_default_settings() {
        let settings = SolverSettings::default();
        assert_eq!(settings.price_tolerance, 1e-8);
        assert_eq!(settings.yield_step_tolerance, 1e-10);
        assert_eq!(settings.max_iterations, 100);
        assert_eq!(settings.lower_bound, -0.5);
        assert_eq!(settings.upper_bound, 2.0);
        assert_eq!(settings.max_price_multiple, 10.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_invalid_settings() {
        let settings = SolverSettings {
            lower_bound: 1.0,
            upper_bound: 0.5,
            ..SolverSettings::default()
        };
        assert!(matches!(
            YieldSolver::with_settings(settings),
            Err(BondError::SolverError(MathError::InvalidInput { .. }))
        ));
    }

    #[test]
    fn test_partial_settings_deserialize() {
        let settings: SolverSettings = serde_json::from_str(r#"{"max_iterations": 20}"#).unwrap();
        assert_eq!(settings.max_iterations, 20);
        assert_eq!(settings.upper_bound, 2.0);
    }

    #[test]
    fn test_par_yield() {
        let bond = ten_year();
        let result = ytm_from_price(&bond, date(2023, 1, 1), 100.0).unwrap();
        assert_relative_eq!(result.yield_value, 0.05, epsilon = 1e-9);
        assert!(result.iterations <= 100);
    }

    #[test]
    fn test_round_trip_mid_period() {
        let bond = ten_year();
        let settlement = date(2024, 5, 17);
        for ytm in [-0.05, 0.0, 0.0325, 0.12, 0.4] {
            let price = price_from_ytm(&bond, settlement, ytm).unwrap();
            let solved = ytm_from_price(&bond, settlement, price.clean_price).unwrap();
            assert_relative_eq!(solved.yield_value, ytm, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_price_not_positive() {
        let bond = ten_year();
        for price in [0.0, -5.0, f64::NAN] {
            assert!(matches!(
                ytm_from_price(&bond, date(2023, 1, 1), price),
                Err(BondError::PriceOutOfBounds { .. })
            ));
        }
    }

    #[test]
    fn test_price_above_ceiling() {
        let bond = ten_year();
        assert!(matches!(
            ytm_from_price(&bond, date(2023, 1, 1), 1000.01),
            Err(BondError::PriceOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_price_unreachable_inside_bracket() {
        let bond = ten_year();
        // below the price at a 200% yield
        assert!(matches!(
            ytm_from_price(&bond, date(2023, 1, 1), 1.0),
            Err(BondError::PriceOutOfBounds { .. })
        ));
        // one period left: 102.5 / 0.75 is the most any yield can justify
        assert!(matches!(
            ytm_from_price(&bond, date(2029, 7, 1), 900.0),
            Err(BondError::PriceOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_at_maturity() {
        let bond = ten_year();
        assert!(matches!(
            ytm_from_price(&bond, bond.maturity(), 100.0),
            Err(BondError::SettlementOutOfRange { .. })
        ));
    }

    #[test]
    fn test_iteration_cap() {
        let settings = SolverSettings {
            price_tolerance: 1e-300,
            yield_step_tolerance: 1e-300,
            max_iterations: 1,
            ..SolverSettings::default()
        };
        let solver = YieldSolver::with_settings(settings).unwrap();
        let result = solver.solve(&ten_year(), date(2023, 1, 1), 87.3);
        assert!(matches!(
            result,
            Err(BondError::YieldNotConverged { iterations: 1, .. })
        ));
    }
}
