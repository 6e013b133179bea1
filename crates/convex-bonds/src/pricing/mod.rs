//! Bond pricing calculations.
//!
//! This module provides:
//! - [`accrued_interest`]: coupon accrued since the last coupon date
//! - [`price_from_ytm`]: clean and dirty price at a yield
//! - [`YieldSolver`]: yield-to-maturity from a clean price
//! - [`valuation_from_ytm`] / [`valuation_from_clean_price`]: price, yield
//!   and risk in one [`ValuationResult`]
//!
//! Every function is pure: results depend only on the bond, the settlement
//! date and the yield or price supplied.

mod yield_solver;

pub use yield_solver::{ytm_from_price, SolverSettings, YieldResult, YieldSolver};

use serde::{Deserialize, Serialize};

use convex_core::types::Date;

use crate::cashflows::{accrual_fraction, check_settlement, remaining_cash_flows, ProjectedCashFlow};
use crate::error::{BondError, BondResult};
use crate::instruments::FixedRateBond;
use crate::risk::RiskMetrics;

/// Clean price, dirty price and accrued interest per 100 face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceResult {
    /// Clean price (excluding accrued interest).
    pub clean_price: f64,
    /// Dirty price (including accrued interest).
    pub dirty_price: f64,
    /// Accrued interest.
    pub accrued_interest: f64,
}

/// Full valuation of a bond at one settlement date.
///
/// Field names are the external wire names; `macauley_duration` keeps the
/// spelling consumers already depend on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    /// Clean price per 100 face.
    pub clean_price: f64,
    /// Dirty price per 100 face.
    pub dirty_price: f64,
    /// Accrued interest per 100 face.
    pub accrued_interest: f64,
    /// Yield to maturity as a decimal.
    pub ytm: f64,
    /// Macaulay duration in years.
    #[serde(rename = "macauley_duration")]
    pub macaulay_duration: f64,
    /// Modified duration in years.
    pub modified_duration: f64,
    /// Convexity in years squared.
    pub convexity: f64,
}

/// Rejects day count and frequency pairs that cannot be priced.
///
/// Every convention works with every coupon-paying frequency; a frequency
/// with no periods per year cannot be discounted.
pub(crate) fn check_conventions(bond: &FixedRateBond) -> BondResult<()> {
    if bond.periods_per_year() == 0 {
        return Err(BondError::ConventionMismatch {
            day_count: bond.day_count().to_string(),
            frequency: bond.frequency().to_string(),
        });
    }
    Ok(())
}

/// Per-period discount base `1 + ytm / periods_per_year`.
pub(crate) fn discount_base(bond: &FixedRateBond, ytm: f64) -> BondResult<f64> {
    if !ytm.is_finite() {
        return Err(BondError::invalid_yield(ytm, "yield must be finite"));
    }
    let base = 1.0 + ytm / f64::from(bond.periods_per_year());
    if base <= 0.0 {
        return Err(BondError::invalid_yield(
            ytm,
            format!(
                "yield must exceed -{} for {} compounding",
                bond.periods_per_year(),
                bond.frequency()
            ),
        ));
    }
    Ok(base)
}

/// Sum of discounted cash flows.
pub(crate) fn present_value(flows: &[ProjectedCashFlow], base: f64) -> f64 {
    flows.iter().map(|cf| cf.present_value(base)).sum()
}

/// Derivative of [`present_value`] with respect to the annual yield.
pub(crate) fn present_value_derivative(
    flows: &[ProjectedCashFlow],
    base: f64,
    periods_per_year: f64,
) -> f64 {
    flows
        .iter()
        .map(|cf| -cf.periods * cf.amount * base.powf(-cf.periods - 1.0) / periods_per_year)
        .sum()
}

/// Calculates accrued interest per 100 face at `settlement`.
///
/// Linear accrual of the period coupon by the day count ratio
/// `yf(previous, settlement) / yf(previous, next)`. Before the first coupon
/// the period starts at the issue date. Zero at maturity.
///
/// # Errors
///
/// Returns `BondError::SettlementOutOfRange` outside `[issue, maturity]`.
pub fn accrued_interest(bond: &FixedRateBond, settlement: Date) -> BondResult<f64> {
    check_settlement(bond, settlement)?;

    let Some((previous, next)) = bond.coupon_period(settlement) else {
        return Ok(0.0);
    };

    let fraction = accrual_fraction(bond.day_count(), previous, settlement, next)?;
    Ok(bond.coupon_per_period() * fraction)
}

/// Prices the bond at a yield to maturity.
///
/// The dirty price discounts every remaining cash flow at
/// `(1 + ytm/ppy)^(-t)`; the clean price subtracts accrued interest. At
/// maturity both equal 100 for any yield.
///
/// # Errors
///
/// - `BondError::SettlementOutOfRange` outside `[issue, maturity]`
/// - `BondError::ConventionMismatch` for a frequency with no periods
/// - `BondError::InvalidYield` if `1 + ytm/ppy` is not positive
pub fn price_from_ytm(bond: &FixedRateBond, settlement: Date, ytm: f64) -> BondResult<PriceResult> {
    check_conventions(bond)?;
    let base = discount_base(bond, ytm)?;
    let flows = remaining_cash_flows(bond, settlement)?;
    let accrued = accrued_interest(bond, settlement)?;

    let dirty = present_value(&flows, base);

    Ok(PriceResult {
        clean_price: dirty - accrued,
        dirty_price: dirty,
        accrued_interest: accrued,
    })
}

/// Values the bond at a yield: prices plus every risk measure.
pub fn valuation_from_ytm(
    bond: &FixedRateBond,
    settlement: Date,
    ytm: f64,
) -> BondResult<ValuationResult> {
    let price = price_from_ytm(bond, settlement, ytm)?;
    let risk = RiskMetrics::compute(bond, settlement, ytm)?;

    Ok(ValuationResult {
        clean_price: price.clean_price,
        dirty_price: price.dirty_price,
        accrued_interest: price.accrued_interest,
        ytm,
        macaulay_duration: risk.macaulay_duration,
        modified_duration: risk.modified_duration,
        convexity: risk.convexity,
    })
}

/// Solves the yield implied by a clean price and values the bond at it.
///
/// The supplied clean price is echoed; the dirty price and risk measures are
/// computed at the solved yield.
pub fn valuation_from_clean_price(
    bond: &FixedRateBond,
    settlement: Date,
    clean_price: f64,
    solver: &YieldSolver,
) -> BondResult<ValuationResult> {
    let solved = solver.solve(bond, settlement, clean_price)?;
    let valuation = valuation_from_ytm(bond, settlement, solved.yield_value)?;

    Ok(ValuationResult {
        clean_price,
        ..valuation
    })
}

#[cfg(test)]
mod tests {
    use super::*;
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
    fn test_accrued_on_coupon_date_is_zero() {
        let bond = ten_year();
        assert_eq!(accrued_interest(&bond, date(2023, 1, 1)).unwrap(), 0.0);
    }

    #[test]
    fn test_accrued_mid_period() {
        let bond = FixedRateBond::new(
            date(2020, 1, 15),
            date(2025, 1, 15),
            dec!(0.06),
            Frequency::SemiAnnual,
            DayCountConvention::Thirty360E,
        )
        .unwrap();
        // 90 of 180 days into a 3.00 coupon
        let accrued = accrued_interest(&bond, date(2021, 4, 15)).unwrap();
        assert_relative_eq!(accrued, 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_accrued_before_first_coupon_uses_issue_date() {
        let bond = FixedRateBond::new(
            date(2020, 3, 1),
            date(2022, 1, 1),
            dec!(0.04),
            Frequency::SemiAnnual,
            DayCountConvention::Act365Fixed,
        )
        .unwrap();
        // first period 2020-03-01 -> 2020-07-01, 122 days; 31 elapsed
        let accrued = accrued_interest(&bond, date(2020, 4, 1)).unwrap();
        assert_relative_eq!(accrued, 2.0 * 31.0 / 122.0, epsilon = 1e-12);
    }

    #[test]
    fn test_accrued_at_maturity_is_zero() {
        let bond = ten_year();
        assert_eq!(accrued_interest(&bond, bond.maturity()).unwrap(), 0.0);
    }

    #[test]
    fn test_par_bond_on_coupon_date() {
        let bond = ten_year();
        let price = price_from_ytm(&bond, date(2023, 1, 1), 0.05).unwrap();
        assert_relative_eq!(price.clean_price, 100.0, epsilon = 1e-9);
        assert_eq!(price.accrued_interest, 0.0);
    }

    #[test]
    fn test_scenario_price() {
        let bond = ten_year();
        let price = price_from_ytm(&bond, date(2023, 1, 1), 0.04).unwrap();
        assert_relative_eq!(price.clean_price, 106.05312438529275, epsilon = 1e-8);
        assert_relative_eq!(price.dirty_price, price.clean_price, epsilon = 1e-12);
    }

    #[test]
    fn test_dirty_equals_clean_plus_accrued() {
        let bond = ten_year();
        let price = price_from_ytm(&bond, date(2024, 3, 18), 0.037).unwrap();
        assert!(price.accrued_interest > 0.0);
        assert_relative_eq!(
            price.dirty_price,
            price.clean_price + price.accrued_interest,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_price_at_maturity() {
        let bond = ten_year();
        for ytm in [-0.2, 0.0, 0.04, 0.9] {
            let price = price_from_ytm(&bond, bond.maturity(), ytm).unwrap();
            assert_eq!(price.dirty_price, 100.0);
            assert_eq!(price.clean_price, 100.0);
        }
    }

    #[test]
    fn test_invalid_yield() {
        let bond = ten_year();
        assert!(matches!(
            price_from_ytm(&bond, date(2023, 1, 1), -2.0),
            Err(BondError::InvalidYield { .. })
        ));
        assert!(matches!(
            price_from_ytm(&bond, date(2023, 1, 1), f64::NAN),
            Err(BondError::InvalidYield { .. })
        ));
    }

    #[test]
    fn test_settlement_out_of_range() {
        let bond = ten_year();
        assert!(matches!(
            price_from_ytm(&bond, date(2019, 6, 1), 0.04),
            Err(BondError::SettlementOutOfRange { .. })
        ));
        assert!(matches!(
            accrued_interest(&bond, date(2030, 1, 2)),
            Err(BondError::SettlementOutOfRange { .. })
        ));
    }

    #[test]
    fn test_valuation_from_ytm_echoes_yield() {
        let bond = ten_year();
        let valuation = valuation_from_ytm(&bond, date(2023, 1, 1), 0.04).unwrap();
        assert_eq!(valuation.ytm, 0.04);
        assert!(valuation.macaulay_duration > valuation.modified_duration);
        assert!(valuation.convexity > 0.0);
    }

    #[test]
    fn test_valuation_from_clean_price_echoes_price() {
        let bond = ten_year();
        let settlement = date(2023, 1, 1);
        let valuation =
            valuation_from_clean_price(&bond, settlement, 98.5, &YieldSolver::default()).unwrap();
        assert_eq!(valuation.clean_price, 98.5);
        assert!(valuation.ytm > 0.05);

        let repriced = price_from_ytm(&bond, settlement, valuation.ytm).unwrap();
        assert_relative_eq!(repriced.clean_price, 98.5, epsilon = 1e-6);
    }

    #[test]
    fn test_valuation_result_wire_names() {
        let bond = ten_year();
        let valuation = valuation_from_ytm(&bond, date(2023, 1, 1), 0.04).unwrap();
        let json = serde_json::to_value(valuation).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object.len(), 7);
        for key in [
            "clean_price",
            "dirty_price",
            "accrued_interest",
            "ytm",
            "macauley_duration",
            "modified_duration",
            "convexity",
        ] {
            assert!(object.contains_key(key), "missing {key}");
        }
    }
}
