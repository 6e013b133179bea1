//! Risk metrics for bonds.
//!
//! Durations and convexity use the same cash flows, discounting and
//! fractional first period as [`price_from_ytm`](crate::pricing::price_from_ytm),
//! with times expressed in years (periods divided by periods per year).

use convex_core::types::Date;

use crate::cashflows::remaining_cash_flows;
use crate::error::BondResult;
use crate::instruments::FixedRateBond;
use crate::pricing::{check_conventions, discount_base};

/// Comprehensive risk metrics for a bond at a yield.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskMetrics {
    /// Macaulay duration in years.
    pub macaulay_duration: f64,
    /// Modified duration in years.
    pub modified_duration: f64,
    /// Convexity in years squared.
    pub convexity: f64,
    /// Dirty price change for a one basis point fall in yield, per 100 face.
    pub dv01: f64,
}

impl RiskMetrics {
    /// Calculates all risk metrics in a single pass over the cash flows.
    ///
    /// # Arguments
    ///
    /// * `bond` - The bond
    /// * `settlement` - Settlement date
    /// * `ytm` - Yield to maturity (as decimal)
    pub fn compute(bond: &FixedRateBond, settlement: Date, ytm: f64) -> BondResult<Self> {
        check_conventions(bond)?;
        let base = discount_base(bond, ytm)?;
        let flows = remaining_cash_flows(bond, settlement)?;
        let ppy = bond.periods_per_year();
        let period = 1.0 / f64::from(ppy);

        let mut price = 0.0;
        let mut weighted_time = 0.0;
        let mut weighted_curvature = 0.0;

        for cf in &flows {
            let pv = cf.present_value(base);
            let t = cf.years(ppy);
            price += pv;
            weighted_time += t * pv;
            weighted_curvature += t * (t + period) * pv;
        }

        if price <= 0.0 {
            return Ok(Self {
                macaulay_duration: 0.0,
                modified_duration: 0.0,
                convexity: 0.0,
                dv01: 0.0,
            });
        }

        let macaulay = weighted_time / price;
        let modified = macaulay / base;

        Ok(Self {
            macaulay_duration: macaulay,
            modified_duration: modified,
            convexity: weighted_curvature / (price * base * base),
            dv01: modified * price * 0.0001,
        })
    }
}

/// Macaulay duration in years: `Σ t·PV / Σ PV`.
pub fn macaulay_duration(bond: &FixedRateBond, settlement: Date, ytm: f64) -> BondResult<f64> {
    Ok(RiskMetrics::compute(bond, settlement, ytm)?.macaulay_duration)
}

/// Modified duration: Macaulay duration over `1 + ytm/ppy`.
pub fn modified_duration(bond: &FixedRateBond, settlement: Date, ytm: f64) -> BondResult<f64> {
    Ok(RiskMetrics::compute(bond, settlement, ytm)?.modified_duration)
}

/// Convexity: `Σ t(t + 1/ppy)·PV / (P·(1 + ytm/ppy)²)`.
pub fn convexity(bond: &FixedRateBond, settlement: Date, ytm: f64) -> BondResult<f64> {
    Ok(RiskMetrics::compute(bond, settlement, ytm)?.convexity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BondError;
    use crate::pricing::price_from_ytm;
    use approx::assert_relative_eq;
    use convex_core::daycounts::DayCountConvention;
    use convex_core::types::Frequency;
    use rust_decimal::Decimal;
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
    fn test_zero_coupon_macaulay_equals_maturity() {
        let bond = FixedRateBond::new(
            date(2020, 1, 1),
            date(2025, 1, 1),
            Decimal::ZERO,
            Frequency::Annual,
            DayCountConvention::ActActIsda,
        )
        .unwrap();
        let duration = macaulay_duration(&bond, date(2020, 1, 1), 0.03).unwrap();
        assert_relative_eq!(duration, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_modified_from_macaulay() {
        let bond = ten_year();
        let settlement = date(2023, 1, 1);
        let metrics = RiskMetrics::compute(&bond, settlement, 0.04).unwrap();
        assert_relative_eq!(
            metrics.modified_duration,
            metrics.macaulay_duration / 1.02,
            epsilon = 1e-12
        );
        assert!(metrics.macaulay_duration > 0.0 && metrics.macaulay_duration < 7.0);
    }

    #[test]
    fn test_duration_matches_price_slope() {
        let bond = ten_year();
        let settlement = date(2024, 2, 10);
        let ytm = 0.045;
        let h = 1e-6;

        let up = price_from_ytm(&bond, settlement, ytm + h).unwrap().dirty_price;
        let down = price_from_ytm(&bond, settlement, ytm - h).unwrap().dirty_price;
        let mid = price_from_ytm(&bond, settlement, ytm).unwrap().dirty_price;
        let slope = (up - down) / (2.0 * h);

        let modified = modified_duration(&bond, settlement, ytm).unwrap();
        assert_relative_eq!(-slope / mid, modified, max_relative = 1e-6);
    }

    #[test]
    fn test_convexity_matches_price_curvature() {
        let bond = ten_year();
        let settlement = date(2024, 2, 10);
        let ytm = 0.045;
        let h = 1e-4;

        let up = price_from_ytm(&bond, settlement, ytm + h).unwrap().dirty_price;
        let down = price_from_ytm(&bond, settlement, ytm - h).unwrap().dirty_price;
        let mid = price_from_ytm(&bond, settlement, ytm).unwrap().dirty_price;
        let curvature = (up - 2.0 * mid + down) / (h * h) / mid;

        let value = convexity(&bond, settlement, ytm).unwrap();
        assert_relative_eq!(curvature, value, max_relative = 1e-4);
    }

    #[test]
    fn test_dv01() {
        let bond = ten_year();
        let metrics = RiskMetrics::compute(&bond, date(2023, 1, 1), 0.04).unwrap();
        let price = price_from_ytm(&bond, date(2023, 1, 1), 0.04).unwrap().dirty_price;
        assert_relative_eq!(
            metrics.dv01,
            metrics.modified_duration * price / 10_000.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_at_maturity() {
        let bond = ten_year();
        let metrics = RiskMetrics::compute(&bond, bond.maturity(), 0.04).unwrap();
        assert_eq!(metrics.macaulay_duration, 0.0);
        assert_eq!(metrics.modified_duration, 0.0);
        assert_eq!(metrics.convexity, 0.0);
    }

    #[test]
    fn test_settlement_before_issue() {
        let bond = ten_year();
        assert!(matches!(
            convexity(&bond, date(2019, 1, 1), 0.04),
            Err(BondError::SettlementOutOfRange { .. })
        ));
    }
}
