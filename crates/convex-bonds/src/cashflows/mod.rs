//! Coupon schedules and the cash flows remaining after settlement.

mod accrued;
mod schedule;

pub(crate) use accrued::accrual_fraction;
pub use schedule::CouponSchedule;

use convex_core::types::Date;

use crate::error::{BondError, BondResult};
use crate::instruments::FixedRateBond;
use crate::FACE_VALUE;

/// A cash flow still owed to the holder at settlement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedCashFlow {
    /// Payment date.
    pub date: Date,
    /// Amount per 100 face, coupon plus any redemption.
    pub amount: f64,
    /// Coupon periods from settlement to payment, fractional for the first.
    pub periods: f64,
}

impl ProjectedCashFlow {
    /// Time from settlement to payment in years.
    #[must_use]
    pub fn years(&self, periods_per_year: u32) -> f64 {
        self.periods / f64::from(periods_per_year)
    }

    /// Present value at the per-period discount factor base `1 + y/ppy`.
    #[must_use]
    pub fn present_value(&self, base: f64) -> f64 {
        self.amount * base.powf(-self.periods)
    }
}

/// Checks that `settlement` lies in `[issue, maturity]`.
pub(crate) fn check_settlement(bond: &FixedRateBond, settlement: Date) -> BondResult<()> {
    let reason = if settlement < bond.issue_date() {
        "settlement precedes issue date"
    } else if settlement > bond.maturity() {
        "settlement is after maturity"
    } else {
        return Ok(());
    };
    Err(settlement_out_of_range(bond, settlement, reason))
}

pub(crate) fn settlement_out_of_range(
    bond: &FixedRateBond,
    settlement: Date,
    reason: &str,
) -> BondError {
    BondError::SettlementOutOfRange {
        settlement: settlement.to_string(),
        issue: bond.issue_date().to_string(),
        maturity: bond.maturity().to_string(),
        reason: reason.to_string(),
    }
}

/// Projects the cash flows dated strictly after `settlement`.
///
/// The first flow sits `t1 = yf(settlement, next) / yf(previous, next)`
/// periods away, equal to one minus the accrual fraction; each later flow
/// is one whole period further. The final flow carries the redemption of
/// 100. At maturity the only remaining flow is the redemption itself at
/// zero periods.
///
/// # Errors
///
/// Returns `BondError::SettlementOutOfRange` outside `[issue, maturity]`.
pub fn remaining_cash_flows(
    bond: &FixedRateBond,
    settlement: Date,
) -> BondResult<Vec<ProjectedCashFlow>> {
    check_settlement(bond, settlement)?;

    let Some((previous, next)) = bond.coupon_period(settlement) else {
        return Ok(vec![ProjectedCashFlow {
            date: bond.maturity(),
            amount: FACE_VALUE,
            periods: 0.0,
        }]);
    };

    let first = 1.0 - accrual_fraction(bond.day_count(), previous, settlement, next)?;
    let coupon = bond.coupon_per_period();
    let maturity = bond.maturity();

    Ok(bond
        .schedule()
        .dates_after(settlement)
        .iter()
        .enumerate()
        .map(|(k, &date)| ProjectedCashFlow {
            date,
            amount: if date == maturity {
                coupon + FACE_VALUE
            } else {
                coupon
            },
            periods: first + k as f64,
        })
        .collect())
}
