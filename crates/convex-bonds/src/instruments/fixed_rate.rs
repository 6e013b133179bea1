//! Fixed rate bond.
//!
//! A bullet bond paying a fixed annual coupon rate at a regular frequency and
//! redeeming at par on maturity. The bond is an immutable value: its coupon
//! schedule is generated once at construction and never changes.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use convex_core::daycounts::DayCountConvention;
use convex_core::types::{Date, Frequency};

use crate::cashflows::CouponSchedule;
use crate::error::{BondError, BondResult};
use crate::pricing::{self, ValuationResult, YieldSolver};
use crate::FACE_VALUE;

/// A fixed rate bullet bond.
///
/// Invariants, checked at construction:
/// - `issue_date < maturity`
/// - `coupon_rate >= 0`
///
/// # Example
///
/// ```rust
/// use convex_bonds::instruments::FixedRateBond;
/// use convex_core::daycounts::DayCountConvention;
/// use convex_core::types::{Date, Frequency};
/// use rust_decimal_macros::dec;
///
/// let bond = FixedRateBond::builder()
///     .issue_date(Date::from_ymd(2020, 1, 1).unwrap())
///     .maturity(Date::from_ymd(2030, 1, 1).unwrap())
///     .coupon_rate(dec!(0.05))
///     .frequency(Frequency::SemiAnnual)
///     .day_count(DayCountConvention::ActActIsda)
///     .build()
///     .unwrap();
///
/// assert_eq!(bond.schedule().len(), 20);
/// assert_eq!(bond.coupon_per_period(), 2.5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedRateBond {
    issue_date: Date,
    maturity: Date,
    coupon_rate: Decimal,
    frequency: Frequency,
    day_count: DayCountConvention,
    schedule: CouponSchedule,
}

impl FixedRateBond {
    /// Creates a new builder for fixed rate bonds.
    #[must_use]
    pub fn builder() -> FixedRateBondBuilder {
        FixedRateBondBuilder::default()
    }

    /// Creates a fixed rate bond and generates its coupon schedule.
    ///
    /// # Arguments
    ///
    /// * `issue_date` - Issue (dated) date, start of the first accrual period
    /// * `maturity` - Maturity date, the final coupon and redemption date
    /// * `coupon_rate` - Annual coupon rate as decimal (0.05 for 5%)
    /// * `frequency` - Coupon frequency
    /// * `day_count` - Day count convention used for accrual and discounting
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidBond` if the dates are out of order or the
    /// coupon is negative, and `BondError::InvalidSchedule` if no schedule can
    /// be generated for the frequency.
    pub fn new(
        issue_date: Date,
        maturity: Date,
        coupon_rate: Decimal,
        frequency: Frequency,
        day_count: DayCountConvention,
    ) -> BondResult<Self> {
        if issue_date >= maturity {
            return Err(BondError::invalid_bond(
                "maturity_date",
                format!("maturity {} must be after issue date {}", maturity, issue_date),
            ));
        }
        if coupon_rate < Decimal::ZERO {
            return Err(BondError::invalid_bond(
                "coupon_rate",
                format!("coupon rate {} must be non-negative", coupon_rate),
            ));
        }

        let schedule = CouponSchedule::generate(issue_date, maturity, frequency)?;

        Ok(Self {
            issue_date,
            maturity,
            coupon_rate,
            frequency,
            day_count,
            schedule,
        })
    }

    /// Returns the issue date.
    #[must_use]
    pub fn issue_date(&self) -> Date {
        self.issue_date
    }

    /// Returns the maturity date.
    #[must_use]
    pub fn maturity(&self) -> Date {
        self.maturity
    }

    /// Returns the annual coupon rate as a decimal.
    #[must_use]
    pub fn coupon_rate(&self) -> Decimal {
        self.coupon_rate
    }

    /// Returns the coupon frequency.
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Returns the day count convention.
    #[must_use]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Returns the coupon schedule.
    #[must_use]
    pub fn schedule(&self) -> &CouponSchedule {
        &self.schedule
    }

    /// Returns the number of coupon periods per year.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        self.frequency.periods_per_year()
    }

    /// Returns the coupon paid each period per 100 face.
    #[must_use]
    pub fn coupon_per_period(&self) -> f64 {
        let ppy = self.periods_per_year();
        if ppy == 0 {
            return 0.0;
        }
        self.coupon_rate.to_f64().unwrap_or(0.0) * FACE_VALUE / f64::from(ppy)
    }

    /// Returns the earliest coupon date on or after `date`, if any.
    #[must_use]
    pub fn next_coupon_on_or_after(&self, date: Date) -> Option<Date> {
        self.schedule.next_on_or_after(date)
    }

    /// Returns the accrual period `(previous, next)` containing `settlement`.
    ///
    /// `previous` is the latest coupon on or before settlement (the issue
    /// date before the first coupon); `next` is the earliest coupon strictly
    /// after it. Returns `None` on or after maturity.
    #[must_use]
    pub fn coupon_period(&self, settlement: Date) -> Option<(Date, Date)> {
        let next = self.schedule.next_after(settlement)?;
        Some((self.schedule.previous_on_or_before(settlement), next))
    }

    /// Prices the bond at `ytm` and computes every risk measure.
    pub fn valuation_from_ytm(&self, settlement: Date, ytm: f64) -> BondResult<ValuationResult> {
        pricing::valuation_from_ytm(self, settlement, ytm)
    }

    /// Solves the yield implied by `clean_price`, then values the bond at it.
    pub fn valuation_from_clean_price(
        &self,
        settlement: Date,
        clean_price: f64,
        solver: &YieldSolver,
    ) -> BondResult<ValuationResult> {
        pricing::valuation_from_clean_price(self, settlement, clean_price, solver)
    }
}

/// Builder for [`FixedRateBond`].
#[derive(Debug, Clone, Default)]
pub struct FixedRateBondBuilder {
    issue_date: Option<Date>,
    maturity: Option<Date>,
    coupon_rate: Option<Decimal>,
    frequency: Frequency,
    day_count: DayCountConvention,
}

impl FixedRateBondBuilder {
    /// Creates a new builder with semi-annual ACT/ACT ISDA defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the issue date.
    #[must_use]
    pub fn issue_date(mut self, date: Date) -> Self {
        self.issue_date = Some(date);
        self
    }

    /// Sets the maturity date.
    #[must_use]
    pub fn maturity(mut self, date: Date) -> Self {
        self.maturity = Some(date);
        self
    }

    /// Sets the annual coupon rate as a decimal (0.05 for 5%).
    #[must_use]
    pub fn coupon_rate(mut self, rate: Decimal) -> Self {
        self.coupon_rate = Some(rate);
        self
    }

    /// Sets the coupon frequency.
    #[must_use]
    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the day count convention.
    #[must_use]
    pub fn day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Builds the bond.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidBond` if a required field is missing, plus
    /// every error of [`FixedRateBond::new`].
    pub fn build(self) -> BondResult<FixedRateBond> {
        let issue_date = self
            .issue_date
            .ok_or_else(|| BondError::invalid_bond("issue_date", "required"))?;
        let maturity = self
            .maturity
            .ok_or_else(|| BondError::invalid_bond("maturity_date", "required"))?;
        let coupon_rate = self
            .coupon_rate
            .ok_or_else(|| BondError::invalid_bond("coupon_rate", "required"))?;

        FixedRateBond::new(
            issue_date,
            maturity,
            coupon_rate,
            self.frequency,
            self.day_count,
        )
    }
}
