//! Coupon schedule generation.
//!
//! Dates are generated backward from maturity so that maturity is always an
//! exact coupon date and any irregular period falls at the front of the
//! schedule.
//!
//! # Example
//!
//! ```rust
//! use convex_bonds::cashflows::CouponSchedule;
//! use convex_core::types::{Date, Frequency};
//!
//! let schedule = CouponSchedule::generate(
//!     Date::from_ymd(2020, 1, 15).unwrap(),
//!     Date::from_ymd(2025, 7, 15).unwrap(),
//!     Frequency::SemiAnnual,
//! )
//! .unwrap();
//!
//! assert_eq!(schedule.len(), 11);
//! for (start, end) in schedule.periods() {
//!     assert!(start < end);
//! }
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use convex_core::types::{Date, Frequency};

use crate::error::{BondError, BondResult};

/// Ordered coupon payment dates of a bond, maturity inclusive.
///
/// Dates are strictly increasing and strictly after the issue date. The
/// schedule is derived from the bond's defining fields and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CouponSchedule {
    issue_date: Date,
    dates: Vec<Date>,
}

impl CouponSchedule {
    /// Generates the coupon schedule for a bond.
    ///
    /// Steps backward from `maturity` in `12 / periods_per_year` month
    /// decrements until the next step would land on or before `issue`.
    ///
    /// When maturity is the last day of its month every generated date is
    /// rolled to the last day of its own month. Each date is computed as an
    /// offset from maturity rather than from its neighbour, so a short month
    /// never drags later dates off their anchor day.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidSchedule` if `issue >= maturity` or the
    /// frequency has no periods per year.
    pub fn generate(issue: Date, maturity: Date, frequency: Frequency) -> BondResult<Self> {
        if issue >= maturity {
            return Err(BondError::invalid_schedule(format!(
                "issue date {} must precede maturity {}",
                issue, maturity
            )));
        }
        if frequency.is_zero() {
            return Err(BondError::invalid_schedule(format!(
                "frequency {} has no coupon periods",
                frequency
            )));
        }

        let step = frequency.months_per_period() as i32;
        let end_of_month = maturity.is_end_of_month();

        let mut dates = vec![maturity];
        for k in 1.. {
            let mut date = maturity.add_months(-step * k)?;
            if end_of_month {
                date = date.end_of_month();
            }
            if date <= issue {
                break;
            }
            dates.push(date);
        }
        dates.reverse();

        debug!(
            "generated {} coupon dates from {} to {} ({}, eom={})",
            dates.len(),
            dates[0],
            maturity,
            frequency,
            end_of_month
        );

        Ok(Self {
            issue_date: issue,
            dates,
        })
    }

    /// Returns the coupon dates in ascending order.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Returns the number of coupon dates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns true if the schedule has no dates.
    ///
    /// A generated schedule always contains maturity, so this is false for
    /// every schedule built through [`CouponSchedule::generate`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Returns the first coupon date.
    #[must_use]
    pub fn first_coupon(&self) -> Option<Date> {
        self.dates.first().copied()
    }

    /// Returns the last coupon date, which is maturity.
    #[must_use]
    pub fn maturity(&self) -> Option<Date> {
        self.dates.last().copied()
    }

    /// Returns the earliest coupon date on or after `date`.
    #[must_use]
    pub fn next_on_or_after(&self, date: Date) -> Option<Date> {
        let idx = self.dates.partition_point(|d| *d < date);
        self.dates.get(idx).copied()
    }

    /// Returns the earliest coupon date strictly after `date`.
    #[must_use]
    pub fn next_after(&self, date: Date) -> Option<Date> {
        let idx = self.dates.partition_point(|d| *d <= date);
        self.dates.get(idx).copied()
    }

    /// Returns the latest coupon date on or before `date`, or the issue date
    /// if `date` precedes the first coupon.
    #[must_use]
    pub fn previous_on_or_before(&self, date: Date) -> Date {
        let idx = self.dates.partition_point(|d| *d <= date);
        if idx == 0 {
            self.issue_date
        } else {
            self.dates[idx - 1]
        }
    }

    /// Returns the coupon dates strictly after `date`.
    #[must_use]
    pub fn dates_after(&self, date: Date) -> &[Date] {
        let idx = self.dates.partition_point(|d| *d <= date);
        &self.dates[idx..]
    }

    /// Returns accrual periods as `(start, end)` pairs, the first starting at
    /// the issue date.
    pub fn periods(&self) -> impl Iterator<Item = (Date, Date)> + '_ {
        std::iter::once(self.issue_date)
            .chain(self.dates.iter().copied())
            .zip(self.dates.iter().copied())
    }

    /// Returns an iterator over the coupon dates.
    pub fn iter(&self) -> impl Iterator<Item = &Date> {
        self.dates.iter()
    }
}

impl<'a> IntoIterator for &'a CouponSchedule {
    type Item = &'a Date;
    type IntoIter = std::slice::Iter<'a, Date>;

    fn into_iter(self) -> Self::IntoIter {
        self.dates.iter()
    }
}
