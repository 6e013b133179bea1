//! Actual/Actual ISDA day count convention.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

/// Actual/Actual ISDA day count convention (ISDA 2006 §4.16(b)).
///
/// The interval is split at calendar-year boundaries. Days falling in a
/// leap year count over 366, the rest over 365. The start date is counted,
/// the end date is not.
///
/// # Formula
///
/// $$\text{Year Fraction} = \frac{\text{Days in non-leap years}}{365} + \frac{\text{Days in leap years}}{366}$$
///
/// An interval contained in a single year is simply `days / days_in_year`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActActIsda;

impl DayCount for ActActIsda {
    fn name(&self) -> &'static str {
        "ACT/ACT ISDA"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        if start >= end {
            return Decimal::ZERO;
        }

        let mut total = Decimal::ZERO;
        let mut current = start;

        // Process year by year
        while current.year() < end.year() {
            let Ok(next_year) = current.start_of_next_year() else {
                break;
            };
            let days = current.days_between(&next_year);
            total += Decimal::from(days) / Decimal::from(current.days_in_year());
            current = next_year;
        }

        // Remaining portion in the final year
        let days = current.days_between(&end);
        total + Decimal::from(days) / Decimal::from(current.days_in_year())
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}
