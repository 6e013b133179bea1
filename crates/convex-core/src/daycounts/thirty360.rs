//! 30E/360 (Eurobond basis) day count convention.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

/// 30E/360 day count convention (Eurobond Basis).
///
/// Also known as "30/360 ICMA" or "Eurobond basis" (ISDA 2006 §4.16(g)).
///
/// # Rules
///
/// 1. If D1 is 31, change D1 to 30
/// 2. If D2 is 31, change D2 to 30
///
/// Unlike 30/360 US, February month-ends are left untouched.
///
/// # Formula
///
/// $$\text{Days} = 360 \times (Y_2 - Y_1) + 30 \times (M_2 - M_1) + (D_2 - D_1)$$
///
/// Each date maps to a fixed serial `360·Y + 30·M + min(D, 30)`, so year
/// fractions are exactly additive over adjacent intervals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360E;

impl Thirty360E {
    fn serial(date: Date) -> i64 {
        let day = date.day().min(30);
        360 * i64::from(date.year()) + 30 * i64::from(date.month()) + i64::from(day)
    }
}

impl DayCount for Thirty360E {
    fn name(&self) -> &'static str {
        "30E/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(360)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        Self::serial(end) - Self::serial(start)
    }
}
