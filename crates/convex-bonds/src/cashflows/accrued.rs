//! Accrual fraction within a coupon period.

use convex_core::daycounts::DayCountConvention;
use convex_core::types::Date;

use crate::error::BondResult;

/// Fraction of the period `[previous, next]` elapsed at `settlement`.
///
/// The ratio of day count year fractions `yf(previous, settlement) /
/// yf(previous, next)`, clamped to `[0, 1]`. A period whose year fraction is
/// zero under the convention (30E/360 over a 30th-to-31st stub) falls back to
/// the ratio of actual days.
pub(crate) fn accrual_fraction(
    day_count: DayCountConvention,
    previous: Date,
    settlement: Date,
    next: Date,
) -> BondResult<f64> {
    let elapsed = day_count.year_fraction_f64(previous, settlement)?;
    let period = day_count.year_fraction_f64(previous, next)?;

    let fraction = if period > 0.0 {
        elapsed / period
    } else {
        let total = previous.days_between(&next);
        if total <= 0 {
            return Ok(0.0);
        }
        previous.days_between(&settlement) as f64 / total as f64
    };

    Ok(fraction.clamp(0.0, 1.0))
}
