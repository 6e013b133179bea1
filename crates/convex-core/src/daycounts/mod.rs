//! Day count conventions for fixed income calculations.
//!
//! Day count conventions determine how an interval between two dates is
//! converted into a fraction of a year for accrual and discounting.
//!
//! # Supported Conventions
//!
//! - [`ActActIsda`]: Actual/Actual ISDA - year-based leap/non-leap split
//! - [`Thirty360E`]: 30E/360 - Eurobond convention
//! - [`Act360`]: Actual/360 - money market convention
//! - [`Act365Fixed`]: Actual/365 Fixed
//!
//! # Usage
//!
//! ```rust
//! use convex_core::daycounts::DayCountConvention;
//! use convex_core::types::Date;
//!
//! let start = Date::from_ymd(2025, 1, 15).unwrap();
//! let end = Date::from_ymd(2025, 7, 15).unwrap();
//!
//! let yf = DayCountConvention::Thirty360E.year_fraction(start, end).unwrap();
//! assert_eq!(yf, rust_decimal::Decimal::new(5, 1));
//! ```
//!
//! # Additivity
//!
//! Every convention here is a difference of a per-date serial value, so for
//! `a <= b <= c`, `yf(a, c) == yf(a, b) + yf(b, c)` up to decimal rounding.

mod act360;
mod act365;
mod actact;
mod thirty360;

pub use act360::Act360;
pub use act365::Act365Fixed;
pub use actact::ActActIsda;
pub use thirty360::Thirty360E;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ConvexError, ConvexResult};
use crate::types::Date;

/// Trait for day count conventions.
///
/// Implementations provide the year fraction calculation between two dates
/// according to specific market conventions. Callers are expected to pass
/// ordered dates; [`DayCountConvention::year_fraction`] enforces that.
pub trait DayCount: Send + Sync {
    /// Returns the name of the day count convention (e.g. "ACT/360").
    fn name(&self) -> &'static str;

    /// Calculates the year fraction between two ordered dates.
    fn year_fraction(&self, start: Date, end: Date) -> Decimal;

    /// Calculates the day count between two dates.
    ///
    /// For ACT conventions, this is actual calendar days.
    /// For 30E/360, this uses the 30-day month assumption.
    fn day_count(&self, start: Date, end: Date) -> i64;
}

/// Closed set of supported day count conventions.
///
/// Dispatch is a plain `match`, one pure function per variant.
///
/// # Example
///
/// ```rust
/// use convex_core::daycounts::DayCountConvention;
/// use convex_core::types::Date;
///
/// let start = Date::from_ymd(2025, 1, 1).unwrap();
/// let end = Date::from_ymd(2025, 7, 1).unwrap();
/// let yf = DayCountConvention::Act360.year_fraction(start, end).unwrap();
/// assert_eq!(yf, rust_decimal::Decimal::from(181) / rust_decimal::Decimal::from(360));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DayCountConvention {
    /// Actual/Actual ISDA
    #[default]
    #[serde(rename = "act_act_isda")]
    ActActIsda,

    /// 30E/360 (Eurobond Basis)
    #[serde(rename = "thirty_e_360")]
    Thirty360E,

    /// Actual/360
    #[serde(rename = "act_360")]
    Act360,

    /// Actual/365 Fixed
    #[serde(rename = "act_365f")]
    Act365Fixed,
}

impl DayCountConvention {
    /// Calculates the year fraction between `start` and `end`.
    ///
    /// Returns zero when `start == end`.
    ///
    /// # Errors
    ///
    /// Returns `ConvexError::InvalidDateOrder` if `start > end`.
    pub fn year_fraction(&self, start: Date, end: Date) -> ConvexResult<Decimal> {
        if start > end {
            return Err(ConvexError::invalid_date_order(start, end));
        }

        Ok(match self {
            DayCountConvention::ActActIsda => ActActIsda.year_fraction(start, end),
            DayCountConvention::Thirty360E => Thirty360E.year_fraction(start, end),
            DayCountConvention::Act360 => Act360.year_fraction(start, end),
            DayCountConvention::Act365Fixed => Act365Fixed.year_fraction(start, end),
        })
    }

    /// Year fraction as `f64`, for use in floating-point pricing kernels.
    ///
    /// # Errors
    ///
    /// Returns `ConvexError::InvalidDateOrder` if `start > end`.
    pub fn year_fraction_f64(&self, start: Date, end: Date) -> ConvexResult<f64> {
        let yf = self.year_fraction(start, end)?;
        // Every value produced above is a small rational, always representable.
        Ok(yf.to_f64().unwrap_or_default())
    }

    /// Calculates the convention's day count between two dates.
    #[must_use]
    pub fn day_count(&self, start: Date, end: Date) -> i64 {
        match self {
            DayCountConvention::ActActIsda => ActActIsda.day_count(start, end),
            DayCountConvention::Thirty360E => Thirty360E.day_count(start, end),
            DayCountConvention::Act360 => Act360.day_count(start, end),
            DayCountConvention::Act365Fixed => Act365Fixed.day_count(start, end),
        }
    }

    /// Returns the market name of the convention.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::ActActIsda => ActActIsda.name(),
            DayCountConvention::Thirty360E => Thirty360E.name(),
            DayCountConvention::Act360 => Act360.name(),
            DayCountConvention::Act365Fixed => Act365Fixed.name(),
        }
    }

    /// Returns the wire name used in requests (`"act_act_isda"`, ...).
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            DayCountConvention::ActActIsda => "act_act_isda",
            DayCountConvention::Thirty360E => "thirty_e_360",
            DayCountConvention::Act360 => "act_360",
            DayCountConvention::Act365Fixed => "act_365f",
        }
    }

    /// Returns all available day count conventions.
    #[must_use]
    pub fn all() -> &'static [DayCountConvention] {
        &[
            DayCountConvention::ActActIsda,
            DayCountConvention::Thirty360E,
            DayCountConvention::Act360,
            DayCountConvention::Act365Fixed,
        ]
    }
}

impl std::fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for DayCountConvention {
    type Err = DayCountParseError;

    /// Parses a day count convention from a string.
    ///
    /// Accepts the wire names (`act_act_isda`, `thirty_e_360`, `act_360`,
    /// `act_365f`) and the market names returned by [`DayCountConvention::name`],
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();

        match normalized.as_str() {
            "ACT_ACT_ISDA" | "ACT/ACT ISDA" | "ACT/ACT" => Ok(DayCountConvention::ActActIsda),
            "THIRTY_E_360" | "30E/360" | "EUROBOND" => Ok(DayCountConvention::Thirty360E),
            "ACT_360" | "ACT/360" => Ok(DayCountConvention::Act360),
            "ACT_365F" | "ACT/365F" | "ACT/365 FIXED" => Ok(DayCountConvention::Act365Fixed),
            _ => Err(DayCountParseError(s.to_string())),
        }
    }
}

/// Error type for parsing day count conventions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCountParseError(pub String);

impl std::fmt::Display for DayCountParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown day count convention: '{}'", self.0)
    }
}

impl std::error::Error for DayCountParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_same_date_is_zero() {
        let d = date(2025, 3, 31);
        for convention in DayCountConvention::all() {
            assert_eq!(convention.year_fraction(d, d).unwrap(), Decimal::ZERO);
        }
    }

    #[test]
    fn test_reversed_dates_rejected() {
        let start = date(2025, 7, 1);
        let end = date(2025, 1, 1);
        for convention in DayCountConvention::all() {
            let err = convention.year_fraction(start, end).unwrap_err();
            assert!(matches!(err, ConvexError::InvalidDateOrder { .. }));
        }
    }

    #[test]
    fn test_convention_enum() {
        let start = date(2025, 1, 1);
        let end = date(2025, 7, 1);
        for convention in DayCountConvention::all() {
            let yf = convention.year_fraction(start, end).unwrap();
            // All conventions should give roughly half a year
            assert!(yf > dec!(0.4) && yf < dec!(0.6), "{convention}: {yf}");
        }
    }

    #[test]
    fn test_year_fraction_f64() {
        let yf = DayCountConvention::Act365Fixed
            .year_fraction_f64(date(2025, 1, 1), date(2025, 4, 2))
            .unwrap();
        assert_abs_diff_eq!(yf, 91.0 / 365.0, epsilon = 1e-15);
    }

    #[test]
    fn test_convention_names() {
        assert_eq!(DayCountConvention::ActActIsda.name(), "ACT/ACT ISDA");
        assert_eq!(DayCountConvention::Thirty360E.name(), "30E/360");
        assert_eq!(DayCountConvention::Act360.name(), "ACT/360");
        assert_eq!(DayCountConvention::Act365Fixed.name(), "ACT/365F");
    }

    #[test]
    fn test_from_str_wire_names() {
        assert_eq!(
            "act_act_isda".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::ActActIsda
        );
        assert_eq!(
            "thirty_e_360".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Thirty360E
        );
        assert_eq!(
            "act_360".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Act360
        );
        assert_eq!(
            "act_365f".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Act365Fixed
        );
    }

    #[test]
    fn test_from_str_invalid() {
        let result = "30/360 US".parse::<DayCountConvention>();
        assert!(result.unwrap_err().to_string().contains("unknown"));
    }

    #[test]
    fn test_from_str_roundtrip() {
        for convention in DayCountConvention::all() {
            assert_eq!(convention.name().parse::<DayCountConvention>().unwrap(), *convention);
            assert_eq!(convention.code().parse::<DayCountConvention>().unwrap(), *convention);
        }
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&DayCountConvention::Thirty360E).unwrap();
        assert_eq!(json, "\"thirty_e_360\"");
        let parsed: DayCountConvention = serde_json::from_str("\"act_365f\"").unwrap();
        assert_eq!(parsed, DayCountConvention::Act365Fixed);
    }

    fn arb_date() -> impl Strategy<Value = Date> {
        (1990i32..2060, 1u32..=12, 1u32..=31)
            .prop_map(|(y, m, d)| Date::from_ymd(y, m, 1).unwrap().add_days(i64::from(d) - 1))
    }

    proptest! {
        #[test]
        fn prop_year_fractions_are_additive(a in arb_date(), b in arb_date(), c in arb_date()) {
            let mut dates = [a, b, c];
            dates.sort();
            let [a, b, c] = dates;

            for convention in DayCountConvention::all() {
                let whole = convention.year_fraction(a, c).unwrap();
                let parts = convention.year_fraction(a, b).unwrap()
                    + convention.year_fraction(b, c).unwrap();
                prop_assert!((whole - parts).abs() < dec!(0.000000000001));
            }
        }

        #[test]
        fn prop_year_fraction_non_negative(a in arb_date(), b in arb_date()) {
            let (start, end) = if a <= b { (a, b) } else { (b, a) };
            for convention in DayCountConvention::all() {
                prop_assert!(convention.year_fraction(start, end).unwrap() >= Decimal::ZERO);
            }
        }
    }
}
