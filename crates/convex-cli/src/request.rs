//! Request/response contract.
//!
//! A request names a bond, a settlement date and exactly one quote, either a
//! yield or a clean price:
//!
//! ```json
//! {
//!   "issue_date": [2020, 1, 1],
//!   "maturity_date": [2030, 1, 1],
//!   "settlement_date": [2023, 1, 1],
//!   "coupon_rate": 0.05,
//!   "frequency": "semi_annual",
//!   "day_count": "act_act_isda",
//!   "ytm": 0.04
//! }
//! ```
//!
//! The response is a [`ValuationResult`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use convex_bonds::pricing::{
    valuation_from_clean_price, valuation_from_ytm, ValuationResult, YieldSolver,
};
use convex_bonds::FixedRateBond;
use convex_core::daycounts::DayCountConvention;
use convex_core::types::{Date, Frequency};
use convex_core::ConvexError;

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};

/// Frequencies a request may name.
const FREQUENCIES: [Frequency; 4] = [
    Frequency::Annual,
    Frequency::SemiAnnual,
    Frequency::Quarterly,
    Frequency::Monthly,
];

/// A valuation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondRequest {
    /// Issue date as `[year, month, day]`.
    pub issue_date: [i64; 3],
    /// Maturity date as `[year, month, day]`.
    pub maturity_date: [i64; 3],
    /// Settlement date as `[year, month, day]`.
    pub settlement_date: [i64; 3],
    /// Annual coupon rate as a decimal.
    pub coupon_rate: Decimal,
    /// Coupon frequency name; the configured default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    /// Day count convention name; the configured default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_count: Option<String>,
    /// Yield to maturity, when pricing from a yield.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ytm: Option<f64>,
    /// Clean price per 100 face, when solving for the yield.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clean_price: Option<f64>,
}

/// The single quote a request carries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Quote {
    /// Price the bond from this yield.
    Yield(f64),
    /// Solve the yield that reproduces this clean price.
    CleanPrice(f64),
}

impl BondRequest {
    /// Returns the request's quote.
    ///
    /// # Errors
    ///
    /// Returns `CliError::AmbiguousInput` unless exactly one of `ytm` and
    /// `clean_price` is set.
    pub fn quote(&self) -> CliResult<Quote> {
        quote_from(self.ytm, self.clean_price)
    }

    /// Builds the bond the request describes.
    pub fn bond(&self, config: &CliConfig) -> CliResult<FixedRateBond> {
        let frequency = parse_frequency(
            self.frequency
                .as_deref()
                .unwrap_or(&config.defaults.frequency),
        )?;
        let day_count = parse_day_count(
            self.day_count
                .as_deref()
                .unwrap_or(&config.defaults.day_count),
        )?;

        Ok(FixedRateBond::new(
            parse_date("issue_date", self.issue_date)?,
            parse_date("maturity_date", self.maturity_date)?,
            self.coupon_rate,
            frequency,
            day_count,
        )?)
    }

    /// Returns the settlement date.
    pub fn settlement(&self) -> CliResult<Date> {
        parse_date("settlement_date", self.settlement_date)
    }
}

fn quote_from(ytm: Option<f64>, clean_price: Option<f64>) -> CliResult<Quote> {
    match (ytm, clean_price) {
        (Some(y), None) => Ok(Quote::Yield(y)),
        (None, Some(p)) => Ok(Quote::CleanPrice(p)),
        (Some(_), Some(_)) => Err(CliError::ambiguous_input(
            "both ytm and clean_price were supplied; provide exactly one",
        )),
        (None, None) => Err(CliError::ambiguous_input(
            "neither ytm nor clean_price was supplied; provide exactly one",
        )),
    }
}

/// Parses a frequency wire name.
pub fn parse_frequency(name: &str) -> CliResult<Frequency> {
    FREQUENCIES
        .into_iter()
        .find(|f| f.name() == name)
        .ok_or_else(|| CliError::unsupported_enum_value("frequency", name))
}

/// Parses a day count wire name.
pub fn parse_day_count(name: &str) -> CliResult<DayCountConvention> {
    DayCountConvention::all()
        .iter()
        .copied()
        .find(|dc| dc.code() == name)
        .ok_or_else(|| CliError::unsupported_enum_value("day_count", name))
}

/// Converts a `[year, month, day]` triple into a date.
pub fn parse_date(field: &str, [year, month, day]: [i64; 3]) -> CliResult<Date> {
    let invalid = || {
        CliError::Core(ConvexError::invalid_date(format!(
            "{field}: [{year}, {month}, {day}]"
        )))
    };
    let year = i32::try_from(year).map_err(|_| invalid())?;
    let month = u32::try_from(month).map_err(|_| invalid())?;
    let day = u32::try_from(day).map_err(|_| invalid())?;
    Date::from_ymd(year, month, day).map_err(|_| invalid())
}

/// Values a parsed request.
pub fn handle(request: &BondRequest, config: &CliConfig) -> CliResult<ValuationResult> {
    let quote = request.quote()?;
    let bond = request.bond(config)?;
    let settlement = request.settlement()?;

    debug!(
        issue = %bond.issue_date(),
        maturity = %bond.maturity(),
        %settlement,
        frequency = bond.frequency().name(),
        day_count = bond.day_count().code(),
        ?quote,
        "valuing bond"
    );

    let result = match quote {
        Quote::Yield(ytm) => valuation_from_ytm(&bond, settlement, ytm)?,
        Quote::CleanPrice(price) => {
            let solver = YieldSolver::with_settings(config.solver)?;
            valuation_from_clean_price(&bond, settlement, price, &solver)?
        }
    };
    Ok(result)
}

/// Values a JSON request document.
///
/// The quote is checked on the raw document before any other field is
/// decoded, so a request with neither or both quotes is rejected even when
/// its dates are malformed.
pub fn handle_json(input: &str, config: &CliConfig) -> CliResult<ValuationResult> {
    let document: Value = serde_json::from_str(input)?;
    let Value::Object(fields) = &document else {
        return Err(CliError::InvalidRequest(
            "request must be a JSON object".to_string(),
        ));
    };

    let present = |key: &str| fields.get(key).is_some_and(|v| !v.is_null());
    quote_from(
        present("ytm").then_some(0.0),
        present("clean_price").then_some(0.0),
    )?;

    let request: BondRequest = serde_json::from_value(document)?;
    handle(&request, config)
}
