//! Coupon frequency.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Payment frequency for coupon bonds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    /// Annual payments (1 per year)
    Annual,
    /// Semi-annual payments (2 per year)
    #[default]
    SemiAnnual,
    /// Quarterly payments (4 per year)
    Quarterly,
    /// Monthly payments (12 per year)
    Monthly,
    /// Zero coupon (no periodic payments)
    Zero,
}

impl Frequency {
    /// Returns the number of periods per year.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Annual => 1,
            Frequency::SemiAnnual => 2,
            Frequency::Quarterly => 4,
            Frequency::Monthly => 12,
            Frequency::Zero => 0,
        }
    }

    /// Returns the number of months per period (`12 / periods_per_year`).
    #[must_use]
    pub fn months_per_period(&self) -> u32 {
        match self.periods_per_year() {
            0 => 0,
            n => 12 / n,
        }
    }

    /// Returns true if this is a zero coupon (no periodic payments).
    #[must_use]
    pub fn is_zero(&self) -> bool {
        matches!(self, Frequency::Zero)
    }

    /// Returns the wire name used in requests (`"semi_annual"`, ...).
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Frequency::Annual => "annual",
            Frequency::SemiAnnual => "semi_annual",
            Frequency::Quarterly => "quarterly",
            Frequency::Monthly => "monthly",
            Frequency::Zero => "zero",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Annual => "Annual",
            Frequency::SemiAnnual => "Semi-Annual",
            Frequency::Quarterly => "Quarterly",
            Frequency::Monthly => "Monthly",
            Frequency::Zero => "Zero Coupon",
        };
        write!(f, "{name}")
    }
}

impl std::str::FromStr for Frequency {
    type Err = FrequencyParseError;

    /// Parses the wire names `annual`, `semi_annual`, `quarterly`, `monthly`.
    ///
    /// `Zero` has no wire name: a request always describes a coupon-paying bond.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "annual" => Ok(Frequency::Annual),
            "semi_annual" => Ok(Frequency::SemiAnnual),
            "quarterly" => Ok(Frequency::Quarterly),
            "monthly" => Ok(Frequency::Monthly),
            _ => Err(FrequencyParseError(s.to_string())),
        }
    }
}

/// Error type for parsing frequencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyParseError(pub String);

impl fmt::Display for FrequencyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown frequency: '{}'", self.0)
    }
}

impl std::error::Error for FrequencyParseError {}
