//! Error types for bond operations.
//!
//! Every failure is local to one call and carries the inputs that caused it.

use thiserror::Error;

use convex_core::ConvexError;
use convex_math::MathError;

/// A specialized Result type for bond operations.
pub type BondResult<T> = Result<T, BondError>;

/// Errors that can occur during bond operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BondError {
    /// A bond field is missing or violates a construction rule.
    #[error("Invalid bond: {field}: {reason}")]
    InvalidBond {
        /// The offending field.
        field: String,
        /// Description of what's invalid.
        reason: String,
    },

    /// The coupon schedule cannot be generated.
    #[error("Invalid schedule: {reason}")]
    InvalidSchedule {
        /// Description of the failure.
        reason: String,
    },

    /// Settlement falls outside the range the operation accepts.
    #[error("Settlement {settlement} is out of range for bond {issue} -> {maturity}: {reason}")]
    SettlementOutOfRange {
        /// Settlement date.
        settlement: String,
        /// Issue date.
        issue: String,
        /// Maturity date.
        maturity: String,
        /// Which bound was violated.
        reason: String,
    },

    /// No yield inside the search bracket reproduces the price.
    #[error("Price {price} is out of bounds: {reason}")]
    PriceOutOfBounds {
        /// The clean price supplied.
        price: f64,
        /// Description of the failure.
        reason: String,
    },

    /// The yield is outside the domain of the discount function.
    #[error("Invalid yield {value}: {reason}")]
    InvalidYield {
        /// The yield supplied.
        value: f64,
        /// Description of what's invalid.
        reason: String,
    },

    /// The yield solver hit its iteration cap.
    #[error("Yield did not converge after {iterations} iterations (residual: {residual:.2e})")]
    YieldNotConverged {
        /// Number of iterations attempted.
        iterations: u32,
        /// Price residual at the last iterate.
        residual: f64,
    },

    /// The day count and frequency cannot be combined.
    #[error("Convention mismatch: {day_count} cannot be used with frequency {frequency}")]
    ConventionMismatch {
        /// Day count convention name.
        day_count: String,
        /// Frequency name.
        frequency: String,
    },

    /// Core library error.
    #[error("Core error: {0}")]
    CoreError(#[from] ConvexError),

    /// Numerical solver error.
    #[error("Solver error: {0}")]
    SolverError(#[from] MathError),
}

impl BondError {
    /// Creates an invalid bond error.
    #[must_use]
    pub fn invalid_bond(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidBond {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid schedule error.
    #[must_use]
    pub fn invalid_schedule(reason: impl Into<String>) -> Self {
        Self::InvalidSchedule {
            reason: reason.into(),
        }
    }

    /// Creates a price out of bounds error.
    #[must_use]
    pub fn price_out_of_bounds(price: f64, reason: impl Into<String>) -> Self {
        Self::PriceOutOfBounds {
            price,
            reason: reason.into(),
        }
    }

    /// Creates an invalid yield error.
    #[must_use]
    pub fn invalid_yield(value: f64, reason: impl Into<String>) -> Self {
        Self::InvalidYield {
            value,
            reason: reason.into(),
        }
    }

    /// Short machine-readable name of the error kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidBond { .. } => "InvalidBond",
            Self::InvalidSchedule { .. } => "InvalidSchedule",
            Self::SettlementOutOfRange { .. } => "SettlementOutOfRange",
            Self::PriceOutOfBounds { .. } => "PriceOutOfBounds",
            Self::InvalidYield { .. } => "InvalidYield",
            Self::YieldNotConverged { .. } => "YieldNotConverged",
            Self::ConventionMismatch { .. } => "ConventionMismatch",
            Self::CoreError(ConvexError::InvalidDate { .. }) => "InvalidDate",
            Self::CoreError(ConvexError::InvalidDateOrder { .. }) => "InvalidDateOrder",
            Self::SolverError(_) => "SolverError",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BondError::invalid_bond("coupon_rate", "must be non-negative");
        assert_eq!(
            err.to_string(),
            "Invalid bond: coupon_rate: must be non-negative"
        );

        let err = BondError::YieldNotConverged {
            iterations: 100,
            residual: 1.5e-3,
        };
        assert!(err.to_string().contains("100 iterations"));
    }

    #[test]
    fn test_from_core_error() {
        let err: BondError = ConvexError::invalid_date("2023-02-29").into();
        assert_eq!(err.kind(), "InvalidDate");
    }

    #[test]
    fn test_kind() {
        assert_eq!(
            BondError::price_out_of_bounds(-1.0, "must be positive").kind(),
            "PriceOutOfBounds"
        );
        assert_eq!(BondError::invalid_schedule("empty").kind(), "InvalidSchedule");
    }
}
