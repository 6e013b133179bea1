//! Error types for the Convex core crate.
//!
//! Calendar and day count failures are local and deterministic; each variant
//! carries the offending input so callers can report it verbatim.

use thiserror::Error;

/// A specialized Result type for Convex core operations.
pub type ConvexResult<T> = Result<T, ConvexError>;

/// The main error type for Convex core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvexError {
    /// The (year, month, day) triple is not a valid calendar date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// A year fraction was requested for an interval whose end precedes its start.
    #[error("Invalid date order: start {start} is after end {end}")]
    InvalidDateOrder {
        /// Interval start date.
        start: String,
        /// Interval end date.
        end: String,
    },
}

impl ConvexError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid date order error.
    #[must_use]
    pub fn invalid_date_order(start: impl ToString, end: impl ToString) -> Self {
        Self::InvalidDateOrder {
            start: start.to_string(),
            end: end.to_string(),
        }
    }
}
