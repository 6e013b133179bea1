//! # Convex Core
//!
//! Calendar and day count building blocks for the Convex bond valuation library.
//!
//! This crate provides the leaf layer used by everything else in Convex:
//!
//! - **Types**: [`Date`] (proleptic Gregorian calendar date) and [`Frequency`]
//! - **Day Count Conventions**: year fractions under ACT/ACT ISDA, 30E/360,
//!   ACT/360 and ACT/365F
//!
//! Every operation here is a pure function of its inputs.
//!
//! ## Example
//!
//! ```rust
//! use convex_core::prelude::*;
//!
//! let start = Date::from_ymd(2024, 7, 1).unwrap();
//! let end = Date::from_ymd(2025, 7, 1).unwrap();
//! let yf = DayCountConvention::ActActIsda.year_fraction(start, end).unwrap();
//! assert!(yf > rust_decimal::Decimal::ZERO);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::uninlined_format_args)]

pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::daycounts::{DayCount, DayCountConvention};
    pub use crate::error::{ConvexError, ConvexResult};
    pub use crate::types::{Date, Frequency};
}

// Re-export commonly used types at crate root
pub use error::{ConvexError, ConvexResult};
pub use types::{Date, Frequency};
