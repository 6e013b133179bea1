//! # Convex Bonds
//!
//! Fixed-coupon bond valuation for the Convex library.
//!
//! This crate provides:
//!
//! - **Instruments**: [`FixedRateBond`], an immutable description of a
//!   bullet bond with a fixed coupon
//! - **Cash Flows**: coupon schedule generation backward from maturity
//! - **Pricing**: accrued interest, clean/dirty price from yield, and
//!   yield-to-maturity from a clean price
//! - **Risk**: Macaulay duration, modified duration and convexity
//!
//! Prices are quoted per 100 of face value. Yields are decimals compounded
//! at the bond's coupon frequency (`0.05` is 5%).
//!
//! ## Example
//!
//! ```rust
//! use convex_bonds::prelude::*;
//! use convex_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let bond = FixedRateBond::builder()
//!     .issue_date(Date::from_ymd(2020, 1, 1).unwrap())
//!     .maturity(Date::from_ymd(2030, 1, 1).unwrap())
//!     .coupon_rate(dec!(0.05))
//!     .frequency(Frequency::SemiAnnual)
//!     .day_count(DayCountConvention::ActActIsda)
//!     .build()
//!     .unwrap();
//!
//! let settlement = Date::from_ymd(2023, 1, 1).unwrap();
//! let valuation = bond.valuation_from_ytm(settlement, 0.04).unwrap();
//! assert!(valuation.clean_price > 100.0);
//!
//! let solver = YieldSolver::default();
//! let ytm = solver.solve(&bond, settlement, valuation.clean_price).unwrap();
//! assert!((ytm.yield_value - 0.04).abs() < 1e-6);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::similar_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::float_cmp)]

pub mod cashflows;
pub mod error;
pub mod instruments;
pub mod pricing;
pub mod risk;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cashflows::{remaining_cash_flows, CouponSchedule, ProjectedCashFlow};
    pub use crate::error::{BondError, BondResult};
    pub use crate::instruments::{FixedRateBond, FixedRateBondBuilder};
    pub use crate::pricing::{
        accrued_interest, price_from_ytm, valuation_from_clean_price, valuation_from_ytm,
        ytm_from_price, PriceResult, SolverSettings, ValuationResult, YieldResult, YieldSolver,
    };
    pub use crate::risk::{convexity, macaulay_duration, modified_duration, RiskMetrics};
}

pub use error::{BondError, BondResult};
pub use instruments::FixedRateBond;
pub use pricing::ValuationResult;

/// Face value that every price and cash flow is quoted against.
pub const FACE_VALUE: f64 = 100.0;
