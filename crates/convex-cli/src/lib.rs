//! # Convex CLI
//!
//! JSON request runner for the Convex bond valuation library.
//!
//! Reads one valuation request, dispatches on the quote it carries and
//! renders the [`ValuationResult`](convex_bonds::pricing::ValuationResult):
//!
//! - `ytm` present: price the bond at that yield
//! - `clean_price` present: solve the yield, then value the bond at it
//! - neither or both: rejected with [`CliError::AmbiguousInput`]
//!
//! ## Example
//!
//! ```rust
//! use convex_cli::{handle_json, CliConfig};
//!
//! let request = r#"{
//!     "issue_date": [2020, 1, 1],
//!     "maturity_date": [2030, 1, 1],
//!     "settlement_date": [2023, 1, 1],
//!     "coupon_rate": 0.05,
//!     "ytm": 0.04
//! }"#;
//!
//! let result = handle_json(request, &CliConfig::default()).unwrap();
//! assert!(result.clean_price > 106.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::uninlined_format_args)]

pub mod config;
pub mod error;
pub mod output;
pub mod request;

pub use config::{CliConfig, RequestDefaults};
pub use error::{CliError, CliResult};
pub use output::{render, OutputFormat};
pub use request::{handle, handle_json, BondRequest, Quote};
