//! # Convex Math
//!
//! Numerical utilities for the Convex bond valuation library.
//!
//! This crate provides:
//!
//! - **Solvers**: a bracketed Newton-Raphson root finder safeguarded by
//!   bisection, used to invert price/yield relationships
//!
//! ## Design Philosophy
//!
//! - **Bounded Work**: every solver terminates within its iteration cap
//! - **Numerical Stability**: Newton steps never leave the current bracket

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{hybrid, SolverConfig, SolverResult};
}

pub use error::{MathError, MathResult};
