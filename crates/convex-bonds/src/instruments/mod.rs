//! Bond instrument types.
//!
//! - [`FixedRateBond`]: fixed coupon bullet bond redeeming at par

mod fixed_rate;

pub use fixed_rate::{FixedRateBond, FixedRateBondBuilder};
