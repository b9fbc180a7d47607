//! Closed-form equilibrium prices.
//!
//! Used as benchmarks for the numerical solve. Each formula is exact only
//! in the special case it names.

mod lucas;

pub use lucas::{closed_form_price, iid_lognormal_price, log_utility_price};
