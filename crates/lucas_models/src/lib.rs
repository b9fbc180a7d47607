//! # Lucas Models (L2: Business Logic)
//!
//! The Lucas (1978) tree economy and its equilibrium pricing kernel.
//!
//! This crate provides:
//! - The AR(1) log-dividend process with a quadrature shock approximation
//! - The pricing function as an immutable interpolated value type
//! - The one-period pricing operator and the fixed-point solve
//! - Closed-form benchmarks for log utility and i.i.d. log-normal dividends
//! - Dividend path simulation and price statistics along a path
//!
//! ## Example
//!
//! ```
//! use lucas_models::lucas::{DividendProcess, LucasEconomy, SolveOptions};
//! use lucas_models::analytical::log_utility_price;
//!
//! let process = DividendProcess::new(0.9, 0.1, 0.0, 7).unwrap();
//! let mut economy = LucasEconomy::new(1.0, 0.9, process).unwrap();
//! economy.solve(&SolveOptions::default()).unwrap();
//!
//! let price = economy.equilibrium_price(1.0).unwrap();
//! assert!((price - log_utility_price(1.0, 0.9)).abs() < 1e-2);
//! ```
//!
//! ## Design Principles
//!
//! - **Functional update**: each iteration builds a new pricing function on the same grid
//! - **Fail fast**: parameters are validated before any iteration
//! - **Explicit non-convergence**: hitting the iteration cap is an error, never a result

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod error;
pub mod lucas;

pub use error::ModelError;
