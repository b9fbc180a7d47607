//! # lucas_core: Numerical Foundation for the Lucas Asset-Pricing Workspace
//!
//! ## Layer 1 (Foundation) Role
//!
//! lucas_core is the bottom layer of the workspace, providing:
//! - Piecewise-linear and constant interpolators with explicit extrapolation rules (`math::interpolators`)
//! - Gauss-Hermite quadrature and discrete shock distributions (`math::quadrature`)
//! - CRRA utility and marginal utility (`math::utility`)
//! - Solver configuration and the generic fixed-point driver (`math::solvers`)
//! - Error types: `InterpolationError`, `SolverError`, `ParameterError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other workspace crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use lucas_core::math::interpolators::{Interpolator, LinearInterpolator};
//! use lucas_core::math::quadrature::NormalDiscretiser;
//! use lucas_core::math::utility::crra_marginal_utility;
//!
//! // Seven-node approximation to N(0, 0.1^2)
//! let shocks = NormalDiscretiser::new(0.0, 0.1).unwrap().discretise(7).unwrap();
//! assert!((shocks.expectation(|e| e) - 0.0).abs() < 1e-12);
//!
//! // Marginal utility of log preferences
//! assert!((crra_marginal_utility(2.0_f64, 1.0) - 0.5).abs() < 1e-12);
//!
//! // Linear interpolation
//! let interp: LinearInterpolator<f64> = LinearInterpolator::new(&[0.0, 1.0], &[0.0, 2.0]).unwrap();
//! assert!((interp.interpolate(0.25).unwrap() - 0.5).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for error and distribution types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
