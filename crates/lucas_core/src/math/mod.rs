//! Numerical building blocks.
//!
//! - [`interpolators`]: piecewise-linear and constant functions with extrapolation rules
//! - [`quadrature`]: Gauss-Hermite discretisation of Normal shocks
//! - [`solvers`]: solver configuration and the fixed-point driver
//! - [`utility`]: CRRA preferences

pub mod interpolators;
pub mod quadrature;
pub mod solvers;
pub mod utility;
