//! Quadrature-based discretisation of continuous shocks.
//!
//! Expectations over a continuous shock are replaced by finite weighted sums:
//!
//! ```text
//! E[f(e)] ~ sum_j p_j * f(e_j)
//! ```
//!
//! - [`gauss_hermite_nodes_weights`]: nodes and weights for the weight function `exp(-x^2)`
//! - [`NormalDiscretiser`]: maps Gauss-Hermite nodes onto `N(mean, std_dev^2)`
//! - [`DiscreteDistribution`]: the resulting `(value, probability)` pairs
//!
//! ## Example
//!
//! ```
//! use lucas_core::math::quadrature::NormalDiscretiser;
//!
//! let dist = NormalDiscretiser::new(0.0, 1.0).unwrap().discretise(5).unwrap();
//!
//! // Exact for polynomials up to degree 2n - 1
//! assert!((dist.expectation(|z| z * z) - 1.0).abs() < 1e-12);
//! assert!((dist.expectation(|z| z.powi(4)) - 3.0).abs() < 1e-10);
//! ```

mod distribution;
mod gauss_hermite;

pub use distribution::{DiscreteDistribution, NormalDiscretiser};
pub use gauss_hermite::{gauss_hermite_nodes_weights, MAX_GAUSS_HERMITE_NODES};
