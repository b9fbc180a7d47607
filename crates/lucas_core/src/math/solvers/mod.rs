//! Iterative solvers.
//!
//! ## Available Solvers
//!
//! - [`FixedPointSolver`]: successive approximation `x_{n+1} = T(x_n)` for contraction mappings
//!
//! ## Configuration
//!
//! Solvers use [`SolverConfig`] for configuring:
//! - `tolerance`: Convergence tolerance (default: 1e-5)
//! - `max_iterations`: Maximum iteration count (default: 500)
//!
//! ## Example
//!
//! ```
//! use lucas_core::math::solvers::{FixedPointSolver, SolverConfig};
//! use lucas_core::types::SolverError;
//!
//! // x = cos(x)
//! let solver = FixedPointSolver::new(SolverConfig::new(1e-12, 1_000).unwrap());
//! let result = solver
//!     .solve(1.0_f64, |x| Ok::<_, SolverError>(x.cos()), |a, b| Ok((a - b).abs()))
//!     .unwrap();
//!
//! assert!(result.converged);
//! assert!((result.solution - 0.739_085_133_215_160_6).abs() < 1e-10);
//! ```

mod config;
mod fixed_point;

// Re-export public types at module level
pub use config::SolverConfig;
pub use fixed_point::{euclidean_distance, FixedPointResult, FixedPointSolver};
