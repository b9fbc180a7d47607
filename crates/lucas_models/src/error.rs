//! Error types for model construction and solution.
//!
//! This module provides:
//! - `ModelError`: Errors from building, solving and querying a Lucas economy

use lucas_core::types::{InterpolationError, ParameterError, QuadratureError, SolverError};
use thiserror::Error;

/// Model errors.
///
/// Wraps the foundation-layer errors and adds the failure modes specific
/// to the equilibrium solve.
///
/// # Variants
/// - `Parameter`: Malformed economy or dividend-process parameter
/// - `Interpolation`: Pricing function could not be built or evaluated
/// - `Quadrature`: Shock discretisation failed
/// - `Solver`: Invalid solver configuration or numerical breakdown
/// - `NotConverged`: Iteration cap reached before the tolerance
/// - `NotSolved`: Equilibrium queried before a successful solve
/// - `InvalidGrid`: Log-dividend grid unusable
/// - `Simulation`: Dividend path could not be drawn
///
/// # Examples
/// ```
/// use lucas_models::ModelError;
///
/// let err = ModelError::NotConverged { iterations: 3, distance: 0.5, tolerance: 1e-5 };
/// assert!(format!("{}", err).contains("did not converge after 3 iterations"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ModelError {
    /// Invalid model parameter.
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    /// Interpolation failure.
    #[error(transparent)]
    Interpolation(#[from] InterpolationError),

    /// Quadrature failure.
    #[error(transparent)]
    Quadrature(#[from] QuadratureError),

    /// Solver failure.
    #[error(transparent)]
    Solver(#[from] SolverError),

    /// The fixed-point iteration hit its cap.
    #[error(
        "Pricing iteration did not converge after {iterations} iterations: \
         distance {distance:e} above tolerance {tolerance:e}"
    )]
    NotConverged {
        /// Iterations performed
        iterations: usize,
        /// Distance between the last two iterates
        distance: f64,
        /// Requested tolerance
        tolerance: f64,
    },

    /// No equilibrium pricing function is available.
    #[error("Economy has not been solved")]
    NotSolved,

    /// Unusable log-dividend grid.
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    /// Path simulation failure.
    #[error("Simulation failed: {0}")]
    Simulation(String),
}
