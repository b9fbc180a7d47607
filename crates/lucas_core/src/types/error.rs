//! Error types for structured error handling.
//!
//! This module provides:
//! - `InterpolationError`: Errors from interpolation operations
//! - `SolverError`: Errors from iterative solvers
//! - `ParameterError`: Errors from model parameter validation
//! - `QuadratureError`: Errors from shock discretisation

use thiserror::Error;

/// Interpolation-related errors.
///
/// Provides structured error handling for interpolation operations
/// with descriptive context for each failure mode.
///
/// # Variants
/// - `OutOfBounds`: Query point outside the domain on a side where extrapolation is disabled
/// - `InsufficientData`: Not enough data points for interpolation
/// - `NonMonotonicData`: Abscissas are not strictly increasing
/// - `InvalidInput`: General invalid input error
///
/// # Examples
/// ```
/// use lucas_core::types::InterpolationError;
///
/// let err = InterpolationError::OutOfBounds { x: 5.0, min: 0.0, max: 3.0 };
/// assert!(format!("{}", err).contains("outside valid domain"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InterpolationError {
    /// Query point outside valid interpolation domain.
    #[error("Query point {x} outside valid domain [{min}, {max}]")]
    OutOfBounds {
        /// The query point that was out of bounds
        x: f64,
        /// Minimum valid value
        min: f64,
        /// Maximum valid value
        max: f64,
    },

    /// Insufficient data points for interpolation.
    #[error("Insufficient data points: got {got}, need at least {need}")]
    InsufficientData {
        /// Number of points provided
        got: usize,
        /// Minimum number of points required
        need: usize,
    },

    /// Abscissas are not strictly increasing.
    #[error("Data is not strictly increasing at index {index}")]
    NonMonotonicData {
        /// Index where the violation was detected
        index: usize,
    },

    /// Invalid input data or parameters.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Iterative solver errors.
///
/// # Variants
/// - `MaxIterationsExceeded`: Solver failed to converge within iteration limit
/// - `NumericalInstability`: Iteration produced non-finite values
/// - `InvalidConfig`: Tolerance or iteration cap is unusable
///
/// # Examples
/// ```
/// use lucas_core::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded { iterations: 100 };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// Solver failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),

    /// Invalid solver configuration.
    #[error("Invalid solver configuration: {0}")]
    InvalidConfig(String),
}

/// Model parameter validation errors.
///
/// Raised before any iteration starts, so malformed economies fail fast.
///
/// # Examples
/// ```
/// use lucas_core::types::ParameterError;
///
/// let err = ParameterError::out_of_range("beta", 1.2, "0 < beta < 1");
/// assert_eq!(
///     format!("{}", err),
///     "Parameter beta = 1.2 out of range: expected 0 < beta < 1"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParameterError {
    /// Parameter value outside its admissible range.
    #[error("Parameter {name} = {value} out of range: expected {expected}")]
    OutOfRange {
        /// Parameter name
        name: String,
        /// The offending value
        value: f64,
        /// Human-readable admissible range
        expected: String,
    },

    /// Parameter is NaN or infinite.
    #[error("Parameter {name} must be finite")]
    NonFinite {
        /// Parameter name
        name: String,
    },

    /// Any other invalid parameter combination.
    #[error("Invalid parameter: {0}")]
    Invalid(String),
}

impl ParameterError {
    /// Build an `OutOfRange` error.
    pub fn out_of_range(name: &str, value: f64, expected: &str) -> Self {
        ParameterError::OutOfRange {
            name: name.to_string(),
            value,
            expected: expected.to_string(),
        }
    }

    /// Build a `NonFinite` error.
    pub fn non_finite(name: &str) -> Self {
        ParameterError::NonFinite {
            name: name.to_string(),
        }
    }
}

/// Quadrature and discrete distribution errors.
///
/// # Examples
/// ```
/// use lucas_core::types::QuadratureError;
///
/// let err = QuadratureError::InvalidNodeCount { n: 0 };
/// assert_eq!(format!("{}", err), "Invalid number of quadrature nodes: 0");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QuadratureError {
    /// Node count outside `1..=MAX_GAUSS_HERMITE_NODES`.
    #[error("Invalid number of quadrature nodes: {n}")]
    InvalidNodeCount {
        /// Requested node count
        n: usize,
    },

    /// Newton refinement of a polynomial root did not settle.
    #[error("Quadrature root {index} did not converge for n = {n}")]
    RootNotConverged {
        /// Requested node count
        n: usize,
        /// Index of the offending root
        index: usize,
    },

    /// Converged roots do not form a valid rule: repeated nodes or a
    /// weight sum away from `sqrt(pi)`.
    #[error("Gauss-Hermite rule for n = {n} failed its accuracy check")]
    InaccurateRule {
        /// Requested node count
        n: usize,
    },

    /// Values and probabilities do not form a distribution.
    #[error("Invalid distribution: {0}")]
    InvalidDistribution(String),

    /// Distribution parameter rejected.
    #[error(transparent)]
    Parameter(#[from] ParameterError),
}

/// Reject NaN and infinite parameter values.
///
/// # Examples
/// ```
/// use lucas_core::types::error::ensure_finite;
///
/// assert!(ensure_finite("mu", 0.0).is_ok());
/// assert!(ensure_finite("mu", f64::NAN).is_err());
/// ```
pub fn ensure_finite(name: &str, value: f64) -> Result<f64, ParameterError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParameterError::non_finite(name))
    }
}
