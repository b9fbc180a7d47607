//! Core error types.
//!
//! This module provides:
//! - `error`: Structured error types for interpolation, solver and parameter validation
//!
//! # Re-exports
//!
//! For convenience, the error types are re-exported at this module level:
//! - [`InterpolationError`], [`SolverError`], [`ParameterError`], [`QuadratureError`] from `error`

pub mod error;

// Re-export commonly used types at module level
pub use error::{InterpolationError, ParameterError, QuadratureError, SolverError};
