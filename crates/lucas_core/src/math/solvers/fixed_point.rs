//! Successive-approximation fixed-point solver.

use super::SolverConfig;
use crate::types::SolverError;
use num_traits::Float;

/// Outcome of a fixed-point iteration.
///
/// Non-convergence is reported through `converged == false`; the last
/// iterate is still returned so callers can inspect it, but it must not be
/// treated as a solution.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedPointResult<S, T> {
    /// Last iterate produced.
    pub solution: S,
    /// Number of operator applications performed.
    pub iterations: usize,
    /// Distance between the last two iterates.
    pub distance: T,
    /// Distance after each iteration, oldest first.
    pub history: Vec<T>,
    /// Whether `distance <= tolerance` was reached within the cap.
    pub converged: bool,
}

impl<S, T: Float> FixedPointResult<S, T> {
    /// Convert a non-converged result into `SolverError::MaxIterationsExceeded`.
    pub fn into_converged(self) -> Result<Self, SolverError> {
        if self.converged {
            Ok(self)
        } else {
            Err(SolverError::MaxIterationsExceeded {
                iterations: self.iterations,
            })
        }
    }
}

/// Fixed-point solver for contraction mappings.
///
/// Repeatedly applies an operator `x_{n+1} = T(x_n)` and measures the
/// distance between successive iterates. The state machine has two
/// states: iterating, and terminated (converged or cap reached).
///
/// The iterate type `S` is opaque to the solver, so any value type (a
/// scalar, a vector, an interpolated function) can be iterated as long as
/// the caller supplies the operator and the distance.
///
/// # Example
///
/// ```
/// use lucas_core::math::solvers::{euclidean_distance, FixedPointSolver, SolverConfig};
/// use lucas_core::types::SolverError;
///
/// // v = 0.5 * v + 1 has the fixed point v = 2 in every component
/// let solver = FixedPointSolver::new(SolverConfig::new(1e-10, 200).unwrap());
/// let result = solver
///     .solve(
///         vec![0.0_f64; 3],
///         |v| Ok::<_, SolverError>(v.iter().map(|x| 0.5 * x + 1.0).collect::<Vec<_>>()),
///         |a, b| Ok(euclidean_distance(a, b)),
///     )
///     .unwrap();
///
/// assert!(result.converged);
/// assert!(result.solution.iter().all(|x| (x - 2.0).abs() < 1e-9));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPointSolver<T: Float> {
    config: SolverConfig<T>,
}

impl<T: Float> FixedPointSolver<T> {
    /// Create a new solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: SolverConfig::default(),
        }
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }

    /// Iterate `step` from `initial` until the distance between successive
    /// iterates is at or below the tolerance, or the iteration cap is hit.
    ///
    /// # Arguments
    ///
    /// * `initial` - Starting iterate
    /// * `step` - The operator; must not mutate its input
    /// * `distance` - Metric between the previous and the new iterate
    ///
    /// # Returns
    ///
    /// * `Ok(result)` with `result.converged` set accordingly
    /// * `Err(e)` if the configuration is invalid, an operator or distance
    ///   evaluation fails, or the distance becomes non-finite
    pub fn solve<S, F, D, E>(
        &self,
        initial: S,
        mut step: F,
        mut distance: D,
    ) -> Result<FixedPointResult<S, T>, E>
    where
        F: FnMut(&S) -> Result<S, E>,
        D: FnMut(&S, &S) -> Result<T, E>,
        E: From<SolverError>,
    {
        self.config.validate()?;

        let mut current = initial;
        let mut history = Vec::new();
        let mut dist = T::infinity();

        for iteration in 1..=self.config.max_iterations {
            let next = step(&current)?;
            dist = distance(&current, &next)?;

            if !dist.is_finite() {
                return Err(SolverError::NumericalInstability(format!(
                    "non-finite distance at iteration {}",
                    iteration
                ))
                .into());
            }

            history.push(dist);
            current = next;

            if dist <= self.config.tolerance {
                return Ok(FixedPointResult {
                    solution: current,
                    iterations: iteration,
                    distance: dist,
                    history,
                    converged: true,
                });
            }
        }

        Ok(FixedPointResult {
            solution: current,
            iterations: self.config.max_iterations,
            distance: dist,
            history,
            converged: false,
        })
    }
}

/// Euclidean norm of `a - b`.
///
/// Slices are expected to have equal length; extra trailing entries of the
/// longer slice are ignored.
///
/// # Example
///
/// ```
/// use lucas_core::math::solvers::euclidean_distance;
///
/// assert_eq!(euclidean_distance(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
/// ```
pub fn euclidean_distance<T: Float>(a: &[T], b: &[T]) -> T {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .fold(T::zero(), |acc, (&x, &y)| acc + (x - y) * (x - y))
        .sqrt()
}
