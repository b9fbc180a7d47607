//! The Lucas tree economy and its equilibrium solve.
//!
//! The equilibrium price is the fixed point of the one-period operator
//!
//! ```text
//! P(x) = sum_j p_j * beta * (d'_j / d)^(-rho) * (P(x'_j) + d'_j)
//! x'_j = alpha * x + e_j,    d = e^x,    d'_j = e^(x'_j)
//! ```
//!
//! where `(e_j, p_j)` is the discretised dividend shock.

use super::dividend::{DividendProcess, DEFAULT_GRID_POINTS};
use super::pricing_function::PricingFunction;
use crate::ModelError;
use lucas_core::math::interpolators::{ConstantInterpolator, Interpolator};
use lucas_core::math::solvers::{euclidean_distance, FixedPointSolver, SolverConfig};
use lucas_core::math::utility::crra_marginal_utility;
use lucas_core::types::error::ensure_finite;
use lucas_core::types::{ParameterError, SolverError};
use tracing::{debug, info, warn};

/// Options for [`LucasEconomy::solve`].
///
/// When `log_grid` is `None` the default grid of `grid_points` points over
/// the unconditional `mean +/- 5 sd` is used.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveOptions {
    /// Explicit log-dividend grid, overriding `grid_points`.
    pub log_grid: Option<Vec<f64>>,
    /// Number of points of the default grid.
    pub grid_points: usize,
    /// Tolerance and iteration cap.
    pub config: SolverConfig<f64>,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            log_grid: None,
            grid_points: DEFAULT_GRID_POINTS,
            config: SolverConfig::default(),
        }
    }
}

impl SolveOptions {
    /// Use an explicit log-dividend grid.
    pub fn with_log_grid(mut self, log_grid: Vec<f64>) -> Self {
        self.log_grid = Some(log_grid);
        self
    }

    /// Change the size of the default grid.
    pub fn with_grid_points(mut self, grid_points: usize) -> Self {
        self.grid_points = grid_points;
        self
    }

    /// Replace the solver configuration.
    pub fn with_config(mut self, config: SolverConfig<f64>) -> Self {
        self.config = config;
        self
    }
}

/// Summary of a converged solve.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SolveReport {
    /// Operator applications performed.
    pub iterations: usize,
    /// Distance between the last two iterates.
    pub distance: f64,
    /// Requested tolerance.
    pub tolerance: f64,
    /// Distance after each iteration, oldest first.
    pub history: Vec<f64>,
    /// Size of the log-dividend grid.
    pub grid_points: usize,
}

/// Representative-agent exchange economy with a single tree.
///
/// Holds the preferences, the dividend process and, after a successful
/// [`solve`](Self::solve), the equilibrium pricing function.
///
/// # Example
///
/// ```
/// use lucas_models::lucas::{DividendProcess, LucasEconomy, SolveOptions};
///
/// let process = DividendProcess::iid(0.1, -0.005, 7).unwrap();
/// let mut economy = LucasEconomy::new(2.0, 0.95, process).unwrap();
/// assert!(economy.equilibrium_price(1.0).is_err());
///
/// let report = economy.solve(&SolveOptions::default()).unwrap();
/// assert!(report.distance <= report.tolerance);
/// assert!(economy.equilibrium_price(1.0).unwrap() > 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LucasEconomy {
    crra: f64,
    discount_factor: f64,
    dividend_process: DividendProcess,
    solution: Option<PricingFunction>,
}

impl LucasEconomy {
    /// Create an unsolved economy.
    ///
    /// # Arguments
    ///
    /// * `crra` - Relative risk aversion `rho`, finite and `>= 0`
    /// * `discount_factor` - Time preference `beta`, `0 < beta < 1`
    /// * `dividend_process` - Law of motion of the log dividend
    pub fn new(
        crra: f64,
        discount_factor: f64,
        dividend_process: DividendProcess,
    ) -> Result<Self, ModelError> {
        ensure_finite("rho", crra)?;
        if crra < 0.0 {
            return Err(ParameterError::out_of_range("rho", crra, "rho >= 0").into());
        }
        ensure_finite("beta", discount_factor)?;
        if discount_factor <= 0.0 || discount_factor >= 1.0 {
            return Err(
                ParameterError::out_of_range("beta", discount_factor, "0 < beta < 1").into(),
            );
        }

        Ok(Self {
            crra,
            discount_factor,
            dividend_process,
            solution: None,
        })
    }

    /// Relative risk aversion.
    #[inline]
    pub fn crra(&self) -> f64 {
        self.crra
    }

    /// Discount factor.
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }

    /// The dividend process.
    #[inline]
    pub fn dividend_process(&self) -> &DividendProcess {
        &self.dividend_process
    }

    /// The equilibrium pricing function, if solved.
    #[inline]
    pub fn solution(&self) -> Option<&PricingFunction> {
        self.solution.as_ref()
    }

    /// Whether an equilibrium pricing function is stored.
    #[inline]
    pub fn is_solved(&self) -> bool {
        self.solution.is_some()
    }

    /// Default grid of `grid_points` points for this economy's process.
    pub fn default_log_grid(&self, grid_points: usize) -> Result<Vec<f64>, ModelError> {
        self.dividend_process.log_dividend_grid(grid_points)
    }

    /// Apply the pricing operator once.
    ///
    /// Evaluates the right-hand side of the Euler equation at every point of
    /// `log_grid` using `candidate` as next period's price, and returns the
    /// result as a new pricing function on the same grid. `candidate` is
    /// typically evaluated off the grid; its own extrapolation rule applies.
    ///
    /// # Errors
    ///
    /// Errors of `candidate` are propagated. A non-finite price yields
    /// `ModelError::Solver(SolverError::NumericalInstability)`.
    pub fn price_one_period<F>(
        &self,
        candidate: &F,
        log_grid: &[f64],
    ) -> Result<PricingFunction, ModelError>
    where
        F: Interpolator<f64> + ?Sized,
    {
        let prices = log_grid
            .iter()
            .map(|&x| self.price_at(candidate, x))
            .collect::<Result<Vec<_>, _>>()?;
        PricingFunction::new(log_grid, &prices)
    }

    fn price_at<F>(&self, candidate: &F, x: f64) -> Result<f64, ModelError>
    where
        F: Interpolator<f64> + ?Sized,
    {
        let process = &self.dividend_process;
        let price = process.shocks().try_expectation(|shock| {
            let x_next = process.next_log_dividend(x, shock);
            let growth = (x_next - x).exp();
            let sdf = self.discount_factor * crra_marginal_utility(growth, self.crra);
            Ok::<_, ModelError>(sdf * (candidate.interpolate(x_next)? + x_next.exp()))
        })?;

        if !price.is_finite() {
            return Err(SolverError::NumericalInstability(format!(
                "non-finite price at log dividend {}",
                x
            ))
            .into());
        }
        Ok(price)
    }

    /// Solve for the equilibrium starting from the zero function.
    pub fn solve(&mut self, options: &SolveOptions) -> Result<SolveReport, ModelError> {
        self.solve_from(&ConstantInterpolator::<f64>::zero(), options)
    }

    /// Solve for the equilibrium starting from an arbitrary initial guess.
    ///
    /// On success the converged pricing function replaces any stored
    /// solution. On failure, including non-convergence, the economy is left
    /// exactly as it was.
    ///
    /// # Errors
    ///
    /// * `ModelError::Solver` for an invalid configuration or a numerical
    ///   breakdown
    /// * `ModelError::InvalidGrid` for an unusable grid
    /// * `ModelError::NotConverged` when the iteration cap is reached
    pub fn solve_from<F>(
        &mut self,
        initial: &F,
        options: &SolveOptions,
    ) -> Result<SolveReport, ModelError>
    where
        F: Interpolator<f64> + ?Sized,
    {
        options.config.validate()?;
        let log_grid = self.resolve_grid(options)?;
        let tolerance = options.config.tolerance;
        let max_iterations = options.config.max_iterations;

        // The initial guess need not live on the grid, so the first step is
        // taken outside the solver.
        let start = initial.interpolate_many(&log_grid)?;
        let first = self.price_one_period(initial, &log_grid)?;
        let first_distance = euclidean_distance(&start, first.prices());
        if !first_distance.is_finite() {
            return Err(SolverError::NumericalInstability(
                "non-finite distance at iteration 1".to_string(),
            )
            .into());
        }
        debug!(iteration = 1, distance = first_distance, "pricing iteration");

        let mut history = vec![first_distance];
        let (solution, iterations, distance) = if first_distance <= tolerance {
            (first, 1, first_distance)
        } else if max_iterations == 1 {
            return Err(self.not_converged(1, first_distance, tolerance));
        } else {
            let solver = FixedPointSolver::new(options.config.with_max_iterations(max_iterations - 1));
            let mut iteration = 1;
            let result = solver.solve(
                first,
                |f: &PricingFunction| self.price_one_period(f, &log_grid),
                |old: &PricingFunction, new: &PricingFunction| {
                    iteration += 1;
                    let d = euclidean_distance(old.prices(), new.prices());
                    debug!(iteration, distance = d, "pricing iteration");
                    Ok::<_, ModelError>(d)
                },
            )?;

            history.extend_from_slice(&result.history);
            if !result.converged {
                return Err(self.not_converged(max_iterations, result.distance, tolerance));
            }
            (result.solution, result.iterations + 1, result.distance)
        };

        info!(
            iterations,
            distance,
            grid_points = log_grid.len(),
            "equilibrium pricing function converged"
        );
        self.solution = Some(solution);

        Ok(SolveReport {
            iterations,
            distance,
            tolerance,
            history,
            grid_points: log_grid.len(),
        })
    }

    /// Equilibrium price at log dividend `log_d`.
    pub fn equilibrium_log_price(&self, log_d: f64) -> Result<f64, ModelError> {
        self.solution
            .as_ref()
            .ok_or(ModelError::NotSolved)?
            .log_price(log_d)
    }

    /// Equilibrium price at dividend level `d > 0`.
    pub fn equilibrium_price(&self, d: f64) -> Result<f64, ModelError> {
        if !(d.is_finite() && d > 0.0) {
            return Err(ParameterError::out_of_range("dividend", d, "d > 0").into());
        }
        self.equilibrium_log_price(d.ln())
    }

    /// Price-dividend ratio `P(d) / d` at each point of a log-dividend grid.
    pub fn price_dividend_ratios(&self, log_grid: &[f64]) -> Result<Vec<f64>, ModelError> {
        log_grid
            .iter()
            .map(|&x| Ok(self.equilibrium_log_price(x)? / x.exp()))
            .collect()
    }

    fn resolve_grid(&self, options: &SolveOptions) -> Result<Vec<f64>, ModelError> {
        match &options.log_grid {
            Some(grid) => {
                validate_log_grid(grid)?;
                Ok(grid.clone())
            }
            None => self.default_log_grid(options.grid_points),
        }
    }

    fn not_converged(&self, iterations: usize, distance: f64, tolerance: f64) -> ModelError {
        warn!(
            iterations,
            distance, tolerance, "pricing iteration hit the iteration cap"
        );
        ModelError::NotConverged {
            iterations,
            distance,
            tolerance,
        }
    }
}

fn validate_log_grid(grid: &[f64]) -> Result<(), ModelError> {
    if grid.len() < 2 {
        return Err(ModelError::InvalidGrid(format!(
            "grid needs at least 2 points, got {}",
            grid.len()
        )));
    }
    if let Some(i) = grid.iter().position(|x| !x.is_finite()) {
        return Err(ModelError::InvalidGrid(format!(
            "grid point {} is not finite",
            i
        )));
    }
    if let Some(i) = grid.windows(2).position(|w| w[1] <= w[0]) {
        return Err(ModelError::InvalidGrid(format!(
            "grid is not strictly increasing at index {}",
            i + 1
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytical::log_utility_price;
    use approx::assert_relative_eq;

    fn log_utility_economy() -> LucasEconomy {
        let process = DividendProcess::new(0.5, 0.1, 0.0, 5).unwrap();
        LucasEconomy::new(1.0, 0.9, process).unwrap()
    }

    #[test]
    fn test_new_validates_preferences() {
        let process = DividendProcess::iid(0.1, 0.0, 3).unwrap();
        assert!(LucasEconomy::new(2.0, 1.0, process.clone()).is_err());
        assert!(LucasEconomy::new(2.0, 0.0, process.clone()).is_err());
        assert!(LucasEconomy::new(-0.5, 0.9, process.clone()).is_err());
        assert!(LucasEconomy::new(f64::NAN, 0.9, process.clone()).is_err());

        let economy = LucasEconomy::new(0.0, 0.9, process).unwrap();
        assert_eq!(economy.crra(), 0.0);
        assert_eq!(economy.discount_factor(), 0.9);
        assert!(!economy.is_solved());
    }

    #[test]
    fn test_one_period_from_zero_prices_next_dividend() {
        // With a zero continuation value, P(x) = E[beta * (d'/d)^-rho * d']
        let process = DividendProcess::iid(0.0, 0.0, 1).unwrap();
        let economy = LucasEconomy::new(2.0, 0.9, process).unwrap();
        let f = economy
            .price_one_period(&ConstantInterpolator::<f64>::zero(), &[-1.0, 0.0, 1.0])
            .unwrap();

        // alpha = 0 and no shock: d' = 1, so P(x) = 0.9 * e^(2x)
        for (&x, &p) in f.log_grid().iter().zip(f.prices()) {
            assert_relative_eq!(p, 0.9 * (2.0 * x).exp(), max_relative = 1e-12);
        }
    }

    #[test]
    fn test_one_period_with_constant_candidate() {
        // Risk-neutral, deterministic, alpha = 0.5
        let process = DividendProcess::new(0.5, 0.0, 0.0, 1).unwrap();
        let economy = LucasEconomy::new(0.0, 0.5, process).unwrap();
        let f = economy
            .price_one_period(&ConstantInterpolator::new(2.0), &[0.0, 2.0])
            .unwrap();

        assert_relative_eq!(f.prices()[0], 0.5 * (2.0 + 1.0), epsilon = 1e-14);
        assert_relative_eq!(f.prices()[1], 0.5 * (2.0 + 1.0_f64.exp()), epsilon = 1e-14);
    }

    #[test]
    fn test_one_period_propagates_candidate_errors() {
        use lucas_core::math::interpolators::LinearInterpolator;

        let economy = log_utility_economy();
        // Candidate without extrapolation, queried far outside its domain
        let narrow = LinearInterpolator::new(&[-0.01, 0.01], &[1.0, 1.0]).unwrap();
        let result = economy.price_one_period(&narrow, &[-1.0, 1.0]);
        assert!(matches!(result, Err(ModelError::Interpolation(_))));
    }

    #[test]
    fn test_solve_log_utility_matches_closed_form() {
        let mut economy = log_utility_economy();
        let report = economy.solve(&SolveOptions::default()).unwrap();

        assert!(report.distance <= 1e-5);
        assert_eq!(report.history.len(), report.iterations);
        assert_eq!(report.grid_points, 100);

        for d in [0.8, 1.0, 1.2] {
            assert_relative_eq!(
                economy.equilibrium_price(d).unwrap(),
                log_utility_price(d, 0.9),
                max_relative = 1e-3
            );
        }
    }

    #[test]
    fn test_solve_from_converged_guess_takes_one_step() {
        let mut economy = log_utility_economy();
        economy.solve(&SolveOptions::default()).unwrap();
        let guess = economy.solution().unwrap().clone();

        let options = SolveOptions::default().with_log_grid(guess.log_grid().to_vec());
        let report = economy.solve_from(&guess, &options).unwrap();
        assert_eq!(report.iterations, 1);
    }

    #[test]
    fn test_not_converged_leaves_previous_solution() {
        let mut economy = log_utility_economy();
        economy.solve(&SolveOptions::default()).unwrap();
        let before = economy.solution().cloned();

        let options = SolveOptions::default()
            .with_config(SolverConfig::new(1e-12, 3).unwrap())
            .with_grid_points(20);
        let err = economy.solve(&options).unwrap_err();

        assert!(matches!(
            err,
            ModelError::NotConverged { iterations: 3, .. }
        ));
        assert_eq!(economy.solution().cloned(), before);
    }

    #[test]
    fn test_single_iteration_cap() {
        let mut economy = log_utility_economy();
        let options =
            SolveOptions::default().with_config(SolverConfig::default().with_max_iterations(1));
        assert!(matches!(
            economy.solve(&options),
            Err(ModelError::NotConverged { iterations: 1, .. })
        ));
        assert!(!economy.is_solved());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut economy = log_utility_economy();
        let options = SolveOptions::default().with_config(SolverConfig {
            tolerance: 0.0,
            max_iterations: 10,
        });
        assert!(matches!(
            economy.solve(&options),
            Err(ModelError::Solver(SolverError::InvalidConfig(_)))
        ));
    }

    #[test]
    fn test_invalid_grids_rejected() {
        let mut economy = log_utility_economy();
        for grid in [vec![0.0], vec![0.0, f64::NAN], vec![0.0, 1.0, 1.0], vec![1.0, 0.0]] {
            let options = SolveOptions::default().with_log_grid(grid);
            assert!(matches!(
                economy.solve(&options),
                Err(ModelError::InvalidGrid(_))
            ));
        }
        assert!(matches!(
            economy.solve(&SolveOptions::default().with_grid_points(1)),
            Err(ModelError::InvalidGrid(_))
        ));
    }

    #[test]
    fn test_queries_before_solve() {
        let economy = log_utility_economy();
        assert_eq!(economy.equilibrium_log_price(0.0), Err(ModelError::NotSolved));
        assert_eq!(economy.price_dividend_ratios(&[0.0]), Err(ModelError::NotSolved));
    }

    #[test]
    fn test_equilibrium_price_rejects_non_positive_dividend() {
        let mut economy = log_utility_economy();
        economy.solve(&SolveOptions::default()).unwrap();
        assert!(matches!(
            economy.equilibrium_price(0.0),
            Err(ModelError::Parameter(_))
        ));
    }

    #[test]
    fn test_price_dividend_ratio_is_flat_under_log_utility() {
        let mut economy = log_utility_economy();
        economy.solve(&SolveOptions::default()).unwrap();
        let ratios = economy.price_dividend_ratios(&[-0.3, 0.0, 0.3]).unwrap();
        for ratio in ratios {
            assert_relative_eq!(ratio, 9.0, max_relative = 1e-3);
        }
    }

    #[test]
    fn test_degenerate_process_needs_explicit_grid() {
        let process = DividendProcess::new(0.5, 0.0, 0.0, 1).unwrap();
        let mut economy = LucasEconomy::new(1.0, 0.9, process).unwrap();
        assert!(matches!(
            economy.solve(&SolveOptions::default()),
            Err(ModelError::InvalidGrid(_))
        ));

        let grid: Vec<f64> = (0..21).map(|i| -1.0 + 0.1 * i as f64).collect();
        economy
            .solve(&SolveOptions::default().with_log_grid(grid))
            .unwrap();
        assert_relative_eq!(economy.equilibrium_price(1.0).unwrap(), 9.0, max_relative = 1e-3);
    }
}
