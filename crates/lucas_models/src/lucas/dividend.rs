//! AR(1) log-dividend process.
//!
//! ```text
//! log d' = alpha * log d + e,    e ~ N(mu, sigma^2)
//! ```
//!
//! The shock is replaced by an `n_approx`-atom Gauss-Hermite approximation
//! built once at construction.

use crate::ModelError;
use lucas_core::math::quadrature::{
    DiscreteDistribution, NormalDiscretiser, MAX_GAUSS_HERMITE_NODES,
};
use lucas_core::types::error::ensure_finite;
use lucas_core::types::ParameterError;
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Default number of quadrature nodes for the shock.
pub const DEFAULT_SHOCK_NODES: usize = 7;

/// Default number of points in the log-dividend grid.
pub const DEFAULT_GRID_POINTS: usize = 100;

/// Half-width of the default grid in unconditional standard deviations.
pub const GRID_WIDTH_STD_DEVS: f64 = 5.0;

/// Log-dividend process with its discretised shock.
///
/// Immutable once constructed.
///
/// # Example
///
/// ```
/// use lucas_models::lucas::DividendProcess;
///
/// let process = DividendProcess::new(0.9, 0.1, 0.0, 7).unwrap();
/// assert_eq!(process.shocks().len(), 7);
/// assert!((process.next_log_dividend(1.0, 0.05) - 0.95).abs() < 1e-15);
///
/// // Persistence must keep the process stationary
/// assert!(DividendProcess::new(1.0, 0.1, 0.0, 7).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DividendProcess {
    alpha: f64,
    sigma: f64,
    mu: f64,
    n_approx: usize,
    shocks: DiscreteDistribution,
}

impl DividendProcess {
    /// Create a validated process.
    ///
    /// # Arguments
    ///
    /// * `alpha` - Persistence, `-1 < alpha < 1`
    /// * `sigma` - Shock standard deviation, `>= 0`
    /// * `mu` - Shock mean
    /// * `n_approx` - Number of quadrature nodes, `1..=MAX_GAUSS_HERMITE_NODES`
    pub fn new(alpha: f64, sigma: f64, mu: f64, n_approx: usize) -> Result<Self, ModelError> {
        ensure_finite("alpha", alpha)?;
        if alpha.abs() >= 1.0 {
            return Err(ParameterError::out_of_range("alpha", alpha, "-1 < alpha < 1").into());
        }
        ensure_finite("sigma", sigma)?;
        if sigma < 0.0 {
            return Err(ParameterError::out_of_range("sigma", sigma, "sigma >= 0").into());
        }
        ensure_finite("mu", mu)?;
        if n_approx == 0 || n_approx > MAX_GAUSS_HERMITE_NODES {
            return Err(ParameterError::out_of_range(
                "n_approx",
                n_approx as f64,
                &format!("1 <= n_approx <= {}", MAX_GAUSS_HERMITE_NODES),
            )
            .into());
        }

        let shocks = NormalDiscretiser::new(mu, sigma)?.discretise(n_approx)?;

        Ok(Self {
            alpha,
            sigma,
            mu,
            n_approx,
            shocks,
        })
    }

    /// An i.i.d. process (`alpha = 0`).
    pub fn iid(sigma: f64, mu: f64, n_approx: usize) -> Result<Self, ModelError> {
        Self::new(0.0, sigma, mu, n_approx)
    }

    /// Persistence coefficient.
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Shock standard deviation.
    #[inline]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Shock mean.
    #[inline]
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Number of quadrature nodes.
    #[inline]
    pub fn n_approx(&self) -> usize {
        self.n_approx
    }

    /// The discretised shock distribution.
    #[inline]
    pub fn shocks(&self) -> &DiscreteDistribution {
        &self.shocks
    }

    /// Next-period log dividend for a given shock.
    #[inline]
    pub fn next_log_dividend(&self, log_dividend: f64, shock: f64) -> f64 {
        self.alpha * log_dividend + shock
    }

    /// Mean of the stationary distribution of `log d`.
    pub fn unconditional_mean(&self) -> f64 {
        self.mu / (1.0 - self.alpha)
    }

    /// Standard deviation of the stationary distribution of `log d`.
    pub fn unconditional_std_dev(&self) -> f64 {
        self.sigma / (1.0 - self.alpha * self.alpha).sqrt()
    }

    /// Equally spaced log-dividend grid over `mean +/- 5 sd`.
    ///
    /// # Errors
    ///
    /// `ModelError::InvalidGrid` if `n < 2` or the process is degenerate
    /// (`sigma == 0`), in which case the caller must supply a grid.
    pub fn log_dividend_grid(&self, n: usize) -> Result<Vec<f64>, ModelError> {
        if n < 2 {
            return Err(ModelError::InvalidGrid(format!(
                "grid needs at least 2 points, got {}",
                n
            )));
        }
        let sd = self.unconditional_std_dev();
        if sd <= 0.0 {
            return Err(ModelError::InvalidGrid(
                "degenerate dividend process has no default grid; supply one".to_string(),
            ));
        }

        let lo = self.unconditional_mean() - GRID_WIDTH_STD_DEVS * sd;
        let step = 2.0 * GRID_WIDTH_STD_DEVS * sd / (n - 1) as f64;
        Ok((0..n).map(|i| lo + step * i as f64).collect())
    }

    /// Draw a log-dividend path of `periods` values starting at `log_d0`.
    ///
    /// Shocks are sampled from the continuous `N(mu, sigma^2)`, not from the
    /// quadrature atoms.
    ///
    /// # Example
    ///
    /// ```
    /// use lucas_models::lucas::DividendProcess;
    /// use rand::rngs::StdRng;
    /// use rand::SeedableRng;
    ///
    /// let process = DividendProcess::new(0.5, 0.1, 0.0, 5).unwrap();
    /// let mut rng = StdRng::seed_from_u64(42);
    /// let path = process.simulate_log_dividends(0.0, 10, &mut rng).unwrap();
    /// assert_eq!(path.len(), 10);
    /// assert_eq!(path[0], 0.0);
    /// ```
    pub fn simulate_log_dividends<R>(
        &self,
        log_d0: f64,
        periods: usize,
        rng: &mut R,
    ) -> Result<Vec<f64>, ModelError>
    where
        R: Rng + ?Sized,
    {
        ensure_finite("log_d0", log_d0)?;
        let normal =
            Normal::new(self.mu, self.sigma).map_err(|e| ModelError::Simulation(e.to_string()))?;

        let mut path = Vec::with_capacity(periods);
        let mut log_d = log_d0;
        for _ in 0..periods {
            path.push(log_d);
            log_d = self.next_log_dividend(log_d, normal.sample(rng));
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_new_valid() {
        let p = DividendProcess::new(0.9, 0.1, 0.02, 7).unwrap();
        assert_eq!(p.alpha(), 0.9);
        assert_eq!(p.sigma(), 0.1);
        assert_eq!(p.mu(), 0.02);
        assert_eq!(p.n_approx(), 7);
        assert_relative_eq!(p.shocks().mean(), 0.02, epsilon = 1e-14);
    }

    #[test]
    fn test_new_rejects_non_stationary_alpha() {
        assert!(matches!(
            DividendProcess::new(1.0, 0.1, 0.0, 7),
            Err(ModelError::Parameter(ParameterError::OutOfRange { .. }))
        ));
        assert!(DividendProcess::new(-1.2, 0.1, 0.0, 7).is_err());
    }

    #[test]
    fn test_new_rejects_negative_sigma() {
        let err = DividendProcess::new(0.5, -0.1, 0.0, 7).unwrap_err();
        assert!(format!("{}", err).contains("sigma"));
    }

    #[test]
    fn test_new_rejects_zero_nodes_and_nan() {
        assert!(DividendProcess::new(0.5, 0.1, 0.0, 0).is_err());
        assert!(DividendProcess::new(f64::NAN, 0.1, 0.0, 3).is_err());
        assert!(DividendProcess::new(0.5, 0.1, f64::INFINITY, 3).is_err());
    }

    #[test]
    fn test_node_count_cap() {
        let widest = DividendProcess::new(0.5, 0.1, 0.0, MAX_GAUSS_HERMITE_NODES).unwrap();
        assert_relative_eq!(widest.shocks().variance(), 0.01, max_relative = 1e-10);

        assert!(matches!(
            DividendProcess::new(0.5, 0.1, 0.0, 199),
            Err(ModelError::Parameter(ParameterError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn test_unconditional_moments() {
        let p = DividendProcess::new(0.6, 0.08, 0.04, 5).unwrap();
        assert_relative_eq!(p.unconditional_mean(), 0.1, epsilon = 1e-15);
        assert_relative_eq!(p.unconditional_std_dev(), 0.1, epsilon = 1e-15);
    }

    #[test]
    fn test_default_grid_is_symmetric_around_mean() {
        let p = DividendProcess::new(0.6, 0.08, 0.04, 5).unwrap();
        let grid = p.log_dividend_grid(DEFAULT_GRID_POINTS).unwrap();
        assert_eq!(grid.len(), 100);
        assert_relative_eq!(grid[0], 0.1 - 0.5, epsilon = 1e-12);
        assert_relative_eq!(grid[99], 0.1 + 0.5, epsilon = 1e-12);
        assert!(grid.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_grid_errors() {
        let p = DividendProcess::new(0.5, 0.1, 0.0, 5).unwrap();
        assert!(matches!(p.log_dividend_grid(1), Err(ModelError::InvalidGrid(_))));

        let degenerate = DividendProcess::new(0.5, 0.0, 0.0, 5).unwrap();
        assert!(matches!(
            degenerate.log_dividend_grid(10),
            Err(ModelError::InvalidGrid(_))
        ));
    }

    #[test]
    fn test_simulation_is_reproducible() {
        let p = DividendProcess::new(0.9, 0.1, 0.0, 7).unwrap();
        let a = p
            .simulate_log_dividends(0.0, 50, &mut StdRng::seed_from_u64(7))
            .unwrap();
        let b = p
            .simulate_log_dividends(0.0, 50, &mut StdRng::seed_from_u64(7))
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 50);
    }

    #[test]
    fn test_degenerate_simulation_follows_deterministic_recursion() {
        let p = DividendProcess::new(0.5, 0.0, 0.1, 1).unwrap();
        let path = p
            .simulate_log_dividends(1.0, 3, &mut StdRng::seed_from_u64(1))
            .unwrap();
        assert_relative_eq!(path[1], 0.6, epsilon = 1e-15);
        assert_relative_eq!(path[2], 0.4, epsilon = 1e-15);
    }

    #[test]
    fn test_simulation_of_zero_periods_is_empty() {
        let p = DividendProcess::iid(0.1, 0.0, 3).unwrap();
        let path = p
            .simulate_log_dividends(0.0, 0, &mut StdRng::seed_from_u64(1))
            .unwrap();
        assert!(path.is_empty());
    }

    proptest! {
        #[test]
        fn prop_default_grid_is_centred_and_increasing(
            alpha in -0.95f64..0.95,
            sigma in 0.01f64..0.5,
            mu in -0.1f64..0.1,
            n in 2usize..200,
        ) {
            let p = DividendProcess::new(alpha, sigma, mu, 3).unwrap();
            let grid = p.log_dividend_grid(n).unwrap();

            prop_assert_eq!(grid.len(), n);
            prop_assert!(grid.windows(2).all(|w| w[1] > w[0]));

            let centre = 0.5 * (grid[0] + grid[n - 1]);
            let scale = 1.0 + p.unconditional_mean().abs();
            prop_assert!((centre - p.unconditional_mean()).abs() < 1e-10 * scale);
        }
    }
}
