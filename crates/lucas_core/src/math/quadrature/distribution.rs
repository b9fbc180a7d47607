//! Finite distributions and the Normal discretiser.

use super::gauss_hermite_nodes_weights;
use crate::types::error::ensure_finite;
use crate::types::{ParameterError, QuadratureError};
use std::f64::consts::{PI, SQRT_2};

/// Allowed drift of the probability sum away from one.
const PROBABILITY_SUM_TOLERANCE: f64 = 1e-10;

/// A finite set of `(value, probability)` pairs.
///
/// Immutable once built. Probabilities are non-negative and sum to one.
///
/// # Example
///
/// ```
/// use lucas_core::math::quadrature::DiscreteDistribution;
///
/// let coin = DiscreteDistribution::new(vec![-1.0, 1.0], vec![0.5, 0.5]).unwrap();
/// assert_eq!(coin.mean(), 0.0);
/// assert_eq!(coin.variance(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiscreteDistribution {
    values: Vec<f64>,
    probabilities: Vec<f64>,
}

impl DiscreteDistribution {
    /// Build a distribution, validating the probability vector.
    ///
    /// # Errors
    ///
    /// `QuadratureError::InvalidDistribution` if the vectors are empty, have
    /// different lengths, contain non-finite entries, negative probabilities,
    /// or probabilities that do not sum to one.
    pub fn new(values: Vec<f64>, probabilities: Vec<f64>) -> Result<Self, QuadratureError> {
        if values.is_empty() {
            return Err(QuadratureError::InvalidDistribution(
                "distribution needs at least one atom".to_string(),
            ));
        }
        if values.len() != probabilities.len() {
            return Err(QuadratureError::InvalidDistribution(format!(
                "values and probabilities must have same length: got {} and {}",
                values.len(),
                probabilities.len()
            )));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(QuadratureError::InvalidDistribution(
                "values must be finite".to_string(),
            ));
        }
        if probabilities.iter().any(|p| !p.is_finite() || *p < 0.0) {
            return Err(QuadratureError::InvalidDistribution(
                "probabilities must be finite and non-negative".to_string(),
            ));
        }
        let total: f64 = probabilities.iter().sum();
        if (total - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
            return Err(QuadratureError::InvalidDistribution(format!(
                "probabilities sum to {}, expected 1",
                total
            )));
        }

        Ok(Self {
            values,
            probabilities,
        })
    }

    /// Atom locations.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Atom probabilities, aligned with [`values`](Self::values).
    #[inline]
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Number of atoms.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false for a constructed distribution.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(value, probability)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.values
            .iter()
            .copied()
            .zip(self.probabilities.iter().copied())
    }

    /// Probability-weighted sum `sum_j p_j f(v_j)`.
    pub fn expectation<F>(&self, f: F) -> f64
    where
        F: Fn(f64) -> f64,
    {
        self.iter().map(|(v, p)| p * f(v)).sum()
    }

    /// Fallible variant of [`expectation`](Self::expectation).
    pub fn try_expectation<F, E>(&self, mut f: F) -> Result<f64, E>
    where
        F: FnMut(f64) -> Result<f64, E>,
    {
        let mut total = 0.0;
        for (v, p) in self.iter() {
            total += p * f(v)?;
        }
        Ok(total)
    }

    /// First moment.
    pub fn mean(&self) -> f64 {
        self.expectation(|v| v)
    }

    /// Second central moment.
    pub fn variance(&self) -> f64 {
        let mean = self.mean();
        self.expectation(|v| (v - mean) * (v - mean))
    }
}

/// Gauss-Hermite discretisation of `N(mean, std_dev^2)`.
///
/// With Hermite nodes `x_j` and weights `w_j`, the atoms are
/// `mean + sqrt(2) * std_dev * x_j` with probabilities `w_j / sqrt(pi)`.
///
/// # Example
///
/// ```
/// use lucas_core::math::quadrature::NormalDiscretiser;
///
/// let sigma = 0.1;
/// let dist = NormalDiscretiser::new(0.0, sigma).unwrap().discretise(7).unwrap();
/// assert_eq!(dist.len(), 7);
/// assert!((dist.variance() - sigma * sigma).abs() < 1e-14);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NormalDiscretiser {
    mean: f64,
    std_dev: f64,
}

impl NormalDiscretiser {
    /// Create a discretiser for `N(mean, std_dev^2)`.
    ///
    /// A zero standard deviation is allowed and yields a degenerate
    /// distribution concentrated at `mean`.
    ///
    /// # Errors
    ///
    /// `ParameterError` if either argument is non-finite or `std_dev < 0`.
    pub fn new(mean: f64, std_dev: f64) -> Result<Self, ParameterError> {
        ensure_finite("mean", mean)?;
        ensure_finite("std_dev", std_dev)?;
        if std_dev < 0.0 {
            return Err(ParameterError::out_of_range(
                "std_dev",
                std_dev,
                "std_dev >= 0",
            ));
        }
        Ok(Self { mean, std_dev })
    }

    /// Mean of the continuous distribution.
    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Standard deviation of the continuous distribution.
    #[inline]
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Produce the `n`-atom approximation.
    ///
    /// Exact for expectations of polynomials of degree up to `2n - 1`.
    ///
    /// # Errors
    ///
    /// Propagates [`gauss_hermite_nodes_weights`] errors, so `n` must lie in
    /// `1..=MAX_GAUSS_HERMITE_NODES`. Probabilities are not renormalised; a
    /// sum away from one is `QuadratureError::InvalidDistribution`.
    ///
    /// [`gauss_hermite_nodes_weights`]: super::gauss_hermite_nodes_weights
    pub fn discretise(&self, n: usize) -> Result<DiscreteDistribution, QuadratureError> {
        let (nodes, weights) = gauss_hermite_nodes_weights(n)?;
        let scale = SQRT_2 * self.std_dev;
        let norm = PI.sqrt();

        let values: Vec<f64> = nodes.iter().map(|x| self.mean + scale * x).collect();
        let probabilities: Vec<f64> = weights.iter().map(|w| w / norm).collect();

        DiscreteDistribution::new(values, probabilities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::quadrature::MAX_GAUSS_HERMITE_NODES;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_new_rejects_empty() {
        assert!(DiscreteDistribution::new(vec![], vec![]).is_err());
    }

    #[test]
    fn test_new_rejects_mismatched_lengths() {
        assert!(DiscreteDistribution::new(vec![0.0, 1.0], vec![1.0]).is_err());
    }

    #[test]
    fn test_new_rejects_bad_probabilities() {
        assert!(DiscreteDistribution::new(vec![0.0, 1.0], vec![0.7, 0.7]).is_err());
        assert!(DiscreteDistribution::new(vec![0.0, 1.0], vec![1.5, -0.5]).is_err());
        assert!(DiscreteDistribution::new(vec![0.0, 1.0], vec![f64::NAN, 1.0]).is_err());
    }

    #[test]
    fn test_moments_of_two_point_distribution() {
        let d = DiscreteDistribution::new(vec![1.0, 3.0], vec![0.25, 0.75]).unwrap();
        assert_relative_eq!(d.mean(), 2.5);
        assert_relative_eq!(d.variance(), 0.75);
        assert_eq!(d.iter().count(), 2);
    }

    #[test]
    fn test_try_expectation_propagates_error() {
        let d = DiscreteDistribution::new(vec![1.0, 2.0], vec![0.5, 0.5]).unwrap();
        let result: Result<f64, &str> =
            d.try_expectation(|v| if v > 1.5 { Err("too big") } else { Ok(v) });
        assert_eq!(result.unwrap_err(), "too big");
    }

    #[test]
    fn test_discretiser_rejects_negative_std_dev() {
        assert!(NormalDiscretiser::new(0.0, -0.1).is_err());
        assert!(NormalDiscretiser::new(f64::NAN, 0.1).is_err());
    }

    #[test]
    fn test_degenerate_normal() {
        let d = NormalDiscretiser::new(0.3, 0.0).unwrap().discretise(5).unwrap();
        assert!(d.values().iter().all(|v| (*v - 0.3).abs() < 1e-15));
        assert_relative_eq!(d.variance(), 0.0);
    }

    #[test]
    fn test_normal_moments() {
        let mu = -0.005;
        let sigma = 0.1;
        let d = NormalDiscretiser::new(mu, sigma).unwrap().discretise(7).unwrap();
        assert_relative_eq!(d.mean(), mu, epsilon = 1e-14);
        assert_relative_eq!(d.variance(), sigma * sigma, epsilon = 1e-14);
        let m4 = d.expectation(|v| (v - mu).powi(4));
        assert_relative_eq!(m4, 3.0 * sigma.powi(4), epsilon = 1e-14);
    }

    #[test]
    fn test_lognormal_moment_converges() {
        // E[exp(e)] = exp(mu + sigma^2 / 2)
        let (mu, sigma): (f64, f64) = (0.0, 0.5);
        let exact = (mu + 0.5 * sigma * sigma).exp();
        let disc = NormalDiscretiser::new(mu, sigma).unwrap();
        let err_3 = (disc.discretise(3).unwrap().expectation(f64::exp) - exact).abs();
        let err_9 = (disc.discretise(9).unwrap().expectation(f64::exp) - exact).abs();
        assert!(err_9 < err_3);
        assert!(err_9 < 1e-10);
    }

    #[test]
    fn test_variance_exact_for_every_supported_node_count() {
        let sigma = 0.1;
        let disc = NormalDiscretiser::new(0.0, sigma).unwrap();
        for n in 2..=MAX_GAUSS_HERMITE_NODES {
            let d = disc.discretise(n).unwrap();
            let total: f64 = d.probabilities().iter().sum();
            assert_relative_eq!(total, 1.0, max_relative = 1e-10);
            assert_relative_eq!(d.variance(), sigma * sigma, max_relative = 1e-10);
        }
    }

    #[test]
    fn test_discretise_beyond_cap_is_an_error() {
        let disc = NormalDiscretiser::new(0.0, 0.1).unwrap();
        for n in [MAX_GAUSS_HERMITE_NODES + 1, 199, 200, 250] {
            assert_eq!(
                disc.discretise(n).unwrap_err(),
                QuadratureError::InvalidNodeCount { n }
            );
        }
    }

    proptest! {
        #[test]
        fn prop_probabilities_sum_to_one(
            mu in -1.0_f64..1.0,
            sigma in 0.0_f64..2.0,
            n in 1_usize..30,
        ) {
            let d = NormalDiscretiser::new(mu, sigma).unwrap().discretise(n).unwrap();
            let total: f64 = d.probabilities().iter().sum();
            prop_assert!((total - 1.0).abs() < 1e-11);
            prop_assert!((d.mean() - mu).abs() < 1e-10);
        }
    }
}
