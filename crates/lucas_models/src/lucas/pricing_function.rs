//! Asset price as a function of the log dividend.

use crate::ModelError;
use lucas_core::math::interpolators::{Extrapolation, Interpolator, LinearInterpolator};
use lucas_core::types::{InterpolationError, ParameterError};

/// Piecewise-linear price function over a log-dividend grid.
///
/// An immutable value type: the grid, the prices at the grid points and a
/// linear extrapolation rule on both sides. Each pricing iteration produces
/// a new `PricingFunction`; none is ever updated in place.
///
/// # Example
///
/// ```
/// use lucas_models::lucas::PricingFunction;
///
/// let f = PricingFunction::new(&[0.0, 1.0], &[1.0, 3.0]).unwrap();
/// assert!((f.log_price(0.5).unwrap() - 2.0).abs() < 1e-12);
///
/// // Below the grid the end segment is extended
/// assert!((f.log_price(-1.0).unwrap() + 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PricingFunction {
    inner: LinearInterpolator<f64>,
}

impl PricingFunction {
    /// Build a pricing function from grid points and prices.
    ///
    /// # Errors
    ///
    /// `ModelError::Interpolation` if fewer than two points are given, the
    /// lengths differ, a value is non-finite or a grid point repeats.
    pub fn new(log_grid: &[f64], prices: &[f64]) -> Result<Self, ModelError> {
        let inner =
            LinearInterpolator::new(log_grid, prices)?.with_extrapolation(Extrapolation::linear());
        Ok(Self { inner })
    }

    /// The zero function on a grid.
    pub fn zeros(log_grid: &[f64]) -> Result<Self, ModelError> {
        Self::new(log_grid, &vec![0.0; log_grid.len()])
    }

    /// Same grid, new prices.
    pub fn with_prices(&self, prices: &[f64]) -> Result<Self, ModelError> {
        Ok(Self {
            inner: self.inner.with_values(prices)?,
        })
    }

    /// Log-dividend grid, ascending.
    #[inline]
    pub fn log_grid(&self) -> &[f64] {
        self.inner.xs()
    }

    /// Prices at the grid points.
    #[inline]
    pub fn prices(&self) -> &[f64] {
        self.inner.ys()
    }

    /// Number of grid points.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Always `false`; a pricing function has at least two points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Price at log dividend `log_d`.
    pub fn log_price(&self, log_d: f64) -> Result<f64, ModelError> {
        Ok(self.inner.interpolate(log_d)?)
    }

    /// Price at dividend level `d > 0`.
    pub fn price(&self, d: f64) -> Result<f64, ModelError> {
        if !(d.is_finite() && d > 0.0) {
            return Err(ParameterError::out_of_range("dividend", d, "d > 0").into());
        }
        self.log_price(d.ln())
    }

    /// Prices at each point of `log_ds`.
    pub fn log_prices_on(&self, log_ds: &[f64]) -> Result<Vec<f64>, ModelError> {
        Ok(self.inner.interpolate_many(log_ds)?)
    }
}

impl Interpolator<f64> for PricingFunction {
    #[inline]
    fn interpolate(&self, x: f64) -> Result<f64, InterpolationError> {
        self.inner.interpolate(x)
    }

    #[inline]
    fn domain(&self) -> (f64, f64) {
        self.inner.domain()
    }
}
