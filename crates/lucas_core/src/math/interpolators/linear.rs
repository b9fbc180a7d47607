//! Linear interpolation implementation.

use super::{Extrapolation, ExtrapolationMode, Interpolator};
use crate::types::InterpolationError;
use num_traits::Float;

/// Piecewise linear interpolator with per-side extrapolation.
///
/// Stores sorted (x, y) data points and performs linear interpolation
/// between adjacent points. Outside the data range the configured
/// [`Extrapolation`] rule applies.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`, `f32`)
///
/// # Construction
///
/// Data points are sorted by x-coordinate during construction. At least 2
/// finite data points with distinct x-coordinates are required.
///
/// # Example
///
/// ```
/// use lucas_core::math::interpolators::{Interpolator, LinearInterpolator};
///
/// let interp = LinearInterpolator::new(&[0.0, 1.0, 2.0, 3.0], &[0.0, 2.0, 4.0, 6.0]).unwrap();
/// assert_eq!(interp.domain(), (0.0, 3.0));
/// assert!(interp.interpolate(4.0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LinearInterpolator<T: Float> {
    /// Sorted x-coordinates
    xs: Vec<T>,
    /// Corresponding y-values (in same order as xs after sorting)
    ys: Vec<T>,
    /// Behaviour outside [xs[0], xs[n-1]]
    extrapolation: Extrapolation,
}

impl<T: Float> LinearInterpolator<T> {
    /// Construct a linear interpolator from x and y data points.
    ///
    /// # Returns
    ///
    /// * `Ok(LinearInterpolator)` - Successfully constructed interpolator
    /// * `Err(InterpolationError::InsufficientData)` - Fewer than 2 data points
    /// * `Err(InterpolationError::InvalidInput)` - Mismatched lengths or non-finite data
    /// * `Err(InterpolationError::NonMonotonicData)` - Repeated x-coordinate
    ///
    /// # Example
    ///
    /// ```
    /// use lucas_core::math::interpolators::LinearInterpolator;
    ///
    /// assert!(LinearInterpolator::new(&[0.0, 1.0], &[0.0, 1.0]).is_ok());
    /// assert!(LinearInterpolator::new(&[0.0], &[0.0]).is_err());
    /// ```
    pub fn new(xs: &[T], ys: &[T]) -> Result<Self, InterpolationError> {
        if xs.len() != ys.len() {
            return Err(InterpolationError::InvalidInput(format!(
                "xs and ys must have same length: got {} and {}",
                xs.len(),
                ys.len()
            )));
        }

        if xs.len() < 2 {
            return Err(InterpolationError::InsufficientData {
                got: xs.len(),
                need: 2,
            });
        }

        if xs.iter().chain(ys.iter()).any(|v| !v.is_finite()) {
            return Err(InterpolationError::InvalidInput(
                "xs and ys must be finite".to_string(),
            ));
        }

        // Create paired data and sort by x
        let mut pairs: Vec<(T, T)> = xs.iter().copied().zip(ys.iter().copied()).collect();
        pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        if let Some(index) = pairs.windows(2).position(|w| w[1].0 <= w[0].0) {
            return Err(InterpolationError::NonMonotonicData { index: index + 1 });
        }

        let (sorted_xs, sorted_ys): (Vec<T>, Vec<T>) = pairs.into_iter().unzip();

        Ok(Self {
            xs: sorted_xs,
            ys: sorted_ys,
            extrapolation: Extrapolation::none(),
        })
    }

    /// Replace the extrapolation rule.
    pub fn with_extrapolation(mut self, extrapolation: Extrapolation) -> Self {
        self.extrapolation = extrapolation;
        self
    }

    /// Build a new interpolator on the same abscissas with different values.
    ///
    /// The extrapolation rule is carried over.
    pub fn with_values(&self, ys: &[T]) -> Result<Self, InterpolationError> {
        Ok(Self::new(&self.xs, ys)?.with_extrapolation(self.extrapolation))
    }

    /// Returns a reference to the sorted x-coordinates.
    #[inline]
    pub fn xs(&self) -> &[T] {
        &self.xs
    }

    /// Returns a reference to the y-values (in sorted x order).
    #[inline]
    pub fn ys(&self) -> &[T] {
        &self.ys
    }

    /// Returns the extrapolation rule.
    #[inline]
    pub fn extrapolation(&self) -> Extrapolation {
        self.extrapolation
    }

    /// Returns the number of data points.
    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Returns true if the interpolator has no data points.
    /// Note: This should never be true for a valid interpolator.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Find the segment index for interpolation using binary search.
    ///
    /// Returns the index `i` such that `xs[i] <= x < xs[i+1]`,
    /// clamped to valid segment range [0, n-2].
    #[inline]
    fn find_segment(&self, x: T) -> usize {
        let pos = self.xs.partition_point(|&xi| xi <= x);

        if pos == 0 {
            0
        } else if pos >= self.xs.len() {
            self.xs.len() - 2
        } else {
            pos - 1
        }
    }

    #[inline]
    fn on_segment(&self, i: usize, x: T) -> T {
        let x0 = self.xs[i];
        let x1 = self.xs[i + 1];
        let y0 = self.ys[i];
        let y1 = self.ys[i + 1];

        let t = (x - x0) / (x1 - x0);
        y0 + (y1 - y0) * t
    }

    fn out_of_bounds(&self, x: T) -> InterpolationError {
        let (x_min, x_max) = self.domain();
        InterpolationError::OutOfBounds {
            x: x.to_f64().unwrap_or(f64::NAN),
            min: x_min.to_f64().unwrap_or(f64::NAN),
            max: x_max.to_f64().unwrap_or(f64::NAN),
        }
    }
}

impl<T: Float> Interpolator<T> for LinearInterpolator<T> {
    /// Interpolate value at point `x`.
    ///
    /// # Formula
    ///
    /// ```text
    /// y = y0 + (y1 - y0) * (x - x0) / (x1 - x0)
    /// ```
    ///
    /// Linear extrapolation uses the same formula on the end segment.
    ///
    /// # Example
    ///
    /// ```
    /// use lucas_core::math::interpolators::{Interpolator, LinearInterpolator};
    ///
    /// let interp: LinearInterpolator<f64> = LinearInterpolator::new(&[0.0, 1.0, 2.0], &[0.0, 2.0, 4.0]).unwrap();
    /// assert!((interp.interpolate(0.5).unwrap() - 1.0).abs() < 1e-10);
    /// ```
    fn interpolate(&self, x: T) -> Result<T, InterpolationError> {
        if x.is_nan() {
            return Err(InterpolationError::InvalidInput(
                "query point is NaN".to_string(),
            ));
        }

        let last = self.xs.len() - 1;

        if x < self.xs[0] {
            return match self.extrapolation.lower {
                ExtrapolationMode::Error => Err(self.out_of_bounds(x)),
                ExtrapolationMode::Flat => Ok(self.ys[0]),
                ExtrapolationMode::Linear => Ok(self.on_segment(0, x)),
            };
        }

        if x > self.xs[last] {
            return match self.extrapolation.upper {
                ExtrapolationMode::Error => Err(self.out_of_bounds(x)),
                ExtrapolationMode::Flat => Ok(self.ys[last]),
                ExtrapolationMode::Linear => Ok(self.on_segment(last - 1, x)),
            };
        }

        let i = self.find_segment(x);
        Ok(self.on_segment(i, x))
    }

    #[inline]
    fn domain(&self) -> (T, T) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }
}
