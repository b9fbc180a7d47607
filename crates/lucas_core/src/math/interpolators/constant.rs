//! Constant function.

use super::Interpolator;
use crate::types::InterpolationError;
use num_traits::Float;

/// A function returning the same value at every point.
///
/// Defined on the whole real line, so it never reports
/// [`InterpolationError::OutOfBounds`]. The usual starting guess for
/// fixed-point iteration is `ConstantInterpolator::zero()`.
///
/// # Example
///
/// ```
/// use lucas_core::math::interpolators::{ConstantInterpolator, Interpolator};
///
/// let zero = ConstantInterpolator::<f64>::zero();
/// assert_eq!(zero.interpolate(-1e6).unwrap(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantInterpolator<T: Float> {
    value: T,
}

impl<T: Float> ConstantInterpolator<T> {
    /// Create a constant function.
    pub fn new(value: T) -> Self {
        Self { value }
    }

    /// The zero function.
    pub fn zero() -> Self {
        Self::new(T::zero())
    }

    /// The constant value.
    #[inline]
    pub fn value(&self) -> T {
        self.value
    }
}

impl<T: Float> Interpolator<T> for ConstantInterpolator<T> {
    fn interpolate(&self, x: T) -> Result<T, InterpolationError> {
        if x.is_nan() {
            return Err(InterpolationError::InvalidInput(
                "query point is NaN".to_string(),
            ));
        }
        Ok(self.value)
    }

    fn domain(&self) -> (T, T) {
        (T::neg_infinity(), T::infinity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_everywhere() {
        let c = ConstantInterpolator::new(3.5_f64);
        assert_eq!(c.interpolate(-1e300).unwrap(), 3.5);
        assert_eq!(c.interpolate(0.0).unwrap(), 3.5);
        assert_eq!(c.interpolate(1e300).unwrap(), 3.5);
        assert_eq!(c.value(), 3.5);
    }

    #[test]
    fn test_zero_domain_is_unbounded() {
        let zero = ConstantInterpolator::<f64>::zero();
        let (lo, hi) = zero.domain();
        assert!(lo.is_infinite() && lo < 0.0);
        assert!(hi.is_infinite() && hi > 0.0);
    }

    #[test]
    fn test_nan_query_rejected() {
        assert!(ConstantInterpolator::new(1.0_f64).interpolate(f64::NAN).is_err());
    }
}
