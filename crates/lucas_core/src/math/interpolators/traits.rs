//! Interpolator trait and extrapolation rules.

use crate::types::InterpolationError;
use num_traits::Float;

/// One-dimensional interpolation interface.
///
/// Implementors map a scalar abscissa to a scalar value. Outside
/// [`Interpolator::domain`] the behaviour is implementation specific and
/// usually governed by an [`Extrapolation`] rule.
pub trait Interpolator<T: Float> {
    /// Evaluate the function at `x`.
    fn interpolate(&self, x: T) -> Result<T, InterpolationError>;

    /// Range `(x_min, x_max)` covered by the underlying data.
    fn domain(&self) -> (T, T);

    /// Evaluate the function at every point of `xs`.
    ///
    /// Stops at the first failing point.
    fn interpolate_many(&self, xs: &[T]) -> Result<Vec<T>, InterpolationError> {
        xs.iter().map(|&x| self.interpolate(x)).collect()
    }
}

/// How a single side of the domain is extended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExtrapolationMode {
    /// Return [`InterpolationError::OutOfBounds`].
    #[default]
    Error,
    /// Hold the end-point value.
    Flat,
    /// Extend the end segment.
    Linear,
}

/// Extrapolation rule for both ends of the domain.
///
/// # Example
///
/// ```
/// use lucas_core::math::interpolators::{Extrapolation, ExtrapolationMode};
///
/// let rule = Extrapolation::new(ExtrapolationMode::Linear, ExtrapolationMode::Error);
/// assert!(rule.allows_lower());
/// assert!(!rule.allows_upper());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extrapolation {
    /// Rule below the first abscissa
    pub lower: ExtrapolationMode,
    /// Rule above the last abscissa
    pub upper: ExtrapolationMode,
}

impl Extrapolation {
    /// Create a rule from explicit per-side modes.
    pub const fn new(lower: ExtrapolationMode, upper: ExtrapolationMode) -> Self {
        Self { lower, upper }
    }

    /// Reject every query outside the domain.
    pub const fn none() -> Self {
        Self::new(ExtrapolationMode::Error, ExtrapolationMode::Error)
    }

    /// Extend both end segments linearly.
    pub const fn linear() -> Self {
        Self::new(ExtrapolationMode::Linear, ExtrapolationMode::Linear)
    }

    /// Hold end-point values on both sides.
    pub const fn flat() -> Self {
        Self::new(ExtrapolationMode::Flat, ExtrapolationMode::Flat)
    }

    /// True if queries below the domain are answered.
    #[inline]
    pub fn allows_lower(&self) -> bool {
        self.lower != ExtrapolationMode::Error
    }

    /// True if queries above the domain are answered.
    #[inline]
    pub fn allows_upper(&self) -> bool {
        self.upper != ExtrapolationMode::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_none() {
        assert_eq!(Extrapolation::default(), Extrapolation::none());
        assert!(!Extrapolation::default().allows_lower());
        assert!(!Extrapolation::default().allows_upper());
    }

    #[test]
    fn test_linear_and_flat_allow_both_sides() {
        for rule in [Extrapolation::linear(), Extrapolation::flat()] {
            assert!(rule.allows_lower());
            assert!(rule.allows_upper());
        }
    }
}
