//! Interpolation methods for numerical computation.
//!
//! ## Available Interpolators
//!
//! - [`LinearInterpolator`]: Piecewise linear interpolation between data points
//! - [`ConstantInterpolator`]: The same value everywhere (initial guesses, flat payoffs)
//!
//! ## Core Trait
//!
//! All 1D interpolators implement the [`Interpolator`] trait, which defines:
//! - `interpolate(x: T) -> Result<T, InterpolationError>`: Compute interpolated value
//! - `domain() -> (T, T)`: Return the range spanned by the data
//!
//! ## Extrapolation
//!
//! Behaviour outside the data range is chosen per side with [`Extrapolation`].
//! The default is [`ExtrapolationMode::Error`] on both sides.
//!
//! ## Example
//!
//! ```
//! use lucas_core::math::interpolators::{Extrapolation, Interpolator, LinearInterpolator};
//!
//! let interp: LinearInterpolator<f64> = LinearInterpolator::new(&[0.0, 1.0, 2.0], &[0.0, 1.0, 4.0])
//!     .unwrap()
//!     .with_extrapolation(Extrapolation::linear());
//!
//! // Below the grid the first segment is extended
//! let y = interp.interpolate(-1.0).unwrap();
//! assert!((y - (-1.0)).abs() < 1e-12);
//! ```

mod constant;
mod linear;
mod traits;

// Re-export public types at module level
pub use constant::ConstantInterpolator;
pub use linear::LinearInterpolator;
pub use traits::{Extrapolation, ExtrapolationMode, Interpolator};
