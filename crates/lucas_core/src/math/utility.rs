//! Constant relative risk aversion (CRRA) preferences.
//!
//! ```text
//! u(c)  = c^(1 - rho) / (1 - rho)    (rho != 1)
//! u(c)  = ln(c)                      (rho == 1)
//! u'(c) = c^(-rho)
//! ```
//!
//! Callers are responsible for passing strictly positive consumption; the
//! functions follow IEEE semantics otherwise.

use num_traits::Float;

/// CRRA utility level.
///
/// # Example
///
/// ```
/// use lucas_core::math::utility::crra_utility;
///
/// assert!((crra_utility(1.0_f64, 1.0) - 0.0).abs() < 1e-15);
/// assert!((crra_utility(2.0_f64, 2.0) - (-0.5)).abs() < 1e-15);
/// ```
#[inline]
pub fn crra_utility<T: Float>(c: T, rho: T) -> T {
    if rho == T::one() {
        c.ln()
    } else {
        let one_minus_rho = T::one() - rho;
        c.powf(one_minus_rho) / one_minus_rho
    }
}

/// CRRA marginal utility `u'(c) = c^(-rho)`.
///
/// # Example
///
/// ```
/// use lucas_core::math::utility::crra_marginal_utility;
///
/// assert!((crra_marginal_utility(4.0_f64, 0.5) - 0.5).abs() < 1e-15);
/// ```
#[inline]
pub fn crra_marginal_utility<T: Float>(c: T, rho: T) -> T {
    c.powf(-rho)
}

/// Inverse of the CRRA marginal utility, `c = u'^(-1/rho)`.
///
/// Undefined for risk-neutral preferences (`rho == 0`), where NaN is
/// returned.
#[inline]
pub fn crra_marginal_utility_inverse<T: Float>(marginal_utility: T, rho: T) -> T {
    if rho == T::zero() {
        return T::nan();
    }
    marginal_utility.powf(-T::one() / rho)
}
