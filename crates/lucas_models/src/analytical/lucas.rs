//! Closed-form Lucas tree prices.
//!
//! # Log utility (`rho = 1`)
//!
//! For any dividend process the price-dividend ratio is constant:
//!
//! ```text
//! P(d) = d / theta,    theta = 1/beta - 1
//! ```
//!
//! # i.i.d. log-normal dividends (`alpha = 0`)
//!
//! With `log d' ~ N(mu, sigma^2)` independent of `d`:
//!
//! ```text
//! P(d) = d^rho * exp((1-rho) mu + (1-rho)^2 sigma^2 / 2) * beta / (1 - beta)
//! ```

use crate::lucas::LucasEconomy;

/// Equilibrium price under log utility.
///
/// # Example
///
/// ```
/// use lucas_models::analytical::log_utility_price;
///
/// // beta = 0.9 gives a price-dividend ratio of 9
/// assert!((log_utility_price(2.0, 0.9) - 18.0).abs() < 1e-12);
/// ```
pub fn log_utility_price(d: f64, beta: f64) -> f64 {
    let theta = 1.0 / beta - 1.0;
    d / theta
}

/// Equilibrium price with i.i.d. log-normal dividends.
///
/// # Arguments
///
/// * `d` - Dividend level
/// * `rho` - Relative risk aversion
/// * `beta` - Discount factor
/// * `mu` - Mean of the log dividend
/// * `sigma` - Standard deviation of the log dividend
pub fn iid_lognormal_price(d: f64, rho: f64, beta: f64, mu: f64, sigma: f64) -> f64 {
    let k = 1.0 - rho;
    d.powf(rho) * (k * mu + 0.5 * k * k * sigma * sigma).exp() * beta / (1.0 - beta)
}

/// Closed-form price for an economy where one is known.
///
/// Log utility takes precedence; otherwise an i.i.d. process (`alpha == 0`)
/// uses [`iid_lognormal_price`]. Returns `None` when neither applies.
pub fn closed_form_price(economy: &LucasEconomy, d: f64) -> Option<f64> {
    let beta = economy.discount_factor();
    let rho = economy.crra();
    let process = economy.dividend_process();

    if rho == 1.0 {
        Some(log_utility_price(d, beta))
    } else if process.alpha() == 0.0 {
        Some(iid_lognormal_price(
            d,
            rho,
            beta,
            process.mu(),
            process.sigma(),
        ))
    } else {
        None
    }
}
