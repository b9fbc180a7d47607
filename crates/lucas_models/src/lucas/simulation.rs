//! Equilibrium prices along a dividend path.

use super::economy::LucasEconomy;
use crate::ModelError;

/// One period of a priced dividend path.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PricePoint {
    /// Period index, starting at 0.
    pub period: usize,
    /// Dividend level `d_t`.
    pub dividend: f64,
    /// Equilibrium price `P_t`.
    pub price: f64,
    /// `P_t / d_t`.
    pub price_dividend_ratio: f64,
    /// `(P_t + d_t) / P_{t-1}`; absent in the first period.
    pub gross_return: Option<f64>,
}

/// Sample means over a priced path.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PathSummary {
    /// Number of periods.
    pub periods: usize,
    /// Mean price.
    pub mean_price: f64,
    /// Mean price-dividend ratio.
    pub mean_price_dividend_ratio: f64,
    /// Mean gross return, `None` for paths shorter than two periods.
    pub mean_gross_return: Option<f64>,
}

impl PathSummary {
    /// Summarise a priced path. Returns `None` for an empty path.
    pub fn from_points(points: &[PricePoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let n = points.len() as f64;
        let mean_price = points.iter().map(|p| p.price).sum::<f64>() / n;
        let mean_price_dividend_ratio =
            points.iter().map(|p| p.price_dividend_ratio).sum::<f64>() / n;

        let returns: Vec<f64> = points.iter().filter_map(|p| p.gross_return).collect();
        let mean_gross_return = if returns.is_empty() {
            None
        } else {
            Some(returns.iter().sum::<f64>() / returns.len() as f64)
        };

        Some(Self {
            periods: points.len(),
            mean_price,
            mean_price_dividend_ratio,
            mean_gross_return,
        })
    }
}

impl LucasEconomy {
    /// Price a log-dividend path with the equilibrium pricing function.
    ///
    /// # Errors
    ///
    /// `ModelError::NotSolved` before a successful solve.
    ///
    /// # Example
    ///
    /// ```
    /// use lucas_models::lucas::{DividendProcess, LucasEconomy, PathSummary, SolveOptions};
    ///
    /// let process = DividendProcess::new(0.5, 0.1, 0.0, 5).unwrap();
    /// let mut economy = LucasEconomy::new(1.0, 0.9, process).unwrap();
    /// economy.solve(&SolveOptions::default()).unwrap();
    ///
    /// let points = economy.price_path(&[0.0, 0.1, -0.05]).unwrap();
    /// assert!(points[0].gross_return.is_none());
    /// assert!(points[1].gross_return.is_some());
    ///
    /// let summary = PathSummary::from_points(&points).unwrap();
    /// assert_eq!(summary.periods, 3);
    /// ```
    pub fn price_path(&self, log_dividends: &[f64]) -> Result<Vec<PricePoint>, ModelError> {
        let mut points: Vec<PricePoint> = Vec::with_capacity(log_dividends.len());
        for (period, &log_d) in log_dividends.iter().enumerate() {
            let dividend = log_d.exp();
            let price = self.equilibrium_log_price(log_d)?;
            let gross_return = points.last().map(|prev| (price + dividend) / prev.price);
            points.push(PricePoint {
                period,
                dividend,
                price,
                price_dividend_ratio: price / dividend,
                gross_return,
            });
        }
        Ok(points)
    }
}
