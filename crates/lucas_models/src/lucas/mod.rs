//! Lucas (1978) tree economy.
//!
//! - [`DividendProcess`]: AR(1) log dividend with a quadrature shock
//! - [`PricingFunction`]: price as an interpolated function of the log dividend
//! - [`LucasEconomy`]: preferences, the pricing operator and the equilibrium solve
//! - [`PricePoint`] / [`PathSummary`]: prices along a simulated dividend path

mod dividend;
mod economy;
mod pricing_function;
mod simulation;

pub use dividend::{
    DividendProcess, DEFAULT_GRID_POINTS, DEFAULT_SHOCK_NODES, GRID_WIDTH_STD_DEVS,
};
pub use economy::{LucasEconomy, SolveOptions, SolveReport};
pub use pricing_function::PricingFunction;
pub use simulation::{PathSummary, PricePoint};
