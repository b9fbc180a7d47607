//! Simulate command implementation
//!
//! Solves the configured economy, draws a dividend path and prices it with
//! the equilibrium price function.

use std::io::{self, Write};
use std::str::FromStr;

use lucas_models::lucas::{PathSummary, PricePoint, SolveReport};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::info;

use super::OutputFormat;
use crate::config::LucasConfig;
use crate::Result;

/// Everything the simulate command reports
#[derive(Debug, Clone, Serialize)]
pub struct SimulateOutput {
    pub seed: u64,
    pub report: SolveReport,
    pub summary: Option<PathSummary>,
    pub points: Vec<PricePoint>,
}

/// Run the simulate command
pub fn run(config: &LucasConfig, format: &str) -> Result<()> {
    let format = OutputFormat::from_str(format)?;

    info!("Starting simulation...");
    info!("  Periods: {}", config.simulation.periods);
    info!("  Seed: {}", config.simulation.seed);

    let output = simulate(config)?;
    write_output(io::stdout().lock(), &output, format)?;

    info!("Simulation complete");
    Ok(())
}

/// Solve, simulate and price a dividend path
pub fn simulate(config: &LucasConfig) -> Result<SimulateOutput> {
    let mut economy = config.economy()?;
    let report = economy.solve(&config.solve_options()?)?;

    let sim = &config.simulation;
    let mut rng = StdRng::seed_from_u64(sim.seed);
    let path = economy.dividend_process().simulate_log_dividends(
        sim.initial_log_dividend,
        sim.periods,
        &mut rng,
    )?;
    let points = economy.price_path(&path)?;

    Ok(SimulateOutput {
        seed: sim.seed,
        report,
        summary: PathSummary::from_points(&points),
        points,
    })
}

/// Write the simulation output in the requested format
pub fn write_output<W: Write>(
    mut out: W,
    output: &SimulateOutput,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, output)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            for point in &output.points {
                writer.serialize(point)?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => {
            writeln!(out, "┌────────┬────────────┬────────────┬────────────┬────────────┐")?;
            writeln!(out, "│ t      │ d          │ P          │ P/d        │ R          │")?;
            writeln!(out, "├────────┼────────────┼────────────┼────────────┼────────────┤")?;
            for p in &output.points {
                let gross_return = p
                    .gross_return
                    .map(|r| format!("{:>10.4}", r))
                    .unwrap_or_else(|| format!("{:>10}", "-"));
                writeln!(
                    out,
                    "│ {:>6} │ {:>10.4} │ {:>10.4} │ {:>10.4} │ {} │",
                    p.period, p.dividend, p.price, p.price_dividend_ratio, gross_return
                )?;
            }
            writeln!(out, "└────────┴────────────┴────────────┴────────────┴────────────┘")?;

            if let Some(summary) = &output.summary {
                writeln!(out)?;
                writeln!(out, "Mean price:              {:.4}", summary.mean_price)?;
                writeln!(
                    out,
                    "Mean price/dividend:     {:.4}",
                    summary.mean_price_dividend_ratio
                )?;
                if let Some(r) = summary.mean_gross_return {
                    writeln!(out, "Mean gross return:       {:.4}", r)?;
                }
            }
        }
    }
    Ok(())
}
