//! Solve command implementation
//!
//! Solves the configured economy and prints the equilibrium price function
//! on the log-dividend grid.

use std::io::{self, Write};
use std::str::FromStr;

use lucas_models::analytical::closed_form_price;
use lucas_models::lucas::{LucasEconomy, SolveReport};
use lucas_models::ModelError;
use serde::Serialize;
use tracing::info;

use super::OutputFormat;
use crate::config::LucasConfig;
use crate::Result;

/// One grid point of the solved price function
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridRow {
    pub log_dividend: f64,
    pub dividend: f64,
    pub price: f64,
    pub price_dividend_ratio: f64,
    /// Closed-form price where one exists
    pub closed_form: Option<f64>,
    /// `price - closed_form`
    pub gap: Option<f64>,
}

/// Everything the solve command reports
#[derive(Debug, Clone, Serialize)]
pub struct SolveOutput {
    pub report: SolveReport,
    pub rows: Vec<GridRow>,
}

/// Run the solve command
pub fn run(config: &LucasConfig, format: &str) -> Result<()> {
    let format = OutputFormat::from_str(format)?;

    info!("Starting solve...");
    info!("  CRRA: {}", config.economy.crra);
    info!("  Discount factor: {}", config.economy.discount_factor);
    info!("  Grid points: {}", config.solver.grid_points);

    let (_, output) = solve(config)?;
    write_output(io::stdout().lock(), &output, format)?;

    info!("Solve complete");
    Ok(())
}

/// Solve the configured economy and tabulate the result on its grid
pub fn solve(config: &LucasConfig) -> Result<(LucasEconomy, SolveOutput)> {
    let mut economy = config.economy()?;
    let report = economy.solve(&config.solve_options()?)?;
    let rows = grid_rows(&economy)?;
    Ok((economy, SolveOutput { report, rows }))
}

fn grid_rows(economy: &LucasEconomy) -> Result<Vec<GridRow>> {
    let solution = economy.solution().ok_or(ModelError::NotSolved)?;
    let rows = solution
        .log_grid()
        .iter()
        .zip(solution.prices())
        .map(|(&log_dividend, &price)| {
            let dividend = log_dividend.exp();
            let closed_form = closed_form_price(economy, dividend);
            GridRow {
                log_dividend,
                dividend,
                price,
                price_dividend_ratio: price / dividend,
                closed_form,
                gap: closed_form.map(|c| price - c),
            }
        })
        .collect();
    Ok(rows)
}

/// Write the solve output in the requested format
pub fn write_output<W: Write>(mut out: W, output: &SolveOutput, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, output)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            for row in &output.rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => {
            let report = &output.report;
            writeln!(
                out,
                "Converged in {} iterations (distance {:.3e}, tolerance {:.1e})",
                report.iterations, report.distance, report.tolerance
            )?;
            writeln!(out)?;
            writeln!(out, "┌────────────┬────────────┬────────────┬────────────┬────────────┐")?;
            writeln!(out, "│ log d      │ d          │ P(d)       │ P/d        │ gap        │")?;
            writeln!(out, "├────────────┼────────────┼────────────┼────────────┼────────────┤")?;
            for row in &output.rows {
                let gap = row
                    .gap
                    .map(|g| format!("{:>10.3e}", g))
                    .unwrap_or_else(|| format!("{:>10}", "-"));
                writeln!(
                    out,
                    "│ {:>10.4} │ {:>10.4} │ {:>10.4} │ {:>10.4} │ {} │",
                    row.log_dividend, row.dividend, row.price, row.price_dividend_ratio, gap
                )?;
            }
            writeln!(out, "└────────────┴────────────┴────────────┴────────────┴────────────┘")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn log_utility_config() -> LucasConfig {
        let mut config = LucasConfig::default();
        config.economy.crra = 1.0;
        config.economy.discount_factor = 0.9;
        config.dividend.alpha = 0.5;
        config.solver.grid_points = 40;
        config
    }

    #[test]
    fn test_solve_rows_carry_closed_form_gap() {
        let (economy, output) = solve(&log_utility_config()).unwrap();
        assert!(economy.is_solved());
        assert_eq!(output.rows.len(), 40);
        assert_eq!(output.report.grid_points, 40);

        let middle = &output.rows[20];
        assert_relative_eq!(middle.price_dividend_ratio, 9.0, max_relative = 1e-2);
        assert!(middle.gap.unwrap().abs() < 1e-1);
    }

    #[test]
    fn test_no_closed_form_for_general_economy() {
        let mut config = LucasConfig::default();
        config.solver.grid_points = 30;
        let (_, output) = solve(&config).unwrap();
        assert!(output.rows.iter().all(|r| r.closed_form.is_none() && r.gap.is_none()));
    }

    #[test]
    fn test_csv_output_has_header_and_rows() {
        let (_, output) = solve(&log_utility_config()).unwrap();
        let mut buffer = Vec::new();
        write_output(&mut buffer, &output, OutputFormat::Csv).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "log_dividend,dividend,price,price_dividend_ratio,closed_form,gap"
        );
        assert_eq!(lines.count(), 40);
    }

    #[test]
    fn test_json_output_parses() {
        let (_, output) = solve(&log_utility_config()).unwrap();
        let mut buffer = Vec::new();
        write_output(&mut buffer, &output, OutputFormat::Json).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["rows"].as_array().unwrap().len(), 40);
        assert!(value["report"]["iterations"].as_u64().unwrap() > 0);
    }

    #[test]
    fn test_table_output_mentions_convergence() {
        let (_, output) = solve(&log_utility_config()).unwrap();
        let mut buffer = Vec::new();
        write_output(&mut buffer, &output, OutputFormat::Table).unwrap();
        assert!(String::from_utf8(buffer).unwrap().starts_with("Converged in"));
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(run(&log_utility_config(), "xml").is_err());
    }
}
