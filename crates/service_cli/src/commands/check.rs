//! Check command implementation
//!
//! Validates the effective configuration and prints it.

use std::io::{self, Write};

use tracing::info;

use crate::config::LucasConfig;
use crate::{CliError, Result};

/// Run the check command
pub fn run(config: &LucasConfig) -> Result<()> {
    info!("Checking configuration...");
    write_report(io::stdout().lock(), config)?;
    info!("Configuration OK");
    Ok(())
}

/// Validate `config` and describe the economy it defines
pub fn write_report<W: Write>(mut out: W, config: &LucasConfig) -> Result<()> {
    config.validate()?;

    let economy = config.economy()?;
    let process = economy.dividend_process();
    let grid = economy.default_log_grid(config.solver.grid_points)?;
    let (lo, hi) = match (grid.first(), grid.last()) {
        (Some(&lo), Some(&hi)) => (lo, hi),
        _ => {
            return Err(CliError::InvalidArgument(
                "empty log-dividend grid".to_string(),
            ))
        }
    };

    let text = toml::to_string_pretty(config)
        .map_err(|e| CliError::InvalidArgument(format!("cannot render configuration: {}", e)))?;

    writeln!(out, "{}", text.trim_end())?;
    writeln!(out)?;
    writeln!(out, "Configuration is valid")?;
    writeln!(
        out,
        "  Stationary log dividend: mean {:.4}, sd {:.4}",
        process.unconditional_mean(),
        process.unconditional_std_dev()
    )?;
    writeln!(
        out,
        "  Grid: {} points over [{:.4}, {:.4}]",
        grid.len(),
        lo,
        hi
    )?;
    let closed_form = if economy.crra() == 1.0 {
        "log utility"
    } else if process.alpha() == 0.0 {
        "i.i.d. log-normal"
    } else {
        "none"
    };
    writeln!(out, "  Closed-form benchmark: {}", closed_form)?;
    Ok(())
}
