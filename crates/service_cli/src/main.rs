//! Lucas CLI - Command Line Operations for the Lucas Asset-Pricing Solver
//!
//! This is the operational entry point for the Lucas workspace.
//!
//! # Commands
//!
//! - `lucas solve` - Solve for the equilibrium price function
//! - `lucas simulate` - Price a simulated dividend path
//! - `lucas check` - Validate and print the configuration
//!
//! # Architecture
//!
//! As the **Service** layer, this crate loads configuration, initialises
//! logging and orchestrates `lucas_models` on top of `lucas_core`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use config::{build_config, CliArgs};

/// Lucas Asset-Pricing Solver CLI
#[derive(Parser)]
#[command(name = "lucas")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (default: lucas.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve for the equilibrium price function
    Solve {
        /// Output format (json, csv, table)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Number of log-dividend grid points
        #[arg(short, long)]
        points: Option<usize>,
    },

    /// Simulate a dividend path and price it
    Simulate {
        /// Number of periods
        #[arg(short = 'n', long)]
        periods: Option<usize>,

        /// Random seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output format (json, csv, table)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Validate and print the effective configuration
    Check,
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut args = CliArgs {
        config_file: cli.config,
        log_level: cli.log_level,
        verbose: cli.verbose,
        ..Default::default()
    };
    match &cli.command {
        Commands::Solve { points, .. } => args.grid_points = *points,
        Commands::Simulate { periods, seed, .. } => {
            args.periods = *periods;
            args.seed = *seed;
        }
        Commands::Check => {}
    }

    let config = build_config(&args)?;
    init_tracing(config.log_level.as_filter_str());

    info!("Lucas CLI v{}", env!("CARGO_PKG_VERSION"));
    debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::Solve { format, .. } => commands::solve::run(&config, &format),
        Commands::Simulate { format, .. } => commands::simulate::run(&config, &format),
        Commands::Check => commands::check::run(&config),
    }
}
