//! CLI configuration management
//!
//! Handles loading configuration from TOML files, environment variables and
//! command-line arguments.

use lucas_core::math::solvers::SolverConfig;
use lucas_models::lucas::{
    DividendProcess, LucasEconomy, SolveOptions, DEFAULT_GRID_POINTS, DEFAULT_SHOCK_NODES,
};
use lucas_models::ModelError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Default configuration file, read when present.
pub const DEFAULT_CONFIG_FILE: &str = "lucas.toml";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ModelError),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Preferences of the representative agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomySection {
    /// Relative risk aversion `rho`
    pub crra: f64,
    /// Discount factor `beta`
    pub discount_factor: f64,
}

impl Default for EconomySection {
    fn default() -> Self {
        Self {
            crra: 2.0,
            discount_factor: 0.95,
        }
    }
}

/// AR(1) log-dividend process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DividendSection {
    /// Persistence `alpha`
    pub alpha: f64,
    /// Shock standard deviation
    pub sigma: f64,
    /// Shock mean
    pub mu: f64,
    /// Quadrature nodes for the shock
    pub n_approx: usize,
}

impl Default for DividendSection {
    fn default() -> Self {
        Self {
            alpha: 0.9,
            sigma: 0.1,
            mu: 0.0,
            n_approx: DEFAULT_SHOCK_NODES,
        }
    }
}

/// Fixed-point iteration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSection {
    /// Convergence tolerance on the grid L2 distance
    pub tolerance: f64,
    /// Iteration cap
    pub max_iterations: usize,
    /// Points in the log-dividend grid
    pub grid_points: usize,
}

impl Default for SolverSection {
    fn default() -> Self {
        let defaults = SolverConfig::<f64>::default();
        Self {
            tolerance: defaults.tolerance,
            max_iterations: defaults.max_iterations,
            grid_points: DEFAULT_GRID_POINTS,
        }
    }
}

/// Dividend path simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSection {
    /// Path length
    pub periods: usize,
    /// RNG seed
    pub seed: u64,
    /// Log dividend in period 0
    pub initial_log_dividend: f64,
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            periods: 100,
            seed: 42,
            initial_log_dividend: 0.0,
        }
    }
}

/// Complete CLI configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LucasConfig {
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Agent preferences
    pub economy: EconomySection,
    /// Dividend process
    pub dividend: DividendSection,
    /// Solver settings
    pub solver: SolverSection,
    /// Simulation settings
    pub simulation: SimulationSection,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

impl LucasConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Override values from process environment variables
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Override values from `LUCAS_*` variables provided by `lookup`
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("LUCAS_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&level)?;
        }
        if let Some(max) = lookup("LUCAS_MAX_ITERATIONS") {
            self.solver.max_iterations = max.trim().parse().map_err(|_| {
                ConfigError::EnvError(format!("LUCAS_MAX_ITERATIONS is not an integer: {}", max))
            })?;
        }
        if let Some(tol) = lookup("LUCAS_TOLERANCE") {
            self.solver.tolerance = tol.trim().parse().map_err(|_| {
                ConfigError::EnvError(format!("LUCAS_TOLERANCE is not a number: {}", tol))
            })?;
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if cli.verbose {
            self.log_level = LogLevel::Debug;
        }
        if let Some(log_level) = &cli.log_level {
            self.log_level = LogLevel::from_str(log_level)?;
        }
        if let Some(points) = cli.grid_points {
            self.solver.grid_points = points;
        }
        if let Some(periods) = cli.periods {
            self.simulation.periods = periods;
        }
        if let Some(seed) = cli.seed {
            self.simulation.seed = seed;
        }
        Ok(())
    }

    /// Build the (unsolved) economy described by this configuration
    pub fn economy(&self) -> Result<LucasEconomy, ModelError> {
        let d = &self.dividend;
        let process = DividendProcess::new(d.alpha, d.sigma, d.mu, d.n_approx)?;
        LucasEconomy::new(self.economy.crra, self.economy.discount_factor, process)
    }

    /// Solve options described by this configuration
    pub fn solve_options(&self) -> Result<SolveOptions, ModelError> {
        let config = SolverConfig::new(self.solver.tolerance, self.solver.max_iterations)?;
        Ok(SolveOptions::default()
            .with_grid_points(self.solver.grid_points)
            .with_config(config))
    }

    /// Validate the configuration
    ///
    /// Runs the same checks the model performs, so a configuration that
    /// passes here can always be solved for (convergence aside).
    pub fn validate(&self) -> Result<(), ConfigError> {
        let economy = self.economy()?;
        let options = self.solve_options()?;
        economy.default_log_grid(options.grid_points)?;
        if !self.simulation.initial_log_dividend.is_finite() {
            return Err(ModelError::Simulation(
                "initial_log_dividend must be finite".to_string(),
            )
            .into());
        }
        Ok(())
    }
}

/// CLI arguments relevant to configuration
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<String>,
    /// Verbose output (debug log level)
    pub verbose: bool,
    /// Grid size override
    pub grid_points: Option<usize>,
    /// Simulation length override
    pub periods: Option<usize>,
    /// Simulation seed override
    pub seed: Option<u64>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file (explicit path, or `lucas.toml` when it exists)
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<LucasConfig, ConfigError> {
    let mut config = match &cli.config_file {
        Some(path) => LucasConfig::from_file(path)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                LucasConfig::from_file(default_path)?
            } else {
                LucasConfig::default()
            }
        }
    };

    config.apply_env_overrides()?;
    config.merge_with_cli(cli)?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = LucasConfig::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.economy.crra, 2.0);
        assert_eq!(config.economy.discount_factor, 0.95);
        assert_eq!(config.dividend.n_approx, 7);
        assert_eq!(config.solver.max_iterations, 500);
        assert_eq!(config.solver.grid_points, 100);
        assert!((config.solver.tolerance - 1e-5).abs() < 1e-15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Warn").unwrap(), LogLevel::Warn);
        assert!(LogLevel::from_str("loud").is_err());
        assert_eq!(format!("{}", LogLevel::Error), "error");
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
            log_level = "DEBUG"

            [economy]
            crra = 1.0
            discount_factor = 0.9

            [dividend]
            alpha = 0.5
            sigma = 0.2
            mu = 0.01
            n_approx = 9

            [solver]
            tolerance = 1e-8
            max_iterations = 1000
            grid_points = 50

            [simulation]
            periods = 20
            seed = 7
        "#;

        let config: LucasConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.economy.crra, 1.0);
        assert_eq!(config.dividend.n_approx, 9);
        assert_eq!(config.solver.grid_points, 50);
        assert_eq!(config.simulation.seed, 7);
        assert_eq!(config.simulation.initial_log_dividend, 0.0);
    }

    #[test]
    fn test_partial_toml_deserialization() {
        let config: LucasConfig = toml::from_str("[dividend]\nalpha = 0.3\n").unwrap();
        assert_eq!(config.dividend.alpha, 0.3);
        assert_eq!(config.dividend.sigma, 0.1);
        assert_eq!(config.economy, EconomySection::default());
    }

    #[test]
    fn test_invalid_log_level_in_toml() {
        assert!(toml::from_str::<LucasConfig>("log_level = \"loud\"").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = LucasConfig::default();
        config
            .apply_overrides_from(env(&[
                ("LUCAS_LOG_LEVEL", "warn"),
                ("LUCAS_MAX_ITERATIONS", "42"),
                ("LUCAS_TOLERANCE", "1e-7"),
            ]))
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.solver.max_iterations, 42);
        assert!((config.solver.tolerance - 1e-7).abs() < 1e-20);
    }

    #[test]
    fn test_bad_env_override() {
        let mut config = LucasConfig::default();
        let err = config
            .apply_overrides_from(env(&[("LUCAS_MAX_ITERATIONS", "many")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::EnvError(_)));
    }

    #[test]
    fn test_cli_args_merge() {
        let mut config = LucasConfig::default();
        let cli = CliArgs {
            verbose: true,
            grid_points: Some(60),
            periods: Some(10),
            seed: Some(9),
            ..Default::default()
        };
        config.merge_with_cli(&cli).unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.solver.grid_points, 60);
        assert_eq!(config.simulation.periods, 10);
        assert_eq!(config.simulation.seed, 9);
    }

    #[test]
    fn test_explicit_log_level_beats_verbose() {
        let mut config = LucasConfig::default();
        let cli = CliArgs {
            verbose: true,
            log_level: Some("error".to_string()),
            ..Default::default()
        };
        config.merge_with_cli(&cli).unwrap();
        assert_eq!(config.log_level, LogLevel::Error);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = LucasConfig::default();
        config.economy.discount_factor = 1.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = LucasConfig::default();
        config.dividend.alpha = 1.5;
        assert!(config.validate().is_err());

        let mut config = LucasConfig::default();
        config.solver.tolerance = 0.0;
        assert!(config.validate().is_err());

        let mut config = LucasConfig::default();
        config.solver.grid_points = 1;
        assert!(config.validate().is_err());

        let mut config = LucasConfig::default();
        config.dividend.n_approx = 199;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let cli = CliArgs {
            config_file: Some(PathBuf::from("definitely/not/here.toml")),
            ..Default::default()
        };
        assert!(matches!(build_config(&cli), Err(ConfigError::FileError(_))));
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = LucasConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let back: LucasConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidLogLevel("bad".to_string());
        assert!(err.to_string().contains("Invalid log level"));

        let err: ConfigError = ModelError::NotSolved.into();
        assert!(err.to_string().starts_with("Invalid configuration"));
    }
}
