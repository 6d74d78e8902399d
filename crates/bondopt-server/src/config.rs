//! Server configuration.

use std::path::Path;
use std::time::Duration;

use bondopt_portfolio::{OptimizationDefaults, OptimizerConfig};
use serde::{Deserialize, Serialize};

use crate::error::ServerError;

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Bond universe CSV file, loaded once at startup
    #[serde(default = "default_universe_file")]
    pub universe_file: String,

    /// Wall-clock limit for one solve, in milliseconds
    #[serde(default = "default_solve_timeout_ms")]
    pub solve_timeout_ms: u64,

    /// Maximum number of solves running at once
    #[serde(default = "default_max_concurrent_solves")]
    pub max_concurrent_solves: usize,

    /// Directory receiving an LP-format dump of every model, if set
    pub lp_dump_dir: Option<String>,

    /// Model construction settings
    #[serde(default)]
    pub optimizer: OptimizerConfig,

    /// Values for optimization request fields left out by the caller
    #[serde(default)]
    pub optimizer_defaults: OptimizationDefaults,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_universe_file() -> String {
    "./data/universe.csv".to_string()
}

fn default_solve_timeout_ms() -> u64 {
    30_000
}

fn default_max_concurrent_solves() -> usize {
    2
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            universe_file: default_universe_file(),
            solve_timeout_ms: default_solve_timeout_ms(),
            max_concurrent_solves: default_max_concurrent_solves(),
            lp_dump_dir: None,
            optimizer: OptimizerConfig::default(),
            optimizer_defaults: OptimizationDefaults::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ServerError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|message| ServerError::Config {
            path: path.display().to_string(),
            message,
        })
    }

    /// Parse configuration from TOML text.
    ///
    /// The `[optimizer]` table is validated as well as parsed.
    pub fn from_toml(content: &str) -> Result<Self, String> {
        let config: Self = toml::from_str(content).map_err(|e| e.to_string())?;
        config.optimizer.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }

    /// Solve timeout as a duration.
    pub fn solve_timeout(&self) -> Duration {
        Duration::from_millis(self.solve_timeout_ms)
    }

    /// Number of solve permits; never zero.
    pub fn solve_permits(&self) -> usize {
        self.max_concurrent_solves.max(1)
    }
}
