//! Configuration management for llmscope
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `LLMSCOPE__<SECTION>__<KEY>` environment variables.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "LLMSCOPE";

/// Upper bound for `source.window_days`
pub const MAX_WINDOW_DAYS: u32 = 3_650;

/// Upper bound for `dashboard.chart_days`
pub const MAX_CHART_DAYS: usize = 366;

/// Main configuration struct
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Data source configuration
    pub source: SourceConfig,

    /// Dashboard configuration
    pub dashboard: DashboardConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Data source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Entries requested per fetch
    pub count: usize,
    /// Seed for reproducible mock data
    pub seed: Option<u64>,
    /// How far back mock timestamps reach, in days
    pub window_days: u32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            count: 100,
            seed: None,
            window_days: 7,
        }
    }
}

/// Dashboard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Entries per log page
    pub page_size: usize,
    /// Entries shown under "recent logs"
    pub recent_count: usize,
    /// Days covered by the performance chart
    pub chart_days: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            recent_count: 5,
            chart_days: 7,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log format (json or pretty)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, or the per-user config file when absent
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = path.map(Path::to_path_buf).or_else(default_path);
        Self::load_from(file.as_deref(), config::Environment::with_prefix(ENV_PREFIX))
    }

    fn load_from(file: Option<&Path>, env: config::Environment) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(file) = file {
            debug!(path = %file.display(), "Reading configuration file");
            builder = builder.add_source(config::File::from(file).required(false));
        }

        let config = builder
            .add_source(env.separator("__").try_parsing(true))
            .build()?
            .try_deserialize::<Config>()?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values the data source or dashboard cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.dashboard.page_size == 0 {
            return Err(Error::config("dashboard.page_size must be greater than zero"));
        }
        if self.dashboard.chart_days > MAX_CHART_DAYS {
            return Err(Error::config(format!(
                "dashboard.chart_days must be at most {MAX_CHART_DAYS}"
            )));
        }
        if self.source.window_days > MAX_WINDOW_DAYS {
            return Err(Error::config(format!(
                "source.window_days must be at most {MAX_WINDOW_DAYS}"
            )));
        }
        Ok(())
    }
}

/// Per-user configuration file, e.g. `~/.config/llmscope/config.toml`
pub fn default_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("dev", "llmscope", "llmscope")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}
