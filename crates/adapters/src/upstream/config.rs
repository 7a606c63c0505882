// Copyright 2025 Mako Dashboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Layered dashboard configuration.
//!
//! Sources, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. An optional `mako.toml` in the working directory (or an explicit file)
//! 3. `MAKO_*` environment variables, after `.env` has been loaded
//!
//! # Example
//!
//! ```ignore
//! use mako_adapters::upstream::config::DashboardConfig;
//!
//! let config = DashboardConfig::load()?;
//! println!("Ticking every {:?}", config.progress_interval());
//! ```

use ::config::{Config, Environment, File, Map};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "MAKO";

/// Base name of the optional configuration file.
pub const CONFIG_FILE: &str = "mako";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigAdapterError {
    /// A source could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    /// A value is out of range
    #[error("Invalid value for {key}: {reason}")]
    Invalid {
        /// Configuration key
        key: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigAdapterError>;

/// Effective dashboard settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Benchmark progress added per tick, in percentage points
    pub progress_step: u8,
    /// Milliseconds between benchmark ticks
    pub progress_interval_ms: u64,
    /// Milliseconds report generation takes
    pub report_delay_ms: u64,
    /// Milliseconds a mock deployment takes
    pub deploy_delay_ms: u64,
    /// Seed for the metrics generator; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
    /// Default log filter
    pub log_level: String,
    /// Directory report exports are written to
    pub output_dir: PathBuf,
    /// Hours in a billing month
    pub hours_per_month: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            progress_step: 10,
            progress_interval_ms: 500,
            report_delay_ms: 2000,
            deploy_delay_ms: 2000,
            seed: None,
            log_level: "info".to_string(),
            output_dir: PathBuf::from("reports/output"),
            hours_per_month: 730.0,
        }
    }
}

impl DashboardConfig {
    /// Load from `.env`, `mako.toml` and the process environment.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::load_from(None, None)
    }

    /// Load with an explicit file and, for tests, an explicit environment
    /// map instead of the process environment.
    ///
    /// An explicit file must exist; the default `mako.toml` is optional.
    pub fn load_from(file: Option<&Path>, env: Option<Map<String, String>>) -> Result<Self> {
        let defaults = Self::default();
        let file_source = match file {
            Some(path) => File::from(path).required(true),
            None => File::with_name(CONFIG_FILE).required(false),
        };

        let settings = Config::builder()
            .set_default("progress_step", i64::from(defaults.progress_step))?
            .set_default("progress_interval_ms", defaults.progress_interval_ms as i64)?
            .set_default("report_delay_ms", defaults.report_delay_ms as i64)?
            .set_default("deploy_delay_ms", defaults.deploy_delay_ms as i64)?
            .set_default("log_level", defaults.log_level)?
            .set_default("output_dir", defaults.output_dir.to_string_lossy().into_owned())?
            .set_default("hours_per_month", defaults.hours_per_month)?
            .add_source(file_source)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the timers and cost math cannot use.
    pub fn validate(&self) -> Result<()> {
        if self.progress_step == 0 || self.progress_step > 100 {
            return Err(ConfigAdapterError::Invalid {
                key: "progress_step",
                reason: format!("{} is outside 1..=100", self.progress_step),
            });
        }
        if self.progress_interval_ms == 0 {
            return Err(ConfigAdapterError::Invalid {
                key: "progress_interval_ms",
                reason: "must be positive".to_string(),
            });
        }
        if self.hours_per_month.is_nan() || self.hours_per_month <= 0.0 {
            return Err(ConfigAdapterError::Invalid {
                key: "hours_per_month",
                reason: format!("{} is not positive", self.hours_per_month),
            });
        }
        Ok(())
    }

    /// Time between benchmark ticks.
    pub fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.progress_interval_ms)
    }

    /// Report generation delay.
    pub fn report_delay(&self) -> Duration {
        Duration::from_millis(self.report_delay_ms)
    }

    /// Mock deployment delay.
    pub fn deploy_delay(&self) -> Duration {
        Duration::from_millis(self.deploy_delay_ms)
    }

    /// `(key, value)` pairs for display.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("progress_step", self.progress_step.to_string()),
            ("progress_interval_ms", self.progress_interval_ms.to_string()),
            ("report_delay_ms", self.report_delay_ms.to_string()),
            ("deploy_delay_ms", self.deploy_delay_ms.to_string()),
            (
                "seed",
                self.seed.map(|s| s.to_string()).unwrap_or_else(|| "entropy".to_string()),
            ),
            ("log_level", self.log_level.clone()),
            ("output_dir", self.output_dir.display().to_string()),
            ("hours_per_month", self.hours_per_month.to_string()),
        ]
    }
}
