//! Logging System
//!
//! Structured logging through the `tracing` crate. Logs always go to stderr
//! because stdout carries the run's status line.
//!
//! Priority order (highest to lowest):
//! 1. `TREEDIGEST_LOG` / `TREEDIGEST_LOG_FORMAT` environment variables
//! 2. Command-line flags (`--verbose`, `--log-level`, `--log-format`)
//! 3. Configuration file `[logging]` section
//! 4. Defaults

use crate::error::ManifestError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

pub const LOG_ENV: &str = "TREEDIGEST_LOG";
pub const LOG_FORMAT_ENV: &str = "TREEDIGEST_LOG_FORMAT";

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Disable all log output
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Enable colored output (text format only)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Module-specific log levels
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: default_format(),
            color: default_true(),
            modules: HashMap::new(),
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.format != "json" && self.format != "text" {
            return Err(ManifestError::Config(format!(
                "Invalid log format: {} (must be 'json' or 'text')",
                self.format
            )));
        }
        Ok(())
    }
}

/// Initialize the logging system
pub fn init_logging(config: &LoggingConfig) -> Result<(), ManifestError> {
    if !config.enabled {
        return Ok(());
    }

    let filter = build_env_filter(config)?;
    let format = determine_format(config)?;
    let base_subscriber = Registry::default().with(filter);

    let result = if format == "json" {
        base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(config.color)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    result.map_err(|e| ManifestError::Config(format!("Failed to initialize logging: {}", e)))
}

/// Build environment filter from config or environment variables
fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, ManifestError> {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return Ok(filter);
    }

    if config.level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let mut filter = EnvFilter::try_new(&config.level).map_err(|e| {
        ManifestError::Config(format!("Invalid log level '{}': {}", config.level, e))
    })?;

    // Sorted so the resulting directive set does not depend on map order
    let mut modules: Vec<_> = config.modules.iter().collect();
    modules.sort();
    for (module, module_level) in modules {
        let directive = format!("{}={}", module, module_level);
        filter = filter.add_directive(
            directive
                .parse()
                .map_err(|e| ManifestError::Config(format!("Invalid log directive: {}", e)))?,
        );
    }

    Ok(filter)
}

/// Determine output format from environment or config
fn determine_format(config: &LoggingConfig) -> Result<String, ManifestError> {
    if let Ok(format) = std::env::var(LOG_FORMAT_ENV) {
        if format == "json" || format == "text" {
            return Ok(format);
        }
    }

    config.validate()?;
    Ok(config.format.clone())
}
