//! Logging System
//!
//! Structured logging via the `tracing` crate: configurable level, text or
//! JSON output, stdout or stderr destination. A `COURSESTORE_LOG` environment
//! filter overrides the configured level when set.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Whether logging is enabled (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Write to stderr instead of stdout
    #[serde(default)]
    pub stderr: bool,
}

fn default_level() -> String {
    "info".to_string()
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
            enabled: default_true(),
            level: default_level(),
            format: default_format(),
            stderr: false,
        }
    }
}

/// Install the global subscriber. Call once at startup.
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), ConfigError> {
    let disabled = config.map(|c| !c.enabled).unwrap_or(false);
    if disabled {
        Registry::default()
            .with(EnvFilter::new("off"))
            .with(fmt::layer().with_writer(|| std::io::sink()))
            .init();
        return Ok(());
    }

    let filter = build_env_filter(config)?;
    let format = config.map(|c| c.format.as_str()).unwrap_or("text");
    if format != "json" && format != "text" {
        return Err(ConfigError::Logging(format!(
            "invalid log format: {format} (must be 'json' or 'text')"
        )));
    }
    let to_stderr = config.map(|c| c.stderr).unwrap_or(false);

    let base_subscriber = Registry::default().with(filter);
    match (format, to_stderr) {
        ("json", true) => base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(std::io::stderr),
            )
            .init(),
        ("json", false) => base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(std::io::stdout),
            )
            .init(),
        (_, true) => base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(std::io::stderr),
            )
            .init(),
        (_, false) => base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(std::io::stdout),
            )
            .init(),
    }

    Ok(())
}

/// Build the level filter from the environment or the config.
fn build_env_filter(config: Option<&LoggingConfig>) -> Result<EnvFilter, ConfigError> {
    if let Ok(filter) = EnvFilter::try_from_env("COURSESTORE_LOG") {
        return Ok(filter);
    }
    let level = config.map(|c| c.level.as_str()).unwrap_or("info");
    // EnvFilter reads a bare word as a target directive, not a level, so it
    // accepts any string; the level names have to be checked up front.
    match level.to_ascii_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" | "off" => {}
        other => {
            return Err(ConfigError::Logging(format!(
                "invalid log level {other:?} (must be trace, debug, info, warn, error, or off)"
            )))
        }
    }
    EnvFilter::try_new(level)
        .map_err(|e| ConfigError::Logging(format!("invalid log level {level:?}: {e}")))
}
