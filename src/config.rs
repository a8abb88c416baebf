//! Store configuration: backing file locations plus logging settings.
//!
//! Layered in increasing precedence: built-in defaults, an optional config
//! file, then `COURSESTORE_`-prefixed environment variables.

use crate::error::ConfigError;
use crate::logging::LoggingConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Backing file for the course collection.
    pub courses_file: PathBuf,

    /// Backing file for the user collection.
    pub users_file: PathBuf,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            courses_file: PathBuf::from("data/courses.json"),
            users_file: PathBuf::from("data/users.json"),
            logging: LoggingConfig::default(),
        }
    }
}

impl StoreConfig {
    /// Load configuration, layering `file` (when given) over the defaults and
    /// the environment over both.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("courses_file", "data/courses.json")?
            .set_default("users_file", "data/users.json")?;
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path));
        }
        builder =
            builder.add_source(config::Environment::with_prefix("COURSESTORE").separator("__"));
        Ok(builder.build()?.try_deserialize()?)
    }
}
