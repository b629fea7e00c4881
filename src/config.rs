//! Configuration management for the library catalog

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

use crate::models::library::LendingPolicy;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    /// JSON file the catalog is loaded from and saved to
    pub path: PathBuf,
    /// Write indented JSON
    pub pretty: bool,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LendingConfig {
    pub allow_duplicate_loans: bool,
    pub max_loans_per_member: Option<usize>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub lending: LendingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // e.g. CATALOG_LENDING__MAX_LOANS_PER_MEMBER=3
            .add_source(
                Environment::with_prefix("CATALOG")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("storage.path", env::var("CATALOG_FILE").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl From<&LendingConfig> for LendingPolicy {
    fn from(c: &LendingConfig) -> Self {
        LendingPolicy {
            allow_duplicate_loans: c.allow_duplicate_loans,
            max_loans_per_member: c.max_loans_per_member,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("library.json"),
            pretty: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for LendingConfig {
    fn default() -> Self {
        Self {
            allow_duplicate_loans: true,
            max_loans_per_member: None,
        }
    }
}
