//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (DRIFTWATCH_*)
//! 2. TOML config file (if DRIFTWATCH_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (DRIFTWATCH_*)
/// 2. TOML config file (if DRIFTWATCH_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the SQLite snapshot store.
    ///
    /// Set via DRIFTWATCH_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via DRIFTWATCH_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Total HTTP request timeout in milliseconds.
    ///
    /// Set via DRIFTWATCH_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Cap on body bytes read from the wire per fetch.
    ///
    /// Set via DRIFTWATCH_BODY_LIMIT environment variable. Bounds memory
    /// per in-flight fetch; the normalizer's snapshot cap is fixed at 3MB
    /// regardless.
    #[serde(default = "default_body_limit")]
    pub body_limit: usize,

    /// Number of concurrent monitor units per pass.
    ///
    /// Set via DRIFTWATCH_WORKERS environment variable. The `monitor`
    /// subcommand's --workers flag overrides this per run.
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./driftwatch.sqlite3")
}

fn default_user_agent() -> String {
    "driftwatch/0.1".into()
}

fn default_timeout_ms() -> u64 {
    8_000
}

fn default_body_limit() -> usize {
    1024 * 1024 * 3
}

fn default_workers() -> usize {
    20
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            body_limit: default_body_limit(),
            workers: default_workers(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `DRIFTWATCH_`
    /// 2. TOML file from `DRIFTWATCH_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("DRIFTWATCH_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("DRIFTWATCH_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
