//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `body_limit` is 0 or exceeds 50MB
    /// - `workers` is 0 or exceeds 256
    /// - `user_agent` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.body_limit == 0 {
            return Err(ConfigError::Invalid { field: "body_limit".into(), reason: "must be greater than 0".into() });
        }
        if self.body_limit > 50 * 1024 * 1024 {
            return Err(ConfigError::Invalid { field: "body_limit".into(), reason: "must not exceed 50MB".into() });
        }

        if self.workers == 0 {
            return Err(ConfigError::Invalid { field: "workers".into(), reason: "must be at least 1".into() });
        }
        if self.workers > 256 {
            return Err(ConfigError::Invalid { field: "workers".into(), reason: "must not exceed 256".into() });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        Ok(())
    }
}
