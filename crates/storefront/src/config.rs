//! Storefront engine configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `WALKNEX_CHAT_ENDPOINT` - Remote chat endpoint URL; when absent the
//!   local fallback responder answers every message
//! - `WALKNEX_CHAT_TIMEOUT_SECS` - Chat request timeout (default: 15)
//! - `WALKNEX_CHAT_FALLBACK` - Use the local responder on remote failure
//!   instead of a fixed apology (default: true)
//! - `WALKNEX_DATA_DIR` - Root directory for the file-backed store; when
//!   absent the engine runs on the in-memory store

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_CHAT_TIMEOUT_SECS: u64 = 15;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront engine configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Remote chat endpoint URL, if configured.
    pub chat_endpoint: Option<String>,
    /// Bounded timeout for chat requests.
    pub chat_timeout: Duration,
    /// Whether the local fallback responder answers on remote failure.
    pub chat_fallback: bool,
    /// Root directory for the file-backed store, if configured.
    pub data_dir: Option<PathBuf>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            chat_endpoint: None,
            chat_timeout: Duration::from_secs(DEFAULT_CHAT_TIMEOUT_SECS),
            chat_fallback: true,
            data_dir: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let chat_endpoint = get_optional_env("WALKNEX_CHAT_ENDPOINT");

        let chat_timeout_secs = get_env_or_default(
            "WALKNEX_CHAT_TIMEOUT_SECS",
            &DEFAULT_CHAT_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("WALKNEX_CHAT_TIMEOUT_SECS".to_string(), e.to_string())
        })?;

        let chat_fallback = get_env_or_default("WALKNEX_CHAT_FALLBACK", "true")
            .parse::<bool>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("WALKNEX_CHAT_FALLBACK".to_string(), e.to_string())
            })?;

        let data_dir = get_optional_env("WALKNEX_DATA_DIR").map(PathBuf::from);

        Ok(Self {
            chat_endpoint,
            chat_timeout: Duration::from_secs(chat_timeout_secs),
            chat_fallback,
            data_dir,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::default();
        assert_eq!(config.chat_endpoint, None);
        assert_eq!(config.chat_timeout, Duration::from_secs(15));
        assert!(config.chat_fallback);
        assert_eq!(config.data_dir, None);
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidEnvVar(
            "WALKNEX_CHAT_TIMEOUT_SECS".to_string(),
            "invalid digit".to_string(),
        );
        assert_eq!(
            err.to_string(),
            "Invalid environment variable WALKNEX_CHAT_TIMEOUT_SECS: invalid digit"
        );
    }
}
