//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `VITRINE_DATA_DIR` - Directory for cart and selection state
//!   (default: platform local data directory + `/vitrine`)
//! - `VITRINE_CEP_API_URL` - Address lookup base URL
//!   (default: `https://viacep.com.br/ws`)
//! - `VITRINE_CEP_TIMEOUT_SECS` - Address lookup timeout in seconds (default: 10)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_CEP_API_URL: &str = "https://viacep.com.br/ws";
const DEFAULT_CEP_TIMEOUT_SECS: &str = "10";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory holding the persisted shopper state
    pub data_dir: PathBuf,
    /// Address lookup configuration
    pub cep_lookup: CepLookupConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production", "development")
    pub sentry_environment: Option<String>,
}

/// Address lookup service configuration.
#[derive(Debug, Clone)]
pub struct CepLookupConfig {
    /// Service base URL; the CEP and `/json/` are appended
    pub base_url: Url,
    /// Request timeout
    pub timeout: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value, or if
    /// no data directory is configured and the platform has none.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// See [`StorefrontConfig::from_env`].
    pub fn from_source(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = match get("VITRINE_DATA_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };

        let base_url = get_or_default(&get, "VITRINE_CEP_API_URL", DEFAULT_CEP_API_URL);
        let base_url = Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("VITRINE_CEP_API_URL".to_string(), e.to_string())
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEnvVar(
                "VITRINE_CEP_API_URL".to_string(),
                format!("unsupported scheme '{}'", base_url.scheme()),
            ));
        }

        let timeout_secs = get_or_default(&get, "VITRINE_CEP_TIMEOUT_SECS", DEFAULT_CEP_TIMEOUT_SECS)
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("VITRINE_CEP_TIMEOUT_SECS".to_string(), e.to_string())
            })?;

        Ok(Self {
            data_dir,
            cep_lookup: CepLookupConfig {
                base_url,
                timeout: Duration::from_secs(timeout_secs),
            },
            sentry_dsn: get("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: get("SENTRY_ENVIRONMENT"),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a variable with a default value.
fn get_or_default(get: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    get(key).unwrap_or_else(|| default.to_string())
}

/// Platform data directory for the storefront state.
fn default_data_dir() -> Result<PathBuf, ConfigError> {
    dirs::data_local_dir()
        .map(|dir| dir.join("vitrine"))
        .ok_or_else(|| ConfigError::MissingEnvVar("VITRINE_DATA_DIR".to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn source(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::from_source(source(&[("VITRINE_DATA_DIR", "/tmp/vitrine")])).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/vitrine"));
        assert_eq!(config.cep_lookup.base_url.as_str(), "https://viacep.com.br/ws");
        assert_eq!(config.cep_lookup.timeout, Duration::from_secs(10));
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = StorefrontConfig::from_source(source(&[
            ("VITRINE_DATA_DIR", "/data"),
            ("VITRINE_CEP_API_URL", "http://localhost:8080/ws"),
            ("VITRINE_CEP_TIMEOUT_SECS", "3"),
            ("SENTRY_DSN", ""),
        ]))
        .unwrap();
        assert_eq!(config.cep_lookup.base_url.as_str(), "http://localhost:8080/ws");
        assert_eq!(config.cep_lookup.timeout, Duration::from_secs(3));
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_invalid_values() {
        let err = StorefrontConfig::from_source(source(&[
            ("VITRINE_DATA_DIR", "/data"),
            ("VITRINE_CEP_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref k, _) if k == "VITRINE_CEP_TIMEOUT_SECS"));

        let err = StorefrontConfig::from_source(source(&[
            ("VITRINE_DATA_DIR", "/data"),
            ("VITRINE_CEP_API_URL", "ftp://viacep.com.br/ws"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref k, _) if k == "VITRINE_CEP_API_URL"));
    }
}
