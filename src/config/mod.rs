//! Configuration management for the Mochow client

use serde::{Deserialize, Serialize};
use std::path::Path;
use secrecy::{Secret, ExposeSecret};

pub mod loader;
pub mod validation;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub client: ClientConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Connection settings for a Mochow instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Service endpoint, e.g. `http://127.0.0.1:8287`
    pub endpoint: String,

    /// Account name used in the authorization header
    pub account: String,

    /// API key (secured)
    #[serde(serialize_with = "serialize_secret", deserialize_with = "deserialize_secret")]
    pub api_key: Secret<String>,

    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum attempts per request
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// API version path segment
    #[serde(default = "default_url_version_prefix")]
    pub url_version_prefix: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json, compact or pretty
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// Default value functions
fn default_timeout_ms() -> u64 { 30_000 }
fn default_max_retries() -> u32 { 3 }
fn default_url_version_prefix() -> String { "v1".to_string() }
fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl ClientConfig {
    /// Build a client configuration with default timeout and retries
    pub fn new(endpoint: impl Into<String>, account: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            account: account.into(),
            api_key: Secret::new(api_key.into()),
            timeout_ms: default_timeout_ms(),
            max_retries: default_max_retries(),
            url_version_prefix: default_url_version_prefix(),
        }
    }

    /// Base URL all request paths are appended to
    pub fn base_url(&self) -> String {
        format!(
            "{}/{}",
            self.endpoint.trim_end_matches('/'),
            self.url_version_prefix.trim_matches('/')
        )
    }

    /// Value of the `Authorization` header
    pub fn authorization(&self) -> String {
        format!("Bearer account={}&api_key={}", self.account, self.api_key.expose_secret())
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::error::Result<Self> {
        let config = loader::load_config(path)?;
        validation::validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn from_file_with_env<P: AsRef<Path>>(path: P) -> crate::error::Result<Self> {
        let config = loader::load_config_with_env(path)?;
        validation::validate_config(&config)?;
        Ok(config)
    }

    /// Validate this configuration
    pub fn validate(&self) -> crate::error::Result<()> {
        validation::validate_config(self)
    }

    /// Create default configuration pointing at a local instance
    pub fn default_config() -> Self {
        Self {
            client: ClientConfig {
                endpoint: "http://127.0.0.1:8287".to_string(),
                account: "root".to_string(),
                api_key: Secret::new(std::env::var("MOCHOW_API_KEY").unwrap_or_default()),
                timeout_ms: default_timeout_ms(),
                max_retries: default_max_retries(),
                url_version_prefix: default_url_version_prefix(),
            },
            logging: LoggingConfig::default(),
        }
    }
}

/// Custom serializer for Secret<String>
fn serialize_secret<S>(secret: &Secret<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(secret.expose_secret())
}

/// Custom deserializer for Secret<String>
fn deserialize_secret<'de, D>(deserializer: D) -> Result<Secret<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(Secret::new(s))
}
