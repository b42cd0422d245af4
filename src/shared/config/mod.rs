//! Application configuration module
//!
//! Backend location settings plus the error type shared by every
//! configuration layer (defaults, file, environment, flags).

use std::path::PathBuf;

use reqwest::Url;
use thiserror::Error;

/// Default API prefix the backend mounts its router under
pub const DEFAULT_API_PREFIX: &str = "/api";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Server URL, without trailing slash
    pub server_url: Option<String>,
    /// Path prefix for every API route, e.g. `/api`
    pub api_prefix: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: None,
            api_prefix: DEFAULT_API_PREFIX.to_string(),
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.server_url {
            validate_server_url(url)?;
        }
        if !self.api_prefix.is_empty() && !self.api_prefix.starts_with('/') {
            return Err(ConfigError::InvalidPrefix(self.api_prefix.clone()));
        }
        Ok(())
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    server_url: Option<String>,
    api_prefix: Option<String>,
}

impl AppConfigBuilder {
    /// Set the server URL
    pub fn server_url(mut self, url: String) -> Self {
        self.server_url = Some(url);
        self
    }

    /// Set the API prefix (`""` for a backend mounted at the root)
    pub fn api_prefix(mut self, prefix: String) -> Self {
        self.api_prefix = Some(prefix);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let server_url = match self.server_url {
            Some(url) if url.trim().is_empty() => return Err(ConfigError::MissingValue("server_url")),
            Some(url) => Some(url.trim().trim_end_matches('/').to_string()),
            None => None,
        };

        let api_prefix = self
            .api_prefix
            .map(|prefix| prefix.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_PREFIX.to_string());

        let config = AppConfig {
            server_url,
            api_prefix,
        };
        config.validate()?;
        Ok(config)
    }
}

fn validate_server_url(url: &str) -> Result<(), ConfigError> {
    let parsed = Url::parse(url).map_err(|_| ConfigError::InvalidUrl(url.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(ConfigError::InvalidUrl(url.to_string())),
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("invalid API prefix '{0}': must start with '/'")]
    InvalidPrefix(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("unknown theme '{0}' (expected plain, eco or cyber)")]
    UnknownTheme(String),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
