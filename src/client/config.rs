use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::client::credential_store::SqliteCredentialStore;
use crate::client::theme::Theme;
use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError};

/// Default server URL
const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8001";

/// Environment variable overriding the server URL
pub const ENV_API_URL: &str = "REWEAR_API_URL";
/// Environment variable selecting the theme
pub const ENV_THEME: &str = "REWEAR_THEME";
/// Environment variable overriding the credential database path
pub const ENV_STATE_DB: &str = "REWEAR_STATE_DB";

/// Optional `config.toml` contents; every key may be omitted
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    server_url: Option<String>,
    api_prefix: Option<String>,
    theme: Option<String>,
    state_db: Option<PathBuf>,
}

/// Client configuration: backend location, theme and local state path.
#[derive(Debug, Clone)]
pub struct Config {
    app: AppConfig,
    theme: Theme,
    state_db: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app: AppConfig::default(),
            theme: Theme::default(),
            state_db: None,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        let app = builder.build()?;
        Ok(Self {
            app,
            ..Self::default()
        })
    }

    /// Layered load: defaults, then the config file, then the environment.
    ///
    /// With `path == None` the default location is read only if it exists;
    /// an explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        match path {
            Some(path) => config.apply_file(path)?,
            None => {
                if let Some(default_path) = Self::default_file_path().filter(|p| p.exists()) {
                    config.apply_file(&default_path)?;
                }
            }
        }

        config.apply_env()?;
        tracing::debug!(
            "Loaded config: server={}, theme={}",
            config.server_url(),
            config.theme
        );
        Ok(config)
    }

    /// `<config dir>/rewear/config.toml`
    pub fn default_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("rewear").join("config.toml"))
    }

    fn apply_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: FileConfig = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let mut builder = AppConfig::builder();
        if let Some(url) = file.server_url.or_else(|| self.app.server_url.clone()) {
            builder = builder.server_url(url);
        }
        builder = builder.api_prefix(file.api_prefix.unwrap_or_else(|| self.app.api_prefix.clone()));
        self.app = builder.build()?;

        if let Some(theme) = file.theme {
            self.theme = theme.parse()?;
        }
        if let Some(state_db) = file.state_db {
            self.state_db = Some(state_db);
        }
        Ok(())
    }

    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(url) = std::env::var(ENV_API_URL) {
            self.set_server_url(url)?;
        }
        if let Ok(theme) = std::env::var(ENV_THEME) {
            self.theme = theme.parse()?;
        }
        if let Ok(path) = std::env::var(ENV_STATE_DB) {
            if !path.trim().is_empty() {
                self.state_db = Some(PathBuf::from(path));
            }
        }
        Ok(())
    }

    /// Replace the server URL, keeping the API prefix
    pub fn set_server_url(&mut self, url: String) -> Result<(), ConfigError> {
        self.app = AppConfig::builder()
            .server_url(url)
            .api_prefix(self.app.api_prefix.clone())
            .build()?;
        Ok(())
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn set_state_db(&mut self, path: PathBuf) {
        self.state_db = Some(path);
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}{}", self.server_url(), self.app.api_prefix, path)
    }

    /// Absolute URL for a server-relative asset such as `/uploads/x.jpg`
    pub fn asset_url(&self, reference: &str) -> String {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            reference.to_string()
        } else {
            format!("{}/{}", self.server_url(), reference.trim_start_matches('/'))
        }
    }

    pub fn server_url(&self) -> &str {
        self.app.server_url.as_deref().unwrap_or(DEFAULT_SERVER_URL)
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Credential database location
    pub fn state_db_path(&self) -> PathBuf {
        self.state_db
            .clone()
            .unwrap_or_else(SqliteCredentialStore::default_path)
    }
}
