//! Configuration service implementation.
//!
//! Loads [`ClientConfig`] from `~/.config/mailmate/config.toml` (or an
//! explicit path) and layers environment overrides on top. Command-line
//! overrides are applied by the binary afterwards.

use crate::paths::MailmatePaths;
use mailmate_core::ClientConfig;
use mailmate_core::error::{MailmateError, Result};
use std::path::{Path, PathBuf};

/// Environment variable overriding `backend_url`.
pub const ENV_BACKEND_URL: &str = "MAILMATE_BACKEND_URL";
/// Environment variable overriding `session_cookie`.
pub const ENV_SESSION: &str = "MAILMATE_SESSION";

/// Loads the client configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigService {
    /// Explicit config file; `None` means the platform default location.
    path: Option<PathBuf>,
}

impl ConfigService {
    /// Creates a service reading the default config file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a service reading `path` instead of the default location.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Loads the file (defaults when missing) and applies process environment overrides.
    pub fn load(&self) -> Result<ClientConfig> {
        let config = self.load_file()?;
        Ok(Self::apply_env(config, |key| std::env::var(key).ok()))
    }

    /// Loads only the config file. A missing file yields the defaults.
    pub fn load_file(&self) -> Result<ClientConfig> {
        let path = self.config_path()?;
        match read_config(&path)? {
            Some(config) => {
                tracing::info!("[Config] Loaded {}", path.display());
                Ok(config)
            }
            None => {
                tracing::debug!("[Config] No config at {}, using defaults", path.display());
                Ok(ClientConfig::default())
            }
        }
    }

    /// Overrides fields from the environment, looked up through `lookup`.
    ///
    /// Empty values are ignored.
    pub fn apply_env<F>(mut config: ClientConfig, lookup: F) -> ClientConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(url) = non_empty(ENV_BACKEND_URL) {
            tracing::debug!("[Config] backend_url overridden by {}", ENV_BACKEND_URL);
            config.backend_url = url;
        }
        if let Some(session) = non_empty(ENV_SESSION) {
            tracing::debug!("[Config] session_cookie overridden by {}", ENV_SESSION);
            config.session_cookie = Some(session);
        }
        config
    }

    fn config_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => MailmatePaths::config_file().map_err(|e| MailmateError::config(e.to_string())),
        }
    }
}

fn read_config(path: &Path) -> Result<Option<ClientConfig>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)?;
    let config: ClientConfig = toml::from_str(&content)?;
    Ok(Some(config))
}
