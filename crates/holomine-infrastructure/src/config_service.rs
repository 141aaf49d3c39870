//! Configuration service implementation.
//!
//! Loads `ClientConfig` from `~/.config/holomine/config.toml` (or an explicit
//! path) and applies caller overrides on top. A missing file means defaults.
//!
//! Precedence, highest first: overrides (CLI flags / environment, resolved by
//! the caller) > file > built-in defaults.

use crate::paths::{HolominePaths, PathError};
use holomine_core::config::ClientConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error(transparent)]
    Path(#[from] PathError),
}

/// Values that take precedence over the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Loads and resolves the client configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Creates a service reading the default config file location.
    pub fn new() -> Result<Self, ConfigError> {
        Ok(Self {
            path: HolominePaths::config_file()?,
        })
    }

    /// Creates a service reading `path` instead of the default location.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the config file, falling back to defaults when it does not exist.
    pub fn load(&self) -> Result<ClientConfig, ConfigError> {
        if !self.path.exists() {
            tracing::debug!(
                "[ConfigService] No config file at {}, using defaults",
                self.path.display()
            );
            return Ok(ClientConfig::default());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;

        if content.trim().is_empty() {
            return Ok(ClientConfig::default());
        }

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Loads the file, applies `overrides`, and validates the result.
    pub fn resolve(&self, overrides: &ConfigOverrides) -> Result<ClientConfig, ConfigError> {
        let mut config = self.load()?;

        if let Some(base_url) = &overrides.base_url {
            config.service.base_url = base_url.clone();
        }
        if let Some(timeout_secs) = overrides.timeout_secs {
            config.service.timeout_secs = timeout_secs;
        }

        validate(&config)?;
        tracing::debug!(
            base_url = %config.service.base_url,
            timeout_secs = config.service.timeout_secs,
            "[ConfigService] Resolved configuration"
        );
        Ok(config)
    }
}

fn validate(config: &ClientConfig) -> Result<(), ConfigError> {
    let base_url = config.service.base_url.trim();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(ConfigError::Invalid(format!(
            "service.base_url must be an http(s) URL, got '{}'",
            config.service.base_url
        )));
    }
    if config.service.timeout_secs == 0 {
        return Err(ConfigError::Invalid(
            "service.timeout_secs must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use holomine_core::config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));

        let config = service.load().unwrap();
        assert_eq!(config.service.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.service.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_file_values_are_loaded() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[service]\nbase_url = \"https://mining.example.com\"\ntimeout_secs = 12\n",
        )
        .unwrap();

        let config = ConfigService::with_path(&path).load().unwrap();
        assert_eq!(config.service.base_url, "https://mining.example.com");
        assert_eq!(config.service.timeout_secs, 12);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[service]\ntimeout_secs = 3\n").unwrap();

        let config = ConfigService::with_path(&path).load().unwrap();
        assert_eq!(config.service.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.service.timeout_secs, 3);
    }

    #[test]
    fn test_overrides_win_over_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[service]\nbase_url = \"http://from-file:5000\"\n").unwrap();

        let overrides = ConfigOverrides {
            base_url: Some("http://from-flag:9000".to_string()),
            timeout_secs: Some(7),
        };
        let config = ConfigService::with_path(&path).resolve(&overrides).unwrap();
        assert_eq!(config.service.base_url, "http://from-flag:9000");
        assert_eq!(config.service.timeout_secs, 7);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[service\nbase_url = ").unwrap();

        let err = ConfigService::with_path(&path).load().unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));

        let err = service
            .resolve(&ConfigOverrides {
                base_url: Some("localhost:5000".to_string()),
                timeout_secs: None,
            })
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = service
            .resolve(&ConfigOverrides {
                base_url: None,
                timeout_secs: Some(0),
            })
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
