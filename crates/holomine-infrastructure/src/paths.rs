//! Path management for holomine configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/holomine/          # Config directory (platform default)
//! └── config.toml              # Service location and timeouts
//! ```

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

const APP_DIR: &str = "holomine";
const CONFIG_FILE: &str = "config.toml";

/// Resolves holomine's on-disk locations.
pub struct HolominePaths;

impl HolominePaths {
    /// Returns the holomine configuration directory (e.g. `~/.config/holomine/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to `config.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }
}
