//! Path management for ShadowSpeak files.

use shadowspeak_core::config::AppConfig;
use std::path::PathBuf;

/// Fixed key of the saved-scripts document.
pub const SCRIPTS_KEY: &str = "shadowspeak-scripts";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// The platform config directory could not be determined.
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

impl From<PathError> for shadowspeak_core::ShadowError {
    fn from(e: PathError) -> Self {
        shadowspeak_core::ShadowError::config(e.to_string())
    }
}

/// Resolves where ShadowSpeak keeps its files.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/shadowspeak/              # Config directory (platform default)
/// ├── config.toml                     # Application configuration
/// └── shadowspeak-scripts.json        # Saved scripts
/// ```
pub struct ShadowPaths;

impl ShadowPaths {
    /// Returns the ShadowSpeak configuration directory.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("shadowspeak"))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to `config.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the default saved-scripts document path.
    pub fn scripts_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join(format!("{SCRIPTS_KEY}.json")))
    }

    /// Picks the scripts file: explicit override, then config, then default.
    pub fn resolve_scripts_file(
        config: &AppConfig,
        override_path: Option<PathBuf>,
    ) -> Result<PathBuf, PathError> {
        if let Some(path) = override_path.or_else(|| config.storage.scripts_file.clone()) {
            return Ok(path);
        }
        Self::scripts_file()
    }
}
