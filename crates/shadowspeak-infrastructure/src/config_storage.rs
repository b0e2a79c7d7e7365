use crate::paths::ShadowPaths;
use shadowspeak_core::config::AppConfig;
use shadowspeak_core::error::{Result, ShadowError};
use std::fs;
use std::path::Path;

/// Loads the configuration from the default location.
///
/// The path is `~/.config/shadowspeak/config.toml` (platform equivalent).
/// Defaults are used when the file is missing.
pub fn load_default_config() -> Result<AppConfig> {
    load_config(&ShadowPaths::config_file()?)
}

/// Loads the configuration from `path`.
///
/// # Returns
///
/// - `Ok(AppConfig)`: The parsed config, or defaults if the file does not exist or is empty
/// - `Err(ShadowError::Config)`: The file exists but cannot be read or parsed
pub fn load_config(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        tracing::debug!("No config file at {:?}, using defaults", path);
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ShadowError::config(format!("Failed to read config file at {:?}: {}", path, e)))?;

    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }

    toml::from_str(&content)
        .map_err(|e| ShadowError::config(format!("Failed to parse TOML from {:?}: {}", path, e)))
}
