pub mod practice;
pub mod scripts;
pub mod segment;
pub mod utils;

use anyhow::{Context, Result};
use shadowspeak_core::config::AppConfig;
use shadowspeak_core::session::SessionManager;
use shadowspeak_infrastructure::{JsonScriptRepository, ShadowPaths, load_config, load_default_config};
use std::path::PathBuf;

/// Configuration and resolved paths shared by all commands.
pub struct AppContext {
    pub config: AppConfig,
    pub scripts_file: PathBuf,
}

impl AppContext {
    pub fn load(config_path: Option<PathBuf>, store_override: Option<PathBuf>) -> Result<Self> {
        let config = match config_path {
            Some(path) => load_config(&path)?,
            None => load_default_config()?,
        };
        let scripts_file = ShadowPaths::resolve_scripts_file(&config, store_override)
            .context("Failed to resolve the saved scripts file")?;
        tracing::debug!("Using scripts file {:?}", scripts_file);

        Ok(Self {
            config,
            scripts_file,
        })
    }

    /// Opens the saved scripts and an empty session over them.
    pub fn open_manager(&self) -> SessionManager<JsonScriptRepository> {
        SessionManager::with_repository(JsonScriptRepository::new(&self.scripts_file))
    }
}
