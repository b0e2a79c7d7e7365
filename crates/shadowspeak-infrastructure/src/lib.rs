pub mod config_storage;
pub mod json_script_repository;
pub mod paths;
pub mod storage;

pub use crate::config_storage::{load_config, load_default_config};
pub use crate::json_script_repository::JsonScriptRepository;
pub use crate::paths::ShadowPaths;
