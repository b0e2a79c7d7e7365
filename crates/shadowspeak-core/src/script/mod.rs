//! Saved script domain module.
//!
//! # Module Structure
//!
//! - `model`: The `SavedScript` entity, name rules and list summaries
//! - `repository`: Storage trait and the in-memory implementation
//! - `store`: The bounded `SnapshotStore`

mod model;
mod repository;
mod store;

pub use model::{
    MAX_NAME_CHARS, MAX_SCRIPTS, SavedScript, ScriptSummary, normalize_name, relative_time_label,
};
pub use repository::{InMemoryScriptRepository, ScriptRepository};
pub use store::SnapshotStore;
