//! JSON file-backed script repository.

use crate::storage::AtomicJsonFile;
use shadowspeak_core::error::Result;
use shadowspeak_core::script::{SavedScript, ScriptRepository};
use std::path::{Path, PathBuf};

/// Keeps the saved-script collection in a single JSON document.
///
/// The document is a bare array of scripts, newest first. It carries no schema
/// version.
pub struct JsonScriptRepository {
    file: AtomicJsonFile<Vec<SavedScript>>,
}

impl JsonScriptRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: AtomicJsonFile::new(path.into()),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

impl ScriptRepository for JsonScriptRepository {
    fn read_all(&self) -> Result<Vec<SavedScript>> {
        let scripts = self.file.load()?.unwrap_or_default();
        tracing::debug!(
            "Read {} scripts from {:?}",
            scripts.len(),
            self.file.path()
        );
        Ok(scripts)
    }

    fn write_all(&mut self, scripts: &[SavedScript]) -> Result<()> {
        self.file.save(&scripts.to_vec())?;
        tracing::debug!("Wrote {} scripts to {:?}", scripts.len(), self.file.path());
        Ok(())
    }

    fn back_up(&mut self) -> Result<()> {
        if let Some(backup) = self.file.backup()? {
            tracing::warn!(
                "Backed up unreadable scripts file {:?} to {:?}",
                self.file.path(),
                backup
            );
        }
        Ok(())
    }
}
