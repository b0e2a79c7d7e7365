//! Script repository trait.
//!
//! Defines the durable storage capability behind the snapshot store.

use super::model::SavedScript;
use crate::error::Result;

/// Durable storage for the whole saved-script collection.
///
/// The collection is always read and written as one document; there are no
/// incremental writes. This decouples the snapshot store from the storage
/// mechanism (a JSON file, an in-memory vector in tests).
pub trait ScriptRepository {
    /// Reads the full collection.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<SavedScript>)`: Stored scripts in stored order (empty if nothing was ever written)
    /// - `Err(_)`: Storage unavailable or the stored document is corrupt
    fn read_all(&self) -> Result<Vec<SavedScript>>;

    /// Replaces the full collection.
    ///
    /// Implementations must be all-or-nothing: after an error the previously
    /// stored collection is still the one `read_all` returns.
    fn write_all(&mut self, scripts: &[SavedScript]) -> Result<()>;

    /// Preserves the stored document before it is overwritten.
    ///
    /// Called once before the first write after `read_all` failed, so that
    /// scripts the store could not read are not lost. Repositories without a
    /// document to preserve do nothing.
    fn back_up(&mut self) -> Result<()> {
        Ok(())
    }
}

/// A repository that keeps the collection in memory.
///
/// Used by tests and by sessions that should not touch the disk.
#[derive(Debug, Default, Clone)]
pub struct InMemoryScriptRepository {
    scripts: Vec<SavedScript>,
    writes: usize,
}

impl InMemoryScriptRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing collection.
    pub fn with_scripts(scripts: Vec<SavedScript>) -> Self {
        Self { scripts, writes: 0 }
    }

    /// Number of successful `write_all` calls.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// The stored collection.
    pub fn stored(&self) -> &[SavedScript] {
        &self.scripts
    }
}

impl ScriptRepository for InMemoryScriptRepository {
    fn read_all(&self) -> Result<Vec<SavedScript>> {
        Ok(self.scripts.clone())
    }

    fn write_all(&mut self, scripts: &[SavedScript]) -> Result<()> {
        self.scripts = scripts.to_vec();
        self.writes += 1;
        Ok(())
    }
}
