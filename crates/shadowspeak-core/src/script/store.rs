//! The bounded snapshot store.

use super::model::{MAX_SCRIPTS, SavedScript};
use super::repository::ScriptRepository;
use crate::error::Result;
use crate::sentence::SentenceUnit;
use uuid::Uuid;

/// Named snapshots of session units, backed by a [`ScriptRepository`].
///
/// The collection is read once when the store is opened and rewritten in full
/// on every mutation. Writes are transactional with respect to memory: the
/// next collection is written first and only becomes the in-memory state once
/// the write succeeded, so after a persistence error `list()` still matches
/// what is durably stored.
///
/// The store performs no capacity check. Callers gate creation on
/// [`SnapshotStore::is_full`].
pub struct SnapshotStore<R: ScriptRepository> {
    repository: R,
    scripts: Vec<SavedScript>,
    /// The stored document could not be read and has not been backed up yet
    unreadable: bool,
}

impl<R: ScriptRepository> SnapshotStore<R> {
    /// Opens the store and reads the stored collection.
    ///
    /// A read failure is logged and the store starts empty. The unreadable
    /// document is handed to [`ScriptRepository::back_up`] before the first
    /// mutation overwrites it; if that fails the mutation is refused.
    pub fn open(repository: R) -> Self {
        let (scripts, unreadable) = match repository.read_all() {
            Ok(scripts) => {
                tracing::debug!(count = scripts.len(), "loaded saved scripts");
                (scripts, false)
            }
            Err(e) => {
                tracing::error!("Failed to load saved scripts: {}", e);
                tracing::warn!(
                    "Starting with no saved scripts; the unreadable file is backed up on the next save"
                );
                (Vec::new(), true)
            }
        };
        Self {
            repository,
            scripts,
            unreadable,
        }
    }

    /// Whether the stored document could not be read at open and has not
    /// been backed up since.
    pub fn is_unreadable(&self) -> bool {
        self.unreadable
    }

    /// All saved scripts, most recently created first.
    pub fn list(&self) -> &[SavedScript] {
        &self.scripts
    }

    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    /// Whether the store holds [`MAX_SCRIPTS`] or more scripts.
    pub fn is_full(&self) -> bool {
        self.scripts.len() >= MAX_SCRIPTS
    }

    pub fn get(&self, id: &str) -> Option<&SavedScript> {
        self.scripts.iter().find(|script| script.id == id)
    }

    /// The backing repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Creates a new script from a copy of `units` and puts it first.
    ///
    /// The name is trimmed but otherwise taken as given.
    pub fn save(&mut self, units: &[SentenceUnit], name: &str) -> Result<SavedScript> {
        let now = now_millis();
        let script = SavedScript {
            id: format!("script-{}", Uuid::new_v4()),
            name: name.trim().to_string(),
            sentences: units.to_vec(),
            created_at: now,
            updated_at: now,
        };

        let mut next = Vec::with_capacity(self.scripts.len() + 1);
        next.push(script.clone());
        next.extend(self.scripts.iter().cloned());
        self.commit(next)?;

        tracing::info!(id = %script.id, name = %script.name, "saved script");
        Ok(script)
    }

    /// Replaces the sentences of script `id` with a copy of `units`.
    ///
    /// Returns `Ok(false)` without writing when no such script exists.
    pub fn update(&mut self, id: &str, units: &[SentenceUnit]) -> Result<bool> {
        let Some(position) = self.position(id) else {
            tracing::debug!(id, "update ignored: script not found");
            return Ok(false);
        };

        let mut next = self.scripts.clone();
        let script = &mut next[position];
        script.sentences = units.to_vec();
        script.updated_at = now_millis().max(script.updated_at);
        self.commit(next)?;

        tracing::info!(id, "updated script");
        Ok(true)
    }

    /// Removes script `id`.
    ///
    /// Returns `Ok(false)` without writing when no such script exists.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let Some(position) = self.position(id) else {
            tracing::debug!(id, "delete ignored: script not found");
            return Ok(false);
        };

        let mut next = self.scripts.clone();
        next.remove(position);
        self.commit(next)?;

        tracing::info!(id, "deleted script");
        Ok(true)
    }

    /// Returns a copy of the sentences of script `id`, or `None` if absent.
    pub fn load(&self, id: &str) -> Option<Vec<SentenceUnit>> {
        self.get(id).map(|script| script.sentences.clone())
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.scripts.iter().position(|script| script.id == id)
    }

    fn commit(&mut self, next: Vec<SavedScript>) -> Result<()> {
        if self.unreadable {
            if let Err(e) = self.repository.back_up() {
                tracing::error!("Refusing to overwrite unreadable scripts: backup failed: {}", e);
                return Err(e);
            }
            self.unreadable = false;
        }

        if let Err(e) = self.repository.write_all(&next) {
            tracing::error!("Failed to save scripts: {}", e);
            return Err(e);
        }
        self.scripts = next;
        Ok(())
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
