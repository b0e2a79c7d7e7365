use super::model::{ScriptBinding, Session};
use crate::error::{Result, ShadowError};
use crate::script::{MAX_SCRIPTS, SavedScript, ScriptRepository, SnapshotStore, normalize_name};
use crate::sentence::{self, SentenceUnit};

/// Why a request to save a new script was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveRejection {
    /// Name blank after trimming, or longer than 50 characters
    InvalidName,
    /// The session has no units
    EmptySession,
    /// The store already holds `MAX_SCRIPTS` scripts
    StoreFull,
}

/// Result of [`SessionManager::save_as`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(SavedScript),
    Rejected(SaveRejection),
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved(_))
    }
}

/// Drives user actions against a session and the snapshot store.
///
/// `SessionManager` is responsible for:
/// - Starting, resetting and editing the session
/// - Refusing new scripts once the store is full or the name is invalid
/// - Keeping the session binding in step with saves, loads and deletes
///
/// Editing operations that cannot apply return `false` and change nothing.
/// Persistence failures are returned as errors after the store has logged
/// them; the session itself is left as it was.
pub struct SessionManager<R: ScriptRepository> {
    session: Session,
    store: SnapshotStore<R>,
}

impl<R: ScriptRepository> SessionManager<R> {
    /// Creates a manager with an empty session over an opened store.
    pub fn new(store: SnapshotStore<R>) -> Self {
        Self {
            session: Session::new(),
            store,
        }
    }

    /// Opens the store on `repository` and creates a manager over it.
    pub fn with_repository(repository: R) -> Self {
        Self::new(SnapshotStore::open(repository))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn store(&self) -> &SnapshotStore<R> {
        &self.store
    }

    pub fn units(&self) -> &[SentenceUnit] {
        &self.session.units
    }

    pub fn binding(&self) -> &ScriptBinding {
        &self.session.binding
    }

    /// The session's units as plain sentence strings.
    pub fn sentences(&self) -> Vec<String> {
        sentence::texts(&self.session.units)
    }

    /// Saved scripts, most recently created first.
    pub fn scripts(&self) -> &[SavedScript] {
        self.store.list()
    }

    /// Capacity shown to management surfaces.
    pub fn max_scripts(&self) -> usize {
        MAX_SCRIPTS
    }

    /// Replaces the session with the segmentation of `text`.
    ///
    /// Returns the number of units produced.
    pub fn start(&mut self, text: &str) -> usize {
        self.session = Session::from_text(text);
        tracing::debug!(units = self.session.units.len(), "started session");
        self.session.units.len()
    }

    /// Discards the session.
    pub fn reset(&mut self) {
        self.session = Session::new();
    }

    pub fn merge(&mut self, index: usize) -> bool {
        sentence::merge(&mut self.session.units, index)
    }

    pub fn split(&mut self, index: usize) -> bool {
        sentence::split(&mut self.session.units, index)
    }

    /// Changes the text of one unit; blank or unchanged text is ignored.
    pub fn edit_sentence(&mut self, index: usize, text: &str) -> bool {
        sentence::edit_text(&mut self.session.units, index, text)
    }

    /// Replaces the units wholesale, e.g. with the result of a
    /// [`sentence::SentenceEditor`]. The binding is kept.
    ///
    /// Units whose indices do not form a partition are renumbered.
    pub fn replace_units(&mut self, mut units: Vec<SentenceUnit>) {
        if sentence::repair_partition(&mut units) {
            tracing::warn!(units = units.len(), "replacement units were not a partition; renumbered");
        }
        self.session.units = units;
    }

    /// Whether a new script may be created from the session right now.
    pub fn can_save_new(&self) -> bool {
        !self.store.is_full() && !self.session.is_empty()
    }

    /// Saves the session as a new script named `name` and binds to it.
    ///
    /// Invalid names, empty sessions and a full store are refused with a
    /// [`SaveOutcome::Rejected`]; the store is left untouched.
    pub fn save_as(&mut self, name: &str) -> Result<SaveOutcome> {
        let Some(name) = normalize_name(name) else {
            tracing::debug!("save refused: invalid name");
            return Ok(SaveOutcome::Rejected(SaveRejection::InvalidName));
        };
        if self.session.is_empty() {
            tracing::debug!("save refused: session is empty");
            return Ok(SaveOutcome::Rejected(SaveRejection::EmptySession));
        }
        if self.store.is_full() {
            tracing::debug!(max = MAX_SCRIPTS, "save refused: store is full");
            return Ok(SaveOutcome::Rejected(SaveRejection::StoreFull));
        }

        let script = self.store.save(&self.session.units, &name)?;
        self.session.binding = ScriptBinding::Bound(script.id.clone());
        Ok(SaveOutcome::Saved(script))
    }

    /// Writes the session's units into script `id`.
    ///
    /// Returns `Ok(false)` when no such script exists.
    pub fn update(&mut self, id: &str) -> Result<bool> {
        self.store.update(id, &self.session.units)
    }

    /// Writes the session's units into its bound script.
    ///
    /// Returns `Ok(false)` when the session is unsaved or its script is gone.
    pub fn update_bound(&mut self) -> Result<bool> {
        match self.session.binding.script_id() {
            Some(id) => {
                let id = id.to_string();
                self.update(&id)
            }
            None => Ok(false),
        }
    }

    /// Deletes script `id`, clearing the session binding if it pointed there.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let deleted = self.store.delete(id)?;
        if self.session.binding.is_bound_to(id) {
            self.session.binding = ScriptBinding::Unsaved;
        }
        Ok(deleted)
    }

    /// Replaces the session with a copy of script `id` and binds to it.
    ///
    /// Stored units whose indices do not form a partition (documents written
    /// by older clients) are renumbered in the session; the stored script is
    /// left as it is until the next update.
    ///
    /// # Errors
    ///
    /// Returns `ShadowError::NotFound` if no such script exists; the session
    /// is left unchanged.
    pub fn load(&mut self, id: &str) -> Result<()> {
        let mut units = self
            .store
            .load(id)
            .ok_or_else(|| ShadowError::not_found("script", id))?;
        if sentence::repair_partition(&mut units) {
            tracing::warn!(id, "stored script indices were not a partition; renumbered");
        }
        tracing::debug!(id, units = units.len(), "loaded script into session");
        self.session = Session {
            units,
            binding: ScriptBinding::Bound(id.to_string()),
        };
        Ok(())
    }
}
