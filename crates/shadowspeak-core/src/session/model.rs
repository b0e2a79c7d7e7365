//! Session domain model.

use crate::sentence::{SentenceUnit, segment};

/// Association between a session and a saved script.
///
/// The association is weak: a bound session does not own the script, and the
/// binding is cleared when the script is deleted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ScriptBinding {
    /// The session has not been saved, or its script was deleted
    #[default]
    Unsaved,
    /// The session was saved as, or loaded from, this script id
    Bound(String),
}

impl ScriptBinding {
    /// The bound script id, if any.
    pub fn script_id(&self) -> Option<&str> {
        match self {
            Self::Unsaved => None,
            Self::Bound(id) => Some(id),
        }
    }

    pub fn is_bound(&self) -> bool {
        matches!(self, Self::Bound(_))
    }

    /// Returns true when bound to exactly `id`.
    pub fn is_bound_to(&self, id: &str) -> bool {
        self.script_id() == Some(id)
    }
}

/// The current working set.
///
/// The session owns its units; nothing is shared with saved scripts. It lives
/// only as long as the process and is made durable only through the snapshot
/// store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Current unit sequence
    pub units: Vec<SentenceUnit>,
    /// Saved script this session is associated with
    pub binding: ScriptBinding,
}

impl Session {
    /// Creates an empty, unsaved session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an unsaved session from the segmentation of `text`.
    pub fn from_text(text: &str) -> Self {
        Self {
            units: segment(text),
            binding: ScriptBinding::Unsaved,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
