//! Saved script domain model.

use crate::sentence::SentenceUnit;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of saved scripts.
///
/// The store does not enforce this; whatever drives user actions must refuse
/// to create a script once the store holds this many.
pub const MAX_SCRIPTS: usize = 10;

/// Maximum script name length, in characters, after trimming.
pub const MAX_NAME_CHARS: usize = 50;

/// A named, durable snapshot of a session's units.
///
/// This is the persisted layout: the store file holds a JSON array of these,
/// newest first, with camelCase keys and millisecond Unix timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedScript {
    /// Unique script identifier (`script-<uuid>`)
    pub id: String,
    /// Display name, trimmed, 1 to 50 characters
    pub name: String,
    /// Value copy of the session units at the last save or update
    pub sentences: Vec<SentenceUnit>,
    /// Creation time (Unix milliseconds)
    pub created_at: i64,
    /// Last update time (Unix milliseconds), never before `created_at`
    pub updated_at: i64,
}

impl SavedScript {
    /// Builds the list-view summary of this script as seen at `now_ms`.
    pub fn summary(&self, now_ms: i64) -> ScriptSummary {
        ScriptSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            sentence_count: self.sentences.len(),
            preview: self.sentences.first().map(|s| s.text.clone()),
            has_more: self.sentences.len() > 1,
            updated_label: relative_time_label(self.updated_at, now_ms),
        }
    }
}

/// What a management surface shows for one saved script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptSummary {
    pub id: String,
    pub name: String,
    pub sentence_count: usize,
    /// First sentence, if any
    pub preview: Option<String>,
    /// More sentences follow the preview
    pub has_more: bool,
    /// e.g. "Just now", "5m ago", "2d ago" or a calendar date
    pub updated_label: String,
}

/// Trims and validates a script name.
///
/// Returns `None` for blank names and names longer than [`MAX_NAME_CHARS`].
pub fn normalize_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.chars().count() > MAX_NAME_CHARS {
        return None;
    }
    Some(trimmed.to_string())
}

/// Formats how long ago `then_ms` was, relative to `now_ms`.
pub fn relative_time_label(then_ms: i64, now_ms: i64) -> String {
    let diff_ms = now_ms.saturating_sub(then_ms);
    let mins = diff_ms / 60_000;
    let hours = diff_ms / 3_600_000;
    let days = diff_ms / 86_400_000;

    if mins < 1 {
        "Just now".to_string()
    } else if mins < 60 {
        format!("{mins}m ago")
    } else if hours < 24 {
        format!("{hours}h ago")
    } else if days < 7 {
        format!("{days}d ago")
    } else {
        DateTime::<Utc>::from_timestamp_millis(then_ms)
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "Long ago".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINUTE: i64 = 60_000;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Speech  "), Some("Speech".to_string()));
        assert_eq!(normalize_name("   "), None);
        assert_eq!(normalize_name(""), None);
        assert!(normalize_name(&"x".repeat(50)).is_some());
        assert!(normalize_name(&"x".repeat(51)).is_none());
        // characters, not bytes
        assert!(normalize_name(&"é".repeat(50)).is_some());
    }

    #[test]
    fn test_relative_time_label() {
        let now = 1_700_000_000_000;
        assert_eq!(relative_time_label(now - 30_000, now), "Just now");
        assert_eq!(relative_time_label(now - 5 * MINUTE, now), "5m ago");
        assert_eq!(relative_time_label(now - 3 * 60 * MINUTE, now), "3h ago");
        assert_eq!(relative_time_label(now - 2 * 24 * 60 * MINUTE, now), "2d ago");
        assert_eq!(relative_time_label(0, now), "1970-01-01");
        // clock moved backwards
        assert_eq!(relative_time_label(now + MINUTE, now), "Just now");
    }

    #[test]
    fn test_summary() {
        let script = SavedScript {
            id: "script-1".to_string(),
            name: "Talk".to_string(),
            sentences: vec![
                SentenceUnit::original(0, "Hello."),
                SentenceUnit::original(1, "Bye."),
            ],
            created_at: 0,
            updated_at: 0,
        };
        let summary = script.summary(0);
        assert_eq!(summary.sentence_count, 2);
        assert_eq!(summary.preview.as_deref(), Some("Hello."));
        assert!(summary.has_more);
        assert_eq!(summary.updated_label, "Just now");
    }

    #[test]
    fn test_persisted_layout_keys() {
        let script = SavedScript {
            id: "script-1".to_string(),
            name: "Talk".to_string(),
            sentences: vec![SentenceUnit::original(0, "Hello.")],
            created_at: 10,
            updated_at: 20,
        };
        let value = serde_json::to_value(&script).unwrap();
        assert_eq!(value["createdAt"], 10);
        assert_eq!(value["updatedAt"], 20);
        assert_eq!(value["sentences"][0]["originalIndices"][0], 0);
    }
}
