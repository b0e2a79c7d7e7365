use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub speech: SpeechSettings,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct StorageConfig {
    /// Overrides the default scripts file location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scripts_file: Option<PathBuf>,
}

/// Playback settings handed to the speech collaborator.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SpeechSettings {
    /// External synthesizer program; no playback when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    /// Preferred voice language tag
    #[serde(default = "default_voice")]
    pub voice: String,
    /// Speaking rate, 1.0 being normal speed
    #[serde(default = "default_rate")]
    pub rate: f32,
    #[serde(default = "default_pitch")]
    pub pitch: f32,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            command: None,
            voice: default_voice(),
            rate: default_rate(),
            pitch: default_pitch(),
        }
    }
}

fn default_voice() -> String {
    "en-US".to_string()
}

// slightly slower than normal for practice
fn default_rate() -> f32 {
    0.9
}

fn default_pitch() -> f32 {
    1.0
}
