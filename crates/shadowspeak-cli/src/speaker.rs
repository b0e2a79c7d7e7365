//! Speech through an external text-to-speech command.

use std::process::{Child, Command, Stdio};

use shadowspeak_core::ShadowError;
use shadowspeak_core::config::SpeechSettings;
use shadowspeak_core::practice::{SilentSpeaker, Speaker};

/// Words per minute at rate 1.0.
const BASE_WORDS_PER_MINUTE: f32 = 175.0;

/// Builds the speaker described by `settings`.
///
/// Without a configured command nothing is spoken.
pub fn from_settings(settings: &SpeechSettings) -> Box<dyn Speaker> {
    match &settings.command {
        Some(command) => Box::new(CommandSpeaker::new(command.clone(), settings.clone())),
        None => {
            tracing::debug!("No speech command configured, speech disabled");
            Box::new(SilentSpeaker)
        }
    }
}

/// Speaks by spawning `command` with espeak-style flags, or `say` flags on macOS.
///
/// Only one utterance runs at a time: speaking again or stopping kills the
/// previous child process.
pub struct CommandSpeaker {
    program: String,
    settings: SpeechSettings,
    current: Option<Child>,
}

impl CommandSpeaker {
    pub fn new(program: String, settings: SpeechSettings) -> Self {
        Self {
            program,
            settings,
            current: None,
        }
    }

    fn args(&self, text: &str) -> Vec<String> {
        let words_per_minute = (BASE_WORDS_PER_MINUTE * self.settings.rate).round().max(1.0) as u32;
        if self.is_say() {
            return vec!["-r".to_string(), words_per_minute.to_string(), text.to_string()];
        }

        let pitch = (50.0 * self.settings.pitch).round().clamp(0.0, 99.0) as u32;
        vec![
            "-s".to_string(),
            words_per_minute.to_string(),
            "-p".to_string(),
            pitch.to_string(),
            "-v".to_string(),
            self.settings.voice.to_lowercase(),
            text.to_string(),
        ]
    }

    fn is_say(&self) -> bool {
        std::path::Path::new(&self.program)
            .file_name()
            .is_some_and(|name| name == "say")
    }
}

impl Speaker for CommandSpeaker {
    fn speak(&mut self, text: &str) -> shadowspeak_core::Result<()> {
        self.stop();

        let child = Command::new(&self.program)
            .args(self.args(text))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| ShadowError::playback(format!("Failed to run '{}': {}", self.program, e)))?;
        tracing::debug!(pid = child.id(), "speaking");
        self.current = Some(child);
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(mut child) = self.current.take() {
            if let Ok(None) = child.try_wait() {
                let _ = child.kill();
            }
            let _ = child.wait();
        }
    }
}

impl Drop for CommandSpeaker {
    fn drop(&mut self) {
        self.stop();
    }
}
