//! Collaborator interfaces for practice surfaces.
//!
//! Playback and recording live outside the core. The core only hands the
//! current sentence to a [`Speaker`] and tells a [`CaptureReset`] when the
//! current sentence changes. Position is owned by the presentation surface;
//! [`PracticeCursor`] is a helper such surfaces can use for it.

mod cursor;

pub use cursor::{PracticeCursor, Rehearsal};

use crate::error::Result;

/// Platform speech synthesis.
pub trait Speaker {
    /// Speaks `text`, cancelling anything still being spoken.
    fn speak(&mut self, text: &str) -> Result<()>;

    /// Stops any ongoing speech.
    fn stop(&mut self);
}

impl<S: Speaker + ?Sized> Speaker for Box<S> {
    fn speak(&mut self, text: &str) -> Result<()> {
        (**self).speak(text)
    }

    fn stop(&mut self) {
        (**self).stop()
    }
}

/// Receives the per-sentence reset signal.
///
/// Fired whenever the current sentence changes so that a recorder can drop
/// any capture in progress.
pub trait CaptureReset {
    fn reset(&mut self);
}

/// A speaker that says nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSpeaker;

impl Speaker for SilentSpeaker {
    fn speak(&mut self, _text: &str) -> Result<()> {
        Ok(())
    }

    fn stop(&mut self) {}
}

/// A recorder hook that ignores resets.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCapture;

impl CaptureReset for NoCapture {
    fn reset(&mut self) {}
}
