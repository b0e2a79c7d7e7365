use super::{CaptureReset, Speaker};
use crate::error::Result;

/// Position within a sentence list, clamped to its bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PracticeCursor {
    position: usize,
    len: usize,
}

impl PracticeCursor {
    pub fn new(len: usize) -> Self {
        Self { position: 0, len }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_first(&self) -> bool {
        self.position == 0
    }

    pub fn is_last(&self) -> bool {
        self.position + 1 >= self.len
    }

    /// Fraction of the list reached, counting the current sentence.
    pub fn progress(&self) -> f64 {
        if self.len == 0 {
            return 0.0;
        }
        (self.position + 1) as f64 / self.len as f64
    }

    /// Moves forward; returns false at the last sentence.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.position += 1;
        true
    }

    /// Moves back; returns false at the first sentence.
    pub fn prev(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.position -= 1;
        true
    }

    /// Jumps to `position`; out-of-range or same-position jumps are ignored.
    pub fn jump(&mut self, position: usize) -> bool {
        if position >= self.len || position == self.position {
            return false;
        }
        self.position = position;
        true
    }

    /// Adapts to a list that changed length, keeping the position in range.
    ///
    /// Returns true when the position had to move.
    pub fn resize(&mut self, len: usize) -> bool {
        self.len = len;
        let clamped = self.position.min(len.saturating_sub(1));
        let moved = clamped != self.position;
        self.position = clamped;
        moved
    }
}

/// A practice pass over a sentence list with its collaborators attached.
///
/// Every position change fires the capture reset.
pub struct Rehearsal<S: Speaker, C: CaptureReset> {
    cursor: PracticeCursor,
    speaker: S,
    capture: C,
}

impl<S: Speaker, C: CaptureReset> Rehearsal<S, C> {
    pub fn new(len: usize, speaker: S, capture: C) -> Self {
        Self {
            cursor: PracticeCursor::new(len),
            speaker,
            capture,
        }
    }

    pub fn cursor(&self) -> &PracticeCursor {
        &self.cursor
    }

    pub fn speaker(&self) -> &S {
        &self.speaker
    }

    pub fn capture(&self) -> &C {
        &self.capture
    }

    pub fn next(&mut self) -> bool {
        let moved = self.cursor.next();
        self.after_move(moved)
    }

    pub fn prev(&mut self) -> bool {
        let moved = self.cursor.prev();
        self.after_move(moved)
    }

    pub fn jump(&mut self, position: usize) -> bool {
        let moved = self.cursor.jump(position);
        self.after_move(moved)
    }

    /// Follows a change in the number of sentences (after merge or split).
    pub fn resize(&mut self, len: usize) {
        let moved = self.cursor.resize(len);
        self.after_move(moved);
    }

    /// Speaks the current sentence of `sentences`.
    pub fn speak_current(&mut self, sentences: &[String]) -> Result<()> {
        match sentences.get(self.cursor.position()) {
            Some(text) => self.speaker.speak(text),
            None => Ok(()),
        }
    }

    pub fn stop(&mut self) {
        self.speaker.stop();
    }

    fn after_move(&mut self, moved: bool) -> bool {
        if moved {
            self.speaker.stop();
            self.capture.reset();
        }
        moved
    }
}
